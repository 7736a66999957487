//! Constructor functions whose parameters are resolved by the engine.

use crate::error::DiResult;
use crate::traits::{Resolvable, ResolverCore};

/// A function whose every parameter is [`Resolvable`].
///
/// Implemented for `Fn(A1, ..., An) -> Out` with up to eight parameters.
/// Parameters are resolved in order, each without a discriminator; the first
/// failure aborts the call and is returned unchanged.
///
/// `Args` is the tuple of parameter types. It only exists to keep the
/// per-arity impls apart and is always inferred.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, Resolver};
/// use std::sync::Arc;
///
/// struct Config { port: u16 }
/// struct Server { config: Arc<Config> }
/// ferrous_ioc::inject_fields!(Server);
///
/// let container = Container::new();
/// container.register_instance(Arc::new(Config { port: 8080 }));
///
/// let server = container
///     .resolve_function(|config: Arc<Config>| Server { config })
///     .unwrap();
/// assert_eq!(server.config.port, 8080);
/// ```
pub trait Constructor<Args, Out> {
    /// Resolves the parameters through `resolver` and calls the function.
    fn construct(&self, resolver: &dyn ResolverCore) -> DiResult<Out>;

    /// Number of parameters the function takes.
    fn arity(&self) -> usize;
}

macro_rules! impl_constructor {
    ($count:expr; $($arg:ident $value:ident),*) => {
        impl<F, Out, $($arg,)*> Constructor<($($arg,)*), Out> for F
        where
            F: Fn($($arg),*) -> Out,
            $($arg: Resolvable,)*
        {
            #[allow(unused_variables)]
            fn construct(&self, resolver: &dyn ResolverCore) -> DiResult<Out> {
                $(let $value = <$arg as Resolvable>::resolve_from(resolver, None)?;)*
                Ok((self)($($value),*))
            }

            fn arity(&self) -> usize {
                $count
            }
        }
    };
}

impl_constructor!(0;);
impl_constructor!(1; A1 a1);
impl_constructor!(2; A1 a1, A2 a2);
impl_constructor!(3; A1 a1, A2 a2, A3 a3);
impl_constructor!(4; A1 a1, A2 a2, A3 a3, A4 a4);
impl_constructor!(5; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_constructor!(6; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_constructor!(7; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_constructor!(8; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);
