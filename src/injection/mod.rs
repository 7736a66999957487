//! Field injection.
//!
//! After a recipe produces a value, and before the value is shared or
//! cached, its marked fields are filled in by resolving each field's type
//! through the engine. Types opt in by implementing [`InjectFields`], either
//! by hand or with the [`inject_fields!`](crate::inject_fields) macro. The
//! impl lives next to the type, so private fields are injectable without any
//! visibility bypass.

mod marker;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::error::DiResult;
use crate::traits::{Resolvable, ResolverCore};

pub use marker::Marker;

/// Post-construction injection of marked fields.
///
/// The default method injects nothing, which is the behaviour for values
/// that are not records with markers. It is already implemented for
/// primitives, strings and the standard collections.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, DiResult, FieldInjector, InjectFields, Resolver};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Mailer {
///     sender: Option<Arc<String>>,
///     fallback: Option<Arc<String>>,
///     retries: u32,
/// }
///
/// impl InjectFields for Mailer {
///     fn inject_fields(&mut self, fields: &mut FieldInjector<'_>) -> DiResult<()> {
///         fields.inject("inject", &mut self.sender)?;
///         fields.inject("inject,key=backup", &mut self.fallback)?;
///         Ok(())
///     }
/// }
///
/// let container = Container::new();
/// container.register_instance(Arc::new("noreply@example.com".to_string()));
/// container
///     .bind::<String>()
///     .key("backup")
///     .to_instance(Arc::new("ops@example.com".to_string()));
/// container.register_transient::<Mailer, Mailer>();
///
/// let mailer = container.resolve::<Mailer>().unwrap();
/// assert_eq!(mailer.sender.as_deref().unwrap(), "noreply@example.com");
/// assert_eq!(mailer.fallback.as_deref().unwrap(), "ops@example.com");
/// assert_eq!(mailer.retries, 0);
/// ```
pub trait InjectFields {
    fn inject_fields(&mut self, fields: &mut FieldInjector<'_>) -> DiResult<()> {
        let _ = fields;
        Ok(())
    }
}

/// Resolves values for marked fields on behalf of [`InjectFields`] impls.
pub struct FieldInjector<'r> {
    resolver: &'r dyn ResolverCore,
    injected: usize,
}

impl<'r> FieldInjector<'r> {
    pub(crate) fn new(resolver: &'r dyn ResolverCore) -> Self {
        Self {
            resolver,
            injected: 0,
        }
    }

    /// Parses `marker` and, if it carries `inject`, resolves `R` with the
    /// marker's discriminator into `slot`.
    ///
    /// A previous value in `slot` is overwritten. A malformed marker fails
    /// with [`DiError::TagParse`](crate::DiError::TagParse) before anything
    /// is resolved.
    pub fn inject<R: Resolvable>(&mut self, marker: &str, slot: &mut Option<R>) -> DiResult<()> {
        let marker = Marker::parse(marker)?;
        if !marker.inject {
            return Ok(());
        }
        *slot = Some(R::resolve_from(self.resolver, marker.key.as_ref())?);
        self.injected += 1;
        Ok(())
    }

    /// Number of fields injected so far.
    pub fn injected(&self) -> usize {
        self.injected
    }
}

/// Implements [`InjectFields`] from a field/marker list.
///
/// Every listed field must be an `Option<R>` with `R:`[`Resolvable`]. Types
/// without markers can be listed on their own to get the no-op impl.
///
/// ```
/// use std::sync::Arc;
///
/// trait Store: Send + Sync {}
///
/// #[derive(Default)]
/// struct Catalog {
///     primary: Option<Arc<dyn Store>>,
///     replicas: Option<Vec<Arc<dyn Store>>>,
///     audit: Option<Arc<dyn Store>>,
/// }
///
/// #[derive(Default)]
/// struct Clock;
///
/// ferrous_ioc::inject_fields!(Catalog {
///     primary: "inject",
///     replicas: "inject,key=replica",
///     audit: "inject,key=audit",
/// });
/// ferrous_ioc::inject_fields!(Clock);
/// ```
#[macro_export]
macro_rules! inject_fields {
    ($ty:ty { $($field:ident : $marker:expr),* $(,)? }) => {
        impl $crate::InjectFields for $ty {
            #[allow(unused_variables)]
            fn inject_fields(
                &mut self,
                fields: &mut $crate::FieldInjector<'_>,
            ) -> $crate::DiResult<()> {
                $( fields.inject($marker, &mut self.$field)?; )*
                Ok(())
            }
        }
    };
    ($($ty:ty),+ $(,)?) => {
        $( impl $crate::InjectFields for $ty {} )+
    };
}

macro_rules! no_fields {
    ($($ty:ty),* $(,)?) => {
        $( impl InjectFields for $ty {} )*
    };
}

no_fields!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String, &'static str,
);

impl<T> InjectFields for Option<T> {}
impl<T> InjectFields for Vec<T> {}
impl<T> InjectFields for VecDeque<T> {}
impl<T: ?Sized> InjectFields for Box<T> {}
impl<T: ?Sized> InjectFields for Arc<T> {}
impl<K, V, S> InjectFields for HashMap<K, V, S> {}
impl<T, S> InjectFields for HashSet<T, S> {}
impl<K, V> InjectFields for BTreeMap<K, V> {}
impl<T> InjectFields for BTreeSet<T> {}
