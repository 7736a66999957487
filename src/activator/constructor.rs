//! Constructor producers.

use std::marker::PhantomData;

use super::Produce;
use crate::error::{DiError, DiResult};
use crate::provider::ResolveContext;
use crate::traits::Constructor;

/// Calls an infallible constructor with resolved arguments.
pub(crate) struct ConstructorProducer<F, Args> {
    ctor: F,
    _args: PhantomData<fn() -> Args>,
}

impl<F, Args> ConstructorProducer<F, Args> {
    pub(crate) fn new(ctor: F) -> Self {
        Self {
            ctor,
            _args: PhantomData,
        }
    }
}

impl<F, Args, Impl> Produce<Impl> for ConstructorProducer<F, Args>
where
    F: Constructor<Args, Impl> + Send + Sync,
{
    fn produce(&self, ctx: &ResolveContext<'_>) -> DiResult<Impl> {
        self.ctor.construct(ctx)
    }
}

/// Calls a constructor returning `Result`, mapping `Err` to
/// [`DiError::Constructor`]. Errors from resolving its arguments pass
/// through unchanged.
pub(crate) struct FallibleConstructorProducer<F, Args, E> {
    ctor: F,
    _args: PhantomData<fn() -> (Args, E)>,
}

impl<F, Args, E> FallibleConstructorProducer<F, Args, E> {
    pub(crate) fn new(ctor: F) -> Self {
        Self {
            ctor,
            _args: PhantomData,
        }
    }
}

impl<F, Args, E, Impl> Produce<Impl> for FallibleConstructorProducer<F, Args, E>
where
    F: Constructor<Args, Result<Impl, E>> + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    fn produce(&self, ctx: &ResolveContext<'_>) -> DiResult<Impl> {
        self.ctor
            .construct(ctx)?
            .map_err(|e| DiError::constructor(std::any::type_name::<Impl>(), e))
    }
}
