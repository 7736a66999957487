//! Base producers: default construction, factories and fixed instances.

use std::marker::PhantomData;
use std::sync::Arc;

use super::{Activator, Produce};
use crate::error::DiResult;
use crate::provider::ResolveContext;
use crate::registration::AnyArc;

/// Builds `Impl::default()`.
pub(crate) struct DefaultProducer<Impl> {
    _impl: PhantomData<fn() -> Impl>,
}

impl<Impl> DefaultProducer<Impl> {
    pub(crate) fn new() -> Self {
        Self { _impl: PhantomData }
    }
}

impl<Impl: Default> Produce<Impl> for DefaultProducer<Impl> {
    #[inline]
    fn produce(&self, _ctx: &ResolveContext<'_>) -> DiResult<Impl> {
        Ok(Impl::default())
    }
}

/// Calls a hand-written factory with the active resolution context.
pub(crate) struct FactoryProducer<F> {
    factory: F,
}

impl<F> FactoryProducer<F> {
    pub(crate) fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<F, Impl> Produce<Impl> for FactoryProducer<F>
where
    F: Fn(&ResolveContext<'_>) -> DiResult<Impl> + Send + Sync,
{
    fn produce(&self, ctx: &ResolveContext<'_>) -> DiResult<Impl> {
        (self.factory)(ctx)
    }
}

/// Returns the same previously supplied instance on every activation.
pub(crate) struct InstanceActivator {
    instance: AnyArc,
}

impl InstanceActivator {
    pub(crate) fn new<I>(instance: Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self {
            instance: Arc::new(instance),
        }
    }
}

impl Activator for InstanceActivator {
    #[inline]
    fn activate(&self, _ctx: &ResolveContext<'_>) -> DiResult<AnyArc> {
        Ok(self.instance.clone())
    }
}
