//! Activators and their decorator chain.
//!
//! A registered recipe is assembled bottom-up:
//!
//! 1. a typed producer builds the implementation value (default
//!    construction, constructor call, or factory);
//! 2. [`FieldInjection`] fills the value's marked fields;
//! 3. [`Erase`] moves it into an `Arc`, upcasts it to the service identity
//!    and erases the type;
//! 4. [`CacheActivator`] optionally stores the erased instance in the global
//!    or scoped cache.
//!
//! Field injection therefore runs before the value is shared, and only
//! fully injected instances ever reach a cache. Fixed instances skip steps
//! 1-3 entirely via [`InstanceActivator`].

mod base;
mod cache;
mod constructor;

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::DiResult;
use crate::injection::{FieldInjector, InjectFields};
use crate::provider::ResolveContext;
use crate::registration::AnyArc;
use crate::traits::Upcast;

pub(crate) use base::{DefaultProducer, FactoryProducer, InstanceActivator};
pub(crate) use cache::{shared_cache, CacheActivator, SharedCache};
pub(crate) use constructor::{ConstructorProducer, FallibleConstructorProducer};

/// Type-erased activation step shared by every recipe.
pub(crate) trait Activator: Send + Sync {
    fn activate(&self, ctx: &ResolveContext<'_>) -> DiResult<AnyArc>;
}

/// Typed production step, before the value is shared.
pub(crate) trait Produce<T>: Send + Sync {
    fn produce(&self, ctx: &ResolveContext<'_>) -> DiResult<T>;
}

/// Runs [`InjectFields`] on whatever the inner producer builds.
pub(crate) struct FieldInjection<P> {
    inner: P,
}

impl<P> FieldInjection<P> {
    pub(crate) fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P, T> Produce<T> for FieldInjection<P>
where
    P: Produce<T>,
    T: InjectFields,
{
    fn produce(&self, ctx: &ResolveContext<'_>) -> DiResult<T> {
        let mut instance = self.inner.produce(ctx)?;
        let mut fields = FieldInjector::new(ctx);
        instance.inject_fields(&mut fields)?;
        if fields.injected() > 0 {
            tracing::trace!(
                implementation = std::any::type_name::<T>(),
                fields = fields.injected(),
                "injected fields"
            );
        }
        Ok(instance)
    }
}

/// Shares, upcasts and erases a produced implementation value.
pub(crate) struct Erase<P, Impl, I: ?Sized> {
    producer: P,
    _types: PhantomData<fn() -> (Impl, Arc<I>)>,
}

impl<P, Impl, I: ?Sized> Erase<P, Impl, I> {
    pub(crate) fn new(producer: P) -> Self {
        Self {
            producer,
            _types: PhantomData,
        }
    }
}

impl<P, Impl, I> Activator for Erase<P, Impl, I>
where
    P: Produce<Impl>,
    Impl: Upcast<I>,
    I: ?Sized + Send + Sync + 'static,
{
    fn activate(&self, ctx: &ResolveContext<'_>) -> DiResult<AnyArc> {
        let instance = self.producer.produce(ctx)?;
        let service = <Impl as Upcast<I>>::upcast(Arc::new(instance));
        Ok(Arc::new(service))
    }
}

/// Assembles steps 1-3 for a typed producer.
pub(crate) fn erased<P, Impl, I>(producer: P) -> Arc<dyn Activator>
where
    P: Produce<Impl> + 'static,
    Impl: InjectFields + Upcast<I>,
    I: ?Sized + Send + Sync + 'static,
{
    Arc::new(Erase::<_, Impl, I>::new(FieldInjection::new(producer)))
}
