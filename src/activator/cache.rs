//! Cache decorator.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Activator;
use crate::error::DiResult;
use crate::internal::{next_id, Map};
use crate::policy::CachePolicy;
use crate::provider::ResolveContext;
use crate::registration::AnyArc;

/// Instances keyed by the identity of the decorator that produced them.
pub(crate) type InstanceCache = Map<u64, AnyArc>;
pub(crate) type SharedCache = Arc<Mutex<InstanceCache>>;

pub(crate) fn shared_cache() -> SharedCache {
    Arc::new(Mutex::new(InstanceCache::default()))
}

/// Consults the policy's cache before delegating to the inner activator.
///
/// The cache slot is the decorator's own id, so two registrations of the
/// same service never share an entry.
pub(crate) struct CacheActivator {
    slot: u64,
    policy: CachePolicy,
    inner: Arc<dyn Activator>,
}

impl CacheActivator {
    /// Wraps `inner` for `policy`; [`CachePolicy::Never`] attaches nothing.
    pub(crate) fn decorate(inner: Arc<dyn Activator>, policy: CachePolicy) -> Arc<dyn Activator> {
        match policy {
            CachePolicy::Never => inner,
            CachePolicy::Global | CachePolicy::Scoped => Arc::new(Self {
                slot: next_id(),
                policy,
                inner,
            }),
        }
    }
}

impl Activator for CacheActivator {
    fn activate(&self, ctx: &ResolveContext<'_>) -> DiResult<AnyArc> {
        let Some(cache) = ctx.cache(self.policy) else {
            return self.inner.activate(ctx);
        };

        let hit = cache.lock().get(&self.slot).cloned();
        if let Some(instance) = hit {
            tracing::trace!(slot = self.slot, policy = ?self.policy, "cache hit");
            return Ok(instance);
        }

        // Never hold the lock while the inner activator runs: it may resolve
        // other cached services through the same map.
        let instance = self.inner.activate(ctx)?;

        let mut guard = cache.lock();
        let stored = guard.entry(self.slot).or_insert(instance).clone();
        Ok(stored)
    }
}
