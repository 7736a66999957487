//! Recipe and registry types.

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::activator::Activator;
use crate::error::DiResult;
use crate::internal::{next_id, Map};
use crate::key::ServiceKey;
use crate::policy::CachePolicy;
use crate::provider::ResolveContext;

// Type-erased instance storage; the concrete value is always an `Arc<T>`
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Base kind of a recipe, kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecipeKind {
    Implementation,
    Instance,
    Constructor,
    Factory,
}

/// A registered activation recipe with its decorator chain installed
pub(crate) struct Recipe {
    pub(crate) id: u64,
    pub(crate) service: &'static str,
    pub(crate) implementation: &'static str,
    pub(crate) kind: RecipeKind,
    pub(crate) policy: CachePolicy,
    activator: Arc<dyn Activator>,
}

impl Recipe {
    pub(crate) fn new(
        service: &'static str,
        implementation: &'static str,
        kind: RecipeKind,
        policy: CachePolicy,
        activator: Arc<dyn Activator>,
    ) -> Self {
        Self {
            id: next_id(),
            service,
            implementation,
            kind,
            policy,
            activator,
        }
    }

    #[inline]
    pub(crate) fn activate(&self, ctx: &ResolveContext<'_>) -> DiResult<AnyArc> {
        self.activator.activate(ctx)
    }
}

/// Ordered recipe lists keyed by service identity and discriminator
///
/// Shared by reference between a container and every scope opened under it.
#[derive(Default)]
pub(crate) struct Registry {
    entries: RwLock<Map<ServiceKey, Vec<Arc<Recipe>>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a recipe, preserving registration order.
    pub(crate) fn register(&self, key: ServiceKey, recipe: Recipe) {
        self.entries
            .write()
            .entry(key)
            .or_default()
            .push(Arc::new(recipe));
    }

    pub(crate) fn is_registered(&self, key: &ServiceKey) -> bool {
        self.entries
            .read()
            .get(key)
            .is_some_and(|recipes| !recipes.is_empty())
    }

    /// Removes every recipe under `key`; other keys are untouched.
    pub(crate) fn unregister(&self, key: &ServiceKey) -> bool {
        self.entries
            .write()
            .remove(key)
            .is_some_and(|recipes| !recipes.is_empty())
    }

    /// Snapshot of the recipes under exactly `key`, in registration order.
    pub(crate) fn lookup(&self, key: &ServiceKey) -> Vec<Arc<Recipe>> {
        self.entries.read().get(key).cloned().unwrap_or_default()
    }

    pub(crate) fn count(&self, key: &ServiceKey) -> usize {
        self.entries.read().get(key).map_or(0, Vec::len)
    }
}
