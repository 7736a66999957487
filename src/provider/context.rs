//! Resolution context and the recipe selection algorithm.

use std::any::Any;
use std::sync::Arc;

use super::scope::ScopeState;
use crate::activator::SharedCache;
use crate::error::{DiError, DiResult};
use crate::internal::ResolutionStack;
use crate::key::ServiceKey;
use crate::policy::CachePolicy;
use crate::registration::{AnyArc, Recipe};
use crate::traits::ResolverCore;

/// Context passed to factories and activators for resolving dependencies.
///
/// One context lives for the duration of a single top-level resolution
/// against a scope. Nested resolutions flow through the same context, which
/// is how cyclic dependencies are detected.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, Resolver};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
/// ferrous_ioc::inject_fields!(UserService);
///
/// let container = Container::new();
/// container.register_instance(Arc::new(Database {
///     url: "postgres://localhost".to_string(),
/// }));
/// container.bind::<UserService>().to_factory(|ctx| {
///     // ctx is a ResolveContext that provides access to other services
///     Ok(UserService { db: ctx.resolve::<Database>()? })
/// });
///
/// let users = container.resolve::<UserService>().unwrap();
/// assert_eq!(users.db.url, "postgres://localhost");
/// ```
pub struct ResolveContext<'a> {
    state: &'a ScopeState,
    stack: ResolutionStack,
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(state: &'a ScopeState) -> Self {
        Self {
            state,
            stack: ResolutionStack::new(state.config.max_depth),
        }
    }

    /// The cache map a policy reads and writes in this context.
    pub(crate) fn cache(&self, policy: CachePolicy) -> Option<&SharedCache> {
        match policy {
            CachePolicy::Global => Some(&self.state.global),
            CachePolicy::Scoped => Some(&self.state.scoped),
            CachePolicy::Never => None,
        }
    }

    /// Id of the scope this resolution runs against.
    pub fn scope_id(&self) -> u64 {
        self.state.scope_id
    }

    fn activate(&self, recipe: &Recipe) -> DiResult<AnyArc> {
        let _guard = self.stack.enter(recipe.id, recipe.service)?;
        tracing::trace!(
            service = recipe.service,
            implementation = recipe.implementation,
            kind = ?recipe.kind,
            policy = ?recipe.policy,
            scope = self.state.scope_id,
            "activating recipe"
        );
        recipe.activate(self)
    }

    pub(crate) fn resolve_one(&self, key: &ServiceKey) -> DiResult<AnyArc> {
        let recipes = self.state.registry.lookup(key);
        match recipes.as_slice() {
            [] => Err(DiError::NoRegistration(key.clone())),
            [recipe] => self.activate(recipe),
            many => Err(DiError::AmbiguousRegistration {
                key: key.clone(),
                count: many.len(),
            }),
        }
    }

    pub(crate) fn resolve_all(&self, key: &ServiceKey) -> DiResult<Vec<AnyArc>> {
        let recipes = self.state.registry.lookup(key);
        if recipes.is_empty() {
            return Err(DiError::NoRegistration(key.clone()));
        }
        recipes.iter().map(|recipe| self.activate(recipe)).collect()
    }
}

impl ResolverCore for ResolveContext<'_> {
    fn resolve_erased(&self, key: &ServiceKey) -> DiResult<Arc<dyn Any + Send + Sync>> {
        self.resolve_one(key)
    }

    fn resolve_all_erased(&self, key: &ServiceKey) -> DiResult<Vec<Arc<dyn Any + Send + Sync>>> {
        self.resolve_all(key)
    }
}
