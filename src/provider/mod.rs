//! Container module.
//!
//! This module contains the [`Container`] type, the root of a scope tree and
//! the only place recipes can be registered.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::activator::{Activator, CacheActivator};
use crate::binding::{Binding, RegisterOptions};
use crate::config::ContainerConfig;
use crate::error::DiResult;
use crate::injection::InjectFields;
use crate::key::{Discriminator, ServiceKey};
use crate::policy::{CachePolicy, ScopeCacheMode};
use crate::registration::{Recipe, RecipeKind, Registry};
use crate::traits::{ResolverCore, Upcast};

pub mod context;
pub mod scope;

pub use context::ResolveContext;
pub use scope::{Scope, ScopeCloser};

/// Service registry and root scope.
///
/// A container owns the registry and the global cache of its whole scope
/// tree. It resolves like any other [`Scope`] (it has its own scoped cache)
/// but has no closer, so it stays usable for its whole lifetime. Clones are
/// handles to the same container.
///
/// Construct one at the application's entry point and pass it on; there is
/// no process-wide default container.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, Resolver};
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// #[derive(Default)]
/// struct FixedClock;
/// impl Clock for FixedClock {
///     fn now(&self) -> u64 { 42 }
/// }
/// ferrous_ioc::upcast!(FixedClock => dyn Clock);
/// ferrous_ioc::inject_fields!(FixedClock);
///
/// let container = Container::new();
/// container.register_singleton::<dyn Clock, FixedClock>();
///
/// assert!(container.is_registered::<dyn Clock>());
/// assert_eq!(container.resolve::<dyn Clock>().unwrap().now(), 42);
///
/// assert!(container.unregister::<dyn Clock>());
/// assert!(container.resolve::<dyn Clock>().is_err());
/// ```
#[derive(Clone)]
pub struct Container {
    registry: Arc<Registry>,
    root: Scope,
    config: Arc<ContainerConfig>,
}

impl Container {
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        let registry = Arc::new(Registry::new());
        let config = Arc::new(config);
        let root = Scope::root(registry.clone(), config.clone());
        Self {
            registry,
            root,
            config,
        }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// The container's own root scope.
    pub fn scope(&self) -> &Scope {
        &self.root
    }

    /// Opens a child of the root scope. See [`Scope::open_scope`].
    pub fn open_scope(&self, mode: ScopeCacheMode) -> DiResult<(Scope, ScopeCloser)> {
        self.root.open_scope(mode)
    }

    /// Starts a registration of service `I`.
    ///
    /// The returned [`Binding`] collects the discriminator and cache policy
    /// and is completed by one of its `to*` methods.
    pub fn bind<I>(&self) -> Binding<'_, I>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Binding::new(self)
    }

    /// Registers `Impl::default()` as `I` with explicit options.
    pub fn register_with<I, Impl>(&self, options: RegisterOptions) -> &Self
    where
        I: ?Sized + Send + Sync + 'static,
        Impl: Default + InjectFields + Upcast<I>,
    {
        self.bind::<I>().with_options(options).to::<Impl>()
    }

    /// Registers `Impl::default()` as `I` with [`CachePolicy::Global`].
    pub fn register_singleton<I, Impl>(&self) -> &Self
    where
        I: ?Sized + Send + Sync + 'static,
        Impl: Default + InjectFields + Upcast<I>,
    {
        self.register_with::<I, Impl>(RegisterOptions::new().cache_policy(CachePolicy::Global))
    }

    /// Registers `Impl::default()` as `I` with [`CachePolicy::Scoped`].
    pub fn register_scoped<I, Impl>(&self) -> &Self
    where
        I: ?Sized + Send + Sync + 'static,
        Impl: Default + InjectFields + Upcast<I>,
    {
        self.register_with::<I, Impl>(RegisterOptions::new().cache_policy(CachePolicy::Scoped))
    }

    /// Registers `Impl::default()` as `I` with [`CachePolicy::Never`].
    pub fn register_transient<I, Impl>(&self) -> &Self
    where
        I: ?Sized + Send + Sync + 'static,
        Impl: Default + InjectFields + Upcast<I>,
    {
        self.register_with::<I, Impl>(RegisterOptions::new())
    }

    /// Registers a fixed anonymous instance of `I`.
    ///
    /// Every resolution returns this exact `Arc`.
    pub fn register_instance<I>(&self, instance: Arc<I>) -> &Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.bind::<I>().to_instance(instance)
    }

    pub fn is_registered<I: ?Sized + 'static>(&self) -> bool {
        self.registry.is_registered(&ServiceKey::of::<I>(None))
    }

    /// Whether `I` has recipes under `key`. Anonymous registrations do not count.
    pub fn is_registered_keyed<I: ?Sized + 'static>(&self, key: impl Into<Discriminator>) -> bool {
        self.registry.is_registered(&ServiceKey::keyed::<I>(key))
    }

    /// Removes every anonymous recipe of `I`; keyed ones are untouched.
    pub fn unregister<I: ?Sized + 'static>(&self) -> bool {
        self.unregister_key(ServiceKey::of::<I>(None))
    }

    /// Removes every recipe of `I` under `key`.
    pub fn unregister_keyed<I: ?Sized + 'static>(&self, key: impl Into<Discriminator>) -> bool {
        self.unregister_key(ServiceKey::keyed::<I>(key))
    }

    /// Number of recipes registered for `I` under `key`.
    pub fn registration_count<I: ?Sized + 'static>(&self, key: Option<Discriminator>) -> usize {
        self.registry.count(&ServiceKey::of::<I>(key))
    }

    fn unregister_key(&self, key: ServiceKey) -> bool {
        let removed = self.registry.unregister(&key);
        tracing::debug!(service = %key, removed, "unregistered service");
        removed
    }

    pub(crate) fn install(
        &self,
        key: ServiceKey,
        implementation: &'static str,
        kind: RecipeKind,
        policy: CachePolicy,
        activator: Arc<dyn Activator>,
    ) {
        let activator = CacheActivator::decorate(activator, policy);
        tracing::debug!(
            service = %key,
            implementation,
            kind = ?kind,
            policy = ?policy,
            "registered recipe"
        );
        let recipe = Recipe::new(key.type_name(), implementation, kind, policy, activator);
        self.registry.register(key, recipe);
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverCore for Container {
    fn resolve_erased(&self, key: &ServiceKey) -> DiResult<Arc<dyn Any + Send + Sync>> {
        self.root.resolve_erased(key)
    }

    fn resolve_all_erased(&self, key: &ServiceKey) -> DiResult<Vec<Arc<dyn Any + Send + Sync>>> {
        self.root.resolve_all_erased(key)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("root", &self.root)
            .field("config", &self.config)
            .finish()
    }
}
