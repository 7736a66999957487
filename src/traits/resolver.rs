//! Resolver traits for service resolution.

use std::any::Any;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::injection::{FieldInjector, InjectFields};
use crate::key::{Discriminator, ServiceKey};
use crate::traits::Constructor;

/// Core resolver trait for object-safe service resolution.
///
/// This trait exposes the two fundamental lookups of the engine on
/// type-erased instances: a single-value resolution that fails on zero or
/// several recipes, and a resolve-all that returns every recipe's instance
/// in registration order.
///
/// Most users should use the [`Resolver`] trait instead, which provides
/// typed generic methods built on top of this trait.
pub trait ResolverCore {
    /// Resolves exactly one recipe registered under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The instance; its concrete type is `Arc<T>` for the
    ///   service `T` that `key` names
    /// * `Err(DiError)` - `NoRegistration`, `AmbiguousRegistration`, or any
    ///   error raised while activating the recipe
    fn resolve_erased(&self, key: &ServiceKey) -> DiResult<Arc<dyn Any + Send + Sync>>;

    /// Resolves every recipe registered under `key`, in registration order.
    ///
    /// Fails with `NoRegistration` rather than returning an empty vector, and
    /// fails as a whole if any single activation fails.
    fn resolve_all_erased(&self, key: &ServiceKey) -> DiResult<Vec<Arc<dyn Any + Send + Sync>>>;
}

fn downcast<T>(any: Arc<dyn Any + Send + Sync>) -> DiResult<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    any.downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or(DiError::TypeMismatch(std::any::type_name::<T>()))
}

/// A value the engine can produce for a constructor parameter or an
/// injected field.
///
/// * `Arc<T>` resolves the single recipe registered for `T`.
/// * `Vec<Arc<T>>` resolves all recipes registered for `T`.
pub trait Resolvable: Sized {
    fn resolve_from(resolver: &dyn ResolverCore, key: Option<&Discriminator>) -> DiResult<Self>;
}

impl<T> Resolvable for Arc<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn resolve_from(resolver: &dyn ResolverCore, key: Option<&Discriminator>) -> DiResult<Self> {
        let key = ServiceKey::of::<T>(key.cloned());
        downcast::<T>(resolver.resolve_erased(&key)?)
    }
}

impl<T> Resolvable for Vec<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn resolve_from(resolver: &dyn ResolverCore, key: Option<&Discriminator>) -> DiResult<Self> {
        let key = ServiceKey::of::<T>(key.cloned());
        resolver
            .resolve_all_erased(&key)?
            .into_iter()
            .map(downcast::<T>)
            .collect()
    }
}

/// High-level resolver interface with generic methods for type-safe service resolution.
///
/// Implemented for every [`ResolverCore`]: the [`Container`](crate::Container),
/// every [`Scope`](crate::Scope), and the [`ResolveContext`](crate::ResolveContext)
/// handed to factories.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, Resolver};
/// use std::sync::Arc;
///
/// trait Plugin: Send + Sync {
///     fn name(&self) -> &str;
/// }
///
/// struct PluginA;
/// impl Plugin for PluginA {
///     fn name(&self) -> &str { "Plugin A" }
/// }
///
/// struct PluginB;
/// impl Plugin for PluginB {
///     fn name(&self) -> &str { "Plugin B" }
/// }
///
/// let container = Container::new();
/// container.register_instance::<dyn Plugin>(Arc::new(PluginA));
/// container.register_instance::<dyn Plugin>(Arc::new(PluginB));
///
/// // Two recipes: the single form refuses to guess
/// assert!(container.resolve::<dyn Plugin>().is_err());
///
/// let plugins = container.resolve_many::<dyn Plugin>().unwrap();
/// let names: Vec<&str> = plugins.iter().map(|p| p.name()).collect();
/// assert_eq!(names, vec!["Plugin A", "Plugin B"]);
/// ```
pub trait Resolver: ResolverCore + Sized {
    /// Resolves any [`Resolvable`] shape with an optional discriminator.
    fn resolve_as<R: Resolvable>(&self, key: Option<&Discriminator>) -> DiResult<R> {
        R::resolve_from(self, key)
    }

    /// Resolves the anonymous registration of service `T`.
    fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.resolve_as::<Arc<T>>(None)
    }

    /// Resolves the registration of service `T` under `key`.
    ///
    /// Keyed and anonymous registrations are distinct; there is no fallback.
    fn resolve_keyed<T: ?Sized + Send + Sync + 'static>(
        &self,
        key: impl Into<Discriminator>,
    ) -> DiResult<Arc<T>> {
        self.resolve_as::<Arc<T>>(Some(&key.into()))
    }

    /// Resolves every anonymous registration of service `T`.
    fn resolve_many<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Vec<Arc<T>>> {
        self.resolve_as::<Vec<Arc<T>>>(None)
    }

    fn resolve_many_keyed<T: ?Sized + Send + Sync + 'static>(
        &self,
        key: impl Into<Discriminator>,
    ) -> DiResult<Vec<Arc<T>>> {
        self.resolve_as::<Vec<Arc<T>>>(Some(&key.into()))
    }

    /// Resolves a service, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the service cannot be resolved (not registered, ambiguous,
    /// constructor failure, closed scope, etc.).
    fn must_resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Arc<T> {
        self.resolve::<T>()
            .unwrap_or_else(|e| panic!("failed to resolve {}: {}", std::any::type_name::<T>(), e))
    }

    fn must_resolve_keyed<T: ?Sized + Send + Sync + 'static>(
        &self,
        key: impl Into<Discriminator>,
    ) -> Arc<T> {
        self.resolve_keyed::<T>(key)
            .unwrap_or_else(|e| panic!("failed to resolve {}: {}", std::any::type_name::<T>(), e))
    }

    fn must_resolve_many<T: ?Sized + Send + Sync + 'static>(&self) -> Vec<Arc<T>> {
        self.resolve_many::<T>()
            .unwrap_or_else(|e| panic!("failed to resolve {}: {}", std::any::type_name::<T>(), e))
    }

    /// Runs field injection on a pre-built value.
    ///
    /// Nothing is looked up for the value itself and nothing is cached; only
    /// its marked fields are resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, Resolver};
    /// use std::sync::Arc;
    ///
    /// struct Handler {
    ///     name: String,
    ///     greeting: Option<Arc<String>>,
    /// }
    /// ferrous_ioc::inject_fields!(Handler { greeting: "inject" });
    ///
    /// let container = Container::new();
    /// container.register_instance(Arc::new("hello".to_string()));
    ///
    /// let handler = container
    ///     .resolve_instance(Handler { name: "index".into(), greeting: None })
    ///     .unwrap();
    /// assert_eq!(handler.name, "index");
    /// assert_eq!(handler.greeting.as_deref().map(String::as_str), Some("hello"));
    /// ```
    fn resolve_instance<T: InjectFields>(&self, mut instance: T) -> DiResult<T> {
        instance.inject_fields(&mut FieldInjector::new(self))?;
        Ok(instance)
    }

    fn must_resolve_instance<T: InjectFields>(&self, instance: T) -> T {
        self.resolve_instance(instance)
            .unwrap_or_else(|e| panic!("failed to resolve {}: {}", std::any::type_name::<T>(), e))
    }

    /// Calls a one-off constructor with resolved arguments, then runs field
    /// injection on its result. The registry is only consulted for the
    /// arguments and injected fields.
    fn resolve_function<Args, Out, F>(&self, ctor: F) -> DiResult<Out>
    where
        F: Constructor<Args, Out>,
        Out: InjectFields,
    {
        let instance = ctor.construct(self)?;
        self.resolve_instance(instance)
    }

    /// Like [`resolve_function`](Self::resolve_function) for constructors
    /// returning `Result`; an `Err` becomes [`DiError::Constructor`].
    fn resolve_fallible_function<Args, Out, E, F>(&self, ctor: F) -> DiResult<Out>
    where
        F: Constructor<Args, Result<Out, E>>,
        Out: InjectFields,
        E: std::error::Error + Send + Sync + 'static,
    {
        let instance = ctor
            .construct(self)?
            .map_err(|e| DiError::constructor(std::any::type_name::<Out>(), e))?;
        self.resolve_instance(instance)
    }

    fn must_resolve_function<Args, Out, F>(&self, ctor: F) -> Out
    where
        F: Constructor<Args, Out>,
        Out: InjectFields,
    {
        self.resolve_function(ctor)
            .unwrap_or_else(|e| panic!("failed to resolve {}: {}", std::any::type_name::<Out>(), e))
    }
}

impl<R: ResolverCore> Resolver for R {}
