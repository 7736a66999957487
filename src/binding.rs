//! Registration builder.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::activator::{
    erased, ConstructorProducer, DefaultProducer, FactoryProducer, FallibleConstructorProducer,
    InstanceActivator,
};
use crate::error::DiResult;
use crate::injection::InjectFields;
use crate::key::{Discriminator, ServiceKey};
use crate::policy::CachePolicy;
use crate::provider::{Container, ResolveContext};
use crate::registration::RecipeKind;
use crate::traits::{Constructor, Upcast};

/// Options shared by every registration entry point.
///
/// Defaults to an anonymous registration with [`CachePolicy::Never`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterOptions {
    pub key: Option<Discriminator>,
    pub cache_policy: CachePolicy,
}

impl RegisterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<Discriminator>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}

/// Pending registration of service `I`, created by [`Container::bind`].
///
/// Each `to*` method builds the recipe, installs the field-injection and
/// cache decorators, and appends it to the registry. Several recipes may be
/// registered under the same key; single-value resolution of such a key then
/// fails as ambiguous while [`resolve_many`](crate::Resolver::resolve_many)
/// returns all of them in registration order.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, Resolver};
/// use std::sync::Arc;
///
/// trait Notifier: Send + Sync {
///     fn channel(&self) -> &'static str;
/// }
///
/// #[derive(Default)]
/// struct Email;
/// impl Notifier for Email {
///     fn channel(&self) -> &'static str { "email" }
/// }
///
/// struct Sms { sender: Arc<String> }
/// impl Notifier for Sms {
///     fn channel(&self) -> &'static str { "sms" }
/// }
///
/// ferrous_ioc::upcast!(Email => dyn Notifier, Sms => dyn Notifier);
/// ferrous_ioc::inject_fields!(Email, Sms);
///
/// let container = Container::new();
/// container.register_instance(Arc::new("+100".to_string()));
/// container.bind::<dyn Notifier>().global().to::<Email>();
/// container
///     .bind::<dyn Notifier>()
///     .key("urgent")
///     .to_constructor(|sender: Arc<String>| Sms { sender });
///
/// assert_eq!(container.resolve::<dyn Notifier>().unwrap().channel(), "email");
/// assert_eq!(container.resolve_keyed::<dyn Notifier>("urgent").unwrap().channel(), "sms");
/// ```
#[must_use = "a binding registers nothing until one of its `to*` methods is called"]
pub struct Binding<'c, I: ?Sized> {
    container: &'c Container,
    options: RegisterOptions,
    _service: PhantomData<fn() -> Arc<I>>,
}

impl<'c, I> Binding<'c, I>
where
    I: ?Sized + Send + Sync + 'static,
{
    pub(crate) fn new(container: &'c Container) -> Self {
        Self {
            container,
            options: RegisterOptions::default(),
            _service: PhantomData,
        }
    }

    /// Registers under a discriminator instead of anonymously.
    pub fn key(mut self, key: impl Into<Discriminator>) -> Self {
        self.options.key = Some(key.into());
        self
    }

    pub fn with_options(mut self, options: RegisterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.options.cache_policy = policy;
        self
    }

    /// Shorthand for [`CachePolicy::Global`].
    pub fn global(self) -> Self {
        self.cache_policy(CachePolicy::Global)
    }

    /// Shorthand for [`CachePolicy::Scoped`].
    pub fn scoped(self) -> Self {
        self.cache_policy(CachePolicy::Scoped)
    }

    /// Shorthand for [`CachePolicy::Never`].
    pub fn never_cache(self) -> Self {
        self.cache_policy(CachePolicy::Never)
    }

    /// Default-constructs `Impl` on activation.
    pub fn to<Impl>(self) -> &'c Container
    where
        Impl: Default + InjectFields + Upcast<I>,
    {
        let activator = erased::<_, Impl, I>(DefaultProducer::<Impl>::new());
        self.install(std::any::type_name::<Impl>(), RecipeKind::Implementation, activator)
    }

    /// Calls `ctor` on activation, resolving each of its parameters
    /// anonymously.
    pub fn to_constructor<Args, Impl, F>(self, ctor: F) -> &'c Container
    where
        F: Constructor<Args, Impl> + Send + Sync + 'static,
        Args: 'static,
        Impl: InjectFields + Upcast<I>,
    {
        tracing::trace!(arity = ctor.arity(), "constructor recipe");
        let activator = erased::<_, Impl, I>(ConstructorProducer::<F, Args>::new(ctor));
        self.install(std::any::type_name::<Impl>(), RecipeKind::Constructor, activator)
    }

    /// Like [`to_constructor`](Self::to_constructor) for constructors
    /// returning `Result`. An `Err` fails the resolution with
    /// [`DiError::Constructor`](crate::DiError::Constructor).
    pub fn to_fallible_constructor<Args, Impl, E, F>(self, ctor: F) -> &'c Container
    where
        F: Constructor<Args, Result<Impl, E>> + Send + Sync + 'static,
        Args: 'static,
        E: std::error::Error + Send + Sync + 'static,
        Impl: InjectFields + Upcast<I>,
    {
        tracing::trace!(arity = ctor.arity(), "fallible constructor recipe");
        let activator =
            erased::<_, Impl, I>(FallibleConstructorProducer::<F, Args, E>::new(ctor));
        self.install(std::any::type_name::<Impl>(), RecipeKind::Constructor, activator)
    }

    /// Calls a hand-written factory on activation.
    pub fn to_factory<Impl, F>(self, factory: F) -> &'c Container
    where
        F: Fn(&ResolveContext<'_>) -> DiResult<Impl> + Send + Sync + 'static,
        Impl: InjectFields + Upcast<I>,
    {
        let activator = erased::<_, Impl, I>(FactoryProducer::new(factory));
        self.install(std::any::type_name::<Impl>(), RecipeKind::Factory, activator)
    }

    /// Returns `instance` itself on every activation.
    ///
    /// The cache policy is always [`CachePolicy::Global`]; no field
    /// injection runs since the instance is already shared.
    pub fn to_instance(self, instance: Arc<I>) -> &'c Container {
        let activator = Arc::new(InstanceActivator::new(instance));
        self.global()
            .install(std::any::type_name::<I>(), RecipeKind::Instance, activator)
    }

    fn install(
        self,
        implementation: &'static str,
        kind: RecipeKind,
        activator: Arc<dyn crate::activator::Activator>,
    ) -> &'c Container {
        let RegisterOptions { key, cache_policy } = self.options;
        self.container.install(
            ServiceKey::of::<I>(key),
            implementation,
            kind,
            cache_policy,
            activator,
        );
        self.container
    }
}
