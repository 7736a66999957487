//! # ferrous-ioc
//!
//! Runtime service registry and object activation engine.
//!
//! ## Features
//!
//! - **Recipes**: default construction, constructors with resolved
//!   parameters, hand-written factories and fixed instances
//! - **Trait services**: register implementations under `dyn Trait` and
//!   resolve one or all of them
//! - **Discriminators**: several keyed registrations of the same service
//! - **Field injection**: marked `Option` fields filled after construction
//! - **Cache policies**: global, per scope, or none
//! - **Scope tree**: child scopes with private, inherited or synchronized
//!   caches and cascading close
//! - **Cycle detection**: self-dependent recipes fail with the full path
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_ioc::{Container, Resolver};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self, name: &str) -> String;
//! }
//!
//! #[derive(Default)]
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self, name: &str) -> String {
//!         format!("Hello, {name}!")
//!     }
//! }
//!
//! #[derive(Default)]
//! struct FrontDesk {
//!     greeter: Option<Arc<dyn Greeter>>,
//! }
//!
//! ferrous_ioc::upcast!(English => dyn Greeter);
//! ferrous_ioc::inject_fields!(English);
//! ferrous_ioc::inject_fields!(FrontDesk { greeter: "inject" });
//!
//! let container = Container::new();
//! container.bind::<dyn Greeter>().global().to::<English>();
//! container.register_transient::<FrontDesk, FrontDesk>();
//!
//! let desk = container.resolve::<FrontDesk>().unwrap();
//! let greeter = desk.greeter.as_ref().unwrap();
//! assert_eq!(greeter.greet("Ada"), "Hello, Ada!");
//!
//! // Global recipes are activated once
//! let again = container.resolve::<FrontDesk>().unwrap();
//! assert!(Arc::ptr_eq(greeter, again.greeter.as_ref().unwrap()));
//! ```
//!
//! ## Cache Policies
//!
//! - **Global**: created once and shared by every scope of the container
//! - **Scoped**: created once per scope
//! - **Never**: created fresh on every resolution
//!
//! ## Scopes
//!
//! ```rust
//! use ferrous_ioc::{Container, Resolver, ScopeCacheMode};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Session;
//! ferrous_ioc::inject_fields!(Session);
//!
//! let container = Container::new();
//! container.register_scoped::<Session, Session>();
//!
//! let (parent, close_parent) = container.open_scope(ScopeCacheMode::Default).unwrap();
//! let (child, _close_child) = parent.open_scope(ScopeCacheMode::Sync).unwrap();
//!
//! // Sync children share the parent's scoped cache
//! let a = parent.resolve::<Session>().unwrap();
//! let b = child.resolve::<Session>().unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! // and close with it
//! close_parent.close();
//! assert!(child.is_closed());
//! ```
//!
//! ## Logging
//!
//! The engine emits [`tracing`] events: `debug` for registrations and scope
//! lifecycle, `trace` for activations, cache hits and field injection.

pub mod binding;
pub mod config;
pub mod error;
pub mod injection;
pub mod key;
pub mod policy;
pub mod provider;
pub mod traits;

// Internal modules
mod activator;
mod internal;
mod registration;

// Re-export core types
pub use binding::{Binding, RegisterOptions};
pub use config::{ContainerConfig, DEFAULT_MAX_DEPTH};
pub use error::{DiError, DiResult};
pub use injection::{FieldInjector, InjectFields, Marker};
pub use key::{Discriminator, ServiceKey};
pub use policy::{CachePolicy, ScopeCacheMode};
pub use provider::{Container, ResolveContext, Scope, ScopeCloser};
pub use traits::{Constructor, Resolvable, Resolver, ResolverCore, Upcast};
