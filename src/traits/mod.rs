//! Core traits for the activation engine.

mod constructor;
mod resolver;
mod upcast;

pub use constructor::Constructor;
pub use resolver::{Resolvable, Resolver, ResolverCore};
pub use upcast::Upcast;
