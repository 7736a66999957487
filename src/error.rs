//! Error types for the activation engine.

use std::sync::Arc;

use crate::key::ServiceKey;

/// Resolution errors
///
/// Every failure that can happen while resolving a service is returned as a
/// `DiError` value. Wiring mistakes that Rust's type system can express (an
/// implementation that does not provide the requested trait, a constructor
/// with the wrong shape) never get this far: they fail to compile.
///
/// Errors raised by a nested dependency are surfaced unchanged to the
/// top-level caller.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, DiError, Resolver};
///
/// let container = Container::new();
/// match container.resolve::<String>() {
///     Err(DiError::NoRegistration(key)) => {
///         assert_eq!(key.type_name(), "alloc::string::String");
///     }
///     other => panic!("unexpected result: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiError {
    /// No recipe is registered under the requested key.
    #[error("no registration found for {0}")]
    NoRegistration(ServiceKey),
    /// A single value was requested but several recipes are registered.
    #[error("{count} registrations found for {key}; resolve the collection form instead")]
    AmbiguousRegistration { key: ServiceKey, count: usize },
    /// A fallible constructor returned an error.
    #[error("constructor of {service} failed: {source}")]
    Constructor {
        service: &'static str,
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
    /// An injection marker contained an unrecognized token.
    #[error("unrecognized injection marker token `{token}`")]
    TagParse { token: String },
    /// The scope's cleanup handle was already invoked.
    #[error("the scope has been closed")]
    ScopeClosed,
    /// A resolved instance could not be downcast to the requested type.
    #[error("type mismatch for {0}")]
    TypeMismatch(&'static str),
    /// A recipe transitively depends on itself (includes path).
    #[error("cyclic dependency: {}", .0.join(" -> "))]
    CyclicDependency(Vec<&'static str>),
    /// The resolution stack grew beyond the configured limit.
    #[error("maximum resolution depth {0} exceeded")]
    DepthExceeded(usize),
}

impl DiError {
    pub(crate) fn constructor<E>(service: &'static str, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DiError::Constructor {
            service,
            source: Arc::new(error),
        }
    }
}

/// Result type for resolution operations
pub type DiResult<T> = Result<T, DiError>;
