//! Conversion from an implementation to the service it is registered as.

use std::sync::Arc;

/// Converts a shared implementation into the service identity `I`.
///
/// Every type trivially provides itself. To register an implementation
/// under a trait object, implement `Upcast<dyn Trait>` for it, usually
/// through the [`upcast!`](crate::upcast) macro. A missing impl is a
/// compile-time error, which is how this crate rejects implementations that
/// are not assignable to the declared service.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::Upcast;
/// use std::sync::Arc;
///
/// trait Logger: Send + Sync {
///     fn log(&self, msg: &str) -> String;
/// }
///
/// struct ConsoleLogger;
/// impl Logger for ConsoleLogger {
///     fn log(&self, msg: &str) -> String { format!("LOG: {}", msg) }
/// }
///
/// impl Upcast<dyn Logger> for ConsoleLogger {
///     fn upcast(self: Arc<Self>) -> Arc<dyn Logger> {
///         self
///     }
/// }
///
/// let logger = <ConsoleLogger as Upcast<dyn Logger>>::upcast(Arc::new(ConsoleLogger));
/// assert_eq!(logger.log("hi"), "LOG: hi");
/// ```
pub trait Upcast<I: ?Sized>: Send + Sync + 'static {
    fn upcast(self: Arc<Self>) -> Arc<I>;
}

impl<T: Send + Sync + 'static> Upcast<T> for T {
    #[inline]
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// Implements [`Upcast`] for implementation/trait-object pairs.
///
/// ```rust
/// trait Greeter: Send + Sync {}
/// trait Farewell: Send + Sync {}
///
/// struct English;
/// impl Greeter for English {}
/// impl Farewell for English {}
///
/// ferrous_ioc::upcast!(English => dyn Greeter, English => dyn Farewell);
/// ```
#[macro_export]
macro_rules! upcast {
    ($($implementation:ty => $service:ty),+ $(,)?) => {
        $(
            impl $crate::Upcast<$service> for $implementation {
                #[inline]
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$service> {
                    self
                }
            }
        )+
    };
}
