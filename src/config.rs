//! Container configuration.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Default bound on nested activations within one top-level resolution.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Tunables shared by a container and every scope opened under it.
///
/// With the `config` feature enabled the struct can be loaded through serde;
/// missing fields fall back to their defaults.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, ContainerConfig};
///
/// let config = ContainerConfig::new().with_max_depth(64);
/// let container = Container::with_config(config);
/// assert_eq!(container.config().max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerConfig {
    /// Maximum number of nested activations before resolution fails with
    /// [`DiError::DepthExceeded`](crate::DiError::DepthExceeded).
    pub max_depth: usize,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
