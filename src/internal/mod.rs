//! Internal implementation details.

pub(crate) mod circular;

use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) use circular::ResolutionStack;

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier for recipes, cache decorators and scopes.
pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}
