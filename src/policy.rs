//! Cache policies and scope cache modes.

/// Per-registration instance reuse rule
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{CachePolicy, Container, Resolver, ScopeCacheMode};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Database;
/// #[derive(Default)]
/// struct Repository;
/// #[derive(Default)]
/// struct Request;
/// ferrous_ioc::inject_fields!(Database, Repository, Request);
///
/// let container = Container::new();
/// container.bind::<Database>().cache_policy(CachePolicy::Global).to::<Database>();
/// container.bind::<Repository>().cache_policy(CachePolicy::Scoped).to::<Repository>();
/// container.bind::<Request>().to::<Request>(); // CachePolicy::Never
///
/// let (scope1, _close1) = container.open_scope(ScopeCacheMode::Default).unwrap();
/// let (scope2, _close2) = container.open_scope(ScopeCacheMode::Default).unwrap();
///
/// // Global: shared by every scope of the container
/// let db1 = scope1.resolve::<Database>().unwrap();
/// let db2 = scope2.resolve::<Database>().unwrap();
/// assert!(Arc::ptr_eq(&db1, &db2));
///
/// // Scoped: same within a scope, different across scopes
/// let repo1a = scope1.resolve::<Repository>().unwrap();
/// let repo1b = scope1.resolve::<Repository>().unwrap();
/// let repo2 = scope2.resolve::<Repository>().unwrap();
/// assert!(Arc::ptr_eq(&repo1a, &repo1b));
/// assert!(!Arc::ptr_eq(&repo1a, &repo2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CachePolicy {
    /// One instance per container, shared by all descendant scopes.
    ///
    /// Also known as singleton.
    Global,
    /// One instance per scope.
    ///
    /// The container's root scope has its own scoped cache, so scoped
    /// services can be resolved from the container directly.
    Scoped,
    /// A new instance on every resolution. No cache decorator is attached.
    ///
    /// Also known as transient.
    #[default]
    Never,
}

/// How a newly opened scope's scoped cache relates to its parent's
///
/// The global cache is always shared with the parent, whatever the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScopeCacheMode {
    /// Empty private scoped cache. The child is not closed with its parent.
    #[default]
    Default,
    /// Private scoped cache seeded with a snapshot of the parent's entries.
    /// The child is closed with its parent.
    Inherit,
    /// The parent's scoped cache itself, shared by reference. The child is
    /// closed with its parent.
    Sync,
}

impl ScopeCacheMode {
    /// Whether closing the parent closes a child opened with this mode.
    pub fn closes_with_parent(self) -> bool {
        !matches!(self, ScopeCacheMode::Default)
    }
}
