//! Scope tree and cache propagation.
//!
//! This module contains the [`Scope`] handle and the [`ScopeCloser`] that
//! ends a scope's life.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::ResolveContext;
use crate::activator::{shared_cache, SharedCache};
use crate::config::ContainerConfig;
use crate::error::{DiError, DiResult};
use crate::internal::next_id;
use crate::key::ServiceKey;
use crate::policy::ScopeCacheMode;
use crate::registration::Registry;
use crate::traits::ResolverCore;

/// Everything a resolution needs from a live scope.
#[derive(Clone)]
pub(crate) struct ScopeState {
    pub(crate) scope_id: u64,
    pub(crate) registry: Arc<Registry>,
    pub(crate) global: SharedCache,
    pub(crate) scoped: SharedCache,
    pub(crate) config: Arc<ContainerConfig>,
}

/// A resolution context in the container's scope tree.
///
/// Every scope shares the container's registry and global cache. Its scoped
/// cache depends on the [`ScopeCacheMode`] it was opened with. `Scope` is a
/// cheap handle: clones refer to the same scope.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, DiError, Resolver, ScopeCacheMode};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct RequestContext;
/// ferrous_ioc::inject_fields!(RequestContext);
///
/// let container = Container::new();
/// container.register_scoped::<RequestContext, RequestContext>();
///
/// let (scope, closer) = container.open_scope(ScopeCacheMode::Default).unwrap();
/// let a = scope.resolve::<RequestContext>().unwrap();
/// let b = scope.resolve::<RequestContext>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// closer.close();
/// assert!(matches!(scope.resolve::<RequestContext>(), Err(DiError::ScopeClosed)));
/// ```
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

struct ScopeInner {
    id: u64,
    mode: ScopeCacheMode,
    state: RwLock<Option<ScopeState>>,
    children: Mutex<Vec<Scope>>,
}

impl Scope {
    pub(crate) fn root(
        registry: Arc<Registry>,
        config: Arc<ContainerConfig>,
    ) -> Self {
        let id = next_id();
        Self::from_state(
            ScopeCacheMode::Default,
            ScopeState {
                scope_id: id,
                registry,
                global: shared_cache(),
                scoped: shared_cache(),
                config,
            },
        )
    }

    fn from_state(mode: ScopeCacheMode, state: ScopeState) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                id: state.scope_id,
                mode,
                state: RwLock::new(Some(state)),
                children: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Process-unique id, used in log events.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// The mode this scope was opened with (`Default` for a container).
    pub fn cache_mode(&self) -> ScopeCacheMode {
        self.inner.mode
    }

    pub fn is_closed(&self) -> bool {
        self.inner.state.read().is_none()
    }

    /// Opens a child scope.
    ///
    /// The returned [`ScopeCloser`] is the only way to close the child;
    /// dropping it leaves the child open. With [`ScopeCacheMode::Inherit`]
    /// and [`ScopeCacheMode::Sync`] the child is also closed when this scope
    /// closes.
    ///
    /// Fails with [`DiError::ScopeClosed`] if this scope is closed.
    pub fn open_scope(&self, mode: ScopeCacheMode) -> DiResult<(Scope, ScopeCloser)> {
        let parent = self.state()?;
        let scoped = match mode {
            ScopeCacheMode::Default => shared_cache(),
            ScopeCacheMode::Inherit => {
                let snapshot = parent.scoped.lock().clone();
                Arc::new(Mutex::new(snapshot))
            }
            ScopeCacheMode::Sync => parent.scoped.clone(),
        };

        let child = Scope::from_state(
            mode,
            ScopeState {
                scope_id: next_id(),
                registry: parent.registry,
                global: parent.global,
                scoped,
                config: parent.config,
            },
        );

        if mode.closes_with_parent() {
            // Checked under the children lock so a concurrent close cannot
            // miss the new child.
            let mut children = self.inner.children.lock();
            if self.is_closed() {
                return Err(DiError::ScopeClosed);
            }
            children.retain(|c| !c.is_closed());
            children.push(child.clone());
        }

        tracing::debug!(scope = child.id(), parent = self.id(), mode = ?mode, "opened scope");
        Ok((child.clone(), ScopeCloser { scope: child }))
    }

    /// Closes registered children first, then this scope.
    pub(crate) fn close(&self) {
        let mut children = self.inner.children.lock();
        let cascaded = std::mem::take(&mut *children);
        for child in &cascaded {
            child.close();
        }

        if self.inner.state.write().take().is_some() {
            tracing::debug!(scope = self.id(), cascaded = cascaded.len(), "closed scope");
        }
    }

    pub(crate) fn state(&self) -> DiResult<ScopeState> {
        self.inner.state.read().clone().ok_or(DiError::ScopeClosed)
    }
}

impl ResolverCore for Scope {
    fn resolve_erased(&self, key: &ServiceKey) -> DiResult<Arc<dyn Any + Send + Sync>> {
        let state = self.state()?;
        ResolveContext::new(&state).resolve_one(key)
    }

    fn resolve_all_erased(&self, key: &ServiceKey) -> DiResult<Vec<Arc<dyn Any + Send + Sync>>> {
        let state = self.state()?;
        ResolveContext::new(&state).resolve_all(key)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id())
            .field("mode", &self.cache_mode())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Cleanup handle returned by [`Scope::open_scope`].
///
/// After [`close`](Self::close) every resolution against the scope fails
/// with [`DiError::ScopeClosed`]. Closing cascades to children opened with
/// [`ScopeCacheMode::Inherit`] or [`ScopeCacheMode::Sync`].
#[must_use = "dropping a ScopeCloser leaves its scope open with no way to close it"]
pub struct ScopeCloser {
    scope: Scope,
}

impl ScopeCloser {
    /// The scope this handle closes.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn close(self) {
        self.scope.close();
    }
}

impl fmt::Debug for ScopeCloser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeCloser").field("scope", &self.scope).finish()
    }
}
