//! Browsing session: location changes drive page loads.
//!
//! Every observed location change mounts a view. A mount bumps the
//! generation, publishes `Loading`, and spawns the page load. A load that
//! completes after a newer mount is discarded on arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::navigation::{
    Activation, LinkActivator, Location, LocationObserver, Modifiers, NavigationMode, NavigationSource,
    Subscription,
};
use crate::observability::metrics;
use crate::routing::RouteTable;
use crate::views::loader::{Page, PageLoader};
use crate::views::registry::ViewId;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session must be started inside a tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error("session closed")]
    Closed,
}

/// What the session is currently showing.
#[derive(Debug, Clone)]
pub enum PageState {
    Loading { path: String },
    Ready(Arc<Page>),
}

impl PageState {
    pub fn page(&self) -> Option<&Arc<Page>> {
        match self {
            PageState::Ready(page) => Some(page),
            PageState::Loading { .. } => None,
        }
    }
}

struct Mounter {
    source: Arc<dyn NavigationSource>,
    routes: RouteTable<ViewId>,
    loader: PageLoader,
    runtime: Handle,
    generation: AtomicU64,
    discarded: AtomicU64,
    state: watch::Sender<PageState>,
    last_path: Mutex<Option<String>>,
}

impl Mounter {
    fn mount(self: &Arc<Self>, location: Location) {
        {
            let mut last = self.last_path.lock().expect("session path mutex poisoned");
            if last.as_deref() != Some(location.path.as_str()) {
                if last.is_some() {
                    self.source.scroll_to_top();
                }
                *last = Some(location.path.clone());
            }
        }

        let matched = self.routes.resolve_location(&location);

        // Generation bump and state change happen under the watch lock so a
        // completing load cannot interleave between them.
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = PageState::Loading {
                path: location.path.clone(),
            };
        });

        tracing::debug!(path = %location.path, generation, "Mounting view");

        let mounter = Arc::clone(self);
        self.runtime.spawn(async move {
            let page = mounter.loader.load(&matched, &location).await;
            let applied = mounter.state.send_if_modified(|state| {
                if mounter.generation.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *state = PageState::Ready(Arc::new(page));
                true
            });

            if !applied {
                mounter.discarded.fetch_add(1, Ordering::Relaxed);
                metrics::record_stale_page_discarded();
                tracing::debug!(path = %location.path, generation, "Discarded stale page");
            }
        });
    }
}

/// A navigation source wired to the router and page loader.
pub struct Session {
    observer: Arc<LocationObserver>,
    links: LinkActivator,
    mounter: Arc<Mounter>,
    _subscription: Subscription,
}

impl Session {
    /// Attach to `source` and mount the initial location.
    ///
    /// Must be called from within a tokio runtime; page loads are spawned
    /// on it.
    pub fn start(
        source: Arc<dyn NavigationSource>,
        mode: NavigationMode,
        routes: RouteTable<ViewId>,
        loader: PageLoader,
    ) -> Result<Self, SessionError> {
        let runtime = Handle::try_current()?;
        let observer = LocationObserver::attach(Arc::clone(&source), mode);
        let initial = observer.last_observed();

        let (state, _) = watch::channel(PageState::Loading {
            path: initial.path.clone(),
        });
        let mounter = Arc::new(Mounter {
            source,
            routes,
            loader,
            runtime,
            generation: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
            state,
            last_path: Mutex::new(None),
        });

        let on_change = Arc::clone(&mounter);
        let subscription = observer.subscribe(move |location| on_change.mount(location.clone()));
        mounter.mount(initial.as_ref().clone());

        tracing::info!(%mode, path = %initial.path, "Session started");

        Ok(Self {
            links: LinkActivator::new(Arc::clone(&observer)),
            observer,
            mounter,
            _subscription: subscription,
        })
    }

    /// Follow an in-app link to `target`.
    pub fn navigate(&self, target: &str) -> Activation {
        self.links.activate(target, Modifiers::NONE)
    }

    /// Follow an in-app link with modifier keys held.
    pub fn activate(&self, target: &str, modifiers: Modifiers) -> Activation {
        self.links.activate(target, modifiers)
    }

    pub fn links(&self) -> &LinkActivator {
        &self.links
    }

    /// Last published location.
    pub fn location(&self) -> Arc<Location> {
        self.observer.last_observed()
    }

    pub fn state(&self) -> PageState {
        self.mounter.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn watch(&self) -> watch::Receiver<PageState> {
        self.mounter.state.subscribe()
    }

    /// Wait until the most recent mount has loaded.
    pub async fn ready(&self) -> Result<Arc<Page>, SessionError> {
        let mut rx = self.watch();
        let state = rx
            .wait_for(|state| matches!(state, PageState::Ready(_)))
            .await
            .map_err(|_| SessionError::Closed)?;
        state.page().cloned().ok_or(SessionError::Closed)
    }

    /// Page loads discarded because a newer mount overtook them.
    pub fn discarded(&self) -> u64 {
        self.mounter.discarded.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("observer", &self.observer)
            .field("generation", &self.mounter.generation.load(Ordering::Relaxed))
            .finish()
    }
}
