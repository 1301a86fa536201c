//! Location observer.
//!
//! # Responsibilities
//! - Expose the current `Location` for the configured mode
//! - Notify subscribers when the location changes
//! - Act as the subject link activations publish to
//!
//! # Design Decisions
//! - One native listener per observer, registered for the mode's signal only
//! - Subscriptions are handles; dropping one unsubscribes
//! - The last observed location is cached in an `ArcSwap` for lock-free reads

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;
use dashmap::DashMap;

use crate::navigation::location::Location;
use crate::navigation::mode::NavigationMode;
use crate::navigation::source::{ListenerId, NavigationSource};

/// Callback invoked with the freshly derived location.
pub type LocationListener = Arc<dyn Fn(&Location) + Send + Sync>;

/// Tracks the current location and fans changes out to subscribers.
pub struct LocationObserver {
    source: Arc<dyn NavigationSource>,
    mode: NavigationMode,
    current: ArcSwap<Location>,
    listeners: DashMap<u64, LocationListener>,
    next_id: AtomicU64,
    native: ListenerId,
}

impl LocationObserver {
    /// Attach to `source`, reading locations in `mode`.
    pub fn attach(source: Arc<dyn NavigationSource>, mode: NavigationMode) -> Arc<Self> {
        let initial = Location::derive(source.raw_location().as_ref(), mode);

        Arc::new_cyclic(|weak: &Weak<LocationObserver>| {
            let weak = weak.clone();
            let native = source.listen(
                mode.change_signal(),
                Arc::new(move |signal| {
                    if let Some(observer) = weak.upgrade() {
                        tracing::debug!(?signal, "Native navigation signal");
                        observer.publish();
                    }
                }),
            );

            tracing::debug!(%mode, path = %initial.path, "Location observer attached");

            Self {
                source,
                mode,
                current: ArcSwap::from_pointee(initial),
                listeners: DashMap::new(),
                next_id: AtomicU64::new(1),
                native,
            }
        })
    }

    /// Read the navigation source now. Never fails.
    pub fn current_location(&self) -> Location {
        Location::derive(self.source.raw_location().as_ref(), self.mode)
    }

    /// Last location published to subscribers.
    pub fn last_observed(&self) -> Arc<Location> {
        self.current.load_full()
    }

    /// Register `on_change`; it runs on every published location change.
    pub fn subscribe<F>(self: &Arc<Self>, on_change: F) -> Subscription
    where
        F: Fn(&Location) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.insert(id, Arc::new(on_change));
        Subscription {
            observer: Arc::downgrade(self),
            id,
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn source(&self) -> &Arc<dyn NavigationSource> {
        &self.source
    }

    /// Re-read the source, cache the result and notify every subscriber.
    pub(crate) fn publish(&self) -> Location {
        let location = self.current_location();
        self.current.store(Arc::new(location.clone()));

        let targets: Vec<LocationListener> =
            self.listeners.iter().map(|entry| entry.value().clone()).collect();

        tracing::debug!(
            path = %location.path,
            subscribers = targets.len(),
            "Location changed"
        );
        for listener in targets {
            listener(&location);
        }
        location
    }

    fn remove(&self, id: u64) {
        self.listeners.remove(&id);
    }
}

impl Drop for LocationObserver {
    fn drop(&mut self) {
        self.source.unlisten(self.native);
    }
}

impl fmt::Debug for LocationObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationObserver")
            .field("mode", &self.mode)
            .field("current", &self.current.load().path)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

/// Live subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription {
    observer: Weak<LocationObserver>,
    id: u64,
}

impl Subscription {
    /// Unsubscribe explicitly.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.upgrade() {
            observer.remove(self.id);
        }
    }
}
