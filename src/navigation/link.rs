//! In-app link activation.
//!
//! # Responsibilities
//! - Leave modified clicks (new tab, new window) to the platform
//! - Mutate history or hash without a document reload
//! - Publish the new location and reset scroll
//! - Fall back to a full navigation when mutation is refused

use std::sync::Arc;

use crate::navigation::location::Location;
use crate::navigation::mode::NavigationMode;
use crate::navigation::observer::LocationObserver;
use crate::observability::metrics;

/// Modifier keys held while a link was activated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        meta: false,
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub fn any(&self) -> bool {
        self.meta || self.ctrl || self.shift || self.alt
    }
}

/// What a link activation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A modifier was held; default platform behaviour applies.
    Deferred,
    /// The location changed in place, without a document load.
    Navigated(Location),
    /// History mutation was refused; a full page load was performed.
    Reloaded { href: String },
}

/// Turns "navigate to path" intents into navigation source mutations.
#[derive(Debug, Clone)]
pub struct LinkActivator {
    observer: Arc<LocationObserver>,
}

impl LinkActivator {
    pub fn new(observer: Arc<LocationObserver>) -> Self {
        Self { observer }
    }

    /// Anchor href for `target` in the configured mode.
    pub fn href(&self, target: &str) -> String {
        self.observer.mode().link_href(target)
    }

    /// Activate a link to `target`.
    pub fn activate(&self, target: &str, modifiers: Modifiers) -> Activation {
        if modifiers.any() {
            tracing::debug!(target = %target, ?modifiers, "Modified click left to the platform");
            metrics::record_link_activation("deferred");
            return Activation::Deferred;
        }

        let source = self.observer.source();
        let mode = self.observer.mode();

        let mutation = match mode {
            NavigationMode::History => source.push_path(target).map(|()| {
                // pushState emits nothing natively; publish directly.
                self.observer.publish();
            }),
            // hashchange fires natively and reaches the observer on its own.
            NavigationMode::Hash => source.set_hash(target),
        };

        match mutation {
            Ok(()) => {
                source.scroll_to_top();
                metrics::record_link_activation("navigated");
                Activation::Navigated(self.observer.current_location())
            }
            Err(e) => {
                let href = mode.document_href(target);
                tracing::warn!(
                    target = %target,
                    href = %href,
                    error = %e,
                    "History mutation refused, falling back to full navigation"
                );
                source.hard_navigate(&href);
                // The fresh document starts at the new location.
                self.observer.publish();
                metrics::record_link_activation("reloaded");
                Activation::Reloaded { href }
            }
        }
    }
}
