//! Navigation source abstraction.
//!
//! # Responsibilities
//! - Read the current raw location
//! - Mutate session history (push, hash) without a reload
//! - Perform a full document navigation when mutation is refused
//! - Deliver native change signals to registered listeners

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::navigation::location::RawLocation;

/// Native "location changed" signals a source can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSignal {
    /// Back/forward traversal of session history.
    PopState,
    /// The fragment changed.
    HashChange,
}

/// Callback registered for a native change signal.
pub type SignalListener = Arc<dyn Fn(ChangeSignal) + Send + Sync>;

/// Handle identifying a registered signal listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Errors raised when mutating the navigation source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The execution context forbids history mutation (sandboxed frames).
    #[error("history mutation refused: {0}")]
    Refused(String),

    /// There is no interactive document to navigate.
    #[error("navigation source unavailable")]
    Unavailable,
}

/// Platform history/hash mechanism the router wraps.
pub trait NavigationSource: Send + Sync + fmt::Debug {
    /// Current location, or `None` when no interactive document exists.
    fn raw_location(&self) -> Option<RawLocation>;

    /// Push a new session history entry without reloading. Emits no signal.
    fn push_path(&self, path: &str) -> Result<(), NavigationError>;

    /// Set the fragment (without `#`). Emits `HashChange` when it differs.
    fn set_hash(&self, fragment: &str) -> Result<(), NavigationError>;

    /// Full document navigation (hard page load).
    fn hard_navigate(&self, href: &str);

    /// Reset the scroll position to the top of the document.
    fn scroll_to_top(&self);

    /// Register a listener for one native signal.
    fn listen(&self, signal: ChangeSignal, listener: SignalListener) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn unlisten(&self, id: ListenerId);
}

/// Source used during non-interactive rendering: nothing to read or mutate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl NavigationSource for Detached {
    fn raw_location(&self) -> Option<RawLocation> {
        None
    }

    fn push_path(&self, _path: &str) -> Result<(), NavigationError> {
        Err(NavigationError::Unavailable)
    }

    fn set_hash(&self, _fragment: &str) -> Result<(), NavigationError> {
        Err(NavigationError::Unavailable)
    }

    fn hard_navigate(&self, href: &str) {
        tracing::debug!(href = %href, "Hard navigation ignored on detached source");
    }

    fn scroll_to_top(&self) {}

    fn listen(&self, _signal: ChangeSignal, _listener: SignalListener) -> ListenerId {
        ListenerId(0)
    }

    fn unlisten(&self, _id: ListenerId) {}
}
