//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation source (history entries / hash fragment)
//!     → location.rs (derive Location for the configured mode)
//!     → observer.rs (cache current Location, notify subscribers)
//!
//! Link activation:
//!     link.rs (modifier check)
//!     → source push / hash set   (or hard navigation when refused)
//!     → observer publishes the new Location
//! ```
//!
//! # Design Decisions
//! - Navigation mode is fixed at construction, never toggled
//! - Observers react to the mode's native change signal only, no polling
//! - History-mode links publish directly to the observer instead of
//!   round-tripping through a synthetic platform event

pub mod link;
pub mod location;
pub mod memory;
pub mod mode;
pub mod observer;
pub mod source;

pub use link::{Activation, LinkActivator, Modifiers};
pub use location::{Location, RawLocation};
pub use memory::MemoryHistory;
pub use mode::NavigationMode;
pub use observer::{LocationObserver, Subscription};
pub use source::{ChangeSignal, Detached, ListenerId, NavigationError, NavigationSource};
