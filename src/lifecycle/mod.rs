//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → ContentService → RouteTable → PageLoader → Site
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → preview server stops accepting → in-flight requests drain
//! ```
//!
//! # Design Decisions
//! - Fail fast: a route table that does not compile aborts startup
//! - Content API problems never abort startup; the catalog covers them

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::shutdown_on_signal;
pub use startup::Site;
