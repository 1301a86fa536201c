//! Preview HTTP server.
//!
//! # Data Flow
//! ```text
//! GET /some/path?query
//!     → server.rs (request ID, trace, timeout)
//!     → RouteTable::resolve
//!     → PageLoader::load
//!     → JSON page (404 for the not-found state)
//! ```

pub mod server;

pub use server::{AppState, PreviewServer};
