//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Current Location (path)
//!     → router.rs (ordered route table lookup)
//!     → matcher.rs (evaluate pattern, capture parameter)
//!     → Return: Matched { view, params } or NotFound
//!
//! Route Compilation (at startup):
//!     (pattern, view) pairs in registration order
//!     → Parse patterns, reject duplicates
//!     → Collect namespaces claimed by literal/prefix patterns
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes registered once, immutable at runtime
//! - No regex (literal, prefix and single-segment matching only)
//! - First match wins, in registration order
//! - Matching and parameter capture happen in one pass
//! - Explicit NotFound rather than a blank render

pub mod matcher;
pub mod router;

pub use matcher::{Params, RouteError, RoutePattern};
pub use router::{Route, RouteMatch, RouteTable, RouteTableBuilder};
