//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (exact lookup, then prefixes in order)
//!     → matcher.rs (extract typed path parameters)
//!     → Return: RouteMatch { route, params } or a ReflectError
//!
//! Route Table (at startup):
//!     RouteTable::standard()
//!     → Freeze as immutable table, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Routes built once at startup, immutable at runtime
//! - No regex in hot path (prefix matching and digit scans only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod router;

pub use matcher::{Extractor, Params, PathPattern};
pub use router::{Endpoint, MethodConstraint, Route, RouteMatch, RouteTable};
