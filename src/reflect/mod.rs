//! Request reflection subsystem.
//!
//! # Data Flow
//! ```text
//! request head + peer address
//!     → introspect.rs (Inbound view, one pure function per facet)
//!     → assembler.rs (ordered facet list → sorted Document)
//!     → delivery encoders (buffered / streamed / compressed)
//! ```
//!
//! # Design Decisions
//! - Facets are a closed enum; the introspector match is exhaustive
//! - Unimplemented body facets (`form`, `data`, `files`, `json`) still appear,
//!   with empty placeholder values
//! - Documents are request-local and never outlive the response

pub mod assembler;
pub mod facet;
pub mod introspect;

pub use assembler::{assemble, assemble_named, Document};
pub use facet::{Facet, FacetValue};
pub use introspect::Inbound;
