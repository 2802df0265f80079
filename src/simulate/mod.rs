//! Behavior simulations.
//!
//! Stateless policies layered on reflection and delivery: none of them keeps
//! anything between requests. A redirect chain's progress lives entirely in
//! the URL the client follows next.

pub mod cookies;
pub mod delay;
pub mod redirect;
pub mod response_headers;
pub mod status;
