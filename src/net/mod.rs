//! Network layer.
//!
//! Binding happens once at startup; a failure here ends the process with a
//! non-zero status. Per-connection handling is left to `axum::serve`, which
//! spawns one task per connection.

pub mod listener;

pub use listener::{bind, ListenerError};
