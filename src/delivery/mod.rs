//! Delivery encoders.
//!
//! Each encoder takes a finished `Document` and produces exactly one response:
//! - `buffered`: pretty JSON with an exact `Content-Length`
//! - `streamed`: chunked, one compact JSON object per line, `id` injected
//! - `compressed`: gzip-wrapped pretty JSON, length of the finished gzip body

pub mod buffered;
pub mod compressed;
pub mod streamed;

pub use buffered::buffered;
pub use compressed::compressed;
pub use streamed::{streamed, ChannelSink, ChunkSink, TransportError};
