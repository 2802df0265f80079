//! HTTP request reflection and behavior simulation library

pub mod config;
pub mod delivery;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod reflect;
pub mod routing;
pub mod simulate;

pub use config::schema::ReflectorConfig;
pub use error::ReflectError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
