//! Request-level error taxonomy.
//!
//! Every variant maps to exactly one HTTP outcome. Nothing here is retried:
//! a failing request is answered (or abandoned) and the server keeps serving.

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReflectError {
    /// No route, or the route's parameter extractor rejected the path.
    #[error("no route matches the request path")]
    RoutingMismatch,

    #[error("method not allowed, expected {allowed}")]
    MethodMismatch { allowed: Method },

    #[error("missing required query parameter `{0}`")]
    MissingParameter(&'static str),

    /// A matched status code that cannot be a final response (below 200).
    #[error("status code {0} cannot be sent")]
    InvalidStatusCode(u16),

    #[error("value is not a valid header: {0}")]
    InvalidHeaderValue(String),

    #[error("failed to serialize response document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to gzip response document: {0}")]
    Compression(#[from] std::io::Error),

    #[error("transport does not support incremental flushing")]
    FlushUnsupported,

    #[error("endpoint {0} is not implemented")]
    NotImplemented(&'static str),
}

impl ReflectError {
    pub fn status(&self) -> StatusCode {
        match self {
            ReflectError::RoutingMismatch => StatusCode::NOT_FOUND,
            ReflectError::MethodMismatch { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ReflectError::MissingParameter(_)
            | ReflectError::InvalidStatusCode(_)
            | ReflectError::InvalidHeaderValue(_) => StatusCode::BAD_REQUEST,
            ReflectError::Serialization(_)
            | ReflectError::Compression(_)
            | ReflectError::FlushUnsupported => StatusCode::INTERNAL_SERVER_ERROR,
            ReflectError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }
}

impl IntoResponse for ReflectError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ReflectError::RoutingMismatch => status.into_response(),
            ReflectError::MethodMismatch { allowed } => {
                (status, [(header::ALLOW, allowed.to_string())]).into_response()
            }
            ReflectError::MissingParameter(_)
            | ReflectError::InvalidStatusCode(_)
            | ReflectError::InvalidHeaderValue(_) => {
                tracing::debug!(error = %self, "Rejecting bad request");
                (status, "400 bad request").into_response()
            }
            ReflectError::Serialization(_)
            | ReflectError::Compression(_)
            | ReflectError::FlushUnsupported => {
                tracing::error!(error = %self, "Internal error while building response");
                (status, "500 internal server error").into_response()
            }
            ReflectError::NotImplemented(path) => {
                (status, format!("501 not implemented: {} is not supported", path)).into_response()
            }
        }
    }
}
