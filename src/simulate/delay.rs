//! `/delay/{n}`: wait, then reflect.
//!
//! The sleep suspends only the task serving this request.

use std::time::Duration;

use axum::response::Response;

use crate::delivery::buffered;
use crate::error::ReflectError;
use crate::reflect::{assemble, Facet, Inbound};

pub const DELAY_FACETS: &[Facet] = &[
    Facet::Url,
    Facet::Args,
    Facet::Form,
    Facet::Data,
    Facet::Origin,
    Facet::Headers,
    Facet::Files,
];

/// Requested seconds, capped at `max_secs`.
pub fn clamp_delay(requested_secs: u64, max_secs: u64) -> Duration {
    Duration::from_secs(requested_secs.min(max_secs))
}

pub async fn delay(req: &Inbound, requested_secs: u64, max_secs: u64) -> Result<Response, ReflectError> {
    let wait = clamp_delay(requested_secs, max_secs);
    tracing::debug!(requested_secs, wait_secs = wait.as_secs(), "Delaying response");
    tokio::time::sleep(wait).await;
    buffered(&assemble(req, DELAY_FACETS))
}
