//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ReflectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ReflectorConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("timeouts.request_secs ({request_secs}) must exceed simulation.max_delay_secs ({max_delay_secs})")]
    TimeoutTooShort { request_secs: u64, max_delay_secs: u64 },

    #[error("simulation.max_delay_secs ({0}) may not exceed {MAX_DELAY_CEILING}")]
    MaxDelay(u64),

    #[error("simulation.stream_buffer must be at least 1")]
    StreamBuffer,

    #[error("simulation.max_stream_objects must be at least 1 when set")]
    MaxStreamObjects,

    #[error("observability.log_level `{0}` is not a valid filter")]
    LogLevel(String),
}

/// Hard ceiling for `/delay/{n}`, in seconds. Config may lower it, not raise it.
pub const MAX_DELAY_CEILING: u64 = 10;

pub fn validate_config(config: &ReflectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs <= config.simulation.max_delay_secs {
        errors.push(ValidationError::TimeoutTooShort {
            request_secs: config.timeouts.request_secs,
            max_delay_secs: config.simulation.max_delay_secs,
        });
    }

    if config.simulation.max_delay_secs > MAX_DELAY_CEILING {
        errors.push(ValidationError::MaxDelay(config.simulation.max_delay_secs));
    }

    if config.simulation.stream_buffer == 0 {
        errors.push(ValidationError::StreamBuffer);
    }

    if config.simulation.max_stream_objects == Some(0) {
        errors.push(ValidationError::MaxStreamObjects);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
