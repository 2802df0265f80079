//! `/status/{code}`: answer with the requested status and no body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ReflectError;

/// Codes 200 through 999 are passed through, including non-standard ones like
/// 999. Anything lower cannot be a final response: codes below 100 are not
/// HTTP at all, and 1xx are informational, so the server would replace them.
pub fn status(code: u64) -> Result<Response, ReflectError> {
    let code = u16::try_from(code).map_err(|_| ReflectError::InvalidStatusCode(u16::MAX))?;
    let status = StatusCode::from_u16(code).map_err(|_| ReflectError::InvalidStatusCode(code))?;
    if status.is_informational() {
        return Err(ReflectError::InvalidStatusCode(code));
    }
    Ok(status.into_response())
}
