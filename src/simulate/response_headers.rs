//! `/response-headers?name=value&...`: echo query arguments as response
//! headers, with the same arguments as the JSON body.

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::Response,
};

use crate::delivery::buffered;
use crate::error::ReflectError;
use crate::reflect::introspect::args;
use crate::reflect::{Document, Inbound};

/// Headers owned by the encoder or the connection. Letting a query argument
/// set any of these would contradict the buffered `Content-Length`.
const PROTECTED: [HeaderName; 9] = [
    header::CONTENT_TYPE,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    header::PROXY_AUTHENTICATE,
    HeaderName::from_static("keep-alive"),
];

pub fn response_headers(req: &Inbound) -> Result<Response, ReflectError> {
    let args = args(req);
    let mut response = buffered(&Document::from(args.clone()))?;

    for (name, value) in args {
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) else {
            tracing::debug!(header = %name, "Skipping argument that is not a valid header");
            continue;
        };
        if PROTECTED.contains(&name) {
            tracing::debug!(header = %name, "Skipping argument that would change message framing");
            continue;
        }
        response.headers_mut().insert(name, value);
    }
    Ok(response)
}
