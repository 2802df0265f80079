//! Buffered delivery: serialize once, send with an exact `Content-Length`.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ReflectError;
use crate::reflect::Document;

pub const APPLICATION_JSON: &str = "application/json";

/// Pretty JSON body with `Content-Length` taken from the serialized bytes.
pub fn buffered(doc: &Document) -> Result<Response, ReflectError> {
    let json = doc.to_pretty()?;
    Ok(json_response(json))
}

pub(crate) fn json_response(json: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON)),
            (header::CONTENT_LENGTH, HeaderValue::from(json.len())),
        ],
        Body::from(json),
    )
        .into_response()
}
