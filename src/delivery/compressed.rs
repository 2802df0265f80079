//! Gzip delivery.
//!
//! The whole compressed body is built and the encoder finished before the
//! length is taken, so `Content-Length` always covers the gzip trailer.

use std::io::Write;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use flate2::{write::GzEncoder, Compression};

use crate::delivery::buffered::APPLICATION_JSON;
use crate::error::ReflectError;
use crate::reflect::Document;

pub fn compressed(doc: &Document) -> Result<Response, ReflectError> {
    let json = doc.to_pretty()?;
    let body = gzip(&json)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_ENCODING, HeaderValue::from_static("gzip")),
            (header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON)),
            (header::CONTENT_LENGTH, HeaderValue::from(body.len())),
        ],
        Body::from(body),
    )
        .into_response())
}

pub fn gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}
