//! Cookie mutation.
//!
//! Both endpoints take their cookie names from the query string and finish
//! with a 302 to `/cookies`, so a redirect-following client sees the result.

use std::collections::BTreeMap;

use axum::{
    http::{header, HeaderValue},
    response::Response,
};

use crate::error::ReflectError;
use crate::reflect::introspect::args;
use crate::reflect::Inbound;
use crate::simulate::redirect::found;

pub const COOKIES_PATH: &str = "/cookies";

/// `Expires` attribute for deleted cookies (one second past the epoch).
const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// `/cookies/set?name=value&...`
pub fn set_cookies(req: &Inbound) -> Result<Response, ReflectError> {
    let lines = cookie_lines(args(req), |name, value| {
        format!("{}={}; Path=/", name, sanitize_value(value))
    });
    with_cookies(lines)
}

/// `/cookies/delete?name&...`; values are ignored.
pub fn delete_cookies(req: &Inbound) -> Result<Response, ReflectError> {
    let lines = cookie_lines(args(req), |name, _| {
        format!("{}=; Path=/; Expires={}; Max-Age=0", name, EXPIRED)
    });
    with_cookies(lines)
}

fn cookie_lines<F>(args: BTreeMap<String, String>, format: F) -> Vec<String>
where
    F: Fn(&str, &str) -> String,
{
    args.iter()
        .filter_map(|(name, value)| {
            if is_token(name) {
                Some(format(name, value))
            } else {
                tracing::debug!(cookie = %name, "Skipping cookie with invalid name");
                None
            }
        })
        .collect()
}

fn with_cookies(lines: Vec<String>) -> Result<Response, ReflectError> {
    let mut response = found(COOKIES_PATH)?;
    for line in lines {
        let value = HeaderValue::from_str(&line).map_err(|_| ReflectError::InvalidHeaderValue(line))?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    Ok(response)
}

/// RFC 7230 token characters.
fn is_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

/// Drop bytes a cookie value cannot hold; quote values containing a space or comma.
fn sanitize_value(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|&c| c == ' ' || c == ',' || is_cookie_octet(c))
        .collect();
    if cleaned.contains(' ') || cleaned.contains(',') {
        format!("\"{}\"", cleaned)
    } else {
        cleaned
    }
}

fn is_cookie_octet(c: char) -> bool {
    matches!(c, '\x21' | '\x23'..='\x2b' | '\x2d'..='\x3a' | '\x3c'..='\x5b' | '\x5d'..='\x7e')
}
