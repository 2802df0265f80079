//! Redirect simulations.
//!
//! `/redirect/{n}` is a countdown driven by the client: each request answers
//! with exactly one 302, to `/{name}/{n-1}`, or to `/get` once `n <= 1`.
//!
//! `/redirect-to?url=` redirects to whatever `url` holds, unchecked. This is
//! an open redirect on purpose; test harnesses use it to reach arbitrary
//! targets.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ReflectError;
use crate::reflect::introspect::args;
use crate::reflect::Inbound;

/// Terminal state of every redirect chain.
pub const CHAIN_END: &str = "/get";

/// Where `/{name}/{n}` points next.
pub fn next_hop(name: &str, n: u64) -> String {
    if n <= 1 {
        CHAIN_END.to_string()
    } else {
        format!("/{}/{}", name, n - 1)
    }
}

pub fn redirect(name: &str, n: u64) -> Result<Response, ReflectError> {
    found(&next_hop(name, n))
}

pub fn redirect_to(req: &Inbound) -> Result<Response, ReflectError> {
    let target = args(req)
        .remove("url")
        .ok_or(ReflectError::MissingParameter("url"))?;
    found(&target)
}

/// 302 with `Location` set verbatim.
pub fn found(location: &str) -> Result<Response, ReflectError> {
    let value = HeaderValue::from_str(location)
        .map_err(|_| ReflectError::InvalidHeaderValue(location.to_string()))?;
    Ok((StatusCode::FOUND, [(header::LOCATION, value)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn inbound(uri: &str) -> Inbound {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Inbound::from_parts(&parts, None)
    }

    #[test]
    fn test_countdown_terminates_at_get() {
        assert_eq!(next_hop("redirect", 3), "/redirect/2");
        assert_eq!(next_hop("redirect", 2), "/redirect/1");
        assert_eq!(next_hop("redirect", 1), "/get");
        assert_eq!(next_hop("redirect", 0), "/get");
        assert_eq!(next_hop("relative-redirect", 10), "/relative-redirect/9");
    }

    #[test]
    fn test_redirect_response() {
        let response = redirect("redirect", 3).unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/redirect/2");
    }

    #[test]
    fn test_redirect_to() {
        let response = redirect_to(&inbound("/redirect-to?url=https%3A%2F%2Fexample.com")).unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://example.com");
    }

    #[test]
    fn test_redirect_to_requires_url() {
        assert!(matches!(
            redirect_to(&inbound("/redirect-to?other=1")),
            Err(ReflectError::MissingParameter("url"))
        ));
    }

    #[test]
    fn test_redirect_to_rejects_unencodable_target() {
        assert!(matches!(
            redirect_to(&inbound("/redirect-to?url=%0D%0Aevil")),
            Err(ReflectError::InvalidHeaderValue(_))
        ));
    }
}
