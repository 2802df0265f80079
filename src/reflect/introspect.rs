//! Request introspection.
//!
//! # Responsibilities
//! - Capture the parts of an inbound request that facets read
//! - Extract one facet at a time, without side effects
//!
//! # Known Limitations
//! - Multi-valued headers and repeated query arguments collapse to their
//!   first occurrence. Later values are dropped, not merged.
//! - `url` always uses the `http://` scheme; there is no TLS detection.
//! - `origin` strips everything from the last `:` on. An address without a
//!   colon is returned unchanged.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::http::{header, request::Parts, HeaderMap, Method, Uri};

use crate::reflect::facet::{Facet, FacetValue};

/// Read-only view of an inbound request.
///
/// Built once per request from the request head and the peer address.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    /// Raw peer address as `host:port`, or empty when the transport gave none.
    pub peer: String,
}

impl Inbound {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, peer: Option<SocketAddr>) -> Self {
        Self {
            method,
            uri,
            headers,
            peer: peer.map(|addr| addr.to_string()).unwrap_or_default(),
        }
    }

    pub fn from_parts(parts: &Parts, peer: Option<SocketAddr>) -> Self {
        Self::new(parts.method.clone(), parts.uri.clone(), parts.headers.clone(), peer)
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }
}

/// Produce the value of one facet.
pub fn facet_value(req: &Inbound, facet: Facet) -> FacetValue {
    match facet {
        Facet::Headers => FacetValue::Map(headers(req)),
        Facet::Url => FacetValue::Text(url(req)),
        Facet::Args => FacetValue::Map(args(req)),
        Facet::UserAgent => FacetValue::Text(user_agent(req)),
        Facet::Origin => FacetValue::Text(origin(&req.peer).to_string()),
        Facet::Gzipped => FacetValue::Flag(true),
        Facet::Method => FacetValue::Text(req.method.to_string()),
        Facet::Cookies => FacetValue::Map(cookies(req)),
        // Request bodies are not read yet. These keys stay present with
        // empty placeholders so clients that expect them keep working.
        Facet::Form | Facet::Files => FacetValue::Map(BTreeMap::new()),
        Facet::Data => FacetValue::Text(String::new()),
        Facet::Json => FacetValue::Null,
    }
}

/// Peer address without its trailing `:port`.
pub fn origin(peer: &str) -> &str {
    match peer.rfind(':') {
        Some(idx) => &peer[..idx],
        None => peer,
    }
}

/// Header name to first value, names in canonical MIME form.
pub fn headers(req: &Inbound) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for name in req.headers.keys() {
        if let Some(value) = req.headers.get(name) {
            out.insert(
                canonical_header_name(name.as_str()),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
    }
    out
}

/// Query argument name to first value.
pub fn args(req: &Inbound) -> BTreeMap<String, String> {
    query_args(req.uri.query().unwrap_or(""))
}

pub fn query_args(query: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (name, value) in ::url::form_urlencoded::parse(query.as_bytes()) {
        out.entry(name.into_owned()).or_insert_with(|| value.into_owned());
    }
    out
}

/// Cookie name to value; the last occurrence of a name wins.
pub fn cookies(req: &Inbound) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for value in req.headers.get_all(header::COOKIE) {
        let Ok(line) = value.to_str() else {
            continue;
        };
        for pair in line.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            out.insert(name.to_string(), unquote(value.trim()).to_string());
        }
    }
    out
}

/// `http://<host><path-and-query>`.
pub fn url(req: &Inbound) -> String {
    let host = req
        .headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri.authority().map(|a| a.to_string()))
        .unwrap_or_default();
    let path_and_query = req
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!("http://{}{}", host, path_and_query)
}

pub fn user_agent(req: &Inbound) -> String {
    req.headers
        .get(header::USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// `x-forwarded-for` becomes `X-Forwarded-For`.
pub fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
