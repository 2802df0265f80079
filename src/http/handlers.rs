//! Endpoint handlers.
//!
//! One match over `Endpoint` decides, for every route, which facets are
//! reflected and which delivery encoder or simulation answers.

use std::fmt::Write;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::delivery::{buffered, compressed, streamed};
use crate::error::ReflectError;
use crate::http::server::AppState;
use crate::reflect::{assemble, Facet, Inbound};
use crate::routing::{Endpoint, Extractor, MethodConstraint, Params, PathPattern, RouteMatch, RouteTable};
use crate::simulate::{cookies, delay, redirect, response_headers, status};

pub const GET_FACETS: &[Facet] = &[Facet::Headers, Facet::Url, Facet::Args, Facet::Origin];

/// `/post`, `/put` and `/patch`.
pub const BODY_FACETS: &[Facet] = &[
    Facet::Url,
    Facet::Args,
    Facet::Form,
    Facet::Data,
    Facet::Origin,
    Facet::Headers,
    Facet::Files,
    Facet::Json,
];

pub const DELETE_FACETS: &[Facet] = &[
    Facet::Url,
    Facet::Args,
    Facet::Data,
    Facet::Origin,
    Facet::Headers,
    Facet::Json,
];

pub const GZIP_FACETS: &[Facet] = &[Facet::Headers, Facet::Origin, Facet::Gzipped, Facet::Method];

pub const STREAM_FACETS: &[Facet] = &[Facet::Url, Facet::Args, Facet::Headers, Facet::Origin];

/// Produce the response for a matched route.
pub async fn respond(state: &AppState, matched: RouteMatch<'_>, req: &Inbound) -> Result<Response, ReflectError> {
    let endpoint = matched.route.endpoint;
    match (endpoint, matched.params) {
        (Endpoint::Index, _) => Ok(index(&state.routes)),
        (Endpoint::Ip, _) => buffered(&assemble(req, &[Facet::Origin])),
        (Endpoint::UserAgent, _) => buffered(&assemble(req, &[Facet::UserAgent])),
        (Endpoint::Headers, _) => buffered(&assemble(req, &[Facet::Headers])),
        (Endpoint::Get, _) => buffered(&assemble(req, GET_FACETS)),
        (Endpoint::Post | Endpoint::Put | Endpoint::Patch, _) => buffered(&assemble(req, BODY_FACETS)),
        (Endpoint::Delete, _) => buffered(&assemble(req, DELETE_FACETS)),
        (Endpoint::Gzip, _) => compressed(&assemble(req, GZIP_FACETS)),
        (Endpoint::Status, Params::Number(code)) => status::status(code),
        (Endpoint::ResponseHeaders, _) => response_headers::response_headers(req),
        (Endpoint::Redirect | Endpoint::RelativeRedirect, Params::Named { name, count }) => {
            redirect::redirect(&name, count)
        }
        (Endpoint::RedirectTo, _) => redirect::redirect_to(req),
        (Endpoint::Cookies, _) => buffered(&assemble(req, &[Facet::Cookies])),
        (Endpoint::SetCookies, _) => cookies::set_cookies(req),
        (Endpoint::DeleteCookies, _) => cookies::delete_cookies(req),
        (Endpoint::Stream, Params::Number(n)) => stream(state, req, n),
        (Endpoint::Delay, Params::Number(n)) => {
            delay::delay(req, n, state.simulation.max_delay_secs).await
        }
        (Endpoint::NotImplemented(path), _) => Err(ReflectError::NotImplemented(path)),
        (endpoint, params) => {
            tracing::error!(endpoint = endpoint.label(), ?params, "Route extractor does not fit endpoint");
            Err(ReflectError::RoutingMismatch)
        }
    }
}

fn stream(state: &AppState, req: &Inbound, requested: u64) -> Result<Response, ReflectError> {
    let count = match state.simulation.max_stream_objects {
        Some(max) if requested > max => {
            tracing::warn!(requested, max, "Clamping stream length");
            max
        }
        _ => requested,
    };
    streamed(assemble(req, STREAM_FACETS), count, state.simulation.stream_buffer)
}

/// Plain-text listing of the route table.
pub fn index(routes: &RouteTable) -> Response {
    let mut text = String::from("http-reflector: HTTP request reflection and behavior simulation\n\n");
    for route in routes.routes() {
        if route.endpoint == Endpoint::Index {
            continue;
        }
        let method = match &route.method {
            MethodConstraint::Any => "ANY".to_string(),
            MethodConstraint::Only(m) => m.to_string(),
        };
        let path = match (route.pattern, route.extractor) {
            (PathPattern::Prefix(p), Extractor::Digits { .. } | Extractor::NamedCount { .. }) => {
                format!("{}{{n}}", p)
            }
            (PathPattern::Prefix(p), Extractor::None) => format!("{}*", p),
            (PathPattern::Exact(p), _) => p.to_string(),
        };
        let note = match route.endpoint {
            Endpoint::NotImplemented(_) => "  (not implemented)",
            _ => "",
        };
        let _ = writeln!(text, "{:<7} {}{}", method, path, note);
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
        text,
    )
        .into_response()
}
