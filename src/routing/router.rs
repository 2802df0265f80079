//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the route table
//! - Look up the route for a method + path
//! - Return the matched route with its parameters, or an explicit error
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - Exact paths are checked first, then prefixes in registration order
//! - First match wins; a method mismatch on a matched path is a 405, not a 404
//! - A route whose extractor rejects the path is a 404

use axum::http::Method;

use crate::error::ReflectError;
use crate::routing::matcher::{Extractor, Params, PathPattern};

/// Which HTTP methods a route accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodConstraint {
    Any,
    Only(Method),
}

/// Handler a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Index,
    Ip,
    UserAgent,
    Headers,
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Gzip,
    Status,
    ResponseHeaders,
    Redirect,
    RelativeRedirect,
    RedirectTo,
    Cookies,
    SetCookies,
    DeleteCookies,
    Stream,
    Delay,
    /// Registered so the path answers 501 instead of falling through to 404.
    NotImplemented(&'static str),
}

impl Endpoint {
    /// Label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Index => "index",
            Endpoint::Ip => "ip",
            Endpoint::UserAgent => "user-agent",
            Endpoint::Headers => "headers",
            Endpoint::Get => "get",
            Endpoint::Post => "post",
            Endpoint::Put => "put",
            Endpoint::Patch => "patch",
            Endpoint::Delete => "delete",
            Endpoint::Gzip => "gzip",
            Endpoint::Status => "status",
            Endpoint::ResponseHeaders => "response-headers",
            Endpoint::Redirect => "redirect",
            Endpoint::RelativeRedirect => "relative-redirect",
            Endpoint::RedirectTo => "redirect-to",
            Endpoint::Cookies => "cookies",
            Endpoint::SetCookies => "cookies-set",
            Endpoint::DeleteCookies => "cookies-delete",
            Endpoint::Stream => "stream",
            Endpoint::Delay => "delay",
            Endpoint::NotImplemented(_) => "not-implemented",
        }
    }
}

/// A single entry in the route table.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: MethodConstraint,
    pub pattern: PathPattern,
    pub extractor: Extractor,
    pub endpoint: Endpoint,
}

impl Route {
    pub fn any(pattern: PathPattern, endpoint: Endpoint) -> Self {
        Self {
            method: MethodConstraint::Any,
            pattern,
            extractor: Extractor::None,
            endpoint,
        }
    }

    pub fn only(method: Method, path: &'static str, endpoint: Endpoint) -> Self {
        Self {
            method: MethodConstraint::Only(method),
            pattern: PathPattern::Exact(path),
            extractor: Extractor::None,
            endpoint,
        }
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: Params,
}

/// Immutable, ordered route table.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Every endpoint the service exposes.
    pub fn standard() -> Self {
        use Endpoint::*;
        use PathPattern::{Exact, Prefix};

        let anchored = |max| Extractor::Digits { min: 1, max, anchored: true };
        let leading = |max| Extractor::Digits { min: 1, max, anchored: false };
        let named = Extractor::NamedCount { max_digits: 3 };

        Self::new(vec![
            Route::any(Exact("/"), Index),
            Route::any(Exact("/ip"), Ip),
            Route::any(Exact("/user-agent"), UserAgent),
            Route::any(Exact("/headers"), Headers),
            Route::only(Method::GET, "/get", Get),
            Route::only(Method::POST, "/post", Post),
            Route::only(Method::PUT, "/put", Put),
            Route::only(Method::PATCH, "/patch", Patch),
            Route::only(Method::DELETE, "/delete", Delete),
            Route::any(Exact("/gzip"), Gzip),
            Route::any(Prefix("/status/"), Status).with_extractor(anchored(3)),
            Route::any(Exact("/response-headers"), ResponseHeaders),
            Route::any(Prefix("/redirect/"), Redirect).with_extractor(named),
            Route::any(Exact("/redirect-to"), RedirectTo),
            Route::any(Prefix("/relative-redirect/"), RelativeRedirect).with_extractor(named),
            Route::any(Exact("/cookies"), Cookies),
            Route::any(Exact("/cookies/set"), SetCookies),
            Route::any(Exact("/cookies/delete"), DeleteCookies),
            Route::any(Prefix("/basic-auth/"), NotImplemented("/basic-auth")),
            Route::any(Prefix("/digest-auth/"), NotImplemented("/digest-auth")),
            Route::any(Prefix("/stream/"), Stream).with_extractor(leading(9)),
            Route::any(Prefix("/delay/"), Delay).with_extractor(leading(2)),
            Route::any(Exact("/html"), NotImplemented("/html")),
            Route::any(Exact("/robots.txt"), NotImplemented("/robots.txt")),
            Route::any(Exact("/deny"), NotImplemented("/deny")),
            Route::any(Exact("/cache"), NotImplemented("/cache")),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route for a request.
    ///
    /// Returns `RoutingMismatch` when no path matches or the extractor rejects
    /// the path, and `MethodMismatch` when the path matches but the method
    /// does not.
    pub fn match_request(&self, method: &Method, path: &str) -> Result<RouteMatch<'_>, ReflectError> {
        let route = self
            .routes
            .iter()
            .find(|r| r.pattern.is_exact_match(path))
            .or_else(|| self.routes.iter().find(|r| r.pattern.is_prefix_match(path)))
            .ok_or(ReflectError::RoutingMismatch)?;

        if let MethodConstraint::Only(allowed) = &route.method {
            if allowed != method {
                return Err(ReflectError::MethodMismatch {
                    allowed: allowed.clone(),
                });
            }
        }

        let params = route
            .extractor
            .extract(&route.pattern, path)
            .ok_or(ReflectError::RoutingMismatch)?;

        Ok(RouteMatch { route, params })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(table: &RouteTable, method: Method, path: &str) -> Result<(Endpoint, Params), ReflectError> {
        table
            .match_request(&method, path)
            .map(|m| (m.route.endpoint, m.params))
    }

    #[test]
    fn test_exact_routes() {
        let table = RouteTable::standard();
        assert_eq!(endpoint(&table, Method::GET, "/ip").unwrap().0, Endpoint::Ip);
        assert_eq!(endpoint(&table, Method::POST, "/headers").unwrap().0, Endpoint::Headers);
        assert_eq!(endpoint(&table, Method::GET, "/cookies").unwrap().0, Endpoint::Cookies);
        assert_eq!(endpoint(&table, Method::GET, "/cookies/set").unwrap().0, Endpoint::SetCookies);
        assert_eq!(endpoint(&table, Method::GET, "/").unwrap().0, Endpoint::Index);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let table = RouteTable::standard();
        assert!(matches!(
            endpoint(&table, Method::GET, "/nope"),
            Err(ReflectError::RoutingMismatch)
        ));
        assert!(matches!(
            endpoint(&table, Method::GET, "/ip/"),
            Err(ReflectError::RoutingMismatch)
        ));
        assert!(matches!(
            endpoint(&table, Method::GET, "/cookies/other"),
            Err(ReflectError::RoutingMismatch)
        ));
    }

    #[test]
    fn test_method_mismatch() {
        let table = RouteTable::standard();
        match endpoint(&table, Method::POST, "/get") {
            Err(ReflectError::MethodMismatch { allowed }) => assert_eq!(allowed, Method::GET),
            other => panic!("expected method mismatch, got {:?}", other),
        }
        assert!(endpoint(&table, Method::DELETE, "/delete").is_ok());
        assert!(matches!(
            endpoint(&table, Method::GET, "/delete"),
            Err(ReflectError::MethodMismatch { .. })
        ));
    }

    #[test]
    fn test_prefix_routes_extract_params() {
        let table = RouteTable::standard();
        assert_eq!(
            endpoint(&table, Method::GET, "/status/503").unwrap(),
            (Endpoint::Status, Params::Number(503))
        );
        assert_eq!(
            endpoint(&table, Method::GET, "/stream/20").unwrap(),
            (Endpoint::Stream, Params::Number(20))
        );
        assert_eq!(
            endpoint(&table, Method::GET, "/redirect/4").unwrap(),
            (Endpoint::Redirect, Params::Named { name: "redirect".into(), count: 4 })
        );
        assert_eq!(
            endpoint(&table, Method::GET, "/relative-redirect/2").unwrap(),
            (Endpoint::RelativeRedirect, Params::Named { name: "relative-redirect".into(), count: 2 })
        );
    }

    #[test]
    fn test_bad_params_are_not_found() {
        let table = RouteTable::standard();
        for path in ["/status/1000", "/status/abc", "/status/200/", "/delay/x", "/stream/", "/redirect/x"] {
            assert!(
                matches!(endpoint(&table, Method::GET, path), Err(ReflectError::RoutingMismatch)),
                "{} should not match",
                path
            );
        }
    }

    #[test]
    fn test_trailing_text_after_count() {
        let table = RouteTable::standard();
        assert_eq!(
            endpoint(&table, Method::GET, "/stream/2/").unwrap(),
            (Endpoint::Stream, Params::Number(2))
        );
        assert_eq!(
            endpoint(&table, Method::GET, "/delay/0/").unwrap(),
            (Endpoint::Delay, Params::Number(0))
        );
        assert_eq!(
            endpoint(&table, Method::GET, "/redirect/3/").unwrap(),
            (Endpoint::Redirect, Params::Named { name: "redirect".into(), count: 3 })
        );
    }

    #[test]
    fn test_exact_beats_prefix() {
        let table = RouteTable::new(vec![
            Route::any(PathPattern::Prefix("/a/"), Endpoint::Stream),
            Route::any(PathPattern::Exact("/a/b"), Endpoint::Ip),
        ]);
        assert_eq!(endpoint(&table, Method::GET, "/a/b").unwrap().0, Endpoint::Ip);
        assert_eq!(endpoint(&table, Method::GET, "/a/c").unwrap().0, Endpoint::Stream);
    }

    #[test]
    fn test_unimplemented_paths_are_routed() {
        let table = RouteTable::standard();
        assert_eq!(
            endpoint(&table, Method::GET, "/basic-auth/user/pass").unwrap().0,
            Endpoint::NotImplemented("/basic-auth")
        );
        assert_eq!(
            endpoint(&table, Method::GET, "/robots.txt").unwrap().0,
            Endpoint::NotImplemented("/robots.txt")
        );
    }
}
