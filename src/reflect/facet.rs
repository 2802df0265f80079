//! The closed set of request facets and the values they produce.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// One reportable aspect of an inbound request.
///
/// Adding a facet means adding a variant here; the introspector match in
/// `introspect::facet_value` is exhaustive, so the compiler points at every
/// place that needs a new case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Headers,
    Url,
    Args,
    UserAgent,
    Origin,
    Gzipped,
    Method,
    Form,
    Data,
    Files,
    Json,
    Cookies,
}

impl Facet {
    pub const ALL: [Facet; 12] = [
        Facet::Headers,
        Facet::Url,
        Facet::Args,
        Facet::UserAgent,
        Facet::Origin,
        Facet::Gzipped,
        Facet::Method,
        Facet::Form,
        Facet::Data,
        Facet::Files,
        Facet::Json,
        Facet::Cookies,
    ];

    /// Key under which the facet appears in a response document.
    pub fn name(self) -> &'static str {
        match self {
            Facet::Headers => "headers",
            Facet::Url => "url",
            Facet::Args => "args",
            Facet::UserAgent => "user-agent",
            Facet::Origin => "origin",
            Facet::Gzipped => "gzipped",
            Facet::Method => "method",
            Facet::Form => "form",
            Facet::Data => "data",
            Facet::Files => "files",
            Facet::Json => "json",
            Facet::Cookies => "cookies",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a facet name is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown facet `{0}`")]
pub struct UnknownFacet(pub String);

impl FromStr for Facet {
    type Err = UnknownFacet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facet::ALL
            .into_iter()
            .find(|facet| facet.name() == s)
            .ok_or_else(|| UnknownFacet(s.to_string()))
    }
}

/// Value of a single facet, or the numeric `id` injected by the stream encoder.
///
/// Maps are `BTreeMap` so nested keys serialize in sorted order too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FacetValue {
    Text(String),
    Map(BTreeMap<String, String>),
    Flag(bool),
    Number(u64),
    Null,
}

impl From<String> for FacetValue {
    fn from(value: String) -> Self {
        FacetValue::Text(value)
    }
}

impl From<BTreeMap<String, String>> for FacetValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        FacetValue::Map(value)
    }
}
