//! Response document assembly.
//!
//! A `Document` is a sorted key→value mapping. Serializing the same document
//! twice always yields the same bytes: keys come out in lexicographic order at
//! every level, and the pretty form always uses two-space indentation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::reflect::facet::{Facet, FacetValue};
use crate::reflect::introspect::{facet_value, Inbound};

/// Key the stream encoder injects into each streamed object.
pub const ID_KEY: &str = "id";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    fields: BTreeMap<String, FacetValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FacetValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FacetValue> {
        self.fields.get(key)
    }

    pub fn set_id(&mut self, id: u64) {
        self.insert(ID_KEY, FacetValue::Number(id));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Indented form used by the buffered and compressed encoders.
    pub fn to_pretty(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    /// Single-line form used by the stream encoder.
    pub fn to_compact(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl From<BTreeMap<String, String>> for Document {
    fn from(map: BTreeMap<String, String>) -> Self {
        let fields = map
            .into_iter()
            .map(|(k, v)| (k, FacetValue::Text(v)))
            .collect();
        Self { fields }
    }
}

/// Build a document holding one entry per requested facet.
pub fn assemble(req: &Inbound, facets: &[Facet]) -> Document {
    let mut doc = Document::new();
    for &facet in facets {
        doc.insert(facet.name(), facet_value(req, facet));
    }
    doc
}

/// Like [`assemble`], but from facet names. Names outside the closed set are skipped.
pub fn assemble_named<'a>(req: &Inbound, names: impl IntoIterator<Item = &'a str>) -> Document {
    let facets: Vec<Facet> = names
        .into_iter()
        .filter_map(|name| match name.parse::<Facet>() {
            Ok(facet) => Some(facet),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping facet");
                None
            }
        })
        .collect();
    assemble(req, &facets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn sample() -> Inbound {
        let (parts, _) = Request::builder()
            .method("GET")
            .uri("/get?z=26&a=1")
            .header("host", "localhost:8000")
            .header("user-agent", "reflector-test/1.0")
            .header("x-zeta", "last")
            .header("accept", "*/*")
            .body(())
            .unwrap()
            .into_parts();
        Inbound::from_parts(&parts, Some("127.0.0.1:40000".parse().unwrap()))
    }

    #[test]
    fn test_get_facets_produce_exact_keys() {
        let doc = assemble(&sample(), &[Facet::Headers, Facet::Url, Facet::Args, Facet::Origin]);
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["args", "headers", "origin", "url"]);
        assert_eq!(doc.get("origin"), Some(&FacetValue::Text("127.0.0.1".into())));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let req = sample();
        let facets = [Facet::UserAgent, Facet::Headers, Facet::Args, Facet::Json];
        let first = assemble(&req, &facets).to_pretty().unwrap();
        let second = assemble(&req, &facets).to_pretty().unwrap();
        assert_eq!(first, second);

        let text = String::from_utf8(first).unwrap();
        assert!(text.starts_with("{\n  \"args\": {\n    \"a\": \"1\",\n    \"z\": \"26\"\n  },"));
        assert!(text.find("\"Accept\"").unwrap() < text.find("\"X-Zeta\"").unwrap());
        assert!(text.contains("\"json\": null"));
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        let doc = assemble_named(&sample(), ["method", "body", "user-agent", ""]);
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["method", "user-agent"]);
    }

    #[test]
    fn test_compact_form_with_id() {
        let mut doc = assemble(&sample(), &[Facet::Method]);
        doc.set_id(3);
        assert_eq!(doc.to_compact().unwrap(), br#"{"id":3,"method":"GET"}"#.to_vec());
    }

    #[test]
    fn test_empty_facet_list() {
        let doc = assemble(&sample(), &[]);
        assert!(doc.is_empty());
        assert_eq!(doc.to_pretty().unwrap(), b"{}".to_vec());
    }
}
