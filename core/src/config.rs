//! Raw endpoint configuration literals.
//!
//! # Design
//! `ApiConfig` is the recursive declaration callers hand to the service:
//! an optional base address, an optional path fragment, request options,
//! arbitrary metadata and named child declarations. Every field has a
//! defined default so literals can be as sparse as `{}`. The types derive
//! serde traits so a whole tree can be loaded from JSON as easily as built
//! in Rust.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Header values: a single string or a sequence of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    One(String),
    Many(Vec<String>),
}

impl HeaderValue {
    /// View the value as a slice-like list of strings.
    pub fn values(&self) -> Vec<&str> {
        match self {
            HeaderValue::One(v) => vec![v.as_str()],
            HeaderValue::Many(vs) => vs.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(v: &str) -> Self {
        HeaderValue::One(v.to_string())
    }
}

/// A scalar query-parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamScalar {
    Bool(bool),
    Number(Number),
    String(String),
}

impl fmt::Display for ParamScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamScalar::Bool(v) => write!(f, "{v}"),
            ParamScalar::Number(v) => write!(f, "{v}"),
            ParamScalar::String(v) => f.write_str(v),
        }
    }
}

/// Query-parameter values: one scalar or a sequence of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    One(ParamScalar),
    Many(Vec<ParamScalar>),
}

impl ParamValue {
    /// Flatten into the scalar list used for query encoding.
    pub fn scalars(&self) -> Vec<&ParamScalar> {
        match self {
            ParamValue::One(v) => vec![v],
            ParamValue::Many(vs) => vs.iter().collect(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::One(ParamScalar::String(v.to_string()))
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::One(ParamScalar::Number(Number::from(v)))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::One(ParamScalar::Bool(v))
    }
}

/// Header collection, keyed by header name.
pub type Headers = BTreeMap<String, HeaderValue>;

/// Query-parameter collection, keyed by parameter name.
pub type Params = BTreeMap<String, ParamValue>;

/// Persisted request options attached to an endpoint declaration.
///
/// Deep-merged down the tree: child keys win, absent keys inherit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub headers: Headers,
    pub params: Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_credentials: Option<bool>,
}

impl RequestOptions {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.params.is_empty() && self.with_credentials.is_none()
    }
}

/// One endpoint declaration, possibly carrying nested declarations.
///
/// All fields are optional; resolution fills in defaults and inherits from
/// the parent node (see `node::ApiNode`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Absolute origin, e.g. `https://api.example.com`. Inherited from the
    /// parent when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Relative path fragment for this endpoint, e.g. `/users`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,

    /// Arbitrary caller data. Never inherited across levels.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,

    /// Named child declarations, resolved lazily by dotted path.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub endpoints: BTreeMap<String, ApiConfig>,
}

impl ApiConfig {
    /// True when the literal declares nothing at all. Such literals are
    /// legal but trigger a diagnostics warning at construction.
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none()
            && self.url.is_none()
            && self.options.as_ref().map_or(true, |o| o.is_empty())
            && self.metadata.is_empty()
            && self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_from_sparse_json() {
        let config: ApiConfig = serde_json::from_str(r#"{"url":"/users"}"#).unwrap();
        assert_eq!(config.url.as_deref(), Some("/users"));
        assert!(config.base_url.is_none());
        assert!(config.endpoints.is_empty());
        assert!(config.metadata.is_empty());
    }

    #[test]
    fn config_deserializes_nested_endpoints() {
        let config: ApiConfig = serde_json::from_str(
            r#"{
                "base_url": "https://api.example.com",
                "url": "/v1",
                "options": {"headers": {"accept": "application/json"}},
                "endpoints": {
                    "users": {
                        "url": "/users",
                        "metadata": {"cache": true}
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
        let users = &config.endpoints["users"];
        assert_eq!(users.url.as_deref(), Some("/users"));
        assert_eq!(users.metadata["cache"], Value::Bool(true));
        let options = config.options.unwrap();
        assert_eq!(
            options.headers["accept"],
            HeaderValue::One("application/json".to_string())
        );
    }

    #[test]
    fn header_value_accepts_one_or_many() {
        let one: HeaderValue = serde_json::from_str(r#""a""#).unwrap();
        assert_eq!(one.values(), vec!["a"]);
        let many: HeaderValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(many.values(), vec!["a", "b"]);
    }

    #[test]
    fn param_scalars_display_like_query_values() {
        assert_eq!(ParamScalar::Bool(true).to_string(), "true");
        assert_eq!(ParamScalar::Number(Number::from(42)).to_string(), "42");
        assert_eq!(ParamScalar::String("x y".to_string()).to_string(), "x y");
    }

    #[test]
    fn param_value_accepts_mixed_scalars() {
        let value: ParamValue = serde_json::from_str(r#"[1, "two", false]"#).unwrap();
        let rendered: Vec<String> = value.scalars().iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["1", "two", "false"]);
    }

    #[test]
    fn empty_literal_reports_empty() {
        assert!(ApiConfig::default().is_empty());
        let config = ApiConfig {
            url: Some("/x".to_string()),
            ..ApiConfig::default()
        };
        assert!(!config.is_empty());
    }
}
