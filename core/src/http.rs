//! Request descriptors and plain-data wire types.
//!
//! # Design
//! `RequestDescriptor` is the partial, everything-optional value used both
//! as persisted endpoint options and as a per-call override. Composition
//! produces a `ResolvedRequest` with guaranteed `url`, `headers` and
//! `params`. Wire-level `HttpRequest`/`HttpResponse` stay plain owned data
//! (host-does-IO): the core builds requests and the caller executes them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{HeaderValue, Headers, ParamScalar, ParamValue, Params};
use crate::error::Error;
use crate::url;

/// HTTP verb for a composed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Parse a method name, case-insensitively. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<HttpMethod> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            "HEAD" => Some(HttpMethod::Head),
            "OPTIONS" => Some(HttpMethod::Options),
            _ => None,
        }
    }
}

/// Headers in either structured (name/value pairs) or plain-map form.
///
/// Normalization flattens both into `Headers`, folding repeated pair names
/// into `Many` values, so the merge step never sees the difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderSource {
    Map(Headers),
    Pairs(Vec<(String, String)>),
}

/// Parameters in either structured (name/value pairs) or plain-map form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamSource {
    Map(Params),
    Pairs(Vec<(String, String)>),
}

/// A partial request-shaped override supplied at a call site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_credentials: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_progress: Option<bool>,
    /// Opaque transport context; carried through composition unread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl RequestDescriptor {
    /// Descriptor carrying only a URL fragment.
    pub fn for_url(url: impl Into<String>) -> Self {
        RequestDescriptor {
            url: Some(url.into()),
            ..RequestDescriptor::default()
        }
    }

    /// Headers flattened into plain-map form.
    pub(crate) fn normalized_headers(&self) -> Headers {
        match &self.headers {
            None => Headers::new(),
            Some(HeaderSource::Map(map)) => map.clone(),
            Some(HeaderSource::Pairs(pairs)) => {
                let mut map = Headers::new();
                for (name, value) in pairs {
                    push_header(&mut map, name, value);
                }
                map
            }
        }
    }

    /// Parameters flattened into plain-map form.
    pub(crate) fn normalized_params(&self) -> Params {
        match &self.params {
            None => Params::new(),
            Some(ParamSource::Map(map)) => map.clone(),
            Some(ParamSource::Pairs(pairs)) => {
                let mut map = Params::new();
                for (name, value) in pairs {
                    push_param(&mut map, name, value);
                }
                map
            }
        }
    }
}

fn push_header(map: &mut Headers, name: &str, value: &str) {
    match map.remove(name) {
        None => {
            map.insert(name.to_string(), HeaderValue::One(value.to_string()));
        }
        Some(HeaderValue::One(existing)) => {
            map.insert(
                name.to_string(),
                HeaderValue::Many(vec![existing, value.to_string()]),
            );
        }
        Some(HeaderValue::Many(mut existing)) => {
            existing.push(value.to_string());
            map.insert(name.to_string(), HeaderValue::Many(existing));
        }
    }
}

fn push_param(map: &mut Params, name: &str, value: &str) {
    let scalar = ParamScalar::String(value.to_string());
    match map.remove(name) {
        None => {
            map.insert(name.to_string(), ParamValue::One(scalar));
        }
        Some(ParamValue::One(existing)) => {
            map.insert(name.to_string(), ParamValue::Many(vec![existing, scalar]));
        }
        Some(ParamValue::Many(mut existing)) => {
            existing.push(scalar);
            map.insert(name.to_string(), ParamValue::Many(existing));
        }
    }
}

/// Output of request composition: everything a transport needs, with
/// `url`, `headers` and `params` guaranteed present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRequest {
    pub url: String,
    pub method: Option<String>,
    pub headers: Headers,
    pub params: Params,
    pub body: Option<Value>,
    pub with_credentials: Option<bool>,
    pub observe: Option<String>,
    pub response_type: Option<String>,
    pub report_progress: Option<bool>,
    pub context: Option<Value>,
}

impl ResolvedRequest {
    /// Final URL with the encoded query attached. The separator follows
    /// the composed URL's own shape: no `?` appends `?`, a `?` with
    /// trailing content appends `&`, a trailing `?` appends nothing.
    pub fn url_with_params(&self) -> Result<String, Error> {
        let query = url::encode_query(&self.params)?;
        Ok(url::join_query(&self.url, &self.url, &query))
    }

    /// Headers flattened to wire pairs; `Many` values become repeated
    /// header lines.
    pub fn wire_headers(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in &self.headers {
            for v in value.values() {
                pairs.push((name.clone(), v.to_string()));
            }
        }
        pairs
    }
}

/// An HTTP request described as plain data, ready for a host to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data, produced by the host after
/// executing an `HttpRequest`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
