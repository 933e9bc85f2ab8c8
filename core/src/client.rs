//! Per-node request composition and verb facade.
//!
//! # Design
//! An `ApiClient` is bound to one resolved endpoint: its composed URL and
//! its persisted options. `create_request` reduces an ordered list of
//! caller descriptors over that base — rightmost descriptor wins per leaf
//! key, header/param maps merge key-by-key, and URL fragments accumulate
//! through `merge_urls` (an absolute accumulator resets the fold). The
//! verb methods are pure glue: build one descriptor from the call's
//! arguments, compose, hand the result to the transport.

use std::sync::Arc;

use serde_json::Value;

use crate::config::RequestOptions;
use crate::error::Error;
use crate::http::{
    HttpMethod, HttpRequest, HttpResponse, ParamSource, RequestDescriptor, ResolvedRequest,
};
use crate::merge::{merge_headers, merge_params};
use crate::transport::Transport;
use crate::url::{encode_query, join_query, merge_urls};

/// Request composer and verb facade for one endpoint node.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    composed_url: String,
    options: RequestOptions,
}

impl ApiClient {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        base_url: &str,
        url: &str,
        options: RequestOptions,
    ) -> Self {
        ApiClient {
            transport,
            composed_url: merge_urls([base_url, url]),
            options,
        }
    }

    /// The node's composed URL: merged base address plus path fragment.
    pub fn url(&self) -> &str {
        &self.composed_url
    }

    /// Persisted options this client composes requests from.
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Compose `relative` onto this node's URL.
    pub fn create_url(&self, relative: &str) -> String {
        merge_urls([self.composed_url.as_str(), relative])
    }

    /// Compose `relative` onto this node's URL and attach `params` (merged
    /// with the node's persisted params) as a query string. The join
    /// character follows `relative`: no `?` prepends `?`, a `?` with
    /// trailing content prepends `&`, a trailing `?` prepends nothing.
    pub fn create_url_with_params(
        &self,
        relative: &str,
        params: Option<ParamSource>,
    ) -> Result<String, Error> {
        let descriptor = RequestDescriptor {
            url: Some(relative.to_string()),
            params,
            ..RequestDescriptor::default()
        };
        let resolved = self.create_request(&[descriptor]);
        let query = encode_query(&resolved.params)?;
        Ok(join_query(&resolved.url, relative, &query))
    }

    /// The node's persisted options lifted into resolved form, before any
    /// caller descriptor applies.
    fn base_request(&self) -> ResolvedRequest {
        ResolvedRequest {
            url: String::new(),
            headers: self.options.headers.clone(),
            params: self.options.params.clone(),
            with_credentials: self.options.with_credentials,
            ..ResolvedRequest::default()
        }
    }

    /// Reduce descriptors over this node's persisted options.
    ///
    /// Zero descriptors yield the options as-is with the node's own URL.
    /// Otherwise the last descriptor overrides the composition of all the
    /// preceding ones, giving precedence node < d1 < … < dn.
    pub fn create_request(&self, descriptors: &[RequestDescriptor]) -> ResolvedRequest {
        let (last, rest) = match descriptors.split_last() {
            None => {
                let mut resolved = self.base_request();
                resolved.url = self.composed_url.clone();
                return resolved;
            }
            Some(split) => split,
        };

        let base = if rest.is_empty() {
            self.base_request()
        } else {
            self.create_request(rest)
        };

        ResolvedRequest {
            url: merge_urls([
                self.composed_url.as_str(),
                base.url.as_str(),
                last.url.as_deref().unwrap_or(""),
            ]),
            method: last.method.clone().or(base.method),
            headers: merge_headers(&base.headers, &last.normalized_headers()),
            params: merge_params(&base.params, &last.normalized_params()),
            body: last.body.clone().or(base.body),
            with_credentials: last.with_credentials.or(base.with_credentials),
            observe: last.observe.clone().or(base.observe),
            response_type: last.response_type.clone().or(base.response_type),
            report_progress: last.report_progress.or(base.report_progress),
            context: last.context.clone().or(base.context),
        }
    }

    /// Materialize a composition into a wire `HttpRequest`: method parsed,
    /// params encoded into the URL, headers flattened to pairs, JSON body
    /// serialized. Requires that some descriptor supplied a method.
    pub fn create_http_request(
        &self,
        descriptors: &[RequestDescriptor],
    ) -> Result<HttpRequest, Error> {
        let resolved = self.create_request(descriptors);
        let method = resolved
            .method
            .as_deref()
            .and_then(HttpMethod::parse)
            .ok_or(Error::MissingMethod)?;
        let body = match &resolved.body {
            Some(value) => Some(serde_json::to_string(value)?),
            None => None,
        };
        Ok(HttpRequest {
            method,
            url: resolved.url_with_params()?,
            headers: resolved.wire_headers(),
            body,
        })
    }

    pub fn get(
        &self,
        url: &str,
        options: Option<&RequestDescriptor>,
    ) -> Result<HttpResponse, Error> {
        self.send(HttpMethod::Get, url, None, options)
    }

    pub fn post(
        &self,
        url: &str,
        body: Option<Value>,
        options: Option<&RequestDescriptor>,
    ) -> Result<HttpResponse, Error> {
        self.send(HttpMethod::Post, url, body, options)
    }

    pub fn put(
        &self,
        url: &str,
        body: Option<Value>,
        options: Option<&RequestDescriptor>,
    ) -> Result<HttpResponse, Error> {
        self.send(HttpMethod::Put, url, body, options)
    }

    pub fn patch(
        &self,
        url: &str,
        body: Option<Value>,
        options: Option<&RequestDescriptor>,
    ) -> Result<HttpResponse, Error> {
        self.send(HttpMethod::Patch, url, body, options)
    }

    pub fn delete(
        &self,
        url: &str,
        options: Option<&RequestDescriptor>,
    ) -> Result<HttpResponse, Error> {
        self.send(HttpMethod::Delete, url, None, options)
    }

    pub fn head(
        &self,
        url: &str,
        options: Option<&RequestDescriptor>,
    ) -> Result<HttpResponse, Error> {
        self.send(HttpMethod::Head, url, None, options)
    }

    pub fn options_request(
        &self,
        url: &str,
        options: Option<&RequestDescriptor>,
    ) -> Result<HttpResponse, Error> {
        self.send(HttpMethod::Options, url, None, options)
    }

    /// Issue a request under an explicit verb.
    pub fn request(
        &self,
        method: HttpMethod,
        url: &str,
        options: Option<&RequestDescriptor>,
    ) -> Result<HttpResponse, Error> {
        self.send(method, url, None, options)
    }

    /// JSONP via the transport, against this node's composed URL.
    pub fn jsonp(&self, url: &str, callback_param: &str) -> Result<HttpResponse, Error> {
        Ok(self.transport.jsonp(&self.create_url(url), callback_param)?)
    }

    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
        options: Option<&RequestDescriptor>,
    ) -> Result<HttpResponse, Error> {
        // The positional URL is the final override, applied on top of any
        // caller options.
        let mut descriptors = Vec::with_capacity(2);
        if let Some(options) = options {
            descriptors.push(options.clone());
        }
        descriptors.push(RequestDescriptor::for_url(url));

        let mut resolved = self.create_request(&descriptors);
        resolved.method = Some(method.as_str().to_string());
        if body.is_some() {
            resolved.body = body;
        }
        Ok(self.transport.request(method, &resolved)?)
    }
}
