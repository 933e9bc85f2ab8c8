//! Root service facade.
//!
//! # Design
//! `ApiService` owns the root of the endpoint tree behind a private field
//! and exposes only the narrow navigational surface: `resolve`, the root
//! client, url, metadata and merged config. Construction is explicit — a
//! builder taking the transport and the root literal, called once by the
//! owning application and passed by reference to consumers. There is no
//! global registry and no framework-managed lifecycle.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::diagnostics::{self, Diagnostics};
use crate::error::Error;
use crate::node::{ApiNode, ResolvedConfig};
use crate::transport::Transport;

/// Facade over the root of a resolved endpoint tree.
pub struct ApiService {
    root: Arc<ApiNode>,
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService").finish_non_exhaustive()
    }
}

impl ApiService {
    pub fn builder() -> ApiServiceBuilder {
        ApiServiceBuilder::default()
    }

    /// Wrap an existing node, exposing a subtree as its own service.
    pub fn from_node(node: Arc<ApiNode>) -> Self {
        ApiService { root: node }
    }

    /// Resolve a descendant endpoint by dotted path; `None` for unknown
    /// names.
    pub fn resolve(&self, path: &str) -> Option<Arc<ApiNode>> {
        self.root.resolve(path)
    }

    /// The root node itself.
    pub fn root(&self) -> &Arc<ApiNode> {
        &self.root
    }

    /// Verb facade of the root endpoint.
    pub fn client(&self) -> &ApiClient {
        self.root.client()
    }

    /// Composed URL of the root endpoint.
    pub fn url(&self) -> &str {
        self.root.url()
    }

    /// Root metadata.
    pub fn metadata(&self) -> &Map<String, Value> {
        self.root.metadata()
    }

    /// Merged root configuration.
    pub fn config(&self) -> &ResolvedConfig {
        self.root.config()
    }
}

/// Explicit factory for `ApiService`.
///
/// The transport is mandatory; omitting it fails construction with
/// `Error::MissingTransport`. An omitted configuration is legal but
/// degraded: the builder warns through the diagnostics sink and proceeds
/// with an all-default literal.
#[derive(Default)]
pub struct ApiServiceBuilder {
    config: Option<ApiConfig>,
    transport: Option<Arc<dyn Transport>>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
}

impl ApiServiceBuilder {
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn build(self) -> Result<ApiService, Error> {
        let transport = self.transport.ok_or(Error::MissingTransport)?;
        let diagnostics = self.diagnostics.unwrap_or_else(diagnostics::default_sink);
        let config = match self.config {
            Some(config) => config,
            None => {
                diagnostics.warn("no API configuration provided, building root with defaults");
                ApiConfig::default()
            }
        };
        let root = ApiNode::new_root(&config, transport, diagnostics);
        Ok(ApiService { root })
    }
}
