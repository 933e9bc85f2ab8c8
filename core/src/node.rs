//! The resolved endpoint tree.
//!
//! # Design
//! An `ApiNode` is one endpoint with its configuration already merged
//! against every ancestor. Construction is eager only for the node itself:
//! child declarations stay raw until a dotted-path `resolve` touches them,
//! at which point the child is built once, cached, and returned by `Arc`
//! for every later lookup (identity stability). The cache is the only
//! mutable state a node ever has; the check-then-insert runs under a
//! single mutex guard so concurrent resolvers of the same segment observe
//! exactly one winner.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use serde_json::{Map, Value};

use crate::client::ApiClient;
use crate::config::{ApiConfig, RequestOptions};
use crate::diagnostics::Diagnostics;
use crate::merge::merge_options;
use crate::transport::Transport;

/// A node's configuration after ancestor merging.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Absolute origin, own declaration or inherited (parent base plus
    /// parent fragment). Empty for a root that declares none.
    pub base_url: String,
    /// This node's own path fragment.
    pub url: String,
    /// Options deep-merged down from the root.
    pub options: RequestOptions,
    /// Own metadata only; never inherited.
    pub metadata: Map<String, Value>,
    /// Raw child declarations, resolved lazily.
    pub endpoints: BTreeMap<String, ApiConfig>,
}

/// One resolved endpoint in the configuration tree.
pub struct ApiNode {
    config: ResolvedConfig,
    parent: Weak<ApiNode>,
    transport: Arc<dyn Transport>,
    diagnostics: Arc<dyn Diagnostics>,
    resolved_children: Mutex<HashMap<String, Arc<ApiNode>>>,
    client: ApiClient,
}

impl ApiNode {
    /// Build a root node from a raw literal.
    pub(crate) fn new_root(
        config: &ApiConfig,
        transport: Arc<dyn Transport>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Arc<ApiNode> {
        Self::construct(config, transport, diagnostics, None)
    }

    fn construct(
        raw: &ApiConfig,
        transport: Arc<dyn Transport>,
        diagnostics: Arc<dyn Diagnostics>,
        parent: Option<&Arc<ApiNode>>,
    ) -> Arc<ApiNode> {
        if raw.is_empty() {
            diagnostics.warn("empty endpoint configuration, constructing node with defaults");
        }

        let base_url = raw.base_url.clone().unwrap_or_else(|| match parent {
            // Inherited base: parent's merged base concatenated with the
            // parent's own fragment. Slash handling happens in merge_urls.
            Some(parent) => format!("{}{}", parent.config.base_url, parent.config.url),
            None => String::new(),
        });
        let url = raw.url.clone().unwrap_or_default();
        let own_options = raw.options.clone().unwrap_or_default();
        let options = match parent {
            Some(parent) => merge_options(&parent.config.options, &own_options),
            None => own_options,
        };

        let client = ApiClient::new(transport.clone(), &base_url, &url, options.clone());

        Arc::new(ApiNode {
            config: ResolvedConfig {
                base_url,
                url,
                options,
                metadata: raw.metadata.clone(),
                endpoints: raw.endpoints.clone(),
            },
            parent: parent.map(Arc::downgrade).unwrap_or_default(),
            transport,
            diagnostics,
            resolved_children: Mutex::new(HashMap::new()),
            client,
        })
    }

    /// Resolve a descendant by dotted path.
    ///
    /// An empty path is the node itself. An unknown segment is a valid
    /// negative result, `None`. Repeated resolution of the same path from
    /// the same node returns the identical `Arc`, and resolving `"a.b"` is
    /// equivalent to resolving `"a"` then `"b"`.
    pub fn resolve(self: &Arc<Self>, path: &str) -> Option<Arc<ApiNode>> {
        if path.is_empty() {
            return Some(Arc::clone(self));
        }

        let (segment, remainder) = match path.split_once('.') {
            Some((segment, remainder)) => (segment, Some(remainder)),
            None => (path, None),
        };

        let child = {
            let mut cache = self
                .resolved_children
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match cache.get(segment) {
                Some(existing) => Arc::clone(existing),
                None => {
                    let declaration = self.config.endpoints.get(segment)?;
                    let child = Self::construct(
                        declaration,
                        self.transport.clone(),
                        self.diagnostics.clone(),
                        Some(self),
                    );
                    cache.insert(segment.to_string(), Arc::clone(&child));
                    child
                }
            }
        };

        match remainder {
            Some(remainder) => child.resolve(remainder),
            None => Some(child),
        }
    }

    /// Merged configuration of this node.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// This node's own metadata (empty if none was declared).
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.config.metadata
    }

    /// Composed URL: merged base address plus path fragment.
    pub fn url(&self) -> &str {
        self.client.url()
    }

    /// Request composer and verb facade bound to this node.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The parent node, if this is not the root and the tree is alive.
    pub fn parent(&self) -> Option<Arc<ApiNode>> {
        self.parent.upgrade()
    }
}
