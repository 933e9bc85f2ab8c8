//! Hierarchical API endpoint configuration and request composition.
//!
//! # Overview
//! A recursively nested endpoint declaration (base address, path fragment,
//! request options, metadata, named children) resolves into a tree of
//! nodes in which every node inherits and deep-merges its ancestors'
//! settings. Children are instantiated lazily by dotted-path lookup and
//! memoized, so a path always resolves to the identical node. Per call,
//! the node's persisted options are reduced with caller-supplied override
//! descriptors into a fully-resolved request handed to an external
//! transport.
//!
//! # Design
//! - The core performs no network I/O: it composes `ResolvedRequest`
//!   values and hands them to whatever implements `Transport` (the
//!   host-does-IO pattern). Retries, timeouts and cancellation belong to
//!   the transport.
//! - Merge precedence is rightmost-wins per leaf key; header/param maps
//!   merge key-by-key instead of being replaced wholesale.
//! - URL composition is a left fold in which an absolute fragment resets
//!   the accumulator.
//! - Nodes are immutable after construction except for the child
//!   memoization cache, so `Arc`-shared trees are safe across threads.

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod merge;
pub mod node;
pub mod service;
pub mod transport;
pub mod url;

pub use client::ApiClient;
pub use config::{ApiConfig, HeaderValue, Headers, ParamScalar, ParamValue, Params, RequestOptions};
pub use diagnostics::{Diagnostics, LogDiagnostics, NoopDiagnostics};
pub use error::Error;
pub use http::{
    HeaderSource, HttpMethod, HttpRequest, HttpResponse, ParamSource, RequestDescriptor,
    ResolvedRequest,
};
pub use node::{ApiNode, ResolvedConfig};
pub use service::{ApiService, ApiServiceBuilder};
pub use transport::{Transport, TransportError};
pub use url::merge_urls;
