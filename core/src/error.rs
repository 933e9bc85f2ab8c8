//! Error types for the endpoint tree.
//!
//! # Design
//! The core has exactly two failure sites of its own: building a root
//! service without a transport, and materializing a wire request from a
//! composition that never picked up an HTTP method. Unknown paths are a
//! valid negative result (`None` from `resolve`), and empty configuration
//! literals are a diagnostics warning, not an error. Everything else is a
//! serialization failure or an opaque transport failure passed through.

use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum Error {
    /// A root service was built from a raw literal without a transport.
    #[error("no transport provided for root API service")]
    MissingTransport,

    /// A wire request was requested from a composition with no method.
    #[error("composed request carries no HTTP method")]
    MissingMethod,

    /// The request body could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The query parameters could not be form-encoded.
    #[error("failed to encode query parameters: {0}")]
    EncodeParams(#[from] serde_urlencoded::ser::Error),

    /// The external transport reported a failure. Opaque to the core.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
