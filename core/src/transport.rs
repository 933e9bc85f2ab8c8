//! The transport seam.
//!
//! # Design
//! The core never performs network I/O: it composes a `ResolvedRequest`
//! and hands it to whatever implements `Transport`. The transport owns
//! suspension, retries, timeouts and cancellation; its failures reach the
//! caller as an opaque `TransportError`. One transport instance is
//! accepted at root construction and threaded unchanged to every node of
//! the tree.

use thiserror::Error;

use crate::http::{HttpMethod, HttpResponse, ResolvedRequest};

/// An opaque failure reported by the external transport.
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        TransportError(message.into())
    }
}

/// External collaborator that executes composed requests.
pub trait Transport: Send + Sync {
    /// Execute a fully-resolved request under the given verb.
    fn request(
        &self,
        method: HttpMethod,
        request: &ResolvedRequest,
    ) -> Result<HttpResponse, TransportError>;

    /// Issue a JSONP request. Most transports have no JSONP machinery, so
    /// the default implementation reports the capability as unsupported.
    fn jsonp(&self, url: &str, callback_param: &str) -> Result<HttpResponse, TransportError> {
        let _ = (url, callback_param);
        Err(TransportError::new("transport does not support JSONP"))
    }
}

/// Test transport that records every composed request and answers with an
/// empty 200.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct TransportRecorder {
    calls: std::sync::Mutex<Vec<(HttpMethod, ResolvedRequest)>>,
}

#[cfg(test)]
impl TransportRecorder {
    pub(crate) fn last(&self) -> Option<(HttpMethod, ResolvedRequest)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
impl Transport for TransportRecorder {
    fn request(
        &self,
        method: HttpMethod,
        request: &ResolvedRequest,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push((method, request.clone()));
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        })
    }
}
