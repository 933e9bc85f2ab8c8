//! Echo server for wire-level integration tests.
//!
//! Accepts any method on any path and answers with a JSON description of
//! the request it received: method, path, query string, headers and body.
//! Integration tests point a real HTTP transport at this server and assert
//! that composed requests arrive on the wire exactly as expected.

use std::collections::BTreeMap;

use axum::{extract::Request, response::Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server saw, reflected back to the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EchoResponse {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: Option<String>,
}

pub fn app() -> Router {
    // Every method and every path lands in the echo handler.
    Router::new().fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(request: Request) -> Json<EchoResponse> {
    let (parts, body) = request.into_parts();

    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &parts.headers {
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(value.to_str().unwrap_or_default().to_string());
    }

    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let body = if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&bytes).into_owned())
    };

    Json(EchoResponse {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_response_roundtrips_through_json() {
        let echo = EchoResponse {
            method: "GET".to_string(),
            path: "/api/users".to_string(),
            query: Some("page=1".to_string()),
            headers: BTreeMap::from([(
                "accept".to_string(),
                vec!["application/json".to_string()],
            )]),
            body: None,
        };
        let json = serde_json::to_string(&echo).unwrap();
        let back: EchoResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.method, echo.method);
        assert_eq!(back.path, echo.path);
        assert_eq!(back.query, echo.query);
        assert_eq!(back.headers, echo.headers);
        assert!(back.body.is_none());
    }

    #[test]
    fn absent_query_serializes_as_null() {
        let echo = EchoResponse {
            method: "DELETE".to_string(),
            path: "/x".to_string(),
            query: None,
            headers: BTreeMap::new(),
            body: None,
        };
        let json = serde_json::to_value(&echo).unwrap();
        assert_eq!(json["query"], serde_json::Value::Null);
    }
}
