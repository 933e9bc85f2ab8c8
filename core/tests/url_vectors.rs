//! Verify URL composition against JSON test vectors in `test-vectors/`.
//!
//! Each vector names its case so a failing assertion points straight at
//! the offending rule: absolute-URL reset, slash trimming, query separator
//! selection and parameter encoding.

use std::sync::Arc;

use apitree_core::{
    merge_urls, ApiService, HttpMethod, HttpResponse, NoopDiagnostics, ParamSource, Params,
    ResolvedRequest, Transport, TransportError,
};

/// Transport that never gets called; URL composition happens before I/O.
struct NullTransport;

impl Transport for NullTransport {
    fn request(
        &self,
        _method: HttpMethod,
        _request: &ResolvedRequest,
    ) -> Result<HttpResponse, TransportError> {
        Err(TransportError::new("no I/O in URL vector tests"))
    }
}

#[test]
fn merge_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["merge_cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let fragments: Vec<&str> = case["fragments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f.as_str().unwrap())
            .collect();
        let expected = case["expected"].as_str().unwrap();
        assert_eq!(merge_urls(fragments), expected, "{name}");
    }
}

#[test]
fn query_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    // A bare root: no base address, no fragment, no persisted options.
    let service = ApiService::builder()
        .transport(Arc::new(NullTransport))
        .diagnostics(Arc::new(NoopDiagnostics))
        .build()
        .unwrap();
    let client = service.client();

    for case in vectors["query_cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let relative = case["relative"].as_str().unwrap();
        let params: Params = serde_json::from_value(case["params"].clone()).unwrap();
        let expected = case["expected"].as_str().unwrap();

        let url = client
            .create_url_with_params(relative, Some(ParamSource::Map(params)))
            .unwrap();
        assert_eq!(url, expected, "{name}");
    }
}
