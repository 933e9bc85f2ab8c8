//! Deep merge of request options.
//!
//! # Design
//! Merge precedence is rightmost-wins per leaf key. The header and
//! parameter maps merge key-by-key instead of being replaced wholesale;
//! their values (including `Many` sequences) are leaves, so an overriding
//! value replaces the base value entirely. Keys absent from the override
//! are inherited unchanged.

use crate::config::{Headers, Params, RequestOptions};

/// Merge two header collections, `over` winning per key.
pub fn merge_headers(base: &Headers, over: &Headers) -> Headers {
    let mut merged = base.clone();
    for (name, value) in over {
        merged.insert(name.clone(), value.clone());
    }
    merged
}

/// Merge two parameter collections, `over` winning per key.
pub fn merge_params(base: &Params, over: &Params) -> Params {
    let mut merged = base.clone();
    for (name, value) in over {
        merged.insert(name.clone(), value.clone());
    }
    merged
}

/// Deep-merge persisted options, `over` winning on conflicting leaf keys.
pub fn merge_options(base: &RequestOptions, over: &RequestOptions) -> RequestOptions {
    RequestOptions {
        headers: merge_headers(&base.headers, &over.headers),
        params: merge_params(&base.params, &over.params),
        with_credentials: over.with_credentials.or(base.with_credentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), HeaderValue::from(*v)))
            .collect()
    }

    #[test]
    fn override_wins_per_key_and_rest_inherits() {
        let base = headers(&[("A", "1"), ("B", "2")]);
        let over = headers(&[("B", "3")]);
        let merged = merge_headers(&base, &over);
        assert_eq!(merged["A"], HeaderValue::from("1"));
        assert_eq!(merged["B"], HeaderValue::from("3"));
    }

    #[test]
    fn sequence_values_replace_wholesale() {
        let mut base = Headers::new();
        base.insert(
            "accept".to_string(),
            HeaderValue::Many(vec!["a".to_string(), "b".to_string()]),
        );
        let mut over = Headers::new();
        over.insert("accept".to_string(), HeaderValue::Many(vec!["c".to_string()]));

        let merged = merge_headers(&base, &over);
        assert_eq!(merged["accept"].values(), vec!["c"]);
    }

    #[test]
    fn with_credentials_overrides_only_when_set() {
        let base = RequestOptions {
            with_credentials: Some(true),
            ..RequestOptions::default()
        };
        let unset = RequestOptions::default();
        assert_eq!(merge_options(&base, &unset).with_credentials, Some(true));

        let over = RequestOptions {
            with_credentials: Some(false),
            ..RequestOptions::default()
        };
        assert_eq!(merge_options(&base, &over).with_credentials, Some(false));
    }

    #[test]
    fn params_merge_key_by_key() {
        let mut base = Params::new();
        base.insert("page".to_string(), 1.into());
        base.insert("limit".to_string(), 50.into());
        let mut over = Params::new();
        over.insert("page".to_string(), 2.into());

        let merged = merge_params(&base, &over);
        assert_eq!(merged["page"], 2.into());
        assert_eq!(merged["limit"], 50.into());
    }
}
