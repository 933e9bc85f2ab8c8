//! URL fragment composition and query-string encoding.
//!
//! # Design
//! `merge_urls` is a left fold over the non-empty fragments. A fragment
//! that parses as an absolute URL (scheme plus host) replaces the
//! accumulator entirely, discarding everything composed so far; a relative
//! fragment joins with exactly one `/`. This lets any level of the
//! endpoint tree (or any per-call descriptor) reset composition by
//! declaring a full origin.

use url::Url;

use crate::config::Params;
use crate::error::Error;

/// True when `fragment` stands on its own as a full URL.
fn is_absolute(fragment: &str) -> bool {
    Url::parse(fragment).map(|url| url.has_host()).unwrap_or(false)
}

/// Compose URL fragments left to right.
///
/// Empty fragments are dropped. An absolute fragment resets the
/// accumulator; a relative one is appended with trailing slashes of the
/// accumulator and leading slashes of the fragment trimmed. An empty
/// fragment list yields `""`.
pub fn merge_urls<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fragments = fragments.into_iter().filter(|f| !f.is_empty());
    let first = match fragments.next() {
        Some(first) => first.to_string(),
        None => return String::new(),
    };

    fragments.fold(first, |acc, fragment| {
        if is_absolute(fragment) {
            fragment.to_string()
        } else {
            format!(
                "{}/{}",
                acc.trim_end_matches('/'),
                fragment.trim_start_matches('/')
            )
        }
    })
}

/// Encode parameters as an `application/x-www-form-urlencoded` query
/// string. Sequence values expand into repeated keys.
pub fn encode_query(params: &Params) -> Result<String, Error> {
    let pairs: Vec<(&str, String)> = params
        .iter()
        .flat_map(|(name, value)| {
            value
                .scalars()
                .into_iter()
                .map(move |scalar| (name.as_str(), scalar.to_string()))
        })
        .collect();
    Ok(serde_urlencoded::to_string(pairs)?)
}

/// Attach an already-encoded query string to `url`, choosing the join
/// character from `probe` (the caller-facing relative URL): no `?` in the
/// probe appends `?`, a `?` followed by content appends `&`, a trailing
/// `?` appends nothing.
pub(crate) fn join_query(url: &str, probe: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let sep = match probe.find('?') {
        None => "?",
        Some(idx) if idx < probe.len() - 1 => "&",
        Some(_) => "",
    };
    format!("{url}{sep}{query}")
}
