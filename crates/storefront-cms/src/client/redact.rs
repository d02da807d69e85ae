//! Access-token scrubbing for URLs that end up in logs and error messages.

use reqwest::Url;

/// Query parameter carrying the delivery API token.
pub(super) const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Returns `url` as a string with the `access_token` value masked.
///
/// All other query pairs keep their order and values.
#[must_use]
pub fn redacted_url(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == ACCESS_TOKEN_PARAM) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == ACCESS_TOKEN_PARAM {
                "[redacted]".to_owned()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
