//! Maps an entry's `image` field to image URLs.
//!
//! Listing responses inline linked assets, so resolution is a lookup
//! ([`resolve_inline`]). Single-entry responses do not, so each link costs
//! one request ([`resolve_fetched`]). Either way a link that cannot be
//! resolved is dropped and the rest keep their order.

use crate::client::CmsClient;
use crate::types::{AssetRecord, ImageField};

/// Resolves `field` against assets inlined in the same response.
///
/// Links whose asset is missing from `assets`, or whose asset has no file
/// URL, are skipped. When several assets share an id the first one wins.
#[must_use]
pub fn resolve_inline(field: Option<&ImageField>, assets: &[AssetRecord]) -> Vec<String> {
    let Some(field) = field else {
        return Vec::new();
    };

    field
        .asset_ids()
        .into_iter()
        .filter_map(|id| {
            assets
                .iter()
                .find(|asset| asset.sys.id == id)
                .and_then(AssetRecord::url)
                .map(str::to_owned)
        })
        .collect()
}

/// Resolves `field` by fetching each linked asset, one request at a time.
///
/// A failed fetch skips that image and never aborts the rest.
pub async fn resolve_fetched(field: Option<&ImageField>, client: &CmsClient) -> Vec<String> {
    let Some(field) = field else {
        return Vec::new();
    };

    let mut urls = Vec::new();
    for id in field.asset_ids() {
        match client.fetch_asset(id).await {
            Ok(asset) => {
                if let Some(url) = asset.url() {
                    urls.push(url.to_owned());
                } else {
                    tracing::debug!(asset_id = id, "asset has no file url; skipping");
                }
            }
            Err(error) => {
                tracing::warn!(asset_id = id, %error, "asset fetch failed; skipping image");
            }
        }
    }
    urls
}
