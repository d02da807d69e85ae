//! Response types for the content delivery API.
//!
//! ## Observed shape
//!
//! ### Entries collection
//! `GET /entries` returns `{ "items": [...], "includes": { "Asset": [...] },
//! "total": n, "skip": n, "limit": n }`. `includes` is omitted entirely when no
//! item links an asset, and `Asset` may be missing inside it.
//!
//! ### Single entry
//! `GET /entries/{id}` returns one bare entry with no `includes`; linked
//! assets have to be fetched one by one from `/assets/{id}`.
//!
//! ### Entry fields
//! Fields are authored by editors and loosely typed. Any of them can be
//! absent, `null`, or of an unexpected JSON type. Scalar fields go through
//! [`crate::lenient`] so a stray number in `title` does not sink the whole
//! page.
//!
//! ### `image`
//! Either a single link `{ "sys": { "type": "Link", "linkType": "Asset",
//! "id": "..." } }` or an array of such links, depending on how the content
//! type was modelled. See [`ImageField`].
//!
//! ### Asset URLs
//! `fields.file.url` is protocol-relative, e.g.
//! `"//images.ctfassets.net/space/asset/hash/shoe.png"`. Unpublished or
//! still-processing assets have no `file`, and a `file` that is not an
//! object is treated the same way.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::lenient;

/// Top-level response from `GET /entries`.
#[derive(Debug, Deserialize)]
pub struct EntriesResponse {
    #[serde(default)]
    pub items: Vec<RawEntry>,

    #[serde(default)]
    pub includes: Includes,

    /// Number of entries matching the query across all pages.
    #[serde(default)]
    pub total: u64,
}

/// Linked resources inlined alongside an entries page.
#[derive(Debug, Default, Deserialize)]
pub struct Includes {
    #[serde(rename = "Asset", default)]
    pub assets: Vec<AssetRecord>,
}

/// System metadata common to entries and assets.
#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    pub id: String,
}

/// A product entry before normalization.
#[derive(Debug, Deserialize)]
pub struct RawEntry {
    pub sys: Sys,

    #[serde(default)]
    pub fields: EntryFields,
}

/// Editor-authored fields of a product entry. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFields {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub brand_name: Option<String>,

    /// Older entries carry the brand under `author`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient::image_field")]
    pub image: Option<ImageField>,
}

/// The `image` field: one asset link or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageField {
    Single(AssetLink),
    Gallery(Vec<AssetLink>),
}

impl ImageField {
    /// Linked asset ids in field order. Links without an id are skipped.
    #[must_use]
    pub fn asset_ids(&self) -> Vec<&str> {
        match self {
            Self::Single(link) => link.id.as_deref().into_iter().collect(),
            Self::Gallery(links) => links.iter().filter_map(|l| l.id.as_deref()).collect(),
        }
    }
}

/// A reference to an asset by id. `id` is `None` when the link object is
/// malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLink {
    pub id: Option<String>,
}

/// An asset from `includes.Asset` or `GET /assets/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetRecord {
    pub sys: Sys,

    #[serde(default)]
    pub fields: AssetFields,
}

impl AssetRecord {
    /// The asset's file URL, if it has a non-empty one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.fields
            .file
            .as_ref()
            .and_then(|f| f.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFields {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,

    /// A `file` of the wrong shape counts as missing.
    #[serde(default, deserialize_with = "lenient::object")]
    pub file: Option<AssetFile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub content_type: Option<String>,
}
