use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of products on one listing page.
pub const PAGE_SIZE: u32 = 10;

/// Title used when a content entry carries none.
pub const UNTITLED_PRODUCT: &str = "Untitled Product";

/// A catalog product in the shape every consumer reads, with defaults
/// applied to whatever the content entry left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Content entry `sys.id`; stable across requests.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Brand, falling back to the entry's `author` field.
    pub brand_name: String,
    /// Price exactly as the CMS reported it; `None` when the entry has none.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    /// Opaque, case-sensitive category value.
    pub category: String,
    /// Resolved image URLs in reference order. CMS URLs are usually
    /// protocol-relative (`//images.ctfassets.net/...`).
    pub images: Vec<String>,
    /// First entry of `images`, kept for single-image consumers.
    pub image: Option<String>,
}

impl Product {
    /// Replaces the image gallery, keeping `image` in step with `images[0]`.
    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.image = images.first().cloned();
        self.images = images;
        self
    }

    /// Returns `true` when `image` mirrors the first gallery entry.
    #[must_use]
    pub fn primary_image_consistent(&self) -> bool {
        self.image.as_ref() == self.images.first()
    }
}

/// One page of the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub products: Vec<Product>,
    /// 1-based page number.
    pub page: u32,
    pub total_products: u64,
    pub total_pages: u64,
    /// Distinct categories across the whole unfiltered catalog, sorted.
    pub categories: Vec<String>,
}

impl Listing {
    /// A listing with no products on `page`, still carrying the category
    /// vocabulary so the filter stays usable.
    #[must_use]
    pub fn empty(page: u32, categories: Vec<String>) -> Self {
        Self {
            products: Vec::new(),
            page,
            total_products: 0,
            total_pages: 1,
            categories,
        }
    }

    /// Page count for `total` products at [`PAGE_SIZE`] per page.
    #[must_use]
    pub fn total_pages_for(total: u64) -> u64 {
        total.div_ceil(u64::from(PAGE_SIZE))
    }
}

/// A listing as handed to the presentation layer: either the listing itself
/// or the reset listing plus a user-facing error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    #[serde(flatten)]
    pub listing: Listing,
    pub error: Option<String>,
}

impl ListingPage {
    #[must_use]
    pub fn ok(listing: Listing) -> Self {
        Self {
            listing,
            error: None,
        }
    }

    /// Page reset to 1 with no products or categories.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            listing: Listing::empty(1, Vec::new()),
            error: Some(message.into()),
        }
    }
}
