//! Normalization from raw CMS entries to [`storefront_core::Product`].
//!
//! Image resolution is done by [`crate::assets`] beforehand; this module only
//! applies field defaults.

use storefront_core::{Product, UNTITLED_PRODUCT};

use crate::types::RawEntry;

/// Normalizes a [`RawEntry`] with its already-resolved image URLs.
///
/// Never fails. Empty strings count as absent for every text field, so an
/// empty `brandName` still falls back to `author`. `price` is passed through
/// as-is, including zero.
#[must_use]
pub fn normalize_entry(entry: RawEntry, images: Vec<String>) -> Product {
    let fields = entry.fields;

    let title = non_empty(fields.title).unwrap_or_else(|| UNTITLED_PRODUCT.to_owned());
    let brand_name = non_empty(fields.brand_name)
        .or_else(|| non_empty(fields.author))
        .unwrap_or_default();

    Product {
        id: entry.sys.id,
        title,
        description: non_empty(fields.description).unwrap_or_default(),
        brand_name,
        price: fields.price,
        category: non_empty(fields.category).unwrap_or_default(),
        images: Vec::new(),
        image: None,
    }
    .with_images(images)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
