//! Offset-based paging of the entries collection.
//!
//! The delivery API pages with `limit`/`skip` query parameters and reports
//! the number of matching entries in `total`. A listing page asks for
//! [`PAGE_SIZE`] entries at `(page - 1) * PAGE_SIZE`; category discovery asks
//! for up to [`CATEGORY_DISCOVERY_LIMIT`] entries, which the backend caps at
//! 1000 per request anyway.

use storefront_core::{ListingQuery, PAGE_SIZE};

/// Upper bound on entries fetched to enumerate the category vocabulary.
pub const CATEGORY_DISCOVERY_LIMIT: u32 = 1000;

/// Query parameters for one `GET /entries` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntriesQuery {
    /// `None` leaves the backend default page size in place.
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    /// Exact-match filter on `fields.category`.
    pub category: Option<String>,
}

impl EntriesQuery {
    /// The page of entries a listing request shows.
    #[must_use]
    pub fn listing_page(query: &ListingQuery) -> Self {
        Self {
            limit: Some(PAGE_SIZE),
            skip: Some(query.offset(PAGE_SIZE)),
            category: query.category.as_filter().map(str::to_owned),
        }
    }

    /// Unfiltered sweep used only to collect categories.
    #[must_use]
    pub fn category_discovery() -> Self {
        Self {
            limit: Some(CATEGORY_DISCOVERY_LIMIT),
            skip: None,
            category: None,
        }
    }

    /// Unfiltered request with backend defaults, used to enumerate ids.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Extra query pairs, in the order they are appended to the URL.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("fields.category", category.clone()));
        }
        pairs
    }
}
