//! Catalog operations consumed by the storefront: paged listings, product
//! detail, and the id set used to pre-render detail pages.
//!
//! Every operation issues its backend calls one after another and converts
//! failures into values at this boundary.

use std::collections::BTreeSet;

use storefront_core::{Listing, ListingPage, ListingQuery, Product};

use crate::assets::{resolve_fetched, resolve_inline};
use crate::client::CmsClient;
use crate::error::{CatalogError, CmsError};
use crate::normalize::normalize_entry;
use crate::pagination::EntriesQuery;
use crate::types::{EntriesResponse, RawEntry};

/// Product catalog backed by the content delivery API.
pub struct Catalog {
    client: CmsClient,
}

impl Catalog {
    #[must_use]
    pub fn new(client: CmsClient) -> Self {
        Self { client }
    }

    /// Builds the listing for `query`.
    ///
    /// A failure of the page query turns into an empty listing reset to page
    /// 1 with an error message. A failure of the category query alone only
    /// empties the category list.
    pub async fn list(&self, query: &ListingQuery) -> ListingPage {
        match self.try_list(query).await {
            Ok(listing) => ListingPage::ok(listing),
            Err(error) => {
                tracing::error!(page = query.page, %error, "error fetching products");
                ListingPage::failed(format!("Failed to fetch products: {error}"))
            }
        }
    }

    /// Builds the listing for `query`, surfacing page-query failures.
    ///
    /// # Errors
    ///
    /// Propagates any [`CmsError`] from the page query. Category discovery
    /// failures are logged and never returned.
    pub async fn try_list(&self, query: &ListingQuery) -> Result<Listing, CmsError> {
        let response = self
            .client
            .fetch_entries(&EntriesQuery::listing_page(query))
            .await?;
        let categories = self.discover_categories().await;

        if response.items.is_empty() {
            tracing::warn!(
                page = query.page,
                category = query.category.as_param(),
                "no items found in CMS response"
            );
            return Ok(Listing::empty(query.page, categories));
        }

        let EntriesResponse {
            items,
            includes,
            total,
        } = response;

        let products = items
            .into_iter()
            .map(|entry| {
                let images = resolve_inline(entry.fields.image.as_ref(), &includes.assets);
                normalize_entry(entry, images)
            })
            .collect();

        Ok(Listing {
            products,
            page: query.page,
            total_products: total,
            total_pages: Listing::total_pages_for(total),
            categories,
        })
    }

    /// Distinct non-empty categories across the unfiltered catalog, sorted.
    /// Any failure yields an empty list.
    async fn discover_categories(&self) -> Vec<String> {
        match self
            .client
            .fetch_entries(&EntriesQuery::category_discovery())
            .await
        {
            Ok(response) => collect_categories(&response.items),
            Err(error) => {
                tracing::warn!(%error, "category discovery failed; continuing without categories");
                Vec::new()
            }
        }
    }

    /// Looks up one product, fetching each linked image separately.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] when the backend answers 404.
    /// - [`CatalogError::Fetch`] for any other failure.
    pub async fn get_by_id(&self, id: &str) -> Result<Product, CatalogError> {
        let entry = match self.client.fetch_entry(id).await {
            Ok(entry) => entry,
            Err(CmsError::NotFound { .. }) => {
                tracing::info!(id, "product not found");
                return Err(CatalogError::NotFound { id: id.to_owned() });
            }
            Err(error) => {
                tracing::error!(id, %error, "error fetching product");
                return Err(CatalogError::Fetch(format!(
                    "Failed to fetch product: {error}"
                )));
            }
        };

        let images = resolve_fetched(entry.fields.image.as_ref(), &self.client).await;
        Ok(normalize_entry(entry, images))
    }

    /// Every product id, for pre-rendering detail pages. Any failure yields
    /// an empty list so those pages fall back to on-demand rendering.
    pub async fn list_all_ids(&self) -> Vec<String> {
        match self.client.fetch_entries(&EntriesQuery::all()).await {
            Ok(response) => response.items.into_iter().map(|e| e.sys.id).collect(),
            Err(error) => {
                tracing::error!(%error, "error fetching product ids");
                Vec::new()
            }
        }
    }
}

/// Distinct non-empty category values, sorted ascending by byte order.
fn collect_categories(entries: &[RawEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| entry.fields.category.as_deref())
        .filter(|category| !category.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
