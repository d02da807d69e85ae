use storefront_cms::{Catalog, CatalogError};
use storefront_core::ListingQuery;

/// Renders one listing page as pretty JSON.
///
/// # Errors
///
/// Returns an error carrying the listing's message when the page query
/// failed, or if serialization fails.
pub(crate) async fn run_list(
    catalog: &Catalog,
    page: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<String> {
    let query = ListingQuery::from_params(page, category);
    let listing = catalog.list(&query).await;
    if let Some(error) = listing.error {
        anyhow::bail!(error);
    }
    Ok(serde_json::to_string_pretty(&listing.listing)?)
}

/// Renders one product as pretty JSON.
///
/// # Errors
///
/// Returns an error if the product does not exist or the lookup fails.
pub(crate) async fn run_show(catalog: &Catalog, id: &str) -> anyhow::Result<String> {
    match catalog.get_by_id(id).await {
        Ok(product) => Ok(serde_json::to_string_pretty(&product)?),
        Err(CatalogError::NotFound { id }) => anyhow::bail!("product {id} not found"),
        Err(error) => Err(error.into()),
    }
}

/// Every product id, one per line. Empty when enumeration fails.
pub(crate) async fn run_ids(catalog: &Catalog) -> String {
    catalog.list_all_ids().await.join("\n")
}
