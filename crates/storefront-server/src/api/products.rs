use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use storefront_core::{ListingNavigation, ListingPage, ListingQuery, Product};

use crate::middleware::RequestId;
use crate::sessions::session_id;

use super::{map_catalog_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Raw `page`/`category` parameters; parsed leniently by [`ListingQuery`].
#[derive(Debug, Deserialize)]
pub(super) struct ListingParams {
    pub page: Option<String>,
    pub category: Option<String>,
}

/// A listing page plus the controls to render around it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListingResponse {
    #[serde(flatten)]
    pub page: ListingPage,
    pub navigation: ListingNavigation,
}

/// Listing failures are reported in the body's `error` field with a 200.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Query(params): Query<ListingParams>,
) -> Json<ApiResponse<ListingResponse>> {
    let query = ListingQuery::from_params(params.page.as_deref(), params.category.as_deref());
    let page = state.catalog.list(&query).await;

    if let Some(session) = session_id(&headers) {
        state
            .sessions
            .record(session, page.listing.products.iter().cloned())
            .await;
    }

    let navigation = ListingNavigation::new(&query, &page.listing);
    Json(ApiResponse {
        data: ListingResponse { page, navigation },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let product = state
        .details
        .get(&id)
        .await
        .map_err(|e| map_catalog_error(req_id.0.clone(), &e))?;

    if let Some(session) = session_id(&headers) {
        state.sessions.record(session, [product.clone()]).await;
    }

    Ok(Json(ApiResponse {
        data: product,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_product_ids(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse {
        data: state.catalog.list_all_ids().await,
        meta: ResponseMeta::new(req_id.0),
    })
}
