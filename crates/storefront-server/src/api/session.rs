use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Extension, Json,
};
use storefront_core::Product;

use crate::middleware::RequestId;
use crate::sessions::session_id;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// A product this session has already seen in a listing or detail response.
pub(super) async fn get_session_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let Some(session) = session_id(&headers) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            "no session; send an x-session-id header",
        ));
    };

    match state.sessions.get(session, &id).await {
        Some(product) => Ok(Json(ApiResponse {
            data: product,
            meta: ResponseMeta::new(req_id.0),
        })),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("product {id} not cached for this session"),
        )),
    }
}
