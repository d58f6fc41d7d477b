use axum::{
    extract::State,
    Extension, Json,
};
use mcmap_core::FilterOptions;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, Filters, ResponseMeta};

/// Dropdown options cascading from the current selection.
pub(super) async fn list_filter_options(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Filters(filter): Filters,
) -> Json<ApiResponse<FilterOptions>> {
    let loaded = state.source.load_or_empty().await;
    let data = FilterOptions::cascade(&loaded.dataset.establishments, &filter);

    Json(ApiResponse {
        data,
        meta: ResponseMeta::for_load(req_id.0, &loaded),
    })
}
