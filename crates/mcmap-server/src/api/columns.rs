use axum::{extract::State, Extension, Json};
use mcmap_sheet::ColumnReport;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

/// Headers found in the sheet and known columns it lacks.
pub(super) async fn get_columns(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ColumnReport>> {
    let loaded = state.source.load_or_empty().await;

    Json(ApiResponse {
        data: loaded.dataset.columns.clone(),
        meta: ResponseMeta::for_load(req_id.0, &loaded),
    })
}
