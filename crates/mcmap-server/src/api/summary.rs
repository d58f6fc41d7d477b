use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use mcmap_core::{count_by_status, revenue_by, CategoryTotal, Dimension, StatusBreakdown, Summary};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, Filters, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SummaryData {
    #[serde(flatten)]
    pub summary: Summary,
    pub by_status: Vec<StatusBreakdown>,
}

pub(super) async fn get_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Filters(filter): Filters,
) -> Json<ApiResponse<SummaryData>> {
    let loaded = state.source.load_or_empty().await;
    let rows = filter.apply(&loaded.dataset.establishments);

    let data = SummaryData {
        summary: Summary::compute(rows.iter().copied()),
        by_status: count_by_status(rows.iter().copied()),
    };

    Json(ApiResponse {
        data,
        meta: ResponseMeta::for_load(req_id.0, &loaded),
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct RevenueQuery {
    pub by: Option<String>,
}

pub(super) async fn list_revenue(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<RevenueQuery>,
    Filters(filter): Filters,
) -> Result<Json<ApiResponse<Vec<CategoryTotal>>>, ApiError> {
    let raw = params.by.as_deref().unwrap_or("status");
    let dimension = Dimension::from_str(raw)
        .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.to_string()))?;

    let loaded = state.source.load_or_empty().await;
    let rows = filter.apply(&loaded.dataset.establishments);
    let data = revenue_by(rows.iter().copied(), dimension);

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::for_load(req_id.0, &loaded),
    }))
}
