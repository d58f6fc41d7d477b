use std::collections::BTreeSet;

use axum::{
    extract::State,
    Extension, Json,
};
use mcmap_core::{Establishment, MapView, StatusClass};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, Filters, ResponseMeta};

pub(super) async fn list_establishments(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Filters(filter): Filters,
) -> Json<ApiResponse<Vec<Establishment>>> {
    let loaded = state.source.load_or_empty().await;

    let data = filter
        .apply(&loaded.dataset.establishments)
        .into_iter()
        .cloned()
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::for_load(req_id.0, &loaded),
    })
}

/// One map marker with everything the popup shows.
#[derive(Debug, Serialize)]
pub(super) struct PinItem {
    pub key: String,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub city: Option<String>,
    pub status: String,
    pub status_class: StatusClass,
    pub status_label: &'static str,
    pub color: &'static str,
    pub radius: u8,
    pub revenue: Decimal,
    pub services: BTreeSet<String>,
    pub visit_scheduled: Option<String>,
    pub crm_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct PinsData {
    pub view: MapView,
    pub pins: Vec<PinItem>,
}

impl PinItem {
    fn from_establishment(row: &Establishment) -> Option<Self> {
        let (latitude, longitude) = row.coordinates()?;
        let style = row.style();
        Some(Self {
            key: row.key.clone(),
            latitude,
            longitude,
            name: row.display_name().to_owned(),
            city: row.city.clone(),
            status: row.status_raw.clone(),
            status_class: row.status_class,
            status_label: row.status_class.label(),
            color: style.color,
            radius: style.radius,
            revenue: row.revenue,
            services: row.services.clone(),
            visit_scheduled: row.visit_scheduled.clone(),
            crm_link: row.crm_link.clone(),
        })
    }
}

pub(super) async fn list_pins(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Filters(filter): Filters,
) -> Json<ApiResponse<PinsData>> {
    let loaded = state.source.load_or_empty().await;
    let rows = filter.apply(&loaded.dataset.establishments);

    let pins = rows
        .iter()
        .copied()
        .filter_map(PinItem::from_establishment)
        .collect();
    let view = MapView::fit(rows.iter().copied(), filter.has_region());

    Json(ApiResponse {
        data: PinsData { view, pins },
        meta: ResponseMeta::for_load(req_id.0, &loaded),
    })
}
