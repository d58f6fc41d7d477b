mod columns;
mod establishments;
mod filters;
mod summary;

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use mcmap_core::EstablishmentFilter;
use mcmap_sheet::{Loaded, SheetSource};
use serde::{Deserialize, Deserializer, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<SheetSource>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    /// When the served sheet snapshot was fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    /// Set when the sheet could not be loaded and the data is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
            fetched_at: None,
            warning: None,
        }
    }

    /// Meta describing the snapshot a response was computed from.
    pub(super) fn for_load(request_id: String, loaded: &Loaded) -> Self {
        Self {
            fetched_at: loaded.dataset.fetched_at,
            warning: loaded.warning.clone(),
            ..Self::new(request_id)
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Filter selection as sent by the dashboard.
///
/// `services` is comma-separated; blank values mean "All".
#[derive(Debug, Default, Deserialize)]
pub(super) struct FilterQuery {
    pub region: Option<String>,
    pub department: Option<String>,
    #[serde(rename = "type")]
    pub establishment_type: Option<String>,
    pub status: Option<String>,
    pub services: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub visits_only: bool,
}

/// Checkbox value from a query string: blank, `0`/`1`, `true`/`false`,
/// `yes`/`no` or `on`/`off`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "expected true or false, got `{other}`"
        ))),
    }
}

impl FilterQuery {
    pub(super) fn into_filter(self) -> EstablishmentFilter {
        let services = self
            .services
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        EstablishmentFilter {
            region: self.region,
            department: self.department,
            establishment_type: self.establishment_type,
            status: self.status,
            services,
            search: self.search,
            visits_only: self.visits_only,
        }
    }
}

/// The filter selection from the query string.
///
/// A malformed query is answered with a `bad_request` [`ApiError`].
pub(super) struct Filters(pub EstablishmentFilter);

impl<S: Send + Sync> FromRequestParts<S> for Filters {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<FilterQuery>::from_request_parts(parts, state).await {
            Ok(Query(query)) => Ok(Self(query.into_filter())),
            Err(rejection) => {
                let request_id = parts
                    .extensions
                    .get::<RequestId>()
                    .map(|id| id.0.clone())
                    .unwrap_or_default();
                Err(ApiError::new(request_id, "bad_request", rejection.body_text()))
            }
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/establishments",
            get(establishments::list_establishments),
        )
        .route(
            "/api/v1/establishments/pins",
            get(establishments::list_pins),
        )
        .route("/api/v1/filters", get(filters::list_filter_options))
        .route("/api/v1/summary", get(summary::get_summary))
        .route("/api/v1/revenue", get(summary::list_revenue))
        .route("/api/v1/columns", get(columns::get_columns))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
