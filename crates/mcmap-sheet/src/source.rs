//! Cached loading of the configured sheet.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mcmap_core::{redact_url, AppConfig, Establishment};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::cache::SheetCache;
use crate::client::SheetClient;
use crate::columns::{ColumnMap, ColumnReport};
use crate::error::SheetError;
use crate::normalize::normalize_table;
use crate::types::RawTable;

/// One normalized snapshot of the sheet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    /// When the sheet was fetched; `None` for the empty fallback.
    pub fetched_at: Option<DateTime<Utc>>,
    pub columns: ColumnReport,
    pub establishments: Vec<Establishment>,
}

impl Dataset {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_table(table: &RawTable, fetched_at: DateTime<Utc>) -> Self {
        Self {
            fetched_at: Some(fetched_at),
            columns: ColumnMap::detect(&table.headers).report(),
            establishments: normalize_table(table),
        }
    }
}

/// Result of [`SheetSource::load_or_empty`].
#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Arc<Dataset>,
    /// Message for the user when the fetch failed and the dataset is empty.
    pub warning: Option<String>,
}

/// How long a failed refresh is remembered before the host is tried again.
const FAILURE_TTL: Duration = Duration::from_secs(30);

struct SourceState {
    datasets: SheetCache<Arc<Dataset>>,
    /// URL-free summary of the last failed refresh.
    failures: SheetCache<String>,
}

/// The configured sheet behind a freshness cache.
pub struct SheetSource {
    client: SheetClient,
    url: String,
    redacted_url: String,
    state: Mutex<SourceState>,
}

impl SheetSource {
    #[must_use]
    pub fn new(client: SheetClient, url: impl Into<String>, cache: SheetCache<Arc<Dataset>>) -> Self {
        let url = url.into();
        Self {
            client,
            redacted_url: redact_url(&url),
            url,
            state: Mutex::new(SourceState {
                datasets: cache,
                failures: SheetCache::new(FAILURE_TTL),
            }),
        }
    }

    /// Builds the client and cache from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SheetError> {
        let client = SheetClient::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )?;
        Ok(Self::new(
            client,
            config.sheet_url.clone(),
            SheetCache::new(Duration::from_secs(config.cache_ttl_secs)),
        ))
    }

    /// The cached dataset while fresh, otherwise a new fetch.
    ///
    /// Concurrent callers wait for a single in-flight refresh. A failed
    /// refresh is remembered for 30 seconds, so callers queued behind
    /// it fail at once instead of repeating the retry cycle.
    ///
    /// # Errors
    ///
    /// Any [`SheetError`] from fetching or decoding the export, or
    /// [`SheetError::RecentlyFailed`] while a failure is remembered.
    pub async fn load(&self) -> Result<Arc<Dataset>, SheetError> {
        let mut state = self.state.lock().await;
        if let Some(dataset) = state.datasets.get(&self.url) {
            tracing::debug!("serving sheet from cache");
            return Ok(dataset);
        }
        if let Some(reason) = state.failures.get(&self.url) {
            tracing::debug!(sheet = %self.redacted_url, "skipping refresh after a recent failure");
            return Err(SheetError::RecentlyFailed { reason });
        }

        let table = match self.client.fetch_table(&self.url).await {
            Ok(table) => table,
            Err(err) => {
                state.failures.insert(&self.url, err.summary());
                return Err(err);
            }
        };
        let dataset = Arc::new(Dataset::from_table(&table, Utc::now()));
        tracing::info!(
            sheet = %self.redacted_url,
            establishments = dataset.establishments.len(),
            missing_columns = dataset.columns.missing.len(),
            "sheet refreshed"
        );
        state.failures.invalidate(&self.url);
        state.datasets.insert(&self.url, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Like [`SheetSource::load`], but a failed fetch degrades to an empty
    /// dataset plus a warning for the user.
    pub async fn load_or_empty(&self) -> Loaded {
        match self.load().await {
            Ok(dataset) => Loaded {
                dataset,
                warning: None,
            },
            Err(err) => {
                tracing::warn!(
                    sheet = %self.redacted_url,
                    error = %err.summary(),
                    "sheet fetch failed, serving empty dataset"
                );
                Loaded {
                    dataset: Arc::new(Dataset::empty()),
                    warning: Some(fetch_warning(&err)),
                }
            }
        }
    }

    /// Drop the cached snapshot and any remembered failure so the next load
    /// refetches.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.datasets.invalidate(&self.url);
        state.failures.invalidate(&self.url);
    }
}

fn fetch_warning(err: &SheetError) -> String {
    format!(
        "Could not load the sheet ({}). Check that the sheet link is correct \
         and that the Latitude, Longitude, Région and Statut columns exist.",
        err.summary()
    )
}
