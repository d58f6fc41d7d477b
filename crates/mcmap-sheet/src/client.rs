use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::decode::parse_table;
use crate::error::SheetError;
use crate::retry::retry_with_backoff;
use crate::types::RawTable;

/// Seconds to wait on a 429 that carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client for published spreadsheet exports.
///
/// Maps 429, 404 and other non-2xx responses to typed errors. Transient
/// failures (timeouts, connect errors, 429, 5xx) are retried with jittered
/// exponential back-off up to `max_retries` additional attempts.
pub struct SheetClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SheetClient {
    /// Creates a client with the configured timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, SheetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches the export body as text.
    ///
    /// # Errors
    ///
    /// - [`SheetError::InvalidUrl`]: `url` is not an http(s) URL (not retried).
    /// - [`SheetError::RateLimited`]: HTTP 429 after all retries.
    /// - [`SheetError::NotFound`]: HTTP 404 (not retried).
    /// - [`SheetError::UnexpectedStatus`]: any other non-2xx status; 5xx are
    ///   retried first.
    /// - [`SheetError::Http`]: network or TLS failure after all retries.
    pub async fn fetch_text(&self, url: &str) -> Result<String, SheetError> {
        let parsed = validate_url(url)?;

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let parsed = parsed.clone();
            async move {
                let response = self.client.get(parsed).send().await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(SheetError::RateLimited {
                        url: url.to_owned(),
                        retry_after_secs,
                    });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(SheetError::NotFound {
                        url: url.to_owned(),
                    });
                }

                if !status.is_success() {
                    return Err(SheetError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_owned(),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Fetches the export and decodes it into a [`RawTable`].
    ///
    /// # Errors
    ///
    /// Everything [`SheetClient::fetch_text`] returns, plus
    /// [`SheetError::Parse`] when the body is not delimited text.
    pub async fn fetch_table(&self, url: &str) -> Result<RawTable, SheetError> {
        let body = self.fetch_text(url).await?;
        let table = parse_table(&body)?;
        tracing::info!(
            columns = table.headers.len(),
            rows = table.rows.len(),
            "fetched sheet export"
        );
        Ok(table)
    }
}

/// Parses `url` and requires an http or https scheme.
pub(crate) fn validate_url(url: &str) -> Result<Url, SheetError> {
    let parsed = Url::parse(url).map_err(|e| SheetError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(SheetError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
