use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("sheet not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("could not decode {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid sheet URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A refresh failed moments ago; served without contacting the host.
    #[error("sheet unavailable after a recent failed fetch: {reason}")]
    RecentlyFailed { reason: String },
}

impl SheetError {
    /// What went wrong, without the sheet URL.
    ///
    /// Published-sheet URLs carry the document token, so this is the only
    /// form that may reach logs or API clients.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            SheetError::Http(e) if e.is_timeout() => "the request timed out".to_owned(),
            SheetError::Http(e) if e.is_connect() => "the sheet host could not be reached".to_owned(),
            SheetError::Http(e) => match e.status() {
                Some(status) => format!("HTTP status {}", status.as_u16()),
                None => "network error".to_owned(),
            },
            SheetError::RateLimited {
                retry_after_secs, ..
            } => format!("rate limited (retry after {retry_after_secs}s)"),
            SheetError::NotFound { .. } => "sheet not found (HTTP 404)".to_owned(),
            SheetError::UnexpectedStatus { status, .. } => {
                format!("unexpected HTTP status {status}")
            }
            SheetError::Parse { context, .. } => format!("could not decode {context}"),
            SheetError::InvalidUrl { reason, .. } => format!("invalid sheet URL: {reason}"),
            SheetError::RecentlyFailed { reason } => reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-token/pub?output=tsv";

    #[test]
    fn summary_never_contains_the_url() {
        let errors = [
            SheetError::NotFound { url: URL.into() },
            SheetError::RateLimited {
                url: URL.into(),
                retry_after_secs: 7,
            },
            SheetError::UnexpectedStatus {
                status: 503,
                url: URL.into(),
            },
            SheetError::InvalidUrl {
                url: URL.into(),
                reason: "unsupported scheme ftp".into(),
            },
        ];
        for err in &errors {
            let summary = err.summary();
            assert!(!summary.contains("2PACX"), "summary: {summary}");
            assert!(!summary.contains("docs.google.com"), "summary: {summary}");
        }
        assert_eq!(errors[0].summary(), "sheet not found (HTTP 404)");
        assert_eq!(errors[2].summary(), "unexpected HTTP status 503");
    }

    #[test]
    fn recently_failed_repeats_the_original_summary() {
        let err = SheetError::RecentlyFailed {
            reason: "unexpected HTTP status 503".into(),
        };
        assert_eq!(err.summary(), "unexpected HTTP status 503");
    }
}
