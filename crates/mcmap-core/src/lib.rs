//! Domain model for the commercial dashboard.
//!
//! Everything in this crate is pure: the [`Establishment`] entity, status
//! classification, revenue parsing, filters, aggregates and the map view.
//! Fetching and decoding the spreadsheet lives in `mcmap-sheet`.

pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod establishment;
pub mod filter;
pub mod map;
pub mod revenue;
pub mod status;
pub mod text;

use thiserror::Error;

pub use aggregate::{
    count_by_status, revenue_by, CategoryTotal, Dimension, StatusBreakdown, Summary,
    UnknownDimension,
};
pub use app_config::{redact_url, AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use establishment::Establishment;
pub use filter::{EstablishmentFilter, FilterOptions};
pub use map::MapView;
pub use revenue::parse_revenue;
pub use status::{status_key, StatusClass, StatusStyle};
pub use text::fold;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
