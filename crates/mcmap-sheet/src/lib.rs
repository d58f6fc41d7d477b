//! Spreadsheet ingestion for the commercial dashboard.
//!
//! Fetches the published sheet export, decodes it into a [`RawTable`],
//! resolves the known columns and normalizes every row into an
//! [`mcmap_core::Establishment`]. [`SheetSource`] puts a freshness cache in
//! front of the fetch.

pub mod cache;
pub mod client;
pub mod columns;
pub mod decode;
pub mod error;
pub mod normalize;
pub mod parse;
pub(crate) mod retry;
pub mod source;
pub mod types;

pub use cache::SheetCache;
pub use client::SheetClient;
pub use columns::{Column, ColumnMap, ColumnReport, SheetRow};
pub use decode::parse_table;
pub use error::SheetError;
pub use normalize::{normalize_row, normalize_table};
pub use source::{Dataset, Loaded, SheetSource};
pub use types::{RawRecord, RawTable};
