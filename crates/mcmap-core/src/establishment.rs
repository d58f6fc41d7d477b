use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::status::{StatusClass, StatusStyle};

/// One normalized spreadsheet row: a commercial site with its location and
/// relationship status.
///
/// Built once per refresh by the sheet normalizer and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Establishment {
    /// Stable hex digest of name, city and coordinates.
    pub key: String,
    /// Zero-based position among the data rows of the source table.
    pub row_index: usize,
    pub name: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub department: Option<String>,
    #[serde(rename = "type")]
    pub establishment_type: Option<String>,
    /// Status text as typed in the sheet, trimmed. Empty when absent.
    pub status_raw: String,
    /// Lowercased, accent-free form of `status_raw`.
    pub status_key: String,
    pub status_class: StatusClass,
    /// Parsed `CA` column; zero when missing or malformed.
    pub revenue: Decimal,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub services: BTreeSet<String>,
    /// `"{name} ({city})"`, or the row index when either part is missing.
    pub search_label: String,
    /// Free-text visit date or note.
    pub visit_scheduled: Option<String>,
    pub crm_link: Option<String>,
}

impl Establishment {
    /// Both coordinates are present, so the row can be drawn on the map.
    #[must_use]
    pub fn is_mappable(&self) -> bool {
        self.coordinates().is_some()
    }

    /// `(latitude, longitude)` when both are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_scheduled_visit(&self) -> bool {
        self.visit_scheduled.is_some()
    }

    #[must_use]
    pub fn style(&self) -> StatusStyle {
        self.status_class.style()
    }

    /// Name for popups and tables, falling back to the search label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.search_label)
    }
}
