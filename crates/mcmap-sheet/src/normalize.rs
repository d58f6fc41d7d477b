//! Normalization from a [`RawTable`] to [`mcmap_core::Establishment`] values.
//!
//! Cell parsing is delegated to [`crate::parse`] and
//! [`mcmap_core::parse_revenue`]; this module resolves columns once and maps
//! every row. It never fails: a malformed cell degrades to its default.

use mcmap_core::{parse_revenue, status_key, Establishment, StatusClass};

use crate::columns::{ColumnMap, SheetRow};
use crate::parse::{
    crm_link, parse_latitude, parse_longitude, parse_services, search_label, visit_note,
};
use crate::types::RawTable;

/// Normalize every data row of `table`, in order.
///
/// Rows with neither a name nor coordinates are still emitted.
#[must_use]
pub fn normalize_table(table: &RawTable) -> Vec<Establishment> {
    let map = ColumnMap::detect(&table.headers);
    let establishments: Vec<Establishment> = table
        .records()
        .enumerate()
        .map(|(row_index, record)| normalize_row(&SheetRow::from_record(&map, &record), row_index))
        .collect();

    let unmappable = establishments.iter().filter(|e| !e.is_mappable()).count();
    if unmappable > 0 {
        tracing::debug!(
            rows = establishments.len(),
            unmappable,
            "rows without usable coordinates will not be drawn on the map"
        );
    }

    establishments
}

/// Build one [`Establishment`] from a typed sheet row.
#[must_use]
pub fn normalize_row(row: &SheetRow, row_index: usize) -> Establishment {
    let status_raw = row.status.clone().unwrap_or_default();
    let key = status_key(&status_raw);
    let status_class = StatusClass::classify(&key);

    Establishment {
        key: make_establishment_key(row),
        row_index,
        name: row.name.clone(),
        city: row.city.clone(),
        region: row.region.clone(),
        department: row.department.clone(),
        establishment_type: row.establishment_type.clone(),
        status_raw,
        status_key: key,
        status_class,
        revenue: row.revenue.as_deref().map(parse_revenue).unwrap_or_default(),
        latitude: row.latitude.as_deref().and_then(parse_latitude),
        longitude: row.longitude.as_deref().and_then(parse_longitude),
        services: row.services.as_deref().map(parse_services).unwrap_or_default(),
        search_label: search_label(row.name.as_deref(), row.city.as_deref(), row_index),
        visit_scheduled: row.visit_scheduled.as_deref().and_then(visit_note),
        crm_link: row.crm_link.as_deref().and_then(crm_link),
    }
}

/// Stable row identity across refreshes: SHA-256 over lowercased name and
/// city plus the coordinate cells as typed.
#[must_use]
pub fn make_establishment_key(row: &SheetRow) -> String {
    use sha2::{Digest, Sha256};
    let input = format!(
        "{}\x00{}\x00{}\x00{}",
        row.name.as_deref().unwrap_or("").to_lowercase(),
        row.city.as_deref().unwrap_or("").to_lowercase(),
        row.latitude.as_deref().unwrap_or(""),
        row.longitude.as_deref().unwrap_or(""),
    );
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
