//! Cell-level parsers used by the normalizer.
//!
//! None of these fail: a cell that cannot be read becomes `None`, an empty
//! set, or a fallback label.

use std::collections::BTreeSet;

/// Placeholder the sales team types for "no services".
const SERVICES_PLACEHOLDER: &str = "-";

/// Split the comma-delimited `Services` cell into distinct tokens.
#[must_use]
pub fn parse_services(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && *token != SERVICES_PLACEHOLDER)
        .map(str::to_owned)
        .collect()
}

/// Read a decimal coordinate, accepting `,` as the decimal separator.
#[must_use]
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[must_use]
pub fn parse_latitude(raw: &str) -> Option<f64> {
    parse_coordinate(raw).filter(|v| (-90.0..=90.0).contains(v))
}

#[must_use]
pub fn parse_longitude(raw: &str) -> Option<f64> {
    parse_coordinate(raw).filter(|v| (-180.0..=180.0).contains(v))
}

/// Planned-visit note, kept only when it says more than a single character.
#[must_use]
pub fn visit_note(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (trimmed.chars().count() > 1).then(|| trimmed.to_owned())
}

/// CRM link, kept only when the cell looks like a URL.
#[must_use]
pub fn crm_link(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    trimmed.contains("http").then(|| trimmed.to_owned())
}

/// `"{name} ({city})"`, or the row index when either part is missing.
#[must_use]
pub fn search_label(name: Option<&str>, city: Option<&str>, row_index: usize) -> String {
    match (name, city) {
        (Some(name), Some(city)) if !name.is_empty() && !city.is_empty() => {
            format!("{name} ({city})")
        }
        _ => row_index.to_string(),
    }
}
