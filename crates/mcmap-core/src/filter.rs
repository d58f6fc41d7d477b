//! Row filtering and cascading dropdown options.
//!
//! Dimensions cascade in a fixed order: region, department, type, status.
//! Options for each level are computed from the rows that survive the levels
//! above it, so picking a region narrows the department list, and so on.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::establishment::Establishment;
use crate::status::status_key;

/// User selection across every filter dimension. `None` (or blank) means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstablishmentFilter {
    pub region: Option<String>,
    pub department: Option<String>,
    #[serde(rename = "type")]
    pub establishment_type: Option<String>,
    /// Matched against the normalized status key, so any spelling works.
    pub status: Option<String>,
    /// Keep rows offering at least one of these services.
    #[serde(default)]
    pub services: Vec<String>,
    /// Exact search label, as offered in [`FilterOptions::search_labels`].
    pub search: Option<String>,
    #[serde(default)]
    pub visits_only: bool,
}

/// Values available in each dropdown, given the current selection.
///
/// Lists only hold values present in the data. Renderers prepend their own
/// "All" entry; an empty list means the dropdown offers nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub departments: Vec<String>,
    pub types: Vec<String>,
    pub statuses: Vec<String>,
    pub services: Vec<String>,
    pub search_labels: Vec<String>,
}

fn active(selection: Option<&String>) -> Option<&str> {
    selection.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn dimension_matches(selection: Option<&String>, value: Option<&String>) -> bool {
    match active(selection) {
        None => true,
        Some(wanted) => value.is_some_and(|v| v == wanted),
    }
}

impl EstablishmentFilter {
    /// `true` when no dimension restricts the rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        active(self.region.as_ref()).is_none()
            && active(self.department.as_ref()).is_none()
            && active(self.establishment_type.as_ref()).is_none()
            && active(self.status.as_ref()).is_none()
            && self.selected_services().next().is_none()
            && active(self.search.as_ref()).is_none()
            && !self.visits_only
    }

    /// Whether a region is selected. Drives the map zoom level.
    #[must_use]
    pub fn has_region(&self) -> bool {
        active(self.region.as_ref()).is_some()
    }

    #[must_use]
    pub fn matches(&self, row: &Establishment) -> bool {
        self.matches_categories(row)
            && self.matches_services(row)
            && self.matches_search(row)
            && (!self.visits_only || row.has_scheduled_visit())
    }

    /// Rows passing every dimension, in source order.
    #[must_use]
    pub fn apply<'a>(&self, rows: &'a [Establishment]) -> Vec<&'a Establishment> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    fn selected_services(&self) -> impl Iterator<Item = &str> {
        self.services
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    fn matches_region(&self, row: &Establishment) -> bool {
        dimension_matches(self.region.as_ref(), row.region.as_ref())
    }

    fn matches_department(&self, row: &Establishment) -> bool {
        dimension_matches(self.department.as_ref(), row.department.as_ref())
    }

    fn matches_type(&self, row: &Establishment) -> bool {
        dimension_matches(
            self.establishment_type.as_ref(),
            row.establishment_type.as_ref(),
        )
    }

    fn matches_status(&self, row: &Establishment) -> bool {
        active(self.status.as_ref()).is_none_or(|wanted| status_key(wanted) == row.status_key)
    }

    fn matches_categories(&self, row: &Establishment) -> bool {
        self.matches_region(row)
            && self.matches_department(row)
            && self.matches_type(row)
            && self.matches_status(row)
    }

    fn matches_services(&self, row: &Establishment) -> bool {
        let mut wanted = self.selected_services().peekable();
        if wanted.peek().is_none() {
            return true;
        }
        wanted.any(|service| row.services.contains(service))
    }

    fn matches_search(&self, row: &Establishment) -> bool {
        active(self.search.as_ref()).is_none_or(|label| row.search_label == label)
    }
}

impl FilterOptions {
    /// Compute dropdown contents for `filter` over `rows`.
    #[must_use]
    pub fn cascade(rows: &[Establishment], filter: &EstablishmentFilter) -> Self {
        let regions = distinct(rows.iter().filter_map(|r| r.region.as_deref()));

        let in_region: Vec<&Establishment> =
            rows.iter().filter(|r| filter.matches_region(r)).collect();
        let departments = distinct(in_region.iter().filter_map(|r| r.department.as_deref()));

        let in_department: Vec<&Establishment> = in_region
            .into_iter()
            .filter(|r| filter.matches_department(r))
            .collect();
        let types = distinct(
            in_department
                .iter()
                .filter_map(|r| r.establishment_type.as_deref()),
        );

        let in_type: Vec<&Establishment> = in_department
            .into_iter()
            .filter(|r| filter.matches_type(r))
            .collect();
        let statuses = distinct_statuses(&in_type);

        let in_status: Vec<&Establishment> = in_type
            .into_iter()
            .filter(|r| filter.matches_status(r))
            .collect();
        let services = distinct(
            in_status
                .iter()
                .flat_map(|r| r.services.iter().map(String::as_str)),
        );
        let search_labels = distinct(in_status.iter().map(|r| r.search_label.as_str()));

        Self {
            regions,
            departments,
            types,
            statuses,
            services,
            search_labels,
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// One spelling per status key (the first seen), sorted by spelling.
fn distinct_statuses(rows: &[&Establishment]) -> Vec<String> {
    let mut by_key: BTreeMap<&str, &str> = BTreeMap::new();
    for row in rows {
        if row.status_raw.is_empty() {
            continue;
        }
        by_key
            .entry(row.status_key.as_str())
            .or_insert(row.status_raw.as_str());
    }
    let mut spellings: Vec<String> = by_key.into_values().map(str::to_owned).collect();
    spellings.sort();
    spellings
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
