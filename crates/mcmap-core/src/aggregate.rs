//! Summary metrics and group-by totals over a set of establishments.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::establishment::Establishment;
use crate::status::StatusClass;

/// Headline numbers shown above the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub establishment_count: usize,
    pub mappable_count: usize,
    pub client_count: usize,
    pub scheduled_visit_count: usize,
    pub total_revenue: Decimal,
}

impl Summary {
    #[must_use]
    pub fn compute<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Establishment>,
    {
        rows.into_iter().fold(Self::default(), |mut acc, row| {
            acc.establishment_count += 1;
            if row.is_mappable() {
                acc.mappable_count += 1;
            }
            if row.status_class == StatusClass::Client {
                acc.client_count += 1;
            }
            if row.has_scheduled_visit() {
                acc.scheduled_visit_count += 1;
            }
            acc.total_revenue += row.revenue;
            acc
        })
    }
}

/// Count and revenue for one status class, with its legend style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub status: StatusClass,
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
    pub revenue: Decimal,
}

/// Per-class count and revenue, in classification priority order.
///
/// Classes with no rows are omitted.
#[must_use]
pub fn count_by_status<'a, I>(rows: I) -> Vec<StatusBreakdown>
where
    I: IntoIterator<Item = &'a Establishment>,
{
    let mut totals: BTreeMap<StatusClass, (usize, Decimal)> = BTreeMap::new();
    for row in rows {
        let entry = totals.entry(row.status_class).or_default();
        entry.0 += 1;
        entry.1 += row.revenue;
    }

    totals
        .into_iter()
        .map(|(status, (count, revenue))| StatusBreakdown {
            status,
            label: status.label(),
            color: status.style().color,
            count,
            revenue,
        })
        .collect()
}

/// Categorical column an aggregate can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Region,
    Department,
    Type,
    Status,
    City,
}

#[derive(Debug, Error)]
#[error("unknown dimension \"{0}\" (expected region, department, type, status or city)")]
pub struct UnknownDimension(pub String);

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "region" => Ok(Dimension::Region),
            "department" => Ok(Dimension::Department),
            "type" => Ok(Dimension::Type),
            "status" => Ok(Dimension::Status),
            "city" => Ok(Dimension::City),
            _ => Err(UnknownDimension(s.to_string())),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Region => write!(f, "region"),
            Dimension::Department => write!(f, "department"),
            Dimension::Type => write!(f, "type"),
            Dimension::Status => write!(f, "status"),
            Dimension::City => write!(f, "city"),
        }
    }
}

impl Dimension {
    /// The row's value for this dimension, if it has one.
    #[must_use]
    pub fn value_of(self, row: &Establishment) -> Option<&str> {
        let value = match self {
            Dimension::Region => row.region.as_deref(),
            Dimension::Department => row.department.as_deref(),
            Dimension::Type => row.establishment_type.as_deref(),
            Dimension::City => row.city.as_deref(),
            Dimension::Status => Some(row.status_class.label()),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub count: usize,
    pub revenue: Decimal,
}

/// Row count and revenue sum grouped by `dimension`.
///
/// Rows without a value for the dimension are left out. Sorted by revenue,
/// largest first, then by category name.
#[must_use]
pub fn revenue_by<'a, I>(rows: I, dimension: Dimension) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Establishment>,
{
    let mut groups: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    for row in rows {
        let Some(category) = dimension.value_of(row) else {
            continue;
        };
        let entry = groups.entry(category).or_default();
        entry.0 += 1;
        entry.1 += row.revenue;
    }

    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (count, revenue))| CategoryTotal {
            category: category.to_string(),
            count,
            revenue,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}
