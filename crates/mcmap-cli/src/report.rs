//! Terminal rendering for the data commands.
//!
//! Each `run_*` prints to stdout; the `render_*` helpers build the lines so
//! they can be checked without a sheet.

use mcmap_core::{
    count_by_status, revenue_by, CategoryTotal, Dimension, Establishment, EstablishmentFilter,
    StatusBreakdown, Summary,
};
use mcmap_sheet::{ColumnReport, Dataset};
use rust_decimal::Decimal;

const NAME_WIDTH: usize = 32;

/// Shorten `value` to `max` characters, marking the cut with `...`.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let kept: String = value.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        value.to_owned()
    }
}

fn fmt_revenue(value: Decimal) -> String {
    format!("{:.2} €", value.round_dp(2))
}

pub(crate) fn render_columns(report: &ColumnReport) -> Vec<String> {
    let mut lines = vec![format!("Detected columns ({}):", report.detected.len())];
    lines.extend(report.detected.iter().map(|c| format!("  {c}")));
    if report.missing.is_empty() {
        lines.push("All known columns are present.".to_owned());
    } else {
        lines.push(format!("Missing columns ({}):", report.missing.len()));
        lines.extend(report.missing.iter().map(|c| format!("  {c}")));
    }
    lines
}

pub(crate) fn render_summary(summary: &Summary, by_status: &[StatusBreakdown]) -> Vec<String> {
    let mut lines = vec![
        format!("Establishments:    {}", summary.establishment_count),
        format!("On the map:        {}", summary.mappable_count),
        format!("Clients:           {}", summary.client_count),
        format!("Visits planned:    {}", summary.scheduled_visit_count),
        format!("Total revenue:     {}", fmt_revenue(summary.total_revenue)),
        String::new(),
        format!("{:<16}{:>8}{:>18}", "STATUS", "COUNT", "REVENUE"),
    ];
    lines.extend(by_status.iter().map(|row| {
        format!(
            "{:<16}{:>8}{:>18}",
            row.label,
            row.count,
            fmt_revenue(row.revenue)
        )
    }));
    lines
}

pub(crate) fn render_list(rows: &[&Establishment], limit: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<34}{:<18}{:<16}{:<16}{:>16}",
        "NAME", "CITY", "TYPE", "STATUS", "CA"
    )];
    for row in rows.iter().take(limit) {
        lines.push(format!(
            "{:<34}{:<18}{:<16}{:<16}{:>16}",
            truncate(row.display_name(), NAME_WIDTH),
            truncate(row.city.as_deref().unwrap_or("-"), 16),
            truncate(row.establishment_type.as_deref().unwrap_or("-"), 14),
            row.status_class.label(),
            fmt_revenue(row.revenue),
        ));
    }
    if rows.len() > limit {
        lines.push(format!("... {} more (use --limit)", rows.len() - limit));
    }
    lines
}

pub(crate) fn render_revenue(totals: &[CategoryTotal], dimension: Dimension) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<34}{:>8}{:>18}",
        dimension.to_string().to_uppercase(),
        "COUNT",
        "REVENUE"
    )];
    lines.extend(totals.iter().map(|t| {
        format!(
            "{:<34}{:>8}{:>18}",
            truncate(&t.category, NAME_WIDTH),
            t.count,
            fmt_revenue(t.revenue)
        )
    }));
    lines
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub(crate) fn run_columns(dataset: &Dataset) {
    print_lines(&render_columns(&dataset.columns));
}

pub(crate) fn run_summary(dataset: &Dataset, filter: &EstablishmentFilter) {
    let rows = filter.apply(&dataset.establishments);
    let summary = Summary::compute(rows.iter().copied());
    let by_status = count_by_status(rows.iter().copied());
    print_lines(&render_summary(&summary, &by_status));
}

pub(crate) fn run_list(dataset: &Dataset, filter: &EstablishmentFilter, limit: usize) {
    let rows = filter.apply(&dataset.establishments);
    if rows.is_empty() {
        println!("no establishments match the selected filters");
        return;
    }
    print_lines(&render_list(&rows, limit));
}

pub(crate) fn run_revenue(dataset: &Dataset, filter: &EstablishmentFilter, by: Dimension) {
    let rows = filter.apply(&dataset.establishments);
    let totals = revenue_by(rows.iter().copied(), by);
    if totals.is_empty() {
        println!("no {by} values among the selected establishments");
        return;
    }
    print_lines(&render_revenue(&totals, by));
}

/// # Errors
///
/// Returns an error if the rows cannot be serialized.
pub(crate) fn run_export(dataset: &Dataset, filter: &EstablishmentFilter) -> anyhow::Result<()> {
    let rows = filter.apply(&dataset.establishments);
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
