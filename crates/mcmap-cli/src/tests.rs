use mcmap_core::{Dimension, Summary};
use mcmap_sheet::{normalize_table, ColumnMap, RawTable};

use super::*;
use crate::report::{render_columns, render_list, render_revenue, render_summary};

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["mcmap-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_columns_command() {
    let cli = Cli::try_parse_from(["mcmap-cli", "columns"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Columns)));
}

#[test]
fn list_defaults_to_fifty_rows_and_no_filter() {
    let cli = Cli::try_parse_from(["mcmap-cli", "list"]).expect("expected valid cli args");
    match cli.command {
        Some(Commands::List { filter, limit }) => {
            assert_eq!(limit, 50);
            assert!(filter.into_filter().is_empty());
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn filter_flags_are_shared_and_services_repeat() {
    let cli = Cli::try_parse_from([
        "mcmap-cli",
        "summary",
        "--region",
        "Bretagne",
        "--type",
        "Clinique",
        "--status",
        "résilié",
        "--service",
        "IRM",
        "--service",
        "Cardiologie",
        "--visits-only",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Summary { filter }) = cli.command else {
        panic!("expected summary");
    };
    let filter = filter.into_filter();
    assert_eq!(filter.region.as_deref(), Some("Bretagne"));
    assert_eq!(filter.establishment_type.as_deref(), Some("Clinique"));
    assert_eq!(filter.status.as_deref(), Some("résilié"));
    assert_eq!(filter.services, ["IRM", "Cardiologie"]);
    assert!(filter.visits_only);
}

#[test]
fn revenue_parses_dimension() {
    let cli = Cli::try_parse_from(["mcmap-cli", "revenue", "--by", "region"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Revenue {
            by: Dimension::Region,
            ..
        })
    ));

    let cli = Cli::try_parse_from(["mcmap-cli", "revenue"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Revenue {
            by: Dimension::Status,
            ..
        })
    ));
}

#[test]
fn revenue_rejects_unknown_dimension() {
    assert!(Cli::try_parse_from(["mcmap-cli", "revenue", "--by", "color"]).is_err());
}

fn sample_table() -> RawTable {
    RawTable::new(
        ["Nom Établissement", "Ville", "Région", "Type", "Statut", "CA"]
            .map(str::to_owned)
            .to_vec(),
        vec![
            ["Clinique A", "Lyon", "Auvergne-Rhône-Alpes", "Clinique", "Client", "1 200,50 €"]
                .map(str::to_owned)
                .to_vec(),
            ["Centre B", "Rennes", "Bretagne", "Centre", "Prospect", "300"]
                .map(str::to_owned)
                .to_vec(),
        ],
    )
}

#[test]
fn render_columns_lists_missing_headers() {
    let report = ColumnMap::detect(&sample_table().headers).report();
    let lines = render_columns(&report);
    assert_eq!(lines[0], "Detected columns (6):");
    assert!(lines.iter().any(|l| l == "  Latitude"));
}

#[test]
fn render_summary_shows_totals_and_statuses() {
    let rows = normalize_table(&sample_table());
    let summary = Summary::compute(&rows);
    let by_status = mcmap_core::count_by_status(&rows);
    let lines = render_summary(&summary, &by_status);
    assert!(lines[0].ends_with('2'));
    assert!(lines[4].ends_with("1500.50 €"));
    assert!(lines.iter().any(|l| l.starts_with("Client")));
    assert!(lines.iter().any(|l| l.starts_with("Prospect")));
}

#[test]
fn render_list_truncates_to_limit() {
    let rows = normalize_table(&sample_table());
    let refs: Vec<_> = rows.iter().collect();
    let lines = render_list(&refs, 1);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Clinique A"));
    assert_eq!(lines[2], "... 1 more (use --limit)");
}

#[test]
fn render_revenue_orders_by_revenue() {
    let rows = normalize_table(&sample_table());
    let totals = mcmap_core::revenue_by(&rows, Dimension::Region);
    let lines = render_revenue(&totals, Dimension::Region);
    assert!(lines[0].starts_with("REGION"));
    assert!(lines[1].starts_with("Auvergne-Rhône-Alpes"));
    assert!(lines[2].starts_with("Bretagne"));
}
