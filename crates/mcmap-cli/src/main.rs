mod filters;
mod report;

use clap::{CommandFactory, Parser, Subcommand};
use mcmap_core::Dimension;
use mcmap_sheet::SheetSource;
use tracing_subscriber::EnvFilter;

use crate::filters::FilterArgs;

#[derive(Debug, Parser)]
#[command(name = "mcmap-cli")]
#[command(about = "Commercial dashboard over the published establishments sheet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show which sheet columns were detected and which are missing
    Columns,
    /// Headline numbers and the per-status breakdown
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List the filtered establishments
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum number of rows to print
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Revenue and count grouped by a dimension
    Revenue {
        #[command(flatten)]
        filter: FilterArgs,
        /// region, department, type, status or city
        #[arg(long, default_value = "status")]
        by: Dimension,
    },
    /// Print the filtered establishments as JSON
    Export {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = mcmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let source = SheetSource::from_config(&config)?;
    let loaded = source.load_or_empty().await;
    if let Some(warning) = &loaded.warning {
        eprintln!("warning: {warning}");
    }
    let dataset = &loaded.dataset;

    match command {
        Commands::Columns => report::run_columns(dataset),
        Commands::Summary { filter } => report::run_summary(dataset, &filter.into_filter()),
        Commands::List { filter, limit } => report::run_list(dataset, &filter.into_filter(), limit),
        Commands::Revenue { filter, by } => report::run_revenue(dataset, &filter.into_filter(), by),
        Commands::Export { filter } => report::run_export(dataset, &filter.into_filter())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
