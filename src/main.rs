//! CLI entry point for the labour-market statistics tool.
//!
//! Provides subcommands for querying the quarterly dataset, looking up a
//! single highest/lowest metric, and printing the trend-service time window.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use labor_stats::analyzers::extremum::extremum;
use labor_stats::analyzers::report::summarize;
use labor_stats::analyzers::types::{Direction, Metric};
use labor_stats::dataset::Dataset;
use labor_stats::filter::{QueryMode, TimeQuery, filter};
use labor_stats::output::{append_rows, print_json, random_export_filename};
use labor_stats::quarter::Quarter;
use labor_stats::trend::trend_timeframe;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "labor_stats")]
#[command(about = "A tool to query quarterly labour-market statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Filtering flags shared by the query subcommands.
#[derive(Args)]
struct FilterArgs {
    /// Dataset CSV (falls back to DATASET_PATH, then assets/dataset.csv)
    #[arg(short, long, value_name = "FILE")]
    dataset: Option<String>,

    /// First year of the window
    #[arg(long)]
    start_year: i32,

    /// Last year of the window
    #[arg(long)]
    end_year: i32,

    /// Quarter the window starts at (Q1..Q4)
    #[arg(long)]
    start_quarter: Option<Quarter>,

    /// Quarter the window ends at (Q1..Q4)
    #[arg(long)]
    end_quarter: Option<Quarter>,

    /// Comma-separated industries to keep (at least one)
    #[arg(short, long, value_delimiter = ',', required = true)]
    industries: Vec<String>,

    /// Compare exactly the two endpoints instead of the full range
    #[arg(long, default_value_t = false)]
    comparison: bool,
}

impl FilterArgs {
    fn dataset_path(&self) -> String {
        self.dataset
            .clone()
            .or_else(|| std::env::var("DATASET_PATH").ok())
            .unwrap_or_else(|| "assets/dataset.csv".to_string())
    }

    fn to_query(&self) -> TimeQuery {
        TimeQuery {
            start_year: self.start_year,
            end_year: self.end_year,
            start_quarter: self.start_quarter,
            end_quarter: self.end_quarter,
            industries: self.industries.clone(),
            mode: if self.comparison {
                QueryMode::Comparison
            } else {
                QueryMode::Range
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the dataset, aggregate it, and report per-metric extremes
    Query {
        #[command(flatten)]
        filter: FilterArgs,

        /// CSV file to append the time aggregation to
        #[arg(short, long)]
        output: Option<String>,

        /// Directory to export the filtered records to, under a random filename
        #[arg(long, value_name = "DIR")]
        export_dir: Option<String>,
    },
    /// Report a single highest/lowest metric over the filtered window
    Extremes {
        #[command(flatten)]
        filter: FilterArgs,

        /// Metric to search: recruitment, resignation, or retrenchment
        #[arg(short, long)]
        metric: Metric,

        /// highest or lowest
        #[arg(long, default_value = "highest")]
        direction: Direction,
    },
    /// Print the search-trend time window for the given bounds
    TrendWindow {
        #[arg(long)]
        start_year: i32,

        #[arg(long)]
        end_year: i32,

        #[arg(long)]
        start_quarter: Option<Quarter>,

        #[arg(long)]
        end_quarter: Option<Quarter>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/labor_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("labor_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            filter: args,
            output,
            export_dir,
        } => run_query(&args, output.as_deref(), export_dir.as_deref())?,
        Commands::Extremes {
            filter: args,
            metric,
            direction,
        } => run_extremes(&args, metric, direction)?,
        Commands::TrendWindow {
            start_year,
            end_year,
            start_quarter,
            end_quarter,
        } => {
            let window = trend_timeframe(start_year, end_year, start_quarter, end_quarter);
            info!(window = %window, "Trend time window");
        }
    }

    Ok(())
}

#[tracing::instrument(skip(args, output, export_dir), fields(dataset = %args.dataset_path()))]
fn run_query(args: &FilterArgs, output: Option<&str>, export_dir: Option<&str>) -> Result<()> {
    let dataset = Dataset::from_csv_path(Path::new(&args.dataset_path()))?;
    let query = args.to_query();
    let subset = filter(&dataset, &query);

    if subset.is_empty() {
        warn!(
            start_year = query.start_year,
            end_year = query.end_year,
            min_year = dataset.min_year(),
            max_year = dataset.max_year(),
            "No records matched; check the year window and quarter order"
        );
        return Ok(());
    }

    let summary = summarize(&subset, query.by_quarter())?;
    print_json(&summary)?;

    if let Some(path) = output {
        append_rows(path, &summary.time_rows)?;
        info!(path, rows = summary.time_rows.len(), "Aggregation appended");
    }

    if let Some(dir) = export_dir {
        std::fs::create_dir_all(dir)?;
        let export_path = format!("{}/{}", dir, random_export_filename());
        append_rows(&export_path, &subset)?;
        info!(path = %export_path, rows = subset.len(), "Filtered records exported");
    }

    Ok(())
}

#[tracing::instrument(skip(args), fields(dataset = %args.dataset_path(), metric = %metric, direction = %direction))]
fn run_extremes(args: &FilterArgs, metric: Metric, direction: Direction) -> Result<()> {
    let dataset = Dataset::from_csv_path(Path::new(&args.dataset_path()))?;
    let query = args.to_query();
    let subset = filter(&dataset, &query);

    if subset.is_empty() {
        warn!(
            start_year = query.start_year,
            end_year = query.end_year,
            "No records matched; nothing to search"
        );
        return Ok(());
    }

    let result = extremum(&subset, metric, direction, query.by_quarter())?;
    info!(
        value = result.value,
        keys = ?result.keys,
        "Extremum found"
    );
    print_json(&result)?;

    Ok(())
}
