use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;

use crate::config::DashboardConfig;
use crate::constants::ranking::EMPTY_TABLE_MESSAGE;
use crate::format::{MetricCards, format_thousands, table_rows};
use crate::ingestion::{DashboardState, IngestReport};
use crate::metrics::median_rating;
use crate::pipeline::DashboardView;
use crate::source::{CsvRowSource, RowSource, SampleSource};

#[derive(Debug, Parser)]
#[command(
    name = "dashboard_report",
    disable_help_subcommand = true,
    about = "Filter a movie dataset and print metrics, chart series, and a ranked table",
    long_about = "Load a movie CSV (or the bundled sample), apply filters, and print the summary metrics, the four chart series, and the top-N table.",
    after_help = "Filters mirror the dashboard controls. Year bounds default to the dataset's year range."
)]
/// CLI for `dashboard_report`.
///
/// Common usage:
/// - Bundled sample, Bollywood only: `--genre Bollywood --top 3`
/// - Own file: `--csv /data/movies.csv --min-votes 100000`
/// - Machine-readable output: `--json`
struct DashboardReportCli {
    #[arg(long, value_name = "PATH", help = "CSV file to load instead of the bundled sample")]
    csv: Option<PathBuf>,
    #[arg(long = "year-min", help = "Inclusive lower year bound")]
    year_min: Option<f64>,
    #[arg(long = "year-max", help = "Inclusive upper year bound")]
    year_max: Option<f64>,
    #[arg(long = "min-votes", default_value_t = 0.0, help = "Minimum vote count (unknown votes always pass)")]
    min_votes: f64,
    #[arg(long = "genre", value_name = "TAG", help = "Restrict to these genres, repeat as needed (match-any)")]
    genres: Vec<String>,
    #[arg(long, default_value = "", help = "Case-insensitive title substring")]
    title: String,
    #[arg(
        long,
        default_value_t = 10,
        value_parser = parse_positive_usize,
        help = "Number of rows in the ranked table"
    )]
    top: usize,
    #[arg(
        long,
        default_value_t = 10,
        value_parser = parse_positive_usize,
        help = "Requested runtime histogram bins"
    )]
    bins: usize,
    #[arg(long, help = "Print the full view as JSON")]
    json: bool,
}

/// Run the dashboard report CLI with `args_iter` (program name excluded).
pub fn run_dashboard_report<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<DashboardReportCli, _>(
        std::iter::once("dashboard_report".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    init_tracing();

    let config = DashboardConfig {
        histogram_bins: cli.bins,
        top_n: cli.top,
        ..DashboardConfig::default()
    };
    let mut state = DashboardState::new(config)?;

    let source: Box<dyn RowSource> = match &cli.csv {
        Some(path) => Box::new(CsvRowSource::from_path(path)),
        None => Box::new(SampleSource),
    };
    let report = state.ingest_from(source.as_ref())?;

    {
        let filter = state.filter_mut();
        if cli.year_min.is_some() {
            filter.year_min = cli.year_min;
        }
        if cli.year_max.is_some() {
            filter.year_max = cli.year_max;
        }
        filter.min_votes = cli.min_votes;
        filter.title_query = cli.title.clone();
        for genre in &cli.genres {
            filter.active_genres.insert(genre.clone());
        }
    }

    let view = state.view();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}", dataset_header(&report, &state));
    print_view(&view, &state);
    Ok(())
}

fn dataset_header(report: &IngestReport, state: &DashboardState) -> String {
    let dataset = state.dataset();
    let genres: Vec<&str> = dataset.genre_universe().iter().map(String::as_str).collect();
    format!(
        "=== dataset ===\nsource: {} (revision {}, loaded {})\nrows read: {} | records kept: {} | rows dropped: {}\ngenres: {}",
        report.source_id,
        report.revision,
        dataset.loaded_at().format("%Y-%m-%d %H:%M:%S UTC"),
        report.rows_read,
        report.records_kept,
        report.rows_dropped,
        genres.join(", ")
    )
}

fn print_view(view: &DashboardView, state: &DashboardState) {
    let cards = MetricCards::from(&view.summary);
    println!();
    println!("=== metrics ===");
    println!("movies: {}", cards.movies);
    println!("avg rating: {}", cards.mean_rating);
    let median = median_rating(&state.filtered())
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "n/a".to_string());
    println!("median rating: {median}");
    println!("avg revenue (M): {}", cards.mean_revenue_millions);
    println!("avg runtime (min): {}", cards.mean_runtime);

    println!();
    println!("=== avg rating by genre ===");
    for (genre, mean) in view.aggregates.genre_rating.iter() {
        println!("{genre:<14} {mean:.2}");
    }

    println!();
    println!("=== avg rating by year ===");
    for (year, mean) in view.aggregates.year_rating.iter() {
        println!("{year:<6} {mean:.2}");
    }

    println!();
    println!("=== runtime histogram ===");
    let histogram = &view.aggregates.runtime_histogram;
    for (label, count) in histogram.labels.iter().zip(&histogram.counts) {
        println!("{label:<10} {}", "#".repeat(*count));
    }

    println!();
    println!("=== revenue (M) vs rating ===");
    for point in &view.aggregates.revenue_rating {
        println!(
            "{}: ({:.1}, {:.1}) weight={:.2}",
            point.title, point.x, point.y, point.weight
        );
    }

    println!();
    println!("=== top {} ===", state.top_n());
    if view.top.is_empty() {
        println!("{EMPTY_TABLE_MESSAGE}");
        return;
    }
    for (rank, row) in table_rows(&view.top).iter().enumerate() {
        println!(
            "{:>3}. {} ({}) [{}] rating={} votes={} revenue(M)={} runtime={}",
            rank + 1,
            row.title,
            row.year,
            row.genres,
            row.rating,
            row.votes,
            row.revenue_millions,
            row.runtime
        );
    }
    println!(
        "filtered {} of {} records",
        format_thousands(view.summary.count as f64),
        format_thousands(state.dataset().len() as f64)
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed by the host process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse '{}' as a positive integer", raw))?;
    if parsed == 0 {
        return Err("value must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
