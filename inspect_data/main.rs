use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use silver_forecast::inspect::{ColumnKind, Table, TableProfile};
use silver_forecast::logging::{init_logging, LoggingConfig};
use silver_forecast::PipelineConfig;
use tracing::warn;

const HEAD_ROWS: usize = 5;

/// Data quality report for the raw CSV files
#[derive(Debug, Parser)]
#[command(name = "inspect_data")]
#[command(about = "Profile the historical and forecast CSV files")]
struct Args {
    /// Pipeline configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Historical price file
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Forecast file; skipped when missing
    #[arg(long, value_name = "FILE")]
    forecast: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::from_env().verbose(args.verbose))
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    let config = PipelineConfig::load(args.config.as_deref())?;
    let raw_file = args.input.unwrap_or(config.data.raw_file);
    let forecast_file = args.forecast.unwrap_or(config.data.forecast_file);

    println!("{}", "=".repeat(80));
    println!("DATA COLLECTION & QUALITY ASSESSMENT");
    println!("{}", "=".repeat(80));

    println!("\n1. HISTORICAL DATA");
    println!("{}", "-".repeat(80));
    let historical =
        TableProfile::from_path(&raw_file).context("failed to read historical data")?;
    print_overview(&historical);
    print_numeric_summary(&historical);

    let forecast = if forecast_file.exists() {
        println!("\n\n2. FORECAST DATA");
        println!("{}", "-".repeat(80));
        let profile =
            TableProfile::from_path(&forecast_file).context("failed to read forecast data")?;
        print_overview(&profile);
        Some(profile)
    } else {
        warn!(path = %forecast_file.display(), "forecast file not found, skipping");
        None
    };

    println!("\n\n3. DATE RANGE ANALYSIS");
    println!("{}", "-".repeat(80));
    print_date_range("Historical", &historical);
    if let Some(profile) = &forecast {
        print_date_range("Forecast", profile);
    }

    println!("\n\n4. DATA QUALITY CHECKS");
    println!("{}", "-".repeat(80));
    print_quality(&raw_file, &historical);

    println!("\n{}", "=".repeat(80));
    println!("Data inspection complete!");
    println!("{}", "=".repeat(80));

    Ok(())
}

fn print_overview(profile: &TableProfile) {
    let table = &profile.table;
    let (rows, cols) = table.shape();
    println!("Shape: ({}, {})", rows, cols);
    println!("\nColumns: {:?}", table.headers);
    println!("\nFirst {} rows:", HEAD_ROWS);
    print_rows(table, HEAD_ROWS);

    println!("\nData Types / Missing Values:");
    let name_width = table.headers.iter().map(String::len).max().unwrap_or(0);
    for column in &profile.columns {
        println!(
            "  {:<width$}  {:<8} missing {:>6} ({:.2}%)",
            column.name,
            column.kind.label(),
            column.missing,
            column.missing_pct,
            width = name_width
        );
    }
}

fn print_rows(table: &Table, n: usize) {
    let head = table.head(n);
    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| head.iter().map(|r| r[i].len()).chain([h.len()]).max().unwrap_or(0))
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>width$}", c, width = w))
            .collect::<Vec<_>>()
            .join("  ")
    };
    println!("  {}", line(&table.headers));
    for row in head {
        println!("  {}", line(row));
    }
}

fn print_numeric_summary(profile: &TableProfile) {
    let numeric: Vec<_> = profile
        .columns
        .iter()
        .filter(|c| c.kind == ColumnKind::Numeric)
        .filter_map(|c| c.summary.map(|s| (c.name.as_str(), s)))
        .collect();
    if numeric.is_empty() {
        return;
    }

    println!("\nBasic Stats:");
    println!(
        "  {:<12} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for (name, s) in numeric {
        println!(
            "  {:<12} {:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            name, s.count, s.mean, s.std, s.min, s.q25, s.q50, s.q75, s.max
        );
    }
}

fn print_date_range(label: &str, profile: &TableProfile) {
    match profile.date_range {
        Some((first, last)) => println!("{}: {} to {}", label, first, last),
        None => println!("{}: no parseable Date column", label),
    }
    println!("Total Days: {}", profile.table.rows.len());
}

fn print_quality(path: &Path, profile: &TableProfile) {
    println!("Duplicate rows (historical): {}", profile.duplicate_rows);
    match profile.duplicate_dates {
        Some(n) => println!("Duplicate dates (historical): {}", n),
        None => println!("Duplicate dates (historical): N/A"),
    }

    match profile.out_of_order {
        Some(row) => {
            warn!(path = %path.display(), row, "dates are not strictly ascending");
            println!("Date order: NOT strictly ascending (first break at row {})", row);
        }
        None => println!("Date order: ascending"),
    }

    println!("\nMissing % (historical):");
    let mut any_missing = false;
    for column in profile.columns_with_missing() {
        any_missing = true;
        println!("  {}: {:.2}%", column.name, column.missing_pct);
    }
    if !any_missing {
        println!("  none");
    }

    if let Some(outliers) = &profile.close_outliers {
        println!(
            "\nOutliers (Close price, IQR method): {} ({:.2}%)",
            outliers.count, outliers.pct
        );
    }
}
