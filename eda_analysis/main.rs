use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use silver_forecast::eda::analyze;
use silver_forecast::logging::{init_logging, LoggingConfig};
use silver_forecast::{load_price_records, PipelineConfig};
use tracing::info;

/// Exploratory statistics over the silver price history
#[derive(Debug, Parser)]
#[command(name = "eda_analysis")]
#[command(about = "Exploratory data analysis of the raw price history")]
struct Args {
    /// Pipeline configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Historical price file
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

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

    println!("{}", "=".repeat(80));
    println!("EXPLORATORY DATA ANALYSIS");
    println!("{}", "=".repeat(80));

    println!("\nLoading data...");
    let records = load_price_records(&raw_file).context("failed to load raw prices")?;
    println!("Loaded {} records", records.len());

    let report = analyze(&records).context("price history too short for EDA")?;
    info!(rows = report.basic.count, "analysis complete");

    let b = &report.basic;
    println!("\n1. BASIC STATISTICS");
    println!("{}", "-".repeat(80));
    println!("Total data points: {}", b.count);
    println!("Date range: {} to {}", b.first_date, b.last_date);
    println!("\nPrice Statistics:");
    println!("  Min: ${:.2}", b.min);
    println!("  Max: ${:.2}", b.max);
    println!("  Mean: ${:.2}", b.mean);
    println!("  Range: ${:.2}", b.range);
    println!("  Median: ${:.2}", b.median);
    println!("  Std Dev: ${:.2}", b.std_dev);

    let t = &report.trend;
    println!("\n2. TREND ANALYSIS");
    println!("{}", "-".repeat(80));
    println!("Daily Returns:");
    println!("  Positive days: {} ({:.1}%)", t.positive_days, t.positive_pct);
    println!("  Negative days: {} ({:.1}%)", t.negative_days, t.negative_pct);
    println!("  Mean daily return: {:.3}%", t.mean_return_pct);
    println!("\nOverall Trend (first {0} vs last {0} days):", t.window);
    println!("  First {} days avg: ${:.2}", t.window, t.first_avg);
    println!("  Last {} days avg: ${:.2}", t.window, t.last_avg);
    println!("  Change: {:+.2}%", t.change_pct);

    let o = &report.outliers;
    println!("\n3. OUTLIER DETECTION (IQR Method)");
    println!("{}", "-".repeat(80));
    println!("Q1 (25th percentile): ${:.2}", o.bounds.q1);
    println!("Q3 (75th percentile): ${:.2}", o.bounds.q3);
    println!("IQR: ${:.2}", o.bounds.iqr);
    println!("Lower bound: ${:.2}", o.bounds.lower);
    println!("Upper bound: ${:.2}", o.bounds.upper);
    println!("Outliers detected: {} ({:.2}%)", o.count, o.pct);
    if let Some((lo, hi)) = o.range {
        println!("\nOutlier price range: ${:.2} - ${:.2}", lo, hi);
    }

    let v = &report.volatility;
    println!("\n4. VOLATILITY ANALYSIS");
    println!("{}", "-".repeat(80));
    println!("Average daily price change: ${:.2}", v.mean_abs_change);
    println!("Maximum daily price change: ${:.2}", v.max_abs_change);
    println!("Volatility (std of returns): {:.3}%", v.return_std_pct);

    let d = &report.direction;
    println!("\n5. DIRECTIONAL ACCURACY BASELINE");
    println!("{}", "-".repeat(80));
    println!("Naive Forecast (persistence model):");
    println!("  Directional Accuracy: {:.2}%", d.percent);
    println!(
        "  Beat random (50%)?: {}",
        if report.beats_random() { "YES" } else { "NO" }
    );

    println!("\n6. VOLUME");
    println!("{}", "-".repeat(80));
    println!("Mean volume: {:.0}", report.volume.mean);
    println!("Days with zero or missing volume: {}", report.volume.zero_days);

    println!("\n{}", "=".repeat(80));
    println!("EDA Complete!");
    println!("{}", "=".repeat(80));

    println!("\nKEY FINDINGS:");
    println!("1. Price range: ${:.2} - ${:.2}", b.min, b.max);
    println!("2. Overall trend: {:+.1}% over the period", t.change_pct);
    println!("3. Volatility: {:.2} std dev", b.std_dev);
    println!(
        "4. Baseline model accuracy: {:.1}% (goal: >{:.0}%)",
        d.percent, config.report.target_accuracy
    );
    println!("5. Outliers: {} days with unusual prices", o.count);

    Ok(())
}
