use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use silver_forecast::features::{
    BOLLINGER_PERIOD, LAGS, MOMENTUM_WINDOW, RSI_PERIOD, SMA_WINDOWS, VOLATILITY_WINDOW,
};
use silver_forecast::logging::{init_logging, LoggingConfig};
use silver_forecast::{build_features, load_price_records, write_features, PipelineConfig};
use tracing::info;

/// Technical-indicator feature table for the direction classifier
#[derive(Debug, Parser)]
#[command(name = "build_features")]
#[command(about = "Build the engineered feature table from raw prices")]
struct Args {
    /// Pipeline configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Historical price file
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Feature table to write
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn join(values: &[usize]) -> String {
    values.iter().map(usize::to_string).collect::<Vec<_>>().join(", ")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::from_env().verbose(args.verbose))
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    let config = PipelineConfig::load(args.config.as_deref())?;
    let raw_file = args.input.unwrap_or(config.data.raw_file);
    let features_file = args.output.unwrap_or(config.data.features_file);

    println!("{}", "=".repeat(80));
    println!("FEATURE ENGINEERING");
    println!("{}", "=".repeat(80));

    println!("\nLoading data...");
    let records = load_price_records(&raw_file).context("failed to load raw prices")?;
    println!("Loaded {} price points", records.len());

    println!("\nCreating features...");
    println!("  - Daily returns");
    println!("  - Moving averages ({}-day)", join(&SMA_WINDOWS));
    println!("  - RSI ({}-period)", RSI_PERIOD);
    println!("  - Bollinger Bands ({}-period)", BOLLINGER_PERIOD);
    println!("  - Momentum ({}-day)", MOMENTUM_WINDOW);
    println!("  - Volatility ({}-day rolling)", VOLATILITY_WINDOW);
    println!("  - Lag features ({} days)", join(&LAGS));
    println!("  - Target variable (direction)");
    let table = build_features(&records);
    info!(rows = table.len(), labelled = table.target_distribution().total(), "features built");

    println!("\nSaving processed features...");
    write_features(&features_file, &table).context("failed to save features")?;
    println!("Saved to: {}", features_file.display());

    println!("\nFEATURE SUMMARY");
    println!("{}", "-".repeat(80));
    println!("Total features created: 13");
    println!("  - Price-based: 1 (close price)");
    println!("  - Derived: 2 (returns, momentum)");
    println!("  - Technical indicators: 4 (SMA-5, 20, 50, RSI)");
    println!("  - Volatility: 2 (Bollinger, rolling vol)");
    println!("  - Lag features: 3 (1, 7, 30 days)");
    println!("  - Target: 1 (direction: 1=up, 0=down)");

    let dist = table.target_distribution();
    println!("\nTARGET DISTRIBUTION");
    println!("{}", "-".repeat(80));
    println!("Up days (1): {} ({:.1}%)", dist.up, dist.up_pct());
    println!("Down days (0): {} ({:.1}%)", dist.down, dist.down_pct());
    println!(
        "Class balance: {}",
        if dist.is_balanced() { "Good" } else { "Imbalanced" }
    );

    println!("\n{}", "=".repeat(80));
    println!("Feature Engineering Complete!");
    println!("{}", "=".repeat(80));

    Ok(())
}
