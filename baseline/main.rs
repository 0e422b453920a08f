use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use silver_forecast::core::io::write_file;
use silver_forecast::logging::{init_logging, LoggingConfig};
use silver_forecast::models::baseline::{BaselineReport, SplitScores, RANDOM_CHANCE};
use silver_forecast::{read_features, split_chronological, FeatureRow, PipelineConfig};
use tracing::info;

/// Chronological split and naive baselines over the feature table
#[derive(Debug, Parser)]
#[command(name = "baseline")]
#[command(about = "Split the feature table and score the naive baselines")]
struct Args {
    /// Pipeline configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Feature table to read
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Fraction of rows used for training
    #[arg(long)]
    train_pct: Option<f64>,

    /// Fraction of rows used for validation
    #[arg(long)]
    val_pct: Option<f64>,

    /// Directional accuracy to aim for, in percent
    #[arg(long)]
    target: Option<f64>,

    /// Also write the summary to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::from_env().verbose(args.verbose))
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    let mut config = PipelineConfig::load(args.config.as_deref())?;
    if let Some(input) = args.input {
        config.data.features_file = input;
    }
    if let Some(pct) = args.train_pct {
        config.split.train_pct = pct;
    }
    if let Some(pct) = args.val_pct {
        config.split.val_pct = pct;
    }
    if let Some(target) = args.target {
        config.report.target_accuracy = target;
    }
    config.validate()?;

    let table = read_features(&config.data.features_file)
        .context("cannot load the feature table; run build_features first")?;
    info!(path = %config.data.features_file.display(), rows = table.len(), "loaded features");

    let split = split_chronological(&table.rows, config.split.train_pct, config.split.val_pct)?;
    let report = BaselineReport::evaluate(&split);
    let text = render(&config, table.len(), &split.named(), &report)?;

    print!("{}", text);
    if let Some(path) = args.report {
        write_file(&path, &text).context("failed to write baseline report")?;
        println!("\nReport written to: {}", path.display());
    }

    Ok(())
}

fn render(
    config: &PipelineConfig,
    samples: usize,
    parts: &[(&str, &[FeatureRow]); 3],
    report: &BaselineReport,
) -> Result<String> {
    let mut out = String::new();
    let rule = "=".repeat(80);
    let thin = "-".repeat(80);

    writeln!(out, "{}", rule)?;
    writeln!(out, "BASELINE MODEL & DATA SPLIT")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "\nLoaded {} samples", samples)?;

    writeln!(out, "\nSplitting data (time series split, no shuffling)...")?;
    let val_pct = config.split.val_pct * 100.0;
    let test_pct = (1.0 - config.split.train_pct - config.split.val_pct) * 100.0;
    let pcts = [config.split.train_pct * 100.0, val_pct, test_pct];
    for ((name, rows), pct) in parts.iter().zip(pcts) {
        writeln!(out, "  {} set: {} samples (~{:.0}%)", name, rows.len(), pct)?;
    }

    if parts.iter().all(|(_, rows)| !rows.is_empty()) {
        writeln!(out, "\nDATE RANGES:")?;
        for (name, rows) in parts {
            if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
                writeln!(out, "  {}: {} to {}", name, first.date, last.date)?;
            }
        }
    }

    write_scores(&mut out, "BASELINE 1: Naive Persistence (Tomorrow = Today)", &report.persistence)?;
    write_scores(&mut out, "BASELINE 2: Moving Average Crossover (SMA5 vs SMA20)", &report.crossover)?;

    let best = report.best_test_accuracy();
    let target = config.report.target_accuracy;
    let gap = report.gap_to(target);

    writeln!(out, "\n{}", rule)?;
    writeln!(out, "BASELINE SUMMARY")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "\nBest Baseline (Test Set): {:.2}%", best)?;
    writeln!(out, "Random Chance: {:.2}%", RANDOM_CHANCE)?;
    writeln!(out, "Our Target: >{:.2}%", target)?;
    writeln!(out, "\nThreshold to beat: {:.2}%", best)?;
    writeln!(out, "Gap to target: {:.2} percentage points", gap)?;
    if gap > 0.0 {
        writeln!(out, "Challenge: Need to improve {:.2}% to hit target", gap)?;
    } else {
        writeln!(out, "Baseline already beats target")?;
    }
    writeln!(out, "\n{}", thin)?;
    writeln!(out, "Goal for later models: beat {:.2}% and reach >{:.2}%", best, target)?;

    Ok(out)
}

fn write_scores(out: &mut String, title: &str, scores: &SplitScores) -> std::fmt::Result {
    writeln!(out, "\n{}", title)?;
    writeln!(out, "{}", "-".repeat(80))?;
    for (name, acc) in scores.named() {
        let label = format!("{}:", name);
        writeln!(
            out,
            "{:<6} {:.2}% ({}/{})",
            label, acc.percent, acc.correct, acc.total
        )?;
    }
    Ok(())
}
