use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use silver_forecast::download::{
    command_line, kaggle_command, manual_instructions, run_download, DownloadOutcome, API_KEY_URL,
    CREDENTIALS_HINT,
};
use silver_forecast::logging::{init_logging, LoggingConfig};
use silver_forecast::PipelineConfig;
use tracing::info;

/// Fetch the silver price dataset from Kaggle
#[derive(Debug, Parser)]
#[command(name = "download_data")]
#[command(about = "Download the silver price dataset with the Kaggle CLI")]
struct Args {
    /// Pipeline configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Kaggle dataset id (owner/name)
    #[arg(long)]
    dataset: Option<String>,

    /// Directory the archive is extracted into
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::from_env().verbose(args.verbose))
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    let mut config = PipelineConfig::load(args.config.as_deref())?;
    if let Some(dataset) = args.dataset {
        config.download.dataset = dataset;
    }
    if let Some(dir) = args.output_dir {
        config.download.output_dir = dir;
    }
    config.validate()?;

    let dataset = &config.download.dataset;
    let output_dir = &config.download.output_dir;
    let cmd = kaggle_command(dataset, output_dir);

    println!("Downloading {}...", dataset);
    println!("Command: {}", command_line(&cmd));
    println!("\nNote: {}", CREDENTIALS_HINT);
    println!("Get your API key from: {}", API_KEY_URL);

    match run_download(cmd, output_dir).context("failed to prepare output directory")? {
        DownloadOutcome::Downloaded(dir) => {
            info!(dir = %dir.display(), "dataset downloaded");
            println!("\nDownload complete!");
            println!("Files saved to: {}/", dir.display());
        }
        DownloadOutcome::Failed(status) => {
            println!("\nDownload failed: kaggle exited with {}", status);
            println!("\n{}", manual_instructions(dataset, output_dir));
        }
        DownloadOutcome::Unavailable(e) => {
            println!("\nDownload failed: could not run kaggle ({})", e);
            println!("\n{}", manual_instructions(dataset, output_dir));
        }
    }

    Ok(())
}
