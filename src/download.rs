//! Dataset acquisition through the `kaggle` command-line client.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::{info, warn};

use crate::error::{Error, Result};

pub const KAGGLE_BIN: &str = "kaggle";
pub const CREDENTIALS_HINT: &str = "Requires Kaggle API credentials (~/.kaggle/kaggle.json)";
pub const API_KEY_URL: &str = "https://www.kaggle.com/account";

/// Public page of a Kaggle dataset.
pub fn dataset_url(dataset: &str) -> String {
    format!("https://www.kaggle.com/datasets/{}", dataset)
}

/// `kaggle datasets download -d <dataset> -p <dir> --unzip`
pub fn kaggle_command(dataset: &str, output_dir: &Path) -> Command {
    let mut cmd = Command::new(KAGGLE_BIN);
    cmd.args(["datasets", "download", "-d", dataset, "-p"])
        .arg(output_dir)
        .arg("--unzip");
    cmd
}

/// The command line as a user would type it.
pub fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Steps for fetching the archive by hand.
pub fn manual_instructions(dataset: &str, output_dir: &Path) -> String {
    format!(
        "Manual download instructions:\n\
         1. Go to: {}\n\
         2. Click 'Download' button\n\
         3. Extract ZIP to: {}/",
        dataset_url(dataset),
        output_dir.display()
    )
}

#[derive(Debug)]
pub enum DownloadOutcome {
    /// Files were extracted into this directory
    Downloaded(PathBuf),
    /// The client ran but exited unsuccessfully
    Failed(ExitStatus),
    /// The client could not be started at all
    Unavailable(std::io::Error),
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Downloaded(_))
    }
}

/// Create `output_dir`, then run `cmd`.
///
/// Only the directory creation is an error; a failing or missing client is
/// reported through the outcome so the caller can print fallback steps.
pub fn run_download(mut cmd: Command, output_dir: &Path) -> Result<DownloadOutcome> {
    std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    info!(command = %command_line(&cmd), "starting dataset download");
    let outcome = match cmd.status() {
        Ok(status) if status.success() => DownloadOutcome::Downloaded(output_dir.to_path_buf()),
        Ok(status) => {
            warn!(%status, "download command failed");
            DownloadOutcome::Failed(status)
        }
        Err(e) => {
            warn!(error = %e, "could not start download command");
            DownloadOutcome::Unavailable(e)
        }
    };

    Ok(outcome)
}

/// Download `dataset` into `output_dir` with the Kaggle client.
pub fn download_dataset(dataset: &str, output_dir: &Path) -> Result<DownloadOutcome> {
    run_download(kaggle_command(dataset, output_dir), output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DATASET: &str = "someone/silver-prices";

    #[test]
    fn test_kaggle_command_args() {
        let cmd = kaggle_command(DATASET, Path::new("data/raw"));
        assert_eq!(cmd.get_program(), KAGGLE_BIN);
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["datasets", "download", "-d", DATASET, "-p", "data/raw", "--unzip"]
        );
        assert_eq!(
            command_line(&cmd),
            "kaggle datasets download -d someone/silver-prices -p data/raw --unzip"
        );
    }

    #[test]
    fn test_manual_instructions() {
        let text = manual_instructions(DATASET, Path::new("data/raw"));
        assert!(text.contains("https://www.kaggle.com/datasets/someone/silver-prices"));
        assert!(text.contains("Extract ZIP to: data/raw/"));
    }

    #[test]
    fn test_missing_client_is_reported() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("raw");
        let cmd = Command::new("definitely-not-an-installed-binary-7f3a");

        let outcome = run_download(cmd, &out).unwrap();
        assert!(matches!(outcome, DownloadOutcome::Unavailable(_)));
        assert!(!outcome.is_success());
        assert!(out.is_dir());
    }
}
