//! Configuration structures for the pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration shared by every pipeline stage.
///
/// All sections are optional in the TOML file; missing values fall back to
/// the defaults below, which match the project's `data/` layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub split: SplitConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Input and output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Historical prices (Date, Close, optional Volume)
    #[serde(default = "default_raw_file")]
    pub raw_file: PathBuf,

    /// Forecast table shipped with the dataset; only inspected
    #[serde(default = "default_forecast_file")]
    pub forecast_file: PathBuf,

    /// Engineered feature table
    #[serde(default = "default_features_file")]
    pub features_file: PathBuf,
}

/// Chronological split fractions. Test gets the remainder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default = "default_train_pct")]
    pub train_pct: f64,

    #[serde(default = "default_val_pct")]
    pub val_pct: f64,
}

/// Kaggle dataset acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_dataset")]
    pub dataset: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Reporting thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directional accuracy (percent) the project aims to beat
    #[serde(default = "default_target_accuracy")]
    pub target_accuracy: f64,
}

// Default value functions
fn default_raw_file() -> PathBuf { PathBuf::from("data/raw/silver_prices_data.csv") }
fn default_forecast_file() -> PathBuf { PathBuf::from("data/raw/silver_price_forecast_2026.csv") }
fn default_features_file() -> PathBuf { PathBuf::from("data/processed/silver_features.csv") }
fn default_train_pct() -> f64 { 0.70 }
fn default_val_pct() -> f64 { 0.15 }
fn default_dataset() -> String { "muhammadaammartufail/silver-prices-10-year-data-and-2026-forecast".to_string() }
fn default_output_dir() -> PathBuf { PathBuf::from("data/raw") }
fn default_target_accuracy() -> f64 { 60.0 }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            raw_file: default_raw_file(),
            forecast_file: default_forecast_file(),
            features_file: default_features_file(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_pct: default_train_pct(),
            val_pct: default_val_pct(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            target_accuracy: default_target_accuracy(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: PipelineConfig = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let SplitConfig { train_pct, val_pct } = self.split;

        if !(0.0..=1.0).contains(&train_pct) {
            return Err(Error::Config(format!("train_pct must be in [0, 1], got {}", train_pct)));
        }
        if !(0.0..=1.0).contains(&val_pct) {
            return Err(Error::Config(format!("val_pct must be in [0, 1], got {}", val_pct)));
        }
        if train_pct + val_pct > 1.0 {
            return Err(Error::Config(format!(
                "train_pct + val_pct must not exceed 1, got {}",
                train_pct + val_pct
            )));
        }
        if self.download.dataset.trim().is_empty() {
            return Err(Error::Config("download.dataset must not be empty".to_string()));
        }
        if !(0.0..=100.0).contains(&self.report.target_accuracy) {
            return Err(Error::Config(format!(
                "target_accuracy must be a percentage, got {}",
                self.report.target_accuracy
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.split.train_pct, 0.70);
        assert_eq!(config.split.val_pct, 0.15);
        assert_eq!(config.data.raw_file, PathBuf::from("data/raw/silver_prices_data.csv"));
        assert_eq!(config.report.target_accuracy, 60.0);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[split]").unwrap();
        writeln!(file, "train_pct = 0.6").unwrap();
        writeln!(file, "[data]").unwrap();
        writeln!(file, "raw_file = \"prices.csv\"").unwrap();

        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.split.train_pct, 0.6);
        assert_eq!(config.split.val_pct, 0.15);
        assert_eq!(config.data.raw_file, PathBuf::from("prices.csv"));
        assert_eq!(config.data.features_file, PathBuf::from("data/processed/silver_features.csv"));
    }

    #[test]
    fn test_validation() {
        let mut config = PipelineConfig::default();

        config.split.train_pct = 0.9;
        config.split.val_pct = 0.2;
        assert!(config.validate().is_err());

        config.split.train_pct = -0.1;
        config.split.val_pct = 0.1;
        assert!(config.validate().is_err());

        config.split.train_pct = 0.8;
        assert!(config.validate().is_ok());

        config.download.dataset = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_without_path() {
        let config = PipelineConfig::load(None).unwrap();
        assert_eq!(config.download.output_dir, PathBuf::from("data/raw"));
    }

    #[test]
    fn test_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[split").unwrap();
        assert!(matches!(
            PipelineConfig::from_file(file.path()),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            PipelineConfig::from_file("/nonexistent/pipeline.toml"),
            Err(Error::Io { .. })
        ));
    }
}
