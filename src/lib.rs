//! Silver-price forecasting pipeline.
//!
//! The stages run as separate binaries in this workspace, all sharing the
//! library below:
//!
//! - `core::io` - CSV loading of raw price records and file output helpers
//! - `features` - technical-indicator feature table and its CSV form
//! - `models::baseline` - chronological split and naive baseline scoring
//! - `eda` - descriptive statistics over the raw price history
//! - `inspect` - column-level quality report for arbitrary CSV tables
//! - `download` - dataset acquisition through the Kaggle CLI
//! - `config` - TOML pipeline configuration
//! - `logging` - tracing subscriber setup

pub mod config;
pub mod core;
pub mod download;
pub mod eda;
pub mod error;
pub mod features;
pub mod inspect;
pub mod logging;
pub mod models;

pub use config::PipelineConfig;
pub use crate::core::io::{load_price_records, PriceRecord};
pub use error::{Error, Result};
pub use features::{build_features, read_features, write_features, FeatureRow, FeatureTable, Target};
pub use models::baseline::{
    moving_average_crossover, naive_persistence, split_chronological, Accuracy, DataSplit,
};
