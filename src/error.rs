use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the pipeline library.
///
/// Malformed individual rows are not errors: loaders skip them and log at
/// debug level. Anything here is fatal to the stage that hit it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid split fractions: {0}")]
    InvalidSplit(String),

    #[error("insufficient data: need at least {needed} rows, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Error::Csv { path: path.into(), source }
    }
}
