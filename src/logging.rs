use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub with_target: bool,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            with_target: std::env::var("LOG_TARGET")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Override the level when the binary was asked for verbose output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.log_level = "debug".to_string();
        }
        self
    }
}

/// Install a console subscriber writing to stderr, so diagnostics never mix
/// with the report printed on stdout.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(config.with_target)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_override() {
        let config = LoggingConfig {
            log_level: "warn".to_string(),
            with_target: false,
        };
        assert_eq!(config.clone().verbose(false).log_level, "warn");
        assert_eq!(config.verbose(true).log_level, "debug");
    }
}
