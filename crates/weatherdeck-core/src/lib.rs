pub mod config;
pub mod error;

pub use config::{Config, StorageConfig, UiConfig, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError};

use anyhow::Result;

/// Initialize logging for the dashboard.
///
/// Output goes to stderr so it never interleaves with the rendered dashboard.
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("WeatherDeck core initialized");
    Ok(())
}
