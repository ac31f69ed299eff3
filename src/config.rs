//! Configuration

use std::path::PathBuf;

use clap::{Args, ValueEnum};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single line output.
    Compact,

    /// Structured JSON output.
    Json,
}

/// Logging output settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storage and catalog locations.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// Directory holding the persisted cart and wishlist
    #[arg(long, env = "GROOSO_DATA_DIR", default_value = ".grooso")]
    pub data_dir: PathBuf,

    /// Product catalog YAML file
    #[arg(long, env = "GROOSO_CATALOG", default_value = "fixtures/catalog/demo.yml")]
    pub catalog: PathBuf,
}

/// Grooso configuration, read from flags with environment fallbacks.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Storage and catalog settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
