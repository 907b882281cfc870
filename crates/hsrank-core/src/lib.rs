pub mod app_config;
pub mod config;
pub mod keys;
pub mod numbers;
pub mod platform;
pub mod titles;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use keys::entry_key;
pub use numbers::{format_count, format_revenue, parse_count};
pub use platform::{split_platform, Channel, PlatformSplit};
pub use titles::{latest_dated_title, parse_dated_title, unique_title, yesterday_title_kst};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
