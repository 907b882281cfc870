use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let ecomm_email = require("ECOMM_EMAIL")?;
    let ecomm_password = require("ECOMM_PASSWORD")?;
    let service_account_b64 = require("KEY1")?;
    let spreadsheet_id = require("HSRANK_SPREADSHEET_ID")?;

    let webdriver_url = or_default("HSRANK_WEBDRIVER_URL", "http://localhost:9515");
    let site_base_url = or_default("HSRANK_SITE_URL", "https://live.ecomm-data.com");
    let ranking_url = or_default(
        "HSRANK_RANKING_URL",
        "https://live.ecomm-data.com/ranking?period=1&cid=&date=",
    );

    let element_wait_secs = parse_u64("HSRANK_ELEMENT_WAIT_SECS", "5")?;
    let login_max_attempts = parse_u32("HSRANK_LOGIN_MAX_ATTEMPTS", "3")?;
    let login_backoff_base_ms = parse_u64("HSRANK_LOGIN_BACKOFF_BASE_MS", "1000")?;
    let artifact_dir = PathBuf::from(or_default("HSRANK_ARTIFACT_DIR", "artifacts"));

    let main_sheet_title = or_default("HSRANK_MAIN_SHEET", "홈쇼핑TOP100");
    let report_sheet_title = or_default("HSRANK_REPORT_SHEET", "INS_전일");

    let request_timeout_secs = parse_u64("HSRANK_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("HSRANK_LOG_LEVEL", "info");

    Ok(AppConfig {
        ecomm_email,
        ecomm_password,
        service_account_b64,
        spreadsheet_id,
        webdriver_url,
        site_base_url,
        ranking_url,
        element_wait_secs,
        login_max_attempts,
        login_backoff_base_ms,
        artifact_dir,
        main_sheet_title,
        report_sheet_title,
        request_timeout_secs,
        log_level,
    })
}
