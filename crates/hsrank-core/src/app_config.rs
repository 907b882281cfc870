use std::path::PathBuf;

/// Runtime configuration for a pipeline run.
///
/// Built from environment variables by [`crate::config::load_app_config`];
/// passed explicitly through the pipeline instead of living in globals.
#[derive(Clone)]
pub struct AppConfig {
    /// Login email for the ranking site.
    pub ecomm_email: String,
    /// Login password for the ranking site.
    pub ecomm_password: String,
    /// Base64-encoded Google service-account JSON blob.
    pub service_account_b64: String,
    /// Target spreadsheet ID.
    pub spreadsheet_id: String,
    /// WebDriver endpoint, e.g. a local chromedriver.
    pub webdriver_url: String,
    /// Ranking-site origin; the login flow starts here.
    pub site_base_url: String,
    /// Ranking listing URL (fixed period, empty category/date filters).
    pub ranking_url: String,
    /// Bounded wait for expected UI elements, in seconds.
    pub element_wait_secs: u64,
    /// Total login attempts (first try plus retries).
    pub login_max_attempts: u32,
    /// Base back-off between login attempts, in milliseconds.
    pub login_backoff_base_ms: u64,
    /// Where login-failure screenshots and page snapshots land.
    pub artifact_dir: PathBuf,
    /// Title of the live working tab.
    pub main_sheet_title: String,
    /// Title of the fixed insight-report tab.
    pub report_sheet_title: String,
    /// HTTP timeout for Sheets API requests, in seconds.
    pub request_timeout_secs: u64,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("ecomm_email", &self.ecomm_email)
            .field("ecomm_password", &"[redacted]")
            .field("service_account_b64", &"[redacted]")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("webdriver_url", &self.webdriver_url)
            .field("site_base_url", &self.site_base_url)
            .field("ranking_url", &self.ranking_url)
            .field("element_wait_secs", &self.element_wait_secs)
            .field("login_max_attempts", &self.login_max_attempts)
            .field("login_backoff_base_ms", &self.login_backoff_base_ms)
            .field("artifact_dir", &self.artifact_dir)
            .field("main_sheet_title", &self.main_sheet_title)
            .field("report_sheet_title", &self.report_sheet_title)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
