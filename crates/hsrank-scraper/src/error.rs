use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("timed out after {waited_secs}s waiting for {what}")]
    Timeout { what: String, waited_secs: u64 },

    #[error("no visible element matched {what}")]
    MissingElement { what: String },

    #[error("login rejected: credential form still visible at {url}")]
    LoginRejected { url: String },

    #[error("login failed after {attempts} attempts")]
    AttemptsExhausted {
        attempts: u32,
        #[source]
        last: Box<ScrapeError>,
    },
}

impl ScrapeError {
    /// True for failures where the page reached an unexpected state, which
    /// warrants a screenshot and page-source capture before propagating.
    /// Transport-level driver errors carry nothing worth capturing.
    #[must_use]
    pub fn is_ui_failure(&self) -> bool {
        matches!(
            self,
            ScrapeError::Timeout { .. }
                | ScrapeError::MissingElement { .. }
                | ScrapeError::LoginRejected { .. }
        )
    }
}
