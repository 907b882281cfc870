//! Best-effort debug artifacts: screenshot plus page-source snapshot.
//!
//! Artifact failures are logged and swallowed; a broken disk must never
//! mask the login error that triggered the capture.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use thirtyfour::prelude::*;

/// Writes `<timestamp>_<tag>.png` and `<timestamp>_<tag>.html` into `dir`.
pub async fn save_debug(driver: &WebDriver, dir: &Path, tag: &str) {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    if let Err(e) = std::fs::create_dir_all(dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "artifact dir creation failed");
        return;
    }

    let png = dir.join(format!("{ts}_{tag}.png"));
    let html = dir.join(format!("{ts}_{tag}.html"));

    match driver.screenshot_as_png().await {
        Ok(bytes) => {
            if let Err(e) = std::fs::write(&png, bytes) {
                tracing::warn!(path = %png.display(), error = %e, "screenshot write failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "screenshot capture failed"),
    }

    match driver.source().await {
        Ok(source) => {
            if let Err(e) = std::fs::write(&html, source) {
                tracing::warn!(path = %html.display(), error = %e, "page-source write failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "page-source capture failed"),
    }

    tracing::info!(png = %png.display(), html = %html.display(), "debug artifacts saved");
}
