//! Ranking-table extraction after a confirmed login.

use std::time::{Duration, Instant};

use thirtyfour::prelude::*;

use hsrank_core::AppConfig;

use crate::artifacts::save_debug;
use crate::error::ScrapeError;
use crate::types::{row_from_cells, RankingRow};

/// Fetches the ranking page and extracts every well-formed table row.
///
/// Rows with fewer than eight cells are skipped silently (layout spacers),
/// exactly as they render on the site.
///
/// # Errors
///
/// Returns [`ScrapeError::Timeout`] when the results table never appears
/// within the bounded wait, or [`ScrapeError::WebDriver`] on driver failures.
pub async fn fetch_ranking(
    driver: &WebDriver,
    config: &AppConfig,
) -> Result<Vec<RankingRow>, ScrapeError> {
    driver.goto(&config.ranking_url).await?;
    tokio::time::sleep(Duration::from_secs(3)).await;

    let table = match wait_for_table(driver, Duration::from_secs(config.element_wait_secs)).await {
        Ok(table) => table,
        Err(e) => {
            if e.is_ui_failure() {
                save_debug(driver, &config.artifact_dir, "ranking_fail").await;
            }
            return Err(e);
        }
    };
    let tbody = table.find(By::Tag("tbody")).await?;
    let rows = tbody.find_all(By::Tag("tr")).await?;

    let mut parsed = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for row in &rows {
        let cells = row.find_all(By::Tag("td")).await?;
        let mut texts = Vec::with_capacity(cells.len());
        for cell in &cells {
            texts.push(cell.text().await?);
        }
        match row_from_cells(&texts) {
            Some(ranking_row) => parsed.push(ranking_row),
            None => skipped += 1,
        }
    }

    tracing::info!(rows = parsed.len(), skipped, "ranking table extracted");
    Ok(parsed)
}

/// Polls for the results table with a fixed sleep interval.
async fn wait_for_table(driver: &WebDriver, wait: Duration) -> Result<WebElement, ScrapeError> {
    let started = Instant::now();
    loop {
        if let Ok(table) = driver.find(By::Tag("table")).await {
            return Ok(table);
        }
        if started.elapsed() > wait {
            return Err(ScrapeError::Timeout {
                what: "ranking results table".to_owned(),
                waited_secs: wait.as_secs(),
            });
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}
