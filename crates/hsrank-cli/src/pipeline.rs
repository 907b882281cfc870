//! The daily pipeline, stage by stage.
//!
//! One WebDriver session per run, acquired first and released on every exit
//! path. Stages run strictly sequentially; the cosmetic stages (formatting,
//! tab reorder) are best-effort and never abort the run.

use anyhow::Context;

use hsrank_core::{
    latest_dated_title, parse_dated_title, unique_title, yesterday_title_kst, AppConfig,
};
use hsrank_report::{augment_table, build_report, new_entries, parse_snapshot, SnapshotRow};
use hsrank_scraper::{build_driver, fetch_ranking, login_with_retries, RANKING_HEADER};
use hsrank_sheets::format::snapshot_format_requests;
use hsrank_sheets::SheetsClient;

/// Full pipeline: login → scrape → upload → snapshot → augment → format →
/// aggregate → report → reorder.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let driver = build_driver(config)
        .await
        .context("acquiring browser session")?;

    let outcome = run_stages(&driver, config).await;

    // Guaranteed release, success or failure.
    if let Err(e) = driver.quit().await {
        tracing::warn!(error = %e, "browser session release failed");
    }
    outcome
}

/// Standalone login probe for schedulers: exercises only the login stage.
pub async fn login_check(config: &AppConfig) -> anyhow::Result<()> {
    let driver = build_driver(config)
        .await
        .context("acquiring browser session")?;

    let outcome = login_with_retries(&driver, config)
        .await
        .context("login check");

    if let Err(e) = driver.quit().await {
        tracing::warn!(error = %e, "browser session release failed");
    }
    outcome.map(|()| tracing::info!("login check passed"))
}

async fn run_stages(driver: &hsrank_scraper::WebDriver, config: &AppConfig) -> anyhow::Result<()> {
    login_with_retries(driver, config)
        .await
        .context("logging into ranking site")?;

    let rows = fetch_ranking(driver, config)
        .await
        .context("scraping ranking table")?;
    anyhow::ensure!(!rows.is_empty(), "ranking table yielded no rows");

    let sheets = SheetsClient::connect(config)
        .await
        .context("authenticating to spreadsheet backend")?;

    upload_primary(&sheets, config, &rows).await?;
    let (snapshot_title, augmented) = create_snapshot(&sheets, config).await?;
    write_report(&sheets, config, &snapshot_title, &augmented).await?;

    // Cosmetic: report tab first, then the fresh snapshot.
    if let Err(e) = sheets
        .move_to_front(&[config.report_sheet_title.as_str(), snapshot_title.as_str()])
        .await
    {
        tracing::warn!(error = %e, "tab reorder failed (ignored)");
    }

    tracing::info!("pipeline complete");
    Ok(())
}

/// Clear-then-write the scraped table into the live working tab.
async fn upload_primary(
    sheets: &SheetsClient,
    config: &AppConfig,
    rows: &[hsrank_scraper::RankingRow],
) -> anyhow::Result<()> {
    let main = &config.main_sheet_title;
    let mut table: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    table.push(RANKING_HEADER.iter().map(|h| (*h).to_owned()).collect());
    table.extend(rows.iter().map(hsrank_scraper::RankingRow::to_cells));

    sheets
        .ensure_sheet(main, 2, 8)
        .await
        .context("ensuring working tab")?;
    sheets.clear_values(main).await.context("clearing working tab")?;
    sheets
        .update_values(main, &table)
        .await
        .context("uploading ranking table")?;
    tracing::info!(rows = table.len(), tab = %main, "primary upload complete");
    Ok(())
}

/// Create the dated snapshot tab under a collision-free title and write the
/// augmented copy of the working tab into it.
async fn create_snapshot(
    sheets: &SheetsClient,
    config: &AppConfig,
) -> anyhow::Result<(String, Vec<Vec<String>>)> {
    let existing: Vec<String> = sheets
        .list_sheets()
        .await
        .context("listing tabs")?
        .into_iter()
        .map(|s| s.title)
        .collect();

    let base = yesterday_title_kst(chrono::Utc::now());
    let title = unique_title(&existing, &base);

    let source = sheets
        .get_values(&config.main_sheet_title)
        .await
        .context("reading working tab")?;
    let augmented = augment_table(&source);

    #[allow(clippy::cast_possible_truncation)]
    let rows_cnt = augmented.len().max(2) as u32;
    #[allow(clippy::cast_possible_truncation)]
    let cols_cnt = augmented
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(2)
        .max(2) as u32;

    let sheet_id = sheets
        .add_sheet(&title, rows_cnt, cols_cnt)
        .await
        .context("creating dated snapshot tab")?;
    sheets
        .update_values(&title, &augmented)
        .await
        .context("writing augmented snapshot")?;
    tracing::info!(tab = %title, rows = augmented.len(), "dated snapshot written");

    if let Err(e) = sheets.batch_update(snapshot_format_requests(sheet_id)).await {
        tracing::warn!(error = %e, "snapshot formatting failed (ignored)");
    }

    Ok((title, augmented))
}

/// Aggregate the latest dated snapshot, detect new entries against all other
/// dated tabs, and upsert the combined block into the fixed report tab.
async fn write_report(
    sheets: &SheetsClient,
    config: &AppConfig,
    snapshot_title: &str,
    snapshot_values: &[Vec<String>],
) -> anyhow::Result<()> {
    let all_titles: Vec<String> = sheets
        .list_sheets()
        .await
        .context("listing tabs for report")?
        .into_iter()
        .map(|s| s.title)
        .collect();

    // The report always reads the most-recently-dated tab, never the live
    // working tab. Normally that is the snapshot just written; a manually
    // created later-dated tab would win instead.
    let latest = latest_dated_title(&all_titles)
        .unwrap_or(snapshot_title)
        .to_owned();
    let latest_rows: Vec<SnapshotRow> = if latest == snapshot_title {
        parse_snapshot(&latest, snapshot_values)?
    } else {
        let values = sheets
            .get_values(&latest)
            .await
            .with_context(|| format!("reading latest dated tab '{latest}'"))?;
        parse_snapshot(&latest, &values)?
    };

    let history_titles: Vec<&String> = all_titles
        .iter()
        .filter(|t| parse_dated_title(t).is_some() && **t != latest)
        .collect();

    let fresh = if history_titles.is_empty() {
        tracing::info!("no historical dated tabs, skipping novelty comparison");
        None
    } else {
        let mut history_rows = Vec::new();
        for title in &history_titles {
            let values = sheets
                .get_values(title)
                .await
                .with_context(|| format!("reading historical tab '{title}'"))?;
            if values.len() < 2 {
                tracing::warn!(tab = %title, "historical tab has no data rows, skipped");
                continue;
            }
            history_rows.extend(parse_snapshot(title, &values)?);
        }
        Some(new_entries(&latest_rows, &history_rows))
    };

    let grid = build_report(&latest_rows, &latest, fresh.as_deref());

    let report = &config.report_sheet_title;
    sheets
        .ensure_sheet(report, 2, 4)
        .await
        .context("ensuring report tab")?;
    sheets
        .clear_values(report)
        .await
        .context("clearing report tab")?;
    sheets
        .update_values(report, &grid)
        .await
        .context("writing report")?;
    tracing::info!(
        tab = %report,
        reference = %latest,
        new_entries = fresh.as_ref().map_or(0, Vec::len),
        "insight report written"
    );
    Ok(())
}
