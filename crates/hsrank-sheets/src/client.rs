//! HTTP client for the Google Sheets v4 REST API.
//!
//! Wraps `reqwest` with bearer-token auth, A1-range encoding, API-error
//! surfacing, and typed deserialization with context. Use
//! [`SheetsClient::connect`] for production or
//! [`SheetsClient::with_static_token`] to point at a mock server in tests.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde_json::{json, Value};

use hsrank_core::AppConfig;

use crate::auth::{decode_service_account, fetch_access_token};
use crate::error::SheetsError;
use crate::types::{cell_to_string, SheetProperties, SpreadsheetMeta, ValueRange};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Client bound to a single spreadsheet.
pub struct SheetsClient {
    http: Client,
    base_url: Url,
    token: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    /// Authenticates with the configured service account and binds to the
    /// configured spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Credentials`] for a bad credential blob,
    /// [`SheetsError::Jwt`]/[`SheetsError::Api`] when token exchange fails,
    /// or [`SheetsError::Http`] on transport failure.
    pub async fn connect(config: &AppConfig) -> Result<Self, SheetsError> {
        let http = build_http(config.request_timeout_secs)?;
        let key = decode_service_account(&config.service_account_b64)?;
        let token = fetch_access_token(&http, &key, None).await?;
        Self::assemble(http, DEFAULT_BASE_URL, token, &config.spreadsheet_id)
    }

    /// Builds a client with a pre-issued token and custom base URL, for tests
    /// against a wiremock server.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::InvalidUrl`] for an unparseable base URL or
    /// [`SheetsError::Http`] if the HTTP client cannot be constructed.
    pub fn with_static_token(
        base_url: &str,
        token: &str,
        spreadsheet_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, SheetsError> {
        let http = build_http(timeout_secs)?;
        Self::assemble(http, base_url, token.to_owned(), spreadsheet_id)
    }

    fn assemble(
        http: Client,
        base_url: &str,
        token: String,
        spreadsheet_id: &str,
    ) -> Result<Self, SheetsError> {
        // Exactly one trailing slash so joins append instead of replacing the
        // last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            http,
            base_url,
            token,
            spreadsheet_id: spreadsheet_id.to_owned(),
        })
    }

    /// Lists all tab properties of the bound spreadsheet.
    ///
    /// # Errors
    ///
    /// [`SheetsError::Api`] on API errors, [`SheetsError::Http`] on transport
    /// failure, [`SheetsError::Deserialize`] on unexpected shapes.
    pub async fn list_sheets(&self) -> Result<Vec<SheetProperties>, SheetsError> {
        let url = self.url(&format!(
            "v4/spreadsheets/{}?fields=sheets.properties",
            self.spreadsheet_id
        ))?;
        let body = self.get_json(url).await?;
        let meta: SpreadsheetMeta =
            serde_json::from_value(body).map_err(|e| SheetsError::Deserialize {
                context: "spreadsheet metadata".to_owned(),
                source: e,
            })?;
        Ok(meta.sheets.into_iter().map(|s| s.properties).collect())
    }

    /// Returns the numeric sheet ID for `title`, if such a tab exists.
    ///
    /// # Errors
    ///
    /// Same as [`SheetsClient::list_sheets`].
    pub async fn sheet_id(&self, title: &str) -> Result<Option<i64>, SheetsError> {
        Ok(self
            .list_sheets()
            .await?
            .into_iter()
            .find(|s| s.title == title)
            .map(|s| s.sheet_id))
    }

    /// Creates a tab with the given grid size and returns its sheet ID.
    ///
    /// # Errors
    ///
    /// [`SheetsError::Api`] when the title collides or the request is
    /// rejected, plus the usual transport/deserialize errors.
    pub async fn add_sheet(&self, title: &str, rows: u32, cols: u32) -> Result<i64, SheetsError> {
        let body = self
            .batch_update(vec![json!({
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": { "rowCount": rows, "columnCount": cols }
                    }
                }
            })])
            .await?;
        body.pointer("/replies/0/addSheet/properties/sheetId")
            .and_then(Value::as_i64)
            .ok_or_else(|| SheetsError::Api {
                status: 200,
                message: format!("addSheet reply for '{title}' missing sheetId"),
            })
    }

    /// Returns the sheet ID for `title`, creating the tab when absent.
    ///
    /// # Errors
    ///
    /// Same as [`SheetsClient::add_sheet`].
    pub async fn ensure_sheet(
        &self,
        title: &str,
        rows: u32,
        cols: u32,
    ) -> Result<i64, SheetsError> {
        if let Some(id) = self.sheet_id(title).await? {
            tracing::info!(title, sheet_id = id, "tab already exists");
            return Ok(id);
        }
        let id = self.add_sheet(title, rows, cols).await?;
        tracing::info!(title, sheet_id = id, "tab created");
        Ok(id)
    }

    /// Clears every cell of the named tab.
    ///
    /// # Errors
    ///
    /// [`SheetsError::Api`]/[`SheetsError::Http`] on failure.
    pub async fn clear_values(&self, title: &str) -> Result<(), SheetsError> {
        let url = self.url(&format!(
            "v4/spreadsheets/{}/values/{}:clear",
            self.spreadsheet_id,
            encode_range(&quoted_range(title, None)),
        ))?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({}))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Writes a rectangular block anchored at `A1` of the named tab.
    ///
    /// Values are written RAW (no spreadsheet-side parsing), matching the
    /// clear-then-write overwrite contract: callers clear first so stale
    /// cells from a differently-sized previous run cannot survive.
    ///
    /// # Errors
    ///
    /// [`SheetsError::Api`]/[`SheetsError::Http`] on failure.
    pub async fn update_values(
        &self,
        title: &str,
        values: &[Vec<String>],
    ) -> Result<(), SheetsError> {
        let range = quoted_range(title, Some("A1"));
        let url = self.url(&format!(
            "v4/spreadsheets/{}/values/{}?valueInputOption=RAW",
            self.spreadsheet_id,
            encode_range(&range),
        ))?;
        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": values,
            }))
            .send()
            .await?;
        Self::check_status(response).await?;
        tracing::info!(title, rows = values.len(), "values written");
        Ok(())
    }

    /// Reads the full used range of the named tab as strings.
    ///
    /// # Errors
    ///
    /// [`SheetsError::Api`]/[`SheetsError::Http`]/[`SheetsError::Deserialize`]
    /// on failure.
    pub async fn get_values(&self, title: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.url(&format!(
            "v4/spreadsheets/{}/values/{}",
            self.spreadsheet_id,
            encode_range(&quoted_range(title, None)),
        ))?;
        let body = self.get_json(url).await?;
        let range: ValueRange =
            serde_json::from_value(body).map_err(|e| SheetsError::Deserialize {
                context: format!("values of '{title}'"),
                source: e,
            })?;
        Ok(range
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    /// Sends a raw `batchUpdate` with the given request objects.
    ///
    /// # Errors
    ///
    /// [`SheetsError::Api`]/[`SheetsError::Http`] on failure.
    pub async fn batch_update(&self, requests: Vec<Value>) -> Result<Value, SheetsError> {
        let url = self.url(&format!(
            "v4/spreadsheets/{}:batchUpdate",
            self.spreadsheet_id
        ))?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({ "requests": requests }))
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Moves the given tabs to the front, in order, leaving the rest as-is.
    ///
    /// Unknown titles are skipped with a warning so a missing tab cannot
    /// break the cosmetic reorder step.
    ///
    /// # Errors
    ///
    /// [`SheetsError::Api`]/[`SheetsError::Http`] on failure.
    pub async fn move_to_front(&self, titles: &[&str]) -> Result<(), SheetsError> {
        let sheets = self.list_sheets().await?;
        let mut requests = Vec::new();
        let mut index = 0i64;
        for title in titles {
            match sheets.iter().find(|s| s.title == *title) {
                Some(sheet) => {
                    requests.push(json!({
                        "updateSheetProperties": {
                            "properties": { "sheetId": sheet.sheet_id, "index": index },
                            "fields": "index"
                        }
                    }));
                    index += 1;
                }
                None => tracing::warn!(title = *title, "tab not found during reorder, skipped"),
            }
        }
        if requests.is_empty() {
            return Ok(());
        }
        self.batch_update(requests).await?;
        tracing::info!(front = ?titles, "tab order updated");
        Ok(())
    }

    fn url(&self, path_and_query: &str) -> Result<Url, SheetsError> {
        self.base_url
            .join(path_and_query)
            .map_err(|e| SheetsError::InvalidUrl {
                url: path_and_query.to_owned(),
                reason: e.to_string(),
            })
    }

    async fn get_json(&self, url: Url) -> Result<Value, SheetsError> {
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        Self::check_status(response).await
    }

    /// Surfaces non-2xx responses as [`SheetsError::Api`] with the API's own
    /// error message when the body carries one.
    async fn check_status(response: reqwest::Response) -> Result<Value, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(SheetsError::from);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or(body);
        Err(SheetsError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn build_http(timeout_secs: u64) -> Result<Client, SheetsError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent("hsrank/0.1 (ranking-report)")
        .build()
        .map_err(SheetsError::from)
}

/// Builds an A1 range for a whole tab or an anchored cell, quoting the tab
/// title (and doubling embedded quotes) so Korean and punctuated titles are
/// always valid.
fn quoted_range(title: &str, anchor: Option<&str>) -> String {
    let escaped = title.replace('\'', "''");
    match anchor {
        Some(cell) => format!("'{escaped}'!{cell}"),
        None => format!("'{escaped}'"),
    }
}

/// Percent-encodes an A1 range for use as a URL path segment.
fn encode_range(range: &str) -> String {
    utf8_percent_encode(range, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_range_wraps_and_escapes_titles() {
        assert_eq!(quoted_range("9/10", None), "'9/10'");
        assert_eq!(quoted_range("홈쇼핑TOP100", Some("A1")), "'홈쇼핑TOP100'!A1");
        assert_eq!(quoted_range("it's", None), "'it''s'");
    }

    #[test]
    fn encode_range_escapes_path_unsafe_characters() {
        let encoded = encode_range("'9/10'!A1");
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('!'));
        assert!(!encoded.contains('\''));
    }
}
