//! Typed fragments of Sheets API responses.
//!
//! Only the fields this pipeline reads are modeled; everything else in the
//! responses is ignored by serde.

use serde::Deserialize;

/// Properties of one tab, as returned under `sheets[].properties`.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetProperties {
    #[serde(rename = "sheetId")]
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: i64,
}

/// `GET /v4/spreadsheets/{id}?fields=sheets.properties` response.
#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetEntry {
    pub properties: SheetProperties,
}

/// `GET /v4/spreadsheets/{id}/values/{range}` response.
///
/// Cells arrive as JSON scalars; formatted values are strings, but unformatted
/// numbers can appear, so cells are kept as raw values and stringified by the
/// client.
#[derive(Debug, Deserialize)]
pub(crate) struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Stringifies one cell value the way the spreadsheet UI would show it.
pub(crate) fn cell_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
