//! Cosmetic formatting requests for the dated snapshot tab.
//!
//! Builders are pure so the request shapes can be asserted in tests; the
//! pipeline sends them in one `batchUpdate` and treats any failure as
//! non-fatal.

use serde_json::{json, Value};

/// Rows covered by the snapshot formatting grid (header + TOP 100).
const GRID_ROWS: u32 = 101;
/// Columns covered (A through J: eight scraped + two derived).
const GRID_COLS: u32 = 10;

/// The full formatting batch for a snapshot tab:
/// solid borders over the grid, centered grey header, centered rank column,
/// centered C–J block, left-aligned broadcast column, 650 px broadcast
/// column, 120 px company column.
#[must_use]
pub fn snapshot_format_requests(sheet_id: i64) -> Vec<Value> {
    vec![
        borders_request(sheet_id),
        header_style_request(sheet_id),
        center_request(sheet_id, 1, GRID_ROWS, 0, 1),
        center_request(sheet_id, 0, GRID_ROWS, 2, GRID_COLS),
        left_align_request(sheet_id),
        column_width_request(sheet_id, 1, 2, 650),
        column_width_request(sheet_id, 8, 9, 120),
    ]
}

fn grid_range(sheet_id: i64, rows: (u32, u32), cols: (u32, u32)) -> Value {
    json!({
        "sheetId": sheet_id,
        "startRowIndex": rows.0,
        "endRowIndex": rows.1,
        "startColumnIndex": cols.0,
        "endColumnIndex": cols.1,
    })
}

fn borders_request(sheet_id: i64) -> Value {
    let solid = json!({ "style": "SOLID" });
    json!({
        "updateBorders": {
            "range": grid_range(sheet_id, (0, GRID_ROWS), (0, GRID_COLS)),
            "top": solid,
            "bottom": solid,
            "left": solid,
            "right": solid,
            "innerHorizontal": solid,
            "innerVertical": solid,
        }
    })
}

fn header_style_request(sheet_id: i64) -> Value {
    json!({
        "repeatCell": {
            "range": grid_range(sheet_id, (0, 1), (0, GRID_COLS)),
            "cell": {
                "userEnteredFormat": {
                    "horizontalAlignment": "CENTER",
                    "backgroundColor": { "red": 0.8, "green": 0.8, "blue": 0.8 }
                }
            },
            "fields": "userEnteredFormat(horizontalAlignment,backgroundColor)"
        }
    })
}

fn center_request(sheet_id: i64, row_start: u32, row_end: u32, col_start: u32, col_end: u32) -> Value {
    json!({
        "repeatCell": {
            "range": grid_range(sheet_id, (row_start, row_end), (col_start, col_end)),
            "cell": { "userEnteredFormat": { "horizontalAlignment": "CENTER" } },
            "fields": "userEnteredFormat.horizontalAlignment"
        }
    })
}

fn left_align_request(sheet_id: i64) -> Value {
    json!({
        "repeatCell": {
            "range": grid_range(sheet_id, (1, GRID_ROWS), (1, 2)),
            "cell": { "userEnteredFormat": { "horizontalAlignment": "LEFT" } },
            "fields": "userEnteredFormat.horizontalAlignment"
        }
    })
}

fn column_width_request(sheet_id: i64, start: u32, end: u32, pixels: u32) -> Value {
    json!({
        "updateDimensionProperties": {
            "range": {
                "sheetId": sheet_id,
                "dimension": "COLUMNS",
                "startIndex": start,
                "endIndex": end,
            },
            "properties": { "pixelSize": pixels },
            "fields": "pixelSize"
        }
    })
}
