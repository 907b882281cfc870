//! Typed rows parsed from an augmented dated-snapshot tab.

use hsrank_core::parse_count;

use crate::error::ReportError;

/// Expected header of an augmented snapshot (eight scraped + two derived).
pub const AUGMENTED_HEADER: [&str; 10] = [
    "랭킹",
    "방송정보",
    "분류",
    "방송시간",
    "시청률",
    "판매량",
    "매출액",
    "상품수",
    "회사명",
    "홈쇼핑구분",
];

/// One augmented snapshot row with the numeric fields already parsed.
///
/// Display strings are re-derived from the integers at report time, so the
/// sums order and render consistently regardless of how the site formatted
/// the source cells that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRow {
    pub broadcast: String,
    pub category: String,
    pub company: String,
    pub channel: String,
    /// Parsed revenue (매출액) in won.
    pub revenue: i64,
    /// Parsed sales volume (판매량) in units.
    pub volume: i64,
}

/// Parses the value grid of an augmented snapshot tab.
///
/// # Errors
///
/// Returns [`ReportError::SnapshotTooShort`] when the grid has no data rows;
/// aggregation over an empty snapshot would silently produce an empty report,
/// which is always a pipeline fault upstream.
pub fn parse_snapshot(title: &str, values: &[Vec<String>]) -> Result<Vec<SnapshotRow>, ReportError> {
    if values.len() < 2 {
        return Err(ReportError::SnapshotTooShort {
            title: title.to_owned(),
            rows: values.len(),
        });
    }

    let rows = values[1..]
        .iter()
        .map(|row| {
            let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("").trim().to_owned();
            SnapshotRow {
                broadcast: cell(1),
                category: cell(2),
                company: cell(8),
                channel: cell(9),
                volume: parse_count(&cell(5)),
                revenue: parse_count(&cell(6)),
            }
        })
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_owned()).collect()
    }

    fn augmented_table() -> Vec<Vec<String>> {
        vec![
            AUGMENTED_HEADER.iter().map(|h| (*h).to_owned()).collect(),
            row(&["1", "프리미엄 안마의자", "가전", "20:40", "0.8", "1,234", "3억500만", "5", "GS홈쇼핑", "Live"]),
            row(&["2", "한우 선물세트", "식품", "21:00", "1.1", "2,000", "1억", "3", "현대홈쇼핑", "Live"]),
        ]
    }

    #[test]
    fn parses_numeric_fields_from_localized_strings() {
        let rows = parse_snapshot("9/10", &augmented_table()).unwrap();
        assert_eq!(rows[0].revenue, 305_000_000);
        assert_eq!(rows[0].volume, 1234);
        assert_eq!(rows[1].revenue, 100_000_000);
    }

    #[test]
    fn short_rows_read_as_empty_fields_not_errors() {
        let mut table = augmented_table();
        table.push(row(&["3", "짧은 행"]));
        let rows = parse_snapshot("9/10", &table).unwrap();
        let last = rows.last().unwrap();
        assert_eq!(last.broadcast, "짧은 행");
        assert_eq!(last.company, "");
        assert_eq!(last.revenue, 0);
    }

    #[test]
    fn header_only_snapshot_is_rejected() {
        let table = vec![AUGMENTED_HEADER.iter().map(|h| (*h).to_owned()).collect()];
        let err = parse_snapshot("9/10", &table).unwrap_err();
        assert!(matches!(
            err,
            ReportError::SnapshotTooShort { ref title, rows: 1 } if title == "9/10"
        ));
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        let err = parse_snapshot("9/10", &[]).unwrap_err();
        assert!(matches!(err, ReportError::SnapshotTooShort { rows: 0, .. }));
    }
}
