//! Snapshot augmentation: derive company and channel columns.
//!
//! The dated snapshot starts as a verbatim copy of the working tab. This pass
//! strips the platform suffix off every broadcast cell and appends the
//! company name and Live/TC classification as two new columns: the table
//! both the aggregator and human readers consume.

use hsrank_core::split_platform;

/// Column index of the broadcast-info cell.
const BROADCAST_COL: usize = 1;

/// Header labels of the two derived columns.
pub const DERIVED_COLUMNS: [&str; 2] = ["회사명", "홈쇼핑구분"];

/// Returns the augmented table: header gains the derived column labels, each
/// data row is padded to header width, its broadcast cell is cleaned, and the
/// derived company/channel cells are appended.
///
/// An empty input comes back empty; the caller decides whether that is fatal.
#[must_use]
pub fn augment_table(values: &[Vec<String>]) -> Vec<Vec<String>> {
    let Some((header, data_rows)) = values.split_first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(values.len());
    let mut augmented_header = header.clone();
    augmented_header.extend(DERIVED_COLUMNS.iter().map(|c| (*c).to_owned()));
    out.push(augmented_header);

    for row in data_rows {
        let mut padded = row.clone();
        // Pad short rows to header width; never shorten long ones.
        if padded.len() < header.len() {
            padded.resize(header.len(), String::new());
        }

        // A grid narrower than the broadcast column still augments, with
        // empty derived cells.
        match padded.get(BROADCAST_COL) {
            Some(broadcast) => {
                let split = split_platform(broadcast.trim());
                padded[BROADCAST_COL] = split.cleaned;
                padded.push(split.company);
                padded.push(split.channel.map(|c| c.to_string()).unwrap_or_default());
            }
            None => {
                padded.push(String::new());
                padded.push(String::new());
            }
        }
        out.push(padded);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_owned()).collect()
    }

    fn base_table() -> Vec<Vec<String>> {
        vec![
            row(&["랭킹", "방송정보", "분류", "방송시간", "시청률", "판매량", "매출액", "상품수"]),
            row(&["1", "프리미엄 안마의자 GS홈쇼핑 마이샵", "가전", "20:40", "0.8", "1,234", "3억500만", "5"]),
            row(&["2", "한우 선물세트 현대홈쇼핑", "식품", "21:00", "1.1", "2,000", "1억", "3"]),
        ]
    }

    #[test]
    fn header_gains_derived_columns() {
        let augmented = augment_table(&base_table());
        assert_eq!(augmented[0].len(), 10);
        assert_eq!(augmented[0][8], "회사명");
        assert_eq!(augmented[0][9], "홈쇼핑구분");
    }

    #[test]
    fn broadcast_cell_is_cleaned_and_columns_appended() {
        let augmented = augment_table(&base_table());
        assert_eq!(augmented[1][1], "프리미엄 안마의자");
        assert_eq!(augmented[1][8], "GS홈쇼핑 마이샵");
        assert_eq!(augmented[1][9], "TC");
        assert_eq!(augmented[2][8], "현대홈쇼핑");
        assert_eq!(augmented[2][9], "Live");
    }

    #[test]
    fn short_rows_are_padded_to_header_width() {
        let mut table = base_table();
        table.push(row(&["3", "채널 없는 방송"]));
        let augmented = augment_table(&table);
        let last = augmented.last().unwrap();
        assert_eq!(last.len(), 10);
        assert_eq!(last[1], "채널 없는 방송");
        assert_eq!(last[8], "");
        assert_eq!(last[9], "");
    }

    #[test]
    fn long_rows_keep_their_extra_cells() {
        let table = vec![row(&["랭킹", "방송정보"]), row(&["1", "상품 GS홈쇼핑", "잉여"])];
        let augmented = augment_table(&table);
        assert_eq!(augmented[1], row(&["1", "상품", "잉여", "GS홈쇼핑", "TC"]));
    }

    #[test]
    fn header_without_broadcast_column_does_not_panic() {
        let table = vec![row(&["랭킹"]), row(&["1"])];
        let augmented = augment_table(&table);
        assert_eq!(augmented[0], row(&["랭킹", "회사명", "홈쇼핑구분"]));
        assert_eq!(augmented[1], row(&["1", "", ""]));
    }

    #[test]
    fn empty_table_stays_empty() {
        assert!(augment_table(&[]).is_empty());
    }
}
