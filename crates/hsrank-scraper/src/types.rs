//! Typed ranking rows as scraped from the results table.
//!
//! All eight fields are captured verbatim as strings; numeric coercion
//! happens downstream in the aggregator, never at capture time, so a layout
//! quirk on the site cannot lose a row.

/// Column headers of the ranking table, in scrape order.
pub const RANKING_HEADER: [&str; 8] = [
    "랭킹",
    "방송정보",
    "분류",
    "방송시간",
    "시청률",
    "판매량",
    "매출액",
    "상품수",
];

/// One row of the scraped TOP-100 ranking table, all fields raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub rank: String,
    pub broadcast: String,
    pub category: String,
    pub air_time: String,
    pub rating: String,
    pub units_sold: String,
    pub revenue: String,
    pub product_count: String,
}

impl RankingRow {
    /// Renders the row back into spreadsheet cells, in header order.
    #[must_use]
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.rank.clone(),
            self.broadcast.clone(),
            self.category.clone(),
            self.air_time.clone(),
            self.rating.clone(),
            self.units_sold.clone(),
            self.revenue.clone(),
            self.product_count.clone(),
        ]
    }
}

/// Maps the first eight cell texts of a table row positionally.
///
/// Rows with fewer than eight cells are layout artifacts (spacers, ad rows)
/// and yield `None`; callers skip them silently.
#[must_use]
pub fn row_from_cells(cells: &[String]) -> Option<RankingRow> {
    if cells.len() < 8 {
        return None;
    }
    Some(RankingRow {
        rank: cells[0].trim().to_owned(),
        broadcast: cells[1].trim().to_owned(),
        category: cells[2].trim().to_owned(),
        air_time: cells[3].trim().to_owned(),
        rating: cells[4].trim().to_owned(),
        units_sold: cells[5].trim().to_owned(),
        revenue: cells[6].trim().to_owned(),
        product_count: cells[7].trim().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn maps_first_eight_cells_positionally() {
        let row = row_from_cells(&cells(&[
            "1",
            " 프리미엄 안마의자 GS홈쇼핑 ",
            "가전",
            "20:40",
            "0.8",
            "1,234",
            "3억500만",
            "5",
        ]))
        .unwrap();
        assert_eq!(row.rank, "1");
        assert_eq!(row.broadcast, "프리미엄 안마의자 GS홈쇼핑");
        assert_eq!(row.revenue, "3억500만");
        assert_eq!(row.product_count, "5");
    }

    #[test]
    fn extra_cells_are_ignored() {
        let row = row_from_cells(&cells(&["1", "b", "c", "d", "e", "f", "g", "h", "i"])).unwrap();
        assert_eq!(row.product_count, "h");
    }

    #[test]
    fn short_rows_are_dropped() {
        assert_eq!(row_from_cells(&cells(&["1", "b", "c"])), None);
        assert_eq!(row_from_cells(&[]), None);
    }

    #[test]
    fn to_cells_round_trips_header_order() {
        let source = cells(&["1", "b", "c", "d", "e", "f", "g", "h"]);
        let row = row_from_cells(&source).unwrap();
        assert_eq!(row.to_cells(), source);
        assert_eq!(row.to_cells().len(), RANKING_HEADER.len());
    }
}
