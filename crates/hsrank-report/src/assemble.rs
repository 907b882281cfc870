//! Report-block assembly for the fixed insight tab.
//!
//! The block is a single rectangular value grid: three grouped-sum sections
//! and the new-entries section, each introduced by a bracketed title row and
//! separated by a blank row. Sums are rendered with the localized display
//! formats only here; sorting upstream always uses the integers.

use hsrank_core::{format_count, format_revenue};

use crate::aggregate::{group_sum, AggregateRow};
use crate::novelty::NewEntry;
use crate::snapshot::SnapshotRow;

/// Placeholder row when no historical dated tabs exist to compare against.
pub const NO_COMPARISON: &str = "(비교 불가: 과거 날짜 시트 없음)";

/// Builds the combined report grid for `rows` of the latest snapshot.
///
/// `new_entries` is `None` when no historical dated tabs exist; the
/// new-entries section then carries the [`NO_COMPARISON`] placeholder
/// instead of attempting a comparison. `reference_title` names the snapshot
/// the report refers to, e.g. `9/10-2`.
#[must_use]
pub fn build_report(
    rows: &[SnapshotRow],
    reference_title: &str,
    new_entries: Option<&[NewEntry]>,
) -> Vec<Vec<String>> {
    let mut grid = Vec::new();

    push_aggregate_section(
        &mut grid,
        "[홈쇼핑구분별 매출]",
        "홈쇼핑구분",
        &group_sum(rows, |r| &r.channel),
    );
    push_aggregate_section(
        &mut grid,
        "[회사별 매출]",
        "회사명",
        &group_sum(rows, |r| &r.company),
    );
    push_aggregate_section(
        &mut grid,
        "[분류별 매출]",
        "분류",
        &group_sum(rows, |r| &r.category),
    );

    grid.push(vec![format!("[신규 진입 상품] (기준: {reference_title})")]);
    match new_entries {
        Some(entries) => {
            grid.push(to_row(&["방송정보", "회사명", "매출액", "판매량"]));
            for entry in entries {
                grid.push(vec![
                    entry.broadcast.clone(),
                    entry.company.clone(),
                    format_revenue(entry.revenue),
                    format_count(entry.volume),
                ]);
            }
            if entries.is_empty() {
                grid.push(vec!["(신규 진입 없음)".to_owned()]);
            }
        }
        None => grid.push(vec![NO_COMPARISON.to_owned()]),
    }

    grid
}

fn push_aggregate_section(
    grid: &mut Vec<Vec<String>>,
    title: &str,
    key_label: &str,
    aggregates: &[AggregateRow],
) {
    grid.push(vec![title.to_owned()]);
    grid.push(to_row(&[key_label, "매출액", "판매량"]));
    for agg in aggregates {
        grid.push(vec![
            agg.key.clone(),
            format_revenue(agg.revenue),
            format_count(agg.volume),
        ]);
    }
    grid.push(vec![String::new()]);
}

fn to_row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| (*c).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_row(
        broadcast: &str,
        category: &str,
        company: &str,
        channel: &str,
        revenue: i64,
        volume: i64,
    ) -> SnapshotRow {
        SnapshotRow {
            broadcast: broadcast.to_owned(),
            category: category.to_owned(),
            company: company.to_owned(),
            channel: channel.to_owned(),
            revenue,
            volume,
        }
    }

    fn sample_rows() -> Vec<SnapshotRow> {
        vec![
            snapshot_row("상품 A", "가전", "GS홈쇼핑", "Live", 250_000_000, 1000),
            snapshot_row("상품 B", "식품", "현대홈쇼핑", "Live", 100_000_000, 2000),
            snapshot_row("상품 C", "가전", "SK스토아", "TC", 50_000_000, 500),
        ]
    }

    fn title_positions(grid: &[Vec<String>]) -> Vec<(usize, String)> {
        grid.iter()
            .enumerate()
            .filter(|(_, row)| row.first().is_some_and(|c| c.starts_with('[')))
            .map(|(i, row)| (i, row[0].clone()))
            .collect()
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let rows = sample_rows();
        let grid = build_report(&rows, "9/10", Some(&[]));
        let titles: Vec<String> = title_positions(&grid).into_iter().map(|(_, t)| t).collect();
        assert_eq!(
            titles,
            vec![
                "[홈쇼핑구분별 매출]",
                "[회사별 매출]",
                "[분류별 매출]",
                "[신규 진입 상품] (기준: 9/10)",
            ]
        );
    }

    #[test]
    fn channel_section_sums_and_formats() {
        let rows = sample_rows();
        let grid = build_report(&rows, "9/10", Some(&[]));
        // Section 1: title, header, then Live (3.5억) above TC (0.5억).
        assert_eq!(grid[1], vec!["홈쇼핑구분", "매출액", "판매량"]);
        assert_eq!(grid[2], vec!["Live", "3.50억", "3,000"]);
        assert_eq!(grid[3], vec!["TC", "0.50억", "500"]);
        assert_eq!(grid[4], vec![""]);
    }

    #[test]
    fn new_entries_render_with_display_formats() {
        let rows = sample_rows();
        let entries = vec![NewEntry {
            broadcast: "상품 C".to_owned(),
            company: "SK스토아".to_owned(),
            revenue: 50_000_000,
            volume: 500,
        }];
        let grid = build_report(&rows, "9/10-2", Some(&entries));
        let last = grid.last().unwrap();
        assert_eq!(last, &vec!["상품 C", "SK스토아", "0.50억", "500"]);
    }

    #[test]
    fn zero_history_yields_placeholder_not_comparison() {
        let rows = sample_rows();
        let grid = build_report(&rows, "9/10", None);
        assert_eq!(grid.last().unwrap(), &vec![NO_COMPARISON.to_owned()]);
    }

    #[test]
    fn no_new_entries_says_so_explicitly() {
        let rows = sample_rows();
        let grid = build_report(&rows, "9/10", Some(&[]));
        assert_eq!(grid.last().unwrap(), &vec!["(신규 진입 없음)".to_owned()]);
    }
}
