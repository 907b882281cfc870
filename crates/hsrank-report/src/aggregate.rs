//! Grouped sums over snapshot rows.

use std::collections::HashMap;

use crate::snapshot::SnapshotRow;

/// One output row of a grouped-sum table. Sums stay integers here; display
/// formatting happens at assembly time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub key: String,
    pub revenue: i64,
    pub volume: i64,
}

/// Groups `rows` by `key_fn`, summing revenue and volume per group.
///
/// Output is sorted descending by summed revenue, with the key as a
/// deterministic tie-breaker. Rows whose key is empty (no platform matched)
/// still form a group; dropping them would under-report totals.
pub fn group_sum<F>(rows: &[SnapshotRow], key_fn: F) -> Vec<AggregateRow>
where
    F: Fn(&SnapshotRow) -> &str,
{
    let mut sums: HashMap<&str, (i64, i64)> = HashMap::new();
    for row in rows {
        let entry = sums.entry(key_fn(row)).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(row.revenue);
        entry.1 = entry.1.saturating_add(row.volume);
    }

    let mut out: Vec<AggregateRow> = sums
        .into_iter()
        .map(|(key, (revenue, volume))| AggregateRow {
            key: key.to_owned(),
            revenue,
            volume,
        })
        .collect();
    out.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.key.cmp(&b.key)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_row(category: &str, channel: &str, revenue: i64, volume: i64) -> SnapshotRow {
        SnapshotRow {
            broadcast: "방송".to_owned(),
            category: category.to_owned(),
            company: "회사".to_owned(),
            channel: channel.to_owned(),
            revenue,
            volume,
        }
    }

    #[test]
    fn sums_within_a_group() {
        let rows = vec![
            snapshot_row("가전", "Live", 100, 10),
            snapshot_row("가전", "Live", 200, 20),
            snapshot_row("가전", "Live", 300, 30),
        ];
        let agg = group_sum(&rows, |r| &r.category);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg[0].key, "가전");
        assert_eq!(agg[0].revenue, 600);
        assert_eq!(agg[0].volume, 60);
    }

    #[test]
    fn sorts_descending_by_revenue() {
        let rows = vec![
            snapshot_row("식품", "Live", 50, 1),
            snapshot_row("가전", "TC", 600, 2),
            snapshot_row("뷰티", "Live", 200, 3),
        ];
        let agg = group_sum(&rows, |r| &r.category);
        let keys: Vec<&str> = agg.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["가전", "뷰티", "식품"]);
    }

    #[test]
    fn revenue_ties_break_on_key() {
        let rows = vec![
            snapshot_row("나", "Live", 100, 1),
            snapshot_row("가", "Live", 100, 1),
        ];
        let agg = group_sum(&rows, |r| &r.category);
        assert_eq!(agg[0].key, "가");
        assert_eq!(agg[1].key, "나");
    }

    #[test]
    fn empty_keys_form_their_own_group() {
        let rows = vec![
            snapshot_row("가전", "Live", 100, 1),
            snapshot_row("가전", "", 40, 2),
            snapshot_row("식품", "", 30, 3),
        ];
        let agg = group_sum(&rows, |r| &r.channel);
        assert_eq!(agg.len(), 2);
        assert_eq!(agg[0].key, "Live");
        assert_eq!(agg[1].key, "");
        assert_eq!(agg[1].revenue, 70);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let agg = group_sum(&[], |r: &SnapshotRow| &r.category);
        assert!(agg.is_empty());
    }
}
