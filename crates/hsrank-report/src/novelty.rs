//! Newly-entered products: key-based set difference against history.
//!
//! A row in the latest dated snapshot is "new" when its normalized
//! broadcast+company identity key appears in no earlier dated snapshot.

use std::collections::HashSet;

use hsrank_core::entry_key;

use crate::snapshot::SnapshotRow;

/// A latest-snapshot row absent from all historical snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub broadcast: String,
    pub company: String,
    pub revenue: i64,
    pub volume: i64,
}

/// Returns the rows of `latest` whose identity key is absent from `history`,
/// sorted descending by revenue.
///
/// Duplicate keys inside `latest` itself are reported once.
#[must_use]
pub fn new_entries(latest: &[SnapshotRow], history: &[SnapshotRow]) -> Vec<NewEntry> {
    let known: HashSet<String> = history
        .iter()
        .map(|r| entry_key(&r.broadcast, &r.company))
        .collect();

    let mut seen = HashSet::new();
    let mut out: Vec<NewEntry> = latest
        .iter()
        .filter(|r| {
            let key = entry_key(&r.broadcast, &r.company);
            !known.contains(&key) && seen.insert(key)
        })
        .map(|r| NewEntry {
            broadcast: r.broadcast.clone(),
            company: r.company.clone(),
            revenue: r.revenue,
            volume: r.volume,
        })
        .collect();
    out.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    out
}
