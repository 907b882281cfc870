//! Dated snapshot tab titles: `month/day` with a `-N` collision suffix.

use chrono::{DateTime, Datelike, Duration, Utc};

/// Hours east of UTC for Korea Standard Time.
const KST_OFFSET_HOURS: i64 = 9;

/// A parsed dated-tab title, ordered by `(month, day, suffix)`.
///
/// `suffix` is 1 for the bare `month/day` form and N for `month/day-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DatedTitle {
    pub month: u32,
    pub day: u32,
    pub suffix: u32,
}

/// Yesterday's date in KST rendered as an unpadded `month/day` title.
#[must_use]
pub fn yesterday_title_kst(now: DateTime<Utc>) -> String {
    let kst_now = now + Duration::hours(KST_OFFSET_HOURS);
    let yesterday = kst_now.date_naive() - Duration::days(1);
    format!("{}/{}", yesterday.month(), yesterday.day())
}

/// Finds a tab title not yet present in `existing` by probing `base`,
/// `base-2`, `base-3`, … in order.
#[must_use]
pub fn unique_title(existing: &[String], base: &str) -> String {
    if !existing.iter().any(|t| t == base) {
        return base.to_owned();
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !existing.iter().any(|t| *t == candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Parses a `month/day` or `month/day-N` tab title.
///
/// Returns `None` for anything else (the live working tab, the report tab,
/// hand-made tabs), which is how dated snapshots are recognized.
#[must_use]
pub fn parse_dated_title(title: &str) -> Option<DatedTitle> {
    let (date_part, suffix) = match title.split_once('-') {
        Some((date, n)) => (date, n.parse::<u32>().ok().filter(|n| *n >= 2)?),
        None => (title, 1),
    };
    let (month_s, day_s) = date_part.split_once('/')?;
    let month: u32 = parse_unpadded(month_s)?;
    let day: u32 = parse_unpadded(day_s)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(DatedTitle { month, day, suffix })
}

/// Picks the latest dated title among `titles` by `(month, day, suffix)`.
#[must_use]
pub fn latest_dated_title(titles: &[String]) -> Option<&str> {
    titles
        .iter()
        .filter_map(|t| parse_dated_title(t).map(|d| (d, t.as_str())))
        .max_by_key(|(d, _)| *d)
        .map(|(_, t)| t)
}

/// Accepts one- or two-digit components only; rejects empty and signed forms.
fn parse_unpadded(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
