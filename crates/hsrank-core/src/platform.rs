//! Home-shopping platform lookup and broadcast-label splitting.
//!
//! Scraped broadcast labels end with the platform name, e.g.
//! `"이번주 특가상품 GS홈쇼핑 마이샵"`. [`split_platform`] strips that suffix
//! and classifies the platform as a live linear channel or a TC
//! (on-demand/catalog) channel.

use serde::{Deserialize, Serialize};

/// Channel classification of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Live,
    Tc,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Live => write!(f, "Live"),
            Channel::Tc => write!(f, "TC"),
        }
    }
}

/// Known platforms and their channel classification.
///
/// Ordered longest-name-first at lookup time so a platform whose name is a
/// suffix of a longer one (`"GS홈쇼핑"` inside `"GS홈쇼핑 마이샵"`) cannot
/// shadow the more specific match.
pub const PLATFORMS: &[(&str, Channel)] = &[
    ("CJ온스타일", Channel::Live),
    ("CJ온스타일 플러스", Channel::Tc),
    ("GS홈쇼핑", Channel::Live),
    ("GS홈쇼핑 마이샵", Channel::Tc),
    ("KT알파쇼핑", Channel::Tc),
    ("NS홈쇼핑", Channel::Live),
    ("NS홈쇼핑 샵플러스", Channel::Tc),
    ("SK스토아", Channel::Tc),
    ("공영쇼핑", Channel::Live),
    ("롯데원티비", Channel::Tc),
    ("롯데홈쇼핑", Channel::Live),
    ("쇼핑엔티", Channel::Tc),
    ("신세계쇼핑", Channel::Tc),
    ("현대홈쇼핑", Channel::Live),
    ("현대홈쇼핑 플러스샵", Channel::Tc),
    ("홈앤쇼핑", Channel::Live),
];

/// Result of [`split_platform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSplit {
    /// Broadcast text with the platform suffix (and surrounding whitespace)
    /// removed. Unchanged when no platform matched.
    pub cleaned: String,
    /// Matched platform display name, or `""` when none matched.
    pub company: String,
    /// Channel of the matched platform.
    pub channel: Option<Channel>,
}

/// Strips a trailing platform name off a broadcast label.
///
/// Matching is longest-name-first over [`PLATFORMS`] and tolerates arbitrary
/// whitespace around the suffix. Unmatched input comes back verbatim with an
/// empty company and no channel.
#[must_use]
pub fn split_platform(text: &str) -> PlatformSplit {
    let trimmed_end = text.trim_end();

    let mut by_len: Vec<&(&str, Channel)> = PLATFORMS.iter().collect();
    by_len.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

    for (name, channel) in by_len {
        if let Some(prefix) = trimmed_end.strip_suffix(name) {
            return PlatformSplit {
                cleaned: prefix.trim_end().to_owned(),
                company: (*name).to_owned(),
                channel: Some(*channel),
            };
        }
    }

    PlatformSplit {
        cleaned: text.to_owned(),
        company: String::new(),
        channel: None,
    }
}
