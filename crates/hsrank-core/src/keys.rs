//! Identity keys for cross-snapshot item matching.
//!
//! Two snapshot rows count as the same item when their normalized
//! broadcast-text + company composite is equal. Normalization strips the
//! punctuation and whitespace noise the site shuffles between days.

/// Collapses whitespace runs to single spaces, drops punctuation/symbols,
/// and lowercases ASCII letters. Hangul passes through unchanged.
#[must_use]
pub fn normalize_fragment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if ch.is_alphanumeric() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch.to_ascii_lowercase());
        }
        // punctuation and symbols are dropped without forcing a separator
    }
    out
}

/// Builds the composite identity key for a snapshot row.
#[must_use]
pub fn entry_key(broadcast: &str, company: &str) -> String {
    format!(
        "{}|{}",
        normalize_fragment(broadcast),
        normalize_fragment(company)
    )
}
