//! Korean-localized count parsing and display formatting.
//!
//! The ranking site renders revenue and sales volume with the 억 (10^8) and
//! 만 (10^4) units, commas, and `-` placeholders. [`parse_count`] converts any
//! such cell to an integer; it is total: bad input yields `0`, never an
//! error, so a malformed scrape cell can never abort an aggregation run.

/// Multiplier for the 억 unit.
const EOK: f64 = 100_000_000.0;
/// Multiplier for the 만 unit.
const MAN: f64 = 10_000.0;

/// Parses a localized count string into an integer.
///
/// Handles, in order:
/// - empty or `-` → `0`
/// - plain integers/decimals after stripping commas and whitespace
///   (`"1,234"` → `1234`), truncated toward zero
/// - unit segments (`"3억500만"` → `305_000_000`), each segment rounded,
///   plus any trailing bare-integer remainder
/// - as a last resort, the first embedded run of digits (`"약120개"` → `120`)
/// - anything else → `0`
#[must_use]
pub fn parse_count(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return 0;
    }

    let compact: String = trimmed
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if let Ok(v) = compact.parse::<f64>() {
        if v.is_finite() {
            return trunc_to_i64(v);
        }
    }

    // Scan unit segments: each run of digits (with optional decimal point)
    // immediately followed by 억 or 만 contributes number × unit. A bare
    // integer left over after the last unit is added as-is.
    let mut total: i64 = 0;
    let mut matched_unit = false;
    let mut num_buf = String::new();
    for ch in compact.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            num_buf.push(ch);
        } else if ch == '억' || ch == '만' {
            let unit = if ch == '억' { EOK } else { MAN };
            if let Ok(n) = num_buf.parse::<f64>() {
                total = total.saturating_add(trunc_to_i64((n * unit).round()));
                matched_unit = true;
            }
            num_buf.clear();
        } else {
            num_buf.clear();
        }
    }
    if matched_unit {
        if let Ok(n) = num_buf.parse::<f64>() {
            total = total.saturating_add(trunc_to_i64(n));
        }
    }
    if total != 0 {
        return total;
    }

    first_embedded_integer(&compact).unwrap_or(0)
}

/// Renders revenue in 억 with two decimal places: `250_000_000` → `"2.50억"`.
#[must_use]
pub fn format_revenue(amount: i64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let eok = amount as f64 / EOK;
    format!("{eok:.2}억")
}

/// Renders a count with thousands separators: `12345` → `"12,345"`.
#[must_use]
pub fn format_count(count: i64) -> String {
    let digits = count.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if count < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && i % 3 == lead % 3 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[allow(clippy::cast_possible_truncation)]
fn trunc_to_i64(v: f64) -> i64 {
    v.trunc() as i64
}

/// Returns the first maximal run of ASCII digits in `s` as an integer.
fn first_embedded_integer(s: &str) -> Option<i64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
