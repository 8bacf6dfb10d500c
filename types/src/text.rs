//! Small pure formatting helpers for scan reports.

/// Format a code point as `U+XXXX` (at least four hex digits, uppercase).
#[must_use]
pub fn format_code_point(c: char) -> String {
    format!("U+{:04X}", c as u32)
}

/// Format a stealth density percentage.
///
/// Zero (and anything below it) is shown as `0%`; non-zero values below 0.01 collapse to `<0.01%` so
/// a single hidden character in a large document still reads as non-zero.
#[must_use]
pub fn format_density(pct: f64) -> String {
    if pct <= 0.0 {
        return "0%".to_string();
    }
    if pct < 0.01 {
        return "<0.01%".to_string();
    }
    format!("{pct:.2}%")
}

/// Format an entropy value in bits per symbol; zero renders as an em dash.
#[must_use]
pub fn format_entropy(bits: f64) -> String {
    if bits <= 0.0 {
        return "\u{2014}".to_string();
    }
    format!("{bits:.2}")
}

/// Keep at most `max_content` characters of `raw`, appending `suffix` when
/// anything was cut. The suffix does not count toward the budget.
#[must_use]
pub fn truncate_preview(raw: &str, max_content: usize, suffix: &str) -> String {
    match raw.char_indices().nth(max_content) {
        Some((cut, _)) => format!("{}{suffix}", &raw[..cut]),
        None => raw.to_string(),
    }
}
