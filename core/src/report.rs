//! Plain-text views of a [`ScanResult`].
//!
//! These are pure string builders. Colors, layout and interactivity belong to
//! whatever front end prints them.

use unveil_types::{
    Category, ScanResult, ScanStatistics, Segment, escape_terminal_text, format_density,
    format_entropy, truncate_preview,
};

/// One line of the per-category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub category: Category,
    pub count: usize,
    /// Share of all stealth characters, in percent.
    pub share: f64,
}

/// Per-category counts, largest first. Ties keep category priority order.
#[must_use]
pub fn breakdown(stats: &ScanStatistics) -> Vec<BreakdownRow> {
    let mut rows: Vec<BreakdownRow> = stats
        .category_counts
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(&category, &count)| BreakdownRow {
            category,
            count,
            share: if stats.stealth_count > 0 {
                count as f64 / stats.stealth_count as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    // Stable sort over a category-ordered map keeps ties in priority order.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Options for [`render_annotated`] and [`render_summary`].
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Maximum characters of a decoded payload shown inline.
    pub preview_width: usize,
    /// Append the per-category breakdown table to the summary.
    pub breakdown: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            preview_width: 60,
            breakdown: true,
        }
    }
}

/// Render the scanned text with every stealth run replaced by a visible
/// marker `⟦CODE:decoded⟧`, suffixed with `×N` when the run holds more than
/// one character.
///
/// Ordinary text is passed through [`escape_terminal_text`].
#[must_use]
pub fn render_annotated(result: &ScanResult, options: ReportOptions) -> String {
    let mut out = String::new();
    for segment in &result.segments {
        match segment {
            Segment::Text { text } => out.push_str(&escape_terminal_text(text)),
            Segment::Stealth {
                category,
                decoded,
                count,
                ..
            } => {
                let preview = truncate_preview(decoded, options.preview_width, "…");
                out.push_str(&format!("\u{27E6}{category}:{}", escape_terminal_text(&preview)));
                if *count > 1 {
                    out.push_str(&format!("\u{00D7}{count}"));
                }
                out.push('\u{27E7}');
            }
        }
    }
    out
}

/// Render headline statistics, one `LABEL  value` pair per line, optionally
/// followed by the breakdown table.
#[must_use]
pub fn render_summary(result: &ScanResult, options: ReportOptions) -> String {
    let stats = &result.stats;
    let types = if stats.labels.is_empty() {
        "\u{2713} Clean".to_string()
    } else {
        stats.labels.iter().copied().collect::<Vec<_>>().join(" \u{2022} ")
    };

    let mut out = String::new();
    out.push_str(&format!("FOUND     {}\n", stats.stealth_count));
    out.push_str(&format!("DENSITY   {}\n", format_density(stats.density)));
    out.push_str(&format!("ENTROPY   {}\n", format_entropy(stats.entropy)));
    out.push_str(&format!("TYPES     {types}\n"));

    if options.breakdown {
        let rows = breakdown(stats);
        if !rows.is_empty() {
            out.push_str("BREAKDOWN\n");
            for row in rows {
                out.push_str(&format!(
                    "  {:<9}{:>6}{:>9.2}%\n",
                    row.category.code(),
                    row.count,
                    row.share
                ));
            }
        }
    }
    out
}

/// List every decoded payload, one per line, as `CODE  tooltip  decoded`.
#[must_use]
pub fn render_findings(result: &ScanResult, options: ReportOptions) -> String {
    result
        .stealth_segments()
        .filter_map(|segment| match segment {
            Segment::Stealth {
                category,
                decoded,
                tooltip,
                span,
                ..
            } => Some(format!(
                "  @{:<6} {:<9}{}  {}\n",
                span.start,
                category.code(),
                tooltip,
                escape_terminal_text(&truncate_preview(decoded, options.preview_width, "…"))
            )),
            Segment::Text { .. } => None,
        })
        .collect()
}
