//! The scanning pipeline.
//!
//! One left-to-right pass classifies each character, hands run-based
//! categories to their decoder, and batches ordinary text into text segments.
//! Cleaning and statistics are computed from the raw input afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use unveil_types::{
    Category, Classification, DecodeOutcome, ScanResult, ScanStatistics, Segment,
    format_code_point,
};

use crate::classify::classify_char;
use crate::clean::clean;
use crate::decode::{
    decode_bidi, decode_regional, decode_sneaky_bits, decode_tags, decode_variation_selectors,
};
use crate::stats::{density, shannon_entropy};
use crate::tables::MUSICAL_ANNOTATIONS;

/// Scan `raw` for stealth characters.
///
/// This is a pure function of its input: no state is shared between calls,
/// so it may be called from any number of threads at once.
///
/// # Examples
///
/// ```
/// use unveil_core::scan;
/// use unveil_types::Category;
///
/// let result = scan("A\u{200B}B");
/// assert_eq!(result.cleaned, "AB");
/// assert_eq!(result.stats.stealth_count, 1);
/// assert_eq!(result.stats.count(Category::ZeroWidth), 1);
/// ```
#[must_use]
pub fn scan(raw: &str) -> ScanResult {
    if raw.is_empty() {
        return ScanResult::empty();
    }

    let mut builder = SegmentBuilder::default();
    let mut pos = 0;
    while let Some(c) = raw[pos..].chars().next() {
        let Some(info) = classify_char(c) else {
            builder.push_text(c);
            pos += c.len_utf8();
            continue;
        };

        let hit = describe(raw, pos, c, info);
        // Decoders only run on positions the classifier accepted, so every
        // hit consumes at least the current character.
        let byte_len = hit.byte_len.max(c.len_utf8());
        builder.push_stealth(info, hit, pos..pos + byte_len);
        pos += byte_len;
    }

    let (segments, stats) = builder.finish(raw);
    tracing::debug!(
        total_chars = stats.total_chars,
        stealth_count = stats.stealth_count,
        segments = segments.len(),
        "scan complete"
    );

    ScanResult {
        segments,
        cleaned: clean(raw),
        stats,
    }
}

/// Decoded value, tooltip and extent of one stealth hit.
struct Hit {
    decoded: String,
    tooltip: String,
    count: usize,
    byte_len: usize,
}

impl Hit {
    /// A hit covering exactly the character `c`.
    fn single(c: char, decoded: String, tooltip: String) -> Self {
        Self {
            decoded,
            tooltip,
            count: 1,
            byte_len: c.len_utf8(),
        }
    }

    fn run(outcome: DecodeOutcome, tooltip: String) -> Self {
        Self {
            decoded: outcome.decoded,
            tooltip,
            count: outcome.consumed,
            byte_len: outcome.byte_len,
        }
    }
}

/// Decode the stealth hit starting with `c` at byte offset `pos`.
fn describe(raw: &str, pos: usize, c: char, info: Classification) -> Hit {
    match info.category {
        Category::Tag => {
            let mut outcome = decode_tags(raw, pos);
            if outcome.decoded.is_empty() {
                outcome.decoded = "[TAG]".to_string();
            }
            let tooltip = format!("AWS Tag ({} chars)", outcome.consumed);
            Hit::run(outcome, tooltip)
        }
        Category::SneakyBits => {
            let outcome = decode_sneaky_bits(raw, pos);
            let tooltip = format!("SneakyBits ({} carriers)", outcome.consumed);
            Hit::run(outcome, tooltip)
        }
        Category::Bidi => {
            let outcome = decode_bidi(raw, pos);
            let tooltip = if outcome.decoded.contains("[UNBALANCED") {
                "BIDI Control (Unbalanced)"
            } else {
                "BIDI Control"
            };
            Hit::run(outcome, tooltip.to_string())
        }
        Category::VariationSelector => {
            let outcome = decode_variation_selectors(raw, pos);
            let tooltip = format!("VS Watermark ({} selectors)", outcome.consumed);
            Hit::run(outcome, tooltip)
        }
        Category::RegionalIndicator => {
            Hit::run(decode_regional(raw, pos), "Flag Indicator".to_string())
        }
        Category::VariableSpace => {
            let decoded = if info.label == "BrailleBlank" {
                "BRAILLE_BLANK".to_string()
            } else {
                format!("SP:{:X}", c as u32)
            };
            Hit::single(c, decoded, titled(info.label, c))
        }
        Category::SmartQuote => Hit::single(c, c.to_string(), titled("Smart Quote", c)),
        Category::Bullet | Category::Dash => Hit::single(c, c.to_string(), titled(info.label, c)),
        Category::Annotation => {
            let name = if MUSICAL_ANNOTATIONS.contains(&(c as u32)) {
                "MusAnn"
            } else {
                "IntAnn"
            };
            Hit::single(c, name.to_string(), titled(info.label, c))
        }
        Category::ZeroWidth | Category::HorizontalBar | Category::Multiplication => {
            Hit::single(c, format_code_point(c), titled(info.label, c))
        }
    }
}

/// Tooltip of a single-character hit: `label (U+XXXX)`.
fn titled(label: &str, c: char) -> String {
    format!("{label} ({})", format_code_point(c))
}

/// Accumulates segments and running totals during a scan.
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<Segment>,
    text: String,
    stealth_count: usize,
    labels: BTreeSet<&'static str>,
    category_counts: BTreeMap<Category, usize>,
}

impl SegmentBuilder {
    fn push_text(&mut self, c: char) {
        self.text.push(c);
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.segments.push(Segment::Text { text });
        }
    }

    fn push_stealth(&mut self, info: Classification, hit: Hit, span: Range<usize>) {
        self.flush_text();
        tracing::trace!(
            category = %info.category,
            count = hit.count,
            start = span.start,
            "stealth run"
        );

        self.labels.insert(info.label);
        *self.category_counts.entry(info.category).or_insert(0) += hit.count;
        self.stealth_count += hit.count;
        self.segments.push(Segment::Stealth {
            category: info.category,
            label: info.label,
            decoded: hit.decoded,
            tooltip: hit.tooltip,
            count: hit.count,
            span,
        });
    }

    /// Flush pending text and compute the statistics of `raw`.
    fn finish(mut self, raw: &str) -> (Vec<Segment>, ScanStatistics) {
        self.flush_text();
        let total_chars = raw.chars().count();
        let stats = ScanStatistics {
            total_chars,
            stealth_count: self.stealth_count,
            density: density(self.stealth_count, total_chars),
            entropy: shannon_entropy(raw),
            labels: self.labels,
            category_counts: self.category_counts,
        };
        (self.segments, stats)
    }
}
