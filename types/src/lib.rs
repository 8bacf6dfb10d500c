//! Core domain types for Unveil.
//!
//! This crate contains the pure data model of a stealth-character scan with no
//! IO and minimal dependencies. The scanning engine (`unveil-core`) produces
//! these values; the CLI and any other front end only read them.

mod sanitize;
mod text;

pub use sanitize::escape_terminal_text;
pub use text::{format_code_point, format_density, format_entropy, truncate_preview};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Range;

// ============================================================================
// Category
// ============================================================================

/// Kind of stealth character.
///
/// Variant order is classifier priority order; `Ord` follows it, so maps keyed
/// by category iterate in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    /// Zero-width and invisible filler characters.
    #[serde(rename = "ZERO")]
    ZeroWidth,
    /// Tag characters (U+E0000-E007F) smuggling ASCII.
    #[serde(rename = "TAG")]
    Tag,
    /// Invisible Times / Invisible Plus used as a binary channel.
    #[serde(rename = "SNEAKY")]
    SneakyBits,
    /// Variation selectors whose parity carries bits.
    #[serde(rename = "VS")]
    VariationSelector,
    /// Bidirectional formatting controls.
    #[serde(rename = "BIDI")]
    Bidi,
    /// Variable-width, no-break and Braille blank spaces.
    #[serde(rename = "SPACE")]
    VariableSpace,
    /// Regional indicator symbols spelling letters.
    #[serde(rename = "REGIONAL")]
    RegionalIndicator,
    /// Interlinear and musical annotation marks.
    #[serde(rename = "ANNO")]
    Annotation,
    #[serde(rename = "QUOTE")]
    SmartQuote,
    #[serde(rename = "BULLET")]
    Bullet,
    /// Dash, arrow and ellipsis punctuation typical of generated text.
    #[serde(rename = "DASH")]
    Dash,
    /// U+2015 HORIZONTAL BAR.
    #[serde(rename = "HBAR")]
    HorizontalBar,
    /// U+00D7 MULTIPLICATION SIGN standing in for a letter `x`.
    #[serde(rename = "MULT")]
    Multiplication,
}

impl Category {
    /// Every category, in classifier priority order.
    pub const ALL: [Category; 13] = [
        Category::ZeroWidth,
        Category::Tag,
        Category::SneakyBits,
        Category::VariationSelector,
        Category::Bidi,
        Category::VariableSpace,
        Category::RegionalIndicator,
        Category::Annotation,
        Category::SmartQuote,
        Category::Bullet,
        Category::Dash,
        Category::HorizontalBar,
        Category::Multiplication,
    ];

    /// Stable short code used as the statistics key and in serialized output.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Category::ZeroWidth => "ZERO",
            Category::Tag => "TAG",
            Category::SneakyBits => "SNEAKY",
            Category::VariationSelector => "VS",
            Category::Bidi => "BIDI",
            Category::VariableSpace => "SPACE",
            Category::RegionalIndicator => "REGIONAL",
            Category::Annotation => "ANNO",
            Category::SmartQuote => "QUOTE",
            Category::Bullet => "BULLET",
            Category::Dash => "DASH",
            Category::HorizontalBar => "HBAR",
            Category::Multiplication => "MULT",
        }
    }

    /// Whether a hit of this category consumes a whole contiguous run
    /// (and decodes a payload) rather than a single character.
    #[must_use]
    pub const fn is_run_based(self) -> bool {
        matches!(
            self,
            Category::Tag
                | Category::SneakyBits
                | Category::VariationSelector
                | Category::Bidi
                | Category::RegionalIndicator
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Classification & decoding
// ============================================================================

/// Outcome of classifying one code point as stealth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Classification {
    pub category: Category,
    /// Human-readable label, e.g. `"Zero-Width"` or `"BrailleBlank"`.
    pub label: &'static str,
}

impl Classification {
    #[must_use]
    pub const fn new(category: Category, label: &'static str) -> Self {
        Self { category, label }
    }
}

/// Result of a run decoder.
///
/// `consumed` counts Unicode scalar values; `byte_len` is the UTF-8 length of
/// the same run and is what callers advance by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub decoded: String,
    pub consumed: usize,
    pub byte_len: usize,
}

impl DecodeOutcome {
    #[must_use]
    pub fn new(decoded: impl Into<String>, consumed: usize, byte_len: usize) -> Self {
        Self {
            decoded: decoded.into(),
            consumed,
            byte_len,
        }
    }

    /// True when the decoder matched nothing at its start position.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.consumed == 0
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// One piece of a scanned text.
///
/// Segments partition the input: concatenating every `Text::text` and the
/// source slice under every `Stealth::span`, in order, yields the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Text {
        text: String,
    },
    Stealth {
        category: Category,
        label: &'static str,
        decoded: String,
        tooltip: String,
        /// Number of stealth scalar values in this run.
        count: usize,
        /// Byte range of the run in the scanned input.
        span: Range<usize>,
    },
}

impl Segment {
    #[must_use]
    pub fn is_stealth(&self) -> bool {
        matches!(self, Segment::Stealth { .. })
    }

    /// The slice of `source` this segment stands for.
    ///
    /// `source` must be the text the segment was produced from; a text
    /// segment ignores it and returns its own content.
    #[must_use]
    pub fn source<'a>(&'a self, source: &'a str) -> &'a str {
        match self {
            Segment::Text { text } => text,
            Segment::Stealth { span, .. } => source.get(span.clone()).unwrap_or_default(),
        }
    }
}

/// Aggregate statistics of one scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanStatistics {
    /// Unicode scalar values in the raw input.
    pub total_chars: usize,
    /// Stealth scalar values found; equals the sum of `category_counts`.
    pub stealth_count: usize,
    /// `stealth_count / total_chars * 100`, or 0 for empty input.
    pub density: f64,
    /// Shannon entropy of the raw input in bits per scalar value.
    pub entropy: f64,
    /// Distinct classification labels encountered.
    pub labels: BTreeSet<&'static str>,
    pub category_counts: BTreeMap<Category, usize>,
}

impl ScanStatistics {
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }
}

/// Complete, immutable result of scanning one string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanResult {
    pub segments: Vec<Segment>,
    pub cleaned: String,
    pub stats: ScanStatistics,
}

impl ScanResult {
    /// The result of scanning the empty string.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.stats.stealth_count == 0
    }

    pub fn stealth_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|segment| segment.is_stealth())
    }
}
