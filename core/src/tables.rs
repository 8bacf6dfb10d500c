//! Static code point tables.
//!
//! Sparse sets are sorted slices searched with `binary_search`; dense blocks
//! are inclusive ranges. Nothing here has behavior beyond lookup.

use std::ops::RangeInclusive;

/// Zero-width and invisible filler characters.
///
/// Sorted ascending.
pub(crate) const ZERO_WIDTH: &[u32] = &[
    0x00AD, // SOFT HYPHEN
    0x034F, // COMBINING GRAPHEME JOINER
    0x061C, // ARABIC LETTER MARK
    0x115F, // HANGUL CHOSEONG FILLER
    0x1160, // HANGUL JUNGSEONG FILLER
    0x17B4, // KHMER VOWEL INHERENT AQ
    0x17B5, // KHMER VOWEL INHERENT AA
    0x180E, // MONGOLIAN VOWEL SEPARATOR
    0x200B, // ZERO WIDTH SPACE
    0x200C, // ZERO WIDTH NON-JOINER
    0x200D, // ZERO WIDTH JOINER
    0x202F, // NARROW NO-BREAK SPACE
    0x205F, // MEDIUM MATHEMATICAL SPACE
    0x2060, // WORD JOINER
    0x2061, // FUNCTION APPLICATION
    0x2063, // INVISIBLE SEPARATOR
    0x3000, // IDEOGRAPHIC SPACE
    0x3164, // HANGUL FILLER
    0xFEFF, // ZERO WIDTH NO-BREAK SPACE (BOM)
    0xFFA0, // HALFWIDTH HANGUL FILLER
];

pub(crate) const TAG: RangeInclusive<u32> = 0xE0000..=0xE007F;
/// Offset subtracted from a tag code point to recover its ASCII byte.
pub(crate) const TAG_BASE: u32 = 0xE0000;

/// INVISIBLE TIMES, carries a 0 bit.
pub(crate) const SNEAKY_ZERO: u32 = 0x2062;
/// INVISIBLE PLUS, carries a 1 bit.
pub(crate) const SNEAKY_ONE: u32 = 0x2064;

pub(crate) const VARIATION_SELECTORS: RangeInclusive<u32> = 0xFE00..=0xFE0F;
pub(crate) const VARIATION_SELECTORS_SUPPLEMENT: RangeInclusive<u32> = 0xE0100..=0xE01EF;

pub(crate) const LRE: u32 = 0x202A;
pub(crate) const RLE: u32 = 0x202B;
pub(crate) const PDF: u32 = 0x202C;
pub(crate) const LRO: u32 = 0x202D;
pub(crate) const RLO: u32 = 0x202E;
pub(crate) const LRI: u32 = 0x2066;
pub(crate) const RLI: u32 = 0x2067;
pub(crate) const FSI: u32 = 0x2068;
pub(crate) const PDI: u32 = 0x2069;

/// Bidirectional controls and their abbreviations, sorted by code point.
///
/// The last six are deprecated format characters that still turn up in
/// obfuscated payloads.
pub(crate) const BIDI: &[(u32, &str)] = &[
    (0x200E, "LRM"),
    (0x200F, "RLM"),
    (LRE, "LRE"),
    (RLE, "RLE"),
    (PDF, "PDF"),
    (LRO, "LRO"),
    (RLO, "RLO"),
    (LRI, "LRI"),
    (RLI, "RLI"),
    (FSI, "FSI"),
    (PDI, "PDI"),
    (0x206A, "ISS"),
    (0x206B, "ASS"),
    (0x206C, "IAFS"),
    (0x206D, "AAFS"),
    (0x206E, "NADS"),
    (0x206F, "NODS"),
];

pub(crate) const VARIABLE_SPACES: RangeInclusive<u32> = 0x2000..=0x200A;
pub(crate) const NO_BREAK_SPACE: u32 = 0x00A0;
pub(crate) const BRAILLE_BLANK: u32 = 0x2800;

pub(crate) const REGIONAL_INDICATORS: RangeInclusive<u32> = 0x1F1E6..=0x1F1FF;

pub(crate) const INTERLINEAR_ANNOTATIONS: RangeInclusive<u32> = 0xFFF9..=0xFFFB;
pub(crate) const MUSICAL_ANNOTATIONS: RangeInclusive<u32> = 0x1D173..=0x1D17A;

/// Curly and low quotation marks. Sorted.
pub(crate) const SMART_QUOTES: &[u32] = &[0x2018, 0x2019, 0x201A, 0x201C, 0x201D, 0x201E];

/// Bullet glyphs typical of generated lists. Sorted.
pub(crate) const BULLETS: &[u32] = &[
    0x00B7, // ·
    0x2022, // •
    0x2023, // ‣
    0x2043, // ⁃
    0x2219, // ∙
    0x25E6, // ◦
];

/// Dash, arrow and ellipsis punctuation. Sorted.
pub(crate) const DASHES: &[u32] = &[
    0x2013, // –
    0x2014, // —
    0x2026, // …
    0x2192, // →
    0x2E3A, // ⸺
    0x2E3B, // ⸻
];

pub(crate) const HORIZONTAL_BAR: u32 = 0x2015;
pub(crate) const MULTIPLICATION_SIGN: u32 = 0x00D7;

/// ASCII stand-ins substituted into cleaned text instead of deleting the
/// character outright.
pub(crate) const CLEAN_REPLACEMENTS: &[(char, &str)] = &[
    ('\u{00D7}', "x"),
    ('\u{2014}', "-"),
    ('\u{2015}', "-"),
    ('\u{2192}', "->"),
    ('\u{2E3A}', "--"),
    ('\u{2E3B}', "---"),
];

/// Character class of everything cleaning removes (or replaces).
///
/// This exact set is part of the public contract of cleaned output; it must
/// cover every code point the classifier reports.
pub(crate) const STRIP_CLASS: &str = concat!(
    "[",
    // zero-width and invisible fillers
    r"\x{200B}-\x{200D}\x{2060}\x{FEFF}\x{00AD}\x{034F}\x{202F}\x{205F}\x{3000}",
    r"\x{3164}\x{FFA0}\x{180E}\x{061C}\x{17B4}\x{17B5}\x{115F}\x{1160}\x{2061}\x{2063}",
    // bidi, deprecated format controls included
    r"\x{200E}\x{200F}\x{202A}-\x{202E}\x{2066}-\x{206F}",
    // interlinear annotations
    r"\x{FFF9}-\x{FFFB}",
    // variation selectors
    r"\x{FE00}-\x{FE0F}",
    // spaces and bit carriers
    r"\x{2000}-\x{200A}\x{00A0}\x{2062}\x{2064}\x{2800}",
    // quotes
    r"\x{2018}-\x{201A}\x{201C}-\x{201E}",
    // bullets
    r"\x{2022}\x{25E6}\x{2023}\x{2043}\x{2219}\x{00B7}",
    // dashes and punctuation
    r"\x{2013}\x{2014}\x{2015}\x{2E3A}\x{2E3B}\x{2192}\x{2026}\x{00D7}",
    // supplementary planes
    r"\x{E0000}-\x{E007F}\x{E0100}-\x{E01EF}\x{1D173}-\x{1D17A}\x{1F1E6}-\x{1F1FF}",
    "]",
);

/// Abbreviation of a bidi control, if `cp` is one.
pub(crate) fn bidi_label(cp: u32) -> Option<&'static str> {
    BIDI.binary_search_by_key(&cp, |&(code, _)| code)
        .ok()
        .map(|idx| BIDI[idx].1)
}

pub(crate) fn is_variation_selector(cp: u32) -> bool {
    VARIATION_SELECTORS.contains(&cp) || VARIATION_SELECTORS_SUPPLEMENT.contains(&cp)
}

pub(crate) fn clean_replacement(c: char) -> Option<&'static str> {
    CLEAN_REPLACEMENTS
        .binary_search_by_key(&c, |&(from, _)| from)
        .ok()
        .map(|idx| CLEAN_REPLACEMENTS[idx].1)
}
