//! Run decoders for the payload-carrying categories.
//!
//! Every decoder has the same shape: given the full text and a byte offset it
//! greedily consumes the maximal run of its own category starting there and
//! reports what the run spells. Each step re-checks the category itself, so a
//! decoder can be called directly without running the classifier first.
//!
//! A `start` that is past the end or not on a char boundary matches nothing.

use unveil_types::{Category, DecodeOutcome};

use crate::tables::{
    FSI, LRE, LRI, LRO, PDF, PDI, REGIONAL_INDICATORS, RLE, RLI, RLO, SNEAKY_ONE, SNEAKY_ZERO,
    TAG, TAG_BASE, bidi_label, is_variation_selector,
};

/// Signature shared by all run decoders.
pub type Decoder = fn(&str, usize) -> DecodeOutcome;

/// The run decoder for `category`, if it is run-based.
#[must_use]
pub fn decoder_for(category: Category) -> Option<Decoder> {
    match category {
        Category::Tag => Some(decode_tags),
        Category::SneakyBits => Some(decode_sneaky_bits),
        Category::VariationSelector => Some(decode_variation_selectors),
        Category::Bidi => Some(decode_bidi),
        Category::RegionalIndicator => Some(decode_regional),
        _ => None,
    }
}

/// Walk the run starting at `start`, feeding each code point to `step` until
/// it returns `false`. Returns `(consumed, byte_len)`.
fn walk_run(text: &str, start: usize, mut step: impl FnMut(u32) -> bool) -> (usize, usize) {
    let Some(rest) = text.get(start..) else {
        return (0, 0);
    };

    let mut consumed = 0;
    let mut byte_len = 0;
    for c in rest.chars() {
        if !step(c as u32) {
            break;
        }
        consumed += 1;
        byte_len += c.len_utf8();
    }
    (consumed, byte_len)
}

/// Printable ASCII passes through; anything else becomes `fallback`.
fn printable_or(byte: u32, fallback: char) -> char {
    match u8::try_from(byte) {
        Ok(b @ 0x20..=0x7e) => char::from(b),
        _ => fallback,
    }
}

/// Decode complete 8-bit groups of a `'0'`/`'1'` string, most significant
/// bit first. Trailing bits that do not fill a byte are ignored.
fn bits_to_ascii(bits: &str) -> String {
    bits.as_bytes()
        .chunks_exact(8)
        .map(|chunk| {
            let byte = chunk
                .iter()
                .fold(0u32, |acc, bit| (acc << 1) | u32::from(*bit == b'1'));
            printable_or(byte, '.')
        })
        .collect()
}

/// Decode tag smuggling: each tag code point minus U+E0000 is an ASCII byte.
///
/// Non-printable bytes decode to `?`.
///
/// # Examples
///
/// ```
/// use unveil_core::decode_tags;
///
/// let outcome = decode_tags("\u{E0048}\u{E0069}!", 0);
/// assert_eq!(outcome.decoded, "Hi");
/// assert_eq!(outcome.consumed, 2);
/// ```
#[must_use]
pub fn decode_tags(text: &str, start: usize) -> DecodeOutcome {
    let mut decoded = String::new();
    let (consumed, byte_len) = walk_run(text, start, |cp| {
        if !TAG.contains(&cp) {
            return false;
        }
        decoded.push(printable_or(cp - TAG_BASE, '?'));
        true
    });
    DecodeOutcome::new(decoded, consumed, byte_len)
}

/// Decode a bit-carrier run: U+2062 is a 0 bit, U+2064 a 1 bit.
///
/// Returns `[SneakyBits]` when the run is too short to hold a whole byte.
#[must_use]
pub fn decode_sneaky_bits(text: &str, start: usize) -> DecodeOutcome {
    let mut bits = String::new();
    let (consumed, byte_len) = walk_run(text, start, |cp| match cp {
        SNEAKY_ZERO => {
            bits.push('0');
            true
        }
        SNEAKY_ONE => {
            bits.push('1');
            true
        }
        _ => false,
    });

    let mut decoded = bits_to_ascii(&bits);
    if decoded.is_empty() {
        decoded = "[SneakyBits]".to_string();
    }
    DecodeOutcome::new(decoded, consumed, byte_len)
}

/// Which terminator an open bidi scope is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closer {
    Pdf,
    Pdi,
}

impl Closer {
    fn label(self) -> &'static str {
        match self {
            Closer::Pdf => "PDF",
            Closer::Pdi => "PDI",
        }
    }
}

/// Decode a bidi control run into its space-separated abbreviations.
///
/// Nesting is validated with a stack: embeddings and overrides expect `PDF`,
/// isolates expect `PDI`. A closer that does not match the innermost scope is
/// counted as a mismatch and leaves the stack untouched. Any mismatch or
/// unclosed scope appends an `[UNBALANCED ...]` note listing the mismatch
/// count and the expected closers, innermost first.
#[must_use]
pub fn decode_bidi(text: &str, start: usize) -> DecodeOutcome {
    let mut labels: Vec<&'static str> = Vec::new();
    let mut expected: Vec<Closer> = Vec::new();
    let mut mismatches = 0usize;

    let (consumed, byte_len) = walk_run(text, start, |cp| {
        let Some(label) = bidi_label(cp) else {
            return false;
        };
        labels.push(label);

        match cp {
            LRE | RLE | LRO | RLO => expected.push(Closer::Pdf),
            LRI | RLI | FSI => expected.push(Closer::Pdi),
            PDF | PDI => {
                let closer = if cp == PDF { Closer::Pdf } else { Closer::Pdi };
                if expected.last() == Some(&closer) {
                    expected.pop();
                } else {
                    mismatches += 1;
                }
            }
            _ => {}
        }
        true
    });

    if labels.is_empty() {
        return DecodeOutcome::new("[BIDI]", consumed, byte_len);
    }

    let mut decoded = labels.join(" ");
    if mismatches > 0 || !expected.is_empty() {
        let mut detail = Vec::new();
        if mismatches > 0 {
            detail.push(format!("mismatch:{mismatches}"));
        }
        if !expected.is_empty() {
            let unclosed: Vec<&str> = expected.iter().rev().map(|c| c.label()).collect();
            detail.push(format!("unclosed:{}", unclosed.join(",")));
        }
        decoded.push_str(&format!(" [UNBALANCED {}]", detail.join(" ")));
        tracing::debug!(
            mismatches,
            unclosed = expected.len(),
            "unbalanced bidi control run"
        );
    }

    DecodeOutcome::new(decoded, consumed, byte_len)
}

/// Decode a variation-selector watermark: even selectors are 0 bits, odd
/// selectors 1 bits.
///
/// Returns `[VS:<bits>]` when no whole byte was collected.
#[must_use]
pub fn decode_variation_selectors(text: &str, start: usize) -> DecodeOutcome {
    let mut bits = String::new();
    let (consumed, byte_len) = walk_run(text, start, |cp| {
        if !is_variation_selector(cp) {
            return false;
        }
        bits.push(if cp % 2 == 0 { '0' } else { '1' });
        true
    });

    let decoded = bits_to_ascii(&bits);
    if decoded.is_empty() {
        return DecodeOutcome::new(format!("[VS:{bits}]"), consumed, byte_len);
    }
    DecodeOutcome::new(decoded, consumed, byte_len)
}

/// Decode regional indicators as the letters A-Z they stand for.
///
/// Returns `[Flag]` when nothing matched.
#[must_use]
pub fn decode_regional(text: &str, start: usize) -> DecodeOutcome {
    let mut decoded = String::new();
    let (consumed, byte_len) = walk_run(text, start, |cp| {
        if !REGIONAL_INDICATORS.contains(&cp) {
            return false;
        }
        let offset = cp - REGIONAL_INDICATORS.start();
        decoded.push(char::from(b'A' + offset as u8));
        true
    });

    if decoded.is_empty() {
        decoded = "[Flag]".to_string();
    }
    DecodeOutcome::new(decoded, consumed, byte_len)
}
