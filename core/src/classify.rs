//! Per-character stealth classification.
//!
//! Checks run in a fixed priority order and the first match wins.

use unveil_types::{Category, Classification};

use crate::tables::{
    BRAILLE_BLANK, BULLETS, DASHES, HORIZONTAL_BAR, INTERLINEAR_ANNOTATIONS, MULTIPLICATION_SIGN,
    MUSICAL_ANNOTATIONS, NO_BREAK_SPACE, REGIONAL_INDICATORS, SMART_QUOTES, SNEAKY_ONE,
    SNEAKY_ZERO, TAG, VARIABLE_SPACES, ZERO_WIDTH, bidi_label, is_variation_selector,
};

/// Classify a raw code point.
///
/// Values that are not Unicode scalar values (surrogates, anything above
/// U+10FFFF) are never stealth.
#[must_use]
pub fn classify(code_point: u32) -> Option<Classification> {
    char::from_u32(code_point).and_then(classify_char)
}

/// Classify one character, or `None` if it is ordinary text.
///
/// # Examples
///
/// ```
/// use unveil_core::classify_char;
/// use unveil_types::Category;
///
/// assert_eq!(classify_char('\u{200B}').map(|c| c.category), Some(Category::ZeroWidth));
/// assert!(classify_char('A').is_none());
/// ```
#[must_use]
pub fn classify_char(c: char) -> Option<Classification> {
    let cp = c as u32;

    if ZERO_WIDTH.binary_search(&cp).is_ok() {
        return Some(Classification::new(Category::ZeroWidth, "Zero-Width"));
    }
    if TAG.contains(&cp) {
        return Some(Classification::new(Category::Tag, "AWS_Tag"));
    }
    if cp == SNEAKY_ZERO || cp == SNEAKY_ONE {
        return Some(Classification::new(Category::SneakyBits, "SneakyBits"));
    }
    if is_variation_selector(cp) {
        return Some(Classification::new(
            Category::VariationSelector,
            "VarSelector",
        ));
    }
    if bidi_label(cp).is_some() {
        return Some(Classification::new(Category::Bidi, "BidiControl"));
    }
    if cp == BRAILLE_BLANK {
        return Some(Classification::new(Category::VariableSpace, "BrailleBlank"));
    }
    if VARIABLE_SPACES.contains(&cp) || cp == NO_BREAK_SPACE {
        return Some(Classification::new(Category::VariableSpace, "VarSpace"));
    }
    if REGIONAL_INDICATORS.contains(&cp) {
        return Some(Classification::new(
            Category::RegionalIndicator,
            "Regional",
        ));
    }
    if INTERLINEAR_ANNOTATIONS.contains(&cp) || MUSICAL_ANNOTATIONS.contains(&cp) {
        return Some(Classification::new(Category::Annotation, "Annotation"));
    }
    if SMART_QUOTES.binary_search(&cp).is_ok() {
        return Some(Classification::new(Category::SmartQuote, "SmartQuote"));
    }
    if BULLETS.binary_search(&cp).is_ok() {
        return Some(Classification::new(Category::Bullet, "LLM-Bullet"));
    }
    if DASHES.binary_search(&cp).is_ok() {
        return Some(Classification::new(Category::Dash, "LLM-Punct"));
    }
    if cp == HORIZONTAL_BAR {
        return Some(Classification::new(
            Category::HorizontalBar,
            "HorizontalBar",
        ));
    }
    if cp == MULTIPLICATION_SIGN {
        return Some(Classification::new(Category::Multiplication, "MultSign"));
    }

    None
}

/// Whether `c` is any kind of stealth character.
#[must_use]
pub fn is_stealth_char(c: char) -> bool {
    classify_char(c).is_some()
}
