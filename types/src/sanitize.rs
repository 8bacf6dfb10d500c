//! Terminal-safe rendering of scanned text.
//!
//! Scanned input is untrusted: besides the stealth characters the engine
//! reports, it may carry terminal control sequences. Stripping them (as a
//! display sanitizer would) hides evidence, so this module makes them visible
//! instead, using caret notation for C0 controls and DEL and `<U+XXXX>` for C1
//! controls.
//!
//! An `ESC [ 2 J` sequence therefore renders as the inert text `^[[2J`.

use std::borrow::Cow;

/// Escape control characters so `input` can be printed without the terminal
/// interpreting any of it.
///
/// Newlines, tabs and carriage returns pass through unchanged.
///
/// Returns `Cow::Borrowed` when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use unveil_types::escape_terminal_text;
///
/// assert_eq!(escape_terminal_text("plain"), "plain");
/// assert_eq!(escape_terminal_text("a\x1b[31mb"), "a^[[31mb");
/// ```
#[must_use]
pub fn escape_terminal_text(input: &str) -> Cow<'_, str> {
    if !input.chars().any(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        if !needs_escape(c) {
            result.push(c);
        } else if is_c1_control(c) {
            result.push_str(&format!("<U+{:04X}>", c as u32));
        } else {
            result.push('^');
            result.push(caret_partner(c));
        }
    }

    Cow::Owned(result)
}

fn needs_escape(c: char) -> bool {
    (is_c0_control(c) && !is_allowed_control(c)) || c == '\x7f' || is_c1_control(c)
}

/// Check if character is a C0 control character (0x00-0x1F).
fn is_c0_control(c: char) -> bool {
    c <= '\x1f'
}

fn is_allowed_control(c: char) -> bool {
    matches!(c, '\n' | '\t' | '\r')
}

/// Check if character is a C1 control character (0x80-0x9F).
fn is_c1_control(c: char) -> bool {
    ('\u{0080}'..='\u{009f}').contains(&c)
}

/// Caret-notation partner: `\x00` -> `@`, `\x1b` -> `[`, DEL -> `?`.
fn caret_partner(c: char) -> char {
    char::from((c as u8) ^ 0x40)
}
