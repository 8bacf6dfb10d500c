//! Aggregate text statistics.

use std::collections::HashMap;

/// Shannon entropy of `text` in bits per Unicode scalar value:
/// `-sum(p(c) * log2(p(c)))` over the distinct characters `c`.
///
/// The empty string has entropy 0.
#[must_use]
pub fn shannon_entropy(text: &str) -> f64 {
    let mut freq: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in text.chars() {
        *freq.entry(c).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let len = total as f64;
    freq.values().fold(0.0, |entropy, &count| {
        let p = count as f64 / len;
        entropy - p * p.log2()
    })
}

/// Percentage of stealth characters, 0 when `total` is 0.
#[must_use]
pub fn density(stealth: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    stealth as f64 / total as f64 * 100.0
}
