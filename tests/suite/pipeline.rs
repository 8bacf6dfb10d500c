//! End-to-end scanning tests

use crate::common::{reconstruct, sneaky_bits, tags};
use unveil_core::report::{ReportOptions, render_annotated};
use unveil_core::{
    classify, classify_char, clean, decode_bidi, decode_sneaky_bits, decode_tags, scan,
};
use unveil_types::{Category, ScanResult, Segment};

fn stealth_categories(result: &ScanResult) -> Vec<(Category, String, usize)> {
    result
        .segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Stealth {
                category,
                decoded,
                count,
                ..
            } => Some((*category, decoded.clone(), *count)),
            Segment::Text { .. } => None,
        })
        .collect()
}

#[test]
fn zero_width_between_letters() {
    let result = scan("A\u{200B}B");
    assert_eq!(result.cleaned, "AB");
    assert_eq!(result.stats.stealth_count, 1);
    assert_eq!(result.stats.count(Category::ZeroWidth), 1);
    assert_eq!(
        result.stats.labels.iter().copied().collect::<Vec<_>>(),
        vec!["Zero-Width"]
    );
}

#[test]
fn dash_family_artifacts() {
    let result = scan("A\u{2015}B\u{00D7}C\u{2E3A}D\u{2E3B}E\u{2192}F");
    assert_eq!(result.cleaned, "A-BxC--D---E->F");
    assert_eq!(result.stats.count(Category::HorizontalBar), 1);
    assert_eq!(result.stats.count(Category::Multiplication), 1);
    assert_eq!(result.stats.count(Category::Dash), 3);
}

#[test]
fn empty_input() {
    let result = scan("");
    assert_eq!(result, ScanResult::empty());
    assert!(result.is_clean());
}

#[test]
fn smuggled_payloads_are_decoded_in_place() {
    let input = format!("Hello{} world{}!", tags("secret"), sneaky_bits("ok"));
    let result = scan(&input);

    assert_eq!(
        stealth_categories(&result),
        vec![
            (Category::Tag, "secret".to_string(), 6),
            (Category::SneakyBits, "ok".to_string(), 16),
        ]
    );
    assert_eq!(result.cleaned, "Hello world!");
    assert_eq!(result.stats.stealth_count, 22);
    assert_eq!(reconstruct(&input, &result), input);
    assert_eq!(
        render_annotated(&result, ReportOptions::default()),
        "Hello⟦TAG:secret×6⟧ world⟦SNEAKY:ok×16⟧!"
    );
}

#[test]
fn mixed_input_is_partitioned() {
    let input = "\u{201C}quoted\u{201D}\u{00A0}\u{2022} item\u{FE0F}\u{202E}abc\u{202C}\u{1F1EC}\u{1F1E7}\u{FFF9}";
    let result = scan(input);
    assert_eq!(reconstruct(input, &result), input);
    let sum: usize = result.stats.category_counts.values().sum();
    assert_eq!(sum, result.stats.stealth_count);
    assert!(result.stats.stealth_count <= result.stats.total_chars);
    assert_eq!(result.stats.total_chars, input.chars().count());
}

#[test]
fn decoders_report_scalar_consumption() {
    let text = format!("{}x", tags("AB"));
    let outcome = decode_tags(&text, 0);
    assert_eq!(outcome.decoded, "AB");
    assert_eq!(outcome.consumed, 2);
    assert_eq!(outcome.byte_len, 8);

    let text = format!("{}z", sneaky_bits("A"));
    let outcome = decode_sneaky_bits(&text, 0);
    assert_eq!(outcome.decoded, "A");
    assert_eq!(outcome.consumed, 8);

    assert!(decode_bidi("\u{202A}", 0).decoded.contains("[UNBALANCED"));
}

#[test]
fn classifier_examples() {
    assert!(classify_char('A').is_none());
    assert_eq!(classify(0x200B).map(|c| c.category), Some(Category::ZeroWidth));
    assert_eq!(classify(0xE0041).map(|c| c.category), Some(Category::Tag));
    assert_eq!(classify(0x2062).map(|c| c.category), Some(Category::SneakyBits));
    assert_eq!(classify(0x2015).map(|c| c.category), Some(Category::HorizontalBar));
    assert_eq!(classify(0x00D7).map(|c| c.category), Some(Category::Multiplication));
    assert!(classify(0xD800).is_none());
    assert_eq!(clean("\u{2015}"), "-");
    assert_eq!(clean("\u{00D7}"), "x");
}

#[test]
fn scan_result_serializes_with_category_codes() {
    let result = scan("a\u{200B}\u{2014}");
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["cleaned"], "a-");
    assert_eq!(value["stats"]["category_counts"]["ZERO"], 1);
    assert_eq!(value["stats"]["category_counts"]["DASH"], 1);
    assert_eq!(value["segments"][0]["kind"], "text");
    assert_eq!(value["segments"][1]["category"], "ZERO");
    assert_eq!(value["segments"][1]["span"]["start"], 1);
    assert_eq!(value["segments"][1]["span"]["end"], 4);
}

#[test]
fn results_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ScanResult>();
    assert_send_sync::<Segment>();

    let inputs: Vec<String> = (0..8)
        .map(|i| format!("line {i}{}\u{200B}{}", tags("x"), sneaky_bits("y")))
        .collect();
    let expected: Vec<ScanResult> = inputs.iter().map(|input| scan(input)).collect();

    let concurrent: Vec<ScanResult> = std::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| s.spawn(move || scan(input)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    assert_eq!(concurrent, expected);
}
