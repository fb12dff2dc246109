// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use philoseg::{SegmentOptions, Segmenter, Sentence};
use std::sync::OnceLock;

static SHARED_SEGMENTER: OnceLock<Segmenter> = OnceLock::new();

/// Shared default segmenter
pub fn segmenter() -> &'static Segmenter {
    SHARED_SEGMENTER.get_or_init(|| Segmenter::new().expect("Failed to create segmenter"))
}

/// Segment with the given options, panicking on error
pub fn sentences(text: &str, options: SegmentOptions) -> Vec<Sentence> {
    segmenter()
        .segment(text, &options)
        .unwrap_or_else(|e| panic!("Segmentation failed for {text:?}: {e}"))
}

/// Sentence texts only
pub fn texts(text: &str, options: SegmentOptions) -> Vec<String> {
    sentences(text, options)
        .into_iter()
        .map(Sentence::into_text)
        .collect()
}

/// Markup-mode sentence texts
pub fn xml_texts(text: &str) -> Vec<String> {
    texts(text, SegmentOptions::default().with_xml(true))
}

/// Compare sentence lists one by one, printing every sentence on mismatch
pub fn assert_sentences(actual: &[String], expected: &[&str], context: &str) {
    if actual.len() != expected.len() {
        for (i, sentence) in actual.iter().enumerate() {
            println!("{i}\t{sentence}");
        }
        panic!(
            "{}: Sentence count mismatch. Expected {}, got {}",
            context,
            expected.len(),
            actual.len()
        );
    }

    for (i, (actual, expected)) in actual.iter().zip(expected).enumerate() {
        if actual != expected {
            panic!(
                "{}: Sentence {} mismatch\nExpected: {:?}\nActual:   {:?}",
                context, i, expected, actual
            );
        }
    }
}

/// Strip all whitespace, for reconstruction checks
pub fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
