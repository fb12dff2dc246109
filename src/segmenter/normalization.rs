// WHY: Badly spaced direct speech (`est. " Cicero`) hides which sentence owns a quote.
// This pre-pass pulls each spaced quote onto the word it belongs to.

use std::borrow::Cow;

/// Only the plain ASCII double quote is normalized
pub const DIRECT_SPEECH_QUOTE: u8 = b'"';

/// Whether a direct speech quote is currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Closed,
    Open,
}

impl QuoteState {
    pub fn toggle(self) -> Self {
        match self {
            QuoteState::Closed => QuoteState::Open,
            QuoteState::Open => QuoteState::Closed,
        }
    }
}

/// Normalize whitespace around spaced quotes, borrowing when nothing needs fixing.
///
/// # Example
/// ```
/// use philoseg::segmenter::normalization::normalize_quote_spacing;
/// let fixed = normalize_quote_spacing(r#""Marcus est. " Cicero est. " Iulius est. ""#);
/// assert_eq!(fixed, r#""Marcus est." Cicero est. "Iulius est.""#);
/// ```
pub fn normalize_quote_spacing(text: &str) -> Cow<'_, str> {
    if !text.contains(" \" ") {
        return Cow::Borrowed(text);
    }
    let (normalized, _) = normalize_quote_spacing_from(text, QuoteState::Closed);
    Cow::Owned(normalized)
}

/// Normalize starting from `state` and return the state after the last quote.
///
/// A quote counts as spaced when exactly one space precedes it and exactly one
/// space or the end of input follows it. A spaced closing quote loses the space
/// before it; a spaced opening quote loses the space after it.
pub fn normalize_quote_spacing_from(text: &str, mut state: QuoteState) -> (String, QuoteState) {
    let bytes = text.as_bytes();
    let mut normalized = String::with_capacity(text.len());
    // Bytes of `text` before this offset are already in `normalized`
    let mut copied = 0;

    for (idx, &byte) in bytes.iter().enumerate() {
        if byte != DIRECT_SPEECH_QUOTE {
            continue;
        }
        // copied < idx: the space before this quote was not dropped already
        if copied < idx && is_spaced(bytes, idx) {
            match state {
                QuoteState::Open => {
                    normalized.push_str(&text[copied..idx - 1]);
                    copied = idx;
                }
                QuoteState::Closed if idx + 1 < bytes.len() => {
                    normalized.push_str(&text[copied..=idx]);
                    copied = idx + 2;
                }
                QuoteState::Closed => {}
            }
        }
        state = state.toggle();
    }

    normalized.push_str(&text[copied.min(text.len())..]);
    (normalized, state)
}

fn is_spaced(bytes: &[u8], idx: usize) -> bool {
    let single_space_before = idx >= 1
        && bytes[idx - 1] == b' '
        && (idx < 2 || bytes[idx - 2] != b' ');
    let single_space_after = match bytes.get(idx + 1) {
        None => true,
        Some(b' ') => bytes.get(idx + 2) != Some(&b' '),
        Some(_) => false,
    };
    single_space_before && single_space_after
}
