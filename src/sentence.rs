// WHY: Output model of the engine plus the assembler that numbers finished sentences

use serde::Serialize;
use std::fmt;
use tracing::debug;

/// A finished sentence, never empty and never mutated after assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    text: String,
    id: Option<usize>,
}

impl Sentence {
    pub(crate) fn new(text: String, id: Option<usize>) -> Self {
        Self { text, id }
    }

    /// Trimmed sentence content including reattached delimiters and tags
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based position in the output, `None` when indexing is off
    pub fn id(&self) -> Option<usize> {
        self.id
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Collection that receives every segmentation result as a side effect
///
/// # Example
/// ```
/// use philoseg::{Segmenter, SegmentOptions, Sentence};
///
/// let segmenter = Segmenter::new().unwrap();
/// let mut paragraphs: Vec<Vec<Sentence>> = Vec::new();
/// segmenter.segment_into("Cicero est. Caesar est.", &SegmentOptions::default(), &mut paragraphs).unwrap();
/// segmenter.segment_into("Marcus est.", &SegmentOptions::default(), &mut paragraphs).unwrap();
/// assert_eq!(paragraphs.len(), 2);
/// ```
pub trait SentenceSink {
    fn add_sentences(&mut self, sentences: &[Sentence]);
}

/// Flat aggregation: sentences of every call end up in one list
impl SentenceSink for Vec<Sentence> {
    fn add_sentences(&mut self, sentences: &[Sentence]) {
        self.extend_from_slice(sentences);
    }
}

/// Grouped aggregation: one entry per call
impl SentenceSink for Vec<Vec<Sentence>> {
    fn add_sentences(&mut self, sentences: &[Sentence]) {
        self.push(sentences.to_vec());
    }
}

/// Turn trimmed, non-empty scanner pieces into numbered sentences
pub(crate) fn assemble<'a, I>(pieces: I, indexing: bool) -> Vec<Sentence>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sentences = Vec::new();
    for piece in pieces {
        let text = piece.trim();
        if text.is_empty() {
            continue;
        }
        let id = indexing.then(|| sentences.len() + 1);
        debug!(id = ?id, sentence = text, "Segmented sentence");
        sentences.push(Sentence::new(text.to_string(), id));
    }
    sentences
}
