// WHY: Orchestrates one segmentation call: validate, trim, normalize quotes, scan, assemble
// Each call owns its scan state; the catalogue and compiled patterns are shared

use std::sync::OnceLock;
use tracing::debug;

pub mod abbreviations;
pub mod markup;
pub mod normalization;
pub mod scanner;
pub mod trailing;

pub use abbreviations::AbbreviationGuard;
pub use normalization::{normalize_quote_spacing, QuoteState};
pub use scanner::{BoundaryScanner, ScanPatterns, ScanState, BOUNDARY_CHARS};

use crate::error::Result;
use crate::options::SegmentOptions;
use crate::sentence::{assemble, Sentence, SentenceSink};

/// Sentence segmenter for Latin and Greek texts
#[derive(Debug, Clone)]
pub struct Segmenter {
    guard: AbbreviationGuard,
    patterns: ScanPatterns,
}

impl Segmenter {
    /// Create segmenter with the default abbreviation catalogue
    pub fn new() -> Result<Self> {
        Self::with_abbreviations(AbbreviationGuard::new())
    }

    /// Create segmenter with a custom abbreviation catalogue, compiling all boundary patterns
    pub fn with_abbreviations(guard: AbbreviationGuard) -> Result<Self> {
        Ok(Self {
            guard,
            patterns: ScanPatterns::new()?,
        })
    }

    pub fn abbreviations(&self) -> &AbbreviationGuard {
        &self.guard
    }

    /// Split `text` into sentences.
    ///
    /// Whitespace-only input yields an empty list; any other input yields at
    /// least one sentence.
    pub fn segment(&self, text: &str, options: &SegmentOptions) -> Result<Vec<Sentence>> {
        options.validate()?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Empty input, nothing to segment");
            return Ok(Vec::new());
        }

        let normalized = normalize_quote_spacing(trimmed);
        let pieces = BoundaryScanner::new(&normalized, &self.guard, &self.patterns, options)?.scan()?;
        let sentences = assemble(pieces, options.indexing);

        debug!(
            chars = trimmed.chars().count(),
            sentences = sentences.len(),
            xml = options.xml,
            "Segmentation complete"
        );
        Ok(sentences)
    }

    /// Segment and push the full result into `sink` as well
    pub fn segment_into<S>(&self, text: &str, options: &SegmentOptions, sink: &mut S) -> Result<Vec<Sentence>>
    where
        S: SentenceSink + ?Sized,
    {
        let sentences = self.segment(text, options)?;
        sink.add_sentences(&sentences);
        Ok(sentences)
    }
}

/// Convenience wrapper around [`Segmenter::segment`] with the default catalogue.
/// The segmenter behind it is built on first use and reused for the process.
///
/// # Example
/// ```
/// use philoseg::{segment, SegmentOptions};
///
/// let sentences = segment("C. Caesar est. M. Tullius Cicero est.", &SegmentOptions::default()).unwrap();
/// assert_eq!(sentences.len(), 2);
/// assert_eq!(sentences[1].text(), "M. Tullius Cicero est.");
/// assert_eq!(sentences[1].id(), Some(2));
/// ```
pub fn segment(text: &str, options: &SegmentOptions) -> Result<Vec<Sentence>> {
    static DEFAULT_SEGMENTER: OnceLock<Segmenter> = OnceLock::new();

    let segmenter = match DEFAULT_SEGMENTER.get() {
        Some(segmenter) => segmenter,
        None => {
            let segmenter = Segmenter::new()?;
            DEFAULT_SEGMENTER.get_or_init(|| segmenter)
        }
    };
    segmenter.segment(text, options)
}
