// WHY: Single-pass boundary scanner with tiered recovery for input that has no punctuation
// Patterns find candidate marks; abbreviation and entity checks run as explicit lookbehind

use regex_automata::{meta::Regex, Input};
use std::borrow::Cow;
use tracing::debug;

use super::abbreviations::AbbreviationGuard;
use super::markup::TagReconciler;
use super::trailing::TrailingDelimiters;
use crate::error::{Result, SegmentError};
use crate::options::{SegmentOptions, DEFAULT_NEWLINE_BOUNDARY};

/// Sentence-ending punctuation: Latin marks plus Greek ano teleia and question mark
pub const BOUNDARY_CHARS: &[char] = &['.', ';', '?', '!', ':', '\u{00B7}', '\u{0387}', '\u{037E}'];

const BOUNDARY_PUNCTUATION: &str = r"[.;?!:\u{00B7}\u{0387}\u{037E}]";
/// Recovery pattern once no punctuation boundary exists at all
const SINGLE_NEWLINE: &str = r"\r?\n";
/// Longest entity name considered when a `;` may close `&name;`
const MAX_ENTITY_NAME: usize = 10;

pub fn is_boundary_char(ch: char) -> bool {
    BOUNDARY_CHARS.contains(&ch)
}

/// Scanner progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Searching with the configured boundary pattern
    Scanning,
    /// No boundary matched anywhere; narrowed to single newlines
    Recovery,
    Done,
}

/// Build the boundary pattern for the given options
pub fn boundary_pattern(options: &SegmentOptions) -> String {
    if options.xml {
        // Newlines carry no meaning inside markup
        BOUNDARY_PUNCTUATION.to_string()
    } else {
        format!(r"{BOUNDARY_PUNCTUATION}|(?:\r?\n){{{},}}", options.newline_boundary)
    }
}

/// Every pattern a scan needs, compiled once and shared by all calls
#[derive(Debug, Clone)]
pub struct ScanPatterns {
    /// Plain text with the default newline run
    plain_boundary: Regex,
    markup_boundary: Regex,
    single_newline: Regex,
    plain_trailing: TrailingDelimiters,
    markup_trailing: TrailingDelimiters,
    reconciler: TagReconciler,
}

impl ScanPatterns {
    pub fn new() -> Result<Self> {
        let defaults = SegmentOptions::default();
        Ok(Self {
            plain_boundary: Regex::new(&boundary_pattern(&defaults))?,
            markup_boundary: Regex::new(&boundary_pattern(&defaults.with_xml(true)))?,
            single_newline: Regex::new(SINGLE_NEWLINE)?,
            plain_trailing: TrailingDelimiters::new(false)?,
            markup_trailing: TrailingDelimiters::new(true)?,
            reconciler: TagReconciler::new()?,
        })
    }

    /// Boundary pattern for `options`; only a non-default newline run is compiled on demand
    pub fn boundary(&self, options: &SegmentOptions) -> Result<Cow<'_, Regex>> {
        if options.xml {
            Ok(Cow::Borrowed(&self.markup_boundary))
        } else if options.newline_boundary == DEFAULT_NEWLINE_BOUNDARY {
            Ok(Cow::Borrowed(&self.plain_boundary))
        } else {
            debug!(newline_boundary = options.newline_boundary, "Compiling boundary pattern");
            Ok(Cow::Owned(Regex::new(&boundary_pattern(options))?))
        }
    }

    fn trailing(&self, markup: bool) -> &TrailingDelimiters {
        if markup {
            &self.markup_trailing
        } else {
            &self.plain_trailing
        }
    }
}

/// Walks one normalized input and cuts it into trimmed sentence pieces
pub struct BoundaryScanner<'a> {
    text: &'a str,
    guard: &'a AbbreviationGuard,
    patterns: &'a ScanPatterns,
    markup: bool,
    pattern: Cow<'a, Regex>,
    cursor: usize,
    state: ScanState,
}

impl<'a> BoundaryScanner<'a> {
    pub fn new(
        text: &'a str,
        guard: &'a AbbreviationGuard,
        patterns: &'a ScanPatterns,
        options: &SegmentOptions,
    ) -> Result<Self> {
        Ok(Self {
            text,
            guard,
            patterns,
            markup: options.xml,
            pattern: patterns.boundary(options)?,
            cursor: 0,
            state: ScanState::Scanning,
        })
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Scan to the end of input, returning trimmed non-empty pieces in order
    pub fn scan(mut self) -> Result<Vec<&'a str>> {
        let text = self.text;
        let patterns = self.patterns;
        let trailing = patterns.trailing(self.markup);
        let mut pieces = Vec::new();

        while self.cursor < text.len() {
            let mut start = self.cursor;
            let mut end = match self.next_boundary(start) {
                Some(end) => end,
                // Broken-off text after at least one sentence, or anything left in markup mode
                None if !pieces.is_empty() || self.markup => text.len(),
                None if self.state == ScanState::Scanning => {
                    debug!("No boundary found, retrying with single newline boundaries");
                    self.state = ScanState::Recovery;
                    self.pattern = Cow::Borrowed(&patterns.single_newline);
                    start = 0;
                    self.next_boundary(start).unwrap_or(text.len())
                }
                None => text.len(),
            };

            if self.markup {
                end = patterns
                    .reconciler
                    .reconcile(text, start, end, |from| self.next_boundary(from))?;
            }
            end = trailing.collect(text, end);

            // Every match is non-empty, so this only fires on a pattern bug
            if end <= self.cursor {
                return Err(SegmentError::NoProgress { position: self.cursor });
            }
            self.cursor = end;

            if self.markup && end < text.len() && patterns.reconciler.only_closing_tags(&text[end..]) {
                debug!(end, "Absorbing trailing closing tags");
                end = text.len();
                self.cursor = end;
            }

            let piece = text[start..end].trim();
            if !piece.is_empty() {
                pieces.push(piece);
            }
        }

        self.state = ScanState::Done;
        Ok(pieces)
    }

    /// Byte offset just past the next accepted boundary at or after `from`
    fn next_boundary(&self, from: usize) -> Option<usize> {
        let mut at = from;
        while at < self.text.len() {
            let found = self.pattern.find(Input::new(self.text).range(at..))?;
            if self.accepts(found.start(), found.end()) {
                return Some(found.end());
            }
            at = found.end();
        }
        None
    }

    /// Apply the lookaround rules a plain pattern cannot express
    fn accepts(&self, start: usize, end: usize) -> bool {
        let before = &self.text[..start];
        match self.text[start..end].chars().next() {
            // Doubled periods never end a sentence by themselves
            Some('.') => !self.text[end..].starts_with('.') && !self.guard.guards(before, self.markup),
            Some(';') => !closes_entity(before),
            Some(_) => true,
            None => false,
        }
    }
}

/// Check if a `;` after `prefix` terminates a character entity such as `&quot;` or `&#183;`
fn closes_entity(prefix: &str) -> bool {
    let name_len = prefix
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '#')
        .take(MAX_ENTITY_NAME + 1)
        .count();
    if name_len == 0 || name_len > MAX_ENTITY_NAME {
        return false;
    }
    // Only ASCII chars counted, so chars and bytes agree
    let (head, name) = prefix.split_at(prefix.len() - name_len);
    if !head.ends_with('&') {
        return false;
    }
    match name.strip_prefix('#') {
        Some(numeric) => match numeric.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !numeric.is_empty() && numeric.chars().all(|c| c.is_ascii_digit()),
        },
        None => name.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}
