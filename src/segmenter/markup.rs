// WHY: In markup mode a boundary character may sit inside a tag name or attribute value.
// The reconciler extends such candidates until tags balance and the text ends outside a tag.

use regex_automata::{meta::Regex, Anchored, Input};
use tracing::debug;

use super::scanner::is_boundary_char;
use crate::error::{Result, SegmentError};

/// Closing or self-closing tags, optionally separated by whitespace, up to end of input
const CLOSING_TAGS_ONLY: &str = r"(?:\s*<(?:/[^<>]*|[^<>]*/)>)+\s*$";

#[derive(Debug, Clone)]
pub struct TagReconciler {
    closing_tags_only: Regex,
}

impl TagReconciler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            closing_tags_only: Regex::new(CLOSING_TAGS_ONLY)?,
        })
    }

    /// Grow the candidate `text[start..end]` until it is a complete sentence.
    ///
    /// `next_boundary` searches the next accepted boundary at or after a byte
    /// offset. Each byte of the candidate is counted once, and every step must
    /// move `end` strictly forward, so the work is linear in the input length.
    pub fn reconcile<F>(&self, text: &str, start: usize, mut end: usize, mut next_boundary: F) -> Result<usize>
    where
        F: FnMut(usize) -> Option<usize>,
    {
        let mut balance = TagBalance::starting_at(start);
        loop {
            balance.advance(text, end);
            if balance.is_unbalanced() {
                end = text[end..].find('>').map_or(text.len(), |gt| end + gt + 1);
                balance.advance(text, end);
                debug!(start, end, "Extended candidate to close a cut tag");
            }
            if end >= text.len() {
                return Ok(text.len());
            }
            if !balance.is_unbalanced() && balance.ends_cleanly(text, start) {
                return Ok(end);
            }
            end = match next_boundary(end) {
                Some(next) if next <= end => return Err(SegmentError::NoProgress { position: end }),
                Some(next) => next,
                None => text.len(),
            };
        }
    }

    /// Check if everything left consists of closing or self-closing tags
    pub fn only_closing_tags(&self, rest: &str) -> bool {
        self.closing_tags_only
            .is_match(Input::new(rest).anchored(Anchored::Yes))
    }
}

/// Running tag counts over `text[start..scanned]`
#[derive(Debug)]
struct TagBalance {
    scanned: usize,
    opening: usize,
    closing: usize,
    /// Offset of the last `<` seen
    last_open: Option<usize>,
    /// `>` seen since the last `<`
    closing_since_open: usize,
}

impl TagBalance {
    fn starting_at(start: usize) -> Self {
        Self {
            scanned: start,
            opening: 0,
            closing: 0,
            last_open: None,
            closing_since_open: 0,
        }
    }

    /// Count the bytes between the last scanned offset and `to`
    fn advance(&mut self, text: &str, to: usize) {
        if to <= self.scanned {
            return;
        }
        for (offset, &byte) in text.as_bytes()[self.scanned..to].iter().enumerate() {
            match byte {
                b'<' => {
                    self.opening += 1;
                    self.last_open = Some(self.scanned + offset);
                    self.closing_since_open = 0;
                }
                b'>' => {
                    self.closing += 1;
                    self.closing_since_open += 1;
                }
                _ => {}
            }
        }
        self.scanned = to;
    }

    /// More `<` than `>`: a tag was cut in the middle
    fn is_unbalanced(&self) -> bool {
        self.opening > self.closing
    }

    /// Candidate ends with boundary punctuation, optionally followed by one closing tag
    fn ends_cleanly(&self, text: &str, start: usize) -> bool {
        let end = self.scanned;
        let body_end = match self.last_open {
            Some(open)
                if self.closing_since_open == 1
                    && text[..end].ends_with('>')
                    && text[open..].starts_with("</") =>
            {
                open
            }
            _ => end,
        };
        text[start..body_end].chars().next_back().is_some_and(is_boundary_char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Stand-in boundary search: the next '.' or ':' anywhere
    fn next_punct(text: &str) -> impl FnMut(usize) -> Option<usize> + '_ {
        move |from| text[from..].find(|c: char| c == '.' || c == ':').map(|idx| from + idx + 1)
    }

    fn reconcile(text: &str, end: usize) -> &str {
        let reconciler = TagReconciler::new().unwrap();
        let end = reconciler.reconcile(text, 0, end, next_punct(text)).unwrap();
        &text[..end]
    }

    fn ends_cleanly(candidate: &str) -> bool {
        let mut balance = TagBalance::starting_at(0);
        balance.advance(candidate, candidate.len());
        balance.ends_cleanly(candidate, 0)
    }

    #[test]
    fn test_period_in_element_name() {
        let text = "<grc.test>text.</grc.test> text 2.";
        assert_eq!(reconcile(text, 5), "<grc.test>text.");
    }

    #[test]
    fn test_period_in_attribute_value() {
        let text = r#"<grc no="1.1"> text.</grc> text 2."#;
        assert_eq!(reconcile(text, 11), r#"<grc no="1.1"> text."#);
    }

    #[test]
    fn test_text_before_closing_tag_is_not_a_sentence_end() {
        let text = "<grc.test>text</grc.test> resumed. text 2.";
        assert_eq!(reconcile(text, 5), "<grc.test>text</grc.test> resumed.");
    }

    #[test]
    fn test_punctuation_then_closing_tag_is_complete() {
        let text = "<a>text.</a.b> rest.";
        assert_eq!(reconcile(text, 8), "<a>text.");
        assert!(ends_cleanly("<a>text.</a.b>"));
        assert!(!ends_cleanly("<a>text</a.b>"));
    }

    #[test]
    fn test_runs_to_end_without_boundary() {
        let text = "<tei:TEI><l>no punctuation here</l></tei:TEI>";
        assert_eq!(reconcile(text, 5), text);
    }

    #[test]
    fn test_unclosed_tag_consumes_rest() {
        let text = "<l n=\"1.";
        assert_eq!(reconcile(text, 8), text);
    }

    #[test]
    fn test_only_closing_tags() {
        let reconciler = TagReconciler::new().unwrap();
        assert!(reconciler.only_closing_tags("  </div>"));
        assert!(reconciler.only_closing_tags(" <milestone unit=\"page\" n=\"210\"/> </div>\n"));
        assert!(reconciler.only_closing_tags("\n</tei:body>\n</tei:text>\n</tei:TEI>"));
        assert!(!reconciler.only_closing_tags(" text 2."));
        assert!(!reconciler.only_closing_tags("</l> text"));
        assert!(!reconciler.only_closing_tags(" <l n=\"2\">"));
        assert!(!reconciler.only_closing_tags(""));
    }

    #[test]
    fn test_stalled_boundary_search_is_a_fault() {
        let reconciler = TagReconciler::new().unwrap();
        let text = "<grc.test>text</grc.test> resumed.";

        let err = reconciler.reconcile(text, 0, 5, Some).unwrap_err();
        assert!(matches!(err, SegmentError::NoProgress { position: 10 }));

        let err = reconciler.reconcile(text, 0, 5, |_| Some(0)).unwrap_err();
        assert!(matches!(err, SegmentError::NoProgress { .. }));
    }

    #[test]
    fn test_counts_start_at_candidate_start() {
        let reconciler = TagReconciler::new().unwrap();
        // The unclosed tag before `start` belongs to an earlier candidate
        let text = "<p n=\"1\" x. Marcus est. Cicero est.";
        let start = 11;
        let end = reconciler.reconcile(text, start, 23, next_punct(text)).unwrap();
        assert_eq!(&text[start..end], " Marcus est.");
    }

    #[test]
    fn test_balance_is_counted_incrementally() {
        let text = "<a><b.c>x</b.c>.</a> y";
        let mut balance = TagBalance::starting_at(0);
        balance.advance(text, 6);
        assert!(balance.is_unbalanced());
        balance.advance(text, 8);
        assert!(!balance.is_unbalanced());
        // Going backwards changes nothing
        balance.advance(text, 2);
        assert_eq!(balance.scanned, 8);
        balance.advance(text, 16);
        assert!(balance.ends_cleanly(text, 0));
        balance.advance(text, 20);
        assert!(balance.ends_cleanly(text, 0));
        assert_eq!((balance.opening, balance.closing), (4, 4));
    }
}
