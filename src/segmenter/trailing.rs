// WHY: Closing quotes, parentheses and closing tags right after a boundary belong to the
// sentence they close, not to the next one

use regex_automata::{meta::Regex, Anchored, Input};

use crate::error::Result;

/// Closing quotation marks: plain, curly, and their escaped entities
const CLOSING_QUOTE: &str = r#"['"\u{201D}\u{2019}]|&(?:apos|quot);"#;
/// Closing parenthesis outside markup
const CLOSING_PAREN: &str = r"\)";
/// Closing parenthesis, or whitespace and a closing tag, in markup mode
const CLOSING_PAREN_OR_TAG: &str = r"\)|\s*</[^<>]*>";

/// Anchored matchers for delimiters that trail a sentence boundary
#[derive(Debug, Clone)]
pub struct TrailingDelimiters {
    quote: Regex,
    closer: Regex,
}

impl TrailingDelimiters {
    pub fn new(markup: bool) -> Result<Self> {
        let closer = if markup { CLOSING_PAREN_OR_TAG } else { CLOSING_PAREN };
        Ok(Self {
            quote: Regex::new(CLOSING_QUOTE)?,
            closer: Regex::new(closer)?,
        })
    }

    /// Consume an optional closing quote then an optional closer starting at `at`.
    /// Returns the new end of the sentence.
    pub fn collect(&self, text: &str, at: usize) -> usize {
        let after_quote = at + Self::anchored_len(&self.quote, &text[at..]);
        after_quote + Self::anchored_len(&self.closer, &text[after_quote..])
    }

    fn anchored_len(pattern: &Regex, rest: &str) -> usize {
        pattern
            .find(Input::new(rest).anchored(Anchored::Yes))
            .map_or(0, |m| m.end())
    }
}
