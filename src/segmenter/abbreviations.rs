// WHY: Centralized abbreviation handling for sentence boundary detection
// A period directly after a catalogued abbreviation never closes a sentence

use std::collections::HashSet;

/// Roman praenomina, usually abbreviated before a nomen ("M. Tullius")
pub const PRAENOMINA: &[&str] = &[
    "A", "Ap", "App", "C", "Cn", "D", "K", "L", "M", "M'", "Mam", "N", "P", "Post",
    "Q", "Ser", "Sex", "Sp", "T", "Ti", "V", "Vol",
];

/// Calendar terms used in dating formulas ("a. d. V Kal. Apr.")
pub const CALENDAR: &[&str] = &[
    "a", "d", "a.d", "Kal", "Non", "Id", "Ian", "Feb", "Mart", "Mar", "Apr", "Mai",
    "Iun", "Iul", "Quint", "Sext", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Offices and editorial shorthand
pub const OFFICES: &[&str] = &["cos", "coss", "procos", "pr", "tr", "pl", "imp", "cf", "sc"];

/// Efficient abbreviation lookup, read-only once built
#[derive(Debug, Clone)]
pub struct AbbreviationGuard {
    entries: HashSet<String>,
    /// Length in chars of the longest entry, bounds the backward scan
    longest: usize,
}

impl AbbreviationGuard {
    /// Create guard with the default Latin catalogue
    pub fn new() -> Self {
        Self::with_entries(PRAENOMINA.iter().chain(CALENDAR).chain(OFFICES).copied())
    }

    /// Create guard from a custom catalogue. Entries may carry their closing period or not.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guard = Self {
            entries: HashSet::new(),
            longest: 0,
        };
        guard.extend(entries);
        guard
    }

    /// Add entries to the catalogue
    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let entry = entry.as_ref().trim().trim_end_matches('.');
            if entry.is_empty() {
                continue;
            }
            self.longest = self.longest.max(entry.chars().count());
            self.entries.insert(entry.to_string());
        }
    }

    /// Check if a word (without its period) is catalogued
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains(word.trim_end_matches('.'))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the period following `prefix` belongs to an abbreviation.
    ///
    /// The abbreviation must start at a word boundary: whitespace, start of
    /// input, or a closing `>` when `after_tag` is set (markup mode).
    pub fn guards(&self, prefix: &str, after_tag: bool) -> bool {
        let mut word_start = prefix.len();
        for (idx, ch) in prefix.char_indices().rev().take(self.longest + 1) {
            if ch.is_whitespace() || (after_tag && ch == '>') {
                return self.entries.contains(&prefix[word_start..]);
            }
            word_start = idx;
        }
        // Either the start of input was reached or the word is longer than any entry
        word_start == 0 && self.entries.contains(prefix)
    }
}

impl Default for AbbreviationGuard {
    fn default() -> Self {
        Self::new()
    }
}
