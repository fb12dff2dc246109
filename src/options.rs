// WHY: Per-call options with documented defaults, validated once before scanning starts

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};

/// Newline run that ends a sentence unless configured otherwise
pub const DEFAULT_NEWLINE_BOUNDARY: usize = 2;

/// Configuration for a single segmentation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// Assign sequential ids starting at 1 (default: true)
    pub indexing: bool,
    /// Consecutive newlines that form a boundary on their own (default: 2).
    /// Ignored in markup mode.
    pub newline_boundary: usize,
    /// Markup-aware reconciliation of tags (default: false)
    pub xml: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            indexing: true,
            newline_boundary: DEFAULT_NEWLINE_BOUNDARY,
            xml: false,
        }
    }
}

impl SegmentOptions {
    pub fn with_indexing(mut self, indexing: bool) -> Self {
        self.indexing = indexing;
        self
    }

    pub fn with_newline_boundary(mut self, newline_boundary: usize) -> Self {
        self.newline_boundary = newline_boundary;
        self
    }

    pub fn with_xml(mut self, xml: bool) -> Self {
        self.xml = xml;
        self
    }

    /// Reject option combinations the scanner cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.newline_boundary == 0 {
            return Err(SegmentError::InvalidConfig(
                "newline_boundary must be a positive number of newlines, got 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SegmentOptions::default();
        assert!(options.indexing);
        assert_eq!(options.newline_boundary, 2);
        assert!(!options.xml);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_newline_boundary_rejected() {
        let options = SegmentOptions::default().with_newline_boundary(0);
        let err = options.validate().unwrap_err();
        assert!(matches!(err, SegmentError::InvalidConfig(_)));
        assert!(err.to_string().contains("newline_boundary"));
    }

    #[test]
    fn test_partial_option_bag_merges_with_defaults() {
        let options: SegmentOptions = serde_json::from_str(r#"{"xml": true}"#).unwrap();
        assert_eq!(options, SegmentOptions::default().with_xml(true));

        let options: SegmentOptions =
            serde_json::from_str(r#"{"indexing": false, "newline_boundary": 3}"#).unwrap();
        assert!(!options.indexing);
        assert_eq!(options.newline_boundary, 3);
        assert!(!options.xml);
    }
}
