// WHY: One error type for the engine so callers can tell bad options apart from internal faults

use thiserror::Error;

/// Errors raised by a segmentation call
#[derive(Error, Debug)]
pub enum SegmentError {
    /// Options rejected at call entry
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The scanner failed to move its cursor forward
    #[error("scanner made no forward progress at byte {position}")]
    NoProgress { position: usize },

    /// A boundary pattern failed to compile
    #[error("boundary pattern error: {0}")]
    Pattern(#[from] regex_automata::meta::BuildError),
}

/// Result type for segmentation operations
pub type Result<T> = std::result::Result<T, SegmentError>;
