pub mod error;
pub mod options;
pub mod render;
pub mod segmenter;
pub mod sentence;

// Re-export main types for convenient access
pub use error::{Result, SegmentError};
pub use options::SegmentOptions;
pub use segmenter::{segment, AbbreviationGuard, Segmenter};
pub use sentence::{Sentence, SentenceSink};
