//! Error types for bidi level resolution.

use thiserror::Error;

/// Result type for bidi operations.
pub type Result<T> = std::result::Result<T, BidiError>;

/// Errors surfaced to callers of the resolver.
///
/// Every variant is an invalid argument: malformed text data (unmatched
/// isolates, unbalanced brackets, empty input) is always resolvable and never
/// produces an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidiError {
    /// Caller-supplied output buffer does not match the input length.
    #[error("output buffer holds {actual} levels but the paragraph has {expected} characters")]
    OutputLengthMismatch { expected: usize, actual: usize },

    /// Paragraph level code other than 0 (LTR), 1 (RTL) or 2 (auto).
    #[error("invalid paragraph embedding level {0}; expected 0, 1 or 2")]
    InvalidParagraphLevel(i8),

    /// Short class name that is not one of the UAX #9 bidi classes.
    #[error("unknown bidi class `{0}`")]
    UnknownClass(String),
}
