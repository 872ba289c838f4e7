//! Error types for the pagemd library.

use thiserror::Error;

/// Result type alias for pagemd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during structural reconstruction.
///
/// Only configuration and input-contract errors are fatal. Per-page
/// heuristic faults never surface here; the affected lines degrade to
/// plain paragraphs and processing continues.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration, rejected before any processing begins.
    #[error("configuration error: {0}")]
    Config(String),

    /// The upstream extractor violated its input contract.
    #[error("invalid input: {0}")]
    Input(String),

    /// Page indices are not contiguous and zero-based.
    #[error("page index {found} out of order (expected {expected})")]
    PageOrder {
        /// Index the pipeline expected at this position.
        expected: usize,
        /// Index actually supplied.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("heading_size_ratio must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: heading_size_ratio must be > 0"
        );

        let err = Error::PageOrder {
            expected: 2,
            found: 5,
        };
        assert_eq!(err.to_string(), "page index 5 out of order (expected 2)");
    }
}
