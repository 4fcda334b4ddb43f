//! twtxt parse error types

use thiserror::Error;

/// Errors raised while parsing a single twtxt line
///
/// The batch parser treats every variant as recoverable: the offending line is
/// dropped, logged, and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TwtxtError {
    /// Line has no tab separating the timestamp from the text
    #[error("Malformed line: {0}")]
    MalformedLine(String),

    /// Timestamp could not be parsed
    #[error("Malformed timestamp {raw:?}: {reason}")]
    MalformedTimestamp {
        /// Timestamp as it appeared in the feed
        raw: String,
        /// What the parser choked on
        reason: String,
    },

    /// Timestamp parsed but lies outside the supported calendar range
    #[error("Timestamp out of range {raw:?}: {reason}")]
    TimestampOutOfRange {
        /// Timestamp as it appeared in the feed
        raw: String,
        /// Which component overflowed
        reason: String,
    },
}

impl TwtxtError {
    pub(crate) fn malformed_timestamp(raw: &str, reason: impl Into<String>) -> Self {
        TwtxtError::MalformedTimestamp {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(raw: &str, reason: impl Into<String>) -> Self {
        TwtxtError::TimestampOutOfRange {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error came from the timestamp rather than the line shape
    pub fn is_timestamp_error(&self) -> bool {
        matches!(
            self,
            TwtxtError::MalformedTimestamp { .. } | TwtxtError::TimestampOutOfRange { .. }
        )
    }
}

/// Result type alias using TwtxtError
pub type Result<T> = std::result::Result<T, TwtxtError>;
