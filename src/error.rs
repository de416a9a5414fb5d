//! Error taxonomy for parse and compile operations
//!
//! Locale resolution is deliberately absent from this enum: an unresolvable
//! locale tag always degrades to the root locale instead of failing.
//! Formatting valid input never fails either; an unvalidated calendar value
//! yields an empty string at the formatting boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// The text does not match the expected field or literal structure.
    #[error("malformed input at offset {offset}: {reason}")]
    MalformedInput { offset: usize, reason: String },

    /// A parsed magnitude exceeds the requested result width, or parsed
    /// calendar fields fail the calendar's validity check.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// Reserved for truly unparseable pattern text; quote-escaping tolerance
    /// means ordinary pattern strings always compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

impl FormatError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        FormatError::MalformedInput {
            offset,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
