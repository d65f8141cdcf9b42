//! Error types for logfmt encoding and decoding.
//!
//! ## Error Categories
//!
//! - **Parse Errors**: a raw value could not be coerced into the field's declared type
//!   (bad integer, bad boolean literal, bad duration, timestamp not matching its layout)
//! - **Syntax Errors**: only raised when [`LogfmtOptions`](crate::LogfmtOptions) asks for
//!   strict tokenizing (duplicate keys, unterminated quotes, bare keys)
//! - **I/O Errors**: writer failures in [`to_writer`](crate::to_writer)
//!
//! Malformed field metadata never produces an error: it degrades to skipping the field.
//!
//! ## Examples
//!
//! ```rust
//! use logfmt_codec::{logfmt_record, unmarshal_str, Error};
//!
//! #[derive(Default)]
//! struct Probe {
//!     alive: bool,
//! }
//!
//! logfmt_record!(Probe { alive => "is_alive" });
//!
//! let mut probe = Probe::default();
//! let err = unmarshal_str("is_alive=maybe", &mut probe).unwrap_err();
//! assert!(matches!(err, Error::Parse { .. }));
//! assert!(err.to_string().contains("is_alive"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding logfmt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// A raw wire value could not be coerced into the field's type
    #[error("cannot parse {field}={value:?}: {cause}")]
    Parse {
        field: String,
        value: String,
        cause: String,
    },

    /// Malformed input rejected by strict tokenizing
    #[error("Syntax error at column {col}: {msg}")]
    Syntax { col: usize, msg: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error for the field with external key `field`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logfmt_codec::Error;
    ///
    /// let err = Error::parse("age", "old", "invalid digit found in string");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "cannot parse age=\"old\": invalid digit found in string"
    /// );
    /// ```
    pub fn parse(field: &str, value: &str, cause: impl fmt::Display) -> Self {
        Error::Parse {
            field: field.to_string(),
            value: value.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Creates a syntax error at the given column (1-based, counted in characters).
    pub fn syntax(col: usize, msg: &str) -> Self {
        Error::Syntax {
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_message() {
        let err = Error::syntax(7, "unterminated quoted value");
        assert_eq!(
            err.to_string(),
            "Syntax error at column 7: unterminated quoted value"
        );
    }

    #[test]
    fn test_parse_keeps_raw_value() {
        match Error::parse("fav_numbers", "1,x", "invalid digit found in string") {
            Error::Parse {
                field,
                value,
                cause,
            } => {
                assert_eq!(field, "fav_numbers");
                assert_eq!(value, "1,x");
                assert_eq!(cause, "invalid digit found in string");
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }
}
