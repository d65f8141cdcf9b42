//! Configuration options for logfmt decoding.
//!
//! The default tokenizer is permissive: a repeated key keeps its last value, an
//! unterminated quote runs to the end of the line and tokens without `=` are dropped.
//! [`LogfmtOptions`] turns each of these into an [`Error::Syntax`](crate::Error::Syntax).
//!
//! ## Examples
//!
//! ```rust
//! use logfmt_codec::{logfmt_record, unmarshal_with_options, LogfmtOptions};
//!
//! #[derive(Default)]
//! struct Line {
//!     msg: String,
//! }
//!
//! logfmt_record!(Line { msg => "msg" });
//!
//! let mut line = Line::default();
//! let strict = LogfmtOptions::strict();
//! assert!(unmarshal_with_options(br#"msg="oops"#, &mut line, &strict).is_err());
//!
//! // permissive default
//! let lenient = LogfmtOptions::new();
//! unmarshal_with_options(br#"msg="oops"#, &mut line, &lenient).unwrap();
//! assert_eq!(line.msg, "oops");
//! ```

/// Configuration options for logfmt decoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogfmtOptions {
    pub reject_duplicate_keys: bool,
    pub reject_unterminated_quotes: bool,
    pub reject_bare_keys: bool,
}

impl LogfmtOptions {
    /// Creates the permissive default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logfmt_codec::LogfmtOptions;
    ///
    /// let options = LogfmtOptions::new();
    /// assert!(!options.reject_duplicate_keys);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options rejecting every malformed construct.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logfmt_codec::LogfmtOptions;
    ///
    /// let options = LogfmtOptions::strict();
    /// assert!(options.reject_duplicate_keys);
    /// assert!(options.reject_unterminated_quotes);
    /// assert!(options.reject_bare_keys);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        LogfmtOptions {
            reject_duplicate_keys: true,
            reject_unterminated_quotes: true,
            reject_bare_keys: true,
        }
    }

    /// Rejects lines that repeat a key instead of keeping the last value.
    #[must_use]
    pub fn with_reject_duplicate_keys(mut self, reject: bool) -> Self {
        self.reject_duplicate_keys = reject;
        self
    }

    /// Rejects a quoted value with no closing quote.
    #[must_use]
    pub fn with_reject_unterminated_quotes(mut self, reject: bool) -> Self {
        self.reject_unterminated_quotes = reject;
        self
    }

    /// Rejects tokens that have no `=` or an empty key.
    #[must_use]
    pub fn with_reject_bare_keys(mut self, reject: bool) -> Self {
        self.reject_bare_keys = reject;
        self
    }
}
