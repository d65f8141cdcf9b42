//! logfmt encoding.
//!
//! This module provides the [`Serializer`] that renders a [`Record`] as a single logfmt
//! line: every tagged field becomes `key=value`, in declaration order, separated by one
//! space.
//!
//! ## Quoting
//!
//! - **Text** is quoted when it contains a space or a comma
//! - **Lists of text** are joined with `,` and quoted when the result contains a space
//! - **Lists of integers**, integers, booleans and durations are never quoted
//! - **Timestamps** are quoted when the formatted layout contains a space
//!
//! Quoting wraps the value verbatim; nothing inside it is escaped.
//!
//! ## Usage
//!
//! ```rust
//! use logfmt_codec::{logfmt_record, to_string};
//!
//! struct Span {
//!     name: String,
//!     tags: Vec<String>,
//!     ids: Vec<u64>,
//! }
//!
//! logfmt_record!(Span {
//!     name => "name",
//!     tags => "tags",
//!     ids => "ids",
//! });
//!
//! let span = Span {
//!     name: "db query".to_string(),
//!     tags: vec!["sql".to_string(), "read only".to_string()],
//!     ids: vec![7, 9],
//! };
//! assert_eq!(
//!     to_string(&span).unwrap(),
//!     r#"name="db query" tags="sql,read only" ids=7,9"#
//! );
//! ```

use crate::duration::{self, Unit};
use crate::layout;
use crate::value::Value;
use crate::Record;

/// The logfmt serializer.
///
/// Accumulates `key=value` entries into a single line.
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(128),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends one entry; `value` must already be formatted and quoted.
    pub fn write_entry(&mut self, key: &str, value: &str) {
        if !self.output.is_empty() {
            self.output.push(' ');
        }
        self.output.push_str(key);
        self.output.push('=');
        self.output.push_str(value);
    }

    /// Appends every tagged field of `record`.
    pub fn write_record<R: Record>(&mut self, record: &R) {
        for field in R::fields() {
            let (key, hint) = field.metadata();
            if key.is_empty() {
                tracing::trace!(field = field.name(), "field has no key, skipping");
                continue;
            }
            let value = field.encode(record, hint);
            self.write_entry(key, &value);
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

fn quote_if(s: String, needs_quotes: bool) -> String {
    if needs_quotes {
        format!("\"{}\"", s)
    } else {
        s
    }
}

fn format_duration(d: &chrono::Duration, hint: &str) -> String {
    if hint.is_empty() {
        return duration::format(d);
    }
    match Unit::from_suffix(hint) {
        Some(unit) => duration::format_in(d, unit),
        None => {
            tracing::debug!(%hint, "unrecognised duration unit, writing compact notation");
            duration::format(d)
        }
    }
}

/// Formats a value for the wire, steered by the field's format hint.
///
/// # Examples
///
/// ```rust
/// use logfmt_codec::ser::format_value;
/// use logfmt_codec::Value;
///
/// assert_eq!(format_value(&Value::Text("Jane Doe".to_string()), ""), "\"Jane Doe\"");
/// assert_eq!(format_value(&Value::IntegerList(vec![1, 2]), ""), "1,2");
/// assert_eq!(
///     format_value(&Value::Duration(chrono::Duration::seconds(45)), "s"),
///     "45"
/// );
/// ```
#[must_use]
pub fn format_value(value: &Value, hint: &str) -> String {
    match value {
        Value::Text(s) => quote_if(s.clone(), s.contains([' ', ','])),
        Value::Integer(n) => n.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::TextList(items) => {
            let joined = items.join(",");
            let quoted = joined.contains(' ');
            quote_if(joined, quoted)
        }
        Value::IntegerList(items) => items
            .iter()
            .map(i128::to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Duration(d) => format_duration(d, hint),
        Value::Timestamp(t) => {
            let formatted = layout::format(t, hint);
            let quoted = formatted.contains(' ');
            quote_if(formatted, quoted)
        }
    }
}
