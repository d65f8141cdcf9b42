//! logfmt decoding.
//!
//! Decoding happens in two passes:
//!
//! 1. The [`Tokenizer`] splits a line into `key=value` entries, stripping the quotes of
//!    quoted values, and collects them into [`Entries`].
//! 2. Every field of the target [`Record`] looks up its external key and coerces the raw
//!    string into its declared kind.
//!
//! Keys missing from the line leave their fields untouched. The first coercion failure
//! aborts decoding; fields assigned before it keep their new values.
//!
//! ## Usage
//!
//! ```rust
//! use logfmt_codec::{logfmt_record, unmarshal};
//!
//! #[derive(Default)]
//! struct Request {
//!     path: String,
//!     status: u16,
//!     cached: bool,
//! }
//!
//! logfmt_record!(Request {
//!     path => "path",
//!     status => "status",
//!     cached => "cached",
//! });
//!
//! let mut req = Request::default();
//! unmarshal(b"path=/index.html status=200 cached=1", &mut req).unwrap();
//! assert_eq!(req.path, "/index.html");
//! assert_eq!(req.status, 200);
//! assert!(req.cached);
//! ```

use crate::duration::{self, Unit};
use crate::layout;
use crate::value::{Kind, Value};
use crate::{Entries, Error, LogfmtOptions, Record, Result};

/// Where the tokenizer is within the current entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ScanningKey,
    ScanningUnquotedValue,
    ScanningQuotedValue,
}

/// Splits a logfmt line into its entries.
///
/// Entries are separated by spaces. A value starting with `"` runs to the next `"`,
/// spaces included. Nothing inside a quoted value is escaped, matching the encoder.
pub struct Tokenizer<'o> {
    options: &'o LogfmtOptions,
    entries: Entries,
    state: State,
    key: String,
    value: String,
    key_col: usize,
    quote_col: usize,
}

impl<'o> Tokenizer<'o> {
    pub fn new(options: &'o LogfmtOptions) -> Self {
        Tokenizer {
            options,
            entries: Entries::new(),
            state: State::ScanningKey,
            key: String::new(),
            value: String::new(),
            key_col: 0,
            quote_col: 0,
        }
    }

    /// Tokenizes `input`, consuming the tokenizer.
    ///
    /// # Errors
    ///
    /// Only fails when the options ask for strict tokenizing.
    pub fn tokenize(mut self, input: &str) -> Result<Entries> {
        let mut chars = input.chars().enumerate().peekable();

        while let Some((index, ch)) = chars.next() {
            let col = index + 1;
            match self.state {
                State::ScanningKey => match ch {
                    '=' => {
                        if self.key.is_empty() {
                            self.key_col = col;
                        }
                        if chars.peek().map(|&(_, next)| next) == Some('"') {
                            chars.next();
                            self.quote_col = col + 1;
                            self.state = State::ScanningQuotedValue;
                        } else {
                            self.state = State::ScanningUnquotedValue;
                        }
                    }
                    ' ' => {
                        if !self.key.is_empty() {
                            self.drop_bare_key()?;
                        }
                    }
                    c => {
                        if self.key.is_empty() {
                            self.key_col = col;
                        }
                        self.key.push(c);
                    }
                },
                State::ScanningUnquotedValue => {
                    if ch == ' ' {
                        self.finish_entry()?;
                    } else {
                        self.value.push(ch);
                    }
                }
                State::ScanningQuotedValue => match ch {
                    '"' => self.finish_entry()?,
                    c => self.value.push(c),
                },
            }
        }

        match self.state {
            State::ScanningKey => {
                if !self.key.is_empty() {
                    self.drop_bare_key()?;
                }
            }
            State::ScanningUnquotedValue => self.finish_entry()?,
            State::ScanningQuotedValue => {
                if self.options.reject_unterminated_quotes {
                    return Err(Error::syntax(self.quote_col, "unterminated quoted value"));
                }
                tracing::debug!(key = %self.key, "quoted value runs to end of input");
                self.finish_entry()?;
            }
        }

        tracing::trace!(entries = self.entries.len(), "tokenized logfmt line");
        Ok(self.entries)
    }

    fn finish_entry(&mut self) -> Result<()> {
        self.state = State::ScanningKey;
        let key = std::mem::take(&mut self.key);
        let value = std::mem::take(&mut self.value);

        if key.is_empty() {
            if self.options.reject_bare_keys {
                return Err(Error::syntax(self.key_col, "empty key"));
            }
            tracing::debug!(%value, "dropping entry with empty key");
            return Ok(());
        }
        if self.options.reject_duplicate_keys && self.entries.contains_key(&key) {
            return Err(Error::syntax(
                self.key_col,
                &format!("duplicate key {:?}", key),
            ));
        }
        self.entries.insert(key, value);
        Ok(())
    }

    fn drop_bare_key(&mut self) -> Result<()> {
        let key = std::mem::take(&mut self.key);
        if self.options.reject_bare_keys {
            return Err(Error::syntax(
                self.key_col,
                &format!("missing '=' after key {:?}", key),
            ));
        }
        tracing::debug!(%key, "dropping key without value");
        Ok(())
    }
}

/// Tokenizes a logfmt line with the permissive default options.
///
/// # Errors
///
/// The default options never reject input; the `Result` mirrors
/// [`entries_with_options`].
pub fn entries(input: &str) -> Result<Entries> {
    entries_with_options(input, &LogfmtOptions::default())
}

/// Tokenizes a logfmt line.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for constructs the options reject.
pub fn entries_with_options(input: &str, options: &LogfmtOptions) -> Result<Entries> {
    Tokenizer::new(options).tokenize(input)
}

fn parse_integer(raw: &str) -> std::result::Result<i128, String> {
    raw.parse::<i128>().map_err(|e| e.to_string())
}

fn parse_bool(raw: &str) -> std::result::Result<bool, String> {
    match raw {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(format!("invalid boolean {:?}", raw)),
    }
}

fn parse_duration(raw: &str, hint: &str) -> std::result::Result<chrono::Duration, String> {
    if hint.is_empty() {
        return duration::parse(raw);
    }
    match Unit::from_suffix(hint) {
        Some(unit) => duration::parse_in(raw, unit),
        None => {
            tracing::debug!(%hint, "unrecognised duration unit, reading compact notation");
            duration::parse(raw)
        }
    }
}

/// Coerces a raw wire string into a value of `kind`, steered by the field's format hint.
///
/// An empty raw value decodes to an empty list for both list kinds, so `fav_numbers=`
/// yields `[]` rather than an integer parse failure.
///
/// # Errors
///
/// Returns the cause of the failure; callers attach the key and raw value.
pub fn parse_value(kind: Kind, raw: &str, hint: &str) -> std::result::Result<Value, String> {
    let value = match kind {
        Kind::Text => Value::Text(raw.to_string()),
        Kind::Integer => Value::Integer(parse_integer(raw)?),
        Kind::Boolean => Value::Boolean(parse_bool(raw)?),
        Kind::TextList => {
            if raw.is_empty() {
                Value::TextList(Vec::new())
            } else {
                Value::TextList(raw.split(',').map(str::to_string).collect())
            }
        }
        Kind::IntegerList => {
            if raw.is_empty() {
                Value::IntegerList(Vec::new())
            } else {
                Value::IntegerList(
                    raw.split(',')
                        .map(parse_integer)
                        .collect::<std::result::Result<_, _>>()?,
                )
            }
        }
        Kind::Duration => Value::Duration(parse_duration(raw, hint)?),
        Kind::Timestamp => Value::Timestamp(layout::parse(raw, hint)?),
    };
    Ok(value)
}

/// Assigns every tagged field of `record` whose key appears in `entries`.
///
/// # Errors
///
/// Returns [`Error::Parse`] for the first field whose raw value cannot be coerced.
pub fn decode_entries<R: Record>(entries: &Entries, record: &mut R) -> Result<()> {
    for field in R::fields() {
        let (key, hint) = field.metadata();
        if key.is_empty() {
            tracing::trace!(field = field.name(), "field has no key, skipping");
            continue;
        }
        let Some(raw) = entries.get(key) else {
            continue;
        };
        field
            .decode(record, raw, hint)
            .map_err(|cause| Error::parse(key, raw, cause))?;
        tracing::debug!(field = field.name(), key, "decoded field");
    }
    Ok(())
}
