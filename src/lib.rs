//! # logfmt_codec
//!
//! Tag-directed conversion between typed Rust records and logfmt lines.
//!
//! ## What is logfmt?
//!
//! logfmt is a flat, human-readable encoding with one record per line: a sequence of
//! `key=value` pairs separated by spaces. Values holding spaces or commas are wrapped in
//! double quotes; lists are comma-joined.
//!
//! ```text
//! name="Jane Doe" age=32 is_alive=true fav_colors="orange,sky blue" fav_numbers=1,2
//! ```
//!
//! ## Key Features
//!
//! - **Tag-Directed**: every field carries a tag `external_key[,format_hint]` naming its
//!   wire key and, for durations and timestamps, how to render it
//! - **Typed Coercion**: text, integers, booleans, lists of text or integers, durations
//!   and timestamps
//! - **In-Place Decoding**: decoding mutates an existing record; keys missing from the
//!   line leave their fields untouched
//! - **No Reflection**: records are described by a `const` field table generated by
//!   [`logfmt_record!`]
//!
//! ## Quick Start
//!
//! ```rust
//! use logfmt_codec::{logfmt_record, to_string, unmarshal_str};
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i64,
//!     alive: bool,
//!     favorite_colors: Vec<String>,
//!     favorite_numbers: Vec<i64>,
//!     hold_breath: Duration,
//!     hold_breath_seconds: Duration,
//! }
//!
//! logfmt_record!(Person {
//!     name => "name",
//!     age => "age",
//!     alive => "is_alive",
//!     favorite_colors => "fav_colors",
//!     favorite_numbers => "fav_numbers",
//!     hold_breath => "hold_breath",
//!     hold_breath_seconds => "hold_breath_seconds,s",
//! });
//!
//! let person = Person {
//!     name: "Jane Doe".to_string(),
//!     age: 32,
//!     alive: true,
//!     favorite_colors: vec!["orange".to_string(), "sky blue".to_string()],
//!     favorite_numbers: vec![1, 2],
//!     hold_breath: Duration::from_secs(45),
//!     hold_breath_seconds: Duration::from_secs(45),
//! };
//!
//! let line = to_string(&person).unwrap();
//! assert_eq!(
//!     line,
//!     r#"name="Jane Doe" age=32 is_alive=true fav_colors="orange,sky blue" fav_numbers=1,2 hold_breath=45s hold_breath_seconds=45"#
//! );
//!
//! let mut back = Person::default();
//! unmarshal_str(&line, &mut back).unwrap();
//! assert_eq!(back, person);
//! ```
//!
//! ## Format Hints
//!
//! - **Durations**: a unit suffix (`ns`, `us`, `ms`, `s`, `m`, `h`) makes the wire value a
//!   bare number in that unit; without one, compact notation such as `1h30m` is used.
//!   See [`duration`].
//! - **Timestamps**: a layout written against the reference time
//!   `Mon Jan 2 15:04:05 MST 2006`; without one, RFC 3339. See [`layout`].
//!
//! ## Errors
//!
//! Decoding stops at the first field whose raw value cannot be coerced and returns
//! [`Error::Parse`]. Tokenizing is permissive unless [`LogfmtOptions`] asks otherwise.

pub mod de;
pub mod duration;
pub mod error;
pub mod layout;
pub mod macros;
pub mod map;
pub mod options;
pub mod record;
pub mod ser;
pub mod tag;
pub mod value;

pub use de::{entries, entries_with_options, Tokenizer};
pub use error::{Error, Result};
pub use map::Entries;
pub use options::LogfmtOptions;
pub use record::{Field, Record};
pub use ser::Serializer;
pub use tag::extract_metadata;
pub use value::{FieldType, Kind, Value};

use std::io;

/// Encode a record as a logfmt line.
///
/// # Examples
///
/// ```rust
/// use logfmt_codec::{encode, logfmt_record};
///
/// struct Point { x: i32, y: i32 }
///
/// logfmt_record!(Point { x => "x", y => "y" });
///
/// assert_eq!(encode(&Point { x: 1, y: 2 }).unwrap(), b"x=1 y=2");
/// ```
///
/// # Errors
///
/// Encoding the supported field types cannot fail; the `Result` keeps the signature in
/// line with the decoding functions.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>> {
    to_string(record).map(String::into_bytes)
}

/// Encode a record as a logfmt `String`.
///
/// # Errors
///
/// See [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<R: Record>(record: &R) -> Result<String> {
    let mut serializer = Serializer::new();
    serializer.write_record(record);
    Ok(serializer.into_inner())
}

/// Encode a record as a logfmt line into a writer. No trailing newline is written.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, R>(mut writer: W, record: &R) -> Result<()>
where
    W: io::Write,
    R: Record,
{
    let line = to_string(record)?;
    writer
        .write_all(line.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decode a logfmt line into an existing record.
///
/// # Examples
///
/// ```rust
/// use logfmt_codec::{logfmt_record, unmarshal};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
///
/// logfmt_record!(Point { x => "x", y => "y" });
///
/// let mut point = Point { x: 5, y: 5 };
/// unmarshal(b"y=2", &mut point).unwrap();
/// assert_eq!((point.x, point.y), (5, 2));
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or a value cannot be coerced into
/// its field's type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unmarshal<R: Record>(input: &[u8], record: &mut R) -> Result<()> {
    unmarshal_with_options(input, record, &LogfmtOptions::default())
}

/// Decode a logfmt line into an existing record with custom tokenizer options.
///
/// # Errors
///
/// As [`unmarshal`], plus [`Error::Syntax`] for input the options reject.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unmarshal_with_options<R: Record>(
    input: &[u8],
    record: &mut R,
    options: &LogfmtOptions,
) -> Result<()> {
    let s = std::str::from_utf8(input).map_err(|e| Error::custom(e.to_string()))?;
    let entries = entries_with_options(s, options)?;
    de::decode_entries(&entries, record)
}

/// Decode a logfmt string into an existing record.
///
/// # Errors
///
/// Returns an error if a value cannot be coerced into its field's type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unmarshal_str<R: Record>(input: &str, record: &mut R) -> Result<()> {
    let entries = entries(input)?;
    de::decode_entries(&entries, record)
}

/// Decode a logfmt string into a fresh, default-initialised record.
///
/// # Examples
///
/// ```rust
/// use logfmt_codec::{from_str, logfmt_record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// logfmt_record!(Point { x => "x", y => "y" });
///
/// let point: Point = from_str("x=1 y=2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if a value cannot be coerced into its field's type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<R: Record + Default>(input: &str) -> Result<R> {
    let mut record = R::default();
    unmarshal_str(input, &mut record)?;
    Ok(record)
}
