//! Field descriptor tables for logfmt records.
//!
//! A [`Record`] exposes one [`Field`] per encodable struct field: the Rust field name,
//! its tag (`external_key[,format_hint]`) and two accessors that move the field through
//! the [`Value`](crate::Value) representation. Tables are usually produced by the
//! [`logfmt_record!`](crate::logfmt_record) macro and live in a `const`, so they are
//! built once per type.
//!
//! ## Implementing by Hand
//!
//! ```rust
//! use logfmt_codec::record::{decode_field, encode_field};
//! use logfmt_codec::{to_string, Field, Record};
//!
//! struct Probe {
//!     target: String,
//!     timeout: std::time::Duration,
//! }
//!
//! impl Record for Probe {
//!     fn fields() -> &'static [Field<Self>] {
//!         const FIELDS: &[Field<Probe>] = &[
//!             Field::new(
//!                 "target",
//!                 "target",
//!                 |p, hint| encode_field(&p.target, hint),
//!                 |p, raw, hint| decode_field(&mut p.target, raw, hint),
//!             ),
//!             Field::new(
//!                 "timeout",
//!                 "timeout_ms,ms",
//!                 |p, hint| encode_field(&p.timeout, hint),
//!                 |p, raw, hint| decode_field(&mut p.timeout, raw, hint),
//!             ),
//!         ];
//!         FIELDS
//!     }
//! }
//!
//! let probe = Probe {
//!     target: "db-1".to_string(),
//!     timeout: std::time::Duration::from_millis(250),
//! };
//! assert_eq!(to_string(&probe).unwrap(), "target=db-1 timeout_ms=250");
//! ```

use crate::value::FieldType;
use crate::{de, ser, tag};
use std::fmt;

/// Renders a field of `R` for the wire, given the field's format hint.
pub type EncodeFn<R> = fn(&R, &str) -> String;

/// Assigns a field of `R` from its raw wire string and format hint.
pub type DecodeFn<R> = fn(&mut R, &str, &str) -> Result<(), String>;

/// Describes one field of a record type.
pub struct Field<R> {
    name: &'static str,
    tag: &'static str,
    encode: EncodeFn<R>,
    decode: DecodeFn<R>,
}

impl<R> Field<R> {
    pub const fn new(
        name: &'static str,
        tag: &'static str,
        encode: EncodeFn<R>,
        decode: DecodeFn<R>,
    ) -> Self {
        Field {
            name,
            tag,
            encode,
            decode,
        }
    }

    /// The Rust field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The raw tag, `external_key[,format_hint]`.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// The `(external_key, format_hint)` pair read from the tag.
    #[must_use]
    pub fn metadata(&self) -> (&'static str, &'static str) {
        tag::extract_metadata(self.tag)
    }

    pub fn encode(&self, record: &R, hint: &str) -> String {
        (self.encode)(record, hint)
    }

    /// # Errors
    ///
    /// Returns the cause when `raw` cannot be coerced into the field's type.
    pub fn decode(&self, record: &mut R, raw: &str, hint: &str) -> Result<(), String> {
        (self.decode)(record, raw, hint)
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish()
    }
}

/// A struct that can be encoded to and decoded from a logfmt line.
///
/// Field order in [`Record::fields`] is the order of entries in encoded output.
pub trait Record: Sized + 'static {
    fn fields() -> &'static [Field<Self>];
}

/// Formats `slot` as a wire value. Used by generated [`Field`] accessors.
pub fn encode_field<T: FieldType>(slot: &T, hint: &str) -> String {
    ser::format_value(&slot.to_value(), hint)
}

/// Parses `raw` into `slot`. Used by generated [`Field`] accessors.
///
/// `slot` is only written when parsing succeeds.
///
/// # Errors
///
/// Returns the cause when `raw` does not parse as `T`.
pub fn decode_field<T: FieldType>(slot: &mut T, raw: &str, hint: &str) -> Result<(), String> {
    let value = de::parse_value(T::KIND, raw, hint)?;
    *slot = T::from_value(value)?;
    Ok(())
}
