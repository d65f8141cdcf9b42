//! The closed set of value kinds a record field can hold.
//!
//! Every field type maps onto one [`Kind`]. Encoding converts the field into a [`Value`]
//! and formats it; decoding parses the raw wire string into a [`Value`] of the field's
//! kind and converts it back. Both directions dispatch with a plain `match`.
//!
//! ## Supported Field Types
//!
//! | Kind          | Rust types                                                  |
//! |---------------|-------------------------------------------------------------|
//! | `Text`        | `String`                                                    |
//! | `Integer`     | `i8`..`i64`, `isize`, `u8`..`u64`, `usize`                  |
//! | `Boolean`     | `bool`                                                      |
//! | `TextList`    | `Vec<String>`                                               |
//! | `IntegerList` | `Vec<i32>`, `Vec<i64>`, `Vec<u32>`, `Vec<u64>`              |
//! | `Duration`    | `chrono::Duration`, `std::time::Duration`                   |
//! | `Timestamp`   | `chrono::DateTime<FixedOffset>`, `chrono::DateTime<Utc>`    |

use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

/// The type tag of a field, deciding how its raw value is parsed and formatted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Text,
    Integer,
    Boolean,
    TextList,
    IntegerList,
    Duration,
    Timestamp,
}

impl Kind {
    /// Returns a human-readable name, used in error causes.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Text => "text",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::TextList => "list of text",
            Kind::IntegerList => "list of integers",
            Kind::Duration => "duration",
            Kind::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value in its kind-normalized form.
///
/// Integers are widened to `i128` so that every supported integer type, including
/// `u64`, converts without loss.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i128),
    Boolean(bool),
    TextList(Vec<String>),
    IntegerList(Vec<i128>),
    Duration(chrono::Duration),
    Timestamp(DateTime<FixedOffset>),
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Integer(_) => Kind::Integer,
            Value::Boolean(_) => Kind::Boolean,
            Value::TextList(_) => Kind::TextList,
            Value::IntegerList(_) => Kind::IntegerList,
            Value::Duration(_) => Kind::Duration,
            Value::Timestamp(_) => Kind::Timestamp,
        }
    }
}

fn mismatch(expected: Kind, found: &Value) -> String {
    format!("expected {}, found {}", expected, found.kind())
}

/// A Rust type that can be stored in a logfmt record field.
///
/// `from_value` receives a value of kind [`FieldType::KIND`]; the error string becomes the
/// `cause` of a [`Error::Parse`](crate::Error::Parse).
pub trait FieldType: Sized {
    const KIND: Kind;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, String>;
}

impl FieldType for String {
    const KIND: Kind = Kind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl FieldType for bool {
    const KIND: Kind = Kind::Boolean;

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl FieldType for Vec<String> {
    const KIND: Kind = Kind::TextList;

    fn to_value(&self) -> Value {
        Value::TextList(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::TextList(items) => Ok(items),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

fn narrow<T>(n: i128) -> Result<T, String>
where
    T: TryFrom<i128>,
{
    T::try_from(n).map_err(|_| format!("{} is out of range for {}", n, std::any::type_name::<T>()))
}

macro_rules! impl_integer_field {
    ($($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                const KIND: Kind = Kind::Integer;

                fn to_value(&self) -> Value {
                    Value::Integer(*self as i128)
                }

                fn from_value(value: Value) -> Result<Self, String> {
                    match value {
                        Value::Integer(n) => narrow(n),
                        other => Err(mismatch(Self::KIND, &other)),
                    }
                }
            }
        )*
    };
}

impl_integer_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_integer_list_field {
    ($($ty:ty),*) => {
        $(
            impl FieldType for Vec<$ty> {
                const KIND: Kind = Kind::IntegerList;

                fn to_value(&self) -> Value {
                    Value::IntegerList(self.iter().map(|&n| n as i128).collect())
                }

                fn from_value(value: Value) -> Result<Self, String> {
                    match value {
                        Value::IntegerList(items) => items.into_iter().map(narrow::<$ty>).collect(),
                        other => Err(mismatch(Self::KIND, &other)),
                    }
                }
            }
        )*
    };
}

impl_integer_list_field!(i32, i64, u32, u64);

impl FieldType for chrono::Duration {
    const KIND: Kind = Kind::Duration;

    fn to_value(&self) -> Value {
        Value::Duration(*self)
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Duration(d) => Ok(d),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl FieldType for std::time::Duration {
    const KIND: Kind = Kind::Duration;

    // Spans beyond the chrono range saturate; they exceed 290 years of nanoseconds.
    fn to_value(&self) -> Value {
        Value::Duration(chrono::Duration::from_std(*self).unwrap_or(chrono::Duration::MAX))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Duration(d) => d
                .to_std()
                .map_err(|_| "negative duration cannot be stored".to_string()),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl FieldType for DateTime<FixedOffset> {
    const KIND: Kind = Kind::Timestamp;

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Timestamp(t) => Ok(t),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl FieldType for DateTime<Utc> {
    const KIND: Kind = Kind::Timestamp;

    fn to_value(&self) -> Value {
        Value::Timestamp(DateTime::<FixedOffset>::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Timestamp(t) => Ok(t.with_timezone(&Utc)),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}
