//! Ordered key/value lookup produced by the tokenizer.
//!
//! This module provides [`Entries`], a wrapper around [`IndexMap`] holding the raw
//! (unquoted) value of every entry of a logfmt line.
//!
//! ## Why IndexMap?
//!
//! - **Input order**: iteration follows the order keys first appeared on the line
//! - **Last write wins**: a repeated key overwrites the value but keeps its position
//!
//! ## Examples
//!
//! ```rust
//! use logfmt_codec::entries;
//!
//! let line = entries(r#"level=info msg="hello world" level=warn"#).unwrap();
//! assert_eq!(line.len(), 2);
//! assert_eq!(line.get("msg"), Some("hello world"));
//! assert_eq!(line.get("level"), Some("warn"));
//!
//! let keys: Vec<_> = line.keys().map(String::as_str).collect();
//! assert_eq!(keys, vec!["level", "msg"]);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The raw values of a logfmt line, keyed by wire key, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entries(IndexMap<String, String>);

impl Entries {
    /// Creates an empty `Entries`.
    #[must_use]
    pub fn new() -> Self {
        Entries(IndexMap::new())
    }

    /// Inserts a raw value, returning the value it replaced.
    ///
    /// A replaced key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logfmt_codec::Entries;
    ///
    /// let mut entries = Entries::new();
    /// assert!(entries.insert("age".to_string(), "31".to_string()).is_none());
    /// assert_eq!(
    ///     entries.insert("age".to_string(), "32".to_string()),
    ///     Some("31".to_string())
    /// );
    /// ```
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    /// Returns the raw value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if the line carried `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in first-seen order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    /// Returns an iterator over the key/value pairs, in first-seen order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl IntoIterator for Entries {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, String)> for Entries {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Entries(IndexMap::from_iter(iter))
    }
}

impl Serialize for Entries {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IndexMap::deserialize(deserializer).map(Entries)
    }
}
