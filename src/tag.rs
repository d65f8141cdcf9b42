//! Field tag parsing.
//!
//! A tag has the form `external_key[,format_hint]`. Only the first comma splits, so
//! hints such as timestamp layouts may contain commas of their own.

/// Splits a field tag into `(external_key, format_hint)`.
///
/// An empty tag yields `("", "")`, which means the field is skipped.
///
/// # Examples
///
/// ```rust
/// use logfmt_codec::extract_metadata;
///
/// assert_eq!(extract_metadata("name"), ("name", ""));
/// assert_eq!(extract_metadata("hold_breath_seconds,s"), ("hold_breath_seconds", "s"));
/// assert_eq!(
///     extract_metadata("birth_date,Monday, 02-Jan-06 15:04:05 MST"),
///     ("birth_date", "Monday, 02-Jan-06 15:04:05 MST"),
/// );
/// assert_eq!(extract_metadata(""), ("", ""));
/// ```
#[must_use]
pub fn extract_metadata(tag: &str) -> (&str, &str) {
    match tag.split_once(',') {
        Some((key, hint)) => (key, hint),
        None => (tag, ""),
    }
}
