/// Registers a struct as a logfmt [`Record`](crate::Record).
///
/// Each listed field is paired with its tag, `external_key[,format_hint]`. Fields are
/// encoded in the listed order. Struct fields that are not listed are neither encoded
/// nor decoded, and neither are listed fields whose tag has an empty key.
///
/// # Examples
///
/// ```rust
/// use logfmt_codec::{logfmt_record, to_string};
///
/// #[derive(Default)]
/// struct Job {
///     id: u64,
///     queue: String,
///     runtime: std::time::Duration,
///     secret: String,
/// }
///
/// logfmt_record!(Job {
///     id => "job_id",
///     queue => "queue",
///     runtime => "runtime_s,s",
/// });
///
/// let job = Job {
///     id: 12,
///     queue: "mail".to_string(),
///     runtime: std::time::Duration::from_secs(3),
///     secret: "hunter2".to_string(),
/// };
/// assert_eq!(to_string(&job).unwrap(), "job_id=12 queue=mail runtime_s=3");
/// ```
#[macro_export]
macro_rules! logfmt_record {
    ($record:ty { $($field:ident => $tag:expr),* $(,)? }) => {
        impl $crate::Record for $record {
            fn fields() -> &'static [$crate::Field<Self>] {
                const FIELDS: &[$crate::Field<$record>] = &[
                    $(
                        $crate::Field::<$record>::new(
                            stringify!($field),
                            $tag,
                            |record: &$record, hint: &str| {
                                $crate::record::encode_field(&record.$field, hint)
                            },
                            |record: &mut $record, raw: &str, hint: &str| {
                                $crate::record::decode_field(&mut record.$field, raw, hint)
                            },
                        ),
                    )*
                ];
                FIELDS
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Record;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        name: String,
        count: i32,
        hidden: bool,
        skipped: String,
    }

    logfmt_record!(Sample {
        name => "name",
        count => "n",
        skipped => "",
    });

    #[test]
    fn test_macro_builds_table_in_order() {
        let names: Vec<_> = Sample::fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["name", "count", "skipped"]);

        let tags: Vec<_> = Sample::fields().iter().map(|f| f.tag()).collect();
        assert_eq!(tags, vec!["name", "n", ""]);
    }

    #[test]
    fn test_macro_accessors() {
        let mut sample = Sample::default();
        let count = &Sample::fields()[1];
        count.decode(&mut sample, "41", "").unwrap();
        assert_eq!(sample.count, 41);
        assert_eq!(count.encode(&sample, ""), "41");
        assert!(!sample.hidden);
    }
}
