//! Property-based tests for the encode/decode roundtrip guarantees.
//!
//! Generated text avoids double quotes: values are quoted verbatim, so an embedded quote
//! would end the value early.

use chrono::Duration;
use logfmt_codec::duration::{self, Unit};
use logfmt_codec::{logfmt_record, to_string, unmarshal_str};
use proptest::prelude::*;

#[derive(Debug, Default, Clone, PartialEq)]
struct Scalars {
    text: String,
    signed: i64,
    unsigned: u32,
    flag: bool,
}

logfmt_record!(Scalars {
    text => "text",
    signed => "signed",
    unsigned => "unsigned",
    flag => "flag",
});

#[derive(Debug, Default, Clone, PartialEq)]
struct Lists {
    words: Vec<String>,
    numbers: Vec<i64>,
}

logfmt_record!(Lists {
    words => "words",
    numbers => "numbers",
});

fn roundtrip<R: logfmt_codec::Record + Default + PartialEq + std::fmt::Debug>(value: &R) -> bool {
    let line = match to_string(value) {
        Ok(line) => line,
        Err(e) => {
            eprintln!("Encode failed: {}", e);
            return false;
        }
    };
    let mut back = R::default();
    match unmarshal_str(&line, &mut back) {
        Ok(()) => *value == back,
        Err(e) => {
            eprintln!("Decode failed: {}", e);
            eprintln!("Encoded was: {}", line);
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_scalars(
        text in "[a-zA-Z0-9 ,.:/=_\\\\\t-]{0,24}",
        signed in any::<i64>(),
        unsigned in any::<u32>(),
        flag in any::<bool>(),
    ) {
        let record = Scalars { text, signed, unsigned, flag };
        prop_assert!(roundtrip(&record));
    }

    #[test]
    fn prop_lists(
        words in prop::collection::vec("[a-z][a-z ]{0,7}", 0..6),
        numbers in prop::collection::vec(any::<i64>(), 0..10),
    ) {
        let record = Lists { words, numbers };
        prop_assert!(roundtrip(&record));
    }

    #[test]
    fn prop_compact_duration(nanos in any::<i64>()) {
        let d = Duration::nanoseconds(nanos);
        prop_assert_eq!(duration::parse(&duration::format(&d)), Ok(d));
    }

    #[test]
    fn prop_whole_seconds(secs in -1_000_000_000i64..1_000_000_000) {
        let d = Duration::seconds(secs);
        let text = duration::format_in(&d, Unit::Second);
        prop_assert_eq!(text.clone(), secs.to_string());
        prop_assert_eq!(duration::parse_in(&text, Unit::Second), Ok(d));
    }

    #[test]
    fn prop_unit_hint_keeps_nanoseconds(
        nanos in any::<i64>(),
        unit in prop::sample::select(vec![
            Unit::Nanosecond,
            Unit::Microsecond,
            Unit::Millisecond,
            Unit::Second,
            Unit::Minute,
            Unit::Hour,
        ]),
    ) {
        let d = Duration::nanoseconds(nanos);
        let text = duration::format_in(&d, unit);
        prop_assert_eq!(duration::parse_in(&text, unit), Ok(d));
    }

    #[test]
    fn prop_whole_milliseconds_in_minutes(millis in 0i64..10_000_000) {
        // stays in integer form whenever the span divides evenly
        let d = Duration::milliseconds(millis * 60_000);
        prop_assert_eq!(duration::format_in(&d, Unit::Minute), millis.to_string());
    }
}
