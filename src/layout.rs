//! Timestamp layouts written against a reference time.
//!
//! A layout spells out how the reference instant `Mon Jan 2 15:04:05 MST 2006` would be
//! rendered, e.g. `Monday, 02-Jan-06 15:04:05 MST` or `2006-01-02T15:04:05Z07:00`. Each
//! recognised element of the reference time becomes a formatting directive; everything
//! else is copied literally.
//!
//! ## Elements
//!
//! | Element                 | Layout text                              |
//! |-------------------------|------------------------------------------|
//! | Month                   | `January` `Jan` `1` `01`                 |
//! | Weekday                 | `Monday` `Mon`                           |
//! | Day of month            | `2` `_2` `02`                            |
//! | Year                    | `2006` `06`                              |
//! | Hour                    | `15` `3` `03`                            |
//! | Minute, second          | `4` `04`, `5` `05`                       |
//! | Fractional seconds      | `.000` `.999` (or with `,`)              |
//! | Meridiem                | `PM` `pm`                                |
//! | Zone abbreviation       | `MST`                                    |
//! | Numeric zone            | `-0700` `-07:00` `-07`                   |
//! | Numeric zone, `Z` = UTC | `Z0700` `Z07:00` `Z07`                   |
//!
//! Offsets carry no zone names, so `MST` renders `UTC` for a zero offset and a numeric
//! `-0700` offset otherwise. When parsing, an abbreviation is read as offset zero.
//!
//! ```rust
//! use chrono::DateTime;
//! use logfmt_codec::layout;
//!
//! let t = DateTime::parse_from_rfc3339("2016-07-15T21:04:45Z").unwrap();
//! let text = layout::format(&t, "Monday, 02-Jan-06 15:04:05 MST");
//! assert_eq!(text, "Friday, 15-Jul-16 21:04:45 UTC");
//! assert_eq!(layout::parse(&text, "Monday, 02-Jan-06 15:04:05 MST"), Ok(t));
//! ```

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    TimeZone, Timelike,
};

const LONG_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const LONG_DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Chunk {
    Literal,
    LongMonth,
    Month,
    NumMonth,
    ZeroMonth,
    LongWeekday,
    Weekday,
    Day,
    UnderDay,
    ZeroDay,
    Hour,
    Hour12,
    ZeroHour12,
    Minute,
    ZeroMinute,
    Second,
    ZeroSecond,
    LongYear,
    Year,
    UpperPM,
    LowerPM,
    ZoneName,
    NumZone { colon: bool, short: bool, utc_z: bool },
    Fraction { digits: usize, trim: bool },
}

/// One element of a layout together with the layout text it was read from.
#[derive(Clone, Copy, Debug)]
struct Piece<'a> {
    chunk: Chunk,
    text: &'a str,
}

fn starts_with_lower(s: &str) -> bool {
    s.bytes().next().is_some_and(|b| b.is_ascii_lowercase())
}

fn is_digit_at(s: &str, i: usize) -> bool {
    s.as_bytes().get(i).is_some_and(u8::is_ascii_digit)
}

/// Recognises a layout element at the start of `s`, returning it and its byte length.
fn element_at(s: &str) -> Option<(Chunk, usize)> {
    let b = s.as_bytes();
    let chunk = match *b.first()? {
        b'J' if s.starts_with("January") => (Chunk::LongMonth, 7),
        b'J' if s.starts_with("Jan") && !starts_with_lower(&s[3..]) => (Chunk::Month, 3),
        b'M' if s.starts_with("Monday") => (Chunk::LongWeekday, 6),
        b'M' if s.starts_with("Mon") && !starts_with_lower(&s[3..]) => (Chunk::Weekday, 3),
        b'M' if s.starts_with("MST") => (Chunk::ZoneName, 3),
        b'0' => match *b.get(1)? {
            b'1' => (Chunk::ZeroMonth, 2),
            b'2' => (Chunk::ZeroDay, 2),
            b'3' => (Chunk::ZeroHour12, 2),
            b'4' => (Chunk::ZeroMinute, 2),
            b'5' => (Chunk::ZeroSecond, 2),
            b'6' => (Chunk::Year, 2),
            _ => return None,
        },
        b'1' if s.starts_with("15") => (Chunk::Hour, 2),
        b'1' => (Chunk::NumMonth, 1),
        b'2' if s.starts_with("2006") => (Chunk::LongYear, 4),
        b'2' => (Chunk::Day, 1),
        b'_' if s.starts_with("_2") && !s.starts_with("_2006") => (Chunk::UnderDay, 2),
        b'3' => (Chunk::Hour12, 1),
        b'4' => (Chunk::Minute, 1),
        b'5' => (Chunk::Second, 1),
        b'P' if s.starts_with("PM") => (Chunk::UpperPM, 2),
        b'p' if s.starts_with("pm") => (Chunk::LowerPM, 2),
        b'-' | b'Z' => {
            let utc_z = b[0] == b'Z';
            let rest = &s[1..];
            if rest.starts_with("07:00") {
                (Chunk::NumZone { colon: true, short: false, utc_z }, 6)
            } else if rest.starts_with("0700") {
                (Chunk::NumZone { colon: false, short: false, utc_z }, 5)
            } else if rest.starts_with("07") {
                (Chunk::NumZone { colon: false, short: true, utc_z }, 3)
            } else {
                return None;
            }
        }
        b'.' | b',' => {
            let digit = *b.get(1)?;
            if digit != b'0' && digit != b'9' {
                return None;
            }
            let run = b[1..].iter().take_while(|&&c| c == digit).count();
            if is_digit_at(s, 1 + run) {
                return None;
            }
            (
                Chunk::Fraction {
                    digits: run,
                    trim: digit == b'9',
                },
                1 + run,
            )
        }
        _ => return None,
    };
    Some(chunk)
}

fn pieces(layout: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;
    while i < layout.len() {
        if let Some((chunk, len)) = element_at(&layout[i..]) {
            if literal_start < i {
                out.push(Piece {
                    chunk: Chunk::Literal,
                    text: &layout[literal_start..i],
                });
            }
            out.push(Piece {
                chunk,
                text: &layout[i..i + len],
            });
            i += len;
            literal_start = i;
        } else {
            i += layout[i..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if literal_start < layout.len() {
        out.push(Piece {
            chunk: Chunk::Literal,
            text: &layout[literal_start..],
        });
    }
    out
}

fn push_offset(out: &mut String, offset_secs: i32, colon: bool, short: bool) {
    let minutes = offset_secs / 60;
    out.push(if minutes < 0 { '-' } else { '+' });
    let minutes = minutes.unsigned_abs();
    out.push_str(&format!("{:02}", minutes / 60));
    if short {
        return;
    }
    if colon {
        out.push(':');
    }
    out.push_str(&format!("{:02}", minutes % 60));
}

/// Renders `t` according to `layout`. An empty layout renders RFC 3339 with nanoseconds.
#[must_use]
pub fn format(t: &DateTime<FixedOffset>, layout: &str) -> String {
    if layout.is_empty() {
        return t.to_rfc3339_opts(SecondsFormat::AutoSi, true);
    }

    let offset = t.offset().local_minus_utc();
    let hour12 = match t.hour() % 12 {
        0 => 12,
        h => h,
    };
    let month_name = LONG_MONTHS[t.month0() as usize];
    let day_name = LONG_DAYS[t.weekday().num_days_from_sunday() as usize];

    let mut out = String::with_capacity(layout.len() + 8);
    for piece in pieces(layout) {
        match piece.chunk {
            Chunk::Literal => out.push_str(piece.text),
            Chunk::LongMonth => out.push_str(month_name),
            Chunk::Month => out.push_str(&month_name[..3]),
            Chunk::NumMonth => out.push_str(&t.month().to_string()),
            Chunk::ZeroMonth => out.push_str(&format!("{:02}", t.month())),
            Chunk::LongWeekday => out.push_str(day_name),
            Chunk::Weekday => out.push_str(&day_name[..3]),
            Chunk::Day => out.push_str(&t.day().to_string()),
            Chunk::UnderDay => out.push_str(&format!("{:>2}", t.day())),
            Chunk::ZeroDay => out.push_str(&format!("{:02}", t.day())),
            Chunk::Hour => out.push_str(&format!("{:02}", t.hour())),
            Chunk::Hour12 => out.push_str(&hour12.to_string()),
            Chunk::ZeroHour12 => out.push_str(&format!("{:02}", hour12)),
            Chunk::Minute => out.push_str(&t.minute().to_string()),
            Chunk::ZeroMinute => out.push_str(&format!("{:02}", t.minute())),
            Chunk::Second => out.push_str(&t.second().to_string()),
            Chunk::ZeroSecond => out.push_str(&format!("{:02}", t.second())),
            Chunk::LongYear => out.push_str(&format!("{:04}", t.year())),
            Chunk::Year => out.push_str(&format!("{:02}", t.year().rem_euclid(100))),
            Chunk::UpperPM => out.push_str(if t.hour() >= 12 { "PM" } else { "AM" }),
            Chunk::LowerPM => out.push_str(if t.hour() >= 12 { "pm" } else { "am" }),
            Chunk::ZoneName => {
                if offset == 0 {
                    out.push_str("UTC");
                } else {
                    push_offset(&mut out, offset, false, false);
                }
            }
            Chunk::NumZone {
                colon,
                short,
                utc_z,
            } => {
                if utc_z && offset == 0 {
                    out.push('Z');
                } else {
                    push_offset(&mut out, offset, colon, short);
                }
            }
            Chunk::Fraction { digits, trim } => {
                // leap seconds carry nanoseconds past one billion
                let nanos = t.nanosecond() % 1_000_000_000;
                let digits = digits.min(9);
                let scaled = nanos / 10u32.pow(9 - digits as u32);
                let mut frac = format!("{:0width$}", scaled, width = digits);
                if trim {
                    let kept = frac.trim_end_matches('0').len();
                    frac.truncate(kept);
                    if frac.is_empty() {
                        continue;
                    }
                }
                out.push_str(&piece.text[..1]);
                out.push_str(&frac);
            }
        }
    }
    out
}

fn skip_literal<'v>(value: &'v str, literal: &str) -> Option<&'v str> {
    let mut value = value;
    let mut literal = literal;
    while let Some(c) = literal.chars().next() {
        if c == ' ' {
            if value.chars().next().is_some_and(|v| v != ' ') {
                return None;
            }
            literal = literal.trim_start_matches(' ');
            value = value.trim_start_matches(' ');
            continue;
        }
        value = value.strip_prefix(c)?;
        literal = &literal[c.len_utf8()..];
    }
    Some(value)
}

/// Reads one or two digits, or exactly two when `fixed`.
fn take_number(value: &str, fixed: bool) -> Option<(u32, &str)> {
    if !is_digit_at(value, 0) {
        return None;
    }
    let len = if is_digit_at(value, 1) {
        2
    } else if fixed {
        return None;
    } else {
        1
    };
    let n = value[..len].parse().ok()?;
    Some((n, &value[len..]))
}

fn take_digits(value: &str, len: usize) -> Option<(u32, &str)> {
    if value.len() < len || !value.as_bytes()[..len].iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some((value[..len].parse().ok()?, &value[len..]))
}

fn take_name<'v>(value: &'v str, names: &[&str], short: bool) -> Option<(usize, &'v str)> {
    names.iter().enumerate().find_map(|(i, name)| {
        let name = if short { &name[..3] } else { *name };
        let head = value.get(..name.len())?;
        head.eq_ignore_ascii_case(name)
            .then(|| (i, &value[name.len()..]))
    })
}

/// Reads a fraction made of the digits following a `.` or `,` separator.
fn take_fraction(value: &str) -> Option<(u32, &str)> {
    let rest = value.strip_prefix(['.', ','])?;
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let mut digits: String = rest[..len].chars().take(9).collect();
    while digits.len() < 9 {
        digits.push('0');
    }
    Some((digits.parse().ok()?, &rest[len..]))
}

fn take_offset(value: &str, colon: bool, short: bool) -> Option<(i32, &str)> {
    let sign = match value.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let (hours, mut rest) = take_digits(&value[1..], 2)?;
    let mut minutes = 0;
    if !short {
        if colon {
            rest = rest.strip_prefix(':')?;
        }
        let (m, tail) = take_digits(rest, 2)?;
        minutes = m;
        rest = tail;
    }
    if hours > 24 || minutes > 59 {
        return None;
    }
    Some((sign * (hours * 3600 + minutes * 60) as i32, rest))
}

fn take_zone_name(value: &str) -> Option<(i32, &str)> {
    if let Some(found) = take_offset(value, false, false) {
        return Some(found);
    }
    let len = value.bytes().take_while(u8::is_ascii_uppercase).count();
    if !(3..=5).contains(&len) {
        return None;
    }
    Some((0, &value[len..]))
}

/// Parses `value` against `layout`. An empty layout parses RFC 3339.
///
/// # Errors
///
/// Returns a description naming the element that did not match, a field out of range,
/// or trailing text left over after the layout is exhausted.
pub fn parse(value: &str, layout: &str) -> Result<DateTime<FixedOffset>, String> {
    if layout.is_empty() {
        return DateTime::parse_from_rfc3339(value).map_err(|e| e.to_string());
    }

    let mismatch =
        |rest: &str, piece: &Piece<'_>| format!("cannot parse {:?} as {:?}", rest, piece.text);

    let mut year = 0;
    let mut month = 1;
    let mut day = 1;
    let mut hour = 0;
    let mut minute = 0;
    let mut second = 0;
    let mut nanos = 0;
    let mut offset = 0;
    let mut pm: Option<bool> = None;

    let pieces = pieces(layout);
    let mut rest = value;
    for (index, piece) in pieces.iter().enumerate() {
        let next = match piece.chunk {
            Chunk::Literal => skip_literal(rest, piece.text),
            Chunk::LongMonth | Chunk::Month => {
                take_name(rest, &LONG_MONTHS, piece.chunk == Chunk::Month).map(|(i, tail)| {
                    month = i as u32 + 1;
                    tail
                })
            }
            Chunk::LongWeekday | Chunk::Weekday => {
                take_name(rest, &LONG_DAYS, piece.chunk == Chunk::Weekday).map(|(_, tail)| tail)
            }
            Chunk::NumMonth | Chunk::ZeroMonth => {
                take_number(rest, piece.chunk == Chunk::ZeroMonth)
                    .filter(|(n, _)| (1..=12).contains(n))
                    .map(|(n, tail)| {
                        month = n;
                        tail
                    })
            }
            Chunk::Day | Chunk::UnderDay | Chunk::ZeroDay => {
                let input = if piece.chunk == Chunk::UnderDay {
                    rest.strip_prefix(' ').unwrap_or(rest)
                } else {
                    rest
                };
                take_number(input, piece.chunk == Chunk::ZeroDay)
                    .filter(|(n, _)| (1..=31).contains(n))
                    .map(|(n, tail)| {
                        day = n;
                        tail
                    })
            }
            Chunk::Hour => take_number(rest, false)
                .filter(|(n, _)| *n < 24)
                .map(|(n, tail)| {
                    hour = n;
                    tail
                }),
            Chunk::Hour12 | Chunk::ZeroHour12 => {
                take_number(rest, piece.chunk == Chunk::ZeroHour12)
                    .filter(|(n, _)| *n <= 12)
                    .map(|(n, tail)| {
                        hour = n;
                        tail
                    })
            }
            Chunk::Minute | Chunk::ZeroMinute => {
                take_number(rest, piece.chunk == Chunk::ZeroMinute)
                    .filter(|(n, _)| *n < 60)
                    .map(|(n, tail)| {
                        minute = n;
                        tail
                    })
            }
            Chunk::Second | Chunk::ZeroSecond => {
                take_number(rest, piece.chunk == Chunk::ZeroSecond)
                    .filter(|(n, _)| *n < 60)
                    .map(|(n, mut tail)| {
                        second = n;
                        // fractional seconds the layout does not spell out
                        let fraction_follows = matches!(
                            pieces.get(index + 1),
                            Some(Piece {
                                chunk: Chunk::Fraction { .. },
                                ..
                            })
                        );
                        if !fraction_follows {
                            if let Some((n, after)) = take_fraction(tail) {
                                nanos = n;
                                tail = after;
                            }
                        }
                        tail
                    })
            }
            Chunk::LongYear => take_digits(rest, 4).map(|(n, tail)| {
                year = n as i32;
                tail
            }),
            Chunk::Year => take_digits(rest, 2).map(|(n, tail)| {
                year = if n >= 69 { 1900 + n as i32 } else { 2000 + n as i32 };
                tail
            }),
            Chunk::UpperPM | Chunk::LowerPM => {
                let (am, pm_text) = if piece.chunk == Chunk::UpperPM {
                    ("AM", "PM")
                } else {
                    ("am", "pm")
                };
                if let Some(tail) = rest.strip_prefix(pm_text) {
                    pm = Some(true);
                    Some(tail)
                } else if let Some(tail) = rest.strip_prefix(am) {
                    pm = Some(false);
                    Some(tail)
                } else {
                    None
                }
            }
            Chunk::ZoneName => take_zone_name(rest).map(|(secs, tail)| {
                offset = secs;
                tail
            }),
            Chunk::NumZone {
                colon,
                short,
                utc_z,
            } => match rest.strip_prefix('Z') {
                Some(tail) if utc_z => {
                    offset = 0;
                    Some(tail)
                }
                _ => take_offset(rest, colon, short).map(|(secs, tail)| {
                    offset = secs;
                    tail
                }),
            },
            Chunk::Fraction { digits, trim } => {
                if trim {
                    match take_fraction(rest) {
                        Some((n, tail)) => {
                            nanos = n;
                            Some(tail)
                        }
                        None => Some(rest),
                    }
                } else {
                    let width = 1 + digits;
                    let exact = rest.len() >= width
                        && rest.as_bytes()[1..width].iter().all(u8::is_ascii_digit);
                    if exact {
                        take_fraction(&rest[..width]).map(|(n, _)| {
                            nanos = n;
                            &rest[width..]
                        })
                    } else {
                        None
                    }
                }
            }
        };
        rest = next.ok_or_else(|| mismatch(rest, piece))?;
    }
    if !rest.is_empty() {
        return Err(format!("extra text {:?}", rest));
    }

    match pm {
        Some(true) if hour < 12 => hour += 12,
        Some(false) if hour == 12 => hour = 0,
        _ => {}
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("day out of range in {:?}", value))?;
    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
        .ok_or_else(|| format!("time out of range in {:?}", value))?;
    let zone = FixedOffset::east_opt(offset)
        .ok_or_else(|| format!("zone offset out of range in {:?}", value))?;
    zone.from_local_datetime(&NaiveDateTime::new(date, time))
        .single()
        .ok_or_else(|| format!("ambiguous local time in {:?}", value))
}
