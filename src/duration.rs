//! Compact duration notation (`1h30m`, `45s`, `1.5ms`) and unit-suffix scaling.
//!
//! Durations travel as signed nanosecond counts that fit an `i64`. The compact notation
//! is a sequence of `<decimal><unit>` pairs with an optional leading sign; the largest
//! unit rendered is the hour.

use chrono::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// A duration unit usable as a format hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
}

impl Unit {
    /// Resolves a unit suffix such as `s` or `ms`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logfmt_codec::duration::Unit;
    ///
    /// assert_eq!(Unit::from_suffix("s"), Some(Unit::Second));
    /// assert_eq!(Unit::from_suffix("µs"), Some(Unit::Microsecond));
    /// assert_eq!(Unit::from_suffix("fortnight"), None);
    /// ```
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Unit> {
        match suffix {
            "ns" => Some(Unit::Nanosecond),
            // micro sign (U+00B5) and greek mu (U+03BC)
            "us" | "\u{b5}s" | "\u{3bc}s" => Some(Unit::Microsecond),
            "ms" => Some(Unit::Millisecond),
            "s" => Some(Unit::Second),
            "m" => Some(Unit::Minute),
            "h" => Some(Unit::Hour),
            _ => None,
        }
    }

    /// Number of nanoseconds in one unit.
    #[must_use]
    pub const fn nanos(&self) -> u128 {
        match self {
            Unit::Nanosecond => 1,
            Unit::Microsecond => NANOS_PER_MICRO,
            Unit::Millisecond => NANOS_PER_MILLI,
            Unit::Second => NANOS_PER_SEC,
            Unit::Minute => NANOS_PER_MIN,
            Unit::Hour => NANOS_PER_HOUR,
        }
    }
}

fn total_nanos(d: &Duration) -> i128 {
    i128::from(d.num_seconds()) * NANOS_PER_SEC as i128 + i128::from(d.subsec_nanos())
}

/// Writes `v / 10^prec` with the fractional part trimmed of trailing zeros.
fn push_fraction(out: &mut String, v: u128, prec: u32) {
    let scale = 10u128.pow(prec);
    out.push_str(&(v / scale).to_string());
    let mut frac = v % scale;
    if frac == 0 {
        return;
    }
    let mut width = prec as usize;
    while frac % 10 == 0 {
        frac /= 10;
        width -= 1;
    }
    out.push('.');
    out.push_str(&format!("{:0width$}", frac, width = width));
}

/// Formats a duration in compact notation.
///
/// # Examples
///
/// ```rust
/// use chrono::Duration;
/// use logfmt_codec::duration::format;
///
/// assert_eq!(format(&Duration::seconds(45)), "45s");
/// assert_eq!(format(&Duration::minutes(90)), "1h30m0s");
/// assert_eq!(format(&Duration::milliseconds(1500)), "1.5s");
/// assert_eq!(format(&Duration::zero()), "0s");
/// ```
#[must_use]
pub fn format(d: &Duration) -> String {
    let nanos = total_nanos(d);
    if nanos == 0 {
        return "0s".to_string();
    }

    let mut out = String::with_capacity(16);
    if nanos < 0 {
        out.push('-');
    }
    let u = nanos.unsigned_abs();

    if u < NANOS_PER_SEC {
        if u < NANOS_PER_MICRO {
            out.push_str(&u.to_string());
            out.push_str("ns");
        } else if u < NANOS_PER_MILLI {
            push_fraction(&mut out, u, 3);
            out.push_str("\u{b5}s");
        } else {
            push_fraction(&mut out, u, 6);
            out.push_str("ms");
        }
        return out;
    }

    let hours = u / NANOS_PER_HOUR;
    let minutes = (u % NANOS_PER_HOUR) / NANOS_PER_MIN;
    let rest = u % NANOS_PER_MIN;
    if hours > 0 {
        out.push_str(&hours.to_string());
        out.push('h');
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&minutes.to_string());
        out.push('m');
    }
    push_fraction(&mut out, rest, 9);
    out.push('s');
    out
}

/// Formats the magnitude of `d` in `unit`, without a suffix.
///
/// Exact multiples render as integers. Otherwise the fraction carries enough digits to
/// recover the span to the nanosecond through [`parse_in`].
///
/// ```rust
/// use chrono::Duration;
/// use logfmt_codec::duration::{format_in, Unit};
///
/// assert_eq!(format_in(&Duration::seconds(45), Unit::Second), "45");
/// assert_eq!(format_in(&Duration::milliseconds(1500), Unit::Second), "1.5");
/// assert_eq!(format_in(&Duration::nanoseconds(1), Unit::Hour), "0.0000000000003");
/// ```
#[must_use]
pub fn format_in(d: &Duration, unit: Unit) -> String {
    let nanos = total_nanos(d);
    let per = unit.nanos();
    let u = nanos.unsigned_abs();

    let mut out = String::with_capacity(24);
    if nanos < 0 {
        out.push('-');
    }
    let rem = u % per;
    if rem == 0 {
        out.push_str(&(u / per).to_string());
        return out;
    }

    // smallest power of ten at least as fine as one nanosecond of this unit
    let mut prec = 0;
    while 10u128.pow(prec) < per {
        prec += 1;
    }
    let scale = 10u128.pow(prec);
    let frac = (rem * scale + per / 2) / per;
    push_fraction(&mut out, (u / per) * scale + frac, prec);
    out
}

/// Parses compact notation such as `45s`, `1h30m` or `-1.5ms`.
///
/// Fractions finer than a nanosecond are rounded to the nearest nanosecond.
///
/// # Errors
///
/// Returns a description of the problem for empty input, a missing or unknown unit,
/// malformed numbers, and spans that overflow 64-bit nanoseconds.
///
/// ```rust
/// use chrono::Duration;
/// use logfmt_codec::duration::parse;
///
/// assert_eq!(parse("1h30m"), Ok(Duration::minutes(90)));
/// assert_eq!(parse("45s"), Ok(Duration::seconds(45)));
/// assert!(parse("45").is_err());
/// ```
pub fn parse(s: &str) -> Result<Duration, String> {
    let invalid = || format!("invalid duration {:?}", s);

    let (negative, mut rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_num) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid());
        }

        let unit_len = after_num
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map_or(after_num.len(), |(i, _)| i);
        let (suffix, tail) = after_num.split_at(unit_len);
        if suffix.is_empty() {
            return Err(format!("missing unit in duration {:?}", s));
        }
        let unit = Unit::from_suffix(suffix)
            .ok_or_else(|| format!("unknown unit {:?} in duration {:?}", suffix, s))?;

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid())?
        };
        let mut component = whole.checked_mul(unit.nanos()).ok_or_else(invalid)?;

        // digits past nanosecond precision of the largest unit cannot matter
        let frac_digits = &frac_digits[..frac_digits.len().min(24)];
        if !frac_digits.is_empty() {
            let frac: u128 = frac_digits.parse().map_err(|_| invalid())?;
            let scale = 10u128.pow(frac_digits.len() as u32);
            component += (frac * unit.nanos() + scale / 2) / scale;
        }

        total = total.checked_add(component).ok_or_else(invalid)?;
        if total > i64::MAX as u128 + u128::from(negative) {
            return Err(invalid());
        }
        rest = tail;
    }

    let nanos = if negative {
        -(total as i128)
    } else {
        total as i128
    };
    Ok(Duration::nanoseconds(nanos as i64))
}

/// Parses a plain decimal number and scales it by `unit`.
///
/// ```rust
/// use chrono::Duration;
/// use logfmt_codec::duration::{parse_in, Unit};
///
/// assert_eq!(parse_in("45", Unit::Second), Ok(Duration::seconds(45)));
/// assert!(parse_in("45s", Unit::Second).is_err());
/// ```
pub fn parse_in(s: &str, unit: Unit) -> Result<Duration, String> {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let plain = digits.bytes().any(|b| b.is_ascii_digit())
        && digits.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && digits.bytes().filter(|&b| b == b'.').count() <= 1;
    if !plain {
        return Err(format!("expected a plain number, found {:?}", s));
    }

    let mut scaled = String::with_capacity(s.len() + 2);
    scaled.push_str(s);
    scaled.push_str(match unit {
        Unit::Nanosecond => "ns",
        Unit::Microsecond => "us",
        Unit::Millisecond => "ms",
        Unit::Second => "s",
        Unit::Minute => "m",
        Unit::Hour => "h",
    });
    parse(&scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sub_second() {
        assert_eq!(format(&Duration::nanoseconds(12)), "12ns");
        assert_eq!(format(&Duration::nanoseconds(1_500)), "1.5\u{b5}s");
        assert_eq!(format(&Duration::microseconds(300_000)), "300ms");
        assert_eq!(format(&Duration::nanoseconds(-2_000_000)), "-2ms");
    }

    #[test]
    fn test_format_large() {
        assert_eq!(format(&Duration::hours(26)), "26h0m0s");
        assert_eq!(format(&Duration::seconds(61)), "1m1s");
        assert_eq!(
            format(&(Duration::hours(1) + Duration::milliseconds(500))),
            "1h0m0.5s"
        );
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(
            parse("2h45m0.5s"),
            Ok(Duration::hours(2) + Duration::minutes(45) + Duration::milliseconds(500))
        );
        assert_eq!(parse("-1.5h"), Ok(Duration::minutes(-90)));
        assert_eq!(parse("1.5\u{b5}s"), Ok(Duration::nanoseconds(1_500)));
        assert_eq!(parse("1.5\u{3bc}s"), Ok(Duration::nanoseconds(1_500)));
        assert_eq!(parse(".5s"), Ok(Duration::milliseconds(500)));
        assert_eq!(parse("0"), Ok(Duration::zero()));
        assert_eq!(parse("-0"), Ok(Duration::zero()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse("-").is_err());
        assert!(parse("s").is_err());
        assert!(parse("1x").is_err());
        assert!(parse("1h30").is_err());
        assert!(parse(".s").is_err());
        assert!(parse("3000000h").is_err());
    }

    #[test]
    fn test_parse_limits() {
        assert_eq!(
            parse("9223372036854775807ns"),
            Ok(Duration::nanoseconds(i64::MAX))
        );
        assert_eq!(
            parse("-9223372036854775808ns"),
            Ok(Duration::nanoseconds(i64::MIN))
        );
        assert!(parse("9223372036854775808ns").is_err());
    }

    #[test]
    fn test_format_in_units() {
        assert_eq!(format_in(&Duration::minutes(3), Unit::Minute), "3");
        assert_eq!(format_in(&Duration::seconds(-45), Unit::Second), "-45");
        assert_eq!(format_in(&Duration::seconds(2), Unit::Millisecond), "2000");
        assert_eq!(format_in(&Duration::seconds(90), Unit::Minute), "1.5");
        assert_eq!(
            format_in(&Duration::milliseconds(-1500), Unit::Second),
            "-1.5"
        );
    }

    #[test]
    fn test_format_in_keeps_nanoseconds() {
        let long = Duration::days(200) + Duration::nanoseconds(1);
        assert_eq!(format_in(&long, Unit::Second), "17280000.000000001");
        assert_eq!(parse_in("17280000.000000001", Unit::Second), Ok(long));

        let tiny = Duration::nanoseconds(1);
        let text = format_in(&tiny, Unit::Hour);
        assert_eq!(text, "0.0000000000003");
        assert_eq!(parse_in(&text, Unit::Hour), Ok(tiny));

        let third = Duration::seconds(20) + Duration::nanoseconds(7);
        let text = format_in(&third, Unit::Minute);
        assert_eq!(parse_in(&text, Unit::Minute), Ok(third));
    }

    #[test]
    fn test_parse_rounds_to_nearest_nanosecond() {
        assert_eq!(parse("1.6ns"), Ok(Duration::nanoseconds(2)));
        assert_eq!(parse("1.4ns"), Ok(Duration::nanoseconds(1)));
    }

    #[test]
    fn test_parse_in_units() {
        assert_eq!(parse_in("1.5", Unit::Minute), Ok(Duration::seconds(90)));
        assert_eq!(parse_in("-45", Unit::Second), Ok(Duration::seconds(-45)));
        assert_eq!(parse_in("250", Unit::Millisecond), Ok(Duration::milliseconds(250)));
        assert!(parse_in("", Unit::Second).is_err());
        assert!(parse_in("1.2.3", Unit::Second).is_err());
        assert!(parse_in("1m5", Unit::Second).is_err());
    }
}
