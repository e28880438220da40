//! Lenient parsing of the cells and fields we get from sources.
//!
//! Public dashboards format numbers for humans (`1,234`, ` 12 `) and change their date formats
//! without notice so none of these helpers fail hard: they return `None` (or `0`) and let the
//! caller decide.
//!

use chrono::{DateTime, TimeZone, Utc};
use tracing::trace;

/// Collapse every run of whitespace into a single space and trim both ends.
///
/// ```rust
/// use casecount_sources::parse_string;
///
/// assert_eq!("St. Louis County", parse_string("  St.  Louis\n County "));
/// ```
///
pub fn parse_string(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a count, ignoring thousands separators and spaces.
///
/// Integral floats (`12.0`) are accepted as they show up in CSV exports.
///
pub fn parse_number(s: &str) -> Option<u64> {
    let clean: String = s
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if clean.is_empty() {
        return None;
    }

    if let Ok(n) = clean.parse::<u64>() {
        return Some(n);
    }

    match clean.parse::<f64>() {
        Ok(f) if f >= 0. && f.fract() == 0. && f <= u64::MAX as f64 => Some(f as u64),
        _ => {
            trace!("not a count: {s:?}");
            None
        }
    }
}

/// Same as `parse_number()` but anything unparseable counts as zero.
///
#[inline]
pub fn number_or_zero(s: &str) -> u64 {
    parse_number(s).unwrap_or(0)
}

/// Parse a timestamp as found in CSV exports.
///
/// - all digits: milliseconds since the epoch
/// - RFC 3339
/// - anything `dateparser` understands
///
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if s.chars().all(|c| c.is_ascii_digit()) {
        let ms = s.parse::<i64>().ok()?;
        return Utc.timestamp_millis_opt(ms).single();
    }

    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }

    match dateparser::parse(s) {
        Ok(d) => Some(d),
        Err(e) => {
            trace!("not a timestamp: {s:?}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Boone", "Boone")]
    #[case("  Boone ", "Boone")]
    #[case("St.\u{a0}Louis  City", "St. Louis City")]
    #[case("", "")]
    fn test_parse_string(#[case] input: &str, #[case] want: &str) {
        assert_eq!(want, parse_string(input));
    }

    #[rstest]
    #[case("12", Some(12))]
    #[case("1,234", Some(1234))]
    #[case(" 7 ", Some(7))]
    #[case("12.0", Some(12))]
    #[case("12.5", None)]
    #[case("-3", None)]
    #[case("", None)]
    #[case("n/a", None)]
    fn test_parse_number(#[case] input: &str, #[case] want: Option<u64>) {
        assert_eq!(want, parse_number(input));
    }

    #[test]
    fn test_number_or_zero() {
        assert_eq!(0, number_or_zero("-"));
        assert_eq!(42, number_or_zero("42"));
    }

    #[test]
    fn test_parse_timestamp_epoch() {
        let d = parse_timestamp("1588011200000").unwrap();
        assert_eq!(Utc.with_ymd_and_hms(2020, 4, 27, 18, 13, 20).unwrap(), d);
    }

    #[test]
    fn test_parse_timestamp_iso() {
        let d = parse_timestamp("2020-04-27T18:13:20Z").unwrap();
        assert_eq!(Utc.with_ymd_and_hms(2020, 4, 27, 18, 13, 20).unwrap(), d);

        let d = parse_timestamp("2020-04-27T20:13:20+02:00").unwrap();
        assert_eq!(Utc.with_ymd_and_hms(2020, 4, 27, 18, 13, 20).unwrap(), d);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("not a date")]
    fn test_parse_timestamp_bad(#[case] input: &str) {
        assert!(parse_timestamp(input).is_none());
    }
}
