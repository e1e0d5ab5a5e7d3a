//! Worked-duration parsing.
//!
//! Reports carry their worked duration as `"hh:mm"`, sometimes with a redundant
//! seconds segment (`"hh:mm:ss"`). This module normalizes that text to decimal hours.

use rust_decimal::Decimal;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Parses a worked duration into decimal hours (`hours + minutes / 60`).
///
/// A third seconds segment is accepted and discarded. Returns `None` for anything
/// else: empty text, non-numeric or negative segments, minutes of 60 or more, or
/// the wrong number of segments.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::parse_worked_duration;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(parse_worked_duration("08:30:00"), Some(Decimal::from_str("8.5").unwrap()));
/// assert_eq!(parse_worked_duration("4:15"), Some(Decimal::from_str("4.25").unwrap()));
/// assert_eq!(parse_worked_duration("eight hours"), None);
/// ```
pub fn parse_worked_duration(raw: &str) -> Option<Decimal> {
    let segments: Vec<&str> = raw.trim().split(':').collect();

    let (hours, minutes) = match segments.as_slice() {
        [h, m] => (*h, *m),
        [h, m, s] => {
            // seconds are discarded, but must still be a number
            parse_segment(s)?;
            (*h, *m)
        }
        _ => return None,
    };

    let hours = parse_segment(hours)?;
    let minutes = parse_segment(minutes)?;
    if minutes >= 60 {
        return None;
    }

    Some(Decimal::from(hours) + Decimal::from(minutes) / MINUTES_PER_HOUR)
}

fn parse_segment(segment: &str) -> Option<u32> {
    let segment = segment.trim();
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
