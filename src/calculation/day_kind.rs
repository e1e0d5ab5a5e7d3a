//! Calendar classification.
//!
//! This module decides the [`DayKind`] of a date from the day of the week and the
//! org-wide holiday and alternate-Saturday calendars.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{CalendarSnapshot, DayKind};

/// The org-wide calendars for a month, indexed by date.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::OrgCalendar;
/// use attendance_engine::models::{CalendarSnapshot, DayKind, Holiday};
/// use chrono::NaiveDate;
///
/// let calendar = OrgCalendar::from_snapshot(&CalendarSnapshot {
///     holidays: vec![Holiday {
///         date: NaiveDate::from_ymd_opt(2024, 6, 17).unwrap(),
///         name: "Founders Day".to_string(),
///     }],
///     alternate_saturdays: vec![],
/// });
///
/// // 2024-06-02 is a Sunday
/// assert_eq!(calendar.day_kind(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()), DayKind::WeeklyOff);
/// assert_eq!(calendar.day_kind(NaiveDate::from_ymd_opt(2024, 6, 17).unwrap()), DayKind::Holiday);
/// assert_eq!(calendar.day_kind(NaiveDate::from_ymd_opt(2024, 6, 18).unwrap()), DayKind::Ordinary);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgCalendar {
    holidays: BTreeSet<NaiveDate>,
    alternate_saturdays: BTreeSet<NaiveDate>,
}

impl OrgCalendar {
    /// Builds the calendar from the fetched holiday and alternate-Saturday lists.
    pub fn from_snapshot(snapshot: &CalendarSnapshot) -> Self {
        Self {
            holidays: snapshot.holidays.iter().map(|h| h.date).collect(),
            alternate_saturdays: snapshot.alternate_saturdays.iter().map(|s| s.date).collect(),
        }
    }

    /// Determines the day kind for `date`.
    ///
    /// Sunday is tested first, then the holiday set, then the alternate-Saturday
    /// set. A date in both calendars is a holiday.
    pub fn day_kind(&self, date: NaiveDate) -> DayKind {
        if date.weekday() == Weekday::Sun {
            DayKind::WeeklyOff
        } else if self.holidays.contains(&date) {
            DayKind::Holiday
        } else if self.alternate_saturdays.contains(&date) {
            DayKind::AlternateSaturdayOff
        } else {
            DayKind::Ordinary
        }
    }

    /// Returns true if `date` is any kind of special/off day.
    pub fn is_off_day(&self, date: NaiveDate) -> bool {
        self.day_kind(date).is_off_day()
    }

    /// Number of listed holidays.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    /// Number of listed alternate Saturdays.
    pub fn alternate_saturday_count(&self) -> usize {
        self.alternate_saturdays.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlternateSaturday, Holiday};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn calendar(holidays: &[&str], alternate_saturdays: &[&str]) -> OrgCalendar {
        OrgCalendar::from_snapshot(&CalendarSnapshot {
            holidays: holidays
                .iter()
                .map(|d| Holiday {
                    date: make_date(d),
                    name: "Holiday".to_string(),
                })
                .collect(),
            alternate_saturdays: alternate_saturdays
                .iter()
                .map(|d| AlternateSaturday { date: make_date(d) })
                .collect(),
        })
    }

    #[test]
    fn test_plain_weekday_is_ordinary() {
        // 2024-06-03 is a Monday
        assert_eq!(
            calendar(&[], &[]).day_kind(make_date("2024-06-03")),
            DayKind::Ordinary
        );
    }

    #[test]
    fn test_unlisted_saturday_is_ordinary() {
        // 2024-06-08 is a Saturday
        assert_eq!(
            calendar(&[], &[]).day_kind(make_date("2024-06-08")),
            DayKind::Ordinary
        );
    }

    #[test]
    fn test_sunday_is_weekly_off() {
        assert_eq!(
            calendar(&[], &[]).day_kind(make_date("2024-06-02")),
            DayKind::WeeklyOff
        );
    }

    #[test]
    fn test_sunday_wins_over_holiday() {
        let cal = calendar(&["2024-06-02"], &[]);
        assert_eq!(cal.day_kind(make_date("2024-06-02")), DayKind::WeeklyOff);
        assert!(cal.is_off_day(make_date("2024-06-02")));
    }

    #[test]
    fn test_listed_alternate_saturday() {
        let cal = calendar(&[], &["2024-06-08"]);
        assert_eq!(
            cal.day_kind(make_date("2024-06-08")),
            DayKind::AlternateSaturdayOff
        );
    }

    #[test]
    fn test_holiday_wins_over_alternate_saturday() {
        let cal = calendar(&["2024-06-08"], &["2024-06-08"]);
        assert_eq!(cal.day_kind(make_date("2024-06-08")), DayKind::Holiday);
    }

    #[test]
    fn test_duplicate_calendar_entries_collapse() {
        let cal = calendar(&["2024-06-17", "2024-06-17"], &["2024-06-08"]);
        assert_eq!(cal.holiday_count(), 1);
        assert_eq!(cal.alternate_saturday_count(), 1);
    }

    #[test]
    fn test_empty_calendar_default() {
        let cal = OrgCalendar::default();
        assert!(!cal.is_off_day(make_date("2024-06-17")));
    }
}
