//! Business day calendars and adjustment conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait: the business-day predicate consumed by
//!   day counts and date adjusters
//! - Simple calendar implementations (no-holiday, weekend-only)
//! - Business-day adjustment conventions and the [`BusinessDayAdjuster`]
//!   combining a rule with a shift/calculation order

mod conventions;

pub use conventions::{BusinessDayAdjuster, BusinessDayConvention, ShiftConvention};

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars decide which days are business days. Cadence treats the
/// calendar as an external oracle: implementations may wrap real holiday
/// data; the two built-in calendars cover the common contract defaults.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Counts business days in the half-open interval `[start, end)`.
    ///
    /// Returns a negative count when `end` is before `start`.
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        if end < start {
            return -self.business_days_between(end, start);
        }

        let mut count = 0;
        let mut current = start;
        while current < end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }
        count
    }
}

/// A calendar with no holidays: every day is a business day.
///
/// The default when a contract specifies no calendar; business-day
/// adjustment becomes the identity under this calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidayCalendar;

impl Calendar for NoHolidayCalendar {
    fn name(&self) -> &'static str {
        "No Holidays"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// A weekend-only calendar: Monday through Friday are business days.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Monday to Friday"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Enumeration of the supported calendar selections.
///
/// Resolved once from a contract attribute; `NC` (no calendar) is the
/// default when the attribute is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalendarConvention {
    /// No calendar: every day is a business day.
    #[default]
    NoCalendar,
    /// Weekends are non-business days.
    MondayToFriday,
}

impl CalendarConvention {
    /// Creates the calendar implementation for this convention.
    #[must_use]
    pub fn to_calendar(&self) -> Arc<dyn Calendar> {
        match self {
            CalendarConvention::NoCalendar => Arc::new(NoHolidayCalendar),
            CalendarConvention::MondayToFriday => Arc::new(WeekendCalendar),
        }
    }

    /// Returns the convention code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CalendarConvention::NoCalendar => "NC",
            CalendarConvention::MondayToFriday => "MF",
        }
    }
}

impl FromStr for CalendarConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NC" | "NOCALENDAR" | "" => Ok(CalendarConvention::NoCalendar),
            "MF" | "MONDAYTOFRIDAY" | "WEEKEND" => Ok(CalendarConvention::MondayToFriday),
            _ => Err(CoreError::unknown_convention("calendar", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_holiday_calendar() {
        let cal = NoHolidayCalendar;
        // A Saturday counts as a business day under the empty calendar.
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert!(cal.is_business_day(saturday));
        assert_eq!(cal.next_business_day(saturday), saturday);
    }

    #[test]
    fn test_weekend_calendar_rolls() {
        let cal = WeekendCalendar;
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();

        assert!(!cal.is_business_day(saturday));
        assert_eq!(cal.next_business_day(saturday), Date::from_ymd(2025, 1, 6).unwrap());
        assert_eq!(
            cal.previous_business_day(saturday),
            Date::from_ymd(2025, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_business_days_between() {
        let cal = WeekendCalendar;
        // Mon 2025-01-06 .. Mon 2025-01-13: 5 business days in [start, end)
        let start = Date::from_ymd(2025, 1, 6).unwrap();
        let end = Date::from_ymd(2025, 1, 13).unwrap();
        assert_eq!(cal.business_days_between(start, end), 5);
        assert_eq!(cal.business_days_between(end, start), -5);
        assert_eq!(cal.business_days_between(start, start), 0);
    }

    #[test]
    fn test_convention_parse() {
        assert_eq!("NC".parse::<CalendarConvention>().unwrap(), CalendarConvention::NoCalendar);
        assert_eq!(
            "MF".parse::<CalendarConvention>().unwrap(),
            CalendarConvention::MondayToFriday
        );
        assert!("XX".parse::<CalendarConvention>().is_err());
    }
}
