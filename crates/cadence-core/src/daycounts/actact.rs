//! Actual/Actual ISDA day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// The interval is split at calendar year boundaries and each segment is
/// normalized by its own year's basis (365 or 366). A full calendar year
/// is therefore exactly 1 whether or not it is a leap year.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_until(end)
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start >= end {
            return Decimal::ZERO;
        }

        let mut total = Decimal::ZERO;
        let mut cursor = start;

        // Whole segments up to each January 1st between the dates
        while cursor.year() < end.year() {
            let next_jan = Date::from_ymd(cursor.year() + 1, 1, 1)
                .expect("January 1st is always valid");
            total += Decimal::from(cursor.days_until(next_jan))
                / Decimal::from(cursor.days_in_year());
            cursor = next_jan;
        }

        // Remainder within the end year
        total += Decimal::from(cursor.days_until(end)) / Decimal::from(cursor.days_in_year());
        total
    }
}
