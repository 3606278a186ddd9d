//! 30E/360 day count conventions.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Computes the 30/360 family day count from adjusted day-of-month values.
fn thirty360_count(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    360 * i64::from(end.year() - start.year())
        + 30 * (i64::from(end.month()) - i64::from(start.month()))
        + (d2 - d1)
}

/// 30E/360 (Eurobond basis) day count convention.
///
/// Both the 31st of a month and a start/end day beyond 30 count as the
/// 30th; February is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));
        thirty360_count(start, end, d1, d2)
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }
}

/// 30E/360 ISDA day count convention.
///
/// Like 30E/360 but with the ISDA February rule: a start date on the last
/// day of February counts as the 30th, and an end date on the last day of
/// February counts as the 30th unless it is the contract's maturity date.
/// The maturity date is therefore required context.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360EIsda {
    maturity: Option<Date>,
}

impl Thirty360EIsda {
    /// Creates the convention with the contract maturity as context.
    #[must_use]
    pub fn new(maturity: Option<Date>) -> Self {
        Self { maturity }
    }
}

impl DayCount for Thirty360EIsda {
    fn name(&self) -> &'static str {
        "30E/360 ISDA"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = if start.day() == 31 || start.is_end_of_february() {
            30
        } else {
            i64::from(start.day())
        };

        let end_is_maturity = self.maturity == Some(end);
        let d2 = if end.day() == 31 || (end.is_end_of_february() && !end_is_maturity) {
            30
        } else {
            i64::from(end.day())
        };

        thirty360_count(start, end, d1, d2)
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thirty360e_full_year() {
        let dc = Thirty360E;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();

        assert_eq!(dc.day_count(start, end), 360);
        assert_eq!(dc.year_fraction(start, end), dec!(1));
    }

    #[test]
    fn test_thirty360e_31st_clips() {
        let dc = Thirty360E;
        let start = Date::from_ymd(2025, 1, 31).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();

        // Both 31sts count as 30: 30*(3-1) + (30-30) = 60
        assert_eq!(dc.day_count(start, end), 60);
    }

    #[test]
    fn test_thirty360e_february_untouched() {
        let dc = Thirty360E;
        let start = Date::from_ymd(2025, 2, 28).unwrap();
        let end = Date::from_ymd(2025, 3, 30).unwrap();

        // Feb 28 stays 28: 30*(3-2) + (30-28) = 32
        assert_eq!(dc.day_count(start, end), 32);
    }

    #[test]
    fn test_isda_february_start() {
        let dc = Thirty360EIsda::new(None);
        let start = Date::from_ymd(2025, 2, 28).unwrap();
        let end = Date::from_ymd(2025, 3, 30).unwrap();

        // Last day of February counts as 30: 30*(3-2) + (30-30) = 30
        assert_eq!(dc.day_count(start, end), 30);
    }

    #[test]
    fn test_isda_february_end_at_maturity() {
        let feb28 = Date::from_ymd(2023, 2, 28).unwrap();
        let start = Date::from_ymd(2022, 8, 28).unwrap();

        // End on the last day of February, which IS the maturity: day stays
        // 28, so 360 + 30*(2-8) + (28-28) = 180.
        let dc = Thirty360EIsda::new(Some(feb28));
        assert_eq!(dc.day_count(start, feb28), 180);

        // Same end date, but not the maturity: the day counts as 30.
        let dc = Thirty360EIsda::new(None);
        assert_eq!(dc.day_count(start, feb28), 182);
    }

    #[test]
    fn test_isda_leap_february() {
        let dc = Thirty360EIsda::new(None);
        // 2024-02-29 is the last day of February in a leap year.
        let start = Date::from_ymd(2024, 2, 29).unwrap();
        let end = Date::from_ymd(2024, 8, 29).unwrap();

        // 30*(8-2) + (29-30) = 179
        assert_eq!(dc.day_count(start, end), 179);
    }
}
