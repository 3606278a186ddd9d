//! Business/252 day count convention.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::DayCount;
use crate::calendars::Calendar;
use crate::types::Date;

/// Business/252 day count convention.
///
/// Counts business days in the half-open interval `[start, end)` against
/// a business day calendar, over a 252-day year basis. The Brazilian
/// market convention.
#[derive(Clone)]
pub struct Bus252 {
    calendar: Arc<dyn Calendar>,
}

impl Bus252 {
    /// Creates the convention bound to the given calendar.
    #[must_use]
    pub fn new(calendar: Arc<dyn Calendar>) -> Self {
        Self { calendar }
    }
}

impl DayCount for Bus252 {
    fn name(&self) -> &'static str {
        "BUS/252"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        self.calendar.business_days_between(start, end)
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(252)
    }
}

impl std::fmt::Debug for Bus252 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus252")
            .field("calendar", &self.calendar.name())
            .finish()
    }
}
