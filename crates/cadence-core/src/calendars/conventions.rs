//! Business day adjustment conventions.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Business day adjustment rules.
///
/// A rule specifies where a date lands when it falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    #[default]
    None,

    /// Move to the following business day.
    Following,

    /// Move to the following business day, unless that crosses a month
    /// boundary, in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless that crosses a month
    /// boundary, in which case move to the following business day.
    ModifiedPreceding,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::None => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

/// Whether payoff and state calculations observe the shifted or the
/// original date.
///
/// Business-day shifting always moves the *event* time. Whether the
/// *calculation* time (the timestamp fed to day counts and state
/// transitions) moves with it is a separate convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShiftConvention {
    /// Shift first, then calculate: calculations use the adjusted date.
    #[default]
    ShiftThenCalculate,
    /// Calculate first, then shift: calculations use the unadjusted date.
    CalculateThenShift,
}

/// Adjusts a date according to the given rule against a calendar.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::None => date,

        BusinessDayConvention::Following => calendar.next_business_day(date),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = calendar.next_business_day(date);
            if adjusted.month() != date.month() {
                // Crossed the month boundary, re-walk backward instead
                calendar.previous_business_day(date)
            } else {
                adjusted
            }
        }

        BusinessDayConvention::Preceding => calendar.previous_business_day(date),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = calendar.previous_business_day(date);
            if adjusted.month() != date.month() {
                // Crossed the month boundary, re-walk forward instead
                calendar.next_business_day(date)
            } else {
                adjusted
            }
        }
    }
}

/// A bound business-day adjuster: rule, shift/calculation order, calendar.
///
/// Parsed once from a contract attribute code and used for every schedule
/// date of the contract. The two entry points answer different questions:
/// [`shift_event_time`](Self::shift_event_time) says *when the cash moves*,
/// [`shift_calc_time`](Self::shift_calc_time) says *which date the accrual
/// mathematics sees*.
///
/// # Convention codes
///
/// | Code | Order | Rule |
/// |------|-------|------|
/// | `NOS` | - | no shift |
/// | `SCF` / `SCMF` / `SCP` / `SCMP` | shift, then calculate | F / MF / P / MP |
/// | `CSF` / `CSMF` / `CSP` / `CSMP` | calculate, then shift | F / MF / P / MP |
#[derive(Clone)]
pub struct BusinessDayAdjuster {
    convention: BusinessDayConvention,
    shift: ShiftConvention,
    calendar: Arc<dyn Calendar>,
}

impl BusinessDayAdjuster {
    /// Creates an adjuster from typed parts.
    #[must_use]
    pub fn new(
        convention: BusinessDayConvention,
        shift: ShiftConvention,
        calendar: Arc<dyn Calendar>,
    ) -> Self {
        Self {
            convention,
            shift,
            calendar,
        }
    }

    /// Creates a no-op adjuster (no shift, regardless of calendar).
    #[must_use]
    pub fn unadjusted() -> Self {
        Self::new(
            BusinessDayConvention::None,
            ShiftConvention::ShiftThenCalculate,
            Arc::new(super::NoHolidayCalendar),
        )
    }

    /// Parses a convention code into an adjuster bound to the given calendar.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownConvention` for unrecognized codes.
    pub fn from_code(code: &str, calendar: Arc<dyn Calendar>) -> CoreResult<Self> {
        let (shift, convention) = match code.trim().to_uppercase().as_str() {
            "NOS" | "NULL" | "" => (
                ShiftConvention::ShiftThenCalculate,
                BusinessDayConvention::None,
            ),
            "SCF" => (
                ShiftConvention::ShiftThenCalculate,
                BusinessDayConvention::Following,
            ),
            "SCMF" => (
                ShiftConvention::ShiftThenCalculate,
                BusinessDayConvention::ModifiedFollowing,
            ),
            "SCP" => (
                ShiftConvention::ShiftThenCalculate,
                BusinessDayConvention::Preceding,
            ),
            "SCMP" => (
                ShiftConvention::ShiftThenCalculate,
                BusinessDayConvention::ModifiedPreceding,
            ),
            "CSF" => (
                ShiftConvention::CalculateThenShift,
                BusinessDayConvention::Following,
            ),
            "CSMF" => (
                ShiftConvention::CalculateThenShift,
                BusinessDayConvention::ModifiedFollowing,
            ),
            "CSP" => (
                ShiftConvention::CalculateThenShift,
                BusinessDayConvention::Preceding,
            ),
            "CSMP" => (
                ShiftConvention::CalculateThenShift,
                BusinessDayConvention::ModifiedPreceding,
            ),
            _ => return Err(CoreError::unknown_convention("business day", code)),
        };

        Ok(Self::new(convention, shift, calendar))
    }

    /// Returns the business day rule.
    #[must_use]
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// Returns the shift/calculation order.
    #[must_use]
    pub fn shift_convention(&self) -> ShiftConvention {
        self.shift
    }

    /// Returns the calendar the adjuster is bound to.
    #[must_use]
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// Shifts an event time: the business day rule always applies.
    #[must_use]
    pub fn shift_event_time(&self, date: Date) -> Date {
        adjust(date, self.convention, self.calendar.as_ref())
    }

    /// Shifts a calculation time.
    ///
    /// Applies the rule only under [`ShiftConvention::ShiftThenCalculate`];
    /// otherwise the original date is returned and downstream day-count and
    /// state calculations see the unadjusted date.
    #[must_use]
    pub fn shift_calc_time(&self, date: Date) -> Date {
        match self.shift {
            ShiftConvention::ShiftThenCalculate => self.shift_event_time(date),
            ShiftConvention::CalculateThenShift => date,
        }
    }
}

impl fmt::Debug for BusinessDayAdjuster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusinessDayAdjuster")
            .field("convention", &self.convention)
            .field("shift", &self.shift)
            .field("calendar", &self.calendar.name())
            .finish()
    }
}
