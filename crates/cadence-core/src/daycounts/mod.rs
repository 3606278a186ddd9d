//! Day count conventions for interest accrual.
//!
//! Day count conventions determine how a pair of dates maps to a fraction
//! of a year, which in turn scales interest and fee accrual.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - money market convention
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`ActActIsda`]: Actual/Actual ISDA - split at year boundaries, each
//!   segment normalized by its own leap-year basis
//! - [`Thirty360E`]: 30E/360 - Eurobond convention
//! - [`Thirty360EIsda`]: 30E/360 ISDA - takes the contract maturity as
//!   context for its February end-of-month rule
//! - [`Bus252`]: Business/252 - counts business days against a calendar
//!
//! # Usage
//!
//! ```rust
//! use cadence_core::daycounts::{Act360, DayCount};
//! use cadence_core::types::Date;
//!
//! let dc = Act360;
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let days = dc.day_count(start, end);
//! let year_fraction = dc.year_fraction(start, end);
//! ```
//!
//! All conventions satisfy `year_fraction(t, t) == 0`, and the raw
//! `day_count` changes sign under swapped arguments.

mod act360;
mod act365;
mod actact;
mod bus252;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use bus252::Bus252;
pub use thirty360::{Thirty360E, Thirty360EIsda};

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendars::{Calendar, NoHolidayCalendar};
use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to a specific market convention.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the day count between two dates.
    ///
    /// The raw count before normalization: actual calendar days for ACT
    /// conventions, the 30-day-month count for 30/360 conventions, business
    /// days for Business/252. Negative when `end` is before `start`.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Calculates the year fraction between two dates.
    ///
    /// Zero when `start == end`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;
}

/// Enumeration of all supported day count conventions.
///
/// Resolved once from a contract attribute at construction time, then
/// turned into a trait object with [`to_day_count`](Self::to_day_count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// Actual/360
    Act360,

    /// Actual/365 Fixed
    Act365Fixed,

    /// Actual/Actual ISDA - year-boundary split
    #[default]
    ActActIsda,

    /// 30E/360 (Eurobond basis)
    Thirty360E,

    /// 30E/360 ISDA - requires the contract maturity for its February rule
    Thirty360EIsda,

    /// Business/252 - requires a business day calendar
    Bus252,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    ///
    /// `maturity` is consumed by 30E/360 ISDA; `calendar` by Business/252
    /// (defaulting to the no-holiday calendar when absent). Other
    /// conventions ignore both.
    #[must_use]
    pub fn to_day_count(
        &self,
        maturity: Option<Date>,
        calendar: Option<Arc<dyn Calendar>>,
    ) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::ActActIsda => Box::new(ActActIsda),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
            DayCountConvention::Thirty360EIsda => Box::new(Thirty360EIsda::new(maturity)),
            DayCountConvention::Bus252 => Box::new(Bus252::new(
                calendar.unwrap_or_else(|| Arc::new(NoHolidayCalendar)),
            )),
        }
    }

    /// Returns the conventional name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::Thirty360E => "30E/360",
            DayCountConvention::Thirty360EIsda => "30E/360 ISDA",
            DayCountConvention::Bus252 => "BUS/252",
        }
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::ActActIsda,
            DayCountConvention::Thirty360E,
            DayCountConvention::Thirty360EIsda,
            DayCountConvention::Bus252,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses a day count convention from a string.
    ///
    /// Accepts both the contract attribute codes (`AA`, `A360`, `A365`,
    /// `30E360`, `30E360ISDA`, `B252`) and the conventional names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();
        let normalized = normalized.trim();

        match normalized {
            "A360" | "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),

            "A365" | "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365" => {
                Ok(DayCountConvention::Act365Fixed)
            }

            "AA" | "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTACTISDA" => {
                Ok(DayCountConvention::ActActIsda)
            }

            "30E360" | "30E/360" | "EUROBOND" | "THIRTY360E" => Ok(DayCountConvention::Thirty360E),

            "30E360ISDA" | "30E/360 ISDA" | "30E/360ISDA" | "THIRTY360EISDA" => {
                Ok(DayCountConvention::Thirty360EIsda)
            }

            "B252" | "BUS/252" | "BU252" | "BUS252" => Ok(DayCountConvention::Bus252),

            _ => Err(CoreError::unknown_convention("day count", s)),
        }
    }
}
