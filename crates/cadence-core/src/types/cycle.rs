//! Schedule recurrence cycles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Time unit of a schedule cycle.
///
/// Quarter, half-year, and year are month-based: they normalize to month
/// multiples (3, 6, 12) before schedule generation, so end-of-month rules
/// apply to them exactly as to plain monthly cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleUnit {
    /// Calendar days
    Day,
    /// Calendar weeks (7 days)
    Week,
    /// Calendar months
    Month,
    /// Quarters (3 months)
    Quarter,
    /// Half-years (6 months)
    HalfYear,
    /// Years (12 months)
    Year,
}

impl CycleUnit {
    /// Returns the number of months per unit, or `None` for day/week units.
    #[must_use]
    pub fn months(&self) -> Option<u32> {
        match self {
            CycleUnit::Day | CycleUnit::Week => None,
            CycleUnit::Month => Some(1),
            CycleUnit::Quarter => Some(3),
            CycleUnit::HalfYear => Some(6),
            CycleUnit::Year => Some(12),
        }
    }

    /// Returns true if the unit normalizes to months.
    #[must_use]
    pub fn is_month_based(&self) -> bool {
        self.months().is_some()
    }

    /// Returns the single-letter code of the unit.
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            CycleUnit::Day => 'D',
            CycleUnit::Week => 'W',
            CycleUnit::Month => 'M',
            CycleUnit::Quarter => 'Q',
            CycleUnit::HalfYear => 'H',
            CycleUnit::Year => 'Y',
        }
    }
}

/// Treatment of the trailing partial period of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StubConvention {
    /// Keep the partial period as a separate short final period.
    #[default]
    Short,
    /// Merge the partial period into the preceding full cycle.
    Long,
}

/// A schedule recurrence rule: multiplier, unit, and stub treatment.
///
/// Parsed once from the grammar `<positive integer><D|W|M|Q|H|Y><+|->`,
/// where `+` marks a short stub and `-` a long stub.
///
/// # Example
///
/// ```rust
/// use cadence_core::types::{Cycle, CycleUnit, StubConvention};
///
/// let cycle: Cycle = "2Q-".parse().unwrap();
/// assert_eq!(cycle.multiplier(), 2);
/// assert_eq!(cycle.unit(), CycleUnit::Quarter);
/// assert_eq!(cycle.stub(), StubConvention::Long);
/// assert_eq!(cycle.normalized_months(), Some(6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cycle {
    multiplier: u32,
    unit: CycleUnit,
    stub: StubConvention,
}

impl Cycle {
    /// Creates a cycle from parts.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCycle` if the multiplier is zero.
    pub fn new(multiplier: u32, unit: CycleUnit, stub: StubConvention) -> CoreResult<Self> {
        if multiplier == 0 {
            return Err(CoreError::invalid_cycle(
                format!("0{}", unit.code()),
                "multiplier must be positive",
            ));
        }
        Ok(Self {
            multiplier,
            unit,
            stub,
        })
    }

    /// Returns the cycle multiplier.
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Returns the cycle unit.
    #[must_use]
    pub fn unit(&self) -> CycleUnit {
        self.unit
    }

    /// Returns the stub convention.
    #[must_use]
    pub fn stub(&self) -> StubConvention {
        self.stub
    }

    /// Returns the cycle length in months, or `None` for day/week cycles.
    #[must_use]
    pub fn normalized_months(&self) -> Option<u32> {
        self.unit.months().map(|m| m * self.multiplier)
    }

    /// Returns true if the cycle normalizes to months.
    #[must_use]
    pub fn is_month_based(&self) -> bool {
        self.unit.is_month_based()
    }

    /// Advances a date by `steps` whole cycles.
    ///
    /// Stepping is linear from the given date: `date + steps * cycle`.
    /// Month-based cycles clip to the last valid day of the target month;
    /// end-of-month snapping is the schedule generator's concern, not this
    /// function's.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn advance(&self, date: Date, steps: u32) -> CoreResult<Date> {
        let n = i64::from(self.multiplier) * i64::from(steps);
        match self.unit {
            CycleUnit::Day => Ok(date.add_days(n)),
            CycleUnit::Week => Ok(date.add_days(7 * n)),
            _ => {
                let months = self
                    .normalized_months()
                    .expect("month-based unit has month count");
                date.add_months((months * steps) as i32)
            }
        }
    }
}

impl FromStr for Cycle {
    type Err = CoreError;

    /// Parses a cycle from the `<n><unit><stub>` grammar, e.g. `"1M+"`, `"2Q-"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();

        let stub = match chars.next_back() {
            Some('+') => StubConvention::Short,
            Some('-') => StubConvention::Long,
            _ => {
                return Err(CoreError::invalid_cycle(
                    trimmed,
                    "expected trailing stub marker '+' or '-'",
                ))
            }
        };

        let unit = match chars.next_back() {
            Some('D') => CycleUnit::Day,
            Some('W') => CycleUnit::Week,
            Some('M') => CycleUnit::Month,
            Some('Q') => CycleUnit::Quarter,
            Some('H') => CycleUnit::HalfYear,
            Some('Y') => CycleUnit::Year,
            _ => {
                return Err(CoreError::invalid_cycle(
                    trimmed,
                    "expected unit D, W, M, Q, H, or Y",
                ))
            }
        };

        let digits = chars.as_str();
        let multiplier: u32 = digits
            .parse()
            .map_err(|_| CoreError::invalid_cycle(trimmed, "expected positive integer multiplier"))?;

        Cycle::new(multiplier, unit, stub)
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stub = match self.stub {
            StubConvention::Short => '+',
            StubConvention::Long => '-',
        };
        write!(f, "{}{}{}", self.multiplier, self.unit.code(), stub)
    }
}
