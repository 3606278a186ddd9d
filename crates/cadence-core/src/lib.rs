//! # Cadence Core
//!
//! Core types, conventions, and date algebra for the Cadence contract
//! lifecycle engine.
//!
//! This crate provides the foundational building blocks used by the engine:
//!
//! - **Types**: Domain-specific types like `Date`, `Cycle`, `EventType`
//! - **Day Count Conventions**: Year-fraction calculations for interest accrual
//! - **Business Day Calendars**: Business-day predicates and date rolling
//! - **Date Adjusters**: Business-day shifting with separate event/calculation times
//!
//! ## Design Philosophy
//!
//! - **Closed enumerations**: Every convention code is parsed exactly once
//!   into an enum; nothing is re-parsed per call
//! - **Type Safety**: Newtypes prevent mixing incompatible values
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use cadence_core::prelude::*;
//!
//! let cycle: Cycle = "3M+".parse().unwrap();
//! assert_eq!(cycle.normalized_months(), Some(3));
//!
//! let dc = DayCountConvention::Act360.to_day_count(None, None);
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! assert_eq!(dc.day_count(start, end), 182);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::if_not_else)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayAdjuster, BusinessDayConvention, Calendar, CalendarConvention,
        NoHolidayCalendar, ShiftConvention, WeekendCalendar,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Cycle, CycleUnit, Date, EventType, StubConvention};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Cycle, Date, EventType};
