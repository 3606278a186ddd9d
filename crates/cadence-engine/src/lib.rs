//! # Cadence Engine
//!
//! The contract lifecycle evaluation engine.
//!
//! Given a typed contract attribute record, a risk-factor oracle, and a set
//! of analysis times, the engine computes the instrument's full list of
//! contingent events: each with an event time, a calculation time, an event
//! kind, a signed payoff, and the post-event contract state.
//!
//! This crate provides:
//!
//! - **Schedules**: cycle expansion with stub merging and end-of-month rules
//! - **Annuity**: the level-payment recurrence over day-count fractions
//! - **Attributes**: the typed, validated contract attribute record
//! - **Lifecycle**: timeline construction and the ordered state fold
//!
//! ## Example
//!
//! ```rust,ignore
//! use cadence_engine::prelude::*;
//! use cadence_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let attributes = ContractAttributes::builder()
//!     .contract_id("PAM-2016-001")
//!     .contract_type(ContractType::PrincipalAtMaturity)
//!     .initial_exchange_date(Date::from_ymd(2016, 1, 2).unwrap())
//!     .maturity_date(Date::from_ymd(2017, 1, 1).unwrap())
//!     .notional(dec!(1000))
//!     .nominal_rate(dec!(0.01))
//!     .build()
//!     .unwrap();
//!
//! let events = ContractEngine::evaluate(&[], &attributes, &ConstantOracle::default()).unwrap();
//! ```
//!
//! ## Scenario re-use
//!
//! Timeline construction is risk-factor independent: [`ContractEngine::initialize`]
//! builds the ordered event timeline once, and [`ContractEngine::evaluate_timeline`]
//! folds it under a particular oracle. Re-evaluating the same timeline under
//! a different oracle reproduces identical event times and kinds; only
//! payoffs and states may differ.

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
#![allow(clippy::too_many_lines)]
#![allow(clippy::struct_excessive_bools)]

pub mod annuity;
pub mod attributes;
pub mod error;
pub mod event;
pub mod functions;
pub mod lifecycle;
pub mod oracle;
pub mod schedule;
pub mod state;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::annuity::annuity_payment;
    pub use crate::attributes::{
        ContractAttributes, ContractAttributesBuilder, ContractRole, ContractType, FeeBasis,
        ScalingEffect,
    };
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::event::ContractEvent;
    pub use crate::lifecycle::{ContractEngine, PendingEvent, Timeline};
    pub use crate::oracle::{ConstantOracle, RiskFactorOracle};
    pub use crate::schedule::{EndOfMonthAdjuster, EndOfMonthConvention};
    pub use crate::state::StateRecord;
}

// Re-export commonly used types at crate root
pub use attributes::{ContractAttributes, ContractType};
pub use error::{EngineError, EngineResult};
pub use event::ContractEvent;
pub use lifecycle::{ContractEngine, Timeline};
