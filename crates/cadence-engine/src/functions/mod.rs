//! Payoff and state-transition functions.
//!
//! Every event kind resolves, per contract type, to a pair of functions:
//! the payoff function computes the cash amount from the *pre-transition*
//! state, and the state-transition function derives the next state. The
//! lifecycle fold stays kind-agnostic; all contract-specific behavior
//! lives in this catalog, keyed by `(contract type, event kind)`.

pub(crate) mod ann;
pub(crate) mod lam;
pub(crate) mod pam;

use rust_decimal::Decimal;

use cadence_core::calendars::BusinessDayAdjuster;
use cadence_core::daycounts::DayCount;
use cadence_core::types::{Date, EventType};

use crate::attributes::{ContractAttributes, ContractType, FeeBasis};
use crate::error::{EngineError, EngineResult};
use crate::oracle::RiskFactorOracle;
use crate::state::StateRecord;

/// Read-only evaluation context shared by all payoff and transition
/// functions of one evaluation pass.
pub struct EvalContext<'a> {
    /// The contract attribute record.
    pub attributes: &'a ContractAttributes,
    /// The external risk factor oracle.
    pub oracle: &'a dyn RiskFactorOracle,
    /// The bound day count calculator.
    pub day_count: &'a dyn DayCount,
    /// The bound business day adjuster.
    pub adjuster: &'a BusinessDayAdjuster,
    /// Calculation times of all principal redemption events plus maturity,
    /// sorted ascending. Consumed by the annuity recurrence.
    pub redemption_dates: &'a [Date],
}

/// A payoff function: cash amount of an event against the pre-transition
/// state.
pub type PayoffFn = fn(&EvalContext<'_>, &StateRecord, Date) -> EngineResult<Decimal>;

/// A state-transition function: derives the post-event state in place.
pub type TransitionFn = fn(&EvalContext<'_>, &mut StateRecord, Date) -> EngineResult<()>;

/// Interest accrued from the state's status date to `t` at the current
/// nominal rate, role-signed through the nominal value.
pub(crate) fn interest_accrual(ctx: &EvalContext<'_>, state: &StateRecord, t: Date) -> Decimal {
    ctx.day_count.year_fraction(state.status_date, t) * state.nominal_rate * state.nominal_value
}

/// Fee accrued from the state's status date to `t`. Zero unless the
/// contract carries a nominal-relative fee rate.
pub(crate) fn fee_accrual(ctx: &EvalContext<'_>, state: &StateRecord, t: Date) -> Decimal {
    match (ctx.attributes.fee_basis, ctx.attributes.fee_rate) {
        (FeeBasis::PercentOfNominal, Some(rate)) => {
            ctx.day_count.year_fraction(state.status_date, t) * rate * state.nominal_value
        }
        _ => Decimal::ZERO,
    }
}

/// Rolls interest and fee accruals forward to `t`.
pub(crate) fn accrue(ctx: &EvalContext<'_>, state: &mut StateRecord, t: Date) {
    state.accrued_interest += interest_accrual(ctx, state, t);
    state.fee_accrued += fee_accrual(ctx, state, t);
}

/// Resolves the payoff/transition pair for an event kind under a contract
/// type.
///
/// # Errors
///
/// Returns a configuration error when the contract type defines no
/// behavior for the event kind (e.g. principal redemption on a bullet
/// contract).
pub fn resolve(
    contract_type: ContractType,
    event_type: EventType,
) -> EngineResult<(PayoffFn, TransitionFn)> {
    use ContractType::{Annuity, LinearAmortizer, PrincipalAtMaturity};

    let pair: (PayoffFn, TransitionFn) = match (contract_type, event_type) {
        (_, EventType::AnalysisPoint) => (pam::pof_ad, pam::stf_ad),

        (PrincipalAtMaturity, EventType::InitialExchange) => (pam::pof_ied, pam::stf_ied),
        (LinearAmortizer, EventType::InitialExchange) => (pam::pof_ied, lam::stf_ied),
        (Annuity, EventType::InitialExchange) => (pam::pof_ied, ann::stf_ied),

        (_, EventType::FeePayment) => (pam::pof_fp, pam::stf_fp),
        (_, EventType::InterestPayment) => (pam::pof_ip, pam::stf_ip),
        (_, EventType::InterestCapitalization) => (pam::pof_ipci, pam::stf_ipci),

        (PrincipalAtMaturity, EventType::PrincipalRedemption) => {
            return Err(EngineError::config(
                "principal redemption is not defined for PAM contracts",
            ))
        }
        (LinearAmortizer, EventType::PrincipalRedemption) => (lam::pof_pr, lam::stf_pr),
        (Annuity, EventType::PrincipalRedemption) => (ann::pof_pr, ann::stf_pr),

        (Annuity, EventType::RateResetVariable) => (pam::pof_rr, ann::stf_rr),
        (_, EventType::RateResetVariable) => (pam::pof_rr, pam::stf_rr),
        (_, EventType::RateResetFixed) => (pam::pof_rr, pam::stf_rrf),

        (_, EventType::Scaling) => (pam::pof_sc, pam::stf_sc),
        (_, EventType::Purchase) => (pam::pof_prd, pam::stf_prd),
        (_, EventType::Termination) => (pam::pof_td, pam::stf_td),
        (_, EventType::Maturity) => (pam::pof_md, pam::stf_md),
    };
    Ok(pair)
}
