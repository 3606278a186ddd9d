//! Payoff and state-transition overrides for linear amortizer contracts.
//!
//! A linear amortizer redeems a constant amount at every principal
//! redemption event; interest accrues on the declining balance through
//! the shared PAM functions.

use rust_decimal::Decimal;

use cadence_core::types::Date;

use super::{accrue, pam, EvalContext};
use crate::error::EngineResult;
use crate::state::StateRecord;

/// The redemption actually paid: the scheduled amount, capped so the
/// cumulative redemption never exceeds the outstanding principal.
pub(crate) fn capped_redemption(state: &StateRecord) -> Decimal {
    state.next_redemption.min(state.nominal_value.abs())
}

/// PAM initial exchange, plus the constant redemption amount: taken from
/// the attributes when given, otherwise the notional spread evenly over
/// the redemption schedule.
pub(crate) fn stf_ied(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    pam::stf_ied(ctx, state, t)?;

    state.next_redemption = match ctx.attributes.next_redemption_amount {
        Some(amount) => amount,
        None => {
            let count = ctx.redemption_dates.iter().filter(|d| **d > t).count();
            if count == 0 {
                ctx.attributes.notional
            } else {
                ctx.attributes.notional / Decimal::from(count as u64)
            }
        }
    };
    Ok(())
}

/// Pays the capped redemption amount, scaled by the notional multiplier.
pub(crate) fn pof_pr(
    ctx: &EvalContext<'_>,
    state: &StateRecord,
    _t: Date,
) -> EngineResult<Decimal> {
    Ok(state.notional_scaling * ctx.attributes.contract_role.sign() * capped_redemption(state))
}

/// Reduces the outstanding nominal by the capped redemption amount.
pub(crate) fn stf_pr(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    accrue(ctx, state, t);

    let amount = capped_redemption(state);
    state.nominal_value -= ctx.attributes.contract_role.sign() * amount;
    state.status_date = t;
    Ok(())
}
