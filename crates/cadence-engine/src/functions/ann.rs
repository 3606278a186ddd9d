//! Payoff and state-transition overrides for annuity contracts.
//!
//! An annuity pays a level total amount per redemption date: the interest
//! portion goes through the regular interest events, and the principal
//! redemption event pays the remainder of the level payment. The level
//! payment itself is re-derived by the annuity recurrence whenever the
//! rate resets.

use rust_decimal::Decimal;

use cadence_core::types::Date;

use super::{accrue, interest_accrual, pam, EvalContext};
use crate::annuity::annuity_payment;
use crate::error::EngineResult;
use crate::state::StateRecord;

/// Recomputes the level payment over the redemption dates strictly after
/// `t`.
fn derive_payment(ctx: &EvalContext<'_>, state: &StateRecord, t: Date) -> Decimal {
    let remaining: Vec<Date> = ctx
        .redemption_dates
        .iter()
        .copied()
        .filter(|d| *d > t)
        .collect();

    annuity_payment(
        state.nominal_value.abs(),
        state.accrued_interest.abs(),
        state.nominal_rate,
        &remaining,
        ctx.day_count,
    )
}

/// The principal portion of the level payment: payment minus interest
/// accrued to `t`, clamped between zero and the outstanding balance.
fn principal_portion(state: &StateRecord, interest: Decimal) -> Decimal {
    (state.next_redemption - interest.abs())
        .max(Decimal::ZERO)
        .min(state.nominal_value.abs())
}

/// PAM initial exchange, plus the level payment: taken from the
/// attributes when given, otherwise derived by the annuity recurrence.
pub(crate) fn stf_ied(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    pam::stf_ied(ctx, state, t)?;

    state.next_redemption = match ctx.attributes.next_redemption_amount {
        Some(amount) => amount,
        None => derive_payment(ctx, state, t),
    };
    Ok(())
}

/// Pays the principal portion of the level payment.
pub(crate) fn pof_pr(
    ctx: &EvalContext<'_>,
    state: &StateRecord,
    t: Date,
) -> EngineResult<Decimal> {
    let interest = state.accrued_interest + interest_accrual(ctx, state, t);
    Ok(state.notional_scaling * ctx.attributes.contract_role.sign()
        * principal_portion(state, interest))
}

/// Reduces the outstanding nominal by the principal portion; the interest
/// portion stays accrued for the interest payment event.
pub(crate) fn stf_pr(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    accrue(ctx, state, t);

    let principal = principal_portion(state, state.accrued_interest);
    state.nominal_value -= ctx.attributes.contract_role.sign() * principal;
    state.status_date = t;
    Ok(())
}

/// PAM rate reset, then re-derivation of the level payment under the new
/// rate over the remaining redemption dates.
pub(crate) fn stf_rr(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    pam::stf_rr(ctx, state, t)?;
    state.next_redemption = derive_payment(ctx, state, t);
    Ok(())
}
