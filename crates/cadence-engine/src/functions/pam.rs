//! Payoff and state-transition functions for principal-at-maturity
//! contracts.
//!
//! These are also the shared defaults: amortizing contract types reuse
//! every function here whose behavior they do not override.

use rust_decimal::Decimal;

use cadence_core::types::Date;

use super::{accrue, fee_accrual, interest_accrual, EvalContext};
use crate::attributes::FeeBasis;
use crate::error::{EngineError, EngineResult};
use crate::state::StateRecord;

// ---------------------------------------------------------------------------
// Analysis point
// ---------------------------------------------------------------------------

/// Analysis points move no cash.
pub(crate) fn pof_ad(
    _ctx: &EvalContext<'_>,
    _state: &StateRecord,
    _t: Date,
) -> EngineResult<Decimal> {
    Ok(Decimal::ZERO)
}

/// Rolls accruals forward so the snapshot is current as of `t`.
pub(crate) fn stf_ad(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    accrue(ctx, state, t);
    state.status_date = t;
    Ok(())
}

// ---------------------------------------------------------------------------
// Initial exchange
// ---------------------------------------------------------------------------

/// The notional (plus any premium/discount) flows out from the asset
/// holder's perspective.
pub(crate) fn pof_ied(
    ctx: &EvalContext<'_>,
    _state: &StateRecord,
    _t: Date,
) -> EngineResult<Decimal> {
    let attrs = ctx.attributes;
    Ok(attrs.contract_role.sign() * -(attrs.notional + attrs.premium_discount))
}

/// Sets the role-signed nominal value, rate, and opening accruals.
pub(crate) fn stf_ied(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    let attrs = ctx.attributes;
    let sign = attrs.contract_role.sign();

    state.nominal_value = sign * attrs.notional;
    state.nominal_rate = attrs.nominal_rate;
    state.accrued_interest = sign * attrs.accrued_interest.unwrap_or(Decimal::ZERO);
    state.fee_accrued = sign * attrs.fee_accrued.unwrap_or(Decimal::ZERO);
    state.status_date = t;
    Ok(())
}

// ---------------------------------------------------------------------------
// Interest
// ---------------------------------------------------------------------------

/// Pays everything accrued plus the current period's interest, scaled by
/// the interest scaling multiplier.
pub(crate) fn pof_ip(
    ctx: &EvalContext<'_>,
    state: &StateRecord,
    t: Date,
) -> EngineResult<Decimal> {
    Ok(state.interest_scaling * (state.accrued_interest + interest_accrual(ctx, state, t)))
}

/// Zeroes the interest accrual; fee accrual advances normally.
pub(crate) fn stf_ip(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    state.fee_accrued += fee_accrual(ctx, state, t);
    state.accrued_interest = Decimal::ZERO;
    state.status_date = t;
    Ok(())
}

/// Capitalization moves no cash.
pub(crate) fn pof_ipci(
    _ctx: &EvalContext<'_>,
    _state: &StateRecord,
    _t: Date,
) -> EngineResult<Decimal> {
    Ok(Decimal::ZERO)
}

/// Adds the accrued interest to the nominal value instead of paying it.
pub(crate) fn stf_ipci(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    let capitalized = state.accrued_interest + interest_accrual(ctx, state, t);
    state.fee_accrued += fee_accrual(ctx, state, t);
    state.nominal_value += capitalized;
    state.accrued_interest = Decimal::ZERO;
    state.status_date = t;
    Ok(())
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Absolute-basis fees pay the flat fee rate; nominal-relative fees pay
/// the accrual.
pub(crate) fn pof_fp(
    ctx: &EvalContext<'_>,
    state: &StateRecord,
    t: Date,
) -> EngineResult<Decimal> {
    let attrs = ctx.attributes;
    let rate = attrs
        .fee_rate
        .ok_or_else(|| EngineError::missing_attribute("fee rate"))?;

    match attrs.fee_basis {
        FeeBasis::Absolute => Ok(attrs.contract_role.sign() * rate),
        FeeBasis::PercentOfNominal => Ok(state.fee_accrued + fee_accrual(ctx, state, t)),
    }
}

/// Zeroes the fee accrual; interest accrual advances normally.
pub(crate) fn stf_fp(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    state.accrued_interest += interest_accrual(ctx, state, t);
    state.fee_accrued = Decimal::ZERO;
    state.status_date = t;
    Ok(())
}

// ---------------------------------------------------------------------------
// Rate resets
// ---------------------------------------------------------------------------

/// Rate resets move no cash.
pub(crate) fn pof_rr(
    _ctx: &EvalContext<'_>,
    _state: &StateRecord,
    _t: Date,
) -> EngineResult<Decimal> {
    Ok(Decimal::ZERO)
}

/// Applies the period and life caps/floors to a proposed rate change and
/// returns the new rate.
pub(crate) fn clamped_rate(
    ctx: &EvalContext<'_>,
    current: Decimal,
    observed: Decimal,
) -> Decimal {
    let attrs = ctx.attributes;
    let mut delta = observed * attrs.rate_multiplier + attrs.rate_spread - current;

    if let Some(cap) = attrs.period_cap {
        delta = delta.min(cap);
    }
    if let Some(floor) = attrs.period_floor {
        delta = delta.max(-floor);
    }

    let mut rate = current + delta;
    if let Some(cap) = attrs.life_cap {
        rate = rate.min(cap);
    }
    if let Some(floor) = attrs.life_floor {
        rate = rate.max(floor);
    }
    rate
}

/// Re-fixes the nominal rate from the market observation, subject to
/// period and life caps/floors. Accrual up to `t` uses the old rate.
pub(crate) fn stf_rr(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    accrue(ctx, state, t);

    let id = ctx
        .attributes
        .rate_reset_market_object
        .as_deref()
        .ok_or_else(|| EngineError::missing_attribute("market object code of rate reset"))?;
    let observed = ctx.oracle.state_at(id, t, state, ctx.attributes)?;

    state.nominal_rate = clamped_rate(ctx, state.nominal_rate, observed);
    state.status_date = t;
    Ok(())
}

/// First reset with a rate fixed in advance: no market observation.
pub(crate) fn stf_rrf(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    accrue(ctx, state, t);

    state.nominal_rate = ctx
        .attributes
        .next_reset_rate
        .ok_or_else(|| EngineError::missing_attribute("next reset rate"))?;
    state.status_date = t;
    Ok(())
}

// ---------------------------------------------------------------------------
// Scaling
// ---------------------------------------------------------------------------

/// Scaling moves no cash.
pub(crate) fn pof_sc(
    _ctx: &EvalContext<'_>,
    _state: &StateRecord,
    _t: Date,
) -> EngineResult<Decimal> {
    Ok(Decimal::ZERO)
}

/// Re-derives the scaling multipliers from the index observation against
/// the base index value fixed at contract start.
pub(crate) fn stf_sc(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    accrue(ctx, state, t);

    let attrs = ctx.attributes;
    let id = attrs
        .scaling_market_object
        .as_deref()
        .ok_or_else(|| EngineError::missing_attribute("market object code of scaling index"))?;
    let base = attrs
        .scaling_index_base
        .ok_or_else(|| EngineError::missing_attribute("scaling index at contract start"))?;
    if base == Decimal::ZERO {
        return Err(EngineError::config("scaling index base must be non-zero"));
    }

    let observed = ctx.oracle.state_at(id, t, state, ctx.attributes)?;
    let ratio = observed / base;

    if attrs.scaling_effect.notional {
        state.notional_scaling = ratio;
    }
    if attrs.scaling_effect.interest {
        state.interest_scaling = ratio;
    }
    state.status_date = t;
    Ok(())
}

// ---------------------------------------------------------------------------
// Purchase and termination
// ---------------------------------------------------------------------------

/// The buyer pays the purchase price plus interest accrued to date.
pub(crate) fn pof_prd(
    ctx: &EvalContext<'_>,
    state: &StateRecord,
    t: Date,
) -> EngineResult<Decimal> {
    let attrs = ctx.attributes;
    let price = attrs.purchase_price.unwrap_or(Decimal::ZERO);
    Ok(-(attrs.contract_role.sign() * price
        + state.accrued_interest
        + interest_accrual(ctx, state, t)))
}

/// Purchase changes hands, not state: accruals just roll forward.
pub(crate) fn stf_prd(
    ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    accrue(ctx, state, t);
    state.status_date = t;
    Ok(())
}

/// The seller receives the termination price plus interest accrued to
/// date.
pub(crate) fn pof_td(
    ctx: &EvalContext<'_>,
    state: &StateRecord,
    t: Date,
) -> EngineResult<Decimal> {
    let attrs = ctx.attributes;
    let price = attrs.termination_price.unwrap_or(Decimal::ZERO);
    Ok(attrs.contract_role.sign() * price
        + state.accrued_interest
        + interest_accrual(ctx, state, t))
}

/// Termination closes every position.
pub(crate) fn stf_td(
    _ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    state.nominal_value = Decimal::ZERO;
    state.accrued_interest = Decimal::ZERO;
    state.fee_accrued = Decimal::ZERO;
    state.status_date = t;
    Ok(())
}

// ---------------------------------------------------------------------------
// Maturity
// ---------------------------------------------------------------------------

/// Repays the scaled outstanding nominal plus all accruals.
pub(crate) fn pof_md(
    ctx: &EvalContext<'_>,
    state: &StateRecord,
    t: Date,
) -> EngineResult<Decimal> {
    Ok(state.notional_scaling * state.nominal_value
        + state.interest_scaling * (state.accrued_interest + interest_accrual(ctx, state, t))
        + state.fee_accrued)
}

/// Maturity closes every position.
pub(crate) fn stf_md(
    _ctx: &EvalContext<'_>,
    state: &mut StateRecord,
    t: Date,
) -> EngineResult<()> {
    state.nominal_value = Decimal::ZERO;
    state.accrued_interest = Decimal::ZERO;
    state.fee_accrued = Decimal::ZERO;
    state.status_date = t;
    Ok(())
}
