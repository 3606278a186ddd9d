//! The contract state record threaded through the evaluation fold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cadence_core::types::Date;

use crate::attributes::ContractAttributes;

/// The evolving internal state of a contract under evaluation.
///
/// A single-owner accumulator: exactly one evaluation pass mutates it, and
/// each produced event embeds a clone as its post-event snapshot. Nominal
/// quantities are role-signed: an asset holds a positive nominal value, a
/// liability a negative one, so payoff formulas never re-apply the role.
///
/// Invariants maintained by the transition functions:
/// - after each event, `status_date` equals that event's calculation time
/// - `nominal_value` changes only through principal-affecting events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// The date up to which all state components are current.
    pub status_date: Date,
    /// Outstanding role-signed nominal value.
    pub nominal_value: Decimal,
    /// Nominal interest rate per year.
    pub nominal_rate: Decimal,
    /// Role-signed interest accrued since the last consuming event.
    pub accrued_interest: Decimal,
    /// Role-signed fee accrued since the last fee payment.
    pub fee_accrued: Decimal,
    /// Multiplier applied to principal flows by scaling events.
    pub notional_scaling: Decimal,
    /// Multiplier applied to interest flows by scaling events.
    pub interest_scaling: Decimal,
    /// Unsigned amount of the next scheduled principal redemption.
    pub next_redemption: Decimal,
}

impl StateRecord {
    /// Derives the initial state as of the attribute record's status date.
    ///
    /// When the initial exchange already happened (`initial_exchange_date
    /// <= status_date`), the contract is running: nominal value, rate, and
    /// accruals come from the attributes. Otherwise the contract has not
    /// started and all positions are zero until the initial exchange event
    /// sets them.
    #[must_use]
    pub fn at_status_date(attributes: &ContractAttributes) -> Self {
        let sign = attributes.contract_role.sign();
        let started = attributes.initial_exchange_date <= attributes.status_date;

        if started {
            Self {
                status_date: attributes.status_date,
                nominal_value: sign * attributes.notional,
                nominal_rate: attributes.nominal_rate,
                accrued_interest: sign
                    * attributes.accrued_interest.unwrap_or(Decimal::ZERO),
                fee_accrued: sign * attributes.fee_accrued.unwrap_or(Decimal::ZERO),
                notional_scaling: Decimal::ONE,
                interest_scaling: Decimal::ONE,
                next_redemption: attributes.next_redemption_amount.unwrap_or(Decimal::ZERO),
            }
        } else {
            Self {
                status_date: attributes.status_date,
                nominal_value: Decimal::ZERO,
                nominal_rate: Decimal::ZERO,
                accrued_interest: Decimal::ZERO,
                fee_accrued: Decimal::ZERO,
                notional_scaling: Decimal::ONE,
                interest_scaling: Decimal::ONE,
                next_redemption: attributes.next_redemption_amount.unwrap_or(Decimal::ZERO),
            }
        }
    }
}
