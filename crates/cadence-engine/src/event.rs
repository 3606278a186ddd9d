//! The contract event produced by the evaluation fold.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cadence_core::types::{Date, EventType};

use crate::state::StateRecord;

/// A single contingent event of a contract.
///
/// Immutable once produced by the fold. The event time is where the cash
/// moves; the calculation time is the date the accrual mathematics saw,
/// which differs under calculate-then-shift business day handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// The (business-day adjusted) date the event takes effect.
    pub event_time: Date,
    /// The date payoff and state calculations were evaluated at.
    pub calc_time: Date,
    /// The event kind.
    pub event_type: EventType,
    /// Signed cash amount exchanged, in the contract currency.
    pub payoff: Decimal,
    /// Settlement currency, when the contract specifies one.
    pub currency: Option<String>,
    /// Contract state immediately after the event.
    pub state: StateRecord,
}

impl fmt::Display for ContractEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} payoff {}",
            self.event_time, self.event_type, self.payoff
        )
    }
}
