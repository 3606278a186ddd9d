//! The external risk factor oracle consumed during evaluation.

use rust_decimal::Decimal;

use cadence_core::types::Date;

use crate::attributes::ContractAttributes;
use crate::error::EngineResult;
use crate::state::StateRecord;

/// Supplier of market, credit, and behavioral factor values.
///
/// The engine treats the oracle as an already-resolved, synchronous view:
/// lookups must be deterministic for a fixed `(id, date, state,
/// attributes)` tuple within one evaluation, and a failed lookup aborts
/// the evaluation — the fold makes no provision for partial results.
pub trait RiskFactorOracle: Send + Sync {
    /// Returns the value of factor `id` at the given date and contract state.
    ///
    /// # Errors
    ///
    /// Implementations signal unknown factor identifiers or missing data
    /// with [`EngineError::RiskFactor`](crate::error::EngineError::RiskFactor);
    /// the engine propagates the error unwrapped.
    fn state_at(
        &self,
        id: &str,
        date: Date,
        state: &StateRecord,
        attributes: &ContractAttributes,
    ) -> EngineResult<Decimal>;
}

/// An oracle returning the same value for every factor and date.
///
/// Useful for testing and for flat-scenario evaluations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantOracle {
    value: Decimal,
}

impl ConstantOracle {
    /// Creates an oracle that always answers `value`.
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }
}

impl RiskFactorOracle for ConstantOracle {
    fn state_at(
        &self,
        _id: &str,
        _date: Date,
        _state: &StateRecord,
        _attributes: &ContractAttributes,
    ) -> EngineResult<Decimal> {
        Ok(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ContractType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constant_oracle() {
        let oracle = ConstantOracle::new(dec!(0.03));
        let attributes = ContractAttributes::builder()
            .contract_type(ContractType::PrincipalAtMaturity)
            .initial_exchange_date(Date::from_ymd(2020, 1, 1).unwrap())
            .maturity_date(Date::from_ymd(2025, 1, 1).unwrap())
            .notional(dec!(1000))
            .build()
            .unwrap();
        let state = StateRecord::at_status_date(&attributes);

        let value = oracle
            .state_at("EURIBOR-6M", Date::from_ymd(2021, 1, 1).unwrap(), &state, &attributes)
            .unwrap();
        assert_eq!(value, dec!(0.03));
    }
}
