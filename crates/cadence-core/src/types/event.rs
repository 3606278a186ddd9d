//! Contract event kinds and their ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a contract lifecycle event.
///
/// Each kind carries a fixed sequence number used as the tie-break when
/// several events fall on the same date: accrual-consuming kinds (interest
/// capitalization, rate resets) sort after the kinds whose accrual state
/// they depend on, and the analysis snapshot sorts last so it observes the
/// day's post-event state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Initial exchange of the notional amount
    InitialExchange,
    /// Purchase of the contract mid-life
    Purchase,
    /// Fee payment
    FeePayment,
    /// Scheduled partial redemption of principal
    PrincipalRedemption,
    /// Interest payment
    InterestPayment,
    /// Capitalization of accrued interest into the nominal value
    InterestCapitalization,
    /// Rate reset to a known rate fixed in advance
    RateResetFixed,
    /// Rate reset against a market rate observation
    RateResetVariable,
    /// Scaling of notional and/or interest by an index
    Scaling,
    /// Early termination of the contract
    Termination,
    /// Maturity of the contract
    Maturity,
    /// Analysis point: a pure state observation with no cash flow
    AnalysisPoint,
}

impl EventType {
    /// Returns the same-date ordering rank of the event kind.
    #[must_use]
    pub fn sequence(&self) -> u8 {
        match self {
            EventType::InitialExchange => 0,
            EventType::Purchase => 10,
            EventType::FeePayment => 20,
            EventType::PrincipalRedemption => 30,
            EventType::InterestPayment => 40,
            EventType::InterestCapitalization => 50,
            EventType::RateResetFixed => 60,
            EventType::RateResetVariable => 70,
            EventType::Scaling => 80,
            EventType::Termination => 90,
            EventType::Maturity => 100,
            EventType::AnalysisPoint => 110,
        }
    }

    /// Returns the short mnemonic code of the event kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            EventType::InitialExchange => "IED",
            EventType::Purchase => "PRD",
            EventType::FeePayment => "FP",
            EventType::PrincipalRedemption => "PR",
            EventType::InterestPayment => "IP",
            EventType::InterestCapitalization => "IPCI",
            EventType::RateResetFixed => "RRF",
            EventType::RateResetVariable => "RR",
            EventType::Scaling => "SC",
            EventType::Termination => "TD",
            EventType::Maturity => "MD",
            EventType::AnalysisPoint => "AD",
        }
    }

    /// Returns true if the event can change the outstanding nominal value.
    #[must_use]
    pub fn affects_principal(&self) -> bool {
        matches!(
            self,
            EventType::InitialExchange
                | EventType::PrincipalRedemption
                | EventType::InterestCapitalization
                | EventType::Termination
                | EventType::Maturity
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_ordering() {
        // Capitalization consumes accrual, so it sorts after interest payment.
        assert!(EventType::InterestCapitalization.sequence() > EventType::InterestPayment.sequence());
        // Rate resets apply to the period after same-day payments.
        assert!(EventType::RateResetVariable.sequence() > EventType::InterestPayment.sequence());
        // The analysis snapshot observes the day's final state.
        assert!(EventType::AnalysisPoint.sequence() > EventType::Maturity.sequence());
    }

    #[test]
    fn test_codes_unique() {
        let all = [
            EventType::InitialExchange,
            EventType::Purchase,
            EventType::FeePayment,
            EventType::PrincipalRedemption,
            EventType::InterestPayment,
            EventType::InterestCapitalization,
            EventType::RateResetFixed,
            EventType::RateResetVariable,
            EventType::Scaling,
            EventType::Termination,
            EventType::Maturity,
            EventType::AnalysisPoint,
        ];
        let mut codes: Vec<_> = all.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());

        let mut seqs: Vec<_> = all.iter().map(|e| e.sequence()).collect();
        seqs.sort_unstable();
        seqs.dedup();
        assert_eq!(seqs.len(), all.len());
    }
}
