//! The typed contract attribute record.
//!
//! Attributes arrive already type-converted (parsing raw textual terms is
//! an upstream concern) and are consumed read-only by every component.
//! The builder applies the convention-defined defaults for absent optional
//! attributes and validates the mandatory set for the contract type, so
//! every configuration error surfaces before a single event is generated.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cadence_core::calendars::{
    BusinessDayAdjuster, BusinessDayConvention, CalendarConvention, ShiftConvention,
};
use cadence_core::daycounts::DayCountConvention;
use cadence_core::types::{Cycle, Date};

use crate::error::{EngineError, EngineResult};
use crate::schedule::EndOfMonthConvention;

/// Supported contract types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    /// Principal at maturity: bullet principal, periodic interest.
    PrincipalAtMaturity,
    /// Linear amortizer: constant redemption amounts, interest on the
    /// declining balance.
    LinearAmortizer,
    /// Annuity: level total payments, redemption portion derived by the
    /// annuity recurrence.
    Annuity,
}

impl ContractType {
    /// Returns the contract type code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ContractType::PrincipalAtMaturity => "PAM",
            ContractType::LinearAmortizer => "LAM",
            ContractType::Annuity => "ANN",
        }
    }

    /// Returns true if the contract amortizes through scheduled
    /// principal redemption events.
    #[must_use]
    pub fn is_amortizing(&self) -> bool {
        matches!(self, ContractType::LinearAmortizer | ContractType::Annuity)
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ContractType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PAM" => Ok(ContractType::PrincipalAtMaturity),
            "LAM" => Ok(ContractType::LinearAmortizer),
            "ANN" => Ok(ContractType::Annuity),
            _ => Err(EngineError::unknown_contract_type(s)),
        }
    }
}

/// The role of the evaluating party in the contract.
///
/// The role determines the sign of every cash flow: an asset holder pays
/// the notional out at initiation and receives interest; a liability
/// holder mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContractRole {
    /// Real position asset: lender/investor perspective.
    #[default]
    RealPositionAsset,
    /// Real position liability: borrower/issuer perspective.
    RealPositionLiability,
}

impl ContractRole {
    /// Returns the sign factor applied to notional-derived quantities.
    #[must_use]
    pub fn sign(&self) -> Decimal {
        match self {
            ContractRole::RealPositionAsset => Decimal::ONE,
            ContractRole::RealPositionLiability => Decimal::NEGATIVE_ONE,
        }
    }
}

impl FromStr for ContractRole {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RPA" => Ok(ContractRole::RealPositionAsset),
            "RPL" => Ok(ContractRole::RealPositionLiability),
            _ => Err(EngineError::config(format!("unknown contract role '{s}'"))),
        }
    }
}

/// How the fee rate attribute is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FeeBasis {
    /// The fee rate is an absolute amount paid per fee cycle.
    Absolute,
    /// The fee rate accrues on the nominal value like interest.
    #[default]
    PercentOfNominal,
}

impl FromStr for FeeBasis {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(FeeBasis::Absolute),
            "N" => Ok(FeeBasis::PercentOfNominal),
            _ => Err(EngineError::config(format!("unknown fee basis '{s}'"))),
        }
    }
}

/// Which state components a scaling event rescales.
///
/// Parsed from the three-character effect code: `I` in the first position
/// scales interest, `N` in the second position scales the notional,
/// `0` leaves the component untouched (e.g. `I00`, `0N0`, `IN0`, `000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ScalingEffect {
    /// Interest payments are scaled.
    pub interest: bool,
    /// The notional is scaled.
    pub notional: bool,
}

impl ScalingEffect {
    /// No scaling at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if the effect scales anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.interest || self.notional
    }
}

impl FromStr for ScalingEffect {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        let mut effect = ScalingEffect::none();
        for c in code.chars() {
            match c {
                'I' => effect.interest = true,
                'N' => effect.notional = true,
                '0' | 'O' | 'M' => {}
                _ => {
                    return Err(EngineError::config(format!(
                        "unknown scaling effect '{s}'"
                    )))
                }
            }
        }
        Ok(effect)
    }
}

/// The immutable, already-typed contract attribute record.
///
/// Conventions are bound exactly once at build time: the business day
/// adjuster is already attached to its calendar, and the day count and
/// end-of-month conventions are closed enums. Fields are public and read
/// only by convention; the record never changes after `build()`.
#[derive(Debug, Clone)]
pub struct ContractAttributes {
    /// Contract identifier.
    pub contract_id: String,
    /// Contract type.
    pub contract_type: ContractType,
    /// Role of the evaluating party.
    pub contract_role: ContractRole,
    /// Settlement currency of all payoffs.
    pub currency: Option<String>,
    /// The date the attribute record describes the contract state at.
    pub status_date: Date,
    /// Initial exchange (value) date.
    pub initial_exchange_date: Date,
    /// Maturity date.
    pub maturity_date: Option<Date>,
    /// Notional principal.
    pub notional: Decimal,
    /// Nominal interest rate per year.
    pub nominal_rate: Decimal,
    /// Interest accrued as of the status date.
    pub accrued_interest: Option<Decimal>,
    /// Premium or discount exchanged at initiation.
    pub premium_discount: Decimal,
    /// End of the interest capitalization period, if any.
    pub capitalization_end: Option<Date>,

    /// Day count convention.
    pub day_count: DayCountConvention,
    /// Business day calendar selection.
    pub calendar: CalendarConvention,
    /// Business day adjuster bound to the calendar.
    pub business_day: BusinessDayAdjuster,
    /// End-of-month convention for month-based cycles.
    pub end_of_month: EndOfMonthConvention,

    /// Anchor date of the interest payment cycle.
    pub interest_anchor: Option<Date>,
    /// Interest payment cycle.
    pub interest_cycle: Option<Cycle>,

    /// Anchor date of the fee cycle.
    pub fee_anchor: Option<Date>,
    /// Fee cycle.
    pub fee_cycle: Option<Cycle>,
    /// Fee basis.
    pub fee_basis: FeeBasis,
    /// Fee rate (absolute amount or annual rate, per the basis).
    pub fee_rate: Option<Decimal>,
    /// Fee accrued as of the status date.
    pub fee_accrued: Option<Decimal>,

    /// Anchor date of the rate reset cycle.
    pub rate_reset_anchor: Option<Date>,
    /// Rate reset cycle.
    pub rate_reset_cycle: Option<Cycle>,
    /// Spread added to the observed market rate.
    pub rate_spread: Decimal,
    /// Multiplier applied to the observed market rate.
    pub rate_multiplier: Decimal,
    /// Maximum upward rate change per reset period.
    pub period_cap: Option<Decimal>,
    /// Maximum downward rate change per reset period (a magnitude).
    pub period_floor: Option<Decimal>,
    /// Absolute rate ceiling over the contract life.
    pub life_cap: Option<Decimal>,
    /// Absolute rate floor over the contract life.
    pub life_floor: Option<Decimal>,
    /// Known rate applied at the first reset, when fixed in advance.
    pub next_reset_rate: Option<Decimal>,
    /// Market object identifier observed at rate resets.
    pub rate_reset_market_object: Option<String>,

    /// Anchor date of the scaling cycle.
    pub scaling_anchor: Option<Date>,
    /// Scaling cycle.
    pub scaling_cycle: Option<Cycle>,
    /// Which components scaling events rescale.
    pub scaling_effect: ScalingEffect,
    /// Market object identifier of the scaling index.
    pub scaling_market_object: Option<String>,
    /// Scaling index value fixed at contract start (the denominator).
    pub scaling_index_base: Option<Decimal>,

    /// Anchor date of the principal redemption cycle.
    pub redemption_anchor: Option<Date>,
    /// Principal redemption cycle.
    pub redemption_cycle: Option<Cycle>,
    /// Next scheduled redemption amount, when known.
    pub next_redemption_amount: Option<Decimal>,

    /// Purchase date, when the contract is acquired mid-life.
    pub purchase_date: Option<Date>,
    /// Price paid at purchase.
    pub purchase_price: Option<Decimal>,
    /// Early termination date.
    pub termination_date: Option<Date>,
    /// Price received at termination.
    pub termination_price: Option<Decimal>,
}

impl ContractAttributes {
    /// Creates a builder for the attribute record.
    #[must_use]
    pub fn builder() -> ContractAttributesBuilder {
        ContractAttributesBuilder::default()
    }
}

/// Builder for [`ContractAttributes`].
///
/// Mandatory for every contract type: contract type, initial exchange
/// date, maturity date, notional. Everything else defaults per convention:
/// no business-day shift, same-day end-of-month handling, no calendar,
/// ACT/ACT ISDA day count.
#[derive(Debug, Clone, Default)]
pub struct ContractAttributesBuilder {
    contract_id: Option<String>,
    contract_type: Option<ContractType>,
    contract_role: ContractRole,
    currency: Option<String>,
    status_date: Option<Date>,
    initial_exchange_date: Option<Date>,
    maturity_date: Option<Date>,
    notional: Option<Decimal>,
    nominal_rate: Option<Decimal>,
    accrued_interest: Option<Decimal>,
    premium_discount: Option<Decimal>,
    capitalization_end: Option<Date>,
    day_count: Option<DayCountConvention>,
    calendar: CalendarConvention,
    business_day: Option<(BusinessDayConvention, ShiftConvention)>,
    end_of_month: Option<EndOfMonthConvention>,
    interest_anchor: Option<Date>,
    interest_cycle: Option<Cycle>,
    fee_anchor: Option<Date>,
    fee_cycle: Option<Cycle>,
    fee_basis: Option<FeeBasis>,
    fee_rate: Option<Decimal>,
    fee_accrued: Option<Decimal>,
    rate_reset_anchor: Option<Date>,
    rate_reset_cycle: Option<Cycle>,
    rate_spread: Option<Decimal>,
    rate_multiplier: Option<Decimal>,
    period_cap: Option<Decimal>,
    period_floor: Option<Decimal>,
    life_cap: Option<Decimal>,
    life_floor: Option<Decimal>,
    next_reset_rate: Option<Decimal>,
    rate_reset_market_object: Option<String>,
    scaling_anchor: Option<Date>,
    scaling_cycle: Option<Cycle>,
    scaling_effect: Option<ScalingEffect>,
    scaling_market_object: Option<String>,
    scaling_index_base: Option<Decimal>,
    redemption_anchor: Option<Date>,
    redemption_cycle: Option<Cycle>,
    next_redemption_amount: Option<Decimal>,
    purchase_date: Option<Date>,
    purchase_price: Option<Decimal>,
    termination_date: Option<Date>,
    termination_price: Option<Decimal>,
}

impl ContractAttributesBuilder {
    /// Sets the contract identifier.
    #[must_use]
    pub fn contract_id(mut self, id: impl Into<String>) -> Self {
        self.contract_id = Some(id.into());
        self
    }

    /// Sets the contract type.
    #[must_use]
    pub fn contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = Some(contract_type);
        self
    }

    /// Sets the contract role.
    #[must_use]
    pub fn contract_role(mut self, role: ContractRole) -> Self {
        self.contract_role = role;
        self
    }

    /// Sets the settlement currency.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets the status date. Defaults to the initial exchange date.
    #[must_use]
    pub fn status_date(mut self, date: Date) -> Self {
        self.status_date = Some(date);
        self
    }

    /// Sets the initial exchange date.
    #[must_use]
    pub fn initial_exchange_date(mut self, date: Date) -> Self {
        self.initial_exchange_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the notional principal.
    #[must_use]
    pub fn notional(mut self, notional: Decimal) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the nominal interest rate.
    #[must_use]
    pub fn nominal_rate(mut self, rate: Decimal) -> Self {
        self.nominal_rate = Some(rate);
        self
    }

    /// Sets the interest accrued as of the status date.
    #[must_use]
    pub fn accrued_interest(mut self, accrued: Decimal) -> Self {
        self.accrued_interest = Some(accrued);
        self
    }

    /// Sets the premium/discount exchanged at initiation.
    #[must_use]
    pub fn premium_discount(mut self, amount: Decimal) -> Self {
        self.premium_discount = Some(amount);
        self
    }

    /// Sets the end of the interest capitalization period.
    #[must_use]
    pub fn capitalization_end(mut self, date: Date) -> Self {
        self.capitalization_end = Some(date);
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn day_count(mut self, convention: DayCountConvention) -> Self {
        self.day_count = Some(convention);
        self
    }

    /// Sets the business day calendar.
    #[must_use]
    pub fn calendar(mut self, calendar: CalendarConvention) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day rule and shift/calculation order.
    #[must_use]
    pub fn business_day(mut self, rule: BusinessDayConvention, shift: ShiftConvention) -> Self {
        self.business_day = Some((rule, shift));
        self
    }

    /// Sets the end-of-month convention.
    #[must_use]
    pub fn end_of_month(mut self, convention: EndOfMonthConvention) -> Self {
        self.end_of_month = Some(convention);
        self
    }

    /// Sets the interest payment cycle and optional anchor.
    #[must_use]
    pub fn interest_cycle(mut self, cycle: Cycle) -> Self {
        self.interest_cycle = Some(cycle);
        self
    }

    /// Sets the interest payment cycle anchor.
    #[must_use]
    pub fn interest_anchor(mut self, date: Date) -> Self {
        self.interest_anchor = Some(date);
        self
    }

    /// Sets the fee cycle.
    #[must_use]
    pub fn fee_cycle(mut self, cycle: Cycle) -> Self {
        self.fee_cycle = Some(cycle);
        self
    }

    /// Sets the fee cycle anchor.
    #[must_use]
    pub fn fee_anchor(mut self, date: Date) -> Self {
        self.fee_anchor = Some(date);
        self
    }

    /// Sets the fee basis.
    #[must_use]
    pub fn fee_basis(mut self, basis: FeeBasis) -> Self {
        self.fee_basis = Some(basis);
        self
    }

    /// Sets the fee rate.
    #[must_use]
    pub fn fee_rate(mut self, rate: Decimal) -> Self {
        self.fee_rate = Some(rate);
        self
    }

    /// Sets the fee accrued as of the status date.
    #[must_use]
    pub fn fee_accrued(mut self, accrued: Decimal) -> Self {
        self.fee_accrued = Some(accrued);
        self
    }

    /// Sets the rate reset cycle.
    #[must_use]
    pub fn rate_reset_cycle(mut self, cycle: Cycle) -> Self {
        self.rate_reset_cycle = Some(cycle);
        self
    }

    /// Sets the rate reset anchor.
    #[must_use]
    pub fn rate_reset_anchor(mut self, date: Date) -> Self {
        self.rate_reset_anchor = Some(date);
        self
    }

    /// Sets the rate spread.
    #[must_use]
    pub fn rate_spread(mut self, spread: Decimal) -> Self {
        self.rate_spread = Some(spread);
        self
    }

    /// Sets the rate multiplier.
    #[must_use]
    pub fn rate_multiplier(mut self, multiplier: Decimal) -> Self {
        self.rate_multiplier = Some(multiplier);
        self
    }

    /// Sets the per-period rate change cap.
    #[must_use]
    pub fn period_cap(mut self, cap: Decimal) -> Self {
        self.period_cap = Some(cap);
        self
    }

    /// Sets the per-period rate change floor (a magnitude).
    #[must_use]
    pub fn period_floor(mut self, floor: Decimal) -> Self {
        self.period_floor = Some(floor);
        self
    }

    /// Sets the life-of-contract rate cap.
    #[must_use]
    pub fn life_cap(mut self, cap: Decimal) -> Self {
        self.life_cap = Some(cap);
        self
    }

    /// Sets the life-of-contract rate floor.
    #[must_use]
    pub fn life_floor(mut self, floor: Decimal) -> Self {
        self.life_floor = Some(floor);
        self
    }

    /// Sets a known rate for the first reset.
    #[must_use]
    pub fn next_reset_rate(mut self, rate: Decimal) -> Self {
        self.next_reset_rate = Some(rate);
        self
    }

    /// Sets the market object observed at rate resets.
    #[must_use]
    pub fn rate_reset_market_object(mut self, id: impl Into<String>) -> Self {
        self.rate_reset_market_object = Some(id.into());
        self
    }

    /// Sets the scaling cycle.
    #[must_use]
    pub fn scaling_cycle(mut self, cycle: Cycle) -> Self {
        self.scaling_cycle = Some(cycle);
        self
    }

    /// Sets the scaling anchor.
    #[must_use]
    pub fn scaling_anchor(mut self, date: Date) -> Self {
        self.scaling_anchor = Some(date);
        self
    }

    /// Sets the scaling effect.
    #[must_use]
    pub fn scaling_effect(mut self, effect: ScalingEffect) -> Self {
        self.scaling_effect = Some(effect);
        self
    }

    /// Sets the scaling index market object.
    #[must_use]
    pub fn scaling_market_object(mut self, id: impl Into<String>) -> Self {
        self.scaling_market_object = Some(id.into());
        self
    }

    /// Sets the scaling index base value.
    #[must_use]
    pub fn scaling_index_base(mut self, value: Decimal) -> Self {
        self.scaling_index_base = Some(value);
        self
    }

    /// Sets the principal redemption cycle.
    #[must_use]
    pub fn redemption_cycle(mut self, cycle: Cycle) -> Self {
        self.redemption_cycle = Some(cycle);
        self
    }

    /// Sets the principal redemption anchor.
    #[must_use]
    pub fn redemption_anchor(mut self, date: Date) -> Self {
        self.redemption_anchor = Some(date);
        self
    }

    /// Sets the next redemption amount.
    #[must_use]
    pub fn next_redemption_amount(mut self, amount: Decimal) -> Self {
        self.next_redemption_amount = Some(amount);
        self
    }

    /// Sets the purchase date.
    #[must_use]
    pub fn purchase_date(mut self, date: Date) -> Self {
        self.purchase_date = Some(date);
        self
    }

    /// Sets the price paid at purchase.
    #[must_use]
    pub fn purchase_price(mut self, price: Decimal) -> Self {
        self.purchase_price = Some(price);
        self
    }

    /// Sets the early termination date.
    #[must_use]
    pub fn termination_date(mut self, date: Date) -> Self {
        self.termination_date = Some(date);
        self
    }

    /// Sets the price received at termination.
    #[must_use]
    pub fn termination_price(mut self, price: Decimal) -> Self {
        self.termination_price = Some(price);
        self
    }

    /// Builds the attribute record, applying defaults and validating the
    /// mandatory attribute set for the contract type.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingAttribute` when a mandatory attribute
    /// is absent and `EngineError::ConfigError` for inconsistent dates.
    pub fn build(self) -> EngineResult<ContractAttributes> {
        let contract_type = self
            .contract_type
            .ok_or_else(|| EngineError::missing_attribute("contract type"))?;
        let initial_exchange_date = self
            .initial_exchange_date
            .ok_or_else(|| EngineError::missing_attribute("initial exchange date"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| EngineError::missing_attribute("maturity date"))?;
        let notional = self
            .notional
            .ok_or_else(|| EngineError::missing_attribute("notional"))?;

        if maturity_date <= initial_exchange_date {
            return Err(EngineError::config(format!(
                "maturity {maturity_date} is not after initial exchange {initial_exchange_date}"
            )));
        }

        if contract_type.is_amortizing()
            && self.redemption_cycle.is_none()
            && self.redemption_anchor.is_none()
        {
            return Err(EngineError::missing_attribute(
                "cycle of principal redemption",
            ));
        }

        if self.rate_reset_cycle.is_some() && self.rate_reset_market_object.is_none() {
            return Err(EngineError::missing_attribute(
                "market object code of rate reset",
            ));
        }

        let business_day = match self.business_day {
            Some((rule, shift)) => {
                BusinessDayAdjuster::new(rule, shift, self.calendar.to_calendar())
            }
            None => BusinessDayAdjuster::unadjusted(),
        };

        Ok(ContractAttributes {
            contract_id: self.contract_id.unwrap_or_default(),
            contract_type,
            contract_role: self.contract_role,
            currency: self.currency,
            status_date: self.status_date.unwrap_or(initial_exchange_date),
            initial_exchange_date,
            maturity_date: Some(maturity_date),
            notional,
            nominal_rate: self.nominal_rate.unwrap_or(Decimal::ZERO),
            accrued_interest: self.accrued_interest,
            premium_discount: self.premium_discount.unwrap_or(Decimal::ZERO),
            capitalization_end: self.capitalization_end,
            day_count: self.day_count.unwrap_or_default(),
            calendar: self.calendar,
            business_day,
            end_of_month: self.end_of_month.unwrap_or_default(),
            interest_anchor: self.interest_anchor,
            interest_cycle: self.interest_cycle,
            fee_anchor: self.fee_anchor,
            fee_cycle: self.fee_cycle,
            fee_basis: self.fee_basis.unwrap_or_default(),
            fee_rate: self.fee_rate,
            fee_accrued: self.fee_accrued,
            rate_reset_anchor: self.rate_reset_anchor,
            rate_reset_cycle: self.rate_reset_cycle,
            rate_spread: self.rate_spread.unwrap_or(Decimal::ZERO),
            rate_multiplier: self.rate_multiplier.unwrap_or(Decimal::ONE),
            period_cap: self.period_cap,
            period_floor: self.period_floor,
            life_cap: self.life_cap,
            life_floor: self.life_floor,
            next_reset_rate: self.next_reset_rate,
            rate_reset_market_object: self.rate_reset_market_object,
            scaling_anchor: self.scaling_anchor,
            scaling_cycle: self.scaling_cycle,
            scaling_effect: self.scaling_effect.unwrap_or_default(),
            scaling_market_object: self.scaling_market_object,
            scaling_index_base: self.scaling_index_base,
            redemption_anchor: self.redemption_anchor,
            redemption_cycle: self.redemption_cycle,
            next_redemption_amount: self.next_redemption_amount,
            purchase_date: self.purchase_date,
            purchase_price: self.purchase_price,
            termination_date: self.termination_date,
            termination_price: self.termination_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_builder() -> ContractAttributesBuilder {
        ContractAttributes::builder()
            .contract_type(ContractType::PrincipalAtMaturity)
            .initial_exchange_date(Date::from_ymd(2020, 1, 1).unwrap())
            .maturity_date(Date::from_ymd(2025, 1, 1).unwrap())
            .notional(dec!(1000))
    }

    #[test]
    fn test_defaults_applied() {
        let attrs = base_builder().build().unwrap();

        assert_eq!(attrs.status_date, attrs.initial_exchange_date);
        assert_eq!(attrs.nominal_rate, Decimal::ZERO);
        assert_eq!(attrs.rate_multiplier, Decimal::ONE);
        assert_eq!(attrs.day_count, DayCountConvention::ActActIsda);
        assert_eq!(attrs.end_of_month, EndOfMonthConvention::SameDay);
        assert_eq!(attrs.contract_role, ContractRole::RealPositionAsset);
        // Default business day handling is no shift at all.
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert_eq!(attrs.business_day.shift_event_time(saturday), saturday);
    }

    #[test]
    fn test_missing_mandatory() {
        let result = ContractAttributes::builder()
            .contract_type(ContractType::PrincipalAtMaturity)
            .notional(dec!(1000))
            .build();
        assert!(matches!(
            result,
            Err(EngineError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_maturity_before_start_rejected() {
        let result = ContractAttributes::builder()
            .contract_type(ContractType::PrincipalAtMaturity)
            .initial_exchange_date(Date::from_ymd(2025, 1, 1).unwrap())
            .maturity_date(Date::from_ymd(2020, 1, 1).unwrap())
            .notional(dec!(1000))
            .build();
        assert!(matches!(result, Err(EngineError::ConfigError { .. })));
    }

    #[test]
    fn test_amortizer_requires_redemption_cycle() {
        let result = ContractAttributes::builder()
            .contract_type(ContractType::LinearAmortizer)
            .initial_exchange_date(Date::from_ymd(2020, 1, 1).unwrap())
            .maturity_date(Date::from_ymd(2025, 1, 1).unwrap())
            .notional(dec!(1000))
            .build();
        assert!(matches!(
            result,
            Err(EngineError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_contract_type_parse() {
        assert_eq!(
            "PAM".parse::<ContractType>().unwrap(),
            ContractType::PrincipalAtMaturity
        );
        assert_eq!("ann".parse::<ContractType>().unwrap(), ContractType::Annuity);
        assert!(matches!(
            "SWPPV".parse::<ContractType>(),
            Err(EngineError::UnknownContractType { .. })
        ));
    }

    #[test]
    fn test_role_sign() {
        assert_eq!(ContractRole::RealPositionAsset.sign(), dec!(1));
        assert_eq!(ContractRole::RealPositionLiability.sign(), dec!(-1));
    }

    #[test]
    fn test_scaling_effect_parse() {
        assert_eq!("000".parse::<ScalingEffect>().unwrap(), ScalingEffect::none());
        let effect: ScalingEffect = "IN0".parse().unwrap();
        assert!(effect.interest && effect.notional);
        let effect: ScalingEffect = "0N0".parse().unwrap();
        assert!(!effect.interest && effect.notional);
        assert!("XYZ".parse::<ScalingEffect>().is_err());
    }
}
