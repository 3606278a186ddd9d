//! End-to-end lifecycle tests over full contract evaluations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use cadence_core::calendars::{BusinessDayConvention, CalendarConvention, ShiftConvention};
use cadence_core::daycounts::DayCountConvention;
use cadence_core::types::{Date, EventType};
use cadence_engine::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn assert_close(actual: Decimal, expected: Decimal) {
    assert!(
        (actual - expected).abs() < dec!(0.000000000001),
        "expected {expected}, got {actual}"
    );
}

// ===========================================================================
// Bullet contract round trip
// ===========================================================================

#[test]
fn pam_round_trip() {
    // One-year bullet loan: 1000 notional at 1%, ACT/ACT ISDA, no shifts.
    let attributes = ContractAttributes::builder()
        .contract_id("PAM-ROUND-TRIP")
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2016, 1, 2))
        .maturity_date(date(2017, 1, 1))
        .notional(dec!(1000))
        .nominal_rate(dec!(0.01))
        .day_count(DayCountConvention::ActActIsda)
        .build()
        .unwrap();

    let events = ContractEngine::evaluate(&[], &attributes, &ConstantOracle::default()).unwrap();
    assert_eq!(events.len(), 2);

    let initial = &events[0];
    assert_eq!(initial.event_type, EventType::InitialExchange);
    assert_eq!(initial.event_time, date(2016, 1, 2));
    assert_eq!(initial.payoff, dec!(-1000));
    assert_eq!(initial.state.nominal_value, dec!(1000));

    let maturity = &events[1];
    assert_eq!(maturity.event_type, EventType::Maturity);
    assert_eq!(maturity.event_time, date(2017, 1, 1));
    // Principal plus interest accrued since the initial exchange:
    // 365 days of leap year 2016 at 1% on 1000.
    let accrued = dec!(1000) * dec!(0.01) * (dec!(365) / dec!(366));
    assert_close(maturity.payoff, dec!(1000) + accrued);
    assert_eq!(maturity.state.nominal_value, Decimal::ZERO);
}

#[test]
fn liability_mirrors_asset() {
    let builder = || {
        ContractAttributes::builder()
            .contract_type(ContractType::PrincipalAtMaturity)
            .initial_exchange_date(date(2016, 1, 2))
            .maturity_date(date(2017, 1, 1))
            .notional(dec!(1000))
            .nominal_rate(dec!(0.01))
    };
    let asset = builder().build().unwrap();
    let liability = builder()
        .contract_role(ContractRole::RealPositionLiability)
        .build()
        .unwrap();

    let oracle = ConstantOracle::default();
    let asset_events = ContractEngine::evaluate(&[], &asset, &oracle).unwrap();
    let liability_events = ContractEngine::evaluate(&[], &liability, &oracle).unwrap();

    for (a, l) in asset_events.iter().zip(liability_events.iter()) {
        assert_eq!(a.event_type, l.event_type);
        assert_eq!(a.payoff, -l.payoff);
    }
}

// ===========================================================================
// Timeline properties
// ===========================================================================

#[test]
fn timeline_is_monotonic_and_bounded_by_maturity() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 15))
        .maturity_date(date(2024, 1, 15))
        .notional(dec!(50000))
        .nominal_rate(dec!(0.035))
        .interest_cycle("3M+".parse().unwrap())
        .fee_cycle("1Y+".parse().unwrap())
        .fee_rate(dec!(0.001))
        .build()
        .unwrap();

    let events = ContractEngine::evaluate(
        &[date(2021, 6, 1), date(2023, 2, 1)],
        &attributes,
        &ConstantOracle::default(),
    )
    .unwrap();

    for pair in events.windows(2) {
        assert!(pair[0].event_time <= pair[1].event_time);
    }
    assert!(events.iter().all(|e| e.event_time <= date(2024, 1, 15)));
    // Exactly one initiation and one maturity event.
    assert_eq!(
        events
            .iter()
            .filter(|e| e.event_type == EventType::InitialExchange)
            .count(),
        1
    );
    assert_eq!(
        events
            .iter()
            .filter(|e| e.event_type == EventType::Maturity)
            .count(),
        1
    );
}

#[test]
fn status_date_follows_calc_time() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 15))
        .maturity_date(date(2022, 1, 15))
        .notional(dec!(1000))
        .nominal_rate(dec!(0.02))
        .interest_cycle("6M+".parse().unwrap())
        .build()
        .unwrap();

    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::default()).unwrap();
    for event in &events {
        assert_eq!(event.state.status_date, event.calc_time);
    }
}

// ===========================================================================
// Scenario re-use: the timeline is risk-factor independent
// ===========================================================================

#[test]
fn same_timeline_under_different_oracles() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2023, 1, 1))
        .notional(dec!(1000))
        .nominal_rate(dec!(0.02))
        .interest_cycle("6M+".parse().unwrap())
        .rate_reset_cycle("1Y+".parse().unwrap())
        .rate_reset_market_object("USD-LIBOR-6M")
        .build()
        .unwrap();

    let timeline = ContractEngine::initialize(&[], &attributes).unwrap();
    let low =
        ContractEngine::evaluate_timeline(&timeline, &attributes, &ConstantOracle::new(dec!(0.01)))
            .unwrap();
    let high =
        ContractEngine::evaluate_timeline(&timeline, &attributes, &ConstantOracle::new(dec!(0.08)))
            .unwrap();

    assert_eq!(low.len(), high.len());
    for (a, b) in low.iter().zip(high.iter()) {
        // Identical timestamps and kinds...
        assert_eq!(a.event_time, b.event_time);
        assert_eq!(a.event_type, b.event_type);
    }
    // ...but different payoffs once the reset has fixed different rates.
    let last_coupon = |events: &[ContractEvent]| {
        events
            .iter()
            .filter(|e| e.event_type == EventType::InterestPayment)
            .next_back()
            .unwrap()
            .payoff
    };
    assert!(last_coupon(&high) > last_coupon(&low));
}

// ===========================================================================
// Rate resets
// ===========================================================================

#[test]
fn rate_reset_applies_caps_and_floors() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2023, 1, 1))
        .notional(dec!(1000))
        .nominal_rate(dec!(0.02))
        .rate_reset_cycle("1Y+".parse().unwrap())
        .rate_reset_market_object("RATE-INDEX")
        .period_cap(dec!(0.01))
        .life_cap(dec!(0.035))
        .build()
        .unwrap();

    // Observed 10% would push the rate far past both caps.
    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::new(dec!(0.10))).unwrap();

    let resets: Vec<_> = events
        .iter()
        .filter(|e| e.event_type == EventType::RateResetVariable)
        .collect();
    assert_eq!(resets.len(), 2);

    // First reset: 0.02 + min(0.08, 0.01) = 0.03.
    assert_eq!(resets[0].state.nominal_rate, dec!(0.03));
    // Second reset: 0.03 + 0.01 = 0.04, clipped by the life cap.
    assert_eq!(resets[1].state.nominal_rate, dec!(0.035));
    // Resets move no cash.
    assert_eq!(resets[0].payoff, Decimal::ZERO);
}

#[test]
fn first_reset_uses_fixed_rate_when_known() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2023, 1, 1))
        .notional(dec!(1000))
        .nominal_rate(dec!(0.02))
        .rate_reset_cycle("1Y+".parse().unwrap())
        .rate_reset_market_object("RATE-INDEX")
        .next_reset_rate(dec!(0.025))
        .build()
        .unwrap();

    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::new(dec!(0.07))).unwrap();

    let fixed = events
        .iter()
        .find(|e| e.event_type == EventType::RateResetFixed)
        .unwrap();
    assert_eq!(fixed.state.nominal_rate, dec!(0.025));

    // Later resets observe the market again.
    let variable = events
        .iter()
        .find(|e| e.event_type == EventType::RateResetVariable)
        .unwrap();
    assert_eq!(variable.state.nominal_rate, dec!(0.07));
}

// ===========================================================================
// Business day handling
// ===========================================================================

#[test]
fn event_times_land_on_business_days() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2021, 1, 4))
        .maturity_date(date(2022, 1, 4))
        .notional(dec!(1000))
        .nominal_rate(dec!(0.02))
        // 2021-07-04 and 2021-10-04 fall on Sunday/Monday; the cycle dates
        // get shifted wherever they land on a weekend.
        .interest_cycle("3M+".parse().unwrap())
        .calendar(CalendarConvention::MondayToFriday)
        .business_day(
            BusinessDayConvention::ModifiedFollowing,
            ShiftConvention::CalculateThenShift,
        )
        .build()
        .unwrap();

    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::default()).unwrap();

    for event in events
        .iter()
        .filter(|e| e.event_type == EventType::InterestPayment)
    {
        assert!(!event.event_time.is_weekend(), "event on {}", event.event_time);
        // Calculate-then-shift: accrual mathematics saw the raw cycle date.
        assert_eq!(event.calc_time.day(), 4);
    }
}

// ===========================================================================
// Amortizers
// ===========================================================================

#[test]
fn lam_amortizes_linearly() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::LinearAmortizer)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2024, 1, 1))
        .notional(dec!(1200))
        .nominal_rate(dec!(0.05))
        .interest_cycle("1Y+".parse().unwrap())
        .redemption_cycle("1Y+".parse().unwrap())
        .build()
        .unwrap();

    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::default()).unwrap();

    let redemptions: Vec<_> = events
        .iter()
        .filter(|e| e.event_type == EventType::PrincipalRedemption)
        .collect();
    // Three interim redemptions; the final portion repays at maturity.
    assert_eq!(redemptions.len(), 3);
    for redemption in &redemptions {
        assert_eq!(redemption.payoff, dec!(300));
    }
    assert_eq!(redemptions[0].state.nominal_value, dec!(900));
    assert_eq!(redemptions[1].state.nominal_value, dec!(600));
    assert_eq!(redemptions[2].state.nominal_value, dec!(300));

    let maturity = events.last().unwrap();
    assert_eq!(maturity.event_type, EventType::Maturity);
    // The final year's interest pays through the same-day coupon, so
    // maturity repays exactly the remaining principal.
    assert_eq!(maturity.payoff, dec!(300));
    assert_eq!(maturity.state.nominal_value, Decimal::ZERO);
}

#[test]
fn ann_with_zero_rate_splits_evenly() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::Annuity)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2024, 1, 1))
        .notional(dec!(1000))
        .nominal_rate(Decimal::ZERO)
        .redemption_cycle("1Y+".parse().unwrap())
        .build()
        .unwrap();

    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::default()).unwrap();

    // Zero rate: the level payment is pure principal, 1000 over 4 dates.
    let redemptions: Vec<_> = events
        .iter()
        .filter(|e| e.event_type == EventType::PrincipalRedemption)
        .collect();
    assert_eq!(redemptions.len(), 3);
    for redemption in &redemptions {
        assert_eq!(redemption.payoff, dec!(250));
    }

    let maturity = events.last().unwrap();
    assert_eq!(maturity.payoff, dec!(250));
}

#[test]
fn redemption_never_exceeds_outstanding() {
    // An oversized scheduled redemption is capped at the remaining balance.
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::LinearAmortizer)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2024, 1, 1))
        .notional(dec!(1000))
        .next_redemption_amount(dec!(450))
        .redemption_cycle("1Y+".parse().unwrap())
        .build()
        .unwrap();

    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::default()).unwrap();

    let redemptions: Vec<_> = events
        .iter()
        .filter(|e| e.event_type == EventType::PrincipalRedemption)
        .collect();
    assert_eq!(redemptions[0].payoff, dec!(450));
    assert_eq!(redemptions[1].payoff, dec!(450));
    // Only 100 outstanding remains for the third scheduled 450.
    assert_eq!(redemptions[2].payoff, dec!(100));
    assert_eq!(redemptions[2].state.nominal_value, Decimal::ZERO);
}

// ===========================================================================
// Capitalization
// ===========================================================================

#[test]
fn capitalization_rolls_interest_into_nominal() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2023, 1, 1))
        .notional(dec!(1000))
        .nominal_rate(dec!(0.05))
        .interest_cycle("1Y+".parse().unwrap())
        .capitalization_end(date(2021, 1, 1))
        .build()
        .unwrap();

    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::default()).unwrap();

    let capitalization = events
        .iter()
        .find(|e| e.event_type == EventType::InterestCapitalization)
        .unwrap();
    assert_eq!(capitalization.payoff, Decimal::ZERO);
    // A year of 5% interest rolled into the nominal.
    assert!(capitalization.state.nominal_value > dec!(1049));
    assert!(capitalization.state.nominal_value < dec!(1051));

    // Later coupons accrue on the capitalized balance.
    let last_coupon = events
        .iter()
        .filter(|e| e.event_type == EventType::InterestPayment)
        .next_back()
        .unwrap();
    assert!(last_coupon.payoff > dec!(52));
}

// ===========================================================================
// Fees and scaling
// ===========================================================================

#[test]
fn fee_accrual_pays_out_on_fee_cycle() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2022, 1, 1))
        .notional(dec!(10000))
        .nominal_rate(dec!(0.02))
        .fee_cycle("1Y+".parse().unwrap())
        .fee_rate(dec!(0.005))
        .build()
        .unwrap();

    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::default()).unwrap();

    let fees: Vec<_> = events
        .iter()
        .filter(|e| e.event_type == EventType::FeePayment)
        .collect();
    assert_eq!(fees.len(), 2);
    // A year of 50bp on 10000 is 50.
    assert_close(fees[0].payoff, dec!(50));
    assert_eq!(fees[0].state.fee_accrued, Decimal::ZERO);
}

#[test]
fn scaling_rescales_interest_payments() {
    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2022, 1, 1))
        .notional(dec!(1000))
        .nominal_rate(dec!(0.04))
        .interest_cycle("1Y+".parse().unwrap())
        .scaling_cycle("1Y+".parse().unwrap())
        .scaling_effect("I00".parse().unwrap())
        .scaling_market_object("CPI")
        .scaling_index_base(dec!(100))
        .build()
        .unwrap();

    // Index at 110 against a base of 100: interest scales by 1.1.
    let events =
        ContractEngine::evaluate(&[], &attributes, &ConstantOracle::new(dec!(110))).unwrap();

    let coupons: Vec<_> = events
        .iter()
        .filter(|e| e.event_type == EventType::InterestPayment)
        .collect();
    assert_eq!(coupons.len(), 2);

    // The first coupon date coincides with the first scaling event, but
    // interest pays before scaling applies on that date.
    let scaled = coupons[1];
    assert!(scaled.state.interest_scaling == dec!(1.1));
    assert_close(scaled.payoff, dec!(1.1) * dec!(1000) * dec!(0.04));
}

// ===========================================================================
// Failure modes
// ===========================================================================

#[test]
fn reset_without_market_object_fails_at_build() {
    let result = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2023, 1, 1))
        .notional(dec!(1000))
        .rate_reset_cycle("1Y+".parse().unwrap())
        .build();
    assert!(matches!(result, Err(EngineError::MissingAttribute { .. })));
}

#[test]
fn failing_oracle_aborts_evaluation() {
    struct FailingOracle;
    impl RiskFactorOracle for FailingOracle {
        fn state_at(
            &self,
            id: &str,
            _date: Date,
            _state: &StateRecord,
            _attributes: &ContractAttributes,
        ) -> EngineResult<Decimal> {
            Err(EngineError::risk_factor(id, "no data"))
        }
    }

    let attributes = ContractAttributes::builder()
        .contract_type(ContractType::PrincipalAtMaturity)
        .initial_exchange_date(date(2020, 1, 1))
        .maturity_date(date(2023, 1, 1))
        .notional(dec!(1000))
        .rate_reset_cycle("1Y+".parse().unwrap())
        .rate_reset_market_object("DEAD-INDEX")
        .build()
        .unwrap();

    let result = ContractEngine::evaluate(&[], &attributes, &FailingOracle);
    assert!(matches!(result, Err(EngineError::RiskFactor { .. })));
}
