//! Timeline construction and the contract state fold.
//!
//! Evaluation splits in two risk-separated halves:
//!
//! 1. [`ContractEngine::initialize`] builds one schedule per lifecycle
//!    purpose the attributes call for, tags every date with its event kind
//!    and business-day-shifted event/calculation times, and merges them
//!    into one deterministically ordered [`Timeline`]. This half never
//!    touches the risk factor oracle and is cacheable across scenarios.
//! 2. [`ContractEngine::evaluate_timeline`] folds the ordered timeline
//!    through the payoff/state-transition pairs under a particular oracle,
//!    producing the final event list.

use serde::{Deserialize, Serialize};
use tracing::debug;

use cadence_core::types::{Date, EventType};

use crate::attributes::ContractAttributes;
use crate::error::{EngineError, EngineResult};
use crate::event::ContractEvent;
use crate::functions::{self, EvalContext};
use crate::oracle::RiskFactorOracle;
use crate::schedule;
use crate::state::StateRecord;

/// A scheduled event before evaluation: times and kind, no payoff yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEvent {
    /// The (business-day adjusted) date the event takes effect.
    pub event_time: Date,
    /// The date payoff and state calculations will see.
    pub calc_time: Date,
    /// The event kind.
    pub event_type: EventType,
}

/// The risk-factor-independent event timeline of a contract.
///
/// Ordered by `(event time, event kind sequence)`. Build once, evaluate
/// under as many risk factor scenarios as needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    events: Vec<PendingEvent>,
    redemption_dates: Vec<Date>,
}

impl Timeline {
    /// Returns the ordered pending events.
    #[must_use]
    pub fn events(&self) -> &[PendingEvent] {
        &self.events
    }

    /// Returns the sorted calculation times of all principal redemption
    /// events plus maturity.
    #[must_use]
    pub fn redemption_dates(&self) -> &[Date] {
        &self.redemption_dates
    }
}

/// The contract lifecycle evaluation engine.
pub struct ContractEngine;

impl ContractEngine {
    /// Builds the ordered event timeline for a contract.
    ///
    /// A schedule is generated per lifecycle purpose only when its
    /// governing attributes are present: no fee cycle, no fee events.
    /// Events before the status date and after maturity or termination
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns configuration or missing-attribute errors; no events are
    /// produced on failure.
    pub fn initialize(
        analysis_times: &[Date],
        attributes: &ContractAttributes,
    ) -> EngineResult<Timeline> {
        let maturity = attributes
            .maturity_date
            .ok_or_else(|| EngineError::missing_attribute("maturity date"))?;
        let ied = attributes.initial_exchange_date;
        let adjuster = &attributes.business_day;
        let eom = attributes.end_of_month;

        let adjusted = |event_type: EventType, date: Date| PendingEvent {
            event_time: adjuster.shift_event_time(date),
            calc_time: adjuster.shift_calc_time(date),
            event_type,
        };
        let literal = |event_type: EventType, date: Date| PendingEvent {
            event_time: date,
            calc_time: date,
            event_type,
        };

        let mut pending = vec![literal(EventType::InitialExchange, ied)];

        // Interest payments, switching to capitalization inside the
        // capitalization period. The default anchor is one cycle into the
        // contract; an explicit anchor is itself a coupon date.
        if let Some(cycle) = attributes.interest_cycle.as_ref() {
            let anchor = match attributes.interest_anchor {
                Some(anchor) => anchor,
                None => cycle.advance(ied, 1)?,
            };
            for date in schedule::generate(Some(anchor), maturity, Some(cycle), eom)? {
                let kind = match attributes.capitalization_end {
                    Some(cap_end) if date <= cap_end => EventType::InterestCapitalization,
                    _ => EventType::InterestPayment,
                };
                pending.push(adjusted(kind, date));
            }
        }

        // Fees are scheduled only when both a cycle and a rate are set.
        if let (Some(cycle), Some(_)) = (attributes.fee_cycle.as_ref(), attributes.fee_rate) {
            let anchor = match attributes.fee_anchor {
                Some(anchor) => anchor,
                None => cycle.advance(ied, 1)?,
            };
            for date in schedule::generate(Some(anchor), maturity, Some(cycle), eom)? {
                pending.push(adjusted(EventType::FeePayment, date));
            }
        }

        // Rate resets; the first becomes a fixed reset when the next reset
        // rate is known in advance.
        if let Some(cycle) = attributes.rate_reset_cycle.as_ref() {
            let anchor = match attributes.rate_reset_anchor {
                Some(anchor) => anchor,
                None => cycle.advance(ied, 1)?,
            };
            let mut first = true;
            for date in schedule::generate(Some(anchor), maturity, Some(cycle), eom)? {
                if date >= maturity {
                    continue;
                }
                let kind = if first && attributes.next_reset_rate.is_some() {
                    EventType::RateResetFixed
                } else {
                    EventType::RateResetVariable
                };
                first = false;
                pending.push(adjusted(kind, date));
            }
        }

        // Scaling events.
        if let Some(cycle) = attributes.scaling_cycle.as_ref() {
            if attributes.scaling_effect.is_active() {
                let anchor = match attributes.scaling_anchor {
                    Some(anchor) => anchor,
                    None => cycle.advance(ied, 1)?,
                };
                for date in schedule::generate(Some(anchor), maturity, Some(cycle), eom)? {
                    pending.push(adjusted(EventType::Scaling, date));
                }
            }
        }

        // Principal redemption for amortizing contract types. The
        // redemption at maturity itself is the maturity event's business.
        if attributes.contract_type.is_amortizing() {
            let cycle = attributes
                .redemption_cycle
                .as_ref()
                .ok_or_else(|| EngineError::missing_attribute("cycle of principal redemption"))?;
            let anchor = match attributes.redemption_anchor {
                Some(anchor) => anchor,
                None => cycle.advance(ied, 1)?,
            };
            for date in schedule::generate(Some(anchor), maturity, Some(cycle), eom)? {
                if date >= maturity {
                    continue;
                }
                pending.push(adjusted(EventType::PrincipalRedemption, date));
            }
        }

        if let Some(date) = attributes.purchase_date {
            pending.push(literal(EventType::Purchase, date));
        }
        if let Some(date) = attributes.termination_date {
            pending.push(literal(EventType::Termination, date));
        }

        pending.push(adjusted(EventType::Maturity, maturity));

        for &time in analysis_times {
            if time >= attributes.status_date && time <= maturity {
                pending.push(literal(EventType::AnalysisPoint, time));
            }
        }

        // The annuity recurrence needs the full remaining redemption
        // schedule, including the final redemption at maturity.
        let mut redemption_dates: Vec<Date> = pending
            .iter()
            .filter(|e| e.event_type == EventType::PrincipalRedemption)
            .map(|e| e.calc_time)
            .collect();
        redemption_dates.push(adjuster.shift_calc_time(maturity));
        redemption_dates.sort_unstable();
        redemption_dates.dedup();

        // History before the status date is not replayed, and nothing
        // happens past termination.
        pending.retain(|e| e.event_time >= attributes.status_date);
        if let Some(termination) = attributes.termination_date {
            pending.retain(|e| e.event_time <= termination);
        }

        pending.sort_by_key(|e| (e.event_time, e.event_type.sequence()));
        pending.dedup_by_key(|e| (e.event_time, e.event_type));

        debug!(
            "initialized timeline for contract '{}': {} events",
            attributes.contract_id,
            pending.len()
        );

        Ok(Timeline {
            events: pending,
            redemption_dates,
        })
    }

    /// Folds a timeline through the payoff/state-transition pairs under
    /// the given risk factor oracle.
    ///
    /// Each event's payoff is evaluated against the pre-transition state;
    /// the transition then derives the next state, and the completed event
    /// embeds its snapshot.
    ///
    /// # Errors
    ///
    /// Propagates oracle failures and unresolvable event kinds; the whole
    /// evaluation aborts on the first failure.
    pub fn evaluate_timeline(
        timeline: &Timeline,
        attributes: &ContractAttributes,
        oracle: &dyn RiskFactorOracle,
    ) -> EngineResult<Vec<ContractEvent>> {
        let day_count = attributes
            .day_count
            .to_day_count(attributes.maturity_date, Some(attributes.calendar.to_calendar()));
        let ctx = EvalContext {
            attributes,
            oracle,
            day_count: day_count.as_ref(),
            adjuster: &attributes.business_day,
            redemption_dates: timeline.redemption_dates(),
        };

        let mut state = StateRecord::at_status_date(attributes);
        let mut events = Vec::with_capacity(timeline.events().len());

        for pending in timeline.events() {
            let (payoff_fn, transition_fn) =
                functions::resolve(attributes.contract_type, pending.event_type)?;

            let payoff = payoff_fn(&ctx, &state, pending.calc_time)?;
            transition_fn(&ctx, &mut state, pending.calc_time)?;

            events.push(ContractEvent {
                event_time: pending.event_time,
                calc_time: pending.calc_time,
                event_type: pending.event_type,
                payoff,
                currency: attributes.currency.clone(),
                state: state.clone(),
            });
        }

        debug!(
            "evaluated contract '{}': {} events",
            attributes.contract_id,
            events.len()
        );
        Ok(events)
    }

    /// Builds the timeline and evaluates it in one call.
    ///
    /// # Errors
    ///
    /// See [`initialize`](Self::initialize) and
    /// [`evaluate_timeline`](Self::evaluate_timeline).
    pub fn evaluate(
        analysis_times: &[Date],
        attributes: &ContractAttributes,
        oracle: &dyn RiskFactorOracle,
    ) -> EngineResult<Vec<ContractEvent>> {
        let timeline = Self::initialize(analysis_times, attributes)?;
        Self::evaluate_timeline(&timeline, attributes, oracle)
    }
}
