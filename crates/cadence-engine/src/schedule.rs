//! Cycle-based schedule generation with stub and end-of-month handling.
//!
//! A schedule is an ordered set of dates: duplicates collapse, and the end
//! date is always a member. Generation steps linearly from the anchor
//! (`anchor + n * cycle`), applies the end-of-month adjuster to every
//! generated term (never to the anchor or the end), and then applies the
//! stub rule to the trailing partial period.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use cadence_core::types::{Cycle, Date, StubConvention};

use crate::error::{EngineError, EngineResult};

/// End-of-month convention for month-based cycles.
///
/// Decides whether monthly schedule dates generated from a month-end
/// anchor stick to month-ends or keep the anchor's day of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EndOfMonthConvention {
    /// Generated dates keep the anchor's day of month (clipped by shorter
    /// months).
    #[default]
    SameDay,
    /// Generated dates snap to the last day of their month, provided the
    /// anchor itself is a month-end and the cycle is month-based.
    EndOfMonth,
}

impl FromStr for EndOfMonthConvention {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SD" | "SAMEDAY" => Ok(EndOfMonthConvention::SameDay),
            "EOM" | "ENDOFMONTH" => Ok(EndOfMonthConvention::EndOfMonth),
            _ => Err(EngineError::config(format!(
                "unknown end-of-month convention '{s}'"
            ))),
        }
    }
}

/// The end-of-month adjuster, decided once per schedule.
///
/// Snapping applies only when all three conditions hold: the convention is
/// end-of-month, the reference (anchor) date is the last day of its month,
/// and the cycle is month-based. Quarter, half-year, and year cycles count
/// as month-based since they normalize to month multiples.
#[derive(Debug, Clone, Copy)]
pub struct EndOfMonthAdjuster {
    active: bool,
}

impl EndOfMonthAdjuster {
    /// Decides the adjuster for a schedule's anchor and cycle.
    #[must_use]
    pub fn new(convention: EndOfMonthConvention, reference: Date, cycle: &Cycle) -> Self {
        Self {
            active: convention == EndOfMonthConvention::EndOfMonth
                && reference.is_end_of_month()
                && cycle.is_month_based(),
        }
    }

    /// Returns true if dates snap to month-end.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Applies the adjuster to a generated date.
    #[must_use]
    pub fn shift(&self, date: Date) -> Date {
        if self.active {
            date.end_of_month()
        } else {
            date
        }
    }
}

/// Generates a schedule from an anchor to an end date.
///
/// - Without a cycle the schedule is `{anchor, end}` (just `{end}` when
///   the anchor is absent, as for child sub-schedules).
/// - With a cycle, terms step linearly from the anchor while strictly
///   before `end`; the end date is always included. Under a long stub the
///   last regular term is removed when the final period is partial,
///   merging it into the preceding full cycle.
///
/// # Errors
///
/// Returns a configuration error when a cycle is given without an anchor
/// or when the end date precedes the anchor.
pub fn generate(
    anchor: Option<Date>,
    end: Date,
    cycle: Option<&Cycle>,
    eom: EndOfMonthConvention,
) -> EngineResult<BTreeSet<Date>> {
    let mut dates = BTreeSet::new();

    let Some(cycle) = cycle else {
        if let Some(anchor) = anchor {
            dates.insert(anchor);
        }
        dates.insert(end);
        return Ok(dates);
    };

    let anchor = anchor.ok_or_else(|| {
        EngineError::config("a cyclic schedule requires an anchor date")
    })?;
    if end < anchor {
        return Err(EngineError::config(format!(
            "schedule end {end} precedes anchor {anchor}"
        )));
    }

    let adjuster = EndOfMonthAdjuster::new(eom, anchor, cycle);

    // Regular terms: anchor + n * cycle, strictly before the end date.
    let mut regular = vec![anchor];
    let mut n: u32 = 1;
    let next_after_last = loop {
        let raw = cycle.advance(anchor, n)?;
        if raw >= end {
            break raw;
        }
        let shifted = adjuster.shift(raw);
        if shifted < end {
            regular.push(shifted);
        }
        n += 1;
    };

    // The final period is partial unless the next step lands exactly on
    // the end date. Only a partial period has a stub to merge.
    let divides_evenly =
        next_after_last == end || adjuster.shift(next_after_last) == end;
    if cycle.stub() == StubConvention::Long && !divides_evenly && regular.len() >= 2 {
        regular.pop();
    }

    dates.extend(regular);
    dates.insert(end);
    Ok(dates)
}

/// Generates a composite schedule from parallel arrays of segment anchors
/// and cycles.
///
/// Each segment runs from its anchor to the next segment's anchor; the
/// final segment's cycle runs to the overall end date. The sub-schedules
/// union under set semantics. Used when a contract's periodicity changes
/// at fixed dates.
///
/// # Errors
///
/// Returns a configuration error when the arrays are empty or their
/// lengths differ.
pub fn generate_composite(
    anchors: &[Date],
    cycles: &[Cycle],
    end: Date,
    eom: EndOfMonthConvention,
) -> EngineResult<BTreeSet<Date>> {
    if anchors.is_empty() || anchors.len() != cycles.len() {
        return Err(EngineError::config(format!(
            "composite schedule needs matching anchors and cycles, got {} and {}",
            anchors.len(),
            cycles.len()
        )));
    }

    let mut dates = BTreeSet::new();
    for (i, (anchor, cycle)) in anchors.iter().zip(cycles.iter()).enumerate() {
        let segment_end = anchors.get(i + 1).copied().unwrap_or(end);
        let segment = generate(Some(*anchor), segment_end, Some(cycle), eom)?;
        dates.extend(segment);
    }
    Ok(dates)
}
