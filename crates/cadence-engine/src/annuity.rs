//! The annuity level-payment recurrence.

use rust_decimal::Decimal;

use cadence_core::daycounts::DayCount;
use cadence_core::types::Date;

/// Computes the level payment that fully amortizes the outstanding balance
/// over the remaining redemption schedule.
///
/// With sorted remaining redemption dates `t_1..t_n` and one-period growth
/// factors `g_i = 1 + rate * fraction(t_i, t_{i+1})`, the payment is
///
/// ```text
/// (outstanding + accrued) * P / (1 + S)
/// ```
///
/// where `P` is the product of all `n-1` growth factors (empty product: 1)
/// and `S` the sum of the suffix products `Π_{j=i..n-1} g_j`. With a
/// single remaining date the payment degenerates to the full outstanding
/// balance plus accrued interest, exactly.
///
/// `remaining` must be sorted ascending and contain only dates strictly
/// after the current status date; the caller filters.
#[must_use]
pub fn annuity_payment(
    outstanding: Decimal,
    accrued: Decimal,
    rate: Decimal,
    remaining: &[Date],
    day_count: &dyn DayCount,
) -> Decimal {
    if remaining.len() <= 1 {
        return outstanding + accrued;
    }

    let factors: Vec<Decimal> = remaining
        .windows(2)
        .map(|pair| Decimal::ONE + rate * day_count.year_fraction(pair[0], pair[1]))
        .collect();

    let product: Decimal = factors.iter().copied().product();

    // Suffix products, accumulated right to left.
    let mut suffix = Decimal::ONE;
    let mut sum = Decimal::ZERO;
    for factor in factors.iter().rev() {
        suffix *= *factor;
        sum += suffix;
    }

    (outstanding + accrued) * product / (Decimal::ONE + sum)
}
