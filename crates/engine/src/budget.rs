//! Daily-budget consumption.
//!
//! The daily budget is a static ceiling used for display only: it is never
//! reset on a calendar schedule and never blocks a logging operation.

use serde::Serialize;

use crate::Money;

/// How much of the daily budget the running total has consumed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BudgetProgress {
    /// Budget left before the ceiling, floored at zero.
    pub remaining: Money,
    /// Percentage of the budget spent, uncapped (can exceed 100).
    pub percent_raw: f64,
    /// Percentage capped at 100, for bounded visual fills.
    pub percent_clamped: f64,
}

/// Computes budget consumption from the ceiling and the running total.
///
/// A non-positive `daily_budget` yields 0% rather than a division by zero.
pub fn budget_progress(daily_budget: Money, total_spent: Money) -> BudgetProgress {
    let remaining = (daily_budget - total_spent).max(Money::ZERO);
    let percent_raw = if daily_budget.is_positive() {
        total_spent.units() as f64 / daily_budget.units() as f64 * 100.0
    } else {
        0.0
    };
    let percent_clamped = percent_raw.min(100.0);

    BudgetProgress {
        remaining,
        percent_raw,
        percent_clamped,
    }
}
