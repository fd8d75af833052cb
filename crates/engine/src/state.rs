//! Session-owned domain state: configuration and running totals.

use serde::{Deserialize, Serialize};

use crate::{
    BudgetProgress, EngineError, Expense, Level, Money, ResultEngine,
};

/// The onboarding configuration.
///
/// `monthly_income` is informational only; `daily_budget` is the ceiling the
/// budget percentage is computed against. A `Configuration` can only be
/// constructed with both values positive, so holding one implies a valid
/// onboarding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Configuration {
    monthly_income: Money,
    daily_budget: Money,
}

impl Configuration {
    pub fn new(monthly_income: Money, daily_budget: Money) -> ResultEngine<Self> {
        if !monthly_income.is_positive() {
            return Err(EngineError::InvalidConfiguration(
                "monthly income must be > 0".to_string(),
            ));
        }
        if !daily_budget.is_positive() {
            return Err(EngineError::InvalidConfiguration(
                "daily budget must be > 0".to_string(),
            ));
        }

        Ok(Self {
            monthly_income,
            daily_budget,
        })
    }

    pub fn monthly_income(self) -> Money {
        self.monthly_income
    }

    pub fn daily_budget(self) -> Money {
        self.daily_budget
    }
}

/// Totals mutated on every logged expense.
///
/// `total_spent` only ever grows (there is no delete or edit operation);
/// `xp` is floored at 0 and unbounded upward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningTotals {
    pub total_spent: Money,
    pub xp: i64,
}

/// Read-only projection of the session for the presentation layer.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub onboarded: bool,
    pub total_spent: Money,
    pub xp: i64,
    pub level: Level,
    pub budget: BudgetProgress,
    pub last_expense: Option<Expense>,
    pub feedback: String,
}
