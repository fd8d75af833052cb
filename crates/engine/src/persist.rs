//! Persistence adapter: maps session state to and from the store's string
//! key space.
//!
//! The adapter is a stateless translator. It owns the key names and the
//! serialization format (JSON-encoded numbers); nothing else in the engine
//! knows either. Both directions go through one batched store call.

use crate::{
    Configuration, ExpenseStore, Money, ResultEngine, RunningTotals,
};

/// Fixed logical key names. Absence of a key is equivalent to the value 0.
pub(crate) mod keys {
    pub const MONTHLY_INCOME: &str = "monthlyIncome";
    pub const DAILY_BUDGET: &str = "dailyBudget";
    pub const TOTAL_SPENT: &str = "totalSpent";
    pub const XP: &str = "xp";
    pub const ALL: [&str; 4] = [MONTHLY_INCOME, DAILY_BUDGET, TOTAL_SPENT, XP];
}

/// What a load recovers from the store.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PersistedState {
    /// `Some` only when income and budget were both persisted as positive
    /// numbers; partial or invalid configuration means onboarding must run
    /// again (the totals are still recovered).
    pub configuration: Option<Configuration>,
    pub totals: RunningTotals,
}

/// Reads the full key set in one batched call.
///
/// Missing, unparseable or non-positive configuration values are "unset",
/// not errors. Totals are floored at their domain minimum of 0.
pub async fn load(store: &dyn ExpenseStore) -> ResultEngine<PersistedState> {
    let entries = store.multi_get(&keys::ALL).await?;

    let mut income = 0;
    let mut budget = 0;
    let mut spent = 0;
    let mut xp = 0;
    for (key, value) in entries {
        let number = decode(value.as_deref());
        match key.as_str() {
            keys::MONTHLY_INCOME => income = number,
            keys::DAILY_BUDGET => budget = number,
            keys::TOTAL_SPENT => spent = number,
            keys::XP => xp = number,
            _ => {}
        }
    }

    let configuration = Configuration::new(Money::new(income), Money::new(budget)).ok();
    let totals = RunningTotals {
        total_spent: Money::new(spent.max(0)),
        xp: xp.max(0),
    };

    Ok(PersistedState {
        configuration,
        totals,
    })
}

/// Writes the full key set back in one batched call.
///
/// Always a complete snapshot of all four keys, never an incremental delta,
/// so consecutive saves have no ordering dependency between them.
pub async fn save(
    store: &dyn ExpenseStore,
    configuration: &Configuration,
    totals: &RunningTotals,
) -> ResultEngine<()> {
    store
        .multi_set(vec![
            pair(keys::MONTHLY_INCOME, configuration.monthly_income()),
            pair(keys::DAILY_BUDGET, configuration.daily_budget()),
            pair(keys::TOTAL_SPENT, totals.total_spent),
            (keys::XP.to_string(), encode(totals.xp)),
        ])
        .await?;
    Ok(())
}

fn pair(key: &str, amount: Money) -> (String, String) {
    (key.to_string(), encode(amount.units()))
}

fn encode(value: i64) -> String {
    serde_json::Number::from(value).to_string()
}

fn decode(raw: Option<&str>) -> i64 {
    raw.and_then(|value| serde_json::from_str::<i64>(value).ok())
        .unwrap_or(0)
}
