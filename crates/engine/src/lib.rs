//! State-and-persistence engine of the Chip expense companion.
//!
//! A [`Session`] owns the user's configuration and running totals, turns
//! each logged expense into updated totals, XP, level and feedback through
//! pure functions, and keeps that state durable through a key-value
//! [`ExpenseStore`]. The presentation layer renders [`Session::snapshot`]
//! and calls the two commands, [`Session::complete_onboarding`] and
//! [`Session::log_expense`].

use std::sync::Arc;

use tokio::task::JoinSet;

pub use budget::{BudgetProgress, budget_progress};
pub use categories::ExpenseCategory;
pub use error::EngineError;
pub use expense::{Expense, apply_expense};
pub use leveling::{Level, LevelPolicy, Tier, level_for};
pub use money::Money;
pub use persist::PersistedState;
pub use rules::Rules;
pub use state::{Configuration, RunningTotals, Snapshot};
pub use store::{ExpenseStore, MemoryStore, StoreError};

mod budget;
mod categories;
mod error;
mod expense;
mod leveling;
mod money;
pub mod persist;
mod rules;
mod state;
mod store;

pub type ResultEngine<T> = Result<T, EngineError>;

/// What a successful expense log reports back to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct LogOutcome {
    pub xp_delta: i64,
    /// The honesty bonus included in `xp_delta` (0 when not granted).
    pub honesty_bonus: i64,
    pub feedback: String,
}

/// The process-wide session: configuration, running totals, the most recent
/// expense, and the store handle.
///
/// All domain mutation is single-threaded by construction: the session is
/// exclusively owned, operations run synchronously, and the only
/// asynchronous boundary is store I/O. The startup load is awaited inside
/// [`SessionBuilder::build`], so a session that exists is always ready.
/// Saves are spawned fire-and-forget after each domain event; their results
/// are observed only for logging, which keeps the in-memory state
/// authoritative for the whole process lifetime.
pub struct Session {
    store: Arc<dyn ExpenseStore>,
    rules: Rules,
    configuration: Option<Configuration>,
    totals: RunningTotals,
    last_expense: Option<Expense>,
    feedback: String,
    saves: JoinSet<()>,
}

impl Session {
    /// Return a builder for `Session`. Help to build the struct.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Returns `true` once a valid configuration is in place.
    pub fn is_onboarded(&self) -> bool {
        self.configuration.is_some()
    }

    pub fn configuration(&self) -> Option<Configuration> {
        self.configuration
    }

    pub fn totals(&self) -> RunningTotals {
        self.totals
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Stores the onboarding configuration and schedules a save.
    ///
    /// Income and budget must both be positive; otherwise a validation
    /// error is returned and the configuration stays unset.
    pub fn complete_onboarding(
        &mut self,
        monthly_income: Money,
        daily_budget: Money,
    ) -> ResultEngine<()> {
        let configuration = Configuration::new(monthly_income, daily_budget)?;
        self.configuration = Some(configuration);
        self.schedule_save();
        Ok(())
    }

    /// Logs one expense: validates the input, applies the XP and totals
    /// transition, retains the entry as the most recent one and schedules a
    /// save.
    ///
    /// Rejected with a validation error while onboarding is incomplete.
    pub fn log_expense(
        &mut self,
        amount: Money,
        description: &str,
        category: ExpenseCategory,
    ) -> ResultEngine<LogOutcome> {
        if self.configuration.is_none() {
            return Err(EngineError::OnboardingRequired(
                "complete onboarding before logging expenses".to_string(),
            ));
        }

        let (totals, expense) =
            expense::apply_expense(self.totals, &self.rules, amount, description, category)?;
        self.totals = totals;
        self.feedback = self.rules.feedback(category).to_string();
        let outcome = LogOutcome {
            xp_delta: expense.xp_delta,
            honesty_bonus: self.rules.honesty_bonus(category),
            feedback: self.feedback.clone(),
        };
        self.last_expense = Some(expense);
        self.schedule_save();

        Ok(outcome)
    }

    /// Read-only projection of the current state, available in any phase.
    pub fn snapshot(&self) -> Snapshot {
        let daily_budget = self
            .configuration
            .map(Configuration::daily_budget)
            .unwrap_or(Money::ZERO);

        Snapshot {
            onboarded: self.configuration.is_some(),
            total_spent: self.totals.total_spent,
            xp: self.totals.xp,
            level: leveling::level_for(self.totals.xp, &self.rules.level_policy),
            budget: budget::budget_progress(daily_budget, self.totals.total_spent),
            last_expense: self.last_expense.clone(),
            feedback: self.feedback.clone(),
        }
    }

    /// Waits for every in-flight save to finish.
    ///
    /// Saves never roll back or reorder in-memory state; flushing only
    /// matters for durability before the process exits.
    pub async fn flush(&mut self) {
        while self.saves.join_next().await.is_some() {}
    }

    /// Drains pending saves and discards the session.
    pub async fn shutdown(mut self) {
        self.flush().await;
    }

    /// Spawns a complete-snapshot write of the current state.
    ///
    /// State is persisted only once onboarding has completed; before that
    /// there is nothing durable to write. A failed save is logged and
    /// dropped: the in-memory state stays correct for this process, only
    /// durability across restarts degrades.
    fn schedule_save(&mut self) {
        let Some(configuration) = self.configuration else {
            return;
        };
        let store = Arc::clone(&self.store);
        let totals = self.totals;
        self.saves.spawn(async move {
            if let Err(err) = persist::save(store.as_ref(), &configuration, &totals).await {
                tracing::warn!("failed to persist session state: {err}");
            }
        });
    }
}

/// The builder for `Session`.
#[derive(Default)]
pub struct SessionBuilder {
    store: Option<Arc<dyn ExpenseStore>>,
    rules: Rules,
}

impl SessionBuilder {
    /// Pass the durable store. Sessions built without one fall back to an
    /// in-memory store and lose their state on exit.
    pub fn store(mut self, store: impl ExpenseStore + 'static) -> SessionBuilder {
        self.store = Some(Arc::new(store));
        self
    }

    /// Pass an already shared store handle.
    pub fn shared_store(mut self, store: Arc<dyn ExpenseStore>) -> SessionBuilder {
        self.store = Some(store);
        self
    }

    /// Override the behavior table.
    pub fn rules(mut self, rules: Rules) -> SessionBuilder {
        self.rules = rules;
        self
    }

    /// Construct `Session`, awaiting the startup load.
    ///
    /// A store read failure does not propagate: the session degrades to
    /// default zero/unset state and proceeds as a first run, with the
    /// failure logged.
    pub async fn build(self) -> Session {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn ExpenseStore>);

        let persisted = match persist::load(store.as_ref()).await {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!("failed to load persisted state, starting fresh: {err}");
                PersistedState::default()
            }
        };

        Session {
            store,
            feedback: self.rules.initial_phrase.clone(),
            rules: self.rules,
            configuration: persisted.configuration,
            totals: persisted.totals,
            last_expense: None,
            saves: JoinSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// Store double whose every operation fails.
    #[derive(Clone, Debug)]
    struct BrokenStore;

    #[async_trait]
    impl ExpenseStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disk on fire".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn fresh_session_demands_onboarding() {
        let mut session = Session::builder().build().await;

        assert!(!session.is_onboarded());
        let err = session
            .log_expense(Money::new(3000), "snack", ExpenseCategory::Want)
            .unwrap_err();
        assert!(matches!(err, EngineError::OnboardingRequired(_)));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.feedback, Rules::default().initial_phrase);
        assert_eq!(snapshot.total_spent, Money::ZERO);
    }

    #[tokio::test]
    async fn invalid_onboarding_keeps_the_gate_closed() {
        let mut session = Session::builder().build().await;

        let err = session
            .complete_onboarding(Money::ZERO, Money::new(20_000))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(!session.is_onboarded());
        assert!(
            session
                .log_expense(Money::new(100), "bus", ExpenseCategory::Necessary)
                .is_err()
        );
    }

    #[tokio::test]
    async fn logging_updates_totals_feedback_and_last_expense() {
        let mut session = Session::builder().build().await;
        session
            .complete_onboarding(Money::new(850_000), Money::new(20_000))
            .unwrap();

        let outcome = session
            .log_expense(Money::new(3000), "snack", ExpenseCategory::Want)
            .unwrap();

        assert_eq!(outcome.xp_delta, -10);
        assert_eq!(outcome.honesty_bonus, 10);
        assert_eq!(outcome.feedback, Rules::default().want_phrase);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.total_spent, Money::new(3000));
        // Base -20 floors at 0 before the +10 bonus lands.
        assert_eq!(snapshot.xp, 10);
        assert!((snapshot.budget.percent_raw - 15.0).abs() < 1e-9);
        let last = snapshot.last_expense.unwrap();
        assert_eq!(last.description, "snack");
        assert_eq!(last.xp_delta, -10);
    }

    #[tokio::test]
    async fn crossing_a_level_boundary() {
        let mut session = Session::builder().build().await;
        session
            .complete_onboarding(Money::new(850_000), Money::new(20_000))
            .unwrap();
        session.totals.xp = 95;

        session
            .log_expense(Money::new(1500), "groceries", ExpenseCategory::Necessary)
            .unwrap();

        let level = session.snapshot().level;
        assert_eq!(session.totals().xp, 115);
        assert_eq!(level.index, 2);
        assert_eq!(level.xp_into_level, 15);
        assert_eq!(level.xp_to_next_level, 85);
    }

    #[tokio::test]
    async fn state_survives_a_restart_via_the_store() {
        let store = MemoryStore::new();

        let mut session = Session::builder().store(store.clone()).build().await;
        session
            .complete_onboarding(Money::new(850_000), Money::new(20_000))
            .unwrap();
        session
            .log_expense(Money::new(3000), "snack", ExpenseCategory::Investment)
            .unwrap();
        session.shutdown().await;

        let restarted = Session::builder().store(store).build().await;

        assert!(restarted.is_onboarded());
        assert_eq!(restarted.totals().total_spent, Money::new(3000));
        assert_eq!(restarted.totals().xp, 10);
        // The most recent expense is session-local, not persisted.
        assert!(restarted.snapshot().last_expense.is_none());
    }

    #[tokio::test]
    async fn broken_store_degrades_to_first_run() {
        let mut session = Session::builder().store(BrokenStore).build().await;

        assert!(!session.is_onboarded());
        assert_eq!(session.totals(), RunningTotals::default());

        // Mutations still work; the failed saves are swallowed.
        session
            .complete_onboarding(Money::new(850_000), Money::new(20_000))
            .unwrap();
        let outcome = session
            .log_expense(Money::new(500), "bus", ExpenseCategory::Necessary)
            .unwrap();
        assert_eq!(outcome.xp_delta, 20);
        session.flush().await;
        assert_eq!(session.totals().xp, 20);
    }

    #[tokio::test]
    async fn saves_only_happen_after_onboarding() {
        let store = MemoryStore::new();

        let mut session = Session::builder().store(store.clone()).build().await;
        let _ = session.complete_onboarding(Money::ZERO, Money::new(1));
        session.flush().await;

        assert_eq!(store.get("monthlyIncome").await.unwrap(), None);
    }
}
