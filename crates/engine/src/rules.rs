//! The behavior table of the game.
//!
//! Iterations of the app shipped with shifting reward constants, tier
//! boundaries and bonus values. All of that lives here as data: a single
//! [`Rules`] value fully determines XP deltas, the honesty bonus, the
//! feedback phrases and the leveling policy. Behavior differences between
//! variants are configuration, not code branches.

use serde::{Deserialize, Serialize};

use crate::{ExpenseCategory, LevelPolicy};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rules {
    /// Base XP delta per category.
    pub necessary_xp: i64,
    pub want_xp: i64,
    pub investment_xp: i64,
    /// Fixed bonus for honestly logging an indulgent purchase. Granted on
    /// top of the (negative) base delta, and only for `honesty_category`.
    pub honesty_bonus: i64,
    pub honesty_category: ExpenseCategory,
    pub level_policy: LevelPolicy,
    /// Feedback phrase per category ("Chip says ...").
    pub necessary_phrase: String,
    pub want_phrase: String,
    pub investment_phrase: String,
    /// Phrase shown before any expense has been logged.
    pub initial_phrase: String,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            necessary_xp: 20,
            want_xp: -20,
            investment_xp: 10,
            honesty_bonus: 10,
            honesty_category: ExpenseCategory::Want,
            level_policy: LevelPolicy::default(),
            necessary_phrase: "Well done! Now that's putting money to good use.".to_string(),
            want_phrase: "Seriously? Another treat? Your wallet is crying!".to_string(),
            investment_phrase: "Good move! Thinking ahead counts too.".to_string(),
            initial_phrase: "Log your first expense to see how today is going.".to_string(),
        }
    }
}

impl Rules {
    /// Base XP delta for a category, bonus excluded.
    pub fn base_delta(&self, category: ExpenseCategory) -> i64 {
        match category {
            ExpenseCategory::Necessary => self.necessary_xp,
            ExpenseCategory::Want => self.want_xp,
            ExpenseCategory::Investment => self.investment_xp,
        }
    }

    /// The honesty bonus for a category: the configured value for the gated
    /// category, 0 for every other one.
    pub fn honesty_bonus(&self, category: ExpenseCategory) -> i64 {
        if category == self.honesty_category {
            self.honesty_bonus
        } else {
            0
        }
    }

    /// The signed XP change attributed to logging one expense of this
    /// category (base delta plus honesty bonus where applicable).
    pub fn xp_delta(&self, category: ExpenseCategory) -> i64 {
        self.base_delta(category) + self.honesty_bonus(category)
    }

    /// Feedback phrase for a category.
    pub fn feedback(&self, category: ExpenseCategory) -> &str {
        match category {
            ExpenseCategory::Necessary => &self.necessary_phrase,
            ExpenseCategory::Want => &self.want_phrase,
            ExpenseCategory::Investment => &self.investment_phrase,
        }
    }
}
