//! Expense entries and the pure state transition for logging one.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ExpenseCategory, Money, ResultEngine, RunningTotals, rules::Rules};

/// A logged expense. Only the most recent one is retained by the session;
/// there is no ledger of past entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub amount: Money,
    pub description: String,
    pub category: ExpenseCategory,
    /// Signed XP change attributed to this entry, computed at logging time
    /// and retained for display.
    pub xp_delta: i64,
}

/// Applies one expense to the running totals.
///
/// Pure: returns the new totals and the expense record, or a validation
/// error with nothing changed. The XP update is a **two-stage clamp**: the
/// base delta is applied and floored at 0 first, then the honesty bonus is
/// added and floored again. The order is observable at `xp = 0` — a large
/// negative base delta is cut off before the bonus lands, so the bonus is
/// never swallowed by the floor. Collapsing the two additions into one
/// would change that boundary behavior.
pub fn apply_expense(
    totals: RunningTotals,
    rules: &Rules,
    amount: Money,
    description: &str,
    category: ExpenseCategory,
) -> ResultEngine<(RunningTotals, Expense)> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "amount must be > 0".to_string(),
        ));
    }
    let description = description.trim();
    if description.is_empty() {
        return Err(EngineError::InvalidDescription(
            "description must not be empty".to_string(),
        ));
    }

    let base = rules.base_delta(category);
    let bonus = rules.honesty_bonus(category);
    let xp_after_base = (totals.xp + base).max(0);
    let xp = (xp_after_base + bonus).max(0);

    let new_totals = RunningTotals {
        total_spent: totals.total_spent + amount,
        xp,
    };
    let expense = Expense {
        amount,
        description: description.to_string(),
        category,
        xp_delta: base + bonus,
    };

    Ok((new_totals, expense))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(total_spent: i64, xp: i64) -> RunningTotals {
        RunningTotals {
            total_spent: Money::new(total_spent),
            xp,
        }
    }

    #[test]
    fn logs_an_indulgent_snack() {
        // Worked example: base -30, bonus +10 => delta -20.
        let rules = Rules {
            want_xp: -30,
            ..Rules::default()
        };

        let (new_totals, expense) = apply_expense(
            totals(0, 100),
            &rules,
            Money::new(3000),
            "snack",
            ExpenseCategory::Want,
        )
        .unwrap();

        assert_eq!(expense.xp_delta, -20);
        assert_eq!(new_totals.total_spent, Money::new(3000));
        assert_eq!(new_totals.xp, 80);
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let rules = Rules::default();
        let before = totals(500, 40);

        let err = apply_expense(before, &rules, Money::ZERO, "bus", ExpenseCategory::Necessary)
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn rejects_blank_descriptions() {
        let rules = Rules::default();

        let err = apply_expense(
            totals(0, 0),
            &rules,
            Money::new(100),
            "   ",
            ExpenseCategory::Necessary,
        )
        .unwrap_err();

        assert_eq!(
            err,
            EngineError::InvalidDescription("description must not be empty".to_string())
        );
    }

    #[test]
    fn trims_the_description() {
        let rules = Rules::default();

        let (_, expense) = apply_expense(
            totals(0, 0),
            &rules,
            Money::new(100),
            "  coffee  ",
            ExpenseCategory::Want,
        )
        .unwrap();

        assert_eq!(expense.description, "coffee");
    }

    #[test]
    fn base_delta_clamps_before_the_bonus_lands() {
        // xp = 5, base -20, bonus +10: the base addition floors at 0 first,
        // then the bonus applies, ending at 10. A single collapsed addition
        // would end at 0 instead.
        let rules = Rules::default();

        let (new_totals, expense) = apply_expense(
            totals(0, 5),
            &rules,
            Money::new(1000),
            "candy",
            ExpenseCategory::Want,
        )
        .unwrap();

        assert_eq!(new_totals.xp, 10);
        // The displayed delta stays the nominal base + bonus.
        assert_eq!(expense.xp_delta, -10);
    }

    #[test]
    fn xp_never_goes_negative() {
        let rules = Rules {
            honesty_bonus: 0,
            ..Rules::default()
        };
        let mut state = totals(0, 15);

        for _ in 0..10 {
            let (next, _) = apply_expense(
                state,
                &rules,
                Money::new(200),
                "sweets",
                ExpenseCategory::Want,
            )
            .unwrap();
            state = next;
            assert!(state.xp >= 0);
        }

        assert_eq!(state.xp, 0);
    }

    #[test]
    fn total_spent_is_the_exact_sum_of_amounts() {
        let rules = Rules::default();
        let amounts = [1200, 350, 99, 40_000, 1];
        let mut state = totals(0, 0);

        for amount in amounts {
            let (next, _) = apply_expense(
                state,
                &rules,
                Money::new(amount),
                "entry",
                ExpenseCategory::Necessary,
            )
            .unwrap();
            state = next;
        }

        assert_eq!(state.total_spent.units(), amounts.iter().sum::<i64>());
    }
}
