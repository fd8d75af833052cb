//! Expense categories.
//!
//! Every logged expense is tagged with exactly one category; the category is
//! what drives the XP delta and the feedback phrase (see [`Rules`]).
//!
//! [`Rules`]: crate::Rules

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Necessary,
    Want,
    Investment,
}

impl ExpenseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Necessary => "necessary",
            Self::Want => "want",
            Self::Investment => "investment",
        }
    }
}

impl TryFrom<&str> for ExpenseCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "necessary" => Ok(Self::Necessary),
            "want" => Ok(Self::Want),
            "investment" => Ok(Self::Investment),
            other => Err(EngineError::InvalidDescription(format!(
                "invalid expense category: {other}"
            ))),
        }
    }
}
