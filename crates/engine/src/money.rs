use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Money amount represented as **whole currency units**.
///
/// Use this type for **all** monetary values in the engine (income, budget,
/// expense amounts, running totals). Amounts carry no minor units: user input
/// is whole pesos, so an `i64` count of units is exact.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(3000);
/// assert_eq!(amount.units(), 3000);
/// assert_eq!(amount.to_string(), "$3.000");
/// ```
///
/// Parsing from user input ignores digit grouping and any currency prefix;
/// everything that is not an ASCII digit is dropped:
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("3000".parse::<Money>().unwrap().units(), 3000);
/// assert_eq!("$3.000".parse::<Money>().unwrap().units(), 3000);
/// assert_eq!("850,000".parse::<Money>().unwrap().units(), 850_000);
/// assert!("snack".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from whole units.
    #[must_use]
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Returns the raw value in whole units.
    #[must_use]
    pub const fn units(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    /// Formats with a `$` prefix and `.` as the thousands separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        write!(f, "{sign}${grouped}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses free-form currency input into whole units.
    ///
    /// Every character that is not an ASCII digit is dropped before parsing,
    /// so `"3000"`, `"$3.000"` and `"3,000"` all yield 3000. Input without
    /// any digit is rejected. The result is always non-negative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(EngineError::InvalidAmount(format!(
                "not a number: {}",
                s.trim()
            )));
        }

        let units: i64 = digits
            .parse()
            .map_err(|_| EngineError::InvalidAmount("amount too large".to_string()))?;

        Ok(Money(units))
    }
}
