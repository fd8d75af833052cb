//! Level derivation from accumulated XP.
//!
//! Two policies exist and are selected by configuration, never mixed:
//!
//! - [`LevelPolicy::Modulo`] (default): unbounded numeric progression where
//!   every level spans the same amount of XP.
//! - [`LevelPolicy::Tiers`]: a small table of named XP bands. XP past the
//!   table does not dead-end: the level is synthesized numerically with the
//!   modulo formula, so progression stays unbounded either way.
//!
//! For any `xp >= 0` exactly one level is current.

use serde::{Deserialize, Serialize};

/// A named XP band with an inclusive `[min, max]` range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    pub min: i64,
    pub max: i64,
}

impl Tier {
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    fn contains(&self, xp: i64) -> bool {
        xp >= self.min && xp <= self.max
    }
}

/// How XP maps to a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LevelPolicy {
    /// Unbounded progression: level `N = xp / xp_per_level + 1`.
    Modulo { xp_per_level: i64 },
    /// Named tiers; XP beyond (or between) the bands falls back to the
    /// numeric modulo tier computed with `overflow_xp_per_level`.
    Tiers {
        tiers: Vec<Tier>,
        overflow_xp_per_level: i64,
    },
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::Modulo { xp_per_level: 100 }
    }
}

impl LevelPolicy {
    /// The classic three-tier table with numeric overflow levels.
    pub fn bounded_tiers() -> Self {
        Self::Tiers {
            tiers: vec![
                Tier::new("Iron", 0, 100),
                Tier::new("Bronze", 101, 300),
                Tier::new("Silver", 301, 600),
            ],
            overflow_xp_per_level: 100,
        }
    }
}

/// The level currently occupied by an XP total.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Level {
    pub name: String,
    /// 1-based position in the progression.
    pub index: i64,
    pub xp_into_level: i64,
    pub xp_to_next_level: i64,
    /// Fraction of the level already covered, in `[0, 1]`.
    pub progress: f64,
}

/// Maps an XP total onto its level under the given policy.
///
/// Total over all `xp >= 0`: every value lands in exactly one level, with no
/// gap or overlap at band boundaries.
pub fn level_for(xp: i64, policy: &LevelPolicy) -> Level {
    match policy {
        LevelPolicy::Modulo { xp_per_level } => modulo_level(xp, *xp_per_level),
        LevelPolicy::Tiers {
            tiers,
            overflow_xp_per_level,
        } => match tiers.iter().position(|tier| tier.contains(xp)) {
            Some(position) => tier_level(xp, tiers, position),
            None => modulo_level(xp, *overflow_xp_per_level),
        },
    }
}

fn modulo_level(xp: i64, xp_per_level: i64) -> Level {
    let per = xp_per_level.max(1);
    let index = xp / per + 1;
    // xp >= 0 is already guaranteed; rem_euclid keeps the remainder
    // non-negative regardless.
    let xp_into_level = xp.rem_euclid(per);
    let xp_to_next_level = per - xp_into_level;
    let progress = (xp_into_level as f64 / per as f64).clamp(0.0, 1.0);

    Level {
        name: format!("Level {index}"),
        index,
        xp_into_level,
        xp_to_next_level,
        progress,
    }
}

fn tier_level(xp: i64, tiers: &[Tier], position: usize) -> Level {
    let tier = &tiers[position];
    let range = (tier.max - tier.min).max(1);
    let xp_into_level = (xp.min(tier.max) - tier.min).max(0);
    let xp_to_next_level = match tiers.get(position + 1) {
        Some(next) => (next.min - xp).max(0),
        None => 0,
    };
    let progress = (xp_into_level as f64 / range as f64).clamp(0.0, 1.0);

    Level {
        name: tier.name.clone(),
        index: position as i64 + 1,
        xp_into_level,
        xp_to_next_level,
        progress,
    }
}
