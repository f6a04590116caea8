//! # XP Budgets
//!
//! Per-level XP budgets, challenge-rating-to-XP conversion and tier ceilings.

use super::ChallengeRating;
use crate::config::{MAX_PLAYER_LEVEL, MIN_PLAYER_LEVEL};
use crate::{WayfarerError, WayfarerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encounter difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Low,
    Moderate,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Moderate, Difficulty::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Low => "low",
            Difficulty::Moderate => "moderate",
            Difficulty::High => "high",
        }
    }

    fn column(self) -> usize {
        match self {
            Difficulty::Low => 0,
            Difficulty::Moderate => 1,
            Difficulty::High => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = WayfarerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Difficulty::Low),
            "moderate" => Ok(Difficulty::Moderate),
            "high" => Ok(Difficulty::High),
            _ => Err(WayfarerError::InvalidParameter(format!(
                "Invalid difficulty: {}. Must be 'low', 'moderate', or 'high'.",
                s
            ))),
        }
    }
}

/// XP budgets indexed by `level - 1`, columns low/moderate/high.
const XP_BUDGETS: [[u32; 3]; 20] = [
    [50, 75, 100],
    [100, 150, 200],
    [150, 225, 400],
    [250, 375, 500],
    [500, 750, 1100],
    [600, 1000, 1400],
    [750, 1300, 1700],
    [900, 1600, 2100],
    [1100, 1900, 2600],
    [1300, 2300, 3100],
    [1600, 2700, 3700],
    [1900, 3200, 4300],
    [2200, 3700, 5000],
    [2600, 4300, 5800],
    [3000, 5000, 6700],
    [3500, 5800, 7800],
    [4000, 6700, 9000],
    [4700, 7800, 10500],
    [5400, 9000, 12100],
    [6300, 10500, 14100],
];

/// XP for ratings below 1, as (numerator, denominator, xp).
const FRACTIONAL_XP: [(u32, u32, u32); 3] = [(1, 8, 25), (1, 4, 50), (1, 2, 100)];

/// XP for whole ratings 0 through 30, indexed by rating.
const WHOLE_XP: [u32; 31] = [
    10, 200, 450, 700, 1100, 1800, 2300, 2900, 3900, 5000, 5900, 7200, 8400, 10000, 11500, 13000,
    15000, 18000, 20000, 22000, 25000, 33000, 41000, 50000, 62000, 75000, 90000, 105000, 120000,
    135000, 155000,
];

/// Checks that a player level has a budget row.
pub fn validate_level(level: u8) -> WayfarerResult<()> {
    if (MIN_PLAYER_LEVEL..=MAX_PLAYER_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(WayfarerError::InvalidParameter(format!(
            "Invalid level: {}. Must be {}-{}.",
            level, MIN_PLAYER_LEVEL, MAX_PLAYER_LEVEL
        )))
    }
}

/// XP budget for a player level and difficulty.
///
/// # Examples
///
/// ```
/// use wayfarer::{xp_budget, Difficulty};
///
/// assert_eq!(xp_budget(5, Difficulty::Moderate).unwrap(), 750);
/// assert!(xp_budget(21, Difficulty::Moderate).is_err());
/// ```
pub fn xp_budget(level: u8, difficulty: Difficulty) -> WayfarerResult<u32> {
    validate_level(level)?;
    Ok(XP_BUDGETS[usize::from(level - 1)][difficulty.column()])
}

/// XP budget with the difficulty given as text.
pub fn xp_budget_for(level: u8, difficulty: &str) -> WayfarerResult<u32> {
    xp_budget(level, difficulty.parse()?)
}

/// XP awarded for a challenge rating.
///
/// Standard ratings come straight from the table. Anything else is
/// estimated: `25 + 75·CR` below 1, `200·CR^1.5` from 1 up, floored and never
/// under 10.
pub fn cr_to_xp(cr: ChallengeRating) -> u32 {
    if let Some(xp) = table_xp(cr) {
        return xp;
    }

    let estimate = if cr < ChallengeRating::whole(1) {
        25 + (75 * u64::from(cr.numerator())) / u64::from(cr.denominator())
    } else {
        (200.0 * cr.as_f64().powf(1.5)).floor() as u64
    };
    estimate.clamp(10, u64::from(u32::MAX)) as u32
}

/// [`cr_to_xp`] for a rating given as text.
///
/// # Examples
///
/// ```
/// use wayfarer::cr_str_to_xp;
///
/// assert_eq!(cr_str_to_xp("1/4").unwrap(), 50);
/// assert_eq!(cr_str_to_xp("10").unwrap(), 5900);
/// ```
pub fn cr_str_to_xp(cr: &str) -> WayfarerResult<u32> {
    Ok(cr_to_xp(cr.parse()?))
}

fn table_xp(cr: ChallengeRating) -> Option<u32> {
    if cr.is_whole() {
        return WHOLE_XP.get(cr.numerator() as usize).copied();
    }
    FRACTIONAL_XP
        .iter()
        .find(|(numerator, denominator, _)| {
            cr.numerator() == *numerator && cr.denominator() == *denominator
        })
        .map(|(_, _, xp)| *xp)
}

/// Tier of play (1-5) for a player level.
pub fn tier(level: u8) -> u8 {
    match level {
        0..=4 => 1,
        5..=8 => 2,
        9..=12 => 3,
        13..=16 => 4,
        _ => 5,
    }
}

/// Highest creature challenge rating allowed at a player level.
pub fn tier_max_cr(level: u8) -> ChallengeRating {
    let ceiling = match tier(level) {
        1 => 2,
        2 => 5,
        3 => 8,
        4 => 13,
        _ => 20,
    };
    ChallengeRating::whole(ceiling)
}
