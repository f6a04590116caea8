//! # Generation Module
//!
//! Encounter generation on top of the world primitives.
//!
//! Two generators live here. The positional generator derives an encounter
//! from a hex's seed, so a hex always yields the same result. The XP generator
//! spends a level/difficulty budget on creatures from a [`MonsterCatalog`] and
//! intentionally draws fresh randomness on every call.

pub mod budget;
pub mod challenge;
pub mod monsters;
pub mod positional;
pub mod xp;

pub use budget::*;
pub use challenge::*;
pub use monsters::*;
pub use positional::*;
pub use xp::*;

use crate::world::HexCoord;
use crate::{WayfarerError, WayfarerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Tunable constants for both generators.
///
/// The defaults reproduce the standard tables; a JSON file can override any
/// subset of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Probability (0.0 to 1.0) that an XP encounter is a single legendary creature
    pub legendary_chance: f64,
    /// How far over its target a single creature's XP may go
    pub overspend_ratio: f64,
    /// Number of identical creatures in a minions bucket
    pub minion_count: u32,
    /// Upper bound of the uniform mounted-unit count
    pub max_mounted_units: u32,
    /// Share of a mounted unit's XP aimed at the rider
    pub rider_share: f64,
    /// Share of a mounted unit's XP aimed at the mount
    pub mount_share: f64,
    /// Hexes from the origin per point of positional challenge rating
    pub distance_per_challenge: u32,
    /// How far a positional CR may sit from the party level
    pub challenge_spread: u32,
    /// Ceiling for positional challenge ratings
    pub max_positional_challenge: u32,
    /// Hex that positional distance is measured from
    pub origin: HexCoord,
}

impl EncounterConfig {
    /// Creates the standard configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer::EncounterConfig;
    ///
    /// let config = EncounterConfig::new();
    /// assert_eq!(config.minion_count, 4);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            legendary_chance: 0.10,
            overspend_ratio: 1.2,
            minion_count: 4,
            max_mounted_units: 4,
            rider_share: 0.6,
            mount_share: 0.4,
            distance_per_challenge: 3,
            challenge_spread: 2,
            max_positional_challenge: crate::config::MAX_POSITIONAL_CHALLENGE,
            origin: HexCoord::origin(),
        }
    }

    /// Configuration that never rolls legendary encounters, so tests can pin
    /// the split path.
    pub fn for_testing() -> Self {
        Self {
            legendary_chance: 0.0,
            ..Self::new()
        }
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(text: &str) -> WayfarerResult<Self> {
        let config: EncounterConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> WayfarerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Rejects probabilities outside [0, 1], rider and mount shares that sum
    /// past 1, zero counts and a positional ceiling above
    /// [`MAX_POSITIONAL_CHALLENGE`](crate::config::MAX_POSITIONAL_CHALLENGE).
    pub fn validate(&self) -> WayfarerResult<()> {
        let fractions = [
            ("legendary_chance", self.legendary_chance),
            ("rider_share", self.rider_share),
            ("mount_share", self.mount_share),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(WayfarerError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }

        let shares = self.rider_share + self.mount_share;
        if shares > 1.0 + f64::EPSILON {
            return Err(WayfarerError::InvalidConfig(format!(
                "rider_share + mount_share must not exceed 1, got {}",
                shares
            )));
        }

        if self.max_positional_challenge > crate::config::MAX_POSITIONAL_CHALLENGE {
            return Err(WayfarerError::InvalidConfig(format!(
                "max_positional_challenge must be at most {}, got {}",
                crate::config::MAX_POSITIONAL_CHALLENGE,
                self.max_positional_challenge
            )));
        }

        if self.overspend_ratio.is_nan() || self.overspend_ratio < 1.0 {
            return Err(WayfarerError::InvalidConfig(format!(
                "overspend_ratio must be at least 1.0, got {}",
                self.overspend_ratio
            )));
        }

        let counts = [
            ("minion_count", self.minion_count),
            ("max_mounted_units", self.max_mounted_units),
            ("distance_per_challenge", self.distance_per_challenge),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(WayfarerError::InvalidConfig(format!(
                    "{} must be positive",
                    name
                )));
            }
        }

        Ok(())
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Creature type tags, shared by positional encounters and the monster roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureType {
    Beast,
    Humanoid,
    Monstrosity,
    Undead,
    Dragon,
    Giant,
    Fey,
    Elemental,
    Aberration,
    Fiend,
    Construct,
}

impl CreatureType {
    /// Every creature type.
    pub const ALL: [CreatureType; 11] = [
        CreatureType::Beast,
        CreatureType::Humanoid,
        CreatureType::Monstrosity,
        CreatureType::Undead,
        CreatureType::Dragon,
        CreatureType::Giant,
        CreatureType::Fey,
        CreatureType::Elemental,
        CreatureType::Aberration,
        CreatureType::Fiend,
        CreatureType::Construct,
    ];

    /// Lowercase identifier, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            CreatureType::Beast => "beast",
            CreatureType::Humanoid => "humanoid",
            CreatureType::Monstrosity => "monstrosity",
            CreatureType::Undead => "undead",
            CreatureType::Dragon => "dragon",
            CreatureType::Giant => "giant",
            CreatureType::Fey => "fey",
            CreatureType::Elemental => "elemental",
            CreatureType::Aberration => "aberration",
            CreatureType::Fiend => "fiend",
            CreatureType::Construct => "construct",
        }
    }
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreatureType {
    type Err = WayfarerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CreatureType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                WayfarerError::InvalidParameter(format!("Unknown creature type: {}", s))
            })
    }
}
