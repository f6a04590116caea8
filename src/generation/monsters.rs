//! # Monster Catalog
//!
//! The creature roster the XP generator draws from. A built-in roster covers
//! every tier; callers may substitute their own from JSON.

use super::{tier, tier_max_cr, ChallengeRating, CreatureType};
use crate::{WayfarerError, WayfarerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A creature that can appear in an XP encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    #[serde(rename = "cr")]
    pub challenge: ChallengeRating,
    pub xp: u32,
    #[serde(rename = "type")]
    pub creature_type: CreatureType,
    #[serde(default)]
    pub can_be_mount: bool,
    #[serde(default)]
    pub can_ride: bool,
}

impl Creature {
    /// Creates a creature that neither rides nor can be ridden.
    pub fn new(
        name: impl Into<String>,
        challenge: ChallengeRating,
        xp: u32,
        creature_type: CreatureType,
    ) -> Self {
        Self {
            name: name.into(),
            challenge,
            xp,
            creature_type,
            can_be_mount: false,
            can_ride: false,
        }
    }

    /// Marks the creature as rideable.
    pub fn mount(mut self) -> Self {
        self.can_be_mount = true;
        self
    }

    /// Marks the creature as a rider.
    pub fn rider(mut self) -> Self {
        self.can_ride = true;
        self
    }
}

/// (name, cr numerator, cr denominator, xp, type, can_be_mount, can_ride)
type RosterRow = (&'static str, u32, u32, u32, CreatureType, bool, bool);

const BASIC_ROSTER: [RosterRow; 34] = [
    // Tier 1
    ("Rat", 0, 1, 10, CreatureType::Beast, false, false),
    ("Kobold", 1, 8, 25, CreatureType::Humanoid, false, true),
    ("Goblin", 1, 4, 50, CreatureType::Humanoid, false, true),
    ("Wolf", 1, 4, 50, CreatureType::Beast, true, false),
    ("Skeleton", 1, 4, 50, CreatureType::Undead, false, false),
    ("Zombie", 1, 4, 50, CreatureType::Undead, false, false),
    ("Orc", 1, 2, 100, CreatureType::Humanoid, false, true),
    ("Warg", 1, 2, 100, CreatureType::Beast, true, false),
    ("Wight", 3, 1, 700, CreatureType::Undead, false, false),
    ("Ghoul", 1, 1, 200, CreatureType::Undead, false, false),
    ("Hobgoblin", 1, 2, 100, CreatureType::Humanoid, false, true),
    ("Bugbear", 1, 1, 200, CreatureType::Humanoid, false, false),
    // Tier 2
    ("Ogre", 2, 1, 450, CreatureType::Giant, false, false),
    ("Owlbear", 3, 1, 700, CreatureType::Monstrosity, false, false),
    ("Manticore", 3, 1, 700, CreatureType::Monstrosity, false, false),
    ("Troll", 5, 1, 1800, CreatureType::Giant, false, false),
    ("Dire Wolf", 1, 1, 200, CreatureType::Beast, true, false),
    ("Wyvern", 6, 1, 2300, CreatureType::Dragon, true, false),
    ("Hill Giant", 5, 1, 1800, CreatureType::Giant, false, false),
    // Tier 3
    ("Young Black Dragon", 7, 1, 2900, CreatureType::Dragon, false, false),
    ("Young Green Dragon", 8, 1, 3900, CreatureType::Dragon, false, false),
    ("Stone Giant", 7, 1, 2900, CreatureType::Giant, false, false),
    ("Fire Giant", 9, 1, 5000, CreatureType::Giant, false, false),
    ("Wraith", 5, 1, 1800, CreatureType::Undead, false, false),
    // Tier 4
    ("Young Red Dragon", 10, 1, 5900, CreatureType::Dragon, false, false),
    ("Adult Black Dragon", 14, 1, 11500, CreatureType::Dragon, false, false),
    ("Frost Giant", 8, 1, 3900, CreatureType::Giant, false, false),
    ("Cloud Giant", 9, 1, 5000, CreatureType::Giant, false, false),
    ("Vampire", 13, 1, 10000, CreatureType::Undead, false, false),
    // Tier 5
    ("Adult Red Dragon", 17, 1, 18000, CreatureType::Dragon, false, false),
    ("Ancient Black Dragon", 21, 1, 33000, CreatureType::Dragon, false, false),
    ("Ancient Red Dragon", 24, 1, 62000, CreatureType::Dragon, false, false),
    ("Lich", 21, 1, 33000, CreatureType::Undead, false, false),
    ("Tarrasque", 30, 1, 155000, CreatureType::Monstrosity, false, false),
];

/// CR window for each tier of play, inclusive, as fractions.
const TIER_WINDOWS: [((u32, u32), (u32, u32)); 5] = [
    ((0, 1), (2, 1)),
    ((1, 2), (5, 1)),
    ((3, 1), (8, 1)),
    ((6, 1), (13, 1)),
    ((10, 1), (30, 1)),
];

/// An immutable roster of creatures with unique names.
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterCatalog {
    creatures: Vec<Creature>,
}

impl MonsterCatalog {
    /// Builds a catalog, rejecting duplicate names and zero XP values.
    pub fn new(creatures: Vec<Creature>) -> WayfarerResult<Self> {
        let mut names = HashSet::new();
        for creature in &creatures {
            if !names.insert(creature.name.as_str()) {
                return Err(WayfarerError::InvalidParameter(format!(
                    "Duplicate creature name in roster: {}",
                    creature.name
                )));
            }
            if creature.xp == 0 {
                return Err(WayfarerError::InvalidParameter(format!(
                    "Creature {} must have a positive XP value",
                    creature.name
                )));
            }
        }
        Ok(Self { creatures })
    }

    /// The built-in roster.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer::MonsterCatalog;
    ///
    /// let catalog = MonsterCatalog::basic();
    /// assert!(catalog.get("Goblin").is_some());
    /// assert!(!catalog.mounts().is_empty());
    /// ```
    pub fn basic() -> Self {
        let creatures = BASIC_ROSTER
            .iter()
            .map(|&(name, numerator, denominator, xp, creature_type, can_be_mount, can_ride)| {
                Creature {
                    name: name.to_string(),
                    challenge: ChallengeRating::new(numerator, denominator)
                        .unwrap_or_default(),
                    xp,
                    creature_type,
                    can_be_mount,
                    can_ride,
                }
            })
            .collect();
        Self { creatures }
    }

    /// Parses a roster from a JSON array of creatures.
    pub fn from_json_str(text: &str) -> WayfarerResult<Self> {
        let creatures: Vec<Creature> = serde_json::from_str(text)?;
        Self::new(creatures)
    }

    /// Loads a roster from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> WayfarerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Looks a creature up by exact name.
    pub fn get(&self, name: &str) -> Option<&Creature> {
        self.creatures.iter().find(|creature| creature.name == name)
    }

    /// Creatures at or below the tier ceiling for a player level, in roster order.
    pub fn tier_eligible(&self, level: u8) -> Vec<&Creature> {
        let ceiling = tier_max_cr(level);
        self.creatures
            .iter()
            .filter(|creature| creature.challenge <= ceiling)
            .collect()
    }

    /// Creatures whose rating falls in a tier's CR window.
    pub fn by_tier(&self, tier_of_play: u8) -> Vec<&Creature> {
        let index = usize::from(tier_of_play.clamp(1, 5) - 1);
        let ((min_n, min_d), (max_n, max_d)) = TIER_WINDOWS[index];
        let min = ChallengeRating::new(min_n, min_d).unwrap_or_default();
        let max = ChallengeRating::new(max_n, max_d).unwrap_or_default();
        self.creatures
            .iter()
            .filter(|creature| creature.challenge >= min && creature.challenge <= max)
            .collect()
    }

    /// Creatures in the CR window for a player level's tier.
    pub fn for_level(&self, level: u8) -> Vec<&Creature> {
        self.by_tier(tier(level))
    }

    /// Creatures that can be ridden.
    pub fn mounts(&self) -> Vec<&Creature> {
        self.creatures.iter().filter(|c| c.can_be_mount).collect()
    }

    /// Creatures that can ride.
    pub fn riders(&self) -> Vec<&Creature> {
        self.creatures.iter().filter(|c| c.can_ride).collect()
    }
}

impl Default for MonsterCatalog {
    fn default() -> Self {
        Self::basic()
    }
}
