//! # Terrain Catalog
//!
//! Static terrain profiles: movement cost, encounter rate, visibility and the
//! dice formula used to roll how far away an encounter is spotted.

use super::{coord_seed, HexCoord};
use crate::{WayfarerError, WayfarerResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Kinds of terrain a hex can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Plains,
    Forest,
    Mountain,
    Hills,
    Swamp,
    Desert,
    Urban,
}

impl TerrainKind {
    /// Every terrain kind.
    pub const ALL: [TerrainKind; 7] = [
        TerrainKind::Plains,
        TerrainKind::Forest,
        TerrainKind::Mountain,
        TerrainKind::Hills,
        TerrainKind::Swamp,
        TerrainKind::Desert,
        TerrainKind::Urban,
    ];

    /// Kinds that random generation may produce. Urban is placed by map data.
    pub const WILD: [TerrainKind; 6] = [
        TerrainKind::Plains,
        TerrainKind::Forest,
        TerrainKind::Mountain,
        TerrainKind::Hills,
        TerrainKind::Swamp,
        TerrainKind::Desert,
    ];

    /// Lowercase identifier, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            TerrainKind::Plains => "plains",
            TerrainKind::Forest => "forest",
            TerrainKind::Mountain => "mountain",
            TerrainKind::Hills => "hills",
            TerrainKind::Swamp => "swamp",
            TerrainKind::Desert => "desert",
            TerrainKind::Urban => "urban",
        }
    }

    /// Static profile for this terrain.
    pub fn profile(self) -> &'static TerrainProfile {
        properties(self)
    }

    /// Whether the terrain makes encounters one step tougher.
    pub fn is_treacherous(self) -> bool {
        matches!(self, TerrainKind::Mountain | TerrainKind::Swamp)
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerrainKind {
    type Err = WayfarerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TerrainKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| WayfarerError::InvalidParameter(format!("Unknown terrain type: {}", s)))
    }
}

/// How far the eye carries over a terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Low,
    Medium,
    High,
}

/// Spotting-distance roll: `dice`d`die_size`, summed, times `multiplier` feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceFormula {
    pub dice: u32,
    pub die_size: u32,
    pub multiplier: u32,
}

impl DistanceFormula {
    pub const fn new(dice: u32, die_size: u32, multiplier: u32) -> Self {
        Self {
            dice,
            die_size,
            multiplier,
        }
    }

    /// Rolls the formula on the supplied random stream.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let total: u32 = (0..self.dice)
            .map(|_| rng.gen_range(1..=self.die_size))
            .sum();
        total * self.multiplier
    }

    /// Smallest result the formula can produce.
    pub fn min(&self) -> u32 {
        self.dice * self.multiplier
    }

    /// Largest result the formula can produce.
    pub fn max(&self) -> u32 {
        self.dice * self.die_size * self.multiplier
    }
}

/// Static statistics for a terrain kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainProfile {
    /// Movement cost multiplier (1.0 = normal pace)
    pub move_cost: f64,
    /// Chance in [0, 1] that entering the hex triggers an encounter
    pub encounter_rate: f64,
    pub visibility: Visibility,
    /// DC for navigation/survival checks
    pub navigation_dc: u32,
    pub description: &'static str,
    pub distance_formula: DistanceFormula,
    /// Expected spotting distance in feet, for display
    pub average_distance: u32,
}

/// Profile used for lookups that fall outside the table.
pub static DEFAULT_PROFILE: TerrainProfile = TerrainProfile {
    move_cost: 1.0,
    encounter_rate: 0.3,
    visibility: Visibility::Medium,
    navigation_dc: 12,
    description: "Unremarkable terrain",
    distance_formula: DistanceFormula::new(2, 6, 10),
    average_distance: 100,
};

static PLAINS: TerrainProfile = TerrainProfile {
    move_cost: 1.0,
    encounter_rate: 0.3,
    visibility: Visibility::High,
    navigation_dc: 10,
    description: "Open grasslands with good visibility",
    distance_formula: DistanceFormula::new(6, 6, 10),
    average_distance: 210,
};

static FOREST: TerrainProfile = TerrainProfile {
    move_cost: 1.2,
    encounter_rate: 0.5,
    visibility: Visibility::Low,
    navigation_dc: 12,
    description: "Dense woodland with limited sightlines",
    distance_formula: DistanceFormula::new(2, 8, 10),
    average_distance: 90,
};

static MOUNTAIN: TerrainProfile = TerrainProfile {
    move_cost: 1.5,
    encounter_rate: 0.4,
    visibility: Visibility::High,
    navigation_dc: 15,
    description: "Rocky terrain with steep inclines",
    distance_formula: DistanceFormula::new(4, 10, 10),
    average_distance: 220,
};

static HILLS: TerrainProfile = TerrainProfile {
    move_cost: 1.2,
    encounter_rate: 0.35,
    visibility: Visibility::Medium,
    navigation_dc: 12,
    description: "Rolling terrain with moderate elevation changes",
    distance_formula: DistanceFormula::new(2, 10, 10),
    average_distance: 110,
};

static SWAMP: TerrainProfile = TerrainProfile {
    move_cost: 1.5,
    encounter_rate: 0.6,
    visibility: Visibility::Low,
    navigation_dc: 14,
    description: "Waterlogged ground with thick vegetation",
    distance_formula: DistanceFormula::new(2, 6, 10),
    average_distance: 70,
};

static DESERT: TerrainProfile = TerrainProfile {
    move_cost: 1.3,
    encounter_rate: 0.2,
    visibility: Visibility::High,
    navigation_dc: 13,
    description: "Arid terrain with sparse vegetation",
    distance_formula: DistanceFormula::new(6, 6, 10),
    average_distance: 210,
};

static URBAN: TerrainProfile = TerrainProfile {
    move_cost: 1.0,
    encounter_rate: 0.4,
    visibility: Visibility::Medium,
    navigation_dc: 8,
    description: "Settled area with buildings and roads",
    distance_formula: DistanceFormula::new(2, 10, 10),
    average_distance: 110,
};

/// Returns the static profile for a terrain kind.
pub fn properties(kind: TerrainKind) -> &'static TerrainProfile {
    match kind {
        TerrainKind::Plains => &PLAINS,
        TerrainKind::Forest => &FOREST,
        TerrainKind::Mountain => &MOUNTAIN,
        TerrainKind::Hills => &HILLS,
        TerrainKind::Swamp => &SWAMP,
        TerrainKind::Desert => &DESERT,
        TerrainKind::Urban => &URBAN,
    }
}

/// Profile for a terrain named by string, falling back to [`DEFAULT_PROFILE`]
/// for names outside the catalog.
pub fn properties_by_name(name: &str) -> &'static TerrainProfile {
    name.parse::<TerrainKind>()
        .map(properties)
        .unwrap_or(&DEFAULT_PROFILE)
}

/// Picks a wild terrain kind from a fresh RNG seeded with `seed`.
///
/// # Examples
///
/// ```
/// use wayfarer::{random_terrain, TerrainKind};
///
/// let kind = random_terrain(1234);
/// assert_eq!(kind, random_terrain(1234));
/// assert_ne!(kind, TerrainKind::Urban);
/// ```
pub fn random_terrain(seed: u64) -> TerrainKind {
    let mut rng = StdRng::seed_from_u64(seed);
    TerrainKind::WILD
        .choose(&mut rng)
        .copied()
        .unwrap_or(TerrainKind::Plains)
}

/// Rolls a spotting distance in feet, continuing the caller's random stream.
pub fn encounter_distance<R: Rng + ?Sized>(kind: TerrainKind, rng: &mut R) -> u32 {
    properties(kind).distance_formula.roll(rng)
}

/// Expected spotting distance in feet, for display only.
pub fn average_encounter_distance(kind: TerrainKind) -> u32 {
    properties(kind).average_distance
}

/// Lookup seam for map data owned outside the engine.
pub trait TerrainMap {
    /// Terrain at a hex, if the map knows it.
    fn terrain_at(&self, coord: HexCoord) -> Option<TerrainKind>;

    /// Terrain at a hex, falling back to the hex's seeded random terrain.
    fn resolve(&self, coord: HexCoord) -> TerrainKind {
        self.terrain_at(coord)
            .unwrap_or_else(|| random_terrain(coord_seed(coord)))
    }
}

/// A map with no stored data: every hex gets its seeded random terrain.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralTerrain;

impl TerrainMap for ProceduralTerrain {
    fn terrain_at(&self, coord: HexCoord) -> Option<TerrainKind> {
        Some(random_terrain(coord_seed(coord)))
    }
}

impl TerrainMap for HashMap<HexCoord, TerrainKind> {
    fn terrain_at(&self, coord: HexCoord) -> Option<TerrainKind> {
        self.get(&coord).copied()
    }
}

/// Checks that a profile's numbers are usable.
pub fn validate_profile(profile: &TerrainProfile) -> WayfarerResult<()> {
    if profile.move_cost.is_nan() || profile.move_cost <= 0.0 {
        return Err(WayfarerError::InvalidParameter(format!(
            "move cost must be positive, got {}",
            profile.move_cost
        )));
    }
    if !(0.0..=1.0).contains(&profile.encounter_rate) {
        return Err(WayfarerError::InvalidParameter(format!(
            "encounter rate must be in [0, 1], got {}",
            profile.encounter_rate
        )));
    }
    if profile.navigation_dc == 0 || profile.distance_formula.dice == 0 {
        return Err(WayfarerError::InvalidParameter(
            "navigation DC and dice count must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_profiles_are_valid() {
        for kind in TerrainKind::ALL {
            assert!(validate_profile(properties(kind)).is_ok(), "{kind}");
        }
        assert!(validate_profile(&DEFAULT_PROFILE).is_ok());
    }

    #[test]
    fn test_profile_values() {
        let forest = properties(TerrainKind::Forest);
        assert_eq!(forest.encounter_rate, 0.5);
        assert_eq!(forest.visibility, Visibility::Low);
        assert_eq!(forest.navigation_dc, 12);

        let swamp = TerrainKind::Swamp.profile();
        assert_eq!(swamp.move_cost, 1.5);
        assert_eq!(swamp.distance_formula, DistanceFormula::new(2, 6, 10));
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(properties_by_name("Forest"), properties(TerrainKind::Forest));
        assert_eq!(properties_by_name("tundra"), &DEFAULT_PROFILE);
    }

    #[test]
    fn test_terrain_parsing() {
        assert_eq!("plains".parse::<TerrainKind>().unwrap(), TerrainKind::Plains);
        assert_eq!(" URBAN ".parse::<TerrainKind>().unwrap(), TerrainKind::Urban);
        assert!(matches!(
            "lava".parse::<TerrainKind>(),
            Err(WayfarerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_random_terrain_never_urban() {
        for seed in 0..500 {
            assert_ne!(random_terrain(seed), TerrainKind::Urban);
        }
    }

    #[test]
    fn test_random_terrain_covers_wild_kinds() {
        let seen: std::collections::HashSet<_> = (0..500).map(random_terrain).collect();
        assert_eq!(seen.len(), TerrainKind::WILD.len());
    }

    #[test]
    fn test_encounter_distance_within_formula_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        for kind in TerrainKind::ALL {
            let formula = properties(kind).distance_formula;
            for _ in 0..200 {
                let feet = encounter_distance(kind, &mut rng);
                assert!(feet >= formula.min() && feet <= formula.max());
                assert_eq!(feet % formula.multiplier, 0);
            }
        }
    }

    #[test]
    fn test_encounter_distance_continues_stream() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first: Vec<u32> = (0..5)
            .map(|_| encounter_distance(TerrainKind::Plains, &mut a))
            .collect();
        let second: Vec<u32> = (0..5)
            .map(|_| encounter_distance(TerrainKind::Plains, &mut b))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_average_distance_matches_formula() {
        for kind in TerrainKind::ALL {
            let formula = properties(kind).distance_formula;
            let expected = formula.dice * (formula.die_size + 1) * formula.multiplier / 2;
            assert_eq!(average_encounter_distance(kind), expected, "{kind}");
        }
    }

    #[test]
    fn test_terrain_maps() {
        let coord = HexCoord::new(4, 4);
        let mut stored = HashMap::new();
        stored.insert(coord, TerrainKind::Urban);

        assert_eq!(stored.resolve(coord), TerrainKind::Urban);
        assert_eq!(
            stored.resolve(HexCoord::new(0, 1)),
            ProceduralTerrain.resolve(HexCoord::new(0, 1))
        );
        assert_ne!(ProceduralTerrain.resolve(coord), TerrainKind::Urban);
    }
}
