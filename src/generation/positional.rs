//! # Positional Encounters
//!
//! Encounters derived entirely from where the party stands. Each hex seeds
//! its own RNG, so revisiting a hex replays the same roll.

use super::{CreatureType, EncounterConfig};
use crate::world::{
    coord_seed, encounter_distance, HexCoord, HexDirection, TerrainKind, TerrainMap,
    TerrainProfile,
};
use crate::{WayfarerError, WayfarerResult};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// An encounter rolled for a hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionalEncounter {
    pub coord: HexCoord,
    pub terrain: TerrainKind,
    pub encounter_type: CreatureType,
    /// Challenge rating, 0 to 20
    pub challenge: u32,
    pub description: String,
    /// Hexes between the configured origin and this hex
    pub distance_from_origin: u32,
    /// Distance in feet at which the party spots the encounter
    pub spotted_at_ft: u32,
    pub seed: u64,
}

/// Result of moving the party one hex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelOutcome {
    pub from: HexCoord,
    pub to: HexCoord,
    pub direction: HexDirection,
    pub terrain: TerrainKind,
    pub terrain_profile: &'static TerrainProfile,
    pub encounter: Option<PositionalEncounter>,
    pub distance_traveled: u32,
    pub message: String,
}

/// Creature types plausible on a terrain.
pub fn encounter_types_for(terrain: TerrainKind) -> &'static [CreatureType] {
    use CreatureType::*;
    match terrain {
        TerrainKind::Plains => &[Beast, Humanoid],
        TerrainKind::Forest => &[Beast, Fey, Humanoid],
        TerrainKind::Mountain => &[Giant, Dragon, Beast],
        TerrainKind::Hills => &[Humanoid, Beast, Giant],
        TerrainKind::Swamp => &[Monstrosity, Undead, Aberration],
        TerrainKind::Desert => &[Monstrosity, Elemental, Beast],
        TerrainKind::Urban => &[Humanoid, Construct],
    }
}

fn narrative_template(
    encounter_type: CreatureType,
    terrain: TerrainKind,
    challenge: u32,
) -> Option<String> {
    let text = match (encounter_type, terrain) {
        (CreatureType::Beast, TerrainKind::Plains) => "A pack of wild beasts roams the grasslands",
        (CreatureType::Beast, TerrainKind::Forest) => "Predators stalk through the dense forest",
        (CreatureType::Beast, TerrainKind::Mountain) => "Mountain predators prowl the rocky slopes",
        (CreatureType::Humanoid, TerrainKind::Plains) => "Armed travelers block your path",
        (CreatureType::Humanoid, TerrainKind::Hills) => "Bandits have established a camp here",
        (CreatureType::Humanoid, TerrainKind::Urban) => "Guards patrol this area",
        (CreatureType::Undead, TerrainKind::Swamp) => "Undead creatures rise from the murky waters",
        (CreatureType::Dragon, TerrainKind::Mountain) => "A dragon's lair dominates this peak",
        _ => return None,
    };
    Some(format!("{} (CR {})", text, challenge))
}

/// Narrative line for an encounter, with a generic fallback.
pub fn describe_encounter(
    encounter_type: CreatureType,
    terrain: TerrainKind,
    challenge: u32,
) -> String {
    narrative_template(encounter_type, terrain, challenge).unwrap_or_else(|| {
        format!(
            "You encounter {}s in this {} (CR {})",
            encounter_type, terrain, challenge
        )
    })
}

/// Rolls encounters from hex positions.
#[derive(Debug, Clone, Default)]
pub struct PositionalEncounterGenerator {
    config: EncounterConfig,
}

impl PositionalEncounterGenerator {
    /// Creates a generator with the standard configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with a custom configuration.
    pub fn with_config(config: EncounterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// Rolls the encounter, if any, at a hex.
    ///
    /// The same (coordinate, terrain, party level) always gives the same
    /// answer.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer::{HexCoord, PositionalEncounterGenerator, TerrainKind};
    ///
    /// let generator = PositionalEncounterGenerator::new();
    /// let hex = HexCoord::new(6, -2);
    /// let first = generator.generate(hex, TerrainKind::Swamp, 3);
    /// let second = generator.generate(hex, TerrainKind::Swamp, 3);
    /// assert_eq!(first, second);
    /// ```
    pub fn generate(
        &self,
        coord: HexCoord,
        terrain: TerrainKind,
        party_level: u32,
    ) -> Option<PositionalEncounter> {
        let seed = coord_seed(coord);
        let mut rng = StdRng::seed_from_u64(seed);

        let roll: f64 = rng.gen();
        let rate = terrain.profile().encounter_rate;
        if roll >= rate {
            debug!(
                "No encounter at {} ({}): roll {:.3} >= rate {:.2}",
                coord, terrain, roll, rate
            );
            return None;
        }

        let distance_from_origin = self.config.origin.distance(coord);
        let challenge = self.challenge_for(distance_from_origin, terrain, party_level);
        let encounter_type = encounter_types_for(terrain)
            .choose(&mut rng)
            .copied()
            .unwrap_or(CreatureType::Beast);
        let spotted_at_ft = encounter_distance(terrain, &mut rng);
        let description = describe_encounter(encounter_type, terrain, challenge);

        debug!(
            "Encounter at {} (seed {}): {} CR {} spotted at {} ft",
            coord, seed, encounter_type, challenge, spotted_at_ft
        );

        Some(PositionalEncounter {
            coord,
            terrain,
            encounter_type,
            challenge,
            description,
            distance_from_origin,
            spotted_at_ft,
            seed,
        })
    }

    /// Challenge rating for an encounter this far from the origin.
    ///
    /// One point per `distance_per_challenge` hexes, plus one on treacherous
    /// terrain, held within `challenge_spread` of the party level and the
    /// global ceiling.
    pub fn challenge_for(&self, distance: u32, terrain: TerrainKind, party_level: u32) -> u32 {
        let mut base = distance / self.config.distance_per_challenge.max(1);
        if terrain.is_treacherous() {
            base += 1;
        }

        let spread = self.config.challenge_spread;
        let min = party_level.saturating_sub(spread);
        let max = party_level.saturating_add(spread);
        let challenge = base.min(max).max(min);

        challenge.min(self.config.max_positional_challenge)
    }

    /// Rolls the encounter at `to` when travelling from the adjacent hex `from`.
    ///
    /// Fails with [`WayfarerError::NotAdjacent`] unless the hexes share an edge.
    pub fn check_on_travel(
        &self,
        from: HexCoord,
        to: HexCoord,
        terrain: TerrainKind,
        party_level: u32,
    ) -> WayfarerResult<Option<PositionalEncounter>> {
        ensure_adjacent(from, to)?;
        Ok(self.generate(to, terrain, party_level))
    }

    /// Moves one hex, resolving the destination terrain through `map`.
    pub fn travel<M: TerrainMap + ?Sized>(
        &self,
        from: HexCoord,
        to: HexCoord,
        map: &M,
        party_level: u32,
    ) -> WayfarerResult<TravelOutcome> {
        let distance_traveled = ensure_adjacent(from, to)?;
        let direction = HexDirection::from_index(from.direction_index(to) as i32);
        let terrain = map.resolve(to);
        let terrain_profile = terrain.profile();
        let encounter = self.generate(to, terrain, party_level);

        let mut message = format!(
            "You travel {} into {}. {}.",
            direction.name().to_lowercase(),
            terrain,
            terrain_profile.description
        );
        if let Some(encounter) = &encounter {
            message.push(' ');
            message.push_str(&encounter.description);
            message.push('!');
        }

        Ok(TravelOutcome {
            from,
            to,
            direction,
            terrain,
            terrain_profile,
            encounter,
            distance_traveled,
            message,
        })
    }
}

fn ensure_adjacent(from: HexCoord, to: HexCoord) -> WayfarerResult<u32> {
    let distance = from.distance(to);
    if distance != 1 {
        return Err(WayfarerError::NotAdjacent { from, to, distance });
    }
    Ok(distance)
}

/// Rolls the encounter at (q, r) with the standard configuration.
pub fn generate_positional_encounter(
    q: i32,
    r: i32,
    terrain: TerrainKind,
    party_level: u32,
) -> Option<PositionalEncounter> {
    PositionalEncounterGenerator::new().generate(HexCoord::new(q, r), terrain, party_level)
}

/// Travel check between adjacent hexes with the standard configuration.
pub fn check_encounter_on_travel(
    from: HexCoord,
    to: HexCoord,
    terrain: TerrainKind,
    party_level: u32,
) -> WayfarerResult<Option<PositionalEncounter>> {
    PositionalEncounterGenerator::new().check_on_travel(from, to, terrain, party_level)
}
