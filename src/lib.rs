//! # Wayfarer
//!
//! Procedural encounter generation for hex-based tabletop exploration maps.
//!
//! ## Architecture Overview
//!
//! Wayfarer is split into two layers:
//!
//! - **World**: axial hex geometry, the position seed that ties a hex to a
//!   reproducible random stream, and the terrain catalog
//! - **Generation**: positional encounters rolled from a hex's seed, and
//!   XP-budget encounters filled from a monster roster
//!
//! Every call that needs randomness builds (or is handed) its own RNG, so
//! generators are plain immutable values that can be shared across threads.
//! Persistence, transport and rendering are left to the caller; results are
//! returned as serializable values.

pub mod generation;
pub mod world;

pub use generation::*;
pub use world::*;

pub use generation::{
    BucketPattern, ChallengeRating, Creature, CreatureType, Difficulty, EncounterConfig,
    EncounterEntry, EncounterPattern, MonsterCatalog, MountedUnit, PositionalEncounter,
    PositionalEncounterGenerator, TravelOutcome, XpEncounter, XpEncounterGenerator,
};
pub use world::{
    HexCoord, HexDirection, ProceduralTerrain, TerrainKind, TerrainMap, TerrainProfile,
    Visibility,
};

/// Core error type for the Wayfarer encounter engine.
#[derive(thiserror::Error, Debug)]
pub enum WayfarerError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A caller-supplied value is out of range or unrecognized
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Travel was requested between hexes that do not share an edge
    #[error("Can only travel to adjacent hexes: {from} -> {to} is {distance} hexes")]
    NotAdjacent {
        from: HexCoord,
        to: HexCoord,
        distance: u32,
    },

    /// Encounter configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Wayfarer codebase.
pub type WayfarerResult<T> = Result<T, WayfarerError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine-wide constants.
pub mod config {
    /// Lowest player level with an XP budget
    pub const MIN_PLAYER_LEVEL: u8 = 1;

    /// Highest player level with an XP budget
    pub const MAX_PLAYER_LEVEL: u8 = 20;

    /// Position seeds are reduced into `0..SEED_MODULUS`
    pub const SEED_MODULUS: u64 = 1 << 31;

    /// Party level assumed when the caller does not supply one
    pub const DEFAULT_PARTY_LEVEL: u32 = 1;

    /// Highest challenge rating in the CR-to-XP table
    pub const MAX_TABLE_CHALLENGE: u32 = 30;

    /// Ceiling for challenge ratings rolled by positional encounters
    pub const MAX_POSITIONAL_CHALLENGE: u32 = 20;
}
