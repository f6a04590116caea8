//! # Wayfarer Command Line Entry Point
//!
//! Exposes the encounter generators as subcommands and prints results as JSON.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wayfarer::{
    coord_seed, random_terrain, Difficulty, EncounterConfig, HexCoord, MonsterCatalog,
    PositionalEncounterGenerator, ProceduralTerrain, TerrainKind, WayfarerError, WayfarerResult,
    XpEncounterGenerator,
};
#[cfg(feature = "dev-tools")]
use tracing::{error, info, Level};

#[cfg(not(feature = "dev-tools"))]
use log::{error, info};

/// Command line arguments for Wayfarer.
#[derive(Parser, Debug)]
#[command(name = "wayfarer")]
#[command(about = "Deterministic hex-map and XP-budget encounter generation")]
#[command(version)]
struct Args {
    /// JSON file overriding the encounter configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file replacing the built-in monster roster
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the profile of a terrain, or the seeded terrain of a hex
    Terrain {
        /// Terrain name (plains, forest, ...)
        #[arg(long, conflicts_with_all = ["q", "r"])]
        kind: Option<TerrainKind>,
        #[arg(long, allow_hyphen_values = true, requires = "r")]
        q: Option<i32>,
        #[arg(long, allow_hyphen_values = true, requires = "q")]
        r: Option<i32>,
    },
    /// Roll the positional encounter at a hex
    Encounter {
        #[arg(long, allow_hyphen_values = true)]
        q: i32,
        #[arg(long, allow_hyphen_values = true)]
        r: i32,
        /// Terrain at the hex; the seeded terrain is used when omitted
        #[arg(long)]
        terrain: Option<TerrainKind>,
        #[arg(long, default_value_t = wayfarer::config::DEFAULT_PARTY_LEVEL)]
        party_level: u32,
    },
    /// Travel one hex and check for an encounter at the destination
    Travel {
        #[arg(long, allow_hyphen_values = true)]
        from_q: i32,
        #[arg(long, allow_hyphen_values = true)]
        from_r: i32,
        #[arg(long, allow_hyphen_values = true)]
        to_q: i32,
        #[arg(long, allow_hyphen_values = true)]
        to_r: i32,
        #[arg(long, default_value_t = wayfarer::config::DEFAULT_PARTY_LEVEL)]
        party_level: u32,
    },
    /// Generate an XP-budget encounter
    Xp {
        /// Player level (1-20)
        #[arg(long)]
        level: u8,
        /// Difficulty (low, moderate, high)
        #[arg(long, default_value = "moderate")]
        difficulty: Difficulty,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting Wayfarer v{}", wayfarer::VERSION);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> WayfarerResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init()
            .map_err(|e| WayfarerError::InvalidConfig(e.to_string()))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let filter = log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Info);
        env_logger::Builder::new()
            .filter_level(filter)
            .format_target(false)
            .try_init()
            .map_err(|e| WayfarerError::InvalidConfig(e.to_string()))?;
    }

    Ok(())
}

fn run(args: Args) -> WayfarerResult<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading encounter configuration from {}", path.display());
            EncounterConfig::load(path)?
        }
        None => EncounterConfig::default(),
    };

    match args.command {
        Command::Terrain { kind, q, r } => {
            let (kind, seed) = match (kind, q, r) {
                (Some(kind), _, _) => (kind, None),
                (None, Some(q), Some(r)) => {
                    let seed = coord_seed(HexCoord::new(q, r));
                    (random_terrain(seed), Some(seed))
                }
                _ => {
                    return Err(WayfarerError::InvalidParameter(
                        "pass --kind or both --q and --r".to_string(),
                    ))
                }
            };
            let report = serde_json::json!({
                "terrain": kind,
                "seed": seed,
                "properties": kind.profile(),
            });
            print_json(&report)
        }
        Command::Encounter {
            q,
            r,
            terrain,
            party_level,
        } => {
            let coord = HexCoord::new(q, r);
            let terrain = terrain.unwrap_or_else(|| random_terrain(coord_seed(coord)));
            let generator = PositionalEncounterGenerator::with_config(config);
            print_json(&generator.generate(coord, terrain, party_level))
        }
        Command::Travel {
            from_q,
            from_r,
            to_q,
            to_r,
            party_level,
        } => {
            let generator = PositionalEncounterGenerator::with_config(config);
            let outcome = generator.travel(
                HexCoord::new(from_q, from_r),
                HexCoord::new(to_q, to_r),
                &ProceduralTerrain,
                party_level,
            )?;
            print_json(&outcome)
        }
        Command::Xp { level, difficulty } => {
            let catalog = match &args.roster {
                Some(path) => {
                    info!("Loading monster roster from {}", path.display());
                    MonsterCatalog::load(path)?
                }
                None => MonsterCatalog::basic(),
            };
            let generator = XpEncounterGenerator::with_catalog(catalog).config(config);
            print_json(&generator.generate(level, difficulty)?)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> WayfarerResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
