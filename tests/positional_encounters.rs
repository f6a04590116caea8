//! Integration tests for positional generation and travel.

use std::collections::HashMap;
use wayfarer::{
    check_encounter_on_travel, generate_positional_encounter, position_seed, random_terrain,
    EncounterConfig, HexCoord, PositionalEncounterGenerator, ProceduralTerrain, TerrainKind,
    TerrainMap, WayfarerError, WayfarerResult,
};

#[test]
fn test_repeat_calls_match() {
    let generator = PositionalEncounterGenerator::new();
    let mut encounters = 0;

    for q in -25..25 {
        for r in -25..25 {
            let coord = HexCoord::new(q, r);
            let terrain = random_terrain(position_seed(q, r));
            let first = generator.generate(coord, terrain, 5);
            let second = generator.generate(coord, terrain, 5);
            assert_eq!(first, second);

            if let Some(encounter) = first {
                encounters += 1;
                assert_eq!(encounter.seed, position_seed(q, r));
                assert!(encounter.challenge >= 3 && encounter.challenge <= 7);
            }
        }
    }

    assert!(encounters > 0);
}

#[test]
fn test_generators_are_shareable_across_threads() {
    let generator = std::sync::Arc::new(PositionalEncounterGenerator::new());
    let coord = HexCoord::new(17, -9);
    let expected = generator.generate(coord, TerrainKind::Forest, 3);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = std::sync::Arc::clone(&generator);
            std::thread::spawn(move || generator.generate(coord, TerrainKind::Forest, 3))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_non_adjacent_travel_is_rejected() {
    let generator = PositionalEncounterGenerator::new();
    let result = generator.check_on_travel(
        HexCoord::new(0, 0),
        HexCoord::new(2, 2),
        TerrainKind::Plains,
        1,
    );

    match result {
        Err(WayfarerError::NotAdjacent { from, to, distance }) => {
            assert_eq!(from, HexCoord::new(0, 0));
            assert_eq!(to, HexCoord::new(2, 2));
            assert_eq!(distance, 2 + 2);
        }
        other => panic!("expected NotAdjacent, got {:?}", other),
    }

    let outcome = generator.travel(
        HexCoord::new(0, 0),
        HexCoord::new(0, 3),
        &ProceduralTerrain,
        1,
    );
    assert!(outcome.is_err());
}

#[test]
fn test_travel_walk() -> WayfarerResult<()> {
    let generator = PositionalEncounterGenerator::new();
    let mut map: HashMap<HexCoord, TerrainKind> = HashMap::new();
    map.insert(HexCoord::new(1, 0), TerrainKind::Urban);

    let mut here = HexCoord::origin();
    for direction in [0, 0, 1, 5, 3] {
        let next = here.neighbor(direction);
        let outcome = generator.travel(here, next, &map, 4)?;
        assert_eq!(outcome.terrain, map.resolve(next));
        assert_eq!(outcome.direction.index(), direction as usize);
        assert_eq!(outcome.distance_traveled, 1);
        if let Some(encounter) = &outcome.encounter {
            assert!(outcome.message.contains(&encounter.description));
        }
        here = next;
    }

    assert_eq!(here, HexCoord::new(2, 0));
    Ok(())
}

#[test]
fn test_custom_origin_shifts_challenge() {
    let config = EncounterConfig {
        origin: HexCoord::new(30, 0),
        ..EncounterConfig::default()
    };
    let shifted = PositionalEncounterGenerator::with_config(config);
    let standard = PositionalEncounterGenerator::new();

    let found = (0..300).find_map(|q| {
        let coord = HexCoord::new(q, 0);
        shifted
            .generate(coord, TerrainKind::Swamp, 10)
            .zip(standard.generate(coord, TerrainKind::Swamp, 10))
    });
    let (near, far) = found.expect("swamp encounters are common");

    assert_eq!(near.seed, far.seed);
    assert_eq!(near.encounter_type, far.encounter_type);
    assert_eq!(near.distance_from_origin, HexCoord::new(30, 0).distance(near.coord));
}

#[test]
fn test_free_functions_match_generator() {
    let generator = PositionalEncounterGenerator::new();
    for q in -5..5 {
        assert_eq!(
            generate_positional_encounter(q, 2, TerrainKind::Hills, 3),
            generator.generate(HexCoord::new(q, 2), TerrainKind::Hills, 3)
        );
    }
    assert!(matches!(
        check_encounter_on_travel(
            HexCoord::new(0, 0),
            HexCoord::new(2, 2),
            TerrainKind::Plains,
            1
        ),
        Err(WayfarerError::NotAdjacent { .. })
    ));
}

#[test]
fn test_travel_across_range_ends_is_rejected() {
    let from = HexCoord::new(i32::MIN, 0);
    let to = HexCoord::new(i32::MAX, 2);

    match check_encounter_on_travel(from, to, TerrainKind::Plains, 1) {
        Err(WayfarerError::NotAdjacent { distance, .. }) => assert_eq!(distance, u32::MAX),
        other => panic!("expected NotAdjacent, got {:?}", other),
    }

    let generator = PositionalEncounterGenerator::new();
    assert!(generator.travel(from, to, &ProceduralTerrain, 1).is_err());

    let edge = HexCoord::new(i32::MAX, 0);
    let west = edge.neighbor(3);
    assert_eq!(west, HexCoord::new(i32::MAX - 1, 0));
    assert!(generator
        .check_on_travel(edge, west, TerrainKind::Desert, 4)
        .is_ok());
}
