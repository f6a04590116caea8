//! Integration tests for XP-budget encounter generation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wayfarer::{
    generate_xp_encounter, BucketPattern, Difficulty, EncounterEntry, EncounterPattern,
    WayfarerError, XpEncounterGenerator,
};

#[test]
fn test_legendary_frequency_and_split_totals() {
    let generator = XpEncounterGenerator::new();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut legendary = 0;

    for _ in 0..1000 {
        let encounter = generator
            .generate_with_rng(5, Difficulty::Moderate, &mut rng)
            .unwrap();
        assert_eq!(encounter.budget, 750);
        assert_eq!(encounter.player_level, 5);

        match encounter.pattern {
            EncounterPattern::Legendary => {
                legendary += 1;
                assert_eq!(encounter.entries.len(), 1);
            }
            EncounterPattern::Split => {
                let sum: u32 = encounter.entries.iter().map(EncounterEntry::xp).sum();
                assert_eq!(encounter.total_xp, sum);

                let buckets = encounter.buckets.expect("split encounters report buckets");
                assert_eq!(buckets.first.xp, 375);
                assert_eq!(buckets.second.xp, 375);
                assert_ne!(buckets.first.pattern, BucketPattern::MinionsFallback);
            }
        }
    }

    let ratio = f64::from(legendary) / 1000.0;
    assert!((0.05..=0.15).contains(&ratio), "legendary ratio {ratio}");
}

#[test]
fn test_fresh_entropy_calls_stay_valid() {
    let generator = XpEncounterGenerator::new();
    for level in 1..=20 {
        for difficulty in Difficulty::ALL {
            let encounter = generator.generate(level, difficulty).unwrap();
            assert_eq!(
                encounter.total_xp,
                encounter.entries.iter().map(EncounterEntry::xp).sum::<u32>()
            );
        }
    }
}

#[test]
fn test_out_of_range_inputs_fail() {
    assert!(matches!(
        generate_xp_encounter(21, "moderate"),
        Err(WayfarerError::InvalidParameter(_))
    ));
    assert!(matches!(
        generate_xp_encounter(5, "extreme"),
        Err(WayfarerError::InvalidParameter(_))
    ));
    assert!(generate_xp_encounter(5, "Moderate").is_ok());
}

#[test]
fn test_serialized_shape() {
    let generator = XpEncounterGenerator::new();
    let mut rng = StdRng::seed_from_u64(42);
    let encounter = generator
        .generate_with_rng(2, Difficulty::High, &mut rng)
        .unwrap();
    let value = serde_json::to_value(&encounter).unwrap();

    assert_eq!(value["budget"], 200);
    assert_eq!(value["difficulty"], "high");
    assert!(value["pattern"] == "split" || value["pattern"] == "legendary");
    for entry in value["entries"].as_array().unwrap() {
        let kind = entry["kind"].as_str().unwrap();
        assert!(kind == "creature" || kind == "mounted");
        if kind == "creature" {
            assert!(entry["cr"].is_string());
        }
    }
}
