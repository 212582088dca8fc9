use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use catex::category::{CategoryDataset, CategoryRow, Level};
use catex::sampler::{SampleError, sample, validate_count};
use catex::session::ExclusionSet;

fn row(l1: &str, l2: &str, l3: &str, l4: &str) -> CategoryRow {
    CategoryRow::new([l1.into(), l2.into(), l3.into(), l4.into()])
}

// Three distinct level-1 categories {A, B, C} with uneven fan-out below.
fn build_dataset() -> CategoryDataset {
    CategoryDataset::new(vec![
        row("A", "a1", "x1", "y1"),
        row("A", "a1", "x2", "y2"),
        row("A", "a2", "x3", "y3"),
        row("B", "b1", "x4", "y4"),
        row("B", "b2", "x5", "y5"),
        row("C", "c1", "x6", "y6"),
    ])
}

#[test]
fn draws_exactly_n_distinct_values() {
    let dataset = build_dataset();
    let exclusions = ExclusionSet::new();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = sample(&dataset, 2, Level::One, &exclusions, &mut rng).unwrap();
        let values = result.level_values();
        assert_eq!(values.len(), 2);
        for value in values {
            assert!(["A", "B", "C"].contains(&value));
        }
    }
}

#[test]
fn excluded_values_never_appear() {
    let dataset = build_dataset();
    let mut exclusions = ExclusionSet::new();
    exclusions.exclude(Level::One, "A".to_string());
    exclusions.exclude(Level::One, "B".to_string());

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = sample(&dataset, 1, Level::One, &exclusions, &mut rng).unwrap();
        assert_eq!(result.level_values(), vec!["C"]);
        assert_eq!(result.rows(), &[vec!["C".to_string()]]);
    }
}

#[test]
fn over_request_returns_empty_with_headers() {
    let dataset = build_dataset();
    let exclusions = ExclusionSet::new();
    let mut rng = StdRng::seed_from_u64(0);

    let result = sample(&dataset, 5, Level::One, &exclusions, &mut rng).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.columns(), &["대분류"]);
    assert_eq!(result.rows().len(), 0);
}

#[test]
fn empty_dataset_is_exhausted_not_an_error() {
    let dataset = CategoryDataset::new(Vec::new());
    let exclusions = ExclusionSet::new();
    let mut rng = StdRng::seed_from_u64(0);

    let result = sample(&dataset, 1, Level::Four, &exclusions, &mut rng).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.columns().len(), 4);
}

#[test]
fn invalid_inputs_are_rejected() {
    let dataset = build_dataset();
    let exclusions = ExclusionSet::new();
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(
        sample(&dataset, 0, Level::One, &exclusions, &mut rng).unwrap_err(),
        SampleError::InvalidCount(0)
    );
    assert_eq!(validate_count(-1), Err(SampleError::InvalidCount(-1)));
    assert_eq!(
        Level::from_number(0).unwrap_err(),
        SampleError::InvalidLevel("0".to_string())
    );
    assert_eq!(
        Level::from_number(5).unwrap_err(),
        SampleError::InvalidLevel("5".to_string())
    );
}

#[test]
fn sampling_is_pure_and_deterministic_under_a_seed() {
    let dataset = build_dataset();
    let exclusions = ExclusionSet::new();

    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let first = sample(&dataset, 2, Level::Two, &exclusions, &mut rng_a).unwrap();
    let second = sample(&dataset, 2, Level::Two, &exclusions, &mut rng_b).unwrap();
    assert_eq!(first, second);

    // The exclusion set is untouched by sampling itself.
    assert!(exclusions.is_empty());
}

#[test]
fn record_selection_is_monotonic_and_idempotent() {
    let dataset = build_dataset();
    let mut exclusions = ExclusionSet::new();
    let mut rng = StdRng::seed_from_u64(5);

    let result = sample(&dataset, 2, Level::One, &exclusions, &mut rng).unwrap();
    exclusions.record_selection(&result);

    let after_first: HashSet<String> = exclusions.excluded_at(Level::One).unwrap().clone();
    assert_eq!(after_first.len(), 2);
    for value in result.level_values() {
        assert!(after_first.contains(value));
    }

    // Applying the same result again changes nothing.
    exclusions.record_selection(&result);
    assert_eq!(exclusions.excluded_at(Level::One).unwrap(), &after_first);

    // A later draw only grows the set.
    let result = sample(&dataset, 1, Level::One, &exclusions, &mut rng).unwrap();
    assert!(!result.is_empty());
    exclusions.record_selection(&result);
    let after_second = exclusions.excluded_at(Level::One).unwrap();
    assert!(after_second.is_superset(&after_first));
    assert_eq!(after_second.len(), 3);
}

#[test]
fn empty_results_are_not_recorded() {
    let dataset = build_dataset();
    let mut exclusions = ExclusionSet::new();
    let mut rng = StdRng::seed_from_u64(0);

    let result = sample(&dataset, 10, Level::One, &exclusions, &mut rng).unwrap();
    assert!(result.is_empty());
    exclusions.record_selection(&result);
    assert!(exclusions.is_empty());
}

#[test]
fn reset_restores_the_full_pool() {
    let dataset = build_dataset();
    let mut exclusions = ExclusionSet::new();
    let mut rng = StdRng::seed_from_u64(11);

    let result = sample(&dataset, 3, Level::One, &exclusions, &mut rng).unwrap();
    exclusions.record_selection(&result);
    assert_eq!(dataset.available_count(Level::One, &exclusions), 0);

    exclusions.reset();
    assert!(exclusions.is_empty());
    assert_eq!(dataset.available_count(Level::One, &exclusions), 3);

    let result = sample(&dataset, 3, Level::One, &exclusions, &mut rng).unwrap();
    assert_eq!(result.level_values().len(), 3);
}

#[test]
fn repeated_draws_cover_the_pool_then_exhaust() {
    let dataset = build_dataset();
    let mut exclusions = ExclusionSet::new();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut drawn: HashSet<String> = HashSet::new();

    // One value per draw: exactly three non-empty draws, then exhaustion.
    for _ in 0..3 {
        let result = sample(&dataset, 1, Level::One, &exclusions, &mut rng).unwrap();
        assert!(!result.is_empty());
        for value in result.level_values() {
            assert!(drawn.insert(value.to_string()), "value drawn twice");
        }
        exclusions.record_selection(&result);
    }
    assert_eq!(drawn.len(), 3);

    let result = sample(&dataset, 1, Level::One, &exclusions, &mut rng).unwrap();
    assert!(result.is_empty());
}

#[test]
fn projection_deduplicates_by_full_tuple() {
    let dataset = build_dataset();
    let exclusions = ExclusionSet::new();
    let mut rng = StdRng::seed_from_u64(0);

    // All three level-1 values: the six rows collapse to three projected rows.
    let result = sample(&dataset, 3, Level::One, &exclusions, &mut rng).unwrap();
    assert_eq!(result.rows().len(), 3);

    // At level 2, rows sharing ("A", "a1") collapse into one.
    let result = sample(&dataset, 5, Level::Two, &exclusions, &mut rng).unwrap();
    assert_eq!(result.columns(), &["대분류", "중분류"]);
    assert_eq!(result.rows().len(), 5);
    let unique: HashSet<&Vec<String>> = result.rows().iter().collect();
    assert_eq!(unique.len(), result.rows().len());
}

#[test]
fn exclusions_at_one_level_do_not_constrain_other_levels() {
    let dataset = build_dataset();
    let mut exclusions = ExclusionSet::new();
    exclusions.exclude(Level::One, "A".to_string());
    let mut rng = StdRng::seed_from_u64(1);

    // Level-2 values under "A" remain available; only level-1 draws skip "A".
    let result = sample(&dataset, 5, Level::Two, &exclusions, &mut rng).unwrap();
    assert_eq!(result.level_values().len(), 5);
}
