// Integration tests (native) for the `melon-drop` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use std::collections::HashSet;

use melon_drop::ItemKind;
use melon_drop::game::stages;

#[test]
fn stage_sequence_is_nonempty_and_uniquely_named() {
    let all = stages();
    assert_eq!(all.len(), 4);
    let mut names = HashSet::new();
    for stage in all {
        assert!(names.insert(stage.name), "duplicate stage name '{}'", stage.name);
    }
}

#[test]
fn stage_targets_are_drawn_from_their_pools() {
    for stage in stages() {
        assert!(!stage.pool.is_empty(), "stage '{}' has an empty pool", stage.name);
        assert!(
            !stage.target_sequence.is_empty(),
            "stage '{}' has an empty target sequence",
            stage.name
        );
        for kind in stage.target_sequence {
            assert!(
                stage.pool.contains(kind),
                "stage '{}' target kind {:?} never spawns",
                stage.name,
                kind
            );
        }
    }
}

#[test]
fn stage_pools_have_no_duplicate_kinds() {
    for stage in stages() {
        let unique: HashSet<ItemKind> = stage.pool.iter().copied().collect();
        assert_eq!(
            unique.len(),
            stage.pool.len(),
            "stage '{}' pool repeats a kind",
            stage.name
        );
    }
}

#[test]
fn stage_tuning_is_sane() {
    for stage in stages() {
        assert!(stage.time_limit_secs > 0, "stage '{}' has no time", stage.name);
        assert!(
            stage.spawn_interval_ms > 0.0,
            "stage '{}' spawn interval must be positive",
            stage.name
        );
        assert!(stage.base_fall_speed > 0.0);
        assert!(stage.gravity > 0.0);
        assert!(
            stage.restitution > 0.0 && stage.restitution < 1.0,
            "stage '{}' restitution {} outside (0, 1)",
            stage.name,
            stage.restitution
        );
        assert!(stage.points_multiplier >= 1);
    }
}

#[test]
fn stage_tempo_never_relaxes() {
    for pair in stages().windows(2) {
        assert!(
            pair[1].spawn_interval_ms <= pair[0].spawn_interval_ms,
            "'{}' spawns slower than '{}'",
            pair[1].name,
            pair[0].name
        );
        assert!(
            pair[1].time_limit_secs <= pair[0].time_limit_secs,
            "'{}' allows more time than '{}'",
            pair[1].name,
            pair[0].name
        );
        assert!(pair[1].base_fall_speed >= pair[0].base_fall_speed);
    }
}

#[test]
fn item_specs_resolve_by_kind() {
    assert_eq!(ItemKind::Watermelon.spec().name, "watermelon");
    assert_eq!(ItemKind::Peach.spec().points, 110);
}
