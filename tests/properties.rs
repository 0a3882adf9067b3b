//! Property tests for the obstacle engine

use pipe_dash::Settings;
use pipe_dash::sim::{BodyArena, DifficultyTable, Level, PlayerEvent, gap_heights};
use proptest::prelude::*;

fn playing_level(seed: u64) -> Level {
    let mut level = Level::new(&Settings::default(), seed).unwrap();
    level.handle_event(PlayerEvent::Started);
    level
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn counters_and_difficulty_never_go_backwards(
        seed in any::<u64>(),
        steps in prop::collection::vec(0.001f32..0.25, 1..600),
    ) {
        let mut arena = BodyArena::new();
        let mut level = playing_level(seed);
        let mut prev = level.counters();
        let mut prev_difficulty = level.difficulty();

        for dt in steps {
            level.update(dt, &mut arena);
            let now = level.counters();
            prop_assert!(now.spawned >= prev.spawned);
            prop_assert!(now.passed >= prev.passed);
            prop_assert!(now.passed <= now.spawned);
            prop_assert!(level.difficulty() >= prev_difficulty);
            prev = now;
            prev_difficulty = level.difficulty();
        }
    }

    #[test]
    fn cull_invariant_holds_after_every_tick(
        seed in any::<u64>(),
        steps in prop::collection::vec(0.01f32..0.5, 1..400),
    ) {
        let mut arena = BodyArena::new();
        let mut level = playing_level(seed);
        let destroy_x = level.world().destroy_x;
        let spawn_x = level.world().spawn_x;

        for dt in steps {
            level.update(dt, &mut arena);
            prop_assert!(level.check_invariants().is_ok());
            for o in level.obstacles().iter() {
                prop_assert!(o.x() >= destroy_x);
                prop_assert!(o.x() <= spawn_x);
            }
            // Every obstacle holds exactly two live bodies
            prop_assert_eq!(arena.len(), level.obstacles().len() * 2);
        }
    }

    #[test]
    fn spawned_pairs_fill_the_span(
        seed in any::<u64>(),
        steps in prop::collection::vec(0.01f32..0.3, 1..800),
    ) {
        let mut arena = BodyArena::new();
        let mut level = playing_level(seed);
        let span = level.world().span();

        for dt in steps {
            let gap = level.gap_size();
            let before = level.spawned_count();
            level.update(dt, &mut arena);
            if level.spawned_count() > before {
                let newest: Vec<_> = level.obstacles().iter().rev().take(2).collect();
                prop_assert!(!newest[0].is_bottom());
                prop_assert!(newest[1].is_bottom());
                let total = newest[0].height() + newest[1].height() + gap;
                prop_assert!((total - span).abs() < 1e-3, "total {}", total);
            }
        }
    }

    #[test]
    fn gap_heights_sum_to_span(center in 35.0f32..=65.0, gap in 1.0f32..50.0) {
        let (bottom, top) = gap_heights(center, gap, 100.0);
        prop_assert!((bottom + top + gap - 100.0).abs() < 1e-3);
    }

    #[test]
    fn tier_lookup_is_monotonic(a in 0u32..500, b in 0u32..500) {
        let table = DifficultyTable::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(table.tier_for(lo).difficulty <= table.tier_for(hi).difficulty);
    }
}
