//! Obstacle engine
//!
//! Spawns gaps on a timer, scrolls them toward the player, scores them as
//! they pass, culls them off the left edge, and ramps difficulty with the
//! number of gaps spawned.
//!
//! The level has no transition logic of its own. Its [`LevelState`] is set
//! only from player notifications, and obstacles move only while it is
//! `Playing`.

use rand::Rng;
use rand_pcg::Pcg32;

use super::body::BodyFactory;
use super::difficulty::{Difficulty, DifficultyTable, DifficultyTier};
use super::obstacle::{Obstacle, ObstacleSet, gap_center_range, gap_heights};
use super::state::{LevelState, PlayerEvent, RngState, RunCounters};
use crate::error::{ConfigError, InvariantViolation};
use crate::settings::{Settings, WorldConfig};

/// Level state for one run
#[derive(Debug)]
pub struct Level {
    world: WorldConfig,
    table: DifficultyTable,
    state: LevelState,
    obstacles: ObstacleSet,
    counters: RunCounters,
    difficulty: Difficulty,
    /// Gap size for future spawns
    gap_size: f32,
    /// Interval used to reseed the spawn timer
    spawn_interval: f32,
    /// Countdown to the next spawn; goes negative to trigger one
    spawn_timer: f32,
    rng: Pcg32,
}

impl Level {
    /// Fresh level: no obstacles, zero counters, easiest tier.
    ///
    /// Starts in `GetReady` to match a new player, or `Playing` when
    /// `instant_start` is set. Settings are validated first, so every gap
    /// the table can produce fits the span.
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let initial = *settings.difficulty.initial();
        let state = if settings.instant_start {
            LevelState::Playing
        } else {
            LevelState::GetReady
        };

        Ok(Self {
            world: settings.world.clone(),
            table: settings.difficulty.clone(),
            state,
            obstacles: ObstacleSet::new(),
            counters: RunCounters::default(),
            difficulty: initial.difficulty,
            gap_size: initial.gap_size,
            spawn_interval: initial.spawn_interval,
            spawn_timer: initial.spawn_interval,
            rng: RngState::new(seed).to_rng(),
        })
    }

    /// Mirror a player notification
    pub fn handle_event(&mut self, event: PlayerEvent) {
        let next = LevelState::from_event(event);
        if next != self.state {
            log::debug!("Level {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    /// Advance one tick. Does nothing unless `Playing`.
    pub fn update(&mut self, dt: f32, factory: &mut dyn BodyFactory) {
        if self.state != LevelState::Playing {
            return;
        }

        self.handle_movement(dt, factory);
        self.handle_spawning(dt, factory);

        if let Err(err) = self.check_invariants() {
            if cfg!(debug_assertions) {
                panic!("{err}");
            }
            log::error!("{err}");
        }
    }

    fn handle_movement(&mut self, dt: f32, factory: &mut dyn BodyFactory) {
        let passed = self.obstacles.advance(
            self.world.scroll_speed * dt,
            self.world.player_x,
            self.world.destroy_x,
            factory,
        );
        if passed > 0 {
            self.counters.passed += passed;
            log::debug!("Passed gap, score {}", self.counters.passed);
        }
    }

    fn handle_spawning(&mut self, dt: f32, factory: &mut dyn BodyFactory) {
        self.spawn_timer -= dt;
        if self.spawn_timer < 0.0 {
            // Keep the overshoot so spawn spacing doesn't drift
            self.spawn_timer += self.spawn_interval;

            let span = self.world.span();
            let (min, max) = gap_center_range(self.gap_size, span, self.world.edge_margin);
            let center = self.rng.random_range(min..=max);
            self.create_gap(center, factory);
        }
    }

    /// Spawn a bottom/top pair around `center` (measured from the floor)
    fn create_gap(&mut self, center: f32, factory: &mut dyn BodyFactory) {
        let (bottom, top) = gap_heights(center, self.gap_size, self.world.span());
        let x = self.world.spawn_x;

        self.obstacles
            .push(Obstacle::spawn(factory, &self.world, bottom, x, true));
        self.obstacles
            .push(Obstacle::spawn(factory, &self.world, top, x, false));
        self.counters.spawned += 1;
        log::debug!(
            "Spawned gap #{} centre={:.2} size={:.1}",
            self.counters.spawned,
            center,
            self.gap_size
        );

        let tier = *self.table.tier_for(self.counters.spawned);
        self.apply_difficulty(&tier);
    }

    /// Takes effect for future spawns only
    fn apply_difficulty(&mut self, tier: &DifficultyTier) {
        if tier.difficulty != self.difficulty {
            log::info!(
                "Difficulty {} -> {} (gap {}, interval {}s)",
                self.difficulty.as_str(),
                tier.difficulty.as_str(),
                tier.gap_size,
                tier.spawn_interval
            );
        }
        self.difficulty = tier.difficulty;
        self.gap_size = tier.gap_size;
        self.spawn_interval = tier.spawn_interval;
    }

    /// Every live obstacle must be at or right of the destroy threshold
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let destroy_x = self.world.destroy_x;
        match self.obstacles.iter().find(|o| o.x() < destroy_x) {
            Some(o) => Err(InvariantViolation::ObstacleNotCulled { x: o.x(), destroy_x }),
            None => Ok(()),
        }
    }

    /// Destroy all obstacles (run teardown)
    pub fn clear(&mut self, factory: &mut dyn BodyFactory) {
        self.obstacles.clear(factory);
    }

    /// Final score: gaps flown through
    pub fn passed_count(&self) -> u32 {
        self.counters.passed
    }

    pub fn spawned_count(&self) -> u32 {
        self.counters.spawned
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn gap_size(&self) -> f32 {
        self.gap_size
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    /// Spawn a gap immediately, bypassing the timer
    #[cfg(test)]
    pub(crate) fn force_gap(&mut self, center: f32, factory: &mut dyn BodyFactory) {
        self.create_gap(center, factory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::BodyArena;

    fn playing_level() -> Level {
        let mut level = Level::new(&Settings::default(), 1).unwrap();
        level.handle_event(PlayerEvent::Started);
        level
    }

    #[test]
    fn test_new_level_waits_for_player() {
        let level = Level::new(&Settings::default(), 1).unwrap();
        assert_eq!(level.state(), LevelState::GetReady);
        assert_eq!(level.counters(), RunCounters::default());
        assert_eq!(level.difficulty(), Difficulty::Easy);
        assert!((level.spawn_timer() - 1.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_unvalidated_settings() {
        let mut settings = Settings::default();
        settings.difficulty.tiers[0].gap_size = 90.0;
        assert!(matches!(
            Level::new(&settings, 1),
            Err(ConfigError::GapTooLarge { index: 0, .. })
        ));

        settings.difficulty.tiers.clear();
        assert!(matches!(
            Level::new(&settings, 1),
            Err(ConfigError::EmptyDifficultyTable)
        ));
    }

    #[test]
    fn test_instant_start() {
        let settings = Settings {
            instant_start: true,
            ..Default::default()
        };
        assert_eq!(Level::new(&settings, 1).unwrap().state(), LevelState::Playing);
    }

    #[test]
    fn test_mirrors_player_events() {
        let mut level = Level::new(&Settings::default(), 1).unwrap();
        level.handle_event(PlayerEvent::Started);
        assert_eq!(level.state(), LevelState::Playing);
        level.handle_event(PlayerEvent::Died);
        assert_eq!(level.state(), LevelState::GameOver);
        level.handle_event(PlayerEvent::Waiting);
        assert_eq!(level.state(), LevelState::GetReady);
    }

    #[test]
    fn test_frozen_unless_playing() {
        let mut arena = BodyArena::new();
        let mut level = Level::new(&Settings::default(), 1).unwrap();
        for _ in 0..100 {
            level.update(0.1, &mut arena);
        }
        assert_eq!(level.spawned_count(), 0);
        assert!((level.spawn_timer() - 1.2).abs() < f32::EPSILON);

        level.handle_event(PlayerEvent::Started);
        level.force_gap(50.0, &mut arena);
        level.handle_event(PlayerEvent::Died);
        let x = level.obstacles().iter().next().unwrap().x();
        level.update(0.1, &mut arena);
        assert!((level.obstacles().iter().next().unwrap().x() - x).abs() < f32::EPSILON);
    }

    #[test]
    fn test_spawn_timing_keeps_overshoot() {
        let mut arena = BodyArena::new();
        let mut level = playing_level();

        for _ in 0..11 {
            level.update(0.1, &mut arena);
        }
        assert_eq!(level.spawned_count(), 0);

        level.update(0.1, &mut arena);
        level.update(0.1, &mut arena);
        assert_eq!(level.spawned_count(), 1);
        assert_eq!(level.obstacles().len(), 2);
        // 1.3s elapsed, one 1.2s interval consumed: 0.1s into the next one
        let into_next = level.spawn_interval() - level.spawn_timer();
        assert!((into_next - 0.1).abs() < 1e-4, "into_next = {into_next}");
    }

    #[test]
    fn test_large_tick_spawns_once() {
        let mut arena = BodyArena::new();
        let mut level = playing_level();
        level.update(3.0, &mut arena);
        assert_eq!(level.spawned_count(), 1);
        // Overshoot is preserved even when it exceeds an interval
        assert!((level.spawn_timer() - (1.2 - 3.0 + 1.2)).abs() < 1e-4);
    }

    #[test]
    fn test_gap_geometry_for_spawned_pair() {
        let mut arena = BodyArena::new();
        let mut level = playing_level();
        level.force_gap(40.0, &mut arena);

        let pair: Vec<_> = level.obstacles().iter().collect();
        assert_eq!(pair.len(), 2);
        assert!(pair[0].is_bottom());
        assert!(!pair[1].is_bottom());
        assert!((pair[0].height() - 15.0).abs() < 1e-4);
        assert!((pair[1].height() - 35.0).abs() < 1e-4);
        assert!((pair[0].height() + pair[1].height() + 50.0 - 100.0).abs() < 1e-4);
        assert!((pair[0].x() - 100.0).abs() < f32::EPSILON);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_random_centres_stay_in_range() {
        let mut arena = BodyArena::new();
        let mut level = playing_level();
        for _ in 0..2000 {
            level.update(0.05, &mut arena);
        }
        assert!(level.spawned_count() > 50);
        for o in level.obstacles().iter() {
            assert!(o.height() >= 10.0 - 1e-3, "height {}", o.height());
        }
    }

    #[test]
    fn test_difficulty_switches_after_25th_spawn() {
        let mut arena = BodyArena::new();
        let mut level = playing_level();
        for _ in 0..24 {
            level.force_gap(50.0, &mut arena);
        }
        assert_eq!(level.difficulty(), Difficulty::Easy);
        assert!((level.gap_size() - 50.0).abs() < f32::EPSILON);

        level.force_gap(50.0, &mut arena);
        assert_eq!(level.spawned_count(), 25);
        assert_eq!(level.difficulty(), Difficulty::Medium);
        assert!((level.gap_size() - 45.0).abs() < f32::EPSILON);
        assert!((level.spawn_interval() - 1.1).abs() < f32::EPSILON);

        // The 25th gap itself still used the Easy size
        let last_pair: Vec<_> = level.obstacles().iter().rev().take(2).collect();
        assert!((last_pair[0].height() + last_pair[1].height() - 50.0).abs() < 1e-4);

        level.force_gap(50.0, &mut arena);
        let newest: Vec<_> = level.obstacles().iter().rev().take(2).collect();
        assert!((newest[0].height() + newest[1].height() - 55.0).abs() < 1e-4);
    }

    #[test]
    fn test_difficulty_reaches_extreme() {
        let mut arena = BodyArena::new();
        let mut level = playing_level();
        let mut last = level.difficulty();
        for _ in 0..120 {
            level.force_gap(50.0, &mut arena);
            assert!(level.difficulty() >= last);
            last = level.difficulty();
        }
        assert_eq!(level.difficulty(), Difficulty::Extreme);
        assert!((level.gap_size() - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pass_through_counts_once_per_gap() {
        let mut arena = BodyArena::new();
        let mut level = playing_level();
        level.force_gap(50.0, &mut arena);

        // 100 units at 30/s: the pair reaches x=0 after ~3.33s
        for _ in 0..40 {
            level.update(0.1, &mut arena);
        }
        assert_eq!(level.passed_count(), 1);
        assert!(level.passed_count() <= level.spawned_count());
    }

    #[test]
    fn test_obstacles_culled_and_bodies_released() {
        let mut arena = BodyArena::new();
        let mut level = playing_level();
        for _ in 0..1000 {
            level.update(0.1, &mut arena);
            assert!(level.check_invariants().is_ok());
            assert_eq!(arena.len(), level.obstacles().len() * 2);
        }
        // 200 units of travel at 30/s: nothing lives longer than ~6.7s, and
        // spawns are at least 0.8s apart
        assert!(level.obstacles().len() <= 18);
    }

    #[test]
    fn test_clear_releases_bodies() {
        let mut arena = BodyArena::new();
        let mut level = playing_level();
        level.force_gap(50.0, &mut arena);
        level.force_gap(60.0, &mut arena);
        level.clear(&mut arena);
        assert!(level.obstacles().is_empty());
        assert!(arena.is_empty());
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut arena_a = BodyArena::new();
        let mut arena_b = BodyArena::new();
        let mut a = playing_level();
        let mut b = playing_level();
        for _ in 0..200 {
            a.update(0.1, &mut arena_a);
            b.update(0.1, &mut arena_b);
        }
        let ha: Vec<f32> = a.obstacles().iter().map(|o| o.height()).collect();
        let hb: Vec<f32> = b.obstacles().iter().map(|o| o.height()).collect();
        assert_eq!(ha, hb);
    }
}
