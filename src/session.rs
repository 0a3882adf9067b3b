//! Session: owns the settings and the current run
//!
//! There is no global player or level. A session builds a fresh [`Run`] on
//! start and throws the whole thing away on restart.

use crate::error::{ConfigError, InvariantViolation};
use crate::settings::Settings;
use crate::sim::{PlayerEvent, Run, TickInput, tick};

/// Top-level coordinator for consecutive runs
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    run: Option<Run>,
    runs_started: u32,
    best_score: u32,
}

impl Session {
    /// Validate settings. No run exists until [`Session::start_run`].
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            run: None,
            runs_started: 0,
            best_score: 0,
        })
    }

    /// Seed for the `n`th run (0-based)
    pub fn seed_for_run(&self, n: u32) -> u64 {
        self.settings
            .seed
            .wrapping_add((n as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Build a fresh run, discarding any previous one
    pub fn start_run(&mut self) -> Result<&mut Run, ConfigError> {
        self.end_run();
        let seed = self.seed_for_run(self.runs_started);
        let run = Run::new(&self.settings, seed)?;
        self.runs_started += 1;
        Ok(self.run.insert(run))
    }

    /// Same as [`Session::start_run`]; reads better after a game over
    pub fn restart(&mut self) -> Result<&mut Run, ConfigError> {
        self.start_run()
    }

    /// Tear down the current run, releasing its bodies
    pub fn end_run(&mut self) {
        if let Some(mut run) = self.run.take() {
            self.record_score(run.level.passed_count());
            run.level.clear(&mut run.bodies);
            log::debug!("Run ended after {} ticks", run.time_ticks);
        }
    }

    /// Advance the current run. Without a run this does nothing.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<PlayerEvent> {
        let Some(run) = self.run.as_mut() else {
            return Vec::new();
        };
        let events = tick(run, input, dt);
        if events.contains(&PlayerEvent::Died) {
            let score = run.level.passed_count();
            self.record_score(score);
        }
        events
    }

    /// Score of the current run
    pub fn passed_count(&self) -> Result<u32, InvariantViolation> {
        self.run
            .as_ref()
            .map(|run| run.level.passed_count())
            .ok_or(InvariantViolation::NoActiveRun)
    }

    /// Best score across runs of this session
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    pub fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    pub fn run_mut(&mut self) -> Option<&mut Run> {
        self.run.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn record_score(&mut self, score: u32) {
        if score > self.best_score {
            log::info!("New best score: {score}");
            self.best_score = score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{Difficulty, PlayerState};

    #[test]
    fn test_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.difficulty.tiers.clear();
        assert!(matches!(
            Session::new(settings),
            Err(ConfigError::EmptyDifficultyTable)
        ));
    }

    #[test]
    fn test_score_without_run_is_error() {
        let session = Session::new(Settings::default()).unwrap();
        assert_eq!(session.passed_count(), Err(InvariantViolation::NoActiveRun));
    }

    #[test]
    fn test_tick_without_run_is_noop() {
        let mut session = Session::new(Settings::default()).unwrap();
        assert!(session.tick(&TickInput { jump: true }, SIM_DT).is_empty());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = Session::new(Settings::default()).unwrap();
        let run = session.start_run().unwrap();
        tick(run, &TickInput { jump: true }, SIM_DT);
        for _ in 0..30 {
            run.level.force_gap(50.0, &mut run.bodies);
        }
        assert_eq!(run.level.difficulty(), Difficulty::Medium);
        run.collide();
        assert_eq!(run.player.state(), PlayerState::GameOver);

        let run = session.restart().unwrap();
        assert_eq!(run.level.spawned_count(), 0);
        assert_eq!(run.level.passed_count(), 0);
        assert_eq!(run.level.difficulty(), Difficulty::Easy);
        assert!(run.level.obstacles().is_empty());
        assert!(run.bodies.is_empty());
        assert_eq!(run.player.state(), PlayerState::GetReady);
        assert!(!run.game_over.is_visible());
        assert_eq!(session.runs_started(), 2);
    }

    #[test]
    fn test_runs_get_distinct_seeds() {
        let mut session = Session::new(Settings::default()).unwrap();
        let first = session.start_run().unwrap().seed;
        let second = session.restart().unwrap().seed;
        assert_ne!(first, second);
        assert_eq!(first, session.seed_for_run(0));
        assert_eq!(second, session.seed_for_run(1));
    }
}
