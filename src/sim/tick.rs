//! Per-tick coordination
//!
//! One [`Run`] holds everything that lives for a single attempt. [`tick`]
//! drives it: player first, then physics, then the level, then the
//! collision check. Player notifications are delivered to the level and the
//! game-over window synchronously, in the order they are raised.

use super::body::BodyArena;
use super::collision::outside_vertical_span;
use super::level::Level;
use super::player::Player;
use super::state::{PlayerEvent, PlayerState};
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::ui::GameOverWindow;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump trigger (key or pointer press), at most once per tick
    pub jump: bool,
}

/// Everything owned by one run. Dropped wholesale on restart.
#[derive(Debug)]
pub struct Run {
    pub player: Player,
    pub level: Level,
    /// Scene bodies created by the level
    pub bodies: BodyArena,
    pub game_over: GameOverWindow,
    /// Seed used for this run's gap heights
    pub seed: u64,
    /// Ticks simulated so far
    pub time_ticks: u64,
    gravity: f32,
}

impl Run {
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        let level = Level::new(settings, seed)?;
        log::info!("Starting run (seed {seed:#x})");
        Ok(Self {
            player: Player::new(&settings.player, &settings.world),
            level,
            bodies: BodyArena::new(),
            game_over: GameOverWindow::new(),
            seed,
            time_ticks: 0,
            gravity: settings.player.gravity,
        })
    }

    /// Route a player notification to the level and the game-over window
    pub fn dispatch(&mut self, event: PlayerEvent) {
        self.level.handle_event(event);
        self.game_over.handle_event(event, &self.level);
    }

    /// External collision signal. Returns `Died` if this ended the run.
    pub fn collide(&mut self) -> Option<PlayerEvent> {
        let event = self.player.collide()?;
        self.dispatch(event);
        Some(event)
    }

    pub fn is_over(&self) -> bool {
        self.player.state() == PlayerState::GameOver
    }

    /// True if the player collider touches a pipe or has left the screen
    pub fn player_hits_something(&self) -> bool {
        let collider = self.player.body().collider();
        let v = self.level.world().camera_size;
        outside_vertical_span(&collider, -v, v) || self.bodies.overlaps(&collider)
    }
}

/// Advance a run by one step of `dt` seconds.
///
/// Returns every notification raised during the tick.
pub fn tick(run: &mut Run, input: &TickInput, dt: f32) -> Vec<PlayerEvent> {
    let mut events = run.player.update(input);
    for &event in &events {
        run.dispatch(event);
    }

    let gravity = run.gravity;
    run.player.body_mut().integrate(dt, gravity);
    run.level.update(dt, &mut run.bodies);

    if !run.is_over() && run.player_hits_something() {
        if let Some(event) = run.collide() {
            events.push(event);
        }
    }

    run.time_ticks += 1;
    log::trace!(
        "tick {} player y={:.2} obstacles={}",
        run.time_ticks,
        run.player.body().pos.y,
        run.level.obstacles().len()
    );
    events
}
