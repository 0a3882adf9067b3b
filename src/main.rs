//! Pipe Dash headless runner
//!
//! Drives the simulation with a fixed-timestep loop and an autopilot in
//! place of keyboard input. Usage: `pipe-dash [settings.json]`

use pipe_dash::consts::*;
use pipe_dash::sim::{PlayerEvent, Run, TickInput};
use pipe_dash::{ConfigError, Session, Settings};

/// Runs to play before exiting
const RUNS: u32 = 3;
/// Simulated frame length (60 Hz display)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up on a run after this many simulated seconds
const MAX_RUN_SECS: f32 = 300.0;

/// Game loop state
struct Game {
    session: Session,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(session: Session) -> Self {
        Self {
            session,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.session.tick(&self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot input
            self.input.jump = false;
        }
    }

    /// Play one run to completion (or the time limit)
    fn play_run(&mut self) -> Result<(u32, f32), ConfigError> {
        let run = self.session.start_run()?;
        run.player.subscribe(Box::new(|event: PlayerEvent| {
            if event != PlayerEvent::Waiting {
                log::debug!("Player event: {event:?}");
            }
        }));
        self.accumulator = 0.0;

        let mut elapsed = 0.0;
        while elapsed < MAX_RUN_SECS {
            let Some(run) = self.session.run() else {
                break;
            };
            if run.is_over() {
                break;
            }
            self.input.jump = autopilot(run);
            self.update(FRAME_DT);
            elapsed += FRAME_DT;
        }

        let score = self.session.passed_count().unwrap_or(0);
        Ok((score, elapsed))
    }
}

/// Jump when below the centre of the next gap and not already rising
fn autopilot(run: &Run) -> bool {
    let body = run.player.body();
    if !body.is_dynamic() {
        return true;
    }

    let world = run.level.world();
    let reach = world.player_x - world.pipe_body_width * 0.5 - body.radius;
    let obstacles: Vec<_> = run.level.obstacles().iter().collect();
    let target = obstacles
        .chunks(2)
        .find(|pair| pair[0].x() >= reach)
        .and_then(|pair| match pair {
            [bottom, top] => {
                let gap = world.span() - bottom.height() - top.height();
                Some(-world.camera_size + bottom.height() + gap * 0.5)
            }
            _ => None,
        })
        .unwrap_or(0.0);

    body.pos.y < target - 3.0 && body.vel.y <= 0.0
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let session = match Session::new(settings) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid settings: {e}");
            std::process::exit(1);
        }
    };

    let mut game = Game::new(session);
    for n in 1..=RUNS {
        let (score, elapsed) = match game.play_run() {
            Ok(result) => result,
            Err(e) => {
                log::error!("Could not start run {n}: {e}");
                std::process::exit(1);
            }
        };
        let difficulty = game
            .session
            .run()
            .map(|run| run.level.difficulty().as_str())
            .unwrap_or("-");
        log::info!("Run {n}: score {score} in {elapsed:.1}s (reached {difficulty})");
    }
    game.session.end_run();
    log::info!("Best score: {}", game.session.best_score());
}
