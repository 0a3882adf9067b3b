//! Player state machine
//!
//! GetReady -> Playing -> GameOver. Turns jump triggers into impulses and
//! raises lifecycle notifications.

use std::fmt;

use glam::Vec2;

use super::physics::{BodyKind, PlayerBody};
use super::state::{PlayerEvent, PlayerState};
use super::tick::TickInput;
use crate::settings::{PlayerConfig, WorldConfig};

/// Callback invoked for every player notification
pub type Listener = Box<dyn FnMut(PlayerEvent)>;

/// Returned by [`Player::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Multicast registry. Delivery is synchronous, in subscription order.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(ListenerId, Listener)>,
    next_id: u32,
}

impl Listeners {
    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: PlayerEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// The player-controlled body and its control state
#[derive(Debug)]
pub struct Player {
    state: PlayerState,
    body: PlayerBody,
    /// Vertical velocity assigned by a jump
    strength: f32,
    listeners: Listeners,
}

impl Player {
    pub fn new(config: &PlayerConfig, world: &WorldConfig) -> Self {
        Self {
            state: PlayerState::GetReady,
            body: PlayerBody::new(Vec2::new(world.player_x, 0.0), world.player_radius),
            strength: config.strength,
            listeners: Listeners::default(),
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn body(&self) -> &PlayerBody {
        &self.body
    }

    /// Physics collaborator access (integration, teleporting in tests)
    pub fn body_mut(&mut self) -> &mut PlayerBody {
        &mut self.body
    }

    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Per-tick update. Returns the notifications raised, in order.
    pub fn update(&mut self, input: &TickInput) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        match self.state {
            PlayerState::GetReady => {
                self.raise(PlayerEvent::Waiting, &mut events);
                if input.jump {
                    self.state = PlayerState::Playing;
                    self.body.set_kind(BodyKind::Dynamic);
                    self.fly();
                    log::info!("Player started");
                    self.raise(PlayerEvent::Started, &mut events);
                }
            }
            PlayerState::Playing => {
                if input.jump {
                    self.fly();
                }
            }
            PlayerState::GameOver => {}
        }
        events
    }

    /// Collision signal from the physics collaborator.
    ///
    /// Freezes the body and ends the run. Ignored once the run is over.
    pub fn collide(&mut self) -> Option<PlayerEvent> {
        if self.state == PlayerState::GameOver {
            return None;
        }
        self.body.set_kind(BodyKind::Static);
        self.state = PlayerState::GameOver;
        log::info!("Player died at y={:.2}", self.body.pos.y);
        self.listeners.emit(PlayerEvent::Died);
        Some(PlayerEvent::Died)
    }

    fn fly(&mut self) {
        self.body.set_vertical_velocity(self.strength);
    }

    fn raise(&mut self, event: PlayerEvent, out: &mut Vec<PlayerEvent>) {
        self.listeners.emit(event);
        out.push(event);
    }
}
