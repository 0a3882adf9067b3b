//! Game-over window
//!
//! Hidden until the player dies, then shows the number of gaps passed.

use crate::sim::{Level, PlayerEvent};

#[derive(Debug, Clone, Default)]
pub struct GameOverWindow {
    visible: bool,
    score_text: String,
}

impl GameOverWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to a player notification. Only `Died` matters.
    pub fn handle_event(&mut self, event: PlayerEvent, level: &Level) {
        if event != PlayerEvent::Died {
            return;
        }
        self.score_text = level.passed_count().to_string();
        self.visible = true;
        log::info!("Game over, score {}", self.score_text);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Score as rendered. Empty until shown.
    pub fn score_text(&self) -> &str {
        &self.score_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_hidden_until_death() {
        let level = Level::new(&Settings::default(), 1).unwrap();
        let mut window = GameOverWindow::new();
        assert!(!window.is_visible());

        window.handle_event(PlayerEvent::Waiting, &level);
        window.handle_event(PlayerEvent::Started, &level);
        assert!(!window.is_visible());
        assert_eq!(window.score_text(), "");

        window.handle_event(PlayerEvent::Died, &level);
        assert!(window.is_visible());
        assert_eq!(window.score_text(), "0");
    }
}
