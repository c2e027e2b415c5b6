//! # Input Module
//!
//! Keyboard polling and the mode-independent [`PlayerInput`] vocabulary.

pub mod commands;

pub use commands::*;

use crate::game::{Direction, ModeKind, Turn};
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

/// Player input types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Step along the heading
    MoveForward,
    /// Step against the heading
    MoveBackward,
    /// Rotate in place
    Turn(Turn),
    /// Try to talk a monster down
    Negotiate,
    /// Skip talking and start the battle
    Fight,
    /// Step on the tactical grid
    TacticalMove(Direction),
    /// Melee attack against an adjacent enemy
    Attack,
    /// Attempt to leave the battle
    Flee,
    /// Nudge the ambient light slider
    AdjustAmbient(f32),
    /// Nudge the torch slider
    AdjustTorch(f32),
    /// Quit the game
    Quit,
    /// Show help information
    Help,
}

/// Input handler for processing player commands.
///
/// Reads the most recent key press once per frame and binds it for the
/// current mode. While suspended every key is ignored; the scene loop
/// suspends it under the help card, and an embedding page can do the same
/// while one of its own text fields has focus.
#[derive(Debug, Default)]
pub struct InputHandler {
    suspended: bool,
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(!input_handler.is_suspended());
    /// ```
    pub fn new() -> Self {
        Self { suspended: false }
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Gets this frame's input, if any key was pressed.
    pub fn poll(&self, mode: ModeKind) -> Option<PlayerInput> {
        let key = get_last_key_pressed()?;
        self.translate(key, mode)
    }

    /// Binds a key unless input is suspended.
    pub fn translate(&self, key: KeyCode, mode: ModeKind) -> Option<PlayerInput> {
        if self.suspended {
            return None;
        }
        bind_key(key, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspended_handler_ignores_keys() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.translate(KeyCode::W, ModeKind::Exploring),
            Some(PlayerInput::MoveForward)
        );

        handler.suspend();
        assert!(handler.is_suspended());
        assert_eq!(handler.translate(KeyCode::W, ModeKind::Exploring), None);
        assert_eq!(handler.translate(KeyCode::Escape, ModeKind::Exploring), None);
        assert_eq!(handler.translate(KeyCode::Space, ModeKind::Fighting), None);
    }

    #[test]
    fn test_resumed_handler_binds_for_current_mode() {
        let mut handler = InputHandler::new();
        handler.suspend();
        handler.resume();
        assert!(!handler.is_suspended());
        assert_eq!(
            handler.translate(KeyCode::Space, ModeKind::Fighting),
            Some(PlayerInput::Attack)
        );
        assert_eq!(handler.translate(KeyCode::Space, ModeKind::Exploring), None);
    }
}
