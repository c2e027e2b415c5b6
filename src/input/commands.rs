//! # Command Definitions
//!
//! Key bindings per engine mode. Binding is a pure lookup so it can be tested
//! without a window.

use crate::game::{Direction, ModeKind, Turn};
use crate::input::PlayerInput;
use macroquad::prelude::KeyCode;

/// Slider increment for the ambient and torch keys.
pub const LIGHT_STEP: f32 = 0.1;

/// Help line shown for each mode.
pub fn help_text(mode: ModeKind) -> &'static str {
    match mode {
        ModeKind::Exploring => {
            "W/S or arrows: move, A/D: turn, Q/E: quick turn, Z/X ambient, C/V torch, Esc: quit"
        }
        ModeKind::Negotiating => "N: negotiate, F: fight",
        ModeKind::Fighting => "WASD/arrows: step, Space: attack, R: retreat",
    }
}

/// Maps a key to an input for the given mode.
///
/// Light sliders, help and quit are bound in every mode.
///
/// # Examples
///
/// ```
/// use delve::{bind_key, ModeKind, PlayerInput, Direction};
/// use macroquad::prelude::KeyCode;
///
/// assert_eq!(bind_key(KeyCode::W, ModeKind::Exploring), Some(PlayerInput::MoveForward));
/// assert_eq!(
///     bind_key(KeyCode::W, ModeKind::Fighting),
///     Some(PlayerInput::TacticalMove(Direction::North))
/// );
/// assert_eq!(bind_key(KeyCode::W, ModeKind::Negotiating), None);
/// ```
pub fn bind_key(key: KeyCode, mode: ModeKind) -> Option<PlayerInput> {
    match key {
        KeyCode::Escape => return Some(PlayerInput::Quit),
        KeyCode::F1 | KeyCode::H => return Some(PlayerInput::Help),
        KeyCode::Z => return Some(PlayerInput::AdjustAmbient(-LIGHT_STEP)),
        KeyCode::X => return Some(PlayerInput::AdjustAmbient(LIGHT_STEP)),
        KeyCode::C => return Some(PlayerInput::AdjustTorch(-LIGHT_STEP)),
        KeyCode::V => return Some(PlayerInput::AdjustTorch(LIGHT_STEP)),
        _ => {}
    }

    match mode {
        ModeKind::Exploring => match key {
            KeyCode::Up | KeyCode::W => Some(PlayerInput::MoveForward),
            KeyCode::Down | KeyCode::S => Some(PlayerInput::MoveBackward),
            KeyCode::Left | KeyCode::A => Some(PlayerInput::Turn(Turn::Left)),
            KeyCode::Right | KeyCode::D => Some(PlayerInput::Turn(Turn::Right)),
            KeyCode::Q => Some(PlayerInput::Turn(Turn::QuickLeft)),
            KeyCode::E => Some(PlayerInput::Turn(Turn::QuickRight)),
            _ => None,
        },
        ModeKind::Negotiating => match key {
            KeyCode::N | KeyCode::Key1 => Some(PlayerInput::Negotiate),
            KeyCode::F | KeyCode::Key2 => Some(PlayerInput::Fight),
            _ => None,
        },
        ModeKind::Fighting => match key {
            KeyCode::Up | KeyCode::W => Some(PlayerInput::TacticalMove(Direction::North)),
            KeyCode::Down | KeyCode::S => Some(PlayerInput::TacticalMove(Direction::South)),
            KeyCode::Left | KeyCode::A => Some(PlayerInput::TacticalMove(Direction::West)),
            KeyCode::Right | KeyCode::D => Some(PlayerInput::TacticalMove(Direction::East)),
            KeyCode::Space | KeyCode::Enter => Some(PlayerInput::Attack),
            KeyCode::R => Some(PlayerInput::Flee),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_only_while_exploring() {
        assert_eq!(bind_key(KeyCode::Up, ModeKind::Exploring), Some(PlayerInput::MoveForward));
        assert_eq!(
            bind_key(KeyCode::E, ModeKind::Exploring),
            Some(PlayerInput::Turn(Turn::QuickRight))
        );
        assert_eq!(bind_key(KeyCode::Q, ModeKind::Fighting), None);
        assert_eq!(bind_key(KeyCode::Up, ModeKind::Negotiating), None);
    }

    #[test]
    fn test_dialogue_keys() {
        assert_eq!(bind_key(KeyCode::N, ModeKind::Negotiating), Some(PlayerInput::Negotiate));
        assert_eq!(bind_key(KeyCode::F, ModeKind::Negotiating), Some(PlayerInput::Fight));
        assert_eq!(bind_key(KeyCode::N, ModeKind::Exploring), None);
    }

    #[test]
    fn test_sliders_bound_in_every_mode() {
        for mode in [ModeKind::Exploring, ModeKind::Negotiating, ModeKind::Fighting] {
            assert_eq!(bind_key(KeyCode::X, mode), Some(PlayerInput::AdjustAmbient(LIGHT_STEP)));
            assert_eq!(bind_key(KeyCode::C, mode), Some(PlayerInput::AdjustTorch(-LIGHT_STEP)));
            assert_eq!(bind_key(KeyCode::Escape, mode), Some(PlayerInput::Quit));
            assert!(!help_text(mode).is_empty());
        }
    }

    #[test]
    fn test_battle_keys() {
        assert_eq!(bind_key(KeyCode::Space, ModeKind::Fighting), Some(PlayerInput::Attack));
        assert_eq!(bind_key(KeyCode::R, ModeKind::Fighting), Some(PlayerInput::Flee));
        assert_eq!(
            bind_key(KeyCode::A, ModeKind::Fighting),
            Some(PlayerInput::TacticalMove(Direction::West))
        );
    }
}
