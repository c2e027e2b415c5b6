//! # Scene Management System
//!
//! Drives the frame loop: poll input, hand it to the engine, log its events,
//! then paint a snapshot. Every frame repaints regardless of state.

use crate::input::commands::help_text;
use crate::{DelveResult, GameState, InputHandler, MacroquadDisplay, PlayerInput};
use log::info;
use macroquad::prelude::*;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// Key reference shown over the frozen view
    Help,
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Creates a new scene manager with the given game state and display
    pub fn new(game_state: GameState, mut display: MacroquadDisplay, input_handler: InputHandler) -> Self {
        display.add_message("You descend into the dungeon.");
        display.add_message(help_text(game_state.mode_kind()));
        Self {
            current_scene: SceneType::Playing,
            game_state,
            display,
            input_handler,
        }
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> DelveResult<()> {
        #[cfg(feature = "dev-tools")]
        let _span = tracing::info_span!("scene_loop").entered();

        loop {
            let exit = match self.current_scene {
                SceneType::Playing => self.update_playing_scene()?,
                SceneType::Help => self.update_help_scene()?,
            };
            if exit {
                break;
            }
            next_frame().await;
        }

        info!("Session over: {:?}", self.game_state.statistics());
        Ok(())
    }

    /// Updates the playing scene, returns true if exit is requested
    fn update_playing_scene(&mut self) -> DelveResult<bool> {
        if let Some(input) = self.input_handler.poll(self.game_state.mode_kind()) {
            match input {
                PlayerInput::Quit => return Ok(true),
                PlayerInput::Help => {
                    self.input_handler.suspend();
                    self.current_scene = SceneType::Help;
                }
                _ => self.apply(input),
            }
        }

        let clicked = self.display.render_frame(&self.game_state.snapshot())?;
        if let Some(input) = clicked.filter(|_| !self.input_handler.is_suspended()) {
            self.apply(input);
        }
        Ok(false)
    }

    /// Shows the key reference until any key is pressed. Gameplay input stays
    /// suspended meanwhile.
    fn update_help_scene(&mut self) -> DelveResult<bool> {
        self.display.render_frame(&self.game_state.snapshot())?;

        let (width, height) = (screen_width(), screen_height());
        draw_rectangle(40.0, height / 2.0 - 40.0, width - 80.0, 60.0, Color::new(0.0, 0.0, 0.0, 0.85));
        draw_text(
            help_text(self.game_state.mode_kind()),
            56.0,
            height / 2.0 - 4.0,
            18.0,
            WHITE,
        );

        if get_last_key_pressed().is_some() {
            self.input_handler.resume();
            self.current_scene = SceneType::Playing;
        }
        Ok(false)
    }

    fn apply(&mut self, input: PlayerInput) {
        for event in self.game_state.handle_input(input) {
            if let Some(text) = event.describe() {
                self.display.add_message(text);
            }
        }
    }
}
