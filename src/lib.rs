//! # Delve
//!
//! A first-person dungeon crawler core: procedural mazes, ray-cast corridors
//! lit by torch and ambient light, and random encounters that escalate into
//! small tactical battles.
//!
//! ## Architecture Overview
//!
//! - **Generation**: room placement, L-shaped corridors and drunkard-walk tunnels
//! - **Game**: the engine state machine (`Exploring | Negotiating | Fighting`),
//!   motion with wall collision, encounters and the battle resolver
//! - **Rendering**: pure column buffers and minimap frames, painted by macroquad
//! - **Input**: key bindings routed by the current mode
//! - **LLDM**: optional narrative and dungeon-master collaborators that receive
//!   fire-and-forget notifications
//!
//! All state mutation happens inside [`GameState::handle_input`]; the render loop
//! only reads a [`FrameSnapshot`].

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod lldm;
pub mod rendering;
pub mod scenes;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use lldm::*;
pub use rendering::*;
pub use utils::*;

pub use config::EngineConfig;

/// Core error type for the Delve engine.
///
/// Gameplay never produces errors; these cover configuration, grid parsing,
/// collaborator failures and the display boundary.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A grid description could not be parsed
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// An external collaborator rejected a notification
    #[error("Notification failed: {0}")]
    Notification(String),

    /// The drawing surface could not be prepared
    #[error("Display error: {0}")]
    Display(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
