//! # Engine Configuration
//!
//! Default constants plus the serde-backed [`EngineConfig`] that aggregates the
//! per-subsystem settings. Every section falls back to its reference defaults,
//! so a JSON file only needs the keys it wants to override.

use crate::game::{BattleConfig, EncounterConfig, MotionConfig};
use crate::generation::GenerationConfig;
use crate::rendering::{LightSettings, LightingConfig, RenderConfig};
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default dungeon width in cells
pub const DEFAULT_DUNGEON_WIDTH: usize = 50;

/// Default dungeon height in cells
pub const DEFAULT_DUNGEON_HEIGHT: usize = 50;

/// Default window size in logical pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 960.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;

/// Minimap thumbnail edge length in pixels
pub const MINIMAP_SIZE: f32 = 120.0;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generation: GenerationConfig,
    pub motion: MotionConfig,
    pub encounter: EncounterConfig,
    pub battle: BattleConfig,
    pub render: RenderConfig,
    pub lighting: LightingConfig,
    pub lights: LightSettings,
}

impl EngineConfig {
    /// Loads a configuration from a JSON file and validates it.
    pub fn load(path: impl AsRef<Path>) -> DelveResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("Loaded engine configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json(&self) -> DelveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> DelveResult<()> {
        let gen = &self.generation;
        if gen.width < 5 || gen.height < 5 {
            return Err(invalid("dungeon must be at least 5x5"));
        }
        if gen.min_room_size == 0 {
            return Err(invalid("min_room_size must be positive"));
        }
        if !(0.0..=1.0).contains(&gen.max_room_fraction) {
            return Err(invalid("max_room_fraction must be within [0, 1]"));
        }
        if gen.min_tunnel_length == 0 || gen.min_tunnel_length > gen.max_tunnel_length {
            return Err(invalid("tunnel length range is empty"));
        }

        if self.motion.speed <= 0.0 {
            return Err(invalid("motion speed must be positive"));
        }

        check_probability("encounter.probability", self.encounter.probability)?;

        let battle = &self.battle;
        if battle.grid_size < 3 || battle.grid_size % 2 == 0 {
            return Err(invalid("battle grid size must be an odd number >= 3"));
        }
        if battle.player_max_hp <= 0 {
            return Err(invalid("player_max_hp must be positive"));
        }
        check_probability("battle.player_crit_chance", battle.player_crit_chance)?;
        check_probability("battle.enemy_crit_chance", battle.enemy_crit_chance)?;
        check_probability("battle.retreat_chance", battle.retreat_chance)?;

        let render = &self.render;
        if render.ray_step <= 0.0 || render.max_range <= render.ray_step {
            return Err(invalid("ray step must be positive and below max range"));
        }
        if render.strip_width <= 0.0 {
            return Err(invalid("strip width must be positive"));
        }
        if render.field_of_view <= 0.0 || render.field_of_view >= std::f32::consts::PI {
            return Err(invalid("field of view must be within (0, pi)"));
        }

        if self.lighting.far_plane <= 0.0 || self.lighting.near_plane <= 0.0 {
            return Err(invalid("lighting planes must be positive"));
        }

        check_probability("lights.ambient", f64::from(self.lights.ambient))?;
        check_probability("lights.torch", f64::from(self.lights.torch))?;
        Ok(())
    }
}

fn invalid(message: &str) -> DelveError {
    DelveError::InvalidConfig(message.to_string())
}

fn check_probability(name: &str, value: f64) -> DelveResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DelveError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.generation.width, DEFAULT_DUNGEON_WIDTH);
        assert_eq!(config.battle.grid_size, 7);
    }

    #[test]
    fn test_even_battle_grid_rejected() {
        let mut config = EngineConfig::default();
        config.battle.grid_size = 6;
        assert!(matches!(
            config.validate(),
            Err(DelveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut config = EngineConfig::default();
        config.encounter.probability = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> DelveResult<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{ "encounter": {{ "probability": 0.25 }} }}"#)?;

        let config = EngineConfig::load(file.path())?;
        assert_eq!(config.encounter.probability, 0.25);
        assert_eq!(config.generation.room_target, 6);
        assert_eq!(config.battle.player_max_hp, 18);
        Ok(())
    }

    #[test]
    fn test_json_round_trip_through_file() -> DelveResult<()> {
        let mut config = EngineConfig::default();
        config.lights.torch = 0.8;
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(config.to_json()?.as_bytes())?;

        assert_eq!(EngineConfig::load(file.path())?, config);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EngineConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(DelveError::Io(_))));
    }
}
