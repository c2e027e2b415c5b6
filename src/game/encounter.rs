//! # Encounters
//!
//! The probability gate rolled after each accepted step, and the one-shot
//! negotiation that either ends an encounter or escalates it into a battle.

use crate::game::Dice;
use crate::generation::{pick_template, MonsterTemplate, MONSTER_TABLE};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Encounter tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Chance per accepted step that a monster appears
    pub probability: f64,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self { probability: 0.10 }
    }
}

/// A live monster: a template copy with its own hit points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonsterInstance {
    /// Unique per appearance, for correlating telemetry
    pub instance_id: Uuid,
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub armor_class: u32,
    pub challenge_rating: f32,
    pub negotiation_chance: f64,
}

impl MonsterInstance {
    /// Copies a template with full hit points.
    pub fn from_template(template: &MonsterTemplate) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            id: template.id.to_string(),
            name: template.name.to_string(),
            hp: template.hp,
            max_hp: template.hp,
            armor_class: template.armor_class,
            challenge_rating: template.challenge_rating,
            negotiation_chance: template.negotiation_chance,
        }
    }
}

/// Result of trying to talk a monster down.
#[derive(Debug, Clone, PartialEq)]
pub enum Negotiation {
    /// The monster leaves; the instance is consumed.
    Peace,
    /// Talks failed; the same instance goes on to fight.
    Refused(MonsterInstance),
}

/// Rolls for encounters and resolves negotiations.
#[derive(Debug, Clone)]
pub struct EncounterController {
    pub config: EncounterConfig,
    table: Vec<MonsterTemplate>,
}

impl EncounterController {
    /// Controller over the built-in monster table.
    pub fn new(config: EncounterConfig) -> Self {
        Self::with_table(config, MONSTER_TABLE.to_vec())
    }

    /// Controller over a custom table.
    pub fn with_table(config: EncounterConfig, table: Vec<MonsterTemplate>) -> Self {
        Self { config, table }
    }

    /// Rolls the gate. On success returns a fresh monster with full HP.
    ///
    /// Only meaningful while exploring; the engine never calls it otherwise.
    pub fn maybe_trigger(&self, dice: &mut dyn Dice) -> Option<MonsterInstance> {
        if !dice.chance(self.config.probability) {
            return None;
        }
        let template = pick_template(&self.table, dice)?;
        debug!("Encounter gate opened: {}", template.id);
        Some(MonsterInstance::from_template(template))
    }

    /// One draw against the monster's negotiation chance. There is no retry.
    pub fn negotiate(&self, monster: MonsterInstance, dice: &mut dyn Dice) -> Negotiation {
        if dice.chance(monster.negotiation_chance) {
            debug!("{} agreed to terms", monster.name);
            Negotiation::Peace
        } else {
            debug!("{} refused to negotiate", monster.name);
            Negotiation::Refused(monster)
        }
    }
}

impl Default for EncounterController {
    fn default() -> Self {
        Self::new(EncounterConfig::default())
    }
}
