//! # LLDM Module
//!
//! Dungeon-master collaborators. The engine owns a [`Notifiers`] bundle with
//! one [`Narrator`] and one [`DungeonMaster`]; both default to [`Silent`].
//! A collaborator that fails is logged and otherwise ignored, so no
//! notification can interrupt a mode transition.

pub mod traits;

pub use traits::*;

use crate::{BattleLogEntry, BattleResult, BattleSummary, DelveResult, MonsterInstance, Position};
use log::{info, warn};
use std::fmt;

/// Collaborator that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Narrator for Silent {}
impl DungeonMaster for Silent {}

/// Forwards every notification to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNarrator;

impl Narrator for LoggingNarrator {
    fn encounter_started(&mut self, monster: &MonsterInstance) -> DelveResult<()> {
        info!(
            "A {} (CR {}) blocks the way [{}]",
            monster.name, monster.challenge_rating, monster.instance_id
        );
        Ok(())
    }

    fn battle_narrative(&mut self, text: &str) -> DelveResult<()> {
        info!("{text}");
        Ok(())
    }

    fn battle_log_entry(&mut self, entry: &BattleLogEntry) -> DelveResult<()> {
        info!("{entry}");
        Ok(())
    }

    fn award_xp(&mut self, amount: u32, reason: &str) -> DelveResult<()> {
        info!("Party earns {amount} XP ({reason})");
        Ok(())
    }

    fn battle_finished(&mut self, result: BattleResult, summary: &BattleSummary) -> DelveResult<()> {
        info!("Battle over, {result}: {summary}");
        Ok(())
    }

    fn exploration_progress(&mut self, percent: f32, position_hint: &str) -> DelveResult<()> {
        log::debug!("Explored {percent:.1}% of the dungeon, party is in the {position_hint}");
        Ok(())
    }
}

impl DungeonMaster for LoggingNarrator {
    fn party_moved(&mut self, cell: Position, delta: (f32, f32), _heading: f32) -> DelveResult<()> {
        log::trace!("Party stepped ({:.2}, {:.2}) into {cell:?}", delta.0, delta.1);
        Ok(())
    }

    fn monster_spawned(&mut self, monster: &MonsterInstance) -> DelveResult<()> {
        log::debug!("Spawned {} with {} hp", monster.id, monster.hp);
        Ok(())
    }

    fn initiative_rolled(
        &mut self,
        monster: &MonsterInstance,
        party_roll: u32,
        monster_roll: u32,
    ) -> DelveResult<()> {
        log::debug!(
            "Initiative: party {party_roll}, {} {monster_roll}",
            monster.name
        );
        Ok(())
    }
}

/// The engine's collaborators, wrapped so failures are logged and dropped.
pub struct Notifiers {
    narrator: Box<dyn Narrator>,
    dungeon_master: Box<dyn DungeonMaster>,
}

impl fmt::Debug for Notifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifiers").finish_non_exhaustive()
    }
}

impl Default for Notifiers {
    fn default() -> Self {
        Self::silent()
    }
}

impl Notifiers {
    pub fn new(narrator: Box<dyn Narrator>, dungeon_master: Box<dyn DungeonMaster>) -> Self {
        Self {
            narrator,
            dungeon_master,
        }
    }

    /// No collaborators at all.
    pub fn silent() -> Self {
        Self::new(Box::new(Silent), Box::new(Silent))
    }

    /// Both roles served by [`LoggingNarrator`].
    pub fn logging() -> Self {
        Self::new(Box::new(LoggingNarrator), Box::new(LoggingNarrator))
    }

    pub fn encounter_started(&mut self, monster: &MonsterInstance) {
        absorb("encounter_started", self.narrator.encounter_started(monster));
        absorb("monster_spawned", self.dungeon_master.monster_spawned(monster));
    }

    pub fn battle_narrative(&mut self, text: &str) {
        absorb("battle_narrative", self.narrator.battle_narrative(text));
    }

    pub fn blow_landed(&mut self, entry: &BattleLogEntry) {
        absorb("battle_log_entry", self.narrator.battle_log_entry(entry));
        absorb("damage_applied", self.dungeon_master.damage_applied(entry));
    }

    pub fn award_xp(&mut self, amount: u32, reason: &str) {
        absorb("award_xp", self.narrator.award_xp(amount, reason));
    }

    pub fn battle_finished(&mut self, result: BattleResult, summary: &BattleSummary) {
        absorb("battle_finished", self.narrator.battle_finished(result, summary));
    }

    pub fn exploration_progress(&mut self, percent: f32, position_hint: &str) {
        absorb(
            "exploration_progress",
            self.narrator.exploration_progress(percent, position_hint),
        );
    }

    pub fn party_moved(&mut self, cell: Position, delta: (f32, f32), heading: f32) {
        absorb(
            "party_moved",
            self.dungeon_master.party_moved(cell, delta, heading),
        );
    }

    pub fn initiative_rolled(&mut self, monster: &MonsterInstance, party_roll: u32, monster_roll: u32) {
        absorb(
            "initiative_rolled",
            self.dungeon_master
                .initiative_rolled(monster, party_roll, monster_roll),
        );
    }
}

fn absorb(hook: &str, result: DelveResult<()>) {
    if let Err(err) = result {
        warn!("Collaborator hook {hook} failed: {err}");
    }
}
