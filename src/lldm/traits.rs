//! # LLDM Traits
//!
//! Collaborator interfaces the engine reports to. Both are fire-and-forget:
//! the engine resolves everything locally and only mirrors outcomes outward.
//! Every method has a no-op default, so implementors override just the hooks
//! they care about.

use crate::{BattleLogEntry, BattleResult, BattleSummary, DelveResult, MonsterInstance, Position};

/// Narrative collaborator: flavor text, the battle log, and party rewards.
pub trait Narrator {
    /// A monster blocked the party's path.
    fn encounter_started(&mut self, _monster: &MonsterInstance) -> DelveResult<()> {
        Ok(())
    }

    /// Free-form battle narration.
    fn battle_narrative(&mut self, _text: &str) -> DelveResult<()> {
        Ok(())
    }

    /// One blow landed during a battle.
    fn battle_log_entry(&mut self, _entry: &BattleLogEntry) -> DelveResult<()> {
        Ok(())
    }

    /// Experience granted to the party. This is the only way the engine
    /// touches party or character data.
    fn award_xp(&mut self, _amount: u32, _reason: &str) -> DelveResult<()> {
        Ok(())
    }

    fn battle_finished(
        &mut self,
        _result: BattleResult,
        _summary: &BattleSummary,
    ) -> DelveResult<()> {
        Ok(())
    }

    /// Share of floor cells visited so far, in percent, plus a compass hint
    /// such as `"north-east"`.
    fn exploration_progress(&mut self, _percent: f32, _position_hint: &str) -> DelveResult<()> {
        Ok(())
    }
}

/// Orchestration telemetry. Mirror only; nothing reported here feeds back
/// into gameplay.
pub trait DungeonMaster {
    /// An accepted step: the new cell, the `(dx, dy)` travelled and the
    /// heading after the move.
    fn party_moved(&mut self, _cell: Position, _delta: (f32, f32), _heading: f32) -> DelveResult<()> {
        Ok(())
    }

    fn monster_spawned(&mut self, _monster: &MonsterInstance) -> DelveResult<()> {
        Ok(())
    }

    /// d20 initiative for both sides. Turn order is unaffected.
    fn initiative_rolled(
        &mut self,
        _monster: &MonsterInstance,
        _party_roll: u32,
        _monster_roll: u32,
    ) -> DelveResult<()> {
        Ok(())
    }

    fn damage_applied(&mut self, _entry: &BattleLogEntry) -> DelveResult<()> {
        Ok(())
    }
}
