//! # Battle Resolver
//!
//! A small tactical melee between the party and one monster on a square grid.
//!
//! A battle is `Active` from construction until it resolves as victory, defeat
//! or flight. Attacks are legal only when the combatants are adjacent (Chebyshev
//! distance ≤ 1) and always draw the enemy's reply unless the enemy dies.
//! A failed retreat costs nothing and does not hand the enemy a turn.

use crate::game::{Dice, Direction, MonsterInstance, Position};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Battle tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Edge length of the tactical grid; odd so a center cell exists
    pub grid_size: i32,
    pub player_max_hp: i32,
    /// Cells between the player and the enemy at setup, along +x
    pub enemy_offset: i32,
    /// Faces on the damage die
    pub damage_die: u32,
    /// Flat damage added to every roll
    pub damage_bonus: i32,
    /// Player criticals double damage
    pub player_crit_chance: f64,
    /// Enemy criticals add `enemy_crit_bonus`
    pub enemy_crit_chance: f64,
    pub enemy_crit_bonus: i32,
    pub retreat_chance: f64,
    /// Experience reported on victory
    pub victory_xp: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            grid_size: 7,
            player_max_hp: 18,
            enemy_offset: 2,
            damage_die: 6,
            damage_bonus: 1,
            player_crit_chance: 0.08,
            enemy_crit_chance: 0.05,
            enemy_crit_bonus: 2,
            retreat_chance: 0.5,
            victory_xp: 25,
        }
    }
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleResult {
    Victory,
    Defeat,
    Fled,
}

impl fmt::Display for BattleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BattleResult::Victory => "victory",
            BattleResult::Defeat => "defeat",
            BattleResult::Fled => "fled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    Active,
    Resolved(BattleResult),
}

/// One blow, as reported to collaborators and shown in the battle log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLogEntry {
    pub actor: String,
    pub target: String,
    pub damage: i32,
    pub critical: bool,
}

impl fmt::Display for BattleLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hits {} for {}", self.actor, self.target, self.damage)?;
        if self.critical {
            f.write_str(" (critical!)")?;
        }
        Ok(())
    }
}

/// Player actions while fighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleAction {
    Move(Direction),
    Attack,
    Retreat,
}

/// What an action did. An ignored action produces no events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    Moved(Position),
    Hit(BattleLogEntry),
    RetreatFailed,
    Resolved(BattleResult),
}

/// End-of-battle numbers for collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleSummary {
    pub monster_id: String,
    pub monster_name: String,
    pub rounds: u32,
    pub player_hp: i32,
    pub enemy_hp: i32,
}

impl fmt::Display for BattleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} rounds (party {} hp, foe {} hp)",
            self.monster_name, self.rounds, self.player_hp, self.enemy_hp
        )
    }
}

/// A battle in progress or just resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Battle {
    config: BattleConfig,
    monster: MonsterInstance,
    player: Position,
    enemy: Position,
    player_hp: i32,
    player_max_hp: i32,
    phase: BattlePhase,
    rounds: u32,
    log: Vec<BattleLogEntry>,
}

/// Name used for the party in battle logs.
pub const PARTY_NAME: &str = "Party";

impl Battle {
    /// Sets up the tactical grid: player at the center, enemy `enemy_offset`
    /// cells east of it, clamped to the grid. A grid smaller than one cell is
    /// treated as a single cell.
    pub fn new(monster: MonsterInstance, mut config: BattleConfig) -> Self {
        config.grid_size = config.grid_size.max(1);
        let center = config.grid_size / 2;
        let player = Position::new(center, center);
        let enemy = Position::new(center + config.enemy_offset, center)
            .clamped(0, config.grid_size - 1);
        let player_max_hp = config.player_max_hp;

        debug!(
            "Battle setup: {} ({} hp) at {:?}, party at {:?}",
            monster.name, monster.hp, enemy, player
        );

        Self {
            config,
            monster,
            player,
            enemy,
            player_hp: player_max_hp,
            player_max_hp,
            phase: BattlePhase::Active,
            rounds: 0,
            log: Vec::new(),
        }
    }

    pub fn monster(&self) -> &MonsterInstance {
        &self.monster
    }

    pub fn grid_size(&self) -> i32 {
        self.config.grid_size
    }

    pub fn player_position(&self) -> Position {
        self.player
    }

    pub fn enemy_position(&self) -> Position {
        self.enemy
    }

    pub fn player_hp(&self) -> i32 {
        self.player_hp
    }

    pub fn player_max_hp(&self) -> i32 {
        self.player_max_hp
    }

    pub fn enemy_hp(&self) -> i32 {
        self.monster.hp
    }

    pub fn enemy_max_hp(&self) -> i32 {
        self.monster.max_hp
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn result(&self) -> Option<BattleResult> {
        match self.phase {
            BattlePhase::Active => None,
            BattlePhase::Resolved(result) => Some(result),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == BattlePhase::Active
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn log(&self) -> &[BattleLogEntry] {
        &self.log
    }

    /// Whether the combatants stand within melee reach.
    pub fn in_melee_range(&self) -> bool {
        self.player.chebyshev_distance(self.enemy) <= 1
    }

    pub fn summary(&self) -> BattleSummary {
        BattleSummary {
            monster_id: self.monster.id.clone(),
            monster_name: self.monster.name.clone(),
            rounds: self.rounds,
            player_hp: self.player_hp,
            enemy_hp: self.monster.hp,
        }
    }

    /// Applies one player action. Actions after resolution are ignored.
    pub fn act(&mut self, action: BattleAction, dice: &mut dyn Dice) -> Vec<BattleEvent> {
        if !self.is_active() {
            return Vec::new();
        }
        match action {
            BattleAction::Move(direction) => self.step(direction),
            BattleAction::Attack => self.attack(dice),
            BattleAction::Retreat => self.retreat(dice),
        }
    }

    /// Shifts the player one cell, clamped to the grid. Cells never block.
    fn step(&mut self, direction: Direction) -> Vec<BattleEvent> {
        let target = (self.player + direction.to_delta()).clamped(0, self.config.grid_size - 1);
        if target == self.player {
            return Vec::new();
        }
        self.player = target;
        vec![BattleEvent::Moved(target)]
    }

    fn attack(&mut self, dice: &mut dyn Dice) -> Vec<BattleEvent> {
        if !self.in_melee_range() {
            debug!("Attack ignored: {} out of reach", self.monster.name);
            return Vec::new();
        }

        self.rounds += 1;
        let mut events = Vec::new();

        let mut damage = self.damage_roll(dice);
        let critical = dice.chance(self.config.player_crit_chance);
        if critical {
            damage *= 2;
        }
        self.monster.hp -= damage;
        events.push(self.record(PARTY_NAME.to_string(), self.monster.name.clone(), damage, critical));

        if self.monster.hp <= 0 {
            self.phase = BattlePhase::Resolved(BattleResult::Victory);
            events.push(BattleEvent::Resolved(BattleResult::Victory));
            return events;
        }

        let mut reply = self.damage_roll(dice);
        let enemy_critical = dice.chance(self.config.enemy_crit_chance);
        if enemy_critical {
            reply += self.config.enemy_crit_bonus;
        }
        self.player_hp -= reply;
        events.push(self.record(self.monster.name.clone(), PARTY_NAME.to_string(), reply, enemy_critical));

        if self.player_hp <= 0 {
            self.phase = BattlePhase::Resolved(BattleResult::Defeat);
            events.push(BattleEvent::Resolved(BattleResult::Defeat));
        }

        events
    }

    /// Coin flip to leave. Failure changes nothing.
    fn retreat(&mut self, dice: &mut dyn Dice) -> Vec<BattleEvent> {
        if dice.chance(self.config.retreat_chance) {
            self.phase = BattlePhase::Resolved(BattleResult::Fled);
            vec![BattleEvent::Resolved(BattleResult::Fled)]
        } else {
            vec![BattleEvent::RetreatFailed]
        }
    }

    fn damage_roll(&self, dice: &mut dyn Dice) -> i32 {
        self.config.damage_bonus + dice.roll(1, self.config.damage_die.max(1)) as i32
    }

    fn record(&mut self, actor: String, target: String, damage: i32, critical: bool) -> BattleEvent {
        let entry = BattleLogEntry {
            actor,
            target,
            damage,
            critical,
        };
        self.log.push(entry.clone());
        BattleEvent::Hit(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::ScriptedDice;
    use crate::generation::MonsterTemplate;

    fn monster(hp: i32) -> MonsterInstance {
        MonsterInstance::from_template(&MonsterTemplate {
            id: "ogre",
            name: "Ogre",
            hp,
            armor_class: 11,
            challenge_rating: 3.0,
            negotiation_chance: 0.1,
        })
    }

    fn adjacent_battle(hp: i32) -> Battle {
        let mut battle = Battle::new(monster(hp), BattleConfig::default());
        let mut dice = ScriptedDice::new();
        battle.act(BattleAction::Move(Direction::East), &mut dice);
        assert!(battle.in_melee_range());
        battle
    }

    #[test]
    fn test_setup_positions() {
        let battle = Battle::new(monster(10), BattleConfig::default());
        assert_eq!(battle.player_position(), Position::new(3, 3));
        assert_eq!(battle.enemy_position(), Position::new(5, 3));
        assert_eq!(battle.player_hp(), 18);
        assert_eq!(battle.enemy_hp(), 10);
        assert_eq!(battle.enemy_max_hp(), 10);
        assert!(battle.is_active());
        assert!(!battle.in_melee_range());
    }

    #[test]
    fn test_enemy_offset_clamped_on_small_grid() {
        let config = BattleConfig {
            grid_size: 3,
            ..BattleConfig::default()
        };
        let battle = Battle::new(monster(10), config);
        assert_eq!(battle.player_position(), Position::new(1, 1));
        assert_eq!(battle.enemy_position(), Position::new(2, 1));
    }

    #[test]
    fn test_degenerate_grid_collapses_to_one_cell() {
        for grid_size in [0, -4] {
            let config = BattleConfig {
                grid_size,
                ..BattleConfig::default()
            };
            let mut battle = Battle::new(monster(10), config);
            assert_eq!(battle.grid_size(), 1);
            assert_eq!(battle.player_position(), Position::new(0, 0));
            assert_eq!(battle.enemy_position(), Position::new(0, 0));

            let mut dice = ScriptedDice::new();
            assert!(battle.act(BattleAction::Move(Direction::East), &mut dice).is_empty());
            assert!(battle.in_melee_range());
        }
    }

    #[test]
    fn test_move_clamped_to_grid() {
        let mut battle = Battle::new(monster(10), BattleConfig::default());
        let mut dice = ScriptedDice::new();
        for _ in 0..3 {
            assert_eq!(battle.act(BattleAction::Move(Direction::North), &mut dice).len(), 1);
        }
        assert_eq!(battle.player_position(), Position::new(3, 0));
        assert!(battle.act(BattleAction::Move(Direction::North), &mut dice).is_empty());
        assert_eq!(battle.player_position(), Position::new(3, 0));
    }

    #[test]
    fn test_player_may_share_enemy_cell() {
        let mut battle = Battle::new(monster(10), BattleConfig::default());
        let mut dice = ScriptedDice::new();
        battle.act(BattleAction::Move(Direction::East), &mut dice);
        battle.act(BattleAction::Move(Direction::East), &mut dice);
        assert_eq!(battle.player_position(), battle.enemy_position());
        assert!(battle.in_melee_range());
    }

    #[test]
    fn test_attack_out_of_reach_is_ignored() {
        let mut battle = Battle::new(monster(10), BattleConfig::default());
        let mut dice = ScriptedDice::new().with_rolls([6, 6]).with_uniforms([0.0, 0.0]);

        assert!(battle.act(BattleAction::Attack, &mut dice).is_empty());
        assert_eq!(battle.enemy_hp(), 10);
        assert_eq!(battle.player_hp(), 18);
        assert_eq!(battle.rounds(), 0);
        assert_eq!(dice.pending_rolls(), 2);
    }

    #[test]
    fn test_diagonal_counts_as_adjacent() {
        let mut battle = Battle::new(monster(30), BattleConfig::default());
        let mut dice = ScriptedDice::new();
        battle.act(BattleAction::Move(Direction::East), &mut dice);
        battle.act(BattleAction::Move(Direction::North), &mut dice);
        assert_eq!(battle.player_position(), Position::new(4, 2));
        assert!(battle.in_melee_range());
        assert_eq!(battle.act(BattleAction::Attack, &mut dice).len(), 2);
    }

    #[test]
    fn test_exchange_of_blows() {
        let mut battle = adjacent_battle(20);
        // Player rolls 4 (no crit), enemy rolls 2 (no crit)
        let mut dice = ScriptedDice::new().with_rolls([4, 2]);

        let events = battle.act(BattleAction::Attack, &mut dice);
        assert_eq!(events.len(), 2);
        assert_eq!(battle.enemy_hp(), 20 - 5);
        assert_eq!(battle.player_hp(), 18 - 3);
        assert_eq!(battle.rounds(), 1);
        assert_eq!(battle.log().len(), 2);
        assert_eq!(battle.log()[0].actor, PARTY_NAME);
    }

    #[test]
    fn test_player_critical_doubles() {
        let mut battle = adjacent_battle(30);
        let mut dice = ScriptedDice::new().with_rolls([5, 1]).with_uniforms([0.01]);

        battle.act(BattleAction::Attack, &mut dice);
        assert_eq!(battle.enemy_hp(), 30 - 12);
        assert!(battle.log()[0].critical);
    }

    #[test]
    fn test_enemy_critical_adds_flat_bonus() {
        let mut battle = adjacent_battle(30);
        // Player no crit, enemy crit
        let mut dice = ScriptedDice::new().with_rolls([1, 3]).with_uniforms([0.9, 0.01]);

        battle.act(BattleAction::Attack, &mut dice);
        assert_eq!(battle.player_hp(), 18 - (1 + 3 + 2));
        assert!(battle.log()[1].critical);
    }

    #[test]
    fn test_killing_blow_skips_retaliation() {
        let mut battle = adjacent_battle(1);
        let mut dice = ScriptedDice::new().with_rolls([1, 6]);

        let events = battle.act(BattleAction::Attack, &mut dice);
        assert_eq!(battle.result(), Some(BattleResult::Victory));
        assert_eq!(battle.player_hp(), 18);
        assert_eq!(events.last(), Some(&BattleEvent::Resolved(BattleResult::Victory)));
        assert_eq!(dice.pending_rolls(), 1);
    }

    #[test]
    fn test_defeat_when_party_falls() {
        let config = BattleConfig {
            player_max_hp: 3,
            ..BattleConfig::default()
        };
        let mut battle = Battle::new(monster(50), config);
        let mut dice = ScriptedDice::new();
        battle.act(BattleAction::Move(Direction::East), &mut dice);

        let mut dice = ScriptedDice::new().with_rolls([1, 6]);
        battle.act(BattleAction::Attack, &mut dice);
        assert_eq!(battle.result(), Some(BattleResult::Defeat));
        assert!(battle.act(BattleAction::Attack, &mut dice).is_empty());
    }

    #[test]
    fn test_failed_retreat_costs_nothing() {
        let mut battle = adjacent_battle(20);
        let mut dice = ScriptedDice::new().with_uniforms([0.75, 0.75]).with_rolls([2, 2]);

        assert_eq!(battle.act(BattleAction::Retreat, &mut dice), vec![BattleEvent::RetreatFailed]);
        assert_eq!(battle.player_hp(), 18);
        assert_eq!(battle.rounds(), 0);
        assert!(battle.is_active());

        // Still the player's turn: another retreat attempt, then an attack
        assert_eq!(battle.act(BattleAction::Retreat, &mut dice), vec![BattleEvent::RetreatFailed]);
        let events = battle.act(BattleAction::Attack, &mut dice);
        assert_eq!(events.len(), 2);
        assert_eq!(battle.player_hp(), 18 - 3);
    }

    #[test]
    fn test_successful_retreat_resolves() {
        let mut battle = Battle::new(monster(20), BattleConfig::default());
        let mut dice = ScriptedDice::new().with_uniforms([0.2]);

        battle.act(BattleAction::Retreat, &mut dice);
        assert_eq!(battle.result(), Some(BattleResult::Fled));
        assert_eq!(battle.summary().enemy_hp, 20);
    }

    #[test]
    fn test_log_entry_display() {
        let entry = BattleLogEntry {
            actor: "Party".to_string(),
            target: "Ogre".to_string(),
            damage: 7,
            critical: true,
        };
        assert_eq!(entry.to_string(), "Party hits Ogre for 7 (critical!)");
    }
}
