//! # Encounter Tables
//!
//! The static monster table random encounters are drawn from.

use crate::game::Dice;
use serde::Serialize;

/// A read-only monster definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonsterTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: i32,
    pub armor_class: u32,
    pub challenge_rating: f32,
    /// Probability in `[0, 1]` that talking resolves the encounter
    pub negotiation_chance: f64,
}

/// Monsters that roam the maze.
pub const MONSTER_TABLE: [MonsterTemplate; 6] = [
    MonsterTemplate {
        id: "goblin",
        name: "Goblin",
        hp: 6,
        armor_class: 15,
        challenge_rating: 0.33,
        negotiation_chance: 0.45,
    },
    MonsterTemplate {
        id: "kobold",
        name: "Kobold",
        hp: 4,
        armor_class: 15,
        challenge_rating: 0.25,
        negotiation_chance: 0.55,
    },
    MonsterTemplate {
        id: "skeleton",
        name: "Skeleton",
        hp: 7,
        armor_class: 13,
        challenge_rating: 0.33,
        negotiation_chance: 0.05,
    },
    MonsterTemplate {
        id: "dire_rat",
        name: "Dire Rat",
        hp: 5,
        armor_class: 15,
        challenge_rating: 0.33,
        negotiation_chance: 0.2,
    },
    MonsterTemplate {
        id: "orc",
        name: "Orc",
        hp: 10,
        armor_class: 13,
        challenge_rating: 0.5,
        negotiation_chance: 0.3,
    },
    MonsterTemplate {
        id: "hobgoblin",
        name: "Hobgoblin",
        hp: 12,
        armor_class: 15,
        challenge_rating: 1.0,
        negotiation_chance: 0.35,
    },
];

/// Picks a uniformly random template, or `None` for an empty table.
pub fn pick_template<'a>(table: &'a [MonsterTemplate], dice: &mut dyn Dice) -> Option<&'a MonsterTemplate> {
    if table.is_empty() {
        return None;
    }
    table.get(dice.pick(table.len()))
}

/// Looks a template up by id.
#[cfg(test)]
pub(crate) fn find_template(id: &str) -> Option<&'static MonsterTemplate> {
    MONSTER_TABLE.iter().find(|template| template.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::ScriptedDice;

    #[test]
    fn test_table_is_well_formed() {
        for template in &MONSTER_TABLE {
            assert!(template.hp > 0, "{} has no hp", template.id);
            assert!((0.0..=1.0).contains(&template.negotiation_chance));
        }
    }

    #[test]
    fn test_pick_template_uses_dice() {
        let mut dice = ScriptedDice::new().with_picks([4]);
        let picked = pick_template(&MONSTER_TABLE, &mut dice).unwrap();
        assert_eq!(picked.id, "orc");
    }

    #[test]
    fn test_pick_from_empty_table() {
        let mut dice = ScriptedDice::new();
        assert!(pick_template(&[], &mut dice).is_none());
    }

    #[test]
    fn test_find_template() {
        assert_eq!(find_template("kobold").map(|t| t.hp), Some(4));
        assert!(find_template("beholder").is_none());
    }
}
