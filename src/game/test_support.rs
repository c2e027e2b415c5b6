//! Scripted randomness for tests and replays of specific fights.

use crate::game::Dice;
use std::collections::VecDeque;

/// Uniform draw once the queue is empty: just under 1, so every probability
/// check below 1 fails.
const FALLBACK_UNIFORM: f64 = 0.999_999;

/// [`Dice`] that replays queued outcomes.
///
/// Each kind of draw has its own queue. Once a queue runs dry the fallback
/// applies: `uniform` returns just under 1, `roll` returns `low`, `pick`
/// returns 0.
///
/// # Examples
///
/// ```
/// use delve::game::test_support::ScriptedDice;
/// use delve::Dice;
///
/// let mut dice = ScriptedDice::new().with_uniforms([0.0]).with_rolls([6]);
/// assert!(dice.chance(0.5));
/// assert!(!dice.chance(0.5));
/// assert_eq!(dice.roll(1, 6), 6);
/// assert_eq!(dice.roll(1, 6), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    uniforms: VecDeque<f64>,
    rolls: VecDeque<u32>,
    picks: VecDeque<usize>,
}

impl Default for ScriptedDice {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedDice {
    /// Empty script.
    pub fn new() -> Self {
        Self {
            uniforms: VecDeque::new(),
            rolls: VecDeque::new(),
            picks: VecDeque::new(),
        }
    }

    /// Queues uniform draws.
    pub fn with_uniforms(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms.extend(values);
        self
    }

    /// Queues integer rolls. Values are clamped into the requested range.
    pub fn with_rolls(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(values);
        self
    }

    /// Queues table picks. Values are clamped to the table length.
    pub fn with_picks(mut self, values: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(values);
        self
    }

    /// Number of queued rolls not yet consumed.
    pub fn pending_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn uniform(&mut self) -> f64 {
        self.uniforms.pop_front().unwrap_or(FALLBACK_UNIFORM)
    }

    fn roll(&mut self, low: u32, high: u32) -> u32 {
        match self.rolls.pop_front() {
            Some(value) => value.clamp(low, high.max(low)),
            None => low,
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        let value = self.picks.pop_front().unwrap_or(0);
        value.min(len.saturating_sub(1))
    }
}
