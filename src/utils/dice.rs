use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of randomness for the demonstration endpoints
pub trait Dice: Send + Sync {
    /// Uniform roll in `0..sides`. `sides` is never zero.
    fn roll(&self, sides: u32) -> u32;
}

/// Thread-local RNG backed dice
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDice;

impl Dice for ThreadDice {
    fn roll(&self, sides: u32) -> u32 {
        rand::thread_rng().gen_range(0..sides)
    }
}

/// Replays a fixed sequence of rolls, cycling when exhausted.
///
/// Each value is reduced modulo the requested number of sides.
#[derive(Debug)]
pub struct ScriptedDice {
    rolls: Vec<u32>,
    cursor: AtomicUsize,
}

impl ScriptedDice {
    pub fn new(rolls: impl Into<Vec<u32>>) -> Self {
        let rolls = rolls.into();
        Self {
            rolls: if rolls.is_empty() { vec![0] } else { rolls },
            cursor: AtomicUsize::new(0),
        }
    }

    /// Dice that always lands on `value`
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }
}

impl Dice for ScriptedDice {
    fn roll(&self, sides: u32) -> u32 {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.rolls.len();
        self.rolls[index] % sides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_dice_stays_in_range() {
        let dice = ThreadDice;
        for _ in 0..100 {
            assert!(dice.roll(6) < 6);
        }
        assert_eq!(dice.roll(1), 0);
    }

    #[test]
    fn test_scripted_dice_cycles() {
        let dice = ScriptedDice::new(vec![3, 1]);
        assert_eq!(dice.roll(10), 3);
        assert_eq!(dice.roll(10), 1);
        assert_eq!(dice.roll(10), 3);
    }

    #[test]
    fn test_scripted_dice_wraps_to_sides() {
        let dice = ScriptedDice::constant(12);
        assert_eq!(dice.roll(10), 2);
        assert_eq!(dice.roll(2), 0);
    }
}
