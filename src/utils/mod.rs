pub mod dice;

pub use dice::{Dice, ScriptedDice, ThreadDice};
