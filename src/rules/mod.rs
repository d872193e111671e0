//! Rule-set trait for game implementations.
//!
//! Games implement `RuleSet` to define:
//! - Starting position
//! - Move text translation
//! - Legality and its effect on the board
//! - Termination and outcome mapping
//!
//! The scheduler calls into `RuleSet` but never interprets game-specific
//! concepts directly.

pub mod engine;
pub mod outcome;

pub use engine::{square_of, IllegalMove, RuleSet};
pub use outcome::{GameOverCode, GameResult, Outcome, OutcomeEntry, OutcomeTable, Verdict};
