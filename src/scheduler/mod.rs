//! Turn scheduling.
//!
//! A `Session` asks the current player for move text, hands it to the
//! rule-set, and either advances the turn or ends the game. Everything
//! game-specific stays behind `RuleSet`.

mod session;
mod transport;

pub use session::{MoveRecord, Phase, Session, TurnResult};
pub use transport::{MoveSource, ScriptedSource};
