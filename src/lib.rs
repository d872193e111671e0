//! # rust-supergrid
//!
//! A generic engine for turn-based, perfect-information grid games played
//! by programs.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded board sizes, symbols, or player counts.
//!    Games configure these through `GameConfig`.
//!
//! 2. **Fail Closed**: A malformed or illegal move ends the game for the
//!    player who sent it. Legality is checked in full before anything is
//!    written, so a rejected move never touches shared state.
//!
//! 3. **One Canonical String**: Every position has exactly one RepString,
//!    and a RepString alone is enough to resume the game.
//!
//! ## Architecture
//!
//! - **Rule-sets as traits**: A game is a `RuleSet` implementation chosen
//!   when the session is created. The scheduler never looks inside it.
//!
//! - **Explicit state machine**: A `Session` moves through
//!   `AwaitingMove → Applying → CheckingTermination` and back, or to
//!   `Ended`. Only `AwaitingMove` waits on a player.
//!
//! - **Independent instances**: Sessions share no mutable state and can run
//!   on separate threads without coordination.
//!
//! ## Modules
//!
//! - `core`: Board, moves, players, configuration, errors
//! - `encoding`: RepString encode/decode
//! - `rules`: `RuleSet` trait, game-over codes, outcome tables
//! - `scheduler`: `Session` turn loop and the move transport seam
//! - `games`: Amazons, Connect Four, Ultimate Tic-Tac-Toe, and a registry

pub mod core;
pub mod encoding;
pub mod games;
pub mod rules;
pub mod scheduler;

// Re-export commonly used types
pub use crate::core::{
    Board, Square, EMPTY,
    Move, ValidatedMove,
    Player, PlayerId, PlayerMap, Standing,
    GameConfig, GridSettings,
    ConfigError, RegistryError, RepStringError, SessionError,
};

pub use crate::encoding::RepString;

pub use crate::rules::{GameOverCode, GameResult, IllegalMove, Outcome, OutcomeTable, RuleSet, Verdict};

pub use crate::scheduler::{MoveRecord, MoveSource, Phase, ScriptedSource, Session, TurnResult};

pub use crate::games::{
    Amazons, AmazonsBuilder,
    ConnectFour, ConnectFourBuilder,
    UltimateTicTacToe, UltimateTicTacToeBuilder,
    BoxedRuleSet, GameRegistry,
};
