//! Core engine types: board, moves, players, configuration, errors.
//!
//! This module contains the game-agnostic building blocks. Games configure
//! them via `GameConfig` rather than modifying the core.

pub mod board;
pub mod config;
pub mod error;
pub mod moves;
pub mod player;

pub use board::{Board, Square, EMPTY, KING_STEPS};
pub use config::{is_reserved_symbol, GameConfig, GridSettings, ROW_SEPARATOR};
pub use error::{ConfigError, RegistryError, RepStringError, SessionError};
pub use moves::{Move, Placement, Relocation, ValidatedMove};
pub use player::{Player, PlayerId, PlayerMap, Standing};
