//! Game configuration types.
//!
//! Games register with the engine by providing:
//! - `GameConfig`: name, aliases, board dimensions, player order, piece alphabet
//! - `GridSettings`: caller-supplied overrides for the board size
//!
//! The engine never hardcodes dimensions or symbols; games define them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::EMPTY;
use super::error::ConfigError;

/// Row separator inside an encoded board.
pub const ROW_SEPARATOR: char = '/';

/// Returns true if a symbol would be ambiguous inside a RepString.
#[must_use]
pub fn is_reserved_symbol(symbol: char) -> bool {
    symbol == EMPTY || symbol == ROW_SEPARATOR || symbol.is_ascii_digit() || symbol.is_whitespace()
}

/// Registration data for one game.
///
/// ## Example
///
/// ```
/// use rust_supergrid::core::GameConfig;
///
/// let config = GameConfig::new("ConnectFour", 6, 7)
///     .with_alias("MegaMinerAI-##-ConnectFour")
///     .with_player_order(&['r', 'y']);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.turn_index('y'), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Display name, also the primary registry key.
    pub name: String,

    /// Other names the game answers to.
    pub aliases: Vec<String>,

    pub rows: usize,
    pub cols: usize,

    /// Turn order. Each token is also that player's piece symbol.
    pub player_order: SmallVec<[char; 2]>,

    /// Every symbol allowed on the board, player symbols included.
    pub alphabet: SmallVec<[char; 4]>,
}

impl GameConfig {
    /// Create a configuration with no players and an empty alphabet.
    pub fn new(name: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            rows,
            cols,
            player_order: SmallVec::new(),
            alphabet: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the turn order. Player symbols are added to the alphabet.
    #[must_use]
    pub fn with_player_order(mut self, order: &[char]) -> Self {
        self.player_order = SmallVec::from_slice(order);
        for &symbol in order {
            if !self.alphabet.contains(&symbol) {
                self.alphabet.push(symbol);
            }
        }
        self
    }

    /// Allow a non-player piece (walls, blockers, ...).
    #[must_use]
    pub fn with_piece(mut self, symbol: char) -> Self {
        if !self.alphabet.contains(&symbol) {
            self.alphabet.push(symbol);
        }
        self
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_order.len()
    }

    /// Position of a symbol in the turn order.
    #[must_use]
    pub fn turn_index(&self, symbol: char) -> Option<usize> {
        self.player_order.iter().position(|&s| s == symbol)
    }

    /// Check dimensions, player order, and alphabet.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.player_order.len() < 2 {
            return Err(ConfigError::TooFewPlayers(self.player_order.len()));
        }
        if let Some(&symbol) = self.alphabet.iter().find(|&&s| is_reserved_symbol(s)) {
            return Err(ConfigError::ReservedSymbol(symbol));
        }
        for (i, &symbol) in self.player_order.iter().enumerate() {
            if self.player_order[..i].contains(&symbol) {
                return Err(ConfigError::DuplicatePlayer(symbol));
            }
            if !self.alphabet.contains(&symbol) {
                return Err(ConfigError::PlayerNotInAlphabet(symbol));
            }
        }
        Ok(())
    }
}

/// Caller-supplied board size overrides.
///
/// Missing fields fall back to the game's defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

impl GridSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    #[must_use]
    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }

    /// Resolve against defaults, enforcing a minimum size.
    pub fn resolve(
        &self,
        game: &str,
        default: (usize, usize),
        min: (usize, usize),
    ) -> Result<(usize, usize), ConfigError> {
        let rows = self.rows.unwrap_or(default.0);
        let cols = self.cols.unwrap_or(default.1);
        if rows < min.0 || cols < min.1 {
            return Err(ConfigError::BoardTooSmall {
                game: game.to_string(),
                min_rows: min.0,
                min_cols: min.1,
                rows,
                cols,
            });
        }
        Ok((rows, cols))
    }

    /// Resolve for a game whose board size cannot change.
    pub fn resolve_fixed(&self, game: &str, size: (usize, usize)) -> Result<(usize, usize), ConfigError> {
        let rows = self.rows.unwrap_or(size.0);
        let cols = self.cols.unwrap_or(size.1);
        if (rows, cols) != size {
            return Err(ConfigError::FixedBoard {
                game: game.to_string(),
                rows: size.0,
                cols: size.1,
                got_rows: rows,
                got_cols: cols,
            });
        }
        Ok(size)
    }
}
