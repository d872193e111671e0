//! Error types for engine misuse.
//!
//! Player mistakes never show up here: a malformed or illegal move resolves
//! to a game outcome, not an `Err`. These errors describe callers handing the
//! engine bad configuration, bad state strings, or out-of-order calls.

/// Errors raised while validating game configuration or settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },

    #[error("{game} needs at least {min_rows}x{min_cols} cells, got {rows}x{cols}")]
    BoardTooSmall {
        game: String,
        min_rows: usize,
        min_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{game} is played on a fixed {rows}x{cols} board, got {got_rows}x{got_cols}")]
    FixedBoard {
        game: String,
        rows: usize,
        cols: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("at least 2 players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("symbol {0:?} is reserved by the state encoding")]
    ReservedSymbol(char),

    #[error("player symbol {0:?} appears more than once in the player order")]
    DuplicatePlayer(char),

    #[error("player symbol {0:?} is missing from the piece alphabet")]
    PlayerNotInAlphabet(char),
}

/// Errors raised while decoding a RepString.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepStringError {
    #[error("state string has no board field")]
    MissingBoard,

    #[error("state string has no turn field")]
    MissingTurn,

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} covers {found} cells, expected {expected}")]
    RowWidth { row: usize, expected: usize, found: usize },

    #[error("row {row} has a non-canonical empty run {run:?}")]
    InvalidRun { row: usize, run: String },

    #[error("row {row} contains unknown symbol {symbol:?}")]
    UnknownSymbol { row: usize, symbol: char },

    #[error("turn token {0:?} is not in the player order")]
    UnknownTurn(String),
}

/// Errors raised by a running or resuming session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("game is already over")]
    GameOver,

    #[error("cannot resume from state string: {0}")]
    Resume(#[from] RepStringError),

    #[error("{game} rejected auxiliary state {tokens:?}")]
    Auxiliary { game: String, tokens: Vec<String> },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while looking up or creating a registered game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no game registered under {0:?}")]
    UnknownGame(String),

    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
}
