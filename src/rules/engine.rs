//! Rule-set trait for game implementations.
//!
//! Games implement `RuleSet` to define their rules:
//! - Where the pieces start
//! - How move text becomes a `Move`
//! - Which moves are legal and what they do
//! - When and how the game ends

use crate::core::{Board, GameConfig, Move, Player, PlayerId, Square, ValidatedMove};

use super::outcome::{GameOverCode, GameResult, Outcome, OutcomeTable};

/// Why a move was rejected.
///
/// Reasons are for logs and tests. Players only ever see the outcome message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("player sent no move")]
    NoReply,

    #[error("move is missing fields this game requires")]
    Incomplete,

    #[error("move sets fields this game does not use")]
    UnexpectedFields,

    #[error("{part} coordinate ({row}, {col}) is off the board")]
    OffBoard { part: &'static str, row: i32, col: i32 },

    #[error("{0} does not hold one of the mover's pieces")]
    NotOwnPiece(Square),

    #[error("{0} is occupied")]
    Occupied(Square),

    #[error("{from} to {to} is not a straight line")]
    NotALine { from: Square, to: Square },

    #[error("path from {from} to {to} is blocked at {at}")]
    PathBlocked { from: Square, to: Square, at: Square },

    #[error("placed piece {found:?} is not {expected:?}")]
    WrongPiece { expected: char, found: char },

    #[error("{0} has nothing beneath it")]
    Unsupported(Square),

    #[error("play is forced into sub-board {expected}, not {found}")]
    WrongSubBoard { expected: u8, found: u8 },
}

/// Rule-set trait.
///
/// Games implement this trait to define their rules. The scheduler calls
/// these methods once per turn and never interprets game-specific concepts.
///
/// ## Implementation Notes
///
/// - `convert_submove_to_move`: never fails. Unparseable text becomes a
///   `Move` that `validate` rejects.
/// - `validate`: sees the board read-only. All legality checking lives here.
/// - `apply`: only ever called with a move `validate` accepted, so it cannot
///   fail. Auxiliary state is updated here.
/// - `transition`: the provided composition of the two. A rejected move
///   cannot have touched the board or the rule-set's own state.
/// - `game_over_code`: `GameOverCode::CONTINUE` if play goes on.
pub trait RuleSet {
    /// Dimensions, player order, alphabet, name.
    fn config(&self) -> &GameConfig;

    /// Fixed code-to-outcome mapping.
    fn outcomes(&self) -> &OutcomeTable;

    /// Place the starting pieces on a fresh board and reset auxiliary state.
    fn set_initial_board_state(&mut self, board: &mut Board);

    /// Translate move text into a standardized `Move`.
    fn convert_submove_to_move(&self, board: &Board, mover: &Player, submove: &str) -> Move;

    /// Full legality check.
    fn validate(&self, board: &Board, mv: &Move, player: &Player) -> Result<ValidatedMove, IllegalMove>;

    /// Write an accepted move.
    fn apply(&mut self, board: &mut Board, mv: &ValidatedMove, _player: &Player) {
        board.apply(mv);
    }

    /// Validate, then apply.
    fn transition(&mut self, board: &mut Board, mv: &Move, player: &Player) -> Result<(), IllegalMove> {
        let validated = self.validate(board, mv, player)?;
        self.apply(board, &validated, player);
        Ok(())
    }

    /// Inspect the position for termination.
    fn game_over_code(&self, board: &Board) -> GameOverCode;

    /// Map a nonzero code to winners and losers.
    fn declare_winners_and_losers(&self, code: GameOverCode) -> Option<Outcome> {
        self.outcomes().declare(code)
    }

    /// Auxiliary RepString tokens. Empty for games without auxiliary state.
    fn auxiliary(&self) -> Vec<String> {
        Vec::new()
    }

    /// Rebuild auxiliary state from RepString tokens when resuming.
    ///
    /// Returns false if the tokens do not describe a valid state.
    fn restore_auxiliary(&mut self, _board: &Board, tokens: &[String]) -> bool {
        tokens.is_empty()
    }

    /// The outcome for `mover` losing by an invalid move.
    fn forfeit(&self, mover: PlayerId) -> Outcome {
        let table = self.outcomes();
        table
            .forfeit_code(mover)
            .and_then(|code| table.declare(code))
            .unwrap_or_else(|| Outcome {
                code: GameOverCode::UNLISTED,
                message: format!("{} submitted an invalid move", mover),
                result: GameResult::loser(mover, self.config().player_count()),
            })
    }
}

impl<R: RuleSet + ?Sized> RuleSet for Box<R> {
    fn config(&self) -> &GameConfig {
        (**self).config()
    }

    fn outcomes(&self) -> &OutcomeTable {
        (**self).outcomes()
    }

    fn set_initial_board_state(&mut self, board: &mut Board) {
        (**self).set_initial_board_state(board)
    }

    fn convert_submove_to_move(&self, board: &Board, mover: &Player, submove: &str) -> Move {
        (**self).convert_submove_to_move(board, mover, submove)
    }

    fn validate(&self, board: &Board, mv: &Move, player: &Player) -> Result<ValidatedMove, IllegalMove> {
        (**self).validate(board, mv, player)
    }

    fn apply(&mut self, board: &mut Board, mv: &ValidatedMove, player: &Player) {
        (**self).apply(board, mv, player)
    }

    fn transition(&mut self, board: &mut Board, mv: &Move, player: &Player) -> Result<(), IllegalMove> {
        (**self).transition(board, mv, player)
    }

    fn game_over_code(&self, board: &Board) -> GameOverCode {
        (**self).game_over_code(board)
    }

    fn declare_winners_and_losers(&self, code: GameOverCode) -> Option<Outcome> {
        (**self).declare_winners_and_losers(code)
    }

    fn auxiliary(&self) -> Vec<String> {
        (**self).auxiliary()
    }

    fn restore_auxiliary(&mut self, board: &Board, tokens: &[String]) -> bool {
        (**self).restore_auxiliary(board, tokens)
    }

    fn forfeit(&self, mover: PlayerId) -> Outcome {
        (**self).forfeit(mover)
    }
}

/// Bounds-check one coordinate pair of a move.
pub fn square_of(board: &Board, part: &'static str, coords: Option<(i32, i32)>) -> Result<Square, IllegalMove> {
    let (row, col) = coords.ok_or(IllegalMove::Incomplete)?;
    board
        .square(row, col)
        .ok_or(IllegalMove::OffBoard { part, row, col })
}
