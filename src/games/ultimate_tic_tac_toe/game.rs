//! Ultimate Tic-Tac-Toe rule-set.

use tracing::debug;

use crate::core::{Board, ConfigError, GameConfig, GridSettings, Move, Player, Square, ValidatedMove, EMPTY};
use crate::rules::{square_of, GameOverCode, IllegalMove, OutcomeTable, RuleSet};

const CROSS: char = 'x';
const NOUGHT: char = 'o';

const SIZE: usize = 9;
const SUB_SIZE: usize = 3;

/// Three-in-a-row lines of a 3x3 grid as (row, col) offsets.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Sub-board (1-9) containing a square.
#[must_use]
pub fn sub_board_of(square: Square) -> u8 {
    (square.col / SUB_SIZE + SUB_SIZE * (square.row / SUB_SIZE) + 1) as u8
}

/// Sub-board (1-9) that a square's position inside its own sub-board points at.
fn target_of(square: Square) -> u8 {
    (square.col % SUB_SIZE + SUB_SIZE * (square.row % SUB_SIZE) + 1) as u8
}

/// The bottom-left square of a sub-board.
fn origin_of(index: u8) -> Square {
    let i = usize::from(index - 1);
    Square {
        row: i / SUB_SIZE * SUB_SIZE,
        col: i % SUB_SIZE * SUB_SIZE,
    }
}

fn sub_board_square(index: u8, (row, col): (usize, usize)) -> Square {
    let origin = origin_of(index);
    Square {
        row: origin.row + row,
        col: origin.col + col,
    }
}

fn sub_board_squares(index: u8) -> impl Iterator<Item = Square> {
    (0..SUB_SIZE).flat_map(move |row| (0..SUB_SIZE).map(move |col| sub_board_square(index, (row, col))))
}

/// Ultimate Tic-Tac-Toe rules.
#[derive(Clone, Debug)]
pub struct UltimateTicTacToe {
    config: GameConfig,
    outcomes: OutcomeTable,
    /// Sub-board the next move must target; `None` if unconstrained.
    forced: Option<u8>,
}

/// Builder for creating an `UltimateTicTacToe` rule-set.
#[derive(Clone, Debug, Default)]
pub struct UltimateTicTacToeBuilder {
    settings: GridSettings,
}

impl UltimateTicTacToeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board settings. Only 9x9 is accepted.
    pub fn settings(mut self, settings: GridSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Result<UltimateTicTacToe, ConfigError> {
        self.settings.resolve_fixed(UltimateTicTacToe::NAME, (SIZE, SIZE))?;
        let game = UltimateTicTacToe::new();
        game.config.validate()?;
        Ok(game)
    }
}

impl UltimateTicTacToe {
    pub const NAME: &'static str = "UltimateTicTacToe";

    pub fn new() -> Self {
        Self {
            config: GameConfig::new(Self::NAME, SIZE, SIZE)
                .with_alias("MegaMinerAI-##-UltimateTicTacToe")
                .with_player_order(&[CROSS, NOUGHT]),
            outcomes: OutcomeTable::standard_two_player(),
            forced: None,
        }
    }

    /// Sub-board the next move must target, `None` if any is allowed.
    #[must_use]
    pub fn forced(&self) -> Option<u8> {
        self.forced
    }

    /// Three-in-a-row winner inside one sub-board.
    fn line_winner(board: &Board, index: u8) -> Option<char> {
        LINES.iter().find_map(|line| {
            let first = board.get(sub_board_square(index, line[0]));
            let complete = first != EMPTY
                && line[1..]
                    .iter()
                    .all(|&cell| board.get(sub_board_square(index, cell)) == first);
            complete.then_some(first)
        })
    }

    /// Owner of a claimed sub-board: every cell holds the same symbol.
    fn owner(board: &Board, index: u8) -> Option<char> {
        let mut cells = sub_board_squares(index).map(|sq| board.get(sq));
        let first = cells.next()?;
        (first != EMPTY && cells.all(|c| c == first)).then_some(first)
    }

    /// Claimed or full.
    fn is_decided(board: &Board, index: u8) -> bool {
        sub_board_squares(index).all(|sq| !board.is_empty(sq))
    }

    /// Three claimed sub-boards in a row on the meta-board.
    fn meta_winner(board: &Board) -> Option<char> {
        LINES.iter().find_map(|line| {
            let index = |(row, col): (usize, usize)| (col + SUB_SIZE * row + 1) as u8;
            let first = Self::owner(board, index(line[0]))?;
            line[1..]
                .iter()
                .all(|&cell| Self::owner(board, index(cell)) == Some(first))
                .then_some(first)
        })
    }
}

impl Default for UltimateTicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet for UltimateTicTacToe {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn outcomes(&self) -> &OutcomeTable {
        &self.outcomes
    }

    fn set_initial_board_state(&mut self, _board: &mut Board) {
        self.forced = None;
    }

    fn convert_submove_to_move(&self, _board: &Board, mover: &Player, submove: &str) -> Move {
        let mut chars = submove.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(letter), Some(digit), None) if letter.is_ascii_lowercase() && digit.is_ascii_digit() => {
                let col = letter as i32 - 'a' as i32;
                let row = digit as i32 - '1' as i32;
                Move::new().with_placement(mover.symbol, row, col)
            }
            _ => Move::new(),
        }
    }

    fn validate(&self, board: &Board, mv: &Move, player: &Player) -> Result<ValidatedMove, IllegalMove> {
        if mv.start().is_some() || mv.end().is_some() {
            return Err(IllegalMove::UnexpectedFields);
        }
        let at = square_of(board, "place", mv.place())?;

        let piece = mv.placed_piece.ok_or(IllegalMove::Incomplete)?;
        if piece != player.symbol {
            return Err(IllegalMove::WrongPiece {
                expected: player.symbol,
                found: piece,
            });
        }
        if !board.is_empty(at) {
            return Err(IllegalMove::Occupied(at));
        }
        if let Some(expected) = self.forced {
            let found = sub_board_of(at);
            if found != expected {
                return Err(IllegalMove::WrongSubBoard { expected, found });
            }
        }

        Ok(ValidatedMove::place(piece, at))
    }

    fn apply(&mut self, board: &mut Board, mv: &ValidatedMove, _player: &Player) {
        board.apply(mv);
        let Some(placement) = mv.placement else {
            return;
        };

        let played = sub_board_of(placement.at);
        if let Some(winner) = Self::line_winner(board, played) {
            debug!(sub_board = played, %winner, "sub-board claimed");
            for sq in sub_board_squares(played) {
                board.set(sq, winner);
            }
        }

        let target = target_of(placement.at);
        self.forced = (!Self::is_decided(board, target)).then_some(target);
    }

    fn game_over_code(&self, board: &Board) -> GameOverCode {
        if let Some(winner) = Self::meta_winner(board) {
            return match self.config.turn_index(winner) {
                Some(index) => GameOverCode(index as u8 + 1),
                None => GameOverCode::CONTINUE,
            };
        }
        if board.count(EMPTY) == 0 {
            GameOverCode(3)
        } else {
            GameOverCode::CONTINUE
        }
    }

    fn auxiliary(&self) -> Vec<String> {
        vec![self.forced.unwrap_or(0).to_string()]
    }

    /// Accepts `0` or the index of an undecided sub-board.
    fn restore_auxiliary(&mut self, board: &Board, tokens: &[String]) -> bool {
        let [token] = tokens else {
            return false;
        };
        let forced = match token.parse::<u8>() {
            Ok(0) => None,
            Ok(index @ 1..=9) if !Self::is_decided(board, index) => Some(index),
            _ => return false,
        };
        self.forced = forced;
        true
    }
}
