//! Connect Four rule-set.

use crate::core::{Board, ConfigError, GameConfig, GridSettings, Move, Player, Square, ValidatedMove, EMPTY};
use crate::rules::{square_of, GameOverCode, IllegalMove, OutcomeTable, RuleSet};

/// Pieces in a row needed to win.
pub const RUN_LENGTH: usize = 4;

const RED: char = 'r';
const YELLOW: char = 'y';

const DEFAULT_SIZE: (usize, usize) = (6, 7);
const MIN_SIZE: (usize, usize) = (6, 7);

/// Line directions, in scan order: verticals, rising diagonals,
/// horizontals, falling diagonals.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (1, 1), (0, 1), (1, -1)];

/// Connect Four rules.
#[derive(Clone, Debug)]
pub struct ConnectFour {
    config: GameConfig,
    outcomes: OutcomeTable,
    /// Every maximal line long enough to hold a winning run.
    lines: Vec<Vec<Square>>,
}

/// Builder for creating a `ConnectFour` rule-set.
#[derive(Clone, Debug, Default)]
pub struct ConnectFourBuilder {
    settings: GridSettings,
}

impl ConnectFourBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board settings. Anything smaller than 6x7 is rejected.
    pub fn settings(mut self, settings: GridSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.settings.rows = Some(rows);
        self
    }

    pub fn cols(mut self, cols: usize) -> Self {
        self.settings.cols = Some(cols);
        self
    }

    pub fn build(self) -> Result<ConnectFour, ConfigError> {
        let (rows, cols) = self.settings.resolve(ConnectFour::NAME, DEFAULT_SIZE, MIN_SIZE)?;
        let game = ConnectFour::with_size(rows, cols);
        game.config.validate()?;
        Ok(game)
    }
}

impl ConnectFour {
    pub const NAME: &'static str = "ConnectFour";

    /// Standard 6x7 game.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_SIZE.0, DEFAULT_SIZE.1)
    }

    fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            config: GameConfig::new(Self::NAME, rows, cols)
                .with_alias("MegaMinerAI-##-ConnectFour")
                .with_player_order(&[RED, YELLOW]),
            outcomes: OutcomeTable::standard_two_player(),
            lines: maximal_lines(rows, cols),
        }
    }

    /// The win-detection lines, in scan order.
    pub fn lines(&self) -> &[Vec<Square>] {
        &self.lines
    }

    /// True if a piece dropped here would come to rest here.
    fn is_supported(board: &Board, at: Square) -> bool {
        at.row == 0 || !board.is_empty(Square { row: at.row - 1, col: at.col })
    }

    /// The symbol of the first complete run found in scan order.
    fn first_run(&self, board: &Board) -> Option<char> {
        self.lines.iter().find_map(|line| {
            let mut run = 0;
            let mut last = None;
            for &sq in line {
                let cell = board.get(sq);
                if board.is_empty(sq) {
                    run = 0;
                } else if last == Some(cell) {
                    run += 1;
                } else {
                    run = 1;
                }
                last = Some(cell);
                if run >= RUN_LENGTH {
                    return Some(cell);
                }
            }
            None
        })
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumerate every maximal straight line of at least `RUN_LENGTH` cells.
fn maximal_lines(rows: usize, cols: usize) -> Vec<Vec<Square>> {
    let probe = Board::new(rows, cols);
    let mut lines = Vec::new();

    for (d_row, d_col) in DIRECTIONS {
        // A line starts where stepping backwards leaves the board.
        for start in probe.squares().filter(|&sq| probe.step(sq, -d_row, -d_col).is_none()) {
            let line: Vec<Square> =
                std::iter::successors(Some(start), |&sq| probe.step(sq, d_row, d_col)).collect();
            if line.len() >= RUN_LENGTH {
                lines.push(line);
            }
        }
    }
    lines
}

impl RuleSet for ConnectFour {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn outcomes(&self) -> &OutcomeTable {
        &self.outcomes
    }

    fn set_initial_board_state(&mut self, _board: &mut Board) {}

    /// Resolve the column to the lowest empty row.
    ///
    /// A full column resolves to the row just above the board, which
    /// `validate` rejects as off-board.
    fn convert_submove_to_move(&self, board: &Board, mover: &Player, submove: &str) -> Move {
        let Ok(col) = submove.trim().parse::<i32>() else {
            return Move::new();
        };
        let row = (0..board.rows() as i32)
            .find(|&row| board.at(row, col) == Some(EMPTY))
            .unwrap_or(if board.square(0, col).is_some() { board.rows() as i32 } else { 0 });

        Move::new().with_placement(mover.symbol, row, col)
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
        if !Self::is_supported(board, at) {
            return Err(IllegalMove::Unsupported(at));
        }

        Ok(ValidatedMove::place(piece, at))
    }

    fn game_over_code(&self, board: &Board) -> GameOverCode {
        if let Some(winner) = self.first_run(board) {
            return match self.config.turn_index(winner) {
                Some(index) => GameOverCode(index as u8 + 1),
                None => GameOverCode::CONTINUE,
            };
        }

        let playable = board
            .squares()
            .any(|sq| board.is_empty(sq) && Self::is_supported(board, sq));
        if playable {
            GameOverCode::CONTINUE
        } else {
            GameOverCode(3)
        }
    }
}
