//! Amazons rule-set.

use crate::core::{Board, ConfigError, GameConfig, GridSettings, Move, Player, Square, ValidatedMove};
use crate::rules::{square_of, GameOverCode, IllegalMove, OutcomeTable, RuleSet};

/// Board side length.
pub const SIZE: usize = 10;

/// Arrow symbol. Arrows belong to nobody.
pub const ARROW: char = 'X';

const WHITE: char = 'Q';
const BLACK: char = 'q';

const WHITE_START: [(usize, usize); 4] = [(0, 3), (0, 6), (3, 0), (3, 9)];
const BLACK_START: [(usize, usize); 4] = [(6, 0), (6, 9), (9, 3), (9, 6)];

/// Amazons rules.
#[derive(Clone, Debug)]
pub struct Amazons {
    config: GameConfig,
    outcomes: OutcomeTable,
}

/// Builder for creating an `Amazons` rule-set.
#[derive(Clone, Debug, Default)]
pub struct AmazonsBuilder {
    settings: GridSettings,
}

impl AmazonsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board settings. Only the standard 10x10 board is accepted.
    pub fn settings(mut self, settings: GridSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Result<Amazons, ConfigError> {
        let (rows, cols) = self.settings.resolve_fixed(Amazons::NAME, (SIZE, SIZE))?;
        let game = Amazons::with_size(rows, cols);
        game.config.validate()?;
        Ok(game)
    }
}

impl Amazons {
    pub const NAME: &'static str = "Amazons";

    /// Standard game on the 10x10 board.
    pub fn new() -> Self {
        Self::with_size(SIZE, SIZE)
    }

    fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            config: GameConfig::new(Self::NAME, rows, cols)
                .with_alias("MegaMinerAI-##-Amazons")
                .with_player_order(&[WHITE, BLACK])
                .with_piece(ARROW),
            outcomes: OutcomeTable::standard_two_player(),
        }
    }

    /// True if any of `symbol`'s queens has an empty neighbor.
    fn can_move(board: &Board, symbol: char) -> bool {
        board
            .cells()
            .any(|(sq, cell)| cell == symbol && board.neighbors(sq).any(|n| board.is_empty(n)))
    }
}

impl Default for Amazons {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit step from `from` toward `to` along a rook or bishop line.
fn direction(from: Square, to: Square) -> Option<(i32, i32)> {
    let d_row = to.row as i32 - from.row as i32;
    let d_col = to.col as i32 - from.col as i32;
    if (d_row, d_col) == (0, 0) {
        return None;
    }
    (d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs()).then(|| (d_row.signum(), d_col.signum()))
}

/// Check that every cell after `from` up to and including `to` is free.
fn check_path(board: &Board, from: Square, to: Square) -> Result<(), IllegalMove> {
    let (d_row, d_col) = direction(from, to).ok_or(IllegalMove::NotALine { from, to })?;

    let mut at = from;
    while let Some(next) = board.step(at, d_row, d_col) {
        let free = board.is_empty(next);
        if next == to {
            return if free { Ok(()) } else { Err(IllegalMove::Occupied(to)) };
        }
        if !free {
            return Err(IllegalMove::PathBlocked { from, to, at: next });
        }
        at = next;
    }
    // Walked off the board without meeting `to`; cannot happen for in-bounds squares.
    Err(IllegalMove::NotALine { from, to })
}

impl RuleSet for Amazons {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn outcomes(&self) -> &OutcomeTable {
        &self.outcomes
    }

    fn set_initial_board_state(&mut self, board: &mut Board) {
        for (starts, symbol) in [(WHITE_START, WHITE), (BLACK_START, BLACK)] {
            for (row, col) in starts {
                board.set(Square { row, col }, symbol);
            }
        }
    }

    fn convert_submove_to_move(&self, _board: &Board, _mover: &Player, submove: &str) -> Move {
        let numbers: Result<Vec<i32>, _> = submove.split_whitespace().map(str::parse).collect();
        match numbers.as_deref() {
            Ok(&[sr, sc, er, ec, ar, ac]) => Move::new()
                .with_relocation(sr, sc, er, ec)
                .with_placement(ARROW, ar, ac),
            _ => Move::new(),
        }
    }

    fn validate(&self, board: &Board, mv: &Move, player: &Player) -> Result<ValidatedMove, IllegalMove> {
        let start = square_of(board, "start", mv.start())?;
        let end = square_of(board, "end", mv.end())?;
        let arrow = square_of(board, "arrow", mv.place())?;

        let piece = mv.placed_piece.ok_or(IllegalMove::Incomplete)?;
        if piece != ARROW {
            return Err(IllegalMove::WrongPiece {
                expected: ARROW,
                found: piece,
            });
        }
        if board.get(start) != player.symbol {
            return Err(IllegalMove::NotOwnPiece(start));
        }

        check_path(board, start, end)?;

        // The arrow goes on any free cell. The queen now stands on `end` and
        // its old square is free.
        if arrow == end || !(board.is_empty(arrow) || arrow == start) {
            return Err(IllegalMove::Occupied(arrow));
        }

        Ok(ValidatedMove::relocate_and_place(start, end, ARROW, arrow))
    }

    fn game_over_code(&self, board: &Board) -> GameOverCode {
        match (Self::can_move(board, WHITE), Self::can_move(board, BLACK)) {
            (true, true) => GameOverCode::CONTINUE,
            (true, false) => GameOverCode(1),
            (false, true) => GameOverCode(2),
            (false, false) => GameOverCode(3),
        }
    }
}
