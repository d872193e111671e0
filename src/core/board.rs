//! The grid every game is played on.
//!
//! A `Board` is a `rows × cols` matrix of single-character cells. Row 0 is the
//! bottom row; a space (`EMPTY`) marks an empty cell. Dimensions are fixed for
//! the lifetime of a board.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::moves::ValidatedMove;

/// The empty-cell marker.
pub const EMPTY: char = ' ';

/// The eight king-step directions as (row delta, col delta).
pub const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// An in-bounds cell coordinate.
///
/// Only a `Board` hands these out, so holding a `Square` means the
/// coordinate was bounds-checked against some board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A fixed-size grid of single-character cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major, row 0 first.
    cells: Vec<char>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "Board must have at least one cell");

        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bounds-check a signed coordinate.
    ///
    /// Coordinates come straight from player text, so they may be negative.
    #[must_use]
    pub fn square(&self, row: i32, col: i32) -> Option<Square> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.rows && col < self.cols).then_some(Square { row, col })
    }

    /// Step from a square by a delta, staying on the board.
    #[must_use]
    pub fn step(&self, from: Square, d_row: i32, d_col: i32) -> Option<Square> {
        self.square(from.row as i32 + d_row, from.col as i32 + d_col)
    }

    #[must_use]
    pub fn get(&self, square: Square) -> char {
        self.cells[square.row * self.cols + square.col]
    }

    /// Cell at a signed coordinate, `None` when off the board.
    #[must_use]
    pub fn at(&self, row: i32, col: i32) -> Option<char> {
        self.square(row, col).map(|sq| self.get(sq))
    }

    #[must_use]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square) == EMPTY
    }

    pub fn set(&mut self, square: Square, piece: char) {
        self.cells[square.row * self.cols + square.col] = piece;
    }

    /// Clear a cell.
    pub fn clear(&mut self, square: Square) {
        self.set(square, EMPTY);
    }

    /// One row, left to right.
    #[must_use]
    pub fn row(&self, row: usize) -> &[char] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Every square, row-major from row 0.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Square { row, col }))
    }

    /// Every (square, cell) pair, row-major from row 0.
    pub fn cells(&self) -> impl Iterator<Item = (Square, char)> + '_ {
        self.squares().map(move |sq| (sq, self.get(sq)))
    }

    /// On-board 8-neighbors of a square.
    pub fn neighbors(&self, square: Square) -> impl Iterator<Item = Square> + '_ {
        KING_STEPS
            .iter()
            .filter_map(move |&(dr, dc)| self.step(square, dr, dc))
    }

    #[must_use]
    pub fn count(&self, piece: char) -> usize {
        self.cells.iter().filter(|&&c| c == piece).count()
    }

    /// Write a validated move: relocation first, then placement.
    ///
    /// Placement after relocation lets a piece be placed on the square the
    /// moving piece just vacated.
    pub fn apply(&mut self, mv: &ValidatedMove) {
        if let Some(relocation) = mv.relocation {
            let piece = self.get(relocation.from);
            self.clear(relocation.from);
            self.set(relocation.to, piece);
        }
        if let Some(placement) = mv.placement {
            self.set(placement.at, placement.piece);
        }
    }
}

impl fmt::Display for Board {
    /// Highest row first, each prefixed with its index, empty cells as `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = (self.rows - 1).to_string().len();
        for row in (0..self.rows).rev() {
            write!(f, "{:>width$} ", row, width = label_width)?;
            for &cell in self.row(row) {
                let shown = if cell == EMPTY { '.' } else { cell };
                write!(f, "{}", shown)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moves::{Placement, Relocation};

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(6, 7);

        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 7);
        assert_eq!(board.count(EMPTY), 42);
        assert!(board.squares().all(|sq| board.is_empty(sq)));
    }

    #[test]
    fn test_square_bounds() {
        let board = Board::new(3, 4);

        assert_eq!(board.square(2, 3), Some(Square { row: 2, col: 3 }));
        assert_eq!(board.square(3, 0), None);
        assert_eq!(board.square(0, 4), None);
        assert_eq!(board.square(-1, 0), None);
        assert_eq!(board.square(0, -1), None);
    }

    #[test]
    fn test_set_and_get_are_row_major() {
        let mut board = Board::new(2, 3);
        let sq = board.square(1, 2).unwrap();
        board.set(sq, 'x');

        assert_eq!(board.get(sq), 'x');
        assert_eq!(board.row(1), &[EMPTY, EMPTY, 'x']);
        assert_eq!(board.row(0), &[EMPTY, EMPTY, EMPTY]);
        assert_eq!(board.at(1, 2), Some('x'));
        assert_eq!(board.at(5, 5), None);
    }

    #[test]
    fn test_neighbors_at_corner_and_center() {
        let board = Board::new(3, 3);

        let corner = board.square(0, 0).unwrap();
        assert_eq!(board.neighbors(corner).count(), 3);

        let center = board.square(1, 1).unwrap();
        assert_eq!(board.neighbors(center).count(), 8);
    }

    #[test]
    fn test_apply_relocation_then_placement_on_vacated_square() {
        let mut board = Board::new(4, 4);
        let from = board.square(0, 0).unwrap();
        let to = board.square(2, 2).unwrap();
        board.set(from, 'Q');

        board.apply(&ValidatedMove {
            relocation: Some(Relocation { from, to }),
            placement: Some(Placement { piece: 'X', at: from }),
        });

        assert_eq!(board.get(to), 'Q');
        assert_eq!(board.get(from), 'X');
        assert_eq!(board.count('Q'), 1);
    }

    #[test]
    fn test_display_highest_row_first() {
        let mut board = Board::new(2, 3);
        board.set(board.square(0, 0).unwrap(), 'r');
        board.set(board.square(1, 2).unwrap(), 'y');

        assert_eq!(board.to_string(), "1 ..y\n0 r..\n");
    }
}
