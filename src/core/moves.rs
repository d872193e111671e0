//! Move representation.
//!
//! Every game speaks the same move vocabulary: "move a piece from A to B"
//! and/or "place a piece at C". A rule-set fills in only the fields it uses;
//! the rest stay `None`.
//!
//! - `Move` is the raw, unchecked form built from player text. Coordinates are
//!   signed because they come straight from untrusted input.
//! - `ValidatedMove` is what a rule-set returns after full legality checking:
//!   bounds-checked squares, nothing optional left inside a used part.

use serde::{Deserialize, Serialize};

use super::board::Square;

/// A standardized, unchecked move.
///
/// ## Example
///
/// ```
/// use rust_supergrid::core::Move;
///
/// // Drop an 'r' at row 0, column 3
/// let drop = Move::new().with_placement('r', 0, 3);
/// assert!(drop.start_row.is_none());
///
/// // Relocate a piece and leave a blocker behind
/// let shot = Move::new().with_relocation(0, 3, 5, 3).with_placement('X', 5, 7);
/// assert_eq!(shot.end_row, Some(5));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Row of the piece being moved.
    pub start_row: Option<i32>,
    /// Column of the piece being moved.
    pub start_col: Option<i32>,
    /// Destination row of the moving piece.
    pub end_row: Option<i32>,
    /// Destination column of the moving piece.
    pub end_col: Option<i32>,
    /// Symbol of the piece being placed.
    pub placed_piece: Option<char>,
    /// Row the placed piece lands on.
    pub place_row: Option<i32>,
    /// Column the placed piece lands on.
    pub place_col: Option<i32>,
}

impl Move {
    /// A move with every field absent. Every rule-set rejects it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_relocation(mut self, start_row: i32, start_col: i32, end_row: i32, end_col: i32) -> Self {
        self.start_row = Some(start_row);
        self.start_col = Some(start_col);
        self.end_row = Some(end_row);
        self.end_col = Some(end_col);
        self
    }

    #[must_use]
    pub fn with_placement(mut self, piece: char, row: i32, col: i32) -> Self {
        self.placed_piece = Some(piece);
        self.place_row = Some(row);
        self.place_col = Some(col);
        self
    }

    /// Start coordinate, if both halves are present.
    #[must_use]
    pub fn start(&self) -> Option<(i32, i32)> {
        Some((self.start_row?, self.start_col?))
    }

    /// End coordinate, if both halves are present.
    #[must_use]
    pub fn end(&self) -> Option<(i32, i32)> {
        Some((self.end_row?, self.end_col?))
    }

    /// Placement coordinate, if both halves are present.
    #[must_use]
    pub fn place(&self) -> Option<(i32, i32)> {
        Some((self.place_row?, self.place_col?))
    }

    /// True if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A piece moving from one square to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relocation {
    pub from: Square,
    pub to: Square,
}

/// A piece placed onto a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub piece: char,
    pub at: Square,
}

/// A move that passed every legality check of some rule-set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidatedMove {
    pub relocation: Option<Relocation>,
    pub placement: Option<Placement>,
}

impl ValidatedMove {
    #[must_use]
    pub fn place(piece: char, at: Square) -> Self {
        Self {
            relocation: None,
            placement: Some(Placement { piece, at }),
        }
    }

    #[must_use]
    pub fn relocate_and_place(from: Square, to: Square, piece: char, at: Square) -> Self {
        Self {
            relocation: Some(Relocation { from, to }),
            placement: Some(Placement { piece, at }),
        }
    }
}
