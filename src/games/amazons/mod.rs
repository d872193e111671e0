//! Game of the Amazons.
//!
//! Two players, four queens each, on a fixed 10x10 board:
//! - A turn moves one of your queens like a chess queen, then drops an
//!   arrow on any empty cell (the square the queen just left counts)
//! - The queen may not cross or land on an occupied cell
//! - Arrows stay on the board for the rest of the game
//!
//! A side that has no queen with an empty neighboring cell is immobilized
//! and loses; if both sides are immobilized the game is a draw.
//!
//! Move text is six integers: `"startRow startCol endRow endCol arrowRow arrowCol"`.

mod game;

pub use game::{Amazons, AmazonsBuilder, ARROW, SIZE};
