//! Connect Four.
//!
//! Two players drop pieces into the columns of an upright grid:
//! - A piece falls to the lowest empty cell of its column
//! - Four in a row horizontally, vertically or diagonally wins
//! - A full board with no four-in-a-row is a draw
//!
//! The board defaults to 6 rows by 7 columns and may be enlarged through
//! `GridSettings`. Move text is a single column index.

mod game;

pub use game::{ConnectFour, ConnectFourBuilder, RUN_LENGTH};
