//! Ultimate Tic-Tac-Toe.
//!
//! A 9x9 board split into nine 3x3 sub-boards, numbered 1 to 9 row by row
//! starting from the bottom-left:
//! - Winning three in a row inside a sub-board claims it; every cell of a
//!   claimed sub-board is overwritten with the winner's symbol
//! - The cell you play, read as a position inside its own sub-board, picks
//!   the sub-board your opponent must play in next
//! - If that sub-board is already claimed or full, the opponent may play
//!   anywhere
//! - Three claimed sub-boards in a row wins the game
//!
//! Move text is a column letter `a`-`i` followed by a row digit `1`-`9`.
//! The forced sub-board travels in the state string as one auxiliary token,
//! `0` meaning unconstrained.

mod game;

pub use game::{sub_board_of, UltimateTicTacToe, UltimateTicTacToeBuilder};
