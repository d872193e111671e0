//! Canonical state strings ("RepStrings").
//!
//! One line holds everything needed to resume a game: the run-length encoded
//! board, the player to move, and the rule-set's auxiliary tokens. The engine
//! recomputes the whole string after every accepted move; spectators and
//! replay tools parse it with the same functions.

mod rep_string;

pub use rep_string::{
    decode_board, encode_after_move, encode_board, encode_initial, encode_state, next_turn, RepString,
};
