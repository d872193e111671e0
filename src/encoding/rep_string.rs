//! RepString encode/decode.
//!
//! Layout: `<board> <turn> [<aux> ...]`
//!
//! - Board rows are emitted from the highest index down to row 0, separated
//!   by `/`.
//! - Within a row, a run of empty cells collapses to its decimal count; the
//!   count is flushed before the next piece and at the end of the row.
//! - `<turn>` is the player-order token of the player to move.
//! - Auxiliary tokens are opaque to the engine; each rule-set defines its own.
//!
//! Both directions are pure functions of (dimensions, alphabet, player
//! order), so every reachable state survives encode → decode → encode
//! unchanged.

use serde::{Deserialize, Serialize};

use crate::core::{Board, GameConfig, RepStringError, Square, EMPTY, ROW_SEPARATOR};

/// A decoded state string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepString {
    pub board: Board,
    /// Player-order token of the player to move.
    pub turn: char,
    pub auxiliary: Vec<String>,
}

impl RepString {
    /// Parse a state string for a game with the given configuration.
    pub fn decode(text: &str, config: &GameConfig) -> Result<Self, RepStringError> {
        let mut fields = text.split(' ');

        let board_field = fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or(RepStringError::MissingBoard)?;
        let board = decode_board(board_field, config.rows, config.cols, &config.alphabet)?;

        let turn_field = fields.next().ok_or(RepStringError::MissingTurn)?;
        let mut turn_chars = turn_field.chars();
        let turn = match (turn_chars.next(), turn_chars.next()) {
            (Some(c), None) if config.turn_index(c).is_some() => c,
            _ => return Err(RepStringError::UnknownTurn(turn_field.to_string())),
        };

        let auxiliary = fields.map(str::to_string).collect();

        Ok(Self { board, turn, auxiliary })
    }

    /// Re-encode this snapshot.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_state(&self.board, self.turn, &self.auxiliary)
    }
}

/// Encode only the board field.
///
/// ```
/// use rust_supergrid::core::Board;
/// use rust_supergrid::encoding::encode_board;
///
/// let mut board = Board::new(2, 4);
/// board.set(board.square(0, 1).unwrap(), 'r');
/// assert_eq!(encode_board(&board), "4/1r2");
/// ```
#[must_use]
pub fn encode_board(board: &Board) -> String {
    let mut out = String::with_capacity(board.rows() * (board.cols() + 1));

    for row in (0..board.rows()).rev() {
        let mut empties = 0usize;
        for &cell in board.row(row) {
            if cell == EMPTY {
                empties += 1;
            } else {
                if empties != 0 {
                    out.push_str(&empties.to_string());
                    empties = 0;
                }
                out.push(cell);
            }
        }
        if empties != 0 {
            out.push_str(&empties.to_string());
        }
        if row != 0 {
            out.push(ROW_SEPARATOR);
        }
    }

    out
}

/// Decode only the board field.
pub fn decode_board(
    text: &str,
    rows: usize,
    cols: usize,
    alphabet: &[char],
) -> Result<Board, RepStringError> {
    let encoded_rows: Vec<&str> = text.split(ROW_SEPARATOR).collect();
    if encoded_rows.len() != rows {
        return Err(RepStringError::RowCount {
            expected: rows,
            found: encoded_rows.len(),
        });
    }

    let mut board = Board::new(rows, cols);

    for (i, encoded) in encoded_rows.iter().enumerate() {
        let row = rows - 1 - i;
        let mut col = 0usize;
        let mut run = String::new();

        for ch in encoded.chars() {
            if ch.is_ascii_digit() {
                run.push(ch);
                continue;
            }
            col = advance(row, col, cols, &run)?;
            run.clear();

            if ch == EMPTY || !alphabet.contains(&ch) {
                return Err(RepStringError::UnknownSymbol { row, symbol: ch });
            }
            if col >= cols {
                return Err(RepStringError::RowWidth {
                    row,
                    expected: cols,
                    found: col + 1,
                });
            }
            board.set(Square { row, col }, ch);
            col += 1;
        }
        col = advance(row, col, cols, &run)?;

        if col != cols {
            return Err(RepStringError::RowWidth {
                row,
                expected: cols,
                found: col,
            });
        }
    }

    Ok(board)
}

/// Skip a pending empty run, refusing to walk past the end of the row.
fn advance(row: usize, col: usize, cols: usize, run: &str) -> Result<usize, RepStringError> {
    let skip = parse_run(row, run)?;
    col.checked_add(skip)
        .filter(|&end| end <= cols)
        .ok_or(RepStringError::RowWidth {
            row,
            expected: cols,
            found: col.saturating_add(skip),
        })
}

/// Length of a pending empty run; `""` means no run.
fn parse_run(row: usize, run: &str) -> Result<usize, RepStringError> {
    if run.is_empty() {
        return Ok(0);
    }
    let invalid = || RepStringError::InvalidRun {
        row,
        run: run.to_string(),
    };
    if run.starts_with('0') {
        return Err(invalid());
    }
    run.parse().map_err(|_| invalid())
}

/// Encode a full state string.
#[must_use]
pub fn encode_state(board: &Board, turn: char, auxiliary: &[String]) -> String {
    let mut out = encode_board(board);
    out.push(' ');
    out.push(turn);
    for token in auxiliary {
        debug_assert!(!token.contains(' '), "auxiliary tokens must not contain spaces");
        out.push(' ');
        out.push_str(token);
    }
    out
}

/// The first state string of a game: the first player-order entry moves.
#[must_use]
pub fn encode_initial(board: &Board, config: &GameConfig, auxiliary: &[String]) -> String {
    encode_state(board, config.player_order[0], auxiliary)
}

/// The state string after `mover` has moved: the turn passes to the next
/// player-order entry, wrapping around.
#[must_use]
pub fn encode_after_move(board: &Board, config: &GameConfig, mover: char, auxiliary: &[String]) -> String {
    encode_state(board, next_turn(config, mover), auxiliary)
}

/// The player-order token following `current`.
#[must_use]
pub fn next_turn(config: &GameConfig, current: char) -> char {
    let index = config.turn_index(current).unwrap_or(0);
    config.player_order[(index + 1) % config.player_order.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: usize, cols: usize) -> GameConfig {
        GameConfig::new("test", rows, cols)
            .with_player_order(&['r', 'y'])
            .with_piece('X')
    }

    #[test]
    fn test_empty_board_encodes_as_counts() {
        let board = Board::new(3, 12);
        assert_eq!(encode_board(&board), "12/12/12");
    }

    #[test]
    fn test_runs_flush_before_pieces_and_at_row_end() {
        let mut board = Board::new(1, 7);
        board.set(board.square(0, 0).unwrap(), 'r');
        board.set(board.square(0, 3).unwrap(), 'y');
        board.set(board.square(0, 4).unwrap(), 'y');

        assert_eq!(encode_board(&board), "r2yy2");
    }

    #[test]
    fn test_encode_state_with_auxiliary() {
        let board = Board::new(2, 2);
        let aux = vec!["5".to_string(), "k".to_string()];

        assert_eq!(encode_state(&board, 'x', &aux), "2/2 x 5 k");
        assert_eq!(encode_state(&board, 'x', &[]), "2/2 x");
    }

    #[test]
    fn test_turn_advances_and_wraps() {
        let config = config(2, 2);
        let board = Board::new(2, 2);

        assert_eq!(encode_initial(&board, &config, &[]), "2/2 r");
        assert_eq!(encode_after_move(&board, &config, 'r', &[]), "2/2 y");
        assert_eq!(encode_after_move(&board, &config, 'y', &[]), "2/2 r");
    }

    #[test]
    fn test_decode_restores_board_and_fields() {
        let config = config(2, 12);
        let decoded = RepString::decode("10Xr/y11 y 7", &config).unwrap();

        assert_eq!(decoded.turn, 'y');
        assert_eq!(decoded.auxiliary, vec!["7".to_string()]);
        assert_eq!(decoded.board.at(1, 10), Some('X'));
        assert_eq!(decoded.board.at(1, 11), Some('r'));
        assert_eq!(decoded.board.at(0, 0), Some('y'));
        assert_eq!(decoded.encode(), "10Xr/y11 y 7");
    }

    #[test]
    fn test_decode_rejects_malformed_boards() {
        let config = config(2, 3);

        assert_eq!(
            RepString::decode("3 r", &config),
            Err(RepStringError::RowCount { expected: 2, found: 1 })
        );
        assert_eq!(
            RepString::decode("3/2 r", &config),
            Err(RepStringError::RowWidth { row: 0, expected: 3, found: 2 })
        );
        assert_eq!(
            RepString::decode("3/rrrr r", &config),
            Err(RepStringError::RowWidth { row: 0, expected: 3, found: 4 })
        );
        assert_eq!(
            RepString::decode("3/03 r", &config),
            Err(RepStringError::InvalidRun { row: 0, run: "03".into() })
        );
        assert_eq!(
            RepString::decode("3/r0rr r", &config),
            Err(RepStringError::InvalidRun { row: 0, run: "0".into() })
        );
        assert_eq!(
            RepString::decode("3/r18446744073709551615 r", &config),
            Err(RepStringError::RowWidth { row: 0, expected: 3, found: usize::MAX })
        );
        assert_eq!(
            RepString::decode("3/99999999999999999999 r", &config),
            Err(RepStringError::InvalidRun { row: 0, run: "99999999999999999999".into() })
        );
        assert_eq!(
            RepString::decode("3/4 r", &config),
            Err(RepStringError::RowWidth { row: 0, expected: 3, found: 4 })
        );
        assert_eq!(
            RepString::decode("3/1q1 r", &config),
            Err(RepStringError::UnknownSymbol { row: 0, symbol: 'q' })
        );
    }

    #[test]
    fn test_decode_rejects_bad_turn() {
        let config = config(1, 1);

        assert_eq!(RepString::decode("1", &config), Err(RepStringError::MissingTurn));
        assert_eq!(RepString::decode("", &config), Err(RepStringError::MissingBoard));
        assert_eq!(
            RepString::decode("1 X", &config),
            Err(RepStringError::UnknownTurn("X".into()))
        );
        assert_eq!(
            RepString::decode("1 ry", &config),
            Err(RepStringError::UnknownTurn("ry".into()))
        );
    }
}
