//! The seam between the scheduler and whatever delivers player moves.
//!
//! Network sessions and wire protocols live outside this crate. All the
//! scheduler needs is something that, given the player to move and the
//! current state string, eventually hands back the move text, or nothing if
//! the player disconnected or ran out of time.

use std::collections::VecDeque;

use crate::core::Player;

/// Source of player moves.
pub trait MoveSource {
    /// Ask `player` for a move in the position `rep_string`.
    ///
    /// `None` means no reply (disconnect, timeout); the scheduler treats it
    /// exactly like an invalid move.
    fn request_move(&mut self, player: &Player, rep_string: &str) -> Option<String>;
}

impl<F> MoveSource for F
where
    F: FnMut(&Player, &str) -> Option<String>,
{
    fn request_move(&mut self, player: &Player, rep_string: &str) -> Option<String> {
        self(player, rep_string)
    }
}

/// Replays a fixed list of moves in turn order, then goes silent.
///
/// ```
/// use rust_supergrid::core::{Player, PlayerId};
/// use rust_supergrid::scheduler::{MoveSource, ScriptedSource};
///
/// let mut source = ScriptedSource::new(["3", "4"]);
/// let player = Player::new(PlayerId::new(0), 'r');
/// assert_eq!(source.request_move(&player, "").as_deref(), Some("3"));
/// assert_eq!(source.remaining(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    moves: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            moves: moves.into_iter().map(Into::into).collect(),
        }
    }

    /// Moves not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl MoveSource for ScriptedSource {
    fn request_move(&mut self, _player: &Player, _rep_string: &str) -> Option<String> {
        self.moves.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_scripted_source_goes_silent() {
        let mut source = ScriptedSource::new(vec!["a1".to_string()]);
        let player = Player::new(PlayerId::new(0), 'x');

        assert_eq!(source.request_move(&player, "s").as_deref(), Some("a1"));
        assert_eq!(source.request_move(&player, "s"), None);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_closure_source_sees_player_and_state() {
        let mut seen = Vec::new();
        let mut source = |player: &Player, rep: &str| {
            seen.push((player.symbol, rep.to_string()));
            Some("0".to_string())
        };
        let player = Player::new(PlayerId::new(1), 'y');

        assert_eq!(source.request_move(&player, "7/7 y").as_deref(), Some("0"));
        drop(source);
        assert_eq!(seen, vec![('y', "7/7 y".to_string())]);
    }
}
