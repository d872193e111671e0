//! Game-over codes and outcome tables.
//!
//! A rule-set reports termination as a small integer code. Zero means play
//! continues; every nonzero code indexes the rule-set's fixed `OutcomeTable`,
//! which maps it to a message and to winner/loser sets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::core::PlayerId;

/// Termination code returned by `RuleSet::game_over_code`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameOverCode(pub u8);

impl GameOverCode {
    /// Play continues.
    pub const CONTINUE: GameOverCode = GameOverCode(0);

    /// Game over, but the outcome table had no entry for what happened.
    pub const UNLISTED: GameOverCode = GameOverCode(u8::MAX);

    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    #[must_use]
    pub const fn is_over(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for GameOverCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who won and who lost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Explicit winner and loser sets.
    Decided {
        winners: SmallVec<[PlayerId; 2]>,
        losers: SmallVec<[PlayerId; 2]>,
    },
    /// Every player draws.
    Draw,
}

impl GameResult {
    /// One winner, everyone else loses.
    #[must_use]
    pub fn winner(player: PlayerId, player_count: usize) -> Self {
        GameResult::Decided {
            winners: SmallVec::from_elem(player, 1),
            losers: PlayerId::all(player_count).filter(|&p| p != player).collect(),
        }
    }

    /// One loser, everyone else wins.
    #[must_use]
    pub fn loser(player: PlayerId, player_count: usize) -> Self {
        GameResult::Decided {
            winners: PlayerId::all(player_count).filter(|&p| p != player).collect(),
            losers: SmallVec::from_elem(player, 1),
        }
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Decided { winners, .. } => winners.contains(&player),
            GameResult::Draw => false,
        }
    }

    #[must_use]
    pub fn is_loser(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Decided { losers, .. } => losers.contains(&player),
            GameResult::Draw => false,
        }
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, GameResult::Draw)
    }
}

/// What a table entry means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The given player wins, the rest lose.
    Winner(PlayerId),
    /// Everyone draws.
    Draw,
    /// The given player submitted an invalid move and loses; the rest win.
    Forfeit(PlayerId),
}

/// One row of an outcome table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEntry {
    pub code: GameOverCode,
    pub message: String,
    pub verdict: Verdict,
}

/// The end of a game, as reported to the lifecycle collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub code: GameOverCode,
    /// Human-readable message. The only text players ever see.
    pub message: String,
    pub result: GameResult,
}

/// Fixed mapping from game-over codes to outcomes.
///
/// ```
/// use rust_supergrid::core::PlayerId;
/// use rust_supergrid::rules::{GameOverCode, OutcomeTable};
///
/// let table = OutcomeTable::standard_two_player();
/// let outcome = table.declare(GameOverCode::new(2)).unwrap();
/// assert_eq!(outcome.message, "Player 2 wins");
/// assert!(outcome.result.is_winner(PlayerId::new(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTable {
    player_count: usize,
    entries: Vec<OutcomeEntry>,
}

impl OutcomeTable {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            entries: Vec::new(),
        }
    }

    /// Add an entry. Code 0 is reserved for "continue".
    #[must_use]
    pub fn with_entry(mut self, code: u8, message: impl Into<String>, verdict: Verdict) -> Self {
        assert!(code != 0, "Code 0 means the game continues");
        self.entries.push(OutcomeEntry {
            code: GameOverCode(code),
            message: message.into(),
            verdict,
        });
        self
    }

    /// The table every bundled two-player game uses.
    #[must_use]
    pub fn standard_two_player() -> Self {
        let (p1, p2) = (PlayerId::new(0), PlayerId::new(1));
        Self::new(2)
            .with_entry(1, "Player 1 wins", Verdict::Winner(p1))
            .with_entry(2, "Player 2 wins", Verdict::Winner(p2))
            .with_entry(3, "Draw", Verdict::Draw)
            .with_entry(4, "Player 1 submitted an invalid move", Verdict::Forfeit(p1))
            .with_entry(5, "Player 2 submitted an invalid move", Verdict::Forfeit(p2))
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn entry(&self, code: GameOverCode) -> Option<&OutcomeEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// Code announcing a draw.
    #[must_use]
    pub fn draw_code(&self) -> Option<GameOverCode> {
        self.find(Verdict::Draw)
    }

    /// Code announcing that `player` forfeited by moving illegally.
    #[must_use]
    pub fn forfeit_code(&self, player: PlayerId) -> Option<GameOverCode> {
        self.find(Verdict::Forfeit(player))
    }

    fn find(&self, verdict: Verdict) -> Option<GameOverCode> {
        self.entries.iter().find(|e| e.verdict == verdict).map(|e| e.code)
    }

    /// Map a nonzero code to its outcome.
    #[must_use]
    pub fn declare(&self, code: GameOverCode) -> Option<Outcome> {
        let entry = self.entry(code)?;
        let result = match entry.verdict {
            Verdict::Winner(p) => GameResult::winner(p, self.player_count),
            Verdict::Forfeit(p) => GameResult::loser(p, self.player_count),
            Verdict::Draw => GameResult::Draw,
        };
        Some(Outcome {
            code,
            message: entry.message.clone(),
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_code() {
        assert!(!GameOverCode::CONTINUE.is_over());
        assert!(GameOverCode::new(3).is_over());
        assert_eq!(GameOverCode::default(), GameOverCode::CONTINUE);
        assert!(GameOverCode::UNLISTED.is_over());
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::winner(PlayerId::new(1), 3);
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
        assert!(result.is_loser(PlayerId::new(0)));
        assert!(result.is_loser(PlayerId::new(2)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));
        assert!(!draw.is_loser(PlayerId::new(0)));
        assert!(draw.is_draw());
    }

    #[test]
    fn test_loser_makes_everyone_else_win() {
        let result = GameResult::loser(PlayerId::new(0), 3);
        assert!(result.is_loser(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
        assert!(result.is_winner(PlayerId::new(2)));
    }

    #[test]
    fn test_standard_table_codes() {
        let table = OutcomeTable::standard_two_player();
        let (p1, p2) = (PlayerId::new(0), PlayerId::new(1));

        assert_eq!(table.draw_code(), Some(GameOverCode(3)));
        assert_eq!(table.forfeit_code(p1), Some(GameOverCode(4)));
        assert_eq!(table.forfeit_code(p2), Some(GameOverCode(5)));
    }

    #[test]
    fn test_declare() {
        let table = OutcomeTable::standard_two_player();

        let draw = table.declare(GameOverCode(3)).unwrap();
        assert_eq!(draw.message, "Draw");
        assert!(draw.result.is_draw());

        let forfeit = table.declare(GameOverCode(5)).unwrap();
        assert!(forfeit.result.is_loser(PlayerId::new(1)));
        assert!(forfeit.result.is_winner(PlayerId::new(0)));

        assert!(table.declare(GameOverCode(9)).is_none());
        assert!(table.declare(GameOverCode::CONTINUE).is_none());
    }

    #[test]
    #[should_panic(expected = "Code 0 means the game continues")]
    fn test_zero_code_entry_rejected() {
        let _ = OutcomeTable::new(2).with_entry(0, "nope", Verdict::Draw);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = OutcomeTable::standard_two_player()
            .declare(GameOverCode(1))
            .unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
