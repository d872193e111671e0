//! One running game instance.
//!
//! A `Session` owns the board, the seated players, the current state string,
//! and the rule-set. It is an explicit state machine:
//!
//! ```text
//! AwaitingMove ──submit──▶ Applying ──illegal──────────────────────▶ Ended
//!      ▲                       │
//!      │                    accepted
//!      │                       ▼
//!      └──── code 0 ──── CheckingTermination ──── code ≠ 0 ────────▶ Ended
//! ```
//!
//! `AwaitingMove` is the only phase that waits on a player. Each submission
//! runs to the next `AwaitingMove` or to `Ended` before `submit` returns, so
//! exactly one move is ever in flight and nothing else can touch the board
//! meanwhile.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::core::{Board, Player, PlayerId, PlayerMap, SessionError, Standing};
use crate::encoding::{encode_after_move, encode_initial, encode_state, RepString};
use crate::rules::{GameOverCode, GameResult, IllegalMove, Outcome, RuleSet};

use super::transport::MoveSource;

/// Where a session is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the current player's move text.
    AwaitingMove,
    /// Translating and validating a submission.
    Applying,
    /// Asking the rule-set whether the accepted move ended the game.
    CheckingTermination,
    /// Outcome declared. No further moves accepted.
    Ended,
}

/// One submission, accepted or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based turn the submission was made on.
    pub turn: u32,
    pub player: PlayerId,
    /// Raw text, `None` if the player never replied.
    pub submove: Option<String>,
    pub accepted: bool,
    /// State string after the submission.
    pub rep_string: String,
}

/// What a submission led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnResult {
    /// Move applied; `next` is now on move.
    Accepted { next: PlayerId },
    /// The game ended, by this move or by its rejection.
    GameOver(Outcome),
}

/// A single game instance driven turn by turn.
pub struct Session<R: RuleSet> {
    rule_set: R,
    board: Board,
    players: PlayerMap<Player>,
    /// Index into the player order of the player to move.
    turn: usize,
    turn_number: u32,
    rep_string: String,
    phase: Phase,
    outcome: Option<Outcome>,
    history: Vector<MoveRecord>,
}

impl<R: RuleSet> Session<R> {
    /// Start a new game: empty board, starting pieces, first player to move.
    #[instrument(skip(rule_set), fields(game = %rule_set.config().name))]
    pub fn new(mut rule_set: R) -> Result<Self, SessionError> {
        let config = rule_set.config().clone();
        config.validate()?;

        let mut board = Board::new(config.rows, config.cols);
        rule_set.set_initial_board_state(&mut board);
        let rep_string = encode_initial(&board, &config, &rule_set.auxiliary());

        info!(rep_string = %rep_string, "game started");

        Ok(Self {
            rule_set,
            board,
            players: Player::seat_all(&config.player_order),
            turn: 0,
            turn_number: 1,
            rep_string,
            phase: Phase::AwaitingMove,
            outcome: None,
            history: Vector::new(),
        })
    }

    /// Rebuild a game from a state string alone.
    ///
    /// If the decoded position is already terminal, the session starts in
    /// `Ended` with the corresponding outcome.
    #[instrument(skip(rule_set), fields(game = %rule_set.config().name))]
    pub fn resume(mut rule_set: R, rep_string: &str) -> Result<Self, SessionError> {
        let config = rule_set.config().clone();
        config.validate()?;

        let decoded = RepString::decode(rep_string, &config)?;
        if !rule_set.restore_auxiliary(&decoded.board, &decoded.auxiliary) {
            return Err(SessionError::Auxiliary {
                game: config.name.clone(),
                tokens: decoded.auxiliary,
            });
        }
        let turn = config.turn_index(decoded.turn).unwrap_or(0);
        let canonical = encode_state(&decoded.board, decoded.turn, &rule_set.auxiliary());

        let mut session = Self {
            rule_set,
            board: decoded.board,
            players: Player::seat_all(&config.player_order),
            turn,
            turn_number: 1,
            rep_string: canonical,
            phase: Phase::CheckingTermination,
            outcome: None,
            history: Vector::new(),
        };

        info!(rep_string = %session.rep_string, "game resumed");
        session.check_termination();
        Ok(session)
    }

    // === Accessors ===

    #[must_use]
    pub fn rule_set(&self) -> &R {
        &self.rule_set
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// The player on move, `None` once the game has ended.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        (self.phase == Phase::AwaitingMove).then(|| &self.players[PlayerId::new(self.turn as u8)])
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Current canonical state string.
    #[must_use]
    pub fn rep_string(&self) -> &str {
        &self.rep_string
    }

    /// 1-based number of the turn awaiting a move.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Every submission so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    // === Turn processing ===

    /// Feed the current player's reply into the state machine.
    ///
    /// `None` stands for a disconnect or timeout. Any rejected submission
    /// ends the game at once: the mover loses, everyone else wins.
    #[instrument(skip(self), fields(game = %self.rule_set.config().name, turn = self.turn_number))]
    pub fn submit(&mut self, submove: Option<&str>) -> Result<TurnResult, SessionError> {
        if self.phase != Phase::AwaitingMove {
            return Err(SessionError::GameOver);
        }
        self.phase = Phase::Applying;

        let mover = self.players[PlayerId::new(self.turn as u8)].clone();
        let applied = match submove {
            Some(text) => {
                let mv = self.rule_set.convert_submove_to_move(&self.board, &mover, text);
                self.rule_set.transition(&mut self.board, &mv, &mover)
            }
            None => Err(IllegalMove::NoReply),
        };

        if let Err(reason) = applied {
            warn!(player = %mover.id, submove = ?submove, %reason, "invalid move");
            self.record(mover.id, submove, false);
            let outcome = self.rule_set.forfeit(mover.id);
            self.end_by_forfeit(mover.id, submove.unwrap_or_default(), outcome.clone());
            return Ok(TurnResult::GameOver(outcome));
        }

        let config = self.rule_set.config();
        self.rep_string = encode_after_move(&self.board, config, mover.symbol, &self.rule_set.auxiliary());
        self.turn = (self.turn + 1) % config.player_count();
        debug!(player = %mover.id, submove = ?submove, rep_string = %self.rep_string, "move accepted");
        trace!("\n{}", self.board);
        self.record(mover.id, submove, true);
        self.turn_number += 1;

        self.phase = Phase::CheckingTermination;
        match self.check_termination() {
            Some(outcome) => Ok(TurnResult::GameOver(outcome)),
            None => Ok(TurnResult::Accepted {
                next: PlayerId::new(self.turn as u8),
            }),
        }
    }

    /// Drive the game to completion, asking `source` for every move.
    #[instrument(skip_all, fields(game = %self.rule_set.config().name))]
    pub fn run<S: MoveSource + ?Sized>(&mut self, source: &mut S) -> Result<Outcome, SessionError> {
        loop {
            let player = self
                .current_player()
                .cloned()
                .ok_or(SessionError::GameOver)?;
            let reply = source.request_move(&player, &self.rep_string);
            if let TurnResult::GameOver(outcome) = self.submit(reply.as_deref())? {
                return Ok(outcome);
            }
        }
    }

    fn check_termination(&mut self) -> Option<Outcome> {
        debug_assert_eq!(self.phase, Phase::CheckingTermination);

        let code = self.rule_set.game_over_code(&self.board);
        if !code.is_over() {
            self.phase = Phase::AwaitingMove;
            return None;
        }

        let outcome = self.rule_set.declare_winners_and_losers(code).unwrap_or_else(|| {
            error!(%code, "rule-set returned a code missing from its outcome table");
            let table = self.rule_set.outcomes();
            table
                .draw_code()
                .and_then(|draw| table.declare(draw))
                .unwrap_or_else(|| Outcome {
                    code: GameOverCode::UNLISTED,
                    message: format!("Game ended with unknown code {}", code),
                    result: GameResult::Draw,
                })
        });
        self.end(outcome.clone());
        Some(outcome)
    }

    fn end(&mut self, outcome: Outcome) {
        for player in self.players.values_mut() {
            player.standing = match &outcome.result {
                GameResult::Draw => Standing::Drawn(outcome.message.clone()),
                r if r.is_winner(player.id) => Standing::Won(outcome.message.clone()),
                _ => Standing::Lost(outcome.message.clone()),
            };
        }
        self.finish(outcome);
    }

    fn end_by_forfeit(&mut self, mover: PlayerId, submove: &str, outcome: Outcome) {
        for player in self.players.values_mut() {
            player.standing = if player.id == mover {
                Standing::Lost(format!("Made an invalid move ('{}').", submove))
            } else {
                Standing::Won("Opponent made an invalid move.".to_string())
            };
        }
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(code = %outcome.code, message = %outcome.message, "game over");
        self.phase = Phase::Ended;
        self.outcome = Some(outcome);
    }

    fn record(&mut self, player: PlayerId, submove: Option<&str>, accepted: bool) {
        self.history.push_back(MoveRecord {
            turn: self.turn_number,
            player,
            submove: submove.map(str::to_string),
            accepted,
            rep_string: self.rep_string.clone(),
        });
    }
}

impl<R: RuleSet> std::fmt::Debug for Session<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("game", &self.rule_set.config().name)
            .field("phase", &self.phase)
            .field("rep_string", &self.rep_string)
            .field("outcome", &self.outcome)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Move, ValidatedMove, EMPTY};
    use crate::rules::{square_of, OutcomeTable, Verdict};
    use crate::scheduler::ScriptedSource;

    /// Three players take turns filling a 1x3 strip. Whoever takes the
    /// middle cell wins.
    struct Strip {
        config: GameConfig,
        outcomes: OutcomeTable,
        placements: u32,
    }

    impl Strip {
        fn new() -> Self {
            let (a, b, c) = (PlayerId::new(0), PlayerId::new(1), PlayerId::new(2));
            Self::with_outcomes(
                OutcomeTable::new(3)
                    .with_entry(1, "a wins", Verdict::Winner(a))
                    .with_entry(2, "b wins", Verdict::Winner(b))
                    .with_entry(3, "c wins", Verdict::Winner(c))
                    .with_entry(4, "Draw", Verdict::Draw)
                    .with_entry(5, "b forfeits", Verdict::Forfeit(b)),
            )
        }

        fn with_outcomes(outcomes: OutcomeTable) -> Self {
            Self {
                config: GameConfig::new("Strip", 1, 3).with_player_order(&['a', 'b', 'c']),
                outcomes,
                placements: 0,
            }
        }
    }

    impl RuleSet for Strip {
        fn config(&self) -> &GameConfig {
            &self.config
        }

        fn outcomes(&self) -> &OutcomeTable {
            &self.outcomes
        }

        fn set_initial_board_state(&mut self, _board: &mut Board) {
            self.placements = 0;
        }

        fn convert_submove_to_move(&self, _board: &Board, mover: &Player, submove: &str) -> Move {
            match submove.parse::<i32>() {
                Ok(col) => Move::new().with_placement(mover.symbol, 0, col),
                Err(_) => Move::new(),
            }
        }

        fn validate(&self, board: &Board, mv: &Move, player: &Player) -> Result<ValidatedMove, IllegalMove> {
            let at = square_of(board, "place", mv.place())?;
            if !board.is_empty(at) {
                return Err(IllegalMove::Occupied(at));
            }
            Ok(ValidatedMove::place(player.symbol, at))
        }

        fn apply(&mut self, board: &mut Board, mv: &ValidatedMove, _player: &Player) {
            board.apply(mv);
            self.placements += 1;
        }

        fn game_over_code(&self, board: &Board) -> GameOverCode {
            match board.at(0, 1) {
                Some('a') => GameOverCode(1),
                Some('b') => GameOverCode(2),
                Some('c') => GameOverCode(3),
                _ if board.count(EMPTY) == 0 => GameOverCode(4),
                _ => GameOverCode::CONTINUE,
            }
        }

        fn auxiliary(&self) -> Vec<String> {
            vec![self.placements.to_string()]
        }

        fn restore_auxiliary(&mut self, _board: &Board, tokens: &[String]) -> bool {
            match tokens {
                [count] => count.parse().map(|n| self.placements = n).is_ok(),
                _ => false,
            }
        }
    }

    #[test]
    fn test_new_session_awaits_first_player() {
        let session = Session::new(Strip::new()).unwrap();

        assert_eq!(session.phase(), Phase::AwaitingMove);
        assert_eq!(session.rep_string(), "3 a 0");
        assert_eq!(session.current_player().unwrap().symbol, 'a');
        assert_eq!(session.turn_number(), 1);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_turn_order_cycles_through_three_players() {
        let mut session = Session::new(Strip::new()).unwrap();

        assert_eq!(
            session.submit(Some("0")).unwrap(),
            TurnResult::Accepted { next: PlayerId::new(1) }
        );
        assert_eq!(session.rep_string(), "a2 b 1");
        assert_eq!(session.current_player().unwrap().symbol, 'b');

        let result = session.submit(Some("2")).unwrap();
        assert_eq!(result, TurnResult::Accepted { next: PlayerId::new(2) });
        assert_eq!(session.rep_string(), "a1b c 2");
        assert_eq!(session.turn_number(), 3);
    }

    #[test]
    fn test_terminal_code_declares_outcome() {
        let mut session = Session::new(Strip::new()).unwrap();
        session.submit(Some("0")).unwrap();

        let result = session.submit(Some("1")).unwrap();
        let TurnResult::GameOver(outcome) = result else {
            panic!("expected game over");
        };
        assert_eq!(outcome.message, "b wins");
        assert!(session.is_over());
        assert_eq!(session.current_player(), None);
        assert_eq!(session.player(PlayerId::new(1)).standing, Standing::Won("b wins".into()));
        assert_eq!(session.player(PlayerId::new(0)).standing, Standing::Lost("b wins".into()));
        assert_eq!(session.player(PlayerId::new(2)).standing, Standing::Lost("b wins".into()));
    }

    #[test]
    fn test_invalid_move_forfeits_and_leaves_state_untouched() {
        let mut session = Session::new(Strip::new()).unwrap();
        session.submit(Some("0")).unwrap();
        let board_before = session.board().clone();
        let rep_before = session.rep_string().to_string();

        let result = session.submit(Some("0")).unwrap();

        let TurnResult::GameOver(outcome) = result else {
            panic!("expected forfeit");
        };
        assert_eq!(outcome.code, GameOverCode(5));
        assert!(outcome.result.is_loser(PlayerId::new(1)));
        assert!(outcome.result.is_winner(PlayerId::new(0)));
        assert!(outcome.result.is_winner(PlayerId::new(2)));
        assert_eq!(session.board(), &board_before);
        assert_eq!(session.rep_string(), rep_before);
        assert_eq!(session.rule_set().placements, 1);
        assert_eq!(
            session.player(PlayerId::new(1)).standing,
            Standing::Lost("Made an invalid move ('0').".into())
        );
        assert_eq!(
            session.player(PlayerId::new(2)).standing,
            Standing::Won("Opponent made an invalid move.".into())
        );
    }

    #[test]
    fn test_missing_reply_is_an_invalid_move() {
        let mut session = Session::new(Strip::new()).unwrap();

        let result = session.submit(None).unwrap();

        // No forfeit entry for player a: generic loss
        let TurnResult::GameOver(outcome) = result else {
            panic!("expected forfeit");
        };
        assert_eq!(outcome.code, GameOverCode::UNLISTED);
        assert_eq!(outcome.message, "Player 1 submitted an invalid move");
        assert!(outcome.result.is_loser(PlayerId::new(0)));
        assert!(!session.history()[0].accepted);
        assert_eq!(session.history()[0].submove, None);
    }

    #[test]
    fn test_code_missing_from_table_falls_back_to_draw() {
        let draw_only = OutcomeTable::new(3).with_entry(4, "Draw", Verdict::Draw);
        let mut session = Session::new(Strip::with_outcomes(draw_only)).unwrap();

        // Code 1 has no entry
        let result = session.submit(Some("1")).unwrap();

        let TurnResult::GameOver(outcome) = result else {
            panic!("expected game over");
        };
        assert_eq!(outcome.code, GameOverCode(4));
        assert!(outcome.result.is_draw());
        assert_eq!(session.phase(), Phase::Ended);
        assert!(session.players().values().all(|p| p.standing == Standing::Drawn("Draw".into())));
    }

    #[test]
    fn test_code_missing_from_empty_table_is_unlisted() {
        let mut session = Session::new(Strip::with_outcomes(OutcomeTable::new(3))).unwrap();

        let result = session.submit(Some("1")).unwrap();

        let TurnResult::GameOver(outcome) = result else {
            panic!("expected game over");
        };
        assert_eq!(outcome.code, GameOverCode::UNLISTED);
        assert!(outcome.code.is_over());
        assert_eq!(outcome.message, "Game ended with unknown code 1");
        assert!(outcome.result.is_draw());
    }

    #[test]
    fn test_submit_after_end_is_an_error() {
        let mut session = Session::new(Strip::new()).unwrap();
        session.submit(Some("1")).unwrap();

        assert_eq!(session.submit(Some("0")), Err(SessionError::GameOver));
    }

    #[test]
    fn test_run_silent_source_forfeits() {
        let mut session = Session::new(Strip::new()).unwrap();
        let mut source = ScriptedSource::new(["0", "2"]);

        let outcome = session.run(&mut source).unwrap();
        assert_eq!(outcome.message, "Player 3 submitted an invalid move");
        assert!(outcome.result.is_loser(PlayerId::new(2)));
        assert_eq!(session.run(&mut source), Err(SessionError::GameOver));
    }

    #[test]
    fn test_run_reports_outcome() {
        let mut session = Session::new(Strip::new()).unwrap();
        let mut source = ScriptedSource::new(["0", "2", "1"]);

        let outcome = session.run(&mut source).unwrap();
        assert_eq!(outcome.message, "c wins");
        assert_eq!(session.history().len(), 3);
        assert!(session.history().iter().all(|r| r.accepted));
        assert_eq!(session.history()[2].rep_string, "acb a 3");
    }

    #[test]
    fn test_resume_continues_from_state_string() {
        let session = Session::resume(Strip::new(), "a2 b 1").unwrap();

        assert_eq!(session.phase(), Phase::AwaitingMove);
        assert_eq!(session.current_player().unwrap().symbol, 'b');
        assert_eq!(session.rule_set().placements, 1);
        assert_eq!(session.rep_string(), "a2 b 1");
    }

    #[test]
    fn test_resume_terminal_position_ends_immediately() {
        let session = Session::resume(Strip::new(), "aca b 3").unwrap();

        assert!(session.is_over());
        assert_eq!(session.outcome().unwrap().message, "c wins");
    }

    #[test]
    fn test_resume_rejects_bad_auxiliary() {
        let err = Session::resume(Strip::new(), "3 a").unwrap_err();
        assert_eq!(
            err,
            SessionError::Auxiliary {
                game: "Strip".into(),
                tokens: vec![],
            }
        );
    }
}
