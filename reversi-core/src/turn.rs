//! Turn alternation, forced passes and game termination.
//!
//! After every placement play passes to the opponent. A player with no legal
//! placement is skipped; if the player handed the turn back has no placement
//! either, the game is over. A full board ends the game regardless.

use crate::board::{Board, Player};
use crate::rules;
use derive_more::Display;
use tracing::debug;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Termination {
    #[display(fmt = "board full")]
    BoardFull,
    #[display(fmt = "no legal moves for either player")]
    NoMoves,
    #[display(fmt = "turn clock expired")]
    Timeout,
}

/// Whose turn it is, or that nobody's is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnState {
    Turn(Player),
    GameOver { last: Player, reason: Termination },
}

/// What a turn transition did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Advance {
    /// Play continues with this player.
    Next(Player),
    /// `skipped` had no legal placement; play continues with `next`.
    Passed { skipped: Player, next: Player },
    /// The game is over.
    Finished(Termination),
}

/// Tracks the active player and applies the pass and termination rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnManager {
    state: TurnState,
}

impl Default for TurnManager {
    fn default() -> Self {
        Self::new(Player::default())
    }
}

impl TurnManager {
    pub fn new(first: Player) -> Self {
        Self {
            state: TurnState::Turn(first),
        }
    }

    #[inline]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// The player to move, or the last player to hold the turn once the game is over.
    #[inline]
    pub fn current_player(&self) -> Player {
        match self.state {
            TurnState::Turn(player) => player,
            TurnState::GameOver { last, .. } => last,
        }
    }

    /// Whether a termination has been recorded.
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, TurnState::GameOver { .. })
    }

    /// Whether the game is over: a recorded termination, or a full board.
    pub fn is_game_over(&self, board: &Board) -> bool {
        self.is_finished() || board.is_full()
    }

    /// Hand the turn on after the current player has placed a piece.
    pub fn advance(&mut self, board: &Board) -> Advance {
        match self.state {
            TurnState::Turn(mover) => self.resolve(board, !mover),
            TurnState::GameOver { reason, .. } => Advance::Finished(reason),
        }
    }

    /// Check that the current player can actually move, passing or finishing if not.
    /// Used when play starts from an arbitrary position.
    pub fn settle(&mut self, board: &Board) -> Advance {
        match self.state {
            TurnState::Turn(player) => self.resolve(board, player),
            TurnState::GameOver { reason, .. } => Advance::Finished(reason),
        }
    }

    /// End the game now. Has no effect if it is already over.
    pub fn finish(&mut self, reason: Termination) -> Advance {
        match self.state {
            TurnState::Turn(last) => {
                debug!(%reason, last = %last, "turn order finished");
                self.state = TurnState::GameOver { last, reason };
                Advance::Finished(reason)
            }
            TurnState::GameOver { reason, .. } => Advance::Finished(reason),
        }
    }

    /// Give the turn to `candidate`, or to its opponent if `candidate` cannot move.
    fn resolve(&mut self, board: &Board, candidate: Player) -> Advance {
        if board.is_full() {
            return self.finish(Termination::BoardFull);
        }

        if rules::has_legal_move(board, candidate) {
            self.state = TurnState::Turn(candidate);
            return Advance::Next(candidate);
        }

        let other = !candidate;
        if rules::has_legal_move(board, other) {
            debug!(skipped = %candidate, next = %other, "forced pass");
            self.state = TurnState::Turn(other);
            return Advance::Passed {
                skipped: candidate,
                next: other,
            };
        }

        self.finish(Termination::NoMoves)
    }
}
