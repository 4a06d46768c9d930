//! One game from opening to game over.
//!
//! A [`GameSession`] owns the board, the turn order, the turn clock and the
//! cursor, and turns abstract input events into state changes. Everything it
//! wants displayed goes to its [`Observer`]. Nothing here reads the system
//! time: callers pass their own monotonic clock into every time-dependent call,
//! so a recorded event sequence always replays to the same result.

use crate::board::{Board, Cell, Player, Score};
use crate::clock::{ClockTick, Millis, TurnClock};
use crate::config::{SessionConfig, DEFAULT_CURSOR};
use crate::location::Location;
use crate::observer::Observer;
use crate::rules;
use crate::turn::{Advance, Termination, TurnManager, TurnState};
use tracing::{debug, info, instrument, trace};

/// The result of trying to place a piece at the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The piece was placed and this many opponent pieces were flipped.
    Placed { flipped: u8 },
    /// Nothing changed.
    Rejected,
}

impl Placement {
    #[inline]
    pub fn is_placed(self) -> bool {
        matches!(self, Placement::Placed { .. })
    }
}

pub struct GameSession<O: Observer> {
    board: Board,
    turns: TurnManager,
    clock: TurnClock,
    cursor: Location,
    cursor_visible: bool,
    paused: bool,
    timed: bool,
    score: Score,
    /// Set once `on_game_over` has been sent.
    game_over: bool,
    observer: O,
}

impl<O: Observer> GameSession<O> {
    /// Start a game from the standard opening with player one to move.
    pub fn new(config: &SessionConfig, now: Millis, observer: O) -> Self {
        Self::from_position(config, Board::new(), Player::One, now, observer)
    }

    /// Start a game from any position. If `first` cannot move they are passed
    /// immediately, and a position where neither side can move is already over.
    pub fn from_position(
        config: &SessionConfig,
        board: Board,
        first: Player,
        now: Millis,
        observer: O,
    ) -> Self {
        let mut session = Self {
            board,
            turns: TurnManager::new(first),
            clock: TurnClock::new(config.countdown_seconds, config.tick_interval_ms),
            cursor: config.cursor_location().unwrap_or(DEFAULT_CURSOR),
            cursor_visible: false,
            paused: false,
            timed: false,
            score: board.score(),
            game_over: false,
            observer,
        };
        info!(first = %first, score = %session.score, "session started");

        for (loc, player) in board.pieces() {
            session.observer.on_cell_changed(loc, player.into());
        }
        session.observer.on_score_changed(session.score);

        let settled = session.turns.settle(&session.board);
        session.report_turn(settled);
        if config.timed && !session.game_over {
            session.set_timed(true, now);
        }
        session
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move, or the last player to hold the turn once the game is over.
    #[inline]
    pub fn current_player(&self) -> Player {
        self.turns.current_player()
    }

    #[inline]
    pub fn cursor(&self) -> Location {
        self.cursor
    }

    #[inline]
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_timed(&self) -> bool {
        self.timed
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.turns.is_game_over(&self.board)
    }

    /// The current score. After a clock forfeit this is the forfeit split, not a count.
    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    /// Why the game ended, once it has.
    pub fn termination(&self) -> Option<Termination> {
        match self.turns.state() {
            TurnState::GameOver { reason, .. } => Some(reason),
            TurnState::Turn(_) => None,
        }
    }

    /// Whether the active player may place at the cursor.
    pub fn cursor_is_legal(&self) -> bool {
        !self.game_over && rules::is_legal(&self.board, self.current_player(), self.cursor)
    }

    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[inline]
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Whether input other than pause and ticks is currently ignored.
    #[inline]
    fn is_frozen(&self) -> bool {
        self.game_over || self.paused
    }

    /// Move the cursor by `(dx, dy)`, wrapping at the edges. The cursor is hidden
    /// until the next flash.
    pub fn move_cursor(&mut self, dx: i8, dy: i8) {
        if self.is_frozen() {
            return;
        }
        let from = self.cursor;
        self.cursor = from.wrapping_offset(dx, dy);
        self.cursor_visible = false;
        trace!(%from, to = %self.cursor, "cursor moved");
        self.observer.on_cursor_moved(from, self.cursor);
    }

    /// Place the active player's piece at the cursor, if that is legal.
    #[instrument(skip(self), fields(player = %self.current_player(), at = %self.cursor))]
    pub fn attempt_place(&mut self, now: Millis) -> Placement {
        if self.is_frozen() {
            trace!("placement ignored");
            return Placement::Rejected;
        }

        let player = self.current_player();
        let at = self.cursor;
        let outcome = rules::evaluate(&self.board, player, at);
        if outcome.is_empty() {
            trace!(legal = %rules::legal_moves(&self.board, player), "placement rejected");
            return Placement::Rejected;
        }

        let flipped = rules::apply(&mut self.board, &outcome);
        debug!(flipped, "placed");
        self.observer.on_cell_changed(at, player.into());
        for square in outcome.flipped() {
            self.observer.on_cell_changed(square, Cell::Occupied(player));
        }

        self.score = self.board.score();
        self.observer.on_score_changed(self.score);

        let advance = self.turns.advance(&self.board);
        self.report_turn(advance);

        if self.timed && !self.game_over {
            self.clock.cancel();
            self.clock.arm(now);
            self.observer.on_clock_tick(self.clock.countdown());
        }

        Placement::Placed { flipped }
    }

    /// Turn the per-turn clock on or off.
    pub fn toggle_timed_mode(&mut self, now: Millis) {
        if self.is_frozen() {
            return;
        }
        self.set_timed(!self.timed, now);
    }

    /// Pause or resume the game. While paused only this and [`tick`](Self::tick)
    /// are accepted, and the clock stands still.
    #[instrument(skip(self))]
    pub fn toggle_pause(&mut self, now: Millis) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            self.clock.pause(now);
        } else {
            self.clock.resume(now);
        }
        info!(paused = self.paused, "pause toggled");
        self.observer.on_pause_changed(self.paused);
    }

    /// Blink the cursor. The caller decides how often.
    pub fn flash_cursor(&mut self) {
        if self.is_frozen() {
            return;
        }
        self.cursor_visible = !self.cursor_visible;
        let legal = rules::is_legal(&self.board, self.current_player(), self.cursor);
        self.observer
            .on_cursor_flash(self.cursor, self.cursor_visible, legal);
    }

    /// Advance the turn clock to `now`. A clock that runs out forfeits the game
    /// for the active player.
    pub fn tick(&mut self, now: Millis) {
        if self.game_over {
            return;
        }
        match self.clock.tick(now) {
            ClockTick::Unchanged => {}
            ClockTick::Counted(remaining) => self.observer.on_clock_tick(remaining),
            ClockTick::Expired => {
                let loser = self.current_player();
                info!(loser = %loser, "turn clock expired");
                self.observer.on_clock_tick(0);
                self.score = Score::forfeit(loser);
                self.observer.on_score_changed(self.score);
                self.turns.finish(Termination::Timeout);
                self.end_game();
            }
        }
    }

    fn set_timed(&mut self, enabled: bool, now: Millis) {
        self.timed = enabled;
        info!(enabled, "timed mode");
        self.observer.on_timed_mode_changed(enabled);
        if enabled {
            self.clock.arm(now);
            if let Some(remaining) = self.clock.remaining() {
                self.observer.on_clock_tick(remaining);
            }
        } else {
            self.clock.cancel();
        }
    }

    fn report_turn(&mut self, advance: Advance) {
        match advance {
            Advance::Next(player) => {
                debug!(%player, "turn");
                self.observer.on_turn_changed(player);
            }
            Advance::Passed { skipped, next } => {
                self.observer.on_pass(skipped);
                self.observer.on_turn_changed(next);
            }
            Advance::Finished(_) => self.end_game(),
        }
    }

    fn end_game(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        if !self.clock.is_expired() {
            self.clock.cancel();
        }
        info!(
            score = %self.score,
            reason = ?self.termination(),
            winner = ?self.score.leader(),
            "game over"
        );
        self.observer.on_game_over(self.score);
    }
}
