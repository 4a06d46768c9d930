//! Notifications from a [`GameSession`](crate::GameSession) to whatever renders it.

use crate::board::{Cell, Player, Score};
use crate::location::Location;

/// Receives everything a session wants shown. Every method defaults to doing nothing,
/// so an implementation only overrides what it displays.
#[allow(unused_variables)]
pub trait Observer {
    /// A square now holds `cell`. Also sent for every occupied square when a session starts.
    fn on_cell_changed(&mut self, loc: Location, cell: Cell) {}

    /// The cursor blinked. `legal` says whether the active player may place there.
    fn on_cursor_flash(&mut self, loc: Location, visible: bool, legal: bool) {}

    /// The cursor left `from`, which should be redrawn with its stored cell.
    fn on_cursor_moved(&mut self, from: Location, to: Location) {}

    fn on_score_changed(&mut self, score: Score) {}

    fn on_turn_changed(&mut self, player: Player) {}

    /// `skipped` had no legal placement and lost their turn.
    fn on_pass(&mut self, skipped: Player) {}

    fn on_pause_changed(&mut self, paused: bool) {}

    fn on_timed_mode_changed(&mut self, enabled: bool) {}

    /// Whole seconds left on the turn clock.
    fn on_clock_tick(&mut self, remaining: u8) {}

    /// Sent exactly once per session, with the final score.
    fn on_game_over(&mut self, score: Score) {}
}

/// Ignores every notification.
impl Observer for () {}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_cell_changed(&mut self, loc: Location, cell: Cell) {
        (**self).on_cell_changed(loc, cell)
    }

    fn on_cursor_flash(&mut self, loc: Location, visible: bool, legal: bool) {
        (**self).on_cursor_flash(loc, visible, legal)
    }

    fn on_cursor_moved(&mut self, from: Location, to: Location) {
        (**self).on_cursor_moved(from, to)
    }

    fn on_score_changed(&mut self, score: Score) {
        (**self).on_score_changed(score)
    }

    fn on_turn_changed(&mut self, player: Player) {
        (**self).on_turn_changed(player)
    }

    fn on_pass(&mut self, skipped: Player) {
        (**self).on_pass(skipped)
    }

    fn on_pause_changed(&mut self, paused: bool) {
        (**self).on_pause_changed(paused)
    }

    fn on_timed_mode_changed(&mut self, enabled: bool) {
        (**self).on_timed_mode_changed(enabled)
    }

    fn on_clock_tick(&mut self, remaining: u8) {
        (**self).on_clock_tick(remaining)
    }

    fn on_game_over(&mut self, score: Score) {
        (**self).on_game_over(score)
    }
}
