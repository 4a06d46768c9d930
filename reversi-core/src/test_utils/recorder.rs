use crate::board::{Cell, Player, Score};
use crate::location::Location;
use crate::observer::Observer;

/// One observer callback, with its arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    CellChanged(Location, Cell),
    CursorFlash(Location, bool, bool),
    CursorMoved(Location, Location),
    ScoreChanged(Score),
    TurnChanged(Player),
    Pass(Player),
    PauseChanged(bool),
    TimedModeChanged(bool),
    ClockTick(u8),
    GameOver(Score),
}

/// An [`Observer`] that remembers every notification in order.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Vec<Notification>,
}

impl Recorder {
    pub fn events(&self) -> &[Notification] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// How many notifications match `predicate`.
    pub fn count(&self, predicate: impl Fn(&Notification) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl Observer for Recorder {
    fn on_cell_changed(&mut self, loc: Location, cell: Cell) {
        self.events.push(Notification::CellChanged(loc, cell));
    }

    fn on_cursor_flash(&mut self, loc: Location, visible: bool, legal: bool) {
        self.events.push(Notification::CursorFlash(loc, visible, legal));
    }

    fn on_cursor_moved(&mut self, from: Location, to: Location) {
        self.events.push(Notification::CursorMoved(from, to));
    }

    fn on_score_changed(&mut self, score: Score) {
        self.events.push(Notification::ScoreChanged(score));
    }

    fn on_turn_changed(&mut self, player: Player) {
        self.events.push(Notification::TurnChanged(player));
    }

    fn on_pass(&mut self, skipped: Player) {
        self.events.push(Notification::Pass(skipped));
    }

    fn on_pause_changed(&mut self, paused: bool) {
        self.events.push(Notification::PauseChanged(paused));
    }

    fn on_timed_mode_changed(&mut self, enabled: bool) {
        self.events.push(Notification::TimedModeChanged(enabled));
    }

    fn on_clock_tick(&mut self, remaining: u8) {
        self.events.push(Notification::ClockTick(remaining));
    }

    fn on_game_over(&mut self, score: Score) {
        self.events.push(Notification::GameOver(score));
    }
}
