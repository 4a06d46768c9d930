//! Plain-text rendering of session notifications.
//!
//! The view keeps its own copy of the grid, built only from the notifications
//! it receives, and redraws it when something visible has changed.

use reversi_core::{Board, Cell, Location, Observer, Player, Score, EDGE_LENGTH};
use std::io::{self, Write};

pub struct TextView<W: Write> {
    out: W,
    grid: Board,
    cursor: Option<Location>,
    /// Whether the square under the cursor was a legal placement at its last visible flash.
    /// The cursor is drawn steady; blink-off flashes do not redraw.
    cursor_mark: Option<bool>,
    score: Score,
    turn: Option<Player>,
    remaining: Option<u8>,
    paused: bool,
    dirty: bool,
    error: Option<io::Error>,
}

impl<W: Write> TextView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            grid: Board::empty(),
            cursor: None,
            cursor_mark: None,
            score: Score::default(),
            turn: None,
            remaining: None,
            paused: false,
            dirty: true,
            error: None,
        }
    }

    /// Forget the previous game's grid.
    pub fn reset(&mut self) {
        self.grid = Board::empty();
        self.cursor = None;
        self.cursor_mark = None;
        self.turn = None;
        self.remaining = None;
        self.paused = false;
        self.dirty = true;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Redraw if anything changed, and report any write error since the last flush.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        if self.dirty {
            self.dirty = false;
            self.draw()?;
        }
        self.out.flush()
    }

    fn draw(&mut self) -> io::Result<()> {
        write!(self.out, "\n   A B C D E F G H")?;
        for y in (0..EDGE_LENGTH as u8).rev() {
            write!(self.out, "\n {} ", y + 1)?;
            for x in 0..EDGE_LENGTH as u8 {
                let loc = Location::from_coords(x, y);
                write!(self.out, "{} ", self.glyph(loc))?;
            }
        }
        writeln!(self.out)?;

        write!(self.out, "{}", self.score)?;
        if let Some(player) = self.turn {
            write!(self.out, " | {} to move", player)?;
        }
        if let Some(remaining) = self.remaining {
            write!(self.out, " | {}s", remaining)?;
        }
        if self.paused {
            write!(self.out, " | paused")?;
        }
        writeln!(self.out)
    }

    fn glyph(&self, loc: Location) -> char {
        match (self.cursor == Some(loc), self.cursor_mark) {
            (true, Some(true)) => '*',
            (true, Some(false)) => '+',
            _ => match self.grid.cell(loc) {
                Cell::Empty => '.',
                Cell::Occupied(Player::One) => '#',
                Cell::Occupied(Player::Two) => 'O',
            },
        }
    }

    fn message(&mut self, text: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", text) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> Observer for TextView<W> {
    fn on_cell_changed(&mut self, loc: Location, cell: Cell) {
        self.grid.set(loc, cell);
        if self.cursor == Some(loc) {
            self.cursor_mark = None;
        }
        self.dirty = true;
    }

    fn on_cursor_flash(&mut self, loc: Location, visible: bool, legal: bool) {
        if !visible {
            return;
        }
        if self.cursor != Some(loc) || self.cursor_mark != Some(legal) {
            self.cursor = Some(loc);
            self.cursor_mark = Some(legal);
            self.dirty = true;
        }
    }

    fn on_cursor_moved(&mut self, _from: Location, _to: Location) {
        self.cursor = None;
        self.cursor_mark = None;
    }

    fn on_score_changed(&mut self, score: Score) {
        self.score = score;
        self.dirty = true;
    }

    fn on_turn_changed(&mut self, player: Player) {
        self.turn = Some(player);
        self.dirty = true;
    }

    fn on_pass(&mut self, skipped: Player) {
        self.message(format_args!("{} has no legal move and passes.", skipped));
    }

    fn on_pause_changed(&mut self, paused: bool) {
        self.paused = paused;
        self.message(format_args!("{}", if paused { "Paused." } else { "Resumed." }));
        self.dirty = true;
    }

    fn on_timed_mode_changed(&mut self, enabled: bool) {
        if !enabled {
            self.remaining = None;
        }
        self.message(format_args!("Timed mode {}.", if enabled { "on" } else { "off" }));
        self.dirty = true;
    }

    fn on_clock_tick(&mut self, remaining: u8) {
        self.remaining = Some(remaining);
        self.dirty = true;
    }

    fn on_game_over(&mut self, score: Score) {
        self.cursor = None;
        self.cursor_mark = None;
        self.turn = None;
        self.remaining = None;
        self.dirty = true;
        match score.leader() {
            Some(winner) => self.message(format_args!("Game over. {} wins ({}).", winner, score)),
            None => self.message(format_args!("Game over. Draw ({}).", score)),
        }
        self.message(format_args!("Press n for a new game or q to quit."));
    }
}
