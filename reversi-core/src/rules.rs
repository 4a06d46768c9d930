//! Move legality and capture application.
//!
//! A placement is legal when the target square is empty and at least one of
//! the eight lines leading away from it is a run of opponent pieces closed off
//! by one of the mover's own pieces. Every such line is flipped at once.

use crate::board::{Board, Cell, Player};
use crate::location::{Direction, Location, LocationList};
use crate::EDGE_LENGTH;
use arrayvec::ArrayVec;
use tracing::debug;

/// Most squares a line can run past the placed piece before leaving the board.
const MAX_RUN: usize = EDGE_LENGTH - 1;

/// A run of opponent pieces that a placement would flip, nearest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedLine {
    direction: Direction,
    cells: ArrayVec<Location, MAX_RUN>,
}

impl CapturedLine {
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The captured squares, ordered outward from the placed piece.
    #[inline]
    pub fn cells(&self) -> &[Location] {
        &self.cells
    }
}

/// Every line a candidate placement would capture. Empty means illegal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    player: Player,
    loc: Location,
    lines: ArrayVec<CapturedLine, 8>,
}

impl MoveOutcome {
    /// The player who would place.
    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    /// The square that would be placed on.
    #[inline]
    pub fn location(&self) -> Location {
        self.loc
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn is_legal(&self) -> bool {
        !self.is_empty()
    }

    /// The captured lines, in [`Direction::ALL`] order.
    #[inline]
    pub fn lines(&self) -> &[CapturedLine] {
        &self.lines
    }

    /// Every square that would be flipped.
    pub fn flipped(&self) -> impl Iterator<Item = Location> + '_ {
        self.lines.iter().flat_map(|line| line.cells.iter().copied())
    }

    /// How many squares would be flipped.
    pub fn flip_count(&self) -> u8 {
        self.lines.iter().map(|line| line.cells.len() as u8).sum()
    }
}

/// Walk from `origin` in `direction`, collecting opponent squares until the
/// line is closed by `player`'s own piece (a capture) or by anything else.
/// Relies on [`Board::get`] reading off-board squares as empty.
fn scan(board: &Board, player: Player, origin: Location, direction: Direction) -> Option<CapturedLine> {
    let (dx, dy) = direction.offset();
    let (mut x, mut y) = origin.coords();
    let mut cells = ArrayVec::new();

    loop {
        x += dx;
        y += dy;
        match board.get(x, y) {
            Cell::Occupied(owner) if owner != player => cells.push(Location::new(x, y)?),
            Cell::Occupied(_) if !cells.is_empty() => {
                return Some(CapturedLine { direction, cells })
            }
            _ => return None,
        }
    }
}

/// Find every line `player` would capture by placing at `loc`.
pub fn evaluate(board: &Board, player: Player, loc: Location) -> MoveOutcome {
    let mut outcome = MoveOutcome {
        player,
        loc,
        lines: ArrayVec::new(),
    };
    if !board.cell(loc).is_empty() {
        return outcome;
    }

    outcome.lines = Direction::ALL
        .iter()
        .filter_map(|&direction| scan(board, player, loc, direction))
        .collect();
    outcome
}

/// Whether every line in `outcome` would still be captured on `board`.
fn still_captures(board: &Board, outcome: &MoveOutcome) -> bool {
    let player = outcome.player;
    board.cell(outcome.loc).is_empty()
        && outcome.lines.iter().all(|line| {
            let run_intact = line
                .cells
                .iter()
                .all(|&square| board.cell(square) == Cell::Occupied(!player));
            let closed = line
                .cells
                .last()
                .and_then(|last| last.step(line.direction))
                .map_or(false, |end| board.cell(end) == Cell::Occupied(player));
            run_intact && closed
        })
}

/// Commit a placement found by [`evaluate`]. Places the piece, flips every
/// captured line, and returns the number of flipped squares.
/// An empty outcome, or one the board no longer matches, changes nothing and returns 0.
pub fn apply(board: &mut Board, outcome: &MoveOutcome) -> u8 {
    if outcome.is_empty() {
        return 0;
    }
    if !still_captures(board, outcome) {
        debug!(player = %outcome.player, at = %outcome.loc, "stale move outcome ignored");
        return 0;
    }

    let player = outcome.player;
    board.set(outcome.loc, player.into());
    for square in outcome.flipped() {
        board.set(square, player.into());
    }
    outcome.flip_count()
}

#[inline]
pub fn is_legal(board: &Board, player: Player, loc: Location) -> bool {
    evaluate(board, player, loc).is_legal()
}

/// Every square `player` may place on.
pub fn legal_moves(board: &Board, player: Player) -> LocationList {
    Location::all()
        .filter(|&loc| is_legal(board, player, loc))
        .collect()
}

/// Whether `player` may place anywhere at all.
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    Location::all().any(|loc| is_legal(board, player, loc))
}
