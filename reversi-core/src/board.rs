//! Board storage: who owns each of the 64 squares.
//!
//! The board is a pair of disjoint [`Bitboard`]s, one per player. Every write
//! clears a square for both players before setting it for at most one, so the
//! empty, player one and player two counts always sum to 64.

use crate::bitboard::{Bitboard, PLAYER_ONE_START, PLAYER_TWO_START};
use crate::error::ParseBoardError;
use crate::location::Location;
use crate::{utils, EDGE_LENGTH, NUM_SPACES};
use derive_more::Display;
use std::fmt::{self, Formatter};

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Player {
    #[display(fmt = "Player 1")]
    One,
    #[display(fmt = "Player 2")]
    Two,
}

impl Default for Player {
    /// Gets the starting player.
    fn default() -> Self {
        Self::One
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// The logical contents of one square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    /// The player holding this square, if any.
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        Cell::Occupied(player)
    }
}

/// Piece counts for both players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[display(fmt = "Player 1: {}, Player 2: {}", player_one, player_two)]
pub struct Score {
    pub player_one: u8,
    pub player_two: u8,
}

impl Score {
    /// The score when `loser` forfeits: nothing for them, the whole board for the opponent.
    pub fn forfeit(loser: Player) -> Self {
        match loser {
            Player::One => Self {
                player_one: 0,
                player_two: NUM_SPACES as u8,
            },
            Player::Two => Self {
                player_one: NUM_SPACES as u8,
                player_two: 0,
            },
        }
    }

    /// The count for one player.
    pub fn of(self, player: Player) -> u8 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    /// The player with more squares, or None for a draw.
    pub fn leader(self) -> Option<Player> {
        use std::cmp::Ordering;
        match self.player_one.cmp(&self.player_two) {
            Ordering::Greater => Some(Player::One),
            Ordering::Less => Some(Player::Two),
            Ordering::Equal => None,
        }
    }
}

/// The complete contents of the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    player_one: Bitboard,
    player_two: Bitboard,
}

impl Default for Board {
    /// Gets the standard opening position.
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard opening: player one on D4 and E5, player two on D5 and E4.
    pub const fn new() -> Self {
        Self {
            player_one: PLAYER_ONE_START,
            player_two: PLAYER_TWO_START,
        }
    }

    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Self {
            player_one: Bitboard::EMPTY,
            player_two: Bitboard::EMPTY,
        }
    }

    #[inline]
    fn bitboard(&self, player: Player) -> Bitboard {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    /// Read a square by signed coordinates. Anything off the board is [`Cell::Empty`].
    #[inline]
    pub fn get(&self, x: i8, y: i8) -> Cell {
        match Location::new(x, y) {
            Some(loc) => self.cell(loc),
            None => Cell::Empty,
        }
    }

    /// Read a square.
    #[inline]
    pub fn cell(&self, loc: Location) -> Cell {
        let mask = loc.to_bitboard();
        if self.player_one.contains(mask) {
            Cell::Occupied(Player::One)
        } else if self.player_two.contains(mask) {
            Cell::Occupied(Player::Two)
        } else {
            Cell::Empty
        }
    }

    /// Write a square.
    #[inline]
    pub fn set(&mut self, loc: Location, cell: Cell) {
        let mask = loc.to_bitboard();
        self.player_one &= !mask;
        self.player_two &= !mask;
        match cell {
            Cell::Empty => {}
            Cell::Occupied(Player::One) => self.player_one |= mask,
            Cell::Occupied(Player::Two) => self.player_two |= mask,
        }
    }

    /// Count the squares held by `player`.
    #[inline]
    pub fn count(&self, player: Player) -> u8 {
        self.bitboard(player).count_occupied()
    }

    /// Count the squares held by nobody.
    #[inline]
    pub fn count_empty(&self) -> u8 {
        (self.player_one | self.player_two).count_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count_empty() == 0
    }

    /// Piece counts for both players.
    pub fn score(&self) -> Score {
        Score {
            player_one: self.count(Player::One),
            player_two: self.count(Player::Two),
        }
    }

    /// Every occupied square with its owner.
    pub fn pieces(&self) -> impl Iterator<Item = (Location, Player)> + '_ {
        Location::all().filter_map(move |loc| self.cell(loc).owner().map(|player| (loc, player)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pieces = self
            .player_one
            .into_iter()
            .zip(self.player_two)
            .map(|bits| match bits {
                (false, false) => '.',
                (true, false) => '#',
                (false, true) => 'O',
                (true, true) => '?',
            });
        utils::format_grid(pieces, f)
    }
}

/// Read a board from 64 squares, top row (row 8) first, left to right.
/// `X` or `#` is player one, `O` is player two, `-` or `.` is empty.
/// Whitespace is ignored.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::empty();
        let mut squares = 0;

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match c.to_ascii_uppercase() {
                'X' | '#' => Cell::Occupied(Player::One),
                'O' => Cell::Occupied(Player::Two),
                '-' | '.' => Cell::Empty,
                _ => return Err(ParseBoardError::InvalidCharacter { found: c }),
            };

            if squares < NUM_SPACES {
                let x = (squares % EDGE_LENGTH) as u8;
                let y = (EDGE_LENGTH - 1 - squares / EDGE_LENGTH) as u8;
                board.set(Location::from_coords(x, y), cell);
            }
            squares += 1;
        }

        if squares != NUM_SPACES {
            return Err(ParseBoardError::WrongLength { squares });
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(x: u8, y: u8) -> Location {
        Location::from_coords(x, y)
    }

    #[test]
    fn opening_position() {
        let board = Board::new();
        assert_eq!(board.cell(loc(3, 3)), Cell::Occupied(Player::One));
        assert_eq!(board.cell(loc(4, 4)), Cell::Occupied(Player::One));
        assert_eq!(board.cell(loc(3, 4)), Cell::Occupied(Player::Two));
        assert_eq!(board.cell(loc(4, 3)), Cell::Occupied(Player::Two));
        assert_eq!(board.count(Player::One), 2);
        assert_eq!(board.count(Player::Two), 2);
        assert_eq!(board.count_empty(), 60);
    }

    #[test]
    fn get_off_board_is_empty() {
        let mut board = Board::new();
        board.set(loc(0, 0), Cell::Occupied(Player::One));

        assert_eq!(board.get(0, 0), Cell::Occupied(Player::One));
        assert_eq!(board.get(-1, 0), Cell::Empty);
        assert_eq!(board.get(0, -1), Cell::Empty);
        assert_eq!(board.get(8, 3), Cell::Empty);
        assert_eq!(board.get(3, 8), Cell::Empty);
        assert_eq!(board.get(i8::MIN, i8::MAX), Cell::Empty);
    }

    #[test]
    fn set_overwrites_and_keeps_total() {
        let mut board = Board::new();
        board.set(loc(3, 4), Cell::Occupied(Player::One));
        assert_eq!(board.cell(loc(3, 4)), Cell::Occupied(Player::One));
        assert_eq!(board.count(Player::One), 3);
        assert_eq!(board.count(Player::Two), 1);

        board.set(loc(3, 4), Cell::Empty);
        assert_eq!(board.cell(loc(3, 4)), Cell::Empty);

        let total = board.count_empty() + board.count(Player::One) + board.count(Player::Two);
        assert_eq!(total, 64);
    }

    #[test]
    fn full_board() {
        let mut board = Board::empty();
        assert!(!board.is_full());
        for (i, square) in Location::all().enumerate() {
            let player = if i % 2 == 0 { Player::One } else { Player::Two };
            board.set(square, player.into());
        }
        assert!(board.is_full());
        assert_eq!(board.score(), Score { player_one: 32, player_two: 32 });
        assert_eq!(board.score().leader(), None);
    }

    #[test]
    fn forfeit_score() {
        assert_eq!(
            Score::forfeit(Player::One),
            Score { player_one: 0, player_two: 64 }
        );
        assert_eq!(Score::forfeit(Player::Two).of(Player::One), 64);
        assert_eq!(Score::forfeit(Player::Two).leader(), Some(Player::One));
    }

    #[test]
    fn parse_matches_opening() {
        let board: Board = "
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - O X - - -
            - - - X O - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -"
            .parse()
            .unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "".parse::<Board>(),
            Err(ParseBoardError::WrongLength { squares: 0 })
        );
        assert_eq!(
            "-".repeat(65).parse::<Board>(),
            Err(ParseBoardError::WrongLength { squares: 65 })
        );
        assert_eq!(
            "z".parse::<Board>(),
            Err(ParseBoardError::InvalidCharacter { found: 'z' })
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let board = Board::new();
        let text = board.to_string();
        let body: String = text.lines().skip(1).map(|line| &line[3..]).collect();
        assert_eq!(body.parse::<Board>(), Ok(board));
    }

    #[test]
    fn pieces_lists_owners() {
        let mut pieces: Vec<_> = Board::new().pieces().collect();
        pieces.sort_by_key(|(loc, _)| *loc);
        assert_eq!(
            pieces,
            vec![
                (loc(3, 3), Player::One),
                (loc(3, 4), Player::Two),
                (loc(4, 3), Player::Two),
                (loc(4, 4), Player::One),
            ]
        );
    }
}
