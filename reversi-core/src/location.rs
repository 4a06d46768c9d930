//! Code for working with [`Location`]s and [`Direction`]s on the board.
//!
//! Coordinates are `(x, y)` with `x` the column (`A`..`H`, left to right)
//! and `y` the row (`1`..`8`, bottom to top).

use crate::bitboard::Bitboard;
use crate::error::ParseLocationError;
use crate::EDGE_LENGTH;
use derive_more::{From, Into};
use itertools::iproduct;
use std::fmt::{self, Display, Formatter, Write};

const EDGE: i8 = EDGE_LENGTH as i8;

/// Returns whether signed coordinates fall on the board.
#[inline]
pub const fn in_bounds(x: i8, y: i8) -> bool {
    x >= 0 && x < EDGE && y >= 0 && y < EDGE
}

/// A square on the board. Can only be constructed in range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Location {
    x: u8,
    y: u8,
}

/// One of the eight compass directions a capture can run along.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// Every direction, in the fixed order used for scanning.
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// The unit step `(dx, dy)` for this direction.
    #[inline]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::North => (0, 1),
            Direction::NorthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::South => (0, -1),
            Direction::SouthEast => (1, -1),
        }
    }

    /// The direction pointing the other way.
    pub const fn reverse(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::NorthEast => Direction::SouthWest,
            Direction::North => Direction::South,
            Direction::NorthWest => Direction::SouthEast,
            Direction::West => Direction::East,
            Direction::SouthWest => Direction::NorthEast,
            Direction::South => Direction::North,
            Direction::SouthEast => Direction::NorthWest,
        }
    }
}

impl Location {
    /// Convert from signed coordinates, or None if they are off the board.
    #[inline]
    pub const fn new(x: i8, y: i8) -> Option<Self> {
        if in_bounds(x, y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Convert from coordinates known to be in range.
    /// Panics if either coordinate is 8 or more.
    pub const fn from_coords(x: u8, y: u8) -> Self {
        assert!(x < EDGE as u8 && y < EDGE as u8);
        Self { x, y }
    }

    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Get the column and row as signed coordinates, for stepping.
    #[inline]
    pub const fn coords(self) -> (i8, i8) {
        (self.x as i8, self.y as i8)
    }

    /// Convert from a square index `y * 8 + x`.
    /// Panics if `index` is 64 or more.
    pub fn from_index(index: u8) -> Self {
        assert!((index as usize) < EDGE_LENGTH * EDGE_LENGTH);
        Self {
            x: index % EDGE as u8,
            y: index / EDGE as u8,
        }
    }

    /// Convert into a square index `y * 8 + x`.
    #[inline]
    pub fn to_index(self) -> u8 {
        self.y * EDGE as u8 + self.x
    }

    /// The one-hot [`Bitboard`] for this square.
    #[inline]
    pub fn to_bitboard(self) -> Bitboard {
        Bitboard::from(1u64 << (self.y * EDGE as u8 + (EDGE as u8 - 1 - self.x)))
    }

    /// Inverse of [`Location::to_bitboard`] for a bit position.
    #[inline]
    fn from_bit(bit: u8) -> Self {
        Self {
            x: EDGE as u8 - 1 - bit % EDGE as u8,
            y: bit / EDGE as u8,
        }
    }

    /// The neighbouring square in `direction`, or None at the edge.
    #[inline]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        let (x, y) = self.coords();
        Self::new(x + dx, y + dy)
    }

    /// Move by `(dx, dy)`, wrapping around the edges in both axes.
    pub fn wrapping_offset(self, dx: i8, dy: i8) -> Self {
        let edge = EDGE as i16;
        let x = (self.x as i16 + dx as i16).rem_euclid(edge);
        let y = (self.y as i16 + dy as i16).rem_euclid(edge);
        Self {
            x: x as u8,
            y: y as u8,
        }
    }

    /// Every square, row by row from the bottom-left.
    pub fn all() -> impl Iterator<Item = Location> {
        iproduct!(0..EDGE as u8, 0..EDGE as u8).map(|(y, x)| Self { x, y })
    }
}

/// Convert this [`Location`] into string notation ("D3").
impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let col_str = "ABCDEFGH".chars().nth(self.x as usize).ok_or(fmt::Error)?;
        let row_str = "12345678".chars().nth(self.y as usize).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        f.write_char(row_str)
    }
}

/// Build a [`Location`] from a 1-indexed string notation ("D3").
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let col_str = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let col = "ABCDEFGH".find(col_str).ok_or(ParseLocationError)? as i8;
        let row = chars
            .next()
            .ok_or(ParseLocationError)?
            .to_digit(10)
            .ok_or(ParseLocationError)? as i8;

        if chars.next().is_some() {
            return Err(ParseLocationError);
        }

        Self::new(col, row - 1).ok_or(ParseLocationError)
    }
}

/// A set of locations on the board, which can be iterated to retrieve them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, From, Into)]
pub struct LocationList(Bitboard);

impl LocationList {
    /// Returns whether `loc` is in this list.
    pub fn contains(self, loc: Location) -> bool {
        self.0.contains(loc.to_bitboard())
    }

    /// Add `loc` to this list.
    pub fn insert(&mut self, loc: Location) {
        self.0 |= loc.to_bitboard();
    }

    /// Returns whether no location is in this list.
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Location> for LocationList {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut list = Self::default();
        for loc in iter {
            list.insert(loc);
        }
        list
    }
}

impl Iterator for LocationList {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.0.is_empty() {
            return None;
        }

        let bitboard: u64 = self.0.into();
        let bit = bitboard.trailing_zeros() as u8;
        self.0 ^= Bitboard::from(1u64 << bit);

        Some(Location::from_bit(bit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_occupied() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for LocationList {}

impl Display for LocationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        f.write_fmt(format_args!("[{}]", string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn location_bounds() {
        assert_eq!(Location::new(0, 0), Some(Location::from_coords(0, 0)));
        assert_eq!(Location::new(7, 7), Some(Location::from_coords(7, 7)));
        assert_eq!(Location::new(-1, 0), None);
        assert_eq!(Location::new(0, 8), None);
        assert_eq!(Location::new(8, 3), None);
        assert_eq!(Location::new(3, -1), None);
    }

    #[test]
    #[should_panic]
    fn location_from_coords_fail() {
        Location::from_coords(0, 8);
    }

    #[test]
    fn location_to_bitboard() {
        assert_eq!(
            Location::from_coords(0, 7).to_bitboard(),
            Bitboard::from(1 << 63)
        );
        assert_eq!(Location::from_coords(7, 0).to_bitboard(), Bitboard::from(1));
    }

    #[test]
    fn location_index_round_trip() {
        for loc in Location::all() {
            assert_eq!(Location::from_index(loc.to_index()), loc);
        }
        assert_eq!(Location::all().count(), 64);
    }

    #[test]
    fn step_stops_at_edges() {
        let corner = Location::from_coords(0, 0);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.step(Direction::South), None);
        assert_eq!(
            corner.step(Direction::NorthEast),
            Some(Location::from_coords(1, 1))
        );
    }

    #[test]
    fn directions_are_distinct_units() {
        for (i, a) in Direction::ALL.iter().enumerate() {
            let (dx, dy) = a.offset();
            assert!(dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0));
            assert_eq!(a.reverse().offset(), (-dx, -dy));
            for b in &Direction::ALL[i + 1..] {
                assert_ne!(a.offset(), b.offset());
            }
        }
    }

    #[test]
    fn wrapping_offset_wraps_both_ways() {
        let origin = Location::from_coords(0, 0);
        assert_eq!(origin.wrapping_offset(-1, 0), Location::from_coords(7, 0));
        assert_eq!(origin.wrapping_offset(0, -1), Location::from_coords(0, 7));
        assert_eq!(
            Location::from_coords(7, 7).wrapping_offset(1, 1),
            Location::from_coords(0, 0)
        );
        assert_eq!(
            Location::from_coords(5, 3).wrapping_offset(-1, 1),
            Location::from_coords(4, 4)
        );
        assert_eq!(origin.wrapping_offset(-9, 17), Location::from_coords(7, 1));
    }

    #[test]
    fn location_from_str_success() {
        assert_eq!(Location::from_str("A1"), Ok(Location::from_coords(0, 0)));
        assert_eq!(Location::from_str("h8"), Ok(Location::from_coords(7, 7)));
        assert_eq!(Location::from_str("D3"), Ok(Location::from_coords(3, 2)));
    }

    #[test]
    fn location_from_str_fail() {
        assert_eq!(Location::from_str(""), Err(ParseLocationError));
        assert_eq!(Location::from_str("A12"), Err(ParseLocationError));
        assert_eq!(Location::from_str("AA"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A9"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A0"), Err(ParseLocationError));
        assert_eq!(Location::from_str("I5"), Err(ParseLocationError));
    }

    #[test]
    fn location_to_str() {
        assert_eq!(Location::from_coords(0, 0).to_string(), "A1");
        assert_eq!(Location::from_coords(7, 7).to_string(), "H8");
        assert_eq!(Location::from_str("E2").unwrap().to_string(), "E2");
        assert_eq!(Location::from_str("F6").unwrap().to_string(), "F6");
    }

    #[test]
    fn location_list_iterates_members() {
        let members = [
            Location::from_coords(2, 3),
            Location::from_coords(7, 0),
            Location::from_coords(0, 7),
        ];
        let list: LocationList = members.iter().copied().collect();

        assert_eq!(list.len(), 3);
        assert!(members.iter().all(|&loc| list.contains(loc)));
        assert!(!list.contains(Location::from_coords(3, 3)));

        let mut collected: Vec<Location> = list.collect();
        collected.sort();
        let mut expected = members.to_vec();
        expected.sort();
        assert_eq!(collected, expected);
    }

    #[test]
    fn location_list_display() {
        let list: LocationList = [Location::from_coords(2, 3), Location::from_coords(0, 0)]
            .into_iter()
            .collect();
        assert_eq!(list.to_string(), "[A1, C4]");
        assert_eq!(LocationList::default().to_string(), "[]");
    }
}
