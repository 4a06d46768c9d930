//! `reversi-core` is a self-contained Othello/Reversi turn engine.
//!
//! This package is layered bottom-up:
//!
//!  - [`bitboard`] is the raw 64-bit storage, one bit per square.
//!  - [`Board`] holds both players' pieces and answers per-square queries.
//!  - [`rules`] decides which placements are legal and applies their captures.
//!  - [`TurnManager`] and [`TurnClock`] track whose turn it is and how long they have left.
//!  - [`GameSession`] wires all of the above to abstract input events and reports
//!    every visible change to an [`Observer`].

pub mod bitboard;
pub mod rules;
pub mod test_utils;

mod board;
mod clock;
mod config;
mod error;
mod location;
mod observer;
mod session;
mod turn;
mod utils;

pub use board::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use location::*;
pub use observer::*;
pub use session::*;
pub use turn::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
