//! "Perft" performance test: count the number of leaves at a given depth.
//! Exercises move generation and capture end to end.
//! See: http://www.aartbik.com/MISC/reversi.html

use crate::board::{Board, Player};
use crate::rules;

pub fn run_perft(depth: u64) -> u64 {
    leaves_below(Board::new(), Player::One, depth, false)
}

fn leaves_below(board: Board, player: Player, depth: u64, passed: bool) -> u64 {
    // Leaf node for this depth
    if depth == 0 {
        return 1;
    }

    let moves = rules::legal_moves(&board, player);
    if moves.is_empty() {
        // Both players passed: game is over
        if passed {
            return 1;
        }

        return leaves_below(board, !player, depth - 1, true);
    }

    moves
        .map(|loc| {
            let mut child = board;
            let outcome = rules::evaluate(&child, player, loc);
            rules::apply(&mut child, &outcome);
            leaves_below(child, !player, depth - 1, false)
        })
        .sum()
}
