//! Move-path enumeration for validating the move generator.

use tracing::trace;

use crate::board::{movegen, GenMode, Position};
use crate::types::Move;

/// Count the leaf positions exactly `depth` plies below `pos`.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = movegen::legal_moves(pos, GenMode::All);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for m in moves {
        pos.make_move(m);
        nodes += perft(pos, depth - 1);
        pos.unmake_move(m);
    }
    nodes
}

/// Leaf counts below each root move, in generation order.
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = movegen::legal_moves(pos, GenMode::All);
    let mut out = Vec::with_capacity(moves.len());
    for m in moves {
        pos.make_move(m);
        let nodes = perft(pos, depth - 1);
        pos.unmake_move(m);
        trace!(%m, nodes, "divide");
        out.push((m, nodes));
    }
    out
}
