//! Negamax alpha-beta search.
//!
//! Fail-hard: every return lies inside `[alpha, beta]`. The position is
//! mutated in place with make/unmake and always restored before returning,
//! including when the search is cancelled mid-node.

use super::ordering::order_moves;
use super::qsearch::quiescence;
use super::tt::Bound;
use super::Searcher;
use crate::board::{generate_legal, GenMode, MoveList, Position, FIFTY_MOVE_LIMIT};
use crate::types::{Depth, Move, Ply, Score};

/// Search `pos` to `depth` plies, `ply` plies below the root.
pub(super) fn negamax(
    searcher: &mut Searcher,
    pos: &mut Position,
    depth: Depth,
    ply: Ply,
    alpha: Score,
    beta: Score,
) -> Score {
    if depth.is_qs() {
        return quiescence(searcher, pos, ply, alpha, beta);
    }
    searcher.inc_nodes();

    let mut moves = MoveList::with_capacity(64);
    let info = generate_legal(pos, GenMode::All, &mut moves);
    if moves.is_empty() {
        return if info.in_check { Score::mated_in(ply) } else { Score::DRAW };
    }

    if searcher.should_stop() {
        return Score::DRAW;
    }

    if pos.halfmove_clock() >= FIFTY_MOVE_LIMIT {
        return Score::DRAW;
    }

    // The root is already registered by the game that reached it.
    let hash = pos.hash();
    if ply.is_root() {
        return expand(searcher, pos, moves, depth, ply, alpha, beta);
    }
    searcher.repetitions.push(hash);
    let score = expand(searcher, pos, moves, depth, ply, alpha, beta);
    searcher.repetitions.pop(hash);
    score
}

fn expand(
    searcher: &mut Searcher,
    pos: &mut Position,
    mut moves: MoveList,
    depth: Depth,
    ply: Ply,
    mut alpha: Score,
    beta: Score,
) -> Score {
    let hash = pos.hash();
    if searcher.repetitions.is_draw(hash) {
        return Score::DRAW;
    }

    // === TT Probe ===
    if let Some(hit) = searcher.tt.probe(hash, depth, ply, alpha, beta) {
        if !ply.is_root() {
            return hit.score;
        }
        if let Some(m) = hit.best_move {
            searcher.set_root_best(m, hit.score);
            return hit.score;
        }
    }

    let hint = if ply.is_root() {
        searcher.root_hint
    } else {
        searcher.tt.entry(hash).and_then(|e| e.best_move)
    };
    order_moves(&mut moves, hint);

    let mut best_move: Option<Move> = None;
    for m in moves {
        pos.make_move(m);
        let score = -negamax(searcher, pos, depth - 1, ply.next(), -beta, -alpha);
        pos.unmake_move(m);

        if searcher.cancelled {
            return Score::DRAW;
        }

        if score >= beta {
            searcher.tt.store(hash, Bound::Lower, depth, ply, beta, Some(m));
            return beta;
        }

        if score > alpha {
            alpha = score;
            best_move = Some(m);
            if ply.is_root() {
                searcher.set_root_best(m, score);
            }
        }
    }

    // === TT Store ===
    let bound = if best_move.is_some() { Bound::Exact } else { Bound::Upper };
    searcher.tt.store(hash, bound, depth, ply, alpha, best_move);
    alpha
}
