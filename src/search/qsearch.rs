//! Quiescence search - search captures only to avoid horizon effect.
//!
//! When the main search reaches depth 0, captures are played out until the
//! position is quiet, starting from a stand-pat evaluation.

use super::ordering::order_moves;
use super::Searcher;
use crate::board::{legal_moves, GenMode, Position};
use crate::eval;
use crate::types::{Ply, Score};

pub(super) fn quiescence(
    searcher: &mut Searcher,
    pos: &mut Position,
    ply: Ply,
    mut alpha: Score,
    beta: Score,
) -> Score {
    searcher.inc_qnodes();

    let stand_pat = eval::evaluate(pos);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut moves = legal_moves(pos, GenMode::Captures);
    if searcher.should_stop() {
        return Score::DRAW;
    }
    order_moves(&mut moves, None);

    for m in moves {
        pos.make_move(m);
        let score = -quiescence(searcher, pos, ply.next(), -beta, -alpha);
        pos.unmake_move(m);

        if searcher.cancelled {
            return Score::DRAW;
        }
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}
