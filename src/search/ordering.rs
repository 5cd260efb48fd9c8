//! Move ordering.
//!
//! Moves arrive from the generator with their static ordering score already
//! attached, so ordering is a stable sort on that score. A hint move (the
//! previous iteration's best root move, or a TT move) jumps the queue.

use crate::types::Move;

/// Sort `moves` by ordering score, highest first, with `hint` moved to the front.
pub fn order_moves(moves: &mut [Move], hint: Option<Move>) {
    moves.sort_by(|a, b| b.score.cmp(&a.score));

    if let Some(hint) = hint {
        if let Some(pos) = moves.iter().position(|&m| m == hint) {
            moves[..=pos].rotate_right(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{legal_moves, GenMode, Position};
    use crate::types::{MoveKind, Square};

    #[test]
    fn test_order_by_score() {
        let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
        let mut moves = legal_moves(&pos, GenMode::All);
        order_moves(&mut moves, None);
        assert!(moves.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(moves[0].score > 0);
    }

    #[test]
    fn test_order_is_stable() {
        let pos = Position::startpos();
        let generated = legal_moves(&pos, GenMode::All);
        let mut moves = generated.clone();
        order_moves(&mut moves, None);
        assert_eq!(moves, generated);
    }

    #[test]
    fn test_hint_goes_first() {
        let pos = Position::startpos();
        let mut moves = legal_moves(&pos, GenMode::All);
        let hint = Move::new(Square(12), Square(28), MoveKind::DoublePush);
        let before = moves.len();
        order_moves(&mut moves, Some(hint));
        assert_eq!(moves[0], hint);
        assert_eq!(moves.len(), before);

        let absent = Move::new(Square(12), Square(36), MoveKind::Normal);
        let snapshot = moves.clone();
        order_moves(&mut moves, Some(absent));
        // All quiet, so nothing moves.
        assert_eq!(moves, snapshot);
    }
}
