//! Moves and search results handed to the game driver.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{PieceKind, Square, Value};

/// What a move does beyond relocating one piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveKind {
    Normal,
    KingCastle,
    QueenCastle,
    EnPassant,
    DoublePush,
    Promote(PieceKind),
}

/// A move plus its static ordering score.
///
/// The score only drives move ordering, so equality and hashing ignore it.
#[derive(Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    pub score: Value,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind, score: 0 }
    }

    #[inline]
    pub const fn with_score(from: Square, to: Square, kind: MoveKind, score: Value) -> Self {
        Move { from, to, kind, score }
    }

    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promote(kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::KingCastle | MoveKind::QueenCastle)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.kind == other.kind
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.kind.hash(state);
    }
}

/// Coordinate notation: `e2e4`, `e1g1`, `a7a8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?} score={})", self, self.kind, self.score)
    }
}

/// Outcome of asking the engine for a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BestMove {
    Play(Move),
    WhiteWins,
    BlackWins,
    Draw,
}

impl BestMove {
    /// The move to play, if the game is not over.
    pub fn mv(self) -> Option<Move> {
        match self {
            BestMove::Play(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for BestMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestMove::Play(m) => write!(f, "{}", m),
            BestMove::WhiteWins => write!(f, "1-0"),
            BestMove::BlackWins => write!(f, "0-1"),
            BestMove::Draw => write!(f, "1/2-1/2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_score() {
        let a = Move::with_score(Square::E1, Square::G1, MoveKind::KingCastle, 2000);
        let b = Move::new(Square::E1, Square::G1, MoveKind::KingCastle);
        assert_eq!(a, b);
        let c = Move::new(Square::E1, Square::G1, MoveKind::Normal);
        assert_ne!(a, c);
    }

    #[test]
    fn test_move_display() {
        let push = Move::new("e2".parse().unwrap(), "e4".parse().unwrap(), MoveKind::DoublePush);
        assert_eq!(push.to_string(), "e2e4");
        let promo = Move::new(
            "b7".parse().unwrap(),
            Square::A8,
            MoveKind::Promote(PieceKind::Knight),
        );
        assert_eq!(promo.to_string(), "b7a8n");
        assert_eq!(BestMove::Draw.to_string(), "1/2-1/2");
    }
}
