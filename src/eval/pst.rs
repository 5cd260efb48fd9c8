//! Piece-square tables.
//!
//! Written from white's point of view with rank 8 on the first row, the way
//! they read on a diagram. [`TABLES`] expands them once into per-side arrays
//! indexed by square, so black reads the vertically mirrored value.

use std::sync::LazyLock;

use crate::types::{PieceKind, Square, Value};

#[rustfmt::skip]
const PAWN: [Value; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT: [Value; 64] = [
   -50,-40,-30,-30,-30,-30,-40,-50,
   -40,-20,  0,  0,  0,  0,-20,-40,
   -30,  0, 10, 15, 15, 10,  0,-30,
   -30,  5, 15, 20, 20, 15,  5,-30,
   -30,  0, 15, 20, 20, 15,  0,-30,
   -30,  5, 10, 15, 15, 10,  5,-30,
   -40,-20,  0,  5,  5,  0,-20,-40,
   -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP: [Value; 64] = [
   -20,-10,-10,-10,-10,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  0,  5, 10, 10,  5,  0,-10,
   -10,  5,  5, 10, 10,  5,  5,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10, 10, 10, 10, 10, 10, 10,-10,
   -10,  5,  0,  0,  0,  0,  5,-10,
   -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK: [Value; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN: [Value; 64] = [
   -20,-10,-10, -5, -5,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  0,  5,  5,  5,  5,  0,-10,
    -5,  0,  5,  5,  5,  5,  0, -5,
     0,  0,  5,  5,  5,  5,  0, -5,
   -10,  5,  5,  5,  5,  5,  0,-10,
   -10,  0,  5,  0,  0,  0,  0,-10,
   -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDDLE: [Value; 64] = [
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -20,-30,-30,-40,-40,-30,-30,-20,
   -10,-20,-20,-20,-20,-20,-20,-10,
    20, 20,  0,  0,  0,  0, 20, 20,
    20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_END: [Value; 64] = [
   -50,-40,-30,-20,-20,-30,-40,-50,
   -30,-20,-10,  0,  0,-10,-20,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-30,  0,  0,  0,  0,-30,-30,
   -50,-30,-30,-30,-30,-30,-30,-50,
];

#[rustfmt::skip]
const PAWN_END: [Value; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    80, 80, 80, 80, 80, 80, 80, 80,
    50, 50, 50, 50, 50, 50, 50, 50,
    30, 30, 30, 30, 30, 30, 30, 30,
    20, 20, 20, 20, 20, 20, 20, 20,
    10, 10, 10, 10, 10, 10, 10, 10,
    10, 10, 10, 10, 10, 10, 10, 10,
     0,  0,  0,  0,  0,  0,  0,  0,
];

/// Which table to read.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Table {
    Piece(PieceKind),
    KingEnd,
    PawnEnd,
}

/// Square-indexed tables per evaluation index (0 white, 1 black).
pub struct PieceSquareTables {
    /// Slots: king middle game, queen, pawn, rook, bishop, knight, then the
    /// end-game king and pawn tables.
    sides: [[[Value; 64]; 8]; 2],
}

pub static TABLES: LazyLock<PieceSquareTables> = LazyLock::new(PieceSquareTables::new);

impl PieceSquareTables {
    fn new() -> Self {
        let diagrams: [&[Value; 64]; 8] =
            [&KING_MIDDLE, &QUEEN, &PAWN, &ROOK, &BISHOP, &KNIGHT, &KING_END, &PAWN_END];
        let mut sides = [[[0; 64]; 8]; 2];
        for (slot, diagram) in diagrams.iter().enumerate() {
            for sq in Square::all() {
                // Diagram row 0 is rank 8, so white reads the flipped square.
                sides[0][slot][sq.index()] = diagram[sq.flip().index()];
                sides[1][slot][sq.index()] = diagram[sq.index()];
            }
        }
        PieceSquareTables { sides }
    }

    #[inline]
    pub fn value(&self, eval_index: usize, table: Table, sq: Square) -> Value {
        let slot = match table {
            Table::Piece(kind) => kind.index(),
            Table::KingEnd => 6,
            Table::PawnEnd => 7,
        };
        self.sides[eval_index][slot][sq.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_mirrored() {
        for sq in Square::all() {
            for table in [
                Table::Piece(PieceKind::Pawn),
                Table::Piece(PieceKind::King),
                Table::KingEnd,
                Table::PawnEnd,
            ] {
                assert_eq!(TABLES.value(0, table, sq), TABLES.value(1, table, sq.flip()));
            }
        }
    }

    #[test]
    fn test_white_orientation() {
        let e2: Square = "e2".parse().unwrap();
        let e7: Square = "e7".parse().unwrap();
        assert_eq!(TABLES.value(0, Table::Piece(PieceKind::Pawn), e2), -20);
        assert_eq!(TABLES.value(0, Table::Piece(PieceKind::Pawn), e7), 50);
        assert_eq!(TABLES.value(0, Table::Piece(PieceKind::King), Square::G1), 30);
        assert_eq!(TABLES.value(0, Table::PawnEnd, e7), 80);
        assert_eq!(TABLES.value(1, Table::PawnEnd, e2), 80);
    }
}
