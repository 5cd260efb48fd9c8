//! Precomputed geometry for the attack and move generators.
//!
//! Built once on first use:
//! - ray directions with the number of steps to the board edge per square
//! - knight, king and pawn-capture target sets
//! - the ray direction joining any two aligned squares

use std::sync::LazyLock;

use crate::types::{Bitboard, Color, Square};

/// Ray directions as `(file, rank)` steps. The first four are orthogonal, the
/// last four diagonal.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Square index delta for each entry of [`DIRECTIONS`].
pub const DIRECTION_OFFSETS: [i8; 8] = [8, -8, -1, 1, 9, 7, -7, -9];

pub const ORTHOGONAL: std::ops::Range<usize> = 0..4;
pub const DIAGONAL: std::ops::Range<usize> = 4..8;
pub const ALL_DIRECTIONS: std::ops::Range<usize> = 0..8;

const KNIGHT_DELTAS: [(i8, i8); 8] =
    [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

pub struct Tables {
    /// Steps from a square to the edge along each direction.
    pub edge: [[u8; 8]; 64],
    pub knight: [Bitboard; 64],
    pub king: [Bitboard; 64],
    /// Squares a pawn of the given color attacks.
    pub pawn_attacks: [[Bitboard; 64]; 2],
    /// Direction index leading from the first square to the second, if they share a line.
    pub line: [[Option<u8>; 64]; 64],
}

pub static TABLES: LazyLock<Tables> = LazyLock::new(Tables::new);

impl Tables {
    fn new() -> Self {
        let mut edge = [[0u8; 8]; 64];
        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];
        let mut pawn_attacks = [[Bitboard::EMPTY; 64]; 2];
        let mut line = [[None; 64]; 64];

        for sq in Square::all() {
            let i = sq.index();

            for (dir, &(df, dr)) in DIRECTIONS.iter().enumerate() {
                let mut steps = 0u8;
                let mut cur = sq;
                while let Some(next) = cur.offset(df, dr) {
                    steps += 1;
                    line[i][next.index()] = Some(dir as u8);
                    cur = next;
                }
                edge[i][dir] = steps;

                if let Some(target) = sq.offset(df, dr) {
                    king[i].set(target);
                }
            }

            for (df, dr) in KNIGHT_DELTAS {
                if let Some(target) = sq.offset(df, dr) {
                    knight[i].set(target);
                }
            }

            for df in [-1, 1] {
                if let Some(target) = sq.offset(df, 1) {
                    pawn_attacks[Color::White.index()][i].set(target);
                }
                if let Some(target) = sq.offset(df, -1) {
                    pawn_attacks[Color::Black.index()][i].set(target);
                }
            }
        }

        Tables { edge, knight, king, pawn_attacks, line }
    }
}

#[inline]
pub fn knight_targets(sq: Square) -> Bitboard {
    TABLES.knight[sq.index()]
}

#[inline]
pub fn king_targets(sq: Square) -> Bitboard {
    TABLES.king[sq.index()]
}

#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    TABLES.pawn_attacks[color.index()][sq.index()]
}

#[inline]
pub fn steps_to_edge(sq: Square, dir: usize) -> u8 {
    TABLES.edge[sq.index()][dir]
}

/// Direction from `from` to `to` if both lie on one rank, file or diagonal.
#[inline]
pub fn line_direction(from: Square, to: Square) -> Option<u8> {
    TABLES.line[from.index()][to.index()]
}

/// True if `a` and `b` lie on the same ray leaving `origin`.
#[inline]
pub fn same_ray(origin: Square, a: Square, b: Square) -> bool {
    match line_direction(origin, a) {
        Some(dir) => line_direction(origin, b) == Some(dir),
        None => false,
    }
}
