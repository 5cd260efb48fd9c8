//! Core value types shared by the board, move generator and search.
//!
//! - `Square`, `Bitboard`: geometry
//! - `Color`, `PieceKind`, `Piece`, `CastleRights`: position contents
//! - `Move`, `MoveKind`, `BestMove`: transitions and driver results
//! - `Score`, `Depth`, `Ply`: search arithmetic

mod bitboard;
mod depth;
mod moves;
mod piece;
mod score;
mod square;

pub use bitboard::{Bitboard, SquareIter};
pub use depth::{Depth, Ply, MAX_DEPTH};
pub use moves::{BestMove, Move, MoveKind};
pub use piece::{CastleRights, Color, Piece, PieceKind};
pub use score::{Score, SCORE_DRAW, SCORE_INFINITY, SCORE_MATE};
pub use square::Square;

/// Zobrist position fingerprint.
pub type Hash = u64;

/// Node counter.
pub type NodeCount = u64;

/// Centipawn value.
pub type Value = i32;
