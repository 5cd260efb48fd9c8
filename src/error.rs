//! Error types for the boundaries of the engine.
//!
//! The move generator, make/unmake and search have no recoverable failure
//! modes. Errors only arise where outside input enters the crate: FEN strings,
//! move strings from a driver and persisted Zobrist tables.

use thiserror::Error;

/// A square name that is not `[a-h][1-8]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square `{0}`")]
pub struct ParseSquareError(pub String);

/// Malformed FEN input. Parsing stops at the first problem found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 4 to 6 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 squares")]
    RankLength { rank: u8 },

    #[error("unknown piece character `{0}`")]
    PieceChar(char),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: &'static str, count: usize },

    #[error("too many {kind} pieces for one side")]
    TooManyPieces { kind: &'static str },

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(String),

    #[error("side to move must be `w` or `b`, found `{0}`")]
    SideToMove(String),

    #[error("invalid castling field `{0}`")]
    Castling(String),

    #[error("invalid en passant field `{0}`")]
    EnPassant(String),

    #[error("invalid {field} counter `{value}`")]
    Counter { field: &'static str, value: String },
}

/// A persisted Zobrist table that does not match the expected layout.
#[derive(Error, Debug)]
pub enum KeysError {
    #[error("expected {expected} comma-separated values, found {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("value {index} is not an unsigned 64-bit integer")]
    InvalidNumber {
        index: usize,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("value {index} duplicates an earlier constant")]
    Duplicate { index: usize },
}

/// Errors surfaced to a game driver.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("`{0}` is not a legal move in this position")]
    IllegalMove(String),

    #[error(transparent)]
    Keys(#[from] KeysError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
