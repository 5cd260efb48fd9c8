//! A chess engine: legal move generation driven by attack, pin and check
//! masks, reversible make/unmake with incremental Zobrist hashing, and an
//! iterative-deepening alpha-beta search with quiescence, a transposition
//! table and time-boxed cancellation.

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod perft;
pub mod search;
pub mod types;

pub use board::{Position, STARTPOS};
pub use engine::{Engine, EngineConfig, GameStatus};
pub use error::{EngineError, EngineResult, FenError, KeysError};
pub use search::{SearchLimits, SearchResult, Searcher};
pub use types::{BestMove, Move, MoveKind, Score};
