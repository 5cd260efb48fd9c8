//! Transposition table for caching search results.
//!
//! A fixed number of slots indexed by `hash % capacity`. Every store
//! overwrites its slot; the table is a lossy cache and search stays the
//! ground truth.

use crate::types::{Depth, Hash, Move, Ply, Score};

/// Default number of slots.
pub const DEFAULT_CAPACITY: usize = 1 << 20;

/// How a stored score relates to the true value of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Exact score (some move raised alpha)
    Exact,
    /// Lower bound (fail-high, score >= beta)
    Lower,
    /// Upper bound (fail-low, score <= alpha)
    Upper,
}

/// A single slot.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub hash: Hash,
    pub bound: Bound,
    pub depth: Depth,
    /// Mate scores are stored relative to the node, see [`Score::to_tt`].
    pub score: Score,
    pub best_move: Option<Move>,
}

/// A usable probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtHit {
    pub score: Score,
    pub best_move: Option<Move>,
}

pub struct TranspositionTable {
    entries: Vec<Option<Entry>>,
}

impl TranspositionTable {
    /// Create a table with `capacity` slots (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.max(1)],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, hash: Hash) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Store a result for the node at `ply`, replacing whatever the slot held.
    pub fn store(
        &mut self,
        hash: Hash,
        bound: Bound,
        depth: Depth,
        ply: Ply,
        score: Score,
        best_move: Option<Move>,
    ) {
        let idx = self.index(hash);
        self.entries[idx] = Some(Entry {
            hash,
            bound,
            depth,
            score: score.to_tt(ply),
            best_move,
        });
    }

    /// Look up `hash` for a search of `depth` at `ply` with window `[alpha, beta]`.
    ///
    /// Misses unless the slot holds this exact hash searched at least as deep, and
    /// the bound settles the window: exact always does, a lower bound only at or
    /// above beta, an upper bound only at or below alpha.
    pub fn probe(&self, hash: Hash, depth: Depth, ply: Ply, alpha: Score, beta: Score) -> Option<TtHit> {
        let entry = self.entries[self.index(hash)]?;
        if entry.hash != hash || entry.depth < depth {
            return None;
        }

        let score = entry.score.from_tt(ply);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        };
        usable.then_some(TtHit {
            score,
            best_move: entry.best_move,
        })
    }

    /// Raw slot contents for `hash`, regardless of depth or bound.
    pub fn entry(&self, hash: Hash) -> Option<&Entry> {
        self.entries[self.index(hash)]
            .as_ref()
            .filter(|entry| entry.hash == hash)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
