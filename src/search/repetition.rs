//! Repetition counting by Zobrist hash.
//!
//! Holds every position of the game so far plus the positions on the active
//! search path. Search pushes a hash when it enters a node and pops it on the
//! way out, so the counts always describe the current line.

use std::collections::HashMap;

use crate::types::Hash;

/// Occurrences that make a draw.
pub const REPETITION_LIMIT: u32 = 3;

#[derive(Debug, Clone, Default)]
pub struct RepetitionTable {
    counts: HashMap<Hash, u32>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more occurrence of `hash` and return the new count.
    pub fn push(&mut self, hash: Hash) -> u32 {
        let count = self.counts.entry(hash).or_insert(0);
        *count += 1;
        *count
    }

    /// Forget one occurrence of `hash`.
    pub fn pop(&mut self, hash: Hash) {
        if let Some(count) = self.counts.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&hash);
            }
        }
    }

    pub fn count(&self, hash: Hash) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    /// Whether `hash` has occurred often enough to be a draw.
    pub fn is_draw(&self, hash: Hash) -> bool {
        self.count(hash) >= REPETITION_LIMIT
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
