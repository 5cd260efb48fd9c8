//! Fixed-capacity list of the squares holding one side's pieces of one kind.

use crate::types::{Bitboard, Square};

/// Ten is enough for any legal position: two original pieces plus eight promotions.
pub const MAX_PIECES: usize = 10;

/// Dense square array plus a reverse index and an occupancy bitboard.
///
/// Removal swaps the last entry into the hole. Slots past `len` and index
/// entries of absent squares are always zero, so two lists holding the same
/// squares in the same order compare equal.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PieceList {
    squares: [Square; MAX_PIECES],
    index: [u8; 64],
    len: u8,
    bits: Bitboard,
}

impl PieceList {
    pub const fn new() -> Self {
        PieceList {
            squares: [Square(0); MAX_PIECES],
            index: [0; 64],
            len: 0,
            bits: Bitboard::EMPTY,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == MAX_PIECES
    }

    #[inline]
    pub fn bitboard(&self) -> Bitboard {
        self.bits
    }

    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.bits.contains(sq)
    }

    /// Occupied squares in list order.
    #[inline]
    pub fn squares(&self) -> &[Square] {
        &self.squares[..self.len()]
    }

    /// Slot of `sq` in the dense array.
    #[inline]
    pub fn slot_of(&self, sq: Square) -> usize {
        self.index[sq.index()] as usize
    }

    /// Append a square.
    pub fn add(&mut self, sq: Square) {
        debug_assert!(!self.is_full(), "piece list overflow");
        debug_assert!(!self.contains(sq), "square {} already listed", sq);
        let slot = self.len();
        self.squares[slot] = sq;
        self.index[sq.index()] = slot as u8;
        self.len += 1;
        self.bits.set(sq);
    }

    /// Swap-remove a square, returning the slot it occupied.
    pub fn remove(&mut self, sq: Square) -> usize {
        debug_assert!(self.contains(sq), "square {} not listed", sq);
        let slot = self.slot_of(sq);
        let last = self.len() - 1;
        let moved = self.squares[last];
        self.squares[slot] = moved;
        self.index[moved.index()] = slot as u8;
        self.squares[last] = Square(0);
        self.index[sq.index()] = 0;
        self.len -= 1;
        self.bits.clear(sq);
        slot
    }

    /// Put `sq` back into the slot [`PieceList::remove`] returned, restoring the
    /// exact previous order.
    pub fn restore(&mut self, sq: Square, slot: usize) {
        let end = self.len();
        debug_assert!(slot <= end);
        if slot < end {
            let displaced = self.squares[slot];
            self.squares[end] = displaced;
            self.index[displaced.index()] = end as u8;
        }
        self.squares[slot] = sq;
        self.index[sq.index()] = slot as u8;
        self.len += 1;
        self.bits.set(sq);
    }

    /// Move an entry in place from one square to another.
    pub fn relocate(&mut self, from: Square, to: Square) {
        debug_assert!(self.contains(from), "square {} not listed", from);
        let slot = self.slot_of(from);
        self.squares[slot] = to;
        self.index[from.index()] = 0;
        self.index[to.index()] = slot as u8;
        self.bits.clear(from);
        self.bits.set(to);
    }
}

impl Default for PieceList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_swap_remove_keeps_dense() {
        let mut list = PieceList::new();
        for name in ["a2", "b2", "c2", "d2"] {
            list.add(sq(name));
        }
        list.remove(sq("b2"));
        assert_eq!(list.squares(), &[sq("a2"), sq("d2"), sq("c2")]);
        assert_eq!(list.slot_of(sq("d2")), 1);
        assert!(!list.contains(sq("b2")));
        assert_eq!(list.bitboard().count(), 3);
    }

    #[test]
    fn test_remove_restore_is_identity() {
        let mut list = PieceList::new();
        for name in ["a2", "b2", "c2"] {
            list.add(sq(name));
        }
        for name in ["a2", "b2", "c2"] {
            let before = list.clone();
            let slot = list.remove(sq(name));
            list.restore(sq(name), slot);
            assert_eq!(list, before);
        }
    }

    #[test]
    fn test_relocate_roundtrip() {
        let mut list = PieceList::new();
        list.add(sq("g1"));
        list.add(sq("b1"));
        let before = list.clone();
        list.relocate(sq("g1"), sq("f3"));
        assert!(list.contains(sq("f3")));
        assert_eq!(list.slot_of(sq("f3")), 0);
        list.relocate(sq("f3"), sq("g1"));
        assert_eq!(list, before);
    }
}
