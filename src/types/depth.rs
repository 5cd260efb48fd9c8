//! Search depth and distance-from-root counters.

use std::ops::Sub;

/// Iterative deepening never goes past this many plies of full-width search.
pub const MAX_DEPTH: i32 = 64;

/// Remaining full-width plies at a node; zero or below hands over to quiescence.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
#[repr(transparent)]
pub struct Depth(pub i32);

impl Depth {
    pub const ONE: Depth = Depth(1);
    pub const MAX: Depth = Depth(MAX_DEPTH);

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_qs(self) -> bool {
        self.0 <= 0
    }
}

impl Sub<i32> for Depth {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: i32) -> Self {
        Depth(self.0 - rhs)
    }
}

/// Half-moves from the search root.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
#[repr(transparent)]
pub struct Ply(pub i32);

impl Ply {
    pub const ROOT: Ply = Ply(0);

    #[inline]
    pub const fn next(self) -> Self {
        Ply(self.0 + 1)
    }

    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}
