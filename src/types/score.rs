//! Search scores.
//!
//! Centipawns from the side to move's point of view. Mate scores sit just
//! below `MATE` and encode the distance in plies from the root:
//! - mating in `n` plies is `MATE - n`
//! - being mated in `n` plies is `-(MATE - n)`

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use super::{Ply, Value};

pub const SCORE_INFINITY: Value = 32_000;
pub const SCORE_MATE: Value = 31_000;
pub const SCORE_DRAW: Value = 0;

/// Anything beyond this magnitude is a mate score.
const MATE_BOUND: Value = SCORE_MATE - 1_000;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub Value);

impl Score {
    pub const DRAW: Score = Score(SCORE_DRAW);
    pub const INFINITY: Score = Score(SCORE_INFINITY);

    #[inline]
    pub const fn cp(centipawns: Value) -> Self {
        Score(centipawns)
    }

    /// Score for the side that delivers mate `ply` plies from the root.
    #[inline]
    pub const fn mate_in(ply: Ply) -> Self {
        Score(SCORE_MATE - ply.0)
    }

    /// Score for the side that is checkmated `ply` plies from the root.
    #[inline]
    pub const fn mated_in(ply: Ply) -> Self {
        Score(-(SCORE_MATE - ply.0))
    }

    #[inline]
    pub const fn raw(self) -> Value {
        self.0
    }

    #[inline]
    pub const fn is_winning_mate(self) -> bool {
        self.0 >= MATE_BOUND
    }

    #[inline]
    pub const fn is_losing_mate(self) -> bool {
        self.0 <= -MATE_BOUND
    }

    #[inline]
    pub const fn is_mate(self) -> bool {
        self.is_winning_mate() || self.is_losing_mate()
    }

    /// Plies to mate for a mate score.
    #[inline]
    pub const fn mate_distance(self) -> Option<i32> {
        if self.is_winning_mate() {
            Some(SCORE_MATE - self.0)
        } else if self.is_losing_mate() {
            Some(SCORE_MATE + self.0)
        } else {
            None
        }
    }

    /// Make a mate score relative to the node being stored, so it stays valid
    /// when the same position is reached at another ply.
    #[inline]
    pub const fn to_tt(self, ply: Ply) -> Self {
        if self.is_winning_mate() {
            Score(self.0 + ply.0)
        } else if self.is_losing_mate() {
            Score(self.0 - ply.0)
        } else {
            self
        }
    }

    /// Inverse of [`Score::to_tt`].
    #[inline]
    pub const fn from_tt(self, ply: Ply) -> Self {
        if self.is_winning_mate() {
            Score(self.0 - ply.0)
        } else if self.is_losing_mate() {
            Score(self.0 + ply.0)
        } else {
            self
        }
    }
}

impl Add for Score {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Score(self.0 + rhs.0)
    }
}

impl AddAssign<Value> for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Value) {
        self.0 += rhs;
    }
}

impl Sub for Score {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Score(self.0 - rhs.0)
    }
}

impl Neg for Score {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Score(-self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mate_distance() {
            Some(plies) if self.is_winning_mate() => write!(f, "mate {}", (plies + 1) / 2),
            Some(plies) => write!(f, "mate -{}", (plies + 1) / 2),
            None => write!(f, "cp {}", self.0),
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self)
    }
}
