//! Search limits and time management.
//!
//! A search runs under a fixed wall-clock budget, optionally capped at a
//! maximum iterative-deepening depth.

use std::time::{Duration, Instant};

use crate::types::Depth;

/// Budget used when none is configured.
pub const DEFAULT_MOVE_TIME: Duration = Duration::from_secs(1);

/// Search limits configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Wall-clock budget for one search
    pub move_time: Duration,
    /// Deepest iteration to run
    pub max_depth: Option<Depth>,
}

impl SearchLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_time(move_time: Duration) -> Self {
        Self {
            move_time,
            ..Default::default()
        }
    }

    /// Search to `depth` with an effectively unlimited budget.
    pub fn depth(depth: i32) -> Self {
        Self {
            move_time: Duration::from_secs(60 * 60),
            max_depth: Some(Depth(depth)),
        }
    }

    /// The last iteration to run. At least one iteration always runs.
    pub fn depth_cap(&self) -> Depth {
        self.max_depth.map_or(Depth::MAX, |d| d.clamp(Depth::ONE, Depth::MAX))
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            move_time: DEFAULT_MOVE_TIME,
            max_depth: None,
        }
    }
}

/// Time manager for search
#[derive(Debug, Clone, Copy)]
pub struct TimeManager {
    start: Instant,
    budget: Duration,
}

impl TimeManager {
    /// Start the clock now.
    pub fn start(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    pub fn from_limits(limits: &SearchLimits) -> Self {
        Self::start(limits.move_time)
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Check if the budget has run out
    pub fn expired(&self) -> bool {
        self.elapsed() >= self.budget
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::start(DEFAULT_MOVE_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = SearchLimits::default();
        assert_eq!(limits.move_time, Duration::from_secs(1));
        assert_eq!(limits.depth_cap(), Depth::MAX);
        assert_eq!(SearchLimits::depth(3).depth_cap(), Depth(3));
        assert_eq!(SearchLimits::depth(500).depth_cap(), Depth::MAX);
        assert_eq!(SearchLimits::depth(0).depth_cap(), Depth::ONE);
        assert_eq!(SearchLimits::depth(-3).depth_cap(), Depth::ONE);
    }

    #[test]
    fn test_time_manager_expiry() {
        assert!(TimeManager::start(Duration::ZERO).expired());
        let tm = TimeManager::start(Duration::from_secs(60));
        assert!(!tm.expired());
        assert!(tm.elapsed() < tm.budget());
    }
}
