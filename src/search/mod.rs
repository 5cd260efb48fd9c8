//! Search module for the chess engine.
//!
//! # Architecture
//! - `Searcher`: iterative-deepening driver owning all search state
//! - `negamax`: fail-hard alpha-beta with TT and repetition handling
//! - `qsearch`: capture-only extension at the horizon
//! - `ordering`: static-score move ordering with a hint move
//! - `tt`: single-slot, always-replace transposition table
//! - `repetition`: game + path repetition counts
//! - `limits`: search limits and time management

mod limits;
mod negamax;
mod ordering;
mod qsearch;
mod repetition;
mod tt;

pub use limits::{SearchLimits, TimeManager, DEFAULT_MOVE_TIME};
pub use ordering::order_moves;
pub use repetition::{RepetitionTable, REPETITION_LIMIT};
pub use tt::{Bound, Entry, TranspositionTable, TtHit, DEFAULT_CAPACITY};

use tracing::{debug, info};

use crate::board::{legal_moves, GenMode, Position, FIFTY_MOVE_LIMIT};
use crate::types::{Depth, Move, NodeCount, Ply, Score};

/// The clock is read once every this many nodes.
const TIME_CHECK_MASK: NodeCount = 1023;

/// Search statistics collected during search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Full-width nodes
    pub nodes: NodeCount,
    /// Quiescence nodes
    pub qnodes: NodeCount,
    /// Deepest completed iteration
    pub depth: Depth,
    pub time_ms: u64,
}

impl SearchStats {
    pub fn total_nodes(&self) -> NodeCount {
        self.nodes + self.qnodes
    }

    pub fn nps(&self) -> u64 {
        if self.time_ms > 0 {
            self.total_nodes() * 1000 / self.time_ms
        } else {
            0
        }
    }
}

/// Result from a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the root has no legal move or is already a rule draw.
    pub best_move: Option<Move>,
    pub score: Score,
    /// Deepest completed iteration, zero if none completed.
    pub depth: Depth,
    pub stats: SearchStats,
}

/// Main search controller
pub struct Searcher {
    tt: TranspositionTable,
    repetitions: RepetitionTable,
    time: TimeManager,
    stats: SearchStats,
    cancelled: bool,
    /// Best root move of the iteration in progress.
    root_best: Option<(Move, Score)>,
    /// Best root move of the last completed iteration, searched first.
    root_hint: Option<Move>,
}

impl Searcher {
    pub fn new(tt_capacity: usize) -> Self {
        Self {
            tt: TranspositionTable::new(tt_capacity),
            repetitions: RepetitionTable::new(),
            time: TimeManager::default(),
            stats: SearchStats::default(),
            cancelled: false,
            root_best: None,
            root_hint: None,
        }
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn repetitions(&self) -> &RepetitionTable {
        &self.repetitions
    }

    /// Game positions are registered here so search can see repetitions.
    pub fn repetitions_mut(&mut self) -> &mut RepetitionTable {
        &mut self.repetitions
    }

    /// Statistics of the last search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Reset per-search state and start the clock.
    fn begin(&mut self, limits: &SearchLimits) {
        self.tt.clear();
        self.stats = SearchStats::default();
        self.cancelled = false;
        self.root_best = None;
        self.root_hint = None;
        self.time = TimeManager::from_limits(limits);
    }

    /// Run iterative deepening on `pos` and return the deepest completed result.
    ///
    /// `pos` is mutated during the search and restored before returning.
    pub fn search(&mut self, pos: &mut Position, limits: &SearchLimits) -> SearchResult {
        self.begin(limits);

        let mut result = SearchResult {
            best_move: None,
            score: Score::DRAW,
            depth: Depth(0),
            stats: SearchStats::default(),
        };

        for depth in 1..=limits.depth_cap().raw() {
            self.root_best = None;
            let score = negamax::negamax(
                self,
                pos,
                Depth(depth),
                Ply::ROOT,
                -Score::INFINITY,
                Score::INFINITY,
            );

            if self.cancelled {
                debug!(depth, elapsed_ms = self.time.elapsed_ms(), "iteration cancelled");
                if result.depth == Depth(0) {
                    self.fallback(pos, &mut result);
                }
                break;
            }

            result.best_move = self.root_best.map(|(m, _)| m);
            result.score = score;
            result.depth = Depth(depth);
            self.root_hint = result.best_move;
            self.stats.depth = result.depth;

            info!(
                depth,
                score = %score,
                nodes = self.stats.total_nodes(),
                best = %result.best_move.map_or_else(|| "none".to_string(), |m| m.to_string()),
                elapsed_ms = self.time.elapsed_ms(),
                "iteration complete"
            );

            if result.best_move.is_none() || self.time.expired() {
                break;
            }
        }

        self.stats.time_ms = self.time.elapsed_ms();
        result.stats = self.stats;
        result
    }

    /// Depth 1 never finished: keep whatever the root had found, or the first
    /// ordered move, unless the root is already terminal.
    fn fallback(&self, pos: &Position, result: &mut SearchResult) {
        if pos.halfmove_clock() >= FIFTY_MOVE_LIMIT || self.repetitions.is_draw(pos.hash()) {
            return;
        }
        if let Some((m, score)) = self.root_best {
            result.best_move = Some(m);
            result.score = score;
            return;
        }
        let mut moves = legal_moves(pos, GenMode::All);
        order_moves(&mut moves, None);
        result.best_move = moves.first().copied();
    }

    /// Latch the cancellation flag once the budget has run out.
    fn should_stop(&mut self) -> bool {
        if !self.cancelled
            && self.stats.total_nodes() & TIME_CHECK_MASK == 0
            && self.time.expired()
        {
            self.cancelled = true;
        }
        self.cancelled
    }

    #[inline]
    fn inc_nodes(&mut self) {
        self.stats.nodes += 1;
    }

    #[inline]
    fn inc_qnodes(&mut self) {
        self.stats.qnodes += 1;
    }

    #[inline]
    fn set_root_best(&mut self, m: Move, score: Score) {
        self.root_best = Some((m, score));
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
