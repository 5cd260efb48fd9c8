//! Game driver.
//!
//! `Engine` owns the game position and the searcher. Moves played through
//! [`Engine::play_move`] are permanent: the undo stack is dropped and the new
//! position is registered for repetition detection.

use tracing::debug;

use crate::board::{legal_moves, GenMode, Position, FIFTY_MOVE_LIMIT};
use crate::error::{EngineError, EngineResult};
use crate::perft;
use crate::search::{SearchLimits, SearchResult, Searcher, DEFAULT_CAPACITY};
use crate::types::{BestMove, Color, Move};

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub limits: SearchLimits,
    /// Transposition table slots
    pub tt_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limits: SearchLimits::default(),
            tt_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Whether the game in the current position is over, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMove,
    Threefold,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// Result code for a finished game.
    pub fn outcome(self) -> Option<BestMove> {
        match self {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate { winner: Color::White } => Some(BestMove::WhiteWins),
            GameStatus::Checkmate { winner: Color::Black } => Some(BestMove::BlackWins),
            GameStatus::Stalemate | GameStatus::FiftyMove | GameStatus::Threefold => Some(BestMove::Draw),
        }
    }
}

pub struct Engine {
    position: Position,
    searcher: Searcher,
    config: EngineConfig,
    last_search: Option<SearchResult>,
}

impl Engine {
    pub fn new(position: Position, config: EngineConfig) -> Self {
        let mut searcher = Searcher::new(config.tt_capacity);
        searcher.repetitions_mut().push(position.hash());
        Self {
            position,
            searcher,
            config,
            last_search: None,
        }
    }

    pub fn from_fen(fen: &str, config: EngineConfig) -> EngineResult<Self> {
        Ok(Self::new(Position::from_fen(fen)?, config))
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.config.limits = limits;
    }

    /// Result of the most recent [`Engine::get_best_move`] that searched.
    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }

    /// Search the current position, or report the result if the game is over.
    pub fn get_best_move(&mut self) -> BestMove {
        let moves = legal_moves(&self.position, GenMode::All);
        if moves.is_empty() {
            return if self.position.in_check() {
                winner_code(!self.position.side_to_move())
            } else {
                BestMove::Draw
            };
        }

        let result = self.searcher.search(&mut self.position, &self.config.limits);
        self.last_search = Some(result);
        match result.best_move {
            Some(m) => BestMove::Play(m),
            None => BestMove::Draw,
        }
    }

    pub fn get_legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position, GenMode::All)
    }

    /// Play a legal move permanently.
    pub fn play_move(&mut self, m: Move) {
        self.position.make_move(m);
        self.position.clear_history();
        let count = self.searcher.repetitions_mut().push(self.position.hash());
        debug!(%m, hash = self.position.hash(), repetitions = count, "move played");
    }

    /// Parse a coordinate-notation move, check it is legal and play it.
    pub fn play_uci(&mut self, text: &str) -> EngineResult<Move> {
        let m = self
            .position
            .parse_move(text)
            .ok_or_else(|| EngineError::IllegalMove(text.to_string()))?;
        self.play_move(m);
        Ok(m)
    }

    pub fn perft(&mut self, depth: u32) -> u64 {
        perft::perft(&mut self.position, depth)
    }

    pub fn divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        perft::divide(&mut self.position, depth)
    }

    /// Terminal status of the current position.
    pub fn result(&self) -> GameStatus {
        if legal_moves(&self.position, GenMode::All).is_empty() {
            return if self.position.in_check() {
                GameStatus::Checkmate {
                    winner: !self.position.side_to_move(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        if self.position.halfmove_clock() >= FIFTY_MOVE_LIMIT {
            return GameStatus::FiftyMove;
        }
        if self.searcher.repetitions().is_draw(self.position.hash()) {
            return GameStatus::Threefold;
        }
        GameStatus::Ongoing
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Position::startpos(), EngineConfig::default())
    }
}

fn winner_code(winner: Color) -> BestMove {
    match winner {
        Color::White => BestMove::WhiteWins,
        Color::Black => BestMove::BlackWins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> EngineConfig {
        EngineConfig {
            limits: SearchLimits::depth(3),
            tt_capacity: 1 << 12,
        }
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.tt_capacity, 1 << 20);
        assert_eq!(config.limits, SearchLimits::default());
    }

    #[test]
    fn test_checkmated_side_loses() {
        let mut engine = Engine::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", quick()).unwrap();
        assert_eq!(engine.get_best_move(), BestMove::WhiteWins);
        assert_eq!(engine.result(), GameStatus::Checkmate { winner: Color::White });
        assert!(engine.last_search().is_none());

        let mut engine = Engine::from_fen("6k1/8/8/8/8/8/5PPP/r5K1 w - - 0 1", quick()).unwrap();
        assert_eq!(engine.get_best_move(), BestMove::BlackWins);
    }

    #[test]
    fn test_stalemate_is_draw() {
        let mut engine = Engine::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1", quick()).unwrap();
        assert_eq!(engine.get_best_move(), BestMove::Draw);
        assert_eq!(engine.result(), GameStatus::Stalemate);
    }

    #[test]
    fn test_plays_mate_in_one() {
        let mut engine = Engine::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", quick()).unwrap();
        let best = engine.get_best_move();
        assert_eq!(best.to_string(), "a1a8");
        engine.play_move(best.mv().unwrap());
        assert_eq!(engine.result(), GameStatus::Checkmate { winner: Color::White });
        assert_eq!(engine.result().outcome(), Some(BestMove::WhiteWins));
    }

    #[test]
    fn test_play_move_drops_undo_stack() {
        let mut engine = Engine::new(Position::startpos(), quick());
        engine.play_uci("e2e4").unwrap();
        engine.play_uci("e7e5").unwrap();
        assert_eq!(engine.position().history_len(), 0);
        assert_eq!(engine.position().hash(), engine.position().hash_from_scratch());
        assert_eq!(
            engine.position().fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
    }

    #[test]
    fn test_play_uci_rejects_illegal() {
        let mut engine = Engine::default();
        let before = engine.position().clone();
        assert!(matches!(engine.play_uci("e2e5"), Err(EngineError::IllegalMove(_))));
        assert!(matches!(engine.play_uci("zz"), Err(EngineError::IllegalMove(_))));
        assert_eq!(engine.position(), &before);
    }

    #[test]
    fn test_fifty_move_status() {
        let mut engine = Engine::from_fen("4k3/8/8/8/8/8/Q7/4K3 w - - 50 80", quick()).unwrap();
        assert_eq!(engine.result(), GameStatus::FiftyMove);
        assert_eq!(engine.get_best_move(), BestMove::Draw);
    }

    #[test]
    fn test_engine_perft() {
        let mut engine = Engine::default();
        assert_eq!(engine.perft(3), 8902);
        let divide = engine.divide(2);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 400);
        assert_eq!(engine.get_legal_moves().len(), 20);
    }
}
