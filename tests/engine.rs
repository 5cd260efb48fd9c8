use masker::types::Color;
use masker::{BestMove, Engine, EngineConfig, GameStatus, Score, SearchLimits};

fn quick() -> EngineConfig {
    EngineConfig {
        limits: SearchLimits::depth(3),
        tt_capacity: 1 << 14,
    }
}

const SHUFFLE: [&str; 4] = ["a1b1", "a8b8", "b1a1", "b8a8"];

#[test]
fn test_threefold_by_king_shuffle() {
    let mut engine = Engine::from_fen("k7/8/8/8/8/8/8/K6R w - - 0 1", quick()).unwrap();
    for _ in 0..2 {
        for text in SHUFFLE {
            assert_eq!(engine.result(), GameStatus::Ongoing);
            engine.play_uci(text).unwrap();
        }
    }
    assert_eq!(engine.result(), GameStatus::Threefold);
    assert_eq!(engine.get_best_move(), BestMove::Draw);
}

#[test]
fn test_losing_side_claims_repetition() {
    let mut engine = Engine::from_fen("k7/8/8/8/8/8/8/K6R w - - 0 1", quick()).unwrap();
    for text in SHUFFLE.iter().chain(&SHUFFLE[..3]) {
        engine.play_uci(text).unwrap();
    }
    assert_eq!(engine.position().side_to_move(), Color::Black);

    let best = engine.get_best_move();
    assert_eq!(best.to_string(), "b8a8");
    assert_eq!(engine.last_search().unwrap().score, Score::DRAW);
}

#[test]
fn test_selfplay_stays_consistent() {
    let config = EngineConfig {
        limits: SearchLimits::depth(2),
        tt_capacity: 1 << 12,
    };
    let mut engine = Engine::new(Default::default(), config);
    let mut played = 0;
    for _ in 0..12 {
        let BestMove::Play(m) = engine.get_best_move() else {
            break;
        };
        assert!(engine.get_legal_moves().contains(&m));
        engine.play_move(m);
        played += 1;
        assert_eq!(engine.position().hash(), engine.position().hash_from_scratch());
        assert_eq!(engine.position().history_len(), 0);
    }
    assert!(played >= 4);
    assert_eq!(engine.position().fullmove_number() as u32, 1 + played / 2);
}

#[test]
fn test_engine_from_bad_fen() {
    assert!(Engine::from_fen("not a fen", quick()).is_err());
    assert!(Engine::from_fen("8/8/8/8/8/8/8/8 w - - 0 1", quick()).is_err());
}

#[test]
fn test_promotes_to_queen() {
    let mut engine = Engine::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1", quick()).unwrap();
    assert_eq!(engine.get_best_move().to_string(), "e7e8q");
}
