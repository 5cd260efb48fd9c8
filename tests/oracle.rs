//! Cross-checks against the `chess` crate.

use std::str::FromStr;

use chess::{Board, MoveGen};
use masker::board::is_attacked;
use masker::perft::perft;
use masker::Position;

const FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "8/8/8/2k5/2pP4/8/B7/4K3 b - d3 0 3",
    "4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 1",
    "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
];

fn sorted_moves(pos: &Position) -> Vec<String> {
    let mut moves: Vec<String> = pos.legal_moves().iter().map(|m| m.to_string()).collect();
    moves.sort();
    moves
}

fn oracle_moves(board: &Board) -> Vec<String> {
    let mut moves: Vec<String> = MoveGen::new_legal(board).map(|m| m.to_string()).collect();
    moves.sort();
    moves
}

/// Walk both trees in lockstep, comparing move sets and checking that every
/// node keeps a consistent hash and every move leaves the mover's king safe.
fn walk(pos: &mut Position, board: &Board, depth: u32) {
    assert_eq!(sorted_moves(pos), oracle_moves(board), "move sets differ at {}", pos.fen());
    assert_eq!(pos.hash(), pos.hash_from_scratch(), "stale hash at {}", pos.fen());
    if depth == 0 {
        return;
    }

    for m in pos.legal_moves() {
        let before = pos.clone();
        let mover = pos.side_to_move();
        pos.make_move(m);
        assert!(
            !is_attacked(pos, pos.king_square(mover), !mover),
            "{m} leaves the king attacked in {}",
            before.fen()
        );

        let oracle = MoveGen::new_legal(board)
            .find(|om| om.to_string() == m.to_string())
            .unwrap_or_else(|| panic!("{m} not legal for the oracle in {}", before.fen()));
        walk(pos, &board.make_move_new(oracle), depth - 1);

        pos.unmake_move(m);
        assert_eq!(*pos, before, "unmake of {m} did not restore {}", before.fen());
    }
}

#[test]
fn test_move_sets_match_oracle() {
    for fen in FENS {
        let mut pos = Position::from_fen(fen).unwrap();
        let board = Board::from_str(fen).unwrap();
        walk(&mut pos, &board, 2);
    }
}

#[test]
fn test_perft_matches_oracle() {
    for fen in FENS {
        let mut pos = Position::from_fen(fen).unwrap();
        let board = Board::from_str(fen).unwrap();
        assert_eq!(perft(&mut pos, 3), MoveGen::movegen_perft_test(&board, 3) as u64, "{fen}");
    }
}

#[test]
#[ignore]
fn test_deep_walk_matches_oracle() {
    for fen in FENS {
        let mut pos = Position::from_fen(fen).unwrap();
        let board = Board::from_str(fen).unwrap();
        walk(&mut pos, &board, 4);
    }
}

/// Count leaves while checking the incremental hash against a full recompute
/// at every node.
fn hash_walk(pos: &mut Position, depth: u32) -> u64 {
    assert_eq!(pos.hash(), pos.hash_from_scratch(), "stale hash at {}", pos.fen());
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for m in pos.legal_moves() {
        let hash = pos.hash();
        pos.make_move(m);
        nodes += hash_walk(pos, depth - 1);
        pos.unmake_move(m);
        assert_eq!(pos.hash(), hash, "unmake of {m} changed the hash of {}", pos.fen());
    }
    nodes
}

#[test]
#[ignore]
fn test_deep_hash_walk() {
    for (fen, depth, expected) in [
        (FENS[0], 5, 4_865_609),
        (FENS[2], 6, 11_030_083),
        (FENS[3], 5, 15_833_292),
    ] {
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        assert_eq!(hash_walk(&mut pos, depth), expected, "{fen}");
        assert_eq!(pos, before);
    }
}
