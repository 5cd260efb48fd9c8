//! Static evaluation.
//!
//! Scores a position for the side to move by summing, per side:
//! - material and piece-square values
//! - the king term, chosen by how far the game has progressed: the
//!   middle-game table plus a pawn-shield and castled-corner bonus, or the
//!   end-game table plus activity toward the centre and the enemy king
//! - pawns read a doubled end-game table once the endgame starts
//! - passed pawns, worth more as material comes off
//!
//! Progress is an integer endgame weight in `0..=256` derived from how much of
//! the opponent's starting material is gone.

mod pst;

pub use pst::{PieceSquareTables, Table, TABLES};

use crate::board::{Player, Position};
use crate::types::{Bitboard, Color, PieceKind, Score, Square, Value};

/// Non-king material each side starts with.
const START_MATERIAL: Value = 8 * 100 + 2 * 300 + 2 * 330 + 2 * 500 + 900;

/// Full endgame weight.
const WEIGHT_SCALE: Value = 256;

/// Weight (60%) at which kings switch to the end-game terms.
const ENDGAME_THRESHOLD: Value = 154;

const SHIELD_BONUS: Value = 20;
const CASTLED_BONUS: Value = 40;
const PASSED_PAWN_BONUS: [Value; 8] = [0, 10, 20, 40, 60, 90, 130, 0];

/// Score of `pos` from the side to move's point of view.
pub fn evaluate(pos: &Position) -> Score {
    let us = pos.side_to_move();
    let weights = [endgame_weight(pos, Color::White), endgame_weight(pos, Color::Black)];
    let endgame = weights[0].max(weights[1]) >= ENDGAME_THRESHOLD;

    let ours = side_score(pos, us, weights[us.index()], endgame);
    let theirs = side_score(pos, !us, weights[(!us).index()], endgame);
    Score::cp(ours - theirs)
}

/// Non-king material of one side.
pub fn material(player: &Player) -> Value {
    Player::LIST_KINDS
        .iter()
        .map(|&kind| player.list(kind).len() as Value * kind.value())
        .sum()
}

/// How far into the endgame `color` is, judged by the opponent's lost material.
pub fn endgame_weight(pos: &Position, color: Color) -> Value {
    let remaining = material(pos.player(!color)).min(START_MATERIAL);
    (START_MATERIAL - remaining) * WEIGHT_SCALE / START_MATERIAL
}

fn side_score(pos: &Position, color: Color, weight: Value, endgame: bool) -> Value {
    let player = pos.player(color);
    let idx = player.eval_index();
    let mut score = 0;

    for (kind, sq) in player.pieces() {
        score += kind.value();
        score += match kind {
            PieceKind::Pawn if endgame => 2 * TABLES.value(idx, Table::PawnEnd, sq),
            _ => TABLES.value(idx, Table::Piece(kind), sq),
        };
        if kind == PieceKind::Pawn && is_passed(pos, color, sq) {
            let rank = match color {
                Color::White => sq.rank(),
                Color::Black => 7 - sq.rank(),
            };
            score += PASSED_PAWN_BONUS[rank as usize] * weight / WEIGHT_SCALE;
        }
    }

    let king = player.king;
    if endgame {
        score += TABLES.value(idx, Table::KingEnd, king);
        score += king_activity(king, pos.king_square(!color)) * weight / WEIGHT_SCALE;
    } else {
        score += TABLES.value(idx, Table::Piece(PieceKind::King), king);
        score += king_safety(pos, color);
    }
    score
}

/// Reward a central king that walks up to the enemy king and drives it
/// toward a corner.
fn king_activity(king: Square, enemy_king: Square) -> Value {
    let centre_file = (2 * king.file() as Value - 7).abs();
    let centre_rank = (2 * king.rank() as Value - 7).abs();
    let centralisation = 14 - (centre_file + centre_rank);
    let closeness = 7 - king.distance(enemy_king) as Value;
    let cornered = 3 - corner_distance(enemy_king);
    centralisation * 3 + closeness * 6 + cornered * 9
}

/// King steps from `sq` to the nearest corner, `0..=3`.
fn corner_distance(sq: Square) -> Value {
    let file = sq.file().min(7 - sq.file());
    let rank = sq.rank().min(7 - sq.rank());
    file.max(rank) as Value
}

/// Friendly pieces directly in front of the king, plus a castled corner.
fn king_safety(pos: &Position, color: Color) -> Value {
    let king = pos.king_square(color);
    let forward = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    let mut score = 0;
    for df in -1..=1 {
        if let Some(sq) = king.offset(df, forward) {
            if pos.piece_at(sq).is_color(color) {
                score += SHIELD_BONUS;
            }
        }
    }
    let file = king.file();
    if king.rank() == color.back_rank() && (file <= 2 || file >= 6) {
        score += CASTLED_BONUS;
    }
    score
}

/// No enemy pawn ahead of this pawn on its own or an adjacent file.
fn is_passed(pos: &Position, color: Color, sq: Square) -> bool {
    let file = sq.file();
    let mut files = Bitboard::file(file);
    if file > 0 {
        files |= Bitboard::file(file - 1);
    }
    if file < 7 {
        files |= Bitboard::file(file + 1);
    }
    let ahead = match color {
        Color::White => Bitboard(u64::MAX.checked_shl((sq.rank() as u32 + 1) * 8).unwrap_or(0)),
        Color::Black => Bitboard((1u64 << (sq.rank() * 8)) - 1),
    };
    let enemy_pawns = pos.player(!color).list(PieceKind::Pawn).bitboard();
    (enemy_pawns & files & ahead).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS;

    fn eval(fen: &str) -> Value {
        evaluate(&Position::from_fen(fen).unwrap()).raw()
    }

    #[test]
    fn test_starting_position_balanced() {
        assert_eq!(eval(STARTPOS), 0);
        assert_eq!(endgame_weight(&Position::startpos(), Color::White), 0);
    }

    #[test]
    fn test_material_advantage() {
        let up_queen = eval("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(up_queen > 800);
        let down_queen = eval("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
        assert_eq!(down_queen, -up_queen);
    }

    #[test]
    fn test_color_symmetry() {
        assert_eq!(
            eval("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"),
            eval("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1")
        );
        assert_eq!(
            eval("r3k3/1p6/8/8/3N4/8/8/4K2R w - - 0 1"),
            eval("4k2r/8/8/3n4/8/8/1P6/R3K3 b - - 0 1")
        );
    }

    #[test]
    fn test_passed_pawn_detection() {
        let pos = Position::from_fen("4k3/8/8/3p4/8/8/2P1P3/4K3 w - - 0 1").unwrap();
        assert!(!is_passed(&pos, Color::White, "c2".parse().unwrap()));
        assert!(!is_passed(&pos, Color::White, "e2".parse().unwrap()));
        assert!(!is_passed(&pos, Color::Black, "d5".parse().unwrap()));

        let pos = Position::from_fen("4k3/8/8/8/8/8/P6p/4K3 w - - 0 1").unwrap();
        assert!(is_passed(&pos, Color::White, "a2".parse().unwrap()));
        assert!(is_passed(&pos, Color::Black, "h2".parse().unwrap()));
    }

    #[test]
    fn test_endgame_king_prefers_centre() {
        let centre = eval("8/8/8/3K4/8/8/8/k7 w - - 0 1");
        let corner = eval("8/8/8/8/8/8/8/k6K w - - 0 1");
        assert!(centre > corner);
    }

    #[test]
    fn test_endgame_drives_enemy_king_to_corner() {
        let d4: Square = "d4".parse().unwrap();
        assert_eq!(corner_distance(Square::A1), 0);
        assert_eq!(corner_distance("g4".parse().unwrap()), 3);
        assert_eq!(corner_distance("b7".parse().unwrap()), 1);
        // Both enemy kings stand three steps from d4.
        assert!(king_activity(d4, Square::A1) > king_activity(d4, "g4".parse().unwrap()));

        let cornered = eval("7k/8/8/8/4K3/8/Q7/8 w - - 0 1");
        let central = eval("8/8/8/5k2/8/2K5/Q7/8 w - - 0 1");
        assert!(cornered > central);
    }

    #[test]
    fn test_endgame_pawns_use_end_table() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/3P4/4K3 w - - 0 1").unwrap();
        let d2: Square = "d2".parse().unwrap();
        let king_end = TABLES.value(0, Table::KingEnd, Square::E1)
            + king_activity(Square::E1, pos.king_square(Color::Black));
        let king_middle = TABLES.value(0, Table::Piece(PieceKind::King), Square::E1)
            + king_safety(&pos, Color::White);
        let pawn_end = side_score(&pos, Color::White, WEIGHT_SCALE, true) - king_end;
        let pawn_middle = side_score(&pos, Color::White, WEIGHT_SCALE, false) - king_middle;
        assert_eq!(
            pawn_end - pawn_middle,
            2 * TABLES.value(0, Table::PawnEnd, d2) - TABLES.value(0, Table::Piece(PieceKind::Pawn), d2)
        );
    }

    #[test]
    fn test_castled_king_is_safer() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/5PPP/6K1 w - - 0 1").unwrap();
        assert_eq!(king_safety(&pos, Color::White), 3 * SHIELD_BONUS + CASTLED_BONUS);
    }
}
