//! Reversible move application.
//!
//! `make_move` pushes an [`Undo`] record and updates the hash incrementally;
//! `unmake_move` pops it and applies every change in reverse, including the
//! exact order of the piece lists, so the position compares equal to what it
//! was before the move.

use super::{Position, KEYS};
use crate::types::{CastleRights, Color, Move, MoveKind, Piece, PieceKind, Square};

/// State a move destroys and unmake needs back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Undo {
    pub en_passant: Option<Square>,
    pub castle: CastleRights,
    pub halfmove: u16,
    pub fullmove: u16,
    /// Piece removed from the board, `Piece::NONE` for a quiet move.
    pub captured: Piece,
    /// Piece-list slot the captured piece occupied.
    captured_slot: u8,
    /// Piece-list slot of a promoting pawn.
    pawn_slot: u8,
}

/// Rights that survive a move touching each square.
const CASTLE_KEEP: [CastleRights; 64] = {
    let mut keep = [CastleRights::ALL; 64];
    keep[Square::A1.index()] = CastleRights(15 & !CastleRights::WHITE_QUEEN.0);
    keep[Square::H1.index()] = CastleRights(15 & !CastleRights::WHITE_KING.0);
    keep[Square::E1.index()] =
        CastleRights(15 & !(CastleRights::WHITE_KING.0 | CastleRights::WHITE_QUEEN.0));
    keep[Square::A8.index()] = CastleRights(15 & !CastleRights::BLACK_QUEEN.0);
    keep[Square::H8.index()] = CastleRights(15 & !CastleRights::BLACK_KING.0);
    keep[Square::E8.index()] =
        CastleRights(15 & !(CastleRights::BLACK_KING.0 | CastleRights::BLACK_QUEEN.0));
    keep
};

/// Rook squares for a castling move by the king from `king`.
#[inline]
fn castle_rook(king: Square, kind: MoveKind) -> (Square, Square) {
    match kind {
        MoveKind::KingCastle => (king.shift(3), king.shift(1)),
        _ => (king.shift(-4), king.shift(-1)),
    }
}

impl Position {
    /// Relocate a piece, updating mailbox, list or king square, and hash.
    fn shift_piece(&mut self, piece: Piece, from: Square, to: Square) {
        let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
            return;
        };
        self.board[from.index()] = Piece::NONE;
        self.board[to.index()] = piece;
        let player = self.player_mut(color);
        match kind {
            PieceKind::King => player.king = to,
            _ => player.list_mut(kind).relocate(from, to),
        }
        self.hash ^= KEYS.piece(piece, from) ^ KEYS.piece(piece, to);
    }

    /// Take a non-king piece off the board, returning its list slot.
    fn lift_piece(&mut self, piece: Piece, sq: Square) -> u8 {
        let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
            return 0;
        };
        self.board[sq.index()] = Piece::NONE;
        self.hash ^= KEYS.piece(piece, sq);
        self.player_mut(color).list_mut(kind).remove(sq) as u8
    }

    /// Put a non-king piece on the board at a given list slot.
    fn drop_piece(&mut self, piece: Piece, sq: Square, slot: u8) {
        let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
            return;
        };
        self.board[sq.index()] = piece;
        self.hash ^= KEYS.piece(piece, sq);
        self.player_mut(color).list_mut(kind).restore(sq, slot as usize);
    }

    /// Append a non-king piece to its list.
    fn add_piece(&mut self, piece: Piece, sq: Square) {
        let slot = piece
            .color()
            .zip(piece.kind())
            .map_or(0, |(color, kind)| self.player(color).list(kind).len());
        self.drop_piece(piece, sq, slot as u8);
    }

    fn set_castle(&mut self, rights: CastleRights) {
        if rights != self.castle {
            self.hash ^= KEYS.castle(self.castle) ^ KEYS.castle(rights);
            self.castle = rights;
        }
    }

    fn set_en_passant(&mut self, ep: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= KEYS.en_passant(old);
        }
        if let Some(new) = ep {
            self.hash ^= KEYS.en_passant(new);
        }
        self.en_passant = ep;
    }

    /// Apply a move generated for this position.
    pub fn make_move(&mut self, m: Move) {
        let us = self.side;
        let mover = self.piece_at(m.from);
        debug_assert!(mover.is_color(us), "no {:?} piece on {}", us, m.from);

        let mut undo = Undo {
            en_passant: self.en_passant,
            castle: self.castle,
            halfmove: self.halfmove,
            fullmove: self.fullmove,
            captured: Piece::NONE,
            captured_slot: 0,
            pawn_slot: 0,
        };
        self.set_en_passant(None);

        let is_pawn = mover.kind() == Some(PieceKind::Pawn);
        match m.kind {
            MoveKind::Normal | MoveKind::DoublePush => {
                let victim = self.piece_at(m.to);
                if victim.is_some() {
                    undo.captured = victim;
                    undo.captured_slot = self.lift_piece(victim, m.to);
                }
                self.shift_piece(mover, m.from, m.to);
                if m.kind == MoveKind::DoublePush {
                    self.set_en_passant(Some(m.from.shift(us.forward())));
                }
            }
            MoveKind::EnPassant => {
                let captured_sq = m.to.shift(-us.forward());
                let victim = self.piece_at(captured_sq);
                undo.captured = victim;
                undo.captured_slot = self.lift_piece(victim, captured_sq);
                self.shift_piece(mover, m.from, m.to);
            }
            MoveKind::KingCastle | MoveKind::QueenCastle => {
                let (rook_from, rook_to) = castle_rook(m.from, m.kind);
                let rook = self.piece_at(rook_from);
                self.shift_piece(mover, m.from, m.to);
                self.shift_piece(rook, rook_from, rook_to);
            }
            MoveKind::Promote(kind) => {
                let victim = self.piece_at(m.to);
                if victim.is_some() {
                    undo.captured = victim;
                    undo.captured_slot = self.lift_piece(victim, m.to);
                }
                undo.pawn_slot = self.lift_piece(mover, m.from);
                self.add_piece(Piece::new(us, kind), m.to);
            }
        }

        // Counters saturate: a FEN may start them anywhere in `u16`.
        self.halfmove =
            if is_pawn || undo.captured.is_some() { 0 } else { self.halfmove.saturating_add(1) };
        let keep = CASTLE_KEEP[m.from.index()].intersect(CASTLE_KEEP[m.to.index()]);
        self.set_castle(self.castle.intersect(keep));

        self.side = !us;
        self.hash ^= KEYS.side();
        if us == Color::Black {
            self.fullmove = self.fullmove.saturating_add(1);
        }
        self.history.push(undo);
    }

    /// Reverse the most recent [`Position::make_move`]; `m` must be that move.
    pub fn unmake_move(&mut self, m: Move) {
        let undo = self
            .history
            .pop()
            .expect("unmake_move called without a matching make_move");
        let us = !self.side;
        self.side = us;
        self.hash ^= KEYS.side();
        self.set_castle(undo.castle);
        self.set_en_passant(undo.en_passant);
        self.halfmove = undo.halfmove;
        self.fullmove = undo.fullmove;

        match m.kind {
            MoveKind::Normal | MoveKind::DoublePush => {
                let mover = self.piece_at(m.to);
                self.shift_piece(mover, m.to, m.from);
                if undo.captured.is_some() {
                    self.drop_piece(undo.captured, m.to, undo.captured_slot);
                }
            }
            MoveKind::EnPassant => {
                let mover = self.piece_at(m.to);
                self.shift_piece(mover, m.to, m.from);
                let captured_sq = m.to.shift(-us.forward());
                self.drop_piece(undo.captured, captured_sq, undo.captured_slot);
            }
            MoveKind::KingCastle | MoveKind::QueenCastle => {
                let (rook_from, rook_to) = castle_rook(m.from, m.kind);
                let rook = self.piece_at(rook_to);
                self.shift_piece(rook, rook_to, rook_from);
                let king = self.piece_at(m.to);
                self.shift_piece(king, m.to, m.from);
            }
            MoveKind::Promote(_) => {
                let promoted = self.piece_at(m.to);
                self.lift_piece(promoted, m.to);
                self.drop_piece(Piece::new(us, PieceKind::Pawn), m.from, undo.pawn_slot);
                if undo.captured.is_some() {
                    self.drop_piece(undo.captured, m.to, undo.captured_slot);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{attacks, STARTPOS};

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    fn play(pos: &mut Position, text: &str) -> Move {
        let m = pos.parse_move(text).unwrap_or_else(|| panic!("{} not legal", text));
        pos.make_move(m);
        m
    }

    #[test]
    fn test_roundtrip_every_move() {
        for fen in [
            STARTPOS,
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ] {
            let mut pos = Position::from_fen(fen).unwrap();
            let before = pos.clone();
            for m in pos.legal_moves() {
                pos.make_move(m);
                assert!(pos.validate().is_ok(), "{} after {}: {:?}", fen, m, pos.validate());
                pos.unmake_move(m);
                assert_eq!(pos, before, "{} not restored after {}", fen, m);
            }
        }
    }

    #[test]
    fn test_moves_never_leave_king_attacked() {
        let mut pos = Position::from_fen(KIWIPETE).unwrap();
        for m in pos.legal_moves() {
            let us = pos.side_to_move();
            pos.make_move(m);
            assert!(!attacks::is_attacked(&pos, pos.king_square(us), !us), "{} is illegal", m);
            pos.unmake_move(m);
        }
    }

    #[test]
    fn test_double_push_sets_en_passant() {
        let mut pos = Position::startpos();
        play(&mut pos, "e2e4");
        assert_eq!(pos.en_passant(), Some("e3".parse().unwrap()));
        assert_eq!(pos.halfmove_clock(), 0);
        play(&mut pos, "g8f6");
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.halfmove_clock(), 1);
        assert_eq!(pos.fullmove_number(), 2);
        assert_eq!(pos.hash(), pos.hash_from_scratch());
    }

    #[test]
    fn test_en_passant_capture() {
        let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let before = pos.clone();
        let m = play(&mut pos, "e5d6");
        assert!(pos.piece_at("d5".parse().unwrap()).is_none());
        assert_eq!(pos.player(Color::Black).list(PieceKind::Pawn).len(), 0);
        assert_eq!(pos.hash(), pos.hash_from_scratch());
        pos.unmake_move(m);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_castling_moves_rook_and_revokes_rights() {
        let mut pos = Position::from_fen(KIWIPETE).unwrap();
        play(&mut pos, "e1g1");
        assert_eq!(pos.piece_at(Square::F1), Piece::new(Color::White, PieceKind::Rook));
        assert_eq!(pos.king_square(Color::White), Square::G1);
        assert_eq!(pos.castle_rights(), CastleRights::BLACK_KING.union(CastleRights::BLACK_QUEEN));
        assert_eq!(pos.hash(), pos.hash_from_scratch());

        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        play(&mut pos, "e8c8");
        assert_eq!(pos.piece_at(Square::D8), Piece::new(Color::Black, PieceKind::Rook));
        assert_eq!(pos.castle_rights(), CastleRights::WHITE_KING.union(CastleRights::WHITE_QUEEN));
    }

    #[test]
    fn test_rook_capture_revokes_right() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut pos, "a1a8");
        assert!(!pos.castle_rights().contains(CastleRights::WHITE_QUEEN));
        assert!(!pos.castle_rights().contains(CastleRights::BLACK_QUEEN));
        assert!(pos.castle_rights().contains(CastleRights::WHITE_KING));
        assert_eq!(pos.hash(), pos.hash_from_scratch());
    }

    #[test]
    fn test_promotion_capture_roundtrip() {
        let mut pos = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = pos.clone();
        let m = play(&mut pos, "a7b8q");
        assert_eq!(pos.piece_at(Square::B8), Piece::new(Color::White, PieceKind::Queen));
        assert_eq!(pos.player(Color::White).list(PieceKind::Pawn).len(), 0);
        assert_eq!(pos.player(Color::Black).list(PieceKind::Knight).len(), 0);
        assert!(pos.validate().is_ok());
        pos.unmake_move(m);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_nested_make_unmake() {
        let mut pos = Position::from_fen(KIWIPETE).unwrap();
        let before = pos.clone();
        let line = ["e5f7", "e7f7", "e2a6", "b4c3", "a6b7"];
        let mut played = Vec::new();
        for text in line {
            played.push(play(&mut pos, text));
            assert_eq!(pos.hash(), pos.hash_from_scratch());
        }
        assert_eq!(pos.history_len(), line.len());
        for m in played.into_iter().rev() {
            pos.unmake_move(m);
        }
        assert_eq!(pos, before);
    }

    #[test]
    fn test_counters_saturate_at_limit() {
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 65535 1").unwrap();
        assert!(crate::perft::perft(&mut pos, 2) > 0);

        let mut pos = Position::from_fen("4k2r/8/8/8/8/8/8/4K3 b - - 65535 65535").unwrap();
        let before = pos.clone();
        for m in pos.legal_moves() {
            pos.make_move(m);
            assert_eq!(pos.halfmove_clock(), 65535);
            assert_eq!(pos.fullmove_number(), 65535);
            pos.unmake_move(m);
            assert_eq!(pos, before, "not restored after {}", m);
        }
    }
}
