//! Board state.
//!
//! `Position` keeps three synchronized views of where the pieces are:
//! - a mailbox of piece codes, one per square
//! - per-side, per-kind piece lists with their occupancy bitboards
//! - the king squares, which live outside the piece lists
//!
//! plus side to move, castling rights, en-passant target, move counters, the
//! incrementally maintained Zobrist hash and the undo stack used by
//! [`Position::make_move`] / [`Position::unmake_move`].

pub mod attacks;
mod fen;
mod makemove;
pub mod movegen;
mod piece_list;
pub mod tables;
pub mod zobrist;

pub use attacks::{attack_info, is_attacked, AttackInfo};
pub use makemove::Undo;
pub use movegen::{generate_legal, legal_moves, order_score, GenMode, MoveList};
pub use piece_list::{PieceList, MAX_PIECES};
pub use zobrist::{ZobristKeys, KEYS};

use std::fmt;

use crate::types::{Bitboard, CastleRights, Color, Hash, Piece, PieceKind, Square};

pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u16 = 50;

/// One side's pieces.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Player {
    pub color: Color,
    pub king: Square,
    lists: [PieceList; 5],
}

impl Player {
    /// Kinds kept in piece lists, in slot order.
    pub const LIST_KINDS: [PieceKind; 5] = [
        PieceKind::Queen,
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    fn new(color: Color) -> Self {
        Player { color, king: Square(0), lists: Default::default() }
    }

    #[inline]
    fn slot(kind: PieceKind) -> usize {
        match kind {
            PieceKind::Queen => 0,
            PieceKind::Pawn => 1,
            PieceKind::Rook => 2,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 4,
            PieceKind::King => unreachable!("kings are not kept in piece lists"),
        }
    }

    #[inline]
    pub fn list(&self, kind: PieceKind) -> &PieceList {
        &self.lists[Self::slot(kind)]
    }

    #[inline]
    pub(crate) fn list_mut(&mut self, kind: PieceKind) -> &mut PieceList {
        &mut self.lists[Self::slot(kind)]
    }

    /// Index of this side's piece-square tables (black reads mirrored squares).
    #[inline]
    pub fn eval_index(&self) -> usize {
        self.color.index()
    }

    /// Every square this side occupies, king included.
    pub fn occupancy(&self) -> Bitboard {
        self.lists
            .iter()
            .fold(Bitboard::from_square(self.king), |acc, list| acc | list.bitboard())
    }

    /// `(kind, square)` for every non-king piece.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceKind, Square)> + '_ {
        Self::LIST_KINDS
            .iter()
            .zip(self.lists.iter())
            .flat_map(|(&kind, list)| list.squares().iter().map(move |&sq| (kind, sq)))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    board: [Piece; 64],
    players: [Player; 2],
    side: Color,
    castle: CastleRights,
    en_passant: Option<Square>,
    halfmove: u16,
    fullmove: u16,
    hash: Hash,
    history: Vec<Undo>,
}

impl Position {
    fn empty() -> Self {
        Position {
            board: [Piece::NONE; 64],
            players: [Player::new(Color::White), Player::new(Color::Black)],
            side: Color::White,
            castle: CastleRights::NONE,
            en_passant: None,
            halfmove: 0,
            fullmove: 1,
            hash: 0,
            history: Vec::with_capacity(64),
        }
    }

    /// The standard starting position.
    pub fn startpos() -> Self {
        match Self::from_fen(STARTPOS) {
            Ok(pos) => pos,
            Err(e) => unreachable!("start position FEN is valid: {e}"),
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn castle_rights(&self) -> CastleRights {
        self.castle
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove
    }

    /// Incrementally maintained Zobrist hash.
    #[inline]
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Zobrist hash recomputed from the board.
    pub fn hash_from_scratch(&self) -> Hash {
        KEYS.hash(self)
    }

    #[inline]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    #[inline]
    pub(crate) fn player_mut(&mut self, color: Color) -> &mut Player {
        &mut self.players[color.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.players[color.index()].king
    }

    pub fn occupancy(&self) -> Bitboard {
        self.players[0].occupancy() | self.players[1].occupancy()
    }

    /// Number of moves on the undo stack.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Forget the undo stack, making the moves played so far permanent.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// True if the side to move is in check.
    pub fn in_check(&self) -> bool {
        attacks::is_attacked(self, self.king_square(self.side), !self.side)
    }

    /// Place a piece on an empty square, keeping lists and board in step.
    /// Does not touch the hash.
    fn put(&mut self, sq: Square, piece: Piece) {
        let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
            return;
        };
        self.board[sq.index()] = piece;
        let player = self.player_mut(color);
        match kind {
            PieceKind::King => player.king = sq,
            _ => player.list_mut(kind).add(sq),
        }
    }

    /// Check that the mailbox, piece lists and hash agree.
    pub fn validate(&self) -> Result<(), String> {
        for color in Color::BOTH {
            let player = self.player(color);
            if self.piece_at(player.king) != Piece::new(color, PieceKind::King) {
                return Err(format!("{:?} king square {} is stale", color, player.king));
            }
            for kind in Player::LIST_KINDS {
                let list = player.list(kind);
                let expected = Piece::new(color, kind);
                let mut from_board = Bitboard::EMPTY;
                for sq in Square::all() {
                    if self.piece_at(sq) == expected {
                        from_board.set(sq);
                    }
                }
                if from_board != list.bitboard() {
                    return Err(format!("{:?} {:?} bitboard disagrees with board", color, kind));
                }
                for (slot, &sq) in list.squares().iter().enumerate() {
                    if list.slot_of(sq) != slot || !from_board.contains(sq) {
                        return Err(format!("{:?} {:?} list entry {} is stale", color, kind, sq));
                    }
                }
                if list.len() as u32 != from_board.count() {
                    return Err(format!("{:?} {:?} count disagrees with board", color, kind));
                }
            }
        }
        if self.hash != self.hash_from_scratch() {
            return Err("incremental hash differs from recomputed hash".to_string());
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                write!(f, " {}", self.piece_at(Square::from_coords(file, rank)).to_char())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{}", self.fen())
    }
}
