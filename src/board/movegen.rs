//! Legal move generation.
//!
//! Moves are filtered against the masks from [`attack_info`] while they are
//! generated, so the list never contains a move that leaves the king attacked
//! and nothing has to be made and unmade to test legality.
//!
//! Every move carries a static ordering score:
//! - capture: victim value minus a tenth of the mover's value
//! - promotion: value of the new piece, plus the capture score
//! - castling: a flat bonus
//! - en passant: pawn takes pawn

use super::attacks::{attack_info, AttackInfo};
use super::tables::{self, ALL_DIRECTIONS, DIAGONAL, DIRECTION_OFFSETS, ORTHOGONAL};
use super::Position;
use crate::types::{CastleRights, Color, Move, MoveKind, Piece, PieceKind, Square, Value};

pub type MoveList = Vec<Move>;

pub const CASTLE_BONUS: Value = 2000;
pub const EN_PASSANT_BONUS: Value = 90;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GenMode {
    All,
    /// Captures only, for quiescence.
    Captures,
}

/// Static ordering score of moving `mover` onto a square holding `victim`.
#[inline]
pub fn order_score(mover: Piece, victim: Piece, kind: MoveKind) -> Value {
    let capture = if victim.is_some() { victim.value() - mover.value() / 10 } else { 0 };
    match kind {
        MoveKind::KingCastle | MoveKind::QueenCastle => CASTLE_BONUS,
        MoveKind::EnPassant => EN_PASSANT_BONUS,
        MoveKind::Promote(kind) => kind.value() + capture,
        MoveKind::Normal | MoveKind::DoublePush => capture,
    }
}

/// Legal moves for the side to move.
pub fn legal_moves(pos: &Position, mode: GenMode) -> MoveList {
    let mut moves = MoveList::with_capacity(64);
    generate_legal(pos, mode, &mut moves);
    moves
}

/// Append the legal moves to `moves` and return the masks they were filtered with.
pub fn generate_legal(pos: &Position, mode: GenMode, moves: &mut MoveList) -> AttackInfo {
    let info = attack_info(pos);
    let us = pos.side_to_move();
    let mut gen = Generator {
        pos,
        info,
        us,
        them: !us,
        king: pos.king_square(us),
        captures_only: mode == GenMode::Captures,
        moves,
    };

    gen.king_moves();
    if info.double_check {
        return info;
    }
    if !gen.captures_only && !info.in_check {
        gen.castling();
    }
    gen.slider_moves(PieceKind::Queen);
    gen.slider_moves(PieceKind::Rook);
    gen.slider_moves(PieceKind::Bishop);
    gen.knight_moves();
    gen.pawn_moves();
    info
}

struct Generator<'a> {
    pos: &'a Position,
    info: AttackInfo,
    us: Color,
    them: Color,
    king: Square,
    captures_only: bool,
    moves: &'a mut MoveList,
}

impl Generator<'_> {
    #[inline]
    fn push(&mut self, from: Square, to: Square, kind: MoveKind) {
        let score = order_score(self.pos.piece_at(from), self.pos.piece_at(to), kind);
        self.moves.push(Move::with_score(from, to, kind, score));
    }

    /// Destination filter shared by every piece but the king.
    #[inline]
    fn wants(&self, target: Piece) -> bool {
        !target.is_color(self.us) && (!self.captures_only || target.is_some())
    }

    fn king_moves(&mut self) {
        for to in tables::king_targets(self.king) {
            if self.wants(self.pos.piece_at(to)) && self.info.is_safe(to) {
                self.push(self.king, to, MoveKind::Normal);
            }
        }
    }

    fn castling(&mut self) {
        let rights = self.pos.castle_rights();
        let rank = self.us.back_rank();
        let at = |file| Square::from_coords(file, rank);
        if self.king != at(4) {
            return;
        }
        let (pos, info) = (self.pos, self.info);
        let rook = Piece::new(self.us, PieceKind::Rook);
        let empty = |file| pos.piece_at(at(file)).is_none();
        let safe = |file| info.is_safe(at(file));

        if rights.contains(CastleRights::kingside(self.us))
            && pos.piece_at(at(7)) == rook
            && empty(5)
            && empty(6)
            && safe(5)
            && safe(6)
        {
            self.push(self.king, at(6), MoveKind::KingCastle);
        }
        if rights.contains(CastleRights::queenside(self.us))
            && pos.piece_at(at(0)) == rook
            && empty(3)
            && empty(2)
            && empty(1)
            && safe(3)
            && safe(2)
        {
            self.push(self.king, at(2), MoveKind::QueenCastle);
        }
    }

    fn slider_moves(&mut self, kind: PieceKind) {
        let directions = match kind {
            PieceKind::Rook => ORTHOGONAL,
            PieceKind::Bishop => DIAGONAL,
            _ => ALL_DIRECTIONS,
        };
        let pos = self.pos;
        for &from in pos.player(self.us).list(kind).squares() {
            let pinned = self.info.is_pinned(from);
            for dir in directions.clone() {
                let steps = tables::steps_to_edge(from, dir);
                if steps == 0 {
                    continue;
                }
                let offset = DIRECTION_OFFSETS[dir];
                if pinned && !tables::same_ray(self.king, from, from.shift(offset)) {
                    continue;
                }
                let mut to = from;
                for _ in 0..steps {
                    to = to.shift(offset);
                    let target = pos.piece_at(to);
                    if target.is_color(self.us) {
                        break;
                    }
                    if self.wants(target) && self.info.resolves_check(to) {
                        self.push(from, to, MoveKind::Normal);
                    }
                    if target.is_some() {
                        break;
                    }
                }
            }
        }
    }

    fn knight_moves(&mut self) {
        let pos = self.pos;
        for &from in pos.player(self.us).list(PieceKind::Knight).squares() {
            // A knight never moves along its own pin line.
            if self.info.is_pinned(from) {
                continue;
            }
            for to in tables::knight_targets(from) {
                if self.wants(pos.piece_at(to)) && self.info.resolves_check(to) {
                    self.push(from, to, MoveKind::Normal);
                }
            }
        }
    }

    fn pawn_moves(&mut self) {
        let pos = self.pos;
        let forward = self.us.forward();
        let ep = pos.en_passant();
        let king = self.king;

        for &from in pos.player(self.us).list(PieceKind::Pawn).squares() {
            let pinned = self.info.is_pinned(from);
            let on_pin_line = |to: Square| !pinned || tables::same_ray(king, from, to);

            if !self.captures_only {
                let one = from.shift(forward);
                if pos.piece_at(one).is_none() && on_pin_line(one) {
                    if self.info.resolves_check(one) {
                        self.push_pawn(from, one);
                    }
                    if from.rank() == self.us.pawn_rank() {
                        let two = one.shift(forward);
                        if pos.piece_at(two).is_none() && self.info.resolves_check(two) {
                            self.push(from, two, MoveKind::DoublePush);
                        }
                    }
                }
            }

            for to in tables::pawn_attacks(self.us, from) {
                if !on_pin_line(to) {
                    continue;
                }
                if pos.piece_at(to).is_color(self.them) {
                    if self.info.resolves_check(to) {
                        self.push_pawn(from, to);
                    }
                } else if ep == Some(to) {
                    self.en_passant(from, to);
                }
            }
        }
    }

    /// Emit a pawn move, expanding it into the four promotions on the last rank.
    fn push_pawn(&mut self, from: Square, to: Square) {
        if to.rank() == self.us.promotion_rank() {
            for kind in PieceKind::PROMOTIONS {
                self.push(from, to, MoveKind::Promote(kind));
            }
        } else {
            self.push(from, to, MoveKind::Normal);
        }
    }

    fn en_passant(&mut self, from: Square, to: Square) {
        let captured = to.shift(-self.us.forward());
        if self.info.in_check
            && !self.info.check_block.contains(captured)
            && !self.info.check_block.contains(to)
        {
            return;
        }
        if self.king.rank() == from.rank() && self.exposes_rank(from, captured) {
            return;
        }
        self.push(from, to, MoveKind::EnPassant);
    }

    /// Would removing both pawns from the king's rank uncover an enemy rook or queen?
    fn exposes_rank(&self, from: Square, captured: Square) -> bool {
        let rank = self.king.rank();
        let step: i8 = if from.file() > self.king.file() { 1 } else { -1 };
        let mut file = self.king.file() as i8 + step;
        while (0..8).contains(&file) {
            let sq = Square::from_coords(file as u8, rank);
            file += step;
            if sq == from || sq == captured {
                continue;
            }
            let piece = self.pos.piece_at(sq);
            if piece.is_none() {
                continue;
            }
            return piece.is_color(self.them) && piece.is_orthogonal_slider();
        }
        false
    }
}

impl Position {
    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(self, GenMode::All)
    }

    /// Resolve coordinate notation (`e2e4`, `e7e8q`) against the legal moves.
    pub fn parse_move(&self, text: &str) -> Option<Move> {
        let text = text.trim();
        self.legal_moves().into_iter().find(|m| m.to_string() == text)
    }
}
