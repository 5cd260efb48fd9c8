//! Attack, pin and check masks for the side to move.
//!
//! Every enemy piece is swept once:
//! - sliders walk their rays, stopping after the first piece of their own
//!   color and passing through the defending king so the king cannot step
//!   back along the checking ray
//! - a ray that meets exactly one defending piece before the king pins it
//! - knights, pawns and the king use the precomputed target sets
//!
//! A checker contributes its own square and the squares between it and the
//! king to `check_block`; a second checker sets `double_check`.

use super::tables::{self, DIAGONAL, DIRECTIONS, DIRECTION_OFFSETS, ORTHOGONAL};
use super::Position;
use crate::types::{Bitboard, Color, Piece, PieceKind, Square};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AttackInfo {
    /// Squares the opponent attacks or defends.
    pub attacked: Bitboard,
    /// Pin rays (pinner through pinned piece up to the king).
    pub pins: Bitboard,
    /// Destinations that capture or block the single checker.
    pub check_block: Bitboard,
    /// Squares of the checking pieces.
    pub checkers: Bitboard,
    pub in_check: bool,
    pub double_check: bool,
}

impl AttackInfo {
    /// The king may stand on `sq`.
    #[inline]
    pub fn is_safe(&self, sq: Square) -> bool {
        !self.attacked.contains(sq)
    }

    #[inline]
    pub fn is_pinned(&self, sq: Square) -> bool {
        self.pins.contains(sq)
    }

    /// Moving a non-king piece to `sq` leaves the king out of check.
    #[inline]
    pub fn resolves_check(&self, sq: Square) -> bool {
        !self.in_check || self.check_block.contains(sq)
    }
}

/// Compute the masks for the side to move.
pub fn attack_info(pos: &Position) -> AttackInfo {
    let us = pos.side_to_move();
    let them = !us;
    let king = pos.king_square(us);
    let enemy = pos.player(them);
    let mut info = AttackInfo::default();
    let mut checks = 0u32;

    for (kind, sq) in enemy.pieces() {
        match kind {
            PieceKind::Queen => {
                for dir in ORTHOGONAL.chain(DIAGONAL) {
                    sweep_ray(pos, sq, dir, them, king, &mut info, &mut checks);
                }
            }
            PieceKind::Rook => {
                for dir in ORTHOGONAL {
                    sweep_ray(pos, sq, dir, them, king, &mut info, &mut checks);
                }
            }
            PieceKind::Bishop => {
                for dir in DIAGONAL {
                    sweep_ray(pos, sq, dir, them, king, &mut info, &mut checks);
                }
            }
            PieceKind::Knight => {
                let targets = tables::knight_targets(sq);
                info.attacked |= targets;
                if targets.contains(king) {
                    add_checker(&mut info, &mut checks, Bitboard::from_square(sq), sq);
                }
            }
            PieceKind::Pawn => {
                let targets = tables::pawn_attacks(them, sq);
                info.attacked |= targets;
                if targets.contains(king) {
                    add_checker(&mut info, &mut checks, Bitboard::from_square(sq), sq);
                }
            }
            PieceKind::King => {}
        }
    }
    info.attacked |= tables::king_targets(enemy.king);

    info.in_check = checks > 0;
    info.double_check = checks > 1;
    info
}

fn add_checker(info: &mut AttackInfo, checks: &mut u32, block: Bitboard, checker: Square) {
    info.check_block |= block;
    info.checkers.set(checker);
    *checks += 1;
}

/// Walk one ray from an enemy slider at `from`.
fn sweep_ray(
    pos: &Position,
    from: Square,
    dir: usize,
    attacker: Color,
    king: Square,
    info: &mut AttackInfo,
    checks: &mut u32,
) {
    let offset = DIRECTION_OFFSETS[dir];
    let own_king = Piece::new(!attacker, PieceKind::King);
    let mut ray = Bitboard::from_square(from);
    let mut blocker: Option<Square> = None;
    let mut through_king = false;
    let mut sq = from;

    for _ in 0..tables::steps_to_edge(from, dir) {
        sq = sq.shift(offset);
        let piece = pos.piece_at(sq);
        if blocker.is_none() {
            info.attacked.set(sq);
        }

        if piece.is_none() {
            ray.set(sq);
            continue;
        }
        if through_king || piece.is_color(attacker) {
            break;
        }
        if piece == own_king {
            match blocker {
                Some(_) => {
                    info.pins |= ray;
                    break;
                }
                None => {
                    add_checker(info, checks, ray, from);
                    through_king = true;
                }
            }
            continue;
        }
        // A defending piece: first one may be pinned, a second ends the ray.
        if blocker.is_some() {
            break;
        }
        blocker = Some(sq);
        ray.set(sq);
    }
}

/// True if `sq` is attacked by any piece of `by`, scanning outward from `sq`.
pub fn is_attacked(pos: &Position, sq: Square, by: Color) -> bool {
    let attackers = pos.player(by);
    if !(tables::knight_targets(sq) & attackers.list(PieceKind::Knight).bitboard()).is_empty() {
        return true;
    }
    if !(tables::pawn_attacks(!by, sq) & attackers.list(PieceKind::Pawn).bitboard()).is_empty() {
        return true;
    }
    if tables::king_targets(sq).contains(attackers.king) {
        return true;
    }
    for (dir, &(df, dr)) in DIRECTIONS.iter().enumerate() {
        let diagonal = df != 0 && dr != 0;
        let mut cur = sq;
        for _ in 0..tables::steps_to_edge(sq, dir) {
            cur = cur.shift(DIRECTION_OFFSETS[dir]);
            let piece = pos.piece_at(cur);
            if piece.is_none() {
                continue;
            }
            let slides = if diagonal { piece.is_diagonal_slider() } else { piece.is_orthogonal_slider() };
            if piece.is_color(by) && slides {
                return true;
            }
            break;
        }
    }
    false
}
