//! FEN parsing and formatting.
//!
//! Parsing validates everything the move generator relies on (one king per
//! side, piece-list capacity, sane castling and en-passant fields) and only
//! returns a fully built `Position`.

use std::fmt::Write;
use std::str::FromStr;

use super::{Position, KEYS};
use crate::error::FenError;
use crate::types::{CastleRights, Color, Piece, PieceKind, Square};

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

fn kind_name(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::King => "king",
        PieceKind::Queen => "queen",
        PieceKind::Pawn => "pawn",
        PieceKind::Rook => "rook",
        PieceKind::Bishop => "bishop",
        PieceKind::Knight => "knight",
    }
}

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::FieldCount(fields.len()));
        }

        let mut pos = Position::empty();
        parse_placement(&mut pos, fields[0])?;

        pos.side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        pos.castle = parse_castling(fields[2])?;
        pos.en_passant = parse_en_passant(fields[3], pos.side)?;

        if let Some(field) = fields.get(4) {
            pos.halfmove = field.parse().map_err(|_| FenError::Counter {
                field: "half-move",
                value: field.to_string(),
            })?;
        }
        if let Some(field) = fields.get(5) {
            pos.fullmove = field.parse().map_err(|_| FenError::Counter {
                field: "full-move",
                value: field.to_string(),
            })?;
        }

        pos.hash = KEYS.hash(&pos);
        Ok(pos)
    }

    /// Six-field FEN of the current position.
    pub fn fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let piece = self.piece_at(Square::from_coords(file, rank));
                if piece.is_none() {
                    empty += 1;
                    continue;
                }
                if empty > 0 {
                    let _ = write!(out, "{}", empty);
                    empty = 0;
                }
                out.push(piece.to_char());
            }
            if empty > 0 {
                let _ = write!(out, "{}", empty);
            }
            if rank > 0 {
                out.push('/');
            }
        }
        let side = match self.side {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self.en_passant.map_or_else(|| "-".to_string(), |sq| sq.to_string());
        let _ = write!(
            out,
            " {} {} {} {} {}",
            side, self.castle, ep, self.halfmove, self.fullmove
        );
        out
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

fn parse_placement(pos: &mut Position, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut kings = [0usize; 2];
    for (i, row) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0u8;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::RankLength { rank: rank + 1 });
                }
                file += skip as u8;
                if file > 8 {
                    return Err(FenError::RankLength { rank: rank + 1 });
                }
                continue;
            }
            let piece = Piece::from_char(c).ok_or(FenError::PieceChar(c))?;
            if file > 7 {
                return Err(FenError::RankLength { rank: rank + 1 });
            }
            let sq = Square::from_coords(file, rank);
            let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
                return Err(FenError::PieceChar(c));
            };
            match kind {
                PieceKind::King => kings[color.index()] += 1,
                PieceKind::Pawn if rank == 0 || rank == 7 => {
                    return Err(FenError::PawnOnBackRank(sq.to_string()));
                }
                _ => {
                    if pos.player(color).list(kind).is_full() {
                        return Err(FenError::TooManyPieces { kind: kind_name(kind) });
                    }
                }
            }
            pos.put(sq, piece);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::RankLength { rank: rank + 1 });
        }
    }

    for color in Color::BOTH {
        let count = kings[color.index()];
        if count != 1 {
            return Err(FenError::KingCount { color: color_name(color), count });
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastleRights, FenError> {
    if field == "-" {
        return Ok(CastleRights::NONE);
    }
    let mut rights = CastleRights::NONE;
    for c in field.chars() {
        let right = match c {
            'K' => CastleRights::WHITE_KING,
            'Q' => CastleRights::WHITE_QUEEN,
            'k' => CastleRights::BLACK_KING,
            'q' => CastleRights::BLACK_QUEEN,
            _ => return Err(FenError::Castling(field.to_string())),
        };
        if rights.contains(right) {
            return Err(FenError::Castling(field.to_string()));
        }
        rights = rights.union(right);
    }
    Ok(rights)
}

fn parse_en_passant(field: &str, side: Color) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let sq: Square = field.parse().map_err(|_| FenError::EnPassant(field.to_string()))?;
    // The target sits behind a pawn the opponent just double-pushed.
    let expected_rank = match side {
        Color::White => 5,
        Color::Black => 2,
    };
    if sq.rank() != expected_rank {
        return Err(FenError::EnPassant(field.to_string()));
    }
    Ok(Some(sq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn test_fen_roundtrip() {
        for fen in [
            STARTPOS,
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        ] {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.fen(), fen);
            assert!(pos.validate().is_ok());
        }
    }

    #[test]
    fn test_short_fen_defaults_counters() {
        let pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"
            .parse()
            .unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(pos.fen(), KIWIPETE);
    }

    #[test]
    fn test_fen_errors() {
        assert_eq!(Position::from_fen("8/8/8 w - -").unwrap_err(), FenError::RankCount(3));
        assert_eq!(Position::from_fen("").unwrap_err(), FenError::FieldCount(0));
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1").unwrap_err(),
            FenError::KingCount { color: "white", count: 0 }
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4KK2 w - - 0 1").unwrap_err(),
            FenError::KingCount { color: "white", count: 2 }
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K2X w - - 0 1").unwrap_err(),
            FenError::PieceChar('X')
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1").unwrap_err(),
            FenError::RankLength { rank: 1 }
        );
        assert_eq!(
            Position::from_fen(&format!("{}/8/8/8/8/8/8/4K2k w - - 0 1", "8".repeat(33)))
                .unwrap_err(),
            FenError::RankLength { rank: 8 }
        );
        assert_eq!(
            Position::from_fen("44k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
            FenError::RankLength { rank: 8 }
        );
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::SideToMove(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KK - 0 1"),
            Err(FenError::Castling(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1"),
            Err(FenError::EnPassant(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenError::Counter { .. })
        ));
        assert!(matches!(
            Position::from_fen("4k2P/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::PawnOnBackRank(_))
        ));
    }

    #[test]
    fn test_too_many_queens() {
        let err = Position::from_fen("QQQQQQQQ/QQQk4/8/8/8/8/8/4K3 w - - 0 1").unwrap_err();
        assert_eq!(err, FenError::TooManyPieces { kind: "queen" });
    }
}
