//! Colors, piece kinds and the packed per-square piece code.

use std::fmt;
use std::ops::Not;

use super::Value;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Square index delta of a single pawn push.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }

    /// Rank pawns double-push from.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank pawns promote on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank the king and rooks start on.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl Not for Color {
    type Output = Color;
    #[inline]
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Piece type. The declaration order is the Zobrist table order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Pawn = 2,
    Rook = 3,
    Bishop = 4,
    Knight = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Promotion choices, best first.
    pub const PROMOTIONS: [PieceKind; 4] =
        [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Material value in centipawns. The king is never traded so it counts as zero.
    #[inline]
    pub const fn value(self) -> Value {
        match self {
            PieceKind::King => 0,
            PieceKind::Queen => 900,
            PieceKind::Pawn => 100,
            PieceKind::Rook => 500,
            PieceKind::Bishop => 330,
            PieceKind::Knight => 300,
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            PieceKind::King => Piece::KING_BIT,
            PieceKind::Queen => Piece::QUEEN_BIT,
            PieceKind::Pawn => Piece::PAWN_BIT,
            PieceKind::Rook => Piece::ROOK_BIT,
            PieceKind::Bishop => Piece::BISHOP_BIT,
            PieceKind::Knight => Piece::KNIGHT_BIT,
        }
    }

    /// Lowercase FEN letter.
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'p' => Some(PieceKind::Pawn),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            _ => None,
        }
    }
}

/// Packed piece code stored in the mailbox: one color bit plus one type bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(pub u8);

impl Piece {
    pub const NONE: Piece = Piece(0);

    const KING_BIT: u8 = 1;
    const QUEEN_BIT: u8 = 2;
    const PAWN_BIT: u8 = 4;
    const ROOK_BIT: u8 = 8;
    const BISHOP_BIT: u8 = 16;
    const KNIGHT_BIT: u8 = 32;
    const WHITE_BIT: u8 = 64;
    const BLACK_BIT: u8 = 128;
    const TYPE_MASK: u8 = 63;

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        let color_bit = match color {
            Color::White => Self::WHITE_BIT,
            Color::Black => Self::BLACK_BIT,
        };
        Piece(color_bit | kind.bit())
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn color(self) -> Option<Color> {
        if self.0 & Self::WHITE_BIT != 0 {
            Some(Color::White)
        } else if self.0 & Self::BLACK_BIT != 0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        match self.0 & Self::TYPE_MASK {
            Self::KING_BIT => Some(PieceKind::King),
            Self::QUEEN_BIT => Some(PieceKind::Queen),
            Self::PAWN_BIT => Some(PieceKind::Pawn),
            Self::ROOK_BIT => Some(PieceKind::Rook),
            Self::BISHOP_BIT => Some(PieceKind::Bishop),
            Self::KNIGHT_BIT => Some(PieceKind::Knight),
            _ => None,
        }
    }

    /// True if this is a piece of `color`.
    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        let bit = match color {
            Color::White => Self::WHITE_BIT,
            Color::Black => Self::BLACK_BIT,
        };
        self.0 & bit != 0
    }

    /// True if this piece moves along ranks and files.
    #[inline]
    pub const fn is_orthogonal_slider(self) -> bool {
        self.0 & (Self::ROOK_BIT | Self::QUEEN_BIT) != 0
    }

    /// True if this piece moves along diagonals.
    #[inline]
    pub const fn is_diagonal_slider(self) -> bool {
        self.0 & (Self::BISHOP_BIT | Self::QUEEN_BIT) != 0
    }

    /// Index into the Zobrist piece table: `color * 6 + kind`.
    #[inline]
    pub fn zobrist_index(self) -> Option<usize> {
        Some(self.color()?.index() * 6 + self.kind()?.index())
    }

    /// Material value, zero for an empty square.
    #[inline]
    pub fn value(self) -> Value {
        self.kind().map_or(0, PieceKind::value)
    }

    pub fn from_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(color, kind))
    }

    /// FEN letter, uppercase for white; `.` for an empty square.
    pub fn to_char(self) -> char {
        match (self.color(), self.kind()) {
            (Some(Color::White), Some(kind)) => kind.to_char().to_ascii_uppercase(),
            (Some(Color::Black), Some(kind)) => kind.to_char(),
            _ => '.',
        }
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({})", self.to_char())
    }
}

/// Castling rights as a 4-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
#[repr(transparent)]
pub struct CastleRights(pub u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const WHITE_KING: CastleRights = CastleRights(1);
    pub const WHITE_QUEEN: CastleRights = CastleRights(2);
    pub const BLACK_KING: CastleRights = CastleRights(4);
    pub const BLACK_QUEEN: CastleRights = CastleRights(8);
    pub const ALL: CastleRights = CastleRights(15);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_KING,
            Color::Black => Self::BLACK_KING,
        }
    }

    #[inline]
    pub const fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_QUEEN,
            Color::Black => Self::BLACK_QUEEN,
        }
    }

    #[inline]
    pub const fn union(self, other: CastleRights) -> Self {
        CastleRights(self.0 | other.0)
    }

    #[inline]
    pub const fn intersect(self, other: CastleRights) -> Self {
        CastleRights(self.0 & other.0)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        let flags = [
            (Self::WHITE_KING, 'K'),
            (Self::WHITE_QUEEN, 'Q'),
            (Self::BLACK_KING, 'k'),
            (Self::BLACK_QUEEN, 'q'),
        ];
        for (right, c) in flags {
            if self.contains(right) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
