//! Zobrist keys.
//!
//! One constant per (piece, square), one per castle-rights value, one per
//! en-passant file and one for black to move. The table is derived from a
//! fixed seed so hashes are identical across runs and processes. It can be
//! exported as comma-separated text and read back for comparison.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Position;
use crate::error::KeysError;
use crate::types::{CastleRights, Hash, Piece, Square};

pub const ZOBRIST_SEED: u64 = 31_279;

const PIECE_KEYS: usize = 12 * 64;
const CASTLE_KEYS: usize = 16;
const EP_KEYS: usize = 8;
/// Number of constants in the text form.
pub const KEY_COUNT: usize = PIECE_KEYS + CASTLE_KEYS + EP_KEYS + 1;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ZobristKeys {
    pieces: [[Hash; 64]; 12],
    castle: [Hash; CASTLE_KEYS],
    en_passant: [Hash; EP_KEYS],
    side: Hash,
}

/// The table every `Position` hashes with.
pub static KEYS: LazyLock<ZobristKeys> = LazyLock::new(|| ZobristKeys::generate(ZOBRIST_SEED));

impl ZobristKeys {
    /// Draw a full table of pairwise-distinct constants from `seed`.
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut seen = HashSet::with_capacity(KEY_COUNT);
        let mut values = [0u64; KEY_COUNT];
        for value in values.iter_mut() {
            *value = loop {
                let candidate = rng.random::<u64>();
                if candidate != 0 && seen.insert(candidate) {
                    break candidate;
                }
            };
        }
        Self::from_values(&values)
    }

    fn from_values(values: &[Hash; KEY_COUNT]) -> Self {
        let mut pieces = [[0; 64]; 12];
        for (i, &value) in values[..PIECE_KEYS].iter().enumerate() {
            pieces[i / 64][i % 64] = value;
        }
        let mut castle = [0; CASTLE_KEYS];
        castle.copy_from_slice(&values[PIECE_KEYS..PIECE_KEYS + CASTLE_KEYS]);
        let mut en_passant = [0; EP_KEYS];
        en_passant.copy_from_slice(&values[PIECE_KEYS + CASTLE_KEYS..KEY_COUNT - 1]);
        ZobristKeys { pieces, castle, en_passant, side: values[KEY_COUNT - 1] }
    }

    /// Key for `piece` standing on `sq`; zero for an empty square.
    #[inline]
    pub fn piece(&self, piece: Piece, sq: Square) -> Hash {
        match piece.zobrist_index() {
            Some(i) => self.pieces[i][sq.index()],
            None => 0,
        }
    }

    #[inline]
    pub fn castle(&self, rights: CastleRights) -> Hash {
        self.castle[rights.index()]
    }

    #[inline]
    pub fn en_passant(&self, sq: Square) -> Hash {
        self.en_passant[sq.file() as usize]
    }

    #[inline]
    pub fn side(&self) -> Hash {
        self.side
    }

    /// Hash a position by scanning every feature.
    pub fn hash(&self, pos: &Position) -> Hash {
        let mut hash = 0;
        for sq in Square::all() {
            hash ^= self.piece(pos.piece_at(sq), sq);
        }
        hash ^= self.castle(pos.castle_rights());
        if let Some(ep) = pos.en_passant() {
            hash ^= self.en_passant(ep);
        }
        if pos.side_to_move() == crate::types::Color::Black {
            hash ^= self.side;
        }
        hash
    }

    /// Flat text form: pieces, castle rights, en-passant files, side to move.
    pub fn to_text(&self) -> String {
        let values = self
            .pieces
            .iter()
            .flatten()
            .chain(self.castle.iter())
            .chain(self.en_passant.iter())
            .chain(std::iter::once(&self.side));
        let mut out = String::with_capacity(KEY_COUNT * 21);
        for (i, value) in values.enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}", value);
        }
        out
    }

    /// Parse the format written by [`ZobristKeys::to_text`].
    pub fn from_text(text: &str) -> Result<Self, KeysError> {
        let fields: Vec<&str> = text.trim().split(',').map(str::trim).collect();
        if fields.len() != KEY_COUNT {
            return Err(KeysError::WrongCount { expected: KEY_COUNT, found: fields.len() });
        }
        let mut values = [0u64; KEY_COUNT];
        let mut seen = HashSet::with_capacity(KEY_COUNT);
        for (index, field) in fields.into_iter().enumerate() {
            let value = field
                .parse::<u64>()
                .map_err(|source| KeysError::InvalidNumber { index, source })?;
            if !seen.insert(value) {
                return Err(KeysError::Duplicate { index });
            }
            values[index] = value;
        }
        Ok(Self::from_values(&values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let a = ZobristKeys::generate(ZOBRIST_SEED);
        let b = ZobristKeys::generate(ZOBRIST_SEED);
        assert_eq!(a, b);
        assert_eq!(a, *KEYS);
        assert_ne!(a, ZobristKeys::generate(ZOBRIST_SEED + 1));
    }

    #[test]
    fn test_text_roundtrip() {
        let text = KEYS.to_text();
        assert_eq!(text.split(',').count(), KEY_COUNT);
        let parsed = ZobristKeys::from_text(&text).unwrap();
        assert_eq!(parsed, *KEYS);
    }

    #[test]
    fn test_text_errors() {
        assert!(matches!(
            ZobristKeys::from_text("1,2,3"),
            Err(KeysError::WrongCount { found: 3, .. })
        ));

        let mut fields: Vec<String> = KEYS.to_text().split(',').map(String::from).collect();
        fields[10] = "banana".to_string();
        assert!(matches!(
            ZobristKeys::from_text(&fields.join(",")),
            Err(KeysError::InvalidNumber { index: 10, .. })
        ));

        fields[10] = fields[3].clone();
        assert!(matches!(
            ZobristKeys::from_text(&fields.join(",")),
            Err(KeysError::Duplicate { index: 10 })
        ));
    }

    #[test]
    fn test_empty_square_has_no_key() {
        assert_eq!(KEYS.piece(Piece::NONE, Square::E1), 0);
    }
}
