//! Zobrist hashing keys.
//!
//! One random 64-bit key per hashable position feature. The board hash is
//! the XOR of the keys for every piece on its square, the side to move,
//! the castling-rights mask, and the en-passant file.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub(crate) struct Zobrist {
    /// `[color][piece][square]`
    pub piece_keys: [[[u64; 64]; 6]; 2],
    /// Indexed by the full 4-bit castling-rights mask.
    pub castling_keys: [u64; 16],
    /// Indexed by en-passant file.
    pub en_passant_keys: [u64; 8],
    /// XORed in when Black is to move.
    pub side_key: u64,
}

// Fixed seed: hashes stay stable across runs, so mismatches reproduce.
const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

pub(crate) static ZOBRIST: Lazy<Zobrist> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
    let mut keys = Zobrist {
        piece_keys: [[[0; 64]; 6]; 2],
        castling_keys: [0; 16],
        en_passant_keys: [0; 8],
        side_key: 0,
    };
    for color in &mut keys.piece_keys {
        for piece in color.iter_mut() {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }
    }
    for key in &mut keys.castling_keys {
        *key = rng.gen();
    }
    for key in &mut keys.en_passant_keys {
        *key = rng.gen();
    }
    keys.side_key = rng.gen();
    keys
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let mut seen = HashSet::new();
        for color in &ZOBRIST.piece_keys {
            for piece in color {
                for &key in piece {
                    assert!(seen.insert(key), "duplicate piece key");
                }
            }
        }
        for &key in &ZOBRIST.castling_keys {
            assert!(seen.insert(key), "duplicate castling key");
        }
        for &key in &ZOBRIST.en_passant_keys {
            assert!(seen.insert(key), "duplicate en passant key");
        }
        assert!(seen.insert(ZOBRIST.side_key));
    }
}
