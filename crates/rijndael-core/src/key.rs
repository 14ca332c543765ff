//! Key types and the expanded key schedule container.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::Block;
use crate::error::CipherError;

/// Maximum number of round keys any key length produces (AES-256: Nr + 1 = 15).
pub(crate) const MAX_ROUND_KEYS: usize = 15;

/// Supported AES key lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyLength {
    /// 128-bit key: Nk = 4 words, Nr = 10 rounds.
    Aes128,
    /// 192-bit key: Nk = 6 words, Nr = 12 rounds.
    Aes192,
    /// 256-bit key: Nk = 8 words, Nr = 14 rounds.
    Aes256,
}

impl KeyLength {
    /// Selects the key length matching a byte count of 16, 24, or 32.
    pub fn from_byte_len(len: usize) -> Result<Self, CipherError> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            other => Err(CipherError::InvalidKeyLength(other)),
        }
    }

    /// Key length in bytes.
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Key length in 32-bit words (Nk).
    pub const fn nk(self) -> usize {
        match self {
            Self::Aes128 => 4,
            Self::Aes192 => 6,
            Self::Aes256 => 8,
        }
    }

    /// Number of cipher rounds (Nr).
    pub const fn nr(self) -> usize {
        match self {
            Self::Aes128 => 10,
            Self::Aes192 => 12,
            Self::Aes256 => 14,
        }
    }
}

/// A validated AES cipher key of 16, 24, or 32 bytes.
///
/// Key material is wiped when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey {
    bytes: [u8; 32],
    #[zeroize(skip)]
    length: KeyLength,
}

impl CipherKey {
    /// Wraps a key slice, rejecting lengths outside {16, 24, 32}.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CipherError> {
        let length = KeyLength::from_byte_len(slice.len())?;
        let mut bytes = [0u8; 32];
        bytes[..slice.len()].copy_from_slice(slice);
        Ok(Self { bytes, length })
    }

    /// The declared key length.
    pub fn length(&self) -> KeyLength {
        self.length
    }

    /// The key material, exactly `length().byte_len()` bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.length.byte_len()]
    }

    /// Returns the matrix view of the key: 4 rows by Nk columns, where row
    /// `r` of column `c` holds key byte `r + 4*c`.
    pub fn to_matrix(&self) -> [Vec<u8>; 4] {
        let mut mat: [Vec<u8>; 4] = Default::default();
        for chunk in self.bytes().chunks_exact(4) {
            for (r, &byte) in chunk.iter().enumerate() {
                mat[r].push(byte);
            }
        }
        mat
    }
}

/// Expanded round keys: Nr + 1 blocks of 16 bytes, indexed by round number.
///
/// Storage is a fixed-capacity array sized for the largest schedule, so
/// expansion never allocates. Contents are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    keys: [Block; MAX_ROUND_KEYS],
    #[zeroize(skip)]
    count: usize,
}

impl RoundKeys {
    pub(crate) fn new(keys: [Block; MAX_ROUND_KEYS], count: usize) -> Self {
        Self { keys, count }
    }

    /// Returns the round key for the requested round (0..=Nr).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        assert!(round < self.count, "round key index out of range");
        &self.keys[round]
    }

    /// Number of round keys in the schedule (Nr + 1).
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always false for schedules produced by key expansion.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Index of the final round (Nr).
    #[inline]
    pub(crate) fn last_round(&self) -> usize {
        self.count - 1
    }
}
