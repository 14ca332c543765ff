//! From-scratch AES (Rijndael) block cipher for 128/192/256-bit keys.
//!
//! This crate follows the FIPS-197 specification directly and provides:
//! - Key schedule expansion for all three key lengths.
//! - Single-block encryption and decryption, both as validated one-shot
//!   entry points and as drivers over pre-expanded round keys.
//! - The individual round transforms and block/matrix view conversions,
//!   exposed so callers can compose partial round sequences.
//! - An optional [`TraceSink`] observing every transform boundary; the
//!   untraced paths carry no tracing overhead.
//!
//! The implementation aims for clarity and bit-exactness against the
//! FIPS-197 test vectors rather than constant-time guarantees; it should not
//! be treated as side-channel hardened. Each cipher call operates on exactly
//! one 16-byte block; modes, padding, and authenticated encryption are out
//! of scope.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod gf;
mod key;
mod round;
mod sbox;
mod trace;

pub use crate::block::{from_matrix, to_matrix, xor_in_place, Block};
pub use crate::cipher::{
    cipher, cipher_with, decipher, decipher_with, decrypt_block, decrypt_block_with,
    encrypt_block, encrypt_block_with, expand_key,
};
pub use crate::error::CipherError;
pub use crate::key::{CipherKey, KeyLength, RoundKeys};
pub use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
pub use crate::trace::{NullSink, TraceSink};
