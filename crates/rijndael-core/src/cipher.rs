//! Key schedule expansion and single-block encryption/decryption.

use core::convert::TryInto;

use crate::block::Block;
use crate::error::CipherError;
use crate::key::{CipherKey, RoundKeys, MAX_ROUND_KEYS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;
use crate::trace::{NullSink, TraceSink};

const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    let b0 = sbox((word >> 24) as u8) as u32;
    let b1 = sbox((word >> 16) as u8) as u32;
    let b2 = sbox((word >> 8) as u8) as u32;
    let b3 = sbox(word as u8) as u32;
    (b0 << 24) | (b1 << 16) | (b2 << 8) | b3
}

/// Expands a cipher key into Nr + 1 round keys.
///
/// Words 0..Nk are the key's own columns; every later word is derived from
/// word i-1 and word i-Nk, with the rotate/substitute/Rcon step at each
/// Nk-word boundary and, for 256-bit keys, an extra SubWord at the half-way
/// point of each group. Round key 0 is the unexpanded key material.
pub fn expand_key(key: &CipherKey) -> RoundKeys {
    let nk = key.length().nk();
    let rounds = key.length().nr() + 1;
    let total_words = 4 * rounds;

    let mut w = [0u32; 4 * MAX_ROUND_KEYS];
    for (i, chunk) in key.bytes().chunks_exact(4).enumerate() {
        let bytes: [u8; 4] = chunk.try_into().expect("chunk length is four");
        w[i] = u32::from_be_bytes(bytes);
    }

    // Strictly sequential: word i depends on words i-1 and i-Nk.
    for i in nk..total_words {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[i / nk - 1]) << 24);
        } else if nk == 8 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let mut keys = [[0u8; 16]; MAX_ROUND_KEYS];
    for (round, key_bytes) in keys.iter_mut().enumerate().take(rounds) {
        for word_idx in 0..4 {
            let bytes = w[round * 4 + word_idx].to_be_bytes();
            key_bytes[word_idx * 4..word_idx * 4 + 4].copy_from_slice(&bytes);
        }
    }

    RoundKeys::new(keys, rounds)
}

/// Encrypts a single block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    encrypt_block_with(block, round_keys, &mut NullSink)
}

/// Encrypts a single block, reporting every transform checkpoint to `sink`.
pub fn encrypt_block_with<S: TraceSink>(
    block: &Block,
    round_keys: &RoundKeys,
    sink: &mut S,
) -> Block {
    let nr = round_keys.last_round();
    let mut state = *block;

    sink.record(0, "input", &state);
    sink.record(0, "k_sch", round_keys.get(0));
    add_round_key(&mut state, round_keys.get(0));

    for round in 1..nr {
        sink.record(round, "start", &state);
        sub_bytes(&mut state);
        sink.record(round, "s_box", &state);
        shift_rows(&mut state);
        sink.record(round, "s_row", &state);
        mix_columns(&mut state);
        sink.record(round, "m_col", &state);
        sink.record(round, "k_sch", round_keys.get(round));
        add_round_key(&mut state, round_keys.get(round));
    }

    // Final round omits MixColumns.
    sink.record(nr, "start", &state);
    sub_bytes(&mut state);
    sink.record(nr, "s_box", &state);
    shift_rows(&mut state);
    sink.record(nr, "s_row", &state);
    sink.record(nr, "k_sch", round_keys.get(nr));
    add_round_key(&mut state, round_keys.get(nr));
    sink.record(nr, "output", &state);

    state
}

/// Decrypts a single block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    decrypt_block_with(block, round_keys, &mut NullSink)
}

/// Decrypts a single block, reporting every transform checkpoint to `sink`.
///
/// Round keys are consumed in reverse order. In each middle round
/// InvMixColumns is applied to the state after the round-key addition,
/// before the next InvShiftRows/InvSubBytes pair.
pub fn decrypt_block_with<S: TraceSink>(
    block: &Block,
    round_keys: &RoundKeys,
    sink: &mut S,
) -> Block {
    let nr = round_keys.last_round();
    let mut state = *block;

    sink.record(nr, "iinput", &state);
    sink.record(nr, "ik_sch", round_keys.get(nr));
    add_round_key(&mut state, round_keys.get(nr));
    sink.record(nr, "istart", &state);

    inv_shift_rows(&mut state);
    sink.record(nr, "is_row", &state);
    inv_sub_bytes(&mut state);
    sink.record(nr, "is_box", &state);

    for round in (1..nr).rev() {
        sink.record(round, "ik_sch", round_keys.get(round));
        add_round_key(&mut state, round_keys.get(round));
        sink.record(round, "ik_add", &state);
        inv_mix_columns(&mut state);
        sink.record(round, "im_col", &state);
        inv_shift_rows(&mut state);
        sink.record(round, "is_row", &state);
        inv_sub_bytes(&mut state);
        sink.record(round, "is_box", &state);
    }

    sink.record(0, "ik_sch", round_keys.get(0));
    add_round_key(&mut state, round_keys.get(0));
    sink.record(0, "ioutput", &state);

    state
}

/// Encrypts one block with a raw key slice, validating the key length.
///
/// The key schedule is expanded for this call alone and dropped (and wiped)
/// before returning.
pub fn cipher(input: &Block, key: &[u8]) -> Result<Block, CipherError> {
    cipher_with(input, key, &mut NullSink)
}

/// Encrypts one block, reporting transform checkpoints to `sink`.
pub fn cipher_with<S: TraceSink>(
    input: &Block,
    key: &[u8],
    sink: &mut S,
) -> Result<Block, CipherError> {
    let key = CipherKey::from_slice(key)?;
    let round_keys = expand_key(&key);
    Ok(encrypt_block_with(input, &round_keys, sink))
}

/// Decrypts one block with a raw key slice, validating the key length.
pub fn decipher(input: &Block, key: &[u8]) -> Result<Block, CipherError> {
    decipher_with(input, key, &mut NullSink)
}

/// Decrypts one block, reporting transform checkpoints to `sink`.
pub fn decipher_with<S: TraceSink>(
    input: &Block,
    key: &[u8],
    sink: &mut S,
) -> Result<Block, CipherError> {
    let key = CipherKey::from_slice(key)?;
    let round_keys = expand_key(&key);
    Ok(decrypt_block_with(input, &round_keys, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    // FIPS-197 Appendix C: one plaintext, one ciphertext per key length.
    const PLAIN: Block = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const KEY_256: [u8; 32] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
        0x1e, 0x1f,
    ];
    const CIPHER_128: Block = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];
    const CIPHER_192: Block = [
        0xdd, 0xa9, 0x7c, 0xa4, 0x86, 0x4c, 0xdf, 0xe0, 0x6e, 0xaf, 0x70, 0xa0, 0xec, 0x0d, 0x71,
        0x91,
    ];
    const CIPHER_256: Block = [
        0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b, 0x49, 0x60,
        0x89,
    ];

    // FIPS-197 Appendix B worked example.
    const APPB_KEY: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f,
        0x3c,
    ];
    const APPB_PLAIN: Block = [
        0x32, 0x43, 0xf6, 0xa8, 0x88, 0x5a, 0x30, 0x8d, 0x31, 0x31, 0x98, 0xa2, 0xe0, 0x37, 0x07,
        0x34,
    ];
    const APPB_CIPHER: Block = [
        0x39, 0x25, 0x84, 0x1d, 0x02, 0xdc, 0x09, 0xfb, 0xdc, 0x11, 0x85, 0x97, 0x19, 0x6a, 0x0b,
        0x32,
    ];

    #[test]
    fn encrypt_matches_fips_vectors() {
        assert_eq!(cipher(&PLAIN, &KEY_256[..16]).unwrap(), CIPHER_128);
        assert_eq!(cipher(&PLAIN, &KEY_256[..24]).unwrap(), CIPHER_192);
        assert_eq!(cipher(&PLAIN, &KEY_256[..32]).unwrap(), CIPHER_256);
    }

    #[test]
    fn decrypt_matches_fips_vectors() {
        assert_eq!(decipher(&CIPHER_128, &KEY_256[..16]).unwrap(), PLAIN);
        assert_eq!(decipher(&CIPHER_192, &KEY_256[..24]).unwrap(), PLAIN);
        assert_eq!(decipher(&CIPHER_256, &KEY_256[..32]).unwrap(), PLAIN);
    }

    #[test]
    fn appendix_b_worked_example() {
        assert_eq!(cipher(&APPB_PLAIN, &APPB_KEY).unwrap(), APPB_CIPHER);
        assert_eq!(decipher(&APPB_CIPHER, &APPB_KEY).unwrap(), APPB_PLAIN);
    }

    #[test]
    fn schedule_sizes_follow_key_length() {
        for (len, expected) in [(16usize, 11usize), (24, 13), (32, 15)] {
            let key = CipherKey::from_slice(&KEY_256[..len]).unwrap();
            assert_eq!(expand_key(&key).len(), expected);
        }
    }

    #[test]
    fn round_key_zero_is_the_cipher_key() {
        for len in [16usize, 24, 32] {
            let key = CipherKey::from_slice(&KEY_256[..len]).unwrap();
            let round_keys = expand_key(&key);
            assert_eq!(round_keys.get(0), &KEY_256[..16]);
        }
        // For AES-256 the second round key is also raw key material.
        let key = CipherKey::from_slice(&KEY_256).unwrap();
        let round_keys = expand_key(&key);
        assert_eq!(round_keys.get(1), &KEY_256[16..32]);
    }

    #[test]
    fn appendix_a_first_expanded_word() {
        // Key expansion of the Appendix A.1 key: w[4] = a0fafe17.
        let key = CipherKey::from_slice(&APPB_KEY).unwrap();
        let round_keys = expand_key(&key);
        assert_eq!(&round_keys.get(1)[..4], &[0xa0, 0xfa, 0xfe, 0x17]);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for len in [16usize, 24, 32] {
            for _ in 0..50 {
                let mut key_bytes = vec![0u8; len];
                let mut block = [0u8; 16];
                rng.fill_bytes(&mut key_bytes);
                rng.fill_bytes(&mut block);
                let ct = cipher(&block, &key_bytes).unwrap();
                let pt = decipher(&ct, &key_bytes).unwrap();
                assert_eq!(pt, block);
            }
        }
    }

    #[test]
    fn invalid_key_lengths_are_rejected() {
        for len in [0usize, 8, 15, 17, 23, 25, 31, 33, 64] {
            let key_bytes = vec![0u8; len];
            assert_eq!(
                cipher(&PLAIN, &key_bytes),
                Err(CipherError::InvalidKeyLength(len))
            );
            assert_eq!(
                decipher(&PLAIN, &key_bytes),
                Err(CipherError::InvalidKeyLength(len))
            );
        }
    }

    #[derive(Default)]
    struct Recorder {
        checkpoints: Vec<(usize, String)>,
    }

    impl TraceSink for Recorder {
        fn record(&mut self, round: usize, label: &str, _bytes: &[u8]) {
            self.checkpoints.push((round, label.to_owned()));
        }
    }

    #[test]
    fn trace_covers_every_transform() {
        let mut sink = Recorder::default();
        let ct = cipher_with(&PLAIN, &KEY_256[..16], &mut sink).unwrap();
        assert_eq!(ct, CIPHER_128);
        // 2 initial + 5 per middle round (9 of them) + 5 final.
        assert_eq!(sink.checkpoints.len(), 52);
        assert_eq!(sink.checkpoints[0], (0, "input".to_owned()));
        assert_eq!(sink.checkpoints[2], (1, "start".to_owned()));
        assert_eq!(
            sink.checkpoints.last(),
            Some(&(10, "output".to_owned()))
        );
    }

    #[test]
    fn inverse_trace_orders_key_add_before_inv_mix() {
        let mut sink = Recorder::default();
        let pt = decipher_with(&CIPHER_128, &KEY_256[..16], &mut sink).unwrap();
        assert_eq!(pt, PLAIN);
        let labels: Vec<&str> = sink
            .checkpoints
            .iter()
            .map(|(_, label)| label.as_str())
            .collect();
        let add = labels.iter().position(|&l| l == "ik_add").unwrap();
        assert_eq!(labels[add + 1], "im_col");
        assert_eq!(labels.first(), Some(&"iinput"));
        assert_eq!(labels.last(), Some(&"ioutput"));
    }

    #[test]
    fn traced_and_untraced_paths_agree() {
        let round_keys = expand_key(&CipherKey::from_slice(&KEY_256[..24]).unwrap());
        let mut sink = Recorder::default();
        assert_eq!(
            encrypt_block(&PLAIN, &round_keys),
            encrypt_block_with(&PLAIN, &round_keys, &mut sink)
        );
        assert_eq!(
            decrypt_block(&CIPHER_192, &round_keys),
            decrypt_block_with(&CIPHER_192, &round_keys, &mut sink)
        );
    }
}
