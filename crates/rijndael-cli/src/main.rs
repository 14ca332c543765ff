//! Command-line driver for `rijndael-core`.
//!
//! Exposes file encryption/decryption, a seeded round-trip checker, the
//! classic FIPS-197 walkthrough scenarios, a round-by-round trace dump, and
//! a timing loop over repeated single-block cipher calls.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rijndael_core::{
    add_round_key, cipher, cipher_with, decipher, decrypt_block, encrypt_block, expand_key,
    inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows, sub_bytes, to_matrix,
    Block, CipherKey, TraceSink,
};

/// AES block cipher CLI.
#[derive(Parser)]
#[command(
    name = "rijndael",
    version,
    author,
    about = "AES (Rijndael) block cipher demo driver"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt 16-byte blocks from a file.
    Enc {
        /// AES key as 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input file (must be a multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt 16-byte blocks from a file.
    Dec {
        /// AES key as 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input file (ciphertext, multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Verify encrypt/decrypt round trips for random samples.
    Check {
        /// Number of random samples per key length.
        #[arg(long, default_value_t = 8)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the four fixed demonstration scenarios.
    Demo,
    /// Encrypt one block and write a round-by-round trace to a file.
    Trace {
        /// AES key as 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
        /// Output path for the trace log.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Measure the average time of repeated single-block encryptions.
    Time {
        /// Number of cipher calls to average over.
        #[arg(long, default_value_t = 1000)]
        iterations: u32,
    },
}

// FIPS-197 Appendix C key-length walkthrough vector.
const NIST_KEY: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f,
];
const NIST_PLAIN: Block = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
    0xff,
];
const NIST_CIPHER: Block = [
    0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
    0x5a,
];

// FIPS-197 Appendix B worked example, used for the transform walkthrough.
const APPB_KEY: [u8; 16] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f,
    0x3c,
];
const APPB_PLAIN: Block = [
    0x32, 0x43, 0xf6, 0xa8, 0x88, 0x5a, 0x30, 0x8d, 0x31, 0x31, 0x98, 0xa2, 0xe0, 0x37, 0x07,
    0x34,
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc {
            key_hex,
            input,
            output,
        } => cmd_enc(&key_hex, &input, &output),
        Commands::Dec {
            key_hex,
            input,
            output,
        } => cmd_dec(&key_hex, &input, &output),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo => cmd_demo(),
        Commands::Trace {
            key_hex,
            block_hex,
            out,
        } => cmd_trace(&key_hex, &block_hex, &out),
        Commands::Time { iterations } => cmd_time(iterations),
    }
}

fn cmd_enc(key_hex: &str, input_path: &PathBuf, output_path: &PathBuf) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let round_keys = expand_key(&key);
    let mut data =
        fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    if data.len() % 16 != 0 {
        bail!("input length must be a multiple of 16 bytes");
    }
    for chunk in data.chunks_mut(16) {
        let mut block = [0u8; 16];
        block.copy_from_slice(chunk);
        let ciphered = encrypt_block(&block, &round_keys);
        chunk.copy_from_slice(&ciphered);
    }
    fs::write(output_path, data).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_dec(key_hex: &str, input_path: &PathBuf, output_path: &PathBuf) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let round_keys = expand_key(&key);
    let mut data =
        fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    if data.len() % 16 != 0 {
        bail!("input length must be a multiple of 16 bytes");
    }
    for chunk in data.chunks_mut(16) {
        let mut block = [0u8; 16];
        block.copy_from_slice(chunk);
        let deciphered = decrypt_block(&block, &round_keys);
        chunk.copy_from_slice(&deciphered);
    }
    fs::write(output_path, data).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    for key_len in [16usize, 24, 32] {
        for _ in 0..samples {
            let mut key_bytes = vec![0u8; key_len];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let ciphered = cipher(&block, &key_bytes)?;
            let deciphered = decipher(&ciphered, &key_bytes)?;
            if deciphered != block {
                bail!("round-trip mismatch for a {}-bit key", key_len * 8);
            }
        }
        println!("aes-{}: {samples} round trips ok", key_len * 8);
    }
    Ok(())
}

fn cmd_demo() -> Result<()> {
    println!("=========================================");
    println!(" Part 1: round transforms");
    println!("-----------------------------------------");
    demo_round_transforms()?;
    println!("=========================================");
    println!(" Part 2: known-answer encryption");
    println!("-----------------------------------------");
    demo_known_answer()?;
    println!("=========================================");
    println!(" Part 3: decryption walkthrough");
    println!("-----------------------------------------");
    demo_decipher_walkthrough()?;
    println!("=========================================");
    println!(" Part 4: timing");
    println!("-----------------------------------------");
    cmd_time(1000)
}

/// Walks the Appendix B state through one round of forward transforms.
fn demo_round_transforms() -> Result<()> {
    let key = CipherKey::from_slice(&APPB_KEY)?;
    let round_keys = expand_key(&key);
    let mut state = APPB_PLAIN;

    print_state("k_sch", round_keys.get(0));
    for row in key.to_matrix() {
        let cells: Vec<String> = row.iter().map(|b| format!("{b:02x}")).collect();
        println!("          {}", cells.join(" "));
    }
    print_state("input", &state);
    print_matrix(&state);
    add_round_key(&mut state, round_keys.get(0));
    print_state("start", &state);
    sub_bytes(&mut state);
    print_state("s_box", &state);
    shift_rows(&mut state);
    print_state("s_row", &state);
    mix_columns(&mut state);
    print_state("m_col", &state);
    Ok(())
}

/// Encrypts the Appendix C vector and verifies the published ciphertext.
fn demo_known_answer() -> Result<()> {
    print_state("input", &NIST_PLAIN);
    let ciphered = cipher(&NIST_PLAIN, &NIST_KEY)?;
    print_state("output", &ciphered);
    if ciphered != NIST_CIPHER {
        bail!("ciphertext does not match the FIPS-197 vector");
    }
    println!("matches the FIPS-197 AES-128 vector");
    Ok(())
}

/// Runs the first inverse round on the Appendix C ciphertext, consuming
/// round keys from the top of the schedule.
fn demo_decipher_walkthrough() -> Result<()> {
    let key = CipherKey::from_slice(&NIST_KEY)?;
    let round_keys = expand_key(&key);
    let last = round_keys.len() - 1;
    let mut state = NIST_CIPHER;

    print_state("iinput", &state);
    add_round_key(&mut state, round_keys.get(last));
    print_state("istart", &state);
    inv_shift_rows(&mut state);
    print_state("is_row", &state);
    inv_sub_bytes(&mut state);
    print_state("is_box", &state);
    add_round_key(&mut state, round_keys.get(last - 1));
    print_state("ik_add", &state);
    inv_mix_columns(&mut state);
    print_state("im_col", &state);

    // The full inverse sequence must land back on the plaintext.
    let deciphered = decipher(&NIST_CIPHER, &NIST_KEY)?;
    print_state("ioutput", &deciphered);
    if deciphered != NIST_PLAIN {
        bail!("deciphered block does not match the FIPS-197 plaintext");
    }
    Ok(())
}

fn cmd_trace(key_hex: &str, block_hex: &str, out: &PathBuf) -> Result<()> {
    let key_bytes = hex::decode(key_hex.trim()).context("decode key hex")?;
    let block = parse_block_hex(block_hex)?;
    let mut log = TraceLog::default();
    let ciphered = cipher_with(&block, &key_bytes, &mut log)?;
    let mut contents = log.lines.join("\n");
    contents.push('\n');
    fs::write(out, contents).with_context(|| format!("write {}", out.display()))?;
    println!("ciphertext: {}", hex::encode(ciphered));
    println!("trace written to {}", out.display());
    Ok(())
}

fn cmd_time(iterations: u32) -> Result<()> {
    if iterations == 0 {
        bail!("iterations must be at least 1");
    }
    // Each call re-expands the key schedule, matching the library contract
    // of one schedule per cipher invocation.
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = cipher(&NIST_PLAIN, &NIST_KEY)?;
    }
    let elapsed = start.elapsed();
    println!(
        "{iterations} cipher calls in {:?} ({:?} per block)",
        elapsed,
        elapsed / iterations
    );
    Ok(())
}

/// Collects trace checkpoints as formatted lines.
#[derive(Default)]
struct TraceLog {
    lines: Vec<String>,
}

impl TraceSink for TraceLog {
    fn record(&mut self, round: usize, label: &str, bytes: &[u8]) {
        self.lines
            .push(format!("round[{round:>2}].{label:<8} {}", hex::encode(bytes)));
    }
}

fn print_state(label: &str, block: &Block) {
    println!("{label:>8}  {}", hex::encode(block));
}

fn print_matrix(block: &Block) {
    for row in to_matrix(block) {
        println!(
            "          {:02x} {:02x} {:02x} {:02x}",
            row[0], row[1], row[2], row[3]
        );
    }
}

fn parse_key_hex(hex_str: &str) -> Result<CipherKey> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    let key = CipherKey::from_slice(&bytes)?;
    Ok(key)
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    if bytes.len() != 16 {
        bail!("block must be 16 bytes (32 hex characters)");
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    Ok(block)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
