use criterion::{criterion_group, criterion_main, Criterion};

use rijndael_core::{decrypt_block, encrypt_block, expand_key, CipherKey};

const KEY_MATERIAL: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f,
];

fn bench_key_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_schedule");
    for (name, len) in [("aes128", 16usize), ("aes192", 24), ("aes256", 32)] {
        let key = CipherKey::from_slice(&KEY_MATERIAL[..len]).expect("supported key length");
        group.bench_function(name, |b| {
            b.iter(|| expand_key(&key));
        });
    }
    group.finish();
}

fn bench_block(c: &mut Criterion) {
    let block = [0x42u8; 16];
    let mut group = c.benchmark_group("block");
    group.sample_size(20);
    for (name, len) in [("aes128", 16usize), ("aes192", 24), ("aes256", 32)] {
        let key = CipherKey::from_slice(&KEY_MATERIAL[..len]).expect("supported key length");
        let round_keys = expand_key(&key);
        group.bench_function(format!("encrypt_{name}"), |b| {
            b.iter(|| encrypt_block(&block, &round_keys));
        });
        group.bench_function(format!("decrypt_{name}"), |b| {
            b.iter(|| decrypt_block(&block, &round_keys));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_key_schedule, bench_block);
criterion_main!(benches);
