//! Encrypts the FIPS-197 Appendix C plaintext under all three key lengths.

use rijndael_core::{cipher, decipher};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn main() {
    let plaintext = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    let key_material: Vec<u8> = (0u8..32).collect();

    for len in [16usize, 24, 32] {
        let key = &key_material[..len];
        let ciphertext = cipher(&plaintext, key).expect("supported key length");
        let decrypted = decipher(&ciphertext, key).expect("supported key length");
        assert_eq!(decrypted, plaintext);
        println!("aes-{}: {}", len * 8, hex(&ciphertext));
    }

    println!("example succeeded; all round trips match");
}
