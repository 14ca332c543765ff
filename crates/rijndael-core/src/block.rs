//! Block representation helpers.
//!
//! The flat 16-byte sequence in AES column-major order is the canonical
//! layout everywhere in this crate; the 4×4 matrix view is derived on demand
//! and never stored alongside the bytes.

/// AES block of 16 bytes in column-major byte order.
pub type Block = [u8; 16];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Returns the 4×4 matrix view of a block.
///
/// Row `r`, column `c` of the matrix holds byte `r + 4*c` of the sequence,
/// so each 4-byte chunk of the block is one matrix column.
#[inline]
pub fn to_matrix(block: &Block) -> [[u8; 4]; 4] {
    let mut mat = [[0u8; 4]; 4];
    for (c, chunk) in block.chunks_exact(4).enumerate() {
        for (r, &byte) in chunk.iter().enumerate() {
            mat[r][c] = byte;
        }
    }
    mat
}

/// Rebuilds a block from its 4×4 matrix view.
#[inline]
pub fn from_matrix(mat: &[[u8; 4]; 4]) -> Block {
    let mut block = [0u8; 16];
    for (r, row) in mat.iter().enumerate() {
        for (c, &byte) in row.iter().enumerate() {
            block[r + 4 * c] = byte;
        }
    }
    block
}
