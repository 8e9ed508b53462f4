//! src/encryptor/stream.rs
//! AES-256-CBC streaming encryption with PKCS#7 padding.

use crate::aliases::Block16;
use crate::consts::BLOCK_SIZE;
use crate::crypto::kdf::DerivedMaterial;
use crate::error::SaltcryptError;
use crate::utils::{read_fill, xor_blocks};
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes256Enc, Block as AesBlock};
use std::io::{Read, Write};

/// Encrypt `source` to `destination`, returning the number of ciphertext bytes written.
///
/// The last block is always padded: block-aligned input (empty input included) gets a
/// whole block of `0x10`.
#[inline(always)]
pub fn encrypt_stream<R, W>(
    mut source: R,
    mut destination: W,
    material: &DerivedMaterial,
) -> Result<u64, SaltcryptError>
where
    R: Read,
    W: Write,
{
    let cipher = Aes256Enc::new(material.key().into());

    // previous ciphertext block, seeded with the IV
    let mut prev_block: [u8; BLOCK_SIZE] = *material.iv();
    let mut plaintext_block = Block16::new([0u8; BLOCK_SIZE]);
    let mut xor_output = Block16::new([0u8; BLOCK_SIZE]);
    let mut written = 0u64;

    loop {
        let n = read_fill(&mut source, &mut *plaintext_block)?;

        let is_final = n < BLOCK_SIZE;
        if is_final {
            let pad = (BLOCK_SIZE - n) as u8;
            plaintext_block[n..].fill(pad);
        }

        xor_blocks(&*plaintext_block, &prev_block, &mut *xor_output);

        let mut aes_block = AesBlock::from(*xor_output);
        cipher.encrypt_block(&mut aes_block);
        prev_block.copy_from_slice(aes_block.as_slice());

        destination.write_all(&prev_block)?;
        written += BLOCK_SIZE as u64;

        if is_final {
            break;
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::derive_key_and_iv;
    use std::io::Cursor;

    #[test]
    fn ciphertext_length_always_grows_to_next_block() {
        let material = derive_key_and_iv(b"pw", &[0u8; 8]).unwrap();
        for (len, expected) in [(0usize, 16u64), (1, 16), (15, 16), (16, 32), (17, 32)] {
            let mut out = Vec::new();
            let n = encrypt_stream(Cursor::new(vec![0x61u8; len]), &mut out, &material).unwrap();
            assert_eq!(n, expected, "input length {len}");
            assert_eq!(out.len() as u64, expected);
        }
    }
}
