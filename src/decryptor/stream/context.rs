//! src/decryptor/stream/context.rs
//! CBC decryption state: previous ciphertext block + one held-back plaintext block.

use crate::aliases::Block16;
use crate::consts::{BLOCK_SIZE, IV_SIZE, KEY_SIZE};
use crate::error::SaltcryptError;
use crate::utils::{read_fill, xor_blocks};
use aes::cipher::{BlockDecrypt, KeyInit};
use aes::{Aes256Dec, Block as AesBlock};
use std::io::{Read, Write};

pub struct DecryptionContext {
    cipher: Aes256Dec,
    previous_block: [u8; BLOCK_SIZE],
    pub plaintext_block: Block16,
    pub need_write_plaintext: bool,
    pub bytes_written: u64,
}

impl DecryptionContext {
    #[inline(always)]
    pub fn new(key: &[u8; KEY_SIZE], iv: &[u8; IV_SIZE]) -> Self {
        Self {
            cipher: Aes256Dec::new(key.into()),
            previous_block: *iv,
            plaintext_block: Block16::new([0u8; BLOCK_SIZE]),
            need_write_plaintext: false,
            bytes_written: 0,
        }
    }

    /// Decrypt every full block of `input`.
    ///
    /// On return the last decrypted block is still in `plaintext_block`, unwritten.
    ///
    /// # Errors
    ///
    /// [`SaltcryptError::Crypto`] when the ciphertext length is not a multiple of 16.
    #[inline(always)]
    pub fn decrypt_cbc_loop<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<(), SaltcryptError>
    where
        R: Read,
        W: Write,
    {
        let mut ciphertext_block = [0u8; BLOCK_SIZE];

        loop {
            let n = read_fill(input, &mut ciphertext_block)?;
            if n == 0 {
                break;
            }
            if n < BLOCK_SIZE {
                return Err(SaltcryptError::Crypto(
                    "ciphertext length is not a multiple of the AES block size".into(),
                ));
            }

            if self.need_write_plaintext {
                output.write_all(&*self.plaintext_block)?;
                self.bytes_written += BLOCK_SIZE as u64;
            }

            let mut aes_block = AesBlock::from(ciphertext_block);
            self.cipher.decrypt_block(&mut aes_block);
            xor_blocks(
                aes_block.as_slice(),
                &self.previous_block,
                &mut *self.plaintext_block,
            );
            aes_block.fill(0);

            self.previous_block = ciphertext_block;
            self.need_write_plaintext = true;
        }

        Ok(())
    }
}
