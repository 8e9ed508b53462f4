//! src/decryptor/stream/trailer.rs
//! Final block handling — PKCS#7 validation and stripping.

use crate::consts::BLOCK_SIZE;
use crate::decryptor::stream::context::DecryptionContext;
use crate::error::SaltcryptError;
use std::io::Write;

/// Length of the data part of a PKCS#7-padded final block.
///
/// The pad value is checked for range first (1..=16); the pad bytes themselves are
/// compared without early exit.
#[inline(always)]
pub fn pkcs7_unpadded_len(block: &[u8; BLOCK_SIZE]) -> Result<usize, SaltcryptError> {
    let padding = block[BLOCK_SIZE - 1];
    if padding == 0 || padding as usize > BLOCK_SIZE {
        return Err(SaltcryptError::Crypto("invalid PKCS#7 padding".into()));
    }

    let padding_start = BLOCK_SIZE - padding as usize;
    let mismatch = block[padding_start..]
        .iter()
        .fold(0u8, |acc, &b| acc | (b ^ padding));
    if mismatch != 0 {
        return Err(SaltcryptError::Crypto("corrupt PKCS#7 padding".into()));
    }

    Ok(padding_start)
}

/// Write the held-back final block without its padding.
#[inline(always)]
pub fn write_final_pkcs7<W: Write>(
    ctx: &mut DecryptionContext,
    output: &mut W,
) -> Result<(), SaltcryptError> {
    if !ctx.need_write_plaintext {
        return Err(SaltcryptError::Crypto(
            "missing final ciphertext block".into(),
        ));
    }

    let len = pkcs7_unpadded_len(&ctx.plaintext_block)?;
    output.write_all(&ctx.plaintext_block[..len])?;
    ctx.bytes_written += len as u64;
    ctx.need_write_plaintext = false;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_cases() {
        let mut full = [0x10u8; 16];
        assert_eq!(pkcs7_unpadded_len(&full).unwrap(), 0);

        full[15] = 0x01;
        assert_eq!(pkcs7_unpadded_len(&full).unwrap(), 15);

        let mut three = [0xAAu8; 16];
        three[13..].fill(3);
        assert_eq!(pkcs7_unpadded_len(&three).unwrap(), 13);
    }

    #[test]
    fn bad_padding_is_rejected() {
        assert!(pkcs7_unpadded_len(&[0u8; 16]).is_err());
        assert!(pkcs7_unpadded_len(&[0x11u8; 16]).is_err());

        let mut broken = [0xAAu8; 16];
        broken[14] = 2;
        broken[15] = 3;
        assert!(pkcs7_unpadded_len(&broken).is_err());
    }
}
