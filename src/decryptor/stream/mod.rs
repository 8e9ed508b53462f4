// src/decryptor/stream/mod.rs
pub(crate) mod context;
pub(crate) mod trailer;

use crate::crypto::kdf::DerivedMaterial;
use crate::error::SaltcryptError;
use context::DecryptionContext;
use std::io::{Read, Write};
use trailer::write_final_pkcs7;

/// Decrypt everything after the container prefix.
///
/// Streams block by block with one block held back, so the PKCS#7 padding of the
/// final block is checked before any of it reaches `output`. Returns the number of
/// plaintext bytes written.
#[inline(always)]
pub fn decrypt_ciphertext_stream<R, W>(
    mut input_reader: R,
    mut output_writer: W,
    material: &DerivedMaterial,
) -> Result<u64, SaltcryptError>
where
    R: Read,
    W: Write,
{
    let mut ctx = DecryptionContext::new(material.key(), material.iv());
    ctx.decrypt_cbc_loop(&mut input_reader, &mut output_writer)?;
    write_final_pkcs7(&mut ctx, &mut output_writer)?;
    Ok(ctx.bytes_written)
}
