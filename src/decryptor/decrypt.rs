//! src/decryptor/decrypt.rs
//! Reader → writer decryption of a complete salted container.

use crate::aliases::Password;
use crate::crypto::kdf::derive_key_and_iv;
use crate::decryptor::read::read_container_header;
use crate::decryptor::stream::decrypt_ciphertext_stream;
use crate::error::SaltcryptError;
use std::io::{Read, Write};

/// Decrypt a `"Salted__"` container read from `input` into `output`.
///
/// Plaintext is written as it is produced; on error `output` may already hold a
/// prefix of it. File-level callers remove the partial output themselves
/// (see [`decrypt_file`](crate::decrypt_file)).
///
/// # Errors
///
/// - [`SaltcryptError::Header`] if the magic or salt is missing
/// - [`SaltcryptError::Crypto`] on a truncated block or bad padding (wrong password)
/// - [`SaltcryptError::Io`] on read/write failure
///
/// # Example
///
/// ```
/// use saltcrypt_rs::{decrypt, encrypt, Password};
/// use std::io::Cursor;
///
/// let password = Password::from("correct horse");
/// let mut container = Vec::new();
/// encrypt(Cursor::new(b"attack at dawn"), &mut container, &password)?;
///
/// let mut plaintext = Vec::new();
/// decrypt(Cursor::new(container), &mut plaintext, &password)?;
/// assert_eq!(plaintext, b"attack at dawn");
/// # Ok::<(), saltcrypt_rs::SaltcryptError>(())
/// ```
#[inline(always)]
pub fn decrypt<R: Read, W: Write>(
    mut input_reader: R,
    mut output_writer: W,
    password: &Password,
) -> Result<u64, SaltcryptError> {
    let salt = read_container_header(&mut input_reader)?;
    let material = derive_key_and_iv(password.expose_secret(), &salt)?;
    decrypt_ciphertext_stream(&mut input_reader, &mut output_writer, &material)
}
