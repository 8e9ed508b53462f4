//! src/encryptor/encrypt.rs
//! Reader → writer encryption into a salted container.

use crate::aliases::{Password, Salt8};
use crate::crypto::kdf::derive_key_and_iv;
use crate::crypto::rng::random_salt;
use crate::encryptor::stream::encrypt_stream;
use crate::encryptor::write::write_header;
use crate::error::SaltcryptError;
use std::io::{Read, Write};

/// Encrypt `input` into a `"Salted__"` container with a fresh random salt.
///
/// Output is readable by `openssl enc -d -aes-256-cbc -md md5`.
///
/// # Errors
///
/// - [`SaltcryptError::Header`] for an empty password
/// - [`SaltcryptError::Crypto`] when the OS cannot supply randomness
/// - [`SaltcryptError::Io`] on read/write failure
#[inline(always)]
pub fn encrypt<R, W>(input: R, output: W, password: &Password) -> Result<u64, SaltcryptError>
where
    R: Read,
    W: Write,
{
    let salt = random_salt()?;
    encrypt_with_salt(input, output, password, &salt)
}

/// [`encrypt`] with a caller-chosen salt. Same input, password and salt always give
/// the same bytes.
///
/// Returns the total container length (header included).
pub fn encrypt_with_salt<R, W>(
    mut input: R,
    mut output: W,
    password: &Password,
    salt: &Salt8,
) -> Result<u64, SaltcryptError>
where
    R: Read,
    W: Write,
{
    if password.is_empty() {
        return Err(SaltcryptError::Header("empty password".into()));
    }

    let material = derive_key_and_iv(password.expose_secret(), salt)?;
    write_header(&mut output, salt)?;
    let body = encrypt_stream(&mut input, &mut output, &material)?;
    Ok(crate::consts::CONTAINER_PREFIX_SIZE as u64 + body)
}
