//! src/crypto/kdf/evp.rs
//! OpenSSL `EVP_BytesToKey` with MD5 and a single round, as used by `openssl enc`
//! before 1.1.0 and by every tool that still writes `"Salted__"` files.
//!
//! ```text
//! D_1 = MD5(password || salt)
//! D_i = MD5(D_{i-1} || password || salt)
//! key = (D_1 || D_2)[0..32], iv = D_3[0..16]
//! ```
//!
//! Digest, concatenation order and round count are all part of the file format.

use crate::aliases::{Aes256Key32, Iv16, KeyIvBuffer48, Salt8, SpanBuffer};
use crate::consts::{IV_SIZE, KEY_AND_IV_SIZE, KEY_SIZE, SALT_SIZE};
use crate::error::SaltcryptError;
use md5::{Digest, Md5};
use std::fmt;

/// Derived AES-256 key and CBC IV. Wiped on drop, never printed.
#[derive(Clone)]
pub struct DerivedMaterial {
    key: Aes256Key32,
    iv: Iv16,
}

impl DerivedMaterial {
    #[inline(always)]
    pub fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    #[inline(always)]
    pub fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }
}

impl fmt::Debug for DerivedMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedMaterial([REDACTED])")
    }
}

/// Derive key and IV directly into caller buffers.
///
/// - any password length, including empty
/// - deterministic, no side effects
#[inline(always)]
pub fn derive_into(
    password: &[u8],
    salt: &Salt8,
    out_key: &mut Aes256Key32,
    out_iv: &mut Iv16,
) -> Result<(), SaltcryptError> {
    let mut material = KeyIvBuffer48::new([0u8; KEY_AND_IV_SIZE]);
    let mut digest = SpanBuffer::<16>::new([0u8; 16]);
    let mut hasher = Md5::new();
    let mut filled = 0;

    while filled < KEY_AND_IV_SIZE {
        if filled > 0 {
            hasher.update(&*digest);
        }
        hasher.update(password);
        hasher.update(salt);
        digest.copy_from_slice(&hasher.finalize_reset());

        let take = (KEY_AND_IV_SIZE - filled).min(digest.len());
        material[filled..filled + take].copy_from_slice(&digest[..take]);
        filled += take;
    }

    out_key.copy_from_slice(&material[..KEY_SIZE]);
    out_iv.copy_from_slice(&material[KEY_SIZE..KEY_AND_IV_SIZE]);
    Ok(())
}

/// Derive key and IV for `salt`, validating the material before it is handed out.
///
/// # Errors
///
/// [`SaltcryptError::InvalidKeyMaterial`] if key, IV or salt come out with the wrong
/// size; the cipher must not run in that case.
pub fn derive_key_and_iv(
    password: &[u8],
    salt: &Salt8,
) -> Result<DerivedMaterial, SaltcryptError> {
    let mut key = Aes256Key32::new([0u8; KEY_SIZE]);
    let mut iv = Iv16::new([0u8; IV_SIZE]);
    derive_into(password, salt, &mut key, &mut iv)?;

    let material = DerivedMaterial { key, iv };
    validate_material(material.key(), material.iv(), salt)?;
    Ok(material)
}

fn validate_material(key: &[u8], iv: &[u8], salt: &[u8]) -> Result<(), SaltcryptError> {
    if key.len() != KEY_SIZE || iv.len() != IV_SIZE || salt.len() != SALT_SIZE {
        return Err(SaltcryptError::InvalidKeyMaterial);
    }
    Ok(())
}
