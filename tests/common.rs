//! tests/common.rs
//! Common constants and helpers shared across test files

use saltcrypt_rs::encryptor::encrypt_with_salt;
use saltcrypt_rs::Password;
use std::io::Cursor;
use std::path::Path;

/// Standard test password used across the vectors and generated files
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &str = "Hello";

/// Common test data used across multiple tests
#[allow(dead_code)] // Used across multiple test files
pub const TEST_DATA: &[u8] = b"test data";

#[allow(dead_code)]
pub fn test_password() -> Password {
    Password::from(TEST_PASSWORD)
}

/// Salt used for every generated test file, so outcomes are reproducible.
///
/// With this salt the wrong-password cases used by the tests all fail the padding
/// check (checked with `openssl enc -d`): `TEST_DATA` and the 37-byte payload in
/// file_ops_tests under `"wrong"`, and `TEST_DATA` encrypted under `"wrong"` or
/// `"different"` then decrypted under `TEST_PASSWORD`.
#[allow(dead_code)]
pub const FIXED_SALT: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Write `plaintext` to `path` as a salted container under `password`.
#[allow(dead_code)]
pub fn write_encrypted(path: &Path, plaintext: &[u8], password: &str) {
    let mut container = Vec::new();
    encrypt_with_salt(
        Cursor::new(plaintext),
        &mut container,
        &Password::from(password),
        &FIXED_SALT,
    )
    .unwrap_or_else(|e| panic!("encrypt for {path:?} failed: {e}"));
    std::fs::write(path, container).unwrap_or_else(|e| panic!("write {path:?} failed: {e}"));
}
