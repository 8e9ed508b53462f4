//! Utility functions used across the library.

use crate::error::SaltcryptError;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by both CBC directions: chaining the previous ciphertext block into the
/// plaintext before encryption, and back out after decryption.
///
/// # Panics (by contract)
///
/// Panics if any slice is shorter than 16 bytes. All callers pass whole AES blocks.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Read exactly `N` bytes into a stack-allocated `[u8; N]`.
#[inline(always)]
pub fn read_exact_span<R, const N: usize>(reader: &mut R) -> Result<[u8; N], SaltcryptError>
where
    R: Read,
{
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(SaltcryptError::Io)?;
    Ok(buf)
}

/// Fill `buf` as far as the reader allows.
///
/// Unlike `read_exact`, hitting EOF early is not an error; the number of bytes
/// actually read is returned. `Interrupted` reads are retried.
pub fn read_fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Remove `path` if it is still there. A file that is already gone counts as removed.
pub fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn removing_a_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone");
        remove_if_exists(&path).unwrap();

        std::fs::write(&path, b"x").unwrap();
        remove_if_exists(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn xor_is_self_inverse() {
        let a = [0xA5u8; 16];
        let b: [u8; 16] = core::array::from_fn(|i| i as u8);
        let mut x = [0u8; 16];
        let mut back = [0u8; 16];
        xor_blocks(&a, &b, &mut x);
        xor_blocks(&x, &b, &mut back);
        assert_eq!(back, a);
    }

    #[test]
    fn read_fill_stops_at_eof() {
        let mut buf = [0u8; 8];
        let n = read_fill(&mut Cursor::new(b"abc"), &mut buf).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&buf[..3], b"abc");
    }

    #[test]
    fn read_exact_span_reports_short_input() {
        let err = read_exact_span::<_, 4>(&mut Cursor::new(b"ab")).unwrap_err();
        assert!(matches!(err, SaltcryptError::Io(_)));
    }
}
