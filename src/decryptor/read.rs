//! src/decryptor/read.rs
//! Container prefix parsing for reader-level decryption.

use crate::aliases::Salt8;
use crate::consts::{SALT_HEADER, SALT_HEADER_SIZE};
use crate::error::SaltcryptError;
use crate::utils::read_exact_span;
use std::io::Read;

/// Validate the `"Salted__"` magic and return the salt that follows it.
///
/// Leaves the reader positioned at the first ciphertext byte.
#[inline(always)]
pub fn read_container_header<R>(reader: &mut R) -> Result<Salt8, SaltcryptError>
where
    R: Read,
{
    let magic = read_exact_span::<_, SALT_HEADER_SIZE>(reader)
        .map_err(|_| SaltcryptError::Header("file too short for the salted header".into()))?;
    if &magic != SALT_HEADER {
        return Err(SaltcryptError::Header(
            "invalid magic header (expected 'Salted__')".into(),
        ));
    }

    read_exact_span(reader)
        .map_err(|_| SaltcryptError::Header("file too short for the salt".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_and_salt() {
        let mut data = Cursor::new(b"Salted__ABCDEFGHrest".to_vec());
        assert_eq!(&read_container_header(&mut data).unwrap(), b"ABCDEFGH");
        assert_eq!(data.position(), 16);
    }

    #[test]
    fn invalid_magic() {
        let err = read_container_header(&mut Cursor::new(b"Pickled_ABCDEFGH")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Header error: invalid magic header (expected 'Salted__')"
        );
    }

    #[test]
    fn truncated_salt() {
        let err = read_container_header(&mut Cursor::new(b"Salted__ABC")).unwrap_err();
        assert!(matches!(err, SaltcryptError::Header(_)));
    }
}
