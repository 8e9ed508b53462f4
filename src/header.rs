//! # Header Sniffing
//!
//! Cheap classification of a file by its leading bytes, without parsing further.
//!
//! Two unrelated container families are recognised:
//!
//! - the legacy OpenSSL layout this crate decrypts: `"Salted__"` + 8-byte salt + ciphertext
//! - the vendor (QNAP) layout, detected only: a 7-byte v1 magic or a 9-byte v2 magic,
//!   with a compression flag byte at offset 9 for v2
//!
//! The magics do not overlap, so a file matches at most one family.

use crate::aliases::Salt8;
use crate::consts::{
    SALT_HEADER, SALT_HEADER_SIZE, VENDOR_MAGIC_V1, VENDOR_MAGIC_V2, VENDOR_V2_COMPRESSED,
    VENDOR_V2_FLAG_OFFSET,
};
use crate::error::SaltcryptError;
use crate::utils::{read_exact_span, read_fill};
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

/// Check whether the reader starts with the `"Salted__"` magic.
///
/// A reader that ends before 8 bytes is a negative answer, not an error.
///
/// # Example
///
/// ```
/// use saltcrypt_rs::header::is_legacy_header;
/// use std::io::Cursor;
///
/// assert!(is_legacy_header(Cursor::new(b"Salted__\x01\x02"))?);
/// assert!(!is_legacy_header(Cursor::new(b"Salted"))?);
/// assert!(!is_legacy_header(Cursor::new(b""))?);
/// # Ok::<(), saltcrypt_rs::SaltcryptError>(())
/// ```
pub fn is_legacy_header<R: Read>(mut reader: R) -> Result<bool, SaltcryptError> {
    let mut magic = [0u8; SALT_HEADER_SIZE];
    let n = read_fill(&mut reader, &mut magic)?;
    Ok(n == SALT_HEADER_SIZE && &magic == SALT_HEADER)
}

/// Check whether the file at `path` is a legacy salted container.
///
/// # Errors
///
/// [`SaltcryptError::Io`] when the file cannot be opened or read (missing, permission
/// denied). Short or foreign files are `Ok(false)`.
pub fn is_legacy_container(path: impl AsRef<Path>) -> Result<bool, SaltcryptError> {
    let file = File::open(path.as_ref())?;
    is_legacy_header(file)
}

/// Read the 8-byte salt stored right after the magic.
pub fn read_salt<R: Read + Seek>(reader: &mut R) -> Result<Salt8, SaltcryptError> {
    reader.seek(SeekFrom::Start(SALT_HEADER_SIZE as u64))?;
    read_exact_span(reader)
}

/// Result of sniffing for the vendor container family.
///
/// `Default` is the zeroed classification: not encrypted, version 0, not compressible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorClassification {
    pub is_encrypted: bool,
    /// 1 or 2 when encrypted, 0 otherwise.
    pub format_version: u8,
    /// Only ever true for version 2.
    pub is_compressible: bool,
}

impl VendorClassification {
    const fn not_encrypted() -> Self {
        Self {
            is_encrypted: false,
            format_version: 0,
            is_compressible: false,
        }
    }
}

/// Classify a reader positioned at the start of a file.
///
/// # Errors
///
/// - [`SaltcryptError::TooShortForMagic`] when fewer bytes than the shortest magic
///   (7) are available
/// - [`SaltcryptError::Io`] on read failure
pub fn read_vendor_classification<R: Read>(
    mut reader: R,
) -> Result<VendorClassification, SaltcryptError> {
    let mut head = [0u8; VENDOR_V2_FLAG_OFFSET + 1];
    let n = read_fill(&mut reader, &mut head)?;

    if n < VENDOR_MAGIC_V1.len() {
        return Err(SaltcryptError::TooShortForMagic);
    }

    if head[..VENDOR_MAGIC_V1.len()] == *VENDOR_MAGIC_V1 {
        return Ok(VendorClassification {
            is_encrypted: true,
            format_version: 1,
            is_compressible: false,
        });
    }

    if n >= VENDOR_MAGIC_V2.len() && head[..VENDOR_MAGIC_V2.len()] == *VENDOR_MAGIC_V2 {
        // Missing flag byte reads as "not compressible".
        let is_compressible = n > VENDOR_V2_FLAG_OFFSET
            && head[VENDOR_V2_FLAG_OFFSET] == VENDOR_V2_COMPRESSED;
        return Ok(VendorClassification {
            is_encrypted: true,
            format_version: 2,
            is_compressible,
        });
    }

    Ok(VendorClassification::not_encrypted())
}

/// Classify the file at `path` against the vendor magics.
///
/// A missing file is reported the same way as a too-short one
/// ([`SaltcryptError::TooShortForMagic`]); use `VendorClassification::default()` when
/// a zeroed classification is wanted in that case.
pub fn classify_vendor_container(
    path: impl AsRef<Path>,
) -> Result<VendorClassification, SaltcryptError> {
    let file = File::open(path.as_ref()).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SaltcryptError::TooShortForMagic,
        _ => SaltcryptError::Io(e),
    })?;
    read_vendor_classification(file)
}
