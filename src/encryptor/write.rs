//! src/encryptor/write.rs
//! Container header writer.

use crate::aliases::Salt8;
use crate::consts::SALT_HEADER;
use crate::error::SaltcryptError;
use std::io::Write;

/// Write `"Salted__"` followed by the salt.
#[inline]
pub fn write_header<W: Write>(writer: &mut W, salt: &Salt8) -> Result<(), SaltcryptError> {
    writer.write_all(SALT_HEADER)?;
    writer.write_all(salt)?;
    Ok(())
}
