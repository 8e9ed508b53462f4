//! src/encryptor/file.rs
//! File-level encryption with partial-output cleanup.

use crate::aliases::Password;
use crate::consts::STREAM_BUFFER_SIZE;
use crate::encryptor::encrypt::encrypt;
use crate::error::SaltcryptError;
use crate::utils::remove_if_exists;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Encrypt `plain_file` into a salted container at `output_file`.
///
/// An empty password is rejected with [`SaltcryptError::Header`] before anything is
/// opened, so an existing output is left as it was. The source is opened before the
/// output, so a missing source leaves nothing behind and is reported as a plain
/// [`SaltcryptError::Io`]. An output that cannot be opened is
/// [`SaltcryptError::OutputUnwritable`]. Failures after that remove the partial
/// output: [`SaltcryptError::EncryptFailed`], or
/// [`SaltcryptError::EncryptCleanupFailed`] when the removal fails as well.
pub fn encrypt_file(
    plain_file: impl AsRef<Path>,
    password: &Password,
    output_file: impl AsRef<Path>,
) -> Result<PathBuf, SaltcryptError> {
    let plain_file = plain_file.as_ref();
    let output_file = output_file.as_ref();

    if password.is_empty() {
        return Err(SaltcryptError::Header("empty password".into()));
    }

    let source = File::open(plain_file)?;
    let destination = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(output_file)
        .map_err(|source| SaltcryptError::OutputUnwritable {
            path: output_file.to_path_buf(),
            source,
        })?;

    match stream_to_file(source, destination, password) {
        Ok(bytes) => {
            debug!(
                source = %plain_file.display(),
                output = %output_file.display(),
                bytes,
                "encrypted"
            );
            Ok(output_file.to_path_buf())
        }
        Err(cause) => match remove_if_exists(output_file) {
            Ok(()) => Err(SaltcryptError::EncryptFailed {
                source: Box::new(cause),
            }),
            Err(e) => {
                warn!(
                    output = %output_file.display(),
                    error = %e,
                    "failed to remove partial output"
                );
                Err(SaltcryptError::EncryptCleanupFailed {
                    source: Box::new(cause),
                })
            }
        },
    }
}

fn stream_to_file(
    source: File,
    destination: File,
    password: &Password,
) -> Result<u64, SaltcryptError> {
    let reader = BufReader::with_capacity(STREAM_BUFFER_SIZE, source);
    let mut writer = BufWriter::with_capacity(STREAM_BUFFER_SIZE, destination);
    let bytes = encrypt(reader, &mut writer, password)?;
    writer.flush()?;
    Ok(bytes)
}
