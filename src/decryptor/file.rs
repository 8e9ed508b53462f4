//! src/decryptor/file.rs
//! File-level decryption: precondition checks, buffered streaming, partial-output cleanup.

use crate::aliases::Password;
use crate::attributes::{HiddenWhileWriting, OutputVisibility};
use crate::consts::{CONTAINER_PREFIX_SIZE, STREAM_BUFFER_SIZE};
use crate::crypto::kdf::{derive_key_and_iv, DerivedMaterial};
use crate::decryptor::stream::decrypt_ciphertext_stream;
use crate::error::SaltcryptError;
use crate::header::read_salt;
use crate::utils::remove_if_exists;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decrypt `encrypted_file` into `output_file`.
///
/// Checks, in order, each with its own error:
///
/// 1. the encrypted file exists — [`SaltcryptError::SourceMissing`]
/// 2. it holds at least the 16-byte magic + salt — [`SaltcryptError::TooShortToBeEncrypted`]
/// 3. key/IV derivation is sound — [`SaltcryptError::InvalidKeyMaterial`]
/// 4. the output can be opened for writing — [`SaltcryptError::OutputUnwritable`]
///
/// None of these touch the output file. Once the output is open, any failure (bad
/// padding from a wrong password, I/O error, disk full) removes the partial output and
/// is reported as [`SaltcryptError::DecryptFailed`], or as
/// [`SaltcryptError::DecryptCleanupFailed`] if the removal failed too. The original
/// cause is kept as the error source either way.
///
/// The magic itself is not re-checked here; planning rejects files without it.
pub fn decrypt_file(
    encrypted_file: impl AsRef<Path>,
    password: &Password,
    output_file: impl AsRef<Path>,
) -> Result<PathBuf, SaltcryptError> {
    decrypt_file_with(encrypted_file, password, output_file, &HiddenWhileWriting)
}

/// [`decrypt_file`] with a caller-supplied visibility hook around the write.
pub fn decrypt_file_with(
    encrypted_file: impl AsRef<Path>,
    password: &Password,
    output_file: impl AsRef<Path>,
    visibility: &dyn OutputVisibility,
) -> Result<PathBuf, SaltcryptError> {
    let encrypted_file = encrypted_file.as_ref();
    let output_file = output_file.as_ref();

    let length = match fs::metadata(encrypted_file) {
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) => return Err(SaltcryptError::SourceMissing(encrypted_file.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SaltcryptError::SourceMissing(encrypted_file.to_path_buf()))
        }
        Err(e) => return Err(SaltcryptError::Io(e)),
    };

    if length < CONTAINER_PREFIX_SIZE as u64 {
        return Err(SaltcryptError::TooShortToBeEncrypted(
            encrypted_file.to_path_buf(),
        ));
    }

    let mut source = File::open(encrypted_file)?;
    let salt = read_salt(&mut source)?;
    let material = derive_key_and_iv(password.expose_secret(), &salt)?;

    let destination = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(output_file)
        .map_err(|source| SaltcryptError::OutputUnwritable {
            path: output_file.to_path_buf(),
            source,
        })?;

    visibility.hide(output_file);

    match stream_to_file(source, destination, &material) {
        Ok(bytes) => {
            visibility.show(output_file);
            debug!(
                source = %encrypted_file.display(),
                output = %output_file.display(),
                bytes,
                "decrypted"
            );
            Ok(output_file.to_path_buf())
        }
        Err(cause) => Err(discard_partial_output(output_file, cause, visibility)),
    }
}

/// `source` must already be positioned at the first ciphertext byte.
fn stream_to_file(
    source: File,
    destination: File,
    material: &DerivedMaterial,
) -> Result<u64, SaltcryptError> {
    let reader = BufReader::with_capacity(STREAM_BUFFER_SIZE, source);
    let mut writer = BufWriter::with_capacity(STREAM_BUFFER_SIZE, destination);
    let bytes = decrypt_ciphertext_stream(reader, &mut writer, material)?;
    writer.flush()?;
    Ok(bytes)
}

fn discard_partial_output(
    output_file: &Path,
    cause: SaltcryptError,
    visibility: &dyn OutputVisibility,
) -> SaltcryptError {
    match remove_if_exists(output_file) {
        Ok(()) => SaltcryptError::DecryptFailed {
            source: Box::new(cause),
        },
        Err(e) => {
            warn!(
                output = %output_file.display(),
                error = %e,
                "failed to remove partial output"
            );
            visibility.show(output_file);
            SaltcryptError::DecryptCleanupFailed {
                source: Box::new(cause),
            }
        }
    }
}
