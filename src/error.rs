//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All fallible operations return [`Result<T, SaltcryptError>`](SaltcryptError).
//!
//! Planning problems are never raised as errors: they end up as the reason string of an
//! invalid [`Job`](crate::planner::Job). Everything else surfaces here and is turned into
//! a per-file result value by the batch layer.

use std::path::PathBuf;
use thiserror::Error;

/// The error type for all salted-container operations.
#[derive(Error, Debug)]
pub enum SaltcryptError {
    /// I/O error occurred during file operations.
    ///
    /// Automatically created from [`std::io::Error`] via `?`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cryptographic operation failed.
    ///
    /// Used for:
    /// - ciphertext that is not a whole number of AES blocks
    /// - invalid PKCS#7 padding (the usual symptom of a wrong password)
    /// - failure to obtain OS randomness
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Container header parsing or validation error.
    #[error("Header error: {0}")]
    Header(String),

    /// The encrypted input does not exist.
    #[error("Encrypted file {} does not exist", .0.display())]
    SourceMissing(PathBuf),

    /// The encrypted input is shorter than the magic header plus salt.
    #[error("Encrypted file {} is too small to be encrypted", .0.display())]
    TooShortToBeEncrypted(PathBuf),

    /// The file cannot hold even the shortest vendor magic.
    #[error("File does not exist or is too small")]
    TooShortForMagic,

    /// Key, IV or salt came out empty.
    #[error("Key / IV / Salt is invalid")]
    InvalidKeyMaterial,

    /// The output file could not be opened for writing. Nothing was written.
    #[error("could not decrypt - could not write to output file {}: {source}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decryption failed after the output was opened; the partial output was removed.
    #[error("could not decrypt: {source}")]
    DecryptFailed {
        #[source]
        source: Box<SaltcryptError>,
    },

    /// Decryption failed and the partial output could not be removed either.
    #[error("could not decrypt and failed to cleanup: {source}")]
    DecryptCleanupFailed {
        #[source]
        source: Box<SaltcryptError>,
    },

    /// Encryption failed after the output was opened; the partial output was removed.
    #[error("could not encrypt: {source}")]
    EncryptFailed {
        #[source]
        source: Box<SaltcryptError>,
    },

    /// Encryption failed and the partial output could not be removed either.
    #[error("could not encrypt and failed to cleanup: {source}")]
    EncryptCleanupFailed {
        #[source]
        source: Box<SaltcryptError>,
    },

    /// The rayon worker pool could not be built.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_failure_keeps_original_cause_in_message() {
        let err = SaltcryptError::DecryptCleanupFailed {
            source: Box::new(SaltcryptError::Crypto("invalid PKCS#7 padding".into())),
        };
        assert_eq!(
            err.to_string(),
            "could not decrypt and failed to cleanup: Crypto error: invalid PKCS#7 padding"
        );
    }

    #[test]
    fn source_chain_is_reachable() {
        use std::error::Error as _;

        let err = SaltcryptError::DecryptFailed {
            source: Box::new(SaltcryptError::Crypto("bad".into())),
        };
        let inner = err.source().expect("wrapped cause");
        assert_eq!(inner.to_string(), "Crypto error: bad");
    }
}
