// src/encryptor/mod.rs

//! High-level encryption facade.
//!
//! Core API: `encrypt(input, output, &password)?` with a fresh random salt, and
//! `encrypt_file(plain, &password, output)?` for files on disk.
//! Helpers: `encrypt_with_salt` for reproducible output, `write_header` and
//! `encrypt_stream` for custom flows.

pub(crate) mod encrypt;
pub(crate) mod file;
pub(crate) mod stream;
pub(crate) mod write;

pub use encrypt::{encrypt, encrypt_with_salt};
pub use file::encrypt_file;
pub use stream::encrypt_stream;
pub use write::write_header;
