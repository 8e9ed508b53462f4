// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: `decrypt(input, output, &password)?` over any reader/writer pair, and
//! `decrypt_file(encrypted, &password, output)?` for files on disk.
//! Helpers: `read_container_header`, `decrypt_ciphertext_stream` for custom flows.

pub(crate) mod decrypt;
pub(crate) mod file;
pub(crate) mod read;
pub(crate) mod stream;

pub use decrypt::decrypt;
pub use file::{decrypt_file, decrypt_file_with};
pub use read::read_container_header;
pub use stream::decrypt_ciphertext_stream;
