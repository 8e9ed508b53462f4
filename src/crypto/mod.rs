// src/crypto/mod.rs

//! Low-level crypto primitives: key derivation and secure randomness.
//!
//! The block cipher itself comes straight from the `aes` crate; CBC chaining lives in
//! the decryptor/encryptor stream modules.

pub mod kdf;
pub mod rng;
