// src/crypto/kdf/mod.rs

//! Password → key/IV derivation.

pub mod evp;

pub use evp::{derive_into, derive_key_and_iv, DerivedMaterial};
