// src/lib.rs

pub mod aliases;
pub mod attributes;
pub mod batch_ops;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod header;
pub mod planner;
pub mod utils;

// High-level API
pub use aliases::Password;
pub use decryptor::{decrypt, decrypt_file};
pub use encryptor::{encrypt, encrypt_file};
pub use error::SaltcryptError;

// Format sniffing
pub use header::{classify_vendor_container, is_legacy_container, VendorClassification};

// Key derivation, for custom flows built on `decrypt_ciphertext_stream`
pub use crypto::kdf::{derive_key_and_iv, DerivedMaterial};

// Batch pipeline: plan, then run
pub use batch_ops::{decrypt_batch, decrypt_job, BatchReport, DecryptResult, DeleteResult};
pub use config::BatchOptions;
pub use planner::{plan_decrypt_jobs, Job, JobStatus};
