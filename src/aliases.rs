//! # Secret Buffer Aliases
//!
//! Zeroize-on-drop wrappers for every buffer that holds key material or plaintext.
//!
//! ## Type Categories
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - fixed `N`-byte buffer wiped on drop
//!
//! ### Semantic Fixed-Size Types
//! - [`Aes256Key32`] - 32-byte AES-256 key
//! - [`Iv16`] - 16-byte CBC initialization vector
//! - [`Block16`] - one AES block (plaintext side)
//! - [`KeyIvBuffer48`] - key + IV accumulator used by the derivation
//!
//! ### Public Values
//! - [`Salt8`] - 8-byte salt; stored in clear in the container header
//!
//! ### Dynamic Secrets
//! - [`Password`] - password bytes
//!
//! All secret types need an explicit deref (or [`Password::expose_secret`]) to reach the
//! bytes, and none of them print their contents in `Debug` output.

use std::fmt;
use zeroize::Zeroizing;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer — generic secure stack buffer
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = Zeroizing<[u8; N]>;

pub type Aes256Key32 = SpanBuffer<32>;
pub type Iv16 = SpanBuffer<16>;
pub type Block16 = SpanBuffer<16>; // one AES block
pub type KeyIvBuffer48 = SpanBuffer<48>;

/// Salt is public: it is written in clear right after the magic.
pub type Salt8 = [u8; 8];

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────

/// Password bytes as typed by the user (UTF-8 when coming from a string).
///
/// Any length is accepted by the derivation, including zero.
#[derive(Clone, Default)]
pub struct Password(Zeroizing<Vec<u8>>);

impl Password {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    #[inline(always)]
    pub fn expose_secret(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for Password {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
