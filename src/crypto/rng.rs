// src/crypto/rng.rs
//! Secure randomness for fixed-size values (salts).
//!
//! Every draw goes straight to the operating system CSPRNG through `OsRng`.

use crate::aliases::Salt8;
use crate::error::SaltcryptError;
use rand::{rngs::OsRng, TryRngCore};

/// Extension trait – gives `.try_random()` to fixed-size byte arrays
pub trait SecureRandomExt: Sized {
    /// Generate a cryptographically secure random instance of this type
    fn try_random() -> Result<Self, SaltcryptError>;
}

impl<const N: usize> SecureRandomExt for [u8; N] {
    #[inline(always)]
    fn try_random() -> Result<Self, SaltcryptError> {
        let mut bytes = [0u8; N];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SaltcryptError::Crypto(format!("OS randomness unavailable: {e}")))?;
        Ok(bytes)
    }
}

/// Fresh salt for a new container.
#[inline]
pub fn random_salt() -> Result<Salt8, SaltcryptError> {
    Salt8::try_random()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salts_differ() {
        // 2^-64 chance of a false failure
        assert_ne!(random_salt().unwrap(), random_salt().unwrap());
    }
}
