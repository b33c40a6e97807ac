//! Seed derivation parameters.
//!
//! Provides [`SeedParams`] with the standard mnemonic-to-seed settings. The
//! parameters can be overridden programmatically or deserialized from any
//! serde format; fields missing from the input keep their defaults.

use serde::{Deserialize, Serialize};

/// PBKDF2 iteration count for mnemonic-to-seed stretching.
pub const SEED_ITERATIONS: u32 = 2048;

/// Salt prefix prepended to the passphrase.
pub const SEED_SALT_PREFIX: &str = "mnemonic";

/// Parameters for stretching a mnemonic into a seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedParams {
    /// PBKDF2-HMAC-SHA512 iteration count.
    pub iterations: u32,
    /// Prefix joined with the passphrase to form the salt.
    pub salt_prefix: String,
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            iterations: SEED_ITERATIONS,
            salt_prefix: SEED_SALT_PREFIX.to_string(),
        }
    }
}

impl SeedParams {
    /// Salt bytes for a given passphrase.
    pub fn salt(&self, passphrase: &str) -> Vec<u8> {
        let mut salt = Vec::with_capacity(self.salt_prefix.len() + passphrase.len());
        salt.extend_from_slice(self.salt_prefix.as_bytes());
        salt.extend_from_slice(passphrase.as_bytes());
        salt
    }
}
