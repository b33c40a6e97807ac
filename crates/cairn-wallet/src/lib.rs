//! # cairn-wallet — mnemonic phrases, seeds and master keys.
//!
//! Turns entropy into a checksummed mnemonic against a fixed 2048-word
//! dictionary, verifies mnemonics, stretches them into 64-byte seeds and
//! derives the master secp256k1 key pair from a seed.
//!
//! # Modules
//!
//! - [`error`] — `MnemonicError` and `WalletError` enums
//! - [`dictionary`] — the ordered word list with reverse lookup
//! - [`mnemonic`] — generate, verify and derive-seed operations
//! - [`config`] — seed stretching parameters
//! - [`keys`] — Seed, master-key derivation, extended-key strings

pub mod config;
pub mod dictionary;
pub mod error;
pub mod keys;
pub mod mnemonic;

// Re-exports for convenient access
pub use config::SeedParams;
pub use dictionary::Dictionary;
pub use error::{MnemonicError, WalletError};
pub use keys::{MasterKey, Seed};
pub use mnemonic::{derive_seed, derive_seed_with, generate, verify};
