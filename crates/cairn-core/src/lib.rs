//! # cairn-core
//! Codecs, hashing and secp256k1 keys for the Cairn derivation pipeline.
//!
//! # Modules
//!
//! - [`error`] — error enums for every codec and key operation
//! - [`hash`] — SHA-256, Keccak-256, HMAC-SHA-512 and PBKDF2 wrappers
//! - [`shift`] — arbitrary-bit shifting over byte buffers
//! - [`base58`] — Base58 and Base58Check codecs
//! - [`crypto`] — secp256k1 key pairs, recoverable signatures
//! - [`address`] — account addresses and their mixed-case checksum

pub mod address;
pub mod base58;
pub mod crypto;
pub mod error;
pub mod hash;
pub mod shift;

pub use address::{checksum_encode, checksum_verify, Address};
pub use crypto::{KeyPair, PublicKey};
pub use error::{AddressError, Base58Error, CairnError, CryptoError};
