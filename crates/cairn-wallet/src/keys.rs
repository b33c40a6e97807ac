//! Seeds and master-key derivation.
//!
//! A [`Seed`] is the 64-byte output of stretching a mnemonic. The master key
//! is `HMAC-SHA512("Bitcoin seed", seed)`: the left half becomes the private
//! scalar, the right half the chain code. The extended-key serializations use
//! the standard `xprv`/`xpub` layout with Base58Check.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use cairn_core::base58;
use cairn_core::crypto::KeyPair;
use cairn_core::error::CryptoError;
use cairn_core::hash::hmac_sha512;

/// Length of a seed in bytes.
pub const SEED_LEN: usize = 64;

/// HMAC key for master-key derivation.
const MASTER_KEY_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Version bytes for mainnet extended private keys (`xprv`).
const XPRV_VERSION: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];

/// Version bytes for mainnet extended public keys (`xpub`).
const XPUB_VERSION: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];

/// A 64-byte seed derived from a mnemonic.
///
/// Secret material is zeroized on drop to prevent leaking key material
/// in freed memory.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; SEED_LEN],
}

impl Seed {
    /// Create a seed from raw bytes.
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self { bytes }
    }

    /// Get the raw seed bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.bytes
    }

    /// Derive the master key pair and chain code.
    ///
    /// Fails with [`CryptoError::InvalidScalar`] in the (negligible) case that
    /// the left half of the HMAC output is zero or not below the group order.
    pub fn master_key(&self) -> Result<MasterKey, CryptoError> {
        let mut i = hmac_sha512(MASTER_KEY_HMAC_KEY, &self.bytes);
        let key_pair = KeyPair::derive(&i[..32]);
        let mut chain_code = Zeroizing::new([0u8; 32]);
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();
        Ok(MasterKey {
            key_pair: key_pair?,
            chain_code,
        })
    }
}

impl Clone for Seed {
    fn clone(&self) -> Self {
        Self { bytes: self.bytes }
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Root key pair plus chain code derived from a seed.
///
/// The chain code is zeroized on drop.
#[derive(Clone)]
pub struct MasterKey {
    key_pair: KeyPair,
    chain_code: Zeroizing<[u8; 32]>,
}

impl MasterKey {
    /// The master key pair.
    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// The 32-byte chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Base58Check `xprv` serialization.
    pub fn to_extended_private_string(&self) -> String {
        let mut key = [0u8; 33];
        key[1..].copy_from_slice(&self.key_pair.secret_bytes());
        let out = base58::check_encode_bytes(&self.serialize(XPRV_VERSION, &key));
        key.zeroize();
        out
    }

    /// Base58Check `xpub` serialization.
    pub fn to_extended_public_string(&self) -> String {
        let key = self.key_pair.public_key().to_compressed_bytes();
        base58::check_encode_bytes(&self.serialize(XPUB_VERSION, &key))
    }

    /// version ‖ depth ‖ parent fingerprint ‖ child number ‖ chain code ‖ key
    fn serialize(&self, version: [u8; 4], key: &[u8; 33]) -> Vec<u8> {
        let mut data = Vec::with_capacity(78);
        data.extend_from_slice(&version);
        data.push(0); // depth
        data.extend_from_slice(&[0u8; 4]); // parent fingerprint
        data.extend_from_slice(&[0u8; 4]); // child number
        data.extend_from_slice(self.chain_code.as_slice());
        data.extend_from_slice(key);
        data
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterKey")
            .field("public_key", &self.key_pair.public_key())
            .field("chain_code", &"[REDACTED]")
            .finish()
    }
}
