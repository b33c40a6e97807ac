//! secp256k1 key pairs and recoverable ECDSA signatures.
//!
//! Uses `k256` for the curve arithmetic. A [`KeyPair`] holds the private
//! scalar `D`; its [`PublicKey`] is always `D·G`, computed by the library and
//! never stored separately.
//!
//! # Scalar range
//!
//! Scalars are interpreted as big-endian unsigned integers and must lie in
//! `[1, n-1]` where `n` is the group order. Anything else is rejected with
//! [`CryptoError::InvalidScalar`] rather than reduced.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::trace;

use crate::address::Address;
use crate::error::CryptoError;

/// Curve identifier carried by every key pair.
pub const CURVE: &str = "secp256k1";

/// Length of a private scalar in bytes.
pub const SCALAR_LEN: usize = 32;

/// Length of a recoverable signature: `r ‖ s ‖ recovery_id`.
pub const SIGNATURE_LEN: usize = 65;

/// secp256k1 key pair.
///
/// Wraps [`k256::ecdsa::SigningKey`], which zeroizes the scalar on drop.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a key pair from a uniformly random scalar drawn from the OS RNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: SigningKey::random(&mut csprng),
        }
    }

    /// Derive a key pair from a big-endian scalar.
    ///
    /// Leading zero bytes are ignored, so inputs shorter or longer than 32
    /// bytes are accepted as long as the integer fits in `[1, n-1]`.
    pub fn derive(scalar_bytes: &[u8]) -> Result<Self, CryptoError> {
        let significant = scalar_bytes
            .iter()
            .position(|&b| b != 0)
            .map_or(&[][..], |start| &scalar_bytes[start..]);
        if significant.is_empty() || significant.len() > SCALAR_LEN {
            return Err(CryptoError::InvalidScalar);
        }
        let mut padded = [0u8; SCALAR_LEN];
        padded[SCALAR_LEN - significant.len()..].copy_from_slice(significant);
        let signing_key = SigningKey::from_bytes(&k256::FieldBytes::from(padded))
            .map_err(|_| CryptoError::InvalidScalar)?;
        Ok(Self { signing_key })
    }

    /// The curve this key pair lives on.
    pub fn curve(&self) -> &'static str {
        CURVE
    }

    /// The private scalar as 32 big-endian bytes. Handle with care.
    pub fn secret_bytes(&self) -> [u8; SCALAR_LEN] {
        self.signing_key.to_bytes().into()
    }

    /// The public point `D·G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: *self.signing_key.verifying_key(),
        }
    }

    /// Account address of this key pair's public key.
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key())
    }

    /// Sign a 32-byte digest, returning `r ‖ s ‖ recovery_id`.
    ///
    /// Signatures are deterministic (RFC 6979) and low-S normalized.
    pub fn sign(&self, digest: &[u8; 32]) -> Result<[u8; SIGNATURE_LEN], CryptoError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|_| CryptoError::SigningFailed)?;
        let mut out = [0u8; SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        Ok(out)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self {
            signing_key: self.signing_key.clone(),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("curve", &CURVE)
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// secp256k1 public point.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    verifying_key: VerifyingKey,
}

impl PublicKey {
    /// Parse a public key from its coordinate encoding.
    ///
    /// Accepts 64 raw bytes `X ‖ Y`, 65-byte SEC1 uncompressed, or 33-byte
    /// SEC1 compressed input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let verifying_key = if bytes.len() == 64 {
            let mut sec1 = [0u8; 65];
            sec1[0] = 0x04;
            sec1[1..].copy_from_slice(bytes);
            VerifyingKey::from_sec1_bytes(&sec1)
        } else {
            VerifyingKey::from_sec1_bytes(bytes)
        }
        .map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { verifying_key })
    }

    /// The 64-byte `X ‖ Y` encoding hashed into addresses.
    pub fn to_raw_bytes(&self) -> [u8; 64] {
        let point = self.verifying_key.to_encoded_point(false);
        let mut raw = [0u8; 64];
        raw.copy_from_slice(&point.as_bytes()[1..]);
        raw
    }

    /// 33-byte SEC1 compressed encoding.
    pub fn to_compressed_bytes(&self) -> [u8; 33] {
        let point = self.verifying_key.to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// The affine X coordinate, big-endian.
    pub fn x(&self) -> [u8; 32] {
        let mut x = [0u8; 32];
        x.copy_from_slice(&self.to_raw_bytes()[..32]);
        x
    }

    /// The affine Y coordinate, big-endian.
    pub fn y(&self) -> [u8; 32] {
        let mut y = [0u8; 32];
        y.copy_from_slice(&self.to_raw_bytes()[32..]);
        y
    }

    /// Account address of this public key.
    pub fn address(&self) -> Address {
        Address::from_public_key(self)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.to_raw_bytes()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_raw_bytes()))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.to_raw_bytes()))
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

/// Recover the signer's public key from a digest and a 65-byte signature.
pub fn recover(digest: &[u8; 32], signature: &[u8]) -> Result<PublicKey, CryptoError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(CryptoError::InvalidSignature);
    }
    let sig = Signature::from_slice(&signature[..64]).map_err(|_| CryptoError::InvalidSignature)?;
    let recovery_id = RecoveryId::from_byte(signature[64]).ok_or(CryptoError::InvalidSignature)?;
    let verifying_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|e| {
            trace!(error = %e, "public key recovery failed");
            CryptoError::InvalidSignature
        })?;
    Ok(PublicKey { verifying_key })
}

/// Check that `signature` over `digest` was produced by `public_key`.
///
/// Malformed signatures verify as `false`.
pub fn verify(digest: &[u8; 32], signature: &[u8], public_key: &PublicKey) -> bool {
    recover(digest, signature).is_ok_and(|recovered| recovered == *public_key)
}
