//! Digest, MAC and key-stretching primitives.
//!
//! Thin wrappers over `sha2`, `sha3`, `hmac` and `pbkdf2` so the rest of the
//! workspace deals in fixed-size arrays instead of hasher state.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice. Source of the Base58Check checksum.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Legacy Keccak-256 (pre-FIPS padding), as used for account addresses.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// HMAC-SHA-512 of `data` under `key`.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// PBKDF2 with HMAC-SHA-512, producing `key_len` bytes.
pub fn pbkdf2_sha512(password: &[u8], salt: &[u8], iterations: u32, key_len: usize) -> Vec<u8> {
    let mut key = vec![0u8; key_len];
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn double_sha256_empty() {
        assert_eq!(
            hex::encode(double_sha256(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn hmac_sha512_rfc4231_case2() {
        let mac = hmac_sha512(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn pbkdf2_respects_key_len() {
        assert_eq!(pbkdf2_sha512(b"pw", b"salt", 1, 16).len(), 16);
        assert_eq!(pbkdf2_sha512(b"pw", b"salt", 1, 100).len(), 100);
    }

    #[test]
    fn pbkdf2_prefix_stable_across_lengths() {
        let short = pbkdf2_sha512(b"pw", b"salt", 4, 32);
        let long = pbkdf2_sha512(b"pw", b"salt", 4, 64);
        assert_eq!(&long[..32], &short[..]);
    }

    #[test]
    fn pbkdf2_iterations_matter() {
        assert_ne!(
            pbkdf2_sha512(b"pw", b"salt", 1, 64),
            pbkdf2_sha512(b"pw", b"salt", 2, 64)
        );
    }
}
