//! Account addresses with mixed-case checksum encoding ([ERC-55]).
//!
//! An address is the low 20 bytes of `Keccak256(X ‖ Y)` over the public
//! point's uncompressed coordinates. Its textual form is 40 hex digits where
//! each letter is uppercased when the matching nibble of
//! `Keccak256(lowercase hex)` is 8 or more, so a single mistyped character is
//! caught with high probability while remaining valid hex.
//!
//! [ERC-55]: https://eips.ethereum.org/EIPS/eip-55

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::crypto::PublicKey;
use crate::error::{AddressError, CryptoError};
use crate::hash::keccak256;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Length of an address in hex digits, without prefix.
pub const ADDRESS_HEX_LEN: usize = 2 * ADDRESS_LEN;

/// A 20-byte account address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Create an address from raw bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Derive the address of a public key.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let hash = keccak256(&public_key.to_raw_bytes());
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// Derive the address from an encoded public key (raw, SEC1 uncompressed
    /// or SEC1 compressed).
    pub fn from_public_key_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self::from_public_key(&PublicKey::from_bytes(bytes)?))
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Checksummed `0x`-prefixed form.
    pub fn to_checksum_string(&self) -> String {
        format!("0x{}", checksum_case(&hex::encode(self.0)))
    }

    /// Parse an address string.
    ///
    /// All-lowercase and all-uppercase input is accepted as is; mixed-case
    /// input must carry a valid checksum.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let (_, body) = split_prefix(s);
        validate_hex(body)?;
        let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            checksum_verify(body)?;
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|_| AddressError::InvalidLength(body.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum_string())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Apply the checksum casing to a hex address.
///
/// The input may be in any case and may carry a `0x` or `0X` prefix; a
/// prefix is always written back as `0x`. The output depends only on the
/// lowercased input, so encoding is idempotent.
pub fn checksum_encode(address: &str) -> Result<String, AddressError> {
    let (prefix, body) = split_prefix(address);
    validate_hex(body)?;
    let prefix = if prefix.is_empty() { "" } else { "0x" };
    Ok(format!("{prefix}{}", checksum_case(body)))
}

/// Check the casing of a mixed-case hex address.
///
/// Only letters are constrained; digits always pass. An all-lowercase address
/// fails unless its hash happens to require no uppercase letters.
pub fn checksum_verify(address: &str) -> Result<(), AddressError> {
    let (_, body) = split_prefix(address);
    validate_hex(body)?;
    let hash = keccak256(body.to_ascii_lowercase().as_bytes());
    for (i, c) in body.chars().enumerate() {
        let upper = nibble(&hash, i) >= 8;
        if c.is_ascii_alphabetic() && c.is_ascii_uppercase() != upper {
            return Err(AddressError::ChecksumMismatch);
        }
    }
    Ok(())
}

// --- Checksum internals ---

/// Nibble `i` of `hash`, high nibble first.
fn nibble(hash: &[u8; 32], i: usize) -> u8 {
    let byte = hash[i / 2];
    if i % 2 == 0 { byte >> 4 } else { byte & 0x0f }
}

/// Case each hex digit of `body` (already validated) by the hash of its
/// lowercase form.
fn checksum_case(body: &str) -> String {
    let lower = body.to_ascii_lowercase();
    let hash = keccak256(lower.as_bytes());
    lower
        .chars()
        .enumerate()
        .map(|(i, c)| if nibble(&hash, i) >= 8 { c.to_ascii_uppercase() } else { c })
        .collect()
}

fn split_prefix(s: &str) -> (&str, &str) {
    match s.get(..2) {
        Some(p @ ("0x" | "0X")) => (p, &s[2..]),
        _ => ("", s),
    }
}

fn validate_hex(body: &str) -> Result<(), AddressError> {
    if let Some(bad) = body.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(AddressError::InvalidCharacter(bad));
    }
    if body.len() != ADDRESS_HEX_LEN {
        return Err(AddressError::InvalidLength(body.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    /// Mixed-case vectors from the ERC-55 reference.
    const VECTORS: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    // --- Encoding ---

    #[test]
    fn encode_reference_vectors() {
        for expected in VECTORS {
            let lower = expected.to_ascii_lowercase();
            assert_eq!(checksum_encode(&lower).unwrap(), expected);
        }
    }

    #[test]
    fn encode_all_caps_and_all_lower_vectors() {
        for expected in [
            "0x52908400098527886E0F7030069857D2E4169EE7",
            "0x8617E340B3D01FA5F11F306F4090FD50E238070D",
            "0xde709f2102306220921060314715629080e2fb77",
            "0x27b1fdb04752bbc536007a920d24acb045561c26",
        ] {
            assert_eq!(checksum_encode(&expected.to_ascii_lowercase()).unwrap(), expected);
        }
    }

    #[test]
    fn encode_without_prefix() {
        let body = &VECTORS[0][2..];
        assert_eq!(checksum_encode(&body.to_ascii_lowercase()).unwrap(), body);
    }

    #[test]
    fn encode_is_idempotent() {
        for v in VECTORS {
            let once = checksum_encode(v).unwrap();
            assert_eq!(checksum_encode(&once).unwrap(), once);
            assert_eq!(checksum_encode(&once.to_ascii_lowercase()).unwrap(), once);
        }
    }

    #[test]
    fn encode_rejects_bad_input() {
        assert_eq!(
            checksum_encode("0x1234").unwrap_err(),
            AddressError::InvalidLength(4)
        );
        let bad = format!("0x{}g", "a".repeat(39));
        assert_eq!(checksum_encode(&bad).unwrap_err(), AddressError::InvalidCharacter('g'));
    }

    // --- Verification ---

    #[test]
    fn verify_reference_vectors() {
        for v in VECTORS {
            assert!(checksum_verify(v).is_ok(), "{v}");
        }
    }

    #[test]
    fn verify_detects_flipped_case() {
        for v in VECTORS {
            let mut chars: Vec<char> = v.chars().collect();
            let pos = chars
                .iter()
                .skip(2)
                .position(|c| c.is_ascii_alphabetic())
                .unwrap()
                + 2;
            chars[pos] = if chars[pos].is_ascii_uppercase() {
                chars[pos].to_ascii_lowercase()
            } else {
                chars[pos].to_ascii_uppercase()
            };
            let flipped: String = chars.into_iter().collect();
            assert_eq!(checksum_verify(&flipped).unwrap_err(), AddressError::ChecksumMismatch);
        }
    }

    #[test]
    fn verify_lowercase_of_mixed_vector_fails() {
        assert_eq!(
            checksum_verify(&VECTORS[0].to_ascii_lowercase()).unwrap_err(),
            AddressError::ChecksumMismatch
        );
    }

    // --- Derivation ---

    #[test]
    fn address_of_scalar_one() {
        let mut d = [0u8; 32];
        d[31] = 1;
        let kp = KeyPair::derive(&d).unwrap();
        assert_eq!(
            kp.address().to_string(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn address_of_known_key() {
        let d = hex::decode("4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")
            .unwrap();
        let kp = KeyPair::derive(&d).unwrap();
        assert_eq!(
            kp.address().to_checksum_string(),
            "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"
        );
    }

    #[test]
    fn address_from_encoded_public_key() {
        let pk = KeyPair::generate().public_key();
        let from_raw = Address::from_public_key_bytes(&pk.to_raw_bytes()).unwrap();
        let from_compressed = Address::from_public_key_bytes(&pk.to_compressed_bytes()).unwrap();
        assert_eq!(from_raw, Address::from_public_key(&pk));
        assert_eq!(from_compressed, from_raw);
        assert_eq!(
            Address::from_public_key_bytes(&[1u8; 20]).unwrap_err(),
            CryptoError::InvalidPublicKey
        );
    }

    // --- Parsing / Display / Serde ---

    #[test]
    fn parse_accepts_uniform_case() {
        let lower: Address = VECTORS[0].to_ascii_lowercase().parse().unwrap();
        let upper: Address = format!("0x{}", VECTORS[0][2..].to_ascii_uppercase())
            .parse()
            .unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_string(), VECTORS[0]);
    }

    #[test]
    fn parse_rejects_bad_mixed_case() {
        let bad = VECTORS[0].replacen('a', "A", 1);
        assert_eq!(bad.parse::<Address>().unwrap_err(), AddressError::ChecksumMismatch);
    }

    #[test]
    fn serde_json_roundtrip() {
        let addr: Address = VECTORS[1].parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", VECTORS[1]));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn encode_normalizes_upper_prefix() {
        let upper = format!("0X{}", VECTORS[0][2..].to_ascii_uppercase());
        assert_eq!(checksum_encode(&upper).unwrap(), VECTORS[0]);
        assert_eq!(
            checksum_encode(&upper).unwrap(),
            checksum_encode(&upper.to_ascii_lowercase()).unwrap()
        );
        checksum_verify(&format!("0X{}", &VECTORS[0][2..])).unwrap();
    }
}
