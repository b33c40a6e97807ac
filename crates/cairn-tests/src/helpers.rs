//! Shared test helpers for integration tests.

use cairn_core::crypto::KeyPair;
use cairn_wallet::Dictionary;

/// A 32-byte scalar with `value` in the last byte.
pub fn small_scalar(value: u8) -> [u8; 32] {
    let mut d = [0u8; 32];
    d[31] = value;
    d
}

/// Key pair for a small scalar.
pub fn small_key_pair(value: u8) -> KeyPair {
    KeyPair::derive(&small_scalar(value)).expect("non-zero small scalar is valid")
}

/// Decode a hex string, panicking on bad input.
pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("valid hex in test vector")
}

/// A synthetic 2048-word dictionary: `w0000` .. `w2047`.
pub fn numbered_dictionary() -> Dictionary {
    Dictionary::from_words((0..2048).map(|i| format!("w{i:04}")))
        .expect("2048 distinct words")
}

/// Flip the case of one ASCII letter at `pos`; `None` if it isn't a letter.
pub fn flip_case_at(s: &str, pos: usize) -> Option<String> {
    let c = s.as_bytes().get(pos)?;
    if !c.is_ascii_alphabetic() {
        return None;
    }
    let mut bytes = s.as_bytes().to_vec();
    bytes[pos] ^= 0x20;
    String::from_utf8(bytes).ok()
}
