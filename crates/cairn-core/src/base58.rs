//! Base58 and Base58Check encoding.
//!
//! The integer codec ([`encode`]/[`decode`]) works on arbitrary-precision
//! unsigned integers. Base58Check appends the first four bytes of a double
//! SHA-256 to the payload before encoding, so single-character corruption is
//! detected on decode.
//!
//! A zero byte at the front of a payload contributes nothing to its integer
//! value. The byte-level wrappers ([`check_encode_bytes`] and friends) keep
//! those bytes by writing one `'1'` per leading zero byte.

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::trace;

use crate::error::Base58Error;
use crate::hash::double_sha256;

/// The 58-character alphabet. Excludes `0`, `O`, `I` and `l`.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of the Base58Check checksum in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Reverse lookup from ASCII byte to digit value; `0xFF` marks a non-digit.
const DIGITS: [u8; 128] = {
    let mut table = [0xFF; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Encode an integer in base 58. Zero encodes as `"1"`.
pub fn encode(num: &BigUint) -> String {
    if num.is_zero() {
        return (ALPHABET[0] as char).to_string();
    }
    // to_radix_le yields least-significant digit first
    num.to_radix_le(58)
        .iter()
        .rev()
        .map(|&d| ALPHABET[d as usize] as char)
        .collect()
}

/// Decode a base-58 string into an integer.
pub fn decode(s: &str) -> Result<BigUint, Base58Error> {
    if s.is_empty() {
        return Err(Base58Error::EmptyInput);
    }
    let mut num = BigUint::zero();
    for c in s.chars() {
        num = num * 58u32 + u32::from(digit_value(c)?);
    }
    Ok(num)
}

/// Base58Check-encode an integer.
pub fn check_encode(num: &BigUint) -> String {
    let data = with_checksum(&magnitude(num));
    encode(&BigUint::from_bytes_be(&data))
}

/// Decode and verify a Base58Check string produced by [`check_encode`].
pub fn check_decode(s: &str) -> Result<BigUint, Base58Error> {
    let data = magnitude(&decode(s)?);
    let payload = strip_checksum(&data)?;
    Ok(BigUint::from_bytes_be(payload))
}

/// Base58Check-encode a byte payload, keeping its leading zero bytes.
pub fn check_encode_bytes(payload: &[u8]) -> String {
    let data = with_checksum(payload);
    let zeros = data.iter().take_while(|&&b| b == 0).count();
    let mut out = "1".repeat(zeros);
    let rest = BigUint::from_bytes_be(&data[zeros..]);
    if !rest.is_zero() {
        out.push_str(&encode(&rest));
    }
    out
}

/// Decode and verify a string produced by [`check_encode_bytes`].
pub fn check_decode_bytes(s: &str) -> Result<Vec<u8>, Base58Error> {
    if s.is_empty() {
        return Err(Base58Error::EmptyInput);
    }
    let ones = s.bytes().take_while(|&b| b == ALPHABET[0]).count();
    let mut data = vec![0u8; ones];
    if ones < s.len() {
        data.extend_from_slice(&magnitude(&decode(&s[ones..])?));
    }
    strip_checksum(&data).map(<[u8]>::to_vec)
}

/// Base58Check-encode a hex payload.
pub fn check_encode_hex(payload_hex: &str) -> Result<String, hex::FromHexError> {
    Ok(check_encode_bytes(&hex::decode(payload_hex)?))
}

/// Decode a Base58Check string back to lowercase hex.
pub fn check_decode_hex(s: &str) -> Result<String, Base58Error> {
    check_decode_bytes(s).map(hex::encode)
}

fn digit_value(c: char) -> Result<u8, Base58Error> {
    let value = if c.is_ascii() { DIGITS[c as usize] } else { 0xFF };
    if value == 0xFF {
        return Err(Base58Error::InvalidDigit(c));
    }
    Ok(value)
}

/// Big-endian bytes of `num` without leading zeros; empty for zero.
fn magnitude(num: &BigUint) -> Vec<u8> {
    if num.is_zero() {
        Vec::new()
    } else {
        num.to_bytes_be()
    }
}

fn with_checksum(payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&double_sha256(payload)[..CHECKSUM_LEN]);
    data
}

fn strip_checksum(data: &[u8]) -> Result<&[u8], Base58Error> {
    if data.len() < CHECKSUM_LEN {
        return Err(Base58Error::MissingChecksum);
    }
    let (payload, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
    if double_sha256(payload)[..CHECKSUM_LEN] != *checksum {
        trace!(len = payload.len(), "base58check checksum mismatch");
        return Err(Base58Error::ChecksumMismatch);
    }
    Ok(payload)
}
