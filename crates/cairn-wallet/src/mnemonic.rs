//! Checksummed mnemonic phrases (BIP-39 layout).
//!
//! Entropy of 128–256 bits is extended with the leading bits of its SHA-256
//! and cut into 11-bit groups, each naming one word of a 2048-word
//! [`Dictionary`]. The checksum covers `bits / 32` bits, so a 12-word phrase
//! carries 4 checksum bits and a 24-word phrase carries 8.
//!
//! Packing and unpacking are built on [`shift_left`]/[`shift_right`]: word
//! `i` is read by shifting the buffer left `11·i` bits and keeping the top 11
//! bits of the first two bytes. Unpacking runs the other way, prepending each
//! 16-bit index from the last word to the first and shifting the accumulator
//! left by 5 bits to drop its padding.

use rand::RngCore;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use cairn_core::hash::{pbkdf2_sha512, sha256};
use cairn_core::shift::{shift_left, shift_right};

use crate::config::SeedParams;
use crate::dictionary::Dictionary;
use crate::error::MnemonicError;
use crate::keys::{Seed, SEED_LEN};

/// Supported entropy sizes in bits.
pub const ENTROPY_BITS: [usize; 5] = [128, 160, 192, 224, 256];

/// Supported phrase lengths in words.
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Bits encoded by each word.
const BITS_PER_WORD: usize = 11;

/// Number of words for `bits` of entropy.
pub fn word_count(bits: usize) -> usize {
    (bits + bits / 32) / BITS_PER_WORD
}

/// Generate a mnemonic for `bits` of entropy.
///
/// When `entropy` is given it must hold at least `bits / 8` bytes and is
/// truncated to exactly that many; otherwise fresh entropy is drawn from the
/// OS RNG.
pub fn generate(
    dict: &Dictionary,
    bits: usize,
    entropy: Option<&[u8]>,
) -> Result<String, MnemonicError> {
    if !ENTROPY_BITS.contains(&bits) {
        return Err(MnemonicError::InvalidEntropyLength(bits));
    }
    let len = bits / 8;
    let mut buf = Zeroizing::new(match entropy {
        Some(supplied) if supplied.len() < len => {
            return Err(MnemonicError::EntropyTooShort {
                requested: bits,
                got: supplied.len() * 8,
            });
        }
        Some(supplied) => supplied[..len].to_vec(),
        None => {
            let mut fresh = vec![0u8; len];
            rand::rngs::OsRng.fill_bytes(&mut fresh);
            fresh
        }
    });
    let checksum = sha256(&buf)[0];
    buf.push(checksum);

    let words: Vec<&str> = (0..word_count(bits))
        .map(|i| {
            let index = word_index(&buf, i);
            dict.word(index)
                .expect("11-bit index is always within a 2048-word dictionary")
        })
        .collect();
    debug!(bits, words = words.len(), "generated mnemonic");
    Ok(words.join(" "))
}

/// Check a mnemonic's word count, vocabulary and checksum.
///
/// Words are separated by whitespace. The error names the first problem
/// found.
pub fn verify(dict: &Dictionary, mnemonic: &str) -> Result<(), MnemonicError> {
    entropy(dict, mnemonic).map(drop)
}

/// Recover the entropy encoded by a mnemonic, verifying its checksum.
pub fn entropy(dict: &Dictionary, mnemonic: &str) -> Result<Vec<u8>, MnemonicError> {
    let words: Vec<&str> = mnemonic.split_whitespace().collect();
    let count = words.len();
    if !WORD_COUNTS.contains(&count) {
        return Err(MnemonicError::InvalidMnemonicLength(count));
    }
    let indices = words
        .iter()
        .map(|&w| {
            dict.index_of(w)
                .ok_or_else(|| MnemonicError::UnknownWord(w.to_string()))
        })
        .collect::<Result<Vec<u16>, _>>()?;

    let packed = Zeroizing::new(unpack(&indices));
    let entropy_len = 4 * count / 3;
    let checksum_bits = (count / 3) as u32;
    let (entropy, rest) = packed.split_at(entropy_len);

    let mask = 0xFFu8 << (8 - checksum_bits);
    let expected = sha256(entropy)[0] & mask;
    if rest[0] & mask != expected {
        trace!(words = count, "mnemonic checksum mismatch");
        return Err(MnemonicError::ChecksumMismatch);
    }
    Ok(entropy.to_vec())
}

/// Stretch a mnemonic and passphrase into a 64-byte seed.
///
/// The mnemonic is not validated; call [`verify`] first if that matters.
pub fn derive_seed(mnemonic: &str, passphrase: &str) -> Seed {
    stretch(mnemonic, passphrase, &SeedParams::default())
}

/// [`derive_seed`] with explicit parameters.
///
/// Fails with [`MnemonicError::InvalidIterations`] when `params.iterations`
/// is zero.
pub fn derive_seed_with(
    mnemonic: &str,
    passphrase: &str,
    params: &SeedParams,
) -> Result<Seed, MnemonicError> {
    if params.iterations == 0 {
        return Err(MnemonicError::InvalidIterations(params.iterations));
    }
    Ok(stretch(mnemonic, passphrase, params))
}

fn stretch(mnemonic: &str, passphrase: &str, params: &SeedParams) -> Seed {
    let salt = params.salt(passphrase);
    let stretched = Zeroizing::new(pbkdf2_sha512(
        mnemonic.as_bytes(),
        &salt,
        params.iterations,
        SEED_LEN,
    ));
    let mut bytes = [0u8; SEED_LEN];
    bytes.copy_from_slice(&stretched);
    Seed::from_bytes(bytes)
}

/// The 11-bit dictionary index of word `i` in a packed buffer.
fn word_index(packed: &[u8], i: usize) -> u16 {
    let shifted = shift_left(packed, BITS_PER_WORD * i);
    let segment = shift_right(&shifted[..2], 16 - BITS_PER_WORD);
    u16::from_be_bytes([segment[0], segment[1]])
}

/// Reassemble the bit stream `entropy ‖ checksum` from word indices.
fn unpack(indices: &[u16]) -> Vec<u8> {
    let mut acc = Vec::with_capacity(2 * indices.len());
    for index in indices.iter().rev() {
        let mut next = index.to_be_bytes().to_vec();
        next.extend_from_slice(&acc);
        acc = shift_left(&next, 16 - BITS_PER_WORD);
    }
    acc
}
