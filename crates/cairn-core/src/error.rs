//! Error types for the Cairn codecs and key operations.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Base58Error {
    #[error("empty base58 input")] EmptyInput,
    #[error("invalid base58 digit: {0:?}")] InvalidDigit(char),
    #[error("base58check checksum mismatch")] ChecksumMismatch,
    #[error("base58check payload shorter than its 4-byte checksum")] MissingChecksum,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("private scalar outside [1, n-1]")] InvalidScalar,
    #[error("invalid public key bytes")] InvalidPublicKey,
    #[error("invalid signature bytes")] InvalidSignature,
    #[error("signing failed")] SigningFailed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid address length: expected 40 hex digits, got {0}")] InvalidLength(usize),
    #[error("invalid address character: {0:?}")] InvalidCharacter(char),
    #[error("address checksum mismatch")] ChecksumMismatch,
}

#[derive(Error, Debug)]
pub enum CairnError {
    #[error(transparent)] Base58(#[from] Base58Error),
    #[error(transparent)] Crypto(#[from] CryptoError),
    #[error(transparent)] Address(#[from] AddressError),
}
