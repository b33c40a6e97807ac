//! Wallet error types.

use cairn_core::error::{AddressError, Base58Error, CryptoError};
use thiserror::Error;

/// Errors from the mnemonic codec and its dictionary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    /// Requested entropy size is not one of 128, 160, 192, 224 or 256 bits.
    #[error("invalid entropy length: {0} bits")]
    InvalidEntropyLength(usize),

    /// Caller-supplied entropy holds fewer bytes than requested.
    #[error("entropy too short: requested {requested} bits, got {got} bits")]
    EntropyTooShort {
        /// Requested size in bits.
        requested: usize,
        /// Supplied size in bits.
        got: usize,
    },

    /// Word count is not one of 12, 15, 18, 21 or 24.
    #[error("invalid mnemonic length: {0} words")]
    InvalidMnemonicLength(usize),

    /// A word is not in the dictionary.
    #[error("unknown mnemonic word: {0:?}")]
    UnknownWord(String),

    /// The embedded checksum bits do not match the entropy.
    #[error("mnemonic checksum mismatch")]
    ChecksumMismatch,

    /// Seed stretching needs at least one PBKDF2 iteration.
    #[error("invalid seed iteration count: {0}")]
    InvalidIterations(u32),

    /// Dictionary is not 2048 unique, non-empty, whitespace-free words.
    #[error("invalid dictionary: {0}")]
    InvalidDictionary(String),
}

/// Errors that can occur in wallet operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Mnemonic generation, verification or dictionary failure.
    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    /// Key derivation or signing failure from cairn-core.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Address encoding failure from cairn-core.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Base58Check failure from cairn-core.
    #[error(transparent)]
    Base58(#[from] Base58Error),

    /// I/O error, e.g. reading a dictionary file.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for WalletError {
    fn from(e: std::io::Error) -> Self {
        WalletError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_entropy_too_short() {
        let e = MnemonicError::EntropyTooShort {
            requested: 256,
            got: 128,
        };
        assert_eq!(
            e.to_string(),
            "entropy too short: requested 256 bits, got 128 bits"
        );
    }

    #[test]
    fn display_unknown_word() {
        let e = MnemonicError::UnknownWord("zzz".into());
        assert_eq!(e.to_string(), "unknown mnemonic word: \"zzz\"");
    }

    #[test]
    fn clone_and_eq() {
        let e1 = MnemonicError::InvalidMnemonicLength(13);
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }

    #[test]
    fn from_mnemonic_error_is_transparent() {
        let wallet: WalletError = MnemonicError::ChecksumMismatch.into();
        assert_eq!(wallet, WalletError::Mnemonic(MnemonicError::ChecksumMismatch));
        assert_eq!(wallet.to_string(), "mnemonic checksum mismatch");
    }

    #[test]
    fn from_crypto_error() {
        let wallet: WalletError = CryptoError::InvalidScalar.into();
        assert_eq!(wallet, WalletError::Crypto(CryptoError::InvalidScalar));
    }

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let wallet: WalletError = io.into();
        assert_eq!(wallet, WalletError::Io("missing".into()));
    }
}
