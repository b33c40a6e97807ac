//! The fixed 2048-word mnemonic dictionary.
//!
//! Word order is part of the encoding: index `i` always maps to the `i`-th
//! word, so reordering a dictionary invalidates every mnemonic produced with
//! it. A [`Dictionary`] is loaded once and passed by reference into the
//! mnemonic codec; it is immutable and can be shared across threads.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use bip39::Language;
use tracing::debug;

use crate::error::{MnemonicError, WalletError};

/// Number of words in a mnemonic dictionary.
pub const DICTIONARY_SIZE: usize = 2048;

/// Ordered word list with a word→index reverse map.
#[derive(Clone)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Dictionary {
    /// The BIP-39 English word list.
    pub fn english() -> Self {
        let words: Vec<String> = Language::English
            .word_list()
            .iter()
            .map(|w| (*w).to_string())
            .collect();
        let index = build_index(&words);
        Self { words, index }
    }

    /// Build a dictionary from an ordered word sequence.
    ///
    /// Fails unless the sequence holds exactly 2048 distinct words, none of
    /// them empty or containing whitespace.
    pub fn from_words<I, S>(words: I) -> Result<Self, MnemonicError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() != DICTIONARY_SIZE {
            return Err(MnemonicError::InvalidDictionary(format!(
                "expected {DICTIONARY_SIZE} words, got {}",
                words.len()
            )));
        }
        if let Some(bad) = words
            .iter()
            .find(|w| w.is_empty() || w.chars().any(char::is_whitespace))
        {
            return Err(MnemonicError::InvalidDictionary(format!(
                "word {bad:?} is empty or contains whitespace"
            )));
        }
        let index = build_index(&words);
        if index.len() != DICTIONARY_SIZE {
            return Err(MnemonicError::InvalidDictionary(format!(
                "{} duplicate words",
                DICTIONARY_SIZE - index.len()
            )));
        }
        Ok(Self { words, index })
    }

    /// Load a dictionary file with one word per line. Blank lines are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let dict = Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )?;
        debug!(path = %path.display(), "loaded mnemonic dictionary");
        Ok(dict)
    }

    /// The word at `index`, if in range.
    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(usize::from(index)).map(String::as_str)
    }

    /// The index of `word`, if present.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// All words in index order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("first", &self.words.first())
            .field("last", &self.words.last())
            .finish_non_exhaustive()
    }
}

fn build_index(words: &[String]) -> HashMap<String, u16> {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| (w.clone(), i as u16))
        .collect()
}
