//! Cross-crate test suite for Cairn.
//!
//! Integration tests drive the full entropy → mnemonic → seed → key →
//! address pipeline, check the codecs against independent implementations
//! and exercise invariants under randomized inputs.

pub mod helpers;
