//! Interop checks against independent implementations of the same formats.
//!
//! - Mnemonics and seeds against the `bip39` crate
//! - Base58 and Base58Check against the `bs58` crate

use cairn_core::base58;
use cairn_wallet::{mnemonic, Dictionary};
use num_bigint::BigUint;
use rand::RngCore;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

#[test]
fn mnemonics_match_bip39_crate() {
    let dict = Dictionary::english();
    for bits in mnemonic::ENTROPY_BITS {
        for _ in 0..8 {
            let entropy = random_bytes(bits / 8);
            let ours = mnemonic::generate(&dict, bits, Some(&entropy)).unwrap();
            let theirs = bip39::Mnemonic::from_entropy(&entropy).unwrap();
            assert_eq!(ours, theirs.to_string());
        }
    }
}

#[test]
fn bip39_phrases_verify_and_round_trip() {
    let dict = Dictionary::english();
    for bits in mnemonic::ENTROPY_BITS {
        let entropy = random_bytes(bits / 8);
        let phrase = bip39::Mnemonic::from_entropy(&entropy).unwrap().to_string();
        mnemonic::verify(&dict, &phrase).unwrap();
        assert_eq!(mnemonic::entropy(&dict, &phrase).unwrap(), entropy);
    }
}

#[test]
fn seeds_match_bip39_crate() {
    let dict = Dictionary::english();
    let entropy = random_bytes(32);
    let phrase = mnemonic::generate(&dict, 256, Some(&entropy)).unwrap();
    let theirs = bip39::Mnemonic::parse_normalized(&phrase).unwrap();
    for passphrase in ["", "TREZOR", "correct horse battery staple"] {
        let ours = mnemonic::derive_seed(&phrase, passphrase);
        assert_eq!(ours.as_bytes(), &theirs.to_seed_normalized(passphrase));
    }
}

#[test]
fn english_dictionary_matches_bip39_crate() {
    let dict = Dictionary::english();
    let theirs = bip39::Language::English.word_list();
    assert!(dict.words().eq(theirs.iter().copied()));
}

#[test]
fn base58_bytes_match_bs58_crate() {
    for len in [0usize, 1, 5, 20, 32, 64] {
        let mut payload = random_bytes(len);
        if len > 2 {
            payload[0] = 0;
            payload[1] = 0;
        }
        let ours = base58::check_encode_bytes(&payload);
        let theirs = bs58::encode(&payload).with_check().into_string();
        assert_eq!(ours, theirs);
        assert_eq!(base58::check_decode_bytes(&theirs).unwrap(), payload);
    }
}

#[test]
fn base58_numbers_match_bs58_crate() {
    for _ in 0..32 {
        let mut bytes = random_bytes(24);
        bytes[0] |= 1;
        let n = BigUint::from_bytes_be(&bytes);
        assert_eq!(base58::encode(&n), bs58::encode(&bytes).into_string());
        let back = base58::decode(&bs58::encode(&bytes).into_string()).unwrap();
        assert_eq!(back, n);
    }
}

#[test]
fn bs58_rejects_what_we_reject() {
    let good = base58::check_encode_bytes(b"cairn");
    let mut chars: Vec<char> = good.chars().collect();
    chars[2] = if chars[2] == 'z' { 'y' } else { 'z' };
    let bad: String = chars.into_iter().collect();
    assert!(base58::check_decode_bytes(&bad).is_err());
    assert!(bs58::decode(&bad).with_check(None).into_vec().is_err());
}
