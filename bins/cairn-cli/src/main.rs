//! cairn — command-line front end for the Cairn derivation pipeline.
//!
//! Every command reads its main input from stdin (raw bytes, hex or text,
//! as noted per command) and writes one result to stdout. Diagnostics go to
//! stderr through `tracing`.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_bigint::BigUint;
use serde::Serialize;
use tracing::debug;

use cairn_core::address::{checksum_encode, checksum_verify, Address};
use cairn_core::base58;
use cairn_core::crypto::{self, KeyPair, PublicKey};
use cairn_core::hash;
use cairn_wallet::{mnemonic, Dictionary, SeedParams};

/// Cairn: mnemonics, seeds, secp256k1 keys and checksummed addresses.
#[derive(Parser)]
#[command(name = "cairn")]
#[command(version, about = "Mnemonic, seed, key and address derivation.")]
struct Cli {
    /// Log level filter (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce sha256 or keccak256 digests of stdin.
    Hash {
        #[command(subcommand)]
        algorithm: HashAlgorithm,
    },
    /// Produce an HMAC-SHA512 of stdin.
    Mac {
        #[command(subcommand)]
        algorithm: MacAlgorithm,
    },
    /// Stretch a password read from stdin.
    Kdf {
        #[command(subcommand)]
        algorithm: KdfAlgorithm,
    },
    /// Base58 and Base58Check codecs over hex payloads.
    Base58 {
        #[command(subcommand)]
        action: Base58Action,
    },
    /// secp256k1 key pairs, signatures and addresses.
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Mnemonic generation, verification and seed derivation.
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
    /// Mixed-case address checksums.
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
}

#[derive(Subcommand)]
enum HashAlgorithm {
    /// stdin: raw data; stdout: hex SHA-256 digest.
    Sha256,
    /// stdin: raw data; stdout: hex Keccak-256 digest.
    Keccak256,
}

#[derive(Subcommand)]
enum MacAlgorithm {
    /// stdin: raw data; stdout: hex HMAC-SHA512.
    HmacSha512 {
        /// Authentication key.
        #[arg(long)]
        key: String,
    },
}

#[derive(Subcommand)]
enum KdfAlgorithm {
    /// stdin: password line; stdout: hex key.
    Pbkdf2Sha512 {
        /// Salt.
        #[arg(long)]
        salt: String,
        /// Number of HMAC-SHA512 iterations.
        #[arg(long)]
        iter: u32,
        /// Key length in bytes.
        #[arg(long)]
        keylen: usize,
    },
}

#[derive(Subcommand)]
enum Base58Action {
    /// stdin: hex integer; stdout: base58.
    Encode,
    /// stdin: base58; stdout: hex integer.
    Decode,
    /// stdin: hex payload; stdout: Base58Check.
    CheckEncode,
    /// stdin: Base58Check; stdout: hex payload.
    CheckDecode,
}

#[derive(Subcommand)]
enum KeyAction {
    /// stdout: a fresh key pair as JSON.
    Generate,
    /// stdin: hex private scalar; stdout: key pair as JSON.
    Derive,
    /// stdin: hex public key (64, 65 or 33 bytes); stdout: checksummed address.
    Address,
    /// stdin: hex 32-byte digest; stdout: hex 65-byte signature.
    Sign(SignArgs),
    /// stdin: hex 32-byte digest; stdout: true or false.
    Verify(VerifyArgs),
}

#[derive(Args)]
struct SignArgs {
    /// Hex private scalar.
    #[arg(long)]
    key: String,
}

#[derive(Args)]
struct VerifyArgs {
    /// Hex 65-byte signature.
    #[arg(long)]
    sig: String,

    /// Hex public key.
    #[arg(long = "pub")]
    public_key: String,
}

#[derive(Subcommand)]
enum SeedAction {
    /// stdout: a new mnemonic.
    Generate(SeedGenerateArgs),
    /// stdin: mnemonic; stdout: "valid", or an error naming the problem.
    Verify(DictionaryArgs),
    /// stdin: mnemonic; stdout: hex 64-byte seed.
    Derive(SeedDeriveArgs),
    /// stdin: mnemonic; stdout: master key strings and address as JSON.
    Master(SeedDeriveArgs),
}

#[derive(Args)]
struct DictionaryArgs {
    /// Word list file, one word per line (default: built-in English list).
    #[arg(long)]
    dictionary: Option<PathBuf>,
}

#[derive(Args)]
struct SeedGenerateArgs {
    /// Entropy size in bits (128, 160, 192, 224 or 256).
    #[arg(long, default_value_t = 256)]
    bits: usize,

    /// Read hex entropy from stdin instead of the OS RNG.
    #[arg(long)]
    entropy: bool,

    #[command(flatten)]
    dictionary: DictionaryArgs,
}

#[derive(Args)]
struct SeedDeriveArgs {
    /// Optional passphrase mixed into the salt.
    #[arg(long, default_value = "")]
    passphrase: String,

    /// PBKDF2 iteration count (at least 1).
    #[arg(
        long,
        default_value_t = cairn_wallet::config::SEED_ITERATIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    iter: u32,
}

#[derive(Subcommand)]
enum AddressAction {
    /// stdin: hex address; stdout: checksummed address.
    Encode,
    /// stdin: checksummed address; stdout: "valid", or an error.
    Verify,
}

/// Key pair rendering for `key generate` / `key derive`.
#[derive(Serialize)]
struct KeyPairOutput {
    curve: &'static str,
    prv: String,
    #[serde(rename = "pub")]
    public_key: PublicKey,
    address: Address,
}

impl From<&KeyPair> for KeyPairOutput {
    fn from(kp: &KeyPair) -> Self {
        Self {
            curve: kp.curve(),
            prv: hex::encode(kp.secret_bytes()),
            public_key: kp.public_key(),
            address: kp.address(),
        }
    }
}

/// Master key rendering for `seed master`.
#[derive(Serialize)]
struct MasterKeyOutput {
    xprv: String,
    xpub: String,
    address: Address,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Hash { algorithm } => hash_command(algorithm),
        Commands::Mac { algorithm } => mac_command(algorithm),
        Commands::Kdf { algorithm } => kdf_command(algorithm),
        Commands::Base58 { action } => base58_command(action),
        Commands::Key { action } => key_command(action),
        Commands::Seed { action } => seed_command(action),
        Commands::Address { action } => address_command(action),
    }
}

fn hash_command(algorithm: HashAlgorithm) -> Result<()> {
    let data = read_stdin_bytes()?;
    let digest = match algorithm {
        HashAlgorithm::Sha256 => hash::sha256(&data),
        HashAlgorithm::Keccak256 => hash::keccak256(&data),
    };
    println!("{}", hex::encode(digest));
    Ok(())
}

fn mac_command(algorithm: MacAlgorithm) -> Result<()> {
    let MacAlgorithm::HmacSha512 { key } = algorithm;
    let data = read_stdin_bytes()?;
    println!("{}", hex::encode(hash::hmac_sha512(key.as_bytes(), &data)));
    Ok(())
}

fn kdf_command(algorithm: KdfAlgorithm) -> Result<()> {
    let KdfAlgorithm::Pbkdf2Sha512 { salt, iter, keylen } = algorithm;
    if iter == 0 {
        bail!("--iter must be at least 1");
    }
    let password = read_stdin_line()?;
    let key = hash::pbkdf2_sha512(password.as_bytes(), salt.as_bytes(), iter, keylen);
    println!("{}", hex::encode(key));
    Ok(())
}

fn base58_command(action: Base58Action) -> Result<()> {
    let input = read_stdin_line()?;
    let output = match action {
        Base58Action::Encode => base58::encode(&BigUint::from_bytes_be(&parse_hex(&input)?)),
        Base58Action::Decode => base58::decode(&input)?.to_str_radix(16),
        Base58Action::CheckEncode => base58::check_encode_bytes(&parse_hex(&input)?),
        Base58Action::CheckDecode => hex::encode(base58::check_decode_bytes(&input)?),
    };
    println!("{output}");
    Ok(())
}

fn key_command(action: KeyAction) -> Result<()> {
    match action {
        KeyAction::Generate => print_key_pair(&KeyPair::generate()),
        KeyAction::Derive => {
            let scalar = parse_hex(&read_stdin_line()?)?;
            let kp = KeyPair::derive(&scalar).context("Failed to derive key pair")?;
            print_key_pair(&kp)
        }
        KeyAction::Address => {
            let bytes = parse_hex(&read_stdin_line()?)?;
            let address =
                Address::from_public_key_bytes(&bytes).context("Failed to parse public key")?;
            println!("{address}");
            Ok(())
        }
        KeyAction::Sign(args) => {
            let kp = KeyPair::derive(&parse_hex(&args.key)?).context("Invalid --key")?;
            let digest = parse_digest(&read_stdin_line()?)?;
            println!("{}", hex::encode(kp.sign(&digest)?));
            Ok(())
        }
        KeyAction::Verify(args) => {
            let digest = parse_digest(&read_stdin_line()?)?;
            let signature = parse_hex(&args.sig)?;
            let public_key =
                PublicKey::from_bytes(&parse_hex(&args.public_key)?).context("Invalid --pub")?;
            println!("{}", crypto::verify(&digest, &signature, &public_key));
            Ok(())
        }
    }
}

fn seed_command(action: SeedAction) -> Result<()> {
    match action {
        SeedAction::Generate(args) => {
            let dict = load_dictionary(&args.dictionary)?;
            let entropy = if args.entropy {
                Some(parse_hex(&read_stdin_line()?)?)
            } else {
                None
            };
            let phrase = mnemonic::generate(&dict, args.bits, entropy.as_deref())?;
            println!("{phrase}");
            Ok(())
        }
        SeedAction::Verify(args) => {
            let dict = load_dictionary(&args)?;
            mnemonic::verify(&dict, &read_stdin_line()?)?;
            println!("valid");
            Ok(())
        }
        SeedAction::Derive(args) => {
            let seed = derive_seed_from_stdin(&args)?;
            println!("{}", hex::encode(seed.as_bytes()));
            Ok(())
        }
        SeedAction::Master(args) => {
            let master = derive_seed_from_stdin(&args)?.master_key()?;
            let output = MasterKeyOutput {
                xprv: master.to_extended_private_string(),
                xpub: master.to_extended_public_string(),
                address: master.key_pair().address(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
    }
}

fn address_command(action: AddressAction) -> Result<()> {
    let input = read_stdin_line()?;
    match action {
        AddressAction::Encode => println!("{}", checksum_encode(&input)?),
        AddressAction::Verify => {
            checksum_verify(&input)?;
            println!("valid");
        }
    }
    Ok(())
}

fn print_key_pair(kp: &KeyPair) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&KeyPairOutput::from(kp))?);
    Ok(())
}

fn derive_seed_from_stdin(args: &SeedDeriveArgs) -> Result<cairn_wallet::Seed> {
    let phrase = read_stdin_line()?;
    let params = SeedParams {
        iterations: args.iter,
        ..SeedParams::default()
    };
    Ok(mnemonic::derive_seed_with(&phrase, &args.passphrase, &params)?)
}

fn load_dictionary(args: &DictionaryArgs) -> Result<Dictionary> {
    match &args.dictionary {
        Some(path) => Dictionary::load(path)
            .with_context(|| format!("Failed to load dictionary: {}", path.display())),
        None => Ok(Dictionary::english()),
    }
}

fn read_stdin_bytes() -> Result<Vec<u8>> {
    let mut data = Vec::new();
    io::stdin()
        .read_to_end(&mut data)
        .context("Failed to read stdin")?;
    debug!(len = data.len(), "read stdin");
    Ok(data)
}

/// Read stdin as UTF-8 with the trailing line terminator removed.
fn read_stdin_line() -> Result<String> {
    let data = String::from_utf8(read_stdin_bytes()?).context("stdin is not valid UTF-8")?;
    Ok(data.trim_end_matches(['\n', '\r']).to_string())
}

fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).with_context(|| format!("Invalid hex input: {s:?}"))
}

fn parse_digest(s: &str) -> Result<[u8; 32]> {
    let bytes = parse_hex(s)?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("Digest must be 32 bytes, got {}", b.len()))
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` takes
/// precedence over `--log-level`.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .init(),
    }
}
