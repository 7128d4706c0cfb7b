//! Command-line interface for the embedded cipher workspace.

#![forbid(unsafe_code)]

mod selftest;

use std::fs;
use std::path::{Path, PathBuf};

use aes_core::{Aes128, Aes192, Aes256, AesSmall128, AesSmall256, AesTiny128, AesTiny256};
use anyhow::{bail, ensure, Context, Result};
use cipher_modes::{BlockCipher, Eax, Xts, DEFAULT_SECTOR_SIZE};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

/// XTS sector encryption and EAX sealing with selectable AES tiers.
#[derive(Parser)]
#[command(name = "embcrypt", version, author, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a disk image sector by sector with XTS.
    XtsEncrypt(XtsArgs),
    /// Decrypt a disk image sector by sector with XTS.
    XtsDecrypt(XtsArgs),
    /// Encrypt and authenticate a file with EAX; writes ciphertext || tag.
    EaxSeal(EaxArgs),
    /// Verify and decrypt a file sealed with `eax-seal`.
    EaxOpen(EaxArgs),
    /// Run the built-in known-answer tests.
    Selftest,
    /// Generate random data, then round-trip it through EAX and XTS.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// AES implementation to run underneath the mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CipherKind {
    Aes128,
    Aes192,
    Aes256,
    Tiny128,
    Small128,
    Tiny256,
    Small256,
}

#[derive(Args)]
struct XtsArgs {
    /// Data key followed by tweak key, as hex.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// Input image (length must be a multiple of the sector size).
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output image path.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
    /// Sector size in bytes.
    #[arg(long, default_value_t = DEFAULT_SECTOR_SIZE)]
    sector_size: usize,
    /// Sector number of the first sector in the file.
    #[arg(long, default_value_t = 0)]
    first_sector: u64,
    /// Block cipher implementation.
    #[arg(long, value_enum, default_value_t = CipherKind::Aes128)]
    cipher: CipherKind,
}

#[derive(Args)]
struct EaxArgs {
    /// Cipher key as hex.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// Nonce as hex (must not be empty, never reuse with the same key).
    #[arg(long, value_name = "HEX")]
    nonce_hex: String,
    /// Associated data as hex.
    #[arg(long, value_name = "HEX", default_value = "")]
    ad_hex: String,
    /// Input file.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
    /// Block cipher implementation.
    #[arg(long, value_enum, default_value_t = CipherKind::Aes128)]
    cipher: CipherKind,
}

/// Runs `$func::<C>(args..)` with `C` chosen by a [`CipherKind`].
macro_rules! with_cipher {
    ($kind:expr, $func:ident($($arg:expr),*)) => {
        match $kind {
            CipherKind::Aes128 => $func::<Aes128>($($arg),*),
            CipherKind::Aes192 => $func::<Aes192>($($arg),*),
            CipherKind::Aes256 => $func::<Aes256>($($arg),*),
            CipherKind::Tiny128 => $func::<AesTiny128>($($arg),*),
            CipherKind::Small128 => $func::<AesSmall128>($($arg),*),
            CipherKind::Tiny256 => $func::<AesTiny256>($($arg),*),
            CipherKind::Small256 => $func::<AesSmall256>($($arg),*),
        }
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::XtsEncrypt(args) => with_cipher!(args.cipher, cmd_xts(&args, Direction::Encrypt)),
        Commands::XtsDecrypt(args) => with_cipher!(args.cipher, cmd_xts(&args, Direction::Decrypt)),
        Commands::EaxSeal(args) => with_cipher!(args.cipher, cmd_eax_seal(&args)),
        Commands::EaxOpen(args) => with_cipher!(args.cipher, cmd_eax_open(&args)),
        Commands::Selftest => {
            selftest::run()?;
            println!("selftest passed");
            Ok(())
        }
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_xts<C: BlockCipher + Clone + Default>(args: &XtsArgs, direction: Direction) -> Result<()> {
    let key = parse_hex(&args.key_hex, "key")?;
    let mut data =
        fs::read(&args.input).with_context(|| format!("read {}", args.input.display()))?;
    xts_image::<C>(&key, &mut data, args.sector_size, args.first_sector, direction)?;
    write_output(&args.output, &data)?;
    info!(
        sectors = data.len() / args.sector_size,
        cipher = ?args.cipher,
        ?direction,
        "xts image processed"
    );
    Ok(())
}

/// Applies XTS to every sector of `image`; sector `n` uses tweak
/// `first_sector + n`.
fn xts_image<C: BlockCipher + Clone + Default>(
    key: &[u8],
    image: &mut [u8],
    sector_size: usize,
    first_sector: u64,
    direction: Direction,
) -> Result<()> {
    let mut xts = Xts::<C>::new();
    xts.set_key(key).context("set XTS key")?;
    xts.set_sector_size(sector_size).context("set sector size")?;
    ensure!(
        image.len() % sector_size == 0,
        "input length {} is not a multiple of the {sector_size}-byte sector size",
        image.len()
    );

    for (index, sector) in image.chunks_mut(sector_size).enumerate() {
        let number = first_sector
            .checked_add(index as u64)
            .context("sector number overflow")?;
        xts.set_sector_number(number);
        match direction {
            Direction::Encrypt => xts.encrypt_sector_in_place(sector)?,
            Direction::Decrypt => xts.decrypt_sector_in_place(sector)?,
        }
        debug!(sector = number, "sector done");
    }
    xts.clear();
    Ok(())
}

fn cmd_eax_seal<C: BlockCipher + Default>(args: &EaxArgs) -> Result<()> {
    let key = parse_hex(&args.key_hex, "key")?;
    let nonce = hex::decode(args.nonce_hex.trim()).context("decode nonce hex")?;
    let ad = hex::decode(args.ad_hex.trim()).context("decode associated data hex")?;
    let data = fs::read(&args.input).with_context(|| format!("read {}", args.input.display()))?;
    let sealed = eax_seal::<C>(&key, &nonce, &ad, &data)?;
    write_output(&args.output, &sealed)?;
    info!(bytes = data.len(), cipher = ?args.cipher, "sealed");
    Ok(())
}

fn cmd_eax_open<C: BlockCipher + Default>(args: &EaxArgs) -> Result<()> {
    let key = parse_hex(&args.key_hex, "key")?;
    let nonce = hex::decode(args.nonce_hex.trim()).context("decode nonce hex")?;
    let ad = hex::decode(args.ad_hex.trim()).context("decode associated data hex")?;
    let data = fs::read(&args.input).with_context(|| format!("read {}", args.input.display()))?;
    let plain = eax_open::<C>(&key, &nonce, &ad, &data)?;
    write_output(&args.output, &plain)?;
    info!(bytes = plain.len(), cipher = ?args.cipher, "opened");
    Ok(())
}

fn eax_seal<C: BlockCipher + Default>(
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    data: &[u8],
) -> Result<Vec<u8>> {
    let mut eax = Eax::<C>::new();
    eax.set_key(key).context("set EAX key")?;
    eax.set_iv(nonce).context("set EAX nonce")?;
    eax.add_auth_data(ad)?;

    let mut sealed = Vec::with_capacity(data.len() + eax.tag_size());
    sealed.extend_from_slice(data);
    eax.encrypt_in_place(&mut sealed)?;
    let mut tag = [0u8; 16];
    eax.compute_tag(&mut tag)?;
    sealed.extend_from_slice(&tag);
    eax.clear();
    Ok(sealed)
}

/// Returns the plaintext only when the tag verifies.
fn eax_open<C: BlockCipher + Default>(
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    sealed: &[u8],
) -> Result<Vec<u8>> {
    let mut eax = Eax::<C>::new();
    ensure!(
        sealed.len() >= eax.tag_size(),
        "input is shorter than the {}-byte tag",
        eax.tag_size()
    );
    eax.set_key(key).context("set EAX key")?;
    eax.set_iv(nonce).context("set EAX nonce")?;
    eax.add_auth_data(ad)?;

    let (ciphertext, tag) = sealed.split_at(sealed.len() - eax.tag_size());
    let mut plain = Zeroizing::new(ciphertext.to_vec());
    eax.decrypt_in_place(&mut plain)?;
    let authentic = eax.check_tag(tag);
    eax.clear();
    if !authentic {
        bail!("authentication failed; ciphertext rejected");
    }
    Ok(plain.to_vec())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = Zeroizing::new([0u8; 32]);
    let mut nonce = [0u8; 16];
    let mut message = [0u8; 48];
    rng.fill_bytes(&mut key[..]);
    rng.fill_bytes(&mut nonce);
    rng.fill_bytes(&mut message);

    let sealed = eax_seal::<AesSmall128>(&key[..16], &nonce, b"demo", &message)?;
    let opened = eax_open::<AesTiny128>(&key[..16], &nonce, b"demo", &sealed)?;
    println!("eax key:     {}", hex::encode(&key[..16]));
    println!("eax nonce:   {}", hex::encode(nonce));
    println!("plaintext:   {}", hex::encode(message));
    println!("sealed:      {}", hex::encode(&sealed));
    if opened != message {
        bail!("EAX demo round trip failed");
    }

    let mut image = vec![0u8; 2 * DEFAULT_SECTOR_SIZE];
    rng.fill_bytes(&mut image);
    let original = image.clone();
    xts_image::<Aes128>(&key[..], &mut image, DEFAULT_SECTOR_SIZE, 40, Direction::Encrypt)?;
    println!("xts key:     {}", hex::encode(&key[..]));
    println!("sector 40:   {}...", hex::encode(&image[..32]));
    xts_image::<AesSmall128>(&key[..], &mut image, DEFAULT_SECTOR_SIZE, 40, Direction::Decrypt)?;
    if image != original {
        bail!("XTS demo round trip failed");
    }
    println!("demo round trips succeeded");
    Ok(())
}

fn parse_hex(hex_str: &str, what: &str) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))?;
    Ok(Zeroizing::new(bytes))
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("write {}", path.display()))
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn xts_image_round_trip_across_tiers() {
        let key = [0x5cu8; 32];
        let mut image = vec![0u8; 4 * 512];
        seeded_rng(Some(1)).fill_bytes(&mut image);
        let original = image.clone();

        xts_image::<Aes128>(&key, &mut image, 512, 10, Direction::Encrypt).unwrap();
        assert_ne!(image, original);
        xts_image::<AesTiny128>(&key, &mut image, 512, 10, Direction::Decrypt).unwrap();
        assert_eq!(image, original);
    }

    #[test]
    fn xts_image_rejects_partial_sectors() {
        let mut image = vec![0u8; 700];
        let err = xts_image::<Aes128>(&[0u8; 32], &mut image, 512, 0, Direction::Encrypt)
            .unwrap_err();
        assert!(err.to_string().contains("multiple"));
        assert!(xts_image::<Aes128>(&[0u8; 31], &mut image, 512, 0, Direction::Encrypt).is_err());
    }

    #[test]
    fn eax_seal_open_and_reject() {
        let key = [7u8; 32];
        let sealed = eax_seal::<Aes256>(&key, b"nonce", b"ad", b"payload").unwrap();
        assert_eq!(sealed.len(), 7 + 16);
        let opened = eax_open::<AesSmall256>(&key, b"nonce", b"ad", &sealed).unwrap();
        assert_eq!(opened, b"payload");

        let mut tampered = sealed.clone();
        tampered[0] ^= 0x80;
        assert!(eax_open::<Aes256>(&key, b"nonce", b"ad", &tampered).is_err());
        assert!(eax_open::<Aes256>(&key, b"nonce", b"ad", &sealed[..10]).is_err());
    }

    #[test]
    fn eax_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.bin");
        let sealed = dir.path().join("sealed.bin");
        let opened = dir.path().join("opened.bin");
        fs::write(&plain, b"file contents to protect").unwrap();

        let args = |input: &Path, output: &Path| EaxArgs {
            key_hex: "000102030405060708090a0b0c0d0e0f".into(),
            nonce_hex: "a0a1a2a3".into(),
            ad_hex: "ff".into(),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            cipher: CipherKind::Tiny128,
        };
        cmd_eax_seal::<AesTiny128>(&args(&plain, &sealed)).unwrap();
        cmd_eax_open::<Aes128>(&args(&sealed, &opened)).unwrap();
        assert_eq!(fs::read(&opened).unwrap(), b"file contents to protect");
    }

    #[test]
    fn demo_is_reproducible() {
        cmd_demo(Some(42)).unwrap();
    }
}
