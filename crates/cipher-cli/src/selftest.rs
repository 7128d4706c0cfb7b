//! Known-answer tests run by the `selftest` command.

use aes_core::{Aes128, Aes192, Aes256, AesSmall128, AesSmall256, AesTiny128, AesTiny256};
use anyhow::{ensure, Context, Result};
use cipher_modes::{Block, BlockCipher, Eax, Xts};
use tracing::info;

/// FIPS-197 Appendix C plaintext.
const FIPS_PLAIN: &str = "00112233445566778899aabbccddeeff";

const FIPS_128: (&str, &str) = (
    "000102030405060708090a0b0c0d0e0f",
    "69c4e0d86a7b0430d8cdb78070b4c55a",
);
const FIPS_192: (&str, &str) = (
    "000102030405060708090a0b0c0d0e0f1011121314151617",
    "dda97ca4864cdfe06eaf70a0ec0d7191",
);
const FIPS_256: (&str, &str) = (
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
    "8ea2b7ca516745bfeafc49904b496089",
);

/// Runs every check, failing on the first mismatch.
pub fn run() -> Result<()> {
    check_block::<Aes128>("aes128", FIPS_128)?;
    check_block::<AesTiny128>("tiny128", FIPS_128)?;
    check_block::<AesSmall128>("small128", FIPS_128)?;
    check_block::<Aes192>("aes192", FIPS_192)?;
    check_block::<Aes256>("aes256", FIPS_256)?;
    check_block::<AesTiny256>("tiny256", FIPS_256)?;
    check_block::<AesSmall256>("small256", FIPS_256)?;
    check_eax()?;
    check_xts()?;
    Ok(())
}

fn decode_block(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str)?;
    Block::try_from(bytes.as_slice()).context("block vector must be 16 bytes")
}

fn check_block<C: BlockCipher + Default>(
    name: &str,
    (key_hex, expected_hex): (&str, &str),
) -> Result<()> {
    let key = hex::decode(key_hex)?;
    let plain = decode_block(FIPS_PLAIN)?;
    let expected = decode_block(expected_hex)?;

    let mut cipher = C::default();
    cipher.set_key(&key)?;
    let mut block = plain;
    cipher.encrypt_block(&mut block);
    ensure!(block == expected, "{name}: encryption mismatch");
    cipher.decrypt_block(&mut block);
    ensure!(block == plain, "{name}: decryption mismatch");
    cipher.clear();
    info!(cipher = name, "block vector ok");
    Ok(())
}

fn check_eax() -> Result<()> {
    let key = hex::decode("01f74ad64077f2e704c0f60ada3dd523")?;
    let nonce = hex::decode("70c3db4f0d26368400a10ed05d2bff5e")?;
    let header = hex::decode("234a3463c1264ac6")?;
    let msg = hex::decode("1a47cb4933")?;
    let expected_ct = hex::decode("d851d5bae0")?;
    let expected_tag = hex::decode("3a59f238a23e39199dc9266626c40f80")?;

    let mut eax = Eax::<AesTiny128>::new();
    eax.set_key(&key)?;
    eax.set_iv(&nonce)?;
    eax.add_auth_data(&header)?;
    let mut buf = msg.clone();
    eax.encrypt_in_place(&mut buf)?;
    let mut tag = [0u8; 16];
    eax.compute_tag(&mut tag)?;
    ensure!(buf == expected_ct, "eax: ciphertext mismatch");
    ensure!(tag[..] == expected_tag[..], "eax: tag mismatch");

    eax.set_iv(&nonce)?;
    eax.add_auth_data(&header)?;
    eax.decrypt_in_place(&mut buf)?;
    ensure!(eax.check_tag(&expected_tag), "eax: tag rejected");
    ensure!(buf == msg, "eax: decryption mismatch");
    eax.clear();
    info!("eax vector ok");
    Ok(())
}

fn check_xts() -> Result<()> {
    let key = hex::decode(
        "fffefdfcfbfaf9f8f7f6f5f4f3f2f1f022222222222222222222222222222222",
    )?;
    let plain = [0x44u8; 32];
    let expected =
        hex::decode("af85336b597afc1a900b2eb21ec949d292df4c047e0b21532186a5971a227a89")?;

    let mut xts = Xts::<AesSmall128>::new();
    xts.set_key(&key)?;
    xts.set_sector_size(32)?;
    xts.set_sector_number(0x33_3333_3333);
    let mut sector = plain;
    xts.encrypt_sector_in_place(&mut sector)?;
    ensure!(sector[..] == expected[..], "xts: ciphertext mismatch");
    xts.decrypt_sector_in_place(&mut sector)?;
    ensure!(sector == plain, "xts: decryption mismatch");
    xts.clear();
    info!("xts vector ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn all_known_answers_pass() {
        super::run().unwrap();
    }
}
