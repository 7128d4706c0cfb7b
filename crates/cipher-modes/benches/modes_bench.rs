use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_core::{Aes128, Aes256, AesSmall128, AesSmall256, AesTiny128, AesTiny256};
use cipher_modes::{BlockCipher, Eax, Xts};

fn bench_tier<C: BlockCipher>(c: &mut Criterion, name: &str, cipher: C) {
    let mut group = c.benchmark_group(name);
    group.throughput(Throughput::Bytes(16));
    let mut block = [0u8; 16];
    ChaCha20Rng::from_seed([3u8; 32]).fill_bytes(&mut block);
    group.bench_function("encrypt_block", |b| {
        b.iter(|| cipher.encrypt_block(&mut block));
    });
    group.bench_function("decrypt_block", |b| {
        b.iter(|| cipher.decrypt_block(&mut block));
    });
    group.finish();
}

fn bench_aes(c: &mut Criterion) {
    let key = [0x2bu8; 32];
    bench_tier(c, "aes128_full", Aes128::with_key(&key[..16]).unwrap());
    bench_tier(c, "aes128_small", AesSmall128::with_key(&key[..16]).unwrap());
    bench_tier(c, "aes128_tiny", AesTiny128::with_key(&key[..16]).unwrap());
    bench_tier(c, "aes256_full", Aes256::with_key(&key).unwrap());
    bench_tier(c, "aes256_small", AesSmall256::with_key(&key).unwrap());
    bench_tier(c, "aes256_tiny", AesTiny256::with_key(&key).unwrap());
}

fn bench_modes(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
    let mut data = vec![0u8; 4096];
    rng.fill_bytes(&mut data);

    let mut group = c.benchmark_group("modes");
    group.throughput(Throughput::Bytes(data.len() as u64));

    let mut eax = Eax::<Aes128>::new();
    eax.set_key(&[1u8; 16]).unwrap();
    group.bench_function("eax_aes128_4k", |b| {
        b.iter(|| {
            eax.set_iv(&[0u8; 16]).unwrap();
            eax.encrypt_in_place(&mut data).unwrap();
            let mut tag = [0u8; 16];
            eax.compute_tag(&mut tag).unwrap();
        });
    });

    let mut xts = Xts::<Aes128>::new();
    xts.set_key(&[2u8; 32]).unwrap();
    xts.set_sector_size(4096).unwrap();
    group.bench_function("xts_aes128_4k", |b| {
        b.iter(|| {
            xts.set_sector_number(9);
            xts.encrypt_sector_in_place(&mut data).unwrap();
        });
    });

    let mut xts_tiny = Xts::<AesTiny128>::new();
    xts_tiny.set_key(&[2u8; 32]).unwrap();
    xts_tiny.set_sector_size(4096).unwrap();
    group.bench_function("xts_aes128_tiny_4k", |b| {
        b.iter(|| {
            xts_tiny.set_sector_number(9);
            xts_tiny.decrypt_sector_in_place(&mut data).unwrap();
        });
    });
    group.finish();
}

criterion_group!(benches, bench_aes, bench_modes);
criterion_main!(benches);
