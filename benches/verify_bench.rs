//! 核验性能基准测试
//! 使用criterion进行性能测试

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ironproof::prelude::*;
use ironproof::service::address::evm::eth_address;
use ironproof::service::digest::evm_personal_digest;
use k256::ecdsa::SigningKey;

fn bench_evm_verification(c: &mut Criterion) {
    let key = SigningKey::random(&mut rand::thread_rng());
    let pubkey = key.verifying_key().to_encoded_point(false);
    let addr = eth_address(pubkey.as_bytes()).unwrap();

    let message = "proof of reserves challenge";
    let digest = evm_personal_digest(Coin::Eth.message_header(), message);
    let (sig, recid) = key.sign_prehash_recoverable(&digest).unwrap();
    let mut raw = sig.to_bytes().to_vec();
    raw.push(recid.to_byte() + 27);
    let sig_hex = hex::encode(raw);

    c.bench_function("verify_evm_coin_eth", |b| {
        b.iter(|| {
            ProofVerifier::verify_evm_coin(
                black_box("ETH"),
                black_box(&addr),
                black_box(message),
                black_box(&sig_hex),
            )
        })
    });
}

fn bench_evm_digest(c: &mut Criterion) {
    c.bench_function("evm_personal_digest", |b| {
        b.iter(|| {
            evm_personal_digest(
                black_box(Coin::Eth.message_header()),
                black_box("proof of reserves challenge"),
            )
        })
    });
}

criterion_group!(benches, bench_evm_verification, bench_evm_digest);
criterion_main!(benches);
