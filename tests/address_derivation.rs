//! 地址推导行为测试
//!
//! 候选地址集合的形状与注册表完备性，独立于签名路径验证。

mod common;

use common::*;
use ed25519_dalek::Signer as _;
use ironproof::prelude::*;
use ironproof::service::address::ed25519::aptos_addresses;
use ironproof::service::address::ton::ton_addresses;
use ironproof::service::digest::ed25519_payload;

/// 每个注册币种都有完整的注册表条目
#[test]
fn test_registry_completeness() {
    for coin in Coin::ALL {
        let _ = coin.sig_family();
        let _ = coin.address_family();
        let _ = coin.message_header();
        assert_eq!(
            coin.utxo_network().is_some(),
            coin.address_family() == AddressFamily::Utxo,
            "{} network params inconsistent",
            coin
        );
    }
}

/// TON：一把公钥恰好给出四个候选（两种钱包 × 两种弹回标志），
/// 任一候选作为声称地址都能核验通过
#[test]
fn test_ton_exactly_four_candidates_all_verify() {
    let key = random_ed25519_key();
    let pubkey = key.verifying_key().to_bytes();

    let candidates = ton_addresses(&pubkey);
    assert_eq!(candidates.len(), 4);
    let unique: std::collections::HashSet<_> = candidates.iter().collect();
    assert_eq!(unique.len(), 4, "candidates must be distinct");

    let payload = ed25519_payload("", "ton attestation");
    let sig_hex = hex::encode(key.sign(&payload).to_bytes());
    let pubkey_hex = hex::encode(pubkey);

    for addr in &candidates {
        ProofVerifier::verify_ed25519_coin("TON", addr, "ton attestation", &sig_hex, &pubkey_hex)
            .unwrap_or_else(|e| panic!("candidate {} rejected: {}", addr, e));
    }

    // 不在候选集合里的地址被拒
    let other = ton_addresses(&random_ed25519_key().verifying_key().to_bytes());
    let err = ProofVerifier::verify_ed25519_coin(
        "TON",
        &other[0],
        "ton attestation",
        &sig_hex,
        &pubkey_hex,
    )
    .unwrap_err();
    assert_eq!(err.code(), "address_mismatch");
}

/// Aptos：长短两种展示形式都是有效候选
#[test]
fn test_aptos_short_and_long_forms_verify() {
    let key = random_ed25519_key();
    let pubkey = key.verifying_key().to_bytes();

    let candidates = aptos_addresses(&pubkey);
    assert_eq!(candidates.len(), 2);

    let payload = ed25519_payload("", "aptos attestation");
    let sig_hex = hex::encode(key.sign(&payload).to_bytes());
    let pubkey_hex = hex::encode(pubkey);

    for addr in &candidates {
        ProofVerifier::verify_ed25519_coin("APT", addr, "aptos attestation", &sig_hex, &pubkey_hex)
            .unwrap_or_else(|e| panic!("candidate {} rejected: {}", addr, e));
    }
}

/// 入口对未知币种统一返回 unsupported_coin
#[test]
fn test_unknown_ticker_rejected_everywhere() {
    let outcomes = [
        ProofVerifier::verify_evm_coin("DOGE2", "a", "m", "00"),
        ProofVerifier::verify_ecdsa_coin("DOGE2", "a", "m", "00"),
        ProofVerifier::verify_ed25519_coin("DOGE2", "a", "m", "00", "00"),
        ProofVerifier::verify_utxo_coin("DOGE2", "a", "m", None, None, None),
        ProofVerifier::verify_stark_coin("DOGE2", "a", "m", "00", "00"),
        ProofVerifier::verify_bls_coin("DOGE2", "a", "m", "00"),
    ];
    for outcome in outcomes {
        assert_eq!(outcome.unwrap_err().code(), "unsupported_coin");
    }
}
