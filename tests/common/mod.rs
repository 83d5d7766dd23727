//! 测试辅助模块
//! 提供签名构造等测试工具

use base64::engine::general_purpose::STANDARD as BASE64_STD;
use base64::Engine as _;
use k256::ecdsa::SigningKey;

/// 初始化测试日志（重复调用安全）
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ironproof=debug")
        .try_init();
}

/// 生成随机 secp256k1 私钥
#[allow(dead_code)]
pub fn random_secp_key() -> SigningKey {
    SigningKey::random(&mut rand::thread_rng())
}

/// EVM 风格签名：hex(r || s || v+27)
#[allow(dead_code)]
pub fn evm_sign_hex(key: &SigningKey, digest: &[u8; 32]) -> String {
    let (sig, recid) = key.sign_prehash_recoverable(digest).expect("sign");
    let mut raw = sig.to_bytes().to_vec();
    raw.push(recid.to_byte() + 27);
    hex::encode(raw)
}

/// Bitcoin compact 签名：base64(header || r || s)，压缩公钥形式
#[allow(dead_code)]
pub fn compact_sign_b64(key: &SigningKey, digest: &[u8; 32]) -> String {
    let (sig, recid) = key.sign_prehash_recoverable(digest).expect("sign");
    let mut raw = vec![27 + recid.to_byte() + 4];
    raw.extend_from_slice(&sig.to_bytes());
    BASE64_STD.encode(raw)
}

/// 非压缩 SEC1 公钥
#[allow(dead_code)]
pub fn uncompressed_pubkey(key: &SigningKey) -> Vec<u8> {
    key.verifying_key().to_encoded_point(false).as_bytes().to_vec()
}

/// 压缩 SEC1 公钥
#[allow(dead_code)]
pub fn compressed_pubkey(key: &SigningKey) -> Vec<u8> {
    key.verifying_key().to_encoded_point(true).as_bytes().to_vec()
}

/// 随机 ed25519 私钥
#[allow(dead_code)]
pub fn random_ed25519_key() -> ed25519_dalek::SigningKey {
    let mut seed = [0u8; 32];
    rand::Rng::fill(&mut rand::thread_rng(), &mut seed);
    ed25519_dalek::SigningKey::from_bytes(&seed)
}

/// 翻转十六进制字符串中的一个字符（保持仍是合法 hex）
#[allow(dead_code)]
pub fn flip_hex_char(s: &str, index: usize) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    chars[index] = if chars[index] == '0' { '1' } else { '0' };
    chars.into_iter().collect()
}
