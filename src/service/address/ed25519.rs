//! ed25519 系地址推导（Solana / Aptos / Sui / Polkadot）

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::hash::{blake2b_256, blake2b_512, sha256};

/// Aptos 短地址形式：0x 后的前导零 nibble 折叠
static APTOS_SHORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^0x0*").expect("static regex"));

/// SS58 校验和域分隔前缀
const SS58_PREFIX: &[u8] = b"SS58PRE";
/// Polkadot 主网网络前缀
const DOT_NETWORK: u8 = 0;

/// Solana：原始公钥的 Base58，无校验和
pub fn sol_address(pubkey: &[u8; 32]) -> String {
    bs58::encode(pubkey).into_string()
}

/// Aptos：sha256(pubkey || 0x00) 的十六进制，长短两种展示形式都是有效候选
pub fn aptos_addresses(pubkey: &[u8]) -> Vec<String> {
    let mut preimage = pubkey.to_vec();
    preimage.push(0x00); // 单签名方案标记
    let long = format!("0x{}", hex::encode(sha256(&preimage)));
    let short = APTOS_SHORT_RE.replace(&long, "0x").into_owned();
    vec![short, long]
}

/// Sui：blake2b256(0x00 方案字节 || pubkey) 的前 64 个十六进制字符
pub fn sui_address(pubkey: &[u8; 32]) -> String {
    let mut preimage = [0u8; 33];
    preimage[1..].copy_from_slice(pubkey);
    let hash = blake2b_256(&preimage);
    format!("0x{}", &hex::encode(hash)[..64])
}

/// Polkadot：SS58 编码，校验和为 blake2b512("SS58PRE" || prefix || pubkey) 前两字节
pub fn dot_address(pubkey: &[u8; 32]) -> String {
    let mut body = Vec::with_capacity(1 + 32 + 2);
    body.push(DOT_NETWORK);
    body.extend_from_slice(pubkey);

    let mut preimage = SS58_PREFIX.to_vec();
    preimage.extend_from_slice(&body);
    let checksum = blake2b_512(&preimage);
    body.extend_from_slice(&checksum[..2]);
    bs58::encode(body).into_string()
}
