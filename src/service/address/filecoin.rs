//! Filecoin 地址推导
//!
//! f1：secp256k1 公钥地址（协议 1），载荷为 Blake2b-160(公钥)；
//! f410：EVM 账户的委托地址（协议 4，执行者 10）。
//! 校验和一律是对 协议字节 || 载荷 的 Blake2b-32bit。

use crate::error::VerifyError;
use crate::utils::codec::base32_encode_nopad;
use crate::utils::hash::blake2b_var;

/// RFC4648 小写字母表，无填充
const FIL_BASE32_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

const PROTOCOL_SECP256K1: u8 = 1;
const PROTOCOL_DELEGATED: u8 = 4;
/// EVM 兼容层的执行者 ID（varint 编码恰好单字节）
const EAM_ACTOR_ID: u8 = 10;

/// f1 地址：f1 + base32(payload || checksum)
pub fn f1_address(uncompressed: &[u8]) -> Result<String, VerifyError> {
    let payload = blake2b_var(20, uncompressed);
    if payload.len() != 20 {
        return Err(VerifyError::Internal("blake2b-160 output size".into()));
    }
    let mut preimage = Vec::with_capacity(21);
    preimage.push(PROTOCOL_SECP256K1);
    preimage.extend_from_slice(&payload);
    let checksum = blake2b_var(4, &preimage);

    let mut body = payload;
    body.extend_from_slice(&checksum);
    Ok(format!(
        "f{}{}",
        PROTOCOL_SECP256K1,
        base32_encode_nopad(FIL_BASE32_ALPHABET, &body)
    ))
}

/// f410 地址：EVM 地址字节作为子地址，f410f + base32(subaddr || checksum)
pub fn f410_address(eth_addr: &[u8; 20]) -> String {
    let mut preimage = Vec::with_capacity(22);
    preimage.push(PROTOCOL_DELEGATED);
    preimage.push(EAM_ACTOR_ID);
    preimage.extend_from_slice(eth_addr);
    let checksum = blake2b_var(4, &preimage);

    let mut body = eth_addr.to_vec();
    body.extend_from_slice(&checksum);
    format!(
        "f{}{}f{}",
        PROTOCOL_DELEGATED,
        EAM_ACTOR_ID,
        base32_encode_nopad(FIL_BASE32_ALPHABET, &body)
    )
}
