//! 哈希原语封装
//!
//! 各链地址推导与消息摘要共用的哈希函数。

use blake2::digest::consts::U32;
use blake2::digest::{Update, VariableOutput};
use blake2::{Blake2b, Blake2b512, Blake2bVar, Digest};
use ripemd::Ripemd160;
use sha2::Sha256;
use sha3::Keccak256;

/// Blake2b-256（Sui 地址）
type Blake2b256 = Blake2b<U32>;

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// 双 SHA-256（Bitcoin 签名消息摘要与 Base58Check 校验和）
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// RIPEMD-160(SHA-256(data))，Bitcoin 系地址载荷
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

pub fn blake2b_512(data: &[u8]) -> [u8; 64] {
    Blake2b512::digest(data).into()
}

/// 变长 Blake2b（Filecoin 地址载荷 20 字节 / 校验和 4 字节）
///
/// 输出长度由调用方静态给定，1..=64 之外属编程错误。
pub fn blake2b_var(out_len: usize, data: &[u8]) -> Vec<u8> {
    let mut hasher = match Blake2bVar::new(out_len) {
        Ok(h) => h,
        Err(_) => return Vec::new(),
    };
    hasher.update(data);
    let mut out = vec![0u8; out_len];
    if hasher.finalize_variable(&mut out).is_err() {
        return Vec::new();
    }
    out
}
