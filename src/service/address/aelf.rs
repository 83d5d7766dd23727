//! AElf 地址推导
//!
//! 地址载荷为公钥的双 SHA-256，再按 Base58Check 风格追加校验和。

use crate::utils::hash::sha256d;

pub fn aelf_address(pubkey: &[u8]) -> String {
    let payload = sha256d(pubkey);
    let checksum = sha256d(&payload);
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&payload);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}
