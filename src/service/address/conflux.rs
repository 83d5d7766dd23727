//! Conflux CIP-37 地址推导
//!
//! 从 ETH 风格地址出发：首 nibble 置 1（用户账户类型），
//! 加版本字节 0x00 后按 CIP-37 base32 编码，主网（netid 1029）前缀 cfx。

use crate::error::VerifyError;
use crate::service::address::evm::eth_address_bytes;
use crate::utils::codec::{convert_bits, expand_prefix, polymod_bch};

/// CIP-37 字母表（排除 i/l/o/q）
const CFX_ALPHABET: &[u8; 32] = b"abcdefghjkmnprstuvwxyz0123456789";

/// 主网前缀，对应网络 ID 1029
const MAINNET_PREFIX: &str = "cfx";

pub fn cfx_address(uncompressed: &[u8]) -> Result<String, VerifyError> {
    let mut addr = eth_address_bytes(uncompressed)?;
    // 核心空间的用户账户地址首 nibble 固定为 1
    addr[0] = 0x10 | (addr[0] & 0x0f);

    let mut payload = Vec::with_capacity(21);
    payload.push(0x00); // 版本字节
    payload.extend_from_slice(&addr);
    let payload5 = convert_bits(&payload, 8, 5, true);

    let mut checksum_input = expand_prefix(MAINNET_PREFIX);
    checksum_input.extend_from_slice(&payload5);
    checksum_input.extend_from_slice(&[0u8; 8]);
    let polymod = polymod_bch(&checksum_input);

    let mut out = String::with_capacity(MAINNET_PREFIX.len() + 1 + payload5.len() + 8);
    out.push_str(MAINNET_PREFIX);
    out.push(':');
    for &v in &payload5 {
        out.push(CFX_ALPHABET[v as usize] as char);
    }
    for i in 0..8 {
        let v = ((polymod >> (5 * (7 - i))) & 0x1f) as usize;
        out.push(CFX_ALPHABET[v] as char);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pubkey() -> Vec<u8> {
        let mut v = vec![0x04u8];
        v.extend_from_slice(&[0x5au8; 64]);
        v
    }

    #[test]
    fn test_cfx_address_shape() {
        let addr = cfx_address(&sample_pubkey()).unwrap();
        assert!(addr.starts_with("cfx:"));
        // 21 字节载荷 → 34 个 base32 字符，外加 8 位校验和
        assert_eq!(addr.len(), 4 + 34 + 8);
        assert!(addr[4..].bytes().all(|b| CFX_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_cfx_checksum_is_valid() {
        let addr = cfx_address(&sample_pubkey()).unwrap();
        let body = &addr[4..];
        let values: Vec<u8> = body
            .bytes()
            .map(|b| CFX_ALPHABET.iter().position(|&a| a == b).unwrap() as u8)
            .collect();
        let mut input = expand_prefix(MAINNET_PREFIX);
        input.extend_from_slice(&values);
        // 包含校验和后整体 polymod 必须归零
        assert_eq!(polymod_bch(&input), 0);
    }

    #[test]
    fn test_cfx_first_nibble_forced_to_one() {
        let addr = cfx_address(&sample_pubkey()).unwrap();
        let values: Vec<u8> = addr[4..addr.len() - 8]
            .bytes()
            .map(|b| CFX_ALPHABET.iter().position(|&a| a == b).unwrap() as u8)
            .collect();
        let bytes = convert_bits(&values, 5, 8, false);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[1] >> 4, 0x1);
    }
}
