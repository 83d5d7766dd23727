//! ETH / TRON 地址推导

use crate::error::VerifyError;
use crate::utils::codec::base58check_encode;
use crate::utils::hash::keccak256;

/// TRON 主网地址版本字节
const TRON_VERSION: u8 = 0x41;

/// 非压缩公钥去掉 0x04 前缀后取 keccak256 尾部 20 字节
pub fn eth_address_bytes(uncompressed: &[u8]) -> Result<[u8; 20], VerifyError> {
    if uncompressed.len() != 65 || uncompressed[0] != 0x04 {
        return Err(VerifyError::Internal(format!(
            "expect 65-byte uncompressed pubkey, got {} bytes",
            uncompressed.len()
        )));
    }
    let hash = keccak256(&uncompressed[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    Ok(addr)
}

/// 0x 前缀十六进制 ETH 地址
pub fn eth_address(uncompressed: &[u8]) -> Result<String, VerifyError> {
    Ok(format!("0x{}", hex::encode(eth_address_bytes(uncompressed)?)))
}

/// TRON Base58Check 地址（0x41 || eth 地址字节）
pub fn tron_address(uncompressed: &[u8]) -> Result<String, VerifyError> {
    let addr = eth_address_bytes(uncompressed)?;
    Ok(base58check_encode(&[TRON_VERSION], &addr))
}
