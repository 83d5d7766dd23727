//! Cosmos 风格 bech32 地址（Terra Classic / OKT）

use bech32::{Bech32, Hrp};

use crate::error::VerifyError;
use crate::utils::hash::{hash160, keccak256};

/// Terra Classic：bech32("terra", ripemd160(sha256(压缩公钥)))
pub fn lunc_address(compressed: &[u8]) -> Result<String, VerifyError> {
    encode("terra", &hash160(compressed))
}

/// OKT cosmos 形式：bech32("ex", keccak256(非压缩公钥去前缀)[12..])
pub fn okt_address(uncompressed: &[u8]) -> Result<String, VerifyError> {
    if uncompressed.len() != 65 {
        return Err(VerifyError::Internal(format!(
            "expect 65-byte uncompressed pubkey, got {} bytes",
            uncompressed.len()
        )));
    }
    let hash = keccak256(&uncompressed[1..]);
    encode("ex", &hash[12..])
}

fn encode(prefix: &str, payload: &[u8]) -> Result<String, VerifyError> {
    let hrp = Hrp::parse(prefix)
        .map_err(|e| VerifyError::Internal(format!("invalid bech32 prefix: {}", e)))?;
    bech32::encode::<Bech32>(hrp, payload)
        .map_err(|e| VerifyError::Internal(format!("bech32 encode failed: {}", e)))
}
