//! UTXO 链地址推导与归一化
//!
//! P2PKH / P2SH 走 Base58Check，P2WSH 走 segwit bech32；
//! BCH 的 cash address 与 legacy 地址互为同一载荷的两种编码，
//! 比较前统一转换为 legacy 形式。

use bech32::{segwit, Fe32, Hrp};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::coin::UtxoNetwork;
use crate::error::VerifyError;
use crate::utils::codec::{
    base58check_decode, base58check_encode, convert_bits, expand_prefix, polymod_bch,
};
use crate::utils::hash::{hash160, sha256};

/// cash address 字符表（与 bech32 相同）
const CASH_CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const CASH_PREFIX: &str = "bitcoincash";

static CASH_ADDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^((bitcoincash|bchtest):)?[qp][a-z0-9]{41}$").expect("static regex"));

/// 声称地址的形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtxoAddressKind {
    P2pkh,
    P2sh,
    P2wsh,
}

/// P2PKH 地址：base58check(version, hash160(pubkey))
pub fn p2pkh_address(network: &UtxoNetwork, pubkey: &[u8]) -> String {
    base58check_encode(network.pubkey_hash, &hash160(pubkey))
}

/// P2SH 地址：base58check(version, hash160(script))
pub fn p2sh_address(network: &UtxoNetwork, script: &[u8]) -> String {
    base58check_encode(network.script_hash, &hash160(script))
}

/// P2WSH 地址：segwit v0，见证程序为 sha256(script)
pub fn p2wsh_address(network: &UtxoNetwork, script: &[u8]) -> Result<String, VerifyError> {
    let hrp_str = network
        .segwit_hrp
        .ok_or_else(|| VerifyError::Decode("network has no segwit prefix".into()))?;
    let hrp = Hrp::parse(hrp_str)
        .map_err(|e| VerifyError::Internal(format!("invalid segwit prefix: {}", e)))?;
    let program = sha256(script);
    segwit::encode(hrp, Fe32::Q, &program)
        .map_err(|e| VerifyError::Internal(format!("segwit encode failed: {}", e)))
}

/// 判定声称地址在该网络下的形态，同时完成解码校验
pub fn classify_address(
    network: &UtxoNetwork,
    addr: &str,
) -> Result<UtxoAddressKind, VerifyError> {
    if let Some(hrp) = network.segwit_hrp {
        if addr.to_lowercase().starts_with(&format!("{}1", hrp)) {
            let (_, _, program) = segwit::decode(&addr.to_lowercase())
                .map_err(|e| VerifyError::Decode(format!("invalid segwit address: {}", e)))?;
            return match program.len() {
                32 => Ok(UtxoAddressKind::P2wsh),
                n => Err(VerifyError::Decode(format!(
                    "unsupported witness program length {}",
                    n
                ))),
            };
        }
    }

    let decoded = base58check_decode(addr)?;
    if decoded.starts_with(network.script_hash) {
        Ok(UtxoAddressKind::P2sh)
    } else if decoded.starts_with(network.pubkey_hash) {
        Ok(UtxoAddressKind::P2pkh)
    } else {
        Err(VerifyError::Decode(format!(
            "address version does not match network: {}",
            addr
        )))
    }
}

/// 是否为 cash address 形式（带或不带 bitcoincash: 前缀）
pub fn is_cash_address(addr: &str) -> bool {
    CASH_ADDR_RE.is_match(&addr.to_lowercase())
}

/// cash address → legacy Base58Check
pub fn cash_to_legacy(addr: &str) -> Result<String, VerifyError> {
    let lower = addr.to_lowercase();
    let (prefix, body) = match lower.split_once(':') {
        Some((p, b)) => (p.to_string(), b.to_string()),
        None => (CASH_PREFIX.to_string(), lower),
    };

    let mut values = Vec::with_capacity(body.len());
    for ch in body.bytes() {
        let v = CASH_CHARSET
            .iter()
            .position(|&c| c == ch)
            .ok_or_else(|| VerifyError::Decode(format!("invalid cash address char: {}", ch as char)))?;
        values.push(v as u8);
    }

    let mut checksum_input = expand_prefix(&prefix);
    checksum_input.extend_from_slice(&values);
    if polymod_bch(&checksum_input) != 0 {
        return Err(VerifyError::Decode("cash address checksum mismatch".into()));
    }

    if values.len() < 8 {
        return Err(VerifyError::Decode("cash address too short".into()));
    }
    let payload = convert_bits(&values[..values.len() - 8], 5, 8, false);
    if payload.len() != 21 {
        return Err(VerifyError::Decode(format!(
            "unexpected cash address payload length {}",
            payload.len()
        )));
    }

    // 版本字节高 5 位是地址类型，低 3 位是哈希长度编码
    let version = match payload[0] >> 3 {
        0 => [0x00u8],
        1 => [0x05u8],
        t => {
            return Err(VerifyError::Decode(format!(
                "unsupported cash address type {}",
                t
            )))
        }
    };
    Ok(base58check_encode(&version, &payload[1..]))
}

/// legacy Base58Check → cash address（无前缀形式）
pub fn legacy_to_cash(addr: &str) -> Result<String, VerifyError> {
    let decoded = base58check_decode(addr)?;
    if decoded.len() != 21 {
        return Err(VerifyError::Decode(format!(
            "unexpected legacy payload length {}",
            decoded.len()
        )));
    }
    let cash_type: u8 = match decoded[0] {
        0x00 => 0,
        0x05 => 1,
        v => {
            return Err(VerifyError::Decode(format!(
                "unsupported legacy version byte {:#04x}",
                v
            )))
        }
    };

    let mut payload = vec![cash_type << 3];
    payload.extend_from_slice(&decoded[1..]);
    let mut values = convert_bits(&payload, 8, 5, true);

    let mut checksum_input = expand_prefix(CASH_PREFIX);
    checksum_input.extend_from_slice(&values);
    checksum_input.extend_from_slice(&[0u8; 8]);
    let polymod = polymod_bch(&checksum_input);
    for i in 0..8 {
        values.push(((polymod >> (5 * (7 - i))) & 0x1f) as u8);
    }

    Ok(values
        .iter()
        .map(|&v| CASH_CHARSET[v as usize] as char)
        .collect())
}
