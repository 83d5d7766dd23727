//! Starknet 类型化数据签名核验
//!
//! 账户地址本身写进被签名的类型化数据里，签名验真即完成地址绑定，
//! 无需再从公钥反推地址。摘要方案为 Starknet 的链下签名标准：
//! Pedersen 链式哈希 + starknet_keccak 类型哈希 + Cairo 短字符串编码。

use serde_json::json;
use starknet_crypto::{pedersen_hash, FieldElement};

use crate::error::VerifyError;
use crate::utils::codec::decode_hex;
use crate::utils::hash::keccak256;

/// 域参数：与出具证明的服务端模板保持一致
const DOMAIN_NAME: &str = "OKX POR MESSAGE";
const DOMAIN_VERSION: &str = "1";
/// "SN_MAIN" 的短字符串编码
const DOMAIN_CHAIN_ID: &str = "0x534e5f4d41494e";

const STARKNET_MESSAGE_PREFIX: &str = "StarkNet Message";
const DOMAIN_TYPE: &str = "StarkNetDomain(name:felt,version:felt,chainId:felt)";
const MESSAGE_TYPE: &str = "Message(contents:felt)";

/// 校验 STARK 曲线签名
///
/// 签名为 hex 的 r(32) || s(32)，公钥为 hex felt。
pub fn verify_stark_signature(
    account: &str,
    message: &str,
    signature: &str,
    pubkey: &str,
) -> Result<(), VerifyError> {
    let digest = typed_data_hash(account, message)?;

    let key = felt_from_hex(pubkey)?;
    let raw = decode_hex(signature)?;
    if raw.len() != 64 {
        return Err(VerifyError::Recovery(format!(
            "stark signature must be 64 bytes, got {}",
            raw.len()
        )));
    }
    let r = felt_from_bytes(&raw[..32])?;
    let s = felt_from_bytes(&raw[32..])?;

    match starknet_crypto::verify(&key, &digest, &r, &s) {
        Ok(true) => Ok(()),
        Ok(false) => Err(VerifyError::Recovery("stark signature not valid".into())),
        Err(e) => Err(VerifyError::Recovery(format!("stark verify failed: {}", e))),
    }
}

/// 计算类型化数据摘要：
/// H(H(H(H(0, "StarkNet Message"), domain), account), message) 的链式 Pedersen
pub fn typed_data_hash(account: &str, message: &str) -> Result<FieldElement, VerifyError> {
    // 与服务端出具的 JSON 模板同构；从结构化值取数，避免字符串拼接歧义
    let typed_data = json!({
        "types": {
            "StarkNetDomain": [
                { "name": "name", "type": "felt" },
                { "name": "version", "type": "felt" },
                { "name": "chainId", "type": "felt" },
            ],
            "Message": [
                { "name": "contents", "type": "felt" },
            ],
        },
        "primaryType": "Message",
        "domain": {
            "name": DOMAIN_NAME,
            "version": DOMAIN_VERSION,
            "chainId": DOMAIN_CHAIN_ID,
        },
        "message": { "contents": message },
    });

    let domain = &typed_data["domain"];
    let domain_hash = hash_elements(&[
        starknet_keccak(DOMAIN_TYPE.as_bytes()),
        felt_from_value(domain["name"].as_str().unwrap_or_default())?,
        felt_from_value(domain["version"].as_str().unwrap_or_default())?,
        felt_from_value(domain["chainId"].as_str().unwrap_or_default())?,
    ]);
    let message_hash = hash_elements(&[
        starknet_keccak(MESSAGE_TYPE.as_bytes()),
        felt_from_value(typed_data["message"]["contents"].as_str().unwrap_or_default())?,
    ]);

    Ok(hash_elements(&[
        short_string(STARKNET_MESSAGE_PREFIX)?,
        domain_hash,
        felt_from_hex(account)?,
        message_hash,
    ]))
}

/// Pedersen 链式哈希，末尾追加元素个数
fn hash_elements(elements: &[FieldElement]) -> FieldElement {
    let mut acc = FieldElement::ZERO;
    for e in elements {
        acc = pedersen_hash(&acc, e);
    }
    pedersen_hash(&acc, &FieldElement::from(elements.len() as u64))
}

/// starknet_keccak：keccak256 截断到 250 bit
fn starknet_keccak(data: &[u8]) -> FieldElement {
    let mut hash = keccak256(data);
    hash[0] &= 0x03;
    // 250 bit 截断值必然落在域内
    FieldElement::from_bytes_be(&hash).unwrap_or(FieldElement::ZERO)
}

/// felt 值编码：0x 前缀按十六进制，纯数字按十进制，其余按 Cairo 短字符串
fn felt_from_value(value: &str) -> Result<FieldElement, VerifyError> {
    if value.starts_with("0x") {
        felt_from_hex(value)
    } else if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        FieldElement::from_dec_str(value)
            .map_err(|e| VerifyError::Decode(format!("invalid decimal felt: {}", e)))
    } else {
        short_string(value)
    }
}

/// Cairo 短字符串：不超过 31 字节的 ASCII 大端编码
fn short_string(value: &str) -> Result<FieldElement, VerifyError> {
    if !value.is_ascii() || value.len() > 31 {
        return Err(VerifyError::Decode(format!(
            "cannot encode as cairo short string: {:?}",
            value
        )));
    }
    FieldElement::from_byte_slice_be(value.as_bytes())
        .map_err(|e| VerifyError::Decode(format!("short string encode failed: {}", e)))
}

fn felt_from_hex(value: &str) -> Result<FieldElement, VerifyError> {
    FieldElement::from_hex_be(value)
        .map_err(|e| VerifyError::Decode(format!("invalid felt hex: {}", e)))
}

fn felt_from_bytes(bytes: &[u8]) -> Result<FieldElement, VerifyError> {
    FieldElement::from_byte_slice_be(bytes)
        .map_err(|e| VerifyError::Decode(format!("invalid felt bytes: {}", e)))
}
