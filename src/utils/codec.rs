//! 编码辅助
//!
//! hex / Base64 / Base58Check 解码编码，以及 cash address 与 CIP-37
//! 共用的 5-bit 重组和 BCH 多项式校验和。

use base64::engine::general_purpose::STANDARD as BASE64_STD;
use base64::Engine as _;

use crate::error::VerifyError;
use crate::utils::hash::sha256d;

/// 解码十六进制字符串，允许 0x 前缀
pub fn decode_hex(input: &str) -> Result<Vec<u8>, VerifyError> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(stripped).map_err(|e| VerifyError::Decode(format!("invalid hex: {}", e)))
}

/// 解码标准 Base64
pub fn decode_base64(input: &str) -> Result<Vec<u8>, VerifyError> {
    BASE64_STD
        .decode(input)
        .map_err(|e| VerifyError::Decode(format!("invalid base64: {}", e)))
}

/// Base58Check 编码：base58(version || payload || sha256d[..4])
pub fn base58check_encode(version: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(version.len() + payload.len() + 4);
    data.extend_from_slice(version);
    data.extend_from_slice(payload);
    let checksum = sha256d(&data);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

/// Base58Check 解码，返回 version || payload（校验和已验证并剥离）
pub fn base58check_decode(input: &str) -> Result<Vec<u8>, VerifyError> {
    let data = bs58::decode(input)
        .into_vec()
        .map_err(|e| VerifyError::Decode(format!("invalid base58: {}", e)))?;
    if data.len() < 5 {
        return Err(VerifyError::Decode("base58 payload too short".into()));
    }
    let (body, checksum) = data.split_at(data.len() - 4);
    if sha256d(body)[..4] != *checksum {
        return Err(VerifyError::Decode("base58 checksum mismatch".into()));
    }
    Ok(body.to_vec())
}

/// 按自定义字母表做无填充 Base32 编码（MSB 优先）
///
/// Filecoin 使用 RFC4648 小写表，CIP-37 使用 Conflux 自有表。
pub fn base32_encode_nopad(alphabet: &[u8; 32], data: &[u8]) -> String {
    let groups = convert_bits(data, 8, 5, true);
    groups.iter().map(|&v| alphabet[v as usize] as char).collect()
}

/// 位宽重组：把 from 位一组的值流重排为 to 位一组
///
/// pad 为 true 时允许补零凑满最后一组；为 false 时余位必须为零。
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    let maxv: u32 = (1 << to) - 1;
    for &value in data {
        acc = (acc << from) | value as u32;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & maxv) as u8);
        }
    }
    if pad && bits > 0 {
        out.push(((acc << (to - bits)) & maxv) as u8);
    }
    out
}

/// Bitcoin Cash 风格 40-bit 多项式校验和
///
/// cash address 与 Conflux CIP-37 使用同一组生成元。
pub fn polymod_bch(values: &[u8]) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07ffffffff) << 5) ^ d as u64;
        for (i, gen) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 != 0 {
                c ^= gen;
            }
        }
    }
    c ^ 1
}

/// 地址前缀按低 5 位展开，后接 0 分隔符（校验和输入的头部）
pub fn expand_prefix(prefix: &str) -> Vec<u8> {
    let mut out: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    out.push(0);
    out
}
