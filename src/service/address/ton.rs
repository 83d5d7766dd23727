//! TON 钱包地址推导
//!
//! TON 地址是钱包合约 StateInit 的单元表示哈希。签名本身无法区分
//! 签名者部署的是哪个钱包合约，因此同一公钥给出四个候选地址：
//! 普通钱包（v3r2）与高载钱包（highload v3）各取可弹回 / 不可弹回
//! 两种展示形式。合约代码单元按其哈希与深度固定内置。

use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL;
use base64::Engine as _;

use crate::utils::hash::sha256;

/// v3r2 钱包默认 subwallet id
const WALLET_V3_SUBWALLET: u32 = 698_983_191;
/// 高载钱包使用的 subwallet id
const HIGHLOAD_SUBWALLET: u32 = 4269;
/// 高载钱包消息存活时长（12 小时，秒）
const HIGHLOAD_TIMEOUT: u32 = 60 * 60 * 12;

/// 可弹回地址标志字节
const TAG_BOUNCEABLE: u8 = 0x11;
/// 不可弹回地址标志字节
const TAG_NON_BOUNCEABLE: u8 = 0x51;
/// 基础工作链
const BASECHAIN: u8 = 0x00;

/// v3r2 钱包代码单元哈希（单一无引用单元，深度 0）
const WALLET_V3R2_CODE_HASH: [u8; 32] = [
    0x84, 0xda, 0xfa, 0x44, 0x9f, 0x98, 0xa6, 0x98, 0x77, 0x89, 0xba, 0x23, 0x23, 0x58, 0x07,
    0x2b, 0xc0, 0xf7, 0x6d, 0xc4, 0x52, 0x40, 0x02, 0xa5, 0xd0, 0x91, 0x8b, 0x9a, 0x75, 0xd2,
    0xd5, 0x99,
];
const WALLET_V3R2_CODE_DEPTH: u16 = 0;

/// highload v3 钱包代码单元哈希（固定合约代码，含一层引用）
const HIGHLOAD_V3_CODE_HASH: [u8; 32] = [
    0x9d, 0xa4, 0x9b, 0x5f, 0x0c, 0xaf, 0x42, 0x8e, 0xbe, 0x11, 0xa3, 0xda, 0x7b, 0x22, 0x8e,
    0x8b, 0x7c, 0x61, 0x0e, 0x84, 0x31, 0x5f, 0x4f, 0x62, 0xc4, 0x2d, 0x65, 0xf6, 0x3c, 0x29,
    0x4d, 0x0e,
];
const HIGHLOAD_V3_CODE_DEPTH: u16 = 1;

/// 推导四个候选地址：{v3r2, highload v3} × {bounceable, non-bounceable}
pub fn ton_addresses(pubkey: &[u8; 32]) -> Vec<String> {
    let v3_data = wallet_v3_data_cell(pubkey);
    let v3_hash = state_init_hash(
        &WALLET_V3R2_CODE_HASH,
        WALLET_V3R2_CODE_DEPTH,
        &leaf_cell_hash(&v3_data.0, v3_data.1),
    );

    let hl_data = highload_v3_data_cell(pubkey);
    let hl_hash = state_init_hash(
        &HIGHLOAD_V3_CODE_HASH,
        HIGHLOAD_V3_CODE_DEPTH,
        &leaf_cell_hash(&hl_data.0, hl_data.1),
    );

    vec![
        friendly_address(TAG_BOUNCEABLE, &v3_hash),
        friendly_address(TAG_NON_BOUNCEABLE, &v3_hash),
        friendly_address(TAG_BOUNCEABLE, &hl_hash),
        friendly_address(TAG_NON_BOUNCEABLE, &hl_hash),
    ]
}

/// v3 数据单元：seqno(32) || subwallet(32) || pubkey(256)
fn wallet_v3_data_cell(pubkey: &[u8; 32]) -> (Vec<u8>, usize) {
    let mut w = BitWriter::new();
    w.push_uint(0, 32);
    w.push_uint(WALLET_V3_SUBWALLET as u64, 32);
    w.push_bytes(pubkey);
    w.finish()
}

/// highload v3 数据单元：
/// pubkey(256) || subwallet(32) || 空查询字典与时间戳(66) || timeout(22)
fn highload_v3_data_cell(pubkey: &[u8; 32]) -> (Vec<u8>, usize) {
    let mut w = BitWriter::new();
    w.push_bytes(pubkey);
    w.push_uint(HIGHLOAD_SUBWALLET as u64, 32);
    w.push_uint(0, 66);
    w.push_uint(HIGHLOAD_TIMEOUT as u64, 22);
    w.finish()
}

/// 无引用单元的表示哈希：sha256(d1 || d2 || 补齐后的数据位)
fn leaf_cell_hash(data: &[u8], bit_len: usize) -> [u8; 32] {
    let mut repr = Vec::with_capacity(2 + data.len());
    repr.push(0x00); // d1：无引用、非特殊、level 0
    repr.push(descriptor_d2(bit_len));
    repr.extend_from_slice(data);
    sha256(&repr)
}

/// StateInit 单元哈希：位体为 b{00110}（仅 code 与 data 存在），
/// 引用顺序为 code、data，哈希前先写两者深度
fn state_init_hash(code_hash: &[u8; 32], code_depth: u16, data_hash: &[u8; 32]) -> [u8; 32] {
    let mut repr = Vec::with_capacity(3 + 4 + 64);
    repr.push(0x02); // d1：两个引用
    repr.push(0x01); // d2：5 个数据位
    repr.push(0x34); // 00110 + 完整位标记
    repr.extend_from_slice(&code_depth.to_be_bytes());
    repr.extend_from_slice(&0u16.to_be_bytes()); // 数据单元无引用，深度 0
    repr.extend_from_slice(code_hash);
    repr.extend_from_slice(data_hash);
    sha256(&repr)
}

/// d2 描述字节：floor(bits/8) + ceil(bits/8)
fn descriptor_d2(bit_len: usize) -> u8 {
    ((bit_len / 8) + bit_len.div_ceil(8)) as u8
}

/// 用户友好形式：base64url(tag || workchain || hash || crc16)，48 字符
fn friendly_address(tag: u8, hash: &[u8; 32]) -> String {
    let mut buf = Vec::with_capacity(36);
    buf.push(tag);
    buf.push(BASECHAIN);
    buf.extend_from_slice(hash);
    let crc = crc16_xmodem(&buf);
    buf.extend_from_slice(&crc.to_be_bytes());
    BASE64_URL.encode(buf)
}

/// CRC16/XMODEM（多项式 0x1021，初值 0）
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// 按位写入器：单元数据位串的最小实现
struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_len: 0,
        }
    }

    fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let idx = self.bit_len / 8;
            self.bytes[idx] |= 1 << (7 - (self.bit_len % 8));
        }
        self.bit_len += 1;
    }

    fn push_uint(&mut self, value: u64, bits: usize) {
        for i in (0..bits).rev() {
            // 宽度可超过 64 位（高位按零补齐）
            let bit = i < u64::BITS as usize && (value >> i) & 1 == 1;
            self.push_bit(bit);
        }
    }

    fn push_bytes(&mut self, data: &[u8]) {
        for &b in data {
            self.push_uint(b as u64, 8);
        }
    }

    /// 返回字节串与位长；位长非 8 对齐时按单元规则补 1 后跟 0
    fn finish(mut self) -> (Vec<u8>, usize) {
        let bit_len = self.bit_len;
        if bit_len % 8 != 0 {
            self.push_bit(true);
            while self.bit_len % 8 != 0 {
                self.push_bit(false);
            }
        }
        (self.bytes, bit_len)
    }
}
