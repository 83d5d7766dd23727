//! 签名消息摘要构造
//!
//! 每个签名族有自己的规范摘要：EVM personal-sign、UTXO 签名消息、
//! 通用 ECDSA 链前缀哈希、ed25519 原文，以及 TRON 的新旧两种写法。

use crate::domain::coin::TRON_MSG_HEADER;
use crate::utils::hash::{keccak256, sha256d};

/// EVM personal-sign 摘要：keccak256(header || 十进制长度 || message)
pub fn evm_personal_digest(header: &str, message: &str) -> [u8; 32] {
    let mut buf = Vec::with_capacity(header.len() + message.len() + 8);
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(message.len().to_string().as_bytes());
    buf.extend_from_slice(message.as_bytes());
    keccak256(&buf)
}

/// 通用 ECDSA 链摘要：keccak256(header || message)，长度不参与
pub fn ecdsa_digest(header: &str, message: &str) -> [u8; 32] {
    let mut buf = Vec::with_capacity(header.len() + message.len());
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(message.as_bytes());
    keccak256(&buf)
}

/// ed25519 链直接对 header || message 原文签名，不做预哈希
pub fn ed25519_payload(header: &str, message: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(header.len() + message.len());
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(message.as_bytes());
    buf
}

/// Bitcoin 签名消息摘要：
/// sha256d(varint(len(magic)) || magic || varint(len(message)) || message)
pub fn utxo_digest(magic: &str, message: &str) -> [u8; 32] {
    let mut buf = Vec::with_capacity(magic.len() + message.len() + 10);
    write_varint(&mut buf, magic.len() as u64);
    buf.extend_from_slice(magic.as_bytes());
    write_varint(&mut buf, message.len() as u64);
    buf.extend_from_slice(message.as_bytes());
    sha256d(&buf)
}

/// TRON 旧版摘要：长度固定写成 "32"，与消息实际长度无关
///
/// 早期钱包实现的写法，链上存量签名仍按此规则可验。
pub fn tron_digest_legacy(message: &str) -> [u8; 32] {
    let mut buf = Vec::with_capacity(TRON_MSG_HEADER.len() + message.len() + 2);
    buf.extend_from_slice(TRON_MSG_HEADER.as_bytes());
    buf.extend_from_slice(b"32");
    buf.extend_from_slice(message.as_bytes());
    keccak256(&buf)
}

/// TRON 现行摘要：与 EVM personal-sign 同构，长度为真实十进制长度
pub fn tron_digest(message: &str) -> [u8; 32] {
    evm_personal_digest(TRON_MSG_HEADER, message)
}

/// Bitcoin 变长整数编码
fn write_varint(buf: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(0xfd);
        buf.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(0xfe);
        buf.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        buf.push(0xff);
        buf.extend_from_slice(&n.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::ETH_MSG_HEADER;

    #[test]
    fn test_evm_digest_depends_on_length_and_content() {
        let a = evm_personal_digest(ETH_MSG_HEADER, "hello");
        let b = evm_personal_digest(ETH_MSG_HEADER, "hellp");
        let c = evm_personal_digest(ETH_MSG_HEADER, "hello");
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_tron_variants_differ_except_for_len_32() {
        let msg = "proof of reserves challenge";
        assert_ne!(tron_digest_legacy(msg), tron_digest(msg));

        // 恰好 32 字节的消息下两种写法应当一致
        let msg32 = "abcdefghijklmnopqrstuvwxyz012345";
        assert_eq!(msg32.len(), 32);
        assert_eq!(tron_digest_legacy(msg32), tron_digest(msg32));
    }

    #[test]
    fn test_utxo_digest_uses_varint_framing() {
        // 与裸双哈希不同，说明 varint 前缀参与了摘要
        let digest = utxo_digest("Bitcoin Signed Message:\n", "hi");
        assert_ne!(digest, sha256d(b"Bitcoin Signed Message:\nhi"));
    }

    #[test]
    fn test_varint_boundaries() {
        let mut small = Vec::new();
        write_varint(&mut small, 252);
        assert_eq!(small, vec![252]);

        let mut two_byte = Vec::new();
        write_varint(&mut two_byte, 253);
        assert_eq!(two_byte, vec![0xfd, 0xfd, 0x00]);

        let mut four_byte = Vec::new();
        write_varint(&mut four_byte, 0x1_0000);
        assert_eq!(four_byte, vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_ed25519_payload_is_raw_concat() {
        assert_eq!(ed25519_payload("", "msg"), b"msg");
        assert_eq!(ed25519_payload("pre", "msg"), b"premsg");
    }
}
