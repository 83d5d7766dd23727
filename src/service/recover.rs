//! 签名恢复与校验
//!
//! secp256k1 走可恢复签名（从签名反推公钥）；ed25519 无恢复能力，
//! 只能对调用方提供的公钥做严格校验，地址绑定由调度层先行完成。

use ed25519_dalek::{Signature as EdSignature, VerifyingKey as EdVerifyingKey};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use crate::error::VerifyError;
use crate::utils::codec::{decode_base64, decode_hex};

/// 恢复出的 secp256k1 公钥，按需取压缩 / 非压缩 SEC1 编码
#[derive(Debug, Clone)]
pub struct RecoveredKey(VerifyingKey);

impl RecoveredKey {
    /// 非压缩形式（65 字节，0x04 前缀）
    pub fn uncompressed(&self) -> Vec<u8> {
        self.0.to_encoded_point(false).as_bytes().to_vec()
    }

    /// 压缩形式（33 字节）
    pub fn compressed(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }
}

/// 从 EVM 风格签名恢复公钥
///
/// 签名为 hex 编码的 r(32) || s(32) || v(1)，v 取 {0,1,27,28}。
pub fn recover_evm(digest: &[u8; 32], signature: &str) -> Result<RecoveredKey, VerifyError> {
    let raw = decode_hex(signature)?;
    if raw.len() != 65 {
        return Err(VerifyError::Recovery(format!(
            "signature must be 65 bytes, got {}",
            raw.len()
        )));
    }
    let mut v = raw[64];
    if v >= 27 {
        v -= 27;
    }
    recover_secp256k1(digest, &raw[..64], v)
}

/// 从 Bitcoin compact 签名恢复公钥
///
/// 签名为 Base64 编码的 header(1) || r(32) || s(32)，
/// header 27..=30 表示非压缩公钥，31..=34 表示压缩公钥。
pub fn recover_compact(digest: &[u8; 32], signature: &str) -> Result<RecoveredKey, VerifyError> {
    let raw = decode_base64(signature)?;
    if raw.len() != 65 {
        return Err(VerifyError::Recovery(format!(
            "compact signature must be 65 bytes, got {}",
            raw.len()
        )));
    }
    let header = raw[0];
    if !(27..=34).contains(&header) {
        return Err(VerifyError::Recovery(format!(
            "invalid compact signature header {}",
            header
        )));
    }
    recover_secp256k1(digest, &raw[1..], (header - 27) & 3)
}

fn recover_secp256k1(
    digest: &[u8; 32],
    rs: &[u8],
    v: u8,
) -> Result<RecoveredKey, VerifyError> {
    let recovery_id = RecoveryId::try_from(v)
        .map_err(|_| VerifyError::Recovery(format!("invalid recovery id {}", v)))?;
    let sig = Signature::from_slice(rs)
        .map_err(|e| VerifyError::Recovery(format!("malformed signature: {}", e)))?;
    let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|e| VerifyError::Recovery(format!("pubkey recovery failed: {}", e)))?;
    Ok(RecoveredKey(key))
}

/// 严格校验 ed25519 签名
pub fn verify_ed25519(payload: &[u8], pubkey: &[u8; 32], signature: &[u8; 64]) -> bool {
    let Ok(key) = EdVerifyingKey::from_bytes(pubkey) else {
        return false;
    };
    let sig = EdSignature::from_bytes(signature);
    key.verify_strict(payload, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hash::keccak256;
    use base64::engine::general_purpose::STANDARD as BASE64_STD;
    use base64::Engine as _;
    use ed25519_dalek::{Signer, SigningKey as EdSigningKey};
    use k256::ecdsa::SigningKey;

    fn sign_recoverable(digest: &[u8; 32], key: &SigningKey) -> (Vec<u8>, u8) {
        let (sig, recid) = key.sign_prehash_recoverable(digest).expect("sign");
        (sig.to_bytes().to_vec(), recid.to_byte())
    }

    #[test]
    fn test_recover_evm_roundtrip() {
        let key = SigningKey::random(&mut rand::thread_rng());
        let digest = keccak256(b"recover me");
        let (rs, v) = sign_recoverable(&digest, &key);

        let mut raw = rs.clone();
        raw.push(v + 27);
        let recovered = recover_evm(&digest, &hex::encode(raw)).unwrap();
        assert_eq!(
            recovered.uncompressed(),
            key.verifying_key().to_encoded_point(false).as_bytes()
        );
    }

    #[test]
    fn test_recover_evm_accepts_both_v_conventions() {
        let key = SigningKey::random(&mut rand::thread_rng());
        let digest = keccak256(b"v convention");
        let (rs, v) = sign_recoverable(&digest, &key);

        for v_byte in [v, v + 27] {
            let mut raw = rs.clone();
            raw.push(v_byte);
            let recovered = recover_evm(&digest, &hex::encode(raw)).unwrap();
            assert_eq!(recovered.compressed().len(), 33);
        }
    }

    #[test]
    fn test_recover_compact_roundtrip() {
        let key = SigningKey::random(&mut rand::thread_rng());
        let digest = keccak256(b"compact");
        let (rs, v) = sign_recoverable(&digest, &key);

        // 压缩公钥形式的 header
        let mut raw = vec![27 + v + 4];
        raw.extend_from_slice(&rs);
        let recovered = recover_compact(&digest, &BASE64_STD.encode(raw)).unwrap();
        assert_eq!(
            recovered.compressed(),
            key.verifying_key().to_encoded_point(true).as_bytes()
        );
    }

    #[test]
    fn test_recover_rejects_bad_lengths_and_headers() {
        let digest = [7u8; 32];
        assert!(recover_evm(&digest, "0xdead").is_err());
        assert!(recover_compact(&digest, &BASE64_STD.encode([0u8; 64])).is_err());

        let mut bad_header = vec![99u8];
        bad_header.extend_from_slice(&[1u8; 64]);
        assert!(recover_compact(&digest, &BASE64_STD.encode(bad_header)).is_err());
    }

    #[test]
    fn test_ed25519_strict_verify() {
        let mut seed = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut seed);
        let key = EdSigningKey::from_bytes(&seed);
        let payload = b"ed25519 payload";
        let sig = key.sign(payload);

        let pubkey = key.verifying_key().to_bytes();
        assert!(verify_ed25519(payload, &pubkey, &sig.to_bytes()));
        assert!(!verify_ed25519(b"other payload", &pubkey, &sig.to_bytes()));

        let mut bad_sig = sig.to_bytes();
        bad_sig[0] ^= 0x01;
        assert!(!verify_ed25519(payload, &pubkey, &bad_sig));
    }
}
