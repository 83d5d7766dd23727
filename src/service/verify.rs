//! 核验调度
//!
//! 按签名族分出的公开入口：每个入口完成 查表 → 摘要 → 恢复/校验 →
//! 地址推导/脚本核验 → 比较。比较一律是"声称地址 ∈ 候选集合"，
//! 大小写不敏感。所有入口无状态、无 IO，可任意并发。

use blst::min_pk::{PublicKey as BlsPublicKey, Signature as BlsSignature};
use blst::BLST_ERROR;

use crate::domain::coin::{AddressFamily, Coin, SigFamily};
use crate::error::{VerifyError, VerifyResult};
use crate::service::address::aelf::aelf_address;
use crate::service::address::conflux::cfx_address;
use crate::service::address::cosmos::{lunc_address, okt_address};
use crate::service::address::ed25519::{aptos_addresses, dot_address, sol_address, sui_address};
use crate::service::address::evm::{eth_address, eth_address_bytes, tron_address};
use crate::service::address::filecoin::{f1_address, f410_address};
use crate::service::address::ton::ton_addresses;
use crate::service::digest::{
    ecdsa_digest, ed25519_payload, evm_personal_digest, tron_digest, tron_digest_legacy,
    utxo_digest,
};
use crate::service::recover::{recover_compact, recover_evm, verify_ed25519};
use crate::service::script::validate_script;
use crate::service::stark::verify_stark_signature;
use crate::utils::codec::decode_hex;

/// BLS 签名域分隔标签（以太坊共识层约定）
const BLS_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// 证明核验入口
///
/// 所有方法都是纯函数式的关联函数，调用方拿到 Ok(()) 即核验通过，
/// 否则得到带具体失败原因的 [`VerifyError`]。
pub struct ProofVerifier;

impl ProofVerifier {
    /// EVM 系核验：personal-sign 摘要 + secp256k1 恢复
    ///
    /// TRX 在此入口内走新旧双摘要回退；FIL 在此入口给出 f410 委托地址。
    pub fn verify_evm_coin(coin: &str, addr: &str, message: &str, signature: &str) -> VerifyResult {
        let coin = Self::parse_coin(coin)?;
        if coin.sig_family() != SigFamily::Evm && coin != Coin::Fil {
            return Err(VerifyError::UnsupportedCoin(coin.to_string()));
        }
        tracing::debug!(coin = %coin, addr, "verify evm coin");

        if coin == Coin::Trx {
            return Self::verify_tron(addr, message, signature);
        }

        let digest = evm_personal_digest(coin.message_header(), message);
        let key = recover_evm(&digest, signature)?;
        let uncompressed = key.uncompressed();
        let candidates = match coin.address_family() {
            AddressFamily::Eth => vec![eth_address(&uncompressed)?],
            AddressFamily::Fil => vec![f410_address(&eth_address_bytes(&uncompressed)?)],
            _ => return Err(VerifyError::UnsupportedCoin(coin.to_string())),
        };
        Self::match_candidates(coin, addr, candidates)
    }

    /// 通用 ECDSA 系核验（FIL / CFX / ELF / LUNC / OKT）
    pub fn verify_ecdsa_coin(
        coin: &str,
        addr: &str,
        message: &str,
        signature: &str,
    ) -> VerifyResult {
        let coin = Self::parse_coin(coin)?;
        if coin.sig_family() != SigFamily::Ecdsa {
            return Err(VerifyError::UnsupportedCoin(coin.to_string()));
        }
        tracing::debug!(coin = %coin, addr, "verify ecdsa coin");

        let digest = ecdsa_digest(coin.message_header(), message);
        let key = recover_evm(&digest, signature)?;
        let candidates = match coin.address_family() {
            AddressFamily::Fil => vec![f1_address(&key.uncompressed())?],
            AddressFamily::Cfx => vec![cfx_address(&key.uncompressed())?],
            AddressFamily::Elf => vec![aelf_address(&key.uncompressed())],
            AddressFamily::Lunc => vec![lunc_address(&key.compressed())?],
            // OKT 同一账户有 cosmos 与十六进制两种形式，按声称地址的前缀选择
            AddressFamily::Okt => {
                if addr.starts_with("ex") {
                    vec![okt_address(&key.uncompressed())?]
                } else {
                    vec![eth_address(&key.uncompressed())?]
                }
            }
            _ => return Err(VerifyError::UnsupportedCoin(coin.to_string())),
        };
        Self::match_candidates(coin, addr, candidates)
    }

    /// ed25519 系核验（SOL / APT / SUI / TON / DOT）
    ///
    /// ed25519 不支持公钥恢复，公钥由调用方提供；先用公钥独立推导
    /// 地址并与声称地址绑定，绑定通过后才对签名做严格校验——
    /// 绝不先信任一个未绑定的公钥。
    pub fn verify_ed25519_coin(
        coin: &str,
        addr: &str,
        message: &str,
        signature: &str,
        pubkey: &str,
    ) -> VerifyResult {
        let coin = Self::parse_coin(coin)?;
        if coin.sig_family() != SigFamily::Ed25519 {
            return Err(VerifyError::UnsupportedCoin(coin.to_string()));
        }
        tracing::debug!(coin = %coin, addr, "verify ed25519 coin");

        let pk_raw = decode_hex(pubkey)?;
        let pk: [u8; 32] = pk_raw
            .as_slice()
            .try_into()
            .map_err(|_| VerifyError::Decode(format!("pubkey must be 32 bytes, got {}", pk_raw.len())))?;

        let candidates = match coin.address_family() {
            AddressFamily::Sol => vec![sol_address(&pk)],
            AddressFamily::Aptos => aptos_addresses(&pk),
            AddressFamily::Sui => vec![sui_address(&pk)],
            AddressFamily::Ton => ton_addresses(&pk),
            AddressFamily::Dot => vec![dot_address(&pk)],
            _ => return Err(VerifyError::UnsupportedCoin(coin.to_string())),
        };
        Self::match_candidates(coin, addr, candidates)?;

        let sig_raw = decode_hex(signature)?;
        let sig: [u8; 64] = sig_raw.as_slice().try_into().map_err(|_| {
            VerifyError::Recovery(format!("signature must be 64 bytes, got {}", sig_raw.len()))
        })?;
        let payload = ed25519_payload(coin.message_header(), message);
        if !verify_ed25519(&payload, &pk, &sig) {
            return Err(VerifyError::Recovery("ed25519 signature not valid".into()));
        }
        Ok(())
    }

    /// UTXO 系核验
    ///
    /// 最多接受两个 compact 签名（多签出证场景），恢复出的公钥连同
    /// 赎回脚本交给脚本核验。P2PKH 地址不需要脚本。
    pub fn verify_utxo_coin(
        coin: &str,
        addr: &str,
        message: &str,
        signature1: Option<&str>,
        signature2: Option<&str>,
        redeem_script: Option<&str>,
    ) -> VerifyResult {
        let coin = Self::parse_coin(coin)?;
        if coin.sig_family() != SigFamily::Utxo {
            return Err(VerifyError::UnsupportedCoin(coin.to_string()));
        }
        tracing::debug!(coin = %coin, addr, "verify utxo coin");

        let digest = utxo_digest(coin.message_header(), message);
        let recover = |sig: Option<&str>| -> Result<Option<Vec<u8>>, VerifyError> {
            match sig {
                Some(s) if !s.is_empty() => Ok(Some(recover_compact(&digest, s)?.compressed())),
                _ => Ok(None),
            }
        };
        let pub1 = recover(signature1)?
            .ok_or_else(|| VerifyError::Recovery("at least one signature required".into()))?;
        let pub2 = recover(signature2)?;

        validate_script(coin, addr, redeem_script, &pub1, pub2.as_deref())
    }

    /// STARK 曲线核验
    ///
    /// 账户地址参与类型化数据摘要，签名验真即隐含地址绑定。
    pub fn verify_stark_coin(
        coin: &str,
        addr: &str,
        message: &str,
        signature: &str,
        pubkey: &str,
    ) -> VerifyResult {
        let coin = Self::parse_coin(coin)?;
        if coin.sig_family() != SigFamily::Stark {
            return Err(VerifyError::UnsupportedCoin(coin.to_string()));
        }
        tracing::debug!(coin = %coin, addr, "verify stark coin");

        verify_stark_signature(addr, message, signature, pubkey)
    }

    /// BLS 核验（Beacon 链验证者，公钥即地址）
    pub fn verify_bls_coin(coin: &str, addr: &str, message: &str, signature: &str) -> VerifyResult {
        let coin = Self::parse_coin(coin)?;
        if coin.sig_family() != SigFamily::Bls {
            return Err(VerifyError::UnsupportedCoin(coin.to_string()));
        }
        tracing::debug!(coin = %coin, addr, "verify bls coin");

        let digest = evm_personal_digest(coin.message_header(), message);
        let pk_raw = decode_hex(addr)?;
        let sig_raw = decode_hex(signature)?;
        if pk_raw.len() != 48 {
            return Err(VerifyError::Decode(format!(
                "bls pubkey must be 48 bytes, got {}",
                pk_raw.len()
            )));
        }
        if sig_raw.len() != 96 {
            return Err(VerifyError::Recovery(format!(
                "bls signature must be 96 bytes, got {}",
                sig_raw.len()
            )));
        }

        let pk = BlsPublicKey::from_bytes(&pk_raw)
            .map_err(|e| VerifyError::Decode(format!("invalid bls pubkey: {:?}", e)))?;
        let sig = BlsSignature::from_bytes(&sig_raw)
            .map_err(|e| VerifyError::Recovery(format!("invalid bls signature: {:?}", e)))?;
        if sig.verify(true, &digest, BLS_DST, &[], &pk, true) != BLST_ERROR::BLST_SUCCESS {
            return Err(VerifyError::Recovery("bls signature not valid".into()));
        }
        Ok(())
    }

    /// TRON 双摘要回退：旧版固定长度写法与现行写法任一命中即通过
    fn verify_tron(addr: &str, message: &str, signature: &str) -> VerifyResult {
        let mut candidates = Vec::with_capacity(2);
        for digest in [tron_digest_legacy(message), tron_digest(message)] {
            let Ok(key) = recover_evm(&digest, signature) else {
                continue;
            };
            let candidate = tron_address(&key.uncompressed())?;
            if candidate.eq_ignore_ascii_case(addr) {
                return Ok(());
            }
            candidates.push(candidate);
        }
        if candidates.is_empty() {
            return Err(VerifyError::Recovery(
                "tron signature recovery failed under both digests".into(),
            ));
        }
        Err(VerifyError::AddressMismatch {
            coin: Coin::Trx.to_string(),
            claimed: addr.to_string(),
            candidates,
        })
    }

    fn parse_coin(coin: &str) -> Result<Coin, VerifyError> {
        coin.parse()
    }

    fn match_candidates(coin: Coin, claimed: &str, candidates: Vec<String>) -> VerifyResult {
        if candidates
            .iter()
            .any(|c| c.eq_ignore_ascii_case(claimed))
        {
            return Ok(());
        }
        tracing::warn!(coin = %coin, claimed, ?candidates, "recovered address mismatch");
        Err(VerifyError::AddressMismatch {
            coin: coin.to_string(),
            claimed: claimed.to_string(),
            candidates,
        })
    }
}
