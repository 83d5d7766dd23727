//! 统一错误类型
//!
//! 核验失败永远以值的形式返回，不会让不可信输入触发 panic。

use thiserror::Error;

/// 核验失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// 未注册的币种
    #[error("invalid coin type {0}")]
    UnsupportedCoin(String),

    /// 币种缺少签名消息头（注册表配置错误，不是核验失败）
    #[error("message signature header not found for coin {0}")]
    HeaderNotFound(String),

    /// 输入解码失败（hex/base64/base58/脚本）
    #[error("decode failed: {0}")]
    Decode(String),

    /// 签名格式非法或无法恢复公钥
    #[error("can't verify signature: {0}")]
    Recovery(String),

    /// 恢复出的候选地址与声称地址不一致
    #[error("recovery address not match, coin: {coin}, addr: {claimed}, candidates: {candidates:?}")]
    AddressMismatch {
        coin: String,
        claimed: String,
        candidates: Vec<String>,
    },

    /// 赎回脚本与地址/公钥不一致
    #[error("script not match, coin: {coin}, addr: {claimed}, stage: {stage}")]
    ScriptMismatch {
        coin: String,
        claimed: String,
        stage: String,
    },

    /// 程序内部不变量被破坏（不应发生，保留给长度检查后的拷贝等场景）
    #[error("unexpected failure: {0}")]
    Internal(String),
}

impl VerifyError {
    /// 稳定错误码，供上层做统计与国际化映射
    pub fn code(&self) -> &'static str {
        match self {
            VerifyError::UnsupportedCoin(_) => "unsupported_coin",
            VerifyError::HeaderNotFound(_) => "header_not_found",
            VerifyError::Decode(_) => "decode_failure",
            VerifyError::Recovery(_) => "signature_recovery_failure",
            VerifyError::AddressMismatch { .. } => "address_mismatch",
            VerifyError::ScriptMismatch { .. } => "script_mismatch",
            VerifyError::Internal(_) => "internal",
        }
    }
}

/// 核验结果：成功为 `()`，失败携带具体原因
pub type VerifyResult = Result<(), VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            VerifyError::UnsupportedCoin("WAT".into()).code(),
            "unsupported_coin"
        );
        assert_eq!(VerifyError::Decode("bad hex".into()).code(), "decode_failure");
        assert_eq!(
            VerifyError::AddressMismatch {
                coin: "ETH".into(),
                claimed: "0x0".into(),
                candidates: vec![],
            }
            .code(),
            "address_mismatch"
        );
    }

    #[test]
    fn test_display_carries_context() {
        let err = VerifyError::ScriptMismatch {
            coin: "BTC".into(),
            claimed: "3abc".into(),
            stage: "script hash".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("BTC"));
        assert!(msg.contains("script hash"));
    }
}
