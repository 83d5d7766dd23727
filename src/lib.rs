//! IronProof - 多链储备金证明核验核心
//!
//! 回答一个问题：声称的链上地址是否真的握有对给定消息出具签名的
//! 私钥。覆盖 EVM、通用 ECDSA、ed25519、UTXO、STARK 与 BLS 六个
//! 签名族。纯函数、零 IO、零持久化：所有输入都是调用方给的字符串，
//! 所有失败都是带标签的值。

pub mod domain;
pub mod error;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use error::{VerifyError, VerifyResult};
pub use service::verify::ProofVerifier;

// 统一模块导出
pub mod prelude {
    pub use crate::domain::coin::{AddressFamily, Coin, SigFamily};
    pub use crate::error::{VerifyError, VerifyResult};
    pub use crate::service::verify::ProofVerifier;
}
