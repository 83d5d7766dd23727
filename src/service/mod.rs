//! Service 模块
//!
//! 摘要构造、签名恢复、地址推导、脚本核验与调度入口

pub mod address;
pub mod digest;
pub mod recover;
pub mod script;
pub mod stark;
pub mod verify;

pub use verify::ProofVerifier;
