//! Domain 模块
//!
//! 币种注册表与地址族定义

pub mod coin;

pub use coin::{AddressFamily, Coin, SigFamily, UtxoNetwork};
