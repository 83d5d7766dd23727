//! 地址推导模块
//!
//! 每个地址族一个子模块，全部是确定性纯函数：
//! 输入公钥（或其派生物），输出该链的候选地址文本。

pub mod aelf;
pub mod conflux;
pub mod cosmos;
pub mod ed25519;
pub mod evm;
pub mod filecoin;
pub mod ton;
pub mod utxo;
