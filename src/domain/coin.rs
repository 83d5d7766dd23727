//! 币种注册表
//!
//! 定义所有支持的币种及其签名族、地址族与签名消息头。
//! 注册表是封闭枚举上的全函数：新增币种时编译器强制补全所有表项，
//! 不存在运行期"查不到配置"的情况（字符串入口除外）。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VerifyError;

/// 签名族：决定消息摘要方案与签名恢复/校验方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigFamily {
    /// EVM personal-sign 摘要 + secp256k1 可恢复签名
    Evm,
    /// 链自定义摘要 + secp256k1 可恢复签名
    Ecdsa,
    /// ed25519 原文签名（需调用方提供公钥）
    Ed25519,
    /// Bitcoin 签名消息摘要 + compact 可恢复签名
    Utxo,
    /// STARK 曲线类型化数据签名
    Stark,
    /// BLS12-381（公钥即地址）
    Bls,
}

/// 地址族：公钥到规范地址文本的推导算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// BTC 系 Base58Check / segwit 地址
    Utxo,
    /// Filecoin f1 / f410 地址
    Fil,
    /// Keccak-256 十六进制地址
    Eth,
    /// Conflux CIP-37 base32 地址
    Cfx,
    /// AElf 双 SHA-256 Base58Check 地址
    Elf,
    /// Terra Classic bech32 地址
    Lunc,
    /// OKT cosmos bech32 地址（兼容十六进制形式）
    Okt,
    /// Solana Base58 地址
    Sol,
    /// Aptos SHA-256 地址（长短两种展示形式）
    Aptos,
    /// Sui Blake2b-256 地址
    Sui,
    /// TON 钱包合约地址（四个候选）
    Ton,
    /// Polkadot SS58 地址
    Dot,
    /// Starknet 账户（地址参与签名摘要，不做推导）
    Stark,
    /// Beacon 链验证者（公钥即地址）
    Beth,
}

/// UTXO 链网络参数（主网版本字节与 segwit 前缀）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtxoNetwork {
    /// P2PKH 版本字节（ZEC 为双字节）
    pub pubkey_hash: &'static [u8],
    /// P2SH 版本字节
    pub script_hash: &'static [u8],
    /// segwit bech32 前缀，不支持 segwit 的链为 None
    pub segwit_hrp: Option<&'static str>,
}

/// 支持的币种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Coin {
    // EVM 系
    Eth,
    Bsc,
    Pol,
    Avax,
    Op,
    Arb,
    Trx,
    // 通用 ECDSA 系
    Fil,
    Cfx,
    Elf,
    Lunc,
    Okt,
    // ed25519 系
    Sol,
    Apt,
    Sui,
    Ton,
    Dot,
    // UTXO 系
    Btc,
    Bch,
    Ltc,
    Doge,
    Dash,
    Btg,
    Dgb,
    Qtum,
    Rvn,
    Zec,
    // 其他曲线
    Stark,
    Beth,
}

/// EVM personal-sign 前缀
pub const ETH_MSG_HEADER: &str = "\x19Ethereum Signed Message:\n";
/// TRON 签名消息前缀（新旧两种长度写法共用）
pub const TRON_MSG_HEADER: &str = "\x19TRON Signed Message:\n";

impl Coin {
    /// 全部注册币种，用于注册表完备性校验
    pub const ALL: &'static [Coin] = &[
        Coin::Eth,
        Coin::Bsc,
        Coin::Pol,
        Coin::Avax,
        Coin::Op,
        Coin::Arb,
        Coin::Trx,
        Coin::Fil,
        Coin::Cfx,
        Coin::Elf,
        Coin::Lunc,
        Coin::Okt,
        Coin::Sol,
        Coin::Apt,
        Coin::Sui,
        Coin::Ton,
        Coin::Dot,
        Coin::Btc,
        Coin::Bch,
        Coin::Ltc,
        Coin::Doge,
        Coin::Dash,
        Coin::Btg,
        Coin::Dgb,
        Coin::Qtum,
        Coin::Rvn,
        Coin::Zec,
        Coin::Stark,
        Coin::Beth,
    ];

    /// 币种符号
    pub fn symbol(&self) -> &'static str {
        match self {
            Coin::Eth => "ETH",
            Coin::Bsc => "BSC",
            Coin::Pol => "POL",
            Coin::Avax => "AVAX",
            Coin::Op => "OP",
            Coin::Arb => "ARB",
            Coin::Trx => "TRX",
            Coin::Fil => "FIL",
            Coin::Cfx => "CFX",
            Coin::Elf => "ELF",
            Coin::Lunc => "LUNC",
            Coin::Okt => "OKT",
            Coin::Sol => "SOL",
            Coin::Apt => "APT",
            Coin::Sui => "SUI",
            Coin::Ton => "TON",
            Coin::Dot => "DOT",
            Coin::Btc => "BTC",
            Coin::Bch => "BCH",
            Coin::Ltc => "LTC",
            Coin::Doge => "DOGE",
            Coin::Dash => "DASH",
            Coin::Btg => "BTG",
            Coin::Dgb => "DGB",
            Coin::Qtum => "QTUM",
            Coin::Rvn => "RVN",
            Coin::Zec => "ZEC",
            Coin::Stark => "STARK",
            Coin::Beth => "BETH",
        }
    }

    /// 签名族
    pub fn sig_family(&self) -> SigFamily {
        match self {
            Coin::Eth | Coin::Bsc | Coin::Pol | Coin::Avax | Coin::Op | Coin::Arb | Coin::Trx => {
                SigFamily::Evm
            }
            Coin::Fil | Coin::Cfx | Coin::Elf | Coin::Lunc | Coin::Okt => SigFamily::Ecdsa,
            Coin::Sol | Coin::Apt | Coin::Sui | Coin::Ton | Coin::Dot => SigFamily::Ed25519,
            Coin::Btc
            | Coin::Bch
            | Coin::Ltc
            | Coin::Doge
            | Coin::Dash
            | Coin::Btg
            | Coin::Dgb
            | Coin::Qtum
            | Coin::Rvn
            | Coin::Zec => SigFamily::Utxo,
            Coin::Stark => SigFamily::Stark,
            Coin::Beth => SigFamily::Bls,
        }
    }

    /// 地址族
    pub fn address_family(&self) -> AddressFamily {
        match self {
            Coin::Eth | Coin::Bsc | Coin::Pol | Coin::Avax | Coin::Op | Coin::Arb | Coin::Trx => {
                AddressFamily::Eth
            }
            Coin::Fil => AddressFamily::Fil,
            Coin::Cfx => AddressFamily::Cfx,
            Coin::Elf => AddressFamily::Elf,
            Coin::Lunc => AddressFamily::Lunc,
            Coin::Okt => AddressFamily::Okt,
            Coin::Sol => AddressFamily::Sol,
            Coin::Apt => AddressFamily::Aptos,
            Coin::Sui => AddressFamily::Sui,
            Coin::Ton => AddressFamily::Ton,
            Coin::Dot => AddressFamily::Dot,
            Coin::Btc
            | Coin::Bch
            | Coin::Ltc
            | Coin::Doge
            | Coin::Dash
            | Coin::Btg
            | Coin::Dgb
            | Coin::Qtum
            | Coin::Rvn
            | Coin::Zec => AddressFamily::Utxo,
            Coin::Stark => AddressFamily::Stark,
            Coin::Beth => AddressFamily::Beth,
        }
    }

    /// 签名消息头模板
    ///
    /// ed25519 / STARK 币种直接对原文（或模板化数据）签名，消息头为空串。
    pub fn message_header(&self) -> &'static str {
        match self {
            Coin::Eth | Coin::Bsc | Coin::Pol | Coin::Avax | Coin::Op | Coin::Arb | Coin::Beth => {
                ETH_MSG_HEADER
            }
            Coin::Trx => TRON_MSG_HEADER,
            Coin::Fil => "Filecoin Signed Message:\n",
            Coin::Cfx => "\x19Conflux Signed Message:\n",
            Coin::Elf => "AElf Signed Message:\n",
            Coin::Lunc => "Terra Signed Message:\n",
            Coin::Okt => ETH_MSG_HEADER,
            Coin::Sol | Coin::Apt | Coin::Sui | Coin::Ton | Coin::Dot | Coin::Stark => "",
            Coin::Btc | Coin::Bch => "Bitcoin Signed Message:\n",
            Coin::Ltc => "Litecoin Signed Message:\n",
            Coin::Doge => "Dogecoin Signed Message:\n",
            Coin::Dash => "DarkCoin Signed Message:\n",
            Coin::Btg => "Bitcoin Gold Signed Message:\n",
            Coin::Dgb => "DigiByte Signed Message:\n",
            Coin::Qtum => "Qtum Signed Message:\n",
            Coin::Rvn => "Raven Signed Message:\n",
            Coin::Zec => "Zcash Signed Message:\n",
        }
    }

    /// UTXO 链主网参数，非 UTXO 链返回 None
    pub fn utxo_network(&self) -> Option<&'static UtxoNetwork> {
        match self {
            Coin::Btc => Some(&BTC_PARAMS),
            // BCH 复用 BTC 版本字节，cash address 形式在比较前先转回 legacy
            Coin::Bch => Some(&BCH_PARAMS),
            Coin::Ltc => Some(&LTC_PARAMS),
            Coin::Doge => Some(&DOGE_PARAMS),
            Coin::Dash => Some(&DASH_PARAMS),
            Coin::Btg => Some(&BTG_PARAMS),
            Coin::Dgb => Some(&DGB_PARAMS),
            Coin::Qtum => Some(&QTUM_PARAMS),
            Coin::Rvn => Some(&RVN_PARAMS),
            Coin::Zec => Some(&ZEC_PARAMS),
            _ => None,
        }
    }
}

// 主网参数表：进程启动即固定，只读访问
static BTC_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x00],
    script_hash: &[0x05],
    segwit_hrp: Some("bc"),
};
static BCH_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x00],
    script_hash: &[0x05],
    segwit_hrp: None,
};
static LTC_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x30],
    script_hash: &[0x32],
    segwit_hrp: Some("ltc"),
};
static DOGE_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x1e],
    script_hash: &[0x16],
    segwit_hrp: None,
};
static DASH_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x4c],
    script_hash: &[0x10],
    segwit_hrp: None,
};
static BTG_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x26],
    script_hash: &[0x17],
    segwit_hrp: Some("btg"),
};
static DGB_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x1e],
    script_hash: &[0x3f],
    segwit_hrp: Some("dgb"),
};
static QTUM_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x3a],
    script_hash: &[0x32],
    segwit_hrp: Some("qc"),
};
static RVN_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x3c],
    script_hash: &[0x7a],
    segwit_hrp: None,
};
static ZEC_PARAMS: UtxoNetwork = UtxoNetwork {
    pubkey_hash: &[0x1c, 0xb8],
    script_hash: &[0x1c, 0xbd],
    segwit_hrp: None,
};

impl FromStr for Coin {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Coin::ALL
            .iter()
            .find(|c| c.symbol() == upper)
            .copied()
            .ok_or_else(|| VerifyError::UnsupportedCoin(s.to_string()))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
