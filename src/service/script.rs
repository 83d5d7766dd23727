//! UTXO 赎回脚本核验
//!
//! 把赎回 / 见证脚本绑定到恢复出的公钥：
//! P2PKH 直接比对公钥地址；P2SH / P2WSH 先比对脚本承诺，
//! 再解析多签脚本并检查签名者集合。

use bitcoin::opcodes::all::OP_CHECKMULTISIG;
use bitcoin::script::{Instruction, Script};

use crate::domain::coin::Coin;
use crate::error::VerifyError;
use crate::service::address::utxo::{
    cash_to_legacy, classify_address, is_cash_address, p2pkh_address, p2sh_address,
    p2wsh_address, UtxoAddressKind,
};
use crate::utils::codec::decode_hex;

/// 校验声称地址、赎回脚本与恢复公钥三者的一致性
///
/// 集合检查是"最多一个剩余"：{P2PKH(pub1), 声称地址, P2PKH(pub2)} 去掉
/// 脚本内公钥推导出的地址后，至多剩一个元素。P2SH/P2WSH 的声称地址
/// 永远不会等于任何 P2PKH 编码，它恰好占掉这一个余量，因此提供的
/// 每一个公钥都必须出现在脚本的签名者集合里。
pub fn validate_script(
    coin: Coin,
    claimed: &str,
    script_hex: Option<&str>,
    pub1: &[u8],
    pub2: Option<&[u8]>,
) -> Result<(), VerifyError> {
    let network = coin
        .utxo_network()
        .ok_or_else(|| VerifyError::UnsupportedCoin(coin.to_string()))?;

    // cash address 与 legacy 是同一载荷的两种编码，先归一化
    let claimed = if coin == Coin::Bch && is_cash_address(claimed) {
        cash_to_legacy(claimed)?
    } else {
        claimed.to_string()
    };

    let kind = classify_address(network, &claimed)?;
    match kind {
        UtxoAddressKind::P2pkh => {
            let derived = p2pkh_address(network, pub1);
            if derived != claimed {
                return Err(VerifyError::AddressMismatch {
                    coin: coin.to_string(),
                    claimed,
                    candidates: vec![derived],
                });
            }
            Ok(())
        }
        UtxoAddressKind::P2sh | UtxoAddressKind::P2wsh => {
            let script_hex = script_hex.ok_or_else(|| VerifyError::ScriptMismatch {
                coin: coin.to_string(),
                claimed: claimed.clone(),
                stage: "redeem script missing".into(),
            })?;
            let script = decode_hex(script_hex)?;

            let commitment = match kind {
                UtxoAddressKind::P2sh => p2sh_address(network, &script),
                UtxoAddressKind::P2wsh => p2wsh_address(network, &script)?,
                UtxoAddressKind::P2pkh => unreachable!(),
            };
            if !commitment.eq_ignore_ascii_case(&claimed) {
                return Err(VerifyError::ScriptMismatch {
                    coin: coin.to_string(),
                    claimed,
                    stage: "script hash".into(),
                });
            }

            let keys = extract_multisig_keys(&script).ok_or_else(|| {
                VerifyError::ScriptMismatch {
                    coin: coin.to_string(),
                    claimed: claimed.clone(),
                    stage: "script type".into(),
                }
            })?;
            let signer_addrs: Vec<String> = keys
                .iter()
                .map(|k| p2pkh_address(network, k))
                .collect();

            let mut pending: std::collections::HashSet<String> =
                [p2pkh_address(network, pub1), claimed.clone()].into();
            if let Some(pub2) = pub2 {
                pending.insert(p2pkh_address(network, pub2));
            }
            for signer in &signer_addrs {
                pending.remove(signer);
            }
            if pending.len() > 1 {
                return Err(VerifyError::ScriptMismatch {
                    coin: coin.to_string(),
                    claimed,
                    stage: "signer set".into(),
                });
            }
            Ok(())
        }
    }
}

/// 解析标准多签脚本 OP_m <pk...> OP_n OP_CHECKMULTISIG，返回公钥列表
///
/// 任何偏离该模板的脚本都不是多签，返回 None。
fn extract_multisig_keys(script_bytes: &[u8]) -> Option<Vec<Vec<u8>>> {
    let script = Script::from_bytes(script_bytes);
    let mut instructions = script.instructions();

    let m = pushnum(&instructions.next()?.ok()?)?;

    let mut keys: Vec<Vec<u8>> = Vec::new();
    let n = loop {
        let inst = instructions.next()?.ok()?;
        if let Some(n) = pushnum(&inst) {
            break n;
        }
        match inst {
            Instruction::PushBytes(bytes) => {
                let bytes = bytes.as_bytes();
                if bytes.len() != 33 && bytes.len() != 65 {
                    return None;
                }
                keys.push(bytes.to_vec());
            }
            _ => return None,
        }
    };

    match instructions.next()?.ok()? {
        Instruction::Op(op) if op == OP_CHECKMULTISIG => {}
        _ => return None,
    }
    if instructions.next().is_some() {
        return None;
    }
    if keys.is_empty() || keys.len() != n as usize || m == 0 || m > n {
        return None;
    }
    Some(keys)
}

fn pushnum(inst: &Instruction) -> Option<u8> {
    if let Instruction::Op(op) = inst {
        let v = op.to_u8();
        if (0x51..=0x60).contains(&v) {
            return Some(v - 0x50);
        }
    }
    None
}
