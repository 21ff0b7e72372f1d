//! 金额单位换算

use ethers::{types::U256, utils::format_units as ethers_format_units};

/// 以太坊单位小数位
pub const ETHER_DECIMALS: u32 = 18;

/// 最小单位整数 → 显示字符串
///
/// 小数部分去掉末尾零但至少保留一位：`0` → `"0.0"`，`1500000000000000000` → `"1.5"`。
pub fn format_units(value: U256, decimals: u32) -> anyhow::Result<String> {
    let formatted = ethers_format_units(value, decimals)?;

    let (integer, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        Ok(format!("{}.0", integer))
    } else {
        Ok(format!("{}.{}", integer, fraction))
    }
}
