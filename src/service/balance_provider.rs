//! 余额来源实现
//!
//! - `JsonRpcBalanceProvider`：EVM JSON-RPC `eth_getBalance`
//! - `ZeroBalanceProvider`：未配置 RPC 时的占位来源

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use ethers::types::U256;
use serde::{Deserialize, Serialize};

use crate::domain::balance::BalanceProvider;

/// EVM JSON-RPC 余额查询
#[derive(Clone)]
pub struct JsonRpcBalanceProvider {
    name: String,
    rpc_url: String,
    client: reqwest::Client,
}

impl JsonRpcBalanceProvider {
    /// `request_timeout` 是 HTTP 层超时，调用方仍可在外层再包一层
    pub fn new(
        name: impl Into<String>,
        rpc_url: impl Into<String>,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to build RPC HTTP client")?;

        Ok(Self {
            name: name.into(),
            rpc_url: rpc_url.into(),
            client,
        })
    }
}

#[async_trait]
impl BalanceProvider for JsonRpcBalanceProvider {
    async fn get_balance(&self, address: &str) -> anyhow::Result<U256> {
        let params = vec![
            serde_json::Value::String(address.into()),
            serde_json::Value::String("latest".into()),
        ];
        let req = JsonRpcRequest::new("eth_getBalance", params);

        let resp = self
            .client
            .post(&self.rpc_url)
            .json(&req)
            .send()
            .await
            .with_context(|| format!("{}: eth_getBalance request failed", self.name))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("{}: RPC returned HTTP {}", self.name, status);
        }

        let body: JsonRpcResponse<String> = resp
            .json()
            .await
            .with_context(|| format!("{}: invalid JSON-RPC response", self.name))?;

        if let Some(error) = body.error {
            anyhow::bail!("{}: RPC error {}", self.name, error);
        }

        let hex = body
            .result
            .ok_or_else(|| anyhow::anyhow!("{}: RPC response has no result", self.name))?;

        parse_hex_quantity(&hex)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// 固定返回 0
#[derive(Debug, Clone, Default)]
pub struct ZeroBalanceProvider;

#[async_trait]
impl BalanceProvider for ZeroBalanceProvider {
    async fn get_balance(&self, _address: &str) -> anyhow::Result<U256> {
        Ok(U256::zero())
    }

    fn name(&self) -> &str {
        "zero"
    }
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    method: &'a str,
    params: Vec<serde_json::Value>,
    id: u64,
}

impl<'a> JsonRpcRequest<'a> {
    fn new(method: &'a str, params: Vec<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        }
    }
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<serde_json::Value>,
}

/// 解析 JSON-RPC 十六进制数量（"0x0" / "0x1bc16d674ec80000"）
pub fn parse_hex_quantity(s: &str) -> anyhow::Result<U256> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| anyhow::anyhow!("quantity is not 0x-prefixed: {}", s))?;

    if digits.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_str_radix(digits, 16)
        .map_err(|e| anyhow::anyhow!("invalid hex quantity {}: {:?}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(parse_hex_quantity("0x0").unwrap(), U256::zero());
        assert_eq!(parse_hex_quantity("0x").unwrap(), U256::zero());
        assert_eq!(
            parse_hex_quantity("0x14d1120d7b160000").unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        // 超出 u128 的余额
        assert_eq!(
            parse_hex_quantity("0x100000000000000000000000000000000").unwrap(),
            U256::from(u128::MAX) + U256::one()
        );
        assert!(parse_hex_quantity("123").is_err());
        assert!(parse_hex_quantity("0xzz").is_err());
    }

    #[test]
    fn test_request_shape() {
        let req = JsonRpcRequest::new("eth_getBalance", vec!["0xabc".into(), "latest".into()]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "eth_getBalance");
        assert_eq!(json["params"][1], "latest");
    }

    #[tokio::test]
    async fn test_zero_provider() {
        assert!(ZeroBalanceProvider
            .get_balance("0xabc")
            .await
            .unwrap()
            .is_zero());
    }

    #[tokio::test]
    async fn test_unreachable_rpc_is_error() {
        let provider = JsonRpcBalanceProvider::new(
            "eth",
            "http://127.0.0.1:1",
            Duration::from_millis(500),
        )
        .unwrap();
        assert!(provider.get_balance("0xabc").await.is_err());
    }
}
