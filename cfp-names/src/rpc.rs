//! JSON-RPC client for the naming and factory contracts.
//!
//! Reads go through `eth_call` against the latest block. Authorization
//! transactions go through `eth_sendTransaction`, so signing is left to the
//! node (a development chain with unlocked accounts, or a signing proxy).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use cfp_core::error::{CfpError, Result};
use cfp_core::traits::{Authorizer, CallFactory, NameRegistry, PublicResolver};
use cfp_core::types::{Address, CallId, CallRecord, Node};

use crate::abi::{self, Token};
use crate::config::ChainConfig;

/// JSON-RPC error code used by nodes for reverted calls.
const EXECUTION_REVERTED: i64 = 3;

/// Client for the registry, public resolver and call factory.
pub struct RpcClient {
    config: ChainConfig,
    http_client: reqwest::Client,
    request_id: AtomicU64,
}

impl RpcClient {
    /// Creates a client for `config`.
    pub fn new(config: ChainConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CfpError::HttpError(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
            request_id: AtomicU64::new(1),
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Sends one JSON-RPC request and returns its `result` member.
    #[instrument(skip(self, params), fields(url = %self.config.rpc_url))]
    pub async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        let response = self
            .http_client
            .post(&self.config.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let mut json: Value = response.json().await.map_err(map_transport_error)?;

        if let Some(error) = json.get("error") {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            warn!(method, code, %message, "RPC error");

            return Err(if code == EXECUTION_REVERTED {
                CfpError::Reverted(message)
            } else {
                CfpError::from_rpc(code, message)
            });
        }

        json.get_mut("result")
            .map(Value::take)
            .ok_or_else(|| CfpError::InternalError(format!("{}: response has no result", method)))
    }

    /// Executes a read-only contract call and returns the raw return data.
    pub async fn eth_call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>> {
        let params = json!([
            { "to": to.to_hex(), "data": format!("0x{}", hex::encode(data)) },
            "latest"
        ]);
        let result = self.request("eth_call", params).await?;
        let bytes = decode_hex_result(&result)?;

        if bytes.is_empty() {
            return Err(CfpError::AbiDecode(format!(
                "empty return data from {}",
                to.to_hex()
            )));
        }

        debug!(to = %to, len = bytes.len(), "eth_call returned");
        Ok(bytes)
    }

    /// Submits a transaction from the configured account. Returns its hash.
    pub async fn send_transaction(&self, to: &Address, data: &[u8]) -> Result<String> {
        let from = self.config.from_account.ok_or(CfpError::MissingSender)?;
        let params = json!([{
            "from": from.to_hex(),
            "to": to.to_hex(),
            "data": format!("0x{}", hex::encode(data)),
        }]);

        let result = self.request("eth_sendTransaction", params).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CfpError::InternalError("transaction hash is not a string".into()))
    }

    async fn call_registry(&self, signature: &str, node: Node) -> Result<Address> {
        let data = abi::encode_call(signature, &[Token::FixedBytes(*node.as_bytes())]);
        let out = self.eth_call(&self.config.registry_address, &data).await?;
        abi::decode_address(&out)
    }
}

fn map_transport_error(e: reqwest::Error) -> CfpError {
    if e.is_timeout() {
        CfpError::ConnectionTimeout(e.to_string())
    } else {
        CfpError::HttpError(e.to_string())
    }
}

fn decode_hex_result(result: &Value) -> Result<Vec<u8>> {
    let s = result
        .as_str()
        .ok_or_else(|| CfpError::AbiDecode("result is not a hex string".into()))?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(digits)?)
}

// ═══════════════════════════════════════════════════════════════════════════════
// CAPABILITIES
// ═══════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl NameRegistry for RpcClient {
    async fn resolver(&self, node: Node) -> Result<Address> {
        self.call_registry("resolver(bytes32)", node).await
    }

    async fn owner(&self, node: Node) -> Result<Address> {
        self.call_registry("owner(bytes32)", node).await
    }
}

#[async_trait]
impl PublicResolver for RpcClient {
    async fn addr(&self, node: Node) -> Result<Address> {
        let data = abi::encode_call("addr(bytes32)", &[Token::FixedBytes(*node.as_bytes())]);
        let out = self.eth_call(&self.config.resolver_address, &data).await?;
        abi::decode_address(&out)
    }

    async fn name(&self, node: Node) -> Result<String> {
        let data = abi::encode_call("name(bytes32)", &[Token::FixedBytes(*node.as_bytes())]);
        let out = self.eth_call(&self.config.resolver_address, &data).await?;
        abi::decode_string(&out)
    }

    async fn text(&self, node: Node, key: &str) -> Result<String> {
        let data = abi::encode_call(
            "text(bytes32,string)",
            &[Token::FixedBytes(*node.as_bytes()), Token::String(key.to_string())],
        );
        let out = self.eth_call(&self.config.resolver_address, &data).await?;
        abi::decode_string(&out)
    }
}

#[async_trait]
impl CallFactory for RpcClient {
    async fn calls(&self, call_id: CallId) -> Result<CallRecord> {
        let data = abi::encode_call("calls(bytes32)", &[Token::FixedBytes(*call_id.as_bytes())]);
        let out = self.eth_call(&self.config.factory_address, &data).await?;
        let (creator, cfp) = abi::decode_address_pair(&out)?;
        Ok(CallRecord { creator, cfp })
    }

    async fn is_authorized(&self, address: Address) -> Result<bool> {
        let data = abi::encode_call("isAuthorized(address)", &[Token::Address(address)]);
        let out = self.eth_call(&self.config.factory_address, &data).await?;
        abi::decode_bool(&out)
    }

    async fn pending_users(&self) -> Result<Vec<Address>> {
        let data = abi::encode_call("getAllPending()", &[]);
        let out = self.eth_call(&self.config.factory_address, &data).await?;
        abi::decode_address_array(&out)
    }
}

#[async_trait]
impl Authorizer for RpcClient {
    #[instrument(skip(self))]
    async fn authorize(&self, address: Address) -> Result<String> {
        let data = abi::encode_call("authorize(address)", &[Token::Address(address)]);
        self.send_transaction(&self.config.factory_address, &data).await
    }
}
