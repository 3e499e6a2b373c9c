//! Chain connection configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use cfp_core::constants::{DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECONDS};
use cfp_core::error::{CfpError, Result};
use cfp_core::types::Address;

/// Where the contracts live and how to reach the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Naming registry contract
    pub registry_address: Address,
    /// Public resolver contract
    pub resolver_address: Address,
    /// Call factory contract
    pub factory_address: Address,
    /// Account used as `from` for transactions (node-managed signing)
    pub from_account: Option<Address>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.into(),
            registry_address: Address::zero(),
            resolver_address: Address::zero(),
            factory_address: Address::zero(),
            from_account: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ChainConfig {
    /// Creates a configuration for `rpc_url` with unset contract addresses.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Default::default()
        }
    }

    /// Sets the registry address.
    pub fn with_registry(mut self, address: Address) -> Self {
        self.registry_address = address;
        self
    }

    /// Sets the public resolver address.
    pub fn with_resolver(mut self, address: Address) -> Self {
        self.resolver_address = address;
        self
    }

    /// Sets the call factory address.
    pub fn with_factory(mut self, address: Address) -> Self {
        self.factory_address = address;
        self
    }

    /// Sets the transaction sender.
    pub fn with_from_account(mut self, address: Address) -> Self {
        self.from_account = Some(address);
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Loads configuration from the process environment (and `.env` if present).
    ///
    /// | Variable               | Field              |
    /// |------------------------|--------------------|
    /// | `CFP_RPC_URL`          | `rpc_url`          |
    /// | `CFP_REGISTRY_ADDRESS` | `registry_address` |
    /// | `CFP_RESOLVER_ADDRESS` | `resolver_address` |
    /// | `CFP_FACTORY_ADDRESS`  | `factory_address`  |
    /// | `CFP_FROM_ACCOUNT`     | `from_account`     |
    /// | `CFP_TIMEOUT_SECONDS`  | `timeout_seconds`  |
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CFP_RPC_URL") {
            config.rpc_url = url;
        }
        if let Some(addr) = lookup("CFP_REGISTRY_ADDRESS") {
            config.registry_address = parse_address("CFP_REGISTRY_ADDRESS", &addr)?;
        }
        if let Some(addr) = lookup("CFP_RESOLVER_ADDRESS") {
            config.resolver_address = parse_address("CFP_RESOLVER_ADDRESS", &addr)?;
        }
        if let Some(addr) = lookup("CFP_FACTORY_ADDRESS") {
            config.factory_address = parse_address("CFP_FACTORY_ADDRESS", &addr)?;
        }
        if let Some(addr) = lookup("CFP_FROM_ACCOUNT") {
            config.from_account = Some(parse_address("CFP_FROM_ACCOUNT", &addr)?);
        }
        if let Some(secs) = lookup("CFP_TIMEOUT_SECONDS") {
            config.timeout_seconds = secs.trim().parse().map_err(|_| {
                CfpError::ConfigError(format!("CFP_TIMEOUT_SECONDS: not a number: {}", secs))
            })?;
        }

        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Checks that the endpoint parses and every contract address is set.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.rpc_url)
            .map_err(|e| CfpError::ConfigError(format!("rpc_url '{}': {}", self.rpc_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CfpError::ConfigError(format!(
                "rpc_url must be http(s), got '{}'",
                url.scheme()
            )));
        }

        for (field, address) in [
            ("registry_address", &self.registry_address),
            ("resolver_address", &self.resolver_address),
            ("factory_address", &self.factory_address),
        ] {
            if address.is_zero() {
                return Err(CfpError::ConfigError(format!("{} is not set", field)));
            }
        }

        if self.timeout_seconds == 0 {
            return Err(CfpError::ConfigError("timeout_seconds must be positive".into()));
        }

        Ok(())
    }
}

fn parse_address(var: &str, value: &str) -> Result<Address> {
    Address::from_hex(value).map_err(|_| CfpError::ConfigError(format!("{}: invalid address '{}'", var, value)))
}
