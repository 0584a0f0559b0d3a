//! Burn page configuration
//!
//! Everything chain-specific the controller needs is injected through
//! [`BurnConfig`]: which contract receives `burn` on each chain, which chains
//! are testnets, the token's decimals and how long to wait for a receipt.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tokenburn_error::{BurnError, Result};
use tokenburn_resilience::TimeoutConfig;
use tokenburn_traits::NetworkTier;

/// One chain the token is deployed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// EIP-155 chain ID
    pub chain_id: u64,
    /// Display name
    pub name: String,
    /// Token contract that receives `burn(uint256)`
    pub burn_target: Address,
    /// JSON-RPC endpoint used for signing and supply reads
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Etherscan-compatible API root for burn history
    #[serde(default)]
    pub explorer_api_url: Option<String>,
    /// Marks the chain as a testnet for history queries
    #[serde(default)]
    pub testnet: bool,
}

impl ChainConfig {
    pub fn new(chain_id: u64, name: impl Into<String>, burn_target: Address) -> Self {
        Self {
            chain_id,
            name: name.into(),
            burn_target,
            rpc_url: None,
            explorer_api_url: None,
            testnet: false,
        }
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    pub fn with_explorer_api_url(mut self, url: impl Into<String>) -> Self {
        self.explorer_api_url = Some(url.into());
        self
    }

    pub fn testnet(mut self, testnet: bool) -> Self {
        self.testnet = testnet;
        self
    }
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnConfig {
    /// Chain used when the wallet does not report one
    #[serde(default = "default_chain_id")]
    pub default_chain_id: u64,
    /// Decimals of the burnable token
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,
    /// Blocks a burn receipt must be buried under
    #[serde(default = "default_required_confirmations")]
    pub required_confirmations: u64,
    /// Request and confirmation budgets
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    /// CoinGecko id of the token, if it is listed
    #[serde(default)]
    pub coingecko_id: Option<String>,
    /// Deployments of the token
    #[serde(default)]
    pub chains: Vec<ChainConfig>,
}

fn default_chain_id() -> u64 {
    1
}

fn default_token_decimals() -> u8 {
    18
}

fn default_required_confirmations() -> u64 {
    1
}

impl Default for BurnConfig {
    fn default() -> Self {
        Self {
            default_chain_id: default_chain_id(),
            token_decimals: default_token_decimals(),
            required_confirmations: default_required_confirmations(),
            timeouts: TimeoutConfig::default(),
            coingecko_id: None,
            chains: Vec::new(),
        }
    }
}

impl BurnConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chain(mut self, chain: ChainConfig) -> Self {
        self.chains.retain(|c| c.chain_id != chain.chain_id);
        self.chains.push(chain);
        self
    }

    pub fn with_default_chain_id(mut self, chain_id: u64) -> Self {
        self.default_chain_id = chain_id;
        self
    }

    pub fn with_token_decimals(mut self, decimals: u8) -> Self {
        self.token_decimals = decimals;
        self
    }

    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts = self.timeouts.with_confirmation(timeout);
        self
    }

    pub fn with_coingecko_id(mut self, id: impl Into<String>) -> Self {
        self.coingecko_id = Some(id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        // parse_units accepts at most 77 decimals
        if self.token_decimals > 77 {
            return Err(BurnError::ConfigError(format!(
                "token_decimals must be at most 77, got {}",
                self.token_decimals
            )));
        }
        if self.timeouts.confirmation.is_zero() {
            return Err(BurnError::ConfigError(
                "confirmation timeout must be greater than zero".into(),
            ));
        }
        if self.timeouts.request.is_zero() {
            return Err(BurnError::ConfigError(
                "request timeout must be greater than zero".into(),
            ));
        }
        let mut seen = HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.chain_id) {
                return Err(BurnError::ConfigError(format!(
                    "chain {} is configured twice",
                    chain.chain_id
                )));
            }
            if chain.burn_target.is_zero() {
                return Err(BurnError::ConfigError(format!(
                    "chain {} has a zero burn target",
                    chain.chain_id
                )));
            }
        }
        Ok(())
    }

    pub fn chain(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains.iter().find(|c| c.chain_id == chain_id)
    }

    /// Contract that receives `burn` on `chain_id`
    pub fn resolve_burn_target(&self, chain_id: u64) -> Result<Address> {
        self.chain(chain_id)
            .map(|c| c.burn_target)
            .ok_or(BurnError::BurnTargetNotConfigured { chain_id })
    }

    /// Unknown chains count as mainnet
    pub fn is_testnet(&self, chain_id: u64) -> bool {
        self.chain(chain_id).is_some_and(|c| c.testnet)
    }

    pub fn network_tier(&self, chain_id: u64) -> NetworkTier {
        NetworkTier::from_testnet(self.is_testnet(chain_id))
    }

    pub fn rpc_url(&self, chain_id: u64) -> Option<&str> {
        self.chain(chain_id).and_then(|c| c.rpc_url.as_deref())
    }

    pub fn confirmation_timeout(&self) -> Duration {
        self.timeouts.confirmation
    }
}
