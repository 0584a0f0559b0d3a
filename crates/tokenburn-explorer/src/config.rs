//! Explorer endpoints per chain

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tokenburn_traits::NetworkTier;

/// Etherscan's multichain endpoint; the chain is selected by `chainid`
pub const ETHERSCAN_V2_API: &str = "https://api.etherscan.io/v2/api";

/// One explorer source: a chain and the token contract to list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerChain {
    /// Chain ID, also sent as `chainid`
    pub chain_id: u64,
    /// Display name
    pub name: String,
    /// API base URL
    pub api_url: String,
    /// Token contract whose transactions are listed
    pub token_address: Address,
    /// Whether this source belongs to the testnet tier
    #[serde(default)]
    pub testnet: bool,
}

impl ExplorerChain {
    /// Source served by the Etherscan v2 endpoint
    pub fn etherscan(chain_id: u64, name: impl Into<String>, token_address: Address) -> Self {
        Self {
            chain_id,
            name: name.into(),
            api_url: ETHERSCAN_V2_API.to_string(),
            token_address,
            testnet: false,
        }
    }

    /// Overrides the API base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Marks the source as testnet
    pub fn testnet(mut self, testnet: bool) -> Self {
        self.testnet = testnet;
        self
    }

    /// Tier this source belongs to
    pub fn tier(&self) -> NetworkTier {
        NetworkTier::from_testnet(self.testnet)
    }
}

/// Explorer scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// All sources, both tiers
    #[serde(default)]
    pub chains: Vec<ExplorerChain>,
    /// API key sent as `apikey`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Transactions requested per source
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Client-side request budget
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_page_size() -> u32 {
    1000
}

fn default_requests_per_second() -> u32 {
    5
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            chains: Vec::new(),
            api_key: None,
            page_size: default_page_size(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl ExplorerConfig {
    /// Empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source
    pub fn with_chain(mut self, chain: ExplorerChain) -> Self {
        self.chains.push(chain);
        self
    }

    /// Sets the API key
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Sets the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sources belonging to `tier`
    pub fn chains_for(&self, tier: NetworkTier) -> impl Iterator<Item = &ExplorerChain> {
        self.chains.iter().filter(move |c| c.tier() == tier)
    }
}
