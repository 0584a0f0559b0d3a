//! EVM chains the burn page knows by chain ID

use serde::{Deserialize, Serialize};
use tokenburn_traits::NetworkTier;

/// EVM Chain identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvmChain {
    Ethereum = 1,
    Optimism = 10,
    Bsc = 56,
    Polygon = 137,
    Base = 8453,
    Arbitrum = 42161,
    Avalanche = 43114,
    BscTestnet = 97,
    Holesky = 17000,
    PolygonAmoy = 80002,
    BaseSepolia = 84532,
    ArbitrumSepolia = 421614,
    Sepolia = 11155111,
}

impl EvmChain {
    pub const ALL: [EvmChain; 13] = [
        Self::Ethereum,
        Self::Optimism,
        Self::Bsc,
        Self::Polygon,
        Self::Base,
        Self::Arbitrum,
        Self::Avalanche,
        Self::BscTestnet,
        Self::Holesky,
        Self::PolygonAmoy,
        Self::BaseSepolia,
        Self::ArbitrumSepolia,
        Self::Sepolia,
    ];

    /// Looks up a known chain
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.chain_id() == chain_id)
    }

    /// Get chain ID
    pub fn chain_id(&self) -> u64 {
        *self as u64
    }

    /// Get chain name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Optimism => "Optimism",
            Self::Bsc => "BNB Smart Chain",
            Self::Polygon => "Polygon",
            Self::Base => "Base",
            Self::Arbitrum => "Arbitrum",
            Self::Avalanche => "Avalanche",
            Self::BscTestnet => "BNB Smart Chain Testnet",
            Self::Holesky => "Holesky",
            Self::PolygonAmoy => "Polygon Amoy",
            Self::BaseSepolia => "Base Sepolia",
            Self::ArbitrumSepolia => "Arbitrum Sepolia",
            Self::Sepolia => "Sepolia",
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(
            self,
            Self::BscTestnet
                | Self::Holesky
                | Self::PolygonAmoy
                | Self::BaseSepolia
                | Self::ArbitrumSepolia
                | Self::Sepolia
        )
    }

    pub fn tier(&self) -> NetworkTier {
        NetworkTier::from_testnet(self.is_testnet())
    }

    /// Get default RPC endpoint
    pub fn default_rpc(&self) -> &'static str {
        match self {
            Self::Ethereum => "https://eth.llamarpc.com",
            Self::Optimism => "https://mainnet.optimism.io",
            Self::Bsc => "https://bsc-dataseed.bnbchain.org",
            Self::Polygon => "https://polygon-rpc.com",
            Self::Base => "https://mainnet.base.org",
            Self::Arbitrum => "https://arb1.arbitrum.io/rpc",
            Self::Avalanche => "https://api.avax.network/ext/bc/C/rpc",
            Self::BscTestnet => "https://data-seed-prebsc-1-s1.bnbchain.org:8545",
            Self::Holesky => "https://ethereum-holesky-rpc.publicnode.com",
            Self::PolygonAmoy => "https://rpc-amoy.polygon.technology",
            Self::BaseSepolia => "https://sepolia.base.org",
            Self::ArbitrumSepolia => "https://sepolia-rollup.arbitrum.io/rpc",
            Self::Sepolia => "https://ethereum-sepolia-rpc.publicnode.com",
        }
    }
}
