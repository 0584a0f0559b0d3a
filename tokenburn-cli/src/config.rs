//! Configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokenburn::erc20::EvmChain;
use tokenburn::explorer::{ExplorerChain, ExplorerConfig, ETHERSCAN_V2_API};
use tokenburn::rates::CoinGeckoConfig;
use tokenburn::BurnConfig;

pub const DEFAULT_CONFIG_PATH: &str = "tokenburn.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub burn: BurnConfig,
    #[serde(default)]
    pub explorer: ExplorerSettings,
    #[serde(default)]
    pub coingecko: CoinGeckoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerSettings {
    /// Used for chains without their own `explorer_api_url`
    #[serde(default = "default_explorer_api")]
    pub api_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_explorer_api() -> String {
    ETHERSCAN_V2_API.to_string()
}

fn default_page_size() -> u32 {
    1000
}

fn default_requests_per_second() -> u32 {
    5
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            api_url: default_explorer_api(),
            page_size: default_page_size(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

/// Values that never live in the config file
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub private_key: Option<String>,
    pub etherscan_api_key: Option<String>,
    pub coingecko_api_key: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            private_key: var("TOKENBURN_PRIVATE_KEY"),
            etherscan_api_key: var("ETHERSCAN_API_KEY"),
            coingecko_api_key: var("COINGECKO_API_KEY"),
        }
    }
}

impl CliConfig {
    /// Loads `path`, or `tokenburn.json` when present, or the defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };
        if !explicit && !path.exists() {
            tracing::warn!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.burn.validate()?;
        tracing::debug!(path = %path.display(), chains = config.burn.chains.len(), "config loaded");
        Ok(config)
    }

    /// Configured RPC, else the public default for known chains
    pub fn rpc_url(&self, chain_id: u64) -> Option<String> {
        self.burn
            .rpc_url(chain_id)
            .map(str::to_string)
            .or_else(|| EvmChain::from_chain_id(chain_id).map(|c| c.default_rpc().to_string()))
    }

    pub fn explorer_config(&self, api_key: Option<String>) -> ExplorerConfig {
        let mut config = ExplorerConfig {
            requests_per_second: self.explorer.requests_per_second,
            ..ExplorerConfig::new()
        }
        .with_page_size(self.explorer.page_size)
        .with_api_key(api_key);

        for chain in &self.burn.chains {
            let api_url = chain
                .explorer_api_url
                .clone()
                .unwrap_or_else(|| self.explorer.api_url.clone());
            config = config.with_chain(
                ExplorerChain::etherscan(chain.chain_id, chain.name.clone(), chain.burn_target)
                    .with_api_url(api_url)
                    .testnet(chain.testnet),
            );
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokenburn::traits::NetworkTier;

    const SAMPLE: &str = r#"{
        "default_chain_id": 11155111,
        "coingecko_id": "app-token",
        "chains": [
            {
                "chain_id": 1,
                "name": "Ethereum",
                "burn_target": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                "rpc_url": "http://localhost:8545"
            },
            {
                "chain_id": 11155111,
                "name": "Sepolia",
                "burn_target": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
                "explorer_api_url": "http://localhost:9000/api",
                "testnet": true
            }
        ],
        "explorer": { "page_size": 50 }
    }"#;

    fn write_sample() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_sample() {
        let file = write_sample();
        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.burn.default_chain_id, 11155111);
        assert_eq!(config.burn.chains.len(), 2);
        assert_eq!(config.burn.coingecko_id.as_deref(), Some("app-token"));
        assert_eq!(config.explorer.page_size, 50);
        assert_eq!(config.explorer.api_url, ETHERSCAN_V2_API);
    }

    #[test]
    fn test_explicit_missing_file_errors() {
        assert!(CliConfig::load(Some(Path::new("/nonexistent/tokenburn.json"))).is_err());
    }

    #[test]
    fn test_rpc_url_fallback() {
        let file = write_sample();
        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.rpc_url(1).as_deref(), Some("http://localhost:8545"));
        assert_eq!(
            config.rpc_url(11155111).as_deref(),
            Some(EvmChain::Sepolia.default_rpc())
        );
        assert_eq!(config.rpc_url(31337), None);
    }

    #[test]
    fn test_explorer_config() {
        let file = write_sample();
        let config = CliConfig::load(Some(file.path())).unwrap();
        let explorer = config.explorer_config(Some("key".into()));
        assert_eq!(explorer.page_size, 50);
        assert_eq!(explorer.api_key.as_deref(), Some("key"));
        let testnet: Vec<_> = explorer.chains_for(NetworkTier::Testnet).collect();
        assert_eq!(testnet.len(), 1);
        assert_eq!(testnet[0].api_url, "http://localhost:9000/api");
        let mainnet: Vec<_> = explorer.chains_for(NetworkTier::Mainnet).collect();
        assert_eq!(mainnet[0].api_url, ETHERSCAN_V2_API);
    }
}
