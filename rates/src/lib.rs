//! # tokenburn Rates
//!
//! Token prices from CoinGecko's `simple/price` endpoint. The burn page uses
//! them to show the value of what was destroyed; the burn workflow itself
//! never depends on a price.
//!
//! ```no_run
//! # async fn example() -> tokenburn_error::Result<()> {
//! use tokenburn_rates::{CoinGeckoApi, CoinGeckoConfig};
//! use tokenburn_traits::PriceApi;
//!
//! let api = CoinGeckoApi::new(CoinGeckoConfig::default())?;
//! let usd = api.price_usd("ethereum").await?;
//! println!("ETH = ${usd}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokenburn_error::{BurnError, Result};
use tokenburn_provider::{HttpClient, HttpClientConfig, ProviderError, RateLimitConfig};
use tokenburn_traits::PriceApi;

/// Public API root
pub const COINGECKO_API: &str = "https://api.coingecko.com/api/v3";

/// `{ coin_id: { currency: price } }`
pub type PriceTable = HashMap<String, HashMap<String, f64>>;

/// CoinGecko client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinGeckoConfig {
    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Demo API key
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    COINGECKO_API.to_string()
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

impl CoinGeckoConfig {
    /// Overrides the API root
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the demo API key
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }
}

/// CoinGecko price client
#[derive(Debug)]
pub struct CoinGeckoApi {
    config: CoinGeckoConfig,
    client: HttpClient,
}

impl CoinGeckoApi {
    /// Builds a client limited to the public tier's request rate
    pub fn new(config: CoinGeckoConfig) -> Result<Self> {
        let rate_limit = RateLimitConfig {
            requests_per_second: 1,
            burst_size: 5,
        };
        let client = HttpClient::with_config(HttpClientConfig::default(), Some(rate_limit))?;
        Ok(Self { config, client })
    }

    /// Prices of `ids` in each of `vs_currencies`
    pub async fn simple_price(&self, ids: &[&str], vs_currencies: &[&str]) -> Result<PriceTable> {
        let url = format!("{}/simple/price", self.config.base_url.trim_end_matches('/'));
        let ids = ids.join(",");
        let vs = vs_currencies.join(",");
        let mut query = vec![("ids", ids.as_str()), ("vs_currencies", vs.as_str())];
        if let Some(key) = &self.config.api_key {
            query.push(("x_cg_demo_api_key", key.as_str()));
        }
        let table: PriceTable = self
            .client
            .get_json(&url, &query)
            .await
            .map_err(|e| match e {
                ProviderError::RateLimited => BurnError::from(e),
                other => BurnError::PriceError(other.to_string()),
            })?;
        tracing::debug!(coins = table.len(), "fetched prices");
        Ok(table)
    }
}

#[async_trait]
impl PriceApi for CoinGeckoApi {
    async fn price_usd(&self, coin_id: &str) -> Result<f64> {
        let table = self.simple_price(&[coin_id], &["usd"]).await?;
        table
            .get(coin_id)
            .and_then(|prices| prices.get("usd"))
            .copied()
            .ok_or_else(|| BurnError::PriceNotFound(coin_id.to_string()))
    }
}
