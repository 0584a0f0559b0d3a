//! [`ChainScanner`] backed by explorer REST calls

use crate::config::{ExplorerChain, ExplorerConfig};
use crate::response::ExplorerResponse;
use async_trait::async_trait;
use futures::future::try_join_all;
use tokenburn_error::Result;
use tokenburn_provider::{HttpClient, HttpClientConfig, RateLimitConfig};
use tokenburn_traits::{ChainScanner, NetworkTier, TransactionRecord};

/// Lists token transactions from every configured explorer source
#[derive(Debug)]
pub struct ExplorerScanner {
    config: ExplorerConfig,
    client: HttpClient,
}

impl ExplorerScanner {
    /// Builds a scanner with a rate-limited client sized from the config
    pub fn new(config: ExplorerConfig) -> Result<Self> {
        let rate_limit = RateLimitConfig {
            requests_per_second: config.requests_per_second,
            burst_size: config.requests_per_second,
        };
        let client = HttpClient::with_config(HttpClientConfig::default(), Some(rate_limit))?;
        Ok(Self::with_client(config, client))
    }

    /// Builds a scanner around an existing client
    pub fn with_client(config: ExplorerConfig, client: HttpClient) -> Self {
        Self { config, client }
    }

    /// Scanner configuration
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Fetches and decodes the transaction list of one source
    pub async fn fetch_chain(&self, chain: &ExplorerChain) -> Result<Vec<TransactionRecord>> {
        let chain_id = chain.chain_id.to_string();
        let address = chain.token_address.to_string();
        let offset = self.config.page_size.to_string();
        let mut query = vec![
            ("chainid", chain_id.as_str()),
            ("module", "account"),
            ("action", "txlist"),
            ("address", address.as_str()),
            ("startblock", "0"),
            ("endblock", "99999999"),
            ("page", "1"),
            ("offset", offset.as_str()),
            ("sort", "desc"),
        ];
        if let Some(key) = &self.config.api_key {
            query.push(("apikey", key.as_str()));
        }

        let response: ExplorerResponse = self.client.get_json(&chain.api_url, &query).await?;
        let records = response
            .into_transactions()?
            .into_iter()
            .map(|tx| tx.into_record(chain.chain_id))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(chain = %chain.name, count = records.len(), "fetched explorer transactions");
        Ok(records)
    }
}

#[async_trait]
impl ChainScanner for ExplorerScanner {
    async fn fetch_all(&self, tier: NetworkTier) -> Result<Vec<Vec<TransactionRecord>>> {
        let sources: Vec<_> = self.config.chains_for(tier).collect();
        if sources.is_empty() {
            tracing::warn!(%tier, "no explorer sources configured");
        }
        try_join_all(sources.into_iter().map(|chain| self.fetch_chain(chain))).await
    }
}
