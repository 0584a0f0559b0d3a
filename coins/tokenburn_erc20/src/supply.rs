//! Total supply reads per chain

use crate::adapter::{BurnableAdapter, BurnableTokenAdapter};
use alloy::primitives::Address;
use async_trait::async_trait;
use std::collections::HashMap;
use tokenburn_error::{BurnError, Result};
use tokenburn_traits::{SupplyReader, SupplySnapshot};

#[derive(Debug, Clone)]
struct Deployment {
    rpc_url: String,
    adapter: BurnableTokenAdapter,
}

/// [`SupplyReader`] calling `totalSupply()` on each configured deployment
#[derive(Debug, Clone, Default)]
pub struct Erc20SupplyReader {
    deployments: HashMap<u64, Deployment>,
}

impl Erc20SupplyReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, chain_id: u64, rpc_url: impl Into<String>, token: Address) -> Self {
        self.deployments.insert(
            chain_id,
            Deployment {
                rpc_url: rpc_url.into(),
                adapter: BurnableTokenAdapter::new(token),
            },
        );
        self
    }

    pub fn token(&self, chain_id: u64) -> Option<Address> {
        self.deployments.get(&chain_id).map(|d| d.adapter.contract_address())
    }
}

#[async_trait]
impl SupplyReader for Erc20SupplyReader {
    async fn fetch_supply(&self, chain_id: u64) -> Result<SupplySnapshot> {
        let deployment = self
            .deployments
            .get(&chain_id)
            .ok_or(BurnError::BurnTargetNotConfigured { chain_id })?;

        let total_supply = deployment
            .adapter
            .total_supply(&deployment.rpc_url)
            .await
            .map_err(BurnError::from)?;

        tracing::debug!(chain_id, %total_supply, "read total supply");
        Ok(SupplySnapshot {
            chain_id,
            total_supply,
        })
    }
}
