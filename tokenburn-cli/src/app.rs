//! Builds the controller from config and environment

use crate::config::{CliConfig, Secrets};
use anyhow::Context;
use std::sync::Arc;
use tokenburn::erc20::{AlloySignerProvider, Erc20SupplyReader, LocalWalletSession};
use tokenburn::error::{BurnError, Result};
use tokenburn::explorer::ExplorerScanner;
use tokenburn::rates::CoinGeckoApi;
use tokenburn::traits::{BurnSigner, SignerProvider};
use tokenburn::BurnPageController;

/// Signer provider used when no key is configured
#[derive(Debug, Clone, Copy)]
struct NoSigner;

impl SignerProvider for NoSigner {
    fn signer(&self, chain_id: u64) -> Result<Arc<dyn BurnSigner>> {
        Err(BurnError::SignerUnavailable { chain_id })
    }
}

pub fn build_controller(
    mut config: CliConfig,
    secrets: &Secrets,
    chain_id: Option<u64>,
) -> anyhow::Result<BurnPageController> {
    if let Some(chain_id) = chain_id {
        config.burn.default_chain_id = chain_id;
    }
    let active_chain = config.burn.default_chain_id;

    let mut supply = Erc20SupplyReader::new();
    for chain in &config.burn.chains {
        match config.rpc_url(chain.chain_id) {
            Some(rpc) => supply = supply.with_token(chain.chain_id, rpc, chain.burn_target),
            None => tracing::warn!(chain_id = chain.chain_id, "no RPC endpoint, supply unavailable"),
        }
    }

    let mut builder = BurnPageController::builder(config.burn.clone());
    match &secrets.private_key {
        Some(key) => {
            let mut signers = AlloySignerProvider::from_private_key(key)
                .context("TOKENBURN_PRIVATE_KEY")?
                .with_confirmations(config.burn.required_confirmations);
            for chain in &config.burn.chains {
                if let Some(rpc) = config.rpc_url(chain.chain_id) {
                    signers = signers.with_rpc_url(chain.chain_id, rpc);
                }
            }
            tracing::info!(address = %signers.address(), chain_id = active_chain, "signer loaded");
            builder
                .wallet(Arc::new(LocalWalletSession::connected(signers.address(), Some(active_chain))))
                .signers(Arc::new(signers));
        }
        None => {
            builder
                .wallet(Arc::new(LocalWalletSession::disconnected(Some(active_chain))))
                .signers(Arc::new(NoSigner));
        }
    }

    let scanner = ExplorerScanner::new(config.explorer_config(secrets.etherscan_api_key.clone()))?;
    let prices = CoinGeckoApi::new(
        config
            .coingecko
            .clone()
            .with_api_key(secrets.coingecko_api_key.clone()),
    )?;

    Ok(builder
        .scanner(Arc::new(scanner))
        .supply(Arc::new(supply))
        .prices(Arc::new(prices))
        .build()?)
}
