//! Burn submission through an alloy wallet provider

use crate::abi::BurnableToken;
use alloy::network::{EthereumWallet, ReceiptResponse};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokenburn_error::{BurnError, Result};
use tokenburn_traits::{BurnReceipt, BurnSigner, PendingBurn, SignerProvider, TxHash};

/// Hands out chain-bound signers for one local key
#[derive(Debug, Clone)]
pub struct AlloySignerProvider {
    key: PrivateKeySigner,
    rpc_urls: HashMap<u64, String>,
    confirmations: u64,
}

impl AlloySignerProvider {
    pub fn new(key: PrivateKeySigner) -> Self {
        Self {
            key,
            rpc_urls: HashMap::new(),
            confirmations: 1,
        }
    }

    /// Parses a hex private key, with or without `0x`
    pub fn from_private_key(hex: &str) -> Result<Self> {
        let key: PrivateKeySigner = hex
            .trim()
            .parse()
            .map_err(|e| BurnError::ConfigError(format!("invalid private key: {e}")))?;
        Ok(Self::new(key))
    }

    pub fn with_rpc_url(mut self, chain_id: u64, url: impl Into<String>) -> Self {
        self.rpc_urls.insert(chain_id, url.into());
        self
    }

    /// Blocks a receipt must be buried under before it counts
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    pub fn address(&self) -> Address {
        self.key.address()
    }

    pub fn chains(&self) -> impl Iterator<Item = u64> + '_ {
        self.rpc_urls.keys().copied()
    }
}

impl SignerProvider for AlloySignerProvider {
    fn signer(&self, chain_id: u64) -> Result<Arc<dyn BurnSigner>> {
        let rpc_url = self
            .rpc_urls
            .get(&chain_id)
            .ok_or(BurnError::SignerUnavailable { chain_id })?;

        let key = self.key.clone().with_chain_id(Some(chain_id));
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(key))
            .connect_http(rpc_url.parse().map_err(|e| BurnError::RpcConnectionError {
                url: rpc_url.clone(),
                reason: format!("{e}"),
            })?)
            .erased();

        tracing::debug!(chain_id, rpc = %rpc_url, "built burn signer");
        Ok(Arc::new(AlloyBurnSigner {
            chain_id,
            provider,
            confirmations: self.confirmations,
        }))
    }
}

/// Signs and sends `burn(amount)` on one chain
#[derive(Debug, Clone)]
pub struct AlloyBurnSigner {
    chain_id: u64,
    provider: DynProvider,
    confirmations: u64,
}

#[async_trait]
impl BurnSigner for AlloyBurnSigner {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn burn(&self, token: Address, amount: U256) -> Result<Box<dyn PendingBurn>> {
        let contract = BurnableToken::new(token, self.provider.clone());
        let pending = contract
            .burn(amount)
            .send()
            .await
            .map_err(|e| BurnError::BroadcastError(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(chain_id = self.chain_id, %token, hash = %tx_hash, "burn submitted");
        Ok(Box::new(AlloyPendingBurn {
            hash: TxHash::new(tx_hash.to_string()),
            tx_hash,
            provider: self.provider.clone(),
            confirmations: self.confirmations,
        }))
    }
}

/// A submitted burn waiting for its receipt
#[derive(Debug)]
pub struct AlloyPendingBurn {
    hash: TxHash,
    tx_hash: B256,
    provider: DynProvider,
    confirmations: u64,
}

#[async_trait]
impl PendingBurn for AlloyPendingBurn {
    fn hash(&self) -> &TxHash {
        &self.hash
    }

    async fn wait(&self) -> Result<BurnReceipt> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), self.tx_hash)
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| BurnError::TransactionFailed(e.to_string()))?;

        Ok(BurnReceipt {
            hash: self.hash.clone(),
            block_number: receipt.block_number(),
            success: receipt.status(),
        })
    }
}
