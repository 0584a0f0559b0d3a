//! Read-only access to a burnable token contract

use crate::abi::BurnableToken::totalSupplyCall;
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use thiserror::Error;
use tokenburn_error::BurnError;

/// Error type for ERC-20 operations
#[derive(Debug, Error)]
pub enum Erc20Error {
    /// Contract call failed
    #[error("Contract error: {0}")]
    ContractError(String),
    /// Provider error
    #[error("Provider error: {0}")]
    ProviderError(String),
}

impl From<Erc20Error> for BurnError {
    fn from(err: Erc20Error) -> Self {
        match err {
            Erc20Error::ContractError(e) => BurnError::ContractError(e),
            Erc20Error::ProviderError(e) => BurnError::RpcConnectionError {
                url: String::new(),
                reason: e,
            },
        }
    }
}

/// View calls the burn page makes against the token
#[async_trait]
pub trait BurnableAdapter: Send + Sync {
    /// Returns the contract address for this token
    fn contract_address(&self) -> Address;

    /// Returns the total supply
    async fn total_supply(&self, rpc_url: &str) -> Result<U256, Erc20Error>;
}

/// [`BurnableAdapter`] for one deployment of the token
#[derive(Debug, Clone, Copy)]
pub struct BurnableTokenAdapter {
    address: Address,
}

impl BurnableTokenAdapter {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    async fn call_contract<C: SolCall>(&self, rpc_url: &str, call: C) -> Result<C::Return, Erc20Error> {
        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.parse().map_err(|e| Erc20Error::ProviderError(format!("{e}")))?);

        let tx = TransactionRequest::default()
            .to(self.address)
            .input(call.abi_encode().into());

        let result = provider
            .call(tx)
            .await
            .map_err(|e| Erc20Error::ContractError(format!("{e}")))?;

        C::abi_decode_returns(&result).map_err(|e| Erc20Error::ContractError(format!("Decode error: {e}")))
    }
}

#[async_trait]
impl BurnableAdapter for BurnableTokenAdapter {
    fn contract_address(&self) -> Address {
        self.address
    }

    async fn total_supply(&self, rpc_url: &str) -> Result<U256, Erc20Error> {
        self.call_contract(rpc_url, totalSupplyCall {}).await
    }
}
