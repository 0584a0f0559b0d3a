//! Wallet session for a key held by this process

use alloy::primitives::Address;
use async_trait::async_trait;
use tokenburn_traits::WalletSession;

/// A session that is connected exactly when a local key is loaded.
///
/// There is no interactive wallet to open, so the connect prompt only logs
/// how to supply a key.
#[derive(Debug, Clone, Default)]
pub struct LocalWalletSession {
    address: Option<Address>,
    chain_id: Option<u64>,
}

impl LocalWalletSession {
    pub fn connected(address: Address, chain_id: Option<u64>) -> Self {
        Self {
            address: Some(address),
            chain_id,
        }
    }

    pub fn disconnected(chain_id: Option<u64>) -> Self {
        Self {
            address: None,
            chain_id,
        }
    }
}

#[async_trait]
impl WalletSession for LocalWalletSession {
    fn address(&self) -> Option<Address> {
        self.address
    }

    fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    async fn open_connect_prompt(&self) {
        tracing::warn!("no wallet connected; configure a private key to sign burns");
    }
}
