//! # tokenburn Traits
//!
//! The burn page talks to the outside world through a handful of
//! collaborators. Each one is a trait here so that the controller can be
//! driven by real backends (alloy, a block explorer, CoinGecko) or by mocks.
//!
//! ## Collaborators
//!
//! - [`WalletSession`] - connected address, active chain, connect prompt
//! - [`SignerProvider`] / [`BurnSigner`] / [`PendingBurn`] - burn submission and confirmation
//! - [`ChainScanner`] - explorer-sourced transaction history
//! - [`SupplyReader`] - aggregate token supply
//! - [`PriceApi`] - USD price lookups
//! - [`Notifier`] - user-facing toasts
//!
//! ## Example
//!
//! ```ignore
//! use tokenburn_traits::prelude::*;
//!
//! async fn burn_once(signer: &dyn BurnSigner, token: Address, amount: U256) -> Result<TxHash> {
//!     let pending = signer.burn(token, amount).await?;
//!     let receipt = pending.wait().await?;
//!     Ok(receipt.hash)
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use alloy_primitives::{Address, U256};
pub use tokenburn_error::{BurnError, Result};

/// Represents a transaction hash
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub String);

impl TxHash {
    /// Creates a new TxHash from a string
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TxHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TxHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Which family of explorer endpoints to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkTier {
    /// Production networks
    Mainnet,
    /// Test networks
    Testnet,
}

impl NetworkTier {
    /// Tier for a testnet flag
    pub fn from_testnet(is_testnet: bool) -> Self {
        if is_testnet {
            Self::Testnet
        } else {
            Self::Mainnet
        }
    }

    /// Returns true for [`NetworkTier::Testnet`]
    pub fn is_testnet(&self) -> bool {
        matches!(self, Self::Testnet)
    }
}

impl fmt::Display for NetworkTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
        }
    }
}

/// Classification of an explorer transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    /// Token burn
    Burn,
    /// Plain token transfer
    Transfer,
    /// Anything else
    Other,
}

/// A transaction as reported by a block explorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash
    pub hash: TxHash,
    /// Block timestamp (Unix epoch seconds)
    pub timestamp: u64,
    /// Burn / transfer / other
    pub kind: TxKind,
    /// Chain the transaction lives on
    pub chain_id: u64,
    /// Sender
    pub from: Address,
    /// Recipient, if any
    pub to: Option<Address>,
    /// Native value attached to the call
    pub value: U256,
}

impl TransactionRecord {
    /// Returns true if the record is a burn
    pub fn is_burn(&self) -> bool {
        self.kind == TxKind::Burn
    }
}

/// Aggregate token supply for one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplySnapshot {
    /// Chain the supply was read from
    pub chain_id: u64,
    /// `totalSupply()` in base units
    pub total_supply: U256,
}

/// Outcome of waiting for a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnReceipt {
    /// Transaction hash
    pub hash: TxHash,
    /// Block the transaction was mined in
    pub block_number: Option<u64>,
    /// False if the transaction reverted
    pub success: bool,
}

/// Toast severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastSeverity {
    /// Informational
    Info,
    /// Operation succeeded
    Success,
    /// Recoverable user mistake
    Warning,
    /// Operation failed
    Error,
}

/// The user's wallet as seen by the page
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// Connected address, if any
    fn address(&self) -> Option<Address>;

    /// Returns true when a wallet is connected
    fn is_connected(&self) -> bool;

    /// Chain the wallet is currently on
    fn chain_id(&self) -> Option<u64>;

    /// Asks the user to connect a wallet. Returns once the prompt is shown,
    /// not once a connection is established.
    async fn open_connect_prompt(&self);
}

/// A submitted but not yet confirmed burn
#[async_trait]
pub trait PendingBurn: Send + Sync {
    /// Hash assigned at submission
    fn hash(&self) -> &TxHash;

    /// Waits until the transaction is mined
    async fn wait(&self) -> Result<BurnReceipt>;
}

/// A signing handle bound to one chain
#[async_trait]
pub trait BurnSigner: Send + Sync {
    /// Chain this signer submits to
    fn chain_id(&self) -> u64;

    /// Invokes `burn(amount)` on `token`
    async fn burn(&self, token: Address, amount: U256) -> Result<Box<dyn PendingBurn>>;
}

/// Produces signers for a chain
pub trait SignerProvider: Send + Sync {
    /// Returns a signer bound to `chain_id`
    fn signer(&self, chain_id: u64) -> Result<Arc<dyn BurnSigner>>;
}

/// Explorer-sourced transaction history
#[async_trait]
pub trait ChainScanner: Send + Sync {
    /// Fetches every configured source for the tier. One inner vector per
    /// source; fails if any source fails.
    async fn fetch_all(&self, tier: NetworkTier) -> Result<Vec<Vec<TransactionRecord>>>;

    /// Keeps only burn transactions
    fn only_burns(&self, records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
        records.into_iter().filter(TransactionRecord::is_burn).collect()
    }
}

/// Token supply lookups
#[async_trait]
pub trait SupplyReader: Send + Sync {
    /// Reads the supply on `chain_id`
    async fn fetch_supply(&self, chain_id: u64) -> Result<SupplySnapshot>;
}

/// Price lookups
#[async_trait]
pub trait PriceApi: Send + Sync {
    /// USD price of `coin_id`
    async fn price_usd(&self, coin_id: &str) -> Result<f64>;
}

/// User-facing notifications
pub trait Notifier: Send + Sync {
    /// Shows a toast
    fn show_toast(&self, message: &str, severity: ToastSeverity);
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Address, BurnError, BurnReceipt, BurnSigner, ChainScanner, NetworkTier, Notifier,
        PendingBurn, PriceApi, Result, SignerProvider, SupplyReader, SupplySnapshot,
        ToastSeverity, TransactionRecord, TxHash, TxKind, WalletSession, U256,
    };
}
