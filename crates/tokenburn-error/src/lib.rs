//! # tokenburn Error
//!
//! Unified error type for the tokenburn workspace. Every collaborator of the
//! burn page (wallet session, signer, explorer, supply reader, price API)
//! reports failures as a [`BurnError`], so the page controller can decide how
//! to surface them without knowing which backend produced them.
//!
//! ## Error Categories
//!
//! [`BurnError::category`] groups variants the way the page reacts to them:
//!
//! - [`ErrorCategory::UserInput`] - warning toast, no state change
//! - [`ErrorCategory::Wallet`], [`ErrorCategory::Transaction`] and
//!   [`ErrorCategory::Config`] - error toast, progress back to idle
//! - [`ErrorCategory::Network`] - logged, stale data kept
//!
//! ## Example
//!
//! ```
//! use tokenburn_error::{BurnError, ErrorCategory, Result};
//!
//! fn require_amount(amount: &str) -> Result<()> {
//!     if amount.trim().is_empty() {
//!         return Err(BurnError::EmptyAmount);
//!     }
//!     Ok(())
//! }
//!
//! let err = require_amount("").unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::UserInput);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// The main error type for tokenburn operations.
#[derive(Error, Debug)]
pub enum BurnError {
    // ============ Input Errors ============
    /// No amount was entered
    #[error("Amount is empty")]
    EmptyAmount,

    /// Amount could not be converted to base units
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount {
        /// The rejected input
        amount: String,
        /// Reason for rejection
        reason: String,
    },

    // ============ Wallet Errors ============
    /// No signer is available for the requested chain
    #[error("No signer available for chain {chain_id}")]
    SignerUnavailable {
        /// Requested chain ID
        chain_id: u64,
    },

    // ============ Transaction Errors ============
    /// Transaction signing failed
    #[error("Failed to sign transaction: {0}")]
    SigningError(String),

    /// Transaction broadcast failed
    #[error("Failed to broadcast transaction: {0}")]
    BroadcastError(String),

    /// Transaction reverted or could not be confirmed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Contract call failed
    #[error("Contract call failed: {0}")]
    ContractError(String),

    // ============ Network Errors ============
    /// RPC connection failed
    #[error("RPC connection failed: {url} - {reason}")]
    RpcConnectionError {
        /// RPC URL
        url: String,
        /// Error reason
        reason: String,
    },

    /// Block explorer request failed
    #[error("Explorer error: {0}")]
    ExplorerError(String),

    /// Malformed address in an explorer response
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The invalid address
        address: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Price lookup failed
    #[error("Price API error: {0}")]
    PriceError(String),

    /// Coin missing from a price response
    #[error("No price for '{0}'")]
    PriceNotFound(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Rate limited by provider
    #[error("Rate limited by provider")]
    RateLimited,

    /// Response body did not decode
    #[error("JSON error: {0}")]
    JsonError(String),

    // ============ Configuration Errors ============
    /// No burn target is configured for the chain
    #[error("No burn target configured for chain {chain_id}")]
    BurnTargetNotConfigured {
        /// Chain ID without a target
        chain_id: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenient Result type using BurnError
pub type Result<T> = std::result::Result<T, BurnError>;

/// How the burn page reacts to an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad user input; warn and leave state alone
    UserInput,
    /// No usable signer for the chain
    Wallet,
    /// Transaction lifecycle failure; reset progress and report
    Transaction,
    /// Remote data fetch failure; log and keep stale data
    Network,
    /// Misconfiguration
    Config,
}

impl BurnError {
    /// Returns the category used to decide how the error is surfaced
    pub fn category(&self) -> ErrorCategory {
        match self {
            BurnError::EmptyAmount | BurnError::InvalidAmount { .. } => ErrorCategory::UserInput,
            BurnError::SignerUnavailable { .. } => ErrorCategory::Wallet,
            BurnError::SigningError(_)
            | BurnError::BroadcastError(_)
            | BurnError::TransactionFailed(_)
            | BurnError::ContractError(_) => ErrorCategory::Transaction,
            BurnError::RpcConnectionError { .. }
            | BurnError::ExplorerError(_)
            | BurnError::InvalidAddress { .. }
            | BurnError::PriceError(_)
            | BurnError::PriceNotFound(_)
            | BurnError::HttpError(_)
            | BurnError::RateLimited
            | BurnError::JsonError(_) => ErrorCategory::Network,
            BurnError::BurnTargetNotConfigured { .. } | BurnError::ConfigError(_) => {
                ErrorCategory::Config
            }
        }
    }
}
