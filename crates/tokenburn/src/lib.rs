//! # tokenburn - Burn Page Controller
//!
//! tokenburn drives a token burn page: it holds the amount input, submits an
//! ERC-20 `burn(uint256)` through the connected wallet, waits for the receipt
//! and keeps burn history and supply figures fresh. Collaborators sit behind
//! the traits in [`traits`]; production implementations are behind features.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `default` | Controller plus every production collaborator |
//! | `erc20` | alloy signer, supply reader and chain registry |
//! | `explorer` | Etherscan-compatible burn history scanner |
//! | `rates` | CoinGecko price client |
//! | `full` | Everything |
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokenburn::prelude::*;
//!
//! let controller = BurnPageController::builder(config)
//!     .wallet(Arc::new(session))
//!     .signers(Arc::new(signers))
//!     .scanner(Arc::new(scanner))
//!     .supply(Arc::new(supply))
//!     .build()?;
//!
//! controller.set_burn_amount("5");
//! match controller.execute_burn().await {
//!     BurnOutcome::Confirmed { hash } => println!("burned in {hash}"),
//!     other => println!("{other:?}"),
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod amount;
pub mod config;
pub mod controller;
pub mod notify;
pub mod state;

pub use amount::{parse_base_units, BurnRequest};
pub use config::{BurnConfig, ChainConfig};
pub use controller::{
    BurnPageController, BurnPageControllerBuilder, BURN_FAILED_TOAST, EMPTY_AMOUNT_TOAST,
    INVALID_AMOUNT_TOAST, TIMED_OUT_TOAST,
};
pub use notify::TracingNotifier;
pub use state::{BurnOutcome, PageState, TransactionProgress};

pub use tokenburn_error as error;
pub use tokenburn_resilience as resilience;
pub use tokenburn_traits as traits;

// ============================================================================
// Collaborator re-exports
// ============================================================================

/// ERC-20 burn signer, supply reader and chain registry
#[cfg(feature = "erc20")]
#[cfg_attr(docsrs, doc(cfg(feature = "erc20")))]
pub mod erc20 {
    pub use tokenburn_erc20::*;
}

/// Block explorer burn history
#[cfg(feature = "explorer")]
#[cfg_attr(docsrs, doc(cfg(feature = "explorer")))]
pub mod explorer {
    pub use tokenburn_explorer::*;
}

/// Token prices
#[cfg(feature = "rates")]
#[cfg_attr(docsrs, doc(cfg(feature = "rates")))]
pub mod rates {
    pub use tokenburn_rates::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BurnConfig, ChainConfig};
    pub use crate::controller::BurnPageController;
    pub use crate::state::{BurnOutcome, PageState, TransactionProgress};
    pub use tokenburn_traits::prelude::*;
}
