//! # tokenburn Explorer
//!
//! Reads burn history from Etherscan-compatible block explorers. Each
//! configured chain is one source; a refresh for a network tier queries every
//! source of that tier concurrently and classifies the returned transactions
//! so the page can keep only the burns.
//!
//! ## Example
//!
//! ```ignore
//! use tokenburn_explorer::{ExplorerChain, ExplorerConfig, ExplorerScanner};
//! use tokenburn_traits::{ChainScanner, NetworkTier};
//!
//! let config = ExplorerConfig::new()
//!     .with_chain(ExplorerChain::etherscan(1, "Ethereum", token_address))
//!     .with_api_key(std::env::var("ETHERSCAN_API_KEY").ok());
//! let scanner = ExplorerScanner::new(config)?;
//! let batches = scanner.fetch_all(NetworkTier::Mainnet).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod response;
mod scanner;

pub use config::{ExplorerChain, ExplorerConfig, ETHERSCAN_V2_API};
pub use response::{classify, ExplorerResponse, RawTransaction, BURN_SELECTOR, TRANSFER_SELECTOR};
pub use scanner::ExplorerScanner;
