//! tokenburn ERC‑20 module
//!
//! Chain-facing implementations of the burn page collaborators, built on
//! alloy. The token is any ERC‑20 exposing OpenZeppelin's
//! `ERC20Burnable.burn(uint256)`; its address per chain comes from
//! configuration, never from constants in this crate.
//!
//! - [`AlloySignerProvider`] hands out [`AlloyBurnSigner`]s bound to a chain
//! - [`Erc20SupplyReader`] reads `totalSupply()`
//! - [`LocalWalletSession`] exposes a locally held key as a wallet session
//! - [`EvmChain`] knows chain IDs, default RPCs and which chains are testnets

#![forbid(unsafe_code)]
#![allow(missing_docs)]

pub mod abi;
pub mod adapter;
pub mod registry;
pub mod session;
pub mod signer;
pub mod supply;

pub use adapter::{BurnableAdapter, BurnableTokenAdapter, Erc20Error};
pub use registry::EvmChain;
pub use session::LocalWalletSession;
pub use signer::{AlloyBurnSigner, AlloyPendingBurn, AlloySignerProvider};
pub use supply::Erc20SupplyReader;

/// Exposes commonly used types when working with burnable tokens.
pub mod prelude {
    pub use super::adapter::BurnableAdapter;
    pub use super::registry::EvmChain;
    pub use super::session::LocalWalletSession;
    pub use super::signer::AlloySignerProvider;
    pub use super::supply::Erc20SupplyReader;
    pub use alloy::signers::local::PrivateKeySigner;
}
