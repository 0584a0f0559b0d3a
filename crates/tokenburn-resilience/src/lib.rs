//! # tokenburn Resilience
//!
//! Bounded waits for the burn workflow. A submitted transaction that never
//! confirms must not leave the page spinning forever, so every suspension
//! point that talks to a chain runs under a timeout from [`TimeoutConfig`].
//!
//! ## Timeouts
//!
//! ```rust
//! use tokenburn_resilience::TimeoutConfig;
//! use std::time::Duration;
//!
//! let config = TimeoutConfig::default();
//! assert_eq!(config.confirmation, Duration::from_secs(300));
//!
//! // Short waits for local devnets
//! let fast = TimeoutConfig::devnet();
//! assert_eq!(fast.confirmation, Duration::from_secs(30));
//! ```
//!
//! ```rust
//! use tokenburn_resilience::with_timeout;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let receipt = with_timeout(Duration::from_secs(5), "burn confirmation", async { 7 }).await;
//! assert_eq!(receipt.unwrap(), 7);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod timeout;

pub use timeout::{
    with_confirmation_timeout, with_request_timeout, with_timeout, TimeoutConfig, TimeoutError,
};
