//! Timeout utilities for chain-facing waits
//!
//! Confirmation waits and HTTP requests get separate budgets: a block can
//! take minutes, an explorer response should not.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Timeout configuration for the burn workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Single request/response round trip
    #[serde(with = "secs")]
    pub request: Duration,
    /// Waiting for a submitted transaction to be mined
    #[serde(with = "secs")]
    pub confirmation: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(30),
            confirmation: Duration::from_secs(300),
        }
    }
}

impl TimeoutConfig {
    /// Create new timeout config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set request timeout
    pub fn with_request(mut self, timeout: Duration) -> Self {
        self.request = timeout;
        self
    }

    /// Set confirmation timeout
    pub fn with_confirmation(mut self, timeout: Duration) -> Self {
        self.confirmation = timeout;
        self
    }

    /// Short timeouts for local devnets (anvil, hardhat)
    pub fn devnet() -> Self {
        Self {
            request: Duration::from_secs(5),
            confirmation: Duration::from_secs(30),
        }
    }

    /// Long timeouts for congested mainnets
    pub fn congested() -> Self {
        Self {
            request: Duration::from_secs(60),
            confirmation: Duration::from_secs(900),
        }
    }
}

/// Timeout error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Operation '{operation}' timed out after {duration:?}")]
pub struct TimeoutError {
    /// The operation that timed out
    pub operation: String,
    /// The timeout duration
    pub duration: Duration,
}

/// Execute a future with a timeout
pub async fn with_timeout<T>(
    duration: Duration,
    operation: impl Into<String>,
    future: impl Future<Output = T>,
) -> Result<T, TimeoutError> {
    let op = operation.into();
    timeout(duration, future).await.map_err(|_| {
        tracing::warn!(operation = %op, ?duration, "operation timed out");
        TimeoutError {
            operation: op,
            duration,
        }
    })
}

/// Execute with request timeout from config
pub async fn with_request_timeout<T>(
    config: &TimeoutConfig,
    future: impl Future<Output = T>,
) -> Result<T, TimeoutError> {
    with_timeout(config.request, "request", future).await
}

/// Execute with confirmation timeout from config
pub async fn with_confirmation_timeout<T>(
    config: &TimeoutConfig,
    future: impl Future<Output = T>,
) -> Result<T, TimeoutError> {
    with_timeout(config.confirmation, "confirmation", future).await
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_config_default() {
        let config = TimeoutConfig::default();
        assert_eq!(config.request, Duration::from_secs(30));
        assert_eq!(config.confirmation, Duration::from_secs(300));
    }

    #[test]
    fn test_timeout_config_presets() {
        assert_eq!(TimeoutConfig::devnet().request, Duration::from_secs(5));
        assert_eq!(TimeoutConfig::congested().confirmation, Duration::from_secs(900));
    }

    #[test]
    fn test_timeout_config_builder() {
        let config = TimeoutConfig::new()
            .with_request(Duration::from_secs(5))
            .with_confirmation(Duration::from_secs(15));

        assert_eq!(config.request, Duration::from_secs(5));
        assert_eq!(config.confirmation, Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(Duration::from_secs(1), "test", async { 42 }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expired() {
        let result = with_timeout(Duration::from_millis(10), "slow_op", async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            42
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.operation, "slow_op");
        assert_eq!(err.duration, Duration::from_millis(10));
        assert!(err.to_string().contains("slow_op"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_timeout_uses_config() {
        let config = TimeoutConfig::new().with_confirmation(Duration::from_secs(2));
        let err = with_confirmation_timeout(&config, std::future::pending::<()>())
            .await
            .unwrap_err();
        assert_eq!(err.operation, "confirmation");
        assert_eq!(err.duration, Duration::from_secs(2));
    }

    #[test]
    fn test_config_serializes_as_seconds() {
        let config = TimeoutConfig::devnet();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"request":5,"confirmation":30}"#);
    }
}
