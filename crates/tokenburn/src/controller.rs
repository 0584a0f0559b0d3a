//! The burn page controller
//!
//! [`BurnPageController`] owns the page state and sequences a burn:
//! validate the amount, resolve the burn target, submit through the signer,
//! wait for the receipt under a timeout, then refresh history and supply.
//! State is published through a [`watch`] channel; every transition goes
//! through `send_modify`/`send_if_modified`, so the controller can be shared
//! behind an `Arc` and the in-flight guard still holds.

use crate::amount::BurnRequest;
use crate::config::BurnConfig;
use crate::notify::TracingNotifier;
use crate::state::{BurnOutcome, PageState, TransactionProgress};
use alloy_primitives::Address;
use std::sync::Arc;
use tokio::sync::watch;
use tokenburn_error::{BurnError, ErrorCategory, Result};
use tokenburn_resilience::{with_confirmation_timeout, with_request_timeout};
use tokenburn_traits::{
    ChainScanner, Notifier, PendingBurn, PriceApi, SignerProvider, SupplyReader, ToastSeverity,
    WalletSession,
};

pub const EMPTY_AMOUNT_TOAST: &str = "Enter amount to migrate";
pub const INVALID_AMOUNT_TOAST: &str = "Invalid burn amount";
pub const BURN_FAILED_TOAST: &str = "Burn Failed!";
pub const TIMED_OUT_TOAST: &str = "Burn confirmation timed out";

/// Page-level state holder for the burn page
pub struct BurnPageController {
    config: BurnConfig,
    wallet: Arc<dyn WalletSession>,
    signers: Arc<dyn SignerProvider>,
    scanner: Arc<dyn ChainScanner>,
    supply: Arc<dyn SupplyReader>,
    prices: Option<Arc<dyn PriceApi>>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<PageState>,
}

impl BurnPageController {
    /// Returns the builder for the [BurnPageController].
    pub fn builder(config: BurnConfig) -> BurnPageControllerBuilder {
        BurnPageControllerBuilder::new(config)
    }

    pub fn config(&self) -> &BurnConfig {
        &self.config
    }

    /// Current page state
    pub fn state(&self) -> PageState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.state.subscribe()
    }

    /// Chain the page acts on: the wallet's, else the configured default
    pub fn active_chain_id(&self) -> u64 {
        self.wallet.chain_id().unwrap_or(self.config.default_chain_id)
    }

    pub fn wallet_address(&self) -> Option<Address> {
        self.wallet.address()
    }

    pub fn is_wallet_connected(&self) -> bool {
        self.wallet.is_connected()
    }

    pub fn wallet_chain_id(&self) -> Option<u64> {
        self.wallet.chain_id()
    }

    pub async fn open_connect_prompt(&self) {
        self.wallet.open_connect_prompt().await;
    }

    /// Stores the amount input. Validation happens at submit time.
    pub fn set_burn_amount(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| s.burn_amount = value);
    }

    pub fn set_chain_selector_open(&self, open: bool) {
        self.state.send_if_modified(|s| {
            let changed = s.chain_selector_open != open;
            s.chain_selector_open = open;
            changed
        });
    }

    pub fn open_chain_selector(&self) {
        self.set_chain_selector_open(true);
    }

    /// Runs the burn workflow for the current amount input.
    ///
    /// Never returns an error: every failure is reported through the
    /// notifier and reflected in the returned [`BurnOutcome`].
    pub async fn execute_burn(&self) -> BurnOutcome {
        if self.state.borrow().progress.is_submitting() {
            tracing::debug!("burn already in flight");
            return BurnOutcome::Busy;
        }

        if !self.wallet.is_connected() {
            tracing::info!("wallet not connected, opening connect prompt");
            self.wallet.open_connect_prompt().await;
        }

        let chain_id = self.active_chain_id();
        let amount = self.state.borrow().burn_amount.clone();
        let request = match BurnRequest::parse(&amount, chain_id, self.config.token_decimals) {
            Ok(request) => request,
            Err(e) => return self.reject(e),
        };

        if !self.wallet.is_connected() {
            return BurnOutcome::ConnectPrompted;
        }

        let token = match self.config.resolve_burn_target(chain_id) {
            Ok(token) => token,
            Err(e) => return self.reject(e),
        };

        if !self.begin_submission() {
            return BurnOutcome::Busy;
        }
        tracing::info!(chain_id, %token, amount = %request.amount, "submitting burn");

        let pending = match self.submit(&request, token).await {
            Ok(pending) => pending,
            Err(e) => return self.reject(e),
        };
        let hash = pending.hash().clone();
        self.state.send_modify(|s| s.burn_tx_hash = Some(hash.clone()));
        tracing::info!(%hash, "burn accepted, waiting for confirmation");

        match with_confirmation_timeout(&self.config.timeouts, pending.wait()).await {
            Err(timeout) => {
                tracing::error!(%hash, error = %timeout, "burn not confirmed in time");
                let stuck = hash.clone();
                self.state.send_modify(|s| s.progress = TransactionProgress::Stuck { hash: stuck });
                self.notifier.show_toast(TIMED_OUT_TOAST, ToastSeverity::Error);
                BurnOutcome::TimedOut { hash }
            }
            Ok(Err(e)) => self.reject(e),
            Ok(Ok(receipt)) if !receipt.success => {
                self.reject(BurnError::TransactionFailed(format!("{hash} reverted")))
            }
            Ok(Ok(receipt)) => {
                tracing::info!(%hash, block = ?receipt.block_number, "burn confirmed");
                self.state.send_modify(|s| s.progress = TransactionProgress::Idle);
                tokio::join!(self.refetch_transactions(), self.fetch_supplies());
                BurnOutcome::Confirmed { hash }
            }
        }
    }

    /// Replaces the burn history with the explorer's current view
    pub async fn refetch_transactions(&self) {
        let tier = self.config.network_tier(self.active_chain_id());
        let batches = match with_request_timeout(&self.config.timeouts, self.scanner.fetch_all(tier)).await {
            Ok(Ok(batches)) => batches,
            Ok(Err(e)) => {
                tracing::warn!(%tier, category = ?e.category(), error = %e, "failed to fetch burn history");
                return;
            }
            Err(e) => {
                tracing::warn!(%tier, error = %e, "burn history fetch timed out");
                return;
            }
        };

        let mut burns = self.scanner.only_burns(batches.into_iter().flatten().collect());
        burns.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        tracing::debug!(%tier, count = burns.len(), "burn history refreshed");
        self.state.send_modify(|s| s.burn_transactions = burns);
    }

    /// Mirrors the active chain's supply into state
    pub async fn fetch_supplies(&self) {
        let chain_id = self.active_chain_id();
        match with_request_timeout(&self.config.timeouts, self.supply.fetch_supply(chain_id)).await {
            Ok(Ok(snapshot)) => self.state.send_modify(|s| s.supply = Some(snapshot)),
            Ok(Err(e)) => tracing::warn!(chain_id, category = ?e.category(), error = %e, "failed to fetch supply"),
            Err(e) => tracing::warn!(chain_id, error = %e, "supply fetch timed out"),
        }
    }

    /// Looks up the token price when a price source and coin id are configured
    pub async fn refresh_price(&self) {
        let (Some(prices), Some(coin_id)) = (&self.prices, &self.config.coingecko_id) else {
            return;
        };
        match with_request_timeout(&self.config.timeouts, prices.price_usd(coin_id)).await {
            Ok(Ok(usd)) => self.state.send_modify(|s| s.token_price = Some(usd)),
            Ok(Err(e)) => tracing::warn!(%coin_id, category = ?e.category(), error = %e, "failed to fetch price"),
            Err(e) => tracing::warn!(%coin_id, error = %e, "price fetch timed out"),
        }
    }

    /// Loads everything the page shows on open
    pub async fn refresh_all(&self) {
        tokio::join!(
            self.refetch_transactions(),
            self.fetch_supplies(),
            self.refresh_price()
        );
    }

    fn begin_submission(&self) -> bool {
        self.state.send_if_modified(|s| {
            if s.progress.is_submitting() {
                return false;
            }
            s.progress = TransactionProgress::Submitting;
            true
        })
    }

    async fn submit(&self, request: &BurnRequest, token: Address) -> Result<Box<dyn PendingBurn>> {
        let signer = self.signers.signer(request.target_chain_id)?;
        signer.burn(token, request.base_units).await
    }

    /// Surfaces a burn that cannot go on, as its error category dictates
    fn reject(&self, err: BurnError) -> BurnOutcome {
        match err.category() {
            ErrorCategory::UserInput => {
                tracing::debug!(error = %err, "rejected burn amount");
                let message = match err {
                    BurnError::EmptyAmount => EMPTY_AMOUNT_TOAST,
                    _ => INVALID_AMOUNT_TOAST,
                };
                self.notifier.show_toast(message, ToastSeverity::Warning);
                BurnOutcome::InvalidInput
            }
            category => {
                tracing::error!(error = %err, ?category, "burn failed");
                // failures before submission leave progress untouched
                self.state.send_if_modified(|s| {
                    if s.progress == TransactionProgress::Idle {
                        return false;
                    }
                    s.progress = TransactionProgress::Idle;
                    true
                });
                self.notifier.show_toast(BURN_FAILED_TOAST, ToastSeverity::Error);
                BurnOutcome::Failed
            }
        }
    }
}

/// Builder for [BurnPageController]
#[derive(Clone)]
pub struct BurnPageControllerBuilder {
    config: BurnConfig,
    wallet: Option<Arc<dyn WalletSession>>,
    signers: Option<Arc<dyn SignerProvider>>,
    scanner: Option<Arc<dyn ChainScanner>>,
    supply: Option<Arc<dyn SupplyReader>>,
    prices: Option<Arc<dyn PriceApi>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl BurnPageControllerBuilder {
    pub fn new(config: BurnConfig) -> Self {
        Self {
            config,
            wallet: None,
            signers: None,
            scanner: None,
            supply: None,
            prices: None,
            notifier: None,
        }
    }

    pub fn wallet(&mut self, wallet: Arc<dyn WalletSession>) -> &mut Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn signers(&mut self, signers: Arc<dyn SignerProvider>) -> &mut Self {
        self.signers = Some(signers);
        self
    }

    pub fn scanner(&mut self, scanner: Arc<dyn ChainScanner>) -> &mut Self {
        self.scanner = Some(scanner);
        self
    }

    pub fn supply(&mut self, supply: Arc<dyn SupplyReader>) -> &mut Self {
        self.supply = Some(supply);
        self
    }

    /// Optional; without it `refresh_price` does nothing
    pub fn prices(&mut self, prices: Arc<dyn PriceApi>) -> &mut Self {
        self.prices = Some(prices);
        self
    }

    /// Defaults to [`TracingNotifier`]
    pub fn notifier(&mut self, notifier: Arc<dyn Notifier>) -> &mut Self {
        self.notifier = Some(notifier);
        self
    }

    /// Validates the config and builds the controller
    pub fn build(&self) -> Result<BurnPageController> {
        self.config.validate()?;
        let missing = |what: &str| BurnError::ConfigError(format!("{what} was not provided"));
        Ok(BurnPageController {
            config: self.config.clone(),
            wallet: self.wallet.clone().ok_or_else(|| missing("wallet session"))?,
            signers: self.signers.clone().ok_or_else(|| missing("signer provider"))?,
            scanner: self.scanner.clone().ok_or_else(|| missing("chain scanner"))?,
            supply: self.supply.clone().ok_or_else(|| missing("supply reader"))?,
            prices: self.prices.clone(),
            notifier: self
                .notifier
                .clone()
                .unwrap_or_else(|| Arc::new(TracingNotifier)),
            state: watch::channel(PageState::default()).0,
        })
    }
}
