//! # tokenburn Testing Infrastructure
//!
//! Testing utilities for the burn page controller:
//! - Scriptable mock collaborators for every controller seam
//! - Edge case burn amounts
//! - Property-based testing strategies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tokenburn_testing::*;
//!
//! let signers = MockSignerProvider::new();
//! signers.set_confirm(ConfirmBehavior::Revert);
//!
//! proptest! {
//!     #[test]
//!     fn accepts_valid_amounts(amount in burn_amount_string(18)) {
//!         // ...
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokenburn_error::{BurnError, Result};
use tokenburn_traits::{
    Address, BurnReceipt, BurnSigner, ChainScanner, NetworkTier, Notifier, PendingBurn, PriceApi,
    SignerProvider, SupplyReader, SupplySnapshot, ToastSeverity, TransactionRecord, TxHash, TxKind,
    WalletSession, U256,
};
use tokio::sync::watch;

// ============================================================================
// Gate
// ============================================================================

/// A latch that holds async callers until it is opened.
///
/// Gates start open; `close` makes the next callers wait.
#[derive(Debug)]
pub struct Gate {
    open: watch::Sender<bool>,
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            open: watch::channel(true).0,
        }
    }
}

impl Gate {
    /// Makes subsequent `pass` calls wait
    pub fn close(&self) {
        self.open.send_replace(false);
    }

    /// Releases every waiter
    pub fn open(&self) {
        self.open.send_replace(true);
    }

    /// Waits until the gate is open
    pub async fn pass(&self) {
        let mut rx = self.open.subscribe();
        let _ = rx.wait_for(|open| *open).await;
    }
}

// ============================================================================
// Wallet
// ============================================================================

/// Wallet session whose connection state tests flip at will
#[derive(Debug, Default)]
pub struct MockWalletSession {
    address: Mutex<Option<Address>>,
    chain_id: Mutex<Option<u64>>,
    connect_on_prompt: Mutex<Option<Address>>,
    prompts: AtomicUsize,
}

impl MockWalletSession {
    /// A connected wallet on `chain_id`
    pub fn connected(address: Address, chain_id: Option<u64>) -> Self {
        Self {
            address: Mutex::new(Some(address)),
            chain_id: Mutex::new(chain_id),
            ..Default::default()
        }
    }

    /// No wallet connected
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Makes the connect prompt connect `address`
    pub fn connect_on_prompt(&self, address: Address) {
        *self.connect_on_prompt.lock() = Some(address);
    }

    /// Replaces the connected address
    pub fn set_address(&self, address: Option<Address>) {
        *self.address.lock() = address;
    }

    /// Switches networks
    pub fn set_chain_id(&self, chain_id: Option<u64>) {
        *self.chain_id.lock() = chain_id;
    }

    /// How many times the connect prompt was opened
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletSession for MockWalletSession {
    fn address(&self) -> Option<Address> {
        *self.address.lock()
    }

    fn is_connected(&self) -> bool {
        self.address.lock().is_some()
    }

    fn chain_id(&self) -> Option<u64> {
        *self.chain_id.lock()
    }

    async fn open_connect_prompt(&self) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if let Some(address) = self.connect_on_prompt.lock().take() {
            *self.address.lock() = Some(address);
        }
    }
}

// ============================================================================
// Signer
// ============================================================================

/// How a mocked pending burn resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmBehavior {
    /// Mined with status 1
    #[default]
    Succeed,
    /// Mined with status 0
    Revert,
    /// Waiting fails with an RPC error
    Fail,
    /// Never resolves
    Hang,
}

/// A recorded `burn` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnCall {
    /// Chain the signer was bound to
    pub chain_id: u64,
    /// Token contract
    pub token: Address,
    /// Amount in base units
    pub amount: U256,
}

#[derive(Debug)]
struct SignerState {
    unavailable: AtomicBool,
    submit_error: Mutex<Option<String>>,
    confirm: Mutex<ConfirmBehavior>,
    hash: Mutex<String>,
    requested: Mutex<Vec<u64>>,
    burns: Mutex<Vec<BurnCall>>,
    confirm_gate: Gate,
}

/// Scriptable [`SignerProvider`]; every signer it hands out shares its state
#[derive(Debug, Clone)]
pub struct MockSignerProvider {
    state: Arc<SignerState>,
}

impl Default for MockSignerProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSignerProvider {
    /// Signers that submit and confirm successfully with hash `0xabc`
    pub fn new() -> Self {
        Self {
            state: Arc::new(SignerState {
                unavailable: AtomicBool::new(false),
                submit_error: Mutex::new(None),
                confirm: Mutex::new(ConfirmBehavior::Succeed),
                hash: Mutex::new("0xabc".to_string()),
                requested: Mutex::new(Vec::new()),
                burns: Mutex::new(Vec::new()),
                confirm_gate: Gate::default(),
            }),
        }
    }

    /// Makes signer resolution fail
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes submission fail, as when the user rejects the request
    pub fn set_submit_error(&self, message: Option<&str>) {
        *self.state.submit_error.lock() = message.map(str::to_string);
    }

    /// Chooses how pending burns resolve
    pub fn set_confirm(&self, behavior: ConfirmBehavior) {
        *self.state.confirm.lock() = behavior;
    }

    /// Hash assigned to the next submissions
    pub fn set_hash(&self, hash: &str) {
        *self.state.hash.lock() = hash.to_string();
    }

    /// Holds confirmations until [`release_confirmation`](Self::release_confirmation)
    pub fn hold_confirmation(&self) {
        self.state.confirm_gate.close();
    }

    /// Lets held confirmations resolve
    pub fn release_confirmation(&self) {
        self.state.confirm_gate.open();
    }

    /// Chain IDs signers were requested for
    pub fn requested_chains(&self) -> Vec<u64> {
        self.state.requested.lock().clone()
    }

    /// Every submitted burn
    pub fn burns(&self) -> Vec<BurnCall> {
        self.state.burns.lock().clone()
    }
}

impl SignerProvider for MockSignerProvider {
    fn signer(&self, chain_id: u64) -> Result<Arc<dyn BurnSigner>> {
        self.state.requested.lock().push(chain_id);
        if self.state.unavailable.load(Ordering::SeqCst) {
            return Err(BurnError::SignerUnavailable { chain_id });
        }
        Ok(Arc::new(MockBurnSigner {
            chain_id,
            state: self.state.clone(),
        }))
    }
}

/// Signer handed out by [`MockSignerProvider`]
#[derive(Debug)]
pub struct MockBurnSigner {
    chain_id: u64,
    state: Arc<SignerState>,
}

#[async_trait]
impl BurnSigner for MockBurnSigner {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn burn(&self, token: Address, amount: U256) -> Result<Box<dyn PendingBurn>> {
        self.state.burns.lock().push(BurnCall {
            chain_id: self.chain_id,
            token,
            amount,
        });
        if let Some(message) = self.state.submit_error.lock().clone() {
            return Err(BurnError::SigningError(message));
        }
        Ok(Box::new(MockPendingBurn {
            hash: TxHash::new(self.state.hash.lock().clone()),
            state: self.state.clone(),
        }))
    }
}

/// Pending burn resolving per [`ConfirmBehavior`]
#[derive(Debug)]
pub struct MockPendingBurn {
    hash: TxHash,
    state: Arc<SignerState>,
}

#[async_trait]
impl PendingBurn for MockPendingBurn {
    fn hash(&self) -> &TxHash {
        &self.hash
    }

    async fn wait(&self) -> Result<BurnReceipt> {
        self.state.confirm_gate.pass().await;
        let behavior = *self.state.confirm.lock();
        match behavior {
            ConfirmBehavior::Succeed | ConfirmBehavior::Revert => Ok(BurnReceipt {
                hash: self.hash.clone(),
                block_number: Some(1),
                success: behavior == ConfirmBehavior::Succeed,
            }),
            ConfirmBehavior::Fail => Err(BurnError::TransactionFailed("receipt unavailable".into())),
            ConfirmBehavior::Hang => std::future::pending().await,
        }
    }
}

// ============================================================================
// Read-side collaborators
// ============================================================================

/// Scanner returning canned batches
#[derive(Debug, Default)]
pub struct MockChainScanner {
    batches: Mutex<Vec<Vec<TransactionRecord>>>,
    error: Mutex<Option<String>>,
    tiers: Mutex<Vec<NetworkTier>>,
}

impl MockChainScanner {
    /// Scanner answering with `batches`
    pub fn with_batches(batches: Vec<Vec<TransactionRecord>>) -> Self {
        Self {
            batches: Mutex::new(batches),
            ..Default::default()
        }
    }

    /// Replaces the canned batches
    pub fn set_batches(&self, batches: Vec<Vec<TransactionRecord>>) {
        *self.batches.lock() = batches;
    }

    /// Makes every fetch fail with `message`
    pub fn set_error(&self, message: Option<&str>) {
        *self.error.lock() = message.map(str::to_string);
    }

    /// Tiers requested so far
    pub fn tiers(&self) -> Vec<NetworkTier> {
        self.tiers.lock().clone()
    }
}

#[async_trait]
impl ChainScanner for MockChainScanner {
    async fn fetch_all(&self, tier: NetworkTier) -> Result<Vec<Vec<TransactionRecord>>> {
        self.tiers.lock().push(tier);
        if let Some(message) = self.error.lock().clone() {
            return Err(BurnError::ExplorerError(message));
        }
        Ok(self.batches.lock().clone())
    }
}

/// Supply reader with per-chain canned values
#[derive(Debug, Default)]
pub struct MockSupplyReader {
    supplies: Mutex<HashMap<u64, U256>>,
    calls: Mutex<Vec<u64>>,
}

impl MockSupplyReader {
    /// Sets the supply reported for `chain_id`
    pub fn set_supply(&self, chain_id: u64, total_supply: U256) {
        self.supplies.lock().insert(chain_id, total_supply);
    }

    /// Chains read so far
    pub fn calls(&self) -> Vec<u64> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SupplyReader for MockSupplyReader {
    async fn fetch_supply(&self, chain_id: u64) -> Result<SupplySnapshot> {
        self.calls.lock().push(chain_id);
        self.supplies
            .lock()
            .get(&chain_id)
            .map(|total_supply| SupplySnapshot {
                chain_id,
                total_supply: *total_supply,
            })
            .ok_or(BurnError::BurnTargetNotConfigured { chain_id })
    }
}

/// Price API with canned USD prices
#[derive(Debug, Default)]
pub struct MockPriceApi {
    prices: Mutex<HashMap<String, f64>>,
    calls: AtomicUsize,
}

impl MockPriceApi {
    /// Sets the price of `coin_id`
    pub fn set_price(&self, coin_id: &str, usd: f64) {
        self.prices.lock().insert(coin_id.to_string(), usd);
    }

    /// Number of lookups made
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceApi for MockPriceApi {
    async fn price_usd(&self, coin_id: &str) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prices
            .lock()
            .get(coin_id)
            .copied()
            .ok_or_else(|| BurnError::PriceNotFound(coin_id.to_string()))
    }
}

/// Notifier that remembers every toast
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<(String, ToastSeverity)>>,
}

impl RecordingNotifier {
    /// All toasts, oldest first
    pub fn toasts(&self) -> Vec<(String, ToastSeverity)> {
        self.toasts.lock().clone()
    }

    /// Toast messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.toasts.lock().iter().map(|(m, _)| m.clone()).collect()
    }

    /// Most recent toast
    pub fn last(&self) -> Option<(String, ToastSeverity)> {
        self.toasts.lock().last().cloned()
    }

    /// Forgets recorded toasts
    pub fn clear(&self) {
        self.toasts.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn show_toast(&self, message: &str, severity: ToastSeverity) {
        self.toasts.lock().push((message.to_string(), severity));
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Builds an explorer record on chain 1
pub fn record(hash: &str, timestamp: u64, kind: TxKind) -> TransactionRecord {
    record_on(1, hash, timestamp, kind)
}

/// Builds an explorer record on `chain_id`
pub fn record_on(chain_id: u64, hash: &str, timestamp: u64, kind: TxKind) -> TransactionRecord {
    TransactionRecord {
        hash: TxHash::new(hash),
        timestamp,
        kind,
        chain_id,
        from: Address::repeat_byte(0x11),
        to: Some(Address::repeat_byte(0x22)),
        value: U256::ZERO,
    }
}

// ============================================================================
// Edge Case Amounts
// ============================================================================

/// Edge case amount inputs for the burn form
pub struct EdgeCaseAmounts;

impl EdgeCaseAmounts {
    /// Inputs that parse at 18 decimals
    pub fn valid() -> Vec<&'static str> {
        vec![
            "1",
            "5",
            "0.5",
            ".5",
            "1.",
            "0.000000000000000001",
            " 42 ",
            "1000000000",
        ]
    }

    /// Inputs that are rejected as invalid (not empty)
    pub fn invalid() -> Vec<&'static str> {
        vec![
            "abc",
            "-1",
            "0",
            "0.0",
            "1.2.3",
            "1e18",
            "0x10",
            "0.0000000000000000001",
            "1,5",
        ]
    }

    /// Inputs treated as empty
    pub fn empty() -> Vec<&'static str> {
        vec!["", " ", "\t", "\n  "]
    }
}

// ============================================================================
// Property-Based Testing Strategies
// ============================================================================

/// Non-zero decimal strings with at most `decimals` fractional digits
pub fn burn_amount_string(decimals: u8) -> impl Strategy<Value = String> {
    let max_frac = usize::from(decimals.min(18));
    (1u64..=1_000_000_000u64, prop::collection::vec(0u8..=9, 0..=max_frac)).prop_map(
        |(whole, frac)| {
            if frac.is_empty() {
                whole.to_string()
            } else {
                let digits: String = frac.iter().map(|d| char::from(b'0' + d)).collect();
                format!("{whole}.{digits}")
            }
        },
    )
}

/// Transaction kinds, weighted toward burns
pub fn tx_kind() -> impl Strategy<Value = TxKind> {
    prop_oneof![
        3 => Just(TxKind::Burn),
        2 => Just(TxKind::Transfer),
        1 => Just(TxKind::Other),
    ]
}

/// Explorer records with unique hashes per index
pub fn transaction_record() -> impl Strategy<Value = TransactionRecord> {
    (any::<u32>(), 0u64..=2_000_000_000u64, tx_kind(), 1u64..=5u64).prop_map(
        |(n, timestamp, kind, chain_id)| record_on(chain_id, &format!("0x{n:08x}"), timestamp, kind),
    )
}

/// Up to four batches of records, as a scanner returns them
pub fn record_batches() -> impl Strategy<Value = Vec<Vec<TransactionRecord>>> {
    prop::collection::vec(prop::collection::vec(transaction_record(), 0..20), 0..4)
}
