//! Burn workflow against mocked collaborators

use alloy_primitives::{address, Address, U256};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokenburn::{
    BurnConfig, BurnOutcome, BurnPageController, ChainConfig, TransactionProgress,
    BURN_FAILED_TOAST, EMPTY_AMOUNT_TOAST, INVALID_AMOUNT_TOAST, TIMED_OUT_TOAST,
};
use tokenburn_testing::{
    record, record_batches, record_on, ConfirmBehavior, MockChainScanner, MockPriceApi,
    MockSignerProvider, MockSupplyReader, MockWalletSession, RecordingNotifier,
};
use tokenburn_traits::{NetworkTier, ToastSeverity, TxHash, TxKind};

const TOKEN: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
const SEPOLIA_TOKEN: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
const USER: Address = address!("742d35Cc6634C0532925a3b844Bc9e7595f5fFb9");

struct Harness {
    controller: Arc<BurnPageController>,
    wallet: Arc<MockWalletSession>,
    signers: MockSignerProvider,
    scanner: Arc<MockChainScanner>,
    supply: Arc<MockSupplyReader>,
    prices: Arc<MockPriceApi>,
    notifier: Arc<RecordingNotifier>,
}

impl Harness {
    fn burns_refreshed(&self) -> (usize, usize) {
        (self.scanner.tiers().len(), self.supply.calls().len())
    }
}

fn config() -> BurnConfig {
    BurnConfig::new()
        .with_chain(ChainConfig::new(1, "Ethereum", TOKEN))
        .with_chain(ChainConfig::new(11155111, "Sepolia", SEPOLIA_TOKEN).testnet(true))
        .with_confirmation_timeout(Duration::from_secs(5))
        .with_coingecko_id("app-token")
}

fn harness_with(config: BurnConfig, wallet: MockWalletSession) -> Harness {
    let wallet = Arc::new(wallet);
    let signers = MockSignerProvider::new();
    let scanner = Arc::new(MockChainScanner::default());
    let supply = Arc::new(MockSupplyReader::default());
    supply.set_supply(1, U256::from(1_000_000u64));
    supply.set_supply(11155111, U256::from(42u64));
    let prices = Arc::new(MockPriceApi::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let controller = BurnPageController::builder(config)
        .wallet(wallet.clone())
        .signers(Arc::new(signers.clone()))
        .scanner(scanner.clone())
        .supply(supply.clone())
        .prices(prices.clone())
        .notifier(notifier.clone())
        .build()
        .unwrap();

    Harness {
        controller: Arc::new(controller),
        wallet,
        signers,
        scanner,
        supply,
        prices,
        notifier,
    }
}

fn harness() -> Harness {
    harness_with(config(), MockWalletSession::connected(USER, Some(1)))
}

fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

// ============================================================================
// Burn workflow
// ============================================================================

#[tokio::test]
async fn burning_five_tokens_confirms_and_refreshes_once() {
    let h = harness();
    h.controller.set_burn_amount("5");

    let outcome = h.controller.execute_burn().await;

    assert_eq!(outcome, BurnOutcome::Confirmed { hash: TxHash::new("0xabc") });
    let state = h.controller.state();
    assert_eq!(state.tx_button(), "Burn App Tokens");
    assert!(!state.tx_progress());
    assert_eq!(state.burn_tx_hash, Some(TxHash::new("0xabc")));
    assert_eq!(h.burns_refreshed(), (1, 1));
    assert_eq!(state.supply.map(|s| s.total_supply), Some(U256::from(1_000_000u64)));

    let burns = h.signers.burns();
    assert_eq!(burns.len(), 1);
    assert_eq!(burns[0].token, TOKEN);
    assert_eq!(burns[0].chain_id, 1);
    assert_eq!(burns[0].amount, ether(5));
    assert!(h.notifier.toasts().is_empty());
}

#[tokio::test]
async fn confirmed_burn_survives_failed_refreshes() {
    // Polygon has a burn target but no readable supply
    let config = config().with_chain(ChainConfig::new(137, "Polygon", TOKEN));
    let h = harness_with(config, MockWalletSession::connected(USER, Some(137)));
    h.scanner.set_batches(vec![vec![record_on(137, "0x1", 1, TxKind::Burn)]]);
    h.controller.refetch_transactions().await;
    let history = h.controller.state().burn_transactions;
    h.scanner.set_error(Some("Max rate limit reached"));
    h.controller.set_burn_amount("5");

    let outcome = h.controller.execute_burn().await;

    assert_eq!(outcome, BurnOutcome::Confirmed { hash: TxHash::new("0xabc") });
    let state = h.controller.state();
    assert_eq!(state.progress, TransactionProgress::Idle);
    assert_eq!(state.burn_transactions, history);
    assert!(state.supply.is_none());
    assert_eq!(h.supply.calls(), vec![137]);
    assert!(h.notifier.toasts().is_empty());
}

#[tokio::test]
async fn empty_amount_warns_without_contract_call() {
    let h = harness();
    let before = h.controller.state();

    let outcome = h.controller.execute_burn().await;

    assert_eq!(outcome, BurnOutcome::InvalidInput);
    assert_eq!(
        h.notifier.toasts(),
        vec![(EMPTY_AMOUNT_TOAST.to_string(), ToastSeverity::Warning)]
    );
    assert!(h.signers.burns().is_empty());
    assert!(h.signers.requested_chains().is_empty());
    assert_eq!(h.controller.state(), before);
    assert!(!h.controller.state().tx_progress());
}

#[tokio::test]
async fn whitespace_amount_counts_as_empty() {
    let h = harness();
    h.controller.set_burn_amount("   ");
    assert_eq!(h.controller.execute_burn().await, BurnOutcome::InvalidInput);
    assert_eq!(h.notifier.messages(), vec![EMPTY_AMOUNT_TOAST]);
}

#[tokio::test]
async fn unparseable_amount_warns_without_contract_call() {
    for input in ["abc", "-3", "0", "1.0000000000000000001"] {
        let h = harness();
        h.controller.set_burn_amount(input);
        assert_eq!(h.controller.execute_burn().await, BurnOutcome::InvalidInput, "{input}");
        assert_eq!(
            h.notifier.toasts(),
            vec![(INVALID_AMOUNT_TOAST.to_string(), ToastSeverity::Warning)]
        );
        assert!(h.signers.burns().is_empty());
        assert_eq!(h.controller.state().progress, TransactionProgress::Idle);
    }
}

#[tokio::test]
async fn progress_is_submitting_until_confirmation_then_refreshes() {
    let h = harness();
    h.signers.hold_confirmation();
    h.controller.set_burn_amount("1.5");
    let mut rx = h.controller.subscribe();

    let controller = h.controller.clone();
    let task = tokio::spawn(async move { controller.execute_burn().await });

    let state = rx
        .wait_for(|s| s.burn_tx_hash.is_some())
        .await
        .unwrap()
        .clone();
    assert!(state.tx_progress());
    assert_eq!(state.tx_button(), "Burning...");
    assert_eq!(h.burns_refreshed(), (0, 0));

    h.signers.release_confirmation();
    let outcome = task.await.unwrap();

    assert!(outcome.is_confirmed());
    assert_eq!(h.controller.state().progress, TransactionProgress::Idle);
    assert_eq!(h.burns_refreshed(), (1, 1));
}

#[tokio::test]
async fn second_submit_while_in_flight_is_busy() {
    let h = harness();
    h.signers.hold_confirmation();
    h.controller.set_burn_amount("5");
    let mut rx = h.controller.subscribe();

    let controller = h.controller.clone();
    let first = tokio::spawn(async move { controller.execute_burn().await });
    rx.wait_for(|s| s.tx_progress()).await.unwrap();

    assert_eq!(h.controller.execute_burn().await, BurnOutcome::Busy);
    assert_eq!(h.signers.burns().len(), 1);
    assert!(h.notifier.toasts().is_empty());

    h.signers.release_confirmation();
    assert!(first.await.unwrap().is_confirmed());
}

// ============================================================================
// Failures
// ============================================================================

async fn assert_failed_cleanly(h: &Harness) {
    assert_eq!(h.controller.execute_burn().await, BurnOutcome::Failed);
    let state = h.controller.state();
    assert_eq!(state.progress, TransactionProgress::Idle);
    assert_eq!(state.tx_button(), "Burn App Tokens");
    assert_eq!(
        h.notifier.toasts(),
        vec![(BURN_FAILED_TOAST.to_string(), ToastSeverity::Error)]
    );
    assert_eq!(h.burns_refreshed(), (0, 0));
}

#[tokio::test]
async fn unconfigured_chain_fails_before_submitting() {
    let h = harness_with(config(), MockWalletSession::connected(USER, Some(137)));
    h.controller.set_burn_amount("5");
    let mut rx = h.controller.subscribe();

    assert_failed_cleanly(&h).await;
    assert!(h.signers.requested_chains().is_empty());
    assert!(h.controller.state().burn_tx_hash.is_none());
    // progress never left Idle
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn missing_signer_fails() {
    let h = harness();
    h.signers.set_unavailable(true);
    h.controller.set_burn_amount("5");
    assert_failed_cleanly(&h).await;
    assert!(h.controller.state().burn_tx_hash.is_none());
}

#[tokio::test]
async fn rejected_submission_fails() {
    let h = harness();
    h.signers.set_submit_error(Some("user rejected the request"));
    h.controller.set_burn_amount("5");
    assert_failed_cleanly(&h).await;
    assert_eq!(h.signers.burns().len(), 1);
    assert!(h.controller.state().burn_tx_hash.is_none());
}

#[tokio::test]
async fn reverted_receipt_fails_but_keeps_hash() {
    let h = harness();
    h.signers.set_confirm(ConfirmBehavior::Revert);
    h.controller.set_burn_amount("5");
    assert_failed_cleanly(&h).await;
    assert_eq!(h.controller.state().burn_tx_hash, Some(TxHash::new("0xabc")));
}

#[tokio::test]
async fn confirmation_error_fails() {
    let h = harness();
    h.signers.set_confirm(ConfirmBehavior::Fail);
    h.controller.set_burn_amount("5");
    assert_failed_cleanly(&h).await;
}

#[tokio::test(start_paused = true)]
async fn hung_confirmation_times_out_into_stuck() {
    let h = harness();
    h.signers.set_confirm(ConfirmBehavior::Hang);
    h.controller.set_burn_amount("5");

    let outcome = h.controller.execute_burn().await;

    assert_eq!(outcome, BurnOutcome::TimedOut { hash: TxHash::new("0xabc") });
    let state = h.controller.state();
    assert_eq!(
        state.progress,
        TransactionProgress::Stuck { hash: TxHash::new("0xabc") }
    );
    assert_eq!(state.tx_button(), "Awaiting Confirmation");
    assert!(!state.tx_progress());
    assert_eq!(
        h.notifier.toasts(),
        vec![(TIMED_OUT_TOAST.to_string(), ToastSeverity::Error)]
    );
    assert_eq!(h.burns_refreshed(), (0, 0));

    // a stuck burn does not block the next one
    h.signers.set_confirm(ConfirmBehavior::Succeed);
    h.signers.set_hash("0xdef");
    let outcome = h.controller.execute_burn().await;
    assert_eq!(outcome, BurnOutcome::Confirmed { hash: TxHash::new("0xdef") });
    assert_eq!(h.controller.state().progress, TransactionProgress::Idle);
}

// ============================================================================
// Wallet connection
// ============================================================================

#[tokio::test]
async fn disconnected_wallet_prompts_and_stops() {
    let h = harness_with(config(), MockWalletSession::disconnected());
    h.controller.set_burn_amount("5");

    assert_eq!(h.controller.execute_burn().await, BurnOutcome::ConnectPrompted);
    assert_eq!(h.wallet.prompt_count(), 1);
    assert!(h.signers.burns().is_empty());
    assert!(h.notifier.toasts().is_empty());
}

#[tokio::test]
async fn disconnected_wallet_still_validates_amount() {
    let h = harness_with(config(), MockWalletSession::disconnected());

    assert_eq!(h.controller.execute_burn().await, BurnOutcome::InvalidInput);
    assert_eq!(h.wallet.prompt_count(), 1);
    assert_eq!(h.notifier.messages(), vec![EMPTY_AMOUNT_TOAST]);
}

#[tokio::test]
async fn wallet_connected_by_prompt_proceeds() {
    let wallet = MockWalletSession::disconnected();
    wallet.connect_on_prompt(USER);
    let h = harness_with(config(), wallet);
    h.controller.set_burn_amount("5");

    assert!(h.controller.execute_burn().await.is_confirmed());
    assert_eq!(h.controller.wallet_address(), Some(USER));
    assert!(h.controller.is_wallet_connected());
}

#[tokio::test]
async fn missing_wallet_chain_uses_default() {
    let h = harness_with(config(), MockWalletSession::connected(USER, None));
    h.controller.set_burn_amount("5");

    assert!(h.controller.execute_burn().await.is_confirmed());
    assert_eq!(h.signers.requested_chains(), vec![1]);
    assert_eq!(h.controller.wallet_chain_id(), None);
    assert_eq!(h.controller.active_chain_id(), 1);
}

#[tokio::test]
async fn testnet_wallet_burns_testnet_target() {
    let h = harness_with(config(), MockWalletSession::connected(USER, Some(11155111)));
    h.controller.set_burn_amount("2");

    assert!(h.controller.execute_burn().await.is_confirmed());
    assert_eq!(h.signers.burns()[0].token, SEPOLIA_TOKEN);
    assert_eq!(h.scanner.tiers(), vec![NetworkTier::Testnet]);
    assert_eq!(h.controller.state().supplies_chain(), Some(11155111));
}

// ============================================================================
// History, supply, price
// ============================================================================

#[tokio::test]
async fn history_keeps_only_burns_newest_first() {
    let h = harness();
    h.scanner.set_batches(vec![
        vec![
            record("0x1", 100, TxKind::Burn),
            record("0x2", 300, TxKind::Transfer),
            record("0x3", 200, TxKind::Burn),
        ],
        vec![
            record_on(137, "0x4", 400, TxKind::Burn),
            record_on(137, "0x5", 50, TxKind::Other),
        ],
    ]);

    h.controller.refetch_transactions().await;

    let hashes: Vec<_> = h
        .controller
        .state()
        .burn_transactions
        .iter()
        .map(|r| r.hash.as_str().to_string())
        .collect();
    assert_eq!(hashes, vec!["0x4", "0x3", "0x1"]);
    assert_eq!(h.scanner.tiers(), vec![NetworkTier::Mainnet]);
}

#[tokio::test]
async fn history_ties_keep_fetch_order() {
    let h = harness();
    h.scanner.set_batches(vec![
        vec![record("0xa", 10, TxKind::Burn), record("0xb", 10, TxKind::Burn)],
        vec![record("0xc", 10, TxKind::Burn)],
    ]);

    h.controller.refetch_transactions().await;

    let hashes: Vec<_> = h
        .controller
        .state()
        .burn_transactions
        .into_iter()
        .map(|r| r.hash.0)
        .collect();
    assert_eq!(hashes, vec!["0xa", "0xb", "0xc"]);
}

#[tokio::test]
async fn failed_history_fetch_keeps_previous_list() {
    let h = harness();
    h.scanner.set_batches(vec![vec![record("0x1", 1, TxKind::Burn)]]);
    h.controller.refetch_transactions().await;
    let before = h.controller.state().burn_transactions;

    h.scanner.set_error(Some("Max rate limit reached"));
    h.controller.refetch_transactions().await;

    assert_eq!(h.controller.state().burn_transactions, before);
    assert!(h.notifier.toasts().is_empty());
}

#[tokio::test]
async fn failed_supply_fetch_keeps_previous_value() {
    let h = harness();
    h.controller.fetch_supplies().await;
    let before = h.controller.state().supply;
    assert!(before.is_some());

    h.wallet.set_chain_id(Some(10));
    h.controller.fetch_supplies().await;
    assert_eq!(h.controller.state().supply, before);
}

#[tokio::test]
async fn price_refresh() {
    let h = harness();
    h.controller.refresh_price().await;
    assert_eq!(h.controller.state().token_price, None);

    h.prices.set_price("app-token", 0.25);
    h.controller.refresh_price().await;
    assert_eq!(h.controller.state().token_price, Some(0.25));
    assert_eq!(h.prices.call_count(), 2);
}

#[tokio::test]
async fn price_refresh_without_coin_id_is_a_no_op() {
    let mut config = config();
    config.coingecko_id = None;
    let h = harness_with(config, MockWalletSession::connected(USER, Some(1)));

    h.controller.refresh_price().await;
    assert_eq!(h.prices.call_count(), 0);
}

#[tokio::test]
async fn refresh_all_loads_page() {
    let h = harness();
    h.prices.set_price("app-token", 1.5);
    h.scanner.set_batches(vec![vec![record("0x1", 1, TxKind::Burn)]]);

    h.controller.refresh_all().await;

    let state = h.controller.state();
    assert_eq!(state.burn_transactions.len(), 1);
    assert_eq!(state.supplies_chain(), Some(1));
    assert_eq!(state.token_price, Some(1.5));
}

// ============================================================================
// Misc
// ============================================================================

#[tokio::test]
async fn chain_selector_toggle() {
    let h = harness();
    let mut rx = h.controller.subscribe();
    rx.borrow_and_update();

    h.controller.set_chain_selector_open(false);
    assert!(!rx.has_changed().unwrap());

    h.controller.open_chain_selector();
    assert!(rx.has_changed().unwrap());
    assert!(h.controller.state().chain_selector_open);
}

#[test]
fn builder_requires_collaborators() {
    let err = BurnPageController::builder(config())
        .wallet(Arc::new(MockWalletSession::disconnected()))
        .build()
        .err()
        .unwrap();
    assert!(err.to_string().contains("signer provider"));
}

proptest! {
    #[test]
    fn history_is_burns_sorted_descending(batches in record_batches()) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let h = harness();
        h.scanner.set_batches(batches.clone());

        rt.block_on(h.controller.refetch_transactions());

        let held = h.controller.state().burn_transactions;
        let expected = batches.iter().flatten().filter(|r| r.kind == TxKind::Burn).count();
        prop_assert_eq!(held.len(), expected);
        prop_assert!(held.iter().all(|r| r.kind == TxKind::Burn));
        prop_assert!(held.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
