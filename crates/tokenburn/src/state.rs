//! Observable page state

use serde::Serialize;
use tokenburn_traits::{SupplySnapshot, TransactionRecord, TxHash};

/// Button label while nothing is in flight
pub const IDLE_LABEL: &str = "Burn App Tokens";
/// Button label while a burn is being submitted or confirmed
pub const SUBMITTING_LABEL: &str = "Burning...";
/// Button label after the confirmation wait gave up
pub const STUCK_LABEL: &str = "Awaiting Confirmation";

/// Where the current burn is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TransactionProgress {
    #[default]
    Idle,
    /// A burn is in flight; new submissions are refused
    Submitting,
    /// Submitted but not confirmed within the timeout
    Stuck { hash: TxHash },
}

impl TransactionProgress {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Idle => IDLE_LABEL,
            Self::Submitting => SUBMITTING_LABEL,
            Self::Stuck { .. } => STUCK_LABEL,
        }
    }
}

/// Snapshot of everything the burn page renders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageState {
    /// Amount input, unvalidated
    pub burn_amount: String,
    pub progress: TransactionProgress,
    /// Hash of the most recent accepted burn
    pub burn_tx_hash: Option<TxHash>,
    /// Burn history, newest first
    pub burn_transactions: Vec<TransactionRecord>,
    /// Supply of the active chain; its `chain_id` is the chain the figure belongs to
    pub supply: Option<SupplySnapshot>,
    /// Token price in USD
    pub token_price: Option<f64>,
    pub chain_selector_open: bool,
}

impl PageState {
    pub fn tx_button(&self) -> &'static str {
        self.progress.button_label()
    }

    /// True while the burn button should show a spinner
    pub fn tx_progress(&self) -> bool {
        self.progress.is_submitting()
    }

    pub fn supplies_chain(&self) -> Option<u64> {
        self.supply.map(|s| s.chain_id)
    }
}

/// How a call to `execute_burn` ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BurnOutcome {
    /// Another burn is in flight
    Busy,
    /// Empty or unparseable amount; a warning was shown
    InvalidInput,
    /// No wallet connected; the connect prompt was opened
    ConnectPrompted,
    /// Resolution, submission or confirmation failed; an error was shown
    Failed,
    Confirmed { hash: TxHash },
    /// The receipt did not arrive in time; progress is `Stuck`
    TimedOut { hash: TxHash },
}

impl BurnOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}
