//! Explorer wire format and transaction classification

use alloy_primitives::{Address, U256};
use serde::Deserialize;
use serde_aux::prelude::deserialize_number_from_string;
use tokenburn_error::{BurnError, Result};
use tokenburn_traits::{TransactionRecord, TxHash, TxKind};

/// Selector of `burn(uint256)`
pub const BURN_SELECTOR: &str = "0x42966c68";

/// Selector of `transfer(address,uint256)`
pub const TRANSFER_SELECTOR: &str = "0xa9059cbb";

const NO_TRANSACTIONS: &str = "No transactions found";

/// Envelope returned by every Etherscan-style endpoint.
///
/// `result` is an array on success and a message string on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerResponse {
    /// "1" on success, "0" otherwise
    pub status: String,
    /// "OK" or a reason
    pub message: String,
    /// Payload
    pub result: serde_json::Value,
}

impl ExplorerResponse {
    /// Decodes the transaction list, treating "No transactions found" as empty
    pub fn into_transactions(self) -> Result<Vec<RawTransaction>> {
        if self.status != "1" {
            if self.message.starts_with(NO_TRANSACTIONS) {
                return Ok(Vec::new());
            }
            let detail = match &self.result {
                serde_json::Value::String(s) => s.clone(),
                _ => String::new(),
            };
            return Err(BurnError::ExplorerError(format!("{}: {}", self.message, detail)));
        }
        serde_json::from_value(self.result).map_err(|e| BurnError::JsonError(e.to_string()))
    }
}

/// A `txlist` entry. Numbers arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// Transaction hash
    pub hash: String,
    /// Block timestamp
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub time_stamp: u64,
    /// Sender
    pub from: String,
    /// Recipient; empty for contract creation
    #[serde(default)]
    pub to: String,
    /// Native value in wei
    #[serde(default)]
    pub value: String,
    /// "1" if execution failed
    #[serde(default)]
    pub is_error: String,
    /// Call data
    #[serde(default)]
    pub input: String,
    /// Four-byte selector, when the explorer provides it
    #[serde(default)]
    pub method_id: String,
    /// Decoded function signature, when the explorer provides it
    #[serde(default)]
    pub function_name: String,
}

impl RawTransaction {
    /// Four-byte selector, from `methodId` or the head of `input`
    pub fn selector(&self) -> Option<String> {
        if self.method_id.len() == 10 {
            return Some(self.method_id.to_ascii_lowercase());
        }
        self.input.get(..10).map(str::to_ascii_lowercase)
    }

    /// Converts into a typed record for `chain_id`
    pub fn into_record(self, chain_id: u64) -> Result<TransactionRecord> {
        let kind = classify(&self);
        let from = parse_address(&self.from)?;
        let to = if self.to.is_empty() {
            None
        } else {
            Some(parse_address(&self.to)?)
        };
        let value = if self.value.is_empty() {
            U256::ZERO
        } else {
            self.value
                .parse::<U256>()
                .map_err(|e| BurnError::ExplorerError(format!("bad value '{}': {e}", self.value)))?
        };
        Ok(TransactionRecord {
            hash: TxHash::new(self.hash),
            timestamp: self.time_stamp,
            kind,
            chain_id,
            from,
            to,
            value,
        })
    }
}

fn parse_address(raw: &str) -> Result<Address> {
    raw.parse::<Address>().map_err(|e| BurnError::InvalidAddress {
        address: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Classifies an explorer transaction. Failed executions never count.
pub fn classify(tx: &RawTransaction) -> TxKind {
    if tx.is_error == "1" {
        return TxKind::Other;
    }
    let selector = tx.selector();
    if selector.as_deref() == Some(BURN_SELECTOR) || tx.function_name.starts_with("burn") {
        TxKind::Burn
    } else if selector.as_deref() == Some(TRANSFER_SELECTOR) {
        TxKind::Transfer
    } else {
        TxKind::Other
    }
}
