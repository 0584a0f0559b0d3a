//! Human amount to base units

use alloy_primitives::utils::{parse_units, ParseUnits};
use alloy_primitives::U256;
use tokenburn_error::{BurnError, Result};

/// A validated burn, built at submit time and dropped after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnRequest {
    /// Input as typed, trimmed
    pub amount: String,
    pub target_chain_id: u64,
    pub base_units: U256,
}

impl BurnRequest {
    pub fn parse(amount: &str, target_chain_id: u64, decimals: u8) -> Result<Self> {
        let base_units = parse_base_units(amount, decimals)?;
        Ok(Self {
            amount: amount.trim().to_string(),
            target_chain_id,
            base_units,
        })
    }
}

/// Converts a decimal string such as `"1.5"` into base units.
///
/// Surrounding whitespace is ignored. Signs, exponents, separators, zero and
/// more fractional digits than `decimals` are rejected rather than rounded.
pub fn parse_base_units(amount: &str, decimals: u8) -> Result<U256> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(BurnError::EmptyAmount);
    }
    let invalid = |reason: String| BurnError::InvalidAmount {
        amount: amount.to_string(),
        reason,
    };

    let (whole, frac) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("no digits".into()));
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("not a decimal number".into()));
    }
    if frac.len() > usize::from(decimals) {
        return Err(invalid(format!("more than {decimals} decimal places")));
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let normalized = if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{frac}")
    };
    let value = match parse_units(&normalized, decimals).map_err(|e| invalid(e.to_string()))? {
        ParseUnits::U256(value) => value,
        ParseUnits::I256(_) => return Err(invalid("amount is negative".into())),
    };
    if value.is_zero() {
        return Err(invalid("amount must be greater than zero".into()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tokenburn_testing::{burn_amount_string, EdgeCaseAmounts};

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    #[test]
    fn test_whole_amount() {
        assert_eq!(parse_base_units("5", 18).unwrap(), ether(5));
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(
            parse_base_units("0.5", 18).unwrap(),
            U256::from(500_000_000_000_000_000u64)
        );
        assert_eq!(parse_base_units(".5", 18).unwrap(), parse_base_units("0.5", 18).unwrap());
        assert_eq!(parse_base_units("1.", 18).unwrap(), ether(1));
        assert_eq!(parse_base_units("0.000000000000000001", 18).unwrap(), U256::from(1));
        assert_eq!(parse_base_units("1.25", 6).unwrap(), U256::from(1_250_000));
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(parse_base_units(" 42 ", 18).unwrap(), ether(42));
    }

    #[test]
    fn test_empty_inputs() {
        for input in EdgeCaseAmounts::empty() {
            assert!(matches!(parse_base_units(input, 18), Err(BurnError::EmptyAmount)), "{input:?}");
        }
    }

    #[test]
    fn test_invalid_inputs() {
        for input in EdgeCaseAmounts::invalid() {
            assert!(
                matches!(parse_base_units(input, 18), Err(BurnError::InvalidAmount { .. })),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_valid_inputs() {
        for input in EdgeCaseAmounts::valid() {
            assert!(parse_base_units(input, 18).is_ok(), "{input:?}");
        }
    }

    #[test]
    fn test_too_many_decimals() {
        let err = parse_base_units("1.1234567", 6).unwrap_err();
        assert!(err.to_string().contains("more than 6 decimal places"));
    }

    #[test]
    fn test_overflow_rejected() {
        let huge = "9".repeat(90);
        assert!(matches!(
            parse_base_units(&huge, 18),
            Err(BurnError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_burn_request() {
        let request = BurnRequest::parse(" 5 ", 137, 18).unwrap();
        assert_eq!(request.amount, "5");
        assert_eq!(request.target_chain_id, 137);
        assert_eq!(request.base_units, ether(5));
    }

    proptest! {
        #[test]
        fn prop_valid_amounts_parse(amount in burn_amount_string(18)) {
            let value = parse_base_units(&amount, 18).unwrap();
            let whole: u64 = amount.split('.').next().unwrap().parse().unwrap();
            prop_assert!(value >= ether(whole));
            prop_assert!(value < ether(whole + 1));
        }

        #[test]
        fn prop_garbage_never_panics(amount in "\\PC{0,40}") {
            let _ = parse_base_units(&amount, 18);
        }
    }
}
