//! Conversions between user-typed token amounts and on-chain integers.

use alloy::primitives::U256;
use walletd_error::{Result, WalletdError};

/// Exponent used to render balances.
///
/// Balances are always shown divided by 10^18, whatever the token's own
/// `decimals()` says.
pub const BALANCE_DISPLAY_DECIMALS: u8 = 18;

fn ten_pow(exp: u8) -> Result<U256> {
    U256::from(10u64)
        .checked_pow(U256::from(exp))
        .ok_or_else(|| WalletdError::AmountOverflow(format!("10^{exp} does not fit in 256 bits")))
}

/// Scales a decimal amount typed by the user into the token's base unit.
///
/// `"5"` with 18 decimals becomes `5 * 10^18`. Fractional input is accepted
/// as long as it does not carry more significant digits than `decimals`.
pub fn scale_amount(amount: &str, decimals: u8) -> Result<U256> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(WalletdError::MissingAmount);
    }

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return Err(WalletdError::InvalidAmount(amount.to_string()));
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(WalletdError::InvalidAmount(format!(
            "{amount} has more than {decimals} fractional digits"
        )));
    }

    let overflow = || WalletdError::AmountOverflow(amount.to_string());

    let whole = if whole.is_empty() { "0" } else { whole };
    let whole = U256::from_str_radix(whole, 10).map_err(|_| overflow())?;

    let fraction = if fraction.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{fraction:0<width$}", width = decimals as usize);
        U256::from_str_radix(&padded, 10).map_err(|_| overflow())?
    };

    whole
        .checked_mul(ten_pow(decimals)?)
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Renders a raw integer amount with `decimals` implied places, trimming
/// trailing zeros (`1500000000000000000` at 18 → `"1.5"`).
pub fn format_units_trimmed(raw: U256, decimals: u8) -> String {
    let Ok(divisor) = ten_pow(decimals) else {
        return "0".to_string();
    };
    let whole = raw / divisor;
    let remainder = raw % divisor;
    if remainder.is_zero() {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", remainder.to_string(), width = decimals as usize);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// Balance text shown in the view (fixed 18-decimal divisor).
pub fn display_balance(raw: U256) -> String {
    format_units_trimmed(raw, BALANCE_DISPLAY_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use walletd_error::ErrorCode;
    use walletd_testing::{token_decimals, whole_token_amount, EdgeCaseAmounts};

    #[test]
    fn test_scales_whole_amount() {
        let scaled = scale_amount("5", 18).unwrap();
        assert_eq!(scaled.to_string(), "5000000000000000000");

        assert_eq!(scale_amount("5", 6).unwrap(), U256::from(5_000_000u64));
        assert_eq!(scale_amount("5", 0).unwrap(), U256::from(5u64));
    }

    #[test]
    fn test_edge_case_amounts_scale_exactly() {
        for (input, expected) in EdgeCaseAmounts::scaled_18() {
            assert_eq!(scale_amount(input, 18).unwrap().to_string(), expected, "input {input}");
        }
    }

    #[test]
    fn test_leading_dot_and_trailing_zeros() {
        assert_eq!(scale_amount(".25", 2).unwrap(), U256::from(25u64));
        assert_eq!(scale_amount("3.000", 0).unwrap(), U256::from(3u64));
    }

    #[test]
    fn test_empty_amount_is_missing() {
        assert!(matches!(scale_amount("", 18), Err(WalletdError::MissingAmount)));
        assert!(matches!(scale_amount("   ", 18), Err(WalletdError::MissingAmount)));
    }

    #[test]
    fn test_malformed_amounts_rejected() {
        for input in EdgeCaseAmounts::invalid() {
            let err = scale_amount(input, 18).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidAmount, "input {input}");
        }
    }

    #[test]
    fn test_too_precise_amount_rejected() {
        let err = scale_amount("0.001", 2).unwrap_err();
        assert!(err.to_string().contains("fractional digits"));
    }

    #[test]
    fn test_overflow_detected() {
        let huge = "9".repeat(80);
        assert_eq!(scale_amount(&huge, 0).unwrap_err().code(), ErrorCode::AmountOverflow);
        assert_eq!(scale_amount("1", 78).unwrap_err().code(), ErrorCode::AmountOverflow);
    }

    #[test]
    fn test_display_balance_uses_fixed_divisor() {
        assert_eq!(display_balance(U256::ZERO), "0");
        assert_eq!(display_balance(U256::from(1_500_000_000_000_000_000u128)), "1.5");
        assert_eq!(display_balance(U256::from(42u64) * U256::from(10u64).pow(U256::from(18u64))), "42");
        // a 6-decimal token holding 5 whole tokens still divides by 10^18
        assert_eq!(display_balance(U256::from(5_000_000u64)), "0.000000000005");
    }

    #[test]
    fn test_format_units_trimmed() {
        assert_eq!(format_units_trimmed(U256::from(1234u64), 2), "12.34");
        assert_eq!(format_units_trimmed(U256::from(1200u64), 2), "12");
        assert_eq!(format_units_trimmed(U256::from(5u64), 3), "0.005");
    }

    proptest! {
        #[test]
        fn test_whole_amounts_scale_by_power_of_ten(
            whole in whole_token_amount(),
            decimals in token_decimals(),
        ) {
            let scaled = scale_amount(&whole.to_string(), decimals).unwrap();
            let expected = U256::from(whole) * U256::from(10u64).pow(U256::from(decimals));
            prop_assert_eq!(scaled, expected);
        }
    }
}
