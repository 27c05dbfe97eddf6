//! Decimal amount conversion.
//!
//! Turns a human-readable token amount such as `"1.0"` into the token's base
//! integer unit by scaling with its decimals.

use crate::error::AmountError;
use alloy_primitives::{
    utils::{parse_units, ParseUnits},
    U256,
};

/// Decimals used by ether and most ERC20 tokens.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Convert a decimal string into base units.
///
/// Zero and negative amounts are rejected since neither can be approved or
/// deposited.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(AmountError::Empty);
    }

    let parsed = parse_units(amount, decimals).map_err(|e| AmountError::Invalid {
        amount: amount.to_string(),
        reason: e.to_string(),
    })?;

    match parsed {
        ParseUnits::U256(value) if value.is_zero() => Err(AmountError::Zero),
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(AmountError::Negative(amount.to_string())),
    }
}
