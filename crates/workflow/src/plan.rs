use crate::{amount::parse_amount, error::PlanError};
use alloy_primitives::{Address, U256};

/// Wallet session the controller acts for.
///
/// Passed explicitly at construction; the controller never looks up the
/// connected account anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletContext {
    /// Connected account that signs both transactions
    pub account: Address,
    /// Chain the account is connected to
    pub chain_id: u64,
}

impl WalletContext {
    pub const fn new(account: Address, chain_id: u64) -> Self {
        Self { account, chain_id }
    }
}

/// What to approve and deposit.
///
/// The base-unit amount is computed once here and shared by both requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositPlan {
    token: Address,
    deposit_contract: Address,
    amount: U256,
}

impl DepositPlan {
    pub fn new(token: Address, deposit_contract: Address, amount: U256) -> Result<Self, PlanError> {
        if token == Address::ZERO {
            return Err(PlanError::ZeroToken);
        }

        if deposit_contract == Address::ZERO {
            return Err(PlanError::ZeroDepositContract);
        }

        if amount.is_zero() {
            return Err(crate::error::AmountError::Zero.into());
        }

        Ok(Self {
            token,
            deposit_contract,
            amount,
        })
    }

    /// Build a plan from a human-readable amount such as `"1.0"`.
    pub fn from_decimal(
        token: Address,
        deposit_contract: Address,
        amount: &str,
        decimals: u8,
    ) -> Result<Self, PlanError> {
        let amount = parse_amount(amount, decimals)?;
        Self::new(token, deposit_contract, amount)
    }

    pub const fn token(&self) -> Address {
        self.token
    }

    pub const fn deposit_contract(&self) -> Address {
        self.deposit_contract
    }

    /// Amount in the token's base unit.
    pub const fn amount(&self) -> U256 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmountError;

    const TOKEN: Address = Address::new([1u8; 20]);
    const VAULT: Address = Address::new([2u8; 20]);

    #[test]
    fn test_from_decimal() {
        let plan = DepositPlan::from_decimal(TOKEN, VAULT, "1.0", 18).unwrap();
        assert_eq!(plan.amount(), U256::from(10u64).pow(U256::from(18u64)));
        assert_eq!(plan.token(), TOKEN);
        assert_eq!(plan.deposit_contract(), VAULT);
    }

    #[test]
    fn test_zero_token() {
        let result = DepositPlan::new(Address::ZERO, VAULT, U256::from(1u64));
        assert_eq!(result.unwrap_err(), PlanError::ZeroToken);
    }

    #[test]
    fn test_zero_deposit_contract() {
        let result = DepositPlan::new(TOKEN, Address::ZERO, U256::from(1u64));
        let err = result.unwrap_err();
        assert_eq!(err, PlanError::ZeroDepositContract);
        assert!(err.to_string().contains("Deposit contract"));
    }

    #[test]
    fn test_zero_amount() {
        let result = DepositPlan::new(TOKEN, VAULT, U256::ZERO);
        assert_eq!(result.unwrap_err(), PlanError::Amount(AmountError::Zero));
    }

    #[test]
    fn test_invalid_decimal_amount() {
        let result = DepositPlan::from_decimal(TOKEN, VAULT, "abc", 18);
        assert!(matches!(
            result,
            Err(PlanError::Amount(AmountError::Invalid { .. }))
        ));
    }
}
