//! Deposit vault bindings.
//!
//! The vault pulls `amount` of its configured token from the caller, so the
//! caller must have approved the vault as spender beforehand.

use alloy_sol_types::sol;

sol! {
    /// Token deposit contract
    interface IDepositVault {
        /// Pull `amount` tokens from the caller into the vault
        function deposit(uint256 amount) external;
    }
}
