//! ERC20 token contract bindings.

use alloy_sol_types::sol;

sol! {
    /// ERC20 allowance approval
    interface IERC20 {
        /// Approve spender to spend tokens
        function approve(address spender, uint256 amount) external returns (bool);
    }
}
