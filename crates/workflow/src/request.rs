use crate::plan::{DepositPlan, WalletContext};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use binding::{token::IERC20, vault::IDepositVault};
use std::fmt;

/// One argument of a contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallArgument {
    Address(Address),
    Uint256(U256),
}

impl fmt::Display for CallArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::Uint256(value) => write!(f, "{value}"),
        }
    }
}

/// Contract call issued by one workflow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractCall {
    /// `IERC20.approve(spender, amount)`
    Approve { spender: Address, amount: U256 },
    /// `IDepositVault.deposit(amount)`
    Deposit { amount: U256 },
}

impl ContractCall {
    pub const fn function_name(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "approve",
            Self::Deposit { .. } => "deposit",
        }
    }

    pub const fn selector(&self) -> [u8; 4] {
        match self {
            Self::Approve { .. } => IERC20::approveCall::SELECTOR,
            Self::Deposit { .. } => IDepositVault::depositCall::SELECTOR,
        }
    }

    pub const fn amount(&self) -> U256 {
        match self {
            Self::Approve { amount, .. } | Self::Deposit { amount } => *amount,
        }
    }

    /// Arguments in ABI order.
    pub fn arguments(&self) -> Vec<CallArgument> {
        match self {
            Self::Approve { spender, amount } => {
                vec![CallArgument::Address(*spender), CallArgument::Uint256(*amount)]
            }
            Self::Deposit { amount } => vec![CallArgument::Uint256(*amount)],
        }
    }

    /// ABI-encoded calldata including the selector.
    pub fn calldata(&self) -> Bytes {
        let encoded = match self {
            Self::Approve { spender, amount } => IERC20::approveCall {
                spender: *spender,
                amount: *amount,
            }
            .abi_encode(),
            Self::Deposit { amount } => IDepositVault::depositCall { amount: *amount }.abi_encode(),
        };
        Bytes::from(encoded)
    }
}

/// Immutable description of a transaction to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Sending account
    pub from: Address,
    /// Chain the transaction is meant for
    pub chain_id: u64,
    /// Contract being called
    pub to: Address,
    pub call: ContractCall,
}

impl TransactionRequest {
    /// Allowance approval letting the deposit contract pull the plan amount.
    pub const fn approval(context: &WalletContext, plan: &DepositPlan) -> Self {
        Self {
            from: context.account,
            chain_id: context.chain_id,
            to: plan.token(),
            call: ContractCall::Approve {
                spender: plan.deposit_contract(),
                amount: plan.amount(),
            },
        }
    }

    /// Deposit of the plan amount.
    pub const fn deposit(context: &WalletContext, plan: &DepositPlan) -> Self {
        Self {
            from: context.account,
            chain_id: context.chain_id,
            to: plan.deposit_contract(),
            call: ContractCall::Deposit {
                amount: plan.amount(),
            },
        }
    }

    pub fn calldata(&self) -> Bytes {
        self.call.calldata()
    }
}

impl fmt::Display for TransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.call.function_name())?;
        for (i, arg) in self.call.arguments().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ") on {} from {}", self.to, self.from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (WalletContext, DepositPlan) {
        let context = WalletContext::new(Address::from([9u8; 20]), 11155111);
        let plan = DepositPlan::from_decimal(
            Address::from([1u8; 20]),
            Address::from([2u8; 20]),
            "1.0",
            18,
        )
        .unwrap();
        (context, plan)
    }

    #[test]
    fn test_approval_request() {
        let (context, plan) = fixtures();
        let request = TransactionRequest::approval(&context, &plan);

        assert_eq!(request.to, plan.token());
        assert_eq!(request.from, context.account);
        assert_eq!(request.chain_id, 11155111);
        assert_eq!(request.call.function_name(), "approve");
        assert_eq!(
            request.call.arguments(),
            vec![
                CallArgument::Address(plan.deposit_contract()),
                CallArgument::Uint256(plan.amount()),
            ]
        );
    }

    #[test]
    fn test_deposit_request() {
        let (context, plan) = fixtures();
        let request = TransactionRequest::deposit(&context, &plan);

        assert_eq!(request.to, plan.deposit_contract());
        assert_eq!(request.call.function_name(), "deposit");
        assert_eq!(request.call.amount(), plan.amount());
        assert_eq!(request.call.arguments().len(), 1);
    }

    #[test]
    fn test_calldata_starts_with_selector() {
        let (context, plan) = fixtures();

        for request in [
            TransactionRequest::approval(&context, &plan),
            TransactionRequest::deposit(&context, &plan),
        ] {
            let calldata = request.calldata();
            assert_eq!(&calldata[..4], &request.call.selector());
            assert_eq!(calldata.len(), 4 + 32 * request.call.arguments().len());
        }
    }

    #[test]
    fn test_display() {
        let (context, plan) = fixtures();
        let text = TransactionRequest::deposit(&context, &plan).to_string();

        assert!(text.starts_with("deposit(1000000000000000000)"));
        assert!(text.contains(&plan.deposit_contract().to_string()));
    }
}
