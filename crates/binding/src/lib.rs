//! Contract bindings for the deposit flow.
//!
//! This crate consolidates the Solidity interfaces the workflow encodes calls for:
//! - ERC20 tokens (allowance approval)
//! - The deposit vault that pulls approved tokens
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod token;
pub mod vault;
