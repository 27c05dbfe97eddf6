//! Configuration types for the deposit workflow.
//!
//! This crate provides:
//! - Network configurations (Sepolia preset, custom networks)
//! - Token and deposit contract addresses per network
//! - A builder for overriding preset values

pub mod network;

pub use network::{NetworkConfig, NetworkConfigBuilder, NetworkType, DEFAULT_DEPOSIT_AMOUNT};
