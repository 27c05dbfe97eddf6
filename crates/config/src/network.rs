//! Network configuration for the deposit workflow.
//!
//! Provides chain-specific addresses and parameters for the networks the
//! deposit flow runs against.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Amount deposited when none is configured, in whole tokens.
pub const DEFAULT_DEPOSIT_AMOUNT: &str = "1.0";

/// Network type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Sepolia,
    /// Any other chain; every address must be supplied explicitly.
    Custom,
}

/// Complete network configuration for the deposit flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network type
    pub network_type: NetworkType,
    /// Chain ID
    pub chain_id: u64,
    /// ERC20 token being deposited
    pub token: Address,
    /// Token decimals used to scale human-readable amounts
    pub token_decimals: u8,
    /// Contract receiving the deposit (and the approval's spender)
    pub deposit_contract: Address,
    /// Block explorer API endpoint
    pub explorer_api_url: String,
}

impl NetworkConfig {
    /// Ethereum Sepolia testnet configuration.
    pub fn sepolia() -> Self {
        Self {
            network_type: NetworkType::Sepolia,
            chain_id: 11155111,
            // https://sepolia.etherscan.io/address/0xE91d143072fc5e92e6445f18aa35DBd43597340c
            token: address!("0xE91d143072fc5e92e6445f18aa35DBd43597340c"),
            token_decimals: 18,
            // https://sepolia.etherscan.io/address/0x5E4deE7BBC4d69f025d5eAE8C45026dED583ec44
            deposit_contract: address!("0x5E4deE7BBC4d69f025d5eAE8C45026dED583ec44"),
            explorer_api_url: "https://api-sepolia.etherscan.io/api".to_string(),
        }
    }

    /// Create configuration from network type.
    ///
    /// `Custom` starts with zero addresses which must be overridden.
    pub fn from_network_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Sepolia => Self::sepolia(),
            NetworkType::Custom => NetworkConfigBuilder::custom(0).build(),
        }
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Start with Sepolia defaults.
    pub fn sepolia() -> Self {
        Self {
            config: NetworkConfig::sepolia(),
        }
    }

    /// Start from an empty custom network.
    pub fn custom(chain_id: u64) -> Self {
        Self {
            config: NetworkConfig {
                network_type: NetworkType::Custom,
                chain_id,
                token: Address::ZERO,
                token_decimals: 18,
                deposit_contract: Address::ZERO,
                explorer_api_url: String::new(),
            },
        }
    }

    /// Start from a preset network type.
    pub fn from_network_type(network_type: NetworkType) -> Self {
        Self {
            config: NetworkConfig::from_network_type(network_type),
        }
    }

    /// Override the chain ID.
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.chain_id = chain_id;
        self
    }

    /// Override the token address.
    pub const fn token(mut self, address: Address) -> Self {
        self.config.token = address;
        self
    }

    /// Override the token decimals.
    pub const fn token_decimals(mut self, decimals: u8) -> Self {
        self.config.token_decimals = decimals;
        self
    }

    /// Override the deposit contract address.
    pub const fn deposit_contract(mut self, address: Address) -> Self {
        self.config.deposit_contract = address;
        self
    }

    /// Override the explorer API endpoint.
    pub fn explorer_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.explorer_api_url = url.into();
        self
    }

    /// Build the network configuration.
    pub fn build(self) -> NetworkConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sepolia_config() {
        let config = NetworkConfig::sepolia();
        assert_eq!(config.chain_id, 11155111);
        assert_eq!(config.token_decimals, 18);
        assert_eq!(config.network_type, NetworkType::Sepolia);
        assert_ne!(config.token, config.deposit_contract);
    }

    #[test]
    fn test_custom_config_builder() {
        let custom_vault = address!("1111111111111111111111111111111111111111");

        let config = NetworkConfigBuilder::sepolia()
            .deposit_contract(custom_vault)
            .build();

        assert_eq!(config.deposit_contract, custom_vault);
        assert_eq!(config.token, NetworkConfig::sepolia().token);
        assert_eq!(config.network_type, NetworkType::Sepolia);
    }

    #[test]
    fn test_custom_network_starts_empty() {
        let config = NetworkConfig::from_network_type(NetworkType::Custom);
        assert_eq!(config.token, Address::ZERO);
        assert_eq!(config.deposit_contract, Address::ZERO);
        assert!(config.explorer_api_url.is_empty());
    }

    #[test]
    fn test_network_type_lowercase_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            network: NetworkType,
        }

        let parsed: Wrapper = toml::from_str(r#"network = "sepolia""#).unwrap();
        assert_eq!(parsed.network, NetworkType::Sepolia);

        let parsed: Wrapper = toml::from_str(r#"network = "custom""#).unwrap();
        assert_eq!(parsed.network, NetworkType::Custom);
    }
}
