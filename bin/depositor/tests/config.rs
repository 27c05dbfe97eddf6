//! Tests for loading the depositor configuration and deriving the deposit plan.


use alloy_primitives::{address, Address, U256};
use config::{NetworkConfig, NetworkType};
use depositor::config::Config;
use setup::load_test_config;
use std::time::Duration;
use workflow::{AmountError, PlanError};

#[test]
fn test_load_test_config() {
    let config = load_test_config();

    assert_eq!(config.rpc_url, "http://localhost:8545");
    assert_eq!(config.network, NetworkType::Sepolia);
    assert_eq!(config.poll_interval(), Duration::from_millis(500));
    assert!(!config.dry_run);
}

#[test]
fn test_defaults() {
    let config = Config::parse(r#"rpc_url = "http://localhost:8545""#).unwrap();

    assert_eq!(config.network, NetworkType::Sepolia);
    assert_eq!(config.deposit_amount, "1.0");
    assert_eq!(config.poll_interval(), Duration::from_secs(2));
    assert_eq!(config.outcome_timeout(), None);
    assert_eq!(config.metrics_port, None);
    assert_eq!(config.network_config(), NetworkConfig::sepolia());
}

#[test]
fn test_missing_rpc_url() {
    assert!(Config::parse(r#"network = "sepolia""#).is_err());
}

#[test]
fn test_overrides() {
    let config = Config::parse(
        r#"
        rpc_url = "http://localhost:8545"
        deposit_amount = "2.5"
        token_address = "0x1111111111111111111111111111111111111111"
        token_decimals = 6
        deposit_contract_address = "0x2222222222222222222222222222222222222222"
        outcome_timeout_secs = 300
        metrics_port = 9090
        "#,
    )
    .unwrap();

    let network = config.network_config();
    assert_eq!(network.chain_id, 11155111);
    assert_eq!(network.token, address!("1111111111111111111111111111111111111111"));
    assert_eq!(
        network.deposit_contract,
        address!("2222222222222222222222222222222222222222")
    );
    assert_eq!(config.outcome_timeout(), Some(Duration::from_secs(300)));
    assert_eq!(config.metrics_port, Some(9090));

    let plan = config.deposit_plan(&network).unwrap();
    assert_eq!(plan.amount(), U256::from(2_500_000u64));
}

#[test]
fn test_default_plan_is_one_token() {
    let config = load_test_config();
    let network = config.network_config();
    let plan = config.deposit_plan(&network).unwrap();

    assert_eq!(plan.amount(), U256::from(1_000_000_000_000_000_000u128));
    assert_eq!(plan.token(), network.token);
    assert_eq!(plan.deposit_contract(), network.deposit_contract);
}

#[test]
fn test_invalid_amount() {
    let config = Config::parse(
        r#"
        rpc_url = "http://localhost:8545"
        deposit_amount = "-3"
        "#,
    )
    .unwrap();

    let result = config.deposit_plan(&config.network_config());
    assert!(matches!(
        result,
        Err(PlanError::Amount(AmountError::Negative(_)))
    ));
}

#[test]
fn test_custom_network_requires_addresses() {
    let config = Config::parse(
        r#"
        rpc_url = "http://localhost:8545"
        network = "custom"
        chain_id = 31337
        "#,
    )
    .unwrap();

    let network = config.network_config();
    assert_eq!(network.chain_id, 31337);
    assert_eq!(network.token, Address::ZERO);
    assert_eq!(
        config.deposit_plan(&network).unwrap_err(),
        PlanError::ZeroToken
    );
}
