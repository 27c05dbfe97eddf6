use alloy_primitives::Address;
use config::{NetworkConfig, NetworkConfigBuilder, NetworkType, DEFAULT_DEPOSIT_AMOUNT};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use workflow::{DepositPlan, PlanError};

const fn default_network() -> NetworkType {
    NetworkType::Sepolia
}

fn default_deposit_amount() -> String {
    DEFAULT_DEPOSIT_AMOUNT.to_string()
}

const fn default_poll_interval_ms() -> u64 {
    2_000
}

/// Top-level depositor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint url
    pub rpc_url: String,

    /// Network preset the addresses are taken from
    #[serde(default = "default_network")]
    pub network: NetworkType,

    /// Amount to approve and deposit, in whole tokens (e.g. "1.0")
    #[serde(default = "default_deposit_amount")]
    pub deposit_amount: String,

    /// Chain ID override
    pub chain_id: Option<u64>,

    /// Token address override
    pub token_address: Option<Address>,

    /// Token decimals override
    pub token_decimals: Option<u8>,

    /// Deposit contract address override
    pub deposit_contract_address: Option<Address>,

    /// Block explorer API override
    pub explorer_api_url: Option<String>,

    /// Receipt polling interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Give up on a pending transaction after this many seconds and roll
    /// back. Waits forever when unset.
    pub outcome_timeout_secs: Option<u64>,

    /// Port for the Prometheus exporter. No exporter when unset.
    pub metrics_port: Option<u16>,

    /// Print the planned transactions without submitting them
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(contents)?;

        Ok(config)
    }

    /// Network preset with the configured overrides applied.
    pub fn network_config(&self) -> NetworkConfig {
        let mut builder = NetworkConfigBuilder::from_network_type(self.network);

        if let Some(chain_id) = self.chain_id {
            builder = builder.chain_id(chain_id);
        }
        if let Some(token) = self.token_address {
            builder = builder.token(token);
        }
        if let Some(decimals) = self.token_decimals {
            builder = builder.token_decimals(decimals);
        }
        if let Some(deposit_contract) = self.deposit_contract_address {
            builder = builder.deposit_contract(deposit_contract);
        }
        if let Some(url) = &self.explorer_api_url {
            builder = builder.explorer_api_url(url.clone());
        }

        builder.build()
    }

    /// Deposit plan for `network` using the configured amount.
    pub fn deposit_plan(&self, network: &NetworkConfig) -> Result<DepositPlan, PlanError> {
        DepositPlan::from_decimal(
            network.token,
            network.deposit_contract,
            &self.deposit_amount,
            network.token_decimals,
        )
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn outcome_timeout(&self) -> Option<Duration> {
        self.outcome_timeout_secs.map(Duration::from_secs)
    }
}
