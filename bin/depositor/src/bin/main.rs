//! Approve and deposit ERC20 tokens into a deposit contract.
//!
//! Subcommands:
//! - `run`: approve the deposit contract, then deposit the configured amount
//! - `fetch-abi`: download a verified contract ABI from the block explorer

use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use client::{ProviderSubmitter, ReceiptWatcher};
use depositor::{
    config::Config,
    metrics::{install_prometheus_exporter, Metrics},
    report_phases, run_deposit_flow,
};
use explorer::Explorer;
use std::{path::PathBuf, time::Instant};
use tracing::{error, info};
use workflow::{TransactionRequest, TransactionWorkflowController, WalletContext};

#[derive(Parser)]
#[command(name = "depositor")]
#[command(about = "Approve and deposit ERC20 tokens into a deposit contract")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Approve the deposit contract and deposit the configured amount
    Run {
        /// Private key for signing transactions (hex string, with or without 0x prefix)
        #[arg(short = 'k', long, env = "PRIVATE_KEY")]
        private_key: String,

        /// Dry-run mode: print the planned transactions without submitting them
        #[arg(long)]
        dry_run: bool,
    },

    /// Download a verified contract ABI from the block explorer
    FetchAbi {
        /// Contract address
        #[arg(long)]
        address: Address,

        /// Directory the ABI is written to
        #[arg(long, default_value = "abis")]
        out_dir: PathBuf,

        /// Explorer API key
        #[arg(long, env = "ETHERSCAN_API_KEY")]
        api_key: String,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Loading config: {}", cli.config);
    let mut config = Config::from_file(&cli.config)?;
    let network = config.network_config();

    info!("Loaded config:");
    info!("  Network: {:?} (chain {})", network.network_type, network.chain_id);
    info!("  Token: {}", network.token);
    info!("  Deposit contract: {}", network.deposit_contract);

    match cli.command {
        Command::Run {
            private_key,
            dry_run,
        } => {
            // Override dry_run from CLI flag
            if dry_run {
                config.dry_run = true;
            }

            let plan = config.deposit_plan(&network)?;
            let account = client::wallet_address(&private_key)?;
            info!("  Account: {}", account);
            info!("  Amount: {} ({} base units)", config.deposit_amount, plan.amount());

            if config.dry_run {
                info!("  Mode: DRY-RUN (no transactions will be executed)");
                let context = WalletContext::new(account, network.chain_id);
                for request in [
                    TransactionRequest::approval(&context, &plan),
                    TransactionRequest::deposit(&context, &plan),
                ] {
                    info!(calldata = %request.calldata(), "Planned: {}", request);
                }
                return Ok(());
            }

            if let Some(port) = config.metrics_port {
                install_prometheus_exporter(port)?;
                info!("  Metrics: http://0.0.0.0:{}/metrics", port);
            }

            let provider = client::create_wallet_provider(&config.rpc_url, &private_key)?;
            let context = client::wallet_context(&provider, account).await?;
            if context.chain_id != network.chain_id {
                eyre::bail!(
                    "RPC endpoint is on chain {} but the {:?} network expects chain {}",
                    context.chain_id,
                    network.network_type,
                    network.chain_id
                );
            }

            let submitter = ProviderSubmitter::new(provider.clone());
            let watcher =
                ReceiptWatcher::new(provider).with_poll_interval(config.poll_interval());
            let mut controller =
                TransactionWorkflowController::new(context, plan, submitter, watcher);
            if let Some(timeout) = config.outcome_timeout() {
                controller = controller.with_outcome_timeout(timeout);
            }

            let metrics = Metrics::new();
            let reporter = tokio::spawn(report_phases(controller.subscribe(), metrics.clone()));

            let started = Instant::now();
            let result = run_deposit_flow(&mut controller, &metrics).await;
            metrics.record_flow(result.is_ok(), started.elapsed());
            drop(controller);

            let final_phase = reporter.await?;
            match result {
                Ok(confirmation) => {
                    info!(
                        tx_hash = %confirmation.handle,
                        block_number = ?confirmation.block_number,
                        gas_used = ?confirmation.gas_used,
                        "Deposit successful"
                    );
                }
                Err(e) => {
                    error!(phase = %final_phase, "Deposit flow stopped: {}", e);
                    return Err(e);
                }
            }
        }
        Command::FetchAbi {
            address,
            out_dir,
            api_key,
        } => {
            info!("Fetching ABI for contract: {}", address);

            let explorer = Explorer::new(&network.explorer_api_url, api_key);
            let abi = explorer.fetch_abi(address).await?;
            let path = explorer::save_abi(&out_dir, address, &abi).await?;

            info!("ABI saved to {}", path.display());
        }
    }

    Ok(())
}
