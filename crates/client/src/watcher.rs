use alloy_primitives::{TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionReceipt;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, info, warn};
use workflow::{Confirmation, TransactionHandle, TransactionOutcome, TransactionWatcher};

/// Receipt polling interval when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Watches transactions by polling for their receipts.
///
/// Polls until a receipt appears. RPC failures are retried and logged but
/// never end the wait, so a transaction that is never mined is waited on
/// forever unless the caller bounds the wait.
#[derive(Debug, Clone)]
pub struct ReceiptWatcher<P> {
    provider: P,
    poll_interval: Duration,
}

impl<P> ReceiptWatcher<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Query a receipt with retry and exponential backoff.
    async fn fetch_receipt(&self, tx_hash: TxHash) -> eyre::Result<Option<TransactionReceipt>> {
        // Exponential backoff: 100ms, 200ms, 400ms, 800ms, 1.6s (max 5 attempts)
        let retry_strategy = ExponentialBackoff::from_millis(2).factor(50).take(5);

        let receipt = Retry::spawn(retry_strategy, || async {
            self.provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| {
                    warn!(
                        tx_hash = %tx_hash,
                        error = %e,
                        "Receipt query failed, will retry"
                    );
                    e
                })
        })
        .await?;

        Ok(receipt)
    }
}

impl<P> TransactionWatcher for ReceiptWatcher<P>
where
    P: Provider + Clone,
{
    async fn await_outcome(&self, handle: TransactionHandle) -> TransactionOutcome {
        // interval panics on a zero period
        let period = self.poll_interval.max(Duration::from_millis(1));
        let mut interval = tokio::time::interval(period);

        loop {
            interval.tick().await;

            match self.fetch_receipt(handle.tx_hash()).await {
                Ok(Some(receipt)) => return outcome_from_receipt(handle, &receipt),
                Ok(None) => debug!(%handle, "Transaction not mined yet"),
                Err(e) => warn!(%handle, error = %e, "Giving up on this poll"),
            }
        }
    }
}

fn outcome_from_receipt(
    handle: TransactionHandle,
    receipt: &TransactionReceipt,
) -> TransactionOutcome {
    if !receipt.status() {
        warn!(
            %handle,
            block_number = receipt.block_number,
            "Transaction reverted"
        );
        return TransactionOutcome::Failure("transaction reverted".to_string());
    }

    info!(
        %handle,
        block_number = receipt.block_number,
        gas_used = receipt.gas_used,
        "Transaction mined"
    );

    TransactionOutcome::Success(Confirmation {
        handle,
        block_number: receipt.block_number,
        gas_used: Some(U256::from(receipt.gas_used)),
    })
}
