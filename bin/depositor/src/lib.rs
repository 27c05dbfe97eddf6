pub mod config;
pub mod metrics;

use crate::metrics::Metrics;
use eyre::bail;
use tokio::sync::watch;
use tracing::info;
use workflow::{
    Confirmation, SubmissionError, TransactionHandle, TransactionOutcome, TransactionSubmitter,
    TransactionWatcher, TransactionWorkflowController, WorkflowPhase,
};

/// Run approve then deposit to completion.
///
/// Stops at the first failed submission or outcome; the controller is left
/// in the stable phase it rolled back to. Returns the deposit confirmation.
pub async fn run_deposit_flow<S, W>(
    controller: &mut TransactionWorkflowController<S, W>,
    metrics: &Metrics,
) -> eyre::Result<Confirmation>
where
    S: TransactionSubmitter,
    W: TransactionWatcher,
{
    let plan = controller.plan().clone();
    info!(
        token = %plan.token(),
        deposit_contract = %plan.deposit_contract(),
        amount = %plan.amount(),
        account = %controller.context().account,
        "Starting deposit flow"
    );

    let approval = controller.request_approval().await;
    record_submission(metrics, "approve", &approval);
    if approval?.is_none() {
        bail!("Approval not permitted in phase {}", controller.phase());
    }

    let outcome = controller.await_outcome().await;
    expect_confirmed("approve", outcome, metrics)?;

    let deposit = controller.request_deposit().await;
    record_submission(metrics, "deposit", &deposit);
    if deposit?.is_none() {
        bail!("Deposit not permitted in phase {}", controller.phase());
    }

    let outcome = controller.await_outcome().await;
    let confirmation = expect_confirmed("deposit", outcome, metrics)?;
    metrics.record_deposit(plan.amount());

    Ok(confirmation)
}

/// Count a submission attempt. Requests ignored by the controller are not counted.
fn record_submission(
    metrics: &Metrics,
    function: &'static str,
    result: &Result<Option<TransactionHandle>, SubmissionError>,
) {
    if let Some(success) = submission_result(result) {
        metrics.record_submission(function, success);
    }
}

const fn submission_result(
    result: &Result<Option<TransactionHandle>, SubmissionError>,
) -> Option<bool> {
    match result {
        Ok(Some(_)) => Some(true),
        Ok(None) => None,
        Err(_) => Some(false),
    }
}

fn expect_confirmed(
    function: &'static str,
    outcome: Option<TransactionOutcome>,
    metrics: &Metrics,
) -> eyre::Result<Confirmation> {
    match outcome {
        Some(TransactionOutcome::Success(confirmation)) => {
            metrics.record_outcome(function, true);
            Ok(confirmation)
        }
        Some(TransactionOutcome::Failure(reason)) => {
            metrics.record_outcome(function, false);
            bail!("{function} transaction failed: {reason}")
        }
        None => bail!("No {function} transaction in flight"),
    }
}

/// Log and record every phase change until the controller is dropped.
///
/// Returns the last phase published.
pub async fn report_phases(
    mut phases: watch::Receiver<WorkflowPhase>,
    metrics: Metrics,
) -> WorkflowPhase {
    while phases.changed().await.is_ok() {
        let phase = *phases.borrow_and_update();
        info!(%phase, "Deposit flow phase");
        metrics.record_phase(phase);
    }

    let last = *phases.borrow();
    last
}
