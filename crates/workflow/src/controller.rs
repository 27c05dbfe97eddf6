//! Two-phase approve → deposit controller.
//!
//! Phase graph:
//!
//! ```text
//! Idle --submit--> Approving --success--> Approved --submit--> Depositing --success--> Done
//!  ^                  |                      ^                     |
//!  +-----failure------+                      +-------failure-------+
//! ```
//!
//! A failed submission undoes the move into the in-flight phase, so the
//! controller ends up back in the stable phase it started from.

use crate::{
    error::SubmissionError,
    outcome::{TransactionHandle, TransactionOutcome},
    phase::WorkflowPhase,
    plan::{DepositPlan, WalletContext},
    request::TransactionRequest,
    TransactionSubmitter, TransactionWatcher,
};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Drives one approve → deposit session.
///
/// Every operation takes `&mut self`, so operations never interleave and the
/// phase alone decides which requests are accepted. Create a fresh controller
/// for each session; `Done` has no exits.
#[derive(Debug)]
pub struct TransactionWorkflowController<S, W> {
    context: WalletContext,
    plan: DepositPlan,
    submitter: S,
    watcher: W,
    phase: watch::Sender<WorkflowPhase>,
    /// Handle of the transaction submitted by the current in-flight phase.
    in_flight: Option<TransactionHandle>,
    outcome_timeout: Option<Duration>,
}

impl<S, W> TransactionWorkflowController<S, W>
where
    S: TransactionSubmitter,
    W: TransactionWatcher,
{
    /// Create a new controller in `Idle`.
    pub fn new(context: WalletContext, plan: DepositPlan, submitter: S, watcher: W) -> Self {
        let (phase, _) = watch::channel(WorkflowPhase::Idle);
        Self {
            context,
            plan,
            submitter,
            watcher,
            phase,
            in_flight: None,
            outcome_timeout: None,
        }
    }

    /// Treat a transaction as failed when the watcher does not report an
    /// outcome within `timeout`.
    pub const fn with_outcome_timeout(mut self, timeout: Duration) -> Self {
        self.outcome_timeout = Some(timeout);
        self
    }

    pub fn phase(&self) -> WorkflowPhase {
        *self.phase.borrow()
    }

    /// Receiver notified on every phase change.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowPhase> {
        self.phase.subscribe()
    }

    /// Handle of the transaction currently awaiting its outcome.
    pub const fn in_flight(&self) -> Option<TransactionHandle> {
        self.in_flight
    }

    pub const fn plan(&self) -> &DepositPlan {
        &self.plan
    }

    pub const fn context(&self) -> &WalletContext {
        &self.context
    }

    /// Submit the allowance approval.
    ///
    /// Does nothing and returns `Ok(None)` unless the phase is `Idle`. On
    /// success the phase is `Approving` and the returned handle is awaited by
    /// [`Self::await_outcome`].
    pub async fn request_approval(
        &mut self,
    ) -> Result<Option<TransactionHandle>, SubmissionError> {
        let phase = self.phase();
        if !phase.can_approve() {
            debug!(%phase, "Ignoring approval request");
            return Ok(None);
        }

        let request = TransactionRequest::approval(&self.context, &self.plan);
        self.submit(request, WorkflowPhase::Approving).await.map(Some)
    }

    /// Submit the deposit.
    ///
    /// Does nothing and returns `Ok(None)` unless the phase is `Approved`.
    pub async fn request_deposit(
        &mut self,
    ) -> Result<Option<TransactionHandle>, SubmissionError> {
        let phase = self.phase();
        if !phase.can_deposit() {
            debug!(%phase, "Ignoring deposit request");
            return Ok(None);
        }

        let request = TransactionRequest::deposit(&self.context, &self.plan);
        self.submit(request, WorkflowPhase::Depositing).await.map(Some)
    }

    /// Wait for the in-flight transaction and apply its outcome.
    ///
    /// Returns `None` immediately when nothing is in flight. Dropping the
    /// returned future before it completes leaves the handle in flight, so
    /// the wait can be resumed later.
    pub async fn await_outcome(&mut self) -> Option<TransactionOutcome> {
        let handle = self.in_flight?;

        let outcome = match self.outcome_timeout {
            Some(timeout) => {
                match tokio::time::timeout(timeout, self.watcher.await_outcome(handle)).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!(%handle, ?timeout, "No transaction outcome before timeout");
                        TransactionOutcome::Failure(format!("no outcome within {timeout:?}"))
                    }
                }
            }
            None => self.watcher.await_outcome(handle).await,
        };

        self.apply_outcome(&outcome);
        Some(outcome)
    }

    async fn submit(
        &mut self,
        request: TransactionRequest,
        in_flight_phase: WorkflowPhase,
    ) -> Result<TransactionHandle, SubmissionError> {
        let stable = self.phase();
        self.transition(in_flight_phase);

        let guard = SubmissionGuard {
            phase: &self.phase,
            stable,
        };
        let result = self.submitter.submit(request).await;
        std::mem::forget(guard);

        match result {
            Ok(handle) => {
                info!(
                    %handle,
                    function = request.call.function_name(),
                    to = %request.to,
                    amount = %request.call.amount(),
                    "Transaction submitted"
                );
                self.in_flight = Some(handle);
                Ok(handle)
            }
            Err(e) => {
                warn!(
                    function = request.call.function_name(),
                    error = %e,
                    "Transaction submission failed"
                );
                self.transition(stable);
                Err(e)
            }
        }
    }

    fn apply_outcome(&mut self, outcome: &TransactionOutcome) {
        self.in_flight = None;

        let phase = self.phase();
        let next = match outcome {
            TransactionOutcome::Success(confirmation) => {
                info!(
                    handle = %confirmation.handle,
                    block_number = ?confirmation.block_number,
                    gas_used = ?confirmation.gas_used,
                    %phase,
                    "Transaction confirmed"
                );
                phase.advance()
            }
            TransactionOutcome::Failure(reason) => {
                warn!(%phase, %reason, "Transaction failed, rolling back");
                phase.rollback()
            }
        };

        if let Some(next) = next {
            self.transition(next);
        }
    }

    fn transition(&self, next: WorkflowPhase) {
        let previous = self.phase.send_replace(next);
        debug_assert!(
            previous.can_transition_to(next),
            "invalid workflow transition {previous} -> {next}"
        );
        info!(from = %previous, to = %next, "Workflow phase changed");
    }
}

/// Restores the stable phase when a submission is dropped before it
/// completes. Forgotten once the submitter returns.
struct SubmissionGuard<'a> {
    phase: &'a watch::Sender<WorkflowPhase>,
    stable: WorkflowPhase,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        let previous = self.phase.send_replace(self.stable);
        warn!(from = %previous, to = %self.stable, "Submission cancelled, rolling back");
    }
}
