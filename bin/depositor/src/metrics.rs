//! Prometheus metrics for the depositor.
//!
//! All metrics are aggregated in the [`Metrics`] struct.

use alloy_primitives::U256;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;
use workflow::WorkflowPhase;

/// Aggregated metrics for the depositor.
///
/// Metrics are registered with the global metrics registry on creation.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "depositor_flows_total",
            "Total number of approve/deposit flows run"
        );
        describe_counter!(
            "depositor_flows_success_total",
            "Total number of flows that reached done"
        );
        describe_counter!(
            "depositor_flows_failure_total",
            "Total number of flows that stopped before done"
        );
        describe_histogram!(
            "depositor_flow_duration_seconds",
            "Duration of each flow in seconds"
        );

        describe_counter!(
            "depositor_phase_transitions_total",
            "Total workflow phase changes by target phase"
        );
        describe_gauge!(
            "depositor_phase",
            "Current workflow phase (0 idle .. 4 done)"
        );

        describe_counter!(
            "depositor_submissions_total",
            "Transaction submissions by function and result"
        );
        describe_counter!(
            "depositor_outcomes_total",
            "Observed transaction outcomes by function and result"
        );
        describe_histogram!(
            "depositor_deposit_amount_wei",
            "Amount of each confirmed deposit in base units"
        );
    }

    /// Record a completed flow.
    pub fn record_flow(&self, success: bool, duration: Duration) {
        counter!("depositor_flows_total").increment(1);
        histogram!("depositor_flow_duration_seconds").record(duration.as_secs_f64());

        if success {
            counter!("depositor_flows_success_total").increment(1);
        } else {
            counter!("depositor_flows_failure_total").increment(1);
        }
    }

    /// Record a phase change.
    pub fn record_phase(&self, phase: WorkflowPhase) {
        counter!("depositor_phase_transitions_total", "phase" => phase.as_str()).increment(1);
        gauge!("depositor_phase").set(phase_index(phase));
    }

    /// Record a submission attempt for `function`.
    pub fn record_submission(&self, function: &'static str, success: bool) {
        counter!(
            "depositor_submissions_total",
            "function" => function,
            "result" => result_label(success)
        )
        .increment(1);
    }

    /// Record an observed outcome for `function`.
    pub fn record_outcome(&self, function: &'static str, success: bool) {
        counter!(
            "depositor_outcomes_total",
            "function" => function,
            "result" => result_label(success)
        )
        .increment(1);
    }

    /// Record a confirmed deposit.
    pub fn record_deposit(&self, amount_wei: U256) {
        if let Some(amount) = amount_as_f64(amount_wei) {
            histogram!("depositor_deposit_amount_wei").record(amount);
        }
    }
}

/// Base units as a float; precision is lost above 2^53.
fn amount_as_f64(amount: U256) -> Option<f64> {
    amount.to_string().parse().ok()
}

const fn result_label(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

const fn phase_index(phase: WorkflowPhase) -> f64 {
    match phase {
        WorkflowPhase::Idle => 0.0,
        WorkflowPhase::Approving => 1.0,
        WorkflowPhase::Approved => 2.0,
        WorkflowPhase::Depositing => 3.0,
        WorkflowPhase::Done => 4.0,
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
