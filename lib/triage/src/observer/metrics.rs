//! Dispatch metrics using the `metrics` crate facade.
//!
//! Works with any installed recorder (Prometheus, `StatsD`, ...). Without a
//! recorder every update is a no-op.

use crate::{DispatchObserver, Namespace, Response, Trial};

/// Labels used for metrics.
const LABEL_NAMESPACE: &str = "namespace";
const LABEL_HANDLER: &str = "handler";
const LABEL_OUTCOME: &str = "outcome";

/// Metric names.
const METRIC_HANDLER_ATTEMPTS: &str = "triage_handler_attempts_total";
const METRIC_DISPATCH_TOTAL: &str = "triage_dispatch_total";

/// Observer recording dispatch counters.
///
/// Records the following metrics:
/// - `triage_handler_attempts_total` (counter): handler invocations, labeled by namespace and handler
/// - `triage_dispatch_total` (counter): finished dispatches, labeled by namespace, handler and
///   outcome (`accepted`, `failed` or `unrecognized`)
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObserver {
    _private: (),
}

impl MetricsObserver {
    /// Create a new metrics observer.
    #[must_use]
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn finished(trial: &Trial<'_>, outcome: &'static str) {
        metrics::counter!(
            METRIC_DISPATCH_TOTAL,
            LABEL_NAMESPACE => trial.namespace.to_string(),
            LABEL_HANDLER => trial.handler.to_string(),
            LABEL_OUTCOME => outcome
        )
        .increment(1);
    }
}

impl DispatchObserver for MetricsObserver {
    fn attempt(&self, trial: &Trial<'_>) {
        metrics::counter!(
            METRIC_HANDLER_ATTEMPTS,
            LABEL_NAMESPACE => trial.namespace.to_string(),
            LABEL_HANDLER => trial.handler.to_string()
        )
        .increment(1);
    }

    fn accepted(&self, trial: &Trial<'_>) {
        Self::finished(trial, "accepted");
    }

    fn failed(&self, trial: &Trial<'_>) {
        Self::finished(trial, "failed");
    }

    fn exhausted(&self, namespace: &Namespace, _response: &Response, _trials: usize) {
        metrics::counter!(
            METRIC_DISPATCH_TOTAL,
            LABEL_NAMESPACE => namespace.to_string(),
            LABEL_HANDLER => "-",
            LABEL_OUTCOME => "unrecognized"
        )
        .increment(1);
    }
}
