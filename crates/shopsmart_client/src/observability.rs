//! Fetch outcome metrics. Recorded through the `metrics` facade; nothing is
//! exported unless the binary installs a recorder.

use crate::FetchFailure;

pub const FETCH_TOTAL: &str = "shopsmart_health_fetch_total";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Resolved,
    Failed,
    Cancelled,
}

impl FetchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchOutcome::Resolved => "resolved",
            FetchOutcome::Failed => "failed",
            FetchOutcome::Cancelled => "cancelled",
        }
    }
}

pub fn record_fetch(outcome: FetchOutcome) {
    metrics::counter!(FETCH_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

/// Log a failed fetch. This is the only place a failure surfaces; the view
/// keeps showing the loading indicator.
pub fn report_failure(err: &FetchFailure) {
    match err.status() {
        Some(status) => tracing::error!(status, error = %err, "error fetching backend health"),
        None => tracing::error!(error = %err, "error fetching backend health"),
    }
    record_fetch(FetchOutcome::Failed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels() {
        assert_eq!(FetchOutcome::Resolved.as_str(), "resolved");
        assert_eq!(FetchOutcome::Failed.as_str(), "failed");
        assert_eq!(FetchOutcome::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn record_without_recorder_is_noop() {
        record_fetch(FetchOutcome::Resolved);
    }
}
