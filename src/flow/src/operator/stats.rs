//! Per-operator record counters, reported when the stream ends.

/// Records seen, forwarded and skipped by a single operator.
///
/// All mutation happens on the one execution thread, so plain counters are
/// enough; there is no concurrent reader while the topology runs.
#[derive(Debug, Default)]
pub struct OperatorStats {
    records_in: u64,
    records_out: u64,
    records_skipped: u64,
}

impl OperatorStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_in(&mut self) {
        self.records_in += 1;
    }

    pub fn record_out(&mut self) {
        self.records_out += 1;
    }

    pub fn record_skipped(&mut self) {
        self.records_skipped += 1;
    }

    pub fn records_in(&self) -> u64 {
        self.records_in
    }

    pub fn records_out(&self) -> u64 {
        self.records_out
    }

    pub fn records_skipped(&self) -> u64 {
        self.records_skipped
    }

    /// Emit the end-of-stream summary for the owning operator.
    pub fn log_summary(&self, operator: &str) {
        tracing::debug!(
            operator = %operator,
            records_in = self.records_in,
            records_out = self.records_out,
            records_skipped = self.records_skipped,
            "operator finished"
        );
    }
}
