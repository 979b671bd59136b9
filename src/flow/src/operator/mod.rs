//! Operator trait and implementations for the synchronous operator chain.
//!
//! Operators are the building blocks of a topology. Each operator consumes
//! one tuple per invocation and either forwards a tuple downstream, drops
//! the record, or fails the run. Dispatch is fully synchronous: the driver
//! pushes one record through the whole chain before fetching the next.

pub mod extract;
pub mod filter;
pub mod map;
pub mod notify;
pub mod print;
pub mod source;
pub mod stats;

pub use extract::{ExtractOperator, SchemaPolicy};
pub use filter::FilterOperator;
pub use map::MapOperator;
pub use notify::NotifyOperator;
pub use print::PrintOperator;
pub use source::{RecordSource, TextFileSource, VecSource};
pub use stats::OperatorStats;

use crate::error::FlowError;
use crate::model::Tuple;

/// Per-record context handed to every user callback.
///
/// Carries the record sequence number and the control signal an operator can
/// raise against the driver: requesting early termination of the stream.
#[derive(Debug, Default)]
pub struct OutputContext {
    record_seq: u64,
    stop_requested: bool,
}

impl OutputContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number of the record currently propagating, starting at 1.
    pub fn record_seq(&self) -> u64 {
        self.record_seq
    }

    /// Ask the driver to stop pulling records once the current record has
    /// fully propagated. The topology then finishes cleanly.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub(crate) fn advance(&mut self) {
        self.record_seq += 1;
    }
}

/// Trait for all chain operators.
///
/// `Ok(Some(tuple))` forwards downstream, `Ok(None)` drops the record at
/// this operator, `Err` aborts the run. An operator's output arity is fixed
/// once the topology is built; no operator changes its shape per record.
pub trait Operator: Send {
    /// Identifier assigned at attachment time, used in logs and errors.
    fn name(&self) -> &str;

    /// Process one tuple synchronously.
    fn process(&mut self, tuple: Tuple, ctx: &mut OutputContext)
        -> Result<Option<Tuple>, FlowError>;

    /// Called once after the source is exhausted (or a stop was requested).
    /// Default logs the operator's counters.
    fn finish(&mut self) {
        self.stats().log_summary(self.name());
    }

    /// Counters maintained by this operator.
    fn stats(&self) -> &OperatorStats;
}
