//! Error taxonomy for topology construction and execution.
//!
//! Build-phase misconfiguration is kept apart from run-phase failures so a
//! caller can tell a bad graph from a bad run. Everything raised by a
//! user-supplied transform, predicate or callback travels through the boxed
//! [`UserError`] channel and comes back wrapped as
//! [`FlowError::OperatorExecution`] with the offending operator and record
//! attached.

use std::io;
use std::path::PathBuf;

/// Boxed error type returned by user-supplied callbacks.
pub type UserError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid configuration detected at graph-construction time.
///
/// Surfaced immediately by the offending builder call, before `start()`.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Extract was configured with an empty delimiter.
    #[error("extract delimiter must not be empty")]
    EmptyDelimiter,
    /// The topology already has a source attached.
    #[error("topology already has a source")]
    SourceAlreadyDefined,
    /// `start()` was called on a topology without a source.
    #[error("topology has no source to start from")]
    MissingSource,
}

/// Errors raised while building or running a topology.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Invalid builder configuration.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// The source could not be opened or read at run time. Fatal.
    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Strict-arity extraction saw a record whose token count differs from
    /// the arity this operator first observed.
    #[error(
        "malformed record in {operator}: expected arity {expected}, got {actual} for {record:?}"
    )]
    MalformedRecord {
        operator: String,
        expected: usize,
        actual: usize,
        record: String,
    },

    /// A user-supplied transform, predicate or callback failed. Fatal; the
    /// originating operator and offending record are kept for diagnostics.
    #[error("operator {operator} failed on record {record:?}: {source}")]
    OperatorExecution {
        operator: String,
        record: String,
        #[source]
        source: UserError,
    },

    /// An operator was appended after the topology left the build phase.
    #[error("topology is no longer accepting operators")]
    TopologyClosed,

    /// `start()` was called more than once.
    #[error("topology was already started")]
    AlreadyStarted,
}

impl FlowError {
    pub(crate) fn execution(operator: &str, record: &crate::model::Tuple, source: UserError) -> Self {
        FlowError::OperatorExecution {
            operator: operator.to_string(),
            record: record.to_string(),
            source,
        }
    }
}
