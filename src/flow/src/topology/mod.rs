//! Topology: fluent builder and owner of the operator chain.
//!
//! A topology is built by chaining operator attachments onto a source pipe
//! and is then driven to completion by a single blocking `start()` call.
//! Construction is pure graph building with no I/O; the source opens only
//! when the run begins.

mod driver;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{BuildError, FlowError, UserError};
use crate::model::Tuple;
use crate::operator::{
    ExtractOperator, FilterOperator, MapOperator, NotifyOperator, Operator, OutputContext,
    PrintOperator, RecordSource, SchemaPolicy, TextFileSource, VecSource,
};

/// Lifecycle of a topology.
///
/// `Building` is the only state that accepts new operators; `start()` moves
/// to `Started` and ends in `Finished` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyState {
    Building,
    Started,
    Finished,
    Failed,
}

struct TopologyInner {
    state: TopologyState,
    source: Option<Box<dyn RecordSource>>,
    operators: Vec<Box<dyn Operator>>,
}

impl TopologyInner {
    fn ensure_building(&self) -> Result<(), FlowError> {
        if self.state == TopologyState::Building {
            Ok(())
        } else {
            Err(FlowError::TopologyClosed)
        }
    }

    fn attach(&mut self, operator: Box<dyn Operator>) -> Result<(), FlowError> {
        self.ensure_building()?;
        tracing::debug!(operator = %operator.name(), "attached operator");
        self.operators.push(operator);
        Ok(())
    }

    fn next_name(&self, kind: &str) -> String {
        format!("{kind}-{}", self.operators.len() + 1)
    }
}

/// A dataflow graph of operators rooted at one source.
///
/// `Topology` exclusively owns every operator it creates; [`Pipe`] handles
/// reference the same underlying chain for fluent composition.
///
/// ```no_run
/// use flow::Topology;
///
/// let t = Topology::new();
/// t.new_stream_from_file("data.csv")?
///     .extract(",")?
///     .map(|t, _| {
///         Ok(flow::Tuple::new(vec![
///             t.field(0)?.to_i64()?.into(),
///             t.field(1)?.clone(),
///             t.field(2)?.clone(),
///         ]))
///     })?
///     .filter(|x, _| Ok(x.field(0)?.to_i64()? > 1))?
///     .pfprint()?;
/// t.start()?;
/// # Ok::<(), flow::FlowError>(())
/// ```
pub struct Topology {
    inner: Arc<Mutex<TopologyInner>>,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TopologyInner {
                state: TopologyState::Building,
                source: None,
                operators: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TopologyInner> {
        self.inner.lock().expect("topology lock poisoned")
    }

    pub fn state(&self) -> TopologyState {
        self.lock().state
    }

    /// Create a pipe reading raw lines from a newline-delimited text file.
    ///
    /// The file is opened lazily at `start()`; a bad path fails the run with
    /// a source-unavailable error, not this call.
    pub fn new_stream_from_file(&self, path: impl AsRef<Path>) -> Result<Pipe, FlowError> {
        self.set_source(Box::new(TextFileSource::new(path.as_ref())))
    }

    /// Create a pipe reading raw lines from an in-memory vector.
    pub fn new_stream_from_lines(
        &self,
        lines: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Pipe, FlowError> {
        self.set_source(Box::new(VecSource::new(lines)))
    }

    fn set_source(&self, source: Box<dyn RecordSource>) -> Result<Pipe, FlowError> {
        let mut inner = self.lock();
        inner.ensure_building()?;
        if inner.source.is_some() {
            return Err(BuildError::SourceAlreadyDefined.into());
        }
        tracing::debug!(source = %source.describe(), "attached source");
        inner.source = Some(source);
        Ok(Pipe {
            inner: Arc::clone(&self.inner),
        })
    }

    /// Run the topology to completion. Blocking.
    ///
    /// Reads the source to exhaustion, pushing each record synchronously
    /// through the whole chain before fetching the next. Returns after the
    /// stream ends or the first unrecovered error. May only be called once.
    pub fn start(&self) -> Result<(), FlowError> {
        let (mut source, mut operators) = {
            let mut inner = self.lock();
            match inner.state {
                TopologyState::Building => {}
                _ => return Err(FlowError::AlreadyStarted),
            }
            let source = inner.source.take().ok_or(BuildError::MissingSource)?;
            inner.state = TopologyState::Started;
            (source, std::mem::take(&mut inner.operators))
        };

        tracing::info!(
            source = %source.describe(),
            operators = operators.len(),
            "starting topology"
        );
        let result = driver::run_chain(source.as_mut(), &mut operators);

        let mut inner = self.lock();
        match &result {
            Ok(()) => inner.state = TopologyState::Finished,
            Err(e) => {
                tracing::error!(error = %e, "topology failed");
                inner.state = TopologyState::Failed;
            }
        }
        result
    }
}

/// Fluent handle onto the current tail of a topology's operator chain.
///
/// Every chain call constructs one operator, wires it as the consumer of the
/// current tail, and returns a pipe over the same topology. All chain calls
/// are build-time only; once `start()` has run they fail.
pub struct Pipe {
    inner: Arc<Mutex<TopologyInner>>,
}

impl std::fmt::Debug for Pipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipe").finish_non_exhaustive()
    }
}

impl Pipe {
    fn lock(&self) -> MutexGuard<'_, TopologyInner> {
        self.inner.lock().expect("topology lock poisoned")
    }

    fn attach(&self, build: impl FnOnce(String) -> Box<dyn Operator>, kind: &str) -> Result<Pipe, FlowError> {
        let mut inner = self.lock();
        inner.ensure_building()?;
        let name = inner.next_name(kind);
        inner.attach(build(name))?;
        Ok(Pipe {
            inner: Arc::clone(&self.inner),
        })
    }

    /// Split each raw line on `delimiter` into one string field per token.
    /// Accepts variable arity; see [`Pipe::extract_with`] for strict modes.
    pub fn extract(&self, delimiter: impl Into<String>) -> Result<Pipe, FlowError> {
        self.extract_with(delimiter, SchemaPolicy::default())
    }

    /// Like [`Pipe::extract`], with an explicit arity-stability policy.
    pub fn extract_with(
        &self,
        delimiter: impl Into<String>,
        policy: SchemaPolicy,
    ) -> Result<Pipe, FlowError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(BuildError::EmptyDelimiter.into());
        }
        self.attach(
            |name| Box::new(ExtractOperator::new(name, delimiter, policy)),
            "extract",
        )
    }

    /// Apply a transform producing exactly one output tuple per input.
    pub fn map(
        &self,
        transform: impl FnMut(&Tuple, &mut OutputContext) -> Result<Tuple, UserError>
            + Send
            + 'static,
    ) -> Result<Pipe, FlowError> {
        self.attach(|name| Box::new(MapOperator::new(name, Box::new(transform))), "map")
    }

    /// Keep only tuples satisfying the predicate, preserving their order.
    pub fn filter(
        &self,
        predicate: impl FnMut(&Tuple, &mut OutputContext) -> Result<bool, UserError>
            + Send
            + 'static,
    ) -> Result<Pipe, FlowError> {
        self.attach(
            |name| Box::new(FilterOperator::new(name, Box::new(predicate))),
            "filter",
        )
    }

    /// Invoke a callback for every tuple reaching this point, then forward
    /// the tuple unchanged.
    pub fn notify(
        &self,
        callback: impl FnMut(&Tuple, &mut OutputContext) -> Result<(), UserError>
            + Send
            + 'static,
    ) -> Result<Pipe, FlowError> {
        self.attach(
            |name| Box::new(NotifyOperator::new(name, Box::new(callback))),
            "notify",
        )
    }

    /// Print every tuple to standard output, comma-joined, one per line.
    pub fn pfprint(&self) -> Result<Pipe, FlowError> {
        self.attach(|name| Box::new(PrintOperator::stdout(name)), "print")
    }

    /// Like [`Pipe::pfprint`], writing to the supplied sink.
    pub fn pfprint_to(&self, sink: Box<dyn std::io::Write + Send>) -> Result<Pipe, FlowError> {
        self.attach(|name| Box::new(PrintOperator::new(name, sink)), "print")
    }
}
