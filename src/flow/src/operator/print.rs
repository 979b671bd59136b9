//! Print operator: render tuples to a textual sink.

use std::io::{self, Write};

use crate::error::FlowError;
use crate::model::Tuple;
use crate::operator::{Operator, OperatorStats, OutputContext};

/// Renders each tuple's fields in order, comma-joined, one line per tuple.
///
/// Purely observational; the tuple is forwarded unchanged. The sink defaults
/// to standard output but any writer can be supplied.
pub struct PrintOperator {
    name: String,
    sink: Box<dyn Write + Send>,
    stats: OperatorStats,
}

impl PrintOperator {
    /// Print to standard output.
    pub fn stdout(name: impl Into<String>) -> Self {
        Self::new(name, Box::new(io::stdout()))
    }

    pub fn new(name: impl Into<String>, sink: Box<dyn Write + Send>) -> Self {
        Self {
            name: name.into(),
            sink,
            stats: OperatorStats::new(),
        }
    }
}

impl Operator for PrintOperator {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        tuple: Tuple,
        _ctx: &mut OutputContext,
    ) -> Result<Option<Tuple>, FlowError> {
        self.stats.record_in();
        writeln!(self.sink, "{tuple}")
            .map_err(|e| FlowError::execution(&self.name, &tuple, Box::new(e)))?;
        self.stats.record_out();
        Ok(Some(tuple))
    }

    fn finish(&mut self) {
        if let Err(e) = self.sink.flush() {
            tracing::warn!(operator = %self.name, error = %e, "failed to flush print sink");
        }
        self.stats.log_summary(&self.name);
    }

    fn stats(&self) -> &OperatorStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datatypes::Value;
    use std::sync::{Arc, Mutex};

    /// Shared in-memory sink so the test can read back what was printed.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn renders_comma_joined_lines() {
        let buf = SharedBuf::default();
        let mut op = PrintOperator::new("print-1", Box::new(buf.clone()));
        let mut ctx = OutputContext::new();
        op.process(
            Tuple::new(vec![Value::Int64(1), Value::String("a".into())]),
            &mut ctx,
        )
        .unwrap();
        op.process(Tuple::new(vec![Value::Float64(2.5)]), &mut ctx)
            .unwrap();
        let rendered = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(rendered, "1,a\n2.5\n");
    }
}
