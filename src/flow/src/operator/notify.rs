//! Notify operator: invoke a user callback for every tuple.

use crate::error::{FlowError, UserError};
use crate::model::Tuple;
use crate::operator::{Operator, OperatorStats, OutputContext};

/// User callback invoked by [`NotifyOperator`].
pub type NotifyFn = dyn FnMut(&Tuple, &mut OutputContext) -> Result<(), UserError> + Send;

/// Side-effecting observer.
///
/// The callback sees every tuple that reaches this point of the chain; the
/// tuple is then forwarded unchanged, so several observers can stack at the
/// same point and fire in attachment order. Callback failures never cross
/// the engine boundary raw; they come back as execution errors.
pub struct NotifyOperator {
    name: String,
    callback: Box<NotifyFn>,
    stats: OperatorStats,
}

impl NotifyOperator {
    pub fn new(name: impl Into<String>, callback: Box<NotifyFn>) -> Self {
        Self {
            name: name.into(),
            callback,
            stats: OperatorStats::new(),
        }
    }
}

impl Operator for NotifyOperator {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        tuple: Tuple,
        ctx: &mut OutputContext,
    ) -> Result<Option<Tuple>, FlowError> {
        self.stats.record_in();
        (self.callback)(&tuple, ctx).map_err(|e| FlowError::execution(&self.name, &tuple, e))?;
        self.stats.record_out();
        Ok(Some(tuple))
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

    #[test]
    fn callback_observes_and_forwards() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut op = NotifyOperator::new(
            "notify-1",
            Box::new(move |t, _| {
                sink.lock().unwrap().push(t.to_string());
                Ok(())
            }),
        );
        let tuple = Tuple::new(vec![Value::Int64(1), Value::String("a".into())]);
        let out = op
            .process(tuple.clone(), &mut OutputContext::new())
            .unwrap();
        assert_eq!(out, Some(tuple));
        assert_eq!(*seen.lock().unwrap(), vec!["1,a".to_string()]);
    }

    #[test]
    fn callback_failure_wraps_as_execution_error() {
        let mut op = NotifyOperator::new("notify-1", Box::new(|_, _| Err("boom".into())));
        let err = op
            .process(Tuple::raw_line("x"), &mut OutputContext::new())
            .unwrap_err();
        match err {
            FlowError::OperatorExecution { operator, .. } => assert_eq!(operator, "notify-1"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
