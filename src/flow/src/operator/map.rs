//! Map operator: apply a user transform to each tuple.

use crate::error::{FlowError, UserError};
use crate::model::Tuple;
use crate::operator::{Operator, OperatorStats, OutputContext};

/// User transform applied by [`MapOperator`].
pub type MapFn = dyn FnMut(&Tuple, &mut OutputContext) -> Result<Tuple, UserError> + Send;

/// Applies a transform producing exactly one output tuple per input tuple.
///
/// Map cannot drop or duplicate records; filtering belongs to
/// [`FilterOperator`](crate::operator::FilterOperator). Transform failures
/// abort the run, tagged with this operator and the offending record.
pub struct MapOperator {
    name: String,
    transform: Box<MapFn>,
    stats: OperatorStats,
}

impl MapOperator {
    pub fn new(name: impl Into<String>, transform: Box<MapFn>) -> Self {
        Self {
            name: name.into(),
            transform,
            stats: OperatorStats::new(),
        }
    }
}

impl Operator for MapOperator {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        tuple: Tuple,
        ctx: &mut OutputContext,
    ) -> Result<Option<Tuple>, FlowError> {
        self.stats.record_in();
        let out = (self.transform)(&tuple, ctx)
            .map_err(|e| FlowError::execution(&self.name, &tuple, e))?;
        self.stats.record_out();
        Ok(Some(out))
    }

    fn stats(&self) -> &OperatorStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datatypes::Value;

    #[test]
    fn transform_output_replaces_input() {
        let mut op = MapOperator::new(
            "map-1",
            Box::new(|t, _| {
                Ok(Tuple::new(vec![Value::Int64(t.field(0)?.to_i64()?)]))
            }),
        );
        let out = op
            .process(Tuple::raw_line("7"), &mut OutputContext::new())
            .unwrap()
            .unwrap();
        assert_eq!(out, Tuple::new(vec![Value::Int64(7)]));
    }

    #[test]
    fn transform_failure_is_tagged_with_operator_and_record() {
        let mut op = MapOperator::new(
            "map-1",
            Box::new(|t, _| Ok(Tuple::new(vec![Value::Int64(t.field(5)?.to_i64()?)]))),
        );
        let err = op
            .process(Tuple::raw_line("7"), &mut OutputContext::new())
            .unwrap_err();
        match err {
            FlowError::OperatorExecution {
                operator, record, ..
            } => {
                assert_eq!(operator, "map-1");
                assert_eq!(record, "7");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
