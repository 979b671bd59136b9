//! Filter operator: forward only tuples satisfying a predicate.

use crate::error::{FlowError, UserError};
use crate::model::Tuple;
use crate::operator::{Operator, OperatorStats, OutputContext};

/// User predicate applied by [`FilterOperator`].
pub type PredicateFn = dyn FnMut(&Tuple, &mut OutputContext) -> Result<bool, UserError> + Send;

/// Forwards the input tuple unchanged iff the predicate holds.
///
/// Records that fail the predicate stop propagating at this operator.
/// Survivors keep their relative input order.
pub struct FilterOperator {
    name: String,
    predicate: Box<PredicateFn>,
    stats: OperatorStats,
}

impl FilterOperator {
    pub fn new(name: impl Into<String>, predicate: Box<PredicateFn>) -> Self {
        Self {
            name: name.into(),
            predicate,
            stats: OperatorStats::new(),
        }
    }
}

impl Operator for FilterOperator {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        tuple: Tuple,
        ctx: &mut OutputContext,
    ) -> Result<Option<Tuple>, FlowError> {
        self.stats.record_in();
        let keep = (self.predicate)(&tuple, ctx)
            .map_err(|e| FlowError::execution(&self.name, &tuple, e))?;
        if keep {
            self.stats.record_out();
            Ok(Some(tuple))
        } else {
            self.stats.record_skipped();
            Ok(None)
        }
    }

    fn stats(&self) -> &OperatorStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datatypes::Value;

    fn int_tuple(v: i64) -> Tuple {
        Tuple::new(vec![Value::Int64(v)])
    }

    #[test]
    fn predicate_decides_forward_or_drop() {
        let mut op =
            FilterOperator::new("filter-1", Box::new(|t, _| Ok(t.field(0)?.to_i64()? > 1)));
        let mut ctx = OutputContext::new();
        assert!(op.process(int_tuple(1), &mut ctx).unwrap().is_none());
        assert_eq!(
            op.process(int_tuple(2), &mut ctx).unwrap(),
            Some(int_tuple(2))
        );
        assert_eq!(op.stats().records_in(), 2);
        assert_eq!(op.stats().records_out(), 1);
    }

    #[test]
    fn predicate_failure_wraps_as_execution_error() {
        let mut op =
            FilterOperator::new("filter-1", Box::new(|t, _| Ok(t.field(9)?.to_i64()? > 1)));
        let err = op
            .process(int_tuple(1), &mut OutputContext::new())
            .unwrap_err();
        assert!(matches!(err, FlowError::OperatorExecution { .. }));
    }
}
