//! Extract operator: split a raw line into typed string fields.

use datatypes::Value;

use crate::error::FlowError;
use crate::model::Tuple;
use crate::operator::{Operator, OperatorStats, OutputContext};

/// Arity-stability policy for [`ExtractOperator`].
///
/// The first extracted record fixes the expected arity; later records that
/// disagree are handled per policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaPolicy {
    /// Accept variable arity (default).
    #[default]
    Permissive,
    /// Abort the run with a malformed-record error.
    FailFast,
    /// Drop the mismatching record, count it, and continue.
    SkipRecord,
}

/// Splits the single raw-line field of its input on a delimiter.
///
/// Output arity equals the number of delimiter-separated tokens; each field
/// holds the token's exact text. A trailing delimiter yields a trailing
/// empty-string field, and a line without the delimiter becomes a 1-field
/// tuple holding the whole line.
pub struct ExtractOperator {
    name: String,
    delimiter: String,
    policy: SchemaPolicy,
    expected_arity: Option<usize>,
    stats: OperatorStats,
}

impl ExtractOperator {
    pub fn new(name: impl Into<String>, delimiter: impl Into<String>, policy: SchemaPolicy) -> Self {
        Self {
            name: name.into(),
            delimiter: delimiter.into(),
            policy,
            expected_arity: None,
            stats: OperatorStats::new(),
        }
    }

    fn split(&self, line: &str) -> Tuple {
        line.split(self.delimiter.as_str())
            .map(|token| Value::String(token.to_string()))
            .collect()
    }
}

impl Operator for ExtractOperator {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        tuple: Tuple,
        ctx: &mut OutputContext,
    ) -> Result<Option<Tuple>, FlowError> {
        self.stats.record_in();

        // The upstream source always emits a 1-field raw-line tuple.
        let line = match tuple.field(0) {
            Ok(value) => value.to_string(),
            Err(_) => String::new(),
        };
        let out = self.split(&line);

        let expected = *self.expected_arity.get_or_insert(out.arity());
        if out.arity() != expected {
            match self.policy {
                SchemaPolicy::Permissive => {}
                SchemaPolicy::FailFast => {
                    return Err(FlowError::MalformedRecord {
                        operator: self.name.clone(),
                        expected,
                        actual: out.arity(),
                        record: line,
                    });
                }
                SchemaPolicy::SkipRecord => {
                    self.stats.record_skipped();
                    tracing::warn!(
                        operator = %self.name,
                        record_seq = ctx.record_seq(),
                        expected,
                        actual = out.arity(),
                        "skipping record with mismatching arity"
                    );
                    return Ok(None);
                }
            }
        }

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

    fn extract(policy: SchemaPolicy) -> ExtractOperator {
        ExtractOperator::new("extract-1", ",", policy)
    }

    fn run(op: &mut ExtractOperator, line: &str) -> Result<Option<Tuple>, FlowError> {
        op.process(Tuple::raw_line(line), &mut OutputContext::new())
    }

    fn fields(t: &Tuple) -> Vec<&str> {
        t.values()
            .iter()
            .map(|v| v.as_str().expect("string field"))
            .collect()
    }

    #[test]
    fn splits_on_delimiter_preserving_token_text() {
        let mut op = extract(SchemaPolicy::Permissive);
        let out = run(&mut op, "1,teststring,1.5").unwrap().unwrap();
        assert_eq!(fields(&out), vec!["1", "teststring", "1.5"]);
    }

    #[test]
    fn trailing_delimiter_yields_empty_field() {
        let mut op = extract(SchemaPolicy::Permissive);
        let out = run(&mut op, "a,b,").unwrap().unwrap();
        assert_eq!(fields(&out), vec!["a", "b", ""]);
    }

    #[test]
    fn line_without_delimiter_is_one_field() {
        let mut op = extract(SchemaPolicy::Permissive);
        let out = run(&mut op, "no delimiters here").unwrap().unwrap();
        assert_eq!(fields(&out), vec!["no delimiters here"]);
    }

    #[test]
    fn permissive_accepts_variable_arity() {
        let mut op = extract(SchemaPolicy::Permissive);
        assert_eq!(run(&mut op, "a,b,c").unwrap().unwrap().arity(), 3);
        assert_eq!(run(&mut op, "a,b").unwrap().unwrap().arity(), 2);
    }

    #[test]
    fn fail_fast_aborts_on_arity_change() {
        let mut op = extract(SchemaPolicy::FailFast);
        run(&mut op, "a,b,c").unwrap();
        let err = run(&mut op, "a,b").unwrap_err();
        match err {
            FlowError::MalformedRecord {
                expected, actual, ..
            } => {
                assert_eq!((expected, actual), (3, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skip_record_drops_and_counts() {
        let mut op = extract(SchemaPolicy::SkipRecord);
        run(&mut op, "a,b,c").unwrap();
        assert!(run(&mut op, "a,b").unwrap().is_none());
        assert!(run(&mut op, "d,e,f").unwrap().is_some());
        assert_eq!(op.stats().records_skipped(), 1);
        assert_eq!(op.stats().records_out(), 2);
    }
}
