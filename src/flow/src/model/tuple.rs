use std::fmt;

use datatypes::Value;

/// Bounds-check failure for positional tuple access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field index {index} out of bounds for tuple of arity {arity}")]
pub struct FieldIndexError {
    pub index: usize,
    pub arity: usize,
}

/// Tuple represents a single record flowing between operators.
///
/// A tuple is an immutable, fixed-arity ordered sequence of field values.
/// Tuples are value types: two tuples are equal iff all fields compare equal
/// pairwise. A tuple lives for one propagation step unless a downstream
/// observer explicitly clones it into a collector.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    values: Vec<Value>,
}

impl Tuple {
    /// Build a new tuple from an ordered field sequence.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Wrap one raw source line as a 1-field tuple, prior to extraction.
    pub fn raw_line(line: impl Into<String>) -> Self {
        Self {
            values: vec![Value::String(line.into())],
        }
    }

    /// Positional field access, bounds-checked.
    pub fn field(&self, index: usize) -> Result<&Value, FieldIndexError> {
        self.values.get(index).ok_or(FieldIndexError {
            index,
            arity: self.values.len(),
        })
    }

    /// Return number of fields stored in this tuple.
    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// Check whether this tuple contains any fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl fmt::Display for Tuple {
    /// Render fields in order, comma-joined. This is the Print rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl FromIterator<Value> for Tuple {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Tuple {
        Tuple::new(vec![
            Value::Int64(1),
            Value::String("teststring".to_string()),
            Value::Float64(1.5),
        ])
    }

    #[test]
    fn equal_field_sequences_compare_equal() {
        assert_eq!(abc(), abc());
    }

    #[test]
    fn differing_field_breaks_equality() {
        let mut other = abc().into_values();
        other[0] = Value::Int64(2);
        assert_ne!(abc(), Tuple::new(other));
    }

    #[test]
    fn differing_arity_breaks_equality() {
        let shorter = Tuple::new(abc().values()[..2].to_vec());
        assert_ne!(abc(), shorter);
    }

    #[test]
    fn field_access_is_bounds_checked() {
        let t = abc();
        assert_eq!(t.field(1).unwrap(), &Value::String("teststring".into()));
        let err = t.field(3).unwrap_err();
        assert_eq!(err, FieldIndexError { index: 3, arity: 3 });
    }

    #[test]
    fn display_joins_fields_with_commas() {
        assert_eq!(abc().to_string(), "1,teststring,1.5");
        assert_eq!(Tuple::new(vec![]).to_string(), "");
    }
}
