use std::fmt;

/// Semantic type of a single tuple field.
///
/// Should be synchronized with [`Value`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 64-bit signed integer
    Int64,
    /// 64-bit floating point number
    Float64,
    /// String type
    String,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int64 => write!(f, "int64"),
            FieldType::Float64 => write!(f, "float64"),
            FieldType::String => write!(f, "string"),
        }
    }
}

/// Errors that can occur while coercing a value to another field type.
#[derive(Debug, thiserror::Error)]
pub enum CastError {
    /// The value cannot be interpreted as the requested type.
    #[error("cannot interpret {value:?} as {target}")]
    Incompatible { value: String, target: FieldType },
    /// A textual value failed numeric parsing.
    #[error("cannot parse {value:?} as {target}: {reason}")]
    Parse {
        value: String,
        target: FieldType,
        reason: String,
    },
}

/// A single scalar field flowing between operators.
///
/// Extraction always materializes fields as [`Value::String`]; downstream
/// map transforms coerce them with [`Value::to_i64`] and [`Value::to_f64`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point number
    Float64(f64),
    /// String type
    String(String),
}

impl Value {
    /// Get the field type of this value.
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Int64(_) => FieldType::Int64,
            Value::Float64(_) => FieldType::Float64,
            Value::String(_) => FieldType::String,
        }
    }

    /// Borrow the textual content of a string value.
    pub fn as_str(&self) -> Result<&str, CastError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(CastError::Incompatible {
                value: other.to_string(),
                target: FieldType::String,
            }),
        }
    }

    /// Coerce this value to an integer.
    ///
    /// String values are parsed, mirroring `int(field)` applied to an
    /// extracted token. Floats do not truncate silently.
    pub fn to_i64(&self) -> Result<i64, CastError> {
        match self {
            Value::Int64(v) => Ok(*v),
            Value::String(s) => s.trim().parse::<i64>().map_err(|e| CastError::Parse {
                value: s.clone(),
                target: FieldType::Int64,
                reason: e.to_string(),
            }),
            Value::Float64(v) => Err(CastError::Incompatible {
                value: v.to_string(),
                target: FieldType::Int64,
            }),
        }
    }

    /// Coerce this value to a float. Integers widen, strings are parsed.
    pub fn to_f64(&self) -> Result<f64, CastError> {
        match self {
            Value::Float64(v) => Ok(*v),
            Value::Int64(v) => Ok(*v as f64),
            Value::String(s) => s.trim().parse::<f64>().map_err(|e| CastError::Parse {
                value: s.clone(),
                target: FieldType::Float64,
                reason: e.to_string(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_parses_to_int() {
        let v = Value::String("42".to_string());
        assert_eq!(v.to_i64().unwrap(), 42);
    }

    #[test]
    fn string_parses_to_float() {
        let v = Value::String("1.5".to_string());
        assert_eq!(v.to_f64().unwrap(), 1.5);
    }

    #[test]
    fn int_widens_to_float() {
        assert_eq!(Value::Int64(3).to_f64().unwrap(), 3.0);
    }

    #[test]
    fn float_does_not_truncate_to_int() {
        assert!(Value::Float64(1.5).to_i64().is_err());
    }

    #[test]
    fn garbage_parse_reports_target_type() {
        let err = Value::String("abc".to_string()).to_i64().unwrap_err();
        assert!(matches!(
            err,
            CastError::Parse {
                target: FieldType::Int64,
                ..
            }
        ));
    }

    #[test]
    fn display_renders_raw_text() {
        assert_eq!(Value::String("teststring".into()).to_string(), "teststring");
        assert_eq!(Value::Int64(2).to_string(), "2");
        assert_eq!(Value::Float64(2.5).to_string(), "2.5");
    }
}
