pub mod value;

pub use value::{CastError, FieldType, Value};
