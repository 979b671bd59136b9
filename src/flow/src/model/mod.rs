pub mod tuple;

pub use tuple::{FieldIndexError, Tuple};
