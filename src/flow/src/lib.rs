pub mod error;
pub mod model;
pub mod operator;
pub mod topology;

pub use error::{BuildError, FlowError, UserError};
pub use model::{FieldIndexError, Tuple};
pub use operator::{Operator, OperatorStats, OutputContext, SchemaPolicy};
pub use topology::{Pipe, Topology, TopologyState};
pub use datatypes::{CastError, FieldType, Value};
