mod query_executor;
mod tabular;

pub use query_executor::QueryExecutor;
pub use tabular::{NO_SEQUENCE_VALUE, TabularExecutor};
