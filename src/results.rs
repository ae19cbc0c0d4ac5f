mod outcome;
mod result_set;
mod row;

pub use outcome::{ExecutionMode, ExecutionOutcome};
pub use result_set::ResultSet;
pub use row::ResultRow;
