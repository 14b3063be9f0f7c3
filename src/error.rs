use thiserror::Error;

use crate::executor::ExecutorError;
use crate::parser::ParseError;
use crate::planner::PlannerError;
use crate::schema::SchemaError;
use crate::sql_gen::SqlGenError;

/// Crate-level error aggregating every module's error type.
///
/// Matches the teacher's pattern of one `thiserror` enum per module boundary
/// with a single top-level enum aggregating them via `#[from]`.
#[derive(Error, Debug)]
pub enum DuckCypherError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    SqlGen(#[from] SqlGenError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("query contains no stages")]
    EmptyQuery,
}
