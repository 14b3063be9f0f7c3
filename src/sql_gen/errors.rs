use thiserror::Error;

use crate::schema::SchemaError;

/// Errors raised while emitting SQL for a single stage (spec.md §4.4). Most
/// of the named error kinds in spec.md §7 (`UnknownType`, `UnknownColumn`,
/// `NoPrimary`, `InvalidJoin`) surface here transparently from the schema
/// registry; alias-scoping errors (`UnboundAlias`, `AmbiguousAlias`) are
/// caught earlier by the planner and never reach this stage.
#[derive(Debug, Error)]
pub enum SqlGenError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A grammatically-accepted construct this compiler deliberately does
    /// not translate (variable-length hops, a disabled `SKIP`, `RETURN *`)
    /// per spec.md §9's Open Question decisions.
    #[error("unsupported: {0}")]
    Unsupported(String),
}
