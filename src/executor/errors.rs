use thiserror::Error;

/// Errors raised while talking to the backing engine (spec.md §4.5, §7
/// `BackendError`).
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("duckdb error: {0}")]
    Backend(#[from] duckdb::Error),

    /// A variable table the schema registry names was never registered
    /// against this connection. Raised by [`super::DuckDbAdapter::register_tables`]
    /// for `TableOrigin::Variable` entries - registering the variable itself
    /// is the external loader's job (spec.md §1), so this adapter can only
    /// check the name is already present.
    #[error("variable table `{0}` is not registered with the DuckDB connection")]
    UnknownTable(String),
}
