use super::errors::ExecutorError;

/// The interface the compiler core needs from a backing engine (spec.md
/// §4.5, §1: "the core only assumes a backing engine exposing 'register a
/// table by name' and 'execute SQL returning a tabular result that can
/// itself be re-registered'"). [`crate::run_cypher`] is generic over this
/// trait so the emitter and planner never depend on DuckDB directly.
pub trait ExecutorAdapter {
    /// A stage's query result: iterable rows, and re-registerable under a
    /// caller-chosen name via [`ExecutorAdapter::register_result`].
    type Result;

    /// Submit `sql` to the backing engine and return a handle to its result.
    fn execute(&mut self, sql: &str) -> Result<Self::Result, ExecutorError>;

    /// Register `handle` under `name` so a later stage's emitted SQL can
    /// reference it as a table (spec.md §4.4 step 7's carry-through, §4.5).
    fn register_result(&mut self, name: &str, handle: &Self::Result) -> Result<(), ExecutorError>;
}
