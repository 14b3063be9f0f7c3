//! Executor Adapter (spec.md §4.5): submits the SQL the emitter produces to
//! the backing engine and registers each stage's result under a generated
//! name so the next stage can address it. Grounded on `server::clickhouse_client`
//! (connection-holding adapter) and the `clickgraph-embedded` workspace
//! member's role as an in-process backend behind the same adapter interface
//! as the network client, generalized to DuckDB since that's the backend
//! this spec names directly rather than an alternate feature-gated mode.
//! See DESIGN.md.

mod adapter;
mod duckdb_adapter;
mod errors;

pub use adapter::ExecutorAdapter;
pub use duckdb_adapter::{CellValue, DuckDbAdapter, QueryHandle};
pub use errors::ExecutorError;
