//! duckcypher - compiles a subset of Cypher into SQL for an embedded,
//! DuckDB-shaped columnar analytics engine.
//!
//! - Declare **tables** (CSV files or registered in-memory views) and
//!   **models** (graph entity types mapped onto table columns) through
//!   [`schema::SchemaRegistry`].
//! - Compile a Cypher query (`MATCH`/`WHERE`/`RETURN`/`WITH`/`ORDER BY`/`LIMIT`)
//!   to one SQL statement per stage with [`run_cypher`].

/// Debug print macro that only compiles in debug builds.
/// In release builds, this expands to nothing, so there's zero runtime cost.
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        eprintln!($($arg)*);
    };
}

/// Debug print macro for println-style output (only in debug builds)
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        println!($($arg)*);
    };
}

pub mod config;
pub mod error;
pub mod executor;
pub mod parser;
pub mod planner;
pub mod schema;
pub mod sql_gen;

pub use error::DuckCypherError;

/// Compile and run a Cypher query against `registry`, executing each stage
/// through `executor` and returning the final stage's result handle.
pub fn run_cypher<E: executor::ExecutorAdapter>(
    registry: &schema::SchemaRegistry,
    executor: &mut E,
    cypher_query: &str,
    config: &config::CompilerConfig,
) -> Result<E::Result, DuckCypherError> {
    let query = parser::parse_query(cypher_query)?;
    let stages = planner::plan(&query, registry, config)?;

    let mut last_result = None;
    for planned in &stages {
        let sql = sql_gen::emit_stage(planned, registry, config)?;
        debug_println!("[duckcypher] stage {} sql: {sql}", planned.index);
        let handle = executor.execute(&sql)?;
        if let Some(name) = &planned.register_as {
            executor.register_result(name, &handle)?;
        }
        last_result = Some(handle);
    }

    last_result.ok_or(DuckCypherError::EmptyQuery)
}
