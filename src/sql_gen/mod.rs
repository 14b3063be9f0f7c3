//! SQL Generation (spec.md §4.4): turns one planned stage into a single
//! DuckDB `SELECT` statement. Grounded on the teacher's `query_builder`
//! module, which performs the same join-group/filter/projection lowering
//! against ClickHouse; this module targets DuckDB exclusively and drops the
//! dialect parameter throughout. See DESIGN.md.

mod emitter;
mod errors;
mod filters;
mod join_groups;
mod resolve;
mod select;

pub use emitter::emit_stage;
pub use errors::SqlGenError;
