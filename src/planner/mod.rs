//! Stage Planner (spec.md §4.3): splits the parsed query into an ordered
//! list of planned stages, resolving alias bindings and the carry-alias
//! handoff between consecutive `MATCH` blocks. Grounded on the teacher's
//! split between parsing and semantic resolution (`graph_schema` consuming
//! the already-parsed AST), generalized to this compiler's single
//! stage-pipeline shape. See DESIGN.md.

mod errors;
mod stage;
mod tmp_name;

pub use errors::PlannerError;
pub use stage::{PlannedStage, PrevStageDescriptor};
pub use tmp_name::TempNameGenerator;

use crate::config::CompilerConfig;
use crate::parser::ast::Query;
use crate::schema::SchemaRegistry;

/// Entry point used by [`crate::run_cypher`]. The registry is accepted for
/// symmetry with the rest of the pipeline (and so a future planner pass that
/// needs schema-aware validation has somewhere to put it) — today's planning
/// step validates alias scoping only, which spec.md §4.3 defines purely in
/// terms of the IR.
pub fn plan(
    query: &Query,
    _registry: &SchemaRegistry,
    config: &CompilerConfig,
) -> Result<Vec<PlannedStage>, PlannerError> {
    if query.stages.len() as u32 > config.max_stages {
        return Err(PlannerError::TooManyStages {
            found: query.stages.len(),
            max: config.max_stages,
        });
    }
    stage::plan_stages(query)
}
