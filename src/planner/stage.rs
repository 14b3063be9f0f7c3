use std::collections::{HashMap, HashSet};

use crate::parser::ast::{EntityRef, Query, ReturnTarget, Stage, Term, Where};

use super::errors::PlannerError;
use super::tmp_name::TempNameGenerator;

/// What the previous stage's result looks like to the stage being planned
/// now: the registered table name and which bare aliases are addressable
/// against it (spec.md §4.3 "Carried aliases").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrevStageDescriptor {
    pub table_name: String,
    pub carry_aliases: HashSet<String>,
}

/// One stage, its resolved alias→type bindings, and everything the SQL
/// emitter needs about its place in the pipeline.
#[derive(Debug, Clone)]
pub struct PlannedStage {
    pub index: usize,
    pub stage: Stage,
    /// alias -> entity type, for every *non-synthesized* node pattern alias
    /// in this stage's MATCH. Synthesized aliases are never addressable
    /// (spec.md §4.4 "Algorithmic details and tie-breaks") so they are
    /// omitted here even though the emitter still needs their entity type
    /// for join-group construction directly off `stage.match_`.
    pub bindings: HashMap<String, String>,
    pub prev: Option<PrevStageDescriptor>,
    /// Name to register this stage's result under, so the next stage can
    /// address it. `None` for the final stage (nothing consumes it).
    pub register_as: Option<String>,
}

fn collect_where_refs<'a>(w: &'a Where, out: &mut Vec<&'a EntityRef>) {
    match w {
        Where::Condition(c) => {
            out.push(&c.left);
            if let Term::Ref(r) = &c.right {
                out.push(r);
            }
        }
        Where::And(l, r) | Where::Or(l, r) => {
            collect_where_refs(l, out);
            collect_where_refs(r, out);
        }
    }
}

fn collect_stage_refs(stage: &Stage) -> Vec<&EntityRef> {
    let mut refs = Vec::new();
    if let Some(w) = &stage.where_ {
        collect_where_refs(w, &mut refs);
    }
    for item in &stage.return_.items {
        if let ReturnTarget::Ref(r) = &item.target {
            refs.push(r);
        }
    }
    if let Some(ob) = &stage.order_by {
        for item in &ob.items {
            refs.push(&item.entity_ref);
        }
    }
    refs
}

fn compute_bindings(stage: &Stage) -> Result<HashMap<String, String>, PlannerError> {
    let mut bindings = HashMap::new();
    for node in &stage.match_.nodes {
        if node.alias_synthesized {
            continue;
        }
        if bindings.contains_key(&node.alias) {
            return Err(PlannerError::AmbiguousAlias {
                alias: node.alias.clone(),
            });
        }
        bindings.insert(node.alias.clone(), node.entity_type.clone());
    }
    Ok(bindings)
}

fn validate_refs(
    stage: &Stage,
    bindings: &HashMap<String, String>,
    prev: &Option<PrevStageDescriptor>,
) -> Result<(), PlannerError> {
    for entity_ref in collect_stage_refs(stage) {
        let alias = entity_ref.alias();
        let bound_here = bindings.contains_key(alias);
        let carried = prev
            .as_ref()
            .map(|p| p.carry_aliases.contains(alias))
            .unwrap_or(false);
        if !bound_here && !carried {
            return Err(PlannerError::UnboundAlias {
                alias: alias.to_string(),
            });
        }
    }
    Ok(())
}

/// Split the query into planned stages, carrying bindings and the
/// previous-stage descriptor forward through the `WITH` pipeline (spec.md
/// §4.3). Each `ast::Stage` produced by the parser already corresponds to
/// one `MATCH` boundary, so no further splitting is needed here — this pass
/// adds the semantic layer the parser doesn't: binding resolution and
/// temp-name assignment.
pub fn plan_stages(query: &Query) -> Result<Vec<PlannedStage>, PlannerError> {
    let mut names = TempNameGenerator::new();
    let mut planned = Vec::with_capacity(query.stages.len());
    let mut prev: Option<PrevStageDescriptor> = None;

    let last_index = query.stages.len().saturating_sub(1);

    for (index, stage) in query.stages.iter().enumerate() {
        let bindings = compute_bindings(stage)?;
        validate_refs(stage, &bindings, &prev)?;

        let carry_aliases: HashSet<String> = stage
            .return_
            .items
            .iter()
            .filter_map(|item| item.alias.clone())
            .collect();

        let register_as = if index == last_index {
            None
        } else {
            Some(names.next_name())
        };

        planned.push(PlannedStage {
            index,
            stage: stage.clone(),
            bindings,
            prev: prev.take(),
            register_as: register_as.clone(),
        });

        prev = register_as.map(|table_name| PrevStageDescriptor {
            table_name,
            carry_aliases,
        });
    }

    Ok(planned)
}
