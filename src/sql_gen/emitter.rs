use crate::config::CompilerConfig;
use crate::parser::ast::SortDirection;
use crate::planner::PlannedStage;
use crate::schema::SchemaRegistry;

use super::errors::SqlGenError;
use super::filters::{lower_pattern_filters, lower_where};
use super::join_groups::{alias_index, build_join_groups};
use super::resolve::ResolveCtx;
use super::select::lower_return;

/// Emit the SQL for one planned stage (spec.md §4.4). The previous stage's
/// registered result, if any, is never joined into FROM directly - it is
/// only reachable through the scalar subselects `ResolveCtx` builds for
/// carried aliases.
pub fn emit_stage(
    planned: &PlannedStage,
    registry: &SchemaRegistry,
    config: &CompilerConfig,
) -> Result<String, SqlGenError> {
    let stage = &planned.stage;

    if stage.match_.edges.iter().any(|e| e.has_hop_range) {
        return Err(SqlGenError::Unsupported(
            "variable-length edge hops are not supported".into(),
        ));
    }

    let groups = build_join_groups(&stage.match_, registry)?;
    let alias_idx = alias_index(&groups);
    let ctx = ResolveCtx {
        groups: &groups,
        alias_index: &alias_idx,
        prev: &planned.prev,
        registry,
    };

    let mut sql = String::from("SELECT ");
    sql.push_str(&lower_return(&stage.return_, &ctx)?.join(", "));

    sql.push_str(" FROM ");
    sql.push_str(&format!("{} AS {}", groups[0].table, groups[0].sql_alias));

    for i in 1..groups.len() {
        let left_group = &groups[i - 1];
        let right_group = &groups[i];
        let left_type = &left_group
            .members
            .last()
            .expect("join group always has at least one member")
            .entity_type;
        let right_type = &right_group
            .members
            .first()
            .expect("join group always has at least one member")
            .entity_type;
        let (left_field, right_field) = registry.join_fields(left_type, right_type)?;
        sql.push_str(&format!(
            " JOIN {} AS {} ON {}.{} = {}.{}",
            right_group.table,
            right_group.sql_alias,
            left_group.sql_alias,
            left_field,
            right_group.sql_alias,
            right_field,
        ));
    }

    let mut predicates = lower_pattern_filters(&stage.match_, &groups, registry)?;
    if let Some(w) = &stage.where_ {
        predicates.push(lower_where(w, &ctx)?);
    }
    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(
            &predicates
                .iter()
                .map(|p| format!("({p})"))
                .collect::<Vec<_>>()
                .join(" AND "),
        );
    }

    if let Some(order_by) = &stage.order_by {
        let parts: Result<Vec<String>, SqlGenError> = order_by
            .items
            .iter()
            .map(|item| {
                let field = ctx.resolve_column_ref(&item.entity_ref)?;
                let dir = match item.direction {
                    SortDirection::Ascending => "ASC",
                    SortDirection::Descending => "DESC",
                };
                Ok(format!("{field} {dir}"))
            })
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&parts?.join(", "));
    }

    match (stage.limit, stage.skip) {
        (_, Some(_)) if !config.honour_skip => {
            return Err(SqlGenError::Unsupported(
                "SKIP is disabled by configuration".into(),
            ));
        }
        (Some(limit), Some(skip)) => sql.push_str(&format!(" LIMIT {limit} OFFSET {skip}")),
        (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
        (None, Some(skip)) => sql.push_str(&format!(" OFFSET {skip}")),
        (None, None) => {}
    }

    Ok(sql)
}
