use crate::parser::ast::{Aggregate, EntityRef, Return, ReturnTarget};

use super::errors::SqlGenError;
use super::resolve::ResolveCtx;

fn aggregate_sql(agg: Aggregate) -> &'static str {
    match agg {
        Aggregate::Count => "COUNT",
        Aggregate::Sum => "SUM",
        Aggregate::Avg => "AVG",
        Aggregate::Min => "MIN",
        Aggregate::Max => "MAX",
    }
}

/// Translate one stage's `RETURN`/`WITH` projection into a list of SQL
/// output expressions (spec.md §4.4 step 5).
pub fn lower_return(ret: &Return, ctx: &ResolveCtx) -> Result<Vec<String>, SqlGenError> {
    let mut columns = Vec::new();

    for item in &ret.items {
        let exprs = match (&item.aggregate, &item.target) {
            (Some(agg), ReturnTarget::Star) => vec![format!("{}(*)", aggregate_sql(*agg))],

            (Some(agg), ReturnTarget::Ref(EntityRef::Alias(alias))) => {
                let (group_idx, _) = ctx.alias_index.get(alias).ok_or_else(|| {
                    SqlGenError::Unsupported(format!("alias `{alias}` could not be resolved"))
                })?;
                vec![format!(
                    "{}({}.*)",
                    aggregate_sql(*agg),
                    ctx.sql_alias_of(*group_idx)
                )]
            }

            (Some(agg), ReturnTarget::Ref(r @ EntityRef::Column(..))) => {
                vec![format!("{}({})", aggregate_sql(*agg), ctx.resolve_column_ref(r)?)]
            }

            (None, ReturnTarget::Ref(r @ EntityRef::Column(..))) => {
                vec![ctx.resolve_column_ref(r)?]
            }

            (None, ReturnTarget::Ref(EntityRef::Alias(alias))) => {
                let (group_idx, entity_type) = ctx.alias_index.get(alias).ok_or_else(|| {
                    SqlGenError::Unsupported(format!("alias `{alias}` could not be resolved"))
                })?;
                let sql_alias = ctx.sql_alias_of(*group_idx);
                ctx.registry
                    .all_fields(entity_type)?
                    .into_iter()
                    .map(|field| format!("{sql_alias}.{field}"))
                    .collect()
            }

            (None, ReturnTarget::Star) => {
                return Err(SqlGenError::Unsupported(
                    "`*` is only meaningful inside an aggregate".into(),
                ));
            }
        };

        match (&item.alias, exprs.len()) {
            (Some(alias), 1) => columns.push(format!("{} AS {alias}", exprs[0])),
            (Some(alias), _) => {
                return Err(SqlGenError::Unsupported(format!(
                    "cannot apply alias `{alias}` to a multi-column projection"
                )));
            }
            (None, _) => columns.extend(exprs),
        }
    }

    Ok(columns)
}
