use std::collections::HashMap;

use crate::parser::ast::{CompareOp, Literal, Match, Term, Where};
use crate::schema::SchemaRegistry;

use super::errors::SqlGenError;
use super::join_groups::JoinGroup;
use super::resolve::ResolveCtx;

fn literal_sql(lit: &Literal) -> String {
    match lit {
        Literal::String(s) => format!("'{}'", s.replace('\'', "''")),
        Literal::Integer(i) => i.to_string(),
        Literal::Float(f) => f.to_string(),
        Literal::Boolean(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Literal::Null => "NULL".to_string(),
    }
}

fn op_sql(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "=",
        CompareOp::NotEq => "<>",
        CompareOp::GreaterThan => ">",
        CompareOp::LessThan => "<",
        CompareOp::GreaterThanEqual => ">=",
        CompareOp::LessThanEqual => "<=",
    }
}

/// Lower every node-pattern property filter in `match_` into SQL predicates
/// (spec.md §4.4 step 3): `{col: value}` becomes `<alias>.<field> = <value>`,
/// or `IS NULL` for a `NULL` literal.
pub fn lower_pattern_filters(
    match_: &Match,
    groups: &[JoinGroup],
    registry: &SchemaRegistry,
) -> Result<Vec<String>, SqlGenError> {
    let mut alias_to_sql_alias: HashMap<&str, &str> = HashMap::new();
    for g in groups {
        for m in &g.members {
            alias_to_sql_alias.insert(m.alias.as_str(), g.sql_alias.as_str());
        }
    }

    let mut predicates = Vec::new();
    for node in &match_.nodes {
        let sql_alias = alias_to_sql_alias
            .get(node.alias.as_str())
            .copied()
            .unwrap_or(node.alias.as_str());
        for (col, value) in &node.properties {
            let (_, physical) = registry.field_of(&node.entity_type, col)?;
            if matches!(value, Literal::Null) {
                predicates.push(format!("{sql_alias}.{physical} IS NULL"));
            } else {
                predicates.push(format!("{sql_alias}.{physical} = {}", literal_sql(value)));
            }
        }
    }
    Ok(predicates)
}

/// Lower a `WHERE` tree into a single SQL boolean expression (spec.md §4.4
/// step 4), preserving the parsed AND/OR associativity with explicit
/// parentheses around each operand.
pub fn lower_where(w: &Where, ctx: &ResolveCtx) -> Result<String, SqlGenError> {
    match w {
        Where::Condition(c) => {
            let lhs = ctx.resolve_column_ref(&c.left)?;
            if let Term::Literal(Literal::Null) = &c.right {
                return Ok(match c.op {
                    CompareOp::Eq => format!("{lhs} IS NULL"),
                    CompareOp::NotEq => format!("{lhs} IS NOT NULL"),
                    other => format!("{lhs} {} NULL", op_sql(other)),
                });
            }
            let rhs = match &c.right {
                Term::Literal(lit) => literal_sql(lit),
                Term::Ref(r) => ctx.resolve_column_ref(r)?,
            };
            Ok(format!("{lhs} {} {rhs}", op_sql(c.op)))
        }
        Where::And(l, r) => Ok(format!(
            "({}) AND ({})",
            lower_where(l, ctx)?,
            lower_where(r, ctx)?
        )),
        Where::Or(l, r) => Ok(format!(
            "({}) OR ({})",
            lower_where(l, ctx)?,
            lower_where(r, ctx)?
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;
    use crate::schema::{Column, SchemaType};

    fn sample_registry() -> SchemaRegistry {
        let mut reg = SchemaRegistry::new();
        reg.add_table_from_csv("customer", "customer.csv").unwrap();
        reg.add_table_from_csv("infos", "infos.csv").unwrap();
        reg.add_model(
            "Customer",
            "customer",
            vec![
                Column {
                    name: "id".into(),
                    field: None,
                    ty: SchemaType::Integer,
                    primary: true,
                },
                Column {
                    name: "first_name".into(),
                    field: None,
                    ty: SchemaType::String,
                    primary: false,
                },
            ],
        )
        .unwrap();
        reg.add_model(
            "CustomerInfo",
            "infos",
            vec![
                Column {
                    name: "id".into(),
                    field: None,
                    ty: SchemaType::Integer,
                    primary: true,
                },
                Column {
                    name: "age".into(),
                    field: None,
                    ty: SchemaType::Integer,
                    primary: false,
                },
            ],
        )
        .unwrap();
        reg
    }

    #[test]
    fn test_pattern_filter_lowers_to_equality() {
        let registry = sample_registry();
        let q = parse_query("MATCH (c:Customer {first_name: \"Lisa\"}) RETURN c.id").unwrap();
        let groups = super::super::join_groups::build_join_groups(&q.stages[0].match_, &registry)
            .unwrap();
        let preds = lower_pattern_filters(&q.stages[0].match_, &groups, &registry).unwrap();
        assert_eq!(preds, vec!["c.first_name = 'Lisa'".to_string()]);
    }

    #[test]
    fn test_where_and_lowers_with_parens() {
        let registry = sample_registry();
        let q = parse_query(
            "MATCH (c:Customer) -- (i:CustomerInfo) WHERE i.age > 30 AND c.first_name <> \"Lisa\" RETURN c.id",
        )
        .unwrap();
        let groups = super::super::join_groups::build_join_groups(&q.stages[0].match_, &registry)
            .unwrap();
        let alias_index = super::super::join_groups::alias_index(&groups);
        let ctx = ResolveCtx {
            groups: &groups,
            alias_index: &alias_index,
            prev: &None,
            registry: &registry,
        };
        let sql = lower_where(q.stages[0].where_.as_ref().unwrap(), &ctx).unwrap();
        assert_eq!(sql, "(i.age > 30) AND (c.first_name <> 'Lisa')");
    }
}
