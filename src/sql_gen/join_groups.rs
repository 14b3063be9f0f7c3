use std::collections::HashMap;

use crate::parser::ast::Match;
use crate::schema::SchemaRegistry;

use super::errors::SqlGenError;

#[derive(Debug, Clone)]
pub struct GroupedNode {
    pub alias: String,
    pub entity_type: String,
}

/// A maximal run of node patterns that co-locate on the same backing table
/// under distinct entity types (GLOSSARY "Join group"). One FROM/JOIN
/// participant in the emitted SQL.
#[derive(Debug, Clone)]
pub struct JoinGroup {
    /// SQL alias used in FROM/JOIN - the alias of the group's first member;
    /// siblings retain their own logical alias for reference resolution but
    /// emit through this one (spec.md §4.4 "Algorithmic details").
    pub sql_alias: String,
    pub table: String,
    pub members: Vec<GroupedNode>,
}

/// Walk `MATCH` left to right merging adjacent node patterns that share a
/// backing table under distinct entity types (spec.md §4.4 step 1).
pub fn build_join_groups(
    match_: &Match,
    registry: &SchemaRegistry,
) -> Result<Vec<JoinGroup>, SqlGenError> {
    let mut groups: Vec<JoinGroup> = Vec::new();

    for node in &match_.nodes {
        let table = registry.table_of(&node.entity_type)?.to_string();
        let member = GroupedNode {
            alias: node.alias.clone(),
            entity_type: node.entity_type.clone(),
        };

        let appended = if let Some(last) = groups.last_mut() {
            let same_table = last.table == table;
            let distinct_type = !last
                .members
                .iter()
                .any(|m| m.entity_type == node.entity_type);
            if same_table && distinct_type {
                last.members.push(member.clone());
                true
            } else {
                false
            }
        } else {
            false
        };

        if !appended {
            groups.push(JoinGroup {
                sql_alias: node.alias.clone(),
                table,
                members: vec![member],
            });
        }
    }

    Ok(groups)
}

/// alias -> (group index, entity type), covering every node pattern alias,
/// including synthesized ones - join construction still needs their type
/// even though a synthesized alias is never user-addressable.
pub fn alias_index(groups: &[JoinGroup]) -> HashMap<String, (usize, String)> {
    let mut map = HashMap::new();
    for (gi, g) in groups.iter().enumerate() {
        for m in &g.members {
            map.insert(m.alias.clone(), (gi, m.entity_type.clone()));
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;
    use crate::schema::{Column, SchemaType};

    fn registry_with(pairs: &[(&str, &str)]) -> SchemaRegistry {
        let mut reg = SchemaRegistry::new();
        let mut seen_tables = std::collections::HashSet::new();
        for (_, table) in pairs {
            if seen_tables.insert(*table) {
                reg.add_table_from_csv(*table, format!("{table}.csv")).unwrap();
            }
        }
        for (ty, table) in pairs {
            reg.add_model(
                *ty,
                *table,
                vec![Column {
                    name: "id".into(),
                    field: None,
                    ty: SchemaType::Integer,
                    primary: true,
                }],
            )
            .unwrap();
        }
        reg
    }

    #[test]
    fn test_same_table_merges_into_one_group() {
        let registry = registry_with(&[("Customer", "customer"), ("Company", "customer")]);
        let q = parse_query("MATCH (cu:Customer) -- (co:Company) RETURN cu.id").unwrap();
        let groups = build_join_groups(&q.stages[0].match_, &registry).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 2);
    }

    #[test]
    fn test_different_table_starts_new_group() {
        let registry = registry_with(&[("Customer", "customer"), ("CustomerInfo", "infos")]);
        let q = parse_query("MATCH (cu:Customer) -- (ci:CustomerInfo) RETURN cu.id").unwrap();
        let groups = build_join_groups(&q.stages[0].match_, &registry).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_third_pattern_same_type_as_first_starts_new_group() {
        let registry = registry_with(&[("Customer", "customer"), ("Company", "customer")]);
        let q =
            parse_query("MATCH (m:Customer) -- (co:Company) -- (p:Customer) RETURN p").unwrap();
        let groups = build_join_groups(&q.stages[0].match_, &registry).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members.len(), 2);
        assert_eq!(groups[1].members.len(), 1);
    }
}
