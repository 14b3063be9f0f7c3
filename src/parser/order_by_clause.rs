use nom::{
    bytes::complete::tag_no_case,
    character::complete::char,
    combinator::{cut, map, opt},
    error::context,
    multi::separated_list1,
    IResult, Parser,
};

use super::ast::{OrderBy, OrderByItem, SortDirection};
use super::common::ws;
use super::errors::CypherParseError;
use super::expression::parse_entity_ref;

fn parse_direction(input: &str) -> IResult<&str, SortDirection, CypherParseError> {
    let (input, dir) = opt(nom::branch::alt((
        map(ws(tag_no_case("ASC")), |_| SortDirection::Ascending),
        map(ws(tag_no_case("DESC")), |_| SortDirection::Descending),
    )))
    .parse(input)?;
    Ok((input, dir.unwrap_or(SortDirection::Ascending)))
}

fn parse_order_by_item(input: &str) -> IResult<&str, OrderByItem, CypherParseError> {
    let (input, entity_ref) = parse_entity_ref(input)?;
    let (input, direction) = parse_direction(input)?;
    Ok((
        input,
        OrderByItem {
            entity_ref,
            direction,
        },
    ))
}

/// `"ORDER BY" entity_ref [ASC|DESC] ("," entity_ref [ASC|DESC])*`
///
/// The original grammar (`original_source/duckcypher/parser.py`) parses only
/// a bare `entity_id` with no direction token at all, yet spec.md's IR table
/// specifies a direction with an ascending default - this crate follows
/// spec.md's IR (the authoritative document for this compiler) and parses an
/// optional trailing `ASC`/`DESC` keyword (DESIGN.md, §4.1).
pub fn parse_order_by_clause(input: &str) -> IResult<&str, OrderBy, CypherParseError> {
    let (input, _) = ws(tag_no_case("ORDER")).parse(input)?;
    let (input, _) = ws(tag_no_case("BY")).parse(input)?;
    let (input, items) = context(
        "Error in ORDER BY clause",
        cut(separated_list1(ws(char(',')), parse_order_by_item)),
    )
    .parse(input)?;
    Ok((input, OrderBy { items }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::EntityRef;

    #[test]
    fn test_default_ascending() {
        let (rem, ob) = parse_order_by_clause("ORDER BY c.age").unwrap();
        assert_eq!(rem, "");
        assert_eq!(ob.items[0].direction, SortDirection::Ascending);
    }

    #[test]
    fn test_explicit_descending() {
        let (rem, ob) = parse_order_by_clause("ORDER BY age DESC").unwrap();
        assert_eq!(rem, "");
        assert_eq!(ob.items[0].direction, SortDirection::Descending);
        assert_eq!(ob.items[0].entity_ref, EntityRef::Alias("age".into()));
    }

    #[test]
    fn test_multiple_items() {
        let (rem, ob) = parse_order_by_clause("ORDER BY c.age DESC, c.last_name").unwrap();
        assert_eq!(rem, "");
        assert_eq!(ob.items.len(), 2);
        assert_eq!(ob.items[1].direction, SortDirection::Ascending);
    }
}
