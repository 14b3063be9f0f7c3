//! Grammar & Parser (spec.md §4.1): tokenises and parses a Cypher query
//! directly into the stage-structured IR of [`ast`]. Grounded on the
//! teacher's `open_cypher_parser` module for combinator style (`ws`,
//! `tag_no_case`, `cut`+`context` for fail-fast errors); grammar details
//! resolved against `original_source/duckcypher/parser.py`. See DESIGN.md.

pub mod ast;
mod common;
mod errors;
mod expression;
mod limit_clause;
mod match_clause;
mod order_by_clause;
mod return_clause;
mod where_clause;

pub use errors::{CypherParseError, ParseError};

use nom::{combinator::opt, multi::many1, IResult, Parser};

use ast::{ProjectionKeyword, Query, Stage};

fn parse_stage(input: &str) -> IResult<&str, Stage, CypherParseError> {
    let (input, match_) = match_clause::parse_match_clause(input)?;
    let (input, where_) = opt(where_clause::parse_where_clause).parse(input)?;
    let (input, (projection_keyword, return_)) = return_clause::parse_projection_clause(input)?;
    let (input, order_by) = opt(order_by_clause::parse_order_by_clause).parse(input)?;
    let (input, skip) = opt(limit_clause::parse_skip_clause).parse(input)?;
    let (input, limit) = opt(limit_clause::parse_limit_clause).parse(input)?;

    Ok((
        input,
        Stage {
            match_,
            where_,
            projection_keyword,
            return_,
            order_by,
            skip,
            limit,
        },
    ))
}

/// `query → (match where? return order_by? limit?)+`
fn parse_query_body(input: &str) -> IResult<&str, Query, CypherParseError> {
    let (input, stages) = many1(parse_stage).parse(input)?;
    Ok((input, Query { stages }))
}

/// Parse a full Cypher query text into the IR. Strips comments first (the
/// teacher's `strip_comments` handles this before handing the result to the
/// combinator chain, same as here), fails with [`ParseError`] on the first
/// unparseable token, carrying the remaining input as position context.
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    let stripped = common::strip_comments(input);
    match parse_query_body(stripped.trim()) {
        Ok((rest, query)) if rest.trim().is_empty() => Ok(query),
        Ok((rest, _)) => Err(ParseError(CypherParseError {
            errors: vec![(rest.to_string(), "unconsumed input after query".to_string())],
        })),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(ParseError(e)),
        Err(nom::Err::Incomplete(_)) => Err(ParseError(CypherParseError {
            errors: vec![(String::new(), "incomplete input".to_string())],
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_stage() {
        let q = parse_query("MATCH (c: Customer) WITH c.first_name").unwrap();
        assert_eq!(q.stages.len(), 1);
        assert_eq!(q.stages[0].projection_keyword, ProjectionKeyword::With);
    }

    #[test]
    fn test_two_stage_pipeline() {
        let cypher = r#"
            MATCH (c:Customer {first_name:"Lisa"}) -- (lisa:CustomerInfo {state:"TX"})
            WITH lisa.age AS lisa_age
            MATCH (cu:Customer) -- (i:CustomerInfo {state:"FL"})
            WHERE i.age > lisa_age AND cu.first_name <> "Lisa"
            RETURN cu.first_name, i
        "#;
        let q = parse_query(cypher).unwrap();
        assert_eq!(q.stages.len(), 2);
        assert!(q.stages[0].where_.is_none());
        assert!(q.stages[1].where_.is_some());
        assert_eq!(q.stages[1].projection_keyword, ProjectionKeyword::Return);
    }

    #[test]
    fn test_order_by_limit() {
        let q = parse_query(
            "MATCH (c:Customer) RETURN c.first_name, c.age ORDER BY c.age DESC LIMIT 1",
        )
        .unwrap();
        assert_eq!(q.stages[0].limit, Some(1));
        assert!(q.stages[0].order_by.is_some());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_query("MATCH (c:Customer) RETURN c.first_name EXTRA GARBAGE HERE").is_err());
    }

    #[test]
    fn test_strips_comments_before_parsing() {
        let q = parse_query("-- a comment\nMATCH (c:Customer) RETURN c").unwrap();
        assert_eq!(q.stages.len(), 1);
    }
}
