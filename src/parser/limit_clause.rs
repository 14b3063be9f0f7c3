use nom::{bytes::complete::tag_no_case, character::complete::digit1, combinator::cut, error::context, IResult, Parser};

use super::common::ws;
use super::errors::CypherParseError;

fn parse_u64(input: &str) -> IResult<&str, u64, CypherParseError> {
    let (input, digits) = ws(digit1).parse(input)?;
    digits
        .parse::<u64>()
        .map(|n| (input, n))
        .map_err(|_| nom::Err::Error(CypherParseError::default()))
}

/// `"SKIP" n`
pub fn parse_skip_clause(input: &str) -> IResult<&str, u64, CypherParseError> {
    let (input, _) = ws(tag_no_case("SKIP")).parse(input)?;
    context("Error in SKIP clause", cut(parse_u64)).parse(input)
}

/// `"LIMIT" n`
pub fn parse_limit_clause(input: &str) -> IResult<&str, u64, CypherParseError> {
    let (input, _) = ws(tag_no_case("LIMIT")).parse(input)?;
    context("Error in LIMIT clause", cut(parse_u64)).parse(input)
}
