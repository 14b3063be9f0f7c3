use nom::{
    bytes::complete::{tag_no_case, take_while1},
    character::complete::char,
    combinator::cut,
    error::context,
    sequence::delimited,
    IResult, Parser,
};

use super::ast::{CompareOp, Condition, Where};
use super::common::ws;
use super::errors::CypherParseError;
use super::expression::{parse_entity_ref, parse_term};

/// `op → = | == | <> | > | < | >= | <=`
fn parse_compare_op(input: &str) -> IResult<&str, CompareOp, CypherParseError> {
    let (input, symbol) = ws(take_while1(|c: char| "=<>".contains(c))).parse(input)?;
    let op = match symbol {
        ">=" => CompareOp::GreaterThanEqual,
        "<=" => CompareOp::LessThanEqual,
        "<>" => CompareOp::NotEq,
        "==" => CompareOp::Eq,
        "=" => CompareOp::Eq,
        ">" => CompareOp::GreaterThan,
        "<" => CompareOp::LessThan,
        _ => {
            return Err(nom::Err::Error(CypherParseError::default()));
        }
    };
    Ok((input, op))
}

/// `condition → entity_id op (entity_id | value | NULL | TRUE | FALSE)`
fn parse_condition(input: &str) -> IResult<&str, Where, CypherParseError> {
    let (input, left) = parse_entity_ref(input)?;
    let (input, op) = parse_compare_op(input)?;
    let (input, right) = cut(parse_term).parse(input)?;
    Ok((input, Where::Condition(Condition { left, op, right })))
}

fn parse_primary(input: &str) -> IResult<&str, Where, CypherParseError> {
    nom::branch::alt((
        delimited(ws(char('(')), parse_compound, ws(char(')'))),
        parse_condition,
    ))
    .parse(input)
}

/// `compound → condition | "(" compound bool_op compound ")" | compound
/// bool_op compound` (left-associative, spec.md §4.1).
fn parse_compound(input: &str) -> IResult<&str, Where, CypherParseError> {
    let (input, mut lhs) = parse_primary(input)?;
    let mut rest = input;
    loop {
        let and_try = nom::sequence::preceded(ws(tag_no_case("AND")), parse_primary).parse(rest);
        if let Ok((next, rhs)) = and_try {
            lhs = Where::And(Box::new(lhs), Box::new(rhs));
            rest = next;
            continue;
        }
        let or_try = nom::sequence::preceded(ws(tag_no_case("OR")), parse_primary).parse(rest);
        if let Ok((next, rhs)) = or_try {
            lhs = Where::Or(Box::new(lhs), Box::new(rhs));
            rest = next;
            continue;
        }
        break;
    }
    Ok((rest, lhs))
}

/// `where → "WHERE" compound`
pub fn parse_where_clause(input: &str) -> IResult<&str, Where, CypherParseError> {
    let (input, _) = ws(tag_no_case("WHERE")).parse(input)?;
    context("Error in WHERE clause", cut(parse_compound)).parse(input)
}
