use nom::{
    bytes::complete::tag_no_case,
    character::complete::char,
    combinator::{cut, map, opt},
    error::context,
    multi::separated_list1,
    sequence::{delimited, preceded},
    IResult, Parser,
};

use super::ast::{Aggregate, ProjectionKeyword, Return, ReturnItem, ReturnTarget};
use super::common::{parse_identifier, ws};
use super::errors::CypherParseError;
use super::expression::parse_entity_ref;

fn parse_aggregate_name(input: &str) -> IResult<&str, Aggregate, CypherParseError> {
    nom::branch::alt((
        map(tag_no_case("count"), |_| Aggregate::Count),
        map(tag_no_case("sum"), |_| Aggregate::Sum),
        map(tag_no_case("avg"), |_| Aggregate::Avg),
        map(tag_no_case("min"), |_| Aggregate::Min),
        map(tag_no_case("max"), |_| Aggregate::Max),
    ))
    .parse(input)
}

/// `aggregate → count_star | count|sum|avg|min|max "(" entity_id ")"`
fn parse_aggregate_item(input: &str) -> IResult<&str, (Aggregate, ReturnTarget), CypherParseError> {
    let (input, agg) = ws(parse_aggregate_name).parse(input)?;
    let (input, _) = ws(char('(')).parse(input)?;
    let (input, target) = nom::branch::alt((
        map(ws(char('*')), |_| ReturnTarget::Star),
        map(parse_entity_ref, ReturnTarget::Ref),
    ))
    .parse(input)?;
    let (input, _) = ws(char(')')).parse(input)?;
    Ok((input, (agg, target)))
}

/// `item → aggregate | entity_id ("AS" name)?`
fn parse_return_item(input: &str) -> IResult<&str, ReturnItem, CypherParseError> {
    let (input, (aggregate, target)) = nom::branch::alt((
        map(parse_aggregate_item, |(a, t)| (Some(a), t)),
        map(parse_entity_ref, |r| (None, ReturnTarget::Ref(r))),
    ))
    .parse(input)?;

    let (input, alias) = opt(preceded(ws(tag_no_case("AS")), ws(parse_identifier))).parse(input)?;

    Ok((
        input,
        ReturnItem {
            aggregate,
            target,
            alias: alias.map(str::to_string),
        },
    ))
}

/// `return → ("RETURN"|"WITH") item ("," item)*` - `SKIP`/`LIMIT`/`ORDER BY`
/// are parsed separately by the caller (see `parser::clause::parse_stage`),
/// since they trail the item list rather than belong to it.
pub fn parse_projection_clause(
    input: &str,
) -> IResult<&str, (ProjectionKeyword, Return), CypherParseError> {
    let (input, keyword) = nom::branch::alt((
        map(ws(tag_no_case("RETURN")), |_| ProjectionKeyword::Return),
        map(ws(tag_no_case("WITH")), |_| ProjectionKeyword::With),
    ))
    .parse(input)?;

    let (input, items) = context(
        "Error in RETURN/WITH clause",
        separated_list1(ws(char(',')), cut(parse_return_item)),
    )
    .parse(input)?;

    Ok((input, (keyword, Return { items })))
}
