use nom::{
    bytes::complete::{tag_no_case, take_until},
    character::complete::{char, multispace0},
    combinator::{cut, opt},
    error::context,
    multi::{many0, separated_list0},
    sequence::{delimited, preceded, separated_pair},
    IResult, Parser,
};

use super::ast::{EdgeMeta, Literal, Match, NodePattern};
use super::common::{parse_identifier, ws};
use super::errors::CypherParseError;
use super::expression::parse_literal;

fn parse_property_map(input: &str) -> IResult<&str, Vec<(String, Literal)>, CypherParseError> {
    delimited(
        ws(char('{')),
        separated_list0(
            ws(char(',')),
            separated_pair(ws(parse_identifier), ws(char(':')), parse_literal),
        ),
        ws(char('}')),
    )
    .map(|pairs| {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    })
    .parse(input)
}

/// `"(" name? (":" Type)? property_map? ")"`
fn parse_node(input: &str) -> IResult<&str, (Option<String>, Option<String>, Vec<(String, Literal)>), CypherParseError> {
    let (input, _) = ws(char('(')).parse(input)?;
    let (input, name) = opt(ws(parse_identifier)).parse(input)?;
    let (input, label) = opt(preceded(ws(char(':')), ws(parse_identifier))).parse(input)?;
    let (input, props) = opt(parse_property_map).parse(input)?;
    let (input, _) = ws(char(')')).parse(input)?;
    Ok((
        input,
        (
            name.map(str::to_string),
            label.map(str::to_string),
            props.unwrap_or_default(),
        ),
    ))
}

/// `edge → "--" | "-[ ... ]-"` with optional direction arrows and an
/// optional `[name? (":" Type)? hop_range?]` body. Everything inside the
/// brackets is discarded except whether a hop-range token (`*`) was present
/// (spec.md §4.1: "all edge attributes are accepted syntactically and
/// discarded semantically").
fn parse_edge(input: &str) -> IResult<&str, EdgeMeta, CypherParseError> {
    let (input, _) = multispace0.parse(input)?;
    let (input, _left_arrow) = opt(char('<')).parse(input)?;
    let (input, _) = char('-').parse(input)?;
    let (input, bracket) =
        opt(delimited(char('['), take_until("]"), char(']'))).parse(input)?;
    let (input, _) = char('-').parse(input)?;
    let (input, _right_arrow) = opt(char('>')).parse(input)?;
    let (input, _) = multispace0.parse(input)?;

    let has_hop_range = bracket.map(|b| b.contains('*')).unwrap_or(false);
    Ok((input, EdgeMeta { has_hop_range }))
}

/// `match → "MATCH" node (edge node)*`
pub fn parse_match_clause(input: &str) -> IResult<&str, Match, CypherParseError> {
    let (input, _) = ws(tag_no_case("MATCH")).parse(input)?;

    let (input, (first, rest)) = context(
        "Error in MATCH clause",
        cut((parse_node, many0((parse_edge, parse_node)))),
    )
    .parse(input)?;

    let mut nodes = Vec::with_capacity(rest.len() + 1);
    let mut edges = Vec::with_capacity(rest.len());
    let mut synth_counter: u32 = 0;

    let push_node = |nodes: &mut Vec<NodePattern>,
                     synth_counter: &mut u32,
                     (name, label, props): (Option<String>, Option<String>, Vec<(String, Literal)>)| {
        let (alias, synthesized) = match name {
            Some(n) => (n, false),
            None => {
                let n = format!("_anon{synth_counter}");
                *synth_counter += 1;
                (n, true)
            }
        };
        nodes.push(NodePattern {
            alias,
            alias_synthesized: synthesized,
            entity_type: label.unwrap_or_default(),
            properties: props,
        });
    };

    push_node(&mut nodes, &mut synth_counter, first);
    for (edge, node) in rest {
        edges.push(edge);
        push_node(&mut nodes, &mut synth_counter, node);
    }

    Ok((input, Match { nodes, edges }))
}
