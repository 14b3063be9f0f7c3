use nom::{
    branch::alt,
    bytes::complete::{take_until, take_while1},
    character::complete::char,
    combinator::{map, opt},
    error::{ErrorKind, ParseError as NomParseError},
    sequence::{delimited, preceded},
    IResult, Parser,
};

use super::ast::{EntityRef, Literal, Term};
use super::common::{parse_identifier, unescape, ws};
use super::errors::CypherParseError;

/// Keywords that may not stand alone as the start of an expression - this
/// catches `WHERE AND ...`/`WHERE OR ...` the way the teacher's
/// `is_binary_operator_keyword` does for its much larger expression grammar.
fn is_reserved_leading_keyword(s: &str) -> bool {
    let upper = s.to_uppercase();
    matches!(upper.as_str(), "AND" | "OR" | "XOR")
}

pub fn parse_single_quoted_string(input: &str) -> IResult<&str, Literal, CypherParseError> {
    let (input, s) = delimited(char('\''), take_until("'"), char('\'')).parse(input)?;
    Ok((input, Literal::String(unescape(s))))
}

pub fn parse_double_quoted_string(input: &str) -> IResult<&str, Literal, CypherParseError> {
    let (input, s) = delimited(char('"'), take_until("\""), char('"')).parse(input)?;
    Ok((input, Literal::String(unescape(s))))
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || c == 'e' || c == 'E'
}

fn parse_number(input: &str) -> IResult<&str, Literal, CypherParseError> {
    let (rest, raw) = take_while1(is_number_char).parse(input)?;
    if let Ok(i) = raw.parse::<i64>() {
        return Ok((rest, Literal::Integer(i)));
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Ok((rest, Literal::Float(f)));
    }
    Err(nom::Err::Error(CypherParseError::from_error_kind(
        input,
        ErrorKind::Float,
    )))
}

/// `NULL | TRUE | FALSE | number | "string" | 'string'`
pub fn parse_literal(input: &str) -> IResult<&str, Literal, CypherParseError> {
    alt((
        ws(parse_double_quoted_string),
        ws(parse_single_quoted_string),
        |input| {
            let (rest, word) = ws(parse_identifier).parse(input)?;
            if word.eq_ignore_ascii_case("null") {
                Ok((rest, Literal::Null))
            } else if word.eq_ignore_ascii_case("true") {
                Ok((rest, Literal::Boolean(true)))
            } else if word.eq_ignore_ascii_case("false") {
                Ok((rest, Literal::Boolean(false)))
            } else {
                Err(nom::Err::Error(CypherParseError::from_error_kind(
                    input,
                    ErrorKind::Tag,
                )))
            }
        },
        ws(parse_number),
    ))
    .parse(input)
}

/// `alias` or `alias.column`.
pub fn parse_entity_ref(input: &str) -> IResult<&str, EntityRef, CypherParseError> {
    let (input, alias) = ws(parse_identifier).parse(input)?;
    if is_reserved_leading_keyword(alias) {
        return Err(nom::Err::Error(CypherParseError::from_error_kind(
            input,
            ErrorKind::Tag,
        )));
    }
    let (input, column) = opt(preceded(char('.'), parse_identifier)).parse(input)?;
    match column {
        Some(col) => Ok((input, EntityRef::Column(alias.to_string(), col.to_string()))),
        None => Ok((input, EntityRef::Alias(alias.to_string()))),
    }
}

/// `entity_id | value | NULL | TRUE | FALSE` (spec.md §4.1 `condition`'s
/// right-hand side).
pub fn parse_term(input: &str) -> IResult<&str, Term, CypherParseError> {
    alt((
        map(parse_literal, Term::Literal),
        map(parse_entity_ref, Term::Ref),
    ))
    .parse(input)
}
