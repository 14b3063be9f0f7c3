use std::fmt;

use nom::error::{ContextError, ErrorKind, ParseError as NomParseError};
use thiserror::Error;

/// Accumulates nom error contexts the way the teacher's
/// `OpenCypherParsingError<'a>` does, but owns its strings so it can outlive
/// the `&str` input slice nom hands back on failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CypherParseError {
    pub errors: Vec<(String, String)>,
}

impl<'a> NomParseError<&'a str> for CypherParseError {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        CypherParseError {
            errors: vec![(input.to_string(), kind.description().to_string())],
        }
    }

    fn append(input: &'a str, kind: ErrorKind, mut other: Self) -> Self {
        other
            .errors
            .push((input.to_string(), kind.description().to_string()));
        other
    }
}

impl<'a> ContextError<&'a str> for CypherParseError {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input.to_string(), ctx.to_string()));
        other
    }
}

impl<'a> From<nom::error::Error<&'a str>> for CypherParseError {
    fn from(e: nom::error::Error<&'a str>) -> Self {
        CypherParseError {
            errors: vec![(e.input.to_string(), e.code.description().to_string())],
        }
    }
}

impl fmt::Display for CypherParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (input, ctx) in &self.errors {
            let snippet: String = input.chars().take(40).collect();
            writeln!(f, "{ctx} at {snippet:?}")?;
        }
        Ok(())
    }
}

/// Top-level error surfaced to callers of [`crate::parser::parse_query`].
#[derive(Error, Debug, Clone, PartialEq)]
#[error("parse error: {0}")]
pub struct ParseError(pub CypherParseError);

impl From<CypherParseError> for ParseError {
    fn from(e: CypherParseError) -> Self {
        ParseError(e)
    }
}
