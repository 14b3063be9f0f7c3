use nom::{
    bytes::complete::take_while1,
    character::complete::multispace0,
    error::ParseError,
    sequence::delimited,
    IResult, Parser,
};

/// Whitespace-handling combinator, same shape as the teacher's `ws`.
pub fn ws<'a, O, E: ParseError<&'a str>, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
{
    delimited(multispace0, inner, multispace0)
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse an identifier: alphanumeric/underscore, must start with a letter or
/// underscore is allowed by the teacher's grammar too, so this mirrors it.
pub fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(is_identifier_char).parse(input)
}

/// Strip `--`/`//` line comments and `/* */` block comments, respecting
/// string/identifier quote boundaries. Ported from the teacher's
/// `open_cypher_parser::common::strip_comments` (same quote handling for
/// `'`, `"`, and `` ` ``).
pub fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string: Option<char> = None;
    let mut escape_next = false;

    while let Some(ch) = chars.next() {
        if escape_next {
            result.push(ch);
            escape_next = false;
            continue;
        }

        if in_string.is_some() && ch == '\\' {
            result.push(ch);
            escape_next = true;
            continue;
        }

        if ch == '\'' || ch == '"' || ch == '`' {
            if in_string == Some(ch) {
                in_string = None;
            } else if in_string.is_none() {
                in_string = Some(ch);
            }
            result.push(ch);
            continue;
        }

        if in_string.is_some() {
            result.push(ch);
            continue;
        }

        if ch == '-' && chars.peek() == Some(&'-') {
            chars.next();
            for c in chars.by_ref() {
                if c == '\n' {
                    result.push('\n');
                    break;
                }
            }
            continue;
        }

        if ch == '/' {
            match chars.peek() {
                Some(&'*') => {
                    chars.next();
                    let mut found_end = false;
                    while let Some(c) = chars.next() {
                        if c == '*' && chars.peek() == Some(&'/') {
                            chars.next();
                            found_end = true;
                            break;
                        }
                    }
                    let _ = found_end;
                    continue;
                }
                Some(&'/') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if c == '\n' {
                            result.push('\n');
                            break;
                        }
                    }
                    continue;
                }
                _ => {}
            }
        }

        result.push(ch);
    }

    result
}

/// Decode C-style escapes (`\"`, `\\`, `\n`, `\t`, `\r`) in a double-quoted
/// string literal's inner text. Neither of the teacher's string-literal
/// parsers decode escapes (`parse_string_literal`/
/// `parse_double_quoted_string_literal` in `open_cypher_parser::expression`
/// just slice between quotes); spec.md §4.1 requires "C-escape decoded"
/// literals, so this crate adds the decoding step the teacher doesn't need.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
