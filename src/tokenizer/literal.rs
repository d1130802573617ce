use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize, value},
    error::{context, VerboseError, VerboseErrorKind},
    multi::fold_many0,
    sequence::{delimited, pair, preceded, tuple},
};

use super::token::{ParserResult, Token};

/// Literal values as they appear in source text.
///
/// `true`, `false` and `null` are produced by the identifier scanner, all other
/// literals by [`parse_literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => f.write_str("null"),
        }
    }
}

enum Fragment<'a> {
    Text(&'a str),
    Escaped(char),
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_escape(input: &str) -> ParserResult<char> {
    context(
        "escape sequence",
        preceded(
            char('\\'),
            alt((
                value('\n', char('n')),
                value('\t', char('t')),
                value('\r', char('r')),
                value('\\', char('\\')),
                value('\'', char('\'')),
                value('"', char('"')),
            )),
        ),
    )(input)
}

fn parse_quoted(quote: char) -> impl FnMut(&str) -> ParserResult<String> {
    move |input: &str| {
        delimited(
            char(quote),
            fold_many0(
                alt((
                    map(parse_escape, Fragment::Escaped),
                    map(
                        take_while1(move |c: char| c != quote && c != '\\'),
                        Fragment::Text,
                    ),
                )),
                String::new,
                |mut acc, fragment| {
                    match fragment {
                        Fragment::Text(text) => acc.push_str(text),
                        Fragment::Escaped(c) => acc.push(c),
                    }
                    acc
                },
            ),
            char(quote),
        )(input)
    }
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_string_literal(input: &str) -> ParserResult<Literal> {
    context(
        "string literal",
        map(alt((parse_quoted('\''), parse_quoted('"'))), Literal::String),
    )(input)
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_float_literal(input: &str) -> ParserResult<Literal> {
    context(
        "float literal",
        map_res(
            recognize(tuple((opt(char('-')), digit1, char('.'), digit1))),
            |s: &str| s.parse::<f64>().map(Literal::Float),
        ),
    )(input)
}

const OUT_OF_RANGE: &str = "integer literal out of range";

#[tracing::instrument(level = "trace", skip(input))]
fn parse_integer_literal<'a>(input: &'a str) -> ParserResult<'a, Literal> {
    context("integer literal", |input: &'a str| {
        let (rest, digits) = recognize(pair(opt(char('-')), digit1))(input)?;
        match digits.parse::<i64>() {
            Ok(i) => Ok((rest, Literal::Integer(i))),
            // a failure, so no other scanner claims the digits
            Err(_) => Err(nom::Err::Failure(VerboseError {
                errors: vec![(digits, VerboseErrorKind::Context(OUT_OF_RANGE))],
            })),
        }
    })(input)
}

/// Source text of the integer literal that did not fit in `i64`, when that is
/// why scanning failed.
pub fn out_of_range<'a>(error: &nom::Err<VerboseError<&'a str>>) -> Option<&'a str> {
    match error {
        nom::Err::Failure(error) => error.errors.iter().find_map(|(text, kind)| match kind {
            VerboseErrorKind::Context(OUT_OF_RANGE) => Some(*text),
            _ => None,
        }),
        _ => None,
    }
}

/// Parses string and numeric literals.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<Token> {
    context(
        "literal",
        map(
            alt((
                parse_string_literal,
                parse_float_literal,
                parse_integer_literal,
            )),
            Token::Literal,
        ),
    )(input)
}
