use serde_json::{Number, Value};

use super::super::{core::*, prelude::*};
use crate::tokenizer::{
    literal::Literal,
    symbol::Delimiter,
    token::{Token, TokenSpan},
};

/// Error for the token at `span`, or for the end of input when there is none.
pub fn unexpected(span: Option<&TokenSpan>, expected: &str) -> ParseError {
    match span {
        Some(span) => ParseError::Unexpected {
            expected: expected.to_string(),
            found: span.token.to_string(),
            line: span.line,
            column: span.column,
            context: None,
        },
        None => ParseError::UnexpectedEOF {
            expected: expected.to_string(),
            context: None,
        },
    }
}

pub fn peek(input: &[TokenSpan], pos: usize) -> Option<&Token> {
    input.get(pos).map(|span| &span.token)
}

pub fn is_delimiter(input: &[TokenSpan], pos: usize, delimiter: Delimiter) -> bool {
    peek(input, pos) == Some(&Token::Delimiter(delimiter))
}

pub fn delimiter(expected: Delimiter) -> impl Parser<TokenSpan, ()> {
    move |input: &[TokenSpan], pos: usize| {
        if is_delimiter(input, pos, expected) {
            Ok((pos + 1, ()))
        } else {
            Err(unexpected(input.get(pos), &format!("`{}`", expected)))
        }
    }
}

pub fn identifier(label: &'static str) -> impl Parser<TokenSpan, String> {
    move |input: &[TokenSpan], pos: usize| match input.get(pos) {
        Some(TokenSpan {
            token: Token::Identifier(name),
            ..
        }) => Ok((pos + 1, name.clone())),
        other => Err(unexpected(other, label)),
    }
}

/// A definition ends at a newline or at the end of input.
pub fn parse_line_end(input: &[TokenSpan], pos: usize) -> ParseResult<()> {
    match input.get(pos) {
        None => Ok((pos, ())),
        Some(TokenSpan {
            token: Token::Newline,
            ..
        }) => Ok((pos + 1, ())),
        other => Err(unexpected(other, "end of line")),
    }
}

pub fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Integer(i) => Value::from(*i),
        Literal::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}

/// `literal := string | number | boolean | null | "[" (literal ("," literal)*)? "]"`
pub fn parse_literal(input: &[TokenSpan], pos: usize) -> ParseResult<Value> {
    match input.get(pos) {
        Some(TokenSpan {
            token: Token::Literal(literal),
            ..
        }) => Ok((pos + 1, literal_value(literal))),
        Some(TokenSpan {
            token: Token::Delimiter(Delimiter::OpenBracket),
            ..
        }) => with_context(parse_array, "array").parse(input, pos),
        other => Err(unexpected(other, "literal")),
    }
}

fn parse_array(input: &[TokenSpan], pos: usize) -> ParseResult<Value> {
    map(
        delimited(
            delimiter(Delimiter::OpenBracket),
            parse_array_items,
            delimiter(Delimiter::CloseBracket),
        ),
        Value::Array,
    )
    .parse(input, pos)
}

fn parse_array_items(input: &[TokenSpan], pos: usize) -> ParseResult<Vec<Value>> {
    if is_delimiter(input, pos, Delimiter::CloseBracket) {
        return Ok((pos, Vec::new()));
    }
    separated_list(parse_literal, delimiter(Delimiter::Comma)).parse(input, pos)
}
