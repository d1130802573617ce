use serde_json::Value;

use super::super::{core::*, prelude::*};
use super::common::*;
use crate::{
    argument::Argument,
    ast::ArgumentArrayNode,
    container::Resolved,
    tokenizer::{
        symbol::Delimiter,
        token::{Token, TokenSpan},
    },
};

/// `argument := "@" ident | ":" ident | literal`
pub fn parse_argument(input: &[TokenSpan], pos: usize) -> ParseResult<Argument> {
    match peek(input, pos) {
        Some(Token::Delimiter(Delimiter::At)) => {
            map(identifier("dependency name"), Argument::Dependency).parse(input, pos + 1)
        }
        Some(Token::Delimiter(Delimiter::Colon)) => {
            map(identifier("parameter name"), Argument::Parameter).parse(input, pos + 1)
        }
        _ => map(parse_literal, |value: Value| Argument::Raw(Resolved::Value(value))).parse(input, pos),
    }
}

/// `"(" (argument ("," argument)*)? ")"`
pub fn parse_argument_array(input: &[TokenSpan], pos: usize) -> ParseResult<ArgumentArrayNode> {
    map(
        delimited(
            delimiter(Delimiter::OpenParen),
            parse_argument_list,
            delimiter(Delimiter::CloseParen),
        ),
        ArgumentArrayNode::new,
    )
    .parse(input, pos)
}

fn parse_argument_list(input: &[TokenSpan], pos: usize) -> ParseResult<Vec<Argument>> {
    if is_delimiter(input, pos, Delimiter::CloseParen) {
        return Ok((pos, Vec::new()));
    }
    separated_list(parse_argument, delimiter(Delimiter::Comma)).parse(input, pos)
}
