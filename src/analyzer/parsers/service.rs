use super::super::{core::*, prelude::*};
use super::{argument::parse_argument_array, common::*};
use crate::{
    ast::{ServiceDefinitionNode, ServiceMethodCallNode},
    tokenizer::{
        keyword::Keyword,
        symbol::Delimiter,
        token::{Token, TokenSpan},
    },
};

/// `["override"] "@" ident ":" classPath ["(" argList ")"] ("-" methodCall)*`
///
/// Continuation lines have already been folded by the preprocessor, so each
/// method call starts directly with a dash.
pub fn parse_service_definition(
    input: &[TokenSpan],
    pos: usize,
) -> ParseResult<ServiceDefinitionNode> {
    let (pos, is_override) = match peek(input, pos) {
        Some(Token::Keyword(Keyword::Override)) => (pos + 1, true),
        _ => (pos, false),
    };
    let (pos, _) = delimiter(Delimiter::At).parse(input, pos)?;
    let (pos, name) = identifier("service name").parse(input, pos)?;
    let (pos, _) = delimiter(Delimiter::Colon).parse(input, pos)?;
    // a marker here (`@a: @b`) is rejected as a missing class path
    let (pos, class_name) = identifier("class name").parse(input, pos)?;

    let (mut pos, arguments) = if is_delimiter(input, pos, Delimiter::OpenParen) {
        let (pos, arguments) =
            with_context(parse_argument_array, "constructor arguments").parse(input, pos)?;
        (pos, Some(arguments))
    } else {
        (pos, None)
    };

    let mut construction_actions = Vec::new();
    while is_delimiter(input, pos, Delimiter::Dash) {
        let (next, call) = with_context(parse_method_call, "method call").parse(input, pos + 1)?;
        construction_actions.push(call);
        pos = next;
    }

    Ok((
        pos,
        ServiceDefinitionNode {
            name,
            class_name,
            is_override,
            arguments,
            construction_actions,
        },
    ))
}

/// `ident "(" argList ")"`
pub fn parse_method_call(input: &[TokenSpan], pos: usize) -> ParseResult<ServiceMethodCallNode> {
    let (pos, name) = identifier("method name").parse(input, pos)?;
    let (pos, arguments) = parse_argument_array(input, pos)?;
    Ok((pos, ServiceMethodCallNode { name, arguments }))
}
