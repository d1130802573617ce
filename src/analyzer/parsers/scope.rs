use super::super::{core::*, prelude::*};
use super::{common::*, service::parse_service_definition};
use crate::{
    ast::{ParameterDefinitionNode, ScopeItem, ScopeNode},
    tokenizer::{
        symbol::Delimiter,
        token::{Token, TokenSpan},
    },
};

/// `scope := (serviceDef | parameterDef | NEWLINE)*`, up to the end of input.
pub fn parse_definitions(input: &[TokenSpan], pos: usize) -> ParseResult<ScopeNode> {
    let mut scope = ScopeNode::default();
    let mut pos = pos;

    while let Some(token) = peek(input, pos) {
        let (next, item) = match token {
            Token::Newline => {
                pos += 1;
                continue;
            }
            Token::Delimiter(Delimiter::Colon) => map(
                with_context(parse_parameter_definition, "parameter definition"),
                ScopeItem::Parameter,
            )
            .parse(input, pos)?,
            _ => map(
                with_context(parse_service_definition, "service definition"),
                ScopeItem::Service,
            )
            .parse(input, pos)?,
        };
        let (next, _) = parse_line_end(input, next)?;
        scope.add_node(item);
        pos = next;
    }

    Ok((pos, scope))
}

/// `":" ident ["=" literal]`
pub fn parse_parameter_definition(
    input: &[TokenSpan],
    pos: usize,
) -> ParseResult<ParameterDefinitionNode> {
    let (pos, _) = delimiter(Delimiter::Colon).parse(input, pos)?;
    let (pos, name) = identifier("parameter name").parse(input, pos)?;
    if !is_delimiter(input, pos, Delimiter::Equal) {
        return Ok((pos, ParameterDefinitionNode { name, value: None }));
    }
    let (pos, value) = parse_literal(input, pos + 1)?;
    Ok((
        pos,
        ParameterDefinitionNode {
            name,
            value: Some(value),
        },
    ))
}
