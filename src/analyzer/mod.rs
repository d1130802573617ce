//! # Analyzer
//!
//! Turns the preprocessed token stream into a [`ScopeNode`].
//!
//! Every grammar rule is a plain function over the token buffer and a start
//! index, returning the index to resume from together with the node it built.
//! A parent rule delegates to a child rule and continues from the child's
//! position; nothing else is shared between rules.
//!
//! ```text
//! scope        := (serviceDef | parameterDef | NEWLINE)*
//! serviceDef   := ["override"] "@" ident ":" classPath ["(" argList ")"] ("-" methodCall)*
//! parameterDef := ":" ident ["=" literal]
//! argList      := (argument ("," argument)*)?
//! argument     := "@" ident | ":" ident | literal
//! methodCall   := ident "(" argList ")"
//! ```
//!
//! Parsing is fail-fast: the first violation is returned as a
//! [`ParseError`](core::ParseError) with the position of the offending token
//! and the chain of rules it occurred in.
//!
//! ```rust
//! let scope = wirebox::analyzer::parse_scope("@logger: Acme\\Log(@log.handler, :path)").unwrap();
//! let logger = scope.services().next().unwrap();
//! assert_eq!(logger.class_name, "Acme\\Log");
//! ```

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

pub use self::core::*;

use crate::{
    ast::ScopeNode, preprocessor::Preprocessor, tokenizer::token::Tokenizer, InternalResult,
};

/// Tokenizes, preprocesses and parses a whole definition file.
#[tracing::instrument(level = "debug", skip(source))]
pub fn parse_scope(source: &str) -> InternalResult<ScopeNode> {
    let tokens = Tokenizer::new().tokenize(source)?;
    let tokens = Preprocessor::new().process(tokens);
    let (_, scope) = parsers::parse_definitions(&tokens, 0)?;
    tracing::debug!("parsed {} definitions", scope.items.len());
    Ok(scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{argument::Argument, Error};

    #[test]
    fn test_parse_scope() {
        let scope = parse_scope("@logger: Acme\\Log(@log.handler, :path)").unwrap();
        let logger = scope.services().next().unwrap();

        assert_eq!(logger.name, "logger");
        assert_eq!(logger.class_name, "Acme\\Log");
        assert_eq!(
            logger.arguments.as_ref().unwrap().arguments,
            vec![
                Argument::dependency("log.handler"),
                Argument::parameter("path")
            ]
        );
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        assert!(matches!(parse_scope("@logger: $"), Err(Error::Lexical(_))));
        assert!(matches!(parse_scope("@logger Acme"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(parse_scope("\n  // nothing\n").unwrap(), ScopeNode::default());
    }
}
