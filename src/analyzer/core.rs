//! # Core Parser Definitions
//!
//! The parser interface and error type shared by every grammar rule.
//!
//! A parser never owns a cursor: it receives the token buffer and the index to
//! start from, and hands back the index where the next rule should resume.

use thiserror::Error;

/// Parser trait defines the core parsing interface.
///
/// # Type Parameters
///
/// * `I` - The input token type
/// * `O` - The output value type
pub trait Parser<I, O> {
    /// Attempts to parse the input starting at the given position.
    ///
    /// * `Ok((new_pos, output))` - the position after the consumed tokens and the parsed value
    /// * `Err(error)` - the first grammar violation encountered
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

/// Plain functions are parsers, so grammar rules can be written as `fn`s and
/// still be composed with the combinators.
impl<I, O, F> Parser<I, O> for F
where
    F: Fn(&[I], usize) -> ParseResult<O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        self(input, pos)
    }
}

/// On success, the new position and the parsed value.
pub type ParseResult<O> = Result<(usize, O), ParseError>;

/// Grammar violations. Parsing is fail-fast: the first error aborts the parse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token other than the expected one was found
    #[error(
        "Unexpected {found}, expected {expected} at line {line}, column {column}, context: {context:?}"
    )]
    Unexpected {
        expected: String,
        found: String,
        line: usize,
        column: usize,
        context: Option<String>,
    },
    /// The input ended in the middle of a rule
    #[error("Unexpected end of input, expected {expected}, context: {context:?}")]
    UnexpectedEOF {
        expected: String,
        context: Option<String>,
    },
}

impl ParseError {
    /// Prepends the name of an enclosing rule to the error context.
    pub fn with_context(self, ctx: &str) -> Self {
        let extend = |context: Option<String>| match context {
            Some(inner) => Some(format!("{} -> {}", ctx, inner)),
            None => Some(ctx.to_string()),
        };
        match self {
            ParseError::Unexpected {
                expected,
                found,
                line,
                column,
                context,
            } => ParseError::Unexpected {
                expected,
                found,
                line,
                column,
                context: extend(context),
            },
            ParseError::UnexpectedEOF { expected, context } => ParseError::UnexpectedEOF {
                expected,
                context: extend(context),
            },
        }
    }

    /// Line and column of the offending token, if there was one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Unexpected { line, column, .. } => Some((*line, *column)),
            ParseError::UnexpectedEOF { .. } => None,
        }
    }

    pub fn context(&self) -> Option<&str> {
        match self {
            ParseError::Unexpected { context, .. } | ParseError::UnexpectedEOF { context, .. } => {
                context.as_deref()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_nests_outermost_first() {
        let err = ParseError::UnexpectedEOF {
            expected: "`)`".to_string(),
            context: None,
        }
        .with_context("argument list")
        .with_context("service definition");

        assert_eq!(err.context(), Some("service definition -> argument list"));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_functions_are_parsers() {
        fn one(input: &[u8], pos: usize) -> ParseResult<u8> {
            Ok((pos + 1, input[pos]))
        }
        assert_eq!(one.parse(&[7, 8], 1), Ok((2, 8)));
    }
}
