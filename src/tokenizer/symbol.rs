//! # Symbol Token Handling
//!
//! Markers and punctuation of the definition language.
//!
//! The colon is a single token kind: after a service name it is the
//! assignment separator (`@logger: Acme\Log`), in argument position and at the
//! start of a line it marks a parameter (`:path`). The parser tells the two apart
//! by position.

use strum_macros::{AsRefStr, Display, EnumString};

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, value},
    error::context,
};

use super::token::{ParserResult, Token};

/// Punctuation recognized by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
pub enum Delimiter {
    /// Dependency marker (`@`)
    #[strum(serialize = "@")]
    At,
    /// Parameter marker and service assignment separator (`:`)
    #[strum(serialize = ":")]
    Colon,
    /// Parameter assignment (`=`)
    #[strum(serialize = "=")]
    Equal,
    /// Opening parenthesis of an argument list (`(`)
    #[strum(serialize = "(")]
    OpenParen,
    /// Closing parenthesis of an argument list (`)`)
    #[strum(serialize = ")")]
    CloseParen,
    /// Opening bracket of an array literal (`[`)
    #[strum(serialize = "[")]
    OpenBracket,
    /// Closing bracket of an array literal (`]`)
    #[strum(serialize = "]")]
    CloseBracket,
    /// Argument separator (`,`)
    #[strum(serialize = ",")]
    Comma,
    /// Method call prefix (`-`)
    #[strum(serialize = "-")]
    Dash,
}

/// Parses a single delimiter.
///
/// ```
/// # use wirebox::tokenizer::symbol::{parse_delimiter, Delimiter};
/// # use wirebox::tokenizer::token::Token;
/// let (rest, token) = parse_delimiter("@logger").unwrap();
/// assert_eq!(token, Token::Delimiter(Delimiter::At));
/// assert_eq!(rest, "logger");
/// ```
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_delimiter(input: &str) -> ParserResult<Token> {
    context(
        "delimiter",
        map(
            alt((
                value(Delimiter::At, tag("@")),
                value(Delimiter::Colon, tag(":")),
                value(Delimiter::Equal, tag("=")),
                value(Delimiter::OpenParen, tag("(")),
                value(Delimiter::CloseParen, tag(")")),
                value(Delimiter::OpenBracket, tag("[")),
                value(Delimiter::CloseBracket, tag("]")),
                value(Delimiter::Comma, tag(",")),
                value(Delimiter::Dash, tag("-")),
            )),
            Token::Delimiter,
        ),
    )(input)
}
