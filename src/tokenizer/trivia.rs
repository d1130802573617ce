//! Whitespace, newlines and comments.
//!
//! Newlines are significant in the definition language: they terminate a
//! definition and introduce `- method(...)` continuation lines. Whitespace and
//! comments are dropped by the preprocessor.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::not_line_ending,
    combinator::map,
    error::context,
    sequence::preceded,
};

use super::token::{ParserResult, Token};

/// Parses spaces and tabs.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<Token> {
    context(
        "whitespace",
        map(take_while1(|c| c == ' ' || c == '\t'), |ws: &str| {
            Token::Whitespace(ws.to_string())
        }),
    )(input)
}

/// Parses `\n` and `\r\n`.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_newline(input: &str) -> ParserResult<Token> {
    context(
        "newline",
        map(alt((tag("\r\n"), tag("\n"))), |_| Token::Newline),
    )(input)
}

/// Parses `// ...` and `# ...` comments up to the end of the line.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_comment(input: &str) -> ParserResult<Token> {
    context(
        "comment",
        map(
            preceded(alt((tag("//"), tag("#"))), not_line_ending),
            |content: &str| Token::Comment(content.trim().to_string()),
        ),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace() {
        let (rest, token) = parse_whitespace(" \t @foo").unwrap();
        assert_eq!(token, Token::Whitespace(" \t ".to_string()));
        assert_eq!(rest, "@foo");
        assert!(parse_whitespace("@foo").is_err());
    }

    #[test]
    fn test_newline() {
        let (rest, token) = parse_newline("\r\n- call()").unwrap();
        assert_eq!(token, Token::Newline);
        assert_eq!(rest, "- call()");
    }

    #[test]
    fn test_comments() {
        let (rest, token) = parse_comment("// the logger\n@logger").unwrap();
        assert_eq!(token, Token::Comment("the logger".to_string()));
        assert_eq!(rest, "\n@logger");

        let (rest, token) = parse_comment("#parameters").unwrap();
        assert_eq!(token, Token::Comment("parameters".to_string()));
        assert_eq!(rest, "");
    }
}
