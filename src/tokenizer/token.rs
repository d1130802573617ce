use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{opt, recognize},
    error::{context, VerboseError},
    sequence::tuple,
    IResult,
};
use thiserror::Error;

use super::{
    keyword::Keyword,
    literal::{self, parse_literal, Literal},
    symbol::{parse_delimiter, Delimiter},
    trivia::{parse_comment, parse_newline, parse_whitespace},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Keyword(Keyword),
    // Identifiers, service names and class paths
    Identifier(String),
    // Symbols
    Delimiter(Delimiter),
    // Literals
    Literal(Literal),
    // Formatting
    Whitespace(String),
    Newline,
    Comment(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Keyword(keyword) => write!(f, "keyword `{}`", keyword),
            Token::Identifier(name) => write!(f, "identifier `{}`", name),
            Token::Delimiter(delimiter) => write!(f, "`{}`", delimiter),
            Token::Literal(literal) => write!(f, "literal {}", literal),
            Token::Whitespace(_) => f.write_str("whitespace"),
            Token::Newline => f.write_str("newline"),
            Token::Comment(_) => f.write_str("comment"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    current_position: usize,
    current_line: usize,
    current_column: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            current_position: 0,
            current_line: 1,   // 1-based
            current_column: 1, // 1-based
        }
    }

    #[tracing::instrument(level = "debug", skip(self, input))]
    pub fn tokenize(&mut self, input: &str) -> TokenizerResult<Vec<TokenSpan>> {
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let start_position = self.current_position;
            let start_line = self.current_line;
            let start_column = self.current_column;

            let result = alt((
                // Formatting
                parse_whitespace,
                parse_newline,
                parse_comment,
                // Literals come before symbols so that `-1` is a number, not a dash
                parse_literal,
                parse_delimiter,
                parse_identifier,
            ))(remaining);

            match result {
                Ok((new_remaining, token)) => {
                    let consumed = &remaining[..(remaining.len() - new_remaining.len())];
                    self.update_position(consumed);

                    tokens.push(TokenSpan {
                        token,
                        start: start_position,
                        end: self.current_position,
                        line: start_line,
                        column: start_column,
                    });

                    remaining = new_remaining;
                }
                Err(err) => {
                    let error = match literal::out_of_range(&err) {
                        Some(text) => TokenizerError::LiteralOutOfRange {
                            literal: text.to_string(),
                            span: Span {
                                start: self.current_position,
                                end: self.current_position + text.len(),
                                line: self.current_line,
                                column: self.current_column,
                            },
                        },
                        None => {
                            let found = remaining.chars().next().unwrap_or_default();
                            TokenizerError::UnexpectedCharacter {
                                found,
                                span: Span {
                                    start: self.current_position,
                                    end: self.current_position + found.len_utf8(),
                                    line: self.current_line,
                                    column: self.current_column,
                                },
                            }
                        }
                    };
                    tracing::debug!("{}", error);
                    return Err(error);
                }
            }
        }

        tracing::trace!("tokenized {} tokens", tokens.len());
        Ok(tokens)
    }

    fn update_position(&mut self, text: &str) {
        for c in text.chars() {
            self.current_position += c.len_utf8();
            if c == '\n' {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Identifiers cover plain names (`logger`), dotted service names
/// (`log.handler`) and namespaced class paths (`Acme\Log`, `\Acme\Log`).
#[tracing::instrument(level = "trace", skip(input))]
fn parse_identifier(input: &str) -> ParserResult<Token> {
    let (input, id) = context(
        "identifier",
        recognize(tuple((
            opt(char('\\')),
            take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '\\')),
        ))),
    )(input)?;

    match id {
        "true" => return Ok((input, Token::Literal(Literal::Boolean(true)))),
        "false" => return Ok((input, Token::Literal(Literal::Boolean(false)))),
        "null" => return Ok((input, Token::Literal(Literal::Null))),
        _ => {}
    }
    if let Ok(kw) = Keyword::try_from(id) {
        return Ok((input, Token::Keyword(kw)));
    }

    Ok((input, Token::Identifier(id.to_string())))
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

pub type TokenizerResult<T> = Result<T, TokenizerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("Unexpected character {found:?} at {span}")]
    UnexpectedCharacter { found: char, span: Span },
    #[error("Integer literal {literal} does not fit in 64 bits at {span}")]
    LiteralOutOfRange { literal: String, span: Span },
}

impl TokenizerError {
    pub fn span(&self) -> &Span {
        match self {
            TokenizerError::UnexpectedCharacter { span, .. }
            | TokenizerError::LiteralOutOfRange { span, .. } => span,
        }
    }
}
