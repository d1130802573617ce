//! # Tokenizer
//!
//! Lexical analysis of service definition files. The tokenizer turns raw source
//! text into a stream of [`TokenSpan`](token::TokenSpan) values, each carrying
//! the byte offsets and the 1-based line/column of the token.
//!
//! Formatting tokens (whitespace, newlines, comments) are kept in the stream;
//! the [`preprocessor`](crate::preprocessor) decides which of them the parser
//! gets to see.
//!
//! ## Component Structure
//!
//! * [`token`]: token types and the [`Tokenizer`](token::Tokenizer) driver
//! * [`keyword`]: reserved words (`override`)
//! * [`symbol`]: markers and punctuation (`@`, `:`, `=`, `(`, `-`, ...)
//! * [`literal`]: string, number, boolean and null literals
//! * [`trivia`]: whitespace, newlines and comments
//!
//! ## Usage Example
//!
//! ```rust
//! use wirebox::tokenizer::token::{Token, Tokenizer};
//!
//! let tokens = Tokenizer::new().tokenize("@logger: Acme\\Log(:path)").unwrap();
//! assert_eq!(tokens[1].token, Token::Identifier("logger".to_string()));
//! ```

pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod trivia;
