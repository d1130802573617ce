use crate::tokenizer::{
    symbol::Delimiter,
    token::{Token, TokenSpan},
};

/// Normalizes the token stream before parsing.
///
/// - whitespace and comments are removed
/// - runs of newlines collapse into one
/// - newlines directly followed by a `-` continuation are removed, so a method
///   call line attaches to the preceding service with one token of lookahead
#[derive(Debug, Clone, Default)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, tokens: Vec<TokenSpan>) -> Vec<TokenSpan> {
        let mut processed: Vec<TokenSpan> = Vec::with_capacity(tokens.len());
        let mut before_continuation = false;

        // walk backwards so that "is the next significant token a dash" is known
        for span in tokens.into_iter().rev() {
            match &span.token {
                Token::Whitespace(_) | Token::Comment(_) => {}
                Token::Newline => {
                    let before_newline = matches!(
                        processed.last(),
                        Some(TokenSpan {
                            token: Token::Newline,
                            ..
                        })
                    );
                    if !before_continuation && !before_newline {
                        processed.push(span);
                    }
                }
                token => {
                    before_continuation = *token == Token::Delimiter(Delimiter::Dash);
                    processed.push(span);
                }
            }
        }

        processed.reverse();
        processed
    }
}
