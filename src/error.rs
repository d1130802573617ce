use thiserror::Error;

use crate::analyzer::ParseError;
use crate::builder::BuilderError;
use crate::container::ContainerError;
use crate::namespace::NamespaceError;
use crate::tokenizer::token::TokenizerError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Lexical error: {0}")]
    Lexical(#[from] TokenizerError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Namespace error: {0}")]
    Namespace(#[from] NamespaceError),
    #[error("Builder error: {0}")]
    Builder(#[from] BuilderError),
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
