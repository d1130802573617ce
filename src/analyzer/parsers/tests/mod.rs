
use crate::{
    preprocessor::Preprocessor,
    tokenizer::token::{TokenSpan, Tokenizer},
};

fn tokens(source: &str) -> Vec<TokenSpan> {
    let tokens = Tokenizer::new().tokenize(source).unwrap();
    Preprocessor::new().process(tokens)
}
