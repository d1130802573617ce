use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Reserved words of the definition language.
///
/// Keywords are recognized by the identifier scanner: an identifier whose full
/// text matches a keyword becomes a [`Token::Keyword`](super::token::Token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    /// Marks a service declaration that replaces an earlier one
    Override,
}
