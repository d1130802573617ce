use super::core::ParseResult;
use super::core::Parser;
use std::marker::PhantomData;

/// Transforms the result of a successful parse.
pub struct Map<P, F, A, B> {
    parser: P,
    f: F,
    _phantom: PhantomData<(A, B)>,
}

impl<P, F, A, B> Map<P, F, A, B> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<P, F, A, B, I> Parser<I, B> for Map<P, F, A, B>
where
    P: Parser<I, A>,
    F: Fn(A) -> B,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<B> {
        let (pos, value) = self.parser.parse(input, pos)?;
        Ok((pos, (self.f)(value)))
    }
}

/// Runs `left`, `parser` and `right` in order and keeps the middle result.
pub struct Delimited<L, P, R, I, O> {
    left: L,
    parser: P,
    right: R,
    _phantom: PhantomData<(I, O)>,
}

impl<L, P, R, I, O> Delimited<L, P, R, I, O> {
    pub fn new(left: L, parser: P, right: R) -> Self {
        Self {
            left,
            parser,
            right,
            _phantom: PhantomData,
        }
    }
}

impl<L, P, R, I, O> Parser<I, O> for Delimited<L, P, R, I, O>
where
    L: Parser<I, ()>,
    P: Parser<I, O>,
    R: Parser<I, ()>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        let (pos, _) = self.left.parse(input, pos)?;
        let (pos, value) = self.parser.parse(input, pos)?;
        let (pos, _) = self.right.parse(input, pos)?;
        Ok((pos, value))
    }
}

/// One or more items separated by `separator`.
///
/// The separator is a single-token matcher: when it fails the list ends, when
/// it succeeds the following item is mandatory and its error is propagated.
pub struct SeparatedList<P, S, I, O> {
    item_parser: P,
    separator_parser: S,
    _phantom: PhantomData<(I, O)>,
}

impl<P, S, I, O> SeparatedList<P, S, I, O> {
    pub fn new(item_parser: P, separator_parser: S) -> Self {
        Self {
            item_parser,
            separator_parser,
            _phantom: PhantomData,
        }
    }
}

impl<P, S, I, O> Parser<I, Vec<O>> for SeparatedList<P, S, I, O>
where
    P: Parser<I, O>,
    S: Parser<I, ()>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<Vec<O>> {
        let (mut pos, first) = self.item_parser.parse(input, pos)?;
        let mut items = vec![first];
        while let Ok((after_separator, _)) = self.separator_parser.parse(input, pos) {
            let (next_pos, item) = self.item_parser.parse(input, after_separator)?;
            items.push(item);
            pos = next_pos;
        }
        Ok((pos, items))
    }
}

/// Attaches the rule name to any error raised by the inner parser.
pub struct WithContext<P> {
    parser: P,
    context: String,
}

impl<P> WithContext<P> {
    pub fn new(parser: P, context: impl Into<String>) -> Self {
        Self {
            parser,
            context: context.into(),
        }
    }
}

impl<P, I, O> Parser<I, O> for WithContext<P>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        self.parser
            .parse(input, pos)
            .map_err(|e| e.with_context(&self.context))
    }
}
