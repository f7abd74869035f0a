//! Combinators built out of exactly two inner matchers.

use std::marker::PhantomData;

use crate::error::Outcome;
use crate::matcher::Matcher;
use crate::piece::Piece;
use crate::view::StringView;

/// Tries `left`, then `right`. Value is the matched-prefix string.
#[derive(Clone, Debug)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L, R> Or<L, R> {
    /// Wraps `left`/`right` for first-match-wins alternation.
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L: Matcher<TL>, TL, R: Matcher<TR>, TR> Matcher<String> for Or<L, R> {
    fn consume(&self, input: &StringView) -> Outcome<String> {
        let piece = self.left.consume(input)?;
        if piece.is_success() {
            return Ok(Piece::success(piece.length, input.substr_len(0, piece.length as usize).to_owned_string()));
        }
        let piece = self.right.consume(input)?;
        if piece.is_success() {
            return Ok(Piece::success(piece.length, input.substr_len(0, piece.length as usize).to_owned_string()));
        }
        Ok(Piece::fail())
    }
}

/// Both `left` and `right` must succeed on the same input with the *same*
/// consumed length; no implicit truncation to the shorter match.
#[derive(Clone, Debug)]
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<L, R> And<L, R> {
    /// Wraps `left`/`right`, requiring both to match the same length.
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L: Matcher<TL>, TL, R: Matcher<TR>, TR> Matcher<String> for And<L, R> {
    fn consume(&self, input: &StringView) -> Outcome<String> {
        let lp = self.left.consume(input)?;
        let rp = self.right.consume(input)?;
        if lp.is_success() && rp.is_success() && lp.length == rp.length {
            Ok(Piece::success(lp.length, input.substr_len(0, lp.length as usize).to_owned_string()))
        } else {
            Ok(Piece::fail())
        }
    }
}

/// `StartWith(left) && EndWith(right)`: value is the full accepted prefix.
#[derive(Clone, Debug)]
pub struct Range<L, R> {
    left: crate::combinator::unary::StartWith<L>,
    right: crate::combinator::unary::EndWith<R>,
    _marker: PhantomData<(L, R)>,
}

impl<L, R> Range<L, R> {
    /// Wraps `left`/`right` as the start/end bounds of an accepted range.
    pub fn new(left: L, right: R) -> Self {
        Self {
            left: crate::combinator::unary::StartWith::new(left),
            right: crate::combinator::unary::EndWith::new(right),
            _marker: PhantomData,
        }
    }
}

impl<L: Matcher<TL>, TL, R: Matcher<TR>, TR> Matcher<String> for Range<L, R> {
    fn consume(&self, input: &StringView) -> Outcome<String> {
        if !self.left.consume(input)?.is_success() {
            return Ok(Piece::fail());
        }
        let right_piece = self.right.consume(input)?;
        if right_piece.is_success() {
            // `EndWith` reports the length of its own matched suffix, not
            // the span from offset 0; the accepted range runs from the
            // start of `left`'s match (offset 0) through the end of the
            // view, so the full input is what's consumed here.
            Ok(Piece::success(input.size() as u32, input.to_owned_string()))
        } else {
            Ok(Piece::fail())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{AnyIn, Char};

    #[test]
    fn or_tries_left_then_right() {
        let m = Or::new(Char::new('a'), Char::new('b'));
        assert_eq!(m.consume(&StringView::from("a")).unwrap().value.as_deref(), Some("a"));
        assert_eq!(m.consume(&StringView::from("b")).unwrap().value.as_deref(), Some("b"));
        assert!(!m.consume(&StringView::from("c")).unwrap().is_success());
    }

    #[test]
    fn and_requires_equal_length() {
        let m = And::new(AnyIn::new('a', 'z'), Char::new('a'));
        assert!(m.consume(&StringView::from("ab")).unwrap().is_success());
        assert!(!m.consume(&StringView::from("b")).unwrap().is_success());
    }
}
