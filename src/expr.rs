//! The ergonomic wrapper every public factory function returns.
//!
//! Rust's orphan rule forbids implementing a foreign trait (`std::ops::Not`
//! and friends) for a bare generic type parameter, which is what every
//! terminal/combinator struct effectively is from the outside. Wrapping them
//! all in one local generic newtype lets this crate implement the operator
//! traits exactly once and have every matcher pick them up for free — the
//! same trick `std::num::Wrapping<T>` uses for its own operator impls.

use std::ops::{BitAnd, BitOr, Not};

use crate::combinator::binary::{And, Or};
use crate::combinator::unary::{
    EndWith, NotMatch, Optional, Plus, Repeat, Star, StartWith, Word,
};
use crate::error::Outcome;
use crate::matcher::Matcher;
use crate::view::StringView;

/// Wraps any [`Matcher`] to pick up this crate's operator/combinator sugar.
#[derive(Clone, Debug)]
pub struct Expr<M>(pub M);

impl<M> Expr<M> {
    /// Wraps `inner`, a bare matcher, to pick up the combinator sugar.
    pub fn new(inner: M) -> Self {
        Self(inner)
    }

    /// Unwraps back to the bare matcher.
    pub fn into_inner(self) -> M {
        self.0
    }

    /// Consumes the longest prefix of `input` this matcher accepts.
    ///
    /// A thin convenience wrapper around [`Matcher::consume`] that accepts
    /// anything [`Into<StringView>`] (e.g. a plain `&str`) rather than
    /// requiring callers to build a `StringView` themselves.
    pub fn consume<T>(&self, input: impl Into<StringView>) -> Outcome<T>
    where
        M: Matcher<T>,
    {
        Matcher::consume(&self.0, &input.into())
    }

    /// Tests whether this matcher accepts `input` in its entirety. See
    /// [`Expr::consume`] for the `Into<StringView>` convenience.
    pub fn match_input<T>(
        &self,
        input: impl Into<StringView>,
    ) -> Result<Option<T>, crate::error::EvalError>
    where
        M: Matcher<T>,
    {
        Matcher::match_input(&self.0, &input.into())
    }
}

impl<T, M: Matcher<T>> Matcher<T> for Expr<M> {
    fn consume(&self, input: &StringView) -> Outcome<T> {
        self.0.consume(input)
    }
    fn match_input(&self, input: &StringView) -> Result<Option<T>, crate::error::EvalError> {
        self.0.match_input(input)
    }
    fn exact_size(&self) -> i32 {
        self.0.exact_size()
    }
    fn biggest_size(&self) -> i32 {
        self.0.biggest_size()
    }
    fn self_ptr(&self) -> Option<*const ()> {
        self.0.self_ptr()
    }
}

impl<M> Expr<M> {
    /// `!m` — zero-width assertion that `m` does *not* match here.
    pub fn not<T>(self) -> Expr<NotMatch<M, T>>
    where
        M: Matcher<T>,
    {
        Expr(NotMatch::new(self.0))
    }

    /// `~m` in the original; Rust has no prefix `~` operator, so this is a
    /// plain method. Always succeeds.
    pub fn optional<T>(self) -> Expr<Optional<M>>
    where
        M: Matcher<T>,
    {
        Expr(Optional::new(self.0))
    }

    /// `+m` in the original; Rust has no prefix unary `+` operator, so this
    /// is a plain method. One-or-more greedy repetition.
    pub fn plus<T>(self) -> Expr<Plus<M>>
    where
        M: Matcher<T>,
    {
        Expr(Plus::new(self.0))
    }

    /// `*m` in the original; Rust's `*` is binary `Mul`/unary `Deref`,
    /// neither of which fits, so this is a plain method. `= self.optional().plus()`-equivalent, always succeeds.
    pub fn star<T>(self) -> Expr<Star<M>>
    where
        M: Matcher<T>,
    {
        Expr(Star::new(self.0))
    }

    /// `m || n` in the original; alternation, see the `BitOr` impl below for
    /// the operator form.
    pub fn or<N>(self, other: Expr<N>) -> Expr<Or<M, N>> {
        Expr(Or::new(self.0, other.0))
    }

    /// `m && n` in the original; equal-length conjunction, see the
    /// `BitAnd` impl below for the operator form.
    pub fn and<N>(self, other: Expr<N>) -> Expr<And<M, N>> {
        Expr(And::new(self.0, other.0))
    }

    /// Concatenates repeated matches of `self` into one `String`.
    pub fn word<T>(self) -> Expr<Word<M, T>>
    where
        M: Matcher<T>,
    {
        Expr(Word::new(self.0))
    }

    /// Searches for the earliest prefix `self` fully matches.
    pub fn start_with<T>(self) -> Expr<StartWith<M>>
    where
        M: Matcher<T>,
    {
        Expr(StartWith::new(self.0))
    }

    /// Searches for the earliest suffix `self` fully matches.
    pub fn end_with<T>(self) -> Expr<EndWith<M>>
    where
        M: Matcher<T>,
    {
        Expr(EndWith::new(self.0))
    }

    /// Requires exactly `N` back-to-back matches of `self`.
    pub fn repeat<const N: usize, T>(self) -> Expr<Repeat<N, M>>
    where
        M: Matcher<T>,
    {
        Expr(Repeat::new(self.0))
    }
}

impl<M, T> Not for Expr<M>
where
    M: Matcher<T>,
{
    type Output = Expr<NotMatch<M, T>>;
    fn not(self) -> Self::Output {
        Expr(NotMatch::new(self.0))
    }
}

/// Substitute for the original's `m || n`: Rust cannot overload `||`
/// (short-circuit control flow, not a trait), so `|` (`BitOr`) stands in.
impl<M, N> BitOr<Expr<N>> for Expr<M> {
    type Output = Expr<Or<M, N>>;
    fn bitor(self, rhs: Expr<N>) -> Self::Output {
        Expr(Or::new(self.0, rhs.0))
    }
}

/// Substitute for the original's `m && n`, see [`BitOr`] impl above.
impl<M, N> BitAnd<Expr<N>> for Expr<M> {
    type Output = Expr<And<M, N>>;
    fn bitand(self, rhs: Expr<N>) -> Self::Output {
        Expr(And::new(self.0, rhs.0))
    }
}

/// `StartWith(left) && EndWith(right)`: matches an accepted prefix of
/// `left` running all the way through an accepted suffix of `right`.
pub fn range<L, R>(left: Expr<L>, right: Expr<R>) -> Expr<crate::combinator::binary::Range<L, R>> {
    Expr(crate::combinator::binary::Range::new(left.0, right.0))
}
