//! Combinators built out of exactly one inner matcher.

use std::marker::PhantomData;

use crate::error::Outcome;
use crate::matcher::Matcher;
use crate::piece::Piece;
use crate::view::StringView;

/// `!inner` — zero-width assertion that `inner` does not match here.
///
/// Implemented as a true zero-width assertion: `consume` reports length `0`
/// on success regardless of what `inner`'s own would-be consumed length was.
/// See DESIGN.md for why this diverges from the original's nonzero-length
/// quirk.
#[derive(Clone, Debug)]
pub struct NotMatch<M, X = ()> {
    inner: M,
    _marker: PhantomData<X>,
}

impl<M, X> NotMatch<M, X> {
    /// Wraps `inner` as a zero-width negative assertion.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<M: Matcher<X>, X> Matcher<String> for NotMatch<M, X> {
    fn consume(&self, input: &StringView) -> Outcome<String> {
        if self.inner.consume(input)?.is_success() {
            Ok(Piece::fail())
        } else {
            Ok(Piece::success(0, input.to_owned_string()))
        }
    }
}

/// `inner+` — one or more greedy repetitions of `inner`.
#[derive(Clone, Debug)]
pub struct Plus<M> {
    inner: M,
}

impl<M> Plus<M> {
    /// Wraps `inner` for one-or-more repetition.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: Matcher<T>, T> Matcher<Vec<T>> for Plus<M> {
    fn consume(&self, input: &StringView) -> Outcome<Vec<T>> {
        let mut total = 0usize;
        let mut values = Vec::new();
        loop {
            let cur = input.substr(total);
            let piece = self.inner.consume(&cur)?;
            match piece.value {
                Some(v) if piece.length > 0 => {
                    values.push(v);
                    total += piece.length as usize;
                }
                Some(v) => {
                    // a zero-length success would loop forever; accept it once and stop.
                    if values.is_empty() {
                        values.push(v);
                    }
                    break;
                }
                None => break,
            }
        }
        if values.is_empty() {
            Ok(Piece::fail())
        } else {
            Ok(Piece::success(total as u32, values))
        }
    }
}

/// `inner*` — zero or more greedy repetitions. `= Optional(Plus(inner))`.
#[derive(Clone, Debug)]
pub struct Star<M> {
    plus: Optional<Plus<M>>,
}

impl<M> Star<M> {
    /// Wraps `inner` for zero-or-more repetition.
    pub fn new(inner: M) -> Self {
        Self {
            plus: Optional::new(Plus::new(inner)),
        }
    }
}

impl<M: Matcher<T>, T> Matcher<Vec<T>> for Star<M> {
    fn consume(&self, input: &StringView) -> Outcome<Vec<T>> {
        let piece = self.plus.consume(input)?;
        Ok(Piece::success(
            piece.length,
            piece.value.flatten().unwrap_or_default(),
        ))
    }
}

/// `inner?` — always succeeds; `None` when `inner` doesn't match.
#[derive(Clone, Debug)]
pub struct Optional<M> {
    inner: M,
}

impl<M> Optional<M> {
    /// Wraps `inner` so a non-match becomes `None` instead of failure.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: Matcher<T>, T> Matcher<Option<T>> for Optional<M> {
    fn consume(&self, input: &StringView) -> Outcome<Option<T>> {
        let piece = self.inner.consume(input)?;
        match piece.value {
            Some(v) => Ok(Piece::success(piece.length, Some(v))),
            None => Ok(Piece::success(0, None)),
        }
    }
}

/// Tries prefixes of increasing length, returning the first one `inner`
/// fully matches.
#[derive(Clone, Debug)]
pub struct StartWith<M> {
    inner: M,
}

impl<M> StartWith<M> {
    /// Wraps `inner` to search for its earliest matching prefix.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: Matcher<T>, T> Matcher<T> for StartWith<M> {
    fn consume(&self, input: &StringView) -> Outcome<T> {
        let upper = match self.inner.biggest_size() {
            n if n >= 0 => (n as usize).min(input.size()),
            _ => input.size(),
        };
        for len in 1..=upper {
            let prefix = input.substr_len(0, len);
            if let Some(value) = self.inner.match_input(&prefix)? {
                return Ok(Piece::success(len as u32, value));
            }
        }
        Ok(Piece::fail())
    }
}

/// Tries suffixes at increasing start offsets, returning the first one
/// `inner` fully matches running to the end of the view.
#[derive(Clone, Debug)]
pub struct EndWith<M> {
    inner: M,
}

impl<M> EndWith<M> {
    /// Wraps `inner` to search for its earliest matching suffix.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: Matcher<T>, T> Matcher<T> for EndWith<M> {
    fn consume(&self, input: &StringView) -> Outcome<T> {
        let size = input.size();
        for start in 0..=size {
            let suffix = input.substr(start);
            if let Some(value) = self.inner.match_input(&suffix)? {
                return Ok(Piece::success((size - start) as u32, value));
            }
        }
        Ok(Piece::fail())
    }
}

/// `N` back-to-back successful consumes of `inner`.
///
/// A genuine prefix matcher: success does not require exhausting the rest of
/// the view (see DESIGN.md for the divergence from the original here).
#[derive(Clone, Debug)]
pub struct Repeat<const N: usize, M> {
    inner: M,
}

impl<const N: usize, M> Repeat<N, M> {
    /// Wraps `inner` to require exactly `N` back-to-back matches.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<const N: usize, M: Matcher<T>, T> Matcher<Vec<T>> for Repeat<N, M> {
    fn consume(&self, input: &StringView) -> Outcome<Vec<T>> {
        let mut total = 0usize;
        let mut values = Vec::with_capacity(N);
        for _ in 0..N {
            let cur = input.substr(total);
            let piece = self.inner.consume(&cur)?;
            match piece.value {
                Some(v) => {
                    values.push(v);
                    total += piece.length as usize;
                }
                None => return Ok(Piece::fail()),
            }
        }
        Ok(Piece::success(total as u32, values))
    }
}

/// `Plus(inner)` mapped to the concatenation of matched bytes into a string.
///
/// Implemented directly (accumulate the total length, slice once) rather
/// than building and discarding a `Vec<T>` via `Plus`.
#[derive(Clone, Debug)]
pub struct Word<M, X = ()> {
    inner: M,
    _marker: PhantomData<X>,
}

impl<M, X> Word<M, X> {
    /// Wraps `inner`, concatenating its repeated matches into a `String`.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<M: Matcher<X>, X> Matcher<String> for Word<M, X> {
    fn consume(&self, input: &StringView) -> Outcome<String> {
        let mut total = 0usize;
        loop {
            let cur = input.substr(total);
            if cur.is_empty() {
                break;
            }
            let piece = self.inner.consume(&cur)?;
            match piece.value {
                Some(_) if piece.length > 0 => total += piece.length as usize,
                _ => break,
            }
        }
        if total == 0 {
            Ok(Piece::fail())
        } else {
            Ok(Piece::success(total as u32, input.substr_len(0, total).to_owned_string()))
        }
    }
}
