//! The core protocol every terminal and combinator implements.

use crate::error::Outcome;
use crate::view::StringView;

/// Anything that can consume a prefix of a [`StringView`], producing a `T`.
///
/// `consume` is the fundamental operation; `match_input` (full consumption)
/// has a uniform default derived from it, see the trait-level invariant
/// below. Implementors only need to override `match_input` when the answer
/// genuinely can't be recovered from a single `consume` call — today, only
/// [`Fragment`](crate::fragment::Fragment) does this, because full-match
/// resolution has to consider weight among several full-length candidates,
/// not just the one `consume` happens to return.
pub trait Matcher<T> {
    /// Consumes a prefix of `input`, returning how much was consumed and the
    /// produced value, or [`Piece::fail`](crate::piece::Piece::fail) on
    /// mismatch.
    fn consume(&self, input: &StringView) -> Outcome<T>;

    /// Tests whether this matcher accepts `input` in its entirety.
    ///
    /// Default: succeed with `consume(input).value` iff the consumed length
    /// equals `input.size()`.
    fn match_input(&self, input: &StringView) -> Result<Option<T>, crate::error::EvalError> {
        let piece = self.consume(input)?;
        if piece.length as usize == input.size() {
            Ok(piece.value)
        } else {
            Ok(None)
        }
    }

    /// The exact number of bytes this matcher always consumes on success, or
    /// `-1` if unknown/variable. Purely advisory.
    fn exact_size(&self) -> i32 {
        -1
    }

    /// An upper bound on the number of bytes this matcher could ever
    /// consume, or `-1` if unknown. Purely advisory.
    fn biggest_size(&self) -> i32 {
        -1
    }

    /// Identity hook used to detect left recursion: a fragment's handle to
    /// itself returns `Some` of its own address; every other matcher returns
    /// `None`. Not part of the public API surface.
    #[doc(hidden)]
    fn self_ptr(&self) -> Option<*const ()> {
        None
    }
}

impl<T, M: Matcher<T> + ?Sized> Matcher<T> for &M {
    fn consume(&self, input: &StringView) -> Outcome<T> {
        (**self).consume(input)
    }
    fn match_input(&self, input: &StringView) -> Result<Option<T>, crate::error::EvalError> {
        (**self).match_input(input)
    }
    fn exact_size(&self) -> i32 {
        (**self).exact_size()
    }
    fn biggest_size(&self) -> i32 {
        (**self).biggest_size()
    }
    fn self_ptr(&self) -> Option<*const ()> {
        (**self).self_ptr()
    }
}
