//! Feature-gated execution tracing.
//!
//! A `debug` Cargo feature gates a hand-rolled call-depth tracer rather
//! than reaching for the `log`/`tracing` crates. With `debug` off,
//! [`Trace`] is a zero-overhead pass-through.

#[cfg(feature = "debug")]
mod internals;

use crate::error::Outcome;
use crate::matcher::Matcher;
use crate::view::StringView;

#[cfg(all(feature = "debug", not(feature = "std")))]
compile_error!("`debug` requires `std`");

/// Wraps `inner`, logging each `consume` call's entry and exit to stderr
/// when the `debug` feature is enabled.
#[derive(Clone, Debug)]
pub struct Trace<M> {
    name: &'static str,
    inner: M,
}

impl<M> Trace<M> {
    /// Wraps `inner` under the label `name`.
    pub fn new(name: &'static str, inner: M) -> Self {
        Self { name, inner }
    }
}

impl<T, M: Matcher<T>> Matcher<T> for Trace<M> {
    #[cfg_attr(not(feature = "debug"), allow(unused_variables))]
    fn consume(&self, input: &StringView) -> Outcome<T> {
        #[cfg(feature = "debug")]
        {
            let depth = internals::Depth::new();
            internals::start(*depth, &self.name, input);
            let result = self.inner.consume(input);
            internals::end(*depth, &self.name, internals::Status::of(&result));
            result
        }
        #[cfg(not(feature = "debug"))]
        {
            self.inner.consume(input)
        }
    }

    fn match_input(&self, input: &StringView) -> Result<Option<T>, crate::error::EvalError> {
        self.inner.match_input(input)
    }

    fn exact_size(&self) -> i32 {
        self.inner.exact_size()
    }

    fn biggest_size(&self) -> i32 {
        self.inner.biggest_size()
    }

    fn self_ptr(&self) -> Option<*const ()> {
        self.inner.self_ptr()
    }
}

/// Wraps `inner` under the label `name`, logging its `consume` calls when
/// the `debug` feature is enabled.
pub fn trace<M>(name: &'static str, inner: M) -> Trace<M> {
    Trace::new(name, inner)
}

#[cfg(all(test, feature = "debug"))]
mod tests {
    use super::*;
    use crate::token::Char;

    #[test]
    fn traced_matcher_behaves_like_the_wrapped_one() {
        let m = trace("char(x)", Char::new('x'));
        let piece = m.consume(&StringView::from("xyz")).unwrap();
        assert_eq!(piece.value, Some('x'));
    }
}
