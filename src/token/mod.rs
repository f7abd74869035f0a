//! Leaf matchers that inspect raw bytes directly, and the factory
//! functions grammar authors call to build them.

pub(crate) mod class;
pub(crate) mod constant;
mod factories;
pub(crate) mod integer;

pub use class::{AnyIn, AnyOf};
pub use constant::{Char, Constant};
pub use factories::{
    any_in, any_of, blank, char_, constant, digit, integer, letter, line_terminator, space, tab,
};
pub use integer::Integer;
