//! `fragma` is a parser-combinator engine built around one idea: grammar
//! rules are first described as plain matcher expressions (literals,
//! character classes, `and`/`or`, repetition, ...), then wired together
//! through [`Fragment`](fragment::FragmentRef)s, which are the only place a
//! rule can refer to itself. A fragment that refers to itself through a
//! `handle_left_recursive` slot is resolved by seeded growth: the
//! non-left-recursive alternatives produce an initial pool of candidates,
//! then left-recursive alternatives repeatedly reconsume the pool's own
//! output until a full pass adds nothing new.
//!
//! ## Example
//!
//! ```rust
//! use fragma::fragment::fragment;
//! use fragma::token::{char_, integer};
//!
//! let sum = fragment::<i64>();
//! sum.handle_left_recursive(
//!     |lhs, _plus, rhs| lhs + rhs,
//!     (char_('+').0, integer().0),
//! );
//! sum.handle(|n| n, (integer().0,));
//!
//! assert_eq!(sum.match_input::<i64>("1+2+3").unwrap(), Some(6));
//! ```
//!
//! ## Modules
//!
//! - [`matcher`] defines [`Matcher`](matcher::Matcher), the trait every
//!   terminal and combinator implements.
//! - [`token`] holds the leaf matchers (literals, character classes) and
//!   their factory functions.
//! - [`combinator`] holds the structural combinators (`and`/`or`/repeat/...)
//!   that [`expr::Expr`] exposes as operator sugar and chainable methods.
//! - [`rule`] and [`fragment`] implement grammar rules and the
//!   left-recursion fixpoint.
//! - [`view`] is the zero-copy substring type every matcher operates over.
//! - [`error`] distinguishes ordinary match failure (data, not an error)
//!   from misconfigured-grammar programming errors.
//! - [`unicode`] offers a UTF-16 to UTF-8 transcoding helper for callers
//!   starting from non-UTF-8 input.
//! - [`trace`], gated behind the `debug` feature, prints each matcher call's
//!   entry and exit to stderr.

#![deny(missing_docs)]
#![warn(
    clippy::bool_assert_comparison,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    unused_lifetimes,
    unused_macro_rules
)]

pub mod combinator;
pub mod error;
pub mod expr;
pub mod fragment;
pub mod matcher;
pub mod piece;
pub mod rule;
pub mod token;
#[cfg(feature = "debug")]
pub mod trace;
pub mod unicode;
pub mod view;
pub mod yielder;

pub use error::{EvalError, Outcome};
pub use expr::Expr;
pub use fragment::{fragment, select, FragmentRef};
pub use matcher::Matcher;
pub use piece::Piece;
pub use view::StringView;
