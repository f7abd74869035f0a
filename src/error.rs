//! Evaluation errors.
//!
//! Ordinary match failure is never an error: it's represented by
//! [`Piece::fail`](crate::piece::Piece::fail) or `None`, as appropriate. The
//! types in this module exist only for the programming-error category —
//! misconfigured grammars, not input that fails to parse.

use std::fmt;

use crate::piece::Piece;

/// A programming error in how a grammar was built, as distinct from input
/// that simply fails to match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// A rule was evaluated without an action ever having been bound to it.
    ///
    /// Every path this crate exposes for constructing a rule
    /// (`handle`/`handle_left_recursive` and their `_weighted` variants)
    /// binds an action unconditionally, so this variant can only be reached
    /// by a caller constructing a `Rule`/`LrRule` directly rather than
    /// through a fragment; it is kept because `RuleBody`/`LrRuleBody` are
    /// not sealed traits.
    NoAction,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::NoAction => write!(f, "rule has no action bound"),
        }
    }
}

impl std::error::Error for EvalError {}

/// The result of any evaluation that can fail with a programming error
/// alongside the ordinary match-failure-as-data protocol.
pub type Outcome<T> = Result<Piece<T>, EvalError>;
