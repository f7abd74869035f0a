//! Terminal factory functions: the grammar-author-facing surface for the
//! leaf matchers in this module, each wrapped in [`Expr`] so the
//! combinator sugar (`.plus()`, `.or(..)`, `!m`, `m | n`, ...) is available
//! immediately on the result.

use crate::combinator::binary::Or;
use crate::expr::Expr;
use crate::token::class::{AnyIn, AnyOf};
use crate::token::constant::{Char, Constant};
use crate::token::integer::Integer;

/// Matches an exact literal byte sequence.
pub fn constant(s: impl Into<String>) -> Expr<Constant> {
    Expr::new(Constant::new(s))
}

/// Matches one exact byte. Named `char_` rather than `char` to avoid
/// shadowing the primitive type name in call sites that import both.
pub fn char_(c: char) -> Expr<Char> {
    Expr::new(Char::new(c))
}

/// Matches the longest nonempty run of ASCII digits as an `i64`.
pub fn integer() -> Expr<Integer> {
    Expr::new(Integer::new())
}

/// Matches one byte out of an explicit set.
pub fn any_of(chars: impl IntoIterator<Item = char>) -> Expr<AnyOf> {
    Expr::new(AnyOf::new(chars))
}

/// Matches one byte within an inclusive range.
pub fn any_in(lo: char, hi: char) -> Expr<AnyIn> {
    Expr::new(AnyIn::new(lo, hi))
}

/// Matches one ASCII digit `0`..`9`.
pub fn digit() -> Expr<AnyIn> {
    any_in('0', '9')
}

/// Matches one ASCII letter, upper or lower case.
pub fn letter() -> Expr<Or<AnyIn, AnyIn>> {
    any_in('a', 'z').or(any_in('A', 'Z'))
}

/// Matches a single space character.
pub fn space() -> Expr<Char> {
    char_(' ')
}

/// Matches a single tab character.
pub fn tab() -> Expr<Char> {
    char_('\t')
}

/// Matches a single space or tab.
pub fn blank() -> Expr<Or<Char, Char>> {
    space().or(tab())
}

/// Matches a single `\n` or `\r`.
pub fn line_terminator() -> Expr<Or<Char, Char>> {
    char_('\n').or(char_('\r'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::StringView;

    #[test]
    fn digit_matches_ascii_digits_only() {
        assert!(digit().consume::<char>(StringView::from("5")).unwrap().is_success());
        assert!(!digit().consume::<char>(StringView::from("x")).unwrap().is_success());
    }

    #[test]
    fn letter_matches_either_case() {
        // `Or` yields the matched prefix as a `String`, not the inner char.
        assert!(letter().match_input::<String>("q").unwrap().is_some());
        assert!(letter().match_input::<String>("Q").unwrap().is_some());
        assert!(letter().match_input::<String>("9").unwrap().is_none());
    }

    #[test]
    fn blank_matches_space_or_tab() {
        assert!(blank().match_input::<String>(" ").unwrap().is_some());
        assert!(blank().match_input::<String>("\t").unwrap().is_some());
        assert!(blank().match_input::<String>("x").unwrap().is_none());
    }
}
