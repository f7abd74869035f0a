//! End-to-end grammars, each built once per test and driven against a
//! handful of literal inputs.

use fragma::combinator::unary::Plus;
use fragma::fragment::fragment;
use fragma::token::{blank, char_, constant, integer};
use fragma::Expr;

fn arithmetic() -> Expr<fragma::FragmentRef<i64>> {
    let s = fragment::<i64>();
    s.handle(|a: i64, _op: char, b: i64| a + b, (integer().0, char_('+').0, integer().0));
    s.handle(|a: i64, _op: char, b: i64| a - b, (integer().0, char_('-').0, integer().0));
    s.handle(|a: i64, _op: char, b: i64| a * b, (integer().0, char_('*').0, integer().0));
    s.handle(|a: i64, _op: char, b: i64| a / b, (integer().0, char_('/').0, integer().0));
    s
}

#[test]
fn arithmetic_evaluates_the_four_basic_operators() {
    let s = arithmetic();
    assert_eq!(s.match_input::<i64>("5+5").unwrap(), Some(10));
    assert_eq!(s.match_input::<i64>("50*50").unwrap(), Some(2500));
}

#[test]
fn arithmetic_with_skip_ignores_surrounding_blanks() {
    let s = arithmetic();
    s.skip(blank().0);
    assert_eq!(s.match_input::<i64>("500 / 50").unwrap(), Some(10));
}

#[test]
fn parenthesized_arithmetic_recurses_through_a_second_fragment() {
    let s = arithmetic();
    // `S -> '(' S ')'` is left-recursive only if `S` appears in slot one;
    // here it's bracketed, so an ordinary (non-left-recursive) rule over
    // `s` itself as a slot matcher is enough to recurse through parens.
    s.handle(
        |_open: char, inner: i64, _close: char| inner,
        (char_('(').0, s.0.clone(), char_(')').0),
    );
    assert_eq!(s.match_input::<i64>("((((5+5))))").unwrap(), Some(10));
}

#[test]
fn left_recursive_percent_bang_accepts_the_whole_input() {
    let t = fragment::<String>();
    t.handle(|_: String| "int".to_owned(), (constant("int").0,));
    t.handle_left_recursive(|base: String, _pct: char| base, (char_('%').0,));
    t.handle_left_recursive(|base: String, _bang: char| base, (char_('!').0,));
    assert!(t.match_input::<String>("int%!%%").unwrap().is_some());
}

#[test]
fn counter_block_returns_the_last_statement_value() {
    // `S -> int "++" ';'` alternated with `S -> '{' S+ '}'`, both on the
    // same fragment: the second rule's self-reference sits behind the `{`,
    // so it's ordinary (non-left-recursive) recursion through the `Rc`.
    let s = fragment::<i64>();
    s.handle(
        |a: i64, _inc: String, _semi: char| a + 1,
        (integer().0, constant("++").0, char_(';').0),
    );
    s.handle(
        |_open: char, xs: Vec<i64>, _close: char| *xs.last().unwrap(),
        (char_('{').0, Plus::new(s.0.clone()), char_('}').0),
    );

    assert_eq!(
        s.match_input::<i64>("{1++;2++;3++;4++;24++;}").unwrap(),
        Some(25)
    );
}

#[test]
fn repeat_four_digits_is_a_genuine_prefix_matcher() {
    use fragma::token::any_in;
    let digits = any_in('0', '9').repeat::<4, char>();
    assert!(digits.consume::<Vec<char>>("4525").unwrap().is_success());
    assert!(!digits.consume::<Vec<char>>("452").unwrap().is_success());
}
