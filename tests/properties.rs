//! Property-based tests for the invariants every matcher must satisfy,
//! independent of which concrete matcher is under test.

use proptest::prelude::*;

use fragma::combinator::unary::{Optional, Plus, Star};
use fragma::fragment::fragment;
use fragma::token::{any_in, char_, constant, AnyIn};
use fragma::view::StringView;
use fragma::Matcher;

fn digit_string() -> impl Strategy<Value = String> {
    "[0-9]{0,8}"
}

fn mixed_string() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,12}"
}

proptest! {
    /// Prefix agreement: whatever `consume` reports as its matched prefix,
    /// `match_input` must accept that exact prefix standalone.
    #[test]
    fn prefix_agreement_for_digit_runs(s in mixed_string()) {
        let m = AnyIn::new('0', '9');
        let v = StringView::from(s.as_str());
        let piece = m.consume(&v).unwrap();
        if let Some(value) = piece.value {
            let prefix = v.substr_len(0, piece.length as usize);
            prop_assert_eq!(m.match_input(&prefix).unwrap(), Some(value));
        }
    }

    /// Monotonicity: `consume` never reports more bytes than the input has.
    #[test]
    fn consume_never_overruns_the_input(s in mixed_string()) {
        let m = AnyIn::new('0', '9');
        let v = StringView::from(s.as_str());
        let piece = m.consume(&v).unwrap();
        prop_assert!((piece.length as usize) <= v.size());
    }

    /// Skip transparency: a skip that always reports zero-length leaves
    /// results identical to having no skip at all.
    #[test]
    fn a_no_op_skip_does_not_change_results(s in digit_string()) {
        let v = StringView::from(s.as_str());

        let f = fragment::<i64>();
        f.handle(|n: i64| n, (fragma::token::integer().0,));
        let without_skip = f.match_input::<i64>(v.clone()).unwrap();

        let g = fragment::<i64>();
        g.handle(|n: i64| n, (fragma::token::integer().0,));
        g.skip(constant("").0);
        let with_skip = g.match_input::<i64>(v).unwrap();

        prop_assert_eq!(without_skip, with_skip);
    }
}

#[test]
fn optional_succeeds_on_empty_input() {
    let m = Optional::new(char_('x').0);
    let piece = m.consume(&StringView::from("")).unwrap();
    assert!(piece.is_success());
}

#[test]
fn star_succeeds_on_empty_input() {
    let m = Star::new(any_in('0', '9').0);
    let piece = m.consume(&StringView::from("")).unwrap();
    assert!(piece.is_success());
}

#[test]
fn plus_fails_on_empty_input() {
    let m = Plus::new(any_in('0', '9').0);
    let piece = m.consume(&StringView::from("")).unwrap();
    assert!(!piece.is_success());
}

#[test]
fn left_recursion_terminates_within_input_length_passes() {
    // A pathological left-recursive grammar that grows by exactly one byte
    // per pass: the fixpoint must not loop past `|v|` passes, and in
    // particular must terminate at all (this test has an implicit timeout
    // via the test harness).
    let f = fragment::<i64>();
    f.handle(|_: char| 0i64, (char_('a').0,));
    f.handle_left_recursive(|seed: i64, _next: char| seed + 1, (char_('a').0,));
    let input = "a".repeat(64);
    assert_eq!(f.match_input::<i64>(input.as_str()).unwrap(), Some(63));
}

#[test]
fn weight_picks_the_highest_weighted_full_match_ties_broken_by_insertion_order() {
    let f = fragment::<i64>();
    f.handle_weighted(1, |_: String| 1i64, (constant("ab").0,));
    f.handle_weighted(1, |_: String| 2i64, (constant("ab").0,));
    f.handle_weighted(3, |_: String| 3i64, (constant("ab").0,));
    assert_eq!(f.match_input::<i64>("ab").unwrap(), Some(3));

    let g = fragment::<i64>();
    g.handle_weighted(2, |_: String| 10i64, (constant("ab").0,));
    g.handle_weighted(2, |_: String| 20i64, (constant("ab").0,));
    assert_eq!(g.match_input::<i64>("ab").unwrap(), Some(10));
}

#[test]
fn word_round_trips_with_constant() {
    let m = any_in('a', 'z').word::<char>();
    for s in ["hello", "x", "abcxyz"] {
        assert_eq!(m.match_input::<String>(s).unwrap().as_deref(), Some(s));
    }
    assert_eq!(m.match_input::<String>("hi9").unwrap(), None);
    assert_eq!(m.match_input::<String>("").unwrap(), None);
}
