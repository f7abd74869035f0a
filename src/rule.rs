//! Rule: an ordered list of matcher slots plus a bound semantic action.
//!
//! Rust has no variadic generics, so a rule's heterogeneous slot list can't
//! be one generic struct over "however many slots". Instead this module
//! generates one concrete struct per arity (`Rule1`..`Rule8` for ordinary
//! rules, `LrRule1`..`LrRule7` for the continuation of a left-recursive
//! rule) via `rule_arity!`/`lr_rule_arity!` below, each implementing the
//! shared [`RuleBody`]/[`LrRuleBody`] object-safe trait so a [`Fragment`]
//! can hold them behind `Box<dyn _>` regardless of arity.
//!
//! [`Fragment`]: crate::fragment::FragmentRef

use std::marker::PhantomData;

use crate::error::{EvalError, Outcome};
use crate::matcher::Matcher;
use crate::piece::Piece;
use crate::view::StringView;

/// One production of a fragment: slots resolved strictly left-to-right,
/// with no backtracking within the rule itself. Object-safe so a fragment
/// can hold a heterogeneous `Vec<Box<dyn RuleBody<T>>>`.
pub trait RuleBody<T> {
    /// `-1` is "first match wins"; any other value participates in
    /// highest-wins tie-breaking among full-input matches.
    fn weight(&self) -> i16;

    /// Resolves this rule's slots against `v`, applying `skips` at each
    /// slot boundary (and once more at the end iff `skip_at_end`).
    fn resolve(&self, skips: &[SkipMatcher], skip_at_end: bool, v: &StringView) -> Outcome<T>;
}

/// The continuation of a left-recursive rule: every slot after the
/// implicit leading self-reference. Fed the fragment's own seed value
/// (consumed length plus produced value) as the first argument to the
/// action.
pub trait LrRuleBody<T> {
    /// See [`RuleBody::weight`].
    fn weight(&self) -> i16;

    /// Resolves this rule's rest-slots against `v`, continuing from the
    /// position just after `seed_len` bytes (the seed's own consumed
    /// prefix), feeding `seed_value` to the action as its first argument.
    fn resolve_with_seed(
        &self,
        skips: &[SkipMatcher],
        skip_at_end: bool,
        v: &StringView,
        seed_len: u32,
        seed_value: T,
    ) -> Outcome<T>;
}

/// A type-erased matcher retained only for its consumed length: skip
/// recognizers may carry any value type, which the skip machinery never
/// inspects (skip bytes never appear in slot values).
pub struct SkipMatcher(Box<dyn Fn(&StringView) -> Result<u32, EvalError>>);

impl SkipMatcher {
    /// Wraps any matcher as a skip recognizer, erasing its value type.
    pub fn new<M, T>(matcher: M) -> Self
    where
        M: Matcher<T> + 'static,
        T: 'static,
    {
        SkipMatcher(Box::new(move |v: &StringView| Ok(matcher.consume(v)?.length)))
    }

    fn consume_len(&self, v: &StringView) -> Result<u32, EvalError> {
        (self.0)(v)
    }
}

/// `should_skip` applied repeatedly: drops the prefix matched by the first
/// skip recognizer that reports a nonzero length, and keeps going until
/// none do (dropping one skip's bytes can expose a position another skip,
/// or the same one again, also wants to drop).
pub(crate) fn apply_skips(skips: &[SkipMatcher], v: &StringView) -> Result<StringView, EvalError> {
    let mut cur = v.clone();
    loop {
        let mut dropped = 0u32;
        for skip in skips {
            let len = skip.consume_len(&cur)?;
            if len > 0 {
                cur = cur.substr(len as usize);
                dropped = len;
                break;
            }
        }
        if dropped == 0 {
            break;
        }
    }
    Ok(cur)
}

/// Converts a tuple of matchers plus an action into a concrete [`RuleBody`].
/// Implemented once per arity by `rule_arity!`.
pub trait IntoRule<TOut, F> {
    /// The concrete rule type this tuple/action pair produces.
    type Body: RuleBody<TOut> + 'static;

    /// Builds the rule, consuming the slots tuple and binding `action`.
    fn into_rule(self, action: F, weight: i16) -> Self::Body;
}

/// Converts a tuple of rest-slots plus an action into a concrete
/// [`LrRuleBody`]. Implemented once per rest-arity by `lr_rule_arity!`.
pub trait IntoLrRule<TOut, F> {
    /// The concrete rule type this tuple/action pair produces.
    type Body: LrRuleBody<TOut> + 'static;

    /// Builds the rule, consuming the rest-slots tuple and binding `action`.
    fn into_lr_rule(self, action: F, weight: i16) -> Self::Body;
}

macro_rules! rule_arity {
    ($rule:ident, [$($T:ident, $M:ident, $field:ident),+ $(,)?]) => {
        /// Generated ordinary-rule arity. See [`RuleBody`].
        pub struct $rule<$($T, $M,)+ TOut, F> {
            $($field: $M,)+
            action: F,
            weight: i16,
            _marker: PhantomData<fn($($T),+) -> TOut>,
        }

        impl<$($T, $M,)+ TOut, F> $rule<$($T, $M,)+ TOut, F> {
            /// Builds this rule from its slots, action, and weight directly.
            pub fn new($($field: $M,)+ action: F, weight: i16) -> Self {
                Self { $($field,)+ action, weight, _marker: PhantomData }
            }
        }

        impl<$($T, $M: Matcher<$T>,)+ TOut, F> RuleBody<TOut> for $rule<$($T, $M,)+ TOut, F>
        where
            F: Fn($($T),+) -> TOut,
        {
            fn weight(&self) -> i16 {
                self.weight
            }

            fn resolve(&self, skips: &[SkipMatcher], skip_at_end: bool, v: &StringView) -> Outcome<TOut> {
                let start = v.size();
                let mut cur = v.clone();
                $(
                    cur = apply_skips(skips, &cur)?;
                    let piece = self.$field.consume(&cur)?;
                    let $field = match piece.value {
                        Some(val) => val,
                        None => return Ok(Piece::fail()),
                    };
                    cur = cur.substr(piece.length as usize);
                )+
                if skip_at_end {
                    cur = apply_skips(skips, &cur)?;
                }
                let consumed = (start - cur.size()) as u32;
                Ok(Piece::success(consumed, (self.action)($($field),+)))
            }
        }

        impl<$($T: 'static, $M: Matcher<$T> + 'static,)+ TOut: 'static, F> IntoRule<TOut, F>
            for ($($M,)+)
        where
            F: Fn($($T),+) -> TOut + 'static,
        {
            type Body = $rule<$($T, $M,)+ TOut, F>;

            fn into_rule(self, action: F, weight: i16) -> Self::Body {
                let ($($field,)+) = self;
                $rule::new($($field,)+ action, weight)
            }
        }
    };
}

rule_arity!(Rule1, [T1, M1, slot1]);
rule_arity!(Rule2, [T1, M1, slot1, T2, M2, slot2]);
rule_arity!(Rule3, [T1, M1, slot1, T2, M2, slot2, T3, M3, slot3]);
rule_arity!(Rule4, [T1, M1, slot1, T2, M2, slot2, T3, M3, slot3, T4, M4, slot4]);
rule_arity!(
    Rule5,
    [T1, M1, slot1, T2, M2, slot2, T3, M3, slot3, T4, M4, slot4, T5, M5, slot5]
);
rule_arity!(
    Rule6,
    [
        T1, M1, slot1, T2, M2, slot2, T3, M3, slot3, T4, M4, slot4, T5, M5, slot5, T6, M6, slot6
    ]
);
rule_arity!(
    Rule7,
    [
        T1, M1, slot1, T2, M2, slot2, T3, M3, slot3, T4, M4, slot4, T5, M5, slot5, T6, M6, slot6,
        T7, M7, slot7
    ]
);
rule_arity!(
    Rule8,
    [
        T1, M1, slot1, T2, M2, slot2, T3, M3, slot3, T4, M4, slot4, T5, M5, slot5, T6, M6, slot6,
        T7, M7, slot7, T8, M8, slot8
    ]
);

macro_rules! lr_rule_arity {
    ($rule:ident, [$($T:ident, $M:ident, $field:ident),+ $(,)?]) => {
        /// Generated left-recursive-continuation arity. See [`LrRuleBody`].
        pub struct $rule<$($T, $M,)+ TOut, F> {
            $($field: $M,)+
            action: F,
            weight: i16,
            _marker: PhantomData<fn(TOut, $($T),+) -> TOut>,
        }

        impl<$($T, $M,)+ TOut, F> $rule<$($T, $M,)+ TOut, F> {
            /// Builds this left-recursive continuation from its rest-slots,
            /// action, and weight directly.
            pub fn new($($field: $M,)+ action: F, weight: i16) -> Self {
                Self { $($field,)+ action, weight, _marker: PhantomData }
            }
        }

        impl<$($T, $M: Matcher<$T>,)+ TOut, F> LrRuleBody<TOut> for $rule<$($T, $M,)+ TOut, F>
        where
            F: Fn(TOut, $($T),+) -> TOut,
        {
            fn weight(&self) -> i16 {
                self.weight
            }

            fn resolve_with_seed(
                &self,
                skips: &[SkipMatcher],
                skip_at_end: bool,
                v: &StringView,
                seed_len: u32,
                seed_value: TOut,
            ) -> Outcome<TOut> {
                let start = v.size();
                let mut cur = v.substr(seed_len as usize);
                $(
                    cur = apply_skips(skips, &cur)?;
                    let piece = self.$field.consume(&cur)?;
                    let $field = match piece.value {
                        Some(val) => val,
                        None => return Ok(Piece::fail()),
                    };
                    cur = cur.substr(piece.length as usize);
                )+
                if skip_at_end {
                    cur = apply_skips(skips, &cur)?;
                }
                let consumed = (start - cur.size()) as u32;
                Ok(Piece::success(consumed, (self.action)(seed_value, $($field),+)))
            }
        }

        impl<$($T: 'static, $M: Matcher<$T> + 'static,)+ TOut: 'static, F> IntoLrRule<TOut, F>
            for ($($M,)+)
        where
            F: Fn(TOut, $($T),+) -> TOut + 'static,
        {
            type Body = $rule<$($T, $M,)+ TOut, F>;

            fn into_lr_rule(self, action: F, weight: i16) -> Self::Body {
                let ($($field,)+) = self;
                $rule::new($($field,)+ action, weight)
            }
        }
    };
}

lr_rule_arity!(LrRule1, [T1, M1, slot1]);
lr_rule_arity!(LrRule2, [T1, M1, slot1, T2, M2, slot2]);
lr_rule_arity!(LrRule3, [T1, M1, slot1, T2, M2, slot2, T3, M3, slot3]);
lr_rule_arity!(
    LrRule4,
    [T1, M1, slot1, T2, M2, slot2, T3, M3, slot3, T4, M4, slot4]
);
lr_rule_arity!(
    LrRule5,
    [T1, M1, slot1, T2, M2, slot2, T3, M3, slot3, T4, M4, slot4, T5, M5, slot5]
);
lr_rule_arity!(
    LrRule6,
    [
        T1, M1, slot1, T2, M2, slot2, T3, M3, slot3, T4, M4, slot4, T5, M5, slot5, T6, M6, slot6
    ]
);
lr_rule_arity!(
    LrRule7,
    [
        T1, M1, slot1, T2, M2, slot2, T3, M3, slot3, T4, M4, slot4, T5, M5, slot5, T6, M6, slot6,
        T7, M7, slot7
    ]
);

/// Converts a tuple of alternative matchers into one `Rule1` per
/// alternative, each projecting its slot's value into `T` via [`Into`].
/// Backs [`crate::fragment::select`].
pub trait IntoSelectRules<T> {
    /// One single-slot rule per alternative, in the order given.
    fn into_select_rules(self) -> Vec<Box<dyn RuleBody<T>>>;
}

macro_rules! select_arity {
    ([$($M:ident, $T:ident, $field:ident),+ $(,)?]) => {
        impl<T: 'static, $($T: Into<T> + 'static, $M: Matcher<$T> + 'static,)+> IntoSelectRules<T>
            for ($($M,)+)
        {
            fn into_select_rules(self) -> Vec<Box<dyn RuleBody<T>>> {
                let ($($field,)+) = self;
                vec![$(
                    Box::new(Rule1::new($field, (|v: $T| -> T { v.into() }) as fn($T) -> T, -1))
                        as Box<dyn RuleBody<T>>,
                )+]
            }
        }
    };
}

select_arity!([M1, T1, slot1]);
select_arity!([M1, T1, slot1, M2, T2, slot2]);
select_arity!([M1, T1, slot1, M2, T2, slot2, M3, T3, slot3]);
select_arity!([M1, T1, slot1, M2, T2, slot2, M3, T3, slot3, M4, T4, slot4]);
select_arity!([M1, T1, slot1, M2, T2, slot2, M3, T3, slot3, M4, T4, slot4, M5, T5, slot5]);
select_arity!(
    [M1, T1, slot1, M2, T2, slot2, M3, T3, slot3, M4, T4, slot4, M5, T5, slot5, M6, T6, slot6]
);
select_arity!(
    [
        M1, T1, slot1, M2, T2, slot2, M3, T3, slot3, M4, T4, slot4, M5, T5, slot5, M6, T6, slot6,
        M7, T7, slot7
    ]
);
select_arity!(
    [
        M1, T1, slot1, M2, T2, slot2, M3, T3, slot3, M4, T4, slot4, M5, T5, slot5, M6, T6, slot6,
        M7, T7, slot7, M8, T8, slot8
    ]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Char, Integer};

    #[test]
    fn rule2_resolves_left_to_right_with_no_skips() {
        let rule = Rule2::new(Integer::new(), Char::new('+'), |a: i64, _b: char| a, -1);
        let piece = rule.resolve(&[], false, &StringView::from("12+")).unwrap();
        assert_eq!(piece.length, 3);
        assert_eq!(piece.value, Some(12));
    }

    #[test]
    fn rule_fails_when_a_slot_fails() {
        let rule = Rule2::new(Integer::new(), Char::new('+'), |a: i64, _b: char| a, -1);
        let piece = rule.resolve(&[], false, &StringView::from("12-")).unwrap();
        assert!(!piece.is_success());
    }

    #[test]
    fn skips_drop_between_slots() {
        let skips = vec![SkipMatcher::new(Char::new(' '))];
        let rule = Rule2::new(Integer::new(), Char::new('+'), |a: i64, _b: char| a, -1);
        let piece = rule.resolve(&skips, false, &StringView::from("12 +")).unwrap();
        assert_eq!(piece.length, 4);
        assert_eq!(piece.value, Some(12));
    }

    #[test]
    fn lr_rule_continues_from_the_seed() {
        // S -> S '+' int, seeded with a prior match of "1" (value 1, length 1).
        let rule = LrRule2::new(Char::new('+'), Integer::new(), |a: i64, _p: char, b: i64| a + b, -1);
        let piece = rule
            .resolve_with_seed(&[], false, &StringView::from("1+2"), 1, 1i64)
            .unwrap();
        assert_eq!(piece.length, 3);
        assert_eq!(piece.value, Some(3));
    }
}
