//! Fragment: a named non-terminal, its rule set, skip policy, and the
//! seeded-growth fixpoint that resolves left recursion.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{EvalError, Outcome};
use crate::expr::Expr;
use crate::matcher::Matcher;
use crate::piece::Piece;
use crate::rule::{IntoLrRule, IntoRule, IntoSelectRules, LrRuleBody, RuleBody, SkipMatcher};
use crate::view::StringView;
use crate::yielder::Yielder;

/// One candidate full- or partial-match produced during evaluation, paired
/// with the weight of the rule that produced it (used to break ties among
/// full-input matches, see [`Matcher::match_input`] below).
struct Candidate<T> {
    piece: Piece<T>,
    weight: i16,
}

struct FragmentInner<T> {
    non_lr_rules: Vec<Box<dyn RuleBody<T>>>,
    lr_rules: Vec<Box<dyn LrRuleBody<T>>>,
    skips: Vec<SkipMatcher>,
    skip_at_end: bool,
}

impl<T> FragmentInner<T> {
    fn new() -> Self {
        Self {
            non_lr_rules: Vec::new(),
            lr_rules: Vec::new(),
            skips: Vec::new(),
            skip_at_end: false,
        }
    }
}

/// A named non-terminal: an ordered set of rules sharing a result type `T`
/// and a skip policy.
///
/// Cloning a `FragmentRef` is cheap and aliases the same rule set — this is
/// exactly the back-reference a left-recursive rule holds to the fragment
/// that owns it: a cloned `Rc`, not a `Weak` upgrade, since nothing ever
/// needs to observe the fragment's own deallocation from inside itself
/// (see DESIGN.md).
pub struct FragmentRef<T> {
    inner: Rc<RefCell<FragmentInner<T>>>,
}

impl<T> Clone for FragmentRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for FragmentRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentRef")
            .field("ptr", &Rc::as_ptr(&self.inner))
            .finish()
    }
}

impl<T: Clone> FragmentRef<T> {
    /// Runs the seeded-growth fixpoint once, returning every candidate
    /// produced (one per successful rule/seed combination) in discovery
    /// order, each paired with its producing rule's weight.
    fn evaluate(&self, v: &StringView) -> Result<Vec<Candidate<T>>, EvalError> {
        let inner = self.inner.borrow();
        let mut pool: Yielder<Candidate<T>> = Yielder::new();

        for rule in &inner.non_lr_rules {
            let piece = rule.resolve(&inner.skips, inner.skip_at_end, v)?;
            if piece.value.is_some() {
                pool.push(Candidate {
                    piece,
                    weight: rule.weight(),
                });
            }
        }

        if !inner.lr_rules.is_empty() {
            let mut cursors: Vec<_> = inner.lr_rules.iter().map(|_| pool.cursor()).collect();
            loop {
                let mut grew = false;
                for (rule, cursor) in inner.lr_rules.iter().zip(cursors.iter_mut()) {
                    // Collect seeds into an owned buffer first: `drain`
                    // borrows `pool` immutably, and growing the pool
                    // requires a mutable borrow for each seed in turn.
                    let seeds: Vec<(u32, T)> = cursor
                        .drain(&pool)
                        .iter()
                        .filter_map(|c| c.piece.value.clone().map(|val| (c.piece.length, val)))
                        .collect();
                    for (seed_len, seed_value) in seeds {
                        let piece = rule.resolve_with_seed(
                            &inner.skips,
                            inner.skip_at_end,
                            v,
                            seed_len,
                            seed_value,
                        )?;
                        if piece.value.is_some() {
                            pool.push(Candidate {
                                piece,
                                weight: rule.weight(),
                            });
                            grew = true;
                        }
                    }
                }
                if !grew {
                    break;
                }
            }
        }

        Ok(pool.into_vec())
    }
}

impl<T: Clone> Matcher<T> for FragmentRef<T> {
    /// Picks the candidate with the maximum consumed length; ties keep the
    /// earliest-discovered (first non-LR rule in insertion order, or the
    /// first seed/LR-rule combination the fixpoint produced).
    fn consume(&self, input: &StringView) -> Outcome<T> {
        let pool = self.evaluate(input)?;
        let mut best: Option<&Candidate<T>> = None;
        for candidate in &pool {
            best = match best {
                Some(b) if candidate.piece.length <= b.piece.length => best,
                _ => Some(candidate),
            };
        }
        Ok(best
            .map(|c| Piece::success(c.piece.length, c.piece.value.clone().unwrap()))
            .unwrap_or_else(Piece::fail))
    }

    /// Overridden rather than relying on the trait's `consume`-derived
    /// default: full-match resolution has to pick among every candidate
    /// that happens to cover the whole input and break ties by weight,
    /// which a single `consume` call can't answer once weights matter.
    fn match_input(&self, input: &StringView) -> Result<Option<T>, EvalError> {
        let target = input.size() as u32;
        let pool = self.evaluate(input)?;
        let mut best: Option<&Candidate<T>> = None;
        for candidate in &pool {
            if candidate.piece.length != target {
                continue;
            }
            best = match best {
                Some(b) if candidate.weight > b.weight => Some(candidate),
                Some(b) => Some(b),
                None => Some(candidate),
            };
        }
        Ok(best.map(|c| c.piece.value.clone().unwrap()))
    }

    fn self_ptr(&self) -> Option<*const ()> {
        Some(Rc::as_ptr(&self.inner) as *const ())
    }
}

impl<T: Clone> FragmentRef<T> {
    /// The full candidate pool the fixpoint produced for `input`, exposed
    /// for callers that want more than the single `consume`/`match_input`
    /// winner.
    pub fn request(&self, input: &StringView) -> Result<Vec<Piece<T>>, EvalError> {
        Ok(self
            .evaluate(input)?
            .into_iter()
            .map(|c| c.piece)
            .collect())
    }
}

/// Constructs a fresh, empty fragment of result type `T`. Rules are then
/// attached with [`Expr::handle`]/[`Expr::handle_left_recursive`].
pub fn fragment<T: Clone + 'static>() -> Expr<FragmentRef<T>> {
    Expr::new(FragmentRef {
        inner: Rc::new(RefCell::new(FragmentInner::new())),
    })
}

/// Builds a fragment whose rules each project one alternative matcher's
/// value into `T` via [`Into`] — the Rust stand-in for the original's
/// `Tᵢ ≤ T` subtyping requirement.
pub fn select<T, Slots>(slots: Slots) -> Expr<FragmentRef<T>>
where
    T: Clone + 'static,
    Slots: IntoSelectRules<T>,
{
    let frag = fragment::<T>();
    frag.0
        .inner
        .borrow_mut()
        .non_lr_rules
        .extend(slots.into_select_rules());
    frag
}

impl<T: Clone + 'static> Expr<FragmentRef<T>> {
    /// Attaches an ordinary (non-left-recursive) rule with the default
    /// "first match wins" weight.
    pub fn handle<Slots, F>(&self, action: F, slots: Slots) -> &Self
    where
        Slots: IntoRule<T, F>,
        F: 'static,
    {
        self.handle_weighted(-1, action, slots)
    }

    /// As [`Expr::handle`], with an explicit weight used to break ties
    /// among full-input matches.
    pub fn handle_weighted<Slots, F>(&self, weight: i16, action: F, slots: Slots) -> &Self
    where
        Slots: IntoRule<T, F>,
        F: 'static,
    {
        let rule = slots.into_rule(action, weight);
        self.0.inner.borrow_mut().non_lr_rules.push(Box::new(rule));
        self
    }

    /// Attaches a left-recursive rule: `rest_slots` covers everything after
    /// the implicit leading self-reference, and `action`'s first parameter
    /// receives the fragment's own seed value.
    pub fn handle_left_recursive<Slots, F>(&self, action: F, rest_slots: Slots) -> &Self
    where
        Slots: IntoLrRule<T, F>,
        F: 'static,
    {
        self.handle_left_recursive_weighted(-1, action, rest_slots)
    }

    /// As [`Expr::handle_left_recursive`], with an explicit weight.
    pub fn handle_left_recursive_weighted<Slots, F>(
        &self,
        weight: i16,
        action: F,
        rest_slots: Slots,
    ) -> &Self
    where
        Slots: IntoLrRule<T, F>,
        F: 'static,
    {
        let rule = rest_slots.into_lr_rule(action, weight);
        self.0.inner.borrow_mut().lr_rules.push(Box::new(rule));
        self
    }

    /// Appends one matcher to this fragment's skip set. Call repeatedly to
    /// register several skip recognizers (the original's variadic
    /// `skip(m1, .., mk)` has no direct Rust equivalent; chaining plain
    /// builder calls is the idiomatic substitute, see DESIGN.md).
    pub fn skip<M, U>(&self, matcher: M) -> &Self
    where
        M: Matcher<U> + 'static,
        U: 'static,
    {
        self.0.inner.borrow_mut().skips.push(SkipMatcher::new(matcher));
        self
    }

    /// Sets whether skips are also drained once after the final slot.
    pub fn skip_at_end(&self, enabled: bool) -> &Self {
        self.0.inner.borrow_mut().skip_at_end = enabled;
        self
    }

    /// Every candidate the seeded-growth fixpoint produced for `input`,
    /// the `request` entry point from the external interface — `consume`
    /// and `match_input` (inherited generically from [`Expr`]) each pick a
    /// single winner out of the same pool.
    pub fn request(&self, input: impl Into<StringView>) -> Result<Vec<Piece<T>>, EvalError> {
        self.0.request(&input.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{char_, constant, integer};

    #[test]
    fn consume_picks_the_longest_candidate() {
        let f = fragment::<i64>();
        f.handle(|n: i64| n, (integer().0,));
        let piece = f.0.consume(&StringView::from("123abc")).unwrap();
        assert_eq!(piece.length, 3);
        assert_eq!(piece.value, Some(123));
    }

    #[test]
    fn match_input_requires_covering_the_whole_input() {
        let f = fragment::<i64>();
        f.handle(|n: i64| n, (integer().0,));
        assert_eq!(f.match_input::<i64>("123").unwrap(), Some(123));
        assert_eq!(f.match_input::<i64>("123abc").unwrap(), None);
    }

    #[test]
    fn weight_breaks_ties_among_full_matches() {
        let f = fragment::<String>();
        f.handle(|s: String| s, (constant("ab").0,));
        f.handle_weighted(5, |s: String| s.to_uppercase(), (constant("ab").0,));
        assert_eq!(f.match_input::<String>("ab").unwrap().as_deref(), Some("AB"));
    }

    #[test]
    fn skip_is_applied_between_slots_and_at_the_end_only_when_enabled() {
        let f = fragment::<i64>();
        f.handle(|a: i64, _op: char, b: i64| a + b, (integer().0, char_('+').0, integer().0));
        f.skip(char_(' ').0);
        assert_eq!(f.match_input::<i64>("1 + 2").unwrap(), Some(3));
        assert_eq!(f.match_input::<i64>("1 + 2 ").unwrap(), None);
        f.skip_at_end(true);
        assert_eq!(f.match_input::<i64>("1 + 2 ").unwrap(), Some(3));
    }

    #[test]
    fn left_recursion_grows_from_non_left_recursive_seeds() {
        let t = fragment::<String>();
        t.handle(|_: String| "int".to_owned(), (constant("int").0,));
        t.handle_left_recursive(|base: String, _pct: char| base, (char_('%').0,));
        t.handle_left_recursive(|base: String, _bang: char| base, (char_('!').0,));
        assert!(t.match_input::<String>("int%!%%").unwrap().is_some());
        assert_eq!(t.match_input::<String>("%int").unwrap(), None);
    }

    #[test]
    fn request_exposes_the_full_candidate_pool() {
        let f = fragment::<i64>();
        f.handle(|n: i64| n, (integer().0,));
        let pieces = f.request("123abc").unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].length, 3);
    }
}
