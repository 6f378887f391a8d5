//! The rule schema: tests, half-rules, rules, and registration options.
//!
//! A [`Rule`] is one or two [`HalfRule`]s; each half-rule is an ordered
//! AND-conjunction of [`Test`]s applied to a single hand. Rules are plain
//! data — any shape can be constructed, including invalid ones — and the
//! engine's registration step is the single validation gate.
//!
//! ```rust
//! use gesture_rules::{Rule, HalfRule, Test};
//!
//! // "One hand showing a peace sign, fingers apart."
//! let rule = Rule::one_hand(HalfRule::new(vec![
//!     Test::new("peace", |v| v.as_bool() == Some(true)),
//!     Test::new("all_fingers_spread", |v| v.as_bool() == Some(true)),
//! ]));
//! assert_eq!(rule.halves.len(), 1);
//! ```

use crate::features::{FeatureArg, FeatureValue};

// ════════════════════════════════════════════════════════════════════════════
// Test
// ════════════════════════════════════════════════════════════════════════════

/// Boolean predicate over a feature value. Must be total: every value in,
/// a plain `true`/`false` out.
pub type Validator = Box<dyn Fn(&FeatureValue) -> bool>;

/// One measurement-and-check: resolve `method` in the feature table for
/// the target hand, pass `args`, hand the result to `validator`.
pub struct Test {
    pub method:    String,
    pub args:      Vec<FeatureArg>,
    pub validator: Validator,
}

impl Test {
    /// A test with no declared arguments.
    pub fn new<V>(method: &str, validator: V) -> Self
    where
        V: Fn(&FeatureValue) -> bool + 'static,
    {
        Test {
            method:    method.to_string(),
            args:      Vec::new(),
            validator: Box::new(validator),
        }
    }

    /// A test with declared arguments (checked against the feature's
    /// signature at registration).
    pub fn with_args<V>(method: &str, args: Vec<FeatureArg>, validator: V) -> Self
    where
        V: Fn(&FeatureValue) -> bool + 'static,
    {
        Test {
            method: method.to_string(),
            args,
            validator: Box::new(validator),
        }
    }
}

impl std::fmt::Debug for Test {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Test")
            .field("method", &self.method)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HalfRule / Rule
// ════════════════════════════════════════════════════════════════════════════

/// Ordered AND-conjunction of tests against one hand. Declaration order is
/// evaluation order; the first failing test short-circuits the rest.
#[derive(Debug)]
pub struct HalfRule {
    pub tests: Vec<Test>,
}

impl HalfRule {
    pub fn new(tests: Vec<Test>) -> Self {
        HalfRule { tests }
    }

    /// Convenience for the common one-test half-rule.
    pub fn single(test: Test) -> Self {
        HalfRule { tests: vec![test] }
    }
}

/// One or two half-rules: a single-hand gesture, or a two-hand gesture
/// where half 0 is tested against reported hand slot 0 and half 1 against
/// slot 1.
///
/// Shape is validated at registration, not construction, so malformed
/// rules can exist long enough to be rejected.
#[derive(Debug)]
pub struct Rule {
    pub halves: Vec<HalfRule>,
}

impl Rule {
    /// A rule from an arbitrary list of half-rules.
    pub fn from_halves(halves: Vec<HalfRule>) -> Self {
        Rule { halves }
    }

    /// A single-hand rule.
    pub fn one_hand(half: HalfRule) -> Self {
        Rule { halves: vec![half] }
    }

    /// A two-hand rule; `first` tests reported slot 0, `second` slot 1.
    pub fn two_hands(first: HalfRule, second: HalfRule) -> Self {
        Rule { halves: vec![first, second] }
    }

    /// Number of hands this rule needs present to possibly match.
    pub fn hands_required(&self) -> usize {
        self.halves.len()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RuleOptions
// ════════════════════════════════════════════════════════════════════════════

/// Per-rule registration options.
///
/// Defaults match the reference trigger: blocking, ambidextrous, no
/// no-match callback, positional name assigned by the engine.
pub struct RuleOptions {
    /// Display name; defaults to `"rule #<index>"` when `None`.
    pub name: Option<String>,
    /// A match suppresses evaluation of later-registered rule sets this
    /// tick.
    pub blocking: bool,
    /// A single-hand rule may match against either reported hand when two
    /// are present.
    pub ambidextrous_mono: bool,
    /// Invoked when this rule set is evaluated and does not match.
    pub on_no_match: Option<Box<dyn FnMut()>>,
}

impl Default for RuleOptions {
    fn default() -> Self {
        RuleOptions {
            name:              None,
            blocking:          true,
            ambidextrous_mono: true,
            on_no_match:       None,
        }
    }
}

impl RuleOptions {
    pub fn named(name: &str) -> Self {
        RuleOptions { name: Some(name.to_string()), ..Default::default() }
    }

    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    pub fn ambidextrous_mono(mut self, ambidextrous: bool) -> Self {
        self.ambidextrous_mono = ambidextrous;
        self
    }

    pub fn on_no_match<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_no_match = Some(Box::new(f));
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hand_rule_shape() {
        let rule = Rule::one_hand(HalfRule::single(Test::new("fist", |v| {
            v.as_bool() == Some(true)
        })));
        assert_eq!(rule.hands_required(), 1);
        assert_eq!(rule.halves[0].tests.len(), 1);
    }

    #[test]
    fn two_hand_rule_shape() {
        let rule = Rule::two_hands(
            HalfRule::single(Test::new("fist", |v| v.as_bool() == Some(true))),
            HalfRule::single(Test::new("open_palm", |v| v.as_bool() == Some(true))),
        );
        assert_eq!(rule.hands_required(), 2);
    }

    #[test]
    fn options_defaults_match_reference() {
        let opts = RuleOptions::default();
        assert!(opts.blocking);
        assert!(opts.ambidextrous_mono);
        assert!(opts.name.is_none());
        assert!(opts.on_no_match.is_none());
    }

    #[test]
    fn options_builder_overrides() {
        let opts = RuleOptions::named("swipe")
            .blocking(false)
            .ambidextrous_mono(false);
        assert_eq!(opts.name.as_deref(), Some("swipe"));
        assert!(!opts.blocking);
        assert!(!opts.ambidextrous_mono);
    }
}
