//! The rule engine: registration, per-frame evaluation, and dispatch.
//!
//! A [`GestureEngine`] owns an ordered list of registered rule sets plus
//! two global hooks. The host's acquisition loop calls
//! [`GestureEngine::process_frame`] once per delivered frame; the engine
//! evaluates rule sets in registration order (registration order *is*
//! priority), fires callbacks synchronously, and carries no state across
//! ticks beyond the rule list and hooks themselves.
//!
//! ## Per-tick flow
//!
//! | Step | Condition | Effect |
//! |---|---|---|
//! | 1 | always | `every_frame` hook fires |
//! | 2 | frame invalid | stop — no rules, no `nothing` |
//! | 3 | no valid hands | `nothing` hook fires, stop |
//! | 4 | otherwise | rule sets run in order; a blocking match ends the pass |
//! | 5 | nothing matched | `nothing` hook fires |

use hand_frame::{Frame, FrameHistory, Hand, HandSide};
use tracing::{debug, warn};

use crate::error::{RegistrationError, TickError};
use crate::features::{FeatureCtx, FeatureTable};
use crate::rule::{HalfRule, Rule, RuleOptions};

// ════════════════════════════════════════════════════════════════════════════
// Callbacks and hooks
// ════════════════════════════════════════════════════════════════════════════

/// Success callback: receives the matched hand(s). One element when the
/// frame reported one hand; two elements canonicalized `[left, right]`
/// when it reported two.
pub type MatchCallback = Box<dyn FnMut(&[&Hand])>;

/// Zero-argument hook (`nothing`, `every_frame`, per-rule no-match).
pub type HookCallback = Box<dyn FnMut()>;

/// The two fixed global events an engine exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// No valid hands this tick, or no rule set matched.
    Nothing,
    /// Every delivered frame, valid or not.
    EveryFrame,
}

#[derive(Default)]
struct EventHooks {
    nothing:     Option<HookCallback>,
    every_frame: Option<HookCallback>,
}

// ════════════════════════════════════════════════════════════════════════════
// RuleSet
// ════════════════════════════════════════════════════════════════════════════

/// A validated rule plus its callbacks and options. Created by
/// registration, immutable thereafter, evaluated every tick in
/// registration order.
struct RuleSet {
    rule:              Rule,
    on_match:          MatchCallback,
    on_no_match:       Option<HookCallback>,
    name:              String,
    blocking:          bool,
    ambidextrous_mono: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// TickSummary
// ════════════════════════════════════════════════════════════════════════════

/// What one call to [`GestureEngine::process_frame`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickSummary {
    pub frame_valid: bool,
    pub hand_count:  usize,
    /// Names of the rule sets that matched, in evaluation order.
    pub matched:     Vec<String>,
}

impl TickSummary {
    fn empty(frame_valid: bool, hand_count: usize) -> Self {
        TickSummary { frame_valid, hand_count, matched: Vec::new() }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureEngine
// ════════════════════════════════════════════════════════════════════════════

/// Per-frame gesture classifier over prioritized rule sets.
pub struct GestureEngine {
    features:   FeatureTable,
    rule_sets:  Vec<RuleSet>,
    events:     EventHooks,
    hand_count: usize,
}

impl Default for GestureEngine {
    fn default() -> Self {
        GestureEngine::new()
    }
}

impl GestureEngine {
    /// Engine over the standard feature table.
    pub fn new() -> Self {
        GestureEngine::with_features(FeatureTable::standard())
    }

    /// Engine over a custom (e.g. extended) feature table.
    pub fn with_features(features: FeatureTable) -> Self {
        GestureEngine {
            features,
            rule_sets:  Vec::new(),
            events:     EventHooks::default(),
            hand_count: 0,
        }
    }

    // ── registration ─────────────────────────────────────────────────────

    /// Register a rule with default options (blocking, ambidextrous,
    /// positional name). See [`GestureEngine::add_rule_with`].
    pub fn add_rule<F>(&mut self, rule: Rule, on_match: F) -> Result<(), RegistrationError>
    where
        F: FnMut(&[&Hand]) + 'static,
    {
        self.add_rule_with(rule, on_match, RuleOptions::default())
    }

    /// Register a rule. Validation is all-or-nothing: structural checks
    /// (one or two non-empty half-rules) and per-test checks (method
    /// resolves in the feature table, arguments fit its signature) all
    /// pass, or the registration is rejected with a diagnostic and the
    /// engine is left unchanged.
    pub fn add_rule_with<F>(
        &mut self,
        rule: Rule,
        on_match: F,
        options: RuleOptions,
    ) -> Result<(), RegistrationError>
    where
        F: FnMut(&[&Hand]) + 'static,
    {
        if let Err(err) = self.validate_rule(&rule) {
            let label = options.name.as_deref().unwrap_or("<unnamed>");
            warn!(rule = label, "rule registration rejected: {}", err);
            return Err(err);
        }

        let name = options
            .name
            .unwrap_or_else(|| format!("rule #{}", self.rule_sets.len()));
        self.rule_sets.push(RuleSet {
            rule,
            on_match:          Box::new(on_match),
            on_no_match:       options.on_no_match,
            name,
            blocking:          options.blocking,
            ambidextrous_mono: options.ambidextrous_mono,
        });
        Ok(())
    }

    fn validate_rule(&self, rule: &Rule) -> Result<(), RegistrationError> {
        if rule.halves.is_empty() {
            return Err(RegistrationError::NoHalves);
        }
        if rule.halves.len() > 2 {
            return Err(RegistrationError::TooManyHalves { given: rule.halves.len() });
        }
        for (index, half) in rule.halves.iter().enumerate() {
            if half.tests.is_empty() {
                return Err(RegistrationError::EmptyHalfRule { index });
            }
            for test in &half.tests {
                self.features.check_args(&test.method, &test.args)?;
            }
        }
        Ok(())
    }

    /// Install (or replace) a global event hook.
    pub fn on<F>(&mut self, event: EngineEvent, callback: F)
    where
        F: FnMut() + 'static,
    {
        let slot = match event {
            EngineEvent::Nothing    => &mut self.events.nothing,
            EngineEvent::EveryFrame => &mut self.events.every_frame,
        };
        *slot = Some(Box::new(callback));
    }

    // ── accessors ────────────────────────────────────────────────────────

    /// Number of registered rule sets.
    pub fn rule_count(&self) -> usize {
        self.rule_sets.len()
    }

    /// Registered rule names in priority order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rule_sets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Valid-hand count recorded by the most recent tick.
    pub fn hand_count(&self) -> usize {
        self.hand_count
    }

    /// The feature table rules are validated against.
    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    // ── per-frame evaluation ─────────────────────────────────────────────

    /// Evaluate one delivered frame: fire hooks, run every applicable
    /// rule set in registration order, dispatch callbacks.
    ///
    /// `history` backs the look-back features; pass `&()` when no rule
    /// uses them. The frame is only borrowed for the duration of the
    /// call — the engine retains nothing but the hand count.
    pub fn process_frame(
        &mut self,
        frame: &Frame,
        history: &dyn FrameHistory,
    ) -> Result<TickSummary, TickError> {
        self.hand_count = 0;

        if let Some(cb) = self.events.every_frame.as_mut() {
            cb();
        }

        if !frame.valid {
            debug!(frame = frame.id, "invalid frame, skipping evaluation");
            return Ok(TickSummary::empty(false, 0));
        }

        self.hand_count = frame.valid_hand_count();
        if self.hand_count == 0 {
            if let Some(cb) = self.events.nothing.as_mut() {
                cb();
            }
            return Ok(TickSummary::empty(true, 0));
        }

        let ctx = FeatureCtx::new(history);
        let hand_count = self.hand_count;
        let mut matched = Vec::new();

        for set in &mut self.rule_sets {
            let applies = run_rule(
                &self.features,
                &ctx,
                frame,
                hand_count,
                &set.rule,
                set.ambidextrous_mono,
            )?;

            if applies {
                let hands = canonical_hands(frame);
                (set.on_match)(&hands);
                debug!(rule = %set.name, frame = frame.id, "rule matched");
                matched.push(set.name.clone());
                if set.blocking {
                    break;
                }
            } else if let Some(cb) = set.on_no_match.as_mut() {
                cb();
            }
        }

        if matched.is_empty() {
            if let Some(cb) = self.events.nothing.as_mut() {
                cb();
            }
        }

        Ok(TickSummary { frame_valid: true, hand_count, matched })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Evaluation internals
// ════════════════════════════════════════════════════════════════════════════

/// Does one rule apply to the current frame?
///
/// Two-hand rules test half 0 against reported slot 0 and half 1 against
/// slot 1 — positional, never sorted by side. Single-hand rules test
/// slot 0, plus slot 1 when ambidextrous and two valid hands are present.
/// Both halves (and both slots) are evaluated before combining, matching
/// the reference trigger.
fn run_rule(
    features: &FeatureTable,
    ctx: &FeatureCtx<'_>,
    frame: &Frame,
    hand_count: usize,
    rule: &Rule,
    ambidextrous_mono: bool,
) -> Result<bool, TickError> {
    if rule.hands_required() > hand_count {
        return Ok(false);
    }

    let hands = &frame.hands;
    if rule.hands_required() == 2 {
        let first  = run_half_rule(features, ctx, &rule.halves[0], &hands[0])?;
        let second = run_half_rule(features, ctx, &rule.halves[1], &hands[1])?;
        Ok(first && second)
    } else {
        let slot0 = run_half_rule(features, ctx, &rule.halves[0], &hands[0])?;
        let slot1 = if ambidextrous_mono && hand_count == 2 {
            run_half_rule(features, ctx, &rule.halves[0], &hands[1])?
        } else {
            false
        };
        Ok(slot0 || slot1)
    }
}

/// AND over a half-rule's tests in declared order, short-circuiting on
/// the first failed validator.
fn run_half_rule(
    features: &FeatureTable,
    ctx: &FeatureCtx<'_>,
    half: &HalfRule,
    hand: &Hand,
) -> Result<bool, TickError> {
    for test in &half.tests {
        let value = features
            .eval(&test.method, ctx, hand, &test.args)
            .ok_or_else(|| TickError::FeatureLookup { method: test.method.clone() })?;
        if !(test.validator)(&value) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Hands as delivered to `on_match`: the reported pair reordered to
/// `[left, right]` by each hand's own side attribute. A same-side pair
/// (sensor confusion) keeps reported order.
fn canonical_hands(frame: &Frame) -> Vec<&Hand> {
    match frame.hands.as_slice() {
        [a, b] if a.side == HandSide::Right && b.side == HandSide::Left => vec![b, a],
        hands => hands.iter().collect(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
