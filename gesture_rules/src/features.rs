//! The feature table: named, signature-checked measurement functions.
//!
//! A [`FeatureTable`] maps a method name to a pure function
//! `(context, hand, args) -> FeatureValue`. Rules are written against these
//! names; the engine validates every referenced name and argument list at
//! registration time and treats the returned value as opaque — only the
//! rule's validator interprets it.
//!
//! [`FeatureTable::standard`] supplies the built-in vocabulary (gesture
//! bit-codes, spread tests, palm readers, look-back motion). Hosts may
//! [`FeatureTable::register`] additional entries before building an engine.

use std::collections::BTreeMap;
use std::fmt;

use glam::{Mat3, Vec3};
use hand_frame::{FingerType, FrameHistory, Hand};

use crate::error::RegistrationError;

// ════════════════════════════════════════════════════════════════════════════
// Gesture bit-codes
// ════════════════════════════════════════════════════════════════════════════

/// Canonical extended-finger bit-codes (thumb=1, index=2, middle=4, ring=8,
/// pinky=16, OR-combined).
pub mod gesture_code {
    /// No finger extended.
    pub const FIST:            u8 = 0;
    /// Only the thumb extended.
    pub const THUMB_UP:        u8 = 1;
    /// Only the index finger extended.
    pub const POINT:           u8 = 2;
    /// Index finger and thumb extended.
    pub const POINT_AND_THUMB: u8 = 3;
    /// Index and middle fingers extended.
    pub const PEACE:           u8 = 6;
    /// Thumb, index, and middle fingers extended.
    pub const THREE:           u8 = 7;
    /// Only the pinky extended.
    pub const PINKY_UP:        u8 = 16;
    /// All five fingers extended.
    pub const OPEN_PALM:       u8 = 31;
}

/// OR-combined bit-code of the hand's extended fingers.
pub fn finger_code(hand: &Hand) -> u8 {
    hand.fingers
        .iter()
        .filter(|f| f.extended)
        .map(|f| f.kind.code())
        .sum()
}

/// Bit-codes for a pair of hands, in the order given.
///
/// A rule test only ever sees one hand, so the pair readers live beside the
/// table for direct host use.
pub fn finger_code_pair(first: &Hand, second: &Hand) -> [u8; 2] {
    [finger_code(first), finger_code(second)]
}

/// Pinch strengths for a pair of hands, in the order given.
pub fn pinch_strength_pair(first: &Hand, second: &Hand) -> [f32; 2] {
    [first.pinch_strength, second.pinch_strength]
}

// ════════════════════════════════════════════════════════════════════════════
// Finger spread
// ════════════════════════════════════════════════════════════════════════════

/// Default tip-to-tip spread threshold in millimetres.
pub const SPREAD_DEFAULT_MM: f32 = 30.0;

/// True when the two fingers' tips sit further apart than the threshold.
///
/// Spread differs from extension: spread fingers are extended *and* apart.
/// A pinky pair nominally earns +5 mm of headroom (shorter finger, larger
/// resting tip distance), but the thumb adjustment overwrites that value
/// unconditionally — its else-arm resets to the plain base — so the
/// effective threshold is `2.5 × base` for thumb pairs and `base` for every
/// other pair. Kept bit-for-bit to match reference output.
pub fn two_fingers_spread(hand: &Hand, a: FingerType, b: FingerType, distance_mm: f32) -> bool {
    let pinky = a == FingerType::Pinky || b == FingerType::Pinky;
    let thumb = a == FingerType::Thumb || b == FingerType::Thumb;

    let _nominal = if pinky { distance_mm + 5.0 } else { distance_mm };
    let threshold = if thumb { distance_mm * 2.5 } else { distance_mm };

    hand.finger(a).tip_distance(hand.finger(b)) > threshold
}

/// True when every anatomically adjacent finger pair is spread
/// (thumb–index, index–middle, middle–ring, ring–pinky) at the default
/// threshold.
pub fn all_fingers_spread(hand: &Hand) -> bool {
    use FingerType::*;
    two_fingers_spread(hand, Thumb, Index, SPREAD_DEFAULT_MM)
        && two_fingers_spread(hand, Index, Middle, SPREAD_DEFAULT_MM)
        && two_fingers_spread(hand, Middle, Ring, SPREAD_DEFAULT_MM)
        && two_fingers_spread(hand, Ring, Pinky, SPREAD_DEFAULT_MM)
}

// ════════════════════════════════════════════════════════════════════════════
// FeatureValue — opaque to the engine, interpreted only by validators
// ════════════════════════════════════════════════════════════════════════════

/// Result of a feature function. The engine passes it straight to the
/// test's validator without looking inside.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureValue {
    Bool(bool),
    Number(f32),
    /// Extended-finger bit-code (0–31).
    Code(u8),
    Vector(Vec3),
    Matrix(Mat3),
    /// The hand itself — escape hatch for validators that want raw fields.
    Hand(Hand),
}

impl FeatureValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FeatureValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_code(&self) -> Option<u8> {
        match self {
            FeatureValue::Code(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vec3> {
        match self {
            FeatureValue::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<Mat3> {
        match self {
            FeatureValue::Matrix(m) => Some(*m),
            _ => None,
        }
    }

    pub fn as_hand(&self) -> Option<&Hand> {
        match self {
            FeatureValue::Hand(h) => Some(h),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FeatureArg / ArgKind / Signature
// ════════════════════════════════════════════════════════════════════════════

/// One declared argument of a rule test, checked against the feature's
/// signature at registration time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeatureArg {
    Finger(FingerType),
    Number(f32),
    /// Look-back depth in ticks for history-based features.
    Frames(usize),
}

impl FeatureArg {
    pub fn kind(self) -> ArgKind {
        match self {
            FeatureArg::Finger(_) => ArgKind::Finger,
            FeatureArg::Number(_) => ArgKind::Number,
            FeatureArg::Frames(_) => ArgKind::Frames,
        }
    }
}

/// Argument category used in feature signatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    Finger,
    Number,
    Frames,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArgKind::Finger => "finger",
            ArgKind::Number => "number",
            ArgKind::Frames => "frames",
        };
        f.write_str(s)
    }
}

/// Declared argument shape of a feature: required kinds followed by
/// optional ones (optional args default inside the feature function).
#[derive(Clone, Copy, Debug)]
pub struct Signature {
    pub required: &'static [ArgKind],
    pub optional: &'static [ArgKind],
}

impl Signature {
    /// No arguments at all.
    pub const NONE: Signature = Signature { required: &[], optional: &[] };

    /// One optional look-back depth.
    pub const FRAMES_OPT: Signature = Signature { required: &[], optional: &[ArgKind::Frames] };
}

// ════════════════════════════════════════════════════════════════════════════
// FeatureCtx / FeatureTable
// ════════════════════════════════════════════════════════════════════════════

/// Read-only surroundings handed to every feature function.
pub struct FeatureCtx<'a> {
    /// Look-back access into the sensor's retained frame buffer.
    pub history: &'a dyn FrameHistory,
}

impl<'a> FeatureCtx<'a> {
    pub fn new(history: &'a dyn FrameHistory) -> Self {
        FeatureCtx { history }
    }

    /// The same hand (matched by side) as it was `ticks_back` ticks ago.
    pub fn past_hand(&self, hand: &Hand, ticks_back: usize) -> Option<&'a Hand> {
        self.history.frame(ticks_back).and_then(|f| f.hand(hand.side))
    }
}

type FeatureFn = Box<dyn Fn(&FeatureCtx<'_>, &Hand, &[FeatureArg]) -> FeatureValue>;

struct Entry {
    signature: Signature,
    func:      FeatureFn,
}

/// Name-keyed registry of feature functions.
///
/// Lookup by name replaces the reference implementation's
/// method-name-on-the-instance reflection: unknown names are caught when a
/// rule is registered, never at evaluation time.
pub struct FeatureTable {
    entries: BTreeMap<String, Entry>,
}

impl FeatureTable {
    /// An empty table. Most callers want [`FeatureTable::standard`].
    pub fn empty() -> Self {
        FeatureTable { entries: BTreeMap::new() }
    }

    /// Register (or replace) a feature under `name`.
    pub fn register<F>(&mut self, name: &str, signature: Signature, func: F)
    where
        F: Fn(&FeatureCtx<'_>, &Hand, &[FeatureArg]) -> FeatureValue + 'static,
    {
        self.entries.insert(name.to_string(), Entry { signature, func: Box::new(func) });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Check a declared argument list against the named feature's
    /// signature. Fails on unknown names, arity mismatch, or a wrong
    /// argument kind.
    pub fn check_args(&self, name: &str, args: &[FeatureArg]) -> Result<(), RegistrationError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| RegistrationError::UnknownMethod { method: name.to_string() })?;

        let sig = entry.signature;
        let min = sig.required.len();
        let max = min + sig.optional.len();

        if args.len() < min {
            return Err(RegistrationError::TooFewArgs {
                method:   name.to_string(),
                expected: min,
                given:    args.len(),
            });
        }
        if args.len() > max {
            return Err(RegistrationError::TooManyArgs {
                method:  name.to_string(),
                allowed: max,
                given:   args.len(),
            });
        }
        for (index, arg) in args.iter().enumerate() {
            let expected = if index < min {
                sig.required[index]
            } else {
                sig.optional[index - min]
            };
            if arg.kind() != expected {
                return Err(RegistrationError::ArgKindMismatch {
                    method: name.to_string(),
                    index,
                    expected,
                    found: arg.kind(),
                });
            }
        }
        Ok(())
    }

    /// Evaluate the named feature for one hand. `None` when the name is
    /// not registered — unreachable for rules that passed registration.
    pub fn eval(
        &self,
        name: &str,
        ctx: &FeatureCtx<'_>,
        hand: &Hand,
        args: &[FeatureArg],
    ) -> Option<FeatureValue> {
        self.entries.get(name).map(|e| (e.func)(ctx, hand, args))
    }

    // ── standard vocabulary ──────────────────────────────────────────────

    /// The built-in feature set. Names and semantics follow the reference
    /// gesture trigger; formulas live in this module and `hand_frame`.
    pub fn standard() -> Self {
        use gesture_code::*;

        let mut t = FeatureTable::empty();

        // Extended-finger bit-code and its named wrappers.
        t.register("finger_code", Signature::NONE, |_, hand, _| {
            FeatureValue::Code(finger_code(hand))
        });
        let named: [(&str, u8); 8] = [
            ("fist",            FIST),
            ("thumb_up",        THUMB_UP),
            ("point",           POINT),
            ("point_and_thumb", POINT_AND_THUMB),
            ("peace",           PEACE),
            ("three",           THREE),
            ("pinky_up",        PINKY_UP),
            ("open_palm",       OPEN_PALM),
        ];
        for (name, code) in named {
            t.register(name, Signature::NONE, move |_, hand, _| {
                FeatureValue::Bool(finger_code(hand) == code)
            });
        }

        // Finger state.
        t.register(
            "finger_extended",
            Signature { required: &[ArgKind::Finger], optional: &[] },
            |_, hand, args| FeatureValue::Bool(hand.finger(finger_arg(args, 0)).extended),
        );
        t.register("all_fingers_valid", Signature::NONE, |_, hand, _| {
            FeatureValue::Bool(hand.all_fingers_valid())
        });

        // Spread tests.
        t.register(
            "two_fingers_spread",
            Signature {
                required: &[ArgKind::Finger, ArgKind::Finger],
                optional: &[ArgKind::Number],
            },
            |_, hand, args| {
                let a = finger_arg(args, 0);
                let b = finger_arg(args, 1);
                let base = number_arg(args, 2, SPREAD_DEFAULT_MM);
                FeatureValue::Bool(two_fingers_spread(hand, a, b, base))
            },
        );
        t.register("all_fingers_spread", Signature::NONE, |_, hand, _| {
            FeatureValue::Bool(all_fingers_spread(hand))
        });

        // Palm pass-through readers.
        t.register("palm_velocity", Signature::NONE, |_, hand, _| {
            FeatureValue::Vector(hand.palm_velocity)
        });
        t.register("palm_normal", Signature::NONE, |_, hand, _| {
            FeatureValue::Vector(hand.palm_normal)
        });
        t.register("palm_position", Signature::NONE, |_, hand, _| {
            FeatureValue::Vector(hand.stabilized_position)
        });
        t.register("palm_width", Signature::NONE, |_, hand, _| {
            FeatureValue::Number(hand.palm_width)
        });
        t.register("pinch_strength", Signature::NONE, |_, hand, _| {
            FeatureValue::Number(hand.pinch_strength)
        });
        t.register("grab_strength", Signature::NONE, |_, hand, _| {
            FeatureValue::Number(hand.grab_strength)
        });
        t.register("sphere_center", Signature::NONE, |_, hand, _| {
            FeatureValue::Vector(hand.sphere_center)
        });
        t.register("sphere_radius", Signature::NONE, |_, hand, _| {
            FeatureValue::Number(hand.sphere_radius)
        });
        t.register("time_visible", Signature::NONE, |_, hand, _| {
            FeatureValue::Number(hand.time_visible)
        });

        // Orientation.
        t.register("hand_yaw", Signature::NONE, |_, hand, _| {
            FeatureValue::Number(hand.yaw())
        });
        t.register("hand_pitch", Signature::NONE, |_, hand, _| {
            FeatureValue::Number(hand.pitch())
        });
        t.register("hand_roll", Signature::NONE, |_, hand, _| {
            FeatureValue::Number(hand.roll())
        });

        // Motion relative to N ticks ago. With no reachable past snapshot
        // these read as "no motion": zero delta, zero angle, identity.
        t.register("translation_delta", Signature::FRAMES_OPT, |ctx, hand, args| {
            let back = frames_arg(args, 1);
            FeatureValue::Vector(
                ctx.past_hand(hand, back)
                    .map_or(Vec3::ZERO, |past| hand.translation(past)),
            )
        });
        t.register("rotation_angle", Signature::FRAMES_OPT, |ctx, hand, args| {
            let back = frames_arg(args, 1);
            FeatureValue::Number(
                ctx.past_hand(hand, back)
                    .map_or(0.0, |past| hand.rotation_angle(past)),
            )
        });
        t.register("rotation_axis", Signature::FRAMES_OPT, |ctx, hand, args| {
            let back = frames_arg(args, 1);
            FeatureValue::Vector(
                ctx.past_hand(hand, back)
                    .map_or(Vec3::ZERO, |past| hand.rotation_axis(past)),
            )
        });
        t.register("rotation_matrix", Signature::FRAMES_OPT, |ctx, hand, args| {
            let back = frames_arg(args, 1);
            FeatureValue::Matrix(
                ctx.past_hand(hand, back)
                    .map_or(Mat3::IDENTITY, |past| hand.rotation_matrix(past)),
            )
        });

        // Identity escape hatch: hands the whole record to the validator.
        t.register("hand", Signature::NONE, |_, hand, _| {
            FeatureValue::Hand(hand.clone())
        });

        t
    }
}

// Argument accessors. Registration has already checked kinds and arity
// against the signature, so the fallbacks below are unreachable defaults.

fn finger_arg(args: &[FeatureArg], index: usize) -> FingerType {
    match args.get(index) {
        Some(FeatureArg::Finger(f)) => *f,
        _ => FingerType::Thumb,
    }
}

fn number_arg(args: &[FeatureArg], index: usize, default: f32) -> f32 {
    match args.get(index) {
        Some(FeatureArg::Number(n)) => *n,
        _ => default,
    }
}

fn frames_arg(args: &[FeatureArg], default: usize) -> usize {
    match args.first() {
        Some(FeatureArg::Frames(n)) => *n,
        _ => default,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use hand_frame::{FrameBuffer, FrameBuilder, HandBuilder, HandSide};

    fn ctx_less() -> FeatureCtx<'static> {
        static NO_HISTORY: () = ();
        FeatureCtx::new(&NO_HISTORY)
    }

    fn eval(table: &FeatureTable, name: &str, hand: &Hand) -> FeatureValue {
        table
            .eval(name, &ctx_less(), hand, &[])
            .unwrap_or_else(|| panic!("feature `{}` should be registered", name))
    }

    // ── finger codes ─────────────────────────────────────────────────────

    #[test]
    fn peace_codes_to_six() {
        let hand = HandBuilder::new(HandSide::Right)
            .extended_only(&[FingerType::Index, FingerType::Middle])
            .build();
        assert_eq!(finger_code(&hand), gesture_code::PEACE);
    }

    #[test]
    fn open_palm_codes_to_thirty_one() {
        let hand = HandBuilder::new(HandSide::Right).build();
        assert_eq!(finger_code(&hand), gesture_code::OPEN_PALM);
    }

    #[test]
    fn fist_codes_to_zero() {
        let hand = HandBuilder::new(HandSide::Right).fist().build();
        assert_eq!(finger_code(&hand), gesture_code::FIST);
    }

    #[test]
    fn named_wrappers_match_their_codes() {
        let table = FeatureTable::standard();
        let peace = HandBuilder::new(HandSide::Left)
            .extended_only(&[FingerType::Index, FingerType::Middle])
            .build();
        assert_eq!(eval(&table, "peace", &peace), FeatureValue::Bool(true));
        assert_eq!(eval(&table, "point", &peace), FeatureValue::Bool(false));
        assert_eq!(eval(&table, "open_palm", &peace), FeatureValue::Bool(false));

        let three = HandBuilder::new(HandSide::Left)
            .extended_only(&[FingerType::Thumb, FingerType::Index, FingerType::Middle])
            .build();
        assert_eq!(eval(&table, "three", &three), FeatureValue::Bool(true));
    }

    #[test]
    fn finger_code_pair_keeps_order() {
        let open = HandBuilder::new(HandSide::Left).build();
        let fist = HandBuilder::new(HandSide::Right).fist().build();
        assert_eq!(finger_code_pair(&open, &fist), [31, 0]);
        assert_eq!(finger_code_pair(&fist, &open), [0, 31]);
    }

    // ── spread thresholds ────────────────────────────────────────────────

    fn hand_with_gap(a: FingerType, b: FingerType, gap_mm: f32) -> Hand {
        HandBuilder::new(HandSide::Right)
            .tip(a, Vec3::ZERO)
            .tip(b, Vec3::new(gap_mm, 0.0, 0.0))
            .build()
    }

    #[test]
    fn spread_above_default_threshold() {
        let hand = hand_with_gap(FingerType::Index, FingerType::Middle, 32.0);
        assert!(two_fingers_spread(&hand, FingerType::Index, FingerType::Middle, 30.0));
    }

    #[test]
    fn not_spread_below_default_threshold() {
        let hand = hand_with_gap(FingerType::Index, FingerType::Middle, 28.0);
        assert!(!two_fingers_spread(&hand, FingerType::Index, FingerType::Middle, 30.0));
    }

    #[test]
    fn thumb_pair_needs_widened_threshold() {
        // 2.5 × 30 = 75 mm for any thumb-involving pair
        let near = hand_with_gap(FingerType::Thumb, FingerType::Index, 60.0);
        assert!(!two_fingers_spread(&near, FingerType::Thumb, FingerType::Index, 30.0));
        let far = hand_with_gap(FingerType::Thumb, FingerType::Index, 80.0);
        assert!(two_fingers_spread(&far, FingerType::Thumb, FingerType::Index, 30.0));
    }

    #[test]
    fn pinky_adjustment_is_overwritten_by_thumb_branch() {
        // Reference precedence: the +5 mm pinky widening never survives,
        // so 32 mm clears the plain 30 mm base even for a pinky pair.
        let hand = hand_with_gap(FingerType::Ring, FingerType::Pinky, 32.0);
        assert!(two_fingers_spread(&hand, FingerType::Ring, FingerType::Pinky, 30.0));
    }

    #[test]
    fn invalid_finger_is_never_spread() {
        let hand = HandBuilder::new(HandSide::Right)
            .finger_valid(FingerType::Index, false)
            .build();
        assert!(!two_fingers_spread(&hand, FingerType::Index, FingerType::Middle, 30.0));
    }

    #[test]
    fn default_open_hand_is_fully_spread() {
        let hand = HandBuilder::new(HandSide::Right).build();
        assert!(all_fingers_spread(&hand));
    }

    #[test]
    fn pinched_fingers_break_full_spread() {
        let hand = HandBuilder::new(HandSide::Right)
            .tip(FingerType::Index, Vec3::new(0.0, 0.0, -90.0))
            .tip(FingerType::Middle, Vec3::new(5.0, 0.0, -90.0))
            .build();
        assert!(!all_fingers_spread(&hand));
    }

    // ── signature checking ───────────────────────────────────────────────

    #[test]
    fn unknown_method_is_rejected() {
        let table = FeatureTable::standard();
        assert!(matches!(
            table.check_args("no_such_feature", &[]),
            Err(RegistrationError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn missing_required_args_rejected() {
        let table = FeatureTable::standard();
        assert!(matches!(
            table.check_args("two_fingers_spread", &[FeatureArg::Finger(FingerType::Index)]),
            Err(RegistrationError::TooFewArgs { .. })
        ));
    }

    #[test]
    fn surplus_args_rejected() {
        let table = FeatureTable::standard();
        assert!(matches!(
            table.check_args("finger_code", &[FeatureArg::Frames(1)]),
            Err(RegistrationError::TooManyArgs { .. })
        ));
    }

    #[test]
    fn wrong_arg_kind_rejected() {
        let table = FeatureTable::standard();
        assert!(matches!(
            table.check_args(
                "two_fingers_spread",
                &[FeatureArg::Number(1.0), FeatureArg::Finger(FingerType::Middle)],
            ),
            Err(RegistrationError::ArgKindMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn optional_args_may_be_omitted_or_given() {
        let table = FeatureTable::standard();
        assert!(table.check_args("rotation_angle", &[]).is_ok());
        assert!(table.check_args("rotation_angle", &[FeatureArg::Frames(3)]).is_ok());
        assert!(table
            .check_args(
                "two_fingers_spread",
                &[
                    FeatureArg::Finger(FingerType::Index),
                    FeatureArg::Finger(FingerType::Middle),
                    FeatureArg::Number(40.0),
                ],
            )
            .is_ok());
    }

    // ── look-back features ───────────────────────────────────────────────

    #[test]
    fn lookback_without_history_reads_as_no_motion() {
        let table = FeatureTable::standard();
        let hand = HandBuilder::new(HandSide::Right).build();
        assert_eq!(eval(&table, "rotation_angle", &hand), FeatureValue::Number(0.0));
        assert_eq!(eval(&table, "rotation_matrix", &hand), FeatureValue::Matrix(Mat3::IDENTITY));
        assert_eq!(eval(&table, "translation_delta", &hand), FeatureValue::Vector(Vec3::ZERO));
    }

    #[test]
    fn translation_delta_reads_previous_frame() {
        let table = FeatureTable::standard();

        let mut history = FrameBuffer::new(4);
        let past = HandBuilder::new(HandSide::Right)
            .palm_position(Vec3::new(0.0, 180.0, 0.0))
            .build();
        history.push(FrameBuilder::new(1).hand(past).build());

        let now = HandBuilder::new(HandSide::Right)
            .palm_position(Vec3::new(0.0, 180.0, -40.0))
            .build();
        history.push(FrameBuilder::new(2).hand(now.clone()).build());

        let ctx = FeatureCtx::new(&history);
        let v = table
            .eval("translation_delta", &ctx, &now, &[FeatureArg::Frames(1)])
            .and_then(|v| v.as_vector());
        assert_eq!(v, Some(Vec3::new(0.0, 0.0, -40.0)));
    }

    // ── pass-throughs and extensibility ──────────────────────────────────

    #[test]
    fn pass_through_readers_report_hand_fields() {
        let table = FeatureTable::standard();
        let hand = HandBuilder::new(HandSide::Left)
            .palm_velocity(Vec3::new(120.0, 0.0, 0.0))
            .pinch_strength(0.8)
            .grab_strength(0.1)
            .palm_width(92.0)
            .build();
        assert_eq!(
            eval(&table, "palm_velocity", &hand),
            FeatureValue::Vector(Vec3::new(120.0, 0.0, 0.0))
        );
        assert_eq!(eval(&table, "pinch_strength", &hand), FeatureValue::Number(0.8));
        assert_eq!(eval(&table, "grab_strength", &hand), FeatureValue::Number(0.1));
        assert_eq!(eval(&table, "palm_width", &hand), FeatureValue::Number(92.0));
    }

    #[test]
    fn hand_feature_hands_back_the_record() {
        let table = FeatureTable::standard();
        let hand = HandBuilder::new(HandSide::Left).build();
        let value = eval(&table, "hand", &hand);
        assert_eq!(value.as_hand().map(|h| h.side), Some(HandSide::Left));
    }

    #[test]
    fn custom_features_can_be_registered() {
        let mut table = FeatureTable::standard();
        table.register("palm_speed", Signature::NONE, |_, hand, _| {
            FeatureValue::Number(hand.palm_velocity.length())
        });
        assert!(table.contains("palm_speed"));

        let hand = HandBuilder::new(HandSide::Right)
            .palm_velocity(Vec3::new(3.0, 4.0, 0.0))
            .build();
        assert_eq!(eval(&table, "palm_speed", &hand), FeatureValue::Number(5.0));
    }
}
