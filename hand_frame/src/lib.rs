//! # hand_frame
//!
//! Per-tick hand-tracking snapshots for gesture recognition.
//!
//! A tracking sensor delivers one [`Frame`] per observation tick. Each frame
//! carries a validity flag and up to two [`Hand`] records; each hand carries
//! five [`Finger`]s in anatomical order plus palm measurements. Everything
//! here is plain data — no hardware, no callbacks — so the whole model can
//! be driven from synthetic frames in tests and demos.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_frame::{HandBuilder, FrameBuilder, HandSide, FingerType};
//!
//! let hand = HandBuilder::new(HandSide::Right)
//!     .extended_only(&[FingerType::Index, FingerType::Middle])  // peace
//!     .build();
//!
//! let frame = FrameBuilder::new(1).hand(hand).build();
//! assert_eq!(frame.valid_hand_count(), 1);
//! ```
//!
//! ## Frame history
//!
//! A few derived measurements (rotation since N ticks ago, translation
//! delta) need access to past frames. The sensor side owns that buffer;
//! consumers reach it through the [`FrameHistory`] trait. [`FrameBuffer`]
//! is a ready-made ring-buffer implementation for hosts and tests.

use glam::{Mat3, Vec3};

// ════════════════════════════════════════════════════════════════════════════
// HandSide / FingerType
// ════════════════════════════════════════════════════════════════════════════

/// Which hand a record describes, as reported by the sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            HandSide::Left  => "left",
            HandSide::Right => "right",
        }
    }
}

/// The five fingers in anatomical order.
///
/// Each finger contributes a power-of-two weight to the extended-finger
/// bit-code (thumb = 1 … pinky = 16), so a full hand pose fits in one `u8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FingerType {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl FingerType {
    /// All five fingers, thumb first.
    pub fn all() -> [FingerType; 5] {
        [
            FingerType::Thumb,
            FingerType::Index,
            FingerType::Middle,
            FingerType::Ring,
            FingerType::Pinky,
        ]
    }

    /// Anatomical index: thumb 0 … pinky 4.
    pub fn index(self) -> usize {
        match self {
            FingerType::Thumb  => 0,
            FingerType::Index  => 1,
            FingerType::Middle => 2,
            FingerType::Ring   => 3,
            FingerType::Pinky  => 4,
        }
    }

    /// Bit weight in the extended-finger code.
    pub fn code(self) -> u8 {
        1 << self.index()
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            FingerType::Thumb  => "thumb",
            FingerType::Index  => "index",
            FingerType::Middle => "middle",
            FingerType::Ring   => "ring",
            FingerType::Pinky  => "pinky",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger
// ════════════════════════════════════════════════════════════════════════════

/// One tracked finger within a [`Hand`].
#[derive(Clone, Debug, PartialEq)]
pub struct Finger {
    pub kind:         FingerType,
    /// False when the sensor lost or inferred this finger.
    pub valid:        bool,
    /// True when the finger is straightened rather than curled.
    pub extended:     bool,
    /// Fingertip position in millimetres from the sensor origin.
    pub tip_position: Vec3,
}

impl Finger {
    /// Euclidean tip-to-tip distance to another finger, in millimetres.
    ///
    /// Returns `-1.0` when either finger is invalid, so a "distance above
    /// threshold" test can never pass on lost fingers.
    pub fn tip_distance(&self, other: &Finger) -> f32 {
        if !self.valid || !other.valid {
            return -1.0;
        }
        self.tip_position.distance(other.tip_position)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Hand
// ════════════════════════════════════════════════════════════════════════════

/// One tracked hand's pose and measurements within a [`Frame`].
///
/// Angles are radians, distances millimetres, velocities mm/s — the units
/// the sensor reports. `direction` points from the palm toward the fingers;
/// `palm_normal` points out of the palm (downward for a flat hand held
/// palm-down).
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub side:                HandSide,
    pub valid:               bool,
    /// Thumb, index, middle, ring, pinky — always in that order.
    pub fingers:             [Finger; 5],
    pub palm_position:       Vec3,
    /// Smoothed palm position; jitters less than `palm_position`.
    pub stabilized_position: Vec3,
    pub palm_velocity:       Vec3,
    pub palm_normal:         Vec3,
    pub direction:           Vec3,
    pub palm_width:          f32,
    pub pinch_strength:      f32,
    pub grab_strength:       f32,
    /// Center of the sphere fitted to the hand's curvature.
    pub sphere_center:       Vec3,
    pub sphere_radius:       f32,
    /// Seconds this hand has been continuously tracked.
    pub time_visible:        f32,
}

impl Hand {
    /// The finger of the given type.
    pub fn finger(&self, kind: FingerType) -> &Finger {
        &self.fingers[kind.index()]
    }

    pub fn thumb(&self)         -> &Finger { &self.fingers[0] }
    pub fn index_finger(&self)  -> &Finger { &self.fingers[1] }
    pub fn middle_finger(&self) -> &Finger { &self.fingers[2] }
    pub fn ring_finger(&self)   -> &Finger { &self.fingers[3] }
    pub fn pinky(&self)         -> &Finger { &self.fingers[4] }

    /// True when the sensor reports all five fingers as valid.
    pub fn all_fingers_valid(&self) -> bool {
        self.fingers.iter().all(|f| f.valid)
    }

    // ── pose angles ──────────────────────────────────────────────────────

    /// Rotation around the vertical axis: positive when the hand points
    /// to the user's right of straight-ahead.
    pub fn yaw(&self) -> f32 {
        self.direction.x.atan2(-self.direction.z)
    }

    /// Rotation around the side-to-side axis: positive when the fingers
    /// point upward.
    pub fn pitch(&self) -> f32 {
        self.direction.y.atan2(-self.direction.z)
    }

    /// Rotation around the palm-to-fingers axis: positive when the hand
    /// tilts toward the user's left.
    pub fn roll(&self) -> f32 {
        self.palm_normal.x.atan2(-self.palm_normal.y)
    }

    /// Orthonormal hand basis built from `direction` and `palm_normal`.
    ///
    /// Columns are the hand's x (side-to-side), y (out of the back of the
    /// hand), and z (from fingers toward wrist) axes.
    pub fn basis(&self) -> Mat3 {
        let z = (-self.direction).normalize_or_zero();
        let mut y = (-self.palm_normal).normalize_or_zero();
        let x = y.cross(z).normalize_or_zero();
        y = z.cross(x);
        Mat3::from_cols(x, y, z)
    }

    // ── motion relative to an earlier snapshot of the same hand ─────────

    /// Rotation carrying the earlier pose onto this one.
    pub fn rotation_matrix(&self, past: &Hand) -> Mat3 {
        self.basis() * past.basis().transpose()
    }

    /// Magnitude in radians of [`Hand::rotation_matrix`].
    pub fn rotation_angle(&self, past: &Hand) -> f32 {
        let r = self.rotation_matrix(past);
        let trace = r.x_axis.x + r.y_axis.y + r.z_axis.z;
        ((trace - 1.0) / 2.0).clamp(-1.0, 1.0).acos()
    }

    /// Unit rotation axis of [`Hand::rotation_matrix`], or the zero vector
    /// when the rotation is negligible.
    pub fn rotation_axis(&self, past: &Hand) -> Vec3 {
        let r = self.rotation_matrix(past);
        Vec3::new(
            r.y_axis.z - r.z_axis.y,
            r.z_axis.x - r.x_axis.z,
            r.x_axis.y - r.y_axis.x,
        )
        .normalize_or_zero()
    }

    /// Palm displacement since the earlier snapshot, in millimetres.
    pub fn translation(&self, past: &Hand) -> Vec3 {
        self.palm_position - past.palm_position
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// One timestamped sensor snapshot: a validity flag and 0–2 hands in the
/// order the sensor reported them.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub id:    u64,
    pub valid: bool,
    pub hands: Vec<Hand>,
}

impl Frame {
    /// An invalid frame (sensor hiccup); carries no hands.
    pub fn invalid(id: u64) -> Self {
        Frame { id, valid: false, hands: Vec::new() }
    }

    /// Number of *valid* hands:
    ///
    /// * one reported hand → 1 if it is valid, else 0;
    /// * two reported hands → 2 only when both are valid, 1 when exactly
    ///   one is, 0 otherwise;
    /// * anything else → 0.
    pub fn valid_hand_count(&self) -> usize {
        match self.hands.as_slice() {
            [h] if h.valid => 1,
            [a, b] => match (a.valid, b.valid) {
                (true, true)                   => 2,
                (true, false) | (false, true)  => 1,
                (false, false)                 => 0,
            },
            _ => 0,
        }
    }

    /// The first reported hand with the given side, if any.
    pub fn hand(&self, side: HandSide) -> Option<&Hand> {
        self.hands.iter().find(|h| h.side == side)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameHistory — look-back access into the sensor's retained buffer
// ════════════════════════════════════════════════════════════════════════════

/// Read access to recently delivered frames.
///
/// The sensor side owns the buffer and its eviction policy; consumers only
/// borrow frames for the duration of one tick. `ticks_back == 0` is the
/// most recently pushed frame, `1` the one before it, and so on.
pub trait FrameHistory {
    fn frame(&self, ticks_back: usize) -> Option<&Frame>;
}

/// No history at all — for hosts that never use look-back measurements.
impl FrameHistory for () {
    fn frame(&self, _ticks_back: usize) -> Option<&Frame> {
        None
    }
}

/// Fixed-capacity ring buffer of delivered frames.
///
/// Push the current frame before handing the buffer to per-tick consumers;
/// evicts the oldest frame once `capacity` is exceeded.
pub struct FrameBuffer {
    frames:   std::collections::VecDeque<Frame>,
    capacity: usize,
}

impl FrameBuffer {
    /// Buffer retaining at most `capacity` frames (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        FrameBuffer { frames: std::collections::VecDeque::with_capacity(capacity), capacity }
    }

    /// Record a delivered frame, evicting the oldest when full.
    pub fn push(&mut self, frame: Frame) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    /// Number of frames currently retained.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameHistory for FrameBuffer {
    fn frame(&self, ticks_back: usize) -> Option<&Frame> {
        let n = self.frames.len();
        if ticks_back >= n {
            return None;
        }
        self.frames.get(n - 1 - ticks_back)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandBuilder / FrameBuilder — synthetic frames for tests and demos
// ════════════════════════════════════════════════════════════════════════════

/// Default fingertip layout for a flat, spread right hand, palm-down over
/// the sensor. Adjacent tips sit comfortably past the spread thresholds.
const DEFAULT_TIPS: [Vec3; 5] = [
    Vec3::new(-70.0, 0.0, -10.0), // thumb
    Vec3::new(-30.0, 0.0, -80.0), // index
    Vec3::new(0.0, 0.0, -95.0),   // middle
    Vec3::new(28.0, 0.0, -82.0),  // ring
    Vec3::new(52.0, 0.0, -60.0),  // pinky
];

/// Builds a [`Hand`] starting from a flat, open, palm-down pose.
///
/// Every measurement can be overridden; unset fields keep sensible
/// defaults so tests only state what they care about.
pub struct HandBuilder {
    hand: Hand,
}

impl HandBuilder {
    pub fn new(side: HandSide) -> Self {
        let fingers = FingerType::all().map(|kind| Finger {
            kind,
            valid:        true,
            extended:     true,
            tip_position: DEFAULT_TIPS[kind.index()],
        });
        HandBuilder {
            hand: Hand {
                side,
                valid: true,
                fingers,
                palm_position:       Vec3::new(0.0, 180.0, 0.0),
                stabilized_position: Vec3::new(0.0, 180.0, 0.0),
                palm_velocity:       Vec3::ZERO,
                palm_normal:         Vec3::NEG_Y,
                direction:           Vec3::NEG_Z,
                palm_width:          85.0,
                pinch_strength:      0.0,
                grab_strength:       0.0,
                sphere_center:       Vec3::new(0.0, 140.0, -40.0),
                sphere_radius:       100.0,
                time_visible:        0.0,
            },
        }
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.hand.valid = valid;
        self
    }

    /// Mark exactly these fingers extended; all others curled.
    pub fn extended_only(mut self, extended: &[FingerType]) -> Self {
        for f in &mut self.hand.fingers {
            f.extended = extended.contains(&f.kind);
        }
        self
    }

    /// A closed fist: nothing extended, grab strength 1.
    pub fn fist(mut self) -> Self {
        for f in &mut self.hand.fingers {
            f.extended = false;
        }
        self.hand.grab_strength = 1.0;
        self
    }

    pub fn finger_valid(mut self, kind: FingerType, valid: bool) -> Self {
        self.hand.fingers[kind.index()].valid = valid;
        self
    }

    pub fn tip(mut self, kind: FingerType, position: Vec3) -> Self {
        self.hand.fingers[kind.index()].tip_position = position;
        self
    }

    pub fn palm_position(mut self, p: Vec3) -> Self {
        self.hand.palm_position = p;
        self.hand.stabilized_position = p;
        self
    }

    pub fn palm_velocity(mut self, v: Vec3) -> Self {
        self.hand.palm_velocity = v;
        self
    }

    pub fn palm_normal(mut self, n: Vec3) -> Self {
        self.hand.palm_normal = n;
        self
    }

    pub fn direction(mut self, d: Vec3) -> Self {
        self.hand.direction = d;
        self
    }

    pub fn pinch_strength(mut self, s: f32) -> Self {
        self.hand.pinch_strength = s;
        self
    }

    pub fn grab_strength(mut self, s: f32) -> Self {
        self.hand.grab_strength = s;
        self
    }

    pub fn palm_width(mut self, w: f32) -> Self {
        self.hand.palm_width = w;
        self
    }

    pub fn sphere(mut self, center: Vec3, radius: f32) -> Self {
        self.hand.sphere_center = center;
        self.hand.sphere_radius = radius;
        self
    }

    pub fn time_visible(mut self, seconds: f32) -> Self {
        self.hand.time_visible = seconds;
        self
    }

    pub fn build(self) -> Hand {
        self.hand
    }
}

/// Builds a [`Frame`] from zero, one, or two hands.
pub struct FrameBuilder {
    frame: Frame,
}

impl FrameBuilder {
    pub fn new(id: u64) -> Self {
        FrameBuilder { frame: Frame { id, valid: true, hands: Vec::new() } }
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.frame.valid = valid;
        self
    }

    /// Append a hand in sensor reporting order (at most two kept).
    pub fn hand(mut self, hand: Hand) -> Self {
        if self.frame.hands.len() < 2 {
            self.frame.hands.push(hand);
        }
        self
    }

    pub fn build(self) -> Frame {
        self.frame
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn open_hand(side: HandSide) -> Hand {
        HandBuilder::new(side).build()
    }

    // ── finger codes and ordering ────────────────────────────────────────

    #[test]
    fn finger_code_weights() {
        assert_eq!(FingerType::Thumb.code(),  1);
        assert_eq!(FingerType::Index.code(),  2);
        assert_eq!(FingerType::Middle.code(), 4);
        assert_eq!(FingerType::Ring.code(),   8);
        assert_eq!(FingerType::Pinky.code(),  16);
    }

    #[test]
    fn builder_fingers_in_anatomical_order() {
        let hand = open_hand(HandSide::Right);
        for (i, kind) in FingerType::all().iter().enumerate() {
            assert_eq!(hand.fingers[i].kind, *kind);
        }
    }

    // ── tip distances ────────────────────────────────────────────────────

    #[test]
    fn tip_distance_euclidean() {
        let hand = HandBuilder::new(HandSide::Right)
            .tip(FingerType::Index,  Vec3::new(0.0, 0.0, 0.0))
            .tip(FingerType::Middle, Vec3::new(3.0, 4.0, 0.0))
            .build();
        let d = hand.index_finger().tip_distance(hand.middle_finger());
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn tip_distance_invalid_finger_is_negative() {
        let hand = HandBuilder::new(HandSide::Right)
            .finger_valid(FingerType::Index, false)
            .build();
        let d = hand.index_finger().tip_distance(hand.middle_finger());
        assert_eq!(d, -1.0);
    }

    // ── valid-hand counting ──────────────────────────────────────────────

    #[test]
    fn count_zero_hands() {
        let frame = FrameBuilder::new(1).build();
        assert_eq!(frame.valid_hand_count(), 0);
    }

    #[test]
    fn count_one_valid_hand() {
        let frame = FrameBuilder::new(1).hand(open_hand(HandSide::Left)).build();
        assert_eq!(frame.valid_hand_count(), 1);
    }

    #[test]
    fn count_one_invalid_hand() {
        let frame = FrameBuilder::new(1)
            .hand(HandBuilder::new(HandSide::Left).valid(false).build())
            .build();
        assert_eq!(frame.valid_hand_count(), 0);
    }

    #[test]
    fn count_two_hands_mixed_validity() {
        let both = FrameBuilder::new(1)
            .hand(open_hand(HandSide::Left))
            .hand(open_hand(HandSide::Right))
            .build();
        assert_eq!(both.valid_hand_count(), 2);

        let one = FrameBuilder::new(2)
            .hand(HandBuilder::new(HandSide::Left).valid(false).build())
            .hand(open_hand(HandSide::Right))
            .build();
        assert_eq!(one.valid_hand_count(), 1);

        let none = FrameBuilder::new(3)
            .hand(HandBuilder::new(HandSide::Left).valid(false).build())
            .hand(HandBuilder::new(HandSide::Right).valid(false).build())
            .build();
        assert_eq!(none.valid_hand_count(), 0);
    }

    // ── pose angles ──────────────────────────────────────────────────────

    #[test]
    fn flat_hand_has_zero_angles() {
        let hand = open_hand(HandSide::Right);
        assert!(hand.yaw().abs() < 1e-6);
        assert!(hand.pitch().abs() < 1e-6);
        assert!(hand.roll().abs() < 1e-6);
    }

    #[test]
    fn fingers_up_pitch_is_quarter_turn() {
        let hand = HandBuilder::new(HandSide::Right)
            .direction(Vec3::Y)
            .palm_normal(Vec3::NEG_Z)
            .build();
        assert!((hand.pitch() - FRAC_PI_2).abs() < 1e-5);
    }

    // ── inter-frame rotation / translation ───────────────────────────────

    #[test]
    fn rotation_angle_matches_applied_roll() {
        let before = open_hand(HandSide::Right);
        // Roll the palm a quarter turn around the fingers axis.
        let after = HandBuilder::new(HandSide::Right)
            .palm_normal(Vec3::NEG_X)
            .build();
        let angle = after.rotation_angle(&before);
        assert!((angle - FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn rotation_of_identical_pose_is_zero() {
        let hand = open_hand(HandSide::Left);
        assert!(hand.rotation_angle(&hand) < 1e-4);
        assert_eq!(hand.rotation_axis(&hand), Vec3::ZERO);
    }

    #[test]
    fn translation_is_palm_displacement() {
        let before = HandBuilder::new(HandSide::Right)
            .palm_position(Vec3::new(0.0, 180.0, 0.0))
            .build();
        let after = HandBuilder::new(HandSide::Right)
            .palm_position(Vec3::new(10.0, 180.0, -25.0))
            .build();
        assert_eq!(after.translation(&before), Vec3::new(10.0, 0.0, -25.0));
    }

    // ── frame buffer ─────────────────────────────────────────────────────

    #[test]
    fn buffer_zero_is_most_recent() {
        let mut buf = FrameBuffer::new(4);
        buf.push(FrameBuilder::new(10).build());
        buf.push(FrameBuilder::new(11).build());
        assert_eq!(buf.frame(0).map(|f| f.id), Some(11));
        assert_eq!(buf.frame(1).map(|f| f.id), Some(10));
        assert!(buf.frame(2).is_none());
    }

    #[test]
    fn buffer_evicts_oldest() {
        let mut buf = FrameBuffer::new(2);
        for id in 0..5 {
            buf.push(FrameBuilder::new(id).build());
        }
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.frame(0).map(|f| f.id), Some(4));
        assert_eq!(buf.frame(1).map(|f| f.id), Some(3));
        assert!(buf.frame(2).is_none());
    }

    #[test]
    fn empty_history_yields_nothing() {
        assert!(().frame(0).is_none());
        assert!(FrameBuffer::new(8).frame(0).is_none());
    }

    // ── default pose is spread wide enough for the spread tests ─────────

    #[test]
    fn default_adjacent_tips_exceed_spread_thresholds() {
        let hand = open_hand(HandSide::Right);
        // thumb–index pairs widen to 75 mm; the rest use the 30 mm base
        assert!(hand.thumb().tip_distance(hand.index_finger()) > 75.0);
        assert!(hand.index_finger().tip_distance(hand.middle_finger()) > 30.0);
        assert!(hand.middle_finger().tip_distance(hand.ring_finger()) > 30.0);
        assert!(hand.ring_finger().tip_distance(hand.pinky()) > 30.0);
    }
}
