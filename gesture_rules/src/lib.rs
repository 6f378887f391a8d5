//! # gesture_rules
//!
//! Prioritized per-frame gesture rule matching over hand-tracking frames.
//!
//! A [`GestureEngine`] holds an ordered list of rules. Each rule is one or
//! two [`HalfRule`]s (one per hand), and each half-rule is an ordered list
//! of [`Test`]s: a named feature from the [`FeatureTable`] plus a caller
//! validator over its value. The host feeds frames in one at a time; the
//! engine classifies each frame independently and fires callbacks
//! synchronously, in registration order.
//!
//! ## Built-in pose features
//!
//! | Feature | Value | Meaning |
//! |---|---|---|
//! | `finger_code` | code | extended-finger bit-code (thumb = bit 0) |
//! | `fist` … `open_palm` | bool | named wrappers over common codes |
//! | `finger_extended` | bool | one finger's extension flag |
//! | `two_fingers_spread` | bool | tip gap above a (finger-aware) threshold |
//! | `all_fingers_spread` | bool | every adjacent pair spread |
//! | `palm_position` … | vector/number | pass-through palm attributes |
//! | `hand_yaw` / `hand_pitch` / `hand_roll` | number | palm orientation angles |
//! | `translation_delta`, `rotation_angle` … | vector/number/matrix | motion vs. an earlier frame |
//!
//! ## Quick start
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gesture_rules::{GestureEngine, HalfRule, Rule, Test};
//! use hand_frame::{FrameBuilder, HandBuilder, HandSide};
//!
//! let mut engine = GestureEngine::new();
//! engine.add_rule(
//!     Rule::one_hand(HalfRule::single(Test::new("fist", |v| {
//!         v.as_bool() == Some(true)
//!     }))),
//!     |hands| println!("fist from the {:?} hand", hands[0].side),
//! )?;
//!
//! let frame = FrameBuilder::new(1)
//!     .hand(HandBuilder::new(HandSide::Right).fist().build())
//!     .build();
//! let summary = engine.process_frame(&frame, &())?;
//! assert_eq!(summary.matched.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! Rules that look back in time (`rotation_angle`, `translation_delta`)
//! take their history from the second `process_frame` argument — pass a
//! `hand_frame::FrameBuffer` there, or `&()` when nothing looks back.

pub mod engine;
pub mod error;
pub mod features;
pub mod rule;

pub use engine::{EngineEvent, GestureEngine, HookCallback, MatchCallback, TickSummary};
pub use error::{RegistrationError, TickError};
pub use features::{ArgKind, FeatureArg, FeatureCtx, FeatureTable, FeatureValue, Signature};
pub use rule::{HalfRule, Rule, RuleOptions, Test, Validator};
