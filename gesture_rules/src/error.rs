//! Error taxonomy: rejected registrations and evaluation-time faults.

use thiserror::Error;

use crate::features::ArgKind;

/// Why a rule (or one of its tests) was refused at registration time.
///
/// Registration is all-or-nothing: any of these leaves the engine's rule
/// list exactly as it was.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("rule has no half-rules")]
    NoHalves,

    #[error("rule has {given} half-rules; a rule targets one or two hands")]
    TooManyHalves { given: usize },

    #[error("half-rule {index} contains no tests")]
    EmptyHalfRule { index: usize },

    #[error("unknown feature method `{method}`")]
    UnknownMethod { method: String },

    #[error("feature `{method}` requires at least {expected} argument(s), got {given}")]
    TooFewArgs {
        method:   String,
        expected: usize,
        given:    usize,
    },

    #[error("feature `{method}` accepts at most {allowed} argument(s), got {given}")]
    TooManyArgs {
        method:  String,
        allowed: usize,
        given:   usize,
    },

    #[error("feature `{method}` argument {index}: expected {expected}, got {found}")]
    ArgKindMismatch {
        method:   String,
        index:    usize,
        expected: ArgKind,
        found:    ArgKind,
    },
}

/// A fault surfaced during a per-frame evaluation pass.
#[derive(Debug, Error)]
pub enum TickError {
    /// A registered test references a method that no longer resolves.
    /// Registration-time checks make this unreachable unless the table
    /// was swapped out from under the rules; surfaced loudly rather than
    /// letting the rule silently never match.
    #[error("feature `{method}` vanished from the table during evaluation")]
    FeatureLookup { method: String },
}
