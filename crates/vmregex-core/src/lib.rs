#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! State-machine data model shared by the vmregex compiler and matcher.
//!
//! A compiled pattern is a flat arena of [`Tuple`]s addressed by [`StateId`].
//! Each tuple carries one [`Recognizer`] and at most two successor states.
//! Fragments of the arena are described by a [`Machine`] (entry and exit state).

mod class;
mod dump;
mod length;
mod pattern;
mod register;
mod tuple;

#[cfg(test)]
mod pattern_tests;

pub use class::{CharClass, ClassItem, NamedClass, fold_case, is_word_char, named_literal};
pub use length::MatchLength;
pub use pattern::{CodecError, CompiledPattern, MatchPolicy, PatternFlags, PatternParts, SearchPreference};
pub use register::{GroupRegister, GroupRegisters, Match, unset_registers};
pub use tuple::{AssertKind, Machine, Recognizer, StateId, StrSpan, Tuple};

/// Number of capture registers a search fills.
pub const GROUP_REG_COUNT: usize = 10;

/// Maximum number of simultaneously open groups in a pattern.
pub const GROUP_NESTING_MAX: usize = 20;

/// Loop-variable slots: one per group nesting depth, including depth zero.
pub const LOOP_VARS_MAX: usize = GROUP_NESTING_MAX + 1;
