//! Runtime for executing compiled vmregex patterns.
//!
//! The matcher interprets a pattern's tuple arena with an explicit
//! backtracking stack; it never recurses on the host stack.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    BacktrackStack, FrameKind, LoopCounter, NoopTracer, PrintTracer, RuntimeError, Searcher, SearcherBuilder,
    StackLimits, Tracer, Verbosity,
};
