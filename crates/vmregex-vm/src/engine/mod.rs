//! Matching engine: backtracking stack, matcher loop, searcher entry points.

mod error;
mod matcher;
mod searcher;
mod stack;
mod text;
mod trace;

#[cfg(test)]
mod matcher_tests;
#[cfg(test)]
mod searcher_tests;

pub use error::RuntimeError;
pub use searcher::{Searcher, SearcherBuilder, StackLimits};
pub use stack::{BacktrackStack, Cursor, Frame, FrameKind, LoopCounter};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
