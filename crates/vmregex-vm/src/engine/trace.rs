//! Tracing hooks for matcher execution.
//!
//! The matcher is generic over [`Tracer`]. With [`NoopTracer`] every hook is
//! an empty `#[inline(always)]` function and the calls compile away.
//! [`PrintTracer`] renders each event as one line for debugging.

use vmregex_core::{CompiledPattern, StateId};

use super::stack::FrameKind;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Attempts, pushes, backtracks, assertions and outcomes.
    #[default]
    Default,
    /// Also every state visited.
    Verbose,
}

pub trait Tracer {
    /// Called once per anchored attempt, before the first state runs.
    fn trace_attempt(&mut self, start: usize);

    /// Called before a state is tested at `pos`.
    fn trace_state(&mut self, state: StateId, pos: usize);

    /// Called when a frame is pushed at a split or assertion.
    fn trace_push(&mut self, kind: FrameKind, state: StateId, pos: usize);

    /// Called when matching resumes from a frame after a failure.
    fn trace_backtrack(&mut self, state: StateId, pos: usize);

    /// Called when a frame is popped keeping its writes.
    fn trace_commit(&mut self, kind: FrameKind);

    /// Called when an assertion has been decided.
    fn trace_assert(&mut self, state: StateId, holds: bool);

    /// Called with the outcome of an attempt.
    fn trace_return(&mut self, outcome: Option<usize>);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_attempt(&mut self, _start: usize) {}

    #[inline(always)]
    fn trace_state(&mut self, _state: StateId, _pos: usize) {}

    #[inline(always)]
    fn trace_push(&mut self, _kind: FrameKind, _state: StateId, _pos: usize) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _state: StateId, _pos: usize) {}

    #[inline(always)]
    fn trace_commit(&mut self, _kind: FrameKind) {}

    #[inline(always)]
    fn trace_assert(&mut self, _state: StateId, _holds: bool) {}

    #[inline(always)]
    fn trace_return(&mut self, _outcome: Option<usize>) {}
}

/// Tracer that collects one line per event.
pub struct PrintTracer<'p> {
    pattern: &'p CompiledPattern,
    verbosity: Verbosity,
    lines: Vec<String>,
}

impl<'p> PrintTracer<'p> {
    pub fn new(pattern: &'p CompiledPattern, verbosity: Verbosity) -> Self {
        Self {
            pattern,
            verbosity,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

fn frame_name(kind: FrameKind) -> &'static str {
    match kind {
        FrameKind::Alternative => "alt",
        FrameKind::FirstBranch => "branch1",
        FrameKind::SecondBranch => "branch2",
        FrameKind::Assertion => "assert",
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_attempt(&mut self, start: usize) {
        self.push(format!("attempt @{start}"));
    }

    fn trace_state(&mut self, state: StateId, pos: usize) {
        if self.verbosity == Verbosity::Verbose {
            let line = format!("  @{pos} {}", self.pattern.describe_state(state));
            self.push(line);
        }
    }

    fn trace_push(&mut self, kind: FrameKind, state: StateId, pos: usize) {
        self.push(format!("  @{pos} push {} S{state}", frame_name(kind)));
    }

    fn trace_backtrack(&mut self, state: StateId, pos: usize) {
        self.push(format!("  @{pos} backtrack S{state}"));
    }

    fn trace_commit(&mut self, kind: FrameKind) {
        if self.verbosity == Verbosity::Verbose {
            self.push(format!("  commit {}", frame_name(kind)));
        }
    }

    fn trace_assert(&mut self, state: StateId, holds: bool) {
        let verdict = if holds { "holds" } else { "fails" };
        self.push(format!("  S{state} {verdict}"));
    }

    fn trace_return(&mut self, outcome: Option<usize>) {
        match outcome {
            Some(len) => self.push(format!("matched {len}")),
            None => self.push("no match".to_owned()),
        }
    }
}
