//! Anchored matching and forward/backward search over a subject buffer.
//!
//! All offsets are byte offsets into the whole subject. `^` and the
//! word-boundary tests look at the whole subject; `$` and consumption stop at
//! the end of the window being searched.

use vmregex_core::{CompiledPattern, GroupRegisters, Match, MatchPolicy, SearchPreference, unset_registers};

use super::error::RuntimeError;
use super::matcher::Matcher;
use super::stack::BacktrackStack;
use super::text::{char_before, check_offset};
use super::trace::{NoopTracer, Tracer};

/// Size cap of the backtracking stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackLimits {
    /// Maximum bytes of frames and saved registers (default: 16 MiB).
    pub(crate) max_bytes: usize,
    /// Bytes granted per growth step (default: 8192).
    pub(crate) grow_by: usize,
}

impl Default for StackLimits {
    fn default() -> Self {
        Self {
            max_bytes: 16 * 1024 * 1024,
            grow_by: 8192,
        }
    }
}

impl StackLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_bytes(mut self, bytes: usize) -> Self {
        self.max_bytes = bytes;
        self
    }

    /// Set the growth step. Zero is raised to one byte.
    pub fn grow_by(mut self, bytes: usize) -> Self {
        self.grow_by = bytes.max(1);
        self
    }

    pub fn get_max_bytes(&self) -> usize {
        self.max_bytes
    }
    pub fn get_grow_by(&self) -> usize {
        self.grow_by
    }
}

pub struct SearcherBuilder {
    limits: StackLimits,
    case_sensitive: bool,
}

impl Default for SearcherBuilder {
    fn default() -> Self {
        Self {
            limits: StackLimits::default(),
            case_sensitive: true,
        }
    }
}

impl SearcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: StackLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn max_stack_bytes(mut self, bytes: usize) -> Self {
        self.limits = self.limits.max_bytes(bytes);
        self
    }

    /// Case sensitivity for patterns without a `<Case>`/`<NoCase>` toggle.
    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    pub fn build(self) -> Searcher {
        Searcher {
            stack: BacktrackStack::new(self.limits),
            case_sensitive: self.case_sensitive,
        }
    }
}

/// Reusable matching state: the backtracking stack and the default case mode.
///
/// A searcher is not shared; patterns are.
pub struct Searcher {
    stack: BacktrackStack,
    case_sensitive: bool,
}

impl Default for Searcher {
    fn default() -> Self {
        SearcherBuilder::default().build()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> SearcherBuilder {
        SearcherBuilder::new()
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn limits(&self) -> StackLimits {
        self.stack.limits()
    }

    /// Matches anchored at `start`, consuming nothing at or past `end`.
    ///
    /// Returns the matched length. `regs` receives the captures on success and
    /// is cleared on failure.
    pub fn match_at(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        start: usize,
        end: usize,
        regs: &mut GroupRegisters,
    ) -> Result<Option<usize>, RuntimeError> {
        self.match_at_with(pattern, text, start, end, regs, &mut NoopTracer)
    }

    pub fn match_at_with<T: Tracer>(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        start: usize,
        end: usize,
        regs: &mut GroupRegisters,
        tracer: &mut T,
    ) -> Result<Option<usize>, RuntimeError> {
        check_window(text, start, end)?;
        self.attempt(pattern, text, start, end, regs, tracer)
    }

    /// Scans start offsets `start..=end` for a match inside `[start, end)`.
    pub fn search(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        start: usize,
        end: usize,
        regs: &mut GroupRegisters,
    ) -> Result<Option<Match>, RuntimeError> {
        self.search_with(pattern, text, start, end, regs, &mut NoopTracer)
    }

    pub fn search_with<T: Tracer>(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        start: usize,
        end: usize,
        regs: &mut GroupRegisters,
        tracer: &mut T,
    ) -> Result<Option<Match>, RuntimeError> {
        check_window(text, start, end)?;
        let flags = pattern.flags();
        let min = pattern.match_length().min;

        let mut best: Option<(Match, GroupRegisters)> = None;
        let mut max_start = end;
        let mut pos = start;
        loop {
            if end - pos < min {
                break;
            }
            if let Some(len) = self.attempt(pattern, text, pos, end, regs, tracer)? {
                let found = Match::new(pos, len);
                if flags.preference == SearchPreference::FirstBegin {
                    return Ok(Some(found));
                }
                let keep = match &best {
                    None => true,
                    Some((prev, _)) if found.end() < prev.end() => true,
                    Some((prev, _)) => found.end() == prev.end() && flags.policy == MatchPolicy::Shortest,
                };
                if keep {
                    // Later starts cannot end before this match does.
                    max_start = found.end();
                    best = Some((found, *regs));
                }
            }

            if pos >= max_start {
                break;
            }
            match text[pos..].chars().next() {
                Some(c) => pos += c.len_utf8(),
                None => break,
            }
        }

        Ok(finish(best, regs))
    }

    /// Scans start offsets backwards from `limit` down to `start` for a match
    /// ending at or before `limit`.
    pub fn search_back(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        start: usize,
        limit: usize,
        regs: &mut GroupRegisters,
    ) -> Result<Option<Match>, RuntimeError> {
        self.search_back_with(pattern, text, start, limit, regs, &mut NoopTracer)
    }

    pub fn search_back_with<T: Tracer>(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        start: usize,
        limit: usize,
        regs: &mut GroupRegisters,
        tracer: &mut T,
    ) -> Result<Option<Match>, RuntimeError> {
        check_window(text, start, limit)?;
        let flags = pattern.flags();
        let length = pattern.match_length();

        let mut best: Option<(Match, GroupRegisters)> = None;
        let mut pos = limit;
        loop {
            if let (Some((prev, _)), Some(max)) = (&best, length.max)
                && pos.saturating_add(max.saturating_mul(4)) < prev.end()
            {
                break;
            }

            if limit - pos >= length.min
                && let Some(len) = self.attempt(pattern, text, pos, limit, regs, tracer)?
            {
                let found = Match::new(pos, len);
                if flags.preference == SearchPreference::FirstEnd {
                    return Ok(Some(found));
                }
                let keep = match &best {
                    None => true,
                    Some((prev, _)) if found.end() > prev.end() => true,
                    Some((prev, _)) => found.end() == prev.end() && flags.policy != MatchPolicy::Shortest,
                };
                if keep {
                    best = Some((found, *regs));
                }
            }

            if pos <= start {
                break;
            }
            match char_before(text, pos) {
                Some(c) => pos -= c.len_utf8(),
                None => break,
            }
        }

        Ok(finish(best, regs))
    }

    fn attempt<T: Tracer>(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        start: usize,
        end: usize,
        regs: &mut GroupRegisters,
        tracer: &mut T,
    ) -> Result<Option<usize>, RuntimeError> {
        tracer.trace_attempt(start);
        let case_sensitive = pattern.flags().case_sensitive_or(self.case_sensitive);
        let mut matcher = Matcher::new(pattern, text, case_sensitive, &mut self.stack, tracer);
        let outcome = matcher.run(start, end);
        *regs = matcher.into_groups();
        outcome
    }
}

fn check_window(text: &str, start: usize, end: usize) -> Result<(), RuntimeError> {
    check_offset(text, start)?;
    check_offset(text, end)?;
    if start > end {
        return Err(RuntimeError::InvalidOffset { offset: start });
    }
    Ok(())
}

fn finish(best: Option<(Match, GroupRegisters)>, regs: &mut GroupRegisters) -> Option<Match> {
    match best {
        Some((found, saved)) => {
            *regs = saved;
            Some(found)
        }
        None => {
            *regs = unset_registers();
            None
        }
    }
}
