//! Searcher that keeps the registers of its last operation.

use vmregex_core::{CompiledPattern, GroupRegister, GroupRegisters, Match, unset_registers};
use vmregex_vm::Searcher;

use crate::Result;
use crate::report::MatchReport;

/// Owns a [`Searcher`] plus the group registers, the last match and the group
/// count of the most recent operation.
///
/// Windows are given as a start offset and a byte length into the whole
/// subject. `^` still sees the whole subject; `$` matches at the window end.
pub struct SimpleSearcher {
    searcher: Searcher,
    regs: GroupRegisters,
    last_match: Option<Match>,
    group_count: usize,
}

impl Default for SimpleSearcher {
    fn default() -> Self {
        Self::with_searcher(Searcher::new())
    }
}

impl SimpleSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_searcher(searcher: Searcher) -> Self {
        Self {
            searcher,
            regs: unset_registers(),
            last_match: None,
            group_count: 0,
        }
    }

    /// Anchored match at `start`. Returns the matched length.
    pub fn match_pattern(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        start: usize,
        len: usize,
    ) -> Result<Option<usize>> {
        self.begin(pattern);
        let end = start.saturating_add(len);
        let matched = self.searcher.match_at(pattern, text, start, end, &mut self.regs)?;
        self.last_match = matched.map(|len| Match::new(start, len));
        Ok(matched)
    }

    /// First match inside `[start, start + len)`.
    pub fn search_for_pattern(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        start: usize,
        len: usize,
    ) -> Result<Option<Match>> {
        self.begin(pattern);
        let end = start.saturating_add(len);
        let found = self.searcher.search(pattern, text, start, end, &mut self.regs)?;
        self.last_match = found;
        Ok(found)
    }

    /// Closest match ending at or before `limit`. The match's distance back
    /// from the limit is [`Match::distance_before`].
    pub fn search_back_for_pattern(
        &mut self,
        pattern: &CompiledPattern,
        text: &str,
        limit: usize,
    ) -> Result<Option<Match>> {
        self.begin(pattern);
        let found = self.searcher.search_back(pattern, text, 0, limit, &mut self.regs)?;
        self.last_match = found;
        Ok(found)
    }

    /// Compiles `source` for a single match; the pattern is dropped afterwards.
    pub fn compile_and_match(&mut self, source: &str, text: &str, start: usize, len: usize) -> Result<Option<usize>> {
        let pattern = self.compile_transient(source)?;
        self.match_pattern(&pattern, text, start, len)
    }

    pub fn compile_and_search(&mut self, source: &str, text: &str, start: usize, len: usize) -> Result<Option<Match>> {
        let pattern = self.compile_transient(source)?;
        self.search_for_pattern(&pattern, text, start, len)
    }

    pub fn compile_and_search_back(&mut self, source: &str, text: &str, limit: usize) -> Result<Option<Match>> {
        let pattern = self.compile_transient(source)?;
        self.search_back_for_pattern(&pattern, text, limit)
    }

    /// Register of group `index` (0-based), if the last pattern has it.
    pub fn group_reg(&self, index: usize) -> Option<&GroupRegister> {
        self.regs[..self.group_count].get(index)
    }

    pub fn group_regs(&self) -> &GroupRegisters {
        &self.regs
    }

    /// Text captured by group `index` (0-based) in `subject`.
    pub fn group_text<'s>(&self, index: usize, subject: &'s str) -> Option<&'s str> {
        self.group_reg(index)?.text(subject)
    }

    pub fn last_match(&self) -> Option<Match> {
        self.last_match
    }

    /// Capturing groups of the last pattern.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn clear_group_regs(&mut self) {
        self.regs = unset_registers();
    }

    /// The last match and its groups as text of `subject`.
    pub fn report(&self, subject: &str) -> Option<MatchReport> {
        let found = self.last_match?;
        Some(MatchReport::new(found, &self.regs[..self.group_count], subject))
    }

    fn begin(&mut self, pattern: &CompiledPattern) {
        self.clear_group_regs();
        self.last_match = None;
        self.group_count = pattern.group_count();
    }

    fn compile_transient(&mut self, source: &str) -> Result<CompiledPattern> {
        self.group_count = 0;
        self.last_match = None;
        self.clear_group_regs();
        crate::compile_pattern(source)
    }
}
