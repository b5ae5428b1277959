//! Tuple arena and fragment combinators.
//!
//! Every combinator allocates a fresh entry/exit pair and wires the operand
//! fragments between them with epsilon links. The first link out of a state
//! fills `next1`, the second fills `next2`, so link order is branch priority.

use vmregex_core::{AssertKind, CharClass, Machine, Recognizer, StateId, StrSpan, Tuple};

use crate::error::{CompileError, CompileResult};
use crate::length::LengthAnalysis;

/// Resource limits for one compilation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileLimits {
    max_states: usize,
}

impl Default for CompileLimits {
    fn default() -> Self {
        Self { max_states: 65_536 }
    }
}

impl CompileLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_states(mut self, n: usize) -> Self {
        self.max_states = n;
        self
    }

    pub fn get_max_states(&self) -> usize {
        self.max_states
    }
}

#[derive(Clone, Debug)]
pub struct MachineBuilder {
    tuples: Vec<Tuple>,
    strings: Vec<char>,
    limits: CompileLimits,
}

impl MachineBuilder {
    pub fn new(limits: CompileLimits) -> Self {
        Self {
            tuples: Vec::new(),
            strings: Vec::new(),
            limits,
        }
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    pub fn tuple(&self, id: StateId) -> &Tuple {
        &self.tuples[id as usize]
    }

    pub fn tuple_mut(&mut self, id: StateId) -> &mut Tuple {
        &mut self.tuples[id as usize]
    }

    pub fn strings(&self) -> &[char] {
        &self.strings
    }

    /// Appends a literal run to the string pool.
    pub fn push_string(&mut self, run: &[char]) -> StrSpan {
        let span = StrSpan {
            start: self.strings.len() as u32,
            len: run.len() as u32,
        };
        self.strings.extend_from_slice(run);
        span
    }

    pub fn into_parts(self) -> (Vec<Tuple>, Vec<char>) {
        (self.tuples, self.strings)
    }

    pub fn alloc_state(&mut self) -> CompileResult<StateId> {
        let limit = self.limits.get_max_states();
        if self.tuples.len() >= limit {
            return Err(CompileError::OutOfMemory { limit });
        }
        let id = self.tuples.len() as StateId;
        self.tuples.push(Tuple::epsilon());
        Ok(id)
    }

    fn alloc_machine(&mut self) -> CompileResult<Machine> {
        let init = self.alloc_state()?;
        let final_state = self.alloc_state()?;
        Ok(Machine::new(init, final_state))
    }

    /// Adds `to` as the next free successor of `from`.
    pub fn link(&mut self, from: StateId, to: StateId) {
        let tuple = self.tuple_mut(from);
        if tuple.next1.is_none() {
            tuple.next1 = Some(to);
        } else {
            tuple.next2 = Some(to);
        }
    }

    fn set_recognizer(&mut self, id: StateId, recognizer: Recognizer) {
        self.tuple_mut(id).recognizer = recognizer;
    }

    /// Matches the empty string.
    pub fn build_empty(&mut self) -> CompileResult<Machine> {
        let m = self.alloc_machine()?;
        self.link(m.init, m.final_state);
        Ok(m)
    }

    /// A single state testing `recognizer`, followed by the exit.
    pub fn build_special(&mut self, recognizer: Recognizer) -> CompileResult<Machine> {
        let m = self.alloc_machine()?;
        self.set_recognizer(m.init, recognizer);
        self.link(m.init, m.final_state);
        Ok(m)
    }

    pub fn build_char(&mut self, c: char) -> CompileResult<Machine> {
        self.build_special(Recognizer::Literal(c))
    }

    pub fn build_char_range(&mut self, class: CharClass) -> CompileResult<Machine> {
        self.build_special(Recognizer::Range(class))
    }

    pub fn build_group_matcher(&mut self, group: u8) -> CompileResult<Machine> {
        self.build_special(Recognizer::GroupMatch(group))
    }

    pub fn build_concat(&mut self, lhs: Machine, rhs: Machine) -> CompileResult<Machine> {
        let m = self.alloc_machine()?;
        self.link(m.init, lhs.init);
        self.link(lhs.final_state, rhs.init);
        self.link(rhs.final_state, m.final_state);
        Ok(m)
    }

    /// Concatenates `m` onto an accumulator that may still be empty.
    pub fn concat_onto(&mut self, acc: &mut Option<Machine>, m: Machine) -> CompileResult<()> {
        *acc = Some(match acc.take() {
            Some(lhs) => self.build_concat(lhs, m)?,
            None => m,
        });
        Ok(())
    }

    pub fn build_group(&mut self, sub: Machine, group: u8) -> CompileResult<Machine> {
        let m = self.alloc_machine()?;
        self.set_recognizer(m.init, Recognizer::GroupEnter(group));
        self.link(m.init, sub.init);
        self.set_recognizer(sub.final_state, Recognizer::GroupExit(group));
        self.link(sub.final_state, m.final_state);
        Ok(m)
    }

    /// Wraps `sub` as an assertion. The sub-machine stays unlinked from the
    /// outer machine; the matcher runs it as a separate probe.
    pub fn build_assert(&mut self, sub: Machine, kind: AssertKind) -> CompileResult<Machine> {
        let length = LengthAnalysis::new(&self.tuples).measure(sub.init, sub.final_state);
        self.build_special(Recognizer::Assert { kind, sub, length })
    }

    pub fn build_alter(&mut self, lhs: Machine, rhs: Machine) -> CompileResult<Machine> {
        let m = self.alloc_machine()?;
        self.link(m.init, lhs.init);
        self.link(m.init, rhs.init);
        self.link(lhs.final_state, m.final_state);
        self.link(rhs.final_state, m.final_state);
        Ok(m)
    }

    /// Whether some path through `sub` consumes nothing. A walk that runs out
    /// of budget counts as nullable.
    pub fn can_match_empty(&self, sub: Machine) -> bool {
        LengthAnalysis::new(&self.tuples).measure(sub.init, sub.final_state).min == 0
    }

    /// `*`, `+` or `?` over `sub`. A lazy closure links the exit before the
    /// loop-back and marks both splits as preferring the shorter path.
    ///
    /// The loop-back is an unguarded split: a `sub` for which
    /// [`Self::can_match_empty`] holds belongs in [`Self::build_interval`].
    pub fn build_closure(&mut self, sub: Machine, op: char, lazy: bool) -> CompileResult<Machine> {
        let m = self.alloc_machine()?;

        if lazy {
            self.link(sub.final_state, m.final_state);
        } else {
            self.link(m.init, sub.init);
        }

        if op != '?' {
            self.link(sub.final_state, sub.init);
            if lazy {
                self.tuple_mut(sub.final_state).shortest = true;
            }
        }

        if op != '+' {
            self.link(m.init, m.final_state);
            if lazy {
                self.tuple_mut(m.init).shortest = true;
            }
        }

        if lazy {
            self.link(m.init, sub.init);
        } else {
            self.link(sub.final_state, m.final_state);
        }
        Ok(m)
    }

    /// `{min,max}` over `sub`, counting iterations in loop variable `var`.
    pub fn build_interval(
        &mut self,
        sub: Machine,
        min: u32,
        max: Option<u32>,
        var: u8,
        lazy: bool,
    ) -> CompileResult<Machine> {
        let m = self.alloc_machine()?;
        let branch = self.alloc_state()?;

        self.set_recognizer(branch, Recognizer::LoopBranch { min, max, var });
        if lazy {
            self.link(branch, m.final_state);
            self.link(branch, sub.init);
            self.tuple_mut(branch).shortest = true;
        } else {
            self.link(branch, sub.init);
            self.link(branch, m.final_state);
        }
        self.link(sub.final_state, branch);

        self.set_recognizer(m.init, Recognizer::ZeroVar(var));
        self.link(m.init, branch);
        Ok(m)
    }
}
