//! The matcher loop: runs a pattern's tuples from one start offset.
//!
//! A run advances state by state until it reaches the final state of the
//! machine it is in (success) or a state rejects the input (failure). Either
//! outcome is then handed to the frame on top of the backtracking stack,
//! which decides whether to try another path, to keep unwinding, or to
//! resume the outer machine after an assertion.
//!
//! Outcomes are lengths measured from `Cursor::start`. Exhaustive splits move
//! `start` to the split position, so a branch reports how far it got from
//! the split and the split adds the distance it already covered.

use vmregex_core::{
    AssertKind, CompiledPattern, GroupRegisters, Machine, MatchLength, MatchPolicy, Recognizer, StateId, fold_case,
    is_word_char,
};

use super::error::RuntimeError;
use super::stack::{BacktrackStack, Cursor, Frame, FrameKind, Registers};
use super::text::{back_up, char_at, word_after, word_before};
use super::trace::Tracer;

enum Unwind {
    /// A frame found another path; the forward run continues.
    Resume,
    /// Keep unwinding with this outcome.
    Return(Option<usize>),
}

pub(crate) struct Matcher<'a, T: Tracer> {
    pattern: &'a CompiledPattern,
    text: &'a str,
    case_sensitive: bool,
    stack: &'a mut BacktrackStack,
    regs: Registers,
    tracer: &'a mut T,
}

impl<'a, T: Tracer> Matcher<'a, T> {
    pub(crate) fn new(
        pattern: &'a CompiledPattern,
        text: &'a str,
        case_sensitive: bool,
        stack: &'a mut BacktrackStack,
        tracer: &'a mut T,
    ) -> Self {
        Self {
            pattern,
            text,
            case_sensitive,
            stack,
            regs: Registers::default(),
            tracer,
        }
    }

    pub(crate) fn into_groups(self) -> GroupRegisters {
        self.regs.groups
    }

    /// Length matched from `start`, consuming nothing at or past `end`.
    pub(crate) fn run(&mut self, start: usize, end: usize) -> Result<Option<usize>, RuntimeError> {
        self.stack.reset();
        self.regs = Registers::default();

        let machine = self.pattern.machine();
        if machine.is_trivial() {
            self.tracer.trace_return(Some(0));
            return Ok(Some(0));
        }

        let mut cur = Cursor {
            pos: start,
            start,
            end,
            state: machine.init,
            final_state: machine.final_state,
        };
        let result = self.execute(&mut cur);
        self.stack.reset();

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.regs = Registers::default();
                return Err(e);
            }
        };
        if outcome.is_none() {
            self.regs = Registers::default();
        }
        self.tracer.trace_return(outcome);
        Ok(outcome)
    }

    fn execute(&mut self, cur: &mut Cursor) -> Result<Option<usize>, RuntimeError> {
        loop {
            let mut outcome = self.advance(cur)?;
            loop {
                let Some(frame) = self.stack.top().copied() else {
                    return Ok(outcome);
                };
                match self.unwind(frame, outcome, cur)? {
                    Unwind::Resume => break,
                    Unwind::Return(next) => outcome = next,
                }
            }
        }
    }

    fn advance(&mut self, cur: &mut Cursor) -> Result<Option<usize>, RuntimeError> {
        loop {
            if cur.state == cur.final_state {
                return Ok(Some(cur.pos - cur.start));
            }
            self.tracer.trace_state(cur.state, cur.pos);
            if !self.step(cur)? {
                return Ok(None);
            }
        }
    }

    /// Tests the current state. Returns `false` when it rejects the input.
    fn step(&mut self, cur: &mut Cursor) -> Result<bool, RuntimeError> {
        let pattern = self.pattern;
        let text = self.text;
        let cs = self.case_sensitive;
        let tuple = pattern.tuple(cur.state);

        let ok = match &tuple.recognizer {
            Recognizer::Epsilon => {
                if tuple.is_split() {
                    return self.split(cur);
                }
                true
            }
            Recognizer::Literal(want) => self.consume_if(cur, |c| same_char(c, *want, cs)),
            Recognizer::LiteralStr { span, .. } => {
                let mut pos = cur.pos;
                for &want in pattern.literal(*span) {
                    match char_at(text, pos, cur.end) {
                        Some(c) if same_char(c, want, cs) => pos += c.len_utf8(),
                        _ => return Ok(false),
                    }
                }
                cur.pos = pos;
                true
            }
            Recognizer::Wildcard => self.consume_if(cur, |_| true),
            Recognizer::Class { class, negated } => self.consume_if(cur, |c| class.matches(c) != *negated),
            Recognizer::Range(class) => self.consume_if(cur, |c| class.matches(c, cs)),
            Recognizer::WordChar => self.consume_if(cur, is_word_char),
            Recognizer::NonWordChar => self.consume_if(cur, |c| !is_word_char(c)),
            // `^` is the start of the subject, `$` the end of the window.
            Recognizer::TextBegin => cur.pos == 0,
            Recognizer::TextEnd => cur.pos == cur.end,
            Recognizer::LookbackPos => self.stack.lookback_pos() == Some(cur.pos),
            Recognizer::WordBegin => !word_before(text, cur.pos) && word_after(text, cur.pos),
            Recognizer::WordEnd => word_before(text, cur.pos) && !word_after(text, cur.pos),
            Recognizer::WordBoundary => word_before(text, cur.pos) != word_after(text, cur.pos),
            Recognizer::NonWordBoundary => word_before(text, cur.pos) == word_after(text, cur.pos),
            Recognizer::GroupEnter(group) => {
                self.stack.save_group(*group, &self.regs);
                let reg = &mut self.regs.groups[*group as usize];
                reg.start = Some(cur.pos);
                reg.end = None;
                true
            }
            Recognizer::GroupExit(group) => {
                self.stack.save_group(*group, &self.regs);
                self.regs.groups[*group as usize].end = Some(cur.pos);
                true
            }
            Recognizer::GroupMatch(group) => self.match_group(cur, *group),
            Recognizer::Assert { kind, sub, length } => return self.enter_assert(cur, *kind, *sub, *length),
            Recognizer::ZeroVar(var) => {
                self.stack.save_loop(*var, &self.regs);
                self.regs.loops[*var as usize] = Default::default();
                true
            }
            Recognizer::LoopBranch { min, max, var } => return self.loop_branch(cur, *min, *max, *var),
        };

        Ok(ok && goto(cur, tuple.next1))
    }

    fn consume_if(&self, cur: &mut Cursor, pred: impl Fn(char) -> bool) -> bool {
        match char_at(self.text, cur.pos, cur.end) {
            Some(c) if pred(c) => {
                cur.pos += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Back-reference: the group's captured text must follow. An unset group
    /// matches nothing.
    fn match_group(&self, cur: &mut Cursor, group: u8) -> bool {
        let Some(captured) = self.regs.groups[group as usize].text(self.text) else {
            return false;
        };
        let mut pos = cur.pos;
        for want in captured.chars() {
            match char_at(self.text, pos, cur.end) {
                Some(c) if same_char(c, want, self.case_sensitive) => pos += c.len_utf8(),
                _ => return false,
            }
        }
        cur.pos = pos;
        true
    }

    fn split(&mut self, cur: &mut Cursor) -> Result<bool, RuntimeError> {
        let kind = if self.pattern.flags().policy.is_exhaustive() {
            FrameKind::FirstBranch
        } else {
            FrameKind::Alternative
        };
        self.tracer.trace_push(kind, cur.state, cur.pos);
        self.stack.push(kind, *cur)?;
        if kind == FrameKind::FirstBranch {
            cur.start = cur.pos;
        }
        let first = self.pattern.tuple(cur.state).next1;
        Ok(self.take_edge(cur, first))
    }

    fn loop_branch(&mut self, cur: &mut Cursor, min: u32, max: Option<u32>, var: u8) -> Result<bool, RuntimeError> {
        let counter = self.regs.loops[var as usize];
        let (enter, bypass) = self.pattern.tuple(cur.state).loop_targets();

        if counter.count < min {
            return Ok(self.take_edge(cur, enter));
        }
        if max.is_some_and(|max| counter.count >= max) {
            return Ok(goto(cur, bypass));
        }
        // The last iteration consumed nothing; another one would too.
        if counter.entered_at == Some(cur.pos) {
            return Ok(goto(cur, bypass));
        }
        self.split(cur)
    }

    /// Moves along the edge to `target`. Entering an interval body starts a
    /// new iteration.
    fn take_edge(&mut self, cur: &mut Cursor, target: Option<StateId>) -> bool {
        let Some(target) = target else {
            return false;
        };
        let tuple = self.pattern.tuple(cur.state);
        if let Recognizer::LoopBranch { var, .. } = tuple.recognizer
            && tuple.loop_targets().0 == Some(target)
        {
            self.stack.save_loop(var, &self.regs);
            let counter = &mut self.regs.loops[var as usize];
            counter.count = counter.count.saturating_add(1);
            counter.entered_at = Some(cur.pos);
        }
        cur.state = target;
        true
    }

    fn enter_assert(
        &mut self,
        cur: &mut Cursor,
        kind: AssertKind,
        sub: Machine,
        length: MatchLength,
    ) -> Result<bool, RuntimeError> {
        if !kind.is_lookbehind() {
            self.tracer.trace_push(FrameKind::Assertion, cur.state, cur.pos);
            self.stack.push(FrameKind::Assertion, *cur)?;
            *cur = sub_cursor(sub, cur.pos, cur.end);
            return Ok(true);
        }

        // The shortest possible lookbehind text does not fit before `pos`.
        let Some(probe) = back_up(self.text, cur.pos, length.min) else {
            let holds = kind.is_negative();
            self.tracer.trace_assert(cur.state, holds);
            let next = self.pattern.tuple(cur.state).next1;
            return Ok(holds && goto(cur, next));
        };

        self.tracer.trace_push(FrameKind::Assertion, cur.state, cur.pos);
        let frame = self.stack.push(FrameKind::Assertion, *cur)?;
        frame.probe = probe;
        *cur = sub_cursor(sub, probe, cur.pos);
        Ok(true)
    }

    fn unwind(&mut self, frame: Frame, outcome: Option<usize>, cur: &mut Cursor) -> Result<Unwind, RuntimeError> {
        match frame.kind {
            FrameKind::Alternative => {
                if outcome.is_some() {
                    self.stack.commit();
                    self.tracer.trace_commit(frame.kind);
                    return Ok(Unwind::Return(outcome));
                }
                self.stack.pop(&mut self.regs);
                *cur = frame.cursor;
                self.tracer.trace_backtrack(cur.state, cur.pos);
                let second = self.pattern.tuple(cur.state).next2;
                Ok(self.resume_or_fail(cur, second))
            }
            FrameKind::FirstBranch => {
                self.stack
                    .swap_and_push(outcome, FrameKind::SecondBranch, cur, &mut self.regs)?;
                self.tracer.trace_backtrack(cur.state, cur.pos);
                cur.start = cur.pos;
                let second = self.pattern.tuple(cur.state).next2;
                Ok(self.resume_or_fail(cur, second))
            }
            FrameKind::SecondBranch => Ok(Unwind::Return(self.pick_branch(frame, outcome, cur))),
            FrameKind::Assertion => self.finish_assert(frame, outcome, cur),
        }
    }

    fn resume_or_fail(&mut self, cur: &mut Cursor, target: Option<StateId>) -> Unwind {
        if self.take_edge(cur, target) {
            Unwind::Resume
        } else {
            Unwind::Return(None)
        }
    }

    /// Both branches of an exhaustive split have run; keeps the preferred one.
    fn pick_branch(&mut self, frame: Frame, second: Option<usize>, cur: &mut Cursor) -> Option<usize> {
        let split = frame.cursor;
        let first = self.stack.below_top().and_then(|f| f.ret);
        let covered = split.pos - split.start;
        let shorter = self.pattern.flags().policy == MatchPolicy::Shortest || self.pattern.tuple(split.state).shortest;

        let first_wins = match (first, second) {
            (None, None) => {
                self.stack.pop(&mut self.regs);
                self.stack.discard();
                return None;
            }
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(a), Some(b)) if shorter => a <= b,
            (Some(a), Some(b)) => a >= b,
        };

        if first_wins {
            self.stack.pop(&mut self.regs);
            self.stack.swap_and_pop(cur, &mut self.regs);
            self.tracer.trace_commit(FrameKind::FirstBranch);
            first.map(|len| len + covered)
        } else {
            self.stack.discard_below_top();
            self.stack.commit();
            self.tracer.trace_commit(FrameKind::SecondBranch);
            second.map(|len| len + covered)
        }
    }

    fn finish_assert(&mut self, frame: Frame, outcome: Option<usize>, cur: &mut Cursor) -> Result<Unwind, RuntimeError> {
        let pattern = self.pattern;
        let tuple = pattern.tuple(frame.cursor.state);
        let Recognizer::Assert { kind, sub, length } = &tuple.recognizer else {
            self.stack.pop(&mut self.regs);
            return Ok(Unwind::Return(None));
        };

        // A failed lookbehind probe retries one char further back, up to the
        // longest text the sub-machine can match.
        if outcome.is_none() && kind.is_lookbehind() {
            let reach = length.min + frame.iter as usize + 1;
            if length.max.is_none_or(|max| reach <= max)
                && let Some(probe) = back_up(self.text, frame.probe, 1)
            {
                self.stack.pop(&mut self.regs);
                let retry = self.stack.push(FrameKind::Assertion, frame.cursor)?;
                retry.iter = frame.iter + 1;
                retry.probe = probe;
                *cur = sub_cursor(*sub, probe, frame.cursor.pos);
                self.tracer.trace_backtrack(sub.init, probe);
                return Ok(Unwind::Resume);
            }
        }

        let matched = outcome.is_some();
        let holds = matched != kind.is_negative();
        if matched && !kind.is_negative() {
            self.stack.commit();
        } else {
            self.stack.pop(&mut self.regs);
        }
        self.tracer.trace_assert(frame.cursor.state, holds);

        if !holds {
            return Ok(Unwind::Return(None));
        }
        *cur = frame.cursor;
        if goto(cur, tuple.next1) {
            Ok(Unwind::Resume)
        } else {
            Ok(Unwind::Return(None))
        }
    }
}

fn sub_cursor(sub: Machine, pos: usize, end: usize) -> Cursor {
    Cursor {
        pos,
        start: pos,
        end,
        state: sub.init,
        final_state: sub.final_state,
    }
}

fn goto(cur: &mut Cursor, next: Option<StateId>) -> bool {
    match next {
        Some(next) => {
            cur.state = next;
            true
        }
        None => false,
    }
}

fn same_char(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && fold_case(a) == fold_case(b))
}
