//! Backtracking stack with selective register snapshots.
//!
//! Each frame remembers where matching stood when it was pushed. Group
//! registers and loop counters are not copied wholesale: the first time a
//! register changes while a frame is on top, its old value is saved into that
//! frame. Popping the frame writes the saved values back.
//!
//! Saved values of all frames share one arena; a frame owns the entries from
//! its `saves_base` up to the next frame's base.

use std::mem::size_of;

use vmregex_core::{GROUP_REG_COUNT, GroupRegister, GroupRegisters, LOOP_VARS_MAX, StateId, unset_registers};

use super::error::RuntimeError;
use super::searcher::StackLimits;

/// Iteration count of one interval, and where its last iteration started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopCounter {
    pub count: u32,
    pub entered_at: Option<usize>,
}

/// Live mutable state of a match attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    pub groups: GroupRegisters,
    pub loops: [LoopCounter; LOOP_VARS_MAX],
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            groups: unset_registers(),
            loops: [LoopCounter::default(); LOOP_VARS_MAX],
        }
    }
}

/// Position of the matcher inside one machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub pos: usize,
    /// Where the current outcome is measured from.
    pub start: usize,
    /// Consumption stops here.
    pub end: usize,
    pub state: StateId,
    pub final_state: StateId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// Priority split: the second branch runs only if the first fails.
    Alternative,
    /// Exhaustive split, first branch running.
    FirstBranch,
    /// Exhaustive split, second branch running. The frame below holds the
    /// first branch's outcome.
    SecondBranch,
    /// An assertion's sub-machine is running.
    Assertion,
}

#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub kind: FrameKind,
    pub cursor: Cursor,
    /// Lookbehind retries so far.
    pub iter: u32,
    /// Where the current lookbehind probe started.
    pub probe: usize,
    /// Outcome of the first branch of an exhaustive split.
    pub ret: Option<usize>,
    saves_base: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Group(u8),
    Loop(u8),
}

#[derive(Clone, Copy, Debug)]
enum Saved {
    Group(u8, GroupRegister),
    Loop(u8, LoopCounter),
}

impl Saved {
    fn slot(&self) -> Slot {
        match *self {
            Self::Group(id, _) => Slot::Group(id),
            Self::Loop(id, _) => Slot::Loop(id),
        }
    }

    fn restore(self, regs: &mut Registers) {
        match self {
            Self::Group(id, reg) => regs.groups[id as usize] = reg,
            Self::Loop(id, counter) => regs.loops[id as usize] = counter,
        }
    }

    fn exchange(&mut self, regs: &mut Registers) {
        match self {
            Self::Group(id, reg) => std::mem::swap(reg, &mut regs.groups[*id as usize]),
            Self::Loop(id, counter) => std::mem::swap(counter, &mut regs.loops[*id as usize]),
        }
    }
}

const FRAME_BYTES: usize = size_of::<Frame>();
const SAVE_BYTES: usize = size_of::<Saved>();
/// Room for a frame that ends up saving every register.
const FULL_SAVES: usize = GROUP_REG_COUNT + LOOP_VARS_MAX;

#[derive(Debug)]
pub struct BacktrackStack {
    frames: Vec<Frame>,
    saves: Vec<Saved>,
    limits: StackLimits,
    /// Bytes granted so far, grown in `grow_by` steps.
    capacity: usize,
}

impl BacktrackStack {
    pub fn new(limits: StackLimits) -> Self {
        Self {
            frames: Vec::new(),
            saves: Vec::new(),
            limits,
            capacity: 0,
        }
    }

    pub fn limits(&self) -> StackLimits {
        self.limits
    }

    /// Empties the stack; the granted capacity is kept.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.saves.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn byte_capacity(&self) -> usize {
        self.capacity
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    pub fn below_top(&self) -> Option<&Frame> {
        self.frames.len().checked_sub(2).map(|i| &self.frames[i])
    }

    pub fn push(&mut self, kind: FrameKind, cursor: Cursor) -> Result<&mut Frame, RuntimeError> {
        self.reserve()?;
        self.frames.push(Frame {
            kind,
            cursor,
            iter: 0,
            probe: cursor.pos,
            ret: None,
            saves_base: self.saves.len(),
        });
        let len = self.frames.len();
        Ok(&mut self.frames[len - 1])
    }

    fn reserve(&mut self) -> Result<(), RuntimeError> {
        let needed = (self.frames.len() + 1) * FRAME_BYTES + (self.saves.len() + FULL_SAVES) * SAVE_BYTES;
        let max = self.limits.get_max_bytes();
        while self.capacity < needed {
            if self.capacity >= max {
                return Err(RuntimeError::StackOverflow { limit: max });
            }
            self.capacity = (self.capacity + self.limits.get_grow_by()).min(max);
        }
        Ok(())
    }

    /// Remembers group `id` before it changes, once per top frame.
    pub fn save_group(&mut self, id: u8, regs: &Registers) {
        self.save(Saved::Group(id, regs.groups[id as usize]));
    }

    /// Remembers loop variable `id` before it changes, once per top frame.
    pub fn save_loop(&mut self, id: u8, regs: &Registers) {
        self.save(Saved::Loop(id, regs.loops[id as usize]));
    }

    fn save(&mut self, entry: Saved) {
        let Some(top) = self.frames.last() else {
            return;
        };
        let slot = entry.slot();
        if !self.saves[top.saves_base..].iter().any(|s| s.slot() == slot) {
            self.saves.push(entry);
        }
    }

    /// Pops the top frame and restores everything saved in it.
    pub fn pop(&mut self, regs: &mut Registers) -> Option<Frame> {
        let frame = self.frames.pop()?;
        for entry in self.saves.drain(frame.saves_base..).rev() {
            entry.restore(regs);
        }
        Some(frame)
    }

    /// Pops the top frame, dropping its saved values.
    pub fn discard(&mut self) -> Option<Frame> {
        let frame = self.frames.pop()?;
        self.saves.truncate(frame.saves_base);
        Some(frame)
    }

    /// Pops the top frame, keeping the live registers. Its saved values are
    /// handed to the parent frame unless the parent saved that slot already.
    pub fn commit(&mut self) -> Option<Frame> {
        let frame = self.frames.pop()?;
        let base = frame.saves_base;
        let Some(parent) = self.frames.last() else {
            self.saves.truncate(base);
            return Some(frame);
        };

        let parent_base = parent.saves_base;
        let mut keep = base;
        for i in base..self.saves.len() {
            let entry = self.saves[i];
            let slot = entry.slot();
            if !self.saves[parent_base..keep].iter().any(|s| s.slot() == slot) {
                self.saves[keep] = entry;
                keep += 1;
            }
        }
        self.saves.truncate(keep);
        Some(frame)
    }

    /// Removes the frame under the top one along with its saved values.
    pub fn discard_below_top(&mut self) {
        let Some(below) = self.frames.len().checked_sub(2) else {
            return;
        };
        let base = self.frames[below].saves_base;
        let top_base = self.frames[below + 1].saves_base;
        self.saves.drain(base..top_base);
        self.frames.remove(below);
        self.frames[below].saves_base = base;
    }

    /// Exchanges the live cursor and registers with the top frame's.
    pub fn swap(&mut self, cursor: &mut Cursor, regs: &mut Registers) {
        let Some(top) = self.frames.last_mut() else {
            return;
        };
        std::mem::swap(&mut top.cursor, cursor);
        for entry in &mut self.saves[top.saves_base..] {
            entry.exchange(regs);
        }
    }

    /// Parks the first branch's outcome in the top frame, restores the state
    /// the split started from, and pushes a frame for the second branch.
    pub fn swap_and_push(
        &mut self,
        ret: Option<usize>,
        kind: FrameKind,
        cursor: &mut Cursor,
        regs: &mut Registers,
    ) -> Result<(), RuntimeError> {
        self.swap(cursor, regs);
        if let Some(top) = self.frames.last_mut() {
            top.ret = ret;
        }
        self.push(kind, *cursor)?;
        Ok(())
    }

    /// Brings the parked first-branch state back live and commits the frame.
    pub fn swap_and_pop(&mut self, cursor: &mut Cursor, regs: &mut Registers) -> Option<Frame> {
        self.swap(cursor, regs);
        self.commit()
    }

    /// Offset the innermost running assertion is anchored to.
    pub fn lookback_pos(&self) -> Option<usize> {
        self.frames
            .iter()
            .rev()
            .find(|f| f.kind == FrameKind::Assertion)
            .map(|f| f.cursor.pos)
    }
}
