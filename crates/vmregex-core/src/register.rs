use serde::{Deserialize, Serialize};

use crate::GROUP_REG_COUNT;

/// Byte offsets captured by one group. A register is set once both ends are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRegister {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl GroupRegister {
    pub const UNSET: Self = Self {
        start: None,
        end: None,
    };

    pub fn is_set(&self) -> bool {
        self.range().is_some()
    }

    pub fn range(&self) -> Option<std::ops::Range<usize>> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start <= end => Some(start..end),
            _ => None,
        }
    }

    pub fn len(&self) -> Option<usize> {
        self.range().map(|r| r.len())
    }

    /// The captured slice of `subject`.
    pub fn text<'s>(&self, subject: &'s str) -> Option<&'s str> {
        subject.get(self.range()?)
    }
}

pub type GroupRegisters = [GroupRegister; GROUP_REG_COUNT];

pub fn unset_registers() -> GroupRegisters {
    [GroupRegister::UNSET; GROUP_REG_COUNT]
}

/// A match in absolute byte offsets of the subject buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub start: usize,
    pub len: usize,
}

impl Match {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }

    pub fn text<'s>(&self, subject: &'s str) -> Option<&'s str> {
        subject.get(self.range())
    }

    /// Distance in bytes from the start of the match back to `limit`.
    pub fn distance_before(&self, limit: usize) -> usize {
        limit.saturating_sub(self.start)
    }
}
