//! The immutable compiled pattern and its binary form.

use serde::{Deserialize, Serialize};

use crate::length::MatchLength;
use crate::tuple::{Machine, Recognizer, StateId, StrSpan, Tuple};
use crate::{GROUP_REG_COUNT, LOOP_VARS_MAX};

/// How a match is chosen among the paths that reach the final state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPolicy {
    /// The first path in preference order wins.
    #[default]
    FirstMatch,
    /// Every split is explored; the longer outcome wins.
    Longest,
    /// Every split is explored; the shorter outcome wins.
    Shortest,
}

impl MatchPolicy {
    pub fn is_exhaustive(self) -> bool {
        !matches!(self, Self::FirstMatch)
    }
}

/// Which match a search reports when several start positions match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPreference {
    #[default]
    FirstBegin,
    FirstEnd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFlags {
    /// `None` when the pattern has no case toggle; the searcher decides.
    pub case_sensitive: Option<bool>,
    pub policy: MatchPolicy,
    pub preference: SearchPreference,
}

impl PatternFlags {
    pub fn case_sensitive_or(&self, default: bool) -> bool {
        self.case_sensitive.unwrap_or(default)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("binary codec error: {0}")]
    Binary(#[from] postcard::Error),
    #[error("malformed compiled pattern at state {state}")]
    Malformed { state: StateId },
}

/// Everything the compiler produces, handed over in one piece.
#[derive(Clone, Debug)]
pub struct PatternParts {
    pub machine: Machine,
    pub tuples: Vec<Tuple>,
    pub strings: Vec<char>,
    pub group_count: u8,
    pub loop_var_count: u8,
    pub flags: PatternFlags,
    pub length: MatchLength,
}

/// A compiled pattern. Never mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledPattern {
    machine: Machine,
    tuples: Vec<Tuple>,
    strings: Vec<char>,
    group_count: u8,
    loop_var_count: u8,
    flags: PatternFlags,
    length: MatchLength,
}

impl From<PatternParts> for CompiledPattern {
    fn from(parts: PatternParts) -> Self {
        Self {
            machine: parts.machine,
            tuples: parts.tuples,
            strings: parts.strings,
            group_count: parts.group_count,
            loop_var_count: parts.loop_var_count,
            flags: parts.flags,
            length: parts.length,
        }
    }
}

impl CompiledPattern {
    pub fn machine(&self) -> Machine {
        self.machine
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    /// Panics on an id that is not part of this pattern. Ids stored in the
    /// pattern's own tuples are always valid.
    pub fn tuple(&self, id: StateId) -> &Tuple {
        &self.tuples[id as usize]
    }

    pub fn literal(&self, span: StrSpan) -> &[char] {
        &self.strings[span.range()]
    }

    pub fn group_count(&self) -> usize {
        self.group_count as usize
    }

    pub fn loop_var_count(&self) -> usize {
        self.loop_var_count as usize
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Length bounds of the whole pattern.
    pub fn match_length(&self) -> MatchLength {
        self.length
    }

    pub fn state_count(&self) -> usize {
        self.tuples.len()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CodecError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Decodes and checks every state index, pool span and register id.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CodecError> {
        let pattern: Self = postcard::from_bytes(bytes)?;
        pattern.validate()?;
        Ok(pattern)
    }

    fn validate(&self) -> Result<(), CodecError> {
        if self.group_count as usize > GROUP_REG_COUNT || self.loop_var_count as usize > LOOP_VARS_MAX {
            return Err(CodecError::Malformed { state: self.machine.init });
        }
        self.check_machine(self.machine, self.machine.init)?;

        for (id, tuple) in self.tuples.iter().enumerate() {
            let id = id as StateId;
            let malformed = CodecError::Malformed { state: id };
            if tuple.successors().any(|next| !self.has_state(next)) {
                return Err(malformed);
            }
            let ok = match &tuple.recognizer {
                Recognizer::LiteralStr { span, owner } => {
                    span.range().end <= self.strings.len() && span.len > 0 && self.has_state(*owner)
                }
                Recognizer::GroupEnter(g) | Recognizer::GroupExit(g) | Recognizer::GroupMatch(g) => {
                    (*g as usize) < GROUP_REG_COUNT
                }
                Recognizer::ZeroVar(var) => (*var as usize) < LOOP_VARS_MAX,
                Recognizer::LoopBranch { min, max, var } => {
                    (*var as usize) < LOOP_VARS_MAX && max.is_none_or(|max| *min <= max)
                }
                Recognizer::Assert { sub, .. } => {
                    self.check_machine(*sub, id)?;
                    true
                }
                _ => true,
            };
            if !ok {
                return Err(malformed);
            }
        }
        Ok(())
    }

    fn check_machine(&self, machine: Machine, state: StateId) -> Result<(), CodecError> {
        if self.has_state(machine.init) && self.has_state(machine.final_state) {
            Ok(())
        } else {
            Err(CodecError::Malformed { state })
        }
    }

    fn has_state(&self, id: StateId) -> bool {
        (id as usize) < self.tuples.len()
    }
}
