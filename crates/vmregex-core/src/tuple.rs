//! Tuples, recognizers and machine fragments.

use serde::{Deserialize, Serialize};

use crate::class::{CharClass, NamedClass};
use crate::length::MatchLength;

/// Index of a tuple in a pattern's arena.
pub type StateId = u32;

/// Entry and exit state of a compiled fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub init: StateId,
    pub final_state: StateId,
}

impl Machine {
    pub fn new(init: StateId, final_state: StateId) -> Self {
        Self { init, final_state }
    }

    /// A machine whose entry is already its exit matches the empty string
    /// without running any tuple.
    pub fn is_trivial(&self) -> bool {
        self.init == self.final_state
    }
}

/// Location of a consolidated literal run in the pattern's string pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrSpan {
    pub start: u32,
    pub len: u32,
}

impl StrSpan {
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssertKind {
    Ahead,
    NotAhead,
    Behind,
    NotBehind,
}

impl AssertKind {
    pub fn is_negative(self) -> bool {
        matches!(self, Self::NotAhead | Self::NotBehind)
    }

    pub fn is_lookbehind(self) -> bool {
        matches!(self, Self::Behind | Self::NotBehind)
    }

    pub fn sigil(self) -> &'static str {
        match self {
            Self::Ahead => "?=",
            Self::NotAhead => "?!",
            Self::Behind => "?<=",
            Self::NotBehind => "?<!",
        }
    }
}

/// What a state tests before moving to its successor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recognizer {
    /// Consumes nothing. With two successors the state is a split.
    Epsilon,
    Literal(char),
    /// A run of literals. `owner` is the state holding the full run; states
    /// in the middle of the run alias a suffix of it.
    LiteralStr { span: StrSpan, owner: StateId },
    Wildcard,
    Class { class: NamedClass, negated: bool },
    Range(CharClass),
    TextBegin,
    TextEnd,
    /// Succeeds only at the offset the innermost lookbehind is anchored to.
    LookbackPos,
    WordBegin,
    WordEnd,
    WordChar,
    NonWordChar,
    WordBoundary,
    NonWordBoundary,
    GroupEnter(u8),
    GroupExit(u8),
    /// Back-reference to a group's captured text.
    GroupMatch(u8),
    Assert {
        kind: AssertKind,
        sub: Machine,
        length: MatchLength,
    },
    /// Resets a loop variable before an interval is entered.
    ZeroVar(u8),
    LoopBranch {
        min: u32,
        max: Option<u32>,
        var: u8,
    },
}

impl Recognizer {
    /// Recognizers that never consume input and never branch.
    pub fn is_zero_width(&self) -> bool {
        matches!(
            self,
            Self::Epsilon
                | Self::TextBegin
                | Self::TextEnd
                | Self::LookbackPos
                | Self::WordBegin
                | Self::WordEnd
                | Self::WordBoundary
                | Self::NonWordBoundary
                | Self::GroupEnter(_)
                | Self::GroupExit(_)
                | Self::ZeroVar(_)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuple {
    pub recognizer: Recognizer,
    pub next1: Option<StateId>,
    pub next2: Option<StateId>,
    /// Lazy split: prefer the shorter alternative in exhaustive modes.
    pub shortest: bool,
}

impl Tuple {
    pub fn new(recognizer: Recognizer) -> Self {
        Self {
            recognizer,
            next1: None,
            next2: None,
            shortest: false,
        }
    }

    pub fn epsilon() -> Self {
        Self::new(Recognizer::Epsilon)
    }

    /// An epsilon state with two successors.
    pub fn is_split(&self) -> bool {
        matches!(self.recognizer, Recognizer::Epsilon) && self.next1.is_some() && self.next2.is_some()
    }

    pub fn successors(&self) -> impl Iterator<Item = StateId> {
        self.next1.into_iter().chain(self.next2)
    }

    /// `(enter, bypass)` successors of a loop branch.
    ///
    /// The compiler links a lazy branch with the bypass first.
    pub fn loop_targets(&self) -> (Option<StateId>, Option<StateId>) {
        if self.shortest {
            (self.next2, self.next1)
        } else {
            (self.next1, self.next2)
        }
    }
}
