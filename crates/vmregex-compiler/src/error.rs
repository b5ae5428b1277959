/// Why a pattern failed to compile. Offsets are byte offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// More than 20 groups open at once.
    #[error("groups nested too deeply at offset {offset}")]
    GroupNestingTooDeep { offset: usize },

    #[error("{kind} at offset {offset}")]
    Syntax { offset: usize, kind: SyntaxErrorKind },

    /// The pattern needs more states than the compile limits allow.
    #[error("pattern needs more than {limit} states")]
    OutOfMemory { limit: usize },
}

impl CompileError {
    /// Source offset the error points at, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::GroupNestingTooDeep { offset } | Self::Syntax { offset, .. } => Some(*offset),
            Self::OutOfMemory { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("interval minimum exceeds its maximum")]
    IntervalBounds,
    #[error("interval bound above 65535")]
    IntervalTooLarge,
    #[error("malformed interval")]
    MalformedInterval,
    #[error("unterminated character class")]
    UnterminatedClass,
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
