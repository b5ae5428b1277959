//! Errors that can occur while matching.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The backtracking stack outgrew its byte budget.
    #[error("backtracking stack exceeded {limit} bytes")]
    StackOverflow { limit: usize },

    /// An offset handed to the searcher is past the end of the subject or
    /// splits a UTF-8 sequence.
    #[error("offset {offset} is not a char boundary of the subject")]
    InvalidOffset { offset: usize },
}
