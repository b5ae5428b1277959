//! vmregex: backtracking regular expressions with TADS-style syntax.
//!
//! # Example
//!
//! ```
//! use vmregex_lib::{SimpleSearcher, compile_pattern};
//!
//! let pattern = compile_pattern("(%w+)@(%w+)").unwrap();
//! let mut searcher = SimpleSearcher::new();
//! let text = "mail bob@example now";
//! let found = searcher.search_for_pattern(&pattern, text, 0, text.len()).unwrap();
//!
//! assert_eq!(found.map(|m| m.start), Some(5));
//! assert_eq!(searcher.group_text(1, text), Some("example"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod report;
mod simple;

#[cfg(test)]
mod simple_tests;

pub use report::{GroupReport, MatchReport};
pub use simple::SimpleSearcher;

pub use vmregex_compiler::{CompileError, CompileErrorPrinter, CompileLimits, Compiler, SyntaxErrorKind};
pub use vmregex_core::{
    CodecError, CompiledPattern, GROUP_REG_COUNT, GroupRegister, GroupRegisters, Match, MatchLength, MatchPolicy,
    PatternFlags, SearchPreference, unset_registers,
};
pub use vmregex_vm::{NoopTracer, PrintTracer, RuntimeError, Searcher, SearcherBuilder, StackLimits, Tracer, Verbosity};

/// Errors surfaced by the public entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type for vmregex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Compiles `source` with default limits.
pub fn compile_pattern(source: &str) -> Result<CompiledPattern> {
    Ok(vmregex_compiler::compile(source)?)
}

/// Releases a compiled pattern. Dropping it has the same effect.
pub fn free_pattern(pattern: CompiledPattern) {
    drop(pattern);
}

/// Restores a pattern saved with [`CompiledPattern::to_binary`].
pub fn load_pattern(bytes: &[u8]) -> Result<CompiledPattern> {
    Ok(CompiledPattern::from_binary(bytes)?)
}
