//! vmregex compiler: pattern text to an immutable [`CompiledPattern`].
//!
//! Pipeline:
//! - `parser` - recursive-descent parse driving the fragment builder
//! - `builder` - tuple arena and fragment combinators
//! - `passes` - loop breaking, branch collapsing, string consolidation
//! - `length` - match-length analysis for lookbehind and search pruning
//! - `diagnostics` - rendering compile errors against the pattern source

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod builder;
mod diagnostics;
mod error;
mod length;
mod parser;
mod passes;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod parser_tests;

pub use builder::{CompileLimits, MachineBuilder};
pub use diagnostics::CompileErrorPrinter;
pub use error::{CompileError, CompileResult, SyntaxErrorKind};
pub use length::LengthAnalysis;

use vmregex_core::{CompiledPattern, PatternParts};

/// Compiles `source` with default limits.
pub fn compile(source: &str) -> CompileResult<CompiledPattern> {
    Compiler::new().compile(source)
}

/// Pattern compiler with configurable limits.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    limits: CompileLimits,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: CompileLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn compile(&self, source: &str) -> CompileResult<CompiledPattern> {
        let parsed = parser::Parser::new(source, MachineBuilder::new(self.limits)).parse()?;
        let mut builder = parsed.builder;
        let mut machine = parsed.machine;

        passes::break_loops(&mut builder, &mut machine);
        passes::remove_branch_to_branch(&mut builder, &mut machine);
        passes::consolidate_strings(&mut builder);

        let length = LengthAnalysis::new(builder.tuples()).measure(machine.init, machine.final_state);
        let (tuples, strings) = builder.into_parts();

        Ok(PatternParts {
            machine,
            tuples,
            strings,
            group_count: parsed.group_count,
            loop_var_count: parsed.loop_var_count,
            flags: parsed.flags,
            length,
        }
        .into())
    }
}
