use vmregex_core::{CompiledPattern, Machine, MatchLength, PatternFlags, PatternParts};

use crate::MachineBuilder;

/// Freezes a hand-built fragment so it can be dumped.
pub fn finish(builder: MachineBuilder, machine: Machine) -> CompiledPattern {
    let (tuples, strings) = builder.into_parts();
    PatternParts {
        machine,
        tuples,
        strings,
        group_count: 0,
        loop_var_count: 0,
        flags: PatternFlags::default(),
        length: MatchLength::ZERO,
    }
    .into()
}

pub fn dump(source: &str) -> String {
    crate::compile(source).unwrap().dump()
}
