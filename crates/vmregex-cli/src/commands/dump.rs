//! Show the compiled state machine of a pattern.

use vmregex_lib::{CompiledPattern, MatchPolicy, SearchPreference};

use super::run_common;

pub struct DumpArgs {
    pub pattern: String,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let pattern = run_common::compile_or_exit(&args.pattern, args.color);
    print!("{}", header(&pattern));
    print!("{}", pattern.dump());
}

/// Flags, group count and length bounds above the state listing.
pub fn header(pattern: &CompiledPattern) -> String {
    let flags = pattern.flags();
    let case = match flags.case_sensitive {
        Some(true) => "case",
        Some(false) => "nocase",
        None => "default",
    };
    let policy = match flags.policy {
        MatchPolicy::FirstMatch => "first",
        MatchPolicy::Longest => "longest",
        MatchPolicy::Shortest => "shortest",
    };
    let preference = match flags.preference {
        SearchPreference::FirstBegin => "first-begin",
        SearchPreference::FirstEnd => "first-end",
    };
    let length = pattern.match_length();
    let max = length.max.map_or_else(|| "∞".to_owned(), |n| n.to_string());

    format!(
        "flags: {case} {policy} {preference}\ngroups: {}\nlength: {}..{max}\n",
        pattern.group_count(),
        length.min,
    )
}
