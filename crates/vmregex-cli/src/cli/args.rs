//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands can compose the same
//! definitions, hiding the ones they ignore.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Pattern source (positional, required).
pub fn pattern_arg() -> Arg {
    Arg::new("pattern")
        .value_name("PATTERN")
        .required(true)
        .help("Pattern to compile")
}

/// Inline subject text (positional).
pub fn text_arg() -> Arg {
    Arg::new("text")
        .value_name("TEXT")
        .conflicts_with("file")
        .help("Subject text")
}

/// Subject file (-f/--file), `-` for stdin.
pub fn file_arg() -> Arg {
    Arg::new("file")
        .short('f')
        .long("file")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("Read the subject from a file (- for stdin)")
}

/// Window start (--start).
pub fn start_arg() -> Arg {
    Arg::new("start")
        .long("start")
        .value_name("OFFSET")
        .value_parser(value_parser!(usize))
        .help("Byte offset where the window begins [default: 0]")
}

/// Window end / backward search limit (--limit).
pub fn limit_arg() -> Arg {
    Arg::new("limit")
        .long("limit")
        .value_name("OFFSET")
        .value_parser(value_parser!(usize))
        .help("Byte offset where the window ends [default: end of subject]")
}

/// Default to case-insensitive matching (--nocase).
pub fn nocase_arg() -> Arg {
    Arg::new("nocase")
        .short('i')
        .long("nocase")
        .action(ArgAction::SetTrue)
        .help("Match case-insensitively unless the pattern says <Case>")
}

/// Emit JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the result as JSON")
}

/// Backtracking stack cap (--stack-limit).
pub fn stack_limit_arg() -> Arg {
    Arg::new("stack_limit")
        .long("stack-limit")
        .value_name("BYTES")
        .value_parser(value_parser!(usize))
        .help("Cap on the backtracking stack size in bytes [default: 16777216]")
}

/// Trace verbosity (-v).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Also trace every visited state")
}

/// Search mode traced by `trace` (--mode).
pub fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .value_name("MODE")
        .default_value("search")
        .value_parser(["match", "search", "search-back"])
        .help("Operation to trace")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}
