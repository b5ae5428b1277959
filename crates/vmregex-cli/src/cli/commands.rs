//! Command builders for the CLI.
//!
//! `match`, `search` and `search-back` share one argument set. `dump` and
//! `trace` accept the same flags so a command line can be re-run under a
//! different subcommand; the ones they ignore are hidden from `--help`.

use clap::Command;

use super::args::*;

/// Subject input and window args.
fn with_subject_args(cmd: Command) -> Command {
    cmd.arg(text_arg())
        .arg(file_arg())
        .arg(start_arg())
        .arg(limit_arg())
        .arg(nocase_arg())
        .arg(stack_limit_arg())
}

/// Hidden subject args (for commands that don't run the pattern).
fn with_hidden_subject_args(cmd: Command) -> Command {
    cmd.arg(text_arg().hide(true))
        .arg(file_arg().hide(true))
        .arg(start_arg().hide(true))
        .arg(limit_arg().hide(true))
        .arg(nocase_arg().hide(true))
        .arg(stack_limit_arg().hide(true))
}

/// Hidden trace args (for commands that don't trace).
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true)).arg(mode_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("vmregex")
        .about("Backtracking regular expressions with TADS-style syntax")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(match_command())
        .subcommand(search_command())
        .subcommand(search_back_command())
        .subcommand(dump_command())
        .subcommand(trace_command())
}

fn run_command(name: &'static str, about: &'static str, examples: &'static str) -> Command {
    let cmd = Command::new(name)
        .about(about)
        .after_help(examples)
        .arg(pattern_arg())
        .arg(json_arg())
        .arg(color_arg());

    with_hidden_trace_args(with_subject_args(cmd))
}

/// Anchored match at the window start.
pub fn match_command() -> Command {
    run_command(
        "match",
        "Match a pattern anchored at the window start",
        r#"EXAMPLES:
  vmregex match 'ab+' abbbc              # prints the matched length
  vmregex match '(%d+)-' 12-34 --json    # with group registers
  vmregex match 'b+' abbbc --start 1     # anchor elsewhere"#,
    )
}

/// Forward search.
pub fn search_command() -> Command {
    run_command(
        "search",
        "Find the first match inside the window",
        r#"EXAMPLES:
  vmregex search '%d+' 'a1 b22'          # first match
  vmregex search '<FE>a|ab' xab          # earliest end wins
  vmregex search 'x' -f notes.txt --limit 100"#,
    )
}

/// Backward search.
pub fn search_back_command() -> Command {
    run_command(
        "search-back",
        "Find the closest match ending at or before the limit",
        r#"EXAMPLES:
  vmregex search-back abc xxabcxxabcxx --limit 9
  vmregex search-back '%w+' 'one two' --json"#,
    )
}

/// Show the compiled state machine.
///
/// Accepts the subject and trace flags but ignores them.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the compiled state machine")
        .after_help(
            r#"EXAMPLES:
  vmregex dump 'a|b'
  vmregex dump '(?<=x)y+'"#,
        )
        .arg(pattern_arg())
        .arg(color_arg());

    with_hidden_trace_args(with_hidden_subject_args(cmd.arg(json_arg().hide(true))))
}

/// Trace matcher execution for debugging.
///
/// Accepts `--json` but ignores it.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace matcher execution for debugging")
        .after_help(
            r#"EXAMPLES:
  vmregex trace 'a|b' b                  # attempts, pushes, backtracks
  vmregex trace 'a|b' b -v               # plus every visited state
  vmregex trace abc xxabc --mode search-back"#,
        )
        .arg(pattern_arg())
        .arg(color_arg())
        .arg(verbose_arg())
        .arg(mode_arg());

    with_subject_args(cmd).arg(json_arg().hide(true))
}
