//! Input loading and execution shared by the run and trace commands.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use serde::Serialize;
use vmregex_lib::{
    CompiledPattern, GroupRegisters, Match, MatchReport, RuntimeError, Searcher, Tracer, compile_pattern,
};

/// Operation applied to the subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Match,
    Search,
    SearchBack,
}

pub struct SubjectArgs {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub start: Option<usize>,
    pub limit: Option<usize>,
    pub case_sensitive: bool,
    pub stack_limit: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("no subject given; pass TEXT or --file")]
    MissingSubject,
}

/// Subject text from the positional, a file, or stdin for `-`.
pub fn load_subject(args: &SubjectArgs) -> Result<String, InputError> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    let Some(path) = &args.file else {
        return Err(InputError::MissingSubject);
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(InputError::Stdin)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.clone(),
        source,
    })
}

/// Compiles `source`, or prints the diagnostic and exits with status 2.
pub fn compile_or_exit(source: &str, color: bool) -> CompiledPattern {
    match compile_pattern(source) {
        Ok(pattern) => pattern,
        Err(vmregex_lib::Error::Compile(e)) => {
            eprintln!("{}", e.printer().source(source).colored(color).render());
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }
}

pub fn build_searcher(args: &SubjectArgs) -> Searcher {
    let mut builder = Searcher::builder().case_sensitive(args.case_sensitive);
    if let Some(bytes) = args.stack_limit {
        builder = builder.max_stack_bytes(bytes);
    }
    builder.build()
}

/// Window `[start, limit]` over `text`, defaulting to the whole subject.
pub fn window(args: &SubjectArgs, text: &str) -> (usize, usize) {
    (args.start.unwrap_or(0), args.limit.unwrap_or(text.len()))
}

/// Runs `mode` over the window, reporting through `tracer`.
pub fn execute<T: Tracer>(
    mode: Mode,
    searcher: &mut Searcher,
    pattern: &CompiledPattern,
    text: &str,
    (start, limit): (usize, usize),
    regs: &mut GroupRegisters,
    tracer: &mut T,
) -> Result<Option<Match>, RuntimeError> {
    match mode {
        Mode::Match => {
            let len = searcher.match_at_with(pattern, text, start, limit, regs, tracer)?;
            Ok(len.map(|len| Match::new(start, len)))
        }
        Mode::Search => searcher.search_with(pattern, text, start, limit, regs, tracer),
        Mode::SearchBack => searcher.search_back_with(pattern, text, start, limit, regs, tracer),
    }
}

/// Text form of a match: the span and text, then one line per group.
pub fn format_report(report: &MatchReport) -> String {
    let mut out = String::new();
    let end = report.start + report.len;
    writeln!(out, "{}..{end} {:?}", report.start, report.text).unwrap();
    for (i, group) in report.groups.iter().enumerate() {
        match group {
            Some(g) => writeln!(out, "  %{} {}..{} {:?}", i + 1, g.start, g.end, g.text).unwrap(),
            None => writeln!(out, "  %{} unset", i + 1).unwrap(),
        }
    }
    out
}
