//! Run a pattern against a subject: `match`, `search` and `search-back`.

use serde::Serialize;
use vmregex_lib::{MatchReport, NoopTracer, unset_registers};

use super::run_common::{self, Mode, SubjectArgs};

pub struct RunArgs {
    pub mode: Mode,
    pub pattern: String,
    pub subject: SubjectArgs,
    pub json: bool,
    pub color: bool,
}

/// JSON document printed with `--json`.
#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    pub mode: Mode,
    pub pattern: &'a str,
    #[serde(rename = "match")]
    pub found: Option<MatchReport>,
}

pub fn run(args: RunArgs) {
    let text = match run_common::load_subject(&args.subject) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    let pattern = run_common::compile_or_exit(&args.pattern, args.color);
    let mut searcher = run_common::build_searcher(&args.subject);
    let window = run_common::window(&args.subject, &text);

    let mut regs = unset_registers();
    let found = match run_common::execute(
        args.mode,
        &mut searcher,
        &pattern,
        &text,
        window,
        &mut regs,
        &mut NoopTracer,
    ) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("runtime error: {e}");
            std::process::exit(2);
        }
    };

    let report = found.map(|m| MatchReport::new(m, &regs[..pattern.group_count()], &text));
    if args.json {
        let output = RunOutput {
            mode: args.mode,
            pattern: &args.pattern,
            found: report.clone(),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(2);
            }
        }
    } else if let Some(report) = &report {
        print!("{}", run_common::format_report(report));
    }

    if report.is_none() {
        std::process::exit(1);
    }
}
