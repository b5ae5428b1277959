//! Trace matcher execution for debugging.

use vmregex_lib::{MatchReport, PrintTracer, Verbosity, unset_registers};

use super::run_common::{self, Mode, SubjectArgs};

pub struct TraceArgs {
    pub pattern: String,
    pub subject: SubjectArgs,
    pub mode: Mode,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
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
    let mut tracer = PrintTracer::new(&pattern, args.verbosity);
    let result = run_common::execute(args.mode, &mut searcher, &pattern, &text, window, &mut regs, &mut tracer);
    for line in tracer.lines() {
        println!("{line}");
    }

    match result {
        Ok(Some(found)) => {
            println!("---");
            let report = MatchReport::new(found, &regs[..pattern.group_count()], &text);
            print!("{}", run_common::format_report(&report));
        }
        Ok(None) => std::process::exit(1),
        Err(e) => {
            eprintln!("runtime error: {e}");
            std::process::exit(2);
        }
    }
}
