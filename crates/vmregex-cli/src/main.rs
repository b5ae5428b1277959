mod cli;
mod commands;

use cli::{DumpParams, RunParams, TraceParams, build_cli};
use commands::run_common::Mode;

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("match", m)) => {
            let params = RunParams::from_matches(m);
            commands::run::run(params.into_args(Mode::Match));
        }
        Some(("search", m)) => {
            let params = RunParams::from_matches(m);
            commands::run::run(params.into_args(Mode::Search));
        }
        Some(("search-back", m)) => {
            let params = RunParams::from_matches(m);
            commands::run::run(params.into_args(Mode::SearchBack));
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("trace", m)) => {
            let params = TraceParams::from_matches(m);
            commands::trace::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
