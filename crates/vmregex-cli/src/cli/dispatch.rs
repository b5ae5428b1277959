//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` mirror the command `*Args` but are populated from clap. Hidden
//! flags are parsed and then dropped here.

use std::path::PathBuf;

use clap::ArgMatches;
use vmregex_lib::Verbosity;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::run::RunArgs;
use crate::commands::run_common::{Mode, SubjectArgs};
use crate::commands::trace::TraceArgs;

#[derive(Debug, PartialEq, Eq)]
pub struct SubjectParams {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub start: Option<usize>,
    pub limit: Option<usize>,
    pub nocase: bool,
    pub stack_limit: Option<usize>,
}

impl SubjectParams {
    fn from_matches(m: &ArgMatches) -> Self {
        Self {
            text: m.get_one::<String>("text").cloned(),
            file: m.get_one::<PathBuf>("file").cloned(),
            start: m.get_one::<usize>("start").copied(),
            limit: m.get_one::<usize>("limit").copied(),
            nocase: m.get_flag("nocase"),
            stack_limit: m.get_one::<usize>("stack_limit").copied(),
        }
    }
}

impl From<SubjectParams> for SubjectArgs {
    fn from(p: SubjectParams) -> Self {
        Self {
            text: p.text,
            file: p.file,
            start: p.start,
            limit: p.limit,
            case_sensitive: !p.nocase,
            stack_limit: p.stack_limit,
        }
    }
}

pub struct RunParams {
    pub pattern: String,
    pub subject: SubjectParams,
    pub json: bool,
    pub color: ColorChoice,
    // Note: verbose and mode are parsed but not extracted (trace flags)
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pattern: parse_pattern(m),
            subject: SubjectParams::from_matches(m),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }

    pub fn into_args(self, mode: Mode) -> RunArgs {
        RunArgs {
            mode,
            pattern: self.pattern,
            subject: self.subject.into(),
            json: self.json,
            color: self.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub pattern: String,
    pub color: ColorChoice,
    // Note: subject, json and trace flags are parsed but not extracted
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pattern: parse_pattern(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            pattern: p.pattern,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub pattern: String,
    pub subject: SubjectParams,
    pub mode: Mode,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: json is parsed but not extracted
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pattern: parse_pattern(m),
            subject: SubjectParams::from_matches(m),
            mode: parse_mode(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            _ => Verbosity::Verbose,
        };

        Self {
            pattern: p.pattern,
            subject: p.subject.into(),
            mode: p.mode,
            verbosity,
            color: p.color.should_colorize(),
        }
    }
}

/// The pattern positional is required, so clap has already rejected its absence.
fn parse_pattern(m: &ArgMatches) -> String {
    m.get_one::<String>("pattern").cloned().unwrap_or_default()
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Parse --mode flag into Mode.
fn parse_mode(m: &ArgMatches) -> Mode {
    match m.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("match") => Mode::Match,
        Some("search-back") => Mode::SearchBack,
        _ => Mode::Search,
    }
}
