//! Human-readable listing of a compiled pattern.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::class::{CharClass, ClassItem};
use crate::pattern::CompiledPattern;
use crate::tuple::{Recognizer, StateId};

impl CompiledPattern {
    /// One line per state reachable from the entry, in id order.
    pub fn dump(&self) -> String {
        let machine = self.machine();
        let mut out = String::new();
        writeln!(out, "machine S{} → S{}", machine.init, machine.final_state).unwrap();
        for id in self.reachable() {
            writeln!(out, "{}", self.describe_state(id)).unwrap();
        }
        out
    }

    /// `S3: 'a' → S4` style line for one state.
    pub fn describe_state(&self, id: StateId) -> String {
        let tuple = self.tuple(id);
        let mut line = format!("S{id}: {}", self.describe(id));
        if let Some(next) = tuple.next1 {
            write!(line, " → S{next}").unwrap();
        }
        if let Some(next) = tuple.next2 {
            write!(line, " | S{next}").unwrap();
        }
        if tuple.shortest {
            line.push_str(" lazy");
        }
        line
    }

    /// The recognizer of a state, without its successors.
    pub fn describe(&self, id: StateId) -> String {
        match &self.tuple(id).recognizer {
            Recognizer::Epsilon => "ε".to_string(),
            Recognizer::Literal(c) => format!("{c:?}"),
            Recognizer::LiteralStr { span, owner } => {
                let text: String = self.literal(*span).iter().collect();
                if *owner == id {
                    format!("{text:?}")
                } else {
                    format!("{text:?} (in S{owner})")
                }
            }
            Recognizer::Wildcard => ".".to_string(),
            Recognizer::Class { class, negated } => {
                format!("<{}{}>", if *negated { "^" } else { "" }, class.name())
            }
            Recognizer::Range(class) => describe_class(class),
            Recognizer::TextBegin => "^".to_string(),
            Recognizer::TextEnd => "$".to_string(),
            Recognizer::LookbackPos => "lookback-pos".to_string(),
            Recognizer::WordBegin => "%<".to_string(),
            Recognizer::WordEnd => "%>".to_string(),
            Recognizer::WordChar => "%w".to_string(),
            Recognizer::NonWordChar => "%W".to_string(),
            Recognizer::WordBoundary => "%b".to_string(),
            Recognizer::NonWordBoundary => "%B".to_string(),
            Recognizer::GroupEnter(g) => format!("({}", g + 1),
            Recognizer::GroupExit(g) => format!("){}", g + 1),
            Recognizer::GroupMatch(g) => format!("%{}", g + 1),
            Recognizer::Assert { kind, sub, .. } => {
                format!("({} S{}..S{})", kind.sigil(), sub.init, sub.final_state)
            }
            Recognizer::ZeroVar(var) => format!("zero v{var}"),
            Recognizer::LoopBranch { min, max, var } => match max {
                Some(max) => format!("loop v{var} {{{min},{max}}}"),
                None => format!("loop v{var} {{{min},}}"),
            },
        }
    }

    fn reachable(&self) -> BTreeSet<StateId> {
        let mut seen = BTreeSet::new();
        let mut work = vec![self.machine().init];
        while let Some(id) = work.pop() {
            if !seen.insert(id) {
                continue;
            }
            let tuple = self.tuple(id);
            work.extend(tuple.successors());
            if let Recognizer::Assert { sub, .. } = &tuple.recognizer {
                work.push(sub.init);
            }
        }
        seen
    }
}

fn describe_class(class: &CharClass) -> String {
    let mut out = String::from("[");
    if class.negated {
        out.push('^');
    }
    for item in &class.items {
        match *item {
            ClassItem::Range(lo, hi) if lo == hi => out.extend(lo.escape_debug()),
            ClassItem::Range(lo, hi) => {
                out.extend(lo.escape_debug());
                out.push('-');
                out.extend(hi.escape_debug());
            }
            ClassItem::Named(named) => {
                write!(out, "<{}>", named.name()).unwrap();
            }
        }
    }
    out.push(']');
    out
}
