//! Serializable view of a match.

use serde::Serialize;
use vmregex_core::{GroupRegister, Match};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub start: usize,
    pub len: usize,
    pub text: String,
    /// One entry per capturing group; `None` when the group did not take part.
    pub groups: Vec<Option<GroupReport>>,
}

impl MatchReport {
    pub fn new(found: Match, groups: &[GroupRegister], subject: &str) -> Self {
        let groups = groups
            .iter()
            .map(|reg| {
                let range = reg.range()?;
                Some(GroupReport {
                    start: range.start,
                    end: range.end,
                    text: subject.get(range)?.to_owned(),
                })
            })
            .collect();
        Self {
            start: found.start,
            len: found.len,
            text: found.text(subject).unwrap_or_default().to_owned(),
            groups,
        }
    }
}
