//! Match-length analysis.
//!
//! Walks a fragment from its entry to its exit, adding one char per consuming
//! state and combining split branches with min/max. Reaching a split that is
//! already on the current path means a loop, which drops the upper bound.
//!
//! The walk is exhaustive over split branches, so it runs on a step budget.
//! A walk that runs out reports [`MatchLength::UNKNOWN`].

use vmregex_core::{MatchLength, Recognizer, StateId, Tuple};

const STEP_BUDGET: usize = 100_000;

pub struct LengthAnalysis<'t> {
    tuples: &'t [Tuple],
    budget: usize,
    path: Vec<StateId>,
    expanding: Vec<StateId>,
}

impl<'t> LengthAnalysis<'t> {
    pub fn new(tuples: &'t [Tuple]) -> Self {
        Self {
            tuples,
            budget: STEP_BUDGET,
            path: Vec::new(),
            expanding: Vec::new(),
        }
    }

    pub fn budget(mut self, steps: usize) -> Self {
        self.budget = steps;
        self
    }

    /// Length bounds of the chars consumed between `init` and `final_state`.
    pub fn measure(&mut self, init: StateId, final_state: StateId) -> MatchLength {
        self.path.clear();
        self.expanding.clear();
        let len = self.walk(init, final_state);
        if self.budget == 0 {
            MatchLength::UNKNOWN
        } else {
            len
        }
    }

    fn walk(&mut self, init: StateId, final_state: StateId) -> MatchLength {
        let mut len = MatchLength::ZERO;
        let mut cur = Some(init);

        while let Some(id) = cur {
            if id == final_state {
                break;
            }
            if self.budget == 0 {
                return MatchLength::UNKNOWN;
            }
            self.budget -= 1;

            let tuples = self.tuples;
            let tuple = &tuples[id as usize];
            cur = match &tuple.recognizer {
                Recognizer::Epsilon => match (tuple.next1, tuple.next2) {
                    (Some(first), Some(second)) => {
                        if self.path.contains(&id) {
                            return len.unbounded();
                        }
                        self.path.push(id);
                        let a = self.walk(first, final_state);
                        let b = self.walk(second, final_state);
                        self.path.pop();
                        return len.then(a.either(b));
                    }
                    (next, _) => next,
                },
                Recognizer::LoopBranch { min, max, .. } => {
                    let (enter, bypass) = tuple.loop_targets();
                    match enter {
                        Some(enter) if !self.path.contains(&id) => {
                            self.path.push(id);
                            let body = self.walk(enter, id);
                            self.path.pop();
                            len = len.then(body.repeat(*min, *max));
                        }
                        _ => len = len.unbounded(),
                    }
                    bypass
                }
                Recognizer::GroupMatch(group) => {
                    // A back-reference consumes whatever its group consumed.
                    // The group is walked on its own path: its splits may
                    // already be on the current one.
                    match self.group_bounds(*group) {
                        Some((enter, exit)) if !self.expanding.contains(&id) => {
                            let outer = std::mem::take(&mut self.path);
                            self.expanding.push(id);
                            let captured = self.walk(enter, exit);
                            self.expanding.pop();
                            self.path = outer;
                            len = len.then(captured);
                        }
                        _ => len = len.unbounded(),
                    }
                    tuple.next1
                }
                Recognizer::LiteralStr { span, .. } => {
                    len = len.then(MatchLength::exact(span.len as usize));
                    tuple.next1
                }
                Recognizer::Assert { .. } => tuple.next1,
                rec if rec.is_zero_width() => tuple.next1,
                _ => {
                    len = len.then(MatchLength::exact(1));
                    tuple.next1
                }
            };
        }
        len
    }

    fn group_bounds(&self, group: u8) -> Option<(StateId, StateId)> {
        let find = |want: &Recognizer| {
            self.tuples
                .iter()
                .position(|t| &t.recognizer == want)
                .map(|i| i as StateId)
        };
        Some((
            find(&Recognizer::GroupEnter(group))?,
            find(&Recognizer::GroupExit(group))?,
        ))
    }
}
