//! Breaks cycles that can be traversed without consuming input.
//!
//! Starting at an entry state, the walk follows zero-width states until it
//! reaches a consuming recognizer (no loop on this path), the exit, or a split
//! that is already on the walk's path. Returning to such a split means the
//! transition that led there loops, so it is removed. A split whose both
//! branches loop is itself reported as looping to its parent.
//!
//! The parser counts repetitions of bodies that can match empty through a
//! loop branch, whose cycle is guarded while matching. The walk stops at loop
//! branches, so only hand-built fragments still reach a cut here.
//!
//! Each split is walked once. A split settled earlier cannot lead back onto
//! the current path, so revisiting it only needs its recorded outcome.

use std::collections::{HashMap, HashSet};

use vmregex_core::{Machine, Recognizer, StateId};

use crate::builder::MachineBuilder;

pub fn break_loops(builder: &mut MachineBuilder, machine: &mut Machine) {
    let mut walk = LoopWalk {
        builder,
        path: HashSet::new(),
        settled: HashMap::new(),
    };
    if walk.walk(machine.init, machine.final_state) {
        machine.final_state = machine.init;
    }
}

struct LoopWalk<'b> {
    builder: &'b mut MachineBuilder,
    path: HashSet<StateId>,
    /// Splits walked to completion, with whether both branches were cut.
    settled: HashMap<StateId, bool>,
}

impl LoopWalk<'_> {
    fn walk(&mut self, init: StateId, final_state: StateId) -> bool {
        let mut cur = init;
        loop {
            if cur == final_state {
                return false;
            }

            let tuple = self.builder.tuple(cur);
            if let (true, Some(first), Some(second)) = (tuple.is_split(), tuple.next1, tuple.next2) {
                if self.path.contains(&cur) {
                    return true;
                }
                if let Some(&dead) = self.settled.get(&cur) {
                    return dead;
                }
                self.path.insert(cur);
                let second_loops = self.walk(second, final_state);
                let first_loops = self.walk(first, final_state);
                self.path.remove(&cur);

                let tuple = self.builder.tuple_mut(cur);
                if second_loops {
                    tuple.next2 = None;
                }
                if first_loops {
                    tuple.next1 = tuple.next2.take();
                }
                let dead = tuple.next1.is_none();
                self.settled.insert(cur, dead);
                return dead;
            }

            let next = tuple.next1;
            let assertion = match &tuple.recognizer {
                Recognizer::Assert { sub, .. } => Some(*sub),
                rec if rec.is_zero_width() => None,
                // Consumes input, or may: a back-reference to an empty group
                // and a loop branch both guard their own repetition.
                _ => return false,
            };

            if let Some(sub) = assertion
                && self.walk_assertion(sub)
                && let Recognizer::Assert { sub, .. } = &mut self.builder.tuple_mut(cur).recognizer
            {
                sub.init = sub.final_state;
            }

            match next {
                Some(next) => cur = next,
                None => return false,
            }
        }
    }

    /// Walks an assertion body on a path of its own.
    fn walk_assertion(&mut self, sub: Machine) -> bool {
        let outer = std::mem::take(&mut self.path);
        let loops = self.walk(sub.init, sub.final_state);
        self.path = outer;
        loops
    }
}
