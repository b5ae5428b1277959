//! Redirects transitions past epsilon states with a single successor.
//!
//! A machine's exit is never skipped, including the exits of assertion
//! sub-machines: the matcher detects completion by arriving at that state.

use std::collections::HashSet;

use vmregex_core::{Machine, Recognizer, StateId};

use crate::builder::MachineBuilder;

pub fn remove_branch_to_branch(builder: &mut MachineBuilder, machine: &mut Machine) {
    let mut finals: HashSet<StateId> = HashSet::from([machine.final_state]);
    for tuple in builder.tuples() {
        if let Recognizer::Assert { sub, .. } = &tuple.recognizer {
            finals.insert(sub.final_state);
        }
    }

    for id in 0..builder.tuples().len() as StateId {
        let tuple = builder.tuple(id);
        let next1 = tuple.next1.map(|next| skip_epsilons(builder, &finals, next));
        let next2 = tuple.next2.map(|next| skip_epsilons(builder, &finals, next));
        let sub_init = match &tuple.recognizer {
            Recognizer::Assert { sub, .. } => Some(skip_epsilons(builder, &finals, sub.init)),
            _ => None,
        };

        let tuple = builder.tuple_mut(id);
        tuple.next1 = next1;
        tuple.next2 = next2;
        if let (Recognizer::Assert { sub, .. }, Some(init)) = (&mut tuple.recognizer, sub_init) {
            sub.init = init;
        }
    }

    machine.init = skip_epsilons(builder, &finals, machine.init);
}

fn skip_epsilons(builder: &MachineBuilder, finals: &HashSet<StateId>, mut target: StateId) -> StateId {
    // A chain longer than the arena can only be a cycle.
    for _ in 0..builder.tuples().len() {
        if finals.contains(&target) {
            break;
        }
        let tuple = builder.tuple(target);
        match (&tuple.recognizer, tuple.next1, tuple.next2) {
            (Recognizer::Epsilon, Some(next), None) => target = next,
            _ => break,
        }
    }
    target
}
