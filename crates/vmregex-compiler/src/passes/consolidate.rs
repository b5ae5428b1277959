//! Folds chains of literal states into pooled strings.
//!
//! The head of a chain becomes a `LiteralStr` over the whole run and jumps
//! past it. The other states of the chain stay reachable from elsewhere, so
//! each becomes a `LiteralStr` aliasing the suffix of the run it starts.

use vmregex_core::{Recognizer, StateId, StrSpan};

use crate::builder::MachineBuilder;

pub fn consolidate_strings(builder: &mut MachineBuilder) {
    for head in 0..builder.tuples().len() as StateId {
        let Recognizer::Literal(first) = builder.tuple(head).recognizer else {
            continue;
        };

        let mut run = vec![first];
        let mut members = vec![head];
        let mut after = builder.tuple(head).next1;
        while let Some(next) = after {
            let Recognizer::Literal(c) = builder.tuple(next).recognizer else {
                break;
            };
            if members.contains(&next) {
                break;
            }
            run.push(c);
            members.push(next);
            after = builder.tuple(next).next1;
        }

        if run.len() < 2 {
            continue;
        }

        let span = builder.push_string(&run);
        for (offset, &id) in members.iter().enumerate() {
            let offset = offset as u32;
            let tuple = builder.tuple_mut(id);
            tuple.recognizer = Recognizer::LiteralStr {
                span: StrSpan {
                    start: span.start + offset,
                    len: span.len - offset,
                },
                owner: head,
            };
        }
        builder.tuple_mut(head).next1 = after;
    }
}
