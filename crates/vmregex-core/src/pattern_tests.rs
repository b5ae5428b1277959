use super::*;

/// `a|bc` laid out by hand: a split at S0, a literal branch and a string branch.
fn sample() -> CompiledPattern {
    let mut tuples = vec![Tuple::epsilon(); 6];
    tuples[0].next1 = Some(1);
    tuples[0].next2 = Some(2);
    tuples[1] = Tuple::new(Recognizer::Literal('a'));
    tuples[1].next1 = Some(5);
    tuples[2] = Tuple::new(Recognizer::LiteralStr {
        span: StrSpan { start: 0, len: 2 },
        owner: 2,
    });
    tuples[2].next1 = Some(5);
    tuples[3] = Tuple::new(Recognizer::LiteralStr {
        span: StrSpan { start: 1, len: 1 },
        owner: 2,
    });
    tuples[3].next1 = Some(5);
    tuples[4] = Tuple::new(Recognizer::LoopBranch {
        min: 1,
        max: Some(2),
        var: 0,
    });
    tuples[4].next1 = Some(1);
    tuples[4].next2 = Some(5);
    tuples[4].shortest = true;

    PatternParts {
        machine: Machine::new(0, 5),
        tuples,
        strings: vec!['b', 'c'],
        group_count: 0,
        loop_var_count: 1,
        flags: PatternFlags::default(),
        length: MatchLength { min: 1, max: Some(2) },
    }
    .into()
}

#[test]
fn dump_lists_reachable_states() {
    insta::assert_snapshot!(sample().dump(), @r#"
    machine S0 → S5
    S0: ε → S1 | S2
    S1: 'a' → S5
    S2: "bc" → S5
    S5: ε
    "#);
}

#[test]
fn describe_shows_aliases_and_loops() {
    let pattern = sample();
    assert_eq!(pattern.describe_state(3), r#"S3: "c" (in S2) → S5"#);
    assert_eq!(pattern.describe_state(4), "S4: loop v0 {1,2} → S1 | S5 lazy");
}

#[test]
fn loop_targets_swap_when_lazy() {
    let pattern = sample();
    assert_eq!(pattern.tuple(4).loop_targets(), (Some(5), Some(1)));
    assert!(pattern.tuple(0).is_split());
    assert!(!pattern.tuple(4).is_split());
}

#[test]
fn binary_round_trip_preserves_pattern() {
    let pattern = sample();
    let bytes = pattern.to_binary().unwrap();
    let decoded = CompiledPattern::from_binary(&bytes).unwrap();
    assert_eq!(decoded, pattern);
    assert_eq!(decoded.literal(StrSpan { start: 0, len: 2 }), &['b', 'c']);
}

#[test]
fn binary_rejects_dangling_state() {
    let mut parts_pattern = sample();
    let bytes = {
        let mut tuples = parts_pattern.tuples().to_vec();
        tuples[1].next1 = Some(42);
        parts_pattern = PatternParts {
            machine: parts_pattern.machine(),
            tuples,
            strings: vec!['b', 'c'],
            group_count: 0,
            loop_var_count: 1,
            flags: parts_pattern.flags(),
            length: parts_pattern.match_length(),
        }
        .into();
        parts_pattern.to_binary().unwrap()
    };
    let err = CompiledPattern::from_binary(&bytes).unwrap_err();
    assert_eq!(err.to_string(), "malformed compiled pattern at state 1");
}

#[test]
fn binary_rejects_garbage() {
    let err = CompiledPattern::from_binary(&[0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err, CodecError::Binary(_)));
}

#[test]
fn match_length_combinators() {
    let one = MatchLength::exact(1);
    let two = MatchLength::exact(2);
    assert_eq!(one.then(two), MatchLength::exact(3));
    assert_eq!(one.either(two), MatchLength { min: 1, max: Some(2) });
    assert_eq!(two.repeat(1, Some(3)), MatchLength { min: 2, max: Some(6) });
    assert_eq!(two.repeat(0, None), MatchLength::UNKNOWN);
    assert_eq!(MatchLength::ZERO.repeat(2, None), MatchLength::ZERO);
}

#[test]
fn registers_and_matches() {
    let reg = GroupRegister {
        start: Some(2),
        end: Some(5),
    };
    assert_eq!(reg.text("xxabcxx"), Some("abc"));
    assert!(!GroupRegister::UNSET.is_set());
    let m = Match::new(2, 3);
    assert_eq!(m.end(), 5);
    assert_eq!(m.distance_before(9), 7);
    assert!(unset_registers().iter().all(|r| !r.is_set()));
}
