use indoc::indoc;

use crate::test_utils::dump;
use crate::{CompileError, SyntaxErrorKind, compile};

#[test]
fn anchors_only_where_they_bind() {
    insta::assert_snapshot!(dump("^abc$"), @r#"
    machine S0 → S17
    S0: ^ → S2
    S2: "abc" → S14
    S14: $ → S17
    S17: ε
    "#);
}

#[test]
fn misplaced_anchors_are_literals() {
    insta::assert_snapshot!(dump("a^b$c"), @r#"
    machine S0 → S17
    S0: "a^b$c" → S17
    S17: ε
    "#);
}

#[test]
fn lone_named_class() {
    insta::assert_snapshot!(dump("<alpha>x"), @r"
    machine S0 → S5
    S0: <alpha> → S2
    S2: 'x' → S5
    S5: ε
    ");
}

#[test]
fn bracket_and_shorthand_classes() {
    insta::assert_snapshot!(dump("[^a-c]%d"), @r"
    machine S0 → S5
    S0: [^a-c] → S2
    S2: <digit> → S5
    S5: ε
    ");
}

#[test]
fn class_expression_mixes_items() {
    insta::assert_snapshot!(dump("<a|x-z|DIGIT>"), @r"
    machine S0 → S1
    S0: [ax-z<digit>] → S1
    S1: ε
    ");
}

#[test]
fn unknown_class_name_is_literal_text() {
    insta::assert_snapshot!(dump("<bogus>"), @r#"
    machine S0 → S25
    S0: "<bogus>" → S25
    S25: ε
    "#);
}

#[test]
fn bracket_edge_chars() {
    let pattern = compile("[]a-]").unwrap();
    assert_eq!(pattern.describe(0), "[]a-]");

    let pattern = compile("[-z-a]").unwrap();
    assert_eq!(pattern.describe(0), "[-a-z]");
}

#[test]
fn escapes() {
    let described: Vec<String> = ["%w", "%W", "%s", "%S", "%v", "%D", "%.", "%%"]
        .iter()
        .map(|src| compile(src).unwrap().describe(0))
        .collect();
    assert_eq!(
        described.join(" "),
        "%w %W <space> <^space> <vspace> <^digit> '.' '%'"
    );
}

#[test]
fn word_anchors_do_not_take_postfix() {
    let out = dump("%<*");
    assert!(out.contains("S0: %< → S2"), "{out}");
    assert!(out.contains("'*'"), "{out}");
}

#[test]
fn unmatched_close_paren_is_ignored() {
    assert_eq!(dump("a)b"), dump("ab"));
}

#[test]
fn unclosed_groups_close_at_end() {
    let pattern = compile("(a(b").unwrap();
    assert_eq!(pattern.group_count(), 2);
}

#[test]
fn redundant_postfix_is_skipped() {
    assert_eq!(dump("a*+?"), dump("a*"));
    assert_eq!(dump("a+{2,3}"), dump("a+"));
}

#[test]
fn interval_forms() {
    let loops = |src: &str| {
        let pattern = compile(src).unwrap();
        pattern
            .dump()
            .lines()
            .filter(|l| l.contains("loop"))
            .map(|l| l.split(": ").nth(1).unwrap_or_default().split(" →").next().unwrap_or_default().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    assert_eq!(loops("a{3}"), "loop v0 {3,3}");
    assert_eq!(loops("a{3,}"), "loop v0 {3,}");
    assert_eq!(loops("a{,4}"), "loop v0 {0,4}");
    assert_eq!(loops("a{}"), "loop v0 {0,}");
    assert_eq!(loops("(?:a{2}){5}"), "loop v1 {2,2}, loop v0 {5,5}");
}

#[test]
fn interval_errors() {
    let err = |src: &str| compile(src).unwrap_err();
    assert_eq!(
        err("ab{3,2}"),
        CompileError::Syntax {
            offset: 2,
            kind: SyntaxErrorKind::IntervalBounds
        }
    );
    assert_eq!(
        err("a{70000}"),
        CompileError::Syntax {
            offset: 1,
            kind: SyntaxErrorKind::IntervalTooLarge
        }
    );
    assert_eq!(
        err("a{2"),
        CompileError::Syntax {
            offset: 1,
            kind: SyntaxErrorKind::MalformedInterval
        }
    );
    assert_eq!(
        err("a{x}"),
        CompileError::Syntax {
            offset: 1,
            kind: SyntaxErrorKind::MalformedInterval
        }
    );
    assert!(compile("a{65535}").is_ok());
}

#[test]
fn unterminated_bracket() {
    assert_eq!(
        compile("x[abc").unwrap_err(),
        CompileError::Syntax {
            offset: 1,
            kind: SyntaxErrorKind::UnterminatedClass
        }
    );
}

#[test]
fn nesting_limit() {
    assert!(compile(&format!("{}a{}", "(".repeat(20), ")".repeat(20))).is_ok());

    let err = compile(&"(".repeat(21)).unwrap_err();
    assert_eq!(err, CompileError::GroupNestingTooDeep { offset: 20 });
    assert_eq!(err.offset(), Some(20));
}

#[test]
fn offsets_are_bytes() {
    let err = compile("é{9,1}").unwrap_err();
    assert_eq!(err.offset(), Some(2));
}

#[test]
fn multi_line_pattern_keeps_newlines_literal() {
    let src = indoc! {"
        a
        b"};
    insta::assert_snapshot!(dump(src), @r#"
    machine S0 → S9
    S0: "a\nb" → S9
    S9: ε
    "#);
}
