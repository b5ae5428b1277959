use indoc::indoc;
use vmregex_core::{GroupRegister, Match};

use crate::{SearcherBuilder, SimpleSearcher, compile_pattern};

#[test]
fn compile_and_match_sets_groups() {
    let mut searcher = SimpleSearcher::new();
    let len = searcher.compile_and_match("(a)(b)", "abc", 0, 3).unwrap();

    assert_eq!(len, Some(2));
    assert_eq!(searcher.group_count(), 2);
    assert_eq!(searcher.group_reg(0).and_then(|r| r.range()), Some(0..1));
    assert_eq!(searcher.group_reg(1).and_then(|r| r.range()), Some(1..2));
    assert_eq!(searcher.group_reg(2), None);
    assert_eq!(searcher.last_match(), Some(Match::new(0, 2)));
}

#[test]
fn match_is_anchored_at_the_window_start() {
    let mut searcher = SimpleSearcher::new();
    assert_eq!(searcher.compile_and_match("abc", "xabc", 0, 4).unwrap(), None);
    assert_eq!(searcher.compile_and_match("abc", "xabc", 1, 3).unwrap(), Some(3));
    assert_eq!(searcher.last_match(), Some(Match::new(1, 3)));
}

#[test]
fn compile_and_search_reports_absolute_offsets() {
    let mut searcher = SimpleSearcher::new();
    let found = searcher.compile_and_search("abc", "xxabcxx", 0, 7).unwrap();
    assert_eq!(found, Some(Match::new(2, 3)));
    assert_eq!(searcher.last_match(), found);
}

#[test]
fn compile_and_search_back_stays_before_the_limit() {
    let mut searcher = SimpleSearcher::new();
    let found = searcher
        .compile_and_search_back("abc", "xxabcxxabcxx", 9)
        .unwrap()
        .unwrap();
    assert_eq!(found, Match::new(2, 3));
    assert_eq!(found.distance_before(9), 7);
}

#[test]
fn failed_operation_clears_state() {
    let mut searcher = SimpleSearcher::new();
    searcher.compile_and_search("(b)", "abc", 0, 3).unwrap();
    assert_eq!(searcher.group_text(0, "abc"), Some("b"));

    let found = searcher.compile_and_search("(z)", "abc", 0, 3).unwrap();
    assert_eq!(found, None);
    assert_eq!(searcher.last_match(), None);
    assert_eq!(searcher.group_reg(0), Some(&GroupRegister::UNSET));
}

#[test]
fn compile_error_resets_the_group_count() {
    let mut searcher = SimpleSearcher::new();
    searcher.compile_and_match("(a)", "a", 0, 1).unwrap();
    assert_eq!(searcher.group_count(), 1);

    assert!(searcher.compile_and_match("[a", "a", 0, 1).is_err());
    assert_eq!(searcher.group_count(), 0);
    assert_eq!(searcher.last_match(), None);
}

#[test]
fn compiled_pattern_is_reusable() {
    let pattern = compile_pattern("%d+").unwrap();
    let mut searcher = SimpleSearcher::new();
    let text = "a1 b22 c333";

    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(m) = searcher
        .search_for_pattern(&pattern, text, pos, text.len() - pos)
        .unwrap()
    {
        found.push(&text[m.range()]);
        pos = m.end();
    }
    assert_eq!(found, ["1", "22", "333"]);
}

#[test]
fn groups_beyond_the_tenth_do_not_capture() {
    let source = "(a)(b)(c)(d)(e)(f)(g)(h)(i)(j)(k)%9";
    let mut searcher = SimpleSearcher::new();
    let len = searcher.compile_and_match(source, "abcdefghijki", 0, 12).unwrap();
    assert_eq!(len, Some(12));
    assert_eq!(searcher.group_count(), 10);
    assert_eq!(searcher.group_text(9, "abcdefghijki"), Some("j"));
}

#[test]
fn searcher_default_case_applies() {
    let searcher = SearcherBuilder::new().case_sensitive(false).build();
    let mut simple = SimpleSearcher::with_searcher(searcher);
    assert_eq!(simple.compile_and_match("ABC", "abc", 0, 3).unwrap(), Some(3));
    assert_eq!(simple.compile_and_match("<Case>ABC", "abc", 0, 3).unwrap(), None);
}

#[test]
fn clear_group_regs_unsets_everything() {
    let mut searcher = SimpleSearcher::new();
    searcher.compile_and_match("(a)", "a", 0, 1).unwrap();
    searcher.clear_group_regs();
    assert!(searcher.group_regs().iter().all(|r| !r.is_set()));
}

#[test]
fn report_serializes_match_and_groups() {
    let text = "key = value";
    let mut searcher = SimpleSearcher::new();
    searcher
        .compile_and_search("(%w+) *= *(%w+)(;)?", text, 0, text.len())
        .unwrap();
    let report = searcher.report(text).unwrap();
    let json = serde_json::to_string_pretty(&report).unwrap();

    assert_eq!(
        json,
        indoc! {r#"
        {
          "start": 0,
          "len": 11,
          "text": "key = value",
          "groups": [
            {
              "start": 0,
              "end": 3,
              "text": "key"
            },
            {
              "start": 6,
              "end": 11,
              "text": "value"
            },
            null
          ]
        }"#}
    );
}
