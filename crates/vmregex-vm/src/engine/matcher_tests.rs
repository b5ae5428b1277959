use std::ops::Range;

use vmregex_compiler::compile;
use vmregex_core::unset_registers;

use super::error::RuntimeError;
use super::searcher::{Searcher, SearcherBuilder};

fn run(searcher: &mut Searcher, pattern: &str, text: &str) -> (Option<usize>, Vec<Option<Range<usize>>>) {
    let pattern = compile(pattern).unwrap();
    let mut regs = unset_registers();
    let len = searcher.match_at(&pattern, text, 0, text.len(), &mut regs).unwrap();
    let groups = regs[..pattern.group_count()].iter().map(|r| r.range()).collect();
    (len, groups)
}

fn match_len(pattern: &str, text: &str) -> Option<usize> {
    run(&mut Searcher::new(), pattern, text).0
}

fn groups(pattern: &str, text: &str) -> Vec<Option<Range<usize>>> {
    run(&mut Searcher::new(), pattern, text).1
}

fn match_at(pattern: &str, text: &str, start: usize) -> Option<usize> {
    match_in(pattern, text, start, text.len())
}

fn match_in(pattern: &str, text: &str, start: usize, end: usize) -> Option<usize> {
    let pattern = compile(pattern).unwrap();
    let mut regs = unset_registers();
    Searcher::new().match_at(&pattern, text, start, end, &mut regs).unwrap()
}

#[test]
fn literal_matches_its_length() {
    assert_eq!(match_len("abc", "abcd"), Some(3));
    assert_eq!(match_len("abc", "abd"), None);
    assert_eq!(match_len("abc", "ab"), None);
}

#[test]
fn empty_pattern_matches_empty() {
    assert_eq!(match_len("", "xyz"), Some(0));
}

#[test]
fn lengths_are_in_bytes() {
    assert_eq!(match_len(".", "é"), Some(2));
    assert_eq!(match_len("é+", "ééx"), Some(4));
}

#[test]
fn groups_record_offsets() {
    assert_eq!(groups("(a)(b)", "ab"), vec![Some(0..1), Some(1..2)]);
    assert_eq!(groups("(a(b)c)", "abc"), vec![Some(0..3), Some(1..2)]);
}

#[test]
fn failed_match_clears_groups() {
    let (len, groups) = run(&mut Searcher::new(), "(a)x", "ab");
    assert_eq!(len, None);
    assert_eq!(groups, vec![None]);
}

#[test]
fn loop_keeps_the_last_iteration() {
    assert_eq!(groups("(a|b)*", "abb"), vec![Some(2..3)]);
}

#[test]
fn backtracking_restores_groups() {
    // `(ab)` captures first, then the path fails at `d` and `a` wins.
    assert_eq!(groups("(ab)d|a(b)", "abc"), vec![None, Some(1..2)]);
}

#[test]
fn interval_is_greedy_by_default() {
    assert_eq!(match_len("a{2,3}", "aaaa"), Some(3));
    assert_eq!(match_len("a{2,3}", "a"), None);
    assert_eq!(match_len("a{2}", "aaaa"), Some(2));
    assert_eq!(match_len("a{,2}", "aaaa"), Some(2));
    assert_eq!(match_len("a{2,}", "aaaa"), Some(4));
}

#[test]
fn lazy_interval_stops_at_its_minimum() {
    assert_eq!(match_len("a{2,3}?", "aaaa"), Some(2));
    assert_eq!(match_len("a{2,3}?b", "aaab"), Some(4));
}

#[test]
fn longest_mode_explores_every_split() {
    assert_eq!(match_len("<Max>a{2,3}", "aaaa"), Some(3));
    assert_eq!(match_len("<Max>(a|ab)", "ab"), Some(2));
    assert_eq!(match_len("<Max>(a|ab)(c|bcd)", "abcd"), Some(4));
}

#[test]
fn shortest_mode_prefers_less() {
    assert_eq!(match_len("<Min>(ab|a)", "ab"), Some(1));
    assert_eq!(match_len("<Min>a*", "aaa"), Some(0));
}

#[test]
fn first_match_takes_the_leftmost_alternative() {
    assert_eq!(match_len("(a|ab)", "ab"), Some(1));
    assert_eq!(match_len("(ab|a)", "ab"), Some(2));
}

#[test]
fn longest_mode_keeps_the_winning_groups() {
    assert_eq!(run(&mut Searcher::new(), "<Max>(a|ab)", "ab").1, vec![Some(0..2)]);
}

#[test]
fn lazy_star_in_first_match_mode() {
    assert_eq!(match_len("a*?", "aaa"), Some(0));
    assert_eq!(match_len("a*?b", "aab"), Some(3));
    assert_eq!(match_len("a+?", "aaa"), Some(1));
}

#[test]
fn anchors_over_the_whole_subject() {
    assert_eq!(match_len("^abc$", "abc"), Some(3));
    assert_eq!(match_len("^abc$", "abcx"), None);
    assert_eq!(match_at("^abc", "xabc", 1), None);
    assert_eq!(match_at("bc$", "abc", 1), Some(2));
}

#[test]
fn text_end_is_the_window_end() {
    assert_eq!(match_in("abc$", "abcx", 0, 3), Some(3));
    assert_eq!(match_in("ab$", "abcx", 0, 3), None);
    assert_eq!(match_in("a(?=b$)", "abcx", 0, 2), Some(1));
}

#[test]
fn lookahead_consumes_nothing() {
    assert_eq!(match_len("a(?=b)", "ab"), Some(1));
    assert_eq!(match_len("a(?=b)", "ac"), None);
    assert_eq!(match_len("a(?!b)", "ac"), Some(1));
    assert_eq!(match_len("a(?!b)", "ab"), None);
}

#[test]
fn positive_assertion_keeps_captures() {
    assert_eq!(groups("a(?=(b))", "ab"), vec![Some(1..2)]);
}

#[test]
fn negative_assertion_drops_captures() {
    let pattern = compile("a(?!(c))").unwrap();
    let mut regs = unset_registers();
    let len = Searcher::new().match_at(&pattern, "ab", 0, 2, &mut regs).unwrap();
    assert_eq!(len, Some(1));
    assert!(regs.iter().all(|r| !r.is_set()));
}

#[test]
fn lookbehind_checks_text_before_the_start() {
    assert_eq!(match_at("(?<=a)b", "ab", 1), Some(1));
    assert_eq!(match_at("(?<=a)b", "cb", 1), None);
    assert_eq!(match_at("(?<!a)b", "ab", 1), None);
    assert_eq!(match_at("(?<!a)b", "cb", 1), Some(1));
    assert_eq!(match_at("(?<!a)b", "b", 0), Some(1));
}

#[test]
fn lookbehind_of_varying_length() {
    assert_eq!(match_at("(?<=ab|c)d", "abd", 2), Some(1));
    assert_eq!(match_at("(?<=ab|c)d", "cd", 1), Some(1));
    assert_eq!(match_at("(?<=ab|c)d", "bd", 1), None);
}

#[test]
fn case_folding_follows_searcher_default() {
    let mut nocase = SearcherBuilder::new().case_sensitive(false).build();
    assert_eq!(run(&mut nocase, "ABC", "abc").0, Some(3));
    assert_eq!(match_len("ABC", "abc"), None);
}

#[test]
fn case_toggle_overrides_searcher_default() {
    assert_eq!(match_len("<NoCase>ABC", "abc"), Some(3));
    assert_eq!(match_len("<nocase>[A-C]+", "cab"), Some(3));

    let mut nocase = SearcherBuilder::new().case_sensitive(false).build();
    assert_eq!(run(&mut nocase, "<Case>ABC", "abc").0, None);
}

#[test]
fn back_reference_repeats_the_capture() {
    assert_eq!(match_len("(a+)b%1", "aabaa"), Some(5));
    assert_eq!(match_len("(a+)b%1", "aaba"), None);
    assert_eq!(match_len("<NoCase>(a)%1", "aA"), Some(2));
}

#[test]
fn back_reference_to_unset_group_fails() {
    assert_eq!(match_len("(a)?%1", "b"), None);
}

#[test]
fn classes_and_escapes() {
    assert_eq!(match_len("[a-c]+", "abcd"), Some(3));
    assert_eq!(match_len("[^a-c]", "d"), Some(1));
    assert_eq!(match_len("<digit>+", "123x"), Some(3));
    assert_eq!(match_len("%d%D", "1x"), Some(2));
    assert_eq!(match_len("%w+", "ab1 c"), Some(3));
    assert_eq!(match_len("<langle>", "<"), Some(1));
}

#[test]
fn word_anchors() {
    assert_eq!(match_len("%<foo%>", "foo bar"), Some(3));
    assert_eq!(match_len("%<foo%>", "food"), None);
    assert_eq!(match_at("%bbar", "foo bar", 4), Some(3));
    assert_eq!(match_at("%Bar", "foo bar", 5), Some(2));
}

#[test]
fn nullable_unbounded_interval_terminates() {
    assert_eq!(match_len("(a*){2,}b", "b"), Some(1));
    assert_eq!(match_len("(a*){2,}", "aab"), Some(2));
}

#[test]
fn nested_empty_star_terminates() {
    assert_eq!(match_len("(a*)*b", "aab"), Some(3));
}

#[test]
fn star_over_optional_body_keeps_looping() {
    assert_eq!(match_len("(a?)*b", "aab"), Some(3));
    assert_eq!(match_len("(a|)*b", "aab"), Some(3));
    assert_eq!(match_len("(a|)*", "aaa"), Some(3));
    assert_eq!(match_len("(a?)+", "aa"), Some(2));
    assert_eq!(match_len("(a?)*?b", "aab"), Some(3));
    assert_eq!(groups("(a?)*b", "aab"), vec![Some(2..2)]);
}

#[test]
fn star_over_zero_width_body_terminates() {
    assert_eq!(match_len("(a{0,2})*", "b"), Some(0));
    assert_eq!(match_len("(a{0,2})*", "aaaaab"), Some(5));
    assert_eq!(match_len("()%1*x", "x"), Some(1));
    assert_eq!(match_len("(?=a)*a", "a"), Some(1));
}

#[test]
fn stacked_optionals_compile_quickly() {
    let source = "(?:a?)?".repeat(40);
    assert_eq!(match_len(&source, "aaa"), Some(3));
    assert_eq!(match_len(&format!("{source}b"), "aab"), Some(3));
}

#[test]
fn runaway_backtracking_hits_the_stack_cap() {
    let pattern = compile("(a|b)*c").unwrap();
    let text = "a".repeat(1000);
    let mut searcher = SearcherBuilder::new().max_stack_bytes(4096).build();
    let mut regs = unset_registers();

    let err = searcher
        .match_at(&pattern, &text, 0, text.len(), &mut regs)
        .unwrap_err();
    assert_eq!(err, RuntimeError::StackOverflow { limit: 4096 });
    assert!(regs.iter().all(|r| !r.is_set()));
}

#[test]
fn searcher_is_reusable_after_overflow() {
    let mut searcher = SearcherBuilder::new().max_stack_bytes(4096).build();
    let runaway = compile("(a|b)*c").unwrap();
    let mut regs = unset_registers();
    let text = "a".repeat(1000);
    assert!(searcher.match_at(&runaway, &text, 0, text.len(), &mut regs).is_err());

    let simple = compile("a|b").unwrap();
    assert_eq!(searcher.match_at(&simple, "b", 0, 1, &mut regs), Ok(Some(1)));
}
