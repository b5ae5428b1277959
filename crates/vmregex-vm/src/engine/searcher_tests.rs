use vmregex_compiler::compile;
use vmregex_core::{Match, unset_registers};

use super::error::RuntimeError;
use super::searcher::Searcher;
use super::trace::{PrintTracer, Verbosity};

fn search(pattern: &str, text: &str) -> Option<Match> {
    search_in(pattern, text, 0, text.len())
}

fn search_in(pattern: &str, text: &str, start: usize, end: usize) -> Option<Match> {
    let pattern = compile(pattern).unwrap();
    let mut regs = unset_registers();
    Searcher::new().search(&pattern, text, start, end, &mut regs).unwrap()
}

fn search_back(pattern: &str, text: &str, limit: usize) -> Option<Match> {
    let pattern = compile(pattern).unwrap();
    let mut regs = unset_registers();
    Searcher::new()
        .search_back(&pattern, text, 0, limit, &mut regs)
        .unwrap()
}

fn attempts(lines: &[String]) -> usize {
    lines.iter().filter(|l| l.starts_with("attempt")).count()
}

#[test]
fn search_finds_the_first_start() {
    assert_eq!(search("abc", "xxabcxx"), Some(Match::new(2, 3)));
    assert_eq!(search("abc", "xxabxx"), None);
}

#[test]
fn search_offsets_are_absolute() {
    assert_eq!(search_in("a", "aXa", 1, 3), Some(Match::new(2, 1)));
}

#[test]
fn search_stays_inside_the_window() {
    assert_eq!(search_in("abc", "xxabcxx", 0, 4), None);
    assert_eq!(search_in("abc", "xxabcxx", 0, 5), Some(Match::new(2, 3)));
}

#[test]
fn empty_pattern_matches_at_the_start() {
    assert_eq!(search_in("", "abc", 1, 3), Some(Match::new(1, 0)));
}

#[test]
fn empty_match_at_the_window_end() {
    assert_eq!(search("$", "ab"), Some(Match::new(2, 0)));
}

#[test]
fn text_end_follows_the_window() {
    assert_eq!(search_in("c$", "abcx", 0, 3), Some(Match::new(2, 1)));
    assert_eq!(search_back("abc$", "xxabcxx", 5), Some(Match::new(2, 3)));
    assert_eq!(search_back("abc$", "xxabcxx", 6), None);
}

#[test]
fn search_reports_groups() {
    let pattern = compile("x(b)").unwrap();
    let mut regs = unset_registers();
    let found = Searcher::new().search(&pattern, "axb", 0, 3, &mut regs).unwrap();
    assert_eq!(found, Some(Match::new(1, 2)));
    assert_eq!(regs[0].range(), Some(2..3));
}

#[test]
fn first_end_prefers_the_earliest_end() {
    assert_eq!(search("abcd|bc", "abcd"), Some(Match::new(0, 4)));
    assert_eq!(search("<FE>abcd|bc", "abcd"), Some(Match::new(1, 2)));
    assert_eq!(search("<FirstEnd>abcd|bc", "abcd"), Some(Match::new(1, 2)));
}

#[test]
fn first_end_ties_keep_the_longer_unless_shortest() {
    assert_eq!(search("<FE><Max>a+b", "aab"), Some(Match::new(0, 3)));
    assert_eq!(search("<FE><Min>a+b", "aab"), Some(Match::new(1, 2)));
}

#[test]
fn search_rejects_bad_offsets() {
    let pattern = compile("a").unwrap();
    let mut regs = unset_registers();
    let mut searcher = Searcher::new();

    let err = searcher.search(&pattern, "é", 1, 2, &mut regs).unwrap_err();
    assert_eq!(err, RuntimeError::InvalidOffset { offset: 1 });
    let err = searcher.search(&pattern, "ab", 2, 1, &mut regs).unwrap_err();
    assert_eq!(err, RuntimeError::InvalidOffset { offset: 2 });
    let err = searcher.search(&pattern, "ab", 0, 9, &mut regs).unwrap_err();
    insta::assert_snapshot!(err, @"offset 9 is not a char boundary of the subject");
}

#[test]
fn search_skips_starts_too_close_to_the_end() {
    let pattern = compile("abc").unwrap();
    let mut regs = unset_registers();
    let mut tracer = PrintTracer::new(&pattern, Verbosity::Default);
    let found = Searcher::new()
        .search_with(&pattern, "xxxx", 0, 4, &mut regs, &mut tracer)
        .unwrap();
    assert_eq!(found, None);
    assert_eq!(attempts(tracer.lines()), 2);
}

#[test]
fn search_back_ends_before_the_limit() {
    let found = search_back("abc", "xxabcxxabcxx", 9).unwrap();
    assert_eq!(found, Match::new(2, 3));
    assert_eq!(found.distance_before(9), 7);
}

#[test]
fn search_back_match_may_touch_the_limit() {
    assert_eq!(search_back("abc", "xxabcxxabcxx", 10), Some(Match::new(7, 3)));
}

#[test]
fn search_back_prefers_the_highest_end() {
    assert_eq!(search_back("a+", "aaa", 3), Some(Match::new(0, 3)));
    assert_eq!(search_back("<Min>a+", "aaa", 3), Some(Match::new(2, 1)));
}

#[test]
fn search_back_first_end_returns_the_closest_start() {
    assert_eq!(search_back("<FE>a+", "aaa", 3), Some(Match::new(2, 1)));
}

#[test]
fn search_back_respects_the_lower_bound() {
    let pattern = compile("ab").unwrap();
    let mut regs = unset_registers();
    let found = Searcher::new()
        .search_back(&pattern, "abxab", 3, 5, &mut regs)
        .unwrap();
    assert_eq!(found, Some(Match::new(3, 2)));
    let found = Searcher::new()
        .search_back(&pattern, "abxab", 1, 4, &mut regs)
        .unwrap();
    assert_eq!(found, None);
}

#[test]
fn search_back_prunes_with_the_length_bound() {
    let pattern = compile("ab").unwrap();
    let mut regs = unset_registers();
    let mut tracer = PrintTracer::new(&pattern, Verbosity::Default);
    let found = Searcher::new()
        .search_back_with(&pattern, "xxxxxxxxab", 0, 10, &mut regs, &mut tracer)
        .unwrap();
    assert_eq!(found, Some(Match::new(8, 2)));
    // Starts more than 8 bytes before the best end cannot reach it.
    assert_eq!(attempts(tracer.lines()), 7);
}
