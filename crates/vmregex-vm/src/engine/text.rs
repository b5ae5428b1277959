//! Byte-offset navigation over UTF-8 subjects.

use vmregex_core::is_word_char;

use super::error::RuntimeError;

pub(crate) fn check_offset(text: &str, offset: usize) -> Result<(), RuntimeError> {
    if text.is_char_boundary(offset) {
        Ok(())
    } else {
        Err(RuntimeError::InvalidOffset { offset })
    }
}

/// The char starting at `pos`, if it lies before `end`.
pub(crate) fn char_at(text: &str, pos: usize, end: usize) -> Option<char> {
    text.get(pos..end)?.chars().next()
}

pub(crate) fn char_before(text: &str, pos: usize) -> Option<char> {
    text.get(..pos)?.chars().next_back()
}

/// Offset `n` chars before `pos`.
pub(crate) fn back_up(text: &str, pos: usize, n: usize) -> Option<usize> {
    let mut pos = pos;
    for _ in 0..n {
        pos -= char_before(text, pos)?.len_utf8();
    }
    Some(pos)
}

pub(crate) fn word_after(text: &str, pos: usize) -> bool {
    char_at(text, pos, text.len()).is_some_and(is_word_char)
}

pub(crate) fn word_before(text: &str, pos: usize) -> bool {
    char_before(text, pos).is_some_and(is_word_char)
}
