//! Character classification.
//!
//! Named classes delegate to the Unicode general category of a char.
//! Case folding is a single-char mapping; multi-char expansions keep the
//! original char.

use serde::{Deserialize, Serialize};
use unicode_general_category::{GeneralCategory, get_general_category};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedClass {
    Alpha,
    Digit,
    Upper,
    Lower,
    Alphanum,
    Space,
    Punct,
    Newline,
    VSpace,
}

impl NamedClass {
    pub fn from_name(name: &str) -> Option<Self> {
        let class = match name.to_ascii_lowercase().as_str() {
            "alpha" => Self::Alpha,
            "digit" => Self::Digit,
            "upper" => Self::Upper,
            "lower" => Self::Lower,
            "alphanum" => Self::Alphanum,
            "space" => Self::Space,
            "punct" => Self::Punct,
            "newline" => Self::Newline,
            "vspace" => Self::VSpace,
            _ => return None,
        };
        Some(class)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Digit => "digit",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Alphanum => "alphanum",
            Self::Space => "space",
            Self::Punct => "punct",
            Self::Newline => "newline",
            Self::VSpace => "vspace",
        }
    }

    pub fn matches(self, c: char) -> bool {
        match self {
            Self::Alpha => is_alpha(c),
            Self::Digit => is_digit(c),
            Self::Upper => get_general_category(c) == GeneralCategory::UppercaseLetter,
            Self::Lower => get_general_category(c) == GeneralCategory::LowercaseLetter,
            Self::Alphanum => is_word_char(c),
            Self::Space => c.is_whitespace(),
            Self::Punct => c.is_ascii_punctuation() || is_punct_category(get_general_category(c)),
            Self::Newline => is_newline(c),
            Self::VSpace => is_newline(c) || matches!(c, '\u{0C}' | '\u{85}'),
        }
    }
}

/// Named single characters usable inside `<...>` class expressions.
pub fn named_literal(name: &str) -> Option<char> {
    let c = match name.to_ascii_lowercase().as_str() {
        "langle" => '<',
        "rangle" => '>',
        "vbar" => '|',
        "caret" => '^',
        "squote" => '\'',
        "dquote" => '"',
        "star" => '*',
        "question" => '?',
        "percent" => '%',
        "dot" | "period" => '.',
        "plus" => '+',
        "lsquare" => '[',
        "rsquare" => ']',
        "lparen" => '(',
        "rparen" => ')',
        "lbrace" => '{',
        "rbrace" => '}',
        "dollar" => '$',
        "backslash" => '\\',
        "return" => '\r',
        "linefeed" => '\n',
        "tab" => '\t',
        "nul" | "null" => '\0',
        _ => return None,
    };
    Some(c)
}

fn is_alpha(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

fn is_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

fn is_punct_category(cat: GeneralCategory) -> bool {
    matches!(
        cat,
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0B}' | '\u{2028}' | '\u{2029}')
}

/// Word characters are alphabetic or decimal digits.
pub fn is_word_char(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

pub fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn upper_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassItem {
    /// Inclusive range; a single char is `Range(c, c)`.
    Range(char, char),
    Named(NamedClass),
}

impl ClassItem {
    fn contains(&self, c: char) -> bool {
        match *self {
            Self::Range(lo, hi) => lo <= c && c <= hi,
            Self::Named(class) => class.matches(c),
        }
    }
}

/// Bracketed or `<...>` character class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharClass {
    pub items: Vec<ClassItem>,
    pub negated: bool,
}

impl CharClass {
    pub fn new(negated: bool) -> Self {
        Self {
            items: Vec::new(),
            negated,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.items.push(ClassItem::Range(c, c));
    }

    /// Adds `lo..=hi`, swapping reversed bounds.
    pub fn push_range(&mut self, lo: char, hi: char) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.items.push(ClassItem::Range(lo, hi));
    }

    pub fn push_named(&mut self, class: NamedClass) {
        self.items.push(ClassItem::Named(class));
    }

    pub fn matches(&self, c: char, case_sensitive: bool) -> bool {
        let hit = if case_sensitive {
            self.contains(c)
        } else {
            self.contains(c) || self.contains(fold_case(c)) || self.contains(upper_case(c))
        };
        hit != self.negated
    }

    fn contains(&self, c: char) -> bool {
        self.items.iter().any(|item| item.contains(c))
    }
}
